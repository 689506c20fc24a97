use clap::Parser;
use pmp_rag_router::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Ask(args) => cli::ask::run(args).await,
        Command::Cache(command) => cli::cache::run(command).await,
        Command::Migrate => cli::migrate::run().await,
    }
}
