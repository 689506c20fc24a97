//! Ask command - answers one query and prints the routing outcome

use std::fmt::Write as _;

use clap::Args;

use crate::infrastructure::services::QueryOutcome;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer
    pub query: String,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let (config, secrets) = super::bootstrap()?;

    let state = crate::create_app_state_with_config(&config, &secrets).await?;
    let outcome = state.pipeline.query(&args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render(&outcome));
    }

    Ok(())
}

fn render(outcome: &QueryOutcome) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}\n", outcome.answer);
    let _ = writeln!(out, "Route:   {} ({})", outcome.strategy, outcome.reason);
    if let Some(similarity) = outcome.similarity {
        let _ = writeln!(out, "Cache:   hit, similarity {:.3}", similarity);
    }
    let _ = writeln!(out, "Elapsed: {} ms", outcome.elapsed_ms);

    if !outcome.sources.is_empty() {
        let _ = writeln!(out, "\nSources:");
        for (i, source) in outcome.sources.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} [{}] score {:.3}",
                i + 1,
                source.title,
                source.id,
                source.score
            );
        }
    }

    if let Some(web_results) = &outcome.web_results {
        let _ = writeln!(out, "\n{}", web_results);
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::RouteStrategy;
    use crate::infrastructure::services::SourceSummary;

    fn outcome(strategy: RouteStrategy) -> QueryOutcome {
        QueryOutcome {
            answer: "Apple sells hardware and services.".to_string(),
            strategy,
            reason: "best document score 0.82".to_string(),
            cache_hit: false,
            similarity: None,
            sources: vec![SourceSummary {
                id: "doc_0123456789".to_string(),
                title: "Apple 10-K".to_string(),
                preview: "Apple designs...".to_string(),
                metadata: HashMap::new(),
                score: 0.82,
            }],
            web_results: None,
            elapsed_ms: 42,
        }
    }

    #[test]
    fn test_render_vector_answer() {
        let text = render(&outcome(RouteStrategy::VectorRetrieve));

        assert!(text.starts_with("Apple sells hardware and services.\n"));
        assert!(text.contains("VECTOR_RETRIEVE"));
        assert!(text.contains("1. Apple 10-K [doc_0123456789] score 0.820"));
        assert!(!text.contains("Cache:"));
    }

    #[test]
    fn test_render_cache_hit() {
        let mut hit = outcome(RouteStrategy::CacheHit);
        hit.cache_hit = true;
        hit.similarity = Some(0.97);
        hit.sources.clear();

        let text = render(&hit);

        assert!(text.contains("Cache:   hit, similarity 0.970"));
        assert!(!text.contains("Sources:"));
    }
}
