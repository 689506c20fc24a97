//! LLM provider implementations

mod answer_generator;
mod factory;
mod openai;

pub use answer_generator::LlmAnswerGenerator;
pub use factory::LlmProviderFactory;
pub use openai::OpenAiProvider;
