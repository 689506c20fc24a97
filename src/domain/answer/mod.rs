//! Answer generation contract and its context

mod context;
mod generator;

pub use context::{AnswerContext, NO_CONTEXT_ANSWER};
pub use generator::AnswerGenerator;

#[cfg(test)]
pub use generator::MockAnswerGenerator;
