//! Runtime evaluation for SimpleScript programs

mod evaluator;

pub use evaluator::{SimpleEvaluator, DEFAULT_MAX_DEPTH};
