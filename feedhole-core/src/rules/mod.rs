// Rule system for scoring feed posts.
// - engine.rs: the scoring function, weights and the RuleEngine wrapper
// - patterns.rs: pattern catalog grouped into PatternSet categories

pub mod engine;
pub mod patterns;

pub use engine::*;
pub use patterns::PatternSet;
