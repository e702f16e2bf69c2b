pub mod analyzer;
pub mod arena;
pub mod bullet;
pub mod env;
pub mod episode;
pub mod geometry;
pub mod hunter;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod tank;

pub use analyzer::{summarize, EvaluationSummary, Grade};
pub use arena::Arena;
pub use env::*;
pub use episode::*;
pub use policy::*;
