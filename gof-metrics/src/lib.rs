pub mod model;
pub mod kolmogorov;
pub mod statistical;
pub mod evaluator;
pub mod expected;
pub mod grouping;
pub mod goodness;
pub mod runner;

pub use model::*;
pub use statistical::*;
pub use evaluator::*;
pub use expected::*;
pub use grouping::*;
pub use goodness::*;
pub use runner::*;
