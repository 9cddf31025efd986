pub mod chi_square;
pub mod kolmogorov_smirnov;

pub use chi_square::*;
pub use kolmogorov_smirnov::*;
