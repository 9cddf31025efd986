pub mod distributions;
pub mod goodness_of_fit;
pub mod system;
