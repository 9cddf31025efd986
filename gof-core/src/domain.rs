pub mod distribution;
pub mod series;
pub mod result;
pub mod settings;

pub use distribution::*;
pub use series::*;
pub use result::*;
pub use settings::*;
