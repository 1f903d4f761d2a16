// Processors module
pub mod license_normalizer;
pub mod path_flatten;
pub mod wrapper_generator;

pub use license_normalizer::*;
pub use path_flatten::*;
pub use wrapper_generator::*;
