// Infrastructure layer
pub mod closure_compiler;
pub mod file_system;
pub mod graph_resolver;
pub mod processors;
pub mod source_maps;

pub use closure_compiler::*;
pub use file_system::*;
pub use graph_resolver::*;
pub use processors::*;
