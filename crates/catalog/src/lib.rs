pub mod chunk;
pub mod loader;
pub mod named;
pub mod parse;
pub mod record;

pub use chunk::*;
pub use loader::*;
pub use parse::*;
pub use record::*;
