pub mod config;
pub mod palette;
pub mod points;
pub mod projector;

pub use config::*;
pub use palette::*;
pub use points::*;
pub use projector::*;
