pub mod celestial;
pub mod vec;

pub use celestial::*;
pub use vec::*;
