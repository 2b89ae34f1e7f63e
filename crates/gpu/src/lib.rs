//! Context lifecycle, context budgeting, input controls, and fallback
//! diagnostics for the star globe.
//!
//! Everything here is plain single-threaded state: the wasm viewer owns one
//! instance of each and drives them from browser events.

pub mod context;
pub mod controls;
pub mod diagnostics;
pub mod registry;

pub use context::*;
pub use controls::*;
pub use diagnostics::*;
pub use registry::*;
