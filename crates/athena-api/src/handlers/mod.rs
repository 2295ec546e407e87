//! Request handlers.

pub mod analyze;
pub mod health;
pub mod translate;

pub use analyze::*;
pub use health::*;
pub use translate::*;
