//! Event timing and memory accounting

pub mod clock;
pub mod report;
pub mod scope;
pub mod sinks;
pub mod timer;

pub use clock::*;
pub use scope::*;
pub use sinks::*;
pub use timer::*;
