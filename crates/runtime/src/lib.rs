pub mod frame;
pub mod host;
pub mod listeners;
pub mod scheduler;

pub use frame::*;
pub use host::*;
pub use listeners::*;
pub use scheduler::*;
