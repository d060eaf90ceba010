//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod bus;
pub mod demo;

pub use bus::{bus_task, Display};
pub use demo::demo_task;
