//! Background Tasks Module
//!
//! Periodic maintenance that runs for the lifetime of a cache instance.
//!
//! # Tasks
//! - Expiry sweep: removes expired entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
