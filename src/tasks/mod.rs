//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweeper: removes expired AI cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
