//! Foundation types shared by every ossim crate.
//!
//! Contains the error taxonomy, wall-clock timestamps, the input events the
//! shell reacts to, the output sink abstraction, and the session config.

pub mod config;
pub mod error;
pub mod input;
pub mod sink;
pub mod time;
