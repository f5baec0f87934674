//! Command handlers for the `tiq` binary.

pub mod analyze;
pub mod create;
pub mod list;
pub mod process;
pub mod stats;
pub mod trends;
pub mod watch;
