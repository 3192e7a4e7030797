//! Report module - run summary and the mismatch log

pub mod error_log;
pub mod summary;

pub use error_log::*;
pub use summary::*;
