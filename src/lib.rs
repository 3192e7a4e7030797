//! txt2xlsx: SAP text extract to Excel conversion library
//!
//! Reads pipe-delimited text exports, normalizes their dates, writes one
//! workbook per file and logs files whose row counts do not add up.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
