//! Pipeline module - scan, read, normalize, write and reconcile

pub mod batch;
pub mod config;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod reconcile;
pub mod scanner;
pub mod table;
pub mod writer;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use normalize::*;
pub use reader::*;
pub use reconcile::*;
pub use scanner::*;
pub use table::*;
pub use writer::*;
