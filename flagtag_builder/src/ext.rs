//! Bundled [`FlagValue`](crate::FlagValue) implementations for common command line inputs.
mod file;
mod pidfile;
mod time;

pub use file::*;
pub use pidfile::*;
pub use time::*;
