mod base;
mod interface;
mod printer;
mod registry;
mod scanner;

pub use base::*;
pub use interface::{ConsoleInterface, UserInterface};
pub use registry::{Descriptor, Registry};

pub(crate) use printer::{Printer, Row};

#[cfg(test)]
pub(crate) use interface::util;
