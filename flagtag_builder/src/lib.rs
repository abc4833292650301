//! Builder module for `flagtag`.
//! See [documentation root](https://docs.rs/flagtag/latest/flagtag/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod command;
mod constant;
pub mod ext;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use command::*;
pub use model::*;
pub use parser::{
    BuildError, ConsoleInterface, Descriptor, Issue, ParseError, Registry, UserInterface,
    ValidationErrors,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
