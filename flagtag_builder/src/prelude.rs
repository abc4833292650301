//! Traits which, typically, may be imported without concern: `use flagtag::prelude::*`.

pub use crate::api::{FlagValue, Flags};
