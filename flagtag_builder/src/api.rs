mod core;
mod field;
mod flag;
mod structured;
mod value;

pub use self::core::*;
pub use flag::*;
pub use structured::*;
pub use value::*;
