use thiserror::Error;

/// Behaviour to receive a raw `&str` from the Cli and store it as a typed value.
///
/// Every field that participates in parsing is reached through this trait.
/// `flagtag` provides implementations for the primitive kinds (see [`FlagValue` implementors](#implementors));
/// custom types opt in by implementing it directly.
///
/// An empty `raw` designates "flag present without a value".
/// Boolean-like implementations interpret this as presence (`true`), whereas most others reject it.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ConversionError, FlagValue};
///
/// #[derive(Default)]
/// struct Level(u8);
///
/// impl FlagValue for Level {
///     fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
///         self.0 = match raw {
///             "low" => 1,
///             "high" => 9,
///             _ => return Err(ConversionError::message(format!("unknown level '{raw}'"))),
///         };
///         Ok(())
///     }
///
///     fn display(&self) -> String {
///         if self.0 > 5 { "high" } else { "low" }.to_string()
///     }
/// }
///
/// let mut level = Level::default();
/// level.set("high").unwrap();
/// assert_eq!(level.display(), "high");
/// assert!(level.set("medium").is_err());
/// ```
pub trait FlagValue {
    /// Parse `raw` and store the typed result.
    fn set(&mut self, raw: &str) -> Result<(), ConversionError>;

    /// Render the current value as a display string.
    ///
    /// Feeding this string back through [`FlagValue::set`] should reproduce the same value.
    fn display(&self) -> String;

    /// Discard accumulated state.
    ///
    /// Called once before the first Cli assignment of a flag whose value came from a default.
    /// Only accumulating values (ex: `Vec<T>`) need to override this.
    fn reset(&mut self) {}
}

/// The ways a [`FlagValue`] may reject its input.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The token could not be converted to the target type.
    #[error("cannot convert '{token}' to {type_name}")]
    InvalidConversion {
        /// The offending input.
        token: String,
        /// The name of the target type.
        type_name: &'static str,
    },

    /// A file (or stdin) backing the value could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A remote source backing the value could not be fetched.
    #[error("cannot fetch '{url}': {source}")]
    Http {
        /// The requested url.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Structured data could not be decoded.
    #[error("cannot decode: {source}")]
    Decode {
        /// The underlying error.
        #[from]
        source: serde_json::Error,
    },

    /// A free form rejection, typically raised by custom [`FlagValue`] implementations.
    #[error("{0}")]
    Message(String),
}

impl ConversionError {
    /// Create a free form conversion error.
    pub fn message(message: impl Into<String>) -> Self {
        ConversionError::Message(message.into())
    }

    /// Create a conversion error for the target type `T`.
    pub fn invalid<T: ?Sized>(token: impl Into<String>) -> Self {
        ConversionError::InvalidConversion {
            token: token.into(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        ConversionError::Http {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;

    #[test]
    fn invalid_names_type() {
        let error = ConversionError::invalid::<u32>("abc");
        assert_matches!(
            &error,
            ConversionError::InvalidConversion {
                token,
                type_name: "u32"
            } if token == "abc"
        );
        assert_eq!(error.to_string(), "cannot convert 'abc' to u32");
    }

    #[test]
    fn io_display() {
        let error = ConversionError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_contains!(error.to_string(), "missing.txt");
        assert_contains!(error.to_string(), "not found");
    }

    #[test]
    fn decode_from() {
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        let error = ConversionError::from(source);
        assert_matches!(error, ConversionError::Decode { .. });
    }
}
