use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::Read;

use crate::api::value::*;
use crate::constant::STDIN_NAME;

/// A named structured parser: turn the raw flag value into a json document.
pub type Decoder = fn(&str) -> Result<serde_json::Value, ConversionError>;

/// Decode the raw value itself as json.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::decode_json;
///
/// let value = decode_json(r#"{"port": 80}"#).unwrap();
/// assert_eq!(value["port"], 80);
/// ```
pub fn decode_json(raw: &str) -> Result<serde_json::Value, ConversionError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read the file named by the raw value and decode its contents as json.
/// The name `-` reads stdin.
pub fn decode_json_file(raw: &str) -> Result<serde_json::Value, ConversionError> {
    let content = if raw == STDIN_NAME {
        let mut buffer = String::default();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|error| ConversionError::io(raw, error))?;
        buffer
    } else {
        fs::read_to_string(raw).map_err(|error| ConversionError::io(raw, error))?
    };

    Ok(serde_json::from_str(&content)?)
}

/// The structured parsers available to flags declared with a `parser` name.
///
/// The default table holds `json` ([`decode_json`]) and `jsonfile` ([`decode_json_file`]).
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ConversionError, ParserTable};
///
/// fn decode_pair(raw: &str) -> Result<serde_json::Value, ConversionError> {
///     match raw.split_once(':') {
///         Some((key, value)) => Ok(serde_json::json!({ key: value })),
///         None => Err(ConversionError::message("expected key:value")),
///     }
/// }
///
/// let table = ParserTable::default().register("pair", decode_pair);
/// assert!(table.get("pair").is_some());
/// assert!(table.get("jsonfile").is_some());
/// assert!(ParserTable::empty().get("json").is_none());
/// ```
#[derive(Clone)]
pub struct ParserTable {
    decoders: HashMap<String, Decoder>,
}

impl Default for ParserTable {
    fn default() -> Self {
        Self::empty()
            .register("json", decode_json)
            .register("jsonfile", decode_json_file)
    }
}

impl ParserTable {
    /// A table without any parsers.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::default(),
        }
    }

    /// Register a parser under `name`, replacing any previous registration.
    pub fn register(mut self, name: impl Into<String>, decoder: Decoder) -> Self {
        self.decoders.insert(name.into(), decoder);
        self
    }

    /// Find the parser registered under `name`.
    pub fn get(&self, name: &str) -> Option<Decoder> {
        self.decoders.get(name).copied()
    }
}

/// Type erased storage for a structured field.
pub(crate) trait StructuredTarget {
    fn assign(&mut self, value: serde_json::Value) -> Result<(), ConversionError>;

    fn display(&self) -> String;
}

pub(crate) struct Structured<'a, T> {
    target: &'a mut T,
}

impl<'a, T> Structured<'a, T> {
    pub(crate) fn new(target: &'a mut T) -> Self {
        Self { target }
    }
}

impl<'a, T> StructuredTarget for Structured<'a, T>
where
    T: DeserializeOwned + Serialize,
{
    fn assign(&mut self, value: serde_json::Value) -> Result<(), ConversionError> {
        *self.target = serde_json::from_value(value)?;
        Ok(())
    }

    fn display(&self) -> String {
        serde_json::to_string(&*self.target).unwrap_or_default()
    }
}

/// A structured field bound to its resolved parser.
pub(crate) struct Decoded<'a> {
    decoder: Decoder,
    target: Box<dyn StructuredTarget + 'a>,
}

impl<'a> Decoded<'a> {
    pub(crate) fn new(decoder: Decoder, target: Box<dyn StructuredTarget + 'a>) -> Self {
        Self { decoder, target }
    }
}

impl<'a> FlagValue for Decoded<'a> {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        let value = (self.decoder)(raw)?;
        self.target.assign(value)
    }

    fn display(&self) -> String {
        self.target.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
    struct Config {
        host: String,
        port: u16,
    }

    #[test]
    fn decoded_json() {
        // Setup
        let mut config = Config::default();
        let mut decoded = Decoded::new(decode_json, Box::new(Structured::new(&mut config)));

        // Execute
        decoded.set(r#"{"host":"localhost","port":8080}"#).unwrap();

        // Verify
        assert_eq!(decoded.display(), r#"{"host":"localhost","port":8080}"#);
        drop(decoded);
        assert_eq!(
            config,
            Config {
                host: "localhost".to_string(),
                port: 8080,
            }
        );
    }

    #[test]
    fn decoded_json_invalid() {
        // Setup
        let mut config = Config::default();
        let mut decoded = Decoded::new(decode_json, Box::new(Structured::new(&mut config)));

        // Execute
        let syntax = decoded.set("{").unwrap_err();
        let shape = decoded.set(r#"{"host":1}"#).unwrap_err();

        // Verify
        assert_matches!(syntax, ConversionError::Decode { .. });
        assert_matches!(shape, ConversionError::Decode { .. });
        drop(decoded);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn decoded_json_file() {
        // Setup
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"host":"example.org","port":443}}"#).unwrap();
        let path = file.path().display().to_string();
        let mut config = Config::default();
        let mut decoded = Decoded::new(decode_json_file, Box::new(Structured::new(&mut config)));

        // Execute
        decoded.set(&path).unwrap();

        // Verify
        drop(decoded);
        assert_eq!(config.host, "example.org");
        assert_eq!(config.port, 443);
    }

    #[test]
    fn decode_json_file_missing() {
        let error = decode_json_file("/definitely/not/here.json").unwrap_err();
        assert_matches!(error, ConversionError::Io { path, .. } if path == "/definitely/not/here.json");
    }

    #[test]
    fn parser_table() {
        let table = ParserTable::default();
        assert!(table.get("json").is_some());
        assert!(table.get("jsonfile").is_some());
        assert!(table.get("yaml").is_none());

        let table = table.register("yaml", decode_json);
        assert!(table.get("yaml").is_some());
    }
}
