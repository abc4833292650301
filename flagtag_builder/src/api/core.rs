use std::collections::HashMap;
use std::env;

use crate::api::flag::*;
use crate::api::structured::ParserTable;
use crate::parser::{BuildError, ParseError, Registry};

/// The introspection result of a successful parse.
///
/// Holds the latest display string of every assigned flag (by default, environment or command line), keyed by each of its names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parsed {
    values: HashMap<String, String>,
}

impl Parsed {
    pub(crate) fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// The display string recorded for `name` (ex: `-n`, `--name`).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether anything was recorded for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate every recorded `(name, display)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn declare<'a, F: Flags + ?Sized>(record: &'a mut F) -> Declaration<'a> {
    let mut declaration = Declaration::default();
    record.declare(&mut declaration);
    declaration
}

/// Render the usage text of a record, without scanning.
///
/// Building applies defaults to the record, as parsing would.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{usage, Declaration, Flag, Flags};
///
/// #[derive(Default)]
/// struct Record {
///     port: u16,
/// }
///
/// impl Flags for Record {
///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
///         declaration.add(Flag::new(&mut self.port, "p,port").default("80").usage("Listen port."));
///     }
/// }
///
/// let text = usage(&mut Record::default()).unwrap();
/// assert!(text.contains("-p, --port[=80]"));
/// assert!(text.contains("Listen port."));
/// ```
pub fn usage<F: Flags + ?Sized>(record: &mut F) -> Result<String, BuildError> {
    let registry = Registry::build(declare(record))?;
    Ok(registry.usage().to_string())
}

/// Parse `tokens` into the record.
///
/// The registry is built fresh (applying environment and declared defaults), then the tokens are scanned.
/// See [`Registry::scan`] for the scanning rules.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{parse, Declaration, Flag, Flags, ParseError};
///
/// #[derive(Default)]
/// struct Record {
///     all: bool,
///     long: bool,
///     count: u32,
/// }
///
/// impl Flags for Record {
///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
///         declaration
///             .add(Flag::new(&mut self.all, "a,all"))
///             .add(Flag::new(&mut self.long, "l"))
///             .add(Flag::new(&mut self.count, "*c,count"));
///     }
/// }
///
/// let mut record = Record::default();
/// let parsed = parse(&["-al", "--count=2"], &mut record).unwrap();
/// assert!(record.all && record.long);
/// assert_eq!(record.count, 2);
/// assert_eq!(parsed.get("-c"), Some("2"));
///
/// let error = parse(&["-a"], &mut Record::default()).unwrap_err();
/// assert_eq!(error.to_string(), "required argument `--count` missing");
/// ```
pub fn parse<F: Flags + ?Sized>(tokens: &[&str], record: &mut F) -> Result<Parsed, ParseError> {
    parse_with(tokens, record, &ParserTable::default())
}

/// Parse `tokens` into the record, resolving structured parsers against `parsers`.
pub fn parse_with<F: Flags + ?Sized>(
    tokens: &[&str],
    record: &mut F,
    parsers: &ParserTable,
) -> Result<Parsed, ParseError> {
    let mut registry =
        Registry::build_with(declare(record), parsers, |variable| env::var(variable).ok())?;
    registry.scan(tokens)?;
    Ok(Parsed::new(registry.into_values()))
}

/// Parse the process arguments ([`env::args`], skipping the program name) into the record.
pub fn parse_args<F: Flags + ?Sized>(record: &mut F) -> Result<Parsed, ParseError> {
    let arguments: Vec<String> = env::args().skip(1).collect();
    parse(
        arguments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .as_slice(),
        record,
    )
}
