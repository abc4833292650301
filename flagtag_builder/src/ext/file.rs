use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::{self, Read};

use crate::api::{ConversionError, FlagValue};
use crate::constant::STDIN_NAME;

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

fn is_stdin_name(raw: &str) -> bool {
    raw.is_empty() || raw == STDIN_NAME
}

fn is_url(raw: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| raw.starts_with(scheme))
}

fn fetch(url: &str) -> Result<reqwest::blocking::Response, ConversionError> {
    reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|error| ConversionError::http(url, error))
}

/// The full content of a file, read during parsing.
///
/// An empty value or `-` reads stdin instead.
/// Displays as the name it was read from, so that re-assigning the display re-reads the same source.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ext::File, FlagValue};
///
/// let mut source = tempfile::NamedTempFile::new().unwrap();
/// std::io::Write::write_all(&mut source, b"hello").unwrap();
///
/// let mut file = File::default();
/// file.set(source.path().to_str().unwrap()).unwrap();
/// assert_eq!(file.content(), "hello");
/// assert!(!file.is_stdin());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    data: Vec<u8>,
}

impl File {
    /// The name the content was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the content came from stdin.
    pub fn is_stdin(&self) -> bool {
        self.name == STDIN_NAME
    }

    /// The raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The content as text, replacing invalid utf-8.
    pub fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl FlagValue for File {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        if is_stdin_name(raw) {
            let mut data = Vec::default();
            io::stdin()
                .read_to_end(&mut data)
                .map_err(|error| ConversionError::io(STDIN_NAME, error))?;
            self.name = STDIN_NAME.to_string();
            self.data = data;
        } else {
            self.data = fs::read(raw).map_err(|error| ConversionError::io(raw, error))?;
            self.name = raw.to_string();
        }

        Ok(())
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

/// An open byte stream: a file, the body of an `http://` or `https://` url, or stdin when the value is empty or `-`.
///
/// The stream is opened during parsing and read by the program afterwards.
/// Unassigned readers yield no bytes.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ext::Reader, FlagValue};
/// use std::io::Read;
///
/// let mut reader = Reader::default();
/// reader.set_reader("in memory".as_bytes());
///
/// let mut content = String::default();
/// reader.read_to_string(&mut content).unwrap();
/// assert_eq!(content, "in memory");
/// ```
#[derive(Default)]
pub struct Reader {
    name: String,
    source: Option<Box<dyn Read>>,
}

impl Reader {
    /// The name the stream was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the stream is stdin.
    pub fn is_stdin(&self) -> bool {
        self.name == STDIN_NAME
    }

    /// Whether a stream is currently open.
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Replace the underlying stream, keeping the name.
    pub fn set_reader(&mut self, reader: impl Read + 'static) {
        self.source.replace(Box::new(reader));
    }

    /// Drop the underlying stream.
    pub fn close(&mut self) {
        self.source.take();
    }
}

impl Read for Reader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.source.as_mut() {
            Some(source) => source.read(buf),
            None => Ok(0),
        }
    }
}

impl FlagValue for Reader {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        if is_stdin_name(raw) {
            self.name = STDIN_NAME.to_string();
            self.set_reader(io::stdin());
        } else if is_url(raw) {
            let response = fetch(raw)?;
            self.name = raw.to_string();
            self.set_reader(response);
        } else {
            let file = fs::File::open(raw).map_err(|error| ConversionError::io(raw, error))?;
            self.name = raw.to_string();
            self.set_reader(file);
        }

        Ok(())
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}
