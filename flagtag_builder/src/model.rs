use crate::constant::*;
use crate::parser::BuildError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The normalized names of a flag, parsed from a name spec such as `"*n,name"`.
///
/// Names are held with their markers: short names as `-n`, long names as `--name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagNames {
    shorts: Vec<String>,
    longs: Vec<String>,
    required: bool,
    force: bool,
}

impl FlagNames {
    /// Parse a comma separated name spec.
    ///
    /// Each entry may be bare (`n`, `name`) or marked (`-n`, `--name`).
    /// A bare single character is a short name, anything longer is a long name.
    /// The spec may lead with `*` (required) and/or `!` (force).
    ///
    /// Returns `Ok(None)` for the ignore spec `-`.
    ///
    /// ### Example
    /// ```
    /// # use flagtag_builder as flagtag;
    /// use flagtag::FlagNames;
    ///
    /// let names = FlagNames::parse("*n, --name").unwrap().unwrap();
    /// assert_eq!(names.shorts(), &["-n".to_string()]);
    /// assert_eq!(names.longs(), &["--name".to_string()]);
    /// assert!(names.is_required());
    /// assert_eq!(names.name(), "--name");
    ///
    /// assert_eq!(FlagNames::parse("-").unwrap(), None);
    /// assert!(FlagNames::parse(" , ").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Option<Self>, BuildError> {
        let trimmed = spec.trim();

        if trimmed == IGNORE_SPEC {
            return Ok(None);
        }

        let mut required = false;
        let mut force = false;
        let mut rest = trimmed;

        loop {
            if let Some(stripped) = rest.strip_prefix(REQUIRED_PREFIX) {
                required = true;
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix(FORCE_PREFIX) {
                force = true;
                rest = stripped;
            } else {
                break;
            }
        }

        let mut shorts = Vec::default();
        let mut longs = Vec::default();

        for entry in rest.split(NAME_DELIMITER) {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            if let Some(long) = entry.strip_prefix(LONG_MARKER) {
                validate(spec, long)?;
                longs.push(format!("{LONG_MARKER}{long}"));
            } else if let Some(short) = entry.strip_prefix(SHORT_MARKER) {
                validate(spec, short)?;

                if short.chars().count() == 1 {
                    shorts.push(format!("{SHORT_MARKER}{short}"));
                } else {
                    longs.push(format!("{LONG_MARKER}{short}"));
                }
            } else {
                validate(spec, entry)?;

                if entry.chars().count() == 1 {
                    shorts.push(format!("{SHORT_MARKER}{entry}"));
                } else {
                    longs.push(format!("{LONG_MARKER}{entry}"));
                }
            }
        }

        if shorts.is_empty() && longs.is_empty() {
            return Err(BuildError::InvalidNames {
                spec: spec.to_string(),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed name spec '{spec}': shorts={shorts:?}, longs={longs:?}, required={required}, force={force}.");
        }

        Ok(Some(Self {
            shorts,
            longs,
            required,
            force,
        }))
    }

    /// The short names, each as `-n`.
    pub fn shorts(&self) -> &[String] {
        &self.shorts
    }

    /// The long names, each as `--name`.
    pub fn longs(&self) -> &[String] {
        &self.longs
    }

    /// Every alias; short names first.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.shorts.iter().chain(self.longs.iter())
    }

    /// The display name: the first long name, otherwise the first short name.
    pub fn name(&self) -> &str {
        self.longs
            .first()
            .or_else(|| self.shorts.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether the spec carried the `*` prefix.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the spec carried the `!` prefix.
    pub fn is_force(&self) -> bool {
        self.force
    }
}

fn validate(spec: &str, name: &str) -> Result<(), BuildError> {
    // Names may not carry further markers, delimiters or whitespace.
    if name.is_empty()
        || name.starts_with(SHORT_MARKER)
        || name.contains(VALUE_DELIMITER)
        || name.contains(char::is_whitespace)
    {
        Err(BuildError::InvalidNames {
            spec: spec.to_string(),
        })
    } else {
        Ok(())
    }
}
