use std::sync::Arc;

use thiserror::Error;

use crate::api::ConversionError;

/// Failures while building a [`crate::Registry`] from a declaration.
///
/// These are fatal: no token is scanned after a build failure.
/// Defaults already applied to earlier flags are not rolled back.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The name spec declares no usable name.
    #[error("invalid flag names '{spec}'")]
    InvalidNames {
        /// The offending spec.
        spec: String,
    },

    /// Two flags share an alias.
    #[error("flag `{0}` repeat")]
    DuplicateFlagName(String),

    /// The default (or environment) literal was rejected by the flag's value.
    #[error("default '{literal}' of flag `{name}` invalid: {source}")]
    InvalidDefault {
        /// The display name of the flag.
        name: String,
        /// The rejected literal.
        literal: String,
        /// The underlying conversion error.
        #[source]
        source: ConversionError,
    },

    /// The flag names a structured parser which is not registered.
    #[error("flag `{name}` uses unknown parser '{parser}'")]
    UnknownParser {
        /// The display name of the flag.
        name: String,
        /// The requested parser.
        parser: String,
    },
}

/// Failures while parsing tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The registry could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A token resolves to no registered name (or a cluster character does not).
    /// Aborts the scan.
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),

    /// A flag received more than one value.
    /// Aborts the scan.
    #[error("too many({count}) values for flag `{name}`")]
    TooManyValues {
        /// The flag token as written.
        name: String,
        /// The number of values received.
        count: usize,
    },

    /// Every problem found by the validation pass.
    #[error(transparent)]
    Invalid(ValidationErrors),
}

/// A single problem found by the validation pass.
#[derive(Debug, Error)]
pub enum Issue {
    /// A required flag was never assigned.
    #[error("required argument `{0}` missing")]
    MissingRequired(String),

    /// An assigned flag holds a conversion error.
    #[error("assigned argument `{name}` invalid: {cause}")]
    InvalidValue {
        /// The display name of the flag.
        name: String,
        /// The conversion error, shared with the flag's descriptor.
        #[source]
        cause: Arc<ConversionError>,
    },
}

impl Issue {
    /// The display name of the flag this issue concerns.
    pub fn name(&self) -> &str {
        match self {
            Issue::MissingRequired(name) => name,
            Issue::InvalidValue { name, .. } => name,
        }
    }
}

/// The aggregate of all validation issues from one parse, rendered one per line.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<Issue>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    /// Iterate the issues in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// The number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no issues.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self
            .0
            .iter()
            .map(|issue| issue.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display() {
        // Setup
        let mut errors = ValidationErrors::default();
        errors.push(Issue::MissingRequired("--name".to_string()));
        errors.push(Issue::InvalidValue {
            name: "-c".to_string(),
            cause: Arc::new(ConversionError::invalid::<u32>("x")),
        });

        // Execute
        let error = ParseError::Invalid(errors);

        // Verify
        assert_eq!(
            error.to_string(),
            "required argument `--name` missing\nassigned argument `-c` invalid: cannot convert 'x' to u32"
        );
        assert_matches!(error, ParseError::Invalid(errors) if errors.len() == 2);
    }

    #[test]
    fn validation_errors_empty() {
        let errors = ValidationErrors::default();
        assert!(errors.is_empty());
        assert_eq!(errors.to_string(), "");
    }

    #[test]
    fn issue_name() {
        assert_eq!(Issue::MissingRequired("--a".to_string()).name(), "--a");
        assert_eq!(
            Issue::InvalidValue {
                name: "-b".to_string(),
                cause: Arc::new(ConversionError::message("")),
            }
            .name(),
            "-b"
        );
    }

    #[test]
    fn issue_source_chain() {
        // Setup
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let issue = Issue::InvalidValue {
            name: "--config".to_string(),
            cause: Arc::new(ConversionError::io("app.json", io)),
        };

        // Execute
        let cause = std::error::Error::source(&issue).unwrap();
        let root = cause.source().unwrap();

        // Verify
        assert_eq!(
            issue.to_string(),
            "assigned argument `--config` invalid: cannot read 'app.json': gone"
        );
        assert_matches!(
            cause.downcast_ref::<Arc<ConversionError>>().map(|cause| cause.as_ref()),
            Some(ConversionError::Io { path, .. }) if path == "app.json"
        );
        assert_eq!(
            root.downcast_ref::<std::io::Error>().unwrap().kind(),
            std::io::ErrorKind::NotFound
        );
    }

    #[test]
    fn build_error_display() {
        assert_eq!(
            BuildError::DuplicateFlagName("-n".to_string()).to_string(),
            "flag `-n` repeat"
        );
        assert_eq!(
            ParseError::from(BuildError::InvalidNames {
                spec: ",".to_string()
            })
            .to_string(),
            "invalid flag names ','"
        );
        assert_eq!(
            ParseError::TooManyValues {
                name: "--a".to_string(),
                count: 3
            }
            .to_string(),
            "too many(3) values for flag `--a`"
        );
    }
}
