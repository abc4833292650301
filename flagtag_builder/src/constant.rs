pub(crate) const SHORT_MARKER: &str = "-";
pub(crate) const LONG_MARKER: &str = "--";
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const NAME_DELIMITER: char = ',';
pub(crate) const REQUIRED_PREFIX: char = '*';
pub(crate) const FORCE_PREFIX: char = '!';
pub(crate) const IGNORE_SPEC: &str = "-";
pub(crate) const HELP_SPEC: &str = "!h,help";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const STDIN_NAME: &str = "-";
