use crate::command::DispatchError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Fraction of the terminal the usage text may occupy.
const TARGET_PERCENT: usize = 95;

// Enough for three average words.
const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Column widths of `left  middle  right` rows; only the middle column wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Columns {
    pub(crate) padding: usize,
    pub(crate) left: usize,
    pub(crate) middle: usize,
    pub(crate) right: Option<usize>,
}

impl Columns {
    /// Resize the middle column so that a row fits within `total_width`.
    ///
    /// The middle column never drops below `MINIMUM_MIDDLE_WIDTH`, even when this overflows the total.
    pub(crate) fn fit(self, total_width: usize) -> Self {
        let fixed = self.left
            + self.padding
            + self.right.map_or(0, |right| right + self.padding);
        let target = total_width * TARGET_PERCENT / 100;
        let wanted = self.middle.max(MINIMUM_MIDDLE_WIDTH);
        let middle = if wanted + fixed <= target {
            wanted
        } else {
            target.saturating_sub(fixed).max(MINIMUM_MIDDLE_WIDTH)
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Fitting columns (fixed: {fixed}) into {target} of {total_width}: middle {middle}.");
        }

        Self { middle, ..self }
    }

    /// Render one row, continuing the wrapped middle column on subsequent lines.
    pub(crate) fn render(
        &self,
        indent: usize,
        left: &str,
        middle: &str,
        right: Option<&str>,
    ) -> Vec<String> {
        let margin = " ".repeat(indent);
        let gap = " ".repeat(self.padding);
        let left_width = self.left;
        let middle_width = self.middle;
        let right = right.filter(|item| !item.is_empty() && self.right.is_some());
        let mut parts = chunk(middle, middle_width).into_iter();

        let head = match (parts.next(), right) {
            (Some(part), Some(item)) => {
                format!("{margin}{left:left_width$}{gap}{part:middle_width$}{gap}{item}")
            }
            (Some(part), None) => format!("{margin}{left:left_width$}{gap}{part}"),
            (None, Some(item)) => {
                format!("{margin}{left:left_width$}{gap}{:middle_width$}{gap}{item}", "")
            }
            (None, None) => format!("{margin}{left}"),
        };

        std::iter::once(head)
            .chain(parts.map(|part| format!("{margin}{:left_width$}{gap}{part}", "")))
            .collect()
    }
}

/// Greedily fill lines of at most `width` characters; words wider than a line are split with a trailing `-`.
fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    // Room for one character and the hyphen.
    let width = width.max(2);
    let mut lines = Vec::default();
    let mut current: Vec<char> = Vec::default();

    for word in paragraph.split_whitespace() {
        let mut characters: Vec<char> = word.chars().collect();

        if !current.is_empty() {
            if current.len() + 1 + characters.len() <= width {
                current.push(' ');
                current.append(&mut characters);
                continue;
            }

            lines.push(current.drain(..).collect::<String>());
        }

        while characters.len() > width {
            let rest = characters.split_off(width - 1);
            characters.push('-');
            lines.push(characters.into_iter().collect::<String>());
            characters = rest;
        }

        current = characters;
    }

    if !current.is_empty() {
        lines.push(current.into_iter().collect());
    }

    lines
}

/// The output boundary of the dispatcher.
pub trait UserInterface {
    /// Print a message to the standard channel.
    fn print(&self, message: String);

    /// Report a dispatch failure to the error channel.
    fn print_error(&self, error: &DispatchError);
}

/// Prints to stdout/stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &DispatchError) {
        eprintln!("{error}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use super::UserInterface;
    use crate::command::DispatchError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Captures output; clones share the same buffers.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryInterface {
        messages: Rc<RefCell<Vec<String>>>,
        error: Rc<RefCell<Option<String>>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, error: &DispatchError) {
            self.error.borrow_mut().replace(error.to_string());
        }
    }

    impl InMemoryInterface {
        /// Take everything printed so far (newline joined) and the last error.
        pub(crate) fn consume(&self) -> (Option<String>, Option<String>) {
            let messages = self.messages.take();
            let message = (!messages.is_empty()).then(|| messages.join("\n"));
            (message, self.error.take())
        }

        pub(crate) fn consume_message(&self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, None);
            message.unwrap()
        }
    }
}
