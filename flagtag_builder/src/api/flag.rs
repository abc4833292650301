use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::structured::*;
use crate::api::value::*;
use crate::constant::{HELP_MESSAGE, HELP_SPEC};

pub(crate) enum Slot<'a> {
    Value(&'a mut dyn FlagValue),
    Structured {
        parser: String,
        target: Box<dyn StructuredTarget + 'a>,
    },
}

/// The declaration of a single flag: its storage, name spec and metadata.
///
/// Typically produced by `#[derive(Flags)]`, but may be written by hand inside [`Flags::declare`].
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{Declaration, Flag};
///
/// let mut count: u32 = 0;
/// let mut declaration = Declaration::default();
/// declaration.add(
///     Flag::new(&mut count, "c,count")
///         .usage("How many times.")
///         .default("1")
///         .env("APP_COUNT"),
/// );
/// assert_eq!(declaration.len(), 1);
/// ```
pub struct Flag<'a> {
    pub(crate) slot: Slot<'a>,
    pub(crate) spec: String,
    pub(crate) usage: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) env: Option<String>,
    pub(crate) required: bool,
}

impl<'a> Flag<'a> {
    /// Declare a flag over a [`FlagValue`] field.
    ///
    /// The `spec` is a comma separated list of names, see [`crate::FlagNames::parse`].
    pub fn new<T: FlagValue + 'a>(value: &'a mut T, spec: impl Into<String>) -> Self {
        Self::with_slot(Slot::Value(value), spec)
    }

    /// Declare a flag over a structured field, decoded by the parser registered as `parser`.
    ///
    /// ### Example
    /// ```
    /// # use flagtag_builder as flagtag;
    /// use flagtag::{parse, Declaration, Flag, Flags};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Default, Deserialize, Serialize)]
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// #[derive(Default)]
    /// struct Record {
    ///     point: Point,
    /// }
    ///
    /// impl Flags for Record {
    ///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
    ///         declaration.add(Flag::structured(&mut self.point, "p,point", "json"));
    ///     }
    /// }
    ///
    /// let mut record = Record::default();
    /// parse(&["-p", r#"{"x":1,"y":2}"#], &mut record).unwrap();
    /// assert_eq!(record.point.x, 1);
    /// assert_eq!(record.point.y, 2);
    /// ```
    pub fn structured<T>(value: &'a mut T, spec: impl Into<String>, parser: impl Into<String>) -> Self
    where
        T: DeserializeOwned + Serialize + 'a,
    {
        Self::with_slot(
            Slot::Structured {
                parser: parser.into(),
                target: Box::new(Structured::new(value)),
            },
            spec,
        )
    }

    fn with_slot(slot: Slot<'a>, spec: impl Into<String>) -> Self {
        Self {
            slot,
            spec: spec.into(),
            usage: None,
            default: None,
            env: None,
            required: false,
        }
    }

    /// Document the usage text for this flag.
    /// If repeated, only the final text will apply.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage.replace(usage.into());
        self
    }

    /// The literal applied through the flag's value before scanning.
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default.replace(literal.into());
        self
    }

    /// The environment variable which, when set and non-empty, supersedes the default literal.
    pub fn env(mut self, variable: impl Into<String>) -> Self {
        self.env.replace(variable.into());
        self
    }

    /// Require this flag to be assigned (by default, environment or command line).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The ordered flag declarations of a record.
#[derive(Default)]
pub struct Declaration<'a> {
    pub(crate) flags: Vec<Flag<'a>>,
}

impl<'a> Declaration<'a> {
    /// Append a flag.
    /// Declaration order is the usage rendering order.
    pub fn add(&mut self, flag: Flag<'a>) -> &mut Self {
        self.flags.push(flag);
        self
    }

    /// Append every flag of a nested record.
    pub fn embed<F: Flags + ?Sized>(&mut self, flags: &'a mut F) -> &mut Self {
        flags.declare(self);
        self
    }

    /// The number of declared flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flag has been declared.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Behaviour of a record whose fields are command line flags.
///
/// Implement via `#[derive(Flags)]`, or by hand.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{parse, Declaration, Flag, Flags};
///
/// #[derive(Default)]
/// struct Record {
///     verbose: bool,
///     name: String,
/// }
///
/// impl Flags for Record {
///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
///         declaration
///             .add(Flag::new(&mut self.verbose, "v,verbose"))
///             .add(Flag::new(&mut self.name, "*name").usage("Who to greet."));
///     }
/// }
///
/// let mut record = Record::default();
/// parse(&["-v", "--name", "flagtag"], &mut record).unwrap();
/// assert!(record.verbose);
/// assert_eq!(record.name, "flagtag");
/// ```
pub trait Flags {
    /// Add a [`Flag`] for every participating field, in field order.
    fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>);
}

/// A help flag (`-h`, `--help`) for embedding into a record.
///
/// The flag is a force flag: once assigned, required flags are not validated.
#[derive(Debug, Default)]
pub struct Helper {
    /// Whether help was requested.
    pub help: bool,
}

impl Flags for Helper {
    fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
        declaration.add(Flag::new(&mut self.help, HELP_SPEC).usage(HELP_MESSAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Inner {
        a: u8,
        b: Vec<String>,
    }

    impl Flags for Inner {
        fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
            declaration
                .add(Flag::new(&mut self.a, "a"))
                .add(Flag::new(&mut self.b, "b"));
        }
    }

    #[derive(Default)]
    struct Outer {
        helper: Helper,
        inner: Inner,
        c: bool,
    }

    impl Flags for Outer {
        fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
            declaration
                .embed(&mut self.helper)
                .embed(&mut self.inner)
                .add(Flag::new(&mut self.c, "c").required());
        }
    }

    #[test]
    fn declaration_embed() {
        // Setup
        let mut outer = Outer::default();
        let mut declaration = Declaration::default();

        // Execute
        outer.declare(&mut declaration);

        // Verify
        assert_eq!(declaration.len(), 4);
        let specs: Vec<&str> = declaration.flags.iter().map(|f| f.spec.as_str()).collect();
        assert_eq!(specs, vec![HELP_SPEC, "a", "b", "c"]);
        assert!(declaration.flags[3].required);
        assert_eq!(declaration.flags[0].usage, Some(HELP_MESSAGE.to_string()));
    }

    #[test]
    fn flag_builder() {
        // Setup
        let mut value: u32 = 0;

        // Execute
        let flag = Flag::new(&mut value, "v")
            .usage("first")
            .usage("second")
            .default("1")
            .env("VALUE")
            .required();

        // Verify
        assert_eq!(flag.spec, "v");
        assert_eq!(flag.usage, Some("second".to_string()));
        assert_eq!(flag.default, Some("1".to_string()));
        assert_eq!(flag.env, Some("VALUE".to_string()));
        assert!(flag.required);
        assert!(matches!(flag.slot, Slot::Value(_)));
    }

    #[test]
    fn flag_structured() {
        let mut value: Vec<u32> = Vec::default();
        let flag = Flag::structured(&mut value, "v", "json");
        assert!(matches!(flag.slot, Slot::Structured { parser, .. } if parser == "json"));
    }

    #[test]
    fn declaration_empty() {
        let declaration = Declaration::default();
        assert!(declaration.is_empty());
    }
}
