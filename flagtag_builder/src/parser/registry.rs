use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::api::{ConversionError, Declaration, Decoded, FlagValue, ParserTable, Slot};
use crate::constant::*;
use crate::model::FlagNames;
use crate::parser::base::*;
use crate::parser::printer::{Printer, Row};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

enum Binding<'a> {
    Direct(&'a mut dyn FlagValue),
    Decoded(Decoded<'a>),
}

impl<'a> FlagValue for Binding<'a> {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        match self {
            Binding::Direct(value) => value.set(raw),
            Binding::Decoded(value) => value.set(raw),
        }
    }

    fn display(&self) -> String {
        match self {
            Binding::Direct(value) => value.display(),
            Binding::Decoded(value) => value.display(),
        }
    }

    fn reset(&mut self) {
        match self {
            Binding::Direct(value) => value.reset(),
            Binding::Decoded(value) => value.reset(),
        }
    }
}

/// The normalized state of one declared flag.
pub struct Descriptor<'a> {
    names: FlagNames,
    usage: Option<String>,
    default: Option<String>,
    env: Option<String>,
    required: bool,
    binding: Binding<'a>,
    assigned: bool,
    defaulted: bool,
    error: Option<Arc<ConversionError>>,
}

impl<'a> Descriptor<'a> {
    /// The display name: the first long name, otherwise the first short name.
    pub fn name(&self) -> &str {
        self.names.name()
    }

    /// All the names of this flag.
    pub fn names(&self) -> &FlagNames {
        &self.names
    }

    /// The usage text.
    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// The declared default literal.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The environment variable sourcing the default.
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// Whether this flag must be assigned.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether this is a force flag.
    pub fn is_force(&self) -> bool {
        self.names.is_force()
    }

    /// Whether a value was assigned (by default, environment or command line).
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Whether this is a force flag assigned on the command line.
    pub fn is_forced(&self) -> bool {
        self.names.is_force() && self.assigned && !self.defaulted
    }

    /// The conversion error of the latest assignment, if it failed.
    pub fn error(&self) -> Option<&ConversionError> {
        self.error.as_deref()
    }

    pub(crate) fn shared_error(&self) -> Option<&Arc<ConversionError>> {
        self.error.as_ref()
    }

    /// The current value, rendered through [`FlagValue::display`].
    pub fn display(&self) -> String {
        self.binding.display()
    }

    pub(crate) fn assign(&mut self, raw: &str) {
        if self.defaulted {
            // The first command line value replaces (rather than extends) the default.
            self.binding.reset();
            self.defaulted = false;
        }

        self.assigned = true;

        match self.binding.set(raw) {
            Ok(()) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Assigned '{raw}' to {}.", self.name());
                }

                self.error = None;
            }
            Err(error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Failed to assign '{raw}' to {}: {error}.", self.name());
                }

                self.error.replace(Arc::new(error));
            }
        }
    }

    fn row(&self) -> Row {
        let mut left = self.names.all().cloned().collect::<Vec<String>>().join(", ");

        if let Some(literal) = &self.default {
            left.push_str(&format!("[{VALUE_DELIMITER}{literal}]"));
        }

        if self.required {
            left.push(REQUIRED_PREFIX);
        }

        Row::new(
            left,
            self.usage.clone().unwrap_or_default(),
            self.env.as_ref().map(|variable| format!("${variable}")),
        )
    }
}

impl<'a> std::fmt::Debug for Descriptor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("names", &self.names)
            .field("required", &self.required)
            .field("assigned", &self.assigned)
            .field("value", &self.display())
            .field("error", &self.error)
            .finish()
    }
}

/// The ordered, name indexed flags of one record.
///
/// The registry mutably borrows the record's fields for its lifetime.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{Declaration, Flag, Flags, Registry};
///
/// #[derive(Default)]
/// struct Record {
///     count: u32,
/// }
///
/// impl Flags for Record {
///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
///         declaration.add(Flag::new(&mut self.count, "c,count").default("3"));
///     }
/// }
///
/// let mut record = Record::default();
/// let mut declaration = Declaration::default();
/// record.declare(&mut declaration);
///
/// let mut registry = Registry::build(declaration).unwrap();
/// assert_eq!(registry.descriptors().len(), 1);
/// assert_eq!(registry.lookup("-c").unwrap().name(), "--count");
/// assert_eq!(registry.value("--count"), Some("3"));
///
/// registry.scan(&["-c", "5"]).unwrap();
/// assert_eq!(registry.value("-c"), Some("5"));
/// drop(registry);
/// assert_eq!(record.count, 5);
/// ```
pub struct Registry<'a> {
    descriptors: Vec<Descriptor<'a>>,
    lookup: HashMap<String, usize>,
    values: HashMap<String, String>,
    usage: String,
}

impl<'a> std::fmt::Debug for Registry<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("descriptors", &self.descriptors)
            .field("values", &self.values)
            .finish()
    }
}

impl<'a> Registry<'a> {
    /// Build the registry, reading environment defaults from the process environment
    /// and resolving structured parsers against [`ParserTable::default`].
    pub fn build(declaration: Declaration<'a>) -> Result<Self, BuildError> {
        Self::build_with(declaration, &ParserTable::default(), |variable| {
            env::var(variable).ok()
        })
    }

    /// Build the registry against an explicit parser table and environment.
    ///
    /// Flags are processed in declaration order; the first failure aborts the build.
    /// Defaults already applied to earlier flags remain in place.
    pub fn build_with(
        declaration: Declaration<'a>,
        parsers: &ParserTable,
        environment: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BuildError> {
        let mut registry = Self {
            descriptors: Vec::default(),
            lookup: HashMap::default(),
            values: HashMap::default(),
            usage: String::default(),
        };

        for flag in declaration.flags {
            let names = match FlagNames::parse(&flag.spec)? {
                Some(names) => names,
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring flag with spec '{}'.", flag.spec);
                    }

                    continue;
                }
            };
            let binding = match flag.slot {
                Slot::Value(value) => Binding::Direct(value),
                Slot::Structured { parser, target } => match parsers.get(&parser) {
                    Some(decoder) => Binding::Decoded(Decoded::new(decoder, target)),
                    None => {
                        return Err(BuildError::UnknownParser {
                            name: names.name().to_string(),
                            parser,
                        });
                    }
                },
            };
            let required = flag.required || names.is_required();
            let mut descriptor = Descriptor {
                names,
                usage: flag.usage,
                default: flag.default,
                env: flag.env,
                required,
                binding,
                assigned: false,
                defaulted: false,
                error: None,
            };

            let effective = descriptor
                .env
                .as_deref()
                .and_then(&environment)
                .filter(|value| !value.is_empty())
                .or_else(|| descriptor.default.clone());

            if let Some(literal) = effective {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Defaulting {} to '{literal}'.", descriptor.name());
                }

                if let Err(source) = descriptor.binding.set(&literal) {
                    return Err(BuildError::InvalidDefault {
                        name: descriptor.name().to_string(),
                        literal,
                        source,
                    });
                }

                descriptor.assigned = true;
                descriptor.defaulted = true;
            }

            registry.insert(descriptor)?;
        }

        registry.usage = Printer::terminal(
            registry
                .descriptors
                .iter()
                .map(Descriptor::row)
                .collect(),
        )
        .render();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Built registry of {} flags ({} names).",
                registry.descriptors.len(),
                registry.lookup.len()
            );
        }

        Ok(registry)
    }

    fn insert(&mut self, descriptor: Descriptor<'a>) -> Result<(), BuildError> {
        let index = self.descriptors.len();

        for name in descriptor.names.all() {
            if self.lookup.contains_key(name) {
                return Err(BuildError::DuplicateFlagName(name.clone()));
            }

            self.lookup.insert(name.clone(), index);
        }

        self.descriptors.push(descriptor);

        if self.descriptors[index].assigned {
            self.record(index);
        }

        Ok(())
    }

    /// Record the display string of the descriptor at `index` under each of its names.
    pub(crate) fn record(&mut self, index: usize) {
        let descriptor = &self.descriptors[index];
        let value = descriptor.display();

        for name in descriptor.names.all() {
            self.values.insert(name.clone(), value.clone());
        }
    }

    pub(crate) fn index(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub(crate) fn descriptor_mut(&mut self, index: usize) -> &mut Descriptor<'a> {
        &mut self.descriptors[index]
    }

    /// The descriptors, in declaration order.
    pub fn descriptors(&self) -> &[Descriptor<'a>] {
        &self.descriptors
    }

    /// Find the descriptor for a name (ex: `-n`, `--name`).
    pub fn lookup(&self, name: &str) -> Option<&Descriptor<'a>> {
        self.index(name).map(|index| &self.descriptors[index])
    }

    /// The rendered usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The latest display string of every assigned flag, keyed by each of its names.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// The latest display string recorded for `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub(crate) fn into_values(self) -> HashMap<String, String> {
        self.values
    }
}
