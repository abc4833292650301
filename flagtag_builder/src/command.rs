use serde::Serialize;
use std::env;
use std::fmt::Display;
use std::marker::PhantomData;
use std::path::Path;
use thiserror::Error;

use crate::api::{Declaration, Flags};
use crate::constant::SHORT_MARKER;
use crate::parser::{
    ConsoleInterface, Descriptor, ParseError, Printer, Registry, Row, UserInterface,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Failures while dispatching a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A positional word named no command, at a point where a command is expected.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The command's flags could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The command's handler failed.
    #[error("{0:#}")]
    Handler(anyhow::Error),
}

/// The execution context handed to a command handler.
pub struct Context<'a, T> {
    program: String,
    argv: T,
    tokens: Vec<String>,
    usage: String,
    interface: &'a dyn UserInterface,
}

impl<'a, T> Context<'a, T> {
    /// The parsed flags.
    pub fn argv(&self) -> &T {
        &self.argv
    }

    /// The parsed flags, mutably.
    pub fn argv_mut(&mut self) -> &mut T {
        &mut self.argv
    }

    /// The tokens following the command path, as scanned.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The leading tokens before the first flag.
    ///
    /// Any later non-flag token is the value of the flag it follows.
    pub fn positionals(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .take_while(|token| !token.starts_with(SHORT_MARKER))
            .map(String::as_str)
            .collect()
    }

    /// The program and command path (ex: `app remote add`).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The rendered usage of the command's flags.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Print a message through the application's user interface.
    pub fn print(&self, message: impl Display) {
        self.interface.print(message.to_string());
    }

    /// Print a value as pretty json through the application's user interface.
    pub fn print_json<S: Serialize + ?Sized>(&self, value: &S) -> anyhow::Result<()> {
        self.interface.print(serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

trait Runner {
    fn run(
        &self,
        program: &str,
        about: Option<&str>,
        tokens: &[&str],
        interface: &dyn UserInterface,
    ) -> Result<(), DispatchError>;
}

struct Bound<T, H> {
    handler: H,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, H> Runner for Bound<T, H>
where
    T: Flags + Default,
    H: Fn(&mut Context<'_, T>) -> anyhow::Result<()>,
{
    fn run(
        &self,
        program: &str,
        about: Option<&str>,
        tokens: &[&str],
        interface: &dyn UserInterface,
    ) -> Result<(), DispatchError> {
        let mut argv = T::default();
        let usage = {
            let mut declaration = Declaration::default();
            argv.declare(&mut declaration);
            let mut registry = Registry::build(declaration).map_err(ParseError::from)?;
            let result = registry.scan(tokens);

            if registry.descriptors().iter().any(Descriptor::is_forced) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Force flag assigned for '{program}', printing usage.");
                }

                print_usage(program, about, registry.usage(), interface);
                return Ok(());
            }

            result?;
            registry.usage().to_string()
        };

        let mut context = Context {
            program: program.to_string(),
            argv,
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            usage,
            interface,
        };

        (self.handler)(&mut context).map_err(DispatchError::Handler)
    }
}

fn print_usage(program: &str, about: Option<&str>, usage: &str, interface: &dyn UserInterface) {
    interface.print(format!("usage: {program} [flags]"));

    if let Some(about) = about {
        interface.print(String::default());
        interface.print(about.to_string());
    }

    if !usage.is_empty() {
        interface.print(String::default());
        interface.print("flags:".to_string());
        interface.print(usage.to_string());
    }
}

/// A node of the command tree: a name, an optional handler and sub-commands.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{App, Command, Context, Declaration, Flag, Flags};
///
/// #[derive(Default)]
/// struct Argv {
///     name: String,
/// }
///
/// impl Flags for Argv {
///     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
///         declaration.add(Flag::new(&mut self.name, "*n,name"));
///     }
/// }
///
/// let app = App::new("app").command(
///     Command::group("remote", "Manage remotes.").register(Command::new(
///         "add",
///         "Add a remote.",
///         |ctx: &mut Context<Argv>| {
///             ctx.print(format!("added {}", ctx.argv().name));
///             Ok(())
///         },
///     )),
/// );
///
/// app.run(&["remote", "add", "-n", "origin"]).unwrap();
/// assert!(app.run(&["remote", "add"]).is_err());
/// assert!(app.run(&["nope"]).is_err());
/// ```
pub struct Command {
    name: String,
    about: Option<String>,
    runner: Option<Box<dyn Runner>>,
    children: Vec<Command>,
}

impl Command {
    /// Create a command whose flags are the record `T`, handled by `handler`.
    pub fn new<T, H>(name: impl Into<String>, about: impl Into<String>, handler: H) -> Self
    where
        T: Flags + Default + 'static,
        H: Fn(&mut Context<'_, T>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            about: Some(about.into()).filter(|about| !about.is_empty()),
            runner: Some(Box::new(Bound {
                handler,
                _phantom: PhantomData,
            })),
            children: Vec::default(),
        }
    }

    /// Create a command without a handler, which only routes to its sub-commands.
    pub fn group(name: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: Some(about.into()).filter(|about| !about.is_empty()),
            runner: None,
            children: Vec::default(),
        }
    }

    /// Register a sub-command.
    pub fn register(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    /// The name of this command.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn dispatch(
        &self,
        program: String,
        tokens: &[&str],
        interface: &dyn UserInterface,
    ) -> Result<(), DispatchError> {
        if let Some((word, remaining)) = tokens.split_first() {
            if let Some(child) = self.children.iter().find(|child| child.name == *word) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Routing '{word}' from '{program}'.");
                }

                return child.dispatch(format!("{program} {word}"), remaining, interface);
            }
        }

        match &self.runner {
            Some(runner) => runner.run(&program, self.about.as_deref(), tokens, interface),
            None => match tokens.first() {
                Some(word) if !word.starts_with(SHORT_MARKER) => {
                    Err(DispatchError::UnknownCommand(word.to_string()))
                }
                _ => {
                    self.print_commands(&program, interface);
                    Ok(())
                }
            },
        }
    }

    fn print_commands(&self, program: &str, interface: &dyn UserInterface) {
        interface.print(format!("usage: {program} <command> [flags]"));

        if let Some(about) = &self.about {
            interface.print(String::default());
            interface.print(about.clone());
        }

        if !self.children.is_empty() {
            let rows = self
                .children
                .iter()
                .map(|child| {
                    Row::new(
                        child.name.clone(),
                        child.about.clone().unwrap_or_default(),
                        None,
                    )
                })
                .collect();
            interface.print(String::default());
            interface.print("commands:".to_string());
            interface.print(Printer::terminal(rows).render());
        }
    }
}

/// A command line application: a tree of [`Command`]s and the [`UserInterface`] they print to.
pub struct App {
    root: Command,
    interface: Box<dyn UserInterface>,
}

impl App {
    /// Create an application without a root handler.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_root(Command::group(name, ""))
    }

    /// Create an application whose root command has a handler.
    pub fn with_root(root: Command) -> Self {
        Self {
            root,
            interface: Box::<ConsoleInterface>::default(),
        }
    }

    /// Replace the user interface (stdout/stderr by default).
    pub fn with_interface(mut self, interface: Box<dyn UserInterface>) -> Self {
        self.interface = interface;
        self
    }

    /// Register a command under the root.
    pub fn command(mut self, command: Command) -> Self {
        self.root = self.root.register(command);
        self
    }

    /// Route `tokens` through the command tree and run the matched command.
    ///
    /// Leading words naming a sub-command descend into it; the remaining tokens are the command's flags.
    /// The handler only runs when the flags parse successfully.
    /// When a force flag (ex: `--help`) is assigned, the usage is printed instead.
    pub fn run(&self, tokens: &[&str]) -> Result<(), DispatchError> {
        self.root
            .dispatch(self.root.name.clone(), tokens, &*self.interface)
    }

    /// Run against the process arguments ([`env::args`]), reporting any failure to the user interface.
    ///
    /// Returns the exit code: `0` on success, `1` on failure.
    pub fn run_args(&self) -> i32 {
        let arguments: Vec<String> = env::args().skip(1).collect();
        let tokens = arguments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>();

        match self.run(tokens.as_slice()) {
            Ok(()) => 0,
            Err(error) => {
                self.interface.print_error(&error);
                1
            }
        }
    }
}

/// Parse the process arguments into `T` and run `handler`, returning the exit code.
///
/// ### Example
/// ```no_run
/// # use flagtag_builder as flagtag;
/// use flagtag::{Context, Helper};
///
/// std::process::exit(flagtag::run(|ctx: &mut Context<Helper>| {
///     ctx.print("hello");
///     Ok(())
/// }));
/// ```
pub fn run<T, H>(handler: H) -> i32
where
    T: Flags + Default + 'static,
    H: Fn(&mut Context<'_, T>) -> anyhow::Result<()> + 'static,
{
    let program = env::args()
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    App::with_root(Command::new(program, "", handler)).run_args()
}
