//! `flagtag` is a declarative command line flag parser for Rust.
//!
//! Describe the flags of a program as the fields of a plain struct, annotate each field with its names, usage, default and constraints, and let `flagtag` fill the struct from the command line.
//! The design concerns are:
//! * *Declarative flags*:
//! The struct is the single source of truth; names, defaults, env fallbacks and usage live next to the field they configure.
//! * *Type driven conversion*:
//! Every field converts its own raw text via [`FlagValue`].
//! `flagtag` provides implementations for the primitives, `Vec<T>`, `Option<T>` and a few [richer types](./ext/index.html).
//! * *Go-flavoured tokens*:
//! Short (`-n`) and long (`--name`) names, inline values (`--name=value`) and short clusters (`-abc`).
//! * *Small command trees*:
//! An [`App`] routes leading words to [`Command`]s, each with its own flag struct and handler.
//!
//! # Usage
//! This page includes a few demos on using `flagtag`.
//! More examples are outlined in [the source](https://github.com/flagtag/flagtag/tree/main/demos).
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/time_and_duration.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ time_and_duration -h
//! usage: time_and_duration [flags]
//!
//! flags:
//!   -h, --help   Show this help message and exit.
//!   -t           A point in time (ex: 2024-05-01 10:00:00).
//!   -d[=1h30m]   A span of time.
//!
//! $ time_and_duration -t 2024-05-01 -d 2m
//! time=2024-05-01T00:00:00+00:00, duration=2m
//!
//! $ time_and_duration -t tomorrow
//! assigned argument `-t` invalid: cannot convert 'tomorrow' to flagtag_builder::ext::time::Time
//! ```
//!
//! # Tokens
//! The command line is scanned left to right:
//! * `--name value` and `--name=value` assign `value` to the flag `--name`.
//! Everything after the name, up to the next flag token, is its value; more than one value is an error.
//! Each `=` separates a value, so `--name=a=b` carries two values.
//! * `-n value` and `-n=value` do the same for the short name `-n`.
//! * `-abc`, when `-abc` is not itself a flag, assigns each of `-a`, `-b`, `-c` without a value.
//! * Tokens before the first flag are skipped.
//! * A flag token without a value assigns the empty string: `bool` reads this as `true`, most other types reject it.
//! * An unknown name aborts the parse with [`ParseError::UnknownFlag`].
//!
//! Conversion failures and missing required flags do not abort the scan.
//! They are collected and reported together as [`ParseError::Invalid`].
//!
//! # Builder Api
//! The derive is a thin layer over the builder Api, which may also be used directly.
//! Implement [`Flags`] by adding a [`Flag`] per field to the [`Declaration`]:
//!
//! ```
//! use flagtag::{parse, Declaration, Flag, Flags};
//!
//! #[derive(Default)]
//! struct Argv {
//!     verbose: bool,
//!     ports: Vec<u16>,
//!     name: String,
//! }
//!
//! impl Flags for Argv {
//!     fn declare<'a>(&'a mut self, declaration: &mut Declaration<'a>) {
//!         declaration
//!             .add(Flag::new(&mut self.verbose, "v,verbose"))
//!             .add(Flag::new(&mut self.ports, "p,port").default("80,443"))
//!             .add(Flag::new(&mut self.name, "*name").env("ARGV_NAME"));
//!     }
//! }
//!
//! let mut argv = Argv::default();
//! let parsed = parse(&["-v", "--name=flagtag", "-p", "8080"], &mut argv).unwrap();
//!
//! assert!(argv.verbose);
//! // The first explicit value replaces the default.
//! assert_eq!(argv.ports, vec![8080]);
//! assert_eq!(argv.name, "flagtag");
//! assert_eq!(parsed.get("--port"), Some("8080"));
//! ```
//!
//! ### Name specs
//! A flag's names are a comma separated spec (ex: `"n,name"`).
//! Single character entries are short names (`-n`), longer entries are long names (`--name`).
//! The spec may be prefixed with:
//! * `*`: the flag is required.
//! * `!`: the flag is a *force* flag; once assigned, required flags are not checked.
//! This is how [`Helper`] (`-h, --help`) suppresses validation.
//!
//! The spec `-` excludes the field.
//!
//! ### Defaults
//! A default is written as a literal and converted through the same [`FlagValue`] as the command line.
//! When the flag names an environment variable which is set, its value replaces the default.
//! Explicit command line values always win.
//!
//! ### Structured values
//! Fields of any `serde` type may be decoded through a named parser instead of [`FlagValue`].
//! The built-in parsers are `json` (the value is a json document) and `jsonfile` (the value names a json file, `-` for stdin).
//! Register further parsers on a [`ParserTable`] and pass it to [`parse_with`].
//!
//! ```no_run
#![doc = include_str!("../demos/jsonfile.rs")]
//! ```
//!
//! # Commands
//! Programs with sub-commands build an [`App`] from [`Command`]s.
//! Leading words route to the matching command, whose flag struct parses the remaining tokens before the handler runs.
//! A [`Helper`] in the flag struct prints the command's usage.
//!
//! ```no_run
#![doc = include_str!("../demos/commands.rs")]
//! ```
//!
//! ```console
//! $ commands
//! usage: commands <command> [flags]
//!
//! commands:
//!   greet   Greet somebody.
//!   time    Time related commands.
//!
//! $ commands greet -n flagtag -c 2
//! hello flagtag
//! hello flagtag
//!
//! $ commands greet
//! required argument `--name` missing
//!
//! $ commands time wait -f 1s --verbose
//! waiting 1s
//! ```
//!
//! # Debug Tracing
//! The `tracing_debug` feature logs the registry build, defaulting and scanning decisions through [`tracing`](https://docs.rs/tracing).
pub mod derive;

pub use flagtag_builder::*;
