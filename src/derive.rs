//! Derive Api for `flagtag` configuration.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a struct `S` with `#[derive(Default, Flags)]`.
//! This generates `impl flagtag::Flags for S`, which declares one flag per field in field order.
//! Parse into `S` via [`parse`](../fn.parse.html), or hand `S` to a [`Command`](../struct.Command.html).
//!
//! ```no_run
#![doc = include_str!("../demos/pidfile.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ pidfile -h
//! usage: pidfile [flags]
//!
//! flags:
//!   -h, --help                Show this help message and exit.
//!   --pid[=013-pidfile.pid]   The pid file to hold while running.
//! ```
//!
//! ### Field Configuration
//! Every named field is a flag, whose type must implement [`FlagValue`](../trait.FlagValue.html).
//! Without configuration, the field identifier in kebab-case is the flag name (ex: `dry_run` becomes `--dry-run`).
//! The `#[flag(..)]` attribute takes the following keys, which may be combined as necessary:
//! * `cli = ".."` sets the name spec (ex: `"n,name"`).
//! The prefix `*` marks the flag required and `!` marks it a force flag.
//! The spec `"-"` excludes the field.
//! * `usage = ".."` describes the flag in the usage text.
//! * `dft = ".."` (or `default = ".."`) sets the default literal.
//! * `env = ".."` names an environment variable whose value, when set, replaces the default.
//! * `required` (or `required = true`) marks the flag required.
//! * `parser = ".."` decodes the field through a named structured parser (ex: `"json"`, `"jsonfile"`).
//! The field type must then implement `serde::Deserialize` and `serde::Serialize` instead of `FlagValue`.
//! * `embed` declares the flags of a nested `Flags` struct in place of the field.
//! * `ignore` excludes the field.
//!
//! `embed` and `ignore` may not be combined with any other key.
//!
//! ```ignore
//! #[derive(Default, Flags)]
//! struct Argv {
//!     verbose: bool,
//!     // the above generates:
//!     //  declaration.add(Flag::new(&mut self.verbose, "verbose"));
//!
//!     #[flag(cli = "*n,name", usage = "Who to greet.", env = "USER")]
//!     name: String,
//!     // the above generates:
//!     //  declaration.add(Flag::new(&mut self.name, "*n,name").usage("Who to greet.").env("USER"));
//!
//!     #[flag(cli = "c,config", parser = "jsonfile", dft = "config.json")]
//!     config: Config,
//!     // the above generates:
//!     //  declaration.add(Flag::structured(&mut self.config, "c,config", "jsonfile").default("config.json"));
//!
//!     #[flag(embed)]
//!     helper: Helper,
//!     // the above generates:
//!     //  declaration.embed(&mut self.helper);
//!
//!     #[flag(ignore)]
//!     cache: Cache,
//!     // the above generates nothing.
//! }
//! ```
//!
//! Tuple structs, enums, unions and generic structs are rejected at compile time.

pub use flagtag_derive::*;
