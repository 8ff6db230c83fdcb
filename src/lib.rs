//! p11console - an interactive console for working with PKCS#11 tokens and
//! sessions.
//!
//! The crate is organized around two subsystems: the command-dispatch REPL
//! ([`repl`]) that drives batch or interactive input through a composite
//! command tree, and the codec layer ([`codec`], [`template`]) that renders
//! opaque object handles as minimal hex and assembles RSA key-import
//! attribute templates. The token surface itself ([`token`]) is a trait seam;
//! a software implementation ships behind the default `mock` feature.

pub mod codec;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod repl;
pub mod template;
pub mod token;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult};
pub use repl::command::{CommandId, CommandTree, Context, Outcome};
pub use repl::dispatcher::{Repl, ReplOutcome};
pub use template::{KeyTemplate, KeyUsage, TemplatePair};
pub use token::{Module, ObjectHandle, Session};
