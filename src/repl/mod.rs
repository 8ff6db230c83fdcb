//! Command-dispatch REPL: the composite command tree and the run loop that
//! feeds it from batch or interactive input.

pub mod command;
pub mod dispatcher;

pub use command::{CommandAction, CommandId, CommandTree, Context, Outcome};
pub use dispatcher::{Repl, ReplOutcome};
