use async_trait::async_trait;

use crate::error::ConsoleResult;
use crate::repl::command::{CommandAction, Context, Outcome};

/// Prints the crate name and version
pub struct Version;

#[async_trait]
impl CommandAction for Version {
    async fn run(&self, _ctx: &mut Context, _args: &[String]) -> ConsoleResult<Outcome> {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        Ok(Outcome::Continue)
    }
}
