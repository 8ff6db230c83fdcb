use async_trait::async_trait;
use log::info;

use crate::error::ConsoleResult;
use crate::repl::command::{CommandAction, Context, Outcome};

/// Drops the open session and module and terminates the loop
pub struct Close;

#[async_trait]
impl CommandAction for Close {
    async fn run(&self, ctx: &mut Context, _args: &[String]) -> ConsoleResult<Outcome> {
        if ctx.session.take().is_some() {
            info!("session closed");
        }
        if ctx.module.take().is_some() {
            info!("module unloaded");
        }
        Ok(Outcome::Close)
    }
}
