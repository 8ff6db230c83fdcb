use async_trait::async_trait;

use super::opt_value;
use crate::error::{ConsoleError, ConsoleResult};
use crate::repl::command::{CommandAction, Context, Outcome};
use crate::token::DigestAlgorithm;

/// `hash [--alg sha256|sha512] <text...>`
///
/// Digests the remaining tokens, joined by single spaces, through the open
/// session and prints the result as hex.
pub struct Hash;

#[async_trait]
impl CommandAction for Hash {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let algorithm: DigestAlgorithm = opt_value(args, "--alg").unwrap_or("sha256").parse()?;
        let data: Vec<&str> = args
            .iter()
            .enumerate()
            .filter(|(index, arg)| {
                *arg != "--alg" && !(*index > 0 && args[index - 1] == "--alg")
            })
            .map(|(_, arg)| arg.as_str())
            .collect();
        if data.is_empty() {
            return Err(ConsoleError::Execution(
                "nothing to hash, supply some text".to_string(),
            ));
        }
        let digest = ctx
            .require_session()?
            .digest(algorithm, data.join(" ").as_bytes())?;
        println!("{}", hex::encode(digest));
        Ok(Outcome::Continue)
    }
}
