use async_trait::async_trait;
use log::info;

use super::{opt_value, require_value};
use crate::error::{ConsoleError, ConsoleResult};
use crate::output::{lpad, print_caption, rpad};
use crate::repl::command::{CommandAction, Context, Outcome};
use crate::token::TokenError;

fn parse_slot(value: &str) -> ConsoleResult<u64> {
    value
        .parse::<u64>()
        .map_err(|_| ConsoleError::Execution(format!("invalid slot index: {}", value)))
}

/// `slot list`
pub struct List;

#[async_trait]
impl CommandAction for List {
    async fn run(&self, ctx: &mut Context, _args: &[String]) -> ConsoleResult<Outcome> {
        let slots = ctx.require_module()?.slots();
        print_caption("Slots");
        println!("  {}  {}{}", lpad("Index", 5), rpad("Description", 24), "Token");
        for slot in &slots {
            println!(
                "  {}  {}{}",
                lpad(&slot.index.to_string(), 5),
                rpad(&slot.description, 24),
                slot.token_label
            );
        }
        println!();
        Ok(Outcome::Continue)
    }
}

/// `slot info --slot <index>`
pub struct Info;

#[async_trait]
impl CommandAction for Info {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let index = parse_slot(require_value(args, "--slot")?)?;
        let slot = ctx
            .require_module()?
            .slots()
            .into_iter()
            .find(|slot| slot.index == index)
            .ok_or(TokenError::SlotNotFound { slot: index })?;
        print_caption("Slot info");
        println!("  Index:        {}", slot.index);
        println!("  Description:  {}", slot.description);
        println!("  Token label:  {}", slot.token_label);
        println!("  Token:        {}", if slot.token_present { "present" } else { "absent" });
        println!();
        Ok(Outcome::Continue)
    }
}

/// Where the session PIN comes from
#[derive(Debug, PartialEq, Eq)]
enum PinInput {
    /// Taken from `--pin` on the command line
    Supplied(String),
    /// Read from the terminal without echo
    Prompt,
}

fn pin_input(args: &[String]) -> PinInput {
    match opt_value(args, "--pin") {
        Some(pin) => PinInput::Supplied(pin.to_string()),
        None => PinInput::Prompt,
    }
}

/// `slot open --slot <index> [--pin <pin>]`
///
/// When `--pin` is absent the PIN is prompted for on the terminal; entering
/// an empty PIN opens the session without one, for tokens that are not
/// protected.
pub struct Open;

#[async_trait]
impl CommandAction for Open {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let index = parse_slot(require_value(args, "--slot")?)?;
        let pin = match pin_input(args) {
            PinInput::Supplied(pin) => Some(pin),
            PinInput::Prompt => {
                let entered = rpassword::prompt_password("PIN: ")?;
                if entered.is_empty() {
                    None
                } else {
                    Some(entered)
                }
            }
        };
        let session = ctx.require_module()?.open_session(index, pin.as_deref())?;
        ctx.session = Some(session);
        info!("session opened against slot {}", index);
        println!("Session opened: slot {}", index);
        Ok(Outcome::Continue)
    }
}
