use async_trait::async_trait;
use log::info;

use super::require_value;
use crate::error::ConsoleResult;
use crate::output::{print_caption, rpad};
use crate::repl::command::{CommandAction, Context, Outcome};
use crate::token::ObjectHandle;

/// `object list`
pub struct List;

#[async_trait]
impl CommandAction for List {
    async fn run(&self, ctx: &mut Context, _args: &[String]) -> ConsoleResult<Outcome> {
        let objects = ctx.require_session()?.objects()?;
        print_caption("Objects");
        println!("  {}{}{}", rpad("Handle", 18), rpad("Class", 14), "Label");
        for object in &objects {
            println!(
                "  {}{}{}",
                rpad(&object.handle.to_hex(), 18),
                rpad(&object.class.to_string(), 14),
                object.label
            );
        }
        println!();
        Ok(Outcome::Continue)
    }
}

/// `object info --id <hex handle>`
pub struct Info;

#[async_trait]
impl CommandAction for Info {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let handle = ObjectHandle::from_hex(require_value(args, "--id")?)?;
        let object = ctx.require_session()?.object_info(handle)?;
        print_caption("Object info");
        println!("  Handle:  {}", object.handle.to_hex());
        println!("  Class:   {}", object.class);
        println!("  Label:   {}", object.label);
        println!();
        Ok(Outcome::Continue)
    }
}

/// `object delete --id <hex handle>`
pub struct Delete;

#[async_trait]
impl CommandAction for Delete {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let handle = ObjectHandle::from_hex(require_value(args, "--id")?)?;
        ctx.require_session()?.destroy_object(handle)?;
        info!("object {} destroyed", handle);
        println!("Object deleted: {}", handle.to_hex());
        Ok(Outcome::Continue)
    }
}
