use async_trait::async_trait;
use log::info;

use super::{opt_value, require_value};
use crate::error::ConsoleResult;
use crate::output::print_caption;
use crate::repl::command::{CommandAction, Context, Outcome};

/// `module load --name <name> [--path <library>]`
///
/// Only the software backend is compiled in; the library path is recorded
/// in the module info but nothing is dlopen'ed.
pub struct Load;

#[async_trait]
impl CommandAction for Load {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome> {
        let name = require_value(args, "--name")?;
        let path = opt_value(args, "--path").unwrap_or("builtin");

        #[cfg(feature = "mock")]
        {
            ctx.module = Some(Box::new(crate::token::mock::MockModule::new(name, path)));
            ctx.session = None;
            info!("module {} loaded from {}", name, path);
            println!("Module loaded: {}", name);
            Ok(Outcome::Continue)
        }
        #[cfg(not(feature = "mock"))]
        {
            let _ = ctx;
            Err(crate::error::ConsoleError::Execution(format!(
                "no token backend compiled in, cannot load {} from {}",
                name, path
            )))
        }
    }
}

/// `module info`
pub struct Info;

#[async_trait]
impl CommandAction for Info {
    async fn run(&self, ctx: &mut Context, _args: &[String]) -> ConsoleResult<Outcome> {
        let info = ctx.require_module()?.info();
        print_caption("Module info");
        println!("  Name:          {}", info.name);
        println!("  Library:       {}", info.library);
        println!("  Manufacturer:  {}", info.manufacturer);
        println!();
        Ok(Outcome::Continue)
    }
}
