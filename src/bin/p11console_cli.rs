use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use p11console::commands;
use p11console::repl::command::Context;
use p11console::repl::dispatcher::{Repl, ReplOutcome};
use p11console::ConsoleConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the console configuration file
    #[arg(short, long, default_value = "config/console.json")]
    config: PathBuf,

    /// Batch script: command lines separated by a literal "\n" token,
    /// executed in order before any interactive prompting
    script: Option<String>,
}

/// Parses arguments, builds the command tree, and drives the REPL.
///
/// Exits 0 when the loop terminates through the close command and 1 when a
/// batch error is immediately followed by the `exit` sentinel.
#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let ctx = match build_context(&cli) {
        Ok(ctx) => ctx,
        Err(err) => {
            error!("startup failed: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut repl = Repl::new(commands::build_tree(), ctx);
    match repl.run(cli.script.as_deref()).await {
        Ok(ReplOutcome::Closed) => {}
        Ok(ReplOutcome::Fatal(_)) => process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn build_context(cli: &Cli) -> p11console::ConsoleResult<Context> {
    let config = ConsoleConfig::load(&cli.config)?;
    let mut ctx = Context::new();
    if let Some(name) = &config.module_name {
        let path = config.module_path.as_deref().unwrap_or("builtin");
        #[cfg(feature = "mock")]
        {
            ctx.module = Some(Box::new(p11console::token::mock::MockModule::new(
                name, path,
            )));
            info!("module {} preloaded from {}", name, path);
        }
        #[cfg(not(feature = "mock"))]
        info!("ignoring configured module {} ({}), no backend compiled in", name, path);
    }
    Ok(ctx)
}
