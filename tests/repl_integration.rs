//! End-to-end batch scenarios against the full command tree and the
//! software token backend.

use p11console::commands;
use p11console::repl::command::Context;
use p11console::repl::dispatcher::{Repl, ReplOutcome};
use p11console::token::mock::{MockModule, DEMO_PIN};
use p11console::ConsoleError;

fn repl_with_module() -> Repl {
    let mut ctx = Context::new();
    ctx.module = Some(Box::new(MockModule::new("demo", "/usr/lib/softhsm2.so")));
    Repl::new(commands::build_tree(), ctx)
}

#[tokio::test]
async fn batch_session_lifecycle_closes_cleanly() {
    let script = format!(
        "slot list\\nslot open --slot 0 --pin {}\\nobject list\\nhash --alg sha256 hello\\nclose",
        DEMO_PIN
    );
    let outcome = repl_with_module().run(Some(&script)).await.unwrap();
    assert!(matches!(outcome, ReplOutcome::Closed));
}

#[tokio::test]
async fn batch_error_before_exit_sentinel_is_fatal() {
    // `object list` fails without an open session; the next queued line is
    // the literal `exit` token, so the failure is fatal.
    let script = "slot list\\nobject list --slot 0\\nexit";
    let outcome = repl_with_module().run(Some(script)).await.unwrap();
    assert!(matches!(
        outcome,
        ReplOutcome::Fatal(ConsoleError::Execution(_))
    ));
}

#[tokio::test]
async fn batch_error_with_later_lines_recovers() {
    let script = "object list\\nslot open --slot 0 --pin 1234\\nobject list\\nclose";
    let outcome = repl_with_module().run(Some(script)).await.unwrap();
    assert!(matches!(outcome, ReplOutcome::Closed));
}

#[tokio::test]
async fn unknown_command_reports_resolution_error() {
    let script = "frobnicate\\nexit";
    let outcome = repl_with_module().run(Some(script)).await.unwrap();
    match outcome {
        ReplOutcome::Fatal(ConsoleError::Resolution { token }) => {
            assert_eq!(token, "frobnicate")
        }
        other => panic!("expected resolution failure, got {:?}", other),
    }
}

#[tokio::test]
async fn object_commands_round_trip_handles_through_hex() {
    // Preloaded demo objects get handles 1..=3; delete object 2 by its hex
    // rendering, then close.
    let script = format!(
        "slot open --slot 0 --pin {}\\nobject info --id 2\\nobject delete --id 2\\nclose",
        DEMO_PIN
    );
    let outcome = repl_with_module().run(Some(&script)).await.unwrap();
    assert!(matches!(outcome, ReplOutcome::Closed));
}

#[tokio::test]
async fn deleting_missing_object_then_exit_is_fatal() {
    let script = format!(
        "slot open --slot 0 --pin {}\\nobject delete --id ff\\nexit",
        DEMO_PIN
    );
    let outcome = repl_with_module().run(Some(&script)).await.unwrap();
    assert!(matches!(
        outcome,
        ReplOutcome::Fatal(ConsoleError::Token(_))
    ));
}

#[tokio::test]
async fn close_without_module_still_closes() {
    let ctx = Context::new();
    let mut repl = Repl::new(commands::build_tree(), ctx);
    let outcome = repl.run(Some("close")).await.unwrap();
    assert!(matches!(outcome, ReplOutcome::Closed));
}

#[tokio::test]
async fn module_load_command_installs_backend() {
    let ctx = Context::new();
    let mut repl = Repl::new(commands::build_tree(), ctx);
    let script = "module load --name softtoken\\nmodule info\\nslot list\\nclose";
    let outcome = repl.run(Some(script)).await.unwrap();
    assert!(matches!(outcome, ReplOutcome::Closed));
}
