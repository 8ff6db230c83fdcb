//! The REPL run loop.
//!
//! Batch input is split into an ordered queue of command lines and consumed
//! before any interactive prompting. Each iteration dispatches exactly one
//! line against the command tree; failures are caught at this boundary and
//! turned into a diagnostic plus contextual help, except when the next
//! queued batch line is the literal `exit` sentinel, which makes the
//! failure fatal.

use std::collections::VecDeque;
use std::io::Write;

use colored::Colorize;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::constants::{EXIT_TOKEN, LINE_SEPARATOR, PROMPT};
use crate::error::{ConsoleError, ConsoleResult};
use crate::repl::command::{CommandTree, Context, Outcome};

/// How a run terminated
#[derive(Debug)]
pub enum ReplOutcome {
    /// The close command executed; exit status 0
    Closed,
    /// A batch error was immediately followed by the `exit` sentinel;
    /// exit status 1
    Fatal(ConsoleError),
}

/// Loop state. `Closed` and `FatalExit` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Closed,
    FatalExit,
}

/// Splits a batch payload on the literal `\n` escape token into lines of
/// whitespace-separated tokens
pub fn split_batch(payload: &str) -> VecDeque<Vec<String>> {
    payload.split(LINE_SEPARATOR).map(split_line).collect()
}

/// Splits one command line into tokens
pub fn split_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// The command dispatcher
pub struct Repl {
    tree: CommandTree,
    ctx: Context,
}

impl Repl {
    pub fn new(tree: CommandTree, ctx: Context) -> Self {
        Repl { tree, ctx }
    }

    /// Drives the loop until the close command executes or the fatal
    /// batch-exit condition is met, prompting on stdin once the batch
    /// queue is drained.
    pub async fn run(&mut self, batch: Option<&str>) -> ConsoleResult<ReplOutcome> {
        self.run_with_input(batch, BufReader::new(tokio::io::stdin()))
            .await
    }

    /// As [`Repl::run`], reading interactive lines from `input` instead of
    /// stdin.
    ///
    /// Batch lines run strictly in order; interactive prompting starts only
    /// once the queue is drained. End-of-file on interactive input is
    /// treated as close.
    pub async fn run_with_input<R>(
        &mut self,
        batch: Option<&str>,
        input: R,
    ) -> ConsoleResult<ReplOutcome>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let mut queue = batch.map(split_batch).unwrap_or_default();
        let batch_mode = !queue.is_empty();
        let mut lines = input.lines();
        let mut state = State::Running;
        let mut fatal = None;

        while state == State::Running {
            let tokens = match queue.pop_front() {
                Some(tokens) => tokens,
                None => {
                    print!("{}", PROMPT);
                    std::io::stdout().flush()?;
                    match lines.next_line().await? {
                        Some(line) => split_line(&line),
                        None => break,
                    }
                }
            };
            debug!("dispatching: {:?}", tokens);
            match self.tree.dispatch(&mut self.ctx, &tokens).await {
                Ok(Outcome::Close) => state = State::Closed,
                Ok(Outcome::Continue) => {}
                Err(err) => {
                    let exit_queued = matches!(
                        queue.front(),
                        Some(line) if line.len() == 1 && line[0] == EXIT_TOKEN
                    );
                    if batch_mode && exit_queued {
                        eprintln!("{}", err);
                        fatal = Some(err);
                        state = State::FatalExit;
                    } else {
                        eprintln!("\n{} {}", "Error".red(), err);
                        let (resolved, _) = self.tree.resolve(&tokens);
                        self.tree.show_help(resolved);
                    }
                }
            }
        }

        match fatal {
            Some(err) => Ok(ReplOutcome::Fatal(err)),
            None => Ok(ReplOutcome::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::repl::command::{CommandAction, ROOT};

    struct Counter {
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandAction for Counter {
        async fn run(&self, _: &mut Context, _: &[String]) -> ConsoleResult<Outcome> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(Outcome::Continue)
        }
    }

    struct Close;

    #[async_trait]
    impl CommandAction for Close {
        async fn run(&self, _: &mut Context, _: &[String]) -> ConsoleResult<Outcome> {
            Ok(Outcome::Close)
        }
    }

    struct Fail;

    #[async_trait]
    impl CommandAction for Fail {
        async fn run(&self, _: &mut Context, _: &[String]) -> ConsoleResult<Outcome> {
            Err(ConsoleError::Execution("boom".to_string()))
        }
    }

    fn repl(hits: Arc<AtomicUsize>) -> Repl {
        let mut tree = CommandTree::new("console", "test console");
        tree.add(ROOT, "ping", "counts invocations", Box::new(Counter { hits }));
        tree.add(ROOT, "fail", "always fails", Box::new(Fail));
        tree.add(ROOT, "close", "closes the console", Box::new(Close));
        Repl::new(tree, Context::new())
    }

    #[test]
    fn test_split_batch_on_literal_escape_token() {
        let queue = split_batch("slot list\\nobject list --slot 0\\nexit");
        assert_eq!(queue.len(), 3);
        assert_eq!(queue[0], vec!["slot", "list"]);
        assert_eq!(queue[1], vec!["object", "list", "--slot", "0"]);
        assert_eq!(queue[2], vec!["exit"]);
    }

    #[tokio::test]
    async fn test_batch_lines_execute_in_order_until_close() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let outcome = repl.run(Some("ping\\nping\\nclose")).await.unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_followed_by_exit_sentinel_is_fatal() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let outcome = repl.run(Some("ping\\nfail\\nexit")).await.unwrap();
        match outcome {
            ReplOutcome::Fatal(ConsoleError::Execution(message)) => {
                assert_eq!(message, "boom")
            }
            other => panic!("expected fatal outcome, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolution_error_followed_by_exit_sentinel_is_fatal() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(hits);
        let outcome = repl.run(Some("bogus\\nexit")).await.unwrap();
        assert!(matches!(
            outcome,
            ReplOutcome::Fatal(ConsoleError::Resolution { token }) if token == "bogus"
        ));
    }

    #[tokio::test]
    async fn test_error_without_exit_sentinel_recovers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let outcome = repl.run(Some("fail\\nping\\nclose")).await.unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_interactive_close_stops_without_reading_further() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let input = BufReader::new(&b"close\nping\n"[..]);
        let outcome = repl.run_with_input(None, input).await.unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_interactive_error_is_never_fatal() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let input = BufReader::new(&b"fail\nping\nclose\n"[..]);
        let outcome = repl.run_with_input(None, input).await.unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_interactive_eof_closes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(hits);
        let outcome = repl
            .run_with_input(None, BufReader::new(&b""[..]))
            .await
            .unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
    }

    #[tokio::test]
    async fn test_batch_queue_drains_before_interactive_input() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let input = BufReader::new(&b"ping\nclose\n"[..]);
        let outcome = repl
            .run_with_input(Some("ping\\nping"), input)
            .await
            .unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_batch_line_shows_help_and_continues() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut repl = repl(Arc::clone(&hits));
        let outcome = repl.run(Some("\\nping\\nclose")).await.unwrap();
        assert!(matches!(outcome, ReplOutcome::Closed));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
