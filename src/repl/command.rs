//! Composite command tree.
//!
//! Commands live in an arena indexed by [`CommandId`]. Each node holds a
//! plain parent index for navigation (usage paths, contextual help), never
//! for ownership, so there is no reference cycle to manage. Child order is
//! insertion order and fixes the help-listing order. The tree is built once
//! at startup and is read-only afterwards.

use async_trait::async_trait;

use crate::error::{ConsoleError, ConsoleResult};
use crate::output::rpad;
use crate::token::{Module, Session};

/// Index of a command node in the tree arena
pub type CommandId = usize;

/// What the loop should do after an action completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading input
    Continue,
    /// Terminate the loop normally
    Close,
}

/// Mutable console state threaded through command executions
#[derive(Default)]
pub struct Context {
    pub module: Option<Box<dyn Module>>,
    pub session: Option<Box<dyn Session>>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Returns the loaded module or an execution error telling the user to
    /// load one first
    pub fn require_module(&self) -> ConsoleResult<&dyn Module> {
        self.module
            .as_deref()
            .ok_or_else(|| ConsoleError::Execution("no module loaded, run `module load` first".to_string()))
    }

    /// Returns the open session or an execution error telling the user to
    /// open one first
    pub fn require_session(&mut self) -> ConsoleResult<&mut dyn Session> {
        match self.session.as_deref_mut() {
            Some(session) => Ok(session),
            None => Err(ConsoleError::Execution(
                "no open session, run `slot open` first".to_string(),
            )),
        }
    }
}

/// Behavior of a leaf command
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn run(&self, ctx: &mut Context, args: &[String]) -> ConsoleResult<Outcome>;
}

struct CommandNode {
    name: String,
    description: String,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
    /// `None` marks a group node: bare invocation shows help, an
    /// unrecognized trailing token is a resolution error
    action: Option<Box<dyn CommandAction>>,
}

/// Arena-backed composite command tree with a single root
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

/// The root is always the first node inserted
pub const ROOT: CommandId = 0;

impl CommandTree {
    /// Creates a tree containing only the root group node
    pub fn new(name: &str, description: &str) -> Self {
        CommandTree {
            nodes: vec![CommandNode {
                name: name.to_string(),
                description: description.to_string(),
                parent: None,
                children: Vec::new(),
                action: None,
            }],
        }
    }

    /// Adds a leaf command under `parent`
    pub fn add(
        &mut self,
        parent: CommandId,
        name: &str,
        description: &str,
        action: Box<dyn CommandAction>,
    ) -> CommandId {
        self.insert(parent, name, description, Some(action))
    }

    /// Adds a group command under `parent`
    pub fn add_group(&mut self, parent: CommandId, name: &str, description: &str) -> CommandId {
        self.insert(parent, name, description, None)
    }

    fn insert(
        &mut self,
        parent: CommandId,
        name: &str,
        description: &str,
        action: Option<Box<dyn CommandAction>>,
    ) -> CommandId {
        let id = self.nodes.len();
        self.nodes.push(CommandNode {
            name: name.to_string(),
            description: description.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            action,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn name(&self, id: CommandId) -> &str {
        &self.nodes[id].name
    }

    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.nodes[id].parent
    }

    /// Walks the deepest chain of child names matching the leading tokens.
    /// Returns the resolved node and the remaining tokens.
    pub fn resolve<'t>(&self, tokens: &'t [String]) -> (CommandId, &'t [String]) {
        let mut current = ROOT;
        let mut rest = tokens;
        'walk: while let Some((first, tail)) = rest.split_first() {
            for &child in &self.nodes[current].children {
                if self.nodes[child].name == *first {
                    current = child;
                    rest = tail;
                    continue 'walk;
                }
            }
            break;
        }
        (current, rest)
    }

    /// Resolves `tokens` and executes the matched command with the
    /// remaining tokens as arguments.
    ///
    /// An empty token list runs the root, which shows top-level help and is
    /// not an error. A leading token that matches nothing is a
    /// [`ConsoleError::Resolution`].
    pub async fn dispatch(&self, ctx: &mut Context, tokens: &[String]) -> ConsoleResult<Outcome> {
        let (id, rest) = self.resolve(tokens);
        match &self.nodes[id].action {
            Some(action) => action.run(ctx, rest).await,
            None => match rest.first() {
                Some(token) => Err(ConsoleError::Resolution {
                    token: token.clone(),
                }),
                None => {
                    self.show_help(id);
                    Ok(Outcome::Continue)
                }
            },
        }
    }

    /// Full command path from the root, e.g. `p11console slot open`
    pub fn path(&self, id: CommandId) -> String {
        let mut parts = vec![self.nodes[id].name.as_str()];
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            parts.push(self.nodes[parent].name.as_str());
            current = parent;
        }
        parts.reverse();
        parts.join(" ")
    }

    /// Prints usage, description, and the child commands of `id` in
    /// insertion order
    pub fn show_help(&self, id: CommandId) {
        let node = &self.nodes[id];
        println!();
        if node.children.is_empty() {
            println!("Usage: {}", self.path(id));
        } else {
            println!("Usage: {} [command]", self.path(id));
        }
        println!("\n{}\n", node.description);
        if !node.children.is_empty() {
            let width = node
                .children
                .iter()
                .map(|&child| self.nodes[child].name.len())
                .max()
                .unwrap_or(0)
                + 2;
            println!("Commands:");
            for &child in &node.children {
                let child = &self.nodes[child];
                println!("  {}{}", rpad(&child.name, width), child.description);
            }
            println!();
        }
    }
}
