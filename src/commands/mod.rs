//! The concrete command set.
//!
//! These are thin variants over the dispatcher contract and the token trait
//! seam; the shared logic lives in [`crate::repl`], [`crate::codec`], and
//! [`crate::template`]. Registration order here fixes the help-listing
//! order.

use crate::error::{ConsoleError, ConsoleResult};
use crate::repl::command::{CommandTree, ROOT};

pub mod close;
pub mod hash;
pub mod module;
pub mod object;
pub mod slot;
pub mod version;

/// Builds the full command tree rooted at the console itself
pub fn build_tree() -> CommandTree {
    let mut tree = CommandTree::new(
        "p11console",
        "An interactive console for working with PKCS#11 tokens and sessions",
    );
    tree.add(
        ROOT,
        "version",
        "Prints the console version",
        Box::new(version::Version),
    );
    tree.add(
        ROOT,
        "close",
        "Closes the session and module and leaves the console",
        Box::new(close::Close),
    );
    let module = tree.add_group(ROOT, "module", "Module loading and information");
    tree.add(
        module,
        "load",
        "Loads a PKCS#11 module",
        Box::new(module::Load),
    );
    tree.add(
        module,
        "info",
        "Prints information about the loaded module",
        Box::new(module::Info),
    );
    let slot = tree.add_group(ROOT, "slot", "Slot enumeration and sessions");
    tree.add(slot, "list", "Lists the module's slots", Box::new(slot::List));
    tree.add(
        slot,
        "info",
        "Prints information about one slot",
        Box::new(slot::Info),
    );
    tree.add(
        slot,
        "open",
        "Opens a session against a slot",
        Box::new(slot::Open),
    );
    let object = tree.add_group(ROOT, "object", "Token object inspection");
    tree.add(
        object,
        "list",
        "Lists objects visible in the open session",
        Box::new(object::List),
    );
    tree.add(
        object,
        "info",
        "Prints information about one object",
        Box::new(object::Info),
    );
    tree.add(
        object,
        "delete",
        "Destroys an object",
        Box::new(object::Delete),
    );
    tree.add(
        ROOT,
        "hash",
        "Computes a digest through the open session",
        Box::new(hash::Hash),
    );
    tree
}

/// Returns the value following `name`, if present
pub(crate) fn opt_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

/// Returns the value following `name` or an execution error naming the
/// missing option
pub(crate) fn require_value<'a>(args: &'a [String], name: &str) -> ConsoleResult<&'a str> {
    opt_value(args, name)
        .ok_or_else(|| ConsoleError::Execution(format!("missing required option {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_opt_value() {
        let input = args("--slot 0 --pin 1234");
        assert_eq!(opt_value(&input, "--slot"), Some("0"));
        assert_eq!(opt_value(&input, "--pin"), Some("1234"));
        assert_eq!(opt_value(&input, "--label"), None);
    }

    #[test]
    fn test_require_value_names_missing_option() {
        let input = args("--slot 0");
        let err = require_value(&input, "--id").unwrap_err();
        assert!(err.to_string().contains("--id"));
    }

    #[test]
    fn test_tree_registration_order() {
        let tree = build_tree();
        let input = args("slot open");
        let (id, rest) = tree.resolve(&input);
        assert_eq!(tree.name(id), "open");
        assert!(rest.is_empty());
    }
}
