//! Shared constants for output formatting and the REPL prompt.

/// Default padding character for table output
pub const PAD_CHAR: char = ' ';

/// Underline printed below captions
pub const CAPTION_UNDERLINE: &str = "==============================";

/// Prompt printed before each interactive read
pub const PROMPT: &str = "> ";

/// Literal two-character token separating batch command lines
pub const LINE_SEPARATOR: &str = "\\n";

/// Token that marks the fatal-exit sentinel in batch scripts
pub const EXIT_TOKEN: &str = "exit";
