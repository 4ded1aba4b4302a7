// ABOUTME: Version info, welcome banner, and REPL help text for the leaf binary

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Leaf v1.0";
pub const WELCOME_SUBTITLE: &str = "A small C-like dynamically-typed scripting language";

pub const HELP_TEXT: &str = r#"
Available REPL commands:
  exit                 - Exit the REPL

Type any Leaf statement to execute it immediately; declarations made on one
line are visible to later lines. Use Ctrl-D to exit.
"#;
