// ABOUTME: Append-only diagnostic sink for lexical and parse errors, threaded explicitly
// rather than kept as process-global state

/// Collects lex/parse diagnostics for a single run. Owned by the driver and passed by
/// mutable reference into the lexer and parser; never a `static`/`thread_local`.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<String>,
    has_errors: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Error: [At line N] after '<lexeme>' - <message>` — used by the lexer and by
    /// parser productions that know the lexeme preceding the error.
    pub fn report(&mut self, line: u32, lexeme: &str, message: impl Into<String>) {
        self.has_errors = true;
        self.messages.push(format!(
            "Error: [At line {line}] after '{lexeme}' - {}",
            message.into()
        ));
    }

    /// `ParseError: [Near line N] - <message>` — used when there is no natural
    /// preceding lexeme to anchor the message to.
    pub fn report_near(&mut self, line: u32, message: impl Into<String>) {
        self.has_errors = true;
        self.messages.push(format!(
            "ParseError: [Near line {line}] - {}",
            message.into()
        ));
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
