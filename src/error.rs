// ABOUTME: Runtime error types raised while executing a parsed Leaf program

use thiserror::Error;

/// A runtime failure, each variant carrying the 1-based source line it occurred on
/// so the driver can report it the same way a lex/parse diagnostic is reported.
/// The `Display` message itself carries no line prefix — `main.rs` applies the
/// `RuntimeError: [Near line N] - ` wire-format prefix once at the print boundary,
/// via [`RuntimeError::line`].
#[derive(Error, Debug, Clone)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: u32 },

    #[error("'{name}' is already declared in this scope.")]
    AlreadyDeclared { name: String, line: u32 },

    #[error("Cannot assign to const '{name}'.")]
    AssignToConst { name: String, line: u32 },

    #[error("Operator '{op}' cannot be applied to {lhs_type} and {rhs_type}.")]
    OperatorError {
        op: String,
        lhs_type: String,
        rhs_type: String,
        line: u32,
    },

    #[error("Division by zero.")]
    DivisionByZero { line: u32 },

    #[error("'{name}' is not callable.")]
    NotCallable { name: String, line: u32 },

    #[error("Expected {expected} argument{}, got {actual}.", if *expected == 1 { "" } else { "s" })]
    ArityMismatch {
        expected: usize,
        actual: usize,
        line: u32,
    },

    #[error("'{name}' has no field or method named '{field}'.")]
    UndefinedField {
        name: String,
        field: String,
        line: u32,
    },

    #[error("'break' used outside of a loop.")]
    BreakOutsideLoop { line: u32 },

    #[error("'continue' used outside of a loop.")]
    ContinueOutsideLoop { line: u32 },

    #[error("'return' used outside of a function.")]
    ReturnOutsideFunction { line: u32 },

    #[error("'this' used outside of a method body.")]
    ThisOutsideMethod { line: u32 },

    #[error("Only struct instances can be constructed with '{name}(...)'.")]
    NotAStruct { name: String, line: u32 },
}

impl RuntimeError {
    pub fn line(&self) -> u32 {
        match self {
            RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::AlreadyDeclared { line, .. }
            | RuntimeError::AssignToConst { line, .. }
            | RuntimeError::OperatorError { line, .. }
            | RuntimeError::DivisionByZero { line }
            | RuntimeError::NotCallable { line, .. }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::UndefinedField { line, .. }
            | RuntimeError::BreakOutsideLoop { line }
            | RuntimeError::ContinueOutsideLoop { line }
            | RuntimeError::ReturnOutsideFunction { line }
            | RuntimeError::ThisOutsideMethod { line }
            | RuntimeError::NotAStruct { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_variable_message() {
        let err = RuntimeError::UndefinedVariable {
            name: "x".to_string(),
            line: 4,
        };
        assert_eq!(err.to_string(), "Undefined variable 'x'.");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn arity_mismatch_pluralizes() {
        let singular = RuntimeError::ArityMismatch {
            expected: 1,
            actual: 2,
            line: 1,
        };
        assert_eq!(singular.to_string(), "Expected 1 argument, got 2.");

        let plural = RuntimeError::ArityMismatch {
            expected: 2,
            actual: 1,
            line: 1,
        };
        assert_eq!(plural.to_string(), "Expected 2 arguments, got 1.");
    }

    #[test]
    fn assign_to_const_message() {
        let err = RuntimeError::AssignToConst {
            name: "pi".to_string(),
            line: 9,
        };
        assert_eq!(err.to_string(), "Cannot assign to const 'pi'.");
    }
}
