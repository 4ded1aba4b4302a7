// ABOUTME: Closed tagged-variant AST for Leaf expressions and statements
// A closed enum with exhaustive match replaces the polymorphic visitor hierarchy of
// the original implementation — see DESIGN.md for the rationale.

use crate::token::Token;
use std::rc::Rc;

/// Either a bare name (the common case after a `.`) or a previously-built
/// expression (when chaining further access off a `Get`/`Set`).
#[derive(Debug, Clone)]
pub enum GetLeft {
    Name(Token),
    Expr(Box<Expr>),
}

/// Either a bare name (the common case for a direct call) or a previously-built
/// expression (when chaining further calls off a call result, e.g. `f()()`).
#[derive(Debug, Clone)]
pub enum Callee {
    Name(Token),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// Placeholder for a missing initializer or a recovered parse error.
    Null,
    /// A literal (number, string, boolean, null) or bare identifier lookup.
    Primary(Token),
    Grouping(Box<Expr>),
    /// `op` is `-` or `!`.
    Unary(Token, Box<Expr>),
    /// Left-associative: arithmetic, comparison, equality, logical and/or.
    Binary(Box<Expr>, Token, Box<Expr>),
    /// Right-associative `**`.
    Exponent(Box<Expr>, Token, Box<Expr>),
    /// Right-associative `cond ? then : else`.
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
    /// `name '=' value`.
    Assign(Token, Token, Box<Expr>),
    /// `function` literal: optional name (set when parsed as a struct method),
    /// parameter names, and a shared `Block` body.
    Function(Option<Token>, Vec<Token>, Rc<Stmt>),
    Call(Callee, Vec<Expr>),
    /// `struct Name { field; ... method(...) { ... } ... };`
    Struct(Token, Vec<Token>, Vec<Expr>),
    /// Member access; the trailing `Vec<Expr>` is the argument list of a chained
    /// call (`left.right(args)`), absent for a plain field read (`left.right`).
    Get(Box<GetLeft>, Token, Option<Vec<Expr>>),
    /// Assignment into a field: `target.field = value`. `target` is always a `Get`
    /// with no call.
    Set(Box<Expr>, Token, Box<Expr>),
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Print(Expr),
    Println(Expr),
    ExpressionStmt(Expr),
    Var(Token, Expr),
    Const(Token, Expr),
    Block(Vec<Stmt>),
    /// Ordered `(condition, body)` clauses; at most one trailing clause has an
    /// absent condition (the `else`).
    If(Vec<(Option<Expr>, Stmt)>),
    /// Absent condition means "loop forever". `body` is always a `Block`.
    For(Option<Expr>, Box<Stmt>),
    Break(u32),
    /// The saved step expression of an enclosing C-style `for`, if any.
    Continue(u32, Option<Expr>),
    Return(Token, Expr),
}
