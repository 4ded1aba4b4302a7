// ABOUTME: Recursive-descent parser with precedence climbing and statement-level panic-mode recovery

use crate::ast::{Callee, Expr, GetLeft, Stmt};
use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenKind};
use std::rc::Rc;

/// Sentinel propagated with `?` when a production fails; the diagnostic has
/// already been recorded by the time this is returned.
#[derive(Debug)]
struct ParseAbort;

type PResult<T> = Result<T, ParseAbort>;

struct Parser<'a, 'd> {
    tokens: &'a [Token],
    pos: usize,
    diagnostics: &'d mut Diagnostics,
    /// Saved step expressions of enclosing C-style `for` loops, innermost last.
    /// `None` at a given depth means the enclosing loop has no step (infinite,
    /// while-style, or a C-style loop with an omitted step).
    step_stack: Vec<Option<Expr>>,
}

/// Parses a full token stream into a flat statement list. Errors are recorded
/// on `diagnostics`; the parser never aborts the whole run, only the statement
/// in progress.
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Stmt> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        diagnostics,
        step_stack: Vec::new(),
    };
    let mut statements = Vec::new();
    while !parser.is_at_end() {
        match parser.top_statement() {
            Ok(stmt) => statements.push(stmt),
            Err(ParseAbort) => {}
        }
    }
    statements
}

impl<'a, 'd> Parser<'a, 'd> {
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous().clone()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|k| self.check(*k)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let line = self.peek().line;
            let lexeme = self.previous().lexeme.clone();
            self.diagnostics.report(line, &lexeme, message);
            Err(ParseAbort)
        }
    }

    /// Discards tokens until one that can start a new statement, per the
    /// panic-mode recovery set.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::Print
                | TokenKind::Println
                | TokenKind::Var
                | TokenKind::Const
                | TokenKind::LeftBrace
                | TokenKind::If
                | TokenKind::For
                | TokenKind::Do => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn top_statement(&mut self) -> PResult<Stmt> {
        match self.statement() {
            Ok(stmt) => Ok(stmt),
            Err(ParseAbort) => {
                self.synchronize();
                Err(ParseAbort)
            }
        }
    }

    fn statement(&mut self) -> PResult<Stmt> {
        if self.match_token(&[TokenKind::Print]) {
            return self.print_stmt();
        }
        if self.match_token(&[TokenKind::Println]) {
            return self.println_stmt();
        }
        if self.match_token(&[TokenKind::Var]) {
            return self.var_stmt();
        }
        if self.match_token(&[TokenKind::Const]) {
            return self.const_stmt();
        }
        if self.match_token(&[TokenKind::LeftBrace]) {
            return self.block_stmt();
        }
        if self.match_token(&[TokenKind::If]) {
            return self.if_stmt();
        }
        if self.match_token(&[TokenKind::For]) {
            return self.for_stmt();
        }
        if self.match_token(&[TokenKind::Break]) {
            return self.break_stmt();
        }
        if self.match_token(&[TokenKind::Continue]) {
            return self.continue_stmt();
        }
        if self.match_token(&[TokenKind::Return]) {
            return self.return_stmt();
        }
        self.expression_stmt()
    }

    fn print_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(expr))
    }

    fn println_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Println(expr))
    }

    /// Called with `var` already consumed. `var` defaults to `null` with no
    /// initializer.
    fn var_stmt(&mut self) -> PResult<Stmt> {
        let name = self.expect(TokenKind::Identifier, "Expect variable name.")?;
        let init = if self.match_token(&[TokenKind::Equal]) {
            self.expression()?
        } else {
            Expr::Null
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(name, init))
    }

    /// Called with `const` already consumed. `const` always requires an initializer.
    fn const_stmt(&mut self) -> PResult<Stmt> {
        let name = self.expect(TokenKind::Identifier, "Expect constant name.")?;
        self.expect(TokenKind::Equal, "Expect '=' after constant name.")?;
        let init = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after constant declaration.")?;
        Ok(Stmt::Const(name, init))
    }

    /// Called with `{` already consumed.
    fn block_stmt(&mut self) -> PResult<Stmt> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(ParseAbort) => self.synchronize(),
            }
        }
        self.expect(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(Stmt::Block(statements))
    }

    fn braced_block(&mut self) -> PResult<Stmt> {
        self.expect(TokenKind::LeftBrace, "Expect '{' to start block.")?;
        self.block_stmt()
    }

    /// Called with `if` already consumed: `if <expr> { .. } (elseif <expr> { .. })* (else { .. })?`.
    fn if_stmt(&mut self) -> PResult<Stmt> {
        let mut clauses = Vec::new();
        let cond = self.expression()?;
        let body = self.braced_block()?;
        clauses.push((Some(cond), body));

        while self.match_token(&[TokenKind::ElseIf]) {
            let cond = self.expression()?;
            let body = self.braced_block()?;
            clauses.push((Some(cond), body));
        }
        if self.match_token(&[TokenKind::Else]) {
            let body = self.braced_block()?;
            clauses.push((None, body));
        }
        Ok(Stmt::If(clauses))
    }

    /// Looks ahead from the current position, counting top-level (paren-depth 0)
    /// semicolons up to the `{` that starts the loop body. Used to disambiguate
    /// while-style `for <cond> { }` from C-style `for <init>; <cond>; <step> { }`.
    fn count_for_header_semicolons(&self) -> usize {
        let mut depth = 0i32;
        let mut count = 0usize;
        let mut i = self.pos;
        while i < self.tokens.len() {
            match self.tokens[i].kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Semicolon if depth <= 0 => count += 1,
                TokenKind::LeftBrace if depth <= 0 => break,
                TokenKind::Eof => break,
                _ => {}
            }
            i += 1;
        }
        count
    }

    /// Called with `for` already consumed.
    fn for_stmt(&mut self) -> PResult<Stmt> {
        if self.check(TokenKind::LeftBrace) {
            self.advance();
            return self.simple_for_body(None);
        }

        let semicolons = self.count_for_header_semicolons();
        if semicolons == 0 {
            let cond = self.expression()?;
            self.expect(TokenKind::LeftBrace, "Expect '{' to start for body.")?;
            return self.simple_for_body(Some(cond));
        }

        let init: Stmt = if self.match_token(&[TokenKind::Var]) {
            self.var_stmt()?
        } else {
            let expr = self.expression()?;
            self.expect(TokenKind::Semicolon, "Expect ';' after for-loop initializer.")?;
            Stmt::ExpressionStmt(expr)
        };
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after for-loop condition.")?;
        let step = if self.check(TokenKind::LeftBrace) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::LeftBrace, "Expect '{' to start for body.")?;

        self.step_stack.push(step.clone());
        let body_result = self.block_stmt();
        self.step_stack.pop();
        let body = body_result?;

        let mut body_stmts = match body {
            Stmt::Block(stmts) => stmts,
            other => vec![other],
        };
        if let Some(step_expr) = step {
            body_stmts.push(Stmt::ExpressionStmt(step_expr));
        }
        let loop_body = Stmt::Block(body_stmts);
        let for_stmt = Stmt::For(cond, Box::new(loop_body));
        Ok(Stmt::Block(vec![init, for_stmt]))
    }

    /// Shared tail for the two forms (infinite, while-style) whose body is a
    /// plain `{ .. }` with no lifted initializer or appended step. Called with
    /// the opening `{` already consumed.
    fn simple_for_body(&mut self, cond: Option<Expr>) -> PResult<Stmt> {
        self.step_stack.push(None);
        let body_result = self.block_stmt();
        self.step_stack.pop();
        let body = body_result?;
        Ok(Stmt::For(cond, Box::new(body)))
    }

    fn break_stmt(&mut self) -> PResult<Stmt> {
        let line = self.previous().line;
        self.expect(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
        Ok(Stmt::Break(line))
    }

    fn continue_stmt(&mut self) -> PResult<Stmt> {
        let line = self.previous().line;
        let step = self.step_stack.last().cloned().flatten();
        self.expect(TokenKind::Semicolon, "Expect ';' after 'continue'.")?;
        Ok(Stmt::Continue(line, step))
    }

    fn return_stmt(&mut self) -> PResult<Stmt> {
        let token = self.previous().clone();
        let value = if self.check(TokenKind::Semicolon) {
            Expr::Null
        } else {
            self.expression()?
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(token, value))
    }

    fn expression_stmt(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::ExpressionStmt(expr))
    }

    // ---- expression grammar, in decreasing precedence order ----

    fn expression(&mut self) -> PResult<Expr> {
        self.assign()
    }

    fn assign(&mut self) -> PResult<Expr> {
        if self.check(TokenKind::Function) {
            return self.function_expr(None);
        }
        let expr = self.ternary()?;
        if self.match_token(&[TokenKind::Equal]) {
            let op = self.previous().clone();
            let value = self.assign()?;
            return match expr {
                Expr::Primary(ref tok)
                    if matches!(tok.kind, TokenKind::Identifier | TokenKind::This) =>
                {
                    Ok(Expr::Assign(tok.clone(), op, Box::new(value)))
                }
                Expr::Get(..) => Ok(Expr::Set(Box::new(expr), op, Box::new(value))),
                _ => {
                    self.diagnostics
                        .report(op.line, &op.lexeme, "Invalid assignment target.");
                    Err(ParseAbort)
                }
            };
        }
        Ok(expr)
    }

    fn ternary(&mut self) -> PResult<Expr> {
        let cond = self.or_expr()?;
        if self.match_token(&[TokenKind::Question]) {
            let then_branch = self.ternary()?;
            self.expect(TokenKind::Colon, "Expect ':' in ternary expression.")?;
            let else_branch = self.ternary()?;
            return Ok(Expr::Ternary(
                Box::new(cond),
                Box::new(then_branch),
                Box::new(else_branch),
            ));
        }
        Ok(cond)
    }

    fn or_expr(&mut self) -> PResult<Expr> {
        let mut expr = self.and_expr()?;
        while self.match_token(&[TokenKind::Or, TokenKind::Xor]) {
            let op = self.previous().clone();
            let right = self.and_expr()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn and_expr(&mut self) -> PResult<Expr> {
        let mut expr = self.equality()?;
        while self.match_token(&[TokenKind::And]) {
            let op = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn equality(&mut self) -> PResult<Expr> {
        let mut expr = self.comparison()?;
        while self.match_token(&[TokenKind::EqualEqual, TokenKind::BangEqual]) {
            let op = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        let mut expr = self.term()?;
        while self.match_token(&[
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ]) {
            let op = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut expr = self.factor()?;
        while self.match_token(&[TokenKind::Plus, TokenKind::Minus]) {
            let op = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut expr = self.unary()?;
        while self.match_token(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]) {
            let op = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.match_token(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.previous().clone();
            let operand = self.exponent()?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
        self.exponent()
    }

    /// Right-associative: the right operand recurses back into `unary` so that
    /// `2 ** -2 ** 2` and chains of `**` both parse correctly.
    fn exponent(&mut self) -> PResult<Expr> {
        let left = self.primary()?;
        if self.match_token(&[TokenKind::StarStar]) {
            let op = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Exponent(Box::new(left), op, Box::new(right)));
        }
        Ok(left)
    }

    fn primary(&mut self) -> PResult<Expr> {
        let atom = self.primary_atom()?;
        self.postfix(atom)
    }

    fn primary_atom(&mut self) -> PResult<Expr> {
        if self.match_token(&[
            TokenKind::Number,
            TokenKind::String,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::This,
            TokenKind::Super,
            TokenKind::Identifier,
        ]) {
            return Ok(Expr::Primary(self.previous().clone()));
        }
        if self.check(TokenKind::Function) {
            return self.function_expr(None);
        }
        if self.check(TokenKind::Struct) {
            return self.struct_expr();
        }
        if self.match_token(&[TokenKind::LeftParen]) {
            let inner = self.expression()?;
            self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(inner)));
        }
        let line = self.peek().line;
        let lexeme = self.previous().lexeme.clone();
        self.diagnostics.report(line, &lexeme, "Expect expression.");
        Err(ParseAbort)
    }

    /// Applies a chain of `(args)` calls and `.name` member accesses to `expr`.
    fn postfix(&mut self, mut expr: Expr) -> PResult<Expr> {
        loop {
            if self.match_token(&[TokenKind::LeftParen]) {
                let args = self.finish_call()?;
                let callee = Self::expr_to_callee(expr);
                expr = Expr::Call(callee, args);
            } else if self.match_token(&[TokenKind::Dot]) {
                let name = self.expect(TokenKind::Identifier, "Expect property name after '.'.")?;
                let left = Self::expr_to_get_left(expr);
                if self.match_token(&[TokenKind::LeftParen]) {
                    let args = self.finish_call()?;
                    expr = Expr::Get(Box::new(left), name, Some(args));
                } else {
                    expr = Expr::Get(Box::new(left), name, None);
                }
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn expr_to_callee(expr: Expr) -> Callee {
        match expr {
            Expr::Primary(ref tok)
                if matches!(tok.kind, TokenKind::Identifier | TokenKind::This) =>
            {
                Callee::Name(tok.clone())
            }
            other => Callee::Expr(Box::new(other)),
        }
    }

    fn expr_to_get_left(expr: Expr) -> GetLeft {
        match expr {
            Expr::Primary(ref tok)
                if matches!(tok.kind, TokenKind::Identifier | TokenKind::This) =>
            {
                GetLeft::Name(tok.clone())
            }
            other => GetLeft::Expr(Box::new(other)),
        }
    }

    /// Called with the opening `(` already consumed.
    fn finish_call(&mut self) -> PResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if self.is_at_end() {
                    let line = self.peek().line;
                    self.diagnostics
                        .report_near(line, "Unterminated argument list.");
                    return Err(ParseAbort);
                }
                args.push(self.expression()?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expect ')' after arguments.")?;
        Ok(args)
    }

    /// `name` is present when parsing a struct method; `None` for an anonymous
    /// function expression. Assumes the `function` keyword has not been consumed.
    fn function_expr(&mut self, name: Option<Token>) -> PResult<Expr> {
        self.expect(TokenKind::Function, "Expect 'function'.")?;
        let params = self.param_list()?;
        self.expect(TokenKind::LeftBrace, "Expect '{' before function body.")?;
        let body = self.block_stmt()?;
        Ok(Expr::Function(name, params, Rc::new(body)))
    }

    /// Parses `(p1, p2, ...)`, assuming the opening keyword has just been consumed.
    fn param_list(&mut self) -> PResult<Vec<Token>> {
        self.expect(TokenKind::LeftParen, "Expect '(' after function name.")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.expect(TokenKind::Identifier, "Expect parameter name.")?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expect ')' after parameters.")?;
        Ok(params)
    }

    /// `struct Name { field; ... method(...) { ... } ... }` — the trailing `;`
    /// after the closing brace is consumed by the enclosing expression-statement.
    fn struct_expr(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::Struct, "Expect 'struct'.")?;
        let name = self.expect(TokenKind::Identifier, "Expect struct name.")?;
        self.expect(TokenKind::LeftBrace, "Expect '{' after struct name.")?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let member_name = self.expect(TokenKind::Identifier, "Expect field or method name.")?;
            if self.check(TokenKind::LeftParen) {
                let params = self.param_list()?;
                self.expect(TokenKind::LeftBrace, "Expect '{' before method body.")?;
                let body = self.block_stmt()?;
                methods.push(Expr::Function(Some(member_name), params, Rc::new(body)));
            } else {
                self.expect(TokenKind::Semicolon, "Expect ';' after field name.")?;
                fields.push(member_name);
            }
        }
        self.expect(TokenKind::RightBrace, "Expect '}' after struct body.")?;
        Ok(Expr::Struct(name, fields, methods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_src(src: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut d = Diagnostics::new();
        let tokens = Lexer::new(src).scan(&mut d);
        let stmts = parse(&tokens, &mut d);
        (stmts, d)
    }

    #[test]
    fn parses_print_statement() {
        let (stmts, d) = parse_src("print 1 + 2;");
        assert!(!d.has_errors());
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::Print(_)));
    }

    #[test]
    fn exponent_is_right_associative_in_shape() {
        let (stmts, d) = parse_src("println 2 ** 3 ** 2;");
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::Println(Expr::Exponent(left, _, right)) => {
                assert!(matches!(**left, Expr::Primary(_)));
                assert!(matches!(**right, Expr::Exponent(..)));
            }
            other => panic!("expected exponent expression, got {other:?}"),
        }
    }

    #[test]
    fn ternary_is_right_associative_in_shape() {
        let (stmts, d) = parse_src("println a ? b : c ? d : e;");
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::Println(Expr::Ternary(_, _, else_branch)) => {
                assert!(matches!(**else_branch, Expr::Ternary(..)));
            }
            other => panic!("expected nested ternary, got {other:?}"),
        }
    }

    #[test]
    fn var_without_initializer_defaults_to_null() {
        let (stmts, d) = parse_src("var x;");
        assert!(!d.has_errors());
        assert!(matches!(&stmts[0], Stmt::Var(_, Expr::Null)));
    }

    #[test]
    fn const_requires_initializer_and_reports_on_missing_equals() {
        let (_stmts, d) = parse_src("const x;");
        assert!(d.has_errors());
    }

    #[test]
    fn infinite_for_loop_form() {
        let (stmts, d) = parse_src("for { break; }");
        assert!(!d.has_errors());
        assert!(matches!(&stmts[0], Stmt::For(None, _)));
    }

    #[test]
    fn while_style_for_loop_form() {
        let (stmts, d) = parse_src("for x < 10 { break; }");
        assert!(!d.has_errors());
        assert!(matches!(&stmts[0], Stmt::For(Some(_), _)));
    }

    #[test]
    fn c_style_for_loop_lifts_init_and_appends_step() {
        let (stmts, d) = parse_src("for var i = 0; i < 5; i = i + 1 { print i; }");
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::Block(outer) => {
                assert_eq!(outer.len(), 2);
                assert!(matches!(outer[0], Stmt::Var(..)));
                match &outer[1] {
                    Stmt::For(Some(_), body) => match &**body {
                        Stmt::Block(inner) => {
                            assert_eq!(inner.len(), 2);
                            assert!(matches!(inner[0], Stmt::Print(_)));
                            assert!(matches!(inner[1], Stmt::ExpressionStmt(_)));
                        }
                        other => panic!("expected block body, got {other:?}"),
                    },
                    other => panic!("expected for statement, got {other:?}"),
                }
            }
            other => panic!("expected lifted block, got {other:?}"),
        }
    }

    #[test]
    fn continue_inside_c_style_for_captures_step() {
        let (stmts, d) = parse_src("for var i = 0; i < 5; i = i + 1 { continue; }");
        assert!(!d.has_errors());
        if let Stmt::Block(outer) = &stmts[0] {
            if let Stmt::For(_, body) = &outer[1] {
                if let Stmt::Block(inner) = &**body {
                    assert!(matches!(&inner[0], Stmt::Continue(_, Some(_))));
                    return;
                }
            }
        }
        panic!("unexpected shape: {stmts:?}");
    }

    #[test]
    fn continue_inside_while_style_for_has_no_step() {
        let (stmts, d) = parse_src("for x < 10 { continue; }");
        assert!(!d.has_errors());
        if let Stmt::For(_, body) = &stmts[0] {
            if let Stmt::Block(inner) = &**body {
                assert!(matches!(&inner[0], Stmt::Continue(_, None)));
                return;
            }
        }
        panic!("unexpected shape: {stmts:?}");
    }

    #[test]
    fn struct_with_fields_and_constructor_and_method() {
        let (stmts, d) = parse_src(
            "struct Point { x; y;
               __construct(a, b) { this.x = a; this.y = b; }
               sum() { return this.x + this.y; }
             };",
        );
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::ExpressionStmt(Expr::Struct(name, fields, methods)) => {
                assert_eq!(name.lexeme, "Point");
                assert_eq!(fields.len(), 2);
                assert_eq!(methods.len(), 2);
            }
            other => panic!("expected struct expression statement, got {other:?}"),
        }
    }

    #[test]
    fn field_set_through_this_parses_as_set_expr() {
        let (stmts, d) = parse_src("this.x = a;");
        assert!(!d.has_errors());
        assert!(matches!(&stmts[0], Stmt::ExpressionStmt(Expr::Set(..))));
    }

    #[test]
    fn method_call_chain_builds_get_with_call() {
        let (stmts, d) = parse_src("p.sum();");
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::ExpressionStmt(Expr::Get(_, name, Some(args))) => {
                assert_eq!(name.lexeme, "sum");
                assert!(args.is_empty());
            }
            other => panic!("expected Get with call, got {other:?}"),
        }
    }

    #[test]
    fn invalid_assignment_target_reports_diagnostic() {
        let (_stmts, d) = parse_src("1 = 2;");
        assert!(d.has_errors());
    }

    #[test]
    fn panic_mode_recovers_after_error_and_continues_parsing() {
        let (stmts, d) = parse_src("var = ; var y = 2;");
        assert!(d.has_errors());
        assert!(stmts.iter().any(|s| matches!(s, Stmt::Var(name, _) if name.lexeme == "y")));
    }

    #[test]
    fn anonymous_function_expression_parses() {
        let (stmts, d) = parse_src("var f = function(a, b) { return a + b; };");
        assert!(!d.has_errors());
        match &stmts[0] {
            Stmt::Var(_, Expr::Function(name, params, _)) => {
                assert!(name.is_none());
                assert_eq!(params.len(), 2);
            }
            other => panic!("expected function expression, got {other:?}"),
        }
    }
}
