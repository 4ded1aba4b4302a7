// ABOUTME: Tree-walking evaluator executing a parsed Leaf program against lexical environments

use crate::ast::{Callee, Expr, GetLeft, Stmt};
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::operators::{apply_binary, apply_unary};
use crate::token::{Token, TokenKind};
use crate::value::{LeafFunction, LeafInstance, LeafStruct, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

/// A non-local control transfer produced by executing a statement. Kept
/// structurally distinct from `RuntimeError` so control flow and faults are
/// never confused at the call site.
#[derive(Debug, Clone)]
enum Signal {
    None,
    Break,
    Continue,
    Return(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallContext {
    None,
    Function,
    Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockContext {
    None,
    Loop,
}

/// Execution context threaded by value through the recursive evaluator calls
/// instead of mutable interpreter-level fields with manual save/restore.
#[derive(Debug, Clone)]
struct Ctx {
    block: BlockContext,
    call: CallContext,
    receiver: Option<Rc<LeafInstance>>,
    in_method_body: bool,
}

impl Ctx {
    fn top_level() -> Self {
        Ctx {
            block: BlockContext::None,
            call: CallContext::None,
            receiver: None,
            in_method_body: false,
        }
    }
}

/// Where `print`/`println` output goes. A real interpreter writes to the
/// process's stdout; a captured one (used by tests) keeps it in memory so it
/// can be asserted on without touching the real terminal.
enum OutputSink {
    Stdout,
    Buffer(Rc<RefCell<Vec<u8>>>),
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout => io::stdout().write(buf),
            OutputSink::Buffer(buffer) => {
                buffer.borrow_mut().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout => io::stdout().flush(),
            OutputSink::Buffer(_) => Ok(()),
        }
    }
}

pub struct Interpreter {
    globals: Rc<Environment>,
    out: OutputSink,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            globals: Environment::new(),
            out: OutputSink::Stdout,
        }
    }

    /// Builds an interpreter whose `print`/`println` output is captured in
    /// memory instead of written to the real stdout, for use by tests.
    pub fn with_captured_output() -> Self {
        Interpreter {
            globals: Environment::new(),
            out: OutputSink::Buffer(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    /// Everything written so far, if this interpreter was built with
    /// `with_captured_output`. Empty for a stdout-backed interpreter.
    pub fn captured_output(&self) -> String {
        match &self.out {
            OutputSink::Stdout => String::new(),
            OutputSink::Buffer(buffer) => String::from_utf8(buffer.borrow().clone()).unwrap_or_default(),
        }
    }

    /// Runs a statement list against the interpreter's persistent global
    /// environment. Safe to call repeatedly (e.g. once per REPL line); later
    /// calls see declarations made by earlier ones.
    pub fn run(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        let env = Rc::clone(&self.globals);
        let ctx = Ctx::top_level();
        for stmt in statements {
            self.exec_stmt(stmt, &env, &ctx)?;
        }
        Ok(())
    }

    fn exec_block(
        &mut self,
        statements: &[Stmt],
        parent: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Signal, RuntimeError> {
        let scope = Environment::with_parent(Rc::clone(parent));
        for stmt in statements {
            let signal = self.exec_stmt(stmt, &scope, ctx)?;
            if !matches!(signal, Signal::None) {
                return Ok(signal);
            }
        }
        Ok(Signal::None)
    }

    fn exec_stmt(
        &mut self,
        stmt: &Stmt,
        env: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Signal, RuntimeError> {
        match stmt {
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env, ctx)?;
                let _ = write!(self.out, "{value}");
                Ok(Signal::None)
            }
            Stmt::Println(expr) => {
                let value = self.eval_expr(expr, env, ctx)?;
                let _ = writeln!(self.out, "{value}");
                Ok(Signal::None)
            }
            Stmt::ExpressionStmt(expr) => {
                self.eval_expr(expr, env, ctx)?;
                Ok(Signal::None)
            }
            Stmt::Var(name, init) => {
                let value = self.eval_expr(init, env, ctx)?;
                env.declare_var(&name.lexeme, value, name.line)?;
                Ok(Signal::None)
            }
            Stmt::Const(name, init) => {
                let value = self.eval_expr(init, env, ctx)?;
                env.declare_const(&name.lexeme, value, name.line)?;
                Ok(Signal::None)
            }
            Stmt::Block(statements) => self.exec_block(statements, env, ctx),
            Stmt::If(clauses) => {
                for (cond, body) in clauses {
                    let take = match cond {
                        Some(cond_expr) => self.eval_expr(cond_expr, env, ctx)?.is_truthy(),
                        None => true,
                    };
                    if take {
                        return self.exec_stmt(body, env, ctx);
                    }
                }
                Ok(Signal::None)
            }
            Stmt::For(cond, body) => self.exec_for(cond.as_ref(), body, env, ctx),
            Stmt::Break(line) => {
                if ctx.block != BlockContext::Loop {
                    return Err(RuntimeError::BreakOutsideLoop { line: *line });
                }
                Ok(Signal::Break)
            }
            Stmt::Continue(line, step) => {
                if ctx.block != BlockContext::Loop {
                    return Err(RuntimeError::ContinueOutsideLoop { line: *line });
                }
                if let Some(step_expr) = step {
                    self.eval_expr(step_expr, env, ctx)?;
                }
                Ok(Signal::Continue)
            }
            Stmt::Return(token, value) => {
                if ctx.call != CallContext::Function {
                    return Err(RuntimeError::ReturnOutsideFunction { line: token.line });
                }
                let value = self.eval_expr(value, env, ctx)?;
                Ok(Signal::Return(value))
            }
        }
    }

    fn exec_for(
        &mut self,
        cond: Option<&Expr>,
        body: &Stmt,
        env: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Signal, RuntimeError> {
        let loop_ctx = Ctx {
            block: BlockContext::Loop,
            ..ctx.clone()
        };
        let body_stmts: &[Stmt] = match body {
            Stmt::Block(stmts) => stmts,
            other => std::slice::from_ref(other),
        };
        loop {
            if let Some(cond_expr) = cond {
                if !self.eval_expr(cond_expr, env, ctx)?.is_truthy() {
                    break;
                }
            }
            match self.exec_block(body_stmts, env, &loop_ctx)? {
                Signal::Break => break,
                Signal::Return(value) => return Ok(Signal::Return(value)),
                Signal::Continue | Signal::None => {}
            }
        }
        Ok(Signal::None)
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Rc<Environment>, ctx: &Ctx) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::Primary(token) => self.eval_primary(token, env, ctx),
            Expr::Grouping(inner) => self.eval_expr(inner, env, ctx),
            Expr::Unary(op, operand) => {
                let value = self.eval_expr(operand, env, ctx)?;
                apply_unary(op, value)
            }
            Expr::Binary(left, op, right) => {
                let l = self.eval_expr(left, env, ctx)?;
                let r = self.eval_expr(right, env, ctx)?;
                apply_binary(op, l, r)
            }
            Expr::Exponent(left, op, right) => {
                let l = self.eval_expr(left, env, ctx)?;
                let r = self.eval_expr(right, env, ctx)?;
                apply_binary(op, l, r)
            }
            Expr::Ternary(cond, then_branch, else_branch) => {
                if self.eval_expr(cond, env, ctx)?.is_truthy() {
                    self.eval_expr(then_branch, env, ctx)
                } else {
                    self.eval_expr(else_branch, env, ctx)
                }
            }
            Expr::Assign(name, _op, value) => {
                let value = self.eval_expr(value, env, ctx)?;
                env.assign(&name.lexeme, value.clone(), name.line)?;
                Ok(value)
            }
            Expr::Function(name, params, body) => Ok(Value::Function(Rc::new(LeafFunction {
                name: name.as_ref().map(|t| t.lexeme.clone()),
                params: params.iter().map(|t| t.lexeme.clone()).collect(),
                body: Rc::clone(body),
                closure: Rc::clone(env),
            }))),
            Expr::Call(callee, args) => self.eval_call(callee, args, env, ctx),
            Expr::Struct(name, fields, methods) => {
                self.eval_struct_def(name, fields, methods, env, ctx)
            }
            Expr::Get(left, right, opt_call) => {
                self.eval_get(left, right, opt_call.as_deref(), env, ctx)
            }
            Expr::Set(target, _op, value) => self.eval_set(target, value, env, ctx),
        }
    }

    fn eval_primary(&mut self, token: &Token, env: &Rc<Environment>, ctx: &Ctx) -> Result<Value, RuntimeError> {
        match token.kind {
            TokenKind::Number => Ok(Value::Number(token.lexeme.parse().unwrap_or(f64::NAN))),
            TokenKind::String => Ok(Value::String(token.lexeme.clone())),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::This => match &ctx.receiver {
                Some(instance) => Ok(Value::Instance(Rc::clone(instance))),
                None => Err(RuntimeError::ThisOutsideMethod { line: token.line }),
            },
            TokenKind::Super => Err(RuntimeError::UndefinedVariable {
                name: "super".to_string(),
                line: token.line,
            }),
            TokenKind::Identifier => env.lookup(&token.lexeme).ok_or_else(|| {
                RuntimeError::UndefinedVariable {
                    name: token.lexeme.clone(),
                    line: token.line,
                }
            }),
            _ => unreachable!("{:?} cannot appear as a Primary token", token.kind),
        }
    }

    /// Resolves a call's callee name. Inside a method body, a stored
    /// function-valued field takes precedence over the enclosing environment,
    /// so a method can invoke a callback stashed on `this` by its bare name.
    fn resolve_callee(&mut self, token: &Token, env: &Rc<Environment>, ctx: &Ctx) -> Result<Value, RuntimeError> {
        if token.kind == TokenKind::This {
            return self.eval_primary(token, env, ctx);
        }
        if ctx.in_method_body {
            if let Some(receiver) = &ctx.receiver {
                if let Some(value) = receiver.fields.borrow().get(&token.lexeme) {
                    return Ok(value.clone());
                }
            }
        }
        env.lookup(&token.lexeme).ok_or_else(|| RuntimeError::UndefinedVariable {
            name: token.lexeme.clone(),
            line: token.line,
        })
    }

    fn eval_call(
        &mut self,
        callee: &Callee,
        args: &[Expr],
        env: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Value, RuntimeError> {
        let (callee_value, line) = match callee {
            Callee::Name(token) => (self.resolve_callee(token, env, ctx)?, token.line),
            Callee::Expr(expr) => (self.eval_expr(expr, env, ctx)?, expr_line(expr)),
        };
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_expr(arg, env, ctx)?);
        }
        match callee_value {
            Value::Struct(struct_type) => self.construct_instance(&struct_type, arg_values, line),
            Value::Function(function) => {
                self.call_function(&function, arg_values, line, CallContext::Function, None)
            }
            other => Err(RuntimeError::NotCallable {
                name: other.type_name().to_string(),
                line,
            }),
        }
    }

    fn construct_instance(
        &mut self,
        struct_type: &Rc<LeafStruct>,
        args: Vec<Value>,
        line: u32,
    ) -> Result<Value, RuntimeError> {
        let constructor = struct_type
            .methods
            .borrow()
            .get(LeafStruct::CONSTRUCTOR)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedField {
                name: struct_type.name.clone(),
                field: LeafStruct::CONSTRUCTOR.to_string(),
                line,
            })?;

        let fields = struct_type
            .fields
            .iter()
            .map(|name| (name.clone(), Value::Null))
            .collect::<HashMap<_, _>>();
        let instance = Rc::new(LeafInstance {
            struct_type: Rc::clone(struct_type),
            fields: RefCell::new(fields),
        });

        self.call_function(
            &constructor,
            args,
            line,
            CallContext::Constructor,
            Some(Rc::clone(&instance)),
        )?;
        Ok(Value::Instance(instance))
    }

    fn call_function(
        &mut self,
        function: &Rc<LeafFunction>,
        args: Vec<Value>,
        line: u32,
        call_context: CallContext,
        receiver: Option<Rc<LeafInstance>>,
    ) -> Result<Value, RuntimeError> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: function.params.len(),
                actual: args.len(),
                line,
            });
        }
        let call_env = Environment::with_parent(Rc::clone(&function.closure));
        for (param, value) in function.params.iter().zip(args) {
            call_env.declare_var(param, value, line)?;
        }
        let in_method_body = receiver.is_some();
        let call_ctx = Ctx {
            block: BlockContext::None,
            call: call_context,
            receiver,
            in_method_body,
        };
        let body_stmts: &[Stmt] = match function.body.as_ref() {
            Stmt::Block(stmts) => stmts,
            other => std::slice::from_ref(other),
        };
        match self.exec_block(body_stmts, &call_env, &call_ctx)? {
            Signal::Return(value) => Ok(value),
            _ => Ok(Value::Null),
        }
    }

    fn eval_struct_def(
        &mut self,
        name: &Token,
        fields: &[Token],
        methods: &[Expr],
        env: &Rc<Environment>,
        _ctx: &Ctx,
    ) -> Result<Value, RuntimeError> {
        let struct_type = Rc::new(LeafStruct {
            name: name.lexeme.clone(),
            fields: fields.iter().map(|t| t.lexeme.clone()).collect(),
            methods: RefCell::new(HashMap::new()),
        });
        for method_expr in methods {
            if let Expr::Function(method_name, params, body) = method_expr {
                let method_name = method_name
                    .as_ref()
                    .expect("struct methods are always parsed with a name")
                    .lexeme
                    .clone();
                let function = Rc::new(LeafFunction {
                    name: Some(method_name.clone()),
                    params: params.iter().map(|t| t.lexeme.clone()).collect(),
                    body: Rc::clone(body),
                    closure: Rc::clone(env),
                });
                struct_type.methods.borrow_mut().insert(method_name, function);
            }
        }
        let value = Value::Struct(Rc::clone(&struct_type));
        env.declare_const(&name.lexeme, value.clone(), name.line)?;
        Ok(value)
    }

    fn eval_get_left(&mut self, left: &GetLeft, env: &Rc<Environment>, ctx: &Ctx) -> Result<Value, RuntimeError> {
        match left {
            GetLeft::Name(token) => self.eval_primary(token, env, ctx),
            GetLeft::Expr(expr) => self.eval_expr(expr, env, ctx),
        }
    }

    fn eval_get(
        &mut self,
        left: &GetLeft,
        right: &Token,
        opt_call: Option<&[Expr]>,
        env: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Value, RuntimeError> {
        let target = self.eval_get_left(left, env, ctx)?;
        let instance = match target {
            Value::Instance(instance) => instance,
            other => {
                return Err(RuntimeError::NotAStruct {
                    name: other.type_name().to_string(),
                    line: right.line,
                })
            }
        };
        match opt_call {
            None => instance
                .fields
                .borrow()
                .get(&right.lexeme)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedField {
                    name: instance.struct_type.name.clone(),
                    field: right.lexeme.clone(),
                    line: right.line,
                }),
            Some(args) => self.dispatch_method(&instance, right, args, env, ctx),
        }
    }

    fn dispatch_method(
        &mut self,
        instance: &Rc<LeafInstance>,
        method_name: &Token,
        args: &[Expr],
        env: &Rc<Environment>,
        ctx: &Ctx,
    ) -> Result<Value, RuntimeError> {
        let function = instance
            .struct_type
            .methods
            .borrow()
            .get(&method_name.lexeme)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedField {
                name: instance.struct_type.name.clone(),
                field: method_name.lexeme.clone(),
                line: method_name.line,
            })?;

        let method_ctx = Ctx {
            receiver: Some(Rc::clone(instance)),
            in_method_body: true,
            ..ctx.clone()
        };
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_expr(arg, env, &method_ctx)?);
        }
        self.call_function(
            &function,
            arg_values,
            method_name.line,
            CallContext::Function,
            Some(Rc::clone(instance)),
        )
    }

    fn eval_set(&mut self, target: &Expr, value: &Expr, env: &Rc<Environment>, ctx: &Ctx) -> Result<Value, RuntimeError> {
        let Expr::Get(left, right, opt_call) = target else {
            unreachable!("Set target is always a Get expression");
        };
        if opt_call.is_some() {
            return Err(RuntimeError::UndefinedField {
                name: String::new(),
                field: right.lexeme.clone(),
                line: right.line,
            });
        }
        let target_value = self.eval_get_left(left, env, ctx)?;
        let instance = match target_value {
            Value::Instance(instance) => instance,
            other => {
                return Err(RuntimeError::NotAStruct {
                    name: other.type_name().to_string(),
                    line: right.line,
                })
            }
        };
        if !instance.fields.borrow().contains_key(&right.lexeme) {
            return Err(RuntimeError::UndefinedField {
                name: instance.struct_type.name.clone(),
                field: right.lexeme.clone(),
                line: right.line,
            });
        }
        let value = self.eval_expr(value, env, ctx)?;
        instance.fields.borrow_mut().insert(right.lexeme.clone(), value.clone());
        Ok(value)
    }
}

/// Finds a representative source line for an arbitrary expression, used to
/// attribute "not callable"-style errors when the callee is not a bare name.
fn expr_line(expr: &Expr) -> u32 {
    match expr {
        Expr::Null => 0,
        Expr::Primary(t) => t.line,
        Expr::Grouping(inner) => expr_line(inner),
        Expr::Unary(t, _) => t.line,
        Expr::Binary(_, t, _) => t.line,
        Expr::Exponent(_, t, _) => t.line,
        Expr::Ternary(cond, _, _) => expr_line(cond),
        Expr::Assign(t, _, _) => t.line,
        Expr::Function(name, _, _) => name.as_ref().map(|t| t.line).unwrap_or(0),
        Expr::Call(callee, _) => match callee {
            Callee::Name(t) => t.line,
            Callee::Expr(e) => expr_line(e),
        },
        Expr::Struct(t, _, _) => t.line,
        Expr::Get(_, t, _) => t.line,
        Expr::Set(target, _, _) => expr_line(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::lexer::Lexer;
    use crate::parser::parse;

    fn run(src: &str) -> (Result<(), RuntimeError>, String) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(src).scan(&mut diagnostics);
        let statements = parse(&tokens, &mut diagnostics);
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.messages());

        let mut interpreter = Interpreter::with_captured_output();
        let result = interpreter.run(&statements);
        let output = interpreter.captured_output();
        (result, output)
    }

    #[test]
    fn arithmetic_precedence_scenario() {
        let (result, output) = run("println 1 + 2 * 3 ** 2;");
        assert!(result.is_ok());
        assert_eq!(output, "19\n");
    }

    #[test]
    fn right_associative_exponent_scenario() {
        let (result, output) = run("println 2 ** 3 ** 2;");
        assert!(result.is_ok());
        assert_eq!(output, "512\n");
    }

    #[test]
    fn closures_scenario() {
        let (result, output) = run(
            "var mk = function(n) { return function() { n = n + 1; return n; }; };
             var c = mk(10);
             println c(); println c(); println c();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "11\n12\n13\n");
    }

    #[test]
    fn const_enforcement_scenario() {
        let (result, _output) = run("const x = 1; x = 2;");
        let err = result.unwrap_err();
        assert!(matches!(err, RuntimeError::AssignToConst { .. }));
        assert!(err.to_string().contains("const"));
        assert!(err.to_string().contains('x'));
    }

    #[test]
    fn struct_constructor_and_method_scenario() {
        let (result, output) = run(
            "struct Point { x; y;
               __construct(a, b) { this.x = a; this.y = b; }
               sum() { return this.x + this.y; }
             };
             var p = Point(3, 4);
             println p.sum();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "7\n");
    }

    #[test]
    fn for_loop_continue_re_evaluates_step_scenario() {
        let (result, output) = run(
            "for var i = 0; i < 5; i = i + 1 {
               if i == 2 { continue; }
               print i;
             }",
        );
        assert!(result.is_ok());
        assert_eq!(output, "0134");
    }

    #[test]
    fn infinite_for_loop_with_break_terminates() {
        let (result, output) = run("for { break; } println 1;");
        assert!(result.is_ok());
        assert_eq!(output, "1\n");
    }

    #[test]
    fn break_outside_loop_is_a_runtime_error() {
        let (result, _output) = run("break;");
        assert!(matches!(result.unwrap_err(), RuntimeError::BreakOutsideLoop { .. }));
    }

    #[test]
    fn continue_outside_loop_is_a_runtime_error() {
        let (result, _output) = run("continue;");
        assert!(matches!(
            result.unwrap_err(),
            RuntimeError::ContinueOutsideLoop { .. }
        ));
    }

    #[test]
    fn return_outside_function_is_a_runtime_error() {
        let (result, _output) = run("return 1;");
        assert!(matches!(
            result.unwrap_err(),
            RuntimeError::ReturnOutsideFunction { .. }
        ));
    }

    #[test]
    fn return_inside_constructor_is_a_runtime_error() {
        let (result, _output) = run(
            "struct S { __construct() { return 1; } };
             var s = S();",
        );
        assert!(matches!(
            result.unwrap_err(),
            RuntimeError::ReturnOutsideFunction { .. }
        ));
    }

    #[test]
    fn calling_non_function_is_a_runtime_error() {
        let (result, _output) = run("var x = 1; x();");
        assert!(matches!(result.unwrap_err(), RuntimeError::NotCallable { .. }));
    }

    #[test]
    fn arity_mismatch_is_a_runtime_error() {
        let (result, _output) = run("var f = function(a, b) { return a; }; f(1);");
        assert!(matches!(result.unwrap_err(), RuntimeError::ArityMismatch { .. }));
    }

    #[test]
    fn aliased_instance_mutation_is_visible_through_both_handles() {
        let (result, output) = run(
            "struct P { x; __construct(a) { this.x = a; } };
             var p = P(1);
             var a = p;
             a.x = 9;
             println p.x;",
        );
        assert!(result.is_ok());
        assert_eq!(output, "9\n");
    }

    #[test]
    fn method_can_call_stored_function_field_by_bare_name() {
        let (result, output) = run(
            "struct Box { fn;
               __construct(f) { this.fn = f; }
               run() { return fn(); }
             };
             var b = Box(function() { return 42; });
             println b.run();",
        );
        assert!(result.is_ok());
        assert_eq!(output, "42\n");
    }

    #[test]
    fn ternary_picks_exactly_one_branch() {
        let (result, output) = run("println true ? 1 : 2; println false ? 1 : 2;");
        assert!(result.is_ok());
        assert_eq!(output, "1\n2\n");
    }

    #[test]
    fn redeclaration_in_same_scope_is_a_runtime_error() {
        let (result, _output) = run("var x = 1; var x = 2;");
        assert!(matches!(result.unwrap_err(), RuntimeError::AlreadyDeclared { .. }));
    }

    #[test]
    fn block_scope_is_destroyed_on_exit() {
        let (result, _output) = run("{ var x = 1; } println x;");
        assert!(matches!(
            result.unwrap_err(),
            RuntimeError::UndefinedVariable { .. }
        ));
    }
}
