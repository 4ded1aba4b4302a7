// ABOUTME: Binary and unary operator semantics, table-driven per operand type pairing

use crate::error::RuntimeError;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Applies a binary operator already matched against two evaluated operands.
/// `and`/`or` do not short-circuit here — both operands are always evaluated by
/// the caller before reaching this table, matching the source semantics.
pub fn apply_binary(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op.kind {
        TokenKind::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        TokenKind::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        TokenKind::Xor => Ok(Value::Bool(left.is_truthy() ^ right.is_truthy())),
        TokenKind::EqualEqual => Ok(Value::Bool(values_equal(&left, &right))),
        TokenKind::BangEqual => Ok(Value::Bool(!values_equal(&left, &right))),
        TokenKind::Less => numeric_cmp(op, &left, &right, |a, b| a < b),
        TokenKind::LessEqual => numeric_cmp(op, &left, &right, |a, b| a <= b),
        TokenKind::Greater => numeric_cmp(op, &left, &right, |a, b| a > b),
        TokenKind::GreaterEqual => numeric_cmp(op, &left, &right, |a, b| a >= b),
        TokenKind::Plus => add(op, left, right),
        TokenKind::Minus => numeric_binop(op, &left, &right, |a, b| a - b),
        TokenKind::Star => numeric_binop(op, &left, &right, |a, b| a * b),
        TokenKind::Slash => numeric_binop(op, &left, &right, |a, b| a / b),
        TokenKind::Percent => modulo(op, &left, &right),
        TokenKind::StarStar => numeric_binop(op, &left, &right, |a, b| a.powf(b)),
        _ => unreachable!("{:?} is not a binary operator", op.kind),
    }
}

pub fn apply_unary(op: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match op.kind {
        TokenKind::Minus => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(type_error(op, "-", other.type_name(), "number")),
        },
        TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
        _ => unreachable!("{:?} is not a unary operator", op.kind),
    }
}

/// `null == null` is true; other cross-type comparisons are always false;
/// same-type comparisons compare by value (functions/structs/instances by
/// identity, via `Value`'s `PartialEq`).
fn values_equal(left: &Value, right: &Value) -> bool {
    left == right
}

fn numeric_cmp(
    op: &Token,
    left: &Value,
    right: &Value,
    cmp: impl Fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(cmp(*a, *b))),
        _ => Err(type_error(op, &op.lexeme, left.type_name(), right.type_name())),
    }
}

fn numeric_binop(
    op: &Token,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(*a, *b))),
        _ => Err(type_error(op, &op.lexeme, left.type_name(), right.type_name())),
    }
}

/// `+` additionally permits string concatenation; every other arithmetic
/// operator requires two numbers.
fn add(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
        (left, right) => Err(type_error(op, "+", left.type_name(), right.type_name())),
    }
}

/// Truncates both operands toward zero before taking the remainder, matching
/// the source's `static_cast<int64_t>` behavior. Unlike the source, division by
/// a zero right-hand side is rejected explicitly rather than left to trigger a
/// hardware trap.
fn modulo(op: &Token, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let rhs = *b as i64;
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero { line: op.line });
            }
            Ok(Value::Number((*a as i64 % rhs) as f64))
        }
        _ => Err(type_error(op, "%", left.type_name(), right.type_name())),
    }
}

fn type_error(op: &Token, lexeme: &str, lhs_type: &str, rhs_type: &str) -> RuntimeError {
    RuntimeError::OperatorError {
        op: lexeme.to_string(),
        lhs_type: lhs_type.to_string(),
        rhs_type: rhs_type.to_string(),
        line: op.line,
    }
}
