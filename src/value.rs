// ABOUTME: Runtime value model: tagged variant of null/number/bool/string/function/struct/instance

use crate::ast::Stmt;
use crate::env::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Number(f64),
    Bool(bool),
    String(String),
    Function(Rc<LeafFunction>),
    Struct(Rc<LeafStruct>),
    Instance(Rc<LeafInstance>),
}

/// A function value: parameter names, a body block shared with the AST, and the
/// captured environment chain (the closure).
#[derive(Debug)]
pub struct LeafFunction {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Rc<Stmt>,
    pub closure: Rc<Environment>,
}

/// A struct type: ordered field names and a method-name -> function table.
/// At most one method is named `__construct`.
#[derive(Debug)]
pub struct LeafStruct {
    pub name: String,
    pub fields: Vec<String>,
    pub methods: RefCell<HashMap<String, Rc<LeafFunction>>>,
}

impl LeafStruct {
    pub const CONSTRUCTOR: &'static str = "__construct";
}

/// A struct instance: a back-pointer to its type and mutable field storage.
/// `fields` uses interior mutability so that aliasing (`a = p; a.x = 1;`) is
/// visible through every handle, matching reference rather than value semantics.
#[derive(Debug)]
pub struct LeafInstance {
    pub struct_type: Rc<LeafStruct>,
    pub fields: RefCell<HashMap<String, Value>>,
}

impl Value {
    /// `null` is false; `false` is false; a number is truthy iff non-zero; a
    /// string is truthy iff non-empty; functions, structs, and instances are
    /// always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Function(_) | Value::Struct(_) | Value::Instance(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Struct(_) => "struct",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Functions, structs, and instances compare by identity.
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Struct(a), Value::Struct(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Function(_) => write!(f, "leaf_function {{ }}"),
            Value::Struct(s) => write!(f, "{} {{ }}", s.name),
            Value::Instance(inst) => {
                writeln!(f, "{} {{", inst.struct_type.name)?;
                let fields = inst.fields.borrow();
                for name in &inst.struct_type.fields {
                    let value = fields.get(name).cloned().unwrap_or(Value::Null);
                    writeln!(f, "    {:<12} : {}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
