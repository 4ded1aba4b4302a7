// ABOUTME: Lexically-scoped environments with separate var/const bindings and parent chaining

use crate::error::RuntimeError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A single lexical scope. `vars` and `consts` are kept as separate maps (rather
/// than one map plus a mutability flag) so that `declare_var`/`declare_const` and
/// `assign` can each consult exactly the table relevant to them.
#[derive(Debug)]
pub struct Environment {
    vars: RefCell<HashMap<String, Value>>,
    consts: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            vars: RefCell::new(HashMap::new()),
            consts: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            vars: RefCell::new(HashMap::new()),
            consts: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    fn declared_here(&self, name: &str) -> bool {
        self.vars.borrow().contains_key(name) || self.consts.borrow().contains_key(name)
    }

    /// Declares a mutable binding in this scope. Fails if `name` is already
    /// declared (as either `var` or `const`) in this same scope.
    pub fn declare_var(&self, name: &str, value: Value, line: u32) -> Result<(), RuntimeError> {
        if self.declared_here(name) {
            return Err(RuntimeError::AlreadyDeclared {
                name: name.to_string(),
                line,
            });
        }
        self.vars.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Declares an immutable binding in this scope. Fails if `name` is already
    /// declared (as either `var` or `const`) in this same scope.
    pub fn declare_const(&self, name: &str, value: Value, line: u32) -> Result<(), RuntimeError> {
        if self.declared_here(name) {
            return Err(RuntimeError::AlreadyDeclared {
                name: name.to_string(),
                line,
            });
        }
        self.consts.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Looks up a name in this scope, then walks the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Some(value.clone());
        }
        if let Some(value) = self.consts.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Assigns to an already-declared `var`, walking the parent chain to find it.
    /// Fails if `name` resolves to a `const`, or is undeclared anywhere.
    pub fn assign(&self, name: &str, value: Value, line: u32) -> Result<(), RuntimeError> {
        if self.vars.borrow().contains_key(name) {
            self.vars.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        if self.consts.borrow().contains_key(name) {
            return Err(RuntimeError::AssignToConst {
                name: name.to_string(),
                line,
            });
        }
        if let Some(parent) = &self.parent {
            return parent.assign(name, value, line);
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }
}
