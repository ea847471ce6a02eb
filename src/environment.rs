use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// One lexical scope's bindings plus a link to the scope it was created in.
///
/// Environments are shared (`Rc<RefCell<_>>`): a block owns its scope while
/// it runs, and every closure created inside keeps it alive afterwards.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Bind `name` in this scope, shadowing or replacing any earlier binding.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("define '{}' = {}", name, value);
        self.values.insert(name.to_string(), value);
    }

    /// Dynamic lookup through the whole chain.  Only used for globals.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// The environment exactly `distance` links up the chain from `env`.
    pub fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Option<Rc<RefCell<Environment>>> {
        let mut current: Rc<RefCell<Environment>> = Rc::clone(env);

        for _ in 0..distance {
            let next = current.borrow().enclosing.clone()?;
            current = next;
        }

        Some(current)
    }

    /// Read `name` from the scope `distance` links up, as computed by the
    /// resolver.  Never falls back to another scope.
    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Option<Value> {
        let scope = Environment::ancestor(env, distance)?;
        let value = scope.borrow().values.get(name).cloned();
        value
    }

    /// Write into the scope `distance` links up.  `None` if the chain is
    /// shorter than `distance`.
    pub fn assign_at(
        env: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &str,
        value: Value,
    ) -> Option<()> {
        let scope = Environment::ancestor(env, distance)?;
        scope.borrow_mut().values.insert(name.to_string(), value);
        Some(())
    }
}

/// `Undefined variable '<name>'.` at `name`'s line.
pub fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}
