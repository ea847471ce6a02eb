use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::callable::{Callable, LoxClass};
use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// An object created by calling a class.  Fields live here; methods stay on
/// the class.
pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// Property read: a field if one is set, otherwise a method from the
    /// class chain bound to `instance`.
    pub fn get(instance: &Rc<RefCell<LoxInstance>>, name: &Token) -> Result<Value> {
        let method = {
            let this = instance.borrow();

            if let Some(value) = this.fields.get(&name.lexeme) {
                debug!("Read field '{}'", name.lexeme);
                return Ok(value.clone());
            }

            this.class.find_method(&name.lexeme)
        };

        match method {
            Some(method) => {
                debug!("Bound method '{}'", name.lexeme);
                let bound = method.bind(Rc::clone(instance));
                Ok(Value::Callable(Callable::Function(Rc::new(bound))))
            }
            None => Err(LoxError::runtime(
                name,
                format!("Undefined property '{}'.", name.lexeme),
            )),
        }
    }

    /// Property write.  Creates the field if it does not exist yet.
    pub fn set(&mut self, name: &Token, value: Value) {
        debug!("Set field '{}'", name.lexeme);
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl fmt::Display for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.class.name)
    }
}
