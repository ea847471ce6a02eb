use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;
use crate::instance::LoxInstance;

/// A runtime value.  Cloning is cheap: heap objects are reference counted.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Callable(Callable),
    Instance(Rc<RefCell<LoxInstance>>),
}

impl Value {
    /// `nil` and `false` are falsy; everything else, `0` and `""` included,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }
}

impl PartialEq for Value {
    /// Same‑type value equality for primitives, identity for heap objects,
    /// never equal across types.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.same(b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => write_number(f, *n),

            Value::String(s) => write!(f, "{}", s),

            Value::Callable(c) => write!(f, "{}", c),

            Value::Instance(instance) => write!(f, "{}", instance.borrow()),
        }
    }
}

/// Shortest round‑trip form without a trailing `.0`.  Magnitudes of 1e21
/// and above, or below 1e-6, switch to exponent form (`1e+21`, `1e-7`), and
/// negative zero prints as `0`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }
    if n == 0.0 {
        return write!(f, "0");
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent_form = format!("{:e}", n);
        return match exponent_form.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
            _ => write!(f, "{}", exponent_form),
        };
    }

    if n.fract() == 0.0 {
        // 3.0 → 3
        write!(f, "{:.0}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Debug for Value {
    /// Closures can reach themselves through their environment, so `Debug`
    /// stays shallow and reuses the user‑facing form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}
