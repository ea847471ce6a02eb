//! Tree‑walking evaluator.
//!
//! Statements produce a [`Flow`]: `Normal` when they complete, `Return` when
//! a `return` is unwinding towards the nearest function call.  Blocks and
//! loops pass a `Return` straight up; [`LoxFunction::call`] turns it into the
//! call's value.  Runtime errors travel as `Err(LoxError::Runtime)` and are
//! only stopped by the caller of [`Interpreter::interpret`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use chrono::Utc;
use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::callable::{Callable, LoxClass, LoxFunction, NativeFunction};
use crate::environment::{self, Environment};
use crate::error::{LoxError, Result};
use crate::instance::LoxInstance;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Grow the native stack when less than this much is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Deepest chain of nested Lox calls before `Stack overflow.` is raised.
pub const MAX_CALL_DEPTH: usize = 10_000;

/// Outcome of executing one statement.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
    call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Interpreter whose `print` statements write to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::Callable(Callable::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: |_args: &[Value]| {
                    let millis: i64 = Utc::now().timestamp_millis();
                    Ok(Value::Number(millis as f64 / 1000.0))
                },
            }))),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
            call_depth: 0,
        }
    }

    /// Record the scope distance the resolver computed for a reference.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Runs a program.  The first runtime error stops execution and is
    /// returned; nothing after it runs.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        let result = self.execute_all(statements);
        self.out.flush()?;

        match result? {
            Flow::Normal => info!("Interpretation completed successfully"),
            // The resolver rejects top-level `return`; nothing to unwind to.
            Flow::Return(value) => debug!("Stopped at top-level return of {}", value),
        }

        Ok(())
    }

    /// Runs `statements` inside `environment`, restoring the previous
    /// environment however the block is left.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = self.execute_all(statements);

        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Statement and expression evaluation recurse on the native stack for
    /// every nested call, so each step makes sure there is room first.
    fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Block(statements) => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, Rc::new(RefCell::new(environment)))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.execute_class(name, superclass.as_ref(), methods)?;
                Ok(Flow::Normal)
            }

            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Function(decl) => {
                debug!("Defining function '{}'", decl.name.lexeme);

                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(
                    &decl.name.lexeme,
                    Value::Callable(Callable::Function(Rc::new(function))),
                );
                Ok(Flow::Normal)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
        }
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<()> {
        debug!("Defining class '{}'", name.lexeme);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(class)) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(LoxError::runtime(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        // Methods of a subclass close over an extra scope holding `super`.
        let method_env: Rc<RefCell<Environment>> = match &superclass {
            Some(parent) => {
                let mut env = Environment::with_enclosing(Rc::clone(&self.environment));
                env.define(
                    "super",
                    Value::Callable(Callable::Class(Rc::clone(parent))),
                );
                Rc::new(RefCell::new(env))
            }
            None => Rc::clone(&self.environment),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|decl| {
                let is_initializer = decl.name.lexeme == "init";
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&method_env), is_initializer);
                (decl.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        self.environment.borrow_mut().assign(
            name,
            Value::Callable(Callable::Class(Rc::new(class))),
        )?;

        info!("Class '{}' defined", name.lexeme);
        Ok(())
    }

    // ───────────────────────────── expressions ─────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(lit) => Ok(match lit {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_val = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left_val.is_truthy()
                } else {
                    !left_val.is_truthy()
                };

                if short_circuit {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                // A distance of 0 is a local like any other.
                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(&self.environment, distance, &name.lexeme, value.clone())
                            .ok_or_else(|| environment::undefined(name))?;
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee_val = self.evaluate(callee)?;

                let mut arg_values: Vec<Value> = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    arg_values.push(self.evaluate(arg)?);
                }

                let Value::Callable(callable) = callee_val else {
                    return Err(LoxError::runtime(
                        paren,
                        "Can only call functions and classes.",
                    ));
                };

                if arg_values.len() != callable.arity() {
                    return Err(LoxError::runtime(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arg_values.len()
                        ),
                    ));
                }

                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(LoxError::runtime(paren, "Stack overflow."));
                }

                self.call_depth += 1;
                let result = callable.call(self, paren, arg_values);
                self.call_depth -= 1;

                result
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right_val = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },
            _ => Ok(Value::Bool(!right_val.is_truthy())),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left_val = self.evaluate(left)?;
        let right_val = self.evaluate(right)?;

        debug!(
            "Binary {} on {:?} and {:?}",
            operator.lexeme, left_val, right_val
        );

        match operator.token_type {
            TokenType::EQUAL_EQUAL => return Ok(Value::Bool(left_val == right_val)),
            TokenType::BANG_EQUAL => return Ok(Value::Bool(left_val != right_val)),
            TokenType::PLUS => {
                return match (left_val, right_val) {
                    (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                    (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                    _ => Err(LoxError::runtime(
                        operator,
                        "Operands must be two numbers or two strings.",
                    )),
                };
            }
            _ => {}
        }

        let (Value::Number(a), Value::Number(b)) = (left_val, right_val) else {
            return Err(LoxError::runtime(operator, "Operands must be numbers."));
        };

        Ok(match operator.token_type {
            TokenType::MINUS => Value::Number(a - b),
            TokenType::STAR => Value::Number(a * b),
            // IEEE‑754: x / 0 is ±inf or NaN, not an error.
            TokenType::SLASH => Value::Number(a / b),
            TokenType::GREATER => Value::Bool(a > b),
            TokenType::GREATER_EQUAL => Value::Bool(a >= b),
            TokenType::LESS => Value::Bool(a < b),
            TokenType::LESS_EQUAL => Value::Bool(a <= b),
            _ => {
                return Err(LoxError::runtime(
                    operator,
                    format!("Invalid binary operator '{}'.", operator.lexeme),
                ))
            }
        })
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, &name.lexeme)
                .ok_or_else(|| environment::undefined(name)),
            None => self.globals.borrow().get(name),
        }
    }

    /// `super.method`: look the method up starting at the superclass the
    /// enclosing class was declared with, and bind it to the current `this`,
    /// which lives one scope below `super`.
    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = *self
            .locals
            .get(&id)
            .ok_or_else(|| environment::undefined(keyword))?;

        let Some(Value::Callable(Callable::Class(superclass))) =
            Environment::get_at(&self.environment, distance, "super")
        else {
            return Err(environment::undefined(keyword));
        };

        let Some(Value::Instance(instance)) =
            Environment::get_at(&self.environment, distance.saturating_sub(1), "this")
        else {
            return Err(LoxError::runtime(keyword, "Undefined variable 'this'."));
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Callable(Callable::Function(Rc::new(
                found.bind(instance),
            )))),
            None => Err(LoxError::runtime(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }
}
