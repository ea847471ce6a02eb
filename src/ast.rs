//! Abstract syntax tree produced by the [`crate::parser`].
//!
//! Nodes are immutable once built.  Function declarations sit behind an
//! [`Rc`] so runtime function values can share them with the tree.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

static NEXT_EXPR_ID: AtomicUsize = AtomicUsize::new(0);

/// Identity of a name‑referencing expression node (`Variable`, `Assign`,
/// `This`, `Super`).  The resolver keys its distance table on it.
///
/// Ids are unique for the life of the process, so trees parsed by separate
/// `run` calls on one session never collide in the interpreter's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(usize);

impl ExprId {
    pub fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A **literal constant** that appears directly in the source code.
///
/// The parser copies (or converts) the value at parse‑time so the AST
/// does not depend on the token payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    /// Integral lexemes such as `"3"` are still parsed as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    /// The boolean constant `true`.
    True,

    /// The boolean constant `false`.
    False,

    /// The `nil` literal.
    Nil,
}

/// Every kind of *expression* in Lox.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name = value`
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    /// Infix binary operator expression, e.g. `a + b`, `x <= y`.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Function‑, method‑ or class‑call expression.
    Call {
        /// Expression that evaluates to a callable (variable, property, etc.).
        callee: Box<Expr>,
        /// The closing `)` token ‑ retained for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// `object.name`
    Get { object: Box<Expr>, name: Token },

    /// Parenthesised sub‑expression.
    Grouping(Box<Expr>),

    Literal(LiteralValue),

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// `object.name = value`
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// `super.method`
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },

    /// The `this` keyword inside a method.
    This { id: ExprId, keyword: Token },

    /// Prefix `!` or `-`.
    Unary { operator: Token, right: Box<Expr> },

    /// Variable access.
    Variable { id: ExprId, name: Token },
}

impl Expr {
    pub fn variable(name: Token) -> Self {
        Expr::Variable {
            id: ExprId::fresh(),
            name,
        }
    }
}

/// A named function or method: `name(params) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,

    /// Parameter name tokens (arity ≤ 255).
    pub params: Vec<Token>,

    pub body: Vec<Stmt>,
}

/// Every kind of *statement*.  A program is a sequence of these.
///
/// `for` loops never appear here: the parser lowers them to `While`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    Class {
        name: Token,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },

    /// Stand‑alone expression terminated by a semicolon.
    Expression(Expr),

    Function(Rc<FunctionDecl>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    Print(Expr),

    Return {
        /// The `return` keyword token (for error locations).
        keyword: Token,
        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },

    /// `"var" IDENT ("=" initializer)? ";"`
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    While { condition: Expr, body: Box<Stmt> },
}
