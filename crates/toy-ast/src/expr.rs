//! Expression AST nodes

use serde::{Deserialize, Serialize};
use crate::{Ident, Span};

/// An expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Literal value: `42`, `"hello"`
    Literal(Literal),

    /// Identifier: `x`. A keyword only lands here when it was misused as a
    /// callee or assignment target.
    Ident(String),

    /// Binary operation: `a + b`, `x && y`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `!x`, `-y`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Assignment: `x = 5`, `x += 1`
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// Increment/decrement: `i++`, `--i`
    Update {
        op: UpdateOp,
        prefix: bool,
        target: Box<Expr>,
    },

    /// Function call: `foo(a, b)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// The `log(...)` builtin
    Log { args: Vec<Expr> },

    /// Property access: `a.b`
    Member {
        object: Box<Expr>,
        property: Ident,
    },

    /// Index access: `arr[0]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    /// Array literal: `[1, 2, 3]`
    Array(Vec<Expr>),

    /// Parenthesized expression, kept so output matches the source grouping
    Grouping(Box<Expr>),
}

/// A literal value, stored with its exact source spelling.
///
/// Number and string syntax is already JavaScript-compatible, so keeping the
/// lexeme makes emission lossless (escapes, quotes, radix prefixes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(String),
    String(String),
}

impl Literal {
    pub fn raw(&self) -> &str {
        match self {
            Literal::Number(raw) | Literal::String(raw) => raw,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Equality
    Eq,
    Ne,
    StrictEq,
    StrictNe,

    // Relational
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The identifier name if this is a bare identifier
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}
