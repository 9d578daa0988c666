//! Statement AST nodes

use serde::{Deserialize, Serialize};
use crate::{Expr, Span};

/// A name at a binding site: variable, function or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A block of statements: `{ ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// A statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    /// `dec x = 5;` or `const y = 1;`
    VarDecl(VarDecl),

    /// `func add(a, b) { ... }`
    FuncDecl(FuncDecl),

    /// `if (c) { ... } else { ... }`
    If(IfStmt),

    /// `look (x) { when 1: ... }`
    Switch(SwitchStmt),

    /// `while (c) { ... }`
    While { condition: Expr, body: Block },

    /// `do { ... } while (c);`
    DoWhile { body: Block, condition: Expr },

    /// `for (dec i = 0; i < n; i++) { ... }`
    For(ForStmt),

    /// `break;`
    Break,

    /// `keep;`
    Continue,

    /// `return;` or `return x;`
    Return(Option<Expr>),

    /// Expression statement: `f(x);`
    Expr(Expr),

    /// Bare block: `{ ... }`
    Block(Block),
}

/// Which keyword introduced a variable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    /// `dec`, emitted as `let`
    Dec,
    /// `const`
    Const,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub kind: DeclKind,
    pub name: Ident,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElseBranch {
    /// `else if (...) { ... }`
    If(Box<IfStmt>),
    /// `else { ... }`
    Block(Block),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub discriminant: Expr,
    pub cases: Vec<SwitchCase>,
}

/// One `when` (or `default`) arm of a `look` statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ForInit {
    Var(VarDecl),
    Expr(Expr),
}

impl Block {
    /// Depth of the deepest nested block, counting this one
    pub fn depth(&self) -> usize {
        1 + self
            .statements
            .iter()
            .map(Stmt::block_depth)
            .max()
            .unwrap_or(0)
    }
}

impl Stmt {
    /// Number of statements in this subtree, this one included
    pub fn count(&self) -> usize {
        1 + match &self.kind {
            StmtKind::FuncDecl(f) => count_all(&f.body.statements),
            StmtKind::If(i) => i.count_nested(),
            StmtKind::Switch(s) => s.cases.iter().map(|c| count_all(&c.body)).sum(),
            StmtKind::While { body, .. } | StmtKind::DoWhile { body, .. } => {
                count_all(&body.statements)
            }
            StmtKind::For(f) => count_all(&f.body.statements),
            StmtKind::Block(b) => count_all(&b.statements),
            StmtKind::VarDecl(_)
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Return(_)
            | StmtKind::Expr(_) => 0,
        }
    }

    /// Nesting depth of braces opened by this statement
    pub fn block_depth(&self) -> usize {
        match &self.kind {
            StmtKind::FuncDecl(f) => f.body.depth(),
            StmtKind::If(i) => i.block_depth(),
            StmtKind::Switch(s) => {
                1 + s
                    .cases
                    .iter()
                    .flat_map(|c| c.body.iter())
                    .map(Stmt::block_depth)
                    .max()
                    .unwrap_or(0)
            }
            StmtKind::While { body, .. } | StmtKind::DoWhile { body, .. } => body.depth(),
            StmtKind::For(f) => f.body.depth(),
            StmtKind::Block(b) => b.depth(),
            StmtKind::VarDecl(_)
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Return(_)
            | StmtKind::Expr(_) => 0,
        }
    }
}

impl IfStmt {
    fn count_nested(&self) -> usize {
        let then = count_all(&self.then_branch.statements);
        match &self.else_branch {
            None => then,
            // `else if` counts as a statement of its own
            Some(ElseBranch::If(nested)) => then + 1 + nested.count_nested(),
            Some(ElseBranch::Block(b)) => then + count_all(&b.statements),
        }
    }

    fn block_depth(&self) -> usize {
        let then = self.then_branch.depth();
        match &self.else_branch {
            None => then,
            Some(ElseBranch::If(nested)) => then.max(nested.block_depth()),
            Some(ElseBranch::Block(b)) => then.max(b.depth()),
        }
    }
}

fn count_all(stmts: &[Stmt]) -> usize {
    stmts.iter().map(Stmt::count).sum()
}
