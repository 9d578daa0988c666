//! Scope check: duplicate declarations and undeclared identifiers

use std::collections::HashSet;

use crate::{SymbolKind, SymbolTable, ValidationError};
use toy_ast::*;

/// Names the JavaScript environment provides without a declaration
pub const KNOWN_GLOBALS: &[&str] = &[
    "console",
    "Math",
    "JSON",
    "Object",
    "Array",
    "String",
    "Number",
    "Boolean",
    "Date",
    "Error",
    "Map",
    "Set",
    "Promise",
    "Symbol",
    "RegExp",
    "parseInt",
    "parseFloat",
    "isNaN",
    "isFinite",
    "setTimeout",
    "setInterval",
    "clearTimeout",
    "clearInterval",
    "globalThis",
    "process",
    "require",
    "module",
    "exports",
    "arguments",
    "this",
    "true",
    "false",
    "null",
    "undefined",
    "NaN",
    "Infinity",
];

pub struct ScopeChecker {
    symbols: SymbolTable,
    errors: Vec<ValidationError>,
    check_undeclared: bool,
    /// Undeclared names already reported; each is warned about once
    reported: HashSet<String>,
}

impl ScopeChecker {
    pub fn new(check_undeclared: bool) -> Self {
        Self {
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            check_undeclared,
            reported: HashSet::new(),
        }
    }

    pub fn check_program(mut self, program: &Program) -> Vec<ValidationError> {
        // First pass: hoist the program's own declarations
        self.collect_declarations(&program.body);
        // Second pass: walk bodies and expressions
        self.check_statements(&program.body);
        self.errors
    }

    fn declare(&mut self, ident: &Ident, kind: SymbolKind) {
        if let Err(previous) = self.symbols.define(&ident.name, kind, ident.span) {
            self.errors.push(ValidationError::DuplicateDeclaration {
                name: ident.name.clone(),
                span: ident.span,
                previous: previous.span,
            });
        }
    }

    fn declare_var(&mut self, decl: &VarDecl) {
        let kind = match decl.kind {
            DeclKind::Dec => SymbolKind::Variable,
            DeclKind::Const => SymbolKind::Constant,
        };
        self.declare(&decl.name, kind);
    }

    /// Define every declaration made directly in `statements`
    fn collect_declarations(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            match &stmt.kind {
                StmtKind::VarDecl(decl) => self.declare_var(decl),
                StmtKind::FuncDecl(func) => self.declare(&func.name, SymbolKind::Function),
                _ => {}
            }
        }
    }

    fn check_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.check_statement(stmt);
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.symbols.enter_scope();
        self.collect_declarations(&block.statements);
        self.check_statements(&block.statements);
        self.symbols.exit_scope();
    }

    fn check_statement(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => {
                if let Some(init) = &decl.init {
                    self.check_expr(init);
                }
            }
            StmtKind::FuncDecl(func) => {
                // Parameters share a scope with the top level of the body
                self.symbols.enter_scope();
                for param in &func.params {
                    self.declare(param, SymbolKind::Parameter);
                }
                self.collect_declarations(&func.body.statements);
                self.check_statements(&func.body.statements);
                self.symbols.exit_scope();
            }
            StmtKind::If(if_stmt) => self.check_if(if_stmt),
            StmtKind::Switch(switch) => {
                self.check_expr(&switch.discriminant);
                self.symbols.enter_scope();
                for case in &switch.cases {
                    self.collect_declarations(&case.body);
                }
                for case in &switch.cases {
                    if let Some(test) = &case.test {
                        self.check_expr(test);
                    }
                    self.check_statements(&case.body);
                }
                self.symbols.exit_scope();
            }
            StmtKind::While { condition, body } => {
                self.check_expr(condition);
                self.check_block(body);
            }
            StmtKind::DoWhile { body, condition } => {
                self.check_block(body);
                self.check_expr(condition);
            }
            StmtKind::For(for_stmt) => {
                self.symbols.enter_scope();
                match &for_stmt.init {
                    Some(ForInit::Var(decl)) => {
                        self.declare_var(decl);
                        if let Some(init) = &decl.init {
                            self.check_expr(init);
                        }
                    }
                    Some(ForInit::Expr(expr)) => self.check_expr(expr),
                    None => {}
                }
                if let Some(condition) = &for_stmt.condition {
                    self.check_expr(condition);
                }
                if let Some(update) = &for_stmt.update {
                    self.check_expr(update);
                }
                self.check_block(&for_stmt.body);
                self.symbols.exit_scope();
            }
            StmtKind::Break | StmtKind::Continue => {}
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.check_expr(value);
                }
            }
            StmtKind::Expr(expr) => self.check_expr(expr),
            StmtKind::Block(block) => self.check_block(block),
        }
    }

    fn check_if(&mut self, if_stmt: &IfStmt) {
        self.check_expr(&if_stmt.condition);
        self.check_block(&if_stmt.then_branch);
        match &if_stmt.else_branch {
            Some(ElseBranch::If(nested)) => self.check_if(nested),
            Some(ElseBranch::Block(block)) => self.check_block(block),
            None => {}
        }
    }

    fn check_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Ident(name) => self.check_ident(name, expr.span),
            ExprKind::Binary { left, right, .. } => {
                self.check_expr(left);
                self.check_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.check_expr(operand),
            ExprKind::Assign { target, value, .. } => {
                self.check_expr(target);
                self.check_expr(value);
            }
            ExprKind::Update { target, .. } => self.check_expr(target),
            ExprKind::Call { callee, args } => {
                self.check_expr(callee);
                for arg in args {
                    self.check_expr(arg);
                }
            }
            ExprKind::Log { args } | ExprKind::Array(args) => {
                for arg in args {
                    self.check_expr(arg);
                }
            }
            // The property name is not a variable reference
            ExprKind::Member { object, .. } => self.check_expr(object),
            ExprKind::Index { object, index } => {
                self.check_expr(object);
                self.check_expr(index);
            }
            ExprKind::Grouping(inner) => self.check_expr(inner),
        }
    }

    fn check_ident(&mut self, name: &str, span: Span) {
        if !self.check_undeclared
            || is_reserved(name)
            || is_js_reserved(name)
            || KNOWN_GLOBALS.contains(&name)
            || self.symbols.lookup(name).is_some()
            || self.reported.contains(name)
        {
            return;
        }
        self.reported.insert(name.to_string());
        self.errors.push(ValidationError::UndeclaredIdentifier {
            name: name.to_string(),
            span,
        });
    }
}
