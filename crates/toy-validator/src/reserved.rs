//! Reserved-word check
//!
//! A keyword may not name a variable, constant, function or parameter, be
//! called like a function, or be assigned to. The role comes from the node
//! the name sits in. Words JavaScript reserves are held to the same rule, and
//! may only be read when they are values such as `this` or `null`.

use crate::{NameRole, ValidationError};
use toy_ast::*;

#[derive(Debug, Default)]
pub struct ReservedWordChecker {
    errors: Vec<ValidationError>,
}

impl ReservedWordChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_program(mut self, program: &Program) -> Vec<ValidationError> {
        self.check_statements(&program.body);
        self.errors
    }

    fn check_name(&mut self, name: &str, role: NameRole, span: Span) {
        if is_reserved(name) || is_js_reserved(name) {
            self.errors.push(ValidationError::ReservedWord {
                name: name.to_string(),
                role,
                span,
            });
        }
    }

    fn check_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.check_statement(stmt);
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.check_statements(&block.statements);
    }

    fn check_var_decl(&mut self, decl: &VarDecl) {
        let role = match decl.kind {
            DeclKind::Dec => NameRole::Variable,
            DeclKind::Const => NameRole::Constant,
        };
        self.check_name(&decl.name.name, role, decl.name.span);
        if let Some(init) = &decl.init {
            self.check_expr(init);
        }
    }

    fn check_statement(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.check_var_decl(decl),
            StmtKind::FuncDecl(func) => {
                self.check_name(&func.name.name, NameRole::Function, func.name.span);
                for param in &func.params {
                    self.check_name(&param.name, NameRole::Parameter, param.span);
                }
                self.check_block(&func.body);
            }
            StmtKind::If(if_stmt) => self.check_if(if_stmt),
            StmtKind::Switch(switch) => {
                self.check_expr(&switch.discriminant);
                for case in &switch.cases {
                    if let Some(test) = &case.test {
                        self.check_expr(test);
                    }
                    self.check_statements(&case.body);
                }
            }
            StmtKind::While { condition, body } | StmtKind::DoWhile { body, condition } => {
                self.check_expr(condition);
                self.check_block(body);
            }
            StmtKind::For(for_stmt) => {
                match &for_stmt.init {
                    Some(ForInit::Var(decl)) => self.check_var_decl(decl),
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
            ExprKind::Ident(name) => {
                if is_js_reserved(name) && !is_js_value_word(name) {
                    self.errors.push(ValidationError::ReservedWord {
                        name: name.clone(),
                        role: NameRole::Reference,
                        span: expr.span,
                    });
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.check_expr(left);
                self.check_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.check_expr(operand),
            ExprKind::Assign { target, value, .. } => {
                self.check_target(target);
                self.check_expr(value);
            }
            ExprKind::Update { target, .. } => self.check_target(target),
            ExprKind::Call { callee, args } => {
                match callee.as_ident() {
                    Some(name) => self.check_name(name, NameRole::Callee, callee.span),
                    None => self.check_expr(callee),
                }
                self.check_exprs(args);
            }
            ExprKind::Log { args } | ExprKind::Array(args) => self.check_exprs(args),
            ExprKind::Member { object, .. } => self.check_expr(object),
            ExprKind::Index { object, index } => {
                self.check_expr(object);
                self.check_expr(index);
            }
            ExprKind::Grouping(inner) => self.check_expr(inner),
        }
    }

    fn check_target(&mut self, target: &Expr) {
        match target.as_ident() {
            Some(name) => self.check_name(name, NameRole::AssignmentTarget, target.span),
            None => self.check_expr(target),
        }
    }

    fn check_exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs {
            self.check_expr(expr);
        }
    }
}
