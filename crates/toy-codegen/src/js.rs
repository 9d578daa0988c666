//! JavaScript text emitter
//!
//! Every node kind has a rule here; matches are exhaustive so a node the
//! emitter does not know about cannot exist.

use crate::Layout;
use toy_ast::*;

/// Trait for converting AST nodes to JavaScript source text.
pub trait ToJs {
    /// Convert to JavaScript, with `indent` the nesting level of the node.
    fn to_js(&self, layout: Layout, indent: usize) -> String;
}

/// How a toy keyword is spelled in the output
fn keyword(toy: &'static str) -> &'static str {
    js_spelling(toy).unwrap_or(toy)
}

fn indent_str(layout: Layout, level: usize) -> String {
    match layout {
        Layout::Inline => String::new(),
        Layout::Indented { width } => " ".repeat(width * level),
    }
}

/// Lay out a braced group of already rendered lines
fn braced(lines: Vec<(usize, String)>, layout: Layout, indent: usize) -> String {
    if lines.is_empty() {
        return "{}".to_string();
    }
    match layout {
        Layout::Inline => {
            let inner: Vec<String> = lines.into_iter().map(|(_, line)| line).collect();
            format!("{{ {} }}", inner.join(" "))
        }
        Layout::Indented { .. } => {
            let mut out = String::from("{\n");
            for (level, line) in lines {
                out.push_str(&indent_str(layout, level));
                out.push_str(&line);
                out.push('\n');
            }
            out.push_str(&indent_str(layout, indent));
            out.push('}');
            out
        }
    }
}

fn join_exprs(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|e| e.to_js(Layout::Inline, 0))
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Program =====

impl ToJs for Program {
    fn to_js(&self, layout: Layout, indent: usize) -> String {
        self.body
            .iter()
            .map(|stmt| format!("{}{}", indent_str(layout, indent), stmt.to_js(layout, indent)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ===== Statements =====

impl ToJs for Block {
    fn to_js(&self, layout: Layout, indent: usize) -> String {
        let lines = self
            .statements
            .iter()
            .map(|stmt| (indent + 1, stmt.to_js(layout, indent + 1)))
            .collect();
        braced(lines, layout, indent)
    }
}

impl ToJs for VarDecl {
    /// Without the trailing semicolon, so `for` headers can reuse it
    fn to_js(&self, _layout: Layout, _indent: usize) -> String {
        let decl = match self.kind {
            DeclKind::Dec => keyword("dec"),
            DeclKind::Const => keyword("const"),
        };
        match &self.init {
            Some(init) => format!("{} {} = {}", decl, self.name.name, init.to_js(Layout::Inline, 0)),
            None => format!("{} {}", decl, self.name.name),
        }
    }
}

impl ToJs for Stmt {
    fn to_js(&self, layout: Layout, indent: usize) -> String {
        match &self.kind {
            StmtKind::VarDecl(decl) => format!("{};", decl.to_js(layout, indent)),
            StmtKind::FuncDecl(func) => {
                let params: Vec<&str> = func.params.iter().map(|p| p.name.as_str()).collect();
                format!(
                    "{} {}({}) {}",
                    keyword("func"),
                    func.name.name,
                    params.join(", "),
                    func.body.to_js(layout, indent)
                )
            }
            StmtKind::If(if_stmt) => if_stmt.to_js(layout, indent),
            StmtKind::Switch(switch) => {
                let mut lines = Vec::new();
                for case in &switch.cases {
                    let label = match &case.test {
                        Some(test) => format!("{} {}:", keyword("when"), test.to_js(layout, indent)),
                        None => "default:".to_string(),
                    };
                    match layout {
                        // Case bodies stay on the label's line
                        Layout::Inline => {
                            let mut line = label;
                            for stmt in &case.body {
                                line.push(' ');
                                line.push_str(&stmt.to_js(layout, indent + 1));
                            }
                            lines.push((indent + 1, line));
                        }
                        Layout::Indented { .. } => {
                            lines.push((indent + 1, label));
                            for stmt in &case.body {
                                lines.push((indent + 2, stmt.to_js(layout, indent + 2)));
                            }
                        }
                    }
                }
                format!(
                    "{}({}) {}",
                    keyword("look"),
                    switch.discriminant.to_js(layout, indent),
                    braced(lines, layout, indent)
                )
            }
            StmtKind::While { condition, body } => format!(
                "{}({}) {}",
                keyword("while"),
                condition.to_js(layout, indent),
                body.to_js(layout, indent)
            ),
            StmtKind::DoWhile { body, condition } => format!(
                "{} {} {}({});",
                keyword("do"),
                body.to_js(layout, indent),
                keyword("while"),
                condition.to_js(layout, indent)
            ),
            StmtKind::For(for_stmt) => {
                let mut header = match &for_stmt.init {
                    Some(ForInit::Var(decl)) => decl.to_js(layout, indent),
                    Some(ForInit::Expr(expr)) => expr.to_js(layout, indent),
                    None => String::new(),
                };
                header.push(';');
                if let Some(condition) = &for_stmt.condition {
                    header.push(' ');
                    header.push_str(&condition.to_js(layout, indent));
                }
                header.push(';');
                if let Some(update) = &for_stmt.update {
                    header.push(' ');
                    header.push_str(&update.to_js(layout, indent));
                }
                format!(
                    "{}({}) {}",
                    keyword("for"),
                    header,
                    for_stmt.body.to_js(layout, indent)
                )
            }
            StmtKind::Break => format!("{};", keyword("break")),
            StmtKind::Continue => format!("{};", keyword("keep")),
            StmtKind::Return(Some(value)) => {
                format!("{} {};", keyword("return"), value.to_js(layout, indent))
            }
            StmtKind::Return(None) => format!("{};", keyword("return")),
            StmtKind::Expr(expr) => format!("{};", expr.to_js(layout, indent)),
            StmtKind::Block(block) => block.to_js(layout, indent),
        }
    }
}

impl ToJs for IfStmt {
    fn to_js(&self, layout: Layout, indent: usize) -> String {
        let mut out = format!(
            "{}({}) {}",
            keyword("if"),
            self.condition.to_js(layout, indent),
            self.then_branch.to_js(layout, indent)
        );
        match &self.else_branch {
            Some(ElseBranch::If(nested)) => {
                out.push_str(&format!(" {} ", keyword("else")));
                out.push_str(&nested.to_js(layout, indent));
            }
            Some(ElseBranch::Block(block)) => {
                out.push_str(&format!(" {} ", keyword("else")));
                out.push_str(&block.to_js(layout, indent));
            }
            None => {}
        }
        out
    }
}

// ===== Expressions =====

impl ToJs for Expr {
    fn to_js(&self, layout: Layout, indent: usize) -> String {
        match &self.kind {
            ExprKind::Literal(lit) => lit.raw().to_string(),
            ExprKind::Ident(name) => name.clone(),
            ExprKind::Binary { op, left, right } => format!(
                "{} {} {}",
                left.to_js(layout, indent),
                op.as_str(),
                right.to_js(layout, indent)
            ),
            ExprKind::Unary { op, operand } => {
                let op = op.as_str();
                let operand = operand.to_js(layout, indent);
                // `- -x` and `+ +x` must not fuse into `--x` / `++x`
                if operand.starts_with(op) && op != "!" {
                    format!("{} {}", op, operand)
                } else {
                    format!("{}{}", op, operand)
                }
            }
            ExprKind::Assign { op, target, value } => format!(
                "{} {} {}",
                target.to_js(layout, indent),
                op.as_str(),
                value.to_js(layout, indent)
            ),
            ExprKind::Update { op, prefix, target } => {
                let target = target.to_js(layout, indent);
                if *prefix {
                    format!("{}{}", op.as_str(), target)
                } else {
                    format!("{}{}", target, op.as_str())
                }
            }
            ExprKind::Call { callee, args } => {
                format!("{}({})", callee.to_js(layout, indent), join_exprs(args))
            }
            ExprKind::Log { args } => format!("{}({})", keyword("log"), join_exprs(args)),
            ExprKind::Member { object, property } => {
                format!("{}.{}", object.to_js(layout, indent), property.name)
            }
            ExprKind::Index { object, index } => format!(
                "{}[{}]",
                object.to_js(layout, indent),
                index.to_js(layout, indent)
            ),
            ExprKind::Array(elements) => format!("[{}]", join_exprs(elements)),
            ExprKind::Grouping(inner) => format!("({})", inner.to_js(layout, indent)),
        }
    }
}
