//! Toy Codegen - JavaScript generation
//!
//! Emits JavaScript for a validated program. Keywords are renamed to their
//! JavaScript spelling, literals are copied verbatim, and grouping
//! parentheses are kept, so the output mirrors the source structure.

mod js;

pub use js::ToJs;

use toy_ast::Program;

/// How blocks are arranged in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Each top-level statement on its own line, blocks as `{ a; b; }`
    #[default]
    Inline,
    /// Blocks span multiple lines, indented `width` spaces per level
    Indented { width: usize },
}

/// Code generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodegenOptions {
    pub layout: Layout,
}

impl CodegenOptions {
    pub fn indented(width: usize) -> Self {
        Self {
            layout: Layout::Indented { width },
        }
    }
}

/// Generate JavaScript with the default inline layout
pub fn generate(program: &Program) -> String {
    generate_with(program, &CodegenOptions::default())
}

/// Generate JavaScript
pub fn generate_with(program: &Program, options: &CodegenOptions) -> String {
    program.to_js(options.layout, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toy_ast::{Expr, ExprKind, Literal, Span, Stmt, StmtKind, UnaryOp};

    fn number(raw: &str) -> Expr {
        Expr::new(ExprKind::Literal(Literal::Number(raw.to_string())), Span::dummy())
    }

    fn program_of(expr: Expr) -> Program {
        Program {
            body: vec![Stmt {
                kind: StmtKind::Expr(expr),
                span: Span::dummy(),
            }],
            span: Span::dummy(),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = Program {
            body: vec![],
            span: Span::dummy(),
        };
        assert_eq!(generate(&program), "");
    }

    #[test]
    fn test_negated_negation_keeps_space() {
        let inner = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(number("1")),
            },
            Span::dummy(),
        );
        let outer = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(inner),
            },
            Span::dummy(),
        );
        assert_eq!(generate(&program_of(outer)), "- -1;");
    }

    #[test]
    fn test_literal_spelling_is_kept() {
        assert_eq!(generate(&program_of(number("0xFF"))), "0xFF;");
    }
}
