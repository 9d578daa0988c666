//! Recursive descent parser implementation

use toy_ast::*;
use toy_lexer::{Token, TokenKind};

use crate::ParseError;

/// The AST together with every recoverable error met while building it
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether parsing stopped early on a hard failure
    pub fn aborted(&self) -> bool {
        self.errors.iter().any(ParseError::is_fatal)
    }
}

/// Deepest recursion through blocks and nested expressions
pub const MAX_NESTING: usize = 64;

/// Deepest syntax tree the parser builds, counting operator chains
pub const MAX_TREE_DEPTH: usize = 512;

pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    errors: Vec<ParseError>,
    /// Nested blocks and expressions currently open
    nesting: usize,
    /// Tree depth of the node being built
    depth: usize,
    /// Deepest node finished since the current chain began
    deepest: usize,
}

impl<'src> Parser<'src> {
    pub fn new(mut tokens: Vec<Token<'src>>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
                .unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: "",
                span,
            });
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            nesting: 0,
            depth: 0,
            deepest: 0,
        }
    }

    // === Utilities ===

    fn current(&self) -> Token<'src> {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                kind.describe(),
                self.peek(),
                self.span(),
            ))
        }
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token
    fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => self.span(),
        }
    }

    /// Run `parse` one level deeper, failing past the nesting limits
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(self.too_deep(MAX_NESTING));
        }
        let (nesting, depth) = (self.nesting, self.depth);
        self.deepen()?;
        self.nesting += 1;
        let result = parse(self);
        self.nesting = nesting;
        self.depth = depth;
        result
    }

    fn deepen(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_TREE_DEPTH {
            return Err(self.too_deep(MAX_TREE_DEPTH));
        }
        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        Ok(())
    }

    /// The expression built so far becomes the child of a new node
    fn link(&mut self) -> Result<(), ParseError> {
        self.depth = self.deepest;
        self.deepen()
    }

    fn too_deep(&self, limit: usize) -> ParseError {
        ParseError::NestingTooDeep {
            limit,
            span: self.span(),
        }
    }

    /// `default` is only a label inside a `look` body
    fn at_default_label(&self) -> bool {
        let token = self.current();
        token.kind == TokenKind::Ident
            && token.lexeme == "default"
            && self.peek_ahead(1) == TokenKind::Colon
    }

    // === Program ===

    pub fn parse_program(mut self) -> ParseOutput {
        let start = self.span();

        // A fatal error keeps the statements parsed before it
        let mut body = Vec::new();
        if let Err(fatal) = self.parse_statements_into(&mut body, &[], false) {
            self.errors.push(fatal);
        }

        let span = start.merge(self.span());
        ParseOutput {
            program: Program { body, span },
            errors: self.errors,
        }
    }

    /// Parse statements until one of `terminators` or end of input.
    ///
    /// Recoverable errors are recorded and parsing resumes at the next
    /// statement boundary; a fatal error is returned.
    fn parse_statements(
        &mut self,
        terminators: &[TokenKind],
        in_switch: bool,
    ) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        self.parse_statements_into(&mut statements, terminators, in_switch)?;
        Ok(statements)
    }

    fn parse_statements_into(
        &mut self,
        statements: &mut Vec<Stmt>,
        terminators: &[TokenKind],
        in_switch: bool,
    ) -> Result<(), ParseError> {
        loop {
            let kind = self.peek();
            if kind == TokenKind::Eof || terminators.contains(&kind) {
                break;
            }
            if in_switch && self.at_default_label() {
                break;
            }

            let before = self.pos;
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize(before);
                }
            }
        }

        Ok(())
    }

    /// Skip to the next statement boundary, stepping over balanced braces
    fn synchronize(&mut self, statement_start: usize) {
        let mut depth = 0usize;

        if self.pos == statement_start {
            match self.advance().kind {
                TokenKind::Semicolon | TokenKind::Eof => return,
                TokenKind::LBrace => depth += 1,
                _ => {}
            }
        }

        loop {
            match self.peek() {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::LBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.advance();
                }
                kind if depth == 0 && (kind.starts_statement() || self.at_default_label()) => {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // === Statements ===

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.nested(Self::parse_block_inner)
    }

    fn parse_block_inner(&mut self) -> Result<Block, ParseError> {
        let start = self.span();
        self.consume(TokenKind::LBrace)?;

        let statements = self.parse_statements(&[TokenKind::RBrace], false)?;

        if self.at(TokenKind::Eof) {
            return Err(ParseError::UnterminatedBlock {
                span: self.span(),
                opened: start,
            });
        }
        self.consume(TokenKind::RBrace)?;

        Ok(Block {
            statements,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();

        if self.keyword_misused_as_name() {
            let expr = self.parse_expr()?;
            self.consume(TokenKind::Semicolon)?;
            return Ok(Stmt {
                kind: StmtKind::Expr(expr),
                span: start.merge(self.previous_span()),
            });
        }

        let kind = match self.peek() {
            TokenKind::Dec | TokenKind::Const => {
                let decl = self.parse_var_decl()?;
                self.consume(TokenKind::Semicolon)?;
                StmtKind::VarDecl(decl)
            }
            TokenKind::Func => StmtKind::FuncDecl(self.parse_func_decl()?),
            TokenKind::If => StmtKind::If(self.parse_if_stmt()?),
            TokenKind::Look => StmtKind::Switch(self.parse_switch_stmt()?),
            TokenKind::While => self.parse_while_stmt()?,
            TokenKind::Do => self.parse_do_while_stmt()?,
            TokenKind::For => StmtKind::For(self.parse_for_stmt()?),
            TokenKind::Break => {
                self.advance();
                self.consume(TokenKind::Semicolon)?;
                StmtKind::Break
            }
            TokenKind::Keep => {
                self.advance();
                self.consume(TokenKind::Semicolon)?;
                StmtKind::Continue
            }
            TokenKind::Return => self.parse_return_stmt()?,
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            kind @ (TokenKind::Else | TokenKind::When) => {
                return Err(ParseError::unexpected("statement", kind, start));
            }
            _ => {
                let expr = self.parse_expr()?;
                self.consume(TokenKind::Semicolon)?;
                StmtKind::Expr(expr)
            }
        };

        Ok(Stmt {
            kind,
            span: start.merge(self.previous_span()),
        })
    }

    /// A statement keyword used like a name: `if(3);` or `dec = 1;`.
    ///
    /// These parse as expression statements so the validator can report the
    /// keyword by its role instead of the parser failing on the shape.
    fn keyword_misused_as_name(&self) -> bool {
        let kind = self.peek();
        if !kind.is_keyword() || matches!(kind, TokenKind::Log | TokenKind::Return) {
            return false;
        }
        if assign_op(self.peek_ahead(1)).is_some() {
            return true;
        }
        if self.peek_ahead(1) != TokenKind::LParen {
            return false;
        }

        let mut depth = 0usize;
        let mut i = self.pos + 1;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Semicolon);
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    /// A name at a binding site. Keywords are accepted here and rejected by
    /// the validator, which knows the role the name plays.
    fn parse_binding_name(&mut self) -> Result<Ident, ParseError> {
        let token = self.current();
        if token.kind == TokenKind::Ident || token.kind.is_keyword() {
            self.advance();
            Ok(Ident::new(token.lexeme, token.span))
        } else {
            Err(ParseError::unexpected("identifier", token.kind, token.span))
        }
    }

    /// `dec x = expr` / `const x = expr`, without the trailing `;`
    fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let kind = match self.advance().kind {
            TokenKind::Const => DeclKind::Const,
            _ => DeclKind::Dec,
        };
        let name = self.parse_binding_name()?;

        let init = if self.at(TokenKind::Assign) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };

        if kind == DeclKind::Const && init.is_none() {
            return Err(ParseError::MissingInitializer {
                name: name.name,
                span: name.span,
            });
        }

        Ok(VarDecl { kind, name, init })
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.consume(TokenKind::Func)?;
        let name = self.parse_binding_name()?;

        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                params.push(self.parse_binding_name()?);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.consume(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(FuncDecl { name, params, body })
    }

    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.consume(TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.consume(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.span();
        self.consume(TokenKind::If)?;
        let condition = self.parse_paren_expr()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.at(TokenKind::Else) {
            self.advance();
            match self.peek() {
                TokenKind::If => {
                    // Long `else if` chains only count toward tree depth
                    let depth = self.depth;
                    self.deepen()?;
                    let nested = self.parse_if_stmt();
                    self.depth = depth;
                    Some(ElseBranch::If(Box::new(nested?)))
                }
                TokenKind::LBrace => Some(ElseBranch::Block(self.parse_block()?)),
                other => {
                    return Err(ParseError::unexpected("'if' or '{'", other, self.span()));
                }
            }
        } else {
            None
        };

        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_switch_stmt(&mut self) -> Result<SwitchStmt, ParseError> {
        self.consume(TokenKind::Look)?;
        let discriminant = self.parse_paren_expr()?;

        let open = self.span();
        self.consume(TokenKind::LBrace)?;
        let cases = self.nested(|parser| parser.parse_switch_cases(open))?;
        self.consume(TokenKind::RBrace)?;

        Ok(SwitchStmt {
            discriminant,
            cases,
        })
    }

    fn parse_switch_cases(&mut self, open: Span) -> Result<Vec<SwitchCase>, ParseError> {
        let mut cases = Vec::new();
        loop {
            match self.peek() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::UnterminatedBlock {
                        span: self.span(),
                        opened: open,
                    });
                }
                _ => {}
            }

            let before = self.pos;
            match self.parse_switch_case() {
                Ok(case) => cases.push(case),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize(before);
                }
            }
        }
        Ok(cases)
    }

    fn parse_switch_case(&mut self) -> Result<SwitchCase, ParseError> {
        let start = self.span();

        let test = if self.at_default_label() {
            self.advance();
            None
        } else if self.at(TokenKind::When) {
            self.advance();
            Some(self.parse_case_label()?)
        } else {
            return Err(ParseError::unexpected("'when' or 'default'", self.peek(), start));
        };
        self.consume(TokenKind::Colon)?;

        let body = self.parse_statements(&[TokenKind::When, TokenKind::RBrace], true)?;

        Ok(SwitchCase {
            test,
            body,
            span: start.merge(self.previous_span()),
        })
    }

    /// A `when` label: a number (optionally signed) or a string
    fn parse_case_label(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        let sign = match self.peek() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            _ => None,
        };
        if sign.is_some() {
            self.advance();
        }

        let token = self.current();
        let literal = match token.kind {
            TokenKind::Number => Literal::Number(token.lexeme.to_string()),
            TokenKind::String if sign.is_none() => Literal::String(token.lexeme.to_string()),
            other => {
                return Err(ParseError::InvalidSwitchLabel {
                    found: other.describe().to_string(),
                    span: token.span,
                });
            }
        };
        self.advance();

        let literal = Expr::new(ExprKind::Literal(literal), token.span);
        Ok(match sign {
            Some(op) => Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(literal),
                },
                start.merge(token.span),
            ),
            None => literal,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.consume(TokenKind::While)?;
        let condition = self.parse_paren_expr()?;
        let body = self.parse_block()?;
        Ok(StmtKind::While { condition, body })
    }

    fn parse_do_while_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.consume(TokenKind::Do)?;
        let body = self.parse_block()?;
        self.consume(TokenKind::While)?;
        let condition = self.parse_paren_expr()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(StmtKind::DoWhile { body, condition })
    }

    fn parse_for_stmt(&mut self) -> Result<ForStmt, ParseError> {
        self.consume(TokenKind::For)?;
        self.consume(TokenKind::LParen)?;

        let init = match self.peek() {
            TokenKind::Semicolon => None,
            TokenKind::Dec | TokenKind::Const => Some(ForInit::Var(self.parse_var_decl()?)),
            _ => Some(ForInit::Expr(self.parse_expr()?)),
        };
        self.consume(TokenKind::Semicolon)?;

        let condition = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::Semicolon)?;

        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(ForStmt {
            init,
            condition,
            update,
            body,
        })
    }

    fn parse_return_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.consume(TokenKind::Return)?;

        let value = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume(TokenKind::Semicolon)?;

        Ok(StmtKind::Return(value))
    }

    // === Expressions ===

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment)
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_or()?;

        let Some(op) = assign_op(self.peek()) else {
            return Ok(target);
        };
        if !is_assignable(&target) {
            return Err(ParseError::unexpected(
                "assignable expression before assignment",
                self.peek(),
                self.span(),
            ));
        }
        self.advance();

        // Right-associative: `a = b = c` is `a = (b = c)`
        let value = self.nested(Self::parse_assignment)?;
        let span = target.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// One left-associative binary precedence level
    fn parse_binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        operator: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let (base, outer) = (self.depth, self.deepest);
        self.deepest = base;
        let mut left = operand(self)?;

        while let Some(op) = operator(self.peek()) {
            self.link()?;
            self.advance();
            let right = operand(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        self.depth = base;
        self.deepest = self.deepest.max(outer);
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_and, |kind| match kind {
            TokenKind::OrOr => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, |kind| match kind {
            TokenKind::AndAnd => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_comparison, |kind| match kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::Ne => Some(BinaryOp::Ne),
            TokenKind::EqEqEq => Some(BinaryOp::StrictEq),
            TokenKind::NeEq => Some(BinaryOp::StrictNe),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_term, |kind| match kind {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_factor, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        let op = match self.peek() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.nested(Self::parse_unary)?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        if let Some(op) = update_op(self.peek()) {
            self.advance();
            let target = self.nested(Self::parse_unary)?;
            if !is_assignable(&target) {
                return Err(ParseError::unexpected(
                    "assignable expression",
                    self.peek(),
                    target.span,
                ));
            }
            let span = start.merge(target.span);
            return Ok(Expr::new(
                ExprKind::Update {
                    op,
                    prefix: true,
                    target: Box::new(target),
                },
                span,
            ));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let (base, outer) = (self.depth, self.deepest);
        self.deepest = base;
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek() {
                TokenKind::LParen => {
                    // Function call
                    self.link()?;
                    self.advance();
                    let args = self.parse_expr_list(TokenKind::RParen)?;
                    self.consume(TokenKind::RParen)?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        start.merge(self.previous_span()),
                    );
                }
                TokenKind::LBracket => {
                    // Index
                    self.link()?;
                    self.advance();
                    let index = self.parse_expr()?;
                    self.consume(TokenKind::RBracket)?;
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        start.merge(self.previous_span()),
                    );
                }
                TokenKind::Dot => {
                    // Property access; any word is a valid property name
                    self.link()?;
                    self.advance();
                    let token = self.current();
                    if token.kind != TokenKind::Ident && !token.kind.is_keyword() {
                        return Err(ParseError::unexpected(
                            "property name",
                            token.kind,
                            token.span,
                        ));
                    }
                    self.advance();
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: Ident::new(token.lexeme, token.span),
                        },
                        start.merge(token.span),
                    );
                }
                kind @ (TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    if !is_assignable(&expr) {
                        break;
                    }
                    self.advance();
                    let op = update_op(kind).unwrap_or(UpdateOp::Increment);
                    expr = Expr::new(
                        ExprKind::Update {
                            op,
                            prefix: false,
                            target: Box::new(expr),
                        },
                        start.merge(self.previous_span()),
                    );
                    break;
                }
                _ => break,
            }
        }

        self.depth = base;
        self.deepest = self.deepest.max(outer);
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Number(token.lexeme.to_string())),
                    token.span,
                ))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::String(token.lexeme.to_string())),
                    token.span,
                ))
            }
            TokenKind::Ident => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Ident(token.lexeme.to_string()),
                    token.span,
                ))
            }
            TokenKind::Log if self.peek_ahead(1) == TokenKind::LParen => {
                self.advance();
                self.advance();
                let args = self.parse_expr_list(TokenKind::RParen)?;
                self.consume(TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Log { args },
                    token.span.merge(self.previous_span()),
                ))
            }
            kind if kind.is_keyword()
                && (self.peek_ahead(1) == TokenKind::LParen
                    || assign_op(self.peek_ahead(1)).is_some()) =>
            {
                // Keyword in a callee or assignment-target role; rejected
                // during validation
                self.advance();
                Ok(Expr::new(
                    ExprKind::Ident(token.lexeme.to_string()),
                    token.span,
                ))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.consume(TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Grouping(Box::new(inner)),
                    token.span.merge(self.previous_span()),
                ))
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_expr_list(TokenKind::RBracket)?;
                self.consume(TokenKind::RBracket)?;
                Ok(Expr::new(
                    ExprKind::Array(elements),
                    token.span.merge(self.previous_span()),
                ))
            }
            other => Err(ParseError::unexpected("expression", other, token.span)),
        }
    }

    /// Comma-separated expressions up to (not including) `close`.
    /// A trailing comma is allowed.
    fn parse_expr_list(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        while !self.at(close) {
            exprs.push(self.parse_expr()?);
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(exprs)
    }
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Assign => Some(AssignOp::Assign),
        TokenKind::PlusEq => Some(AssignOp::AddAssign),
        TokenKind::MinusEq => Some(AssignOp::SubAssign),
        TokenKind::StarEq => Some(AssignOp::MulAssign),
        TokenKind::SlashEq => Some(AssignOp::DivAssign),
        TokenKind::PercentEq => Some(AssignOp::ModAssign),
        _ => None,
    }
}

fn update_op(kind: TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOp::Increment),
        TokenKind::MinusMinus => Some(UpdateOp::Decrement),
        _ => None,
    }
}

fn is_assignable(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
    )
}
