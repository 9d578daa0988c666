//! Token definitions for the toy language

use logos::{FilterResult, Logos};
use thiserror::Error;

/// Why the lexer rejected a piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid number literal")]
    InvalidNumber,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]  // Skip whitespace
#[logos(skip r"//[^\n]*")]      // Skip line comments
pub enum TokenKind {
    // === Keywords ===
    #[token("dec")]
    Dec,
    #[token("func")]
    Func,
    #[token("const")]
    Const,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("look")]
    Look,
    #[token("when")]
    When,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("keep")]
    Keep,
    #[token("log")]
    Log,

    // === Operators ===
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,

    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NeEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // === Literals ===
    // Loose shapes; `number_literal` rejects misplaced `_` and `n`
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]*)?n?", number_literal)]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]*)?n?", number_literal)]
    #[regex(r"0[xX][0-9a-fA-F_]*n?", number_literal)]
    #[regex(r"0[oO][0-7_]*n?", number_literal)]
    #[regex(r"0[bB][01_]*n?", number_literal)]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    String,

    // === Identifiers ===
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // === Never emitted: both callbacks skip or fail ===
    #[regex(r#""([^"\\\n]|\\[^\n])*"#, unterminated_string)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*"#, unterminated_string)]
    UnterminatedString,
    #[token("/*", block_comment)]
    BlockComment,

    // === Special ===
    Eof,
}

fn number_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    if is_valid_number(lex.slice()) {
        Ok(())
    } else {
        Err(LexErrorKind::InvalidNumber)
    }
}

/// Whether a number lexeme is a literal JavaScript accepts.
///
/// `_` may only sit between two digits, and the BigInt suffix `n` only ends
/// an integer without a leading zero.
pub fn is_valid_number(text: &str) -> bool {
    let (body, bigint) = match text.strip_suffix('n') {
        Some(body) => (body, true),
        None => (text, false),
    };

    let radix_digits = ["0x", "0X", "0o", "0O", "0b", "0B"]
        .iter()
        .find_map(|prefix| body.strip_prefix(*prefix));
    if let Some(digits) = radix_digits {
        return separated_digits(digits);
    }

    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (int, fraction) = match mantissa.split_once('.') {
        Some((int, fraction)) => (int, Some(fraction)),
        None => (mantissa, None),
    };

    if bigint && (fraction.is_some() || exponent.is_some()) {
        return false;
    }
    if int.len() > 1 && int.starts_with('0') && (bigint || int.contains('_')) {
        return false;
    }

    let int_ok = if int.is_empty() {
        fraction.is_some_and(separated_digits)
    } else {
        separated_digits(int)
    };
    let fraction_ok = fraction.map_or(true, |f| f.is_empty() || separated_digits(f));
    let exponent_ok = exponent.map_or(true, |e| {
        separated_digits(e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e))
    });
    int_ok && fraction_ok && exponent_ok
}

/// Non-empty digits with single `_` separators between them
fn separated_digits(digits: &str) -> bool {
    !digits.is_empty() && digits.split('_').all(|group| !group.is_empty())
}

fn unterminated_string(_lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Coarse token classes used when describing tokens to users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    Ident,
    Number,
    String,
    Operator,
    Punct,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        self.category() == TokenCategory::Keyword
    }

    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Dec
            | TokenKind::Func
            | TokenKind::Const
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::Return
            | TokenKind::Look
            | TokenKind::When
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::For
            | TokenKind::Break
            | TokenKind::Keep
            | TokenKind::Log => TokenCategory::Keyword,

            TokenKind::Assign
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::EqEq
            | TokenKind::Ne
            | TokenKind::EqEqEq
            | TokenKind::NeEq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::AndAnd
            | TokenKind::OrOr
            | TokenKind::Bang => TokenCategory::Operator,

            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Semicolon
            | TokenKind::Dot => TokenCategory::Punct,

            TokenKind::Number => TokenCategory::Number,
            TokenKind::String | TokenKind::UnterminatedString => TokenCategory::String,
            TokenKind::Ident => TokenCategory::Ident,
            TokenKind::BlockComment => TokenCategory::Punct,
            TokenKind::Eof => TokenCategory::Eof,
        }
    }

    /// Whether this token begins a statement that has its own keyword
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Dec
                | TokenKind::Func
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::Return
                | TokenKind::Look
                | TokenKind::When
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Keep
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Dec => "'dec'",
            TokenKind::Func => "'func'",
            TokenKind::Const => "'const'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Return => "'return'",
            TokenKind::Look => "'look'",
            TokenKind::When => "'when'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::For => "'for'",
            TokenKind::Break => "'break'",
            TokenKind::Keep => "'keep'",
            TokenKind::Log => "'log'",
            TokenKind::Assign => "'='",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::EqEq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::EqEqEq => "'==='",
            TokenKind::NeEq => "'!=='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::UnterminatedString => "unterminated string",
            TokenKind::BlockComment => "comment",
            TokenKind::Eof => "end of input",
        }
    }
}
