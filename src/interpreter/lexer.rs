use logos::Logos;

use crate::{
    error::{EvalError, Location},
    interpreter::evaluator::core::EvalResult,
};

/// Represents a lexical token of an expression fragment.
///
/// Statements are classified by their leading word before any lexing
/// happens; this lexer only sees the expression part of a line.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\f\r]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `4.5`, `5.` or `.5`. Literals
    /// with several dots are lexed too so they can be reported precisely.
    #[regex(r"[0-9]+(\.[0-9]*)*", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+(\.[0-9]*)*", |lex| lex.slice().to_string())]
    Number(String),
    /// Text literal tokens. Either quote mark may open or close the literal.
    #[regex(r#"['"][^'"]*['"]"#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Text(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `nothing`
    #[token("nothing")]
    Nothing,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Variable names such as `x` or `total_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `.`
    #[token(".")]
    Dot,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => write!(f, "'{t}'"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Nothing => write!(f, "nothing"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::Not => write!(f, "not"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Dot => write!(f, "."),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
        }
    }
}

/// Splits an expression fragment into tokens.
///
/// # Errors
/// Returns `EvalError::UnexpectedToken` for the first run of input that is
/// not a token, e.g. an unterminated text literal or a stray `;`.
///
/// # Example
/// ```
/// use epl::{
///     error::Location,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("x + 1", &Location::new("<string>", 1)).unwrap();
/// assert_eq!(tokens,
///            [Token::Identifier("x".to_string()), Token::Plus, Token::Number("1".to_string())]);
/// ```
pub fn tokenize(source: &str, location: &Location) -> EvalResult<Vec<Token>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(EvalError::UnexpectedToken { token:    lexer.slice().to_string(),
                                                        location: location.clone(), });
            },
        }
    }

    Ok(tokens)
}
