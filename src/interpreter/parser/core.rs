use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::{EvalError, Location},
    interpreter::{lexer::Token, parser::binary::parse_logical_or},
};

pub type ParseResult<T> = Result<T, EvalError>;

/// How deeply an expression may nest: parentheses, prefix operators and
/// chained binary operators each count one level. Deeper expressions are
/// rejected instead of exhausting the stack.
pub const MAX_NESTING: usize = 256;

/// Returns the nesting level below `depth`.
///
/// # Errors
/// `TooDeeplyNested` once [`MAX_NESTING`] is reached.
pub(crate) fn deeper(depth: usize, location: &Location) -> ParseResult<usize> {
    if depth >= MAX_NESTING {
        return Err(EvalError::TooDeeplyNested { location: location.clone() });
    }
    Ok(depth + 1)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               location: &Location,
                               depth: usize)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_logical_or(tokens, location, depth)
}

/// Parses a token slice that must form exactly one expression.
///
/// # Errors
/// - `EmptyExpression` if there are no tokens.
/// - `UnexpectedToken` if tokens remain after the expression.
/// - `TooDeeplyNested` if the expression nests past [`MAX_NESTING`].
/// - Propagates any errors from sub-expression parsing.
///
/// # Example
/// ```
/// use epl::{
///     ast::{BinaryOperator, Expr},
///     error::Location,
///     interpreter::{lexer::tokenize, parser::core::parse_fragment},
/// };
///
/// let location = Location::new("<string>", 1);
/// let tokens = tokenize("1 + 2 * 3", &location).unwrap();
///
/// let expr = parse_fragment(&tokens, &location).unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
/// ```
pub fn parse_fragment(tokens: &[Token], location: &Location) -> ParseResult<Expr> {
    if tokens.is_empty() {
        return Err(EvalError::EmptyExpression { location: location.clone() });
    }

    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, location, 0)?;

    match iter.next() {
        Some(token) => Err(EvalError::UnexpectedToken { token:    token.to_string(),
                                                        location: location.clone(), }),
        None => Ok(expr),
    }
}

/// Consumes the next token if it equals `expected`.
///
/// # Errors
/// Returns `UnexpectedToken` for any other token and `UnexpectedEndOfInput`
/// when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    location: &Location)
                                                    -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token == expected => Ok(()),
        Some(token) => Err(EvalError::UnexpectedToken { token:    token.to_string(),
                                                        location: location.clone(), }),
        None => Err(EvalError::UnexpectedEndOfInput { location: location.clone() }),
    }
}
