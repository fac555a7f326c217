use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::{EvalError, Location},
    interpreter::{
        lexer::Token,
        parser::{
            binary::{parse_comparison, parse_exponent},
            core::{ParseResult, deeper, expect, parse_expression},
        },
        value::core::Value,
    },
};

/// Parses a logical negation.
///
/// `not` sits between `and` and the comparisons, so `not a == b` negates
/// the comparison.
///
/// Grammar:
/// ```text
///     logical_not := "not" logical_not
///                  | comparison
/// ```
pub(crate) fn parse_logical_not<'a, I>(tokens: &mut Peekable<I>,
                                       location: &Location,
                                       depth: usize)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token::Not) = tokens.peek() {
        tokens.next();
        let expr = parse_logical_not(tokens, location, deeper(depth, location)?)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Not,
                                  expr: Box::new(expr), });
    }
    parse_comparison(tokens, location, depth)
}

/// Parses a numeric negation.
///
/// Unary minus is right-associative, so `- -x` is `-(-x)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | exponent
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                                 location: &Location,
                                 depth: usize)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token::Minus) = tokens.peek() {
        tokens.next();
        let expr = parse_unary(tokens, location, deeper(depth, location)?)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                  expr: Box::new(expr), });
    }
    parse_exponent(tokens, location, depth)
}

/// Parses a primary expression followed by any number of characteristic
/// accesses (`.name`).
///
/// Grammar: `postfix_primary := primary ("." identifier)*`
pub(crate) fn parse_postfix_primary<'a, I>(tokens: &mut Peekable<I>,
                                           location: &Location,
                                           depth: usize)
                                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens, location, depth)?;
    while let Some(Token::Dot) = tokens.peek() {
        tokens.next();
        let name = match tokens.next() {
            Some(Token::Identifier(name)) => name.clone(),
            Some(token) => {
                return Err(EvalError::UnexpectedToken { token:    token.to_string(),
                                                        location: location.clone(), });
            },
            None => return Err(EvalError::UnexpectedEndOfInput { location: location.clone() }),
        };
        expr = Expr::Characteristic { target: Box::new(expr),
                                      name };
    }
    Ok(expr)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions are numeric, text and boolean literals, `nothing`,
/// variable names and parenthesised expressions.
///
/// # Errors
/// - `MultipleDots` for numeric literals with more than one `.`.
/// - `UnexpectedToken` for any token that cannot start an expression.
/// - `UnexpectedEndOfInput` if the stream is exhausted.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                                   location: &Location,
                                   depth: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let value = match tokens.next() {
        Some(Token::Number(literal)) => Value::from_numeric_literal(literal, location)?,
        Some(Token::Text(text)) => Value::Text(text.clone()),
        Some(Token::Bool(b)) => Value::Boolean(*b),
        Some(Token::Nothing) => Value::Nothing,
        Some(Token::Identifier(name)) => return Ok(Expr::Variable { name: name.clone() }),
        Some(Token::LParen) => {
            let expr = parse_expression(tokens, location, deeper(depth, location)?)?;
            expect(tokens, &Token::RParen, location)?;
            return Ok(expr);
        },
        Some(token) => {
            return Err(EvalError::UnexpectedToken { token:    token.to_string(),
                                                    location: location.clone(), });
        },
        None => return Err(EvalError::UnexpectedEndOfInput { location: location.clone() }),
    };

    Ok(Expr::Literal { value })
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::Expr,
        error::{EvalError, Location},
        interpreter::{lexer::tokenize, parser::core::parse_fragment, value::core::Value},
    };

    fn parse(source: &str) -> Result<Expr, EvalError> {
        let location = Location::new("<string>", 1);
        parse_fragment(&tokenize(source, &location)?, &location)
    }

    #[test]
    fn characteristic_chains_nest_left_to_right() {
        let Expr::Characteristic { target, name } = parse("a.b.c").unwrap() else {
            panic!("expected characteristic access");
        };
        assert_eq!(name, "c");
        assert!(matches!(*target, Expr::Characteristic { ref name, .. } if name == "b"));
    }

    #[test]
    fn parentheses_must_close() {
        assert!(matches!(parse("(1 + 2"), Err(EvalError::UnexpectedEndOfInput { .. })));
        assert!(matches!(parse("(1 + 2))"), Err(EvalError::UnexpectedToken { .. })));
    }

    #[test]
    fn literals_become_values() {
        assert_eq!(parse("nothing").unwrap(), Expr::Literal { value: Value::Nothing });
        assert_eq!(parse("'hi'").unwrap(), Expr::Literal { value: Value::from("hi") });
        assert!(matches!(parse("1.2.3"), Err(EvalError::MultipleDots { .. })));
    }
}
