use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::Location,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, deeper},
            unary::{parse_logical_not, parse_postfix_primary, parse_unary},
        },
    },
};

/// Builds a boxed binary node.
fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp { left: Box::new(left),
                     op,
                     right: Box::new(right) }
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>,
                               location: &Location,
                               depth: usize)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = depth;
    let mut left = parse_logical_and(tokens, location, depth)?;
    while let Some(Token::Or) = tokens.peek() {
        tokens.next();
        depth = deeper(depth, location)?;
        let right = parse_logical_and(tokens, location, depth)?;
        left = binary(left, BinaryOperator::Or, right);
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := logical_not ("and" logical_not)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>,
                                location: &Location,
                                depth: usize)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = depth;
    let mut left = parse_logical_not(tokens, location, depth)?;
    while let Some(Token::And) = tokens.peek() {
        tokens.next();
        depth = deeper(depth, location)?;
        let right = parse_logical_not(tokens, location, depth)?;
        left = binary(left, BinaryOperator::And, right);
    }
    Ok(left)
}

/// Parses relational and equality operators.
///
/// Comparisons are left-associative: `a < b == true` compares `a < b`
/// with `true`.
///
/// The rule is: `comparison := additive (("==" | "!=" | "<" | ">" | "<=" |
/// ">=") additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>,
                               location: &Location,
                               depth: usize)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = depth;
    let mut left = parse_additive(tokens, location, depth)?;
    while let Some(op) = tokens.peek().and_then(|token| comparison_operator(token)) {
        tokens.next();
        depth = deeper(depth, location)?;
        let right = parse_additive(tokens, location, depth)?;
        left = binary(left, op, right);
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>,
                             location: &Location,
                             depth: usize)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = depth;
    let mut left = parse_multiplicative(tokens, location, depth)?;
    loop {
        let op = match tokens.peek() {
            Some(Token::Plus) => BinaryOperator::Add,
            Some(Token::Minus) => BinaryOperator::Sub,
            _ => break,
        };
        tokens.next();
        depth = deeper(depth, location)?;
        let right = parse_multiplicative(tokens, location, depth)?;
        left = binary(left, op, right);
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                                   location: &Location,
                                   depth: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut depth = depth;
    let mut left = parse_unary(tokens, location, depth)?;
    loop {
        let op = match tokens.peek() {
            Some(Token::Star) => BinaryOperator::Mul,
            Some(Token::Slash) => BinaryOperator::Div,
            _ => break,
        };
        tokens.next();
        depth = deeper(depth, location)?;
        let right = parse_unary(tokens, location, depth)?;
        left = binary(left, op, right);
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// `^` binds tighter than a leading minus and is right-associative, so
/// `-2 ^ 2` is `-(2 ^ 2)` and `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`. The exponent
/// itself may be negated: `2 ^ -1`.
///
/// The rule is: `exponent := postfix_primary ("^" unary)?`
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>,
                             location: &Location,
                             depth: usize)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let base = parse_postfix_primary(tokens, location, depth)?;
    if let Some(Token::Caret) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, location, deeper(depth, location)?)?;
        return Ok(binary(base, BinaryOperator::Pow, exponent));
    }
    Ok(base)
}

/// Maps a token to its comparison operator, if it is one.
const fn comparison_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, UnaryOperator},
        error::Location,
        interpreter::{lexer::tokenize, parser::core::parse_fragment},
    };

    fn parse(source: &str) -> Expr {
        let location = Location::new("<string>", 1);
        parse_fragment(&tokenize(source, &location).unwrap(), &location).unwrap()
    }

    fn op_of(expr: &Expr) -> BinaryOperator {
        match expr {
            Expr::BinaryOp { op, .. } => *op,
            other => panic!("expected binary node, found {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("2 + 3 * 4");
        assert_eq!(op_of(&expr), BinaryOperator::Add);
        if let Expr::BinaryOp { right, .. } = expr {
            assert_eq!(op_of(&right), BinaryOperator::Mul);
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("10 - 4 - 3");
        if let Expr::BinaryOp { left, .. } = expr {
            assert_eq!(op_of(&left), BinaryOperator::Sub);
        }
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_minus() {
        let expr = parse("-2 ^ 3 ^ 2");
        let Expr::UnaryOp { op: UnaryOperator::Negate, expr } = expr else {
            panic!("expected negation at the root");
        };
        let Expr::BinaryOp { op: BinaryOperator::Pow, right, .. } = *expr else {
            panic!("expected power under the negation");
        };
        assert_eq!(op_of(&right), BinaryOperator::Pow);
    }

    #[test]
    fn logic_binds_loosest() {
        let expr = parse("a < 1 or not b == 2 and c");
        assert_eq!(op_of(&expr), BinaryOperator::Or);
        if let Expr::BinaryOp { right, .. } = expr {
            assert_eq!(op_of(&right), BinaryOperator::And);
        }
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let location = Location::new("<string>", 1);
        let tokens = tokenize("hello world", &location).unwrap();
        assert!(parse_fragment(&tokens, &location).is_err());
    }
}
