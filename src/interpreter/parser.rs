/// Parser entry points.
///
/// Contains the `ParseResult` alias and the functions that turn a whole token
/// slice into one expression tree.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from `or` down to `^`.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles `not`, negation, literals, variables, parentheses and
/// characteristic access.
pub mod unary;
