/// Binary operator evaluation logic.
///
/// Handles arithmetic, exponentiation, comparisons and the logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation and logical `not`.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` itself, the fragment classification order of
/// `evaluate`, and the expression tree walker.
pub mod core;

/// Text building helpers.
///
/// Format string placeholders and the textual variable substitution done
/// before arithmetic.
pub mod format;
