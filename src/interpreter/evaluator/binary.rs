/// Operator routing.
///
/// Sends each binary operator to the handler for its family.
pub mod core;

/// Arithmetic on numbers.
///
/// Covers `+`, `-`, `*` and `/` with integer to decimal promotion.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Equality and ordering.
pub mod comparison;

/// `and` and `or`.
pub mod logic;
