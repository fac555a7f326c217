/// Exact decimal numbers.
///
/// Defines the `Decimal` type used for every number written with a decimal
/// point. Arithmetic is exact except division, which keeps a fixed number of
/// fractional digits.
pub mod decimal;

pub mod core;
