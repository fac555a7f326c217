/// Numeric conversion helpers.
///
/// Checked narrowing of exponents and whole decimals, and powers of ten for
/// decimal scaling. A failed conversion is reported as an arithmetic
/// overflow at the given source location.
pub mod num;
