use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{
    error::{EvalError, Location},
    interpreter::evaluator::core::EvalResult,
};

/// Converts an exponent magnitude to `u32` for use with `pow`.
///
/// ## Errors
/// Returns `EvalError::Overflow` if the value exceeds `u32::MAX`; no number in
/// the value model survives an exponent that large anyway.
///
/// ## Example
/// ```
/// use epl::{error::Location, util::num::u64_to_u32_checked};
///
/// let location = Location::new("<string>", 1);
/// assert_eq!(u64_to_u32_checked(10, &location).unwrap(), 10);
/// assert!(u64_to_u32_checked(u64::MAX, &location).is_err());
/// ```
pub fn u64_to_u32_checked(value: u64, location: &Location) -> EvalResult<u32> {
    u32::try_from(value).map_err(|_| EvalError::Overflow { location: location.clone() })
}

/// Narrows a whole decimal to `i64`.
///
/// ## Errors
/// Returns `EvalError::Overflow` if the value is outside the `i64` range.
pub fn bigint_to_i64_checked(value: &BigInt, location: &Location) -> EvalResult<i64> {
    value.to_i64()
         .ok_or_else(|| EvalError::Overflow { location: location.clone() })
}

/// Returns `10^exponent`.
#[must_use]
pub fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_of_ten() {
        assert_eq!(pow10(0), BigInt::from(1));
        assert_eq!(pow10(3), BigInt::from(1000));
        assert_eq!(pow10(40).to_string(), format!("1{}", "0".repeat(40)));
    }

    #[test]
    fn failed_conversions_report_overflow_at_location() {
        let location = Location::new("main.epl", 7);
        let error = u64_to_u32_checked(u64::from(u32::MAX) + 1, &location).unwrap_err();
        assert!(matches!(error, EvalError::Overflow { location: Location { line: 7, .. } }));

        let huge = pow10(30);
        assert!(bigint_to_i64_checked(&huge, &location).is_err());
        assert_eq!(bigint_to_i64_checked(&BigInt::from(-42), &location).unwrap(), -42);
    }
}
