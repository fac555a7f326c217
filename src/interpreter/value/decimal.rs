use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::util::num::pow10;

/// Number of fractional digits produced by a division that does not
/// terminate. Further digits are truncated, not rounded.
pub const DIVISION_PRECISION: u32 = 16;

/// The most digits a decimal may carry on either side of the point.
pub const MAX_DIGITS: u32 = 4096;

/// Mantissa size matching [`MAX_DIGITS`] decimal digits.
const MAX_MANTISSA_BITS: u64 = 13_607;

/// An exact base-ten number.
///
/// A `Decimal` is stored as an arbitrary precision mantissa and a count of
/// fractional digits, so `4.5` is `(45, 1)`. Values are kept normalised:
/// trailing zeros are stripped but at least one fractional digit always
/// remains, which makes structural equality numeric equality and keeps the
/// printed form (`3.0`, `0.25`) stable.
///
/// Arithmetic never goes through binary floating point. Operations that can
/// grow a value return `None` once it would exceed [`MAX_DIGITS`] digits;
/// callers report that as an arithmetic overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    scale:    u32,
}

impl Decimal {
    /// Builds a normalised decimal equal to `mantissa / 10^scale`.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::decimal::Decimal;
    ///
    /// let d = Decimal::new(4500.into(), 3).unwrap();
    /// assert_eq!(d.to_string(), "4.5");
    /// assert_eq!(Decimal::new(3.into(), 0).unwrap().to_string(), "3.0");
    /// ```
    #[must_use]
    pub fn new(mut mantissa: BigInt, mut scale: u32) -> Option<Self> {
        if scale == 0 {
            mantissa *= 10u32;
            scale = 1;
        }
        while scale > 1 && (&mantissa % 10u32).is_zero() {
            mantissa /= 10u32;
            scale -= 1;
        }
        if scale > MAX_DIGITS || mantissa.bits() > MAX_MANTISSA_BITS {
            return None;
        }
        Some(Self { mantissa,
                    scale })
    }

    /// Promotes a whole number, e.g. `3` becomes `3.0`.
    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self { mantissa: BigInt::from(value) * 10u32,
               scale:    1, }
    }

    /// Parses a literal such as `4.5`, `-0.25`, `5.` or `.5`.
    ///
    /// Exactly one decimal point and at least one digit are required; an
    /// optional leading `-` is accepted.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::decimal::Decimal;
    ///
    /// assert_eq!(Decimal::parse("-2.50").unwrap().to_string(), "-2.5");
    /// assert!(Decimal::parse("5..5").is_none());
    /// assert!(Decimal::parse("12").is_none());
    /// ```
    #[must_use]
    pub fn parse(literal: &str) -> Option<Self> {
        let (negative, body) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (whole, fraction) = body.split_once('.')?;
        if fraction.contains('.')
           || whole.len() + fraction.len() == 0
           || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let digits = format!("{whole}{fraction}");
        let scale = u32::try_from(fraction.len()).ok()?;
        Self::from_digits(negative, &digits, scale)
    }

    /// Builds a decimal from an unsigned digit string with `scale` of its
    /// digits after the decimal point.
    fn from_digits(negative: bool, digits: &str, scale: u32) -> Option<Self> {
        let magnitude: BigInt = if digits.is_empty() { BigInt::zero() } else { digits.parse().ok()? };
        Self::new(if negative { -magnitude } else { magnitude }, scale)
    }

    /// The mantissa, i.e. the digits without the decimal point.
    #[must_use]
    pub const fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// The number of digits after the decimal point.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns the value as a whole number if it has no fractional part.
    #[must_use]
    pub fn as_whole(&self) -> Option<BigInt> {
        let (mantissa, places) = self.stripped();
        (places == 0).then_some(mantissa)
    }

    /// Returns the negated value.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self { mantissa: -&self.mantissa,
               scale:    self.scale, }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self { mantissa: self.mantissa.abs(),
               scale:    self.scale, }
    }

    /// Rewrites both mantissas over the larger of the two scales.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        let left = &self.mantissa * pow10(scale - self.scale);
        let right = &other.mantissa * pow10(scale - other.scale);
        (left, right, scale)
    }

    /// Exact addition.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let (left, right, scale) = self.aligned(other);
        Self::new(left + right, scale)
    }

    /// Exact subtraction.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let (left, right, scale) = self.aligned(other);
        Self::new(left - right, scale)
    }

    /// Exact multiplication.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        Self::new(&self.mantissa * &other.mantissa, self.scale.checked_add(other.scale)?)
    }

    /// Raises the value to a non-negative whole power.
    ///
    /// Trailing zeros are stripped from the mantissa first, so `2.0 ^ 30`
    /// raises `2` rather than `20`. The size of the result is bounded before
    /// it is computed.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::decimal::Decimal;
    ///
    /// let d = Decimal::parse("1.5").unwrap();
    /// assert_eq!(d.checked_powi(2).unwrap().to_string(), "2.25");
    ///
    /// let two = Decimal::from_integer(2);
    /// assert_eq!(two.checked_powi(30).unwrap().to_string(), "1073741824.0");
    /// ```
    #[must_use]
    pub fn checked_powi(&self, exponent: u32) -> Option<Self> {
        let (mantissa, places) = self.stripped();
        let scale = places.checked_mul(exponent)?;
        let least_bits = (mantissa.bits().saturating_sub(1)).checked_mul(u64::from(exponent))?;
        if scale > MAX_DIGITS || least_bits > MAX_MANTISSA_BITS {
            return None;
        }
        Self::new(mantissa.pow(exponent), scale)
    }

    /// Ordinary rational division, used whenever a whole number takes part.
    ///
    /// Both operands are brought to a common scale, so the quotient of the
    /// mantissas is the quotient of the values. The result keeps at most
    /// [`DIVISION_PRECISION`] fractional digits. The divisor must be
    /// non-zero.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::decimal::Decimal;
    ///
    /// let third = Decimal::parse("1.1").unwrap()
    ///                                  .checked_div(&Decimal::from_integer(3))
    ///                                  .unwrap();
    /// assert_eq!(third.to_string(), "0.3666666666666666");
    /// ```
    #[must_use]
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        let (left, right, _) = self.aligned(other);
        let (digits, fraction) = quotient_digits(left.magnitude(), right.magnitude())?;
        Self::from_digits(left.is_negative() != right.is_negative(), &digits, fraction)
    }

    /// Division of two decimals by digit concatenation.
    ///
    /// Trailing zeros are stripped from both operands and their decimal
    /// places counted. The decimal points are then dropped, the two digit
    /// sequences are divided as whole numbers (to [`DIVISION_PRECISION`]
    /// fractional digits), and the decimal point of that quotient is moved
    /// by the divisor's place count minus the dividend's place count. When
    /// the insertion point falls outside the digit string the string is
    /// padded with zeros.
    ///
    /// Truncation happens before the point is moved, so results can carry
    /// fewer significant digits than [`Decimal::checked_div`] would produce.
    /// The divisor must be non-zero.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::decimal::Decimal;
    ///
    /// let a = Decimal::parse("4.5").unwrap();
    /// let b = Decimal::parse("1.5").unwrap();
    /// assert_eq!(a.concat_div(&b).unwrap().to_string(), "3.0");
    ///
    /// let c = Decimal::parse("0.1").unwrap();
    /// let d = Decimal::parse("0.25").unwrap();
    /// assert_eq!(c.concat_div(&d).unwrap().to_string(), "0.4");
    /// ```
    #[must_use]
    pub fn concat_div(&self, other: &Self) -> Option<Self> {
        let (dividend, dividend_places) = self.stripped();
        let (divisor, divisor_places) = other.stripped();

        let (digits, fraction) = quotient_digits(dividend.magnitude(), divisor.magnitude())?;
        let negative = dividend.is_negative() != divisor.is_negative();

        let whole_len = i64::try_from(digits.len()).ok()? - i64::from(fraction);
        let point = whole_len + i64::from(divisor_places) - i64::from(dividend_places);
        let len = i64::try_from(digits.len()).ok()?;

        let (digits, scale) = if point <= 0 {
            let padding = "0".repeat(usize::try_from(-point).ok()?);
            let scale = u32::try_from(len - point).ok()?;
            (format!("{padding}{digits}"), scale)
        } else if point >= len {
            let padding = "0".repeat(usize::try_from(point - len).ok()?);
            (format!("{digits}{padding}"), 0)
        } else {
            (digits, u32::try_from(len - point).ok()?)
        };

        Self::from_digits(negative, &digits, scale)
    }

    /// Strips every trailing zero, including the last fractional one, and
    /// returns the mantissa and the number of decimal places left.
    fn stripped(&self) -> (BigInt, u32) {
        let mut mantissa = self.mantissa.clone();
        let mut places = self.scale;
        while places > 0 && (&mantissa % 10u32).is_zero() {
            mantissa /= 10u32;
            places -= 1;
        }
        (mantissa, places)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right, _) = self.aligned(other);
        left.cmp(&right)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Long division of two whole numbers.
///
/// Returns the quotient's digits and how many of them are fractional. Digits
/// are produced until the remainder is zero or [`DIVISION_PRECISION`] digits
/// follow the point. Returns `None` on a zero divisor.
fn quotient_digits(numerator: &BigUint, denominator: &BigUint) -> Option<(String, u32)> {
    if denominator.is_zero() {
        return None;
    }

    let mut digits = (numerator / denominator).to_string();
    let mut remainder = numerator % denominator;
    let mut fraction = 0;

    while !remainder.is_zero() && fraction < DIVISION_PRECISION {
        remainder *= 10u32;
        let digit = (&remainder / denominator).to_u8()?;
        digits.push(char::from(b'0' + digit));
        remainder %= denominator;
        fraction += 1;
    }

    Some((digits, fraction))
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        let digits = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        let sign = if self.mantissa.is_negative() { "-" } else { "" };

        write!(f, "{sign}{whole}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(literal: &str) -> Decimal {
        Decimal::parse(literal).unwrap()
    }

    #[test]
    fn parse_accepts_bare_points() {
        assert_eq!(d("5."), Decimal::from_integer(5));
        assert_eq!(d(".5").to_string(), "0.5");
        assert_eq!(d("0.000"), Decimal::from_integer(0));
        assert!(Decimal::parse(".").is_none());
        assert!(Decimal::parse("1.2.3").is_none());
        assert!(Decimal::parse("1a.5").is_none());
    }

    #[test]
    fn long_literals_keep_every_digit() {
        let literal = "0.1234567890123456789012345678901234567890";
        assert_eq!(d(literal).to_string(), "0.123456789012345678901234567890123456789");
        assert_eq!(d("123456789012345678901234567890123456789012.5").checked_add(&d("0.5"))
                                                                     .unwrap()
                                                                     .to_string(),
                   "123456789012345678901234567890123456789013.0");
    }

    #[test]
    fn digits_beyond_the_limit_are_rejected() {
        let too_long = format!("0.{}1", "0".repeat(MAX_DIGITS as usize));
        assert!(Decimal::parse(&too_long).is_none());
        assert!(d("10.0").checked_powi(MAX_DIGITS).is_none());
    }

    #[test]
    fn arithmetic_is_exact() {
        assert_eq!(d("0.1").checked_add(&d("0.2")).unwrap(), d("0.3"));
        assert_eq!(d("1.5").checked_sub(&d("2.25")).unwrap().to_string(), "-0.75");
        assert_eq!(d("1.1").checked_mul(&d("1.1")).unwrap().to_string(), "1.21");
    }

    #[test]
    fn concatenated_division_moves_the_point() {
        assert_eq!(d("4.5").concat_div(&d("1.5")).unwrap().to_string(), "3.0");
        assert_eq!(d("7.5").concat_div(&d("2.5")).unwrap().to_string(), "3.0");
        assert_eq!(d("1.0").concat_div(&d("0.04")).unwrap().to_string(), "25.0");
        assert_eq!(d("-3.3").concat_div(&d("1.1")).unwrap().to_string(), "-3.0");
    }

    #[test]
    fn concatenated_division_pads_short_digit_strings() {
        // 1 / 4 = 0.25, then the point moves three places left.
        assert_eq!(d("0.001").concat_div(&d("4.0")).unwrap().to_string(), "0.00025");
        // 1 / 4 = 0.25, then the point moves three places right.
        assert_eq!(d("1.0").concat_div(&d("0.004")).unwrap().to_string(), "250.0");
    }

    #[test]
    fn concatenated_division_truncates_before_shifting() {
        // 1 / 3 keeps sixteen digits, shifting right by two leaves fourteen.
        assert_eq!(d("1.0").concat_div(&d("0.03")).unwrap().to_string(),
                   "33.33333333333333");
        assert_eq!(d("1.0").checked_div(&d("0.03")).unwrap().to_string(),
                   "33.3333333333333333");
    }

    #[test]
    fn whole_values_are_detected() {
        assert_eq!(d("4.0").as_whole(), Some(BigInt::from(4)));
        assert_eq!(d("-2.0").as_whole(), Some(BigInt::from(-2)));
        assert_eq!(d("40.0").as_whole(), Some(BigInt::from(40)));
        assert_eq!(d("4.5").as_whole(), None);
    }

    #[test]
    fn comparison_aligns_scales() {
        assert_eq!(d("2.5").cmp(&d("2.25")), Ordering::Greater);
        assert_eq!(d("-1.0").cmp(&Decimal::from_integer(-1)), Ordering::Equal);
    }

    #[test]
    fn powers_multiply_scales() {
        assert_eq!(d("0.5").checked_powi(3).unwrap().to_string(), "0.125");
        assert_eq!(d("2.0").checked_powi(0).unwrap().to_string(), "1.0");
    }

    #[test]
    fn powers_ignore_trailing_zeros_of_the_base() {
        assert_eq!(d("2.0").checked_powi(30).unwrap().to_string(), "1073741824.0");
        assert_eq!(d("1.0").checked_powi(40).unwrap().to_string(), "1.0");
        assert_eq!(d("10.0").checked_powi(40).unwrap().to_string(), format!("1{}.0", "0".repeat(40)));
        assert_eq!(d("1.50").checked_powi(2).unwrap().to_string(), "2.25");
    }
}
