use crate::{
    error::{EvalError, Location},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, decimal::Decimal},
    },
    util::num::{bigint_to_i64_checked, u64_to_u32_checked},
};

impl Interpreter {
    /// Evaluates an exponentiation operation.
    ///
    /// The exponent must be a whole number, written either as an integer or
    /// as a decimal with no fractional part (`2 ^ 3.0`). Integer bases with
    /// non-negative integer exponents stay integers. A decimal on either side
    /// makes the result a decimal, and a negative exponent computes the
    /// reciprocal of the positive power.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `location`: Location for error reporting.
    ///
    /// # Errors
    /// - `FractionalExponent` for an exponent such as `0.5`.
    /// - `UnknownCharacteristic` naming `^` for non-number operands.
    /// - `DivisionByZero` for zero raised to a negative power.
    /// - `Overflow` if the result does not fit.
    ///
    /// # Example
    /// ```
    /// use epl::{
    ///     error::Location,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let location = Location::new("<string>", 1);
    ///
    /// let result = Interpreter::eval_pow(&Value::Integer(2), &Value::Integer(10), &location);
    /// assert_eq!(result.unwrap(), Value::Integer(1024));
    ///
    /// let reciprocal = Interpreter::eval_pow(&Value::Integer(2),
    ///                                        &Value::negative_literal("-2", &location).unwrap(),
    ///                                        &location).unwrap();
    /// assert_eq!(reciprocal.to_string(), "0.25");
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, location: &Location) -> EvalResult<Value> {
        let (power, promote) = match exponent.plain() {
            Value::Integer(e) => (*e, false),
            Value::Decimal(d) => {
                let whole = d.as_whole()
                             .ok_or_else(|| EvalError::FractionalExponent { location: location.clone() })?;
                (bigint_to_i64_checked(&whole, location)?, true)
            },
            _ => return Err(Self::non_number(base, exponent).unknown_characteristic("^", location)),
        };

        match base.plain() {
            Value::Integer(b) if !promote && power >= 0 => {
                let power = u64_to_u32_checked(power.unsigned_abs(), location)?;
                b.checked_pow(power)
                 .map(Value::Integer)
                 .ok_or_else(|| EvalError::Overflow { location: location.clone() })
            },
            Value::Integer(b) => {
                Self::decimal_pow(&Decimal::from_integer(*b), power, location).map(Value::Decimal)
            },
            Value::Decimal(d) => Self::decimal_pow(d, power, location).map(Value::Decimal),
            _ => Err(base.unknown_characteristic("^", location)),
        }
    }

    /// Raises a decimal to a whole power of either sign.
    fn decimal_pow(base: &Decimal, power: i64, location: &Location) -> EvalResult<Decimal> {
        let overflow = || EvalError::Overflow { location: location.clone() };

        let magnitude = u64_to_u32_checked(power.unsigned_abs(), location)?;
        let raised = base.checked_powi(magnitude).ok_or_else(overflow)?;
        if power >= 0 {
            return Ok(raised);
        }

        if raised.is_zero() {
            return Err(EvalError::DivisionByZero { location: location.clone() });
        }
        Decimal::from_integer(1).checked_div(&raised).ok_or_else(overflow)
    }
}
