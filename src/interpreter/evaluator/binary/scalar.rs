use crate::{
    ast::BinaryOperator,
    error::{EvalError, Location},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, decimal::Decimal},
    },
};

impl Interpreter {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Two integers stay integers, except that a division with a remainder
    /// produces a decimal. Two decimals divide by digit concatenation (see
    /// [`Decimal::concat_div`]). An integer and a decimal are combined as
    /// exact decimals. `Negative` operands behave like the number they wrap.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul` or `Div`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `location`: Location for error reporting.
    ///
    /// # Errors
    /// - `UnknownCharacteristic` naming the operator if an operand is not a
    ///   number.
    /// - `DivisionByZero` for a zero divisor.
    /// - `Overflow` if the result does not fit.
    ///
    /// # Example
    /// ```
    /// use epl::{
    ///     ast::BinaryOperator,
    ///     error::Location,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let location = Location::new("<string>", 1);
    ///
    /// let exact = Interpreter::eval_scalar_op(BinaryOperator::Div,
    ///                                         &Value::Integer(12),
    ///                                         &Value::Integer(4),
    ///                                         &location).unwrap();
    /// assert_eq!(exact, Value::Integer(3));
    ///
    /// let half = Interpreter::eval_scalar_op(BinaryOperator::Div,
    ///                                        &Value::Integer(1),
    ///                                        &Value::Integer(2),
    ///                                        &location).unwrap();
    /// assert_eq!(half.to_string(), "0.5");
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          location: &Location)
                          -> EvalResult<Value> {
        use Value::{Decimal as Dec, Integer};

        match (left.plain(), right.plain()) {
            (Integer(a), Integer(b)) => Self::eval_integer_op(op, *a, *b, location),
            (Dec(a), Dec(b)) if op == BinaryOperator::Div => {
                if b.is_zero() {
                    return Err(EvalError::DivisionByZero { location: location.clone() });
                }
                a.concat_div(b)
                 .map(Dec)
                 .ok_or_else(|| EvalError::Overflow { location: location.clone() })
            },
            (Integer(_) | Dec(_), Integer(_) | Dec(_)) => {
                match (left.as_decimal(), right.as_decimal()) {
                    (Some(a), Some(b)) => Self::eval_decimal_op(op, &a, &b, location).map(Dec),
                    _ => unreachable!(),
                }
            },
            _ => {
                let operand = Self::non_number(left, right);
                Err(operand.unknown_characteristic(&op.to_string(), location))
            },
        }
    }

    /// Integer arithmetic with overflow checks.
    fn eval_integer_op(op: BinaryOperator, a: i64, b: i64, location: &Location) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        let overflow = || EvalError::Overflow { location: location.clone() };

        match op {
            Add => a.checked_add(b).map(Value::Integer).ok_or_else(overflow),
            Sub => a.checked_sub(b).map(Value::Integer).ok_or_else(overflow),
            Mul => a.checked_mul(b).map(Value::Integer).ok_or_else(overflow),
            Div => {
                if b == 0 {
                    return Err(EvalError::DivisionByZero { location: location.clone() });
                }
                if a.checked_rem(b) == Some(0) {
                    return a.checked_div(b).map(Value::Integer).ok_or_else(overflow);
                }
                Self::eval_decimal_op(Div, &Decimal::from_integer(a), &Decimal::from_integer(b), location)
                    .map(Value::Decimal)
            },
            _ => unreachable!(),
        }
    }

    /// Exact decimal arithmetic. Division is rounded toward zero at
    /// [`DIVISION_PRECISION`](crate::interpreter::value::decimal::DIVISION_PRECISION)
    /// fractional digits.
    fn eval_decimal_op(op: BinaryOperator,
                       a: &Decimal,
                       b: &Decimal,
                       location: &Location)
                       -> EvalResult<Decimal> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        let result = match op {
            Add => a.checked_add(b),
            Sub => a.checked_sub(b),
            Mul => a.checked_mul(b),
            Div => {
                if b.is_zero() {
                    return Err(EvalError::DivisionByZero { location: location.clone() });
                }
                a.checked_div(b)
            },
            _ => unreachable!(),
        };
        result.ok_or_else(|| EvalError::Overflow { location: location.clone() })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::BinaryOperator,
        error::{EvalError, Location},
        interpreter::{evaluator::core::Interpreter, value::core::Value},
    };

    fn run(op: BinaryOperator, left: &str, right: &str) -> Result<Value, EvalError> {
        let location = Location::new("<string>", 1);
        let parse = |s: &str| {
            if s.starts_with('-') {
                Value::negative_literal(s, &location).unwrap()
            } else {
                Value::from_numeric_literal(s, &location).unwrap()
            }
        };
        Interpreter::eval_scalar_op(op, &parse(left), &parse(right), &location)
    }

    #[test]
    fn decimal_division_concatenates_digits() {
        assert_eq!(run(BinaryOperator::Div, "4.5", "1.5").unwrap().to_string(), "3.0");
        assert_eq!(run(BinaryOperator::Div, "1.0", "0.004").unwrap().to_string(), "250.0");
    }

    #[test]
    fn decimals_are_not_limited_to_machine_width() {
        let product =
            run(BinaryOperator::Mul, "12345678901234567890.5", "98765432109876543210.5").unwrap();
        assert_eq!(product.to_string(), "1219326311370217952293019356616819082450.25");
    }

    #[test]
    fn mixed_operands_promote_to_decimal() {
        let sum = run(BinaryOperator::Add, "2", "0.5").unwrap();
        assert_eq!(sum.type_name(), "decimal");
        assert_eq!(sum.to_string(), "2.5");
        assert_eq!(run(BinaryOperator::Mul, "-2", "1.5").unwrap().to_string(), "-3.0");
    }

    #[test]
    fn integer_division_keeps_exact_results_whole() {
        assert_eq!(run(BinaryOperator::Div, "-9", "3").unwrap(), Value::Integer(-3));
        assert_eq!(run(BinaryOperator::Div, "7", "2").unwrap().to_string(), "3.5");
    }

    #[test]
    fn zero_divisors_and_overflow_are_arithmetic_errors() {
        assert!(matches!(run(BinaryOperator::Div, "1", "0"), Err(EvalError::DivisionByZero { .. })));
        assert!(matches!(run(BinaryOperator::Div, "1.5", "0.0"),
                         Err(EvalError::DivisionByZero { .. })));
        assert!(matches!(run(BinaryOperator::Mul, "9223372036854775807", "2"),
                         Err(EvalError::Overflow { .. })));
    }

    #[test]
    fn non_numbers_are_blamed_by_type() {
        let location = Location::new("<string>", 1);
        let error = Interpreter::eval_scalar_op(BinaryOperator::Sub,
                                                &Value::Integer(1),
                                                &Value::Boolean(true),
                                                &location).unwrap_err();
        assert_eq!(error.to_string(),
                   "file \"<string>\", line 1: CharacteristicError: Unknown Characteristic \"-\" \
                    for boolean.");
    }
}
