use crate::{
    ast::UnaryOperator,
    error::{EvalError, Location},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation for integers and decimals. The result
    ///   is a plain number, never a `Negative`.
    /// - `Not`: logical negation of the operand's truthiness.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `location`: Location for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use epl::{
    ///     ast::UnaryOperator,
    ///     error::Location,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let location = Location::new("<string>", 1);
    ///
    /// // Negation
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Integer(5), &location).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// // Logical not
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::from(""), &location).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, location: &Location) -> EvalResult<Value> {
        let overflow = || EvalError::Overflow { location: location.clone() };

        match op {
            UnaryOperator::Negate => match value.plain() {
                Value::Integer(n) => n.checked_neg().map(Value::Integer).ok_or_else(overflow),
                Value::Decimal(d) => Ok(Value::Decimal(d.negated())),
                _ => Err(value.unknown_characteristic("-", location)),
            },
            UnaryOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::UnaryOperator,
        error::{EvalError, Location},
        interpreter::{evaluator::core::Interpreter, value::core::Value},
    };

    #[test]
    fn negating_a_negative_gives_a_plain_number() {
        let location = Location::new("<string>", 1);
        let negative = Value::negative_literal("-2.5", &location).unwrap();
        let v = Interpreter::eval_unary(UnaryOperator::Negate, &negative, &location).unwrap();
        assert_eq!(v.to_string(), "2.5");
        assert_eq!(v.type_name(), "decimal");
    }

    #[test]
    fn text_cannot_be_negated() {
        let location = Location::new("<string>", 1);
        let error = Interpreter::eval_unary(UnaryOperator::Negate, &Value::from("a"), &location)
            .unwrap_err();
        assert!(matches!(error, EvalError::UnknownCharacteristic { .. }));
    }

    #[test]
    fn overflow_is_reported() {
        let location = Location::new("<string>", 1);
        assert!(matches!(Interpreter::eval_unary(UnaryOperator::Negate,
                                                 &Value::Integer(i64::MIN),
                                                 &location),
                         Err(EvalError::Overflow { .. })));
    }
}
