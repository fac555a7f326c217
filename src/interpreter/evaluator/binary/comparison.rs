use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::Location,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a relational or equality comparison.
    ///
    /// Numbers compare by value whatever their variant, so `2 == 2.0`.
    /// Values of different types are never equal. Ordering is defined for
    /// numbers and for text (lexicographic by code point).
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `location`: Location for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    ///
    /// # Errors
    /// `UnknownCharacteristic` naming the operator when ordering values that
    /// have no order, such as booleans or a number and a text.
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
    /// let result = Interpreter::eval_comparison(BinaryOperator::Less,
    ///                                           &Value::Integer(1),
    ///                                           &Value::Integer(2),
    ///                                           &location);
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// let result = Interpreter::eval_comparison(BinaryOperator::Equal,
    ///                                           &Value::Integer(1),
    ///                                           &Value::from("1"),
    ///                                           &location);
    /// assert_eq!(result.unwrap(), Value::Boolean(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           location: &Location)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => Self::values_equal(left, right),
            NotEqual => !Self::values_equal(left, right),
            _ => {
                let ordering = Self::ordering(op, left, right, location)?;
                match op {
                    Less => ordering == Ordering::Less,
                    Greater => ordering == Ordering::Greater,
                    LessEqual => ordering != Ordering::Greater,
                    GreaterEqual => ordering != Ordering::Less,
                    _ => unreachable!(),
                }
            },
        };

        Ok(Value::Boolean(result))
    }

    fn values_equal(left: &Value, right: &Value) -> bool {
        match (left.plain(), right.plain()) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Nothing, Value::Nothing) => true,
            _ if left.is_number() && right.is_number() => {
                Self::numeric_ordering(left, right) == Ordering::Equal
            },
            _ => false,
        }
    }

    fn ordering(op: BinaryOperator,
                left: &Value,
                right: &Value,
                location: &Location)
                -> EvalResult<Ordering> {
        match (left.plain(), right.plain()) {
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            _ if left.is_number() && right.is_number() => Ok(Self::numeric_ordering(left, right)),
            (Value::Text(_), _) => Err(right.unknown_characteristic(&op.to_string(), location)),
            _ => Err(Self::non_number(left, right).unknown_characteristic(&op.to_string(), location)),
        }
    }

    fn numeric_ordering(left: &Value, right: &Value) -> Ordering {
        match (left.as_decimal(), right.as_decimal()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => unreachable!(),
        }
    }
}
