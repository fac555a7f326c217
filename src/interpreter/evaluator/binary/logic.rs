use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

impl Interpreter {
    /// Evaluates a logical operation between two values.
    ///
    /// The operands are coerced with `is_truthy`, so any value may appear
    /// on either side.
    #[must_use]
    pub(in crate::interpreter::evaluator) fn eval_logic(op: BinaryOperator,
                                                        left: &Value,
                                                        right: &Value)
                                                        -> Value {
        match op {
            BinaryOperator::And => Value::Boolean(left.is_truthy() && right.is_truthy()),
            BinaryOperator::Or => Value::Boolean(left.is_truthy() || right.is_truthy()),
            _ => unreachable!(),
        }
    }

    /// Returns `true` if the left operand alone decides `op`: a falsy left
    /// side for `and`, a truthy one for `or`.
    #[must_use]
    pub fn short_circuits(op: BinaryOperator, left: &Value) -> bool {
        match op {
            BinaryOperator::And => !left.is_truthy(),
            BinaryOperator::Or => left.is_truthy(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_are_coerced_to_booleans() {
        assert_eq!(Interpreter::eval_logic(BinaryOperator::Or, &Value::Nothing, &Value::from("x")),
                   Value::Boolean(true));
        let one = Value::Integer(1);
        let zero = Value::Integer(0);
        assert_eq!(Interpreter::eval_logic(BinaryOperator::And, &one, &zero), Value::Boolean(false));
    }

    #[test]
    fn the_deciding_side_short_circuits() {
        assert!(Interpreter::short_circuits(BinaryOperator::And, &Value::Boolean(false)));
        assert!(Interpreter::short_circuits(BinaryOperator::Or, &Value::from("x")));
        assert!(!Interpreter::short_circuits(BinaryOperator::Or, &Value::Nothing));
    }
}
