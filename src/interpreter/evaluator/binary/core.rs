use crate::{
    ast::BinaryOperator,
    error::Location,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic goes to `eval_scalar_op`, power to `eval_pow`, relational
    /// and equality operators to `eval_comparison`, and the logical operators
    /// to `eval_logic`. This function does not short-circuit; both operands
    /// are already evaluated.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `location`: Location for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
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
    /// let left = Value::Integer(3);
    /// let right = Value::Integer(4);
    ///
    /// let result = Interpreter::eval_binary(BinaryOperator::Add, &left, &right, &location);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       location: &Location)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };

        match op {
            Add | Sub | Mul | Div => Self::eval_scalar_op(op, left, right, location),
            Pow => Self::eval_pow(left, right, location),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, location)
            },
            And | Or => Ok(Self::eval_logic(op, left, right)),
        }
    }

    /// Picks the operand to blame when an operator does not apply: the
    /// first one that is not a number.
    pub(in crate::interpreter::evaluator) fn non_number<'v>(left: &'v Value,
                                                            right: &'v Value)
                                                            -> &'v Value {
        if left.is_number() { right } else { left }
    }
}
