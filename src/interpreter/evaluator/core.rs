use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    ast::{BinaryOperator, Expr},
    error::{EvalError, Location},
    interpreter::{
        classifier::{
            has_doubled_operator, has_operator, is_characteristic_access, is_numeric, is_quoted,
        },
        console::Console,
        evaluator::format::{format_text, substitute_variables},
        lexer::tokenize,
        parser::core::{deeper, parse_fragment},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` carrying the file and line being executed.
pub type EvalResult<T> = Result<T, EvalError>;

/// The file name reported for source that did not come from a file.
pub const DEFAULT_FILE: &str = "<string>";

/// Prefix of an expression that reads a line of input after showing a
/// prompt.
pub const READ_WITH_PROMPT: &str = "read with prompt as ";

/// Prefix of an expression that reports the type of its operand.
pub const TYPENAME_PREFIX: &str = "typename ";

/// Stores the interpreter state.
///
/// ## Usage
///
/// An `Interpreter` is created once per run and reused for every line,
/// including the lines of imported modules. Variables live in one flat
/// namespace that imports write into, and the line counter keeps counting
/// across files.
pub struct Interpreter {
    /// Every variable assigned so far.
    pub variables:  HashMap<String, Value>,
    line:           usize,
    file:           String,
    libraries:      PathBuf,
    console:        Box<dyn Console>,
    /// Module files currently being run, outermost first.
    active_modules: Vec<PathBuf>,
    /// How many `typename` or `read with prompt as` prefixes are being
    /// evaluated.
    nesting:        usize,
}

impl Interpreter {
    /// Creates an interpreter with no variables, positioned at line 1 of
    /// `<string>`.
    ///
    /// # Parameters
    /// - `console`: Where `write` output goes and `read` input comes from.
    /// - `libraries`: Directory that bareword `use` targets resolve under.
    #[must_use]
    pub fn new(console: Box<dyn Console>, libraries: impl Into<PathBuf>) -> Self {
        Self { variables:      HashMap::new(),
               line:           1,
               file:           DEFAULT_FILE.to_string(),
               libraries:      libraries.into(),
               console,
               active_modules: Vec::new(),
               nesting:        0, }
    }

    /// The line the next statement will be reported at.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Advances the line counter after a successfully executed line.
    pub(in crate::interpreter) const fn advance_line(&mut self) {
        self.line += 1;
    }

    /// The file reported in error locations.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Sets the file reported in error locations.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = file.into();
    }

    /// Marks `module` as being run. Returns `false` if it already is.
    pub(in crate::interpreter) fn enter_module(&mut self, module: PathBuf) -> bool {
        if self.active_modules.contains(&module) {
            return false;
        }
        self.active_modules.push(module);
        true
    }

    /// Marks the innermost module as finished.
    pub(in crate::interpreter) fn leave_module(&mut self) {
        self.active_modules.pop();
    }

    /// The directory bareword modules are looked up in.
    #[must_use]
    pub fn libraries(&self) -> &Path {
        &self.libraries
    }

    /// The current file and line, for error reporting.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line)
    }

    /// Returns a copy of a variable's value.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Evaluates an expression fragment and returns its value.
    ///
    /// The fragment is trimmed, then tried against each expression form in
    /// turn:
    ///
    /// 1. `nothing`, then an exact variable name.
    /// 2. `read with prompt as <fragment>` and bare `read`, which read a line
    ///    of input.
    /// 3. `typename <fragment>`.
    /// 4. Anything with an arithmetic operator outside quotes. Variable names
    ///    between the operators are replaced by their source form, then the
    ///    whole fragment is parsed and evaluated.
    /// 5. A quoted text literal.
    /// 6. A format string `;'...'` with `{name}` placeholders.
    /// 7. A negative literal such as `-5`.
    /// 8. `true` and `false`.
    /// 9. A number.
    /// 10. A characteristic access such as `name.length`.
    /// 11. Anything else is parsed as a comparison or logical expression and
    ///     coerced to a boolean.
    ///
    /// # Errors
    /// - `EmptyExpression` for a blank fragment.
    /// - `DoubledOperator` for `++`, `--`, `//` or `^^` outside quotes.
    /// - `UnknownName` for names that are not bound.
    /// - Any error raised while parsing or evaluating the fragment.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::{console::ScriptedConsole, evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new(Box::new(ScriptedConsole::default()), "libraries");
    /// interpreter.set_variable("x", Value::Integer(4));
    ///
    /// assert_eq!(interpreter.evaluate("x * 2 + 1").unwrap(), Value::Integer(9));
    /// assert_eq!(interpreter.evaluate("typename 2.5").unwrap(), Value::from("decimal"));
    /// assert_eq!(interpreter.evaluate("x > 3").unwrap(), Value::Boolean(true));
    /// ```
    pub fn evaluate(&mut self, fragment: &str) -> EvalResult<Value> {
        let fragment = fragment.trim();
        let location = self.location();

        if fragment.is_empty() {
            return Err(EvalError::EmptyExpression { location });
        }
        if fragment == "nothing" {
            return Ok(Value::Nothing);
        }
        if let Some(value) = self.variable(fragment) {
            return Ok(value);
        }

        if let Some(prompt) = fragment.strip_prefix(READ_WITH_PROMPT) {
            let prompt = self.evaluate_operand(prompt)?;
            return self.read_input(Some(&prompt));
        }
        if fragment == "read" {
            return self.read_input(None);
        }
        if let Some(operand) = fragment.strip_prefix(TYPENAME_PREFIX) {
            let value = self.evaluate_operand(operand)?;
            return Ok(Value::Text(value.type_name().to_string()));
        }

        if has_operator(fragment) {
            if has_doubled_operator(fragment) {
                return Err(EvalError::DoubledOperator { location });
            }
            let rewritten = substitute_variables(fragment, &self.variables);
            return self.eval_source(&rewritten, &location);
        }

        if is_quoted(fragment) {
            return Ok(Value::Text(fragment[1..fragment.len() - 1].to_string()));
        }
        if let Some(template) = format_template(fragment) {
            return format_text(template, &self.variables, &location).map(Value::Text);
        }
        if fragment.starts_with('-') && fragment.matches('-').count() == 1 {
            return Value::negative_literal(fragment, &location);
        }

        match fragment {
            "true" => return Ok(Value::Boolean(true)),
            "false" => return Ok(Value::Boolean(false)),
            _ => {},
        }

        if is_numeric(fragment, &location)? {
            return Value::from_numeric_literal(fragment, &location);
        }
        if is_characteristic_access(fragment) {
            return self.eval_source(fragment, &location);
        }

        let value = self.eval_source(fragment, &location)?;
        Ok(Value::Boolean(value.is_truthy()))
    }

    /// Evaluates the operand of a prefix form one nesting level down.
    fn evaluate_operand(&mut self, fragment: &str) -> EvalResult<Value> {
        self.nesting = deeper(self.nesting, &self.location())?;
        let result = self.evaluate(fragment);
        self.nesting -= 1;
        result
    }

    /// Tokenizes, parses and evaluates `source` against the current
    /// variables.
    fn eval_source(&self, source: &str, location: &Location) -> EvalResult<Value> {
        let tokens = tokenize(source, location)?;
        let expr = parse_fragment(&tokens, location)?;
        self.eval(&expr, location)
    }

    /// Evaluates a parsed expression.
    ///
    /// `and` and `or` short-circuit: the right operand is not evaluated when
    /// the left one already decides the result.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `location`: Reported by any error.
    ///
    /// # Returns
    /// The resulting value. Variables are copied out, never aliased.
    pub fn eval(&self, expr: &Expr, location: &Location) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Variable { name } => {
                self.variable(name)
                    .ok_or_else(|| EvalError::UnknownName { name:     name.clone(),
                                                            location: location.clone(), })
            },
            Expr::Characteristic { target, name } => {
                self.eval(target, location)?.characteristic(name, location)
            },
            Expr::UnaryOp { op, expr } => Self::eval_unary(*op, &self.eval(expr, location)?, location),
            Expr::BinaryOp { left,
                             op: op @ (BinaryOperator::And | BinaryOperator::Or),
                             right, } => {
                let left = self.eval(left, location)?;
                if Self::short_circuits(*op, &left) {
                    return Ok(Value::Boolean(left.is_truthy()));
                }
                let right = self.eval(right, location)?;
                Ok(Self::eval_logic(*op, &left, &right))
            },
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left, location)?;
                let right = self.eval(right, location)?;
                Self::eval_binary(*op, &left, &right, location)
            },
        }
    }

    /// Reads one line of input, showing `prompt` first when given.
    ///
    /// The prompt is displayed the way `write` would display it.
    ///
    /// # Errors
    /// Returns `EvalError::Console` when the console fails or runs out of
    /// input.
    pub fn read_input(&mut self, prompt: Option<&Value>) -> EvalResult<Value> {
        let prompt = prompt.map(ToString::to_string);
        self.console
            .read_line(prompt.as_deref())
            .map(Value::Text)
            .map_err(|e| EvalError::Console { details:  e.to_string(),
                                              location: self.location(), })
    }

    /// Writes a value to the console followed by a newline.
    ///
    /// # Errors
    /// Returns `EvalError::Console` when the console fails.
    pub fn write_value(&mut self, value: &Value) -> EvalResult<()> {
        self.console
            .write_line(&value.to_string())
            .map_err(|e| EvalError::Console { details:  e.to_string(),
                                              location: self.location(), })
    }
}

/// Returns the body of a format string `;'...'`, without the leading `;` and
/// the quotes.
fn format_template(fragment: &str) -> Option<&str> {
    let quoted = fragment.strip_prefix(';')?;
    if is_quoted(quoted) {
        Some(&quoted[1..quoted.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::console::ScriptedConsole;

    fn interpreter() -> Interpreter {
        Interpreter::new(Box::new(ScriptedConsole::default()), "libraries")
    }

    #[test]
    fn literals_of_every_kind() {
        let mut interpreter = interpreter();
        assert_eq!(interpreter.evaluate("  42 ").unwrap(), Value::Integer(42));
        assert_eq!(interpreter.evaluate("'hi there'").unwrap(), Value::from("hi there"));
        assert_eq!(interpreter.evaluate("true").unwrap(), Value::Boolean(true));
        assert_eq!(interpreter.evaluate("nothing").unwrap(), Value::Nothing);
        assert_eq!(interpreter.evaluate("-7").unwrap().type_name(), "negative");
        assert_eq!(interpreter.evaluate("2.50").unwrap().to_string(), "2.5");
    }

    #[test]
    fn prefix_chains_have_a_depth_limit() {
        let mut interpreter = interpreter();
        let chain = format!("{}5", "typename ".repeat(10_000));
        assert!(matches!(interpreter.evaluate(&chain), Err(EvalError::TooDeeplyNested { .. })));
        assert_eq!(interpreter.evaluate("typename typename 5").unwrap(), Value::from("text"));
        assert_eq!(interpreter.evaluate("typename 5").unwrap(), Value::from("number"));
    }

    #[test]
    fn blank_fragments_are_rejected() {
        assert!(matches!(interpreter().evaluate("   "), Err(EvalError::EmptyExpression { .. })));
    }

    #[test]
    fn quoted_operators_are_text() {
        let mut interpreter = interpreter();
        assert_eq!(interpreter.evaluate("'a-b'").unwrap(), Value::from("a-b"));
        assert_eq!(interpreter.evaluate("'a' + 'b'").unwrap_err().to_string(),
                   "file \"<string>\", line 1: CharacteristicError: Unknown Characteristic \"+\" \
                    for text.");
    }

    #[test]
    fn arithmetic_substitutes_variables() {
        let mut interpreter = interpreter();
        interpreter.set_variable("x", Value::negative_literal("-2", &interpreter.location()).unwrap());
        assert_eq!(interpreter.evaluate("x * 3").unwrap(), Value::Integer(-6));
        assert_eq!(interpreter.evaluate("(x + 1) * 2").unwrap(), Value::Integer(-2));
        assert_eq!(interpreter.evaluate("10 / 4").unwrap().to_string(), "2.5");
        assert_eq!(interpreter.evaluate("10 / 5").unwrap(), Value::Integer(2));
    }

    #[test]
    fn doubled_operators_are_syntax_errors() {
        let mut interpreter = interpreter();
        assert!(matches!(interpreter.evaluate("1 ++ 2"), Err(EvalError::DoubledOperator { .. })));
        assert_eq!(interpreter.evaluate("1 +- 2").unwrap(), Value::Integer(-1));
    }

    #[test]
    fn format_strings_fill_placeholders() {
        let mut interpreter = interpreter();
        interpreter.set_variable("name", Value::from("Ada"));
        interpreter.set_variable("age", Value::Integer(36));
        assert_eq!(interpreter.evaluate(";'{name} is {age}'").unwrap(),
                   Value::from("Ada is 36"));
        assert!(matches!(interpreter.evaluate(";'{missing}'"),
                         Err(EvalError::UnknownPlaceholder { .. })));
    }

    #[test]
    fn comparisons_coerce_to_boolean() {
        let mut interpreter = interpreter();
        interpreter.set_variable("count", Value::Integer(3));
        assert_eq!(interpreter.evaluate("count == 3").unwrap(), Value::Boolean(true));
        assert_eq!(interpreter.evaluate("count").unwrap(), Value::Integer(3));
        assert_eq!(interpreter.evaluate("not count").unwrap(), Value::Boolean(false));
        assert!(matches!(interpreter.evaluate("missing"), Err(EvalError::UnknownName { .. })));
    }

    #[test]
    fn and_or_short_circuit() {
        let mut interpreter = interpreter();
        assert_eq!(interpreter.evaluate("false and missing").unwrap(), Value::Boolean(false));
        assert_eq!(interpreter.evaluate("true or missing").unwrap(), Value::Boolean(true));
        assert!(interpreter.evaluate("true and missing").is_err());
    }

    #[test]
    fn characteristics_are_not_coerced() {
        let mut interpreter = interpreter();
        interpreter.set_variable("name", Value::from("hello"));
        assert_eq!(interpreter.evaluate("name.length").unwrap(), Value::Integer(5));
        assert!(matches!(interpreter.evaluate("name.size"),
                         Err(EvalError::UnknownCharacteristic { .. })));
    }

    #[test]
    fn typename_reports_the_variant() {
        let mut interpreter = interpreter();
        assert_eq!(interpreter.evaluate("typename 'a'").unwrap(), Value::from("text"));
        assert_eq!(interpreter.evaluate("typename -3").unwrap(), Value::from("negative"));
        assert_eq!(interpreter.evaluate("typename 2 - 5").unwrap(), Value::from("number"));
    }

    #[test]
    fn read_uses_the_console() {
        let console = ScriptedConsole::new(["Ada"]);
        let transcript = console.transcript();
        let mut interpreter = Interpreter::new(Box::new(console), "libraries");

        assert_eq!(interpreter.evaluate("read with prompt as 'Name? '").unwrap(),
                   Value::from("Ada"));
        assert_eq!(*transcript.borrow(), "Name? ");
        assert!(matches!(interpreter.evaluate("read"), Err(EvalError::Console { .. })));
    }
}
