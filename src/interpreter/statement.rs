use tracing::debug;

use crate::interpreter::{
    classifier::is_allowed_identifier,
    evaluator::core::{EvalResult, Interpreter, READ_WITH_PROMPT},
};

/// One classified source line.
///
/// Fragments borrow from the line. They are taken from the trimmed line as
/// written, so whitespace inside text literals survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// An empty or whitespace-only line.
    Blank,
    /// `write <fragment>`
    Write {
        /// The expression to print.
        fragment: &'a str,
    },
    /// `<name> is <fragment>`
    Assignment {
        /// The variable being bound.
        name:     &'a str,
        /// The expression producing its value.
        fragment: &'a str,
    },
    /// `use <target>`
    Use {
        /// A quoted path or a bareword module name.
        target: &'a str,
    },
    /// `read` or `read with prompt as <fragment>`. The input is discarded.
    Read {
        /// The prompt expression, if any.
        prompt: Option<&'a str>,
    },
    /// A line starting with `!`.
    Comment,
    /// Anything else. Ignored.
    Unrecognized,
}

impl<'a> Statement<'a> {
    /// Classifies a source line by its leading words.
    ///
    /// The checks run in a fixed order: `write`, assignment, `use`, `read`,
    /// then comments. A line matching none of them is `Unrecognized`, not an
    /// error.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::statement::Statement;
    ///
    /// assert_eq!(Statement::classify("x is 1 + 2"),
    ///            Statement::Assignment { name: "x", fragment: "1 + 2" });
    /// assert_eq!(Statement::classify("write 'a  b'"), Statement::Write { fragment: "'a  b'" });
    /// assert_eq!(Statement::classify("! note"), Statement::Comment);
    /// assert_eq!(Statement::classify("   "), Statement::Blank);
    /// ```
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();

        let Some(first) = words.next() else {
            return Self::Blank;
        };
        let second = words.next();
        let rest = line[first.len()..].trim_start();

        match first {
            "write" => Self::Write { fragment: rest },
            _ if second == Some("is") && is_allowed_identifier(first) => {
                Self::Assignment { name:     first,
                                   fragment: rest["is".len()..].trim_start(), }
            },
            "use" => Self::Use { target: rest },
            "read" => Self::Read { prompt: line.strip_prefix(READ_WITH_PROMPT) },
            _ if line.starts_with('!') => Self::Comment,
            _ => Self::Unrecognized,
        }
    }
}

impl Interpreter {
    /// Executes one source line and advances the line counter.
    ///
    /// # Errors
    /// Any error from evaluating the line's fragments or loading a module.
    /// The counter is left on the failing line so the error can be
    /// reported there.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::{console::ScriptedConsole, evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new(Box::new(ScriptedConsole::default()), "libraries");
    /// interpreter.dispatch("x is 5").unwrap();
    ///
    /// assert_eq!(interpreter.evaluate("x").unwrap(), Value::Integer(5));
    /// assert_eq!(interpreter.line(), 2);
    /// ```
    pub fn dispatch(&mut self, line: &str) -> EvalResult<()> {
        let statement = Statement::classify(line);
        debug!("{}:{}: {statement:?}", self.file(), self.line());

        match statement {
            Statement::Blank | Statement::Comment => {},
            Statement::Write { fragment } => {
                let value = self.evaluate(fragment)?;
                self.write_value(&value)?;
            },
            Statement::Assignment { name, fragment } => {
                let value = self.evaluate(fragment)?;
                debug!("{name} is now {}", value.repr());
                self.set_variable(name, value);
            },
            Statement::Use { target } => self.run_use(target)?,
            Statement::Read { prompt } => {
                let prompt = prompt.map(|fragment| self.evaluate(fragment)).transpose()?;
                self.read_input(prompt.as_ref())?;
            },
            Statement::Unrecognized => debug!("ignoring unrecognized line {:?}", line.trim()),
        }

        self.advance_line();
        Ok(())
    }

    /// Executes every line of `source` in order, stopping at the first
    /// error.
    ///
    /// # Errors
    /// The first error raised by [`Interpreter::dispatch`].
    pub fn run_source(&mut self, source: &str) -> EvalResult<()> {
        for line in source.lines() {
            self.dispatch(line)?;
        }
        Ok(())
    }
}
