/// Where an error was raised.
///
/// `file` is the value of the special variable `file` at the time of the
/// error and `line` is the interpreter's running line counter. Imported
/// modules share the importer's counter, so a failure inside a library
/// reports the importing file's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the script being run, or `<string>` for in-memory source.
    pub file: String,
    /// The running line number.
    pub line: usize,
}

impl Location {
    /// Creates a location from a file name and a line number.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self { file: file.into(),
               line }
    }
}

/// The language-level category of an [`EvalError`].
///
/// These are the names printed in front of every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed expressions, literals or names.
    Syntax,
    /// A `use` target that cannot be found, read or named.
    Module,
    /// Access to a characteristic the value does not have.
    Characteristic,
    /// Division by zero or a result that does not fit.
    Arithmetic,
    /// The console collaborator failed.
    Input,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Module => write!(f, "ModuleError"),
            Self::Characteristic => write!(f, "CharacteristicError"),
            Self::Arithmetic => write!(f, "ArithmeticError"),
            Self::Input => write!(f, "InputError"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while running EPL source.
///
/// Every error is fatal to the run that raised it: the top level reports the
/// first one and stops.
pub enum EvalError {
    /// An expression was required but the fragment was empty.
    EmptyExpression {
        /// Where the error occurred.
        location: Location,
    },
    /// Found a token the expression grammar does not accept here.
    UnexpectedToken {
        /// The offending token text.
        token:    String,
        /// Where the error occurred.
        location: Location,
    },
    /// The expression ended while more input was expected.
    UnexpectedEndOfInput {
        /// Where the error occurred.
        location: Location,
    },
    /// An operator was written twice in a row (`++`, `--`, `//`, `^^`).
    DoubledOperator {
        /// Where the error occurred.
        location: Location,
    },
    /// A numeric literal contained more than one decimal point.
    MultipleDots {
        /// The literal as written.
        literal:  String,
        /// Where the error occurred.
        location: Location,
    },
    /// A literal starting with `-` was not followed by a number.
    InvalidNegative {
        /// The literal as written.
        literal:  String,
        /// Where the error occurred.
        location: Location,
    },
    /// A name that is neither a variable nor a keyword.
    UnknownName {
        /// The name as written.
        name:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A `{name}` placeholder in a format string named no variable.
    UnknownPlaceholder {
        /// The placeholder name.
        name:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A `{` in a format string was never closed.
    UnclosedPlaceholder {
        /// Where the error occurred.
        location: Location,
    },
    /// The right operand of `^` was not a whole number.
    FractionalExponent {
        /// Where the error occurred.
        location: Location,
    },
    /// An expression nests parentheses or operators too deeply to evaluate.
    TooDeeplyNested {
        /// Where the error occurred.
        location: Location,
    },
    /// A `use` target does not exist on disk.
    ModuleNotFound {
        /// The path that was looked up.
        path:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A bareword `use` target is not installed in the library directory.
    UnknownModule {
        /// The module name.
        name:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A bareword `use` target contains disallowed characters or starts
    /// with a digit.
    ModuleNameNotAllowed {
        /// The module name.
        name:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A module was used again while it was still being run, directly or
    /// through other modules.
    CyclicUse {
        /// The module file.
        path:     String,
        /// Where the error occurred.
        location: Location,
    },
    /// A module file exists but could not be read.
    ModuleUnreadable {
        /// The path that was read.
        path:     String,
        /// The underlying I/O failure.
        details:  String,
        /// Where the error occurred.
        location: Location,
    },
    /// A characteristic (member or operator) that the value does not define.
    UnknownCharacteristic {
        /// The characteristic name or operator symbol.
        name:      String,
        /// The type name of the value it was requested on.
        type_name: &'static str,
        /// Where the error occurred.
        location:  Location,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// Where the error occurred.
        location: Location,
    },
    /// An arithmetic result does not fit in the value model.
    Overflow {
        /// Where the error occurred.
        location: Location,
    },
    /// Reading from or writing to the console failed.
    Console {
        /// The underlying I/O failure.
        details:  String,
        /// Where the error occurred.
        location: Location,
    },
}

impl EvalError {
    /// Returns the error's language-level kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyExpression { .. }
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::DoubledOperator { .. }
            | Self::MultipleDots { .. }
            | Self::InvalidNegative { .. }
            | Self::UnknownName { .. }
            | Self::UnknownPlaceholder { .. }
            | Self::UnclosedPlaceholder { .. }
            | Self::FractionalExponent { .. }
            | Self::TooDeeplyNested { .. } => ErrorKind::Syntax,
            Self::ModuleNotFound { .. }
            | Self::UnknownModule { .. }
            | Self::ModuleNameNotAllowed { .. }
            | Self::CyclicUse { .. }
            | Self::ModuleUnreadable { .. } => ErrorKind::Module,
            Self::UnknownCharacteristic { .. } => ErrorKind::Characteristic,
            Self::DivisionByZero { .. } | Self::Overflow { .. } => ErrorKind::Arithmetic,
            Self::Console { .. } => ErrorKind::Input,
        }
    }

    /// Returns where the error was raised.
    #[must_use]
    pub const fn location(&self) -> &Location {
        match self {
            Self::EmptyExpression { location }
            | Self::UnexpectedToken { location, .. }
            | Self::UnexpectedEndOfInput { location }
            | Self::DoubledOperator { location }
            | Self::MultipleDots { location, .. }
            | Self::InvalidNegative { location, .. }
            | Self::UnknownName { location, .. }
            | Self::UnknownPlaceholder { location, .. }
            | Self::UnclosedPlaceholder { location }
            | Self::FractionalExponent { location }
            | Self::TooDeeplyNested { location }
            | Self::ModuleNotFound { location, .. }
            | Self::UnknownModule { location, .. }
            | Self::ModuleNameNotAllowed { location, .. }
            | Self::CyclicUse { location, .. }
            | Self::ModuleUnreadable { location, .. }
            | Self::UnknownCharacteristic { location, .. }
            | Self::DivisionByZero { location }
            | Self::Overflow { location }
            | Self::Console { location, .. } => location,
        }
    }

    /// Returns the human readable message, without kind or location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::EmptyExpression { .. } => "Expected an expression.".to_string(),
            Self::UnexpectedToken { token, .. } => format!("Unexpected token \"{token}\"."),
            Self::UnexpectedEndOfInput { .. } => "Unexpected end of expression.".to_string(),
            Self::DoubledOperator { .. } => {
                "No more than 1 plus, minus, or divide sign can be in expression.".to_string()
            },
            Self::MultipleDots { literal, .. } => {
                format!("More than 1 dot in decimal \"{literal}\".")
            },
            Self::InvalidNegative { literal, .. } => {
                format!("Invalid negative number \"{literal}\".")
            },
            Self::UnknownName { name, .. } => format!("Unknown name \"{name}\"."),
            Self::UnknownPlaceholder { name, .. } => {
                format!("Unknown variable \"{name}\" in format string.")
            },
            Self::UnclosedPlaceholder { .. } => {
                "Unclosed placeholder in format string.".to_string()
            },
            Self::FractionalExponent { .. } => "Exponent must be a whole number.".to_string(),
            Self::TooDeeplyNested { .. } => "Expression is nested too deeply.".to_string(),
            Self::ModuleNotFound { path, .. } => format!("EPL File \"{path}\" does not exist."),
            Self::UnknownModule { name, .. } => format!("Unknown module \"{name}\"."),
            Self::ModuleNameNotAllowed { name, .. } => {
                format!("Name \"{name}\" for use statement is not allowed.")
            },
            Self::CyclicUse { path, .. } => {
                format!("Module \"{path}\" is already being used.")
            },
            Self::ModuleUnreadable { path, details, .. } => {
                format!("Could not read \"{path}\": {details}.")
            },
            Self::UnknownCharacteristic { name, type_name, .. } => {
                format!("Unknown Characteristic \"{name}\" for {type_name}.")
            },
            Self::DivisionByZero { .. } => "Division by zero.".to_string(),
            Self::Overflow { .. } => "Number is too large to compute.".to_string(),
            Self::Console { details, .. } => format!("Console failure: {details}."),
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Location { file, line } = self.location();
        write!(f, "file \"{file}\", line {line}: {}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_fixed_report_format() {
        let error = EvalError::MultipleDots { literal:  "5..5".to_string(),
                                              location: Location::new("main.epl", 3), };

        assert_eq!(error.to_string(),
                   "file \"main.epl\", line 3: SyntaxError: More than 1 dot in decimal \"5..5\".");
    }

    #[test]
    fn kinds_are_grouped_by_category() {
        let location = Location::new("<string>", 1);

        assert_eq!(EvalError::DivisionByZero { location: location.clone() }.kind(),
                   ErrorKind::Arithmetic);
        assert_eq!(EvalError::UnknownModule { name:     "net".to_string(),
                                              location: location.clone(), }.kind(),
                   ErrorKind::Module);
        assert_eq!(EvalError::UnknownCharacteristic { name: "length".to_string(),
                                                      type_name: "nothing",
                                                      location }.kind(),
                   ErrorKind::Characteristic);
    }
}
