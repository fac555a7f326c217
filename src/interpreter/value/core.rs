use crate::{
    error::{EvalError, Location},
    interpreter::{
        classifier::{NumericForm, numeric_form},
        evaluator::core::EvalResult,
        value::decimal::Decimal,
    },
};

/// Represents a runtime value in the interpreter.
///
/// The set of variants is closed: every value knows its own type name, which
/// is what `typename` reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A whole number (64 bit integer).
    Integer(i64),
    /// An exact decimal number.
    Decimal(Decimal),
    /// A UTF-8 string.
    Text(String),
    /// `true` or `false`.
    Boolean(bool),
    /// The unit value written `nothing`. It has no characteristics at all.
    Nothing,
    /// A number written as a literal with a leading `-`, e.g. `-5` or `-2.5`.
    ///
    /// The boxed value is the already negated `Integer` or `Decimal`; it
    /// behaves exactly like that number in arithmetic.
    Negative(Box<Self>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl Value {
    /// Builds an `Integer` or `Decimal` from a numeric literal.
    ///
    /// # Errors
    /// - `EvalError::MultipleDots` if the literal has more than one `.`.
    /// - `EvalError::Overflow` if a whole number does not fit in `i64`.
    /// - `EvalError::UnknownName` if the literal is not numeric at all.
    ///
    /// # Example
    /// ```
    /// use epl::{error::Location, interpreter::value::core::Value};
    ///
    /// let location = Location::new("<string>", 1);
    /// assert_eq!(Value::from_numeric_literal("42", &location).unwrap(), Value::Integer(42));
    /// assert_eq!(Value::from_numeric_literal("4.50", &location).unwrap().to_string(), "4.5");
    /// assert!(Value::from_numeric_literal("4.5.0", &location).is_err());
    /// ```
    pub fn from_numeric_literal(literal: &str, location: &Location) -> EvalResult<Self> {
        match numeric_form(literal, location)? {
            Some(NumericForm::Whole) => {
                literal.parse()
                       .map(Self::Integer)
                       .map_err(|_| EvalError::Overflow { location: location.clone() })
            },
            Some(NumericForm::Fractional) => {
                Decimal::parse(literal).map(Self::Decimal)
                                       .ok_or_else(|| EvalError::Overflow { location:
                                                                                location.clone() })
            },
            None => Err(EvalError::UnknownName { name:     literal.to_string(),
                                                 location: location.clone(), }),
        }
    }

    /// Builds a `Negative` from a literal such as `-5` or `-2.5`.
    ///
    /// The part after the leading `-` must be a whole or decimal digit
    /// string.
    ///
    /// # Errors
    /// - `EvalError::InvalidNegative` if the remainder is not a number.
    /// - `EvalError::MultipleDots` if the remainder has more than one `.`.
    /// - `EvalError::Overflow` if the number does not fit.
    ///
    /// # Example
    /// ```
    /// use epl::{error::Location, interpreter::value::core::Value};
    ///
    /// let location = Location::new("<string>", 1);
    /// let v = Value::negative_literal("-5", &location).unwrap();
    ///
    /// assert_eq!(v, Value::Negative(Box::new(Value::Integer(-5))));
    /// assert_eq!(v.type_name(), "negative");
    /// assert!(Value::negative_literal("-five", &location).is_err());
    /// ```
    pub fn negative_literal(literal: &str, location: &Location) -> EvalResult<Self> {
        let invalid = || EvalError::InvalidNegative { literal:  literal.to_string(),
                                                      location: location.clone(), };

        let magnitude = literal.strip_prefix('-').ok_or_else(invalid)?;
        if numeric_form(magnitude, location)?.is_none() {
            return Err(invalid());
        }

        let negated = match Self::from_numeric_literal(&format!("-{magnitude}"), location) {
            Ok(value) => value,
            Err(EvalError::UnknownName { .. }) => return Err(invalid()),
            Err(e) => return Err(e),
        };
        Ok(Self::Negative(Box::new(negated)))
    }

    /// The name reported by `typename`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "number",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Nothing => "nothing",
            Self::Negative(_) => "negative",
        }
    }

    /// Returns the number a `Negative` wraps, or the value itself.
    #[must_use]
    pub fn plain(&self) -> &Self {
        match self {
            Self::Negative(inner) => inner,
            other => other,
        }
    }

    /// Returns `true` for `Integer`, `Decimal` and `Negative` values.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.plain(), Self::Integer(_) | Self::Decimal(_))
    }

    /// Widens a number to a `Decimal`. Returns `None` for non-numbers.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self.plain() {
            Self::Integer(n) => Some(Decimal::from_integer(*n)),
            Self::Decimal(d) => Some(d.clone()),
            _ => None,
        }
    }

    /// Returns the source form of the value, the text that evaluates back
    /// to it. Text is quoted; everything else prints as it displays.
    ///
    /// # Example
    /// ```
    /// use epl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("hi").repr(), "'hi'");
    /// assert_eq!(Value::from("it's").repr(), "\"it's\"");
    /// assert_eq!(Value::Nothing.repr(), "nothing");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Text(text) if text.contains('\'') && !text.contains('"') => format!("\"{text}\""),
            Self::Text(text) => format!("'{text}'"),
            other => other.to_string(),
        }
    }

    /// Coerces the value to a truth value.
    ///
    /// Booleans are themselves, numbers are true when non-zero, text is true
    /// when non-empty and `nothing` is false.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Decimal(d) => !d.is_zero(),
            Self::Text(s) => !s.is_empty(),
            Self::Boolean(b) => *b,
            Self::Nothing => false,
            Self::Negative(inner) => inner.is_truthy(),
        }
    }

    /// Looks up a characteristic of the value.
    ///
    /// Text has `length`; numbers have `absolute`. Any other name, and any
    /// name at all on `nothing`, is an error.
    ///
    /// # Errors
    /// - `EvalError::UnknownCharacteristic` for undefined characteristics.
    /// - `EvalError::Overflow` for the absolute value of `i64::MIN`.
    ///
    /// # Example
    /// ```
    /// use epl::{error::Location, interpreter::value::core::Value};
    ///
    /// let location = Location::new("<string>", 1);
    ///
    /// let length = Value::from("hello").characteristic("length", &location).unwrap();
    /// assert_eq!(length, Value::Integer(5));
    ///
    /// assert!(Value::Nothing.characteristic("length", &location).is_err());
    /// ```
    pub fn characteristic(&self, name: &str, location: &Location) -> EvalResult<Self> {
        let overflow = || EvalError::Overflow { location: location.clone() };

        match (self.plain(), name) {
            (Self::Text(text), "length") => {
                i64::try_from(text.chars().count()).map(Self::Integer)
                                                   .map_err(|_| overflow())
            },
            (Self::Integer(n), "absolute") => n.checked_abs().map(Self::Integer).ok_or_else(overflow),
            (Self::Decimal(d), "absolute") => Ok(Self::Decimal(d.abs())),
            _ => Err(self.unknown_characteristic(name, location)),
        }
    }

    /// Builds the error reported when `name`, a characteristic or an
    /// operator symbol, is not defined for this value.
    #[must_use]
    pub fn unknown_characteristic(&self, name: &str, location: &Location) -> EvalError {
        EvalError::UnknownCharacteristic { name:      name.to_string(),
                                           type_name: self.type_name(),
                                           location:  location.clone(), }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Nothing => write!(f, "nothing"),
            Self::Negative(inner) => write!(f, "{inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new("<string>", 1)
    }

    #[test]
    fn numeric_literals_pick_their_variant() {
        assert_eq!(Value::from_numeric_literal("7", &location()).unwrap(), Value::Integer(7));
        assert_eq!(Value::from_numeric_literal("7.25", &location()).unwrap().type_name(),
                   "decimal");
        assert!(matches!(Value::from_numeric_literal("5..5", &location()),
                         Err(EvalError::MultipleDots { .. })));
        assert!(matches!(Value::from_numeric_literal("99999999999999999999", &location()),
                         Err(EvalError::Overflow { .. })));
    }

    #[test]
    fn negative_literals_validate_their_digits() {
        let decimal = Value::negative_literal("-5.5", &location()).unwrap();
        assert_eq!(decimal.to_string(), "-5.5");
        assert_eq!(decimal.plain().type_name(), "decimal");

        assert!(matches!(Value::negative_literal("-", &location()),
                         Err(EvalError::InvalidNegative { .. })));
        assert!(matches!(Value::negative_literal("-x1", &location()),
                         Err(EvalError::InvalidNegative { .. })));
        assert!(matches!(Value::negative_literal("-1.2.3", &location()),
                         Err(EvalError::MultipleDots { .. })));
    }

    #[test]
    fn every_variant_has_a_type_name() {
        let names: Vec<_> = [Value::Integer(1),
                             Value::Decimal(Decimal::from_integer(1)),
                             Value::from("a"),
                             Value::Boolean(true),
                             Value::Nothing,
                             Value::Negative(Box::new(Value::Integer(-1)))].iter()
                                                                          .map(Value::type_name)
                                                                          .collect();

        assert_eq!(names, ["number", "decimal", "text", "boolean", "nothing", "negative"]);
    }

    #[test]
    fn nothing_has_no_characteristics() {
        for name in ["length", "absolute", "value", "__repr__"] {
            let error = Value::Nothing.characteristic(name, &location()).unwrap_err();
            assert!(matches!(error,
                             EvalError::UnknownCharacteristic { type_name: "nothing", .. }));
        }
    }

    #[test]
    fn characteristics_depend_on_the_variant() {
        let negative = Value::negative_literal("-3", &location()).unwrap();
        assert_eq!(negative.characteristic("absolute", &location()).unwrap(),
                   Value::Integer(3));
        assert!(Value::Integer(3).characteristic("length", &location()).is_err());
        assert!(Value::Boolean(true).characteristic("absolute", &location()).is_err());
    }

    #[test]
    fn truthiness() {
        assert!(Value::Integer(2).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Nothing.is_truthy());
        assert!(Value::negative_literal("-1", &location()).unwrap().is_truthy());
    }
}
