use crate::{
    error::{EvalError, Location},
    interpreter::evaluator::core::EvalResult,
};

/// Characters a bare name may consist of: ASCII letters, digits, underscore
/// and space.
pub const ALLOWED_NAME_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_ ";

/// The arithmetic operator characters.
pub const OPERATORS: [char; 5] = ['+', '-', '*', '/', '^'];

/// Operator pairs rejected outright. Other adjacent pairs such as `+-` are
/// accepted and parse as a unary minus.
pub const DOUBLED_OPERATORS: [&str; 4] = ["++", "--", "//", "^^"];

/// Characters that open or close a text literal. The two kinds do not have
/// to match each other.
pub const QUOTES: [char; 2] = ['\'', '"'];

/// The two shapes a numeric literal can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericForm {
    /// Only digits, e.g. `42`.
    Whole,
    /// Digits with exactly one `.`, e.g. `4.2`, `4.` or `.2`.
    Fractional,
}

/// Returns `true` if every character of `token` is in
/// [`ALLOWED_NAME_CHARS`].
///
/// Used for assignment targets and bareword module names. The empty string
/// is allowed, as is a leading digit; callers that care check those
/// themselves.
///
/// # Example
/// ```
/// use epl::interpreter::classifier::is_allowed_identifier;
///
/// assert!(is_allowed_identifier("total_2"));
/// assert!(!is_allowed_identifier("total-2"));
/// ```
#[must_use]
pub fn is_allowed_identifier(token: &str) -> bool {
    token.chars().all(|c| ALLOWED_NAME_CHARS.contains(c))
}

/// Classifies a numeric literal.
///
/// An optional leading `-` is accepted. Returns `Ok(None)` for anything that
/// is not made of digits and dots.
///
/// # Errors
/// Returns `EvalError::MultipleDots` for a digit string with more than one
/// decimal point; that is a syntax error, not a non-number.
///
/// # Example
/// ```
/// use epl::{
///     error::Location,
///     interpreter::classifier::{NumericForm, numeric_form},
/// };
///
/// let location = Location::new("<string>", 1);
/// assert_eq!(numeric_form("12", &location).unwrap(), Some(NumericForm::Whole));
/// assert_eq!(numeric_form("1.5", &location).unwrap(), Some(NumericForm::Fractional));
/// assert_eq!(numeric_form("x1", &location).unwrap(), None);
/// assert!(numeric_form("1.2.3", &location).is_err());
/// ```
pub fn numeric_form(token: &str, location: &Location) -> EvalResult<Option<NumericForm>> {
    let body = token.strip_prefix('-').unwrap_or(token);

    if !body.chars().any(|c| c.is_ascii_digit())
       || !body.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return Ok(None);
    }

    match body.matches('.').count() {
        0 => Ok(Some(NumericForm::Whole)),
        1 => Ok(Some(NumericForm::Fractional)),
        _ => Err(EvalError::MultipleDots { literal:  token.to_string(),
                                           location: location.clone(), }),
    }
}

/// Returns `true` if the token parses as a number.
///
/// # Errors
/// See [`numeric_form`].
pub fn is_numeric(token: &str, location: &Location) -> EvalResult<bool> {
    Ok(numeric_form(token, location)?.is_some())
}

/// Returns `true` if the fragment starts and ends with a quote mark.
///
/// `'hello"` counts: the two quote marks only have to be quote marks.
#[must_use]
pub fn is_quoted(fragment: &str) -> bool {
    fragment.chars().count() >= 2
    && fragment.starts_with(QUOTES)
    && fragment.ends_with(QUOTES)
}

/// Replaces every character inside a quoted section with `_`, so operator
/// scans do not see the contents of text literals.
///
/// A section runs from a quote mark to the next quote mark of either kind.
#[must_use]
pub fn mask_quoted(fragment: &str) -> String {
    let mut inside = false;
    fragment.chars()
            .map(|c| {
                if QUOTES.contains(&c) {
                    inside = !inside;
                    c
                } else if inside {
                    '_'
                } else {
                    c
                }
            })
            .collect()
}

/// Returns `true` if the fragment contains an operator outside quotes.
///
/// A single leading `-` belongs to a negative literal and does not count.
///
/// # Example
/// ```
/// use epl::interpreter::classifier::has_operator;
///
/// assert!(has_operator("1 + 2"));
/// assert!(has_operator("-5 * 2"));
/// assert!(!has_operator("-5"));
/// assert!(!has_operator("'a-b'"));
/// ```
#[must_use]
pub fn has_operator(fragment: &str) -> bool {
    let masked = mask_quoted(fragment);
    let scanned = masked.strip_prefix('-').unwrap_or(&masked);
    scanned.contains(OPERATORS)
}

/// Returns `true` if the fragment contains one of the
/// [`DOUBLED_OPERATORS`] outside quotes.
#[must_use]
pub fn has_doubled_operator(fragment: &str) -> bool {
    let masked = mask_quoted(fragment);
    DOUBLED_OPERATORS.iter().any(|pair| masked.contains(pair))
}

/// Returns `true` if the fragment has the shape `name.characteristic`
/// (possibly chained), with no spaces.
#[must_use]
pub fn is_characteristic_access(fragment: &str) -> bool {
    let mut parts = fragment.split('.');
    let is_name = |part: &str| {
        part.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    fragment.contains('.') && parts.all(is_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new("<string>", 1)
    }

    #[test]
    fn identifiers_allow_spaces_and_leading_digits() {
        assert!(is_allowed_identifier("my var"));
        assert!(is_allowed_identifier("2fast"));
        assert!(!is_allowed_identifier("a.b"));
        assert!(!is_allowed_identifier("naïve"));
    }

    #[test]
    fn more_than_one_dot_is_an_error_not_a_non_number() {
        assert!(matches!(numeric_form("5..5", &location()),
                         Err(EvalError::MultipleDots { .. })));
        assert!(!is_numeric("..", &location()).unwrap());
        assert!(!is_numeric("", &location()).unwrap());
        assert!(is_numeric("-3", &location()).unwrap());
    }

    #[test]
    fn quote_kinds_need_not_match() {
        assert!(is_quoted("'hello'"));
        assert!(is_quoted("\"hello\""));
        assert!(is_quoted("'hello\""));
        assert!(!is_quoted("'"));
        assert!(!is_quoted("hello'"));
    }

    #[test]
    fn only_exact_doublings_are_rejected() {
        assert!(has_doubled_operator("1 ++ 2"));
        assert!(has_doubled_operator("--5"));
        assert!(!has_doubled_operator("1 +- 2"));
        assert!(!has_doubled_operator("'a--b'"));
    }

    #[test]
    fn masking_hides_quoted_operators() {
        assert_eq!(mask_quoted("'a+b' + x"), "'___' + x");
        assert!(!has_operator(";'{a}-{b}'"));
    }

    #[test]
    fn characteristic_access_shape() {
        assert!(is_characteristic_access("name.length"));
        assert!(is_characteristic_access("a.b.c"));
        assert!(!is_characteristic_access("4.5"));
        assert!(!is_characteristic_access("name."));
        assert!(!is_characteristic_access("name"));
    }
}
