use std::collections::HashMap;

use crate::{
    error::{EvalError, Location},
    interpreter::{
        classifier::{OPERATORS, QUOTES},
        evaluator::core::EvalResult,
        value::core::Value,
    },
};

/// Fills the `{name}` placeholders of a format string with the display form
/// of the named variables.
///
/// `{{` and `}}` stand for literal braces. A lone `}` is kept as is.
///
/// # Parameters
/// - `template`: The format string body, without `;` and quotes.
/// - `variables`: The bindings placeholders are looked up in.
/// - `location`: Reported by any error.
///
/// # Errors
/// - `UnknownPlaceholder` if a placeholder names an unbound variable.
/// - `UnclosedPlaceholder` if a `{` has no matching `}`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use epl::{
///     error::Location,
///     interpreter::{evaluator::format::format_text, value::core::Value},
/// };
///
/// let variables = HashMap::from([("n".to_string(), Value::Integer(3))]);
/// let location = Location::new("<string>", 1);
///
/// assert_eq!(format_text("n = {n} {{n}}", &variables, &location).unwrap(), "n = 3 {n}");
/// ```
pub fn format_text(template: &str,
                   variables: &HashMap<String, Value>,
                   location: &Location)
                   -> EvalResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            },
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(EvalError::UnclosedPlaceholder { location:
                                                                            location.clone() });
                        },
                    }
                }
                let Some(value) = variables.get(&name) else {
                    return Err(EvalError::UnknownPlaceholder { name,
                                                               location: location.clone() });
                };
                output.push_str(&value.to_string());
            },
            c => output.push(c),
        }
    }

    Ok(output)
}

/// Replaces each variable name that stands alone between operators or
/// parentheses with the source form of its value.
///
/// Text inside quotes is never touched, and whitespace around a replaced
/// name is preserved. Substituting source text rather than values means a
/// negative variable behaves like the literal it holds: with `x` bound to
/// `-2`, `x ^ 2` is `-2 ^ 2`, which is `-4`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use epl::interpreter::{evaluator::format::substitute_variables, value::core::Value};
///
/// let variables = HashMap::from([("a".to_string(), Value::from("x")),
///                                ("b".to_string(), Value::Integer(2))]);
///
/// assert_eq!(substitute_variables("a + 'a' * (b)", &variables), "'x' + 'a' * (2)");
/// ```
#[must_use]
pub fn substitute_variables(fragment: &str, variables: &HashMap<String, Value>) -> String {
    let mut rewritten = String::with_capacity(fragment.len());
    let mut run = String::new();
    let mut inside_quotes = false;

    for c in fragment.chars() {
        if QUOTES.contains(&c) {
            inside_quotes = !inside_quotes;
        }
        if !inside_quotes && (OPERATORS.contains(&c) || c == '(' || c == ')') {
            push_run(&mut rewritten, &run, variables);
            run.clear();
            rewritten.push(c);
        } else {
            run.push(c);
        }
    }
    push_run(&mut rewritten, &run, variables);

    rewritten
}

/// Appends `run` to `output`, replaced by the bound value if the trimmed run
/// is a variable name.
fn push_run(output: &mut String, run: &str, variables: &HashMap<String, Value>) {
    let name = run.trim();
    match variables.get(name) {
        Some(value) if !name.is_empty() => {
            let leading = &run[..run.len() - run.trim_start().len()];
            let trailing = &run[run.trim_end().len()..];
            output.push_str(leading);
            output.push_str(&value.repr());
            output.push_str(trailing);
        },
        _ => output.push_str(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new("<string>", 1)
    }

    #[test]
    fn unclosed_placeholder() {
        let error = format_text("{name", &HashMap::new(), &location()).unwrap_err();
        assert!(matches!(error, EvalError::UnclosedPlaceholder { .. }));
    }

    #[test]
    fn placeholders_use_display_form() {
        let variables = HashMap::from([("t".to_string(), Value::from("hi")),
                                       ("z".to_string(), Value::Nothing)]);
        assert_eq!(format_text("{t}/{z}", &variables, &location()).unwrap(), "hi/nothing");
    }

    #[test]
    fn substitution_leaves_unknown_names_alone() {
        let variables = HashMap::from([("x".to_string(), Value::Integer(1))]);
        assert_eq!(substitute_variables("y + x", &variables), "y + 1");
        assert_eq!(substitute_variables("x.length + 1", &variables), "x.length + 1");
    }
}
