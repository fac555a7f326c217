/// Interpreter errors.
///
/// Defines every error that can be raised while classifying, evaluating or
/// importing EPL source. Each error carries the file and line it was raised
/// on and reports one of the language's error kinds (`SyntaxError`,
/// `ModuleError`, `CharacteristicError`, ...).
pub mod eval_error;
/// Package manager errors.
///
/// Errors raised while installing or uninstalling library modules. These never
/// occur while a script is running.
pub mod package_error;

pub use eval_error::{ErrorKind, EvalError, Location};
pub use package_error::PackageError;
