use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    error::EvalError,
    interpreter::{
        classifier::{is_allowed_identifier, is_quoted},
        evaluator::core::{EvalResult, Interpreter},
    },
};

/// The file a module directory is entered through.
pub const MODULE_ENTRY: &str = "main.epl";

impl Interpreter {
    /// Runs a `use` statement: resolves the target and executes the module's
    /// lines with this interpreter.
    ///
    /// The module shares everything with the importer. Its assignments stay
    /// visible afterwards, its lines advance the same line counter, and its
    /// errors are reported against the importer's file.
    ///
    /// # Errors
    /// - Any error from [`Interpreter::resolve_module`].
    /// - `ModuleUnreadable` if the file cannot be read.
    /// - `CyclicUse` if the module is already being run, e.g. because it
    ///   uses itself.
    /// - The first error raised by a line of the module.
    pub fn run_use(&mut self, target: &str) -> EvalResult<()> {
        let path = self.resolve_module(target)?;
        info!("Using module {}", path.display());

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                return Err(EvalError::ModuleUnreadable { path:     path.display().to_string(),
                                                         details:  e.to_string(),
                                                         location: self.location(), });
            },
        };

        let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !self.enter_module(identity) {
            return Err(EvalError::CyclicUse { path:     path.display().to_string(),
                                              location: self.location(), });
        }
        let result = self.run_source(&source);
        self.leave_module();
        result
    }

    /// Finds the file a `use` target refers to.
    ///
    /// A quoted target is a filesystem path; a directory means its
    /// `main.epl`. A bareword target names an installed module under the
    /// library directory. Dots separate nested directories, so `net.http`
    /// is `<libraries>/net/http`. A module directory is entered through its
    /// `main.epl`; a plain file is used as is.
    ///
    /// # Errors
    /// - `ModuleNotFound` if a quoted path does not exist.
    /// - `ModuleNameNotAllowed` if a bareword is empty, starts with a digit
    ///   or contains characters outside the allowed name set.
    /// - `UnknownModule` if a bareword module is not installed.
    ///
    /// # Example
    /// ```
    /// use epl::{
    ///     error::EvalError,
    ///     interpreter::{console::ScriptedConsole, evaluator::core::Interpreter},
    /// };
    ///
    /// let interpreter = Interpreter::new(Box::new(ScriptedConsole::default()), "libraries");
    ///
    /// assert!(matches!(interpreter.resolve_module("'missing.epl'"),
    ///                  Err(EvalError::ModuleNotFound { .. })));
    /// assert!(matches!(interpreter.resolve_module("9lives"),
    ///                  Err(EvalError::ModuleNameNotAllowed { .. })));
    /// ```
    pub fn resolve_module(&self, target: &str) -> EvalResult<PathBuf> {
        let target = target.trim();

        if is_quoted(target) {
            let written = &target[1..target.len() - 1];
            let mut path = PathBuf::from(written);
            if path.is_dir() {
                path.push(MODULE_ENTRY);
            }
            if !path.is_file() {
                return Err(EvalError::ModuleNotFound { path:     path.display().to_string(),
                                                       location: self.location(), });
            }
            return Ok(path);
        }

        let allowed = !target.starts_with(|c: char| c.is_ascii_digit())
                      && target.split('.')
                               .all(|part| !part.trim().is_empty() && is_allowed_identifier(part));
        if !allowed {
            return Err(EvalError::ModuleNameNotAllowed { name:     target.to_string(),
                                                         location: self.location(), });
        }

        let mut path = self.libraries().to_path_buf();
        path.extend(target.split('.'));
        if path.is_dir() {
            path.push(MODULE_ENTRY);
        }
        if !path.is_file() {
            return Err(EvalError::UnknownModule { name:     target.to_string(),
                                                  location: self.location(), });
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::interpreter::{console::ScriptedConsole, value::core::Value};

    fn interpreter_in(libraries: &TempDir) -> Interpreter {
        Interpreter::new(Box::new(ScriptedConsole::default()), libraries.path())
    }

    #[test]
    fn barewords_resolve_to_main_files() {
        let libraries = TempDir::new().unwrap();
        fs::create_dir_all(libraries.path().join("net/http")).unwrap();
        fs::write(libraries.path().join("net/http/main.epl"), "x is 1").unwrap();

        let interpreter = interpreter_in(&libraries);
        assert_eq!(interpreter.resolve_module("net.http").unwrap(),
                   libraries.path().join("net/http/main.epl"));
        assert!(matches!(interpreter.resolve_module("net"), Err(EvalError::UnknownModule { .. })));
        assert!(matches!(interpreter.resolve_module("net..http"),
                         Err(EvalError::ModuleNameNotAllowed { .. })));
    }

    #[test]
    fn quoted_directories_use_their_main_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.epl"), "greeting is 'hi'").unwrap();

        let mut interpreter = interpreter_in(&dir);
        interpreter.run_use(&format!("'{}'", dir.path().display())).unwrap();
        assert_eq!(interpreter.variable("greeting"), Some(Value::from("hi")));
    }

    #[test]
    fn modules_cannot_use_themselves() {
        let libraries = TempDir::new().unwrap();
        fs::write(libraries.path().join("echo"), "x is 1\nuse echo").unwrap();
        fs::write(libraries.path().join("ping"), "use pong").unwrap();
        fs::write(libraries.path().join("pong"), "use ping").unwrap();

        let mut interpreter = interpreter_in(&libraries);
        assert!(matches!(interpreter.run_use("echo"), Err(EvalError::CyclicUse { .. })));
        assert!(matches!(interpreter.run_use("ping"), Err(EvalError::CyclicUse { .. })));
    }

    #[test]
    fn a_module_may_be_used_twice_in_a_row() {
        let libraries = TempDir::new().unwrap();
        fs::write(libraries.path().join("counter"), "n is 1").unwrap();

        let mut interpreter = interpreter_in(&libraries);
        interpreter.run_use("counter").unwrap();
        interpreter.run_use("counter").unwrap();
        assert_eq!(interpreter.variable("n"), Some(Value::Integer(1)));
    }

    #[test]
    fn module_lines_share_the_counter() {
        let libraries = TempDir::new().unwrap();
        fs::write(libraries.path().join("two_lines"), "a is 1\nb is 2").unwrap();

        let mut interpreter = interpreter_in(&libraries);
        interpreter.dispatch("use two_lines").unwrap();
        assert_eq!(interpreter.line(), 4);
        assert_eq!(interpreter.variable("b"), Some(Value::Integer(2)));
    }
}
