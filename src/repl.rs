use tracing::info;
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{error::EvalError, interpreter::evaluator::core::Interpreter};

/// The prompt shown before each line.
pub const PROMPT: &str = ">>> ";

/// Why an interactive session ended.
#[derive(Debug)]
pub enum ReplError {
    /// A line failed; the session stops just as a script run would.
    Eval(EvalError),
    /// The line editor itself failed.
    Readline(ReadlineError),
}

impl std::fmt::Display for ReplError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eval(e) => write!(f, "{e}"),
            Self::Readline(e) => write!(f, "Could not read input: {e}"),
        }
    }
}

impl std::error::Error for ReplError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Eval(e) => Some(e),
            Self::Readline(e) => Some(e),
        }
    }
}

impl From<EvalError> for ReplError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

impl From<ReadlineError> for ReplError {
    fn from(e: ReadlineError) -> Self {
        Self::Readline(e)
    }
}

/// Runs the interactive prompt until `exit`, Ctrl-C or Ctrl-D.
///
/// Blank lines are skipped without advancing the line counter. Every other
/// line goes through [`Interpreter::dispatch`].
///
/// # Errors
/// The first evaluation error ends the session, as does a failure of the
/// line editor.
pub fn run(interpreter: &mut Interpreter) -> Result<(), ReplError> {
    let mut editor = DefaultEditor::new()?;
    info!("Starting interactive session");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        let _ = editor.add_history_entry(line.as_str());
        interpreter.dispatch(&line)?;
    }

    info!("Interactive session ended");
    Ok(())
}
