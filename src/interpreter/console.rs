use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, BufRead, Write},
    rc::Rc,
};

/// The interpreter's connection to the outside world.
///
/// `write` statements go through [`Console::write_line`]; `read` statements
/// and `read` expressions go through [`Console::read_line`].
pub trait Console {
    /// Shows the optional prompt, then blocks until one line of input is
    /// available and returns it without its line terminator.
    ///
    /// # Errors
    /// Returns `UnexpectedEof` when no more input will arrive.
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<String>;

    /// Writes `text` followed by a newline.
    ///
    /// # Errors
    /// Propagates failures of the underlying stream.
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

/// A console on the process's standard input and output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<String> {
        if let Some(prompt) = prompt {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(strip_line_ending(line))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{text}")
    }
}

/// Everything a [`ScriptedConsole`] has written, shared with its creator.
pub type Transcript = Rc<RefCell<String>>;

/// A console with queued input and captured output.
///
/// Prompts and written lines are appended to the transcript exactly as they
/// would appear on a terminal. Input is not echoed.
///
/// # Example
/// ```
/// use epl::interpreter::console::{Console, ScriptedConsole};
///
/// let mut console = ScriptedConsole::new(["Ada"]);
/// let transcript = console.transcript();
///
/// let name = console.read_line(Some("Name? ")).unwrap();
/// console.write_line(&format!("Hello {name}")).unwrap();
///
/// assert_eq!(*transcript.borrow(), "Name? Hello Ada\n");
/// ```
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input:      VecDeque<String>,
    transcript: Transcript,
}

impl ScriptedConsole {
    /// Creates a console that answers reads with `input`, in order.
    pub fn new<I, S>(input: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { input:      input.into_iter().map(Into::into).collect(),
               transcript: Transcript::default(), }
    }

    /// Returns a handle to the captured output.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        Rc::clone(&self.transcript)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<String> {
        if let Some(prompt) = prompt {
            self.transcript.borrow_mut().push_str(prompt);
        }
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut transcript = self.transcript.borrow_mut();
        transcript.push_str(text);
        transcript.push('\n');
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
