use crate::barrier::{Barrier, ChildHandle};
use crate::builtin::{Builtin, Flow};
use crate::command::Command;
use crate::config::Config;
use crate::env::Environment;
use crate::error::{self, ShellError};
use crate::external::ExternalCommand;
use crate::lexer;
use crate::path::PathTable;
use crate::source::LineSource;
use std::io::{self, Write};

/// Factory allows dispatching to the builtins defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter that runs builtins in-process and
/// everything else in child processes.
///
/// The interpreter owns an [`Environment`] (search path and working
/// directory) and a list of builtins that are queried by name before falling
/// back to external commands.
///
/// Example
/// ```
/// use wish::{Flow, Interpreter};
/// let mut sh = Interpreter::default();
/// assert_eq!(sh.execute_line("path /usr/bin /bin"), Flow::Continue);
/// assert_eq!(sh.env().path.prefixes(), ["/usr/bin", "/bin"]);
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: Vec<Box<dyn Builtin>>,
}

impl Interpreter {
    /// Create an interpreter searching `path` for external commands.
    pub fn new(path: PathTable) -> Self {
        use crate::builtin::*;
        Self {
            env: Environment::new(path),
            builtins: vec![
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Path>::default()),
            ],
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PathTable::new(config.path.iter().cloned()))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Read and execute lines until end of input or `exit`.
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<(), ShellError> {
        while let Some(line) = source.next_line()? {
            if self.execute_line(&line) == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one line, reporting errors on standard error.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        self.execute_line_with_diagnostics(line, &mut io::stderr())
    }

    /// Execute one line, writing the diagnostic for each failed segment to `err`.
    ///
    /// Every segment is dispatched first; external commands are spawned without
    /// waiting. Then all spawned children are waited on, so when this returns
    /// nothing from the line is still running. The one exception is `exit`,
    /// which returns [`Flow::Exit`] at once and leaves any sibling segments
    /// unlaunched and already launched children unwaited.
    pub fn execute_line_with_diagnostics(&mut self, line: &str, err: &mut dyn Write) -> Flow {
        let mut barrier = Barrier::new();
        for segment in lexer::split_segments(line) {
            match self.dispatch(segment, &mut barrier) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    log::debug!("exit requested, {} children left running", barrier.len());
                    return Flow::Exit;
                }
                Err(e) => error::report(err, &e),
            }
        }

        for result in barrier.wait_all() {
            if let Err(e) = result {
                error::report(err, &e);
            }
        }
        Flow::Continue
    }

    fn dispatch(&mut self, segment: &str, barrier: &mut Barrier) -> Result<Flow, ShellError> {
        let Some(cmd) = Command::parse(segment)? else {
            return Ok(Flow::Continue);
        };

        let args: Vec<&str> = cmd.args().iter().map(String::as_str).collect();
        for builtin in &self.builtins {
            if let Some(result) = builtin.try_run(&mut self.env, cmd.name(), &args) {
                if let Some(redirect) = cmd.redirect() {
                    log::debug!(
                        "{}: builtin output is not redirected, ignoring {}",
                        cmd.name(),
                        redirect.target().display()
                    );
                }
                return result;
            }
        }

        let child = ExternalCommand::prepare(&cmd, &self.env)?.spawn(&self.env)?;
        let handle = ChildHandle::new(cmd.name(), child);
        log::trace!("{}: pid {} joins the barrier", cmd.name(), handle.id());
        barrier.push(handle);
        Ok(Flow::Continue)
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default search path from the embedded
    /// configuration.
    fn default() -> Self {
        Self::from_config(&Config::default_config())
    }
}
