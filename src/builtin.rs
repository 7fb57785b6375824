use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::path::PathBuf;

/// What the interpreter should do after a command has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going with the rest of the line.
    Continue,
    /// Stop the interpreter now, with success status.
    Exit,
}

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in the interpreter's own process, never in a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Whether `argc` arguments (not counting the name) are acceptable.
    fn arity_ok(_argc: usize) -> bool {
        true
    }

    /// Executes the command against the interpreter state.
    fn execute(self, env: &mut Environment) -> Result<Flow, ShellError>;
}

/// Object-safe view of a builtin, so the interpreter can hold a list of them.
pub(crate) trait Builtin {
    /// Run the builtin if `name` is its name, otherwise return `None`.
    fn try_run(
        &self,
        env: &mut Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Flow, ShellError>>;
}

impl<T: BuiltinCommand> Builtin for Factory<T> {
    fn try_run(
        &self,
        env: &mut Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Flow, ShellError>> {
        if name != T::name() {
            return None;
        }
        if !T::arity_ok(args.len()) {
            log::debug!("{name}: wrong number of arguments {args:?}");
            return Some(Err(ShellError::BuiltinUsage(T::name())));
        }
        // Every word is a plain positional: a leading `--` stops argh from
        // reading `-x`, `--` or `--help` as options.
        let positional: Vec<&str> = std::iter::once("--").chain(args.iter().copied()).collect();
        Some(match T::from_args(&[name], &positional) {
            Ok(cmd) => cmd.execute(env),
            Err(EarlyExit { output, .. }) => {
                log::debug!("{name}: rejected arguments {args:?}: {}", output.trim_end());
                Err(ShellError::BuiltinUsage(T::name()))
            }
        })
    }
}

#[derive(FromArgs)]
/// Exit the interpreter. Takes no arguments.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn arity_ok(argc: usize) -> bool {
        argc == 0
    }

    fn execute(self, _env: &mut Environment) -> Result<Flow, ShellError> {
        Ok(Flow::Exit)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn arity_ok(argc: usize) -> bool {
        argc == 1
    }

    fn execute(self, env: &mut Environment) -> Result<Flow, ShellError> {
        let target = PathBuf::from(&self.target);
        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir).map_err(|source| ShellError::ChangeDir {
            path: new_dir.clone(),
            source,
        })?;
        env::set_current_dir(&canonical).map_err(|source| ShellError::ChangeDir {
            path: canonical.clone(),
            source,
        })?;
        log::debug!("cd: now in {}", canonical.display());
        env.current_dir = canonical;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Replace the search path for external commands.
pub struct Path {
    #[argh(positional, greedy)]
    /// directories to search, in lookup order. None clears the search path.
    pub dirs: Vec<String>,
}

impl BuiltinCommand for Path {
    fn name() -> &'static str {
        "path"
    }

    fn execute(self, env: &mut Environment) -> Result<Flow, ShellError> {
        log::debug!("path: {:?} -> {:?}", env.path.prefixes(), self.dirs);
        env.path.replace(self.dirs);
        Ok(Flow::Continue)
    }
}
