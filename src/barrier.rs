use crate::command::ExitCode;
use crate::error::ShellError;
use crate::external::exit_code;
use std::process::Child;

/// A child launched from the current line that has not been waited on yet.
#[derive(Debug)]
pub struct ChildHandle {
    name: String,
    child: Child,
}

impl ChildHandle {
    pub fn new(name: impl Into<String>, child: Child) -> Self {
        Self {
            name: name.into(),
            child,
        }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the child terminates. Consumes the handle.
    pub fn wait(mut self) -> Result<ExitCode, ShellError> {
        let pid = self.child.id();
        let status = self
            .child
            .wait()
            .map_err(|source| ShellError::Wait { pid, source })?;
        let code = exit_code(status);
        log::debug!("{} (pid {pid}) finished with {code}", self.name);
        Ok(code)
    }
}

/// Every child launched from one line, in launch order.
///
/// All children of a line are launched before any of them is waited on;
/// [`Barrier::wait_all`] then joins them in that same order.
#[derive(Debug, Default)]
pub struct Barrier {
    children: Vec<ChildHandle>,
}

impl Barrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: ChildHandle) {
        self.children.push(handle);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Wait for every child regardless of how each one ends.
    ///
    /// Returns one result per child, in launch order. A failed wait does not
    /// stop the remaining children from being waited on.
    pub fn wait_all(self) -> Vec<Result<ExitCode, ShellError>> {
        self.children.into_iter().map(ChildHandle::wait).collect()
    }
}
