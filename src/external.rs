use crate::command::{Command, ExitCode};
use crate::env::Environment;
use crate::error::ShellError;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus, Stdio};

/// Command that is not a builtin, resolved and ready to spawn.
#[derive(Debug)]
pub struct ExternalCommand {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    stdout: Option<File>,
}

impl ExternalCommand {
    /// Open the redirection target (if any), then resolve the executable.
    ///
    /// The target is opened first, so a redirected command that fails to
    /// resolve still leaves an empty target file behind.
    pub fn prepare(cmd: &Command, env: &Environment) -> Result<Self, ShellError> {
        let stdout = match cmd.redirect() {
            Some(redirect) => Some(redirect.open_in(&env.current_dir)?),
            None => None,
        };
        let program = find_command_path(env, cmd.name())
            .ok_or_else(|| ShellError::NotFound(cmd.name().to_string()))?;
        Ok(Self {
            name: cmd.name().to_string(),
            program,
            args: cmd.args().to_vec(),
            stdout,
        })
    }

    /// Start the child process without waiting for it.
    ///
    /// A launch failure here is final: the next search-path candidate is not
    /// tried.
    pub fn spawn(self, env: &Environment) -> Result<Child, ShellError> {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args).current_dir(&env.current_dir);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }
        if let Some(file) = self.stdout {
            cmd.stdout(Stdio::from(file));
        }
        let child = cmd.spawn().map_err(|source| ShellError::Launch {
            path: self.program.clone(),
            source,
        })?;
        log::debug!(
            "spawned {} as pid {} ({:?})",
            self.program.display(),
            child.id(),
            self.args
        );
        Ok(child)
    }
}

/// Exit code of a finished child, shell style: signals map to `128 + signal`.
pub fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name to an executable file.
///
/// Behavior:
/// - The name itself is tried first as a path, relative to the interpreter's
///   working directory unless absolute.
/// - Otherwise each search path prefix is joined with the name, in order, and
///   the first executable candidate wins.
/// - `None` when nothing qualifies, including when the search path is empty
///   and the direct path is not executable.
pub fn find_command_path(env: &Environment, name: &str) -> Option<PathBuf> {
    let direct = env.current_dir.join(name);
    if is_executable(&direct) {
        return Some(direct);
    }
    env.path
        .candidates(name)
        .map(|candidate| env.current_dir.join(candidate))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::path::PathTable;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    fn env_in(dir: &Path, path: PathTable) -> Environment {
        Environment {
            path,
            current_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn absolute_existing_true() {
        let env = env_in(Path::new("/"), PathTable::default());
        let found = find_command_path(&env, "/bin/sh").expect("find /bin/sh");
        assert_eq!(found, Path::new("/bin/sh"));
    }

    #[test]
    fn absolute_nonexisting() {
        let env = env_in(Path::new("/"), PathTable::new(["/bin/"]));
        assert!(find_command_path(&env, "/bin/nonexisting").is_none());
    }

    #[test]
    fn first_matching_prefix_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let (a, b, c) = (tmp.path().join("a"), tmp.path().join("b"), tmp.path().join("c"));
        for dir in [&a, &b, &c] {
            fs::create_dir(dir).unwrap();
        }
        write_script(&b.join("foo"), "exit 0");
        write_script(&c.join("foo"), "exit 0");

        let table = PathTable::new([a.to_str().unwrap(), b.to_str().unwrap(), c.to_str().unwrap()]);
        let env = env_in(tmp.path(), table);
        assert_eq!(find_command_path(&env, "foo"), Some(b.join("foo")));
    }

    #[test]
    fn non_executables_and_directories_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let (a, b, c) = (tmp.path().join("a"), tmp.path().join("b"), tmp.path().join("c"));
        for dir in [&a, &b, &c] {
            fs::create_dir(dir).unwrap();
        }
        fs::write(a.join("foo"), "not executable").unwrap();
        fs::create_dir(b.join("foo")).unwrap();
        write_script(&c.join("foo"), "exit 0");

        let table = PathTable::new([a.to_str().unwrap(), b.to_str().unwrap(), c.to_str().unwrap()]);
        let env = env_in(tmp.path(), table);
        assert_eq!(find_command_path(&env, "foo"), Some(c.join("foo")));
    }

    #[test]
    fn relative_prefix_is_taken_from_working_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("bin")).unwrap();
        write_script(&tmp.path().join("bin").join("tool"), "exit 0");

        let env = env_in(tmp.path(), PathTable::new(["bin/"]));
        let found = find_command_path(&env, "tool").expect("found via relative prefix");
        assert!(found.ends_with("bin/tool"));
    }

    #[test]
    fn direct_path_is_tried_before_search_path() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(&tmp.path().join("local"), "exit 0");

        let env = env_in(tmp.path(), PathTable::default());
        assert_eq!(
            find_command_path(&env, "local"),
            Some(tmp.path().join("local"))
        );
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let env = env_in(tmp.path(), PathTable::default());
        assert!(find_command_path(&env, "sh").is_none());
    }

    #[test]
    fn prepare_reports_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let env = env_in(tmp.path(), PathTable::new(["/bin/"]));
        let cmd = Command::parse("definitely-not-a-command-wish").unwrap().unwrap();
        assert!(matches!(
            ExternalCommand::prepare(&cmd, &env),
            Err(ShellError::NotFound(name)) if name == "definitely-not-a-command-wish"
        ));
    }

    #[test]
    fn spawned_child_writes_to_redirect_target() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(&tmp.path().join("greet"), "echo \"hello $1\"");

        let env = env_in(tmp.path(), PathTable::default());
        let cmd = Command::parse("greet world > out.txt").unwrap().unwrap();
        let mut child = ExternalCommand::prepare(&cmd, &env)
            .unwrap()
            .spawn(&env)
            .unwrap();
        let status = child.wait().unwrap();

        assert_eq!(exit_code(status), 0);
        assert_eq!(
            fs::read_to_string(tmp.path().join("out.txt")).unwrap(),
            "hello world\n"
        );
    }

    #[test]
    fn exec_failure_after_check_is_a_launch_error() {
        let tmp = tempfile::tempdir().unwrap();
        let broken = tmp.path().join("broken");
        write_script(&broken, "exit 0");
        fs::write(&broken, "#!/nonexistent/interpreter\n").unwrap();

        let env = env_in(tmp.path(), PathTable::default());
        let cmd = Command::parse("broken").unwrap().unwrap();
        let prepared = ExternalCommand::prepare(&cmd, &env).unwrap();
        assert!(matches!(
            prepared.spawn(&env),
            Err(ShellError::Launch { path, .. }) if path == broken
        ));
    }

    #[test]
    fn exit_code_reports_failure() {
        let mut child = std::process::Command::new("/bin/sh")
            .args(["-c", "exit 3"])
            .spawn()
            .unwrap();
        assert_eq!(exit_code(child.wait().unwrap()), 3);
    }
}
