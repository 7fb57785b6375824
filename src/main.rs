use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use wish::{Batch, Config, ERROR_MESSAGE, Interactive, Interpreter, LineSource, ShellError};

#[derive(FromArgs)]
/// A small command interpreter. Runs the commands in a batch file, or reads
/// them from the terminal when no file is given.
struct Args {
    #[argh(positional)]
    /// file of commands to run, one per line.
    batch: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("WISH_LOG", "off")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            let _ = std::io::stderr().write_all(ERROR_MESSAGE.as_bytes());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let strings: Vec<&str> = argv.iter().map(String::as_str).collect();
    let (cmd, rest) = strings.split_first().ok_or(ShellError::Startup)?;
    if rest.len() > 1 {
        return Err(ShellError::Startup).context(format!("unexpected arguments {rest:?}"));
    }

    // The only argument is always a file name, even when it looks like an option.
    let positional: Vec<&str> = std::iter::once("--").chain(rest.iter().copied()).collect();
    let args = Args::from_args(&[*cmd], &positional).map_err(|EarlyExit { output, .. }| {
        anyhow::Error::new(ShellError::Startup).context(output)
    })?;

    let config = Config::load();
    log::debug!("starting with {config:?}");
    let mut sh = Interpreter::from_config(&config);

    let mut source: Box<dyn LineSource> = match &args.batch {
        Some(path) => Box::new(Batch::open(Path::new(path))?),
        None => Box::new(Interactive::new(config.prompt.clone())?),
    };
    sh.run(source.as_mut()).context("reading commands")?;
    Ok(())
}
