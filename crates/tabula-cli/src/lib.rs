//! Command-line runtime for the Tabula table server client.
//!
//! The runtime peels configuration flags off the argument list, loads the
//! layered configuration, installs telemetry, runs one subcommand through
//! [`tabula_client::Client`] and prints the resulting table as JSON. IO
//! streams and the configuration loader are injectable so the whole flow can
//! be driven from tests.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tabula_client::{Client, Table};
use tabula_config::Config;

mod cli;
mod command;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
use command::{Outcome, execute};
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match self.try_run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                // Help and version output are successful runs.
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn try_run(&mut self, args: &[OsString]) -> Result<(), AppError> {
        let split = split_config_arguments(args);
        let cli = Cli::try_parse_from(&split.command_arguments).map_err(AppError::CliUsage)?;
        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;

        let client = Client::new(config.connection()?);
        match execute(cli.command, &client, config.session_id())? {
            Outcome::Alive => {
                writeln!(self.io.stdout, "{} is reachable", server_label(&config))
                    .map_err(AppError::WriteOutput)?;
            }
            Outcome::Table(table) => write_table(&mut *self.io.stdout, &table)?,
        }
        self.io.stdout.flush().map_err(AppError::WriteOutput)
    }
}

fn server_label(config: &Config) -> &str {
    config.server.trim_end_matches('/')
}

fn write_table<W: Write>(stdout: &mut W, table: &Table) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *stdout, table).map_err(AppError::SerialiseTable)?;
    stdout.write_all(b"\n").map_err(AppError::WriteOutput)
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

#[cfg(test)]
mod tests;
