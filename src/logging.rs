use std::{
    fs::{self, File},
    io,
    sync::Mutex,
};

use tracing_subscriber::{EnvFilter, fmt::writer::MakeWriterExt};

use crate::config::Config;

/// Environment variable holding a `tracing` filter directive, e.g.
/// `EPL_LOG=epl::package=debug`. Only read while verbose logging is on.
pub const LOG_FILTER_ENV: &str = "EPL_LOG";

/// Installs the global `tracing` subscriber if `config`'s verbosity flag is
/// on.
///
/// Events at `debug` and above are printed to stderr and written to the log
/// file, which is truncated first. While the flag is off no subscriber is
/// installed and every event is dropped.
///
/// # Errors
/// Fails if the log file cannot be created or another subscriber is already
/// installed.
pub fn init(config: &Config) -> io::Result<()> {
    if !is_verbose(config) {
        return Ok(());
    }

    let sink = File::create(config.log_file())?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_ansi(false)
                             .with_writer(io::stderr.and(Mutex::new(sink)))
                             .try_init()
                             .map_err(io::Error::other)
}

/// Reads the persisted verbosity flag. A missing or unreadable flag file
/// means "not verbose".
#[must_use]
pub fn is_verbose(config: &Config) -> bool {
    fs::read_to_string(config.verbose_file()).is_ok_and(|flag| flag.trim() == "True")
}

/// Persists the verbosity flag as `True` or `False`.
///
/// # Errors
/// Fails if the home directory or the flag file cannot be written.
pub fn set_verbose(config: &Config, verbose: bool) -> io::Result<()> {
    fs::create_dir_all(config.home())?;
    fs::write(config.verbose_file(), if verbose { "True" } else { "False" })
}
