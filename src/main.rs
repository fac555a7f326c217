use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser, Subcommand};
use epl::{
    config::{Config, HOME_ENV},
    logging::{self, set_verbose},
    package::{PackageManager, git::GitPackageManager, spec::PackageSpec},
    run_repl, run_script,
};
use tracing::error;

/// EPL is a small, line-oriented scripting language for learning to
/// program. Run a script, or start an interactive prompt with no arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    /// Directory holding installed libraries, logs and the module registry.
    /// Defaults to the directory of the epl executable.
    #[arg(long, env = HOME_ENV, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// The EPL script to run.
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Installs a library module from its git repository.
    #[command(visible_aliases = ["download", "i", "d"])]
    Install {
        /// Clone from this host instead of GitHub.
        #[arg(long)]
        host: Option<String>,

        /// The repository, as <author>/<repo>.
        spec: String,
    },
    /// Removes an installed library module.
    #[command(visible_aliases = ["undownload", "ui", "ud"])]
    Uninstall {
        /// The module, as <name> or <author>/<name>.
        name: String,
    },
    /// Turns diagnostic logging on or off.
    #[command(visible_alias = "v")]
    Verbose {
        /// `true` or `false`.
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::resolve(args.home)?;
    if let Err(e) = logging::init(&config) {
        eprintln!("Logging is unavailable: {e}");
    }

    match args.command {
        Some(Command::Install { host, spec }) => {
            let spec = PackageSpec::parse(&spec, host.as_deref())?;
            GitPackageManager::new(config).install(&spec)?;
        },
        Some(Command::Uninstall { name }) => GitPackageManager::new(config).uninstall(&name)?,
        Some(Command::Verbose { enabled }) => set_verbose(&config, enabled)?,
        None => match args.file {
            Some(path) => run_script(&path, &config)?,
            None => run_repl(&config)?,
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
