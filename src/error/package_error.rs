use std::path::PathBuf;

use crate::error::EvalError;

#[derive(Debug)]
/// Represents all errors that can occur while installing or removing modules.
pub enum PackageError {
    /// The package specification is not of the form `author/repo`.
    InvalidSpec {
        /// The specification as given.
        spec: String,
    },
    /// A module name that cannot name a directory inside the library
    /// directory, such as `..` or one containing a path separator.
    InvalidName {
        /// The name as given.
        name: String,
    },
    /// `git clone` exited unsuccessfully.
    CloneFailed {
        /// The repository URL.
        url: String,
        /// File the git output was written to.
        log: PathBuf,
    },
    /// The module ships neither a directory for this system nor an
    /// `UnknownSystem` fallback.
    UnsupportedSystem {
        /// The module name.
        name:   String,
        /// The system directory that was looked for.
        system: String,
    },
    /// The module to uninstall is not in the library directory.
    NotInstalled {
        /// The module name.
        name: String,
    },
    /// An `on_install.epl` script failed.
    InstallScript(EvalError),
    /// A filesystem or process operation failed.
    Io(std::io::Error),
    /// The module registry or a `module_info.json` file is not valid JSON.
    Registry(serde_json::Error),
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSpec { spec } => {
                write!(f, "Invalid package \"{spec}\". Expected <author>/<repo>.")
            },
            Self::CloneFailed { url, log } => write!(f,
                                                     "Could not clone {url}. See {} for more details.",
                                                     log.display()),
            Self::UnsupportedSystem { name, system } => write!(f,
                                                               "Module \"{name}\" has no handler for {system}. Please switch systems to use this module."),
            Self::InvalidName { name } => write!(f, "Invalid module name \"{name}\"."),
            Self::NotInstalled { name } => write!(f, "Unknown module \"{name}\"."),
            Self::InstallScript(e) => write!(f, "Install script failed: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Registry(e) => write!(f, "Invalid module registry: {e}"),
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InstallScript(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PackageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PackageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Registry(e)
    }
}

impl From<EvalError> for PackageError {
    fn from(e: EvalError) -> Self {
        Self::InstallScript(e)
    }
}
