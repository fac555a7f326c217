use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Name of the environment variable that overrides the interpreter home.
pub const HOME_ENV: &str = "EPL_HOME";

/// Locations of everything the interpreter keeps on disk.
///
/// All paths derive from one home directory: installed modules live under
/// `libraries/`, and the verbosity flag, logs and module registry sit next
/// to it.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use epl::config::Config;
///
/// let config = Config::new("/opt/epl");
/// assert_eq!(config.libraries_dir(), Path::new("/opt/epl/libraries"));
/// assert_eq!(config.registry_file(), Path::new("/opt/epl/epl_modules.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    home: PathBuf,
}

impl Config {
    /// Creates a configuration rooted at `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Resolves the home directory: an explicit choice (the `--home` flag or
    /// [`HOME_ENV`]) wins, otherwise the directory holding the running
    /// executable.
    ///
    /// # Errors
    /// Fails only when no home was given and the executable's own path
    /// cannot be determined.
    pub fn resolve(home: Option<PathBuf>) -> io::Result<Self> {
        if let Some(home) = home {
            return Ok(Self::new(home));
        }

        let exe = env::current_exe()?;
        let dir = exe.parent()
                     .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self::new(dir))
    }

    /// The interpreter home.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Where installed modules live; bareword `use` targets resolve here.
    #[must_use]
    pub fn libraries_dir(&self) -> PathBuf {
        self.home.join("libraries")
    }

    /// The persisted verbosity flag.
    #[must_use]
    pub fn verbose_file(&self) -> PathBuf {
        self.home.join("isverbose.txt")
    }

    /// The log written while verbose.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.home.join("log.txt")
    }

    /// Captured `git` diagnostics from the last install.
    #[must_use]
    pub fn git_log_file(&self) -> PathBuf {
        self.home.join("gitlog.txt")
    }

    /// The JSON registry of installed module metadata.
    #[must_use]
    pub fn registry_file(&self) -> PathBuf {
        self.home.join("epl_modules.json")
    }
}
