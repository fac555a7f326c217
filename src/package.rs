use crate::{error::PackageError, package::spec::PackageSpec};

/// Parsing of `author/repo` package specifications.
pub mod spec;
/// The `epl_modules.json` registry of installed module metadata.
pub mod registry;
/// The `git`-backed package manager.
///
/// Clones a module repository into the library directory, installs its
/// requirements, picks the directory for the running system and runs its
/// install script.
pub mod git;

/// Installs and removes library modules.
pub trait PackageManager {
    /// Installs the module described by `spec`, replacing any installed
    /// module of the same name.
    ///
    /// # Errors
    /// `PackageError::InvalidName` for a name that could point outside the
    /// library directory, or any failure while fetching, preparing or
    /// registering the module.
    fn install(&mut self, spec: &PackageSpec) -> Result<(), PackageError>;

    /// Removes an installed module. `name` may be given as `author/name`.
    ///
    /// # Errors
    /// `PackageError::InvalidName` if the name could point outside the
    /// library directory, `PackageError::NotInstalled` if there is no such
    /// module.
    fn uninstall(&mut self, name: &str) -> Result<(), PackageError>;
}

/// The directory a module ships for the running system: `Linux`, `Darwin`
/// or `Windows`, and `UnknownSystem` everywhere else.
#[must_use]
pub fn system_dir_name() -> &'static str {
    system_dir_for(std::env::consts::OS)
}

/// Maps a Rust target OS name to a module system directory.
#[must_use]
pub fn system_dir_for(os: &str) -> &'static str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        _ => UNKNOWN_SYSTEM,
    }
}

/// The fallback system directory.
pub const UNKNOWN_SYSTEM: &str = "UnknownSystem";

/// Files merged into the chosen system directory whatever the system.
pub const ANY_SYSTEM: &str = "AnySystem";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systems_map_to_their_directories() {
        assert_eq!(system_dir_for("linux"), "Linux");
        assert_eq!(system_dir_for("macos"), "Darwin");
        assert_eq!(system_dir_for("windows"), "Windows");
        assert_eq!(system_dir_for("freebsd"), "UnknownSystem");
    }
}
