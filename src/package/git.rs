use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, info};

use crate::{
    config::Config,
    error::PackageError,
    interpreter::{console::StdConsole, evaluator::core::Interpreter},
    package::{
        ANY_SYSTEM, PackageManager, UNKNOWN_SYSTEM,
        registry::Registry,
        spec::{PackageSpec, is_valid_name},
        system_dir_name,
    },
};

/// Lists further `author/repo` specs to install first.
pub const REQUIRES_FILE: &str = "requires.txt";
/// Module metadata copied into the registry.
pub const MODULE_INFO_FILE: &str = "module_info.json";
/// Script run once after a module is unpacked.
pub const ON_INSTALL_SCRIPT: &str = "on_install.epl";

/// Installs modules by cloning their git repositories into the library
/// directory.
///
/// A module repository holds one directory per supported system (`Linux`,
/// `Darwin`, `Windows` or the `UnknownSystem` fallback), an optional
/// `AnySystem` directory shared by all of them, and optionally
/// `requires.txt` and `module_info.json` at the top level. After install
/// only the chosen system directory remains, as `libraries/<name>`.
#[derive(Debug, Clone)]
pub struct GitPackageManager {
    config: Config,
    system: &'static str,
}

impl GitPackageManager {
    /// Creates a manager for the running system.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config,
               system: system_dir_name() }
    }

    /// Creates a manager that installs the directory for `system` instead
    /// of the running system's.
    #[must_use]
    pub const fn for_system(config: Config, system: &'static str) -> Self {
        Self { config, system }
    }

    /// Runs `git clone`, writing git's diagnostics to the git log file.
    fn clone_repository(&self, spec: &PackageSpec, target: &Path) -> Result<(), PackageError> {
        let url = spec.url();
        info!("Cloning {url} into {}", target.display());

        let output = Command::new("git").arg("clone").arg(&url).arg(target).output()?;
        let log = self.config.git_log_file();
        fs::write(&log, &output.stderr)?;

        if !output.status.success() {
            return Err(PackageError::CloneFailed { url, log });
        }
        Ok(())
    }

    /// Turns a fresh checkout at `checkout` into an installed module.
    fn finish_install(&mut self, spec: &PackageSpec, checkout: &Path) -> Result<(), PackageError> {
        self.install_requirements(checkout)?;

        let system_dir = match self.select_system_dir(spec, checkout) {
            Ok(dir) => dir,
            Err(e) => {
                fs::remove_dir_all(checkout)?;
                return Err(e);
            },
        };
        merge_any_system(checkout, &system_dir)?;
        self.run_install_script(&system_dir)?;
        self.record_metadata(spec, checkout)?;

        let staged = checkout.with_file_name(format!(".{}-staged", spec.name));
        if staged.exists() {
            fs::remove_dir_all(&staged)?;
        }
        fs::rename(&system_dir, &staged)?;
        fs::remove_dir_all(checkout)?;
        fs::rename(&staged, checkout)?;

        info!("Installed {spec} into {}", checkout.display());
        Ok(())
    }

    /// Installs every non-empty line of `requires.txt`.
    fn install_requirements(&mut self, checkout: &Path) -> Result<(), PackageError> {
        let requires = checkout.join(REQUIRES_FILE);
        if !requires.is_file() {
            return Ok(());
        }

        info!("Installing requirements...");
        for line in fs::read_to_string(requires)?.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let requirement = PackageSpec::parse(line, None)?;
            self.install(&requirement)?;
        }
        Ok(())
    }

    /// Picks the directory for this system, falling back to
    /// `UnknownSystem`.
    fn select_system_dir(&self, spec: &PackageSpec, checkout: &Path) -> Result<PathBuf, PackageError> {
        let native = checkout.join(self.system);
        if native.is_dir() {
            return Ok(native);
        }

        let fallback = checkout.join(UNKNOWN_SYSTEM);
        if fallback.is_dir() {
            debug!("{spec} has no {} directory, using {UNKNOWN_SYSTEM}", self.system);
            return Ok(fallback);
        }

        Err(PackageError::UnsupportedSystem { name:   spec.name.clone(),
                                              system: self.system.to_string(), })
    }

    /// Runs `on_install.epl` from the system directory with a fresh
    /// interpreter, if the module has one.
    fn run_install_script(&self, system_dir: &Path) -> Result<(), PackageError> {
        let script = system_dir.join(ON_INSTALL_SCRIPT);
        if !script.is_file() {
            return Ok(());
        }

        info!("Running {}", script.display());
        let source = fs::read_to_string(&script)?;
        let mut interpreter = Interpreter::new(Box::new(StdConsole), self.config.libraries_dir());
        interpreter.set_file(script.display().to_string());
        interpreter.run_source(&source)?;
        Ok(())
    }

    /// Copies `module_info.json` into the registry.
    fn record_metadata(&self, spec: &PackageSpec, checkout: &Path) -> Result<(), PackageError> {
        let info = checkout.join(MODULE_INFO_FILE);
        if !info.is_file() {
            return Ok(());
        }

        let metadata = serde_json::from_str(&fs::read_to_string(info)?)?;
        let mut registry = Registry::load(self.config.registry_file())?;
        registry.record(spec.name.clone(), metadata);
        registry.save()
    }
}

impl PackageManager for GitPackageManager {
    fn install(&mut self, spec: &PackageSpec) -> Result<(), PackageError> {
        if !is_valid_name(&spec.name) {
            return Err(PackageError::InvalidName { name: spec.name.clone() });
        }

        let libraries = self.config.libraries_dir();
        fs::create_dir_all(&libraries)?;

        let target = libraries.join(&spec.name);
        if target.is_dir() {
            info!("Already installed EPL module. Updating old module...");
            fs::remove_dir_all(&target)?;
        }

        self.clone_repository(spec, &target)?;
        self.finish_install(spec, &target)
    }

    fn uninstall(&mut self, name: &str) -> Result<(), PackageError> {
        let name = name.rsplit('/').next().unwrap_or(name).trim();
        if !is_valid_name(name) {
            return Err(PackageError::InvalidName { name: name.to_string() });
        }

        let path = self.config.libraries_dir().join(name);
        if !path.is_dir() {
            return Err(PackageError::NotInstalled { name: name.to_string() });
        }

        info!("Uninstalling {}", path.display());
        fs::remove_dir_all(&path)?;

        let mut registry = Registry::load(self.config.registry_file())?;
        if registry.remove(name).is_some() {
            registry.save()?;
        }
        Ok(())
    }
}

/// Moves everything in `AnySystem` into the chosen system directory.
fn merge_any_system(checkout: &Path, system_dir: &Path) -> Result<(), PackageError> {
    let shared = checkout.join(ANY_SYSTEM);
    if !shared.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(shared)? {
        let entry = entry?;
        let destination = system_dir.join(entry.file_name());
        if destination.is_dir() {
            fs::remove_dir_all(&destination)?;
        }
        fs::rename(entry.path(), destination)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn checkout(home: &TempDir, name: &str) -> PathBuf {
        let path = home.path().join("libraries").join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn the_system_directory_becomes_the_module() {
        let home = TempDir::new().unwrap();
        let module = checkout(&home, "turtle");
        fs::create_dir_all(module.join("Linux")).unwrap();
        fs::create_dir_all(module.join("Windows")).unwrap();
        fs::create_dir_all(module.join("AnySystem")).unwrap();
        fs::write(module.join("Linux/main.epl"), "speed is 1").unwrap();
        fs::write(module.join("AnySystem/shared.epl"), "colour is 'green'").unwrap();
        fs::write(module.join("module_info.json"), r#"{"version": "2.1"}"#).unwrap();

        let config = Config::new(home.path());
        let spec = PackageSpec::parse("ada/turtle", None).unwrap();
        GitPackageManager::for_system(config.clone(), "Linux").finish_install(&spec, &module)
                                                                .unwrap();

        assert!(module.join("main.epl").is_file());
        assert!(module.join("shared.epl").is_file());
        assert!(!module.join("Windows").exists());
        assert!(!module.join("module_info.json").exists());

        let registry = Registry::load(config.registry_file()).unwrap();
        assert_eq!(registry.get("turtle"), Some(&json!({ "version": "2.1" })));
    }

    #[test]
    fn unknown_systems_use_the_fallback() {
        let home = TempDir::new().unwrap();
        let module = checkout(&home, "plain");
        fs::create_dir_all(module.join("UnknownSystem")).unwrap();
        fs::write(module.join("UnknownSystem/main.epl"), "").unwrap();

        let spec = PackageSpec::parse("ada/plain", None).unwrap();
        GitPackageManager::for_system(Config::new(home.path()), "Linux").finish_install(&spec,
                                                                                       &module)
                                                                        .unwrap();
        assert!(module.join("main.epl").is_file());
    }

    #[test]
    fn unsupported_modules_are_removed() {
        let home = TempDir::new().unwrap();
        let module = checkout(&home, "winonly");
        fs::create_dir_all(module.join("Windows")).unwrap();

        let spec = PackageSpec::parse("ada/winonly", None).unwrap();
        let error = GitPackageManager::for_system(Config::new(home.path()), "Linux")
            .finish_install(&spec, &module)
            .unwrap_err();

        assert!(matches!(error, PackageError::UnsupportedSystem { .. }));
        assert!(!module.exists());
    }

    #[test]
    fn failing_install_scripts_abort_the_install() {
        let home = TempDir::new().unwrap();
        let module = checkout(&home, "broken");
        fs::create_dir_all(module.join("Linux")).unwrap();
        fs::write(module.join("Linux/on_install.epl"), "write 1 / 0").unwrap();

        let spec = PackageSpec::parse("ada/broken", None).unwrap();
        let error = GitPackageManager::for_system(Config::new(home.path()), "Linux")
            .finish_install(&spec, &module)
            .unwrap_err();
        assert!(matches!(error, PackageError::InstallScript(_)));
    }

    #[test]
    fn uninstall_accepts_author_prefixes() {
        let home = TempDir::new().unwrap();
        checkout(&home, "turtle");
        let config = Config::new(home.path());
        let mut registry = Registry::load(config.registry_file()).unwrap();
        registry.record("turtle", json!({}));
        registry.save().unwrap();

        let mut manager = GitPackageManager::new(config.clone());
        manager.uninstall("ada/turtle").unwrap();

        assert!(!config.libraries_dir().join("turtle").exists());
        assert!(Registry::load(config.registry_file()).unwrap().get("turtle").is_none());
        assert!(matches!(manager.uninstall("turtle"), Err(PackageError::NotInstalled { .. })));
    }

    #[test]
    fn hand_built_specs_are_checked_before_touching_the_disk() {
        let home = TempDir::new().unwrap();
        let config = Config::new(home.path());
        let spec = PackageSpec { author: "ada".to_string(),
                                 name:   "..".to_string(),
                                 host:   None, };

        let error = GitPackageManager::new(config.clone()).install(&spec).unwrap_err();
        assert!(matches!(error, PackageError::InvalidName { .. }));
        assert!(!config.libraries_dir().exists());
    }

    #[test]
    fn uninstall_never_leaves_the_library_directory() {
        let home = TempDir::new().unwrap();
        checkout(&home, "turtle");
        let config = Config::new(home.path());
        fs::write(config.verbose_file(), "False").unwrap();

        let mut manager = GitPackageManager::new(config.clone());
        for name in ["..", "ada/..", ".", "", "ada/"] {
            assert!(matches!(manager.uninstall(name), Err(PackageError::InvalidName { .. })),
                    "{name:?} should be rejected");
        }

        assert!(config.verbose_file().is_file());
        assert!(config.libraries_dir().join("turtle").is_dir());
    }
}
