use crate::error::PackageError;

/// Returns `true` if `name` can be used as an author or module name.
///
/// Names become directory names under the library directory, so they are
/// limited to ASCII letters, digits, `-`, `_` and `.`, and may not consist
/// of dots only.
///
/// # Example
/// ```
/// use epl::package::spec::is_valid_name;
///
/// assert!(is_valid_name("turtle-graphics_2.0"));
/// assert!(!is_valid_name(".."));
/// assert!(!is_valid_name("a\\b"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
    && !name.chars().all(|c| c == '.')
    && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// A module to install: a repository named `author/name`, optionally on a
/// host other than GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// The repository owner.
    pub author: String,
    /// The repository name, which is also the installed module's name.
    pub name:   String,
    /// A git host such as `gitlab.com`. `None` means GitHub.
    pub host:   Option<String>,
}

impl PackageSpec {
    /// Parses `author/name`.
    ///
    /// # Errors
    /// `PackageError::InvalidSpec` unless the spec is exactly two parts
    /// separated by `/`, each of them a valid name (see [`is_valid_name`]).
    ///
    /// # Example
    /// ```
    /// use epl::package::spec::PackageSpec;
    ///
    /// let spec = PackageSpec::parse("ada/turtle", None).unwrap();
    /// assert_eq!(spec.name, "turtle");
    /// assert_eq!(spec.url(), "https://github.com/ada/turtle.git");
    ///
    /// let spec = PackageSpec::parse("ada/turtle", Some("gitlab.com")).unwrap();
    /// assert_eq!(spec.url(), "https://gitlab.com/ada/turtle");
    ///
    /// assert!(PackageSpec::parse("turtle", None).is_err());
    /// ```
    pub fn parse(spec: &str, host: Option<&str>) -> Result<Self, PackageError> {
        let invalid = || PackageError::InvalidSpec { spec: spec.to_string() };

        let (author, name) = spec.trim().split_once('/').ok_or_else(invalid)?;
        if !is_valid_name(author) || !is_valid_name(name) {
            return Err(invalid());
        }

        Ok(Self { author: author.to_string(),
                  name:   name.to_string(),
                  host:   host.map(str::to_string), })
    }

    /// The URL `git clone` is given.
    #[must_use]
    pub fn url(&self) -> String {
        match &self.host {
            Some(host) => format!("https://{host}/{}/{}", self.author, self.name),
            None => format!("https://github.com/{}/{}.git", self.author, self.name),
        }
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_specs_are_rejected() {
        for spec in
            ["", "/", "ada/", "/turtle", "a/b/c", "ada/..", "ada/.", "../turtle", "ada/tur\\tle"]
        {
            assert!(matches!(PackageSpec::parse(spec, None), Err(PackageError::InvalidSpec { .. })),
                    "{spec:?} should be rejected");
        }
    }

    #[test]
    fn names_stay_inside_the_library_directory() {
        assert!(is_valid_name("turtle"));
        assert!(is_valid_name("my.module"));
        for name in ["", ".", "..", "...", "a/b", "a\\b", "c:", "tur tle"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn display_is_the_short_form() {
        let spec = PackageSpec::parse(" ada/turtle ", Some("example.org")).unwrap();
        assert_eq!(spec.to_string(), "ada/turtle");
    }
}
