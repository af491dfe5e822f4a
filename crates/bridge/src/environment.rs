use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Variable that tells the application's dependency loader which manifest to use.
pub const DEPENDENCY_MANIFEST_VAR: &str = "BUNDLE_GEMFILE";
pub const DEPENDENCY_MANIFEST_FILE: &str = "Gemfile";

/// Working directory plus the full environment handed to one child process.
///
/// Built per invocation from the ambient environment, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEnvironment {
    working_directory: PathBuf,
    vars: BTreeMap<OsString, OsString>,
}

impl ExecutionEnvironment {
    /// Ambient process environment with the manifest pinned to `root`.
    pub fn for_root(root: &Path) -> Self {
        Self::with_ambient(root, std::env::vars_os())
    }

    pub fn with_ambient<I>(root: &Path, ambient: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut vars: BTreeMap<OsString, OsString> = ambient.into_iter().collect();
        vars.insert(
            OsString::from(DEPENDENCY_MANIFEST_VAR),
            root.join(DEPENDENCY_MANIFEST_FILE).into_os_string(),
        );
        Self {
            working_directory: root.to_path_buf(),
            vars,
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn vars(&self) -> &BTreeMap<OsString, OsString> {
        &self.vars
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambient(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn manifest_is_pinned_to_root() {
        let root = Path::new("/srv/app");
        let env = ExecutionEnvironment::with_ambient(
            root,
            ambient(&[("PATH", "/usr/bin"), ("BUNDLE_GEMFILE", "/elsewhere/Gemfile")]),
        );
        assert_eq!(env.working_directory(), root);
        assert_eq!(
            env.get(DEPENDENCY_MANIFEST_VAR),
            Some(OsStr::new("/srv/app/Gemfile"))
        );
        assert_eq!(env.get("PATH"), Some(OsStr::new("/usr/bin")));
        assert_eq!(env.vars().len(), 2);
    }

    #[test]
    fn ambient_environment_is_inherited() {
        let env = ExecutionEnvironment::for_root(Path::new("/srv/app"));
        assert!(env.get(DEPENDENCY_MANIFEST_VAR).is_some());
        if let Some(path) = std::env::var_os("PATH") {
            assert_eq!(env.get("PATH"), Some(path.as_os_str()));
        }
    }
}
