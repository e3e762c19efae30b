//! # Configuration
//!
//! gct has exactly one setting: where the data file lives. It is resolved from
//! the environment, first match wins:
//!
//! 1. **`GCT_DATA_FILE`**: used verbatim.
//! 2. **`XDG_DATA_HOME`**: `<XDG_DATA_HOME>/gct/todos.json`.
//! 3. **Home directory** (via the `directories` crate): `~/.local/share/gct/todos.json`.
//! 4. **Nothing else worked**: `./gct/todos.json`, relative to the working directory.
//!
//! Empty variables count as unset. The front end can bypass all of this with
//! an explicit path ([`Config::with_data_file`]).
//!
//! Resolution never touches the filesystem; the repository creates the parent
//! directory on its first write.

use crate::error::{GctError, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_FILE_ENV: &str = "GCT_DATA_FILE";
pub const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";

const APP_DIR: &str = "gct";
const DATA_FILE_NAME: &str = "todos.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Config {
    /// Resolve against the real process environment and home directory.
    pub fn load() -> Result<Self> {
        let base_dirs = BaseDirs::new();
        let home = base_dirs.as_ref().map(|dirs| dirs.home_dir());
        Self::resolve(|key| std::env::var(key).ok(), home)
    }

    /// Pure resolution: `lookup` stands in for the environment.
    pub fn resolve<F>(lookup: F, home: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let data_file = if let Some(path) = non_empty(DATA_FILE_ENV) {
            debug!(source = DATA_FILE_ENV, "resolved data file");
            PathBuf::from(path)
        } else if let Some(xdg) = non_empty(XDG_DATA_HOME_ENV) {
            debug!(source = XDG_DATA_HOME_ENV, "resolved data file");
            Path::new(&xdg).join(APP_DIR).join(DATA_FILE_NAME)
        } else if let Some(home) = home {
            debug!(source = "home", "resolved data file");
            home.join(".local")
                .join("share")
                .join(APP_DIR)
                .join(DATA_FILE_NAME)
        } else {
            debug!(source = "cwd", "resolved data file");
            Path::new(".").join(APP_DIR).join(DATA_FILE_NAME)
        };

        Self::with_data_file(data_file)
    }

    /// Use an explicit path, skipping environment lookup.
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Result<Self> {
        let data_file = data_file.into();
        if data_file.as_os_str().is_empty() {
            return Err(GctError::configuration("data file path is empty"));
        }
        Ok(Self { data_file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_configuration;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_env_var_wins() {
        let config = Config::resolve(
            env(&[(DATA_FILE_ENV, "/tmp/mine.json"), (XDG_DATA_HOME_ENV, "/xdg")]),
            Some(Path::new("/home/u")),
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/mine.json"));
    }

    #[test]
    fn xdg_data_home_is_second() {
        let config = Config::resolve(
            env(&[(XDG_DATA_HOME_ENV, "/xdg")]),
            Some(Path::new("/home/u")),
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/xdg/gct/todos.json"));
    }

    #[test]
    fn home_fallback() {
        let config = Config::resolve(env(&[]), Some(Path::new("/home/u"))).unwrap();
        assert_eq!(
            config.data_file,
            PathBuf::from("/home/u/.local/share/gct/todos.json")
        );
    }

    #[test]
    fn working_directory_fallback_without_home() {
        let config = Config::resolve(env(&[]), None).unwrap();
        assert_eq!(config.data_file, PathBuf::from("./gct/todos.json"));
    }

    #[test]
    fn empty_variables_are_ignored() {
        let config = Config::resolve(
            env(&[(DATA_FILE_ENV, ""), (XDG_DATA_HOME_ENV, "")]),
            Some(Path::new("/home/u")),
        )
        .unwrap();
        assert_eq!(
            config.data_file,
            PathBuf::from("/home/u/.local/share/gct/todos.json")
        );
    }

    #[test]
    fn env_path_is_used_verbatim() {
        let config = Config::resolve(env(&[(DATA_FILE_ENV, "relative/t.json")]), None).unwrap();
        assert_eq!(config.data_file, PathBuf::from("relative/t.json"));
    }

    #[test]
    fn with_data_file_rejects_empty_path() {
        let err = Config::with_data_file("").unwrap_err();
        assert!(is_configuration(&err));
    }
}
