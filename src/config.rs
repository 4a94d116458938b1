//! # Feed configuration
//!
//! Feed metadata lives in an optional JSON file, checked at a short search
//! path: `/etc/podfy.conf`, then `$HOME/.podfy.conf`, then `./podfy.conf`.
//! The first file that exists wins. A file that exists but can't be read or
//! parsed is a startup error; no file at all just means the zero-valued
//! configuration.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Feed metadata, loaded once at startup and read-only afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the feed and its file links are advertised under.
    pub feed_url: String,
    pub feed_title: String,
    pub feed_description: String,
    /// Goes into the channel's `managingEditor` element when non-empty.
    pub feed_owner: String,
    pub feed_image_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("couldn't parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The well-known locations a `podfy.conf` is looked for, in order.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/podfy.conf")];
    if let Some(dirs) = BaseDirs::new() {
        paths.push(dirs.home_dir().join(".podfy.conf"));
    }
    paths.push(PathBuf::from("./podfy.conf"));
    paths
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Config::load_from(&search_paths())
    }

    /// Loads the first configuration file found among `paths`.
    pub fn load_from(paths: &[PathBuf]) -> Result<Config, ConfigError> {
        for path in paths {
            let raw = match fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ConfigError::Read {
                        path: path.clone(),
                        source,
                    })
                }
            };

            return serde_json::from_str(&raw).map_err(|source| {
                ConfigError::Parse {
                    path: path.clone(),
                    source,
                }
            });
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn no_file_found_yields_zero_config() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("podfy.conf")];

        let config = Config::load_from(&paths).unwrap();
        assert_eq!(config.feed_url, "");
        assert_eq!(config.feed_title, "");
    }

    #[test]
    fn first_found_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.conf");
        let first = dir.path().join("first.conf");
        let second = dir.path().join("second.conf");
        fs::write(&first, r#"{"feed_title": "first"}"#).unwrap();
        fs::write(&second, r#"{"feed_title": "second"}"#).unwrap();

        let config =
            Config::load_from(&[missing, first, second]).unwrap();
        assert_eq!(config.feed_title, "first");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podfy.conf");
        fs::write(
            &path,
            r#"{"feed_url": "http://media.example.com", "unknown_key": 1}"#,
        )
        .unwrap();

        let config = Config::load_from(&[path]).unwrap();
        assert_eq!(config.feed_url, "http://media.example.com");
        assert_eq!(config.feed_owner, "");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podfy.conf");
        fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&[path.clone()]).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other}"),
        }
    }
}
