use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::DEFAULT_PAGE_SIZE;
use crate::error::{OutlookError, Result};

/// Optional settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "outlook.json";

pub const ENV_DATA_DIR: &str = "OUTLOOK_DATA_DIR";
pub const ENV_PAGE_SIZE: &str = "OUTLOOK_PAGE_SIZE";
pub const ENV_EXPORT_DIR: &str = "OUTLOOK_EXPORT_DIR";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory searched for the CDF / PDF spreadsheets.
    pub data_dir: PathBuf,
    /// Rows per browse page, at least 1.
    pub page_size: usize,
    /// Starting directory for save dialogs.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: None,
        }
    }
}

/// On-disk shape of [`SETTINGS_FILE`]. Every field is optional.
///
/// ```json
/// { "data_dir": "data", "page_size": 50, "export_dir": "/tmp/exports" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    data_dir: Option<PathBuf>,
    page_size: Option<usize>,
    export_dir: Option<PathBuf>,
}

impl Config {
    /// Defaults, then `outlook.json`, then environment, then the first CLI
    /// argument as data directory.
    pub fn load() -> Result<Config> {
        Self::resolve(
            Path::new(SETTINGS_FILE),
            |key| std::env::var(key).ok(),
            std::env::args_os().nth(1).map(PathBuf::from),
        )
    }

    pub fn resolve(
        settings_path: &Path,
        env: impl Fn(&str) -> Option<String>,
        data_dir_arg: Option<PathBuf>,
    ) -> Result<Config> {
        let mut config = Config::default();

        if settings_path.is_file() {
            let text = std::fs::read_to_string(settings_path)?;
            let settings: SettingsFile = serde_json::from_str(&text).map_err(|e| {
                OutlookError::Config(format!("{}: {e}", settings_path.display()))
            })?;
            if let Some(dir) = settings.data_dir {
                config.data_dir = dir;
            }
            if let Some(size) = settings.page_size {
                config.page_size = size;
            }
            if settings.export_dir.is_some() {
                config.export_dir = settings.export_dir;
            }
        }

        if let Some(dir) = env(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = env(ENV_PAGE_SIZE).filter(|v| !v.is_empty()) {
            config.page_size = raw.trim().parse().map_err(|_| {
                OutlookError::Config(format!("{ENV_PAGE_SIZE}={raw:?} is not a whole number"))
            })?;
        }
        if let Some(dir) = env(ENV_EXPORT_DIR).filter(|v| !v.is_empty()) {
            config.export_dir = Some(PathBuf::from(dir));
        }

        if let Some(dir) = data_dir_arg {
            config.data_dir = dir;
        }

        config.page_size = config.page_size.max(1);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(&dir.path().join(SETTINGS_FILE), env_from(&[]), None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn env_and_argument_override_the_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &settings,
            r#"{ "data_dir": "from-file", "page_size": 50, "export_dir": "exports" }"#,
        )
        .unwrap();

        let from_file = Config::resolve(&settings, env_from(&[]), None).unwrap();
        assert_eq!(from_file.data_dir, PathBuf::from("from-file"));
        assert_eq!(from_file.page_size, 50);
        assert_eq!(from_file.export_dir, Some(PathBuf::from("exports")));

        let overridden = Config::resolve(
            &settings,
            env_from(&[(ENV_DATA_DIR, "from-env"), (ENV_PAGE_SIZE, "10")]),
            Some(PathBuf::from("from-arg")),
        )
        .unwrap();
        assert_eq!(overridden.data_dir, PathBuf::from("from-arg"));
        assert_eq!(overridden.page_size, 10);
        assert_eq!(overridden.export_dir, Some(PathBuf::from("exports")));
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(
            &dir.path().join(SETTINGS_FILE),
            env_from(&[(ENV_PAGE_SIZE, "0")]),
            None,
        )
        .unwrap();
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn bad_page_size_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(
            &dir.path().join(SETTINGS_FILE),
            env_from(&[(ENV_PAGE_SIZE, "twenty")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, OutlookError::Config(_)));
    }

    #[test]
    fn unknown_settings_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE);
        std::fs::write(&settings, r#"{ "page_sise": 5 }"#).unwrap();
        let err = Config::resolve(&settings, env_from(&[]), None).unwrap_err();
        assert!(matches!(err, OutlookError::Config(ref m) if m.contains("page_sise")));
    }
}
