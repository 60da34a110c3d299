//! Settings resolution: `~/.config/rmdb/settings.toml`, environment
//! variables and command-line overrides.
//!
//! Each value is resolved through the chain
//!
//! 1. CLI flag (if given)
//! 2. Environment variable
//! 3. `settings.toml`
//! 4. Built-in default

use std::path::{Path, PathBuf};
use std::time::Duration;

use rmdb_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::CliError;

pub(crate) const ENV_DATABASE: &str = "RMDB_DATABASE";
pub(crate) const ENV_API_URL: &str = "RMDB_API_URL";
pub(crate) const ENV_TIMEOUT: &str = "RMDB_TIMEOUT_SECS";

/// Canonical path to the settings file: `~/.config/rmdb/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rmdb").join("settings.toml")
}

/// Default database location: `~/.local/share/rmdb/rmdb.db` on Linux.
pub(crate) fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rmdb")
        .join("rmdb.db")
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    CliFlag,
    EnvVar(&'static str),
    ConfigFile,
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliFlag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Setting<T> {
    pub value: T,
    pub source: SettingSource,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub database: Setting<PathBuf>,
    pub api_url: Setting<String>,
    pub timeout: Setting<Duration>,
}

/// TOML settings file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct SettingsFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl SettingsFile {
    /// The file `config init` writes: every default spelled out.
    pub(crate) fn defaults() -> Self {
        Self {
            database: DatabaseSection {
                path: Some(default_database_path()),
            },
            api: ApiSection {
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                timeout_secs: Some(DEFAULT_TIMEOUT.as_secs()),
            },
        }
    }
}

/// Flags given on the command line.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub database: Option<PathBuf>,
    pub api_url: Option<String>,
}

impl Settings {
    /// Resolve against the process environment and the user's settings file.
    pub(crate) fn load(overrides: Overrides) -> Result<Self, CliError> {
        let file = load_settings_file(&settings_path());
        Self::resolve(overrides, |var| std::env::var(var).ok(), file.as_ref())
    }

    /// Resolve with an explicit environment lookup and settings file.
    pub(crate) fn resolve(
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
        file: Option<&SettingsFile>,
    ) -> Result<Self, CliError> {
        let database = pick(
            overrides.database,
            ENV_DATABASE,
            env(ENV_DATABASE).map(PathBuf::from),
            file.and_then(|f| f.database.path.clone()),
            default_database_path,
        );

        let api_url = pick(
            overrides.api_url,
            ENV_API_URL,
            env(ENV_API_URL),
            file.and_then(|f| f.api.base_url.clone()),
            || DEFAULT_BASE_URL.to_string(),
        );

        let env_timeout = env(ENV_TIMEOUT)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    CliError::config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        ENV_TIMEOUT, raw
                    ))
                })
            })
            .transpose()?;
        let timeout = pick(
            None,
            ENV_TIMEOUT,
            env_timeout.map(Duration::from_secs),
            file.and_then(|f| f.api.timeout_secs).map(Duration::from_secs),
            || DEFAULT_TIMEOUT,
        );

        Ok(Self {
            database,
            api_url,
            timeout,
        })
    }
}

fn pick<T>(
    flag: Option<T>,
    env_var: &'static str,
    from_env: Option<T>,
    from_file: Option<T>,
    default: impl FnOnce() -> T,
) -> Setting<T> {
    if let Some(value) = flag {
        Setting {
            value,
            source: SettingSource::CliFlag,
        }
    } else if let Some(value) = from_env {
        Setting {
            value,
            source: SettingSource::EnvVar(env_var),
        }
    } else if let Some(value) = from_file {
        Setting {
            value,
            source: SettingSource::ConfigFile,
        }
    } else {
        Setting {
            value: default(),
            source: SettingSource::Default,
        }
    }
}

/// Read and parse the settings file. A missing file is `None`; an
/// unparseable one is reported and ignored.
pub(crate) fn load_settings_file(path: &Path) -> Option<SettingsFile> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&contents) {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            None
        }
    }
}

/// Write `file` to `path`, creating parent directories.
///
/// Refuses to replace an existing file unless `force` is set.
pub(crate) fn write_settings_file(
    path: &Path,
    file: &SettingsFile,
    force: bool,
) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(file)
        .map_err(|e| CliError::config(format!("Failed to serialize settings: {}", e)))?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::resolve(Overrides::default(), no_env, None).unwrap();
        assert_eq!(settings.database.value, default_database_path());
        assert_eq!(settings.database.source, SettingSource::Default);
        assert_eq!(settings.api_url.value, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout.value, Duration::from_secs(30));
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let file = SettingsFile {
            database: DatabaseSection {
                path: Some(PathBuf::from("/from/file.db")),
            },
            api: ApiSection {
                base_url: Some("http://file.test/api".to_string()),
                timeout_secs: Some(5),
            },
        };
        let env = |var: &str| match var {
            ENV_DATABASE => Some("/from/env.db".to_string()),
            ENV_API_URL => Some("http://env.test/api".to_string()),
            _ => None,
        };
        let overrides = Overrides {
            database: Some(PathBuf::from("/from/flag.db")),
            api_url: None,
        };

        let settings = Settings::resolve(overrides, env, Some(&file)).unwrap();

        assert_eq!(settings.database.value, PathBuf::from("/from/flag.db"));
        assert_eq!(settings.database.source, SettingSource::CliFlag);
        assert_eq!(settings.api_url.value, "http://env.test/api");
        assert_eq!(settings.api_url.source, SettingSource::EnvVar(ENV_API_URL));
        assert_eq!(settings.timeout.value, Duration::from_secs(5));
        assert_eq!(settings.timeout.source, SettingSource::ConfigFile);
    }

    #[test]
    fn bad_timeout_env_is_an_error() {
        let env = |var: &str| (var == ENV_TIMEOUT).then(|| "soon".to_string());
        let err = Settings::resolve(Overrides::default(), env, None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn settings_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        write_settings_file(&path, &SettingsFile::defaults(), false).unwrap();
        let loaded = load_settings_file(&path).unwrap();

        assert_eq!(loaded.api.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(loaded.api.timeout_secs, Some(30));
        assert!(write_settings_file(&path, &SettingsFile::defaults(), false).is_err());
        assert!(write_settings_file(&path, &SettingsFile::defaults(), true).is_ok());
    }

    #[test]
    fn partial_file_leaves_other_values_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 90\n").unwrap();

        let file = load_settings_file(&path).unwrap();
        let settings = Settings::resolve(Overrides::default(), no_env, Some(&file)).unwrap();

        assert_eq!(settings.timeout.value, Duration::from_secs(90));
        assert_eq!(settings.api_url.source, SettingSource::Default);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(load_settings_file(&path).is_none());
    }
}
