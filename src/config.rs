use crate::error::{AppError, Result};
use crate::i18n::Locale;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "taskboard-tui";

// On-disk shape of config.toml; every key is optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    instance_url: Option<String>,
    api_key: Option<String>,
    locale: Option<String>,
    log_dir: Option<PathBuf>,
    default_board: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub instance_url: String,
    pub api_key: String,
    pub locale: Locale,
    pub log_dir: PathBuf,
    /// Board opened on startup instead of the board list
    pub default_board: Option<u64>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
        .join("logs")
}

impl Config {
    /// Reads `.env`, the config file and the environment, later sources winning.
    ///
    /// `TASKBOARD_CONFIG` points at an alternative config file.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();
        let path = env::var("TASKBOARD_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(default_config_path);
        let file = match path {
            Some(path) => read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| env::var(key).ok())
    }

    fn resolve(file: FileConfig, var: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let instance_url = var("INSTANCE_URL")
            .or(file.instance_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("INSTANCE_URL not set".to_string()))?;
        let api_key = var("API_KEY")
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config("API_KEY not set".to_string()))?;

        let locale = match var("TASKBOARD_LOCALE").or(file.locale) {
            Some(code) => Locale::from_code(&code)
                .ok_or_else(|| AppError::Config(format!("unsupported locale '{}'", code)))?,
            None => Locale::default(),
        };

        let log_dir = var("TASKBOARD_LOG_DIR")
            .map(PathBuf::from)
            .or(file.log_dir)
            .unwrap_or_else(default_log_dir);

        Ok(Config {
            instance_url: instance_url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            locale,
            log_dir,
            default_board: file.default_board,
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            instance_url: Some("https://file.example".to_string()),
            api_key: Some("file-key".to_string()),
            ..FileConfig::default()
        };
        let config = Config::resolve(
            file,
            vars(&[("INSTANCE_URL", "https://env.example/")]),
        )
        .unwrap();
        assert_eq!(config.instance_url, "https://env.example");
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let result = Config::resolve(
            FileConfig::default(),
            vars(&[("INSTANCE_URL", "https://boards.example")]),
        );
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("API_KEY")));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let result = Config::resolve(
            FileConfig::default(),
            vars(&[
                ("INSTANCE_URL", "https://boards.example"),
                ("API_KEY", "k"),
                ("TASKBOARD_LOCALE", "xx"),
            ]),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "instance_url = \"https://boards.example\"\napi_key = \"secret\"\nlocale = \"de\"\ndefault_board = 4\nlog_dir = \"/tmp/tb-logs\""
        )
        .unwrap();
        let parsed = read_file_config(file.path()).unwrap();
        let config = Config::resolve(parsed, vars(&[])).unwrap();
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.default_board, Some(4));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/tb-logs"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let parsed = read_file_config(&dir.path().join("absent.toml")).unwrap();
        assert!(parsed.instance_url.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "instance_url = ").unwrap();
        assert!(matches!(
            read_file_config(file.path()),
            Err(AppError::Toml(_))
        ));
    }
}
