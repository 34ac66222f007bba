use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub itunes: ItunesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItunesConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub country: Option<String>,
}

fn default_endpoint() -> String {
    ITUNES_SEARCH_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    15
}

impl Default for ItunesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            country: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// `RUST_LOG`이 없을 때 쓰는 필터 (예: "moodtune=debug")
    pub level: Option<String>,
}

pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("moodtune")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// 설정 파일을 읽는다. 파일이 없거나 읽을 수 없으면 기본값.
pub fn load_config() -> Config {
    read_config(&config_path())
}

/// 설정을 TOML로 저장한다.
pub fn save_config(config: &Config) -> Result<()> {
    write_config(&config_path(), config)
}

fn read_config(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    // 로깅이 설정보다 늦게 켜지므로 경고는 stderr로 보낸다
    toml::from_str(&content).unwrap_or_else(|e| {
        eprintln!("설정 파일을 해석할 수 없어 기본값을 사용합니다 ({}): {}", path.display(), e);
        Config::default()
    })
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("설정 디렉토리를 만들 수 없습니다: {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(config).context("설정 직렬화에 실패했습니다")?;
    std::fs::write(path, content)
        .with_context(|| format!("설정 파일을 쓸 수 없습니다: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.itunes.endpoint, ITUNES_SEARCH_URL);
        assert_eq!(config.itunes.timeout_secs, 15);
        assert!(config.itunes.country.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str("[itunes]\ncountry = \"kr\"\n").unwrap();
        assert_eq!(config.itunes.country.as_deref(), Some("kr"));
        assert_eq!(config.itunes.timeout_secs, 15);
    }

    #[test]
    fn test_config_survives_save_format() {
        let mut config = Config::default();
        config.logging.level = Some("moodtune=debug".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.logging.level.as_deref(), Some("moodtune=debug"));
        assert_eq!(back.itunes.endpoint, ITUNES_SEARCH_URL);
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("moodtune-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_then_read_config_file() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("config.toml");

        let mut config = Config::default();
        config.itunes.country = Some("kr".to_string());
        config.itunes.timeout_secs = 3;
        write_config(&path, &config).unwrap();

        let back = read_config(&path);
        assert_eq!(back.itunes.country.as_deref(), Some("kr"));
        assert_eq!(back.itunes.timeout_secs, 3);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_config_falls_back_on_missing_or_broken_file() {
        let dir = scratch_dir("broken");
        let path = dir.join("config.toml");
        assert_eq!(read_config(&path).itunes.endpoint, ITUNES_SEARCH_URL);

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[itunes\ntimeout_secs = ").unwrap();
        assert_eq!(read_config(&path).itunes.timeout_secs, 15);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
