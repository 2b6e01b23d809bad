use crate::error::{Result, TsError};
use crate::format::ts::Pid;
use lazy_static::lazy_static;
use log::warn;
use parking_lot::RwLock;
use std::env;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::load());
}

const CONFIG_PATHS: [&str; 2] = ["./tsframe.toml", "./tsframe_config.toml"];

/// Crate-wide settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// First PID handed out by [`TrackRegistry::from_config`](crate::format::ts::TrackRegistry::from_config)
    pub first_elementary_pid: Pid,
    /// Whether the chunked parser runs a continuity check per PID
    pub continuity_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_elementary_pid: Pid::from_wire(0x100),
            continuity_check: true,
        }
    }
}

impl Config {
    /// Defaults, then environment variables, then the first config file found.
    /// Falls back to defaults when a source holds an invalid value.
    fn load() -> Self {
        match Self::from_sources() {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring configuration: {}", e);
                Config::default()
            }
        }
    }

    pub fn from_sources() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(value) = env::var("TSFRAME_FIRST_PID") {
            config.apply("first_elementary_pid", &value)?;
        }
        if let Ok(value) = env::var("TSFRAME_CONTINUITY_CHECK") {
            config.apply("continuity_check", &value)?;
        }

        for path in &CONFIG_PATHS {
            if Path::new(path).exists() {
                let content = fs::read_to_string(path)?;
                config.apply_file(&content)?;
                break;
            }
        }

        Ok(config)
    }

    /// Applies `key = value` lines; `#` starts a comment.
    pub fn apply_file(&mut self, content: &str) -> Result<()> {
        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| TsError::InvalidConfig(format!("expected key = value: {}", line)))?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            self.apply(key.trim(), value)?;
        }
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "first_elementary_pid" => {
                let raw = parse_u16(value)
                    .ok_or_else(|| TsError::InvalidConfig(format!("not a pid: {}", value)))?;
                self.first_elementary_pid = Pid::new(raw)?;
            }
            "continuity_check" => {
                self.continuity_check = match value {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => {
                        return Err(TsError::InvalidConfig(format!(
                            "not a boolean: {}",
                            value
                        )))
                    }
                };
            }
            _ => return Err(TsError::InvalidConfig(format!("unknown key: {}", key))),
        }
        Ok(())
    }
}

fn parse_u16(value: &str) -> Option<u16> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Re-reads all configuration sources
pub fn reload() {
    *CONFIG.write() = Config::load();
}

/// Returns a snapshot of the current configuration
pub fn current() -> Config {
    CONFIG.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_file() {
        let mut config = Config::default();
        config
            .apply_file(
                r#"# tsframe settings
first_elementary_pid = "0x0200"
continuity_check = false # disable
"#,
            )
            .unwrap();

        assert_eq!(config.first_elementary_pid.value(), 0x200);
        assert!(!config.continuity_check);
    }

    #[test]
    fn test_apply_file_decimal_pid() {
        let mut config = Config::default();
        config.apply_file("first_elementary_pid = 4096").unwrap();
        assert_eq!(config.first_elementary_pid.value(), 0x1000);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_file("first_elementary_pid = 0x2000"),
            Err(TsError::InvalidPid(0x2000))
        ));
        assert!(matches!(
            config.apply_file("continuity_check = maybe"),
            Err(TsError::InvalidConfig(_))
        ));
        assert!(matches!(
            config.apply_file("unknown = 1"),
            Err(TsError::InvalidConfig(_))
        ));
        assert!(config.apply_file("no separator").is_err());
    }
}
