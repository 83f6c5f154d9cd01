use crate::error::{MouseMoveError, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Имя файла конфигурации по умолчанию
pub const DEFAULT_CONFIG_FILE: &str = "mouse_move.yaml";

/// Минимальная пауза между циклами: `delay_seconds: 0` не должен превращаться в busy-loop
pub const MIN_DELAY: Duration = Duration::from_millis(500);

const ENV_PREFIX: &str = "MOUSE_MOVE_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "yaml_bool")]
    pub enabled: bool,
    #[serde(deserialize_with = "yaml_bool")]
    pub debug: bool,
    pub delay_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            delay_seconds: 60,
        }
    }
}

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, поверх них YAML-файл,
    /// поверх файла переменные окружения `MOUSE_MOVE_*`.
    ///
    /// Ошибка чтения файла возвращается как `ConfigRead` (вызывающий решает, что делать),
    /// ошибка разбора содержимого как `ConfigParse` (фатальная).
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            MouseMoveError::ConfigRead {
                path: config_path.to_path_buf(),
                source,
            }
        })?;

        Self::from_yaml(&content, config_path)
    }

    fn from_yaml(content: &str, origin: &Path) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        // Пустой документ или `~` - это null, а не словарь; оставляем одни значения по умолчанию
        if !is_null_document(content) {
            figment = figment.merge(Yaml::string(content));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| MouseMoveError::ConfigParse {
                path: origin.to_path_buf(),
                source: Box::new(e),
            })
    }

    /// Пауза до следующего цикла
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds).max(MIN_DELAY)
    }
}

fn is_null_document(content: &str) -> bool {
    content.trim().is_empty()
        || matches!(
            serde_yaml::from_str::<serde_yaml::Value>(content),
            Ok(serde_yaml::Value::Null)
        )
}

/// Литералы YAML 1.1 для булевых значений: кроме true/false принимаются y/n, yes/no, on/off
fn parse_yaml_bool(value: &str) -> Option<bool> {
    match value {
        "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
            Some(true)
        }
        "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
            Some(false)
        }
        _ => None,
    }
}

fn yaml_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    struct YamlBool;

    impl<'de> Visitor<'de> for YamlBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean (true/false, yes/no, on/off, y/n)")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<bool, E> {
            Ok(value)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<bool, E> {
            parse_yaml_bool(value).ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(YamlBool)
}
