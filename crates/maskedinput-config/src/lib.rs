use maskedinput_control::MaskedInputProps;
use maskedinput_engine::{FormatCharacterSpec, FormatOverrides, MaskError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{setting} must be a single character, got {value:?}")]
    NotASingleCharacter {
        setting: &'static str,
        value: String,
    },

    #[error("Invalid format character {format_char:?}: {source}")]
    InvalidFormatCharacter {
        format_char: char,
        source: MaskError,
    },
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

/// One masked field as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub mask: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_char: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_format_characters: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub format_characters: BTreeMap<String, FormatCharacterSpec>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/maskedinput");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }
}

impl FieldConfig {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            ..Self::default()
        }
    }

    pub fn placeholder_char(&self) -> Result<Option<char>, ConfigError> {
        self.placeholder_char
            .as_deref()
            .map(|value| single_char("placeholder_char", value))
            .transpose()
    }

    /// Custom format characters compiled for the mask engine.
    pub fn format_overrides(&self) -> Result<FormatOverrides, ConfigError> {
        let mut overrides = FormatOverrides::new();
        for disabled in &self.disabled_format_characters {
            overrides.disable(single_char("disabled_format_characters", disabled)?);
        }
        for (key, spec) in &self.format_characters {
            let format_char = single_char("format_characters", key)?;
            let definition = spec
                .compile(format_char)
                .map_err(|source| ConfigError::InvalidFormatCharacter {
                    format_char,
                    source,
                })?;
            overrides.set(format_char, definition);
        }
        Ok(overrides)
    }

    pub fn props(&self) -> Result<MaskedInputProps, ConfigError> {
        Ok(MaskedInputProps {
            mask: self.mask.clone(),
            format_characters: self.format_overrides()?,
            placeholder_char: self.placeholder_char()?,
            value: self.value.clone(),
            size: self.size,
            placeholder: self.placeholder.clone(),
        })
    }
}

fn single_char(setting: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::NotASingleCharacter {
            setting,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskedinput_engine::Transform;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const PHONE_FIELD: &str = r#"
[fields.phone]
mask = "(999) 999-9999"
placeholder_char = " "
size = 16
placeholder = "phone number"

[fields.serial]
mask = "XXXX-XXXX"
disabled_format_characters = ["a"]

[fields.serial.format_characters.X]
validate = "[0-9A-Fa-f]"
transform = "uppercase"
"#;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/maskedinput/config.toml"));
    }

    #[test]
    fn test_parse_fields() {
        let config: Config = toml::from_str(PHONE_FIELD).unwrap();

        let phone = config.field("phone").unwrap();
        assert_eq!(phone.mask, "(999) 999-9999");
        assert_eq!(phone.placeholder_char().unwrap(), Some(' '));
        assert_eq!(phone.size, Some(16));
        assert_eq!(phone.value, "");

        let serial = config.field("serial").unwrap();
        assert_eq!(
            serial.format_characters["X"],
            FormatCharacterSpec {
                validate: "[0-9A-Fa-f]".to_string(),
                transform: Some(Transform::Uppercase),
            }
        );
        assert!(config.field("missing").is_none());
    }

    #[test]
    fn test_props_from_field() {
        let config: Config = toml::from_str(PHONE_FIELD).unwrap();
        let props = config.field("serial").unwrap().props().unwrap();

        assert_eq!(props.mask, "XXXX-XXXX");
        assert!(!props.format_characters.is_empty());
        assert_eq!(props.placeholder_char, None);
    }

    #[test]
    fn test_multi_character_placeholder_is_rejected() {
        let field = FieldConfig {
            placeholder_char: Some("__".to_string()),
            ..FieldConfig::new("999")
        };

        let err = field.placeholder_char().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotASingleCharacter {
                setting: "placeholder_char",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_validator_is_reported() {
        let mut field = FieldConfig::new("XX");
        field.format_characters.insert(
            "X".to_string(),
            FormatCharacterSpec {
                validate: "[".to_string(),
                transform: None,
            },
        );

        let err = field.format_overrides().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFormatCharacter { format_char: 'X', .. }
        ));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[fields.phone]\nsize = 3\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.fields.insert(
            "zip".to_string(),
            FieldConfig {
                value: "12345".to_string(),
                ..FieldConfig::new("99999")
            },
        );

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
