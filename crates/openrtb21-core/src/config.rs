use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct CodecConfig {
    /// Inbound documents longer than this are rejected before parsing.
    #[validate(range(min = 1))]
    pub max_document_bytes: usize,
    /// Run required-field validation on every decoded document.
    pub validate_on_decode: bool,
    pub pretty: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 64 * 1024,
            validate_on_decode: true,
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub codec: CodecConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation error: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_parse_full_codec_section() {
        let toml_str = "[codec]\nmax_document_bytes = 2048\nvalidate_on_decode = false\npretty = true\n";
        let settings = Settings::from_toml_str(toml_str).expect("should parse valid config");
        assert_eq!(settings.codec.max_document_bytes, 2048);
        assert!(!settings.codec.validate_on_decode);
        assert!(settings.codec.pretty);
    }

    #[test]
    fn settings_fill_missing_keys_with_defaults() {
        let settings = Settings::from_toml_str("[codec]\npretty = true\n").unwrap();
        assert_eq!(settings.codec.max_document_bytes, 64 * 1024);
        assert!(settings.codec.validate_on_decode);

        let settings = Settings::from_toml_str("").unwrap();
        assert!(!settings.codec.pretty);
    }

    #[test]
    fn settings_reject_wrong_types() {
        let err = Settings::from_toml_str("[codec]\npretty = \"yes\"\n")
            .err()
            .expect("should error");
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {}", err);
        assert!(err.to_string().contains("toml parse error"));
    }

    #[test]
    fn settings_validate_document_limit() {
        let err = Settings::from_toml_str("[codec]\nmax_document_bytes = 0\n")
            .err()
            .expect("should error");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {}", err);
        // error originates from validator; don't rely on exact text
        assert!(err.to_string().to_lowercase().contains("valid"));
    }
}
