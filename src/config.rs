use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::ConfigResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Treat a payload that is not a JSON array as a single argument.
    #[serde(default = "default_true")]
    pub single_value_fallback: bool,

    /// Reject payloads longer than this many bytes before parsing.
    #[serde(default)]
    pub max_payload_bytes: Option<usize>,

    /// Log every raw argument fragment at trace level.
    #[serde(default)]
    pub trace_arguments: bool,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            single_value_fallback: default_true(),
            max_payload_bytes: None,
            trace_arguments: false,
        }
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> ConfigResult<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> ConfigResult<T> {
    let config = serde_json::from_str(s)?;
    Ok(config)
}

// デフォルト値の定義
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: InvokerConfig = from_str("{}").unwrap();
        assert_eq!(config, InvokerConfig::default());
        assert!(config.single_value_fallback);
        assert_eq!(config.max_payload_bytes, None);
    }

    #[test]
    fn test_partial_override() {
        let config: InvokerConfig =
            from_str(r#"{"single_value_fallback": false, "max_payload_bytes": 64}"#).unwrap();
        assert!(!config.single_value_fallback);
        assert_eq!(config.max_payload_bytes, Some(64));
        assert!(!config.trace_arguments);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"trace_arguments": true}}"#).unwrap();

        let config: InvokerConfig = from_file(file.path()).unwrap();
        assert!(config.trace_arguments);
        assert!(config.single_value_fallback);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: ConfigResult<InvokerConfig> = from_file("/nonexistent/byname.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let result: ConfigResult<InvokerConfig> = from_str("{single_value_fallback}");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
