use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};

use crate::codec::DecodeMode;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug)]
pub struct CodecConfig {
    pub encoding: &'static Encoding,
    pub mode: DecodeMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            mode: DecodeMode::Lenient,
        }
    }
}

impl CodecConfig {
    /// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `sjis`.
    pub fn for_label(label: &str) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))?;
        Ok(Self {
            encoding,
            ..Self::default()
        })
    }

    pub fn with_mode(self, mode: DecodeMode) -> Self {
        Self { mode, ..self }
    }
}

/// File form of [`CodecConfig`].
///
/// ```json
/// { "encoding": "windows-1252", "strict": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecSettings {
    pub encoding: String,
    pub strict: bool,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            strict: false,
        }
    }
}

impl CodecSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_config(&self) -> Result<CodecConfig, ConfigError> {
        let mode = if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        };
        Ok(CodecConfig::for_label(&self.encoding)?.with_mode(mode))
    }
}
