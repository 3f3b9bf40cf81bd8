//! Model configuration — the training-time `config.yaml` beside the weights.
//!
//! The file is the full training configuration; only three keys matter for
//! synthesis and everything else is ignored on parse. A config is usable
//! when it declares the one architecture and g2p mode this crate's token
//! alphabet matches.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Architecture this crate drives.
pub const SUPPORTED_TTS: &str = "vits";
/// G2p mode whose token alphabet the transduction pipeline produces.
pub const SUPPORTED_G2P: &str = "pyopenjtalk_prosody";

/// The slice of a training config the synthesizer needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model architecture name, e.g. `"vits"`.
    pub tts: String,
    /// G2p mode the model was trained with.
    pub g2p: String,
    /// Token vocabulary in id order.
    pub token_list: Vec<String>,
}

impl ModelConfig {
    /// Parse a `config.yaml` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Reject configs for architectures or token alphabets this pipeline
    /// cannot feed.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.tts != SUPPORTED_TTS {
            return Err(Error::UnsupportedModel(format!(
                "tts is {:?}, only {SUPPORTED_TTS:?} models are supported",
                self.tts
            )));
        }
        if self.g2p != SUPPORTED_G2P {
            return Err(Error::UnsupportedModel(format!(
                "g2p is {:?}, the token alphabet requires {SUPPORTED_G2P:?}",
                self.g2p
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
tts: vits
tts_conf:
  generator_type: vits_generator
  sampling_rate: 44100
g2p: pyopenjtalk_prosody
token_list:
- <blank>
- <unk>
- a
- o
- '^'
- $
- <sos/eos>
batch_size: 32
";

    #[test]
    fn test_parse_ignores_unrelated_keys() {
        let config: ModelConfig = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(config.tts, "vits");
        assert_eq!(config.g2p, "pyopenjtalk_prosody");
        assert_eq!(config.token_list.len(), 7);
        assert_eq!(config.token_list[4], "^");
        config.ensure_supported().unwrap();
    }

    #[test]
    fn test_unsupported_architecture() {
        let config: ModelConfig =
            serde_yaml::from_str(&CONFIG.replace("tts: vits", "tts: tacotron2")).unwrap();
        assert!(matches!(
            config.ensure_supported(),
            Err(Error::UnsupportedModel(_))
        ));
    }

    #[test]
    fn test_unsupported_g2p() {
        let raw = CONFIG.replace("g2p: pyopenjtalk_prosody", "g2p: pyopenjtalk");
        let config: ModelConfig = serde_yaml::from_str(&raw).unwrap();
        assert!(matches!(
            config.ensure_supported(),
            Err(Error::UnsupportedModel(_))
        ));
    }

    #[test]
    fn test_missing_token_list_is_parse_error() {
        assert!(serde_yaml::from_str::<ModelConfig>("tts: vits\ng2p: pyopenjtalk_prosody\n").is_err());
    }
}
