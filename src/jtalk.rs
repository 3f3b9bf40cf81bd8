//! Japanese text analysis via jpreprocess.
//!
//! jpreprocess is a pure-Rust port of OpenJTalk's text frontend: dictionary
//! lookup, accent estimation, and full-context label generation. This
//! module wraps it as the crate's [`AccentAnalyzer`], feeding its labels
//! through [`prosody_from_labels`].
//!
//! Gated behind the `openjtalk` cargo feature because the bundled NAIST
//! dictionary is fetched at build time. The label→unit reduction underneath
//! stays unconditional and fixture-testable without any dictionary.

use std::path::Path;

use jpreprocess::{
    kind::JPreprocessDictionaryKind, DefaultFetcher, JPreprocess, JPreprocessConfig,
    SystemDictionaryConfig,
};

use crate::error::{Error, Result};
use crate::prosody::{prosody_from_labels, AccentAnalyzer, PhoneticUnit};

/// Analyzer producing prosody-annotated phonemes from raw Japanese text.
pub struct OpenJTalk {
    jpreprocess: JPreprocess<DefaultFetcher>,
}

impl OpenJTalk {
    /// Analyzer over the bundled NAIST dictionary.
    pub fn bundled() -> Result<Self> {
        Self::from_config(JPreprocessConfig {
            dictionary: SystemDictionaryConfig::Bundled(JPreprocessDictionaryKind::NaistJdic),
            user_dictionary: None,
        })
    }

    /// Analyzer over a dictionary directory on disk.
    pub fn from_dictionary(dir: &Path) -> Result<Self> {
        Self::from_config(JPreprocessConfig {
            dictionary: SystemDictionaryConfig::File(dir.to_path_buf()),
            user_dictionary: None,
        })
    }

    fn from_config(config: JPreprocessConfig) -> Result<Self> {
        let jpreprocess =
            JPreprocess::from_config(config).map_err(|e| Error::Analysis(e.to_string()))?;
        Ok(Self { jpreprocess })
    }

    /// Raw full-context labels for `text`.
    pub fn labels(&self, text: &str) -> Result<Vec<String>> {
        self.jpreprocess
            .extract_fullcontext(text)
            .map_err(|e| Error::Analysis(e.to_string()))
    }
}

impl AccentAnalyzer for OpenJTalk {
    fn analyze(&self, text: &str) -> Result<Vec<PhoneticUnit>> {
        let labels = self.labels(text)?;
        prosody_from_labels(&labels)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests — need the bundled dictionary, so they only run with
// `--features openjtalk`
// ─────────────────────────────────────────────────────────────────────────────
