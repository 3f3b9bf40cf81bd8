//! # japros
//!
//! Japanese text frontend for VITS speech synthesis — pitch-accent-aware
//! grapheme-to-phoneme conversion, a hand-editable accent notation, and
//! the token pipeline that feeds the acoustic model.
//!
//! ## Accent notation
//!
//! Synthesis is driven by a katakana string annotated with prosody marks.
//! Because analysis sometimes gets the accent wrong, the string is meant
//! to be shown to users and corrected by hand before synthesis:
//!
//! | Mark | Meaning             | Example                      |
//! |------|---------------------|------------------------------|
//! | `[`  | pitch rises after   | `コ[ンニチワ`                |
//! | `]`  | pitch falls after   | `キョ]オト`                  |
//! | ` `  | accent phrase break | `ソ[レワ ム[ズカシ]イ`       |
//! | `、` | pause               | `ハ]イ、ソ[オ オ[モイマ]ス`  |
//! | `?`  | question intonation | `キ[ミワ ダ]レ?`             |
//!
//! ## Quick start
//!
//! The accent-string tokenizer is pure and needs no model or dictionary:
//!
//! ```
//! use japros::accent_to_tokens;
//!
//! let tokens = accent_to_tokens("コ[ンニチワ").unwrap();
//! assert_eq!(tokens, ["^", "k", "o", "[", "N", "n", "i", "ch", "i", "w", "a", "$"]);
//! ```
//!
//! With the `openjtalk` feature enabled, raw text goes all the way to
//! model tokens:
//!
//! ```no_run
//! # #[cfg(feature = "openjtalk")]
//! # {
//! use japros::jtalk::OpenJTalk;
//! use japros::{accent_to_tokens, phonemes_to_accent, AccentAnalyzer};
//!
//! let analyzer = OpenJTalk::bundled().unwrap();
//! let accent = phonemes_to_accent(&analyzer.analyze("こんにちは").unwrap());
//! assert_eq!(accent, "コ[ンニチワ");
//! let tokens = accent_to_tokens(&accent).unwrap();
//! # }
//! ```
//!
//! ## Pipeline
//! 1. **Analysis** — full-context labels from OpenJTalk are reduced to
//!    prosody-annotated phonemes ([`prosody_from_labels`]).
//! 2. **Accent string** — the phonemes are rendered as annotated katakana
//!    for display and editing ([`phonemes_to_accent`]).
//! 3. **Tokenization** — the accent string is validated and split back
//!    into model tokens ([`accent_to_tokens`]).
//! 4. **Id lookup** — tokens are mapped through the model's vocabulary
//!    ([`TokenIdConverter`]); unknown tokens are rejected here, before
//!    inference.
//! 5. **Inference** — an [`AcousticModel`] decodes the ids to a waveform.
//! 6. **Pitch control** — for non-neutral scales, the f0 contour is
//!    remapped ([`remap_f0`]) and the waveform resynthesized.
//!
//! The acoustic model and pitch vocoder are supplied by the embedding
//! application through the [`AcousticModel`] and [`PitchExtractor`]
//! traits; this crate owns everything in between.

pub mod config;
pub mod error;
pub mod g2p;
pub mod model;
pub mod pitch;
pub mod prosody;
pub mod store;
pub mod tokenize;
pub mod vocab;

// Text analysis needs a system dictionary (bundled NAIST by default), so it
// stays behind a feature; the token pipeline works without it.
#[cfg(feature = "openjtalk")]
pub mod jtalk;

// ─── Re-exports for convenience ─────────────────────────────────────────────

/// The synthesis façade — one per loaded model.
pub use model::Synthesizer;

pub use config::ModelConfig;
pub use error::{Error, Result};
pub use g2p::{alphabet_to_kana, phonemes_to_accent};
pub use model::{AcousticModel, Audio, DecodeOptions, SynthesisOptions, DEFAULT_SAMPLE_RATE};
pub use pitch::{remap_f0, PitchExtractor, PitchFeatures};
pub use prosody::{prosody_from_labels, AccentAnalyzer, PhoneticUnit};
pub use store::{list_models, ModelDir, DEFAULT_CONFIG_PATH, DEFAULT_MODEL_ROOT};
pub use tokenize::{accent_to_tokens, validate_accent_string};
pub use vocab::{TokenIdConverter, DEFAULT_VOCAB_SIZE};
