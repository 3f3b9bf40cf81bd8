//! Crate-wide error type.
//!
//! Callers mostly care about four variants: [`Error::Analysis`] (the
//! linguistic analyzer rejected the text), [`Error::AccentSyntax`] (a
//! hand-edited accent string contains something outside the notation;
//! user-correctable, so report it against the edited string),
//! [`Error::UnknownToken`] (the accent string is well-formed but the loaded
//! model was not trained on one of its tokens), and [`Error::NoVoicedFrames`]
//! (pitch remapping asked for on fully unvoiced audio). The rest is plumbing
//! around model loading and file output.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The linguistic analyzer could not produce phonemes for the input text.
    #[error("text analysis failed: {0}")]
    Analysis(String),

    /// A character outside the accent-string alphabet.
    ///
    /// `position` is the character index in the accent string after width
    /// normalization (full-width space and `？` folded to their half-width
    /// forms), which is what an editing UI should highlight.
    #[error("invalid character {ch:?} at position {position} in accent string")]
    AccentSyntax { ch: char, position: usize },

    /// A token the loaded model's vocabulary does not contain.
    #[error("unknown token {token:?} at position {position}: not in the model vocabulary")]
    UnknownToken { token: String, position: usize },

    /// Pitch remapping over a waveform whose f0 contour is zero everywhere.
    #[error("waveform has no voiced frames, f0 mean is undefined")]
    NoVoicedFrames,

    /// The acoustic model failed to synthesize.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The pitch analysis/resynthesis backend failed.
    #[error("pitch analysis failed: {0}")]
    Pitch(String),

    /// The model config declares an architecture or g2p mode this crate does
    /// not handle.
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// Malformed token list: duplicates, or more entries than the vocabulary
    /// cap allows.
    #[error("invalid vocabulary: {0}")]
    Vocabulary(String),

    /// Model directory discovery failed (missing directory, zero or several
    /// weight files).
    #[error("model store: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV output failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("could not parse model config: {0}")]
    Config(#[from] serde_yaml::Error),
}
