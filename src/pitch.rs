//! Pitch remapping over an external analysis/resynthesis backend.
//!
//! The synthesizer's pitch and intonation controls are applied after
//! inference: a WORLD-style backend decomposes the waveform into an f0
//! contour plus spectral envelope and aperiodicity, the voiced part of the
//! contour is remapped linearly around its mean, and the backend rebuilds
//! the waveform from the modified contour and the untouched envelope.
//!
//! Only [`remap_f0`] lives here; the numeric analysis itself stays behind
//! [`PitchExtractor`] so the remapping logic is testable without it.

use crate::error::{Error, Result};

/// Per-frame decomposition of a waveform.
#[derive(Debug, Clone, Default)]
pub struct PitchFeatures {
    /// Fundamental frequency per frame in Hz; exactly 0.0 marks an unvoiced
    /// frame.
    pub f0: Vec<f64>,
    /// Frame positions in seconds.
    pub time_axis: Vec<f64>,
    /// Spectral envelope, one row per frame.
    pub spectral_envelope: Vec<Vec<f64>>,
    /// Band aperiodicity, one row per frame.
    pub aperiodicity: Vec<Vec<f64>>,
}

/// External pitch analysis/resynthesis capability.
pub trait PitchExtractor {
    /// Decompose a waveform into [`PitchFeatures`].
    fn extract(&self, samples: &[f64], sample_rate: u32) -> Result<PitchFeatures>;

    /// Rebuild a waveform from (possibly modified) features.
    fn resynthesize(&self, features: &PitchFeatures, sample_rate: u32) -> Result<Vec<f64>>;
}

/// Remap every voiced f0 frame as
/// `pitch_scale * mean + intonation_scale * (f - mean)`, where `mean` is the
/// mean over the voiced frames only. Unvoiced frames are exactly 0.0 and
/// must stay exactly 0.0 — rescaling them would voice the silence.
///
/// A contour with no voiced frame at all has no mean to remap around;
/// that is [`Error::NoVoicedFrames`], never a NaN contour.
pub fn remap_f0(f0: &mut [f64], pitch_scale: f64, intonation_scale: f64) -> Result<()> {
    let mut sum = 0.0;
    let mut voiced = 0usize;
    for &f in f0.iter() {
        if f != 0.0 {
            sum += f;
            voiced += 1;
        }
    }
    if voiced == 0 {
        return Err(Error::NoVoicedFrames);
    }
    let mean = sum / voiced as f64;

    for f in f0.iter_mut() {
        if *f != 0.0 {
            *f = pitch_scale * mean + intonation_scale * (*f - mean);
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
