//! Synthesis façade — transduction, id lookup, inference, pitch control.
//!
//! A [`Synthesizer`] owns everything one loaded model needs:
//!
//! | Collaborator       | Role                                   |
//! |--------------------|----------------------------------------|
//! | [`AccentAnalyzer`] | text → prosody-annotated phonemes      |
//! | [`TokenIdConverter`] | tokens → model ids                   |
//! | [`AcousticModel`]  | ids → waveform                         |
//! | [`PitchExtractor`] | pitch/intonation post-processing       |
//!
//! Three entry points mirror the three places a caller can start from:
//! raw text, a hand-edited accent string, or a prepared token sequence.
//! Inference is serialized per synthesizer; the transduction stages are
//! pure and need no coordination.

use std::path::Path;
use std::sync::Mutex;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::g2p::phonemes_to_accent;
use crate::pitch::{remap_f0, PitchExtractor};
use crate::prosody::AccentAnalyzer;
use crate::tokenize::accent_to_tokens;
use crate::vocab::TokenIdConverter;

/// Sample rate the stock models are trained at.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

// ─────────────────────────────────────────────────────────────────────────────
// Audio
// ─────────────────────────────────────────────────────────────────────────────

/// Mono waveform with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl Audio {
    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Write as 16-bit PCM WAV, clamping samples to [-1, 1].
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &s in &self.samples {
            let s16 = (s * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            writer.write_sample(s16)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Controls forwarded to the acoustic model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    /// Playback speed multiplier; the model stretches durations by its
    /// inverse.
    pub speed_scale: f32,
    /// Sampling temperature of the waveform decoder.
    pub noise_scale: f32,
    /// Sampling temperature of the duration predictor.
    pub noise_scale_dur: f32,
}

/// Full synthesis controls: the decode subset plus the pitch/intonation
/// pair applied after inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisOptions {
    pub speed_scale: f32,
    /// Scales the mean of the voiced f0 contour.
    pub pitch_scale: f32,
    /// Scales the deviation of each voiced frame from that mean.
    pub intonation_scale: f32,
    pub noise_scale: f32,
    pub noise_scale_dur: f32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            speed_scale: 1.0,
            pitch_scale: 1.0,
            intonation_scale: 1.0,
            noise_scale: 0.667,
            noise_scale_dur: 0.8,
        }
    }
}

impl SynthesisOptions {
    fn decode(&self) -> DecodeOptions {
        DecodeOptions {
            speed_scale: self.speed_scale,
            noise_scale: self.noise_scale,
            noise_scale_dur: self.noise_scale_dur,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Model boundary
// ─────────────────────────────────────────────────────────────────────────────

/// The neural synthesis capability: token ids → waveform.
///
/// `&mut self` encodes that inference is not reentrant per instance; the
/// façade serializes concurrent callers with a mutex around the model.
pub trait AcousticModel {
    fn infer(&mut self, token_ids: &[i64], options: &DecodeOptions) -> Result<Audio>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Synthesizer
// ─────────────────────────────────────────────────────────────────────────────

/// One loaded model with its collaborators. Dropping it (or calling
/// [`Synthesizer::unload`]) releases the model's resources; keep at most
/// one per selected model.
pub struct Synthesizer {
    name: String,
    converter: TokenIdConverter,
    analyzer: Box<dyn AccentAnalyzer + Send + Sync>,
    model: Mutex<Box<dyn AcousticModel + Send>>,
    pitch: Box<dyn PitchExtractor + Send + Sync>,
}

impl Synthesizer {
    /// Assemble a synthesizer for one loaded model. The config is validated
    /// here and its token list becomes the id table, so a mismatched model
    /// fails at load time, not at the first request.
    pub fn new(
        name: impl Into<String>,
        config: &ModelConfig,
        analyzer: Box<dyn AccentAnalyzer + Send + Sync>,
        model: Box<dyn AcousticModel + Send>,
        pitch: Box<dyn PitchExtractor + Send + Sync>,
    ) -> Result<Self> {
        config.ensure_supported()?;
        let converter = TokenIdConverter::new(&config.token_list)?;
        Ok(Self {
            name: name.into(),
            converter,
            analyzer,
            model: Mutex::new(model),
            pitch,
        })
    }

    /// Name of the loaded model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accent string for `text`, for display or hand editing before
    /// [`Synthesizer::accent_to_speech`].
    pub fn accent_string(&self, text: &str) -> Result<String> {
        Ok(phonemes_to_accent(&self.analyzer.analyze(text)?))
    }

    /// Synthesize straight from text.
    pub fn text_to_speech(&self, text: &str, options: &SynthesisOptions) -> Result<Audio> {
        let accent = self.accent_string(text)?;
        self.accent_to_speech(&accent, options)
    }

    /// Synthesize from a (possibly hand-edited) accent string.
    pub fn accent_to_speech(&self, accent: &str, options: &SynthesisOptions) -> Result<Audio> {
        let tokens = accent_to_tokens(accent)?;
        self.tokens_to_speech(&tokens, options)
    }

    /// Synthesize from a prepared token sequence. Id lookup happens before
    /// the model is touched, so an out-of-vocabulary token never reaches
    /// inference.
    pub fn tokens_to_speech<S: AsRef<str>>(
        &self,
        tokens: &[S],
        options: &SynthesisOptions,
    ) -> Result<Audio> {
        let ids = self.converter.tokens_to_ids(tokens)?;
        let audio = {
            let mut model = self.model.lock().unwrap_or_else(|p| p.into_inner());
            model.infer(&ids, &options.decode())?
        };
        self.apply_pitch(audio, options)
    }

    /// Identity when both scales are neutral; otherwise a full
    /// analysis → remap → resynthesis round trip.
    fn apply_pitch(&self, audio: Audio, options: &SynthesisOptions) -> Result<Audio> {
        if options.pitch_scale == 1.0 && options.intonation_scale == 1.0 {
            return Ok(audio);
        }

        let samples: Vec<f64> = audio.samples.iter().map(|&s| s as f64).collect();
        let mut features = self.pitch.extract(&samples, audio.sample_rate)?;
        remap_f0(
            &mut features.f0,
            options.pitch_scale as f64,
            options.intonation_scale as f64,
        )?;
        let samples = self.pitch.resynthesize(&features, audio.sample_rate)?;

        Ok(Audio {
            sample_rate: audio.sample_rate,
            samples: samples.into_iter().map(|s| s as f32).collect(),
        })
    }

    /// Synthesize from text and write a WAV file.
    pub fn text_to_file(
        &self,
        text: &str,
        path: &Path,
        options: &SynthesisOptions,
    ) -> Result<()> {
        let audio = self.text_to_speech(text, options)?;
        audio.write_wav(path)?;
        println!(
            "Saved {} samples ({:.2} s) to {}",
            audio.samples.len(),
            audio.duration(),
            path.display()
        );
        Ok(())
    }

    /// Release the model's resources.
    pub fn unload(self) {}
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
