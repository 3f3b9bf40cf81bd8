//! Prosody-annotated phoneme extraction from full-context labels.
//!
//! A Japanese text analyzer emits one HTS-style full-context label per phone,
//! e.g. (盆栽, accent type 0):
//!
//! ```text
//! xx^sil-b+o=N/A:-3+1+4/B:xx-xx_xx/C:02_xx+xx/D:02+xx_xx/E:xx_xx!xx_xx-xx/...
//! ```
//!
//! [`prosody_from_labels`] reduces such a sequence to the flat phoneme/marker
//! alphabet the rest of the pipeline works in:
//!
//! | Unit   | Meaning                            |
//! |--------|------------------------------------|
//! | `^`    | utterance start                    |
//! | `$`    | utterance end (statement)          |
//! | `?`    | utterance end (question)           |
//! | `[`    | pitch rises after this point       |
//! | `]`    | pitch falls after this point       |
//! | `#`    | accent-phrase boundary             |
//! | `_`    | pause                              |
//! | `N`    | moraic nasal (ん)                  |
//! | `cl`   | geminate consonant (っ)            |
//! | other  | romanized phoneme (`k`, `o`, `ch`) |
//!
//! The accentual decisions read the `/A:` field of each label: `a1` is the
//! mora position relative to the accent nucleus, `a2` the position from the
//! phrase start, `a3` the position from the phrase end. The `/F:` field
//! carries the accent phrase's mora count. A rise is emitted after the first
//! mora of a phrase, a fall after a non-phrase-final accent nucleus, and a
//! phrase boundary between accent phrases.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Phonetic units
// ─────────────────────────────────────────────────────────────────────────────

/// One element of an analyzed utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneticUnit {
    /// Utterance start, `^`.
    Start,
    /// Declarative utterance end, `$`.
    End,
    /// Interrogative utterance end, `?`.
    Question,
    /// Pitch rise, `[`.
    Rise,
    /// Pitch fall, `]`.
    Fall,
    /// Accent-phrase boundary, `#` (surfaces as a space).
    Break,
    /// Pause, `_` (surfaces as `、`).
    Pause,
    /// Geminate consonant, `cl` (surfaces as `ッ`).
    Gemination,
    /// Moraic nasal, `N` (surfaces as `ン`).
    Nasal,
    /// Romanized phoneme: `a`, `k`, `ch`, `ky`, …
    Phoneme(String),
}

impl PhoneticUnit {
    /// Parse one analyzer symbol. Total: anything unrecognized is an
    /// ordinary phoneme.
    pub fn from_symbol(sym: &str) -> Self {
        match sym {
            "^" => Self::Start,
            "$" => Self::End,
            "?" => Self::Question,
            "[" => Self::Rise,
            "]" => Self::Fall,
            "#" => Self::Break,
            "_" => Self::Pause,
            "cl" => Self::Gemination,
            "N" => Self::Nasal,
            other => Self::Phoneme(other.to_string()),
        }
    }

    /// The symbol form, identical to what the model vocabulary stores.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "^",
            Self::End => "$",
            Self::Question => "?",
            Self::Rise => "[",
            Self::Fall => "]",
            Self::Break => "#",
            Self::Pause => "_",
            Self::Gemination => "cl",
            Self::Nasal => "N",
            Self::Phoneme(p) => p,
        }
    }
}

impl std::fmt::Display for PhoneticUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text → prosody-annotated phonemes.
///
/// The one external linguistic capability the pipeline depends on. Output
/// always begins with [`PhoneticUnit::Start`] and ends with
/// [`PhoneticUnit::End`] or [`PhoneticUnit::Question`]; unanalyzable input
/// is an [`Error::Analysis`], never retried here.
pub trait AccentAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<PhoneticUnit>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Label feature extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Current phoneme: the `-…+` segment of the label.
static RE_PHONEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\-(.*?)\+").unwrap());
/// Accent-nucleus-relative mora position (may be negative).
static RE_A1: Lazy<Regex> = Lazy::new(|| Regex::new(r"/A:([0-9\-]+)\+").unwrap());
/// Mora position from the accent-phrase start.
static RE_A2: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+(\d+)\+").unwrap());
/// Mora position from the accent-phrase end.
static RE_A3: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+(\d+)/").unwrap());
/// Mora count of the accent phrase, from the `/F:` field.
static RE_F1: Lazy<Regex> = Lazy::new(|| Regex::new(r"/F:(\d+)_").unwrap());
/// Interrogative flag of the utterance-final label's `/E:` field.
static RE_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"!(\d+)_").unwrap());

/// Feature value used when a label field is `xx`.
const ABSENT: i32 = -50;

fn numeric_feature(re: &Regex, label: &str) -> i32 {
    re.captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(ABSENT)
}

/// Reduce a full-context label sequence to phonemes with prosody markers.
///
/// Unvoiced vowels (annotated `A I U E O`) are folded to their voiced
/// counterparts. Silence is only legal as the first label (start marker) and
/// the last (end or question marker, depending on the `/E:` interrogative
/// flag); silence anywhere else means the analyzer handed us something that
/// is not a single utterance.
pub fn prosody_from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Vec<PhoneticUnit>> {
    let n = labels.len();
    let mut units = Vec::with_capacity(n + n / 2);

    for (i, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        let p3 = RE_PHONEME
            .captures(label)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| Error::Analysis(format!("malformed full-context label: {label}")))?;
        let p3 = match p3 {
            "A" => "a",
            "I" => "i",
            "U" => "u",
            "E" => "e",
            "O" => "o",
            other => other,
        };

        if p3 == "sil" {
            if i == 0 {
                units.push(PhoneticUnit::Start);
            } else if i == n - 1 {
                match numeric_feature(&RE_QUESTION, label) {
                    0 => units.push(PhoneticUnit::End),
                    1 => units.push(PhoneticUnit::Question),
                    _ => {}
                }
            } else {
                return Err(Error::Analysis(format!(
                    "unexpected mid-utterance silence at label {i}"
                )));
            }
            continue;
        }
        if p3 == "pau" {
            units.push(PhoneticUnit::Pause);
            continue;
        }

        units.push(PhoneticUnit::from_symbol(p3));

        let a1 = numeric_feature(&RE_A1, label);
        let a2 = numeric_feature(&RE_A2, label);
        let a3 = numeric_feature(&RE_A3, label);
        let f1 = numeric_feature(&RE_F1, label);
        // Last non-silence label is followed by the final sil, whose /A: field
        // is xx, so this never reads past the end.
        let a2_next = if i + 1 < n {
            numeric_feature(&RE_A2, labels[i + 1].as_ref())
        } else {
            ABSENT
        };

        if a3 == 1 && a2_next == 1 && matches!(p3, "a" | "i" | "u" | "e" | "o" | "N" | "cl") {
            units.push(PhoneticUnit::Break);
        } else if a1 == 0 && a2_next == a2 + 1 && a2 != f1 {
            units.push(PhoneticUnit::Fall);
        } else if a2 == 1 && a2_next == 2 {
            units.push(PhoneticUnit::Rise);
        }
    }

    Ok(units)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// One phone of a test utterance: symbol plus its `/A:` features.
    struct Phone(&'static str, Option<(i32, i32, i32)>);

    fn format_label(
        prev: &str,
        cur: &str,
        next: &str,
        a: Option<(i32, i32, i32)>,
        e3: Option<i32>,
    ) -> String {
        // The current mora is counted from both phrase ends, so the mora
        // count in /F: is a2 + a3 - 1.
        let f = match a {
            Some((_, a2, a3)) => (a2 + a3 - 1).to_string(),
            None => "xx".to_string(),
        };
        let a = match a {
            Some((a1, a2, a3)) => format!("{a1}+{a2}+{a3}"),
            None => "xx+xx+xx".to_string(),
        };
        let e = match e3 {
            Some(v) => format!("{v}"),
            None => "xx".to_string(),
        };
        format!(
            "xx^{prev}-{cur}+{next}=xx/A:{a}/B:xx-xx_xx/C:xx_xx+xx/D:xx+xx_xx\
             /E:xx_xx!{e}_xx-xx/F:{f}_xx#xx_xx@xx_xx|xx_xx/G:xx_xx%xx_xx_xx\
             /H:xx_xx/I:xx-xx@xx+xx&xx-xx|xx+xx/J:xx_xx/K:xx+xx-xx"
        )
    }

    /// Build the label sequence the analyzer would emit for one utterance:
    /// leading and trailing silence around the given phones.
    fn utterance(phones: &[Phone], question: bool) -> Vec<String> {
        let sym = |i: isize| -> &str {
            if i < 0 || i as usize >= phones.len() {
                "sil"
            } else {
                phones[i as usize].0
            }
        };
        let mut labels = Vec::with_capacity(phones.len() + 2);
        labels.push(format_label("xx", "sil", sym(0), None, None));
        for (i, Phone(p, a)) in phones.iter().enumerate() {
            let i = i as isize;
            labels.push(format_label(sym(i - 1), p, sym(i + 1), *a, None));
        }
        labels.push(format_label(
            sym(phones.len() as isize - 1),
            "sil",
            "xx",
            None,
            Some(if question { 1 } else { 0 }),
        ));
        labels
    }

    fn units_of(symbols: &[&str]) -> Vec<PhoneticUnit> {
        symbols.iter().map(|s| PhoneticUnit::from_symbol(s)).collect()
    }

    /// こんにちは, accent type 0 over five morae: rise after the first mora,
    /// no fall.
    fn konnichiwa() -> Vec<Phone> {
        vec![
            Phone("k", Some((-4, 1, 5))),
            Phone("o", Some((-4, 1, 5))),
            Phone("N", Some((-3, 2, 4))),
            Phone("n", Some((-2, 3, 3))),
            Phone("i", Some((-2, 3, 3))),
            Phone("ch", Some((-1, 4, 2))),
            Phone("i", Some((-1, 4, 2))),
            Phone("w", Some((0, 5, 1))),
            Phone("a", Some((0, 5, 1))),
        ]
    }

    #[test]
    fn test_statement() {
        let labels = utterance(&konnichiwa(), false);
        let units = prosody_from_labels(&labels).unwrap();
        assert_eq!(
            units,
            units_of(&["^", "k", "o", "[", "N", "n", "i", "ch", "i", "w", "a", "$"])
        );
    }

    #[test]
    fn test_question() {
        let labels = utterance(&konnichiwa(), true);
        let units = prosody_from_labels(&labels).unwrap();
        assert_eq!(units.last(), Some(&PhoneticUnit::Question));
        assert_eq!(units[0], PhoneticUnit::Start);
    }

    /// 京都, accent type 1: fall right after the first mora.
    #[test]
    fn test_accent_fall() {
        let phones = vec![
            Phone("ky", Some((0, 1, 3))),
            Phone("o", Some((0, 1, 3))),
            Phone("o", Some((1, 2, 2))),
            Phone("t", Some((2, 3, 1))),
            Phone("o", Some((2, 3, 1))),
        ];
        let units = prosody_from_labels(&utterance(&phones, false)).unwrap();
        assert_eq!(units, units_of(&["^", "ky", "o", "]", "o", "t", "o", "$"]));
    }

    /// 卵, accent type 2: the nucleus is the middle of three morae, where
    /// position-from-start equals position-from-end. The fall lands after
    /// the second mora.
    #[test]
    fn test_fall_on_middle_mora() {
        let phones = vec![
            Phone("t", Some((-1, 1, 3))),
            Phone("a", Some((-1, 1, 3))),
            Phone("m", Some((0, 2, 2))),
            Phone("a", Some((0, 2, 2))),
            Phone("g", Some((1, 3, 1))),
            Phone("o", Some((1, 3, 1))),
        ];
        let units = prosody_from_labels(&utterance(&phones, false)).unwrap();
        assert_eq!(
            units,
            units_of(&["^", "t", "a", "[", "m", "a", "]", "g", "o", "$"])
        );
    }

    /// それは(0) むずかしい(4): boundary between the accent phrases, rise in
    /// both, fall after the second phrase's nucleus.
    #[test]
    fn test_phrase_boundary() {
        let phones = vec![
            Phone("s", Some((-2, 1, 3))),
            Phone("o", Some((-2, 1, 3))),
            Phone("r", Some((-1, 2, 2))),
            Phone("e", Some((-1, 2, 2))),
            Phone("w", Some((0, 3, 1))),
            Phone("a", Some((0, 3, 1))),
            Phone("m", Some((-3, 1, 5))),
            Phone("u", Some((-3, 1, 5))),
            Phone("z", Some((-2, 2, 4))),
            Phone("u", Some((-2, 2, 4))),
            Phone("k", Some((-1, 3, 3))),
            Phone("a", Some((-1, 3, 3))),
            Phone("sh", Some((0, 4, 2))),
            Phone("i", Some((0, 4, 2))),
            Phone("i", Some((1, 5, 1))),
        ];
        let units = prosody_from_labels(&utterance(&phones, false)).unwrap();
        assert_eq!(
            units,
            units_of(&[
                "^", "s", "o", "[", "r", "e", "w", "a", "#", "m", "u", "[", "z", "u", "k",
                "a", "sh", "i", "]", "i", "$",
            ])
        );
    }

    #[test]
    fn test_unvoiced_vowel_folded() {
        // 失礼, accent type 2: the い of し is devoiced, annotated uppercase.
        let phones = vec![
            Phone("sh", Some((-1, 1, 4))),
            Phone("I", Some((-1, 1, 4))),
            Phone("ts", Some((0, 2, 3))),
            Phone("u", Some((0, 2, 3))),
            Phone("r", Some((1, 3, 2))),
            Phone("e", Some((1, 3, 2))),
            Phone("e", Some((2, 4, 1))),
        ];
        let units = prosody_from_labels(&utterance(&phones, false)).unwrap();
        assert_eq!(
            units,
            units_of(&["^", "sh", "i", "[", "ts", "u", "]", "r", "e", "e", "$"])
        );
    }

    #[test]
    fn test_pause() {
        let phones = vec![
            Phone("h", Some((0, 1, 2))),
            Phone("a", Some((0, 1, 2))),
            Phone("i", Some((-1, 2, 1))),
            Phone("pau", None),
            Phone("s", Some((-1, 1, 2))),
            Phone("o", Some((-1, 1, 2))),
            Phone("o", Some((0, 2, 1))),
        ];
        let units = prosody_from_labels(&utterance(&phones, false)).unwrap();
        assert_eq!(
            units,
            units_of(&["^", "h", "a", "]", "i", "_", "s", "o", "[", "o", "$"])
        );
    }

    #[test]
    fn test_mid_utterance_silence_rejected() {
        let phones = vec![
            Phone("k", Some((0, 1, 1))),
            Phone("a", Some((0, 1, 1))),
            Phone("sil", None),
            Phone("m", Some((0, 1, 1))),
            Phone("a", Some((0, 1, 1))),
        ];
        let err = prosody_from_labels(&utterance(&phones, false)).unwrap_err();
        assert!(matches!(err, Error::Analysis(_)));
    }

    #[test]
    fn test_malformed_label_rejected() {
        let err = prosody_from_labels(&["not a label".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Analysis(_)));
    }

    #[test]
    fn test_symbol_round_trip() {
        for sym in ["^", "$", "?", "[", "]", "#", "_", "cl", "N", "a", "ky"] {
            assert_eq!(PhoneticUnit::from_symbol(sym).as_str(), sym);
        }
    }
}
