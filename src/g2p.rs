//! Phoneme-stream normalizer — analyzer output → editable accent string.
//!
//! The forward direction of the phonetic codec: drop the start marker,
//! resolve the end-vs-question marker, render the pause/boundary/geminate/
//! nasal markers as `、`/space/`ッ`/`ン`, and transliterate the romanized
//! phonemes back to katakana through the reverse of the tokenizer's table:
//!
//! ```text
//! [^, k, o, [, N, n, i, ch, i, w, a, $] → コ[ンニチワ
//! ```
//!
//! The output is what users hand-edit before re-tokenization, so it must
//! stay within the accent-string alphabet the tokenizer validates.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::prosody::PhoneticUnit;
use crate::tokenize::KANA_ROMAJI;

/// Reverse of the shared kana table: concatenated romanization → katakana.
/// The first table entry wins on duplicates, keeping `ジ`/`ズ` for
/// `ji`/`zu` rather than `ヂ`/`ヅ`.
static ROMAJI_KANA: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(kana, romaji) in KANA_ROMAJI {
        map.entry(romaji.replace(' ', "")).or_insert(kana);
    }
    map
});

/// Longest romanization in the table (`kya`, `kwa`, …).
static MAX_ROMAJI_LEN: Lazy<usize> =
    Lazy::new(|| ROMAJI_KANA.keys().map(|r| r.chars().count()).max().unwrap_or(0));

/// Transliterate romanized syllables inside `s` into katakana,
/// longest-match-first, so `nya` is read as `ニャ` and never `ni` + stray
/// `a`. Characters that start no known romanization (prosody marks, katakana
/// already present) pass through unchanged.
pub fn alphabet_to_kana(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let mut matched = false;
        let max = (*MAX_ROMAJI_LEN).min(chars.len() - i);
        for len in (1..=max).rev() {
            if !chars[i..i + len].iter().all(|c| c.is_ascii_lowercase()) {
                continue;
            }
            let key: String = chars[i..i + len].iter().collect();
            if let Some(kana) = ROMAJI_KANA.get(&key) {
                out.push_str(kana);
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Render an analyzed unit sequence as an accent string.
///
/// The first unit is dropped without inspection (the analyzer contract puts
/// `^` there). A trailing end marker is dropped; a trailing `?` stays — the
/// sole surface difference between a statement and a question.
pub fn phonemes_to_accent(units: &[PhoneticUnit]) -> String {
    let units = units.get(1..).unwrap_or_default();
    let units = match units.split_last() {
        Some((PhoneticUnit::End, rest)) => rest,
        _ => units,
    };

    let mut s = String::new();
    for unit in units {
        match unit {
            PhoneticUnit::Gemination => s.push('ッ'),
            PhoneticUnit::Nasal => s.push('ン'),
            PhoneticUnit::Pause => s.push('、'),
            PhoneticUnit::Break => s.push(' '),
            other => s.push_str(other.as_str()),
        }
    }
    alphabet_to_kana(&s)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
