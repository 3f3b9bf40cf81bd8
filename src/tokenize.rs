//! Accent-string tokenizer — kana+accent notation → model token sequence.
//!
//! The accent string is the human-editable middle layer of the pipeline:
//! katakana plus `[` (pitch rise), `]` (pitch fall), space (accent-phrase
//! boundary), `、` (pause) and an optional trailing `?` (question). This
//! module re-derives the exact token sequence a synthesis model consumes:
//!
//! ```text
//! コ[ンニチワ → ["^", "k", "o", "[", "N", "n", "i", "ch", "i", "w", "a", "$"]
//! ```
//!
//! Tokenization is a chain of textual substitutions whose order is part of
//! the contract: width normalization, end-marker insertion, marker inversion
//! (`ッ`→`cl`, `ン`→`N`, `、`→`_`, space→`#`), start-marker insertion, spaced
//! kana→romanization expansion, symbol isolation, split. Validation runs
//! first on the normalized input so errors point at the character the user
//! typed, not at an intermediate form.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Symbol tables
// ─────────────────────────────────────────────────────────────────────────────

/// The kana → spaced-romanization table used by both pipeline directions
/// (expansion here, reversed in [`crate::g2p`] for the kana rendering).
///
/// Two-character entries come first: a contracted sound like `キャ` must
/// never be read as `キ` + `ャ`. Foreign sounds (`ヴァ`, `テュ`, `クヮ`) are
/// listed even though stock model vocabularies cannot voice them; they render
/// as kana like everything else and surface as unknown tokens at id lookup.
/// Each value carries its leading space; the spaces become token separators
/// in the final split.
#[rustfmt::skip]
pub(crate) static KANA_ROMAJI: &[(&str, &str)] = &[
    // contracted sounds
    ("キャ", " ky a"), ("キュ", " ky u"), ("キョ", " ky o"),
    ("ギャ", " gy a"), ("ギュ", " gy u"), ("ギョ", " gy o"),
    ("シャ", " sh a"), ("シュ", " sh u"), ("ショ", " sh o"),
    ("ジャ", " j a"),  ("ジュ", " j u"),  ("ジョ", " j o"),
    ("チャ", " ch a"), ("チュ", " ch u"), ("チョ", " ch o"),
    ("ニャ", " ny a"), ("ニュ", " ny u"), ("ニョ", " ny o"),
    ("ヒャ", " hy a"), ("ヒュ", " hy u"), ("ヒョ", " hy o"),
    ("ファ", " f a"),  ("フィ", " f i"),  ("フェ", " f e"),  ("フォ", " f o"),
    ("ミャ", " my a"), ("ミュ", " my u"), ("ミョ", " my o"),
    ("リャ", " ry a"), ("リュ", " ry u"), ("リョ", " ry o"),
    ("ビャ", " by a"), ("ビュ", " by u"), ("ビョ", " by o"),
    ("ピャ", " py a"), ("ピュ", " py u"), ("ピョ", " py o"),
    // foreign sounds the analyzer can emit
    ("ヴァ", " v a"),  ("ヴィ", " v i"),  ("ヴェ", " v e"),  ("ヴォ", " v o"),
    ("テュ", " ty u"), ("デュ", " dy u"), ("クヮ", " kw a"), ("グヮ", " gw a"),
    // voiced and semi-voiced rows
    ("ガ", " g a"), ("ギ", " g i"), ("グ", " g u"), ("ゲ", " g e"), ("ゴ", " g o"),
    ("ザ", " z a"), ("ジ", " j i"), ("ズ", " z u"), ("ゼ", " z e"), ("ゾ", " z o"),
    ("ダ", " d a"), ("ヂ", " j i"), ("ヅ", " z u"), ("デ", " d e"), ("ド", " d o"),
    ("バ", " b a"), ("ビ", " b i"), ("ブ", " b u"), ("ベ", " b e"), ("ボ", " b o"),
    ("パ", " p a"), ("ピ", " p i"), ("プ", " p u"), ("ペ", " p e"), ("ポ", " p o"),
    // plain rows, irregular romanizations included
    ("ア", " a"),   ("イ", " i"),   ("ウ", " u"),   ("エ", " e"),   ("オ", " o"),
    ("カ", " k a"), ("キ", " k i"), ("ク", " k u"), ("ケ", " k e"), ("コ", " k o"),
    ("サ", " s a"), ("シ", " sh i"), ("ス", " s u"), ("セ", " s e"), ("ソ", " s o"),
    ("タ", " t a"), ("チ", " ch i"), ("ツ", " ts u"), ("テ", " t e"), ("ト", " t o"),
    ("ナ", " n a"), ("ニ", " n i"), ("ヌ", " n u"), ("ネ", " n e"), ("ノ", " n o"),
    ("ハ", " h a"), ("ヒ", " h i"), ("フ", " f u"), ("ヘ", " h e"), ("ホ", " h o"),
    ("マ", " m a"), ("ミ", " m i"), ("ム", " m u"), ("メ", " m e"), ("モ", " m o"),
    ("ラ", " r a"), ("リ", " r i"), ("ル", " r u"), ("レ", " r e"), ("ロ", " r o"),
    ("ヤ", " y a"), ("ユ", " y u"), ("ヨ", " y o"),
    ("ワ", " w a"), ("ヰ", " w i"), ("ヲ", " w o"), ("ヱ", " w e"),
    ("ヴ", " v u"),
];

/// Marker characters swapped for their token form before kana expansion.
/// The inverse of the rendering the normalizer applies.
const MARKERS: &[(char, &str)] = &[('ッ', "cl"), ('ン', "N"), ('、', "_"), (' ', "#")];

/// Symbols isolated as standalone tokens before the final split.
const SYMBOLS: &[&str] = &["[", "]", "#", "_", "N", "cl", "?", "$"];

static DIGRAPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    KANA_ROMAJI
        .iter()
        .filter(|(kana, _)| kana.chars().count() == 2)
        .map(|&(kana, romaji)| (kana, romaji))
        .collect()
});

static SINGLES: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    KANA_ROMAJI
        .iter()
        .filter_map(|&(kana, romaji)| {
            let mut chars = kana.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some((c, romaji)),
                _ => None,
            }
        })
        .collect()
});

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

fn normalize_width(p: &str) -> String {
    p.replace('　', " ").replace('？', "?")
}

/// Check that `p` stays inside the accent-string alphabet: table-covered
/// katakana (digraph-first, so a lone small kana fails), `ッ`/`ン`, the
/// prosody marks `[` `]` space `、`, and `?`/`$`.
///
/// `p` is expected to be width-normalized already; [`accent_to_tokens`] does
/// that before calling here, so reported positions match what the user sees.
pub fn validate_accent_string(p: &str) -> Result<()> {
    let chars: Vec<char> = p.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if matches!(c, '[' | ']' | ' ' | '、' | '?' | '$' | 'ッ' | 'ン') {
            i += 1;
            continue;
        }
        if i + 1 < chars.len() {
            let pair: String = chars[i..=i + 1].iter().collect();
            if DIGRAPHS.contains_key(pair.as_str()) {
                i += 2;
                continue;
            }
        }
        if SINGLES.contains_key(&c) {
            i += 1;
            continue;
        }
        return Err(Error::AccentSyntax { ch: c, position: i });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenization
// ─────────────────────────────────────────────────────────────────────────────

/// Digraph-first expansion of every katakana syllable into its spaced
/// romanization. Non-kana characters (prosody symbols, the letters injected
/// for `ッ`/`ン`) pass through untouched.
fn expand_kana(p: &str) -> String {
    let chars: Vec<char> = p.chars().collect();
    let mut out = String::with_capacity(p.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() {
            let pair: String = chars[i..=i + 1].iter().collect();
            if let Some(romaji) = DIGRAPHS.get(pair.as_str()) {
                out.push_str(romaji);
                i += 2;
                continue;
            }
        }
        match SINGLES.get(&chars[i]) {
            Some(romaji) => out.push_str(romaji),
            None => out.push(chars[i]),
        }
        i += 1;
    }
    out
}

fn isolate_symbols(p: &str) -> String {
    let mut p = p.to_string();
    for sym in SYMBOLS {
        p = p.replace(sym, &format!(" {sym}"));
    }
    p
}

/// Convert an accent string into the token sequence the model consumes.
///
/// Accepts hand-edited input: full-width space and `？` are folded to their
/// half-width forms, and the end marker is optional (`$` is appended unless
/// the string already ends in `?` or `$`). Any character outside the
/// notation fails with [`Error::AccentSyntax`] before anything is rewritten;
/// characters are never silently dropped.
///
/// ```
/// let tokens = japros::accent_to_tokens("コ[ンニチワ").unwrap();
/// assert_eq!(
///     tokens,
///     ["^", "k", "o", "[", "N", "n", "i", "ch", "i", "w", "a", "$"]
/// );
/// ```
pub fn accent_to_tokens(p: &str) -> Result<Vec<String>> {
    let mut p = normalize_width(p);
    validate_accent_string(&p)?;

    if !p.ends_with('?') && !p.ends_with('$') {
        p.push('$');
    }
    for &(kana, sym) in MARKERS {
        p = p.replace(kana, sym);
    }
    let p = format!("^{p}");
    let p = expand_kana(&p);
    let p = isolate_symbols(&p);

    Ok(p.split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
