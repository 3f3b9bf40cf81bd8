//! Text analysis example — prints the accent string and model tokens.
//!
//! Usage:
//!   cargo run --example analyze --features openjtalk
//!   cargo run --example analyze --features openjtalk -- --text "音声合成は面白い"
//!   cargo run --example analyze --features openjtalk -- --dictionary /path/to/naist-jdic
//!
//! The accent string is the hand-editable middle representation; feed a
//! corrected copy back through `accent_to_tokens` to change the prosody
//! without re-analyzing the text.

use std::path::Path;

use japros::jtalk::OpenJTalk;
use japros::{accent_to_tokens, phonemes_to_accent, AccentAnalyzer};

fn main() -> anyhow::Result<()> {
    // ── Parse simple CLI arguments ───────────────────────────────────────────
    let mut args = std::env::args().skip(1);

    let mut text       = "こんにちは、世界。".to_string();
    let mut dictionary = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text"       => { if let Some(v) = args.next() { text = v; } }
            "--dictionary" => { if let Some(v) = args.next() { dictionary = Some(v); } }
            "--help"       => {
                println!("Usage: analyze [--text TEXT] [--dictionary DIR]");
                return Ok(());
            }
            _ => {}
        }
    }

    // ── Build the analyzer ───────────────────────────────────────────────────
    let analyzer = match &dictionary {
        Some(dir) => OpenJTalk::from_dictionary(Path::new(dir))?,
        None => OpenJTalk::bundled()?,
    };

    // ── Analyze ──────────────────────────────────────────────────────────────
    println!("Text   : {}", text);

    let units = analyzer.analyze(&text)?;
    let accent = phonemes_to_accent(&units);
    println!("Accent : {}", accent);

    let tokens = accent_to_tokens(&accent)?;
    println!("Tokens : {}", tokens.join(" "));

    Ok(())
}
