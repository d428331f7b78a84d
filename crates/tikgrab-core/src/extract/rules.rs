//! The production extraction ladder.
//!
//! Order matters: each rung covers a page template variant the previous
//! one misses. JSON key searches are case-sensitive (keys are emitted
//! verbatim by the page renderer); only the `<video>` search ignores case.

use super::{ExtractionRule, Normalize};

/// `"playAddr": "https:\/\/..."` inside inlined JSON state.
pub const PLAY_ADDR_JSON: &str = r#""playAddr"\s*:\s*"(https?:\\/\\/[^"]+)""#;

/// `<video ... src="...">` or `src='...'`, any case.
pub const VIDEO_TAG_SRC: &str = r#"(?i)<video[^>]+src=["']([^"']+)["']"#;

/// `playAddr: "https:\/\/..."` with an unquoted key (JS object literal).
// Overlaps PLAY_ADDR_JSON; fires only on pages where the key is unquoted.
pub const PLAY_ADDR_BARE: &str = r#"playAddr:\s*"(https?:\\/\\/[^"]+)""#;

/// Builds the three rules in priority order.
pub fn standard_rules() -> Result<Vec<ExtractionRule>, regex::Error> {
    Ok(vec![
        ExtractionRule::new("play_addr_json", PLAY_ADDR_JSON, Normalize::StripBackslashes)?,
        ExtractionRule::new("video_tag_src", VIDEO_TAG_SRC, Normalize::Verbatim)?,
        ExtractionRule::new("play_addr_bare", PLAY_ADDR_BARE, Normalize::StripBackslashes)?,
    ])
}
