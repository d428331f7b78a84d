//! Asset URL extraction from page markup.
//!
//! An [`Extractor`] holds an ordered ladder of [`ExtractionRule`]s. Each rule
//! is a regex with one capture group plus a normalization step. Rules are
//! tried in order and the first match wins; later rules are not evaluated.

mod rules;

pub use rules::{standard_rules, PLAY_ADDR_BARE, PLAY_ADDR_JSON, VIDEO_TAG_SRC};

use regex::Regex;

/// How a raw capture becomes a candidate asset URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Remove every backslash (`https:\/\/a\/b` → `https://a/b`).
    StripBackslashes,
    /// Use the capture as-is.
    Verbatim,
}

impl Normalize {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Normalize::StripBackslashes => raw.replace('\\', ""),
            Normalize::Verbatim => raw.to_string(),
        }
    }
}

/// One rung of the extraction ladder.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    normalize: Normalize,
}

impl ExtractionRule {
    /// `pattern` must contain at least one capture group; group 1 is the URL.
    pub fn new(
        name: &'static str,
        pattern: &str,
        normalize: Normalize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            normalize,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Searches `page` and returns the normalized candidate from the first match.
    pub fn apply(&self, page: &str) -> Option<String> {
        let raw = self.pattern.captures(page)?.get(1)?.as_str();
        if raw.is_empty() {
            return None;
        }
        Some(self.normalize.apply(raw))
    }
}

/// Result of a successful extraction: which rule fired and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub rule: &'static str,
    pub url: String,
}

/// Ordered, immutable rule ladder.
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<ExtractionRule>,
}

impl Extractor {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    /// The ladder used in production: `playAddr` JSON, `<video src>`, bare `playAddr:`.
    pub fn standard() -> anyhow::Result<Self> {
        Ok(Self::new(standard_rules()?))
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Applies the rules in order, stopping at the first match.
    pub fn extract(&self, page: &str) -> Option<Extraction> {
        self.rules.iter().find_map(|rule| {
            rule.apply(page).map(|url| Extraction {
                rule: rule.name(),
                url,
            })
        })
    }
}
