//! Background-color token normalization and the red token set.
//!
//! Hosts report cell backgrounds as a mix of hex codes and CSS-style
//! color names, with inconsistent casing. All comparisons go through
//! [`normalize_color`] so membership testing is a plain set lookup.

use std::collections::HashSet;

/// Color tokens treated as "red" unless overridden by config.
///
/// Covers the stock red swatches spreadsheet hosts offer (pure red,
/// the default palette red, dark reds, and the two light-red tints)
/// plus the literal name.
pub const DEFAULT_RED_COLORS: &[&str] = &[
    "#ff0000", "#ea4335", "#cc0000", "#e06666", "#f4cccc", "red",
];

/// Lower-case and trim a color token for set membership testing.
pub fn normalize_color(color: &str) -> String {
    color.trim().to_ascii_lowercase()
}

/// Set of normalized color tokens treated as a "flagged" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedSet {
    tokens: HashSet<String>,
}

impl RedSet {
    /// Build a set from arbitrary tokens; each is normalized on the way in.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| normalize_color(t.as_ref()))
                .collect(),
        }
    }

    /// Membership test, case-insensitive. The empty string is never a
    /// member (an un-colored cell never reads as red).
    pub fn contains(&self, color: &str) -> bool {
        let token = normalize_color(color);
        !token.is_empty() && self.tokens.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for RedSet {
    fn default() -> Self {
        Self::new(DEFAULT_RED_COLORS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_case_insensitive() {
        let red = RedSet::default();
        assert!(red.contains("#FF0000"));
        assert!(red.contains("#ff0000"));
        assert!(red.contains("RED"));
        assert!(red.contains("  #Ea4335 "));
    }

    #[test]
    fn white_and_blank_are_not_red() {
        let red = RedSet::default();
        assert!(!red.contains("#ffffff"));
        assert!(!red.contains(""));
        assert!(!red.contains("   "));
    }

    #[test]
    fn custom_set_replaces_defaults() {
        let red = RedSet::new(["#AA0000"]);
        assert!(red.contains("#aa0000"));
        assert!(!red.contains("#ff0000"));
        assert_eq!(red.len(), 1);
    }
}
