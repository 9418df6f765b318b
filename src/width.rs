//! Terminal cell width of characters.
//!
//! Widths come from the Unicode East Asian Width tables shipped with
//! `unicode-width`. Every char maps to exactly one [`CharWidth`]; controls
//! are zero, anything the tables do not cover falls back to one.
//!
//! Strings are measured per grapheme cluster, the way ratatui lays out
//! cells, so emoji modifier, VS16 and ZWJ sequences take the two columns
//! the terminal draws them in. The same [`WidthProfile`] must be used for
//! painting and for cursor placement, otherwise the cursor drifts from the
//! glyphs it follows.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of terminal columns a single char occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharWidth {
    Zero,
    One,
    Two,
}

impl CharWidth {
    /// Classify `ch` with the [`WidthProfile::Standard`] profile.
    pub fn of(ch: char) -> Self {
        WidthProfile::Standard.classify(ch)
    }

    pub const fn columns(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    const fn from_columns(columns: usize) -> Self {
        match columns {
            0 => Self::Zero,
            1 => Self::One,
            _ => Self::Two,
        }
    }
}

/// How East Asian Ambiguous characters are measured.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WidthProfile {
    /// Ambiguous characters take one column (most Western terminals).
    #[default]
    Standard,
    /// Ambiguous characters take two columns (CJK legacy terminals).
    EastAsian,
}

impl WidthProfile {
    /// Classify a single char.
    pub fn classify(self, ch: char) -> CharWidth {
        if ch.is_control() {
            return CharWidth::Zero;
        }
        let columns = match self {
            Self::Standard => ch.width(),
            Self::EastAsian => ch.width_cjk(),
        };
        columns.map_or(CharWidth::Zero, CharWidth::from_columns)
    }

    /// Classify one grapheme cluster.
    ///
    /// A single-char cluster is [`classify`](Self::classify). Longer
    /// clusters (base + modifiers, ZWJ sequences, VS16 presentation) use
    /// the `unicode-width` string rules; a cluster holding a control char
    /// is zero, as renderers skip it.
    pub fn classify_cluster(self, cluster: &str) -> CharWidth {
        let mut chars = cluster.chars();
        match (chars.next(), chars.next()) {
            (None, _) => CharWidth::Zero,
            (Some(ch), None) => self.classify(ch),
            _ if cluster.chars().any(char::is_control) => CharWidth::Zero,
            _ => CharWidth::from_columns(match self {
                Self::Standard => cluster.width(),
                Self::EastAsian => cluster.width_cjk(),
            }),
        }
    }

    /// Total columns of `text`, summed per grapheme cluster.
    pub fn str_width(self, text: &str) -> usize {
        text.graphemes(true)
            .map(|cluster| self.classify_cluster(cluster).columns())
            .sum()
    }
}
