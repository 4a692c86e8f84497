//! Data types for attribute diff visualization
//!
//! This module defines the line and row structures produced when diffing a
//! single attribute, and the colour intents renderers map them onto.

use serde::{Deserialize, Serialize};

use crate::plan::ActionAlias;

/// Marker kind of a single raw diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Line prefixed with `-`: present only before the change
    Removed,
    /// Line prefixed with `+`: present only after the change
    Added,
    /// Any other line: unchanged structure or value
    Context,
}

/// One line of a line-oriented structural diff, with its marker stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

impl DiffLine {
    pub fn new(kind: LineKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    pub fn removed(text: &str) -> Self {
        Self::new(LineKind::Removed, text)
    }

    pub fn added(text: &str) -> Self {
        Self::new(LineKind::Added, text)
    }

    pub fn context(text: &str) -> Self {
        Self::new(LineKind::Context, text)
    }

    /// Parse a raw diff line.
    ///
    /// Lines without a recognised marker are kept whole as context.
    pub fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix('-') {
            Self::removed(rest)
        } else if let Some(rest) = line.strip_prefix('+') {
            Self::added(rest)
        } else if let Some(rest) = line.strip_prefix(' ') {
            Self::context(rest)
        } else {
            Self::context(line)
        }
    }

    /// Whether the line holds nothing but a single `[` or `]`
    pub fn is_bracket_only(&self) -> bool {
        matches!(self.text.trim(), "[" | "]")
    }

    /// Whether the line opens an array (`[` or `"key": [`)
    pub fn opens_array(&self) -> bool {
        self.text.trim_end().ends_with('[')
    }

    /// Whether the line is a lone `]`
    pub fn closes_array(&self) -> bool {
        self.is_bracket_only() && self.text.trim_end().ends_with(']')
    }
}

/// A unit of rendered side-by-side output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayRow {
    /// Before and after are equal; shown once
    Identical(String),

    /// A removed line and an added line shown side by side.
    /// `None` is a blank placeholder on the shorter side of a run.
    Paired {
        before: Option<String>,
        after: Option<String>,
    },

    /// Unchanged structural line shown on both sides
    Context(String),
}

impl DisplayRow {
    pub fn paired(before: Option<&str>, after: Option<&str>) -> Self {
        DisplayRow::Paired {
            before: before.map(str::to_string),
            after: after.map(str::to_string),
        }
    }
}

/// How one attribute is presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeView {
    /// Row-aligned output (identical values or a JSON/JSON diff)
    Rows(Vec<DisplayRow>),

    /// Two independently pretty-printed blocks, no line pairing
    Blocks { before: String, after: String },
}

/// The rendered diff of a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDiff {
    pub field: String,
    pub action_alias: ActionAlias,
    pub view: AttributeView,
}

/// Style intent a renderer maps onto a concrete colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorIntent {
    /// Creation, added content
    Affirmative,
    /// Deletion, removed content
    Negative,
    /// Update, unchanged context inside a change
    Warning,
    /// No particular emphasis
    Neutral,
}

impl ColorIntent {
    /// Get RGB color tuple for this intent
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorIntent::Affirmative => (152, 225, 152), // Pastel mint green
            ColorIntent::Negative => (255, 160, 160),    // Pastel coral
            ColorIntent::Warning => (255, 230, 160),     // Pastel cream/yellow
            ColorIntent::Neutral => (160, 160, 160),     // Grey
        }
    }

    /// CSS class used by the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            ColorIntent::Affirmative => "color-green",
            ColorIntent::Negative => "color-red",
            ColorIntent::Warning => "color-yellow",
            ColorIntent::Neutral => "",
        }
    }
}
