/*!
 * Formatting records for sections of a subtitle line.
 *
 * A `Formatting` is a mutable bag of style options bound to one `Section`
 * of a line's text. It has no knowledge of what the text is; the line owns
 * the mapping from sections to records.
 *
 * Supported options:
 * - Bold
 * - Italic
 * - Underline
 * - Color
 * - Font name
 * - Font size
 */

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, SubtitleError};

/// Half-open character range `[start, end)` within a line's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Section {
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Section {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// How a caller addresses a section before it is resolved against the text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionSpec {
    /// The entire text
    #[default]
    Whole,
    /// The n-th newline separated paragraph, counted from 0
    Paragraph(usize),
    /// An explicit character range
    Range(Range<usize>),
}

impl From<usize> for SectionSpec {
    fn from(index: usize) -> Self {
        Self::Paragraph(index)
    }
}

impl From<Range<usize>> for SectionSpec {
    fn from(range: Range<usize>) -> Self {
        Self::Range(range)
    }
}

impl From<Option<usize>> for SectionSpec {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Self::Whole, Self::Paragraph)
    }
}

impl TryFrom<&Value> for SectionSpec {
    type Error = SubtitleError;

    /// `null` is the whole line, an integer a paragraph and a two element
    /// array `[start, end]` a character range.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Whole),
            Value::Number(n) => n
                .as_u64()
                .map(|index| Self::Paragraph(index as usize))
                .ok_or_else(|| SubtitleError::TypeMismatch(format!(
                    "Unknown formatting section: {}", value
                ))),
            Value::Array(bounds) => match bounds.as_slice() {
                [start, end] => match (start.as_u64(), end.as_u64()) {
                    (Some(start), Some(end)) => Ok(Self::Range(start as usize..end as usize)),
                    _ => Err(SubtitleError::TypeMismatch(format!(
                        "Unknown formatting section: {}", value
                    ))),
                },
                _ => Err(SubtitleError::TypeMismatch(format!(
                    "Unknown formatting section: {}", value
                ))),
            },
            _ => Err(SubtitleError::TypeMismatch(format!(
                "Unknown formatting section: {}", value
            ))),
        }
    }
}

/// Style options to merge into a `Formatting`
///
/// Unset fields leave the target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    pub fn font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// True when no option is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Style state of one section of a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formatting {
    section: Section,
    #[serde(flatten)]
    options: FormatOptions,
}

impl Formatting {
    /// Create a record for `section` with nothing set
    pub fn new(section: Section) -> Self {
        Self {
            section,
            options: FormatOptions::default(),
        }
    }

    /// Merge the given options, overwriting only the ones that are set
    pub fn apply(&mut self, options: &FormatOptions) -> &mut Self {
        let FormatOptions { bold, italic, underline, color, font_name, font_size } = options;

        if bold.is_some() {
            self.options.bold = *bold;
        }
        if italic.is_some() {
            self.options.italic = *italic;
        }
        if underline.is_some() {
            self.options.underline = *underline;
        }
        if color.is_some() {
            self.options.color.clone_from(color);
        }
        if font_name.is_some() {
            self.options.font_name.clone_from(font_name);
        }
        if font_size.is_some() {
            self.options.font_size = *font_size;
        }

        self
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn is_bold(&self) -> bool {
        self.options.bold.unwrap_or(false)
    }

    pub fn is_italic(&self) -> bool {
        self.options.italic.unwrap_or(false)
    }

    pub fn is_underline(&self) -> bool {
        self.options.underline.unwrap_or(false)
    }

    pub fn color(&self) -> Option<&str> {
        self.options.color.as_deref()
    }

    pub fn font_name(&self) -> Option<&str> {
        self.options.font_name.as_deref()
    }

    pub fn font_size(&self) -> Option<u32> {
        self.options.font_size
    }

    /// Options currently in effect
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}
