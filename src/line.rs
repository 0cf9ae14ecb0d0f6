/*!
 * Subtitle lines.
 *
 * A line is one frame of text with a start and end time between which it is
 * shown. Conceptually it is the payload of a chain node; navigation lives on
 * `Chain`, while everything that only needs the line itself lives here.
 */

use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitAnd;

use log::debug;

use crate::errors::{Result, SubtitleError};
use crate::formatting::{FormatOptions, Formatting, Section, SectionSpec};
use crate::time_span::{Spanned, TimeSpan, Timestamp};

/// Payload of a line node: timing, text and per-section formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    time_span: TimeSpan,
    text: String,
    formatting: BTreeMap<Section, Formatting>,
}

impl Line {
    /// Create a line; `text` can be anything printable
    pub fn new(time_span: impl Into<TimeSpan>, text: impl ToString) -> Self {
        Self {
            time_span: time_span.into(),
            text: text.to_string(),
            formatting: BTreeMap::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time_span(&self) -> TimeSpan {
        self.time_span
    }

    /// Length of the text in characters, the unit sections are counted in
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Resolve a section spec against the text of this line
    ///
    /// Paragraphs are separated by `'\n'`; the separator itself belongs to
    /// neither neighbor. Trailing empty paragraphs do not count, so empty
    /// text has no paragraphs at all.
    pub fn section(&self, spec: &SectionSpec) -> Result<Section> {
        let length = self.char_len();

        match spec {
            SectionSpec::Whole => Ok(Section::new(0, length)),

            SectionSpec::Range(range) => {
                if range.start > range.end || range.end > length {
                    return Err(SubtitleError::RangeError(format!(
                        "The range {}..{} covers more than the text ({} characters)",
                        range.start, range.end, length
                    )));
                }
                Ok(Section::from(range.clone()))
            }

            SectionSpec::Paragraph(index) => {
                let mut lengths: Vec<usize> = self.text.split('\n').map(|p| p.chars().count()).collect();
                while lengths.last() == Some(&0) {
                    lengths.pop();
                }

                let Some(paragraph_len) = lengths.get(*index) else {
                    return Err(SubtitleError::RangeError(format!(
                        "The line does not contain section {} ({} sections)",
                        index,
                        lengths.len()
                    )));
                };

                let from: usize = lengths[..*index].iter().map(|len| len + 1).sum();
                Ok(Section::new(from, from + paragraph_len))
            }
        }
    }

    /// Style a section of the line
    ///
    /// Returns the formatting record for the resolved section, creating an
    /// empty one on first use. Equal sections always share one record, so
    /// separate calls accumulate onto the same style.
    pub fn format(&mut self, spec: impl Into<SectionSpec>, options: &FormatOptions) -> Result<&mut Formatting> {
        let section = self.section(&spec.into())?;

        let formatting = self.formatting.entry(section).or_insert_with(|| {
            debug!("Creating formatting for section {}", section);
            Formatting::new(section)
        });

        Ok(formatting.apply(options))
    }

    /// All formatting records, ordered by section
    pub fn formatting(&self) -> &BTreeMap<Section, Formatting> {
        &self.formatting
    }

    /// Look up a section's formatting without creating it
    pub fn formatting_at(&self, section: Section) -> Option<&Formatting> {
        self.formatting.get(&section)
    }
}

impl Spanned for Line {
    fn begin(&self) -> Timestamp {
        self.time_span.begin
    }

    fn end(&self) -> Timestamp {
        self.time_span.end
    }
}

impl BitAnd for &Line {
    type Output = Timestamp;

    fn bitand(self, other: Self) -> Timestamp {
        self.intersect(other)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time_span, self.text)
    }
}
