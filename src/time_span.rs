/*!
 * Time spans and the `Spanned` trait.
 *
 * Anything with a beginning and an end can be compared against a subtitle
 * line: another line, a `TimeSpan`, or a plain `Range` of timestamps.
 */

use std::fmt;
use std::ops::{BitAnd, Range, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::line_set::NodeId;

/// A point in time. Any consistent unit works; milliseconds by convention.
pub type Timestamp = i64;

/// Interval during which a line is visible
///
/// `begin <= end` is expected but never checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub begin: Timestamp,
    pub end: Timestamp,
}

impl TimeSpan {
    pub fn new(begin: Timestamp, end: Timestamp) -> Self {
        Self { begin, end }
    }
}

impl From<Range<Timestamp>> for TimeSpan {
    fn from(range: Range<Timestamp>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<RangeInclusive<Timestamp>> for TimeSpan {
    fn from(range: RangeInclusive<Timestamp>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// Something with a beginning and an end in time
pub trait Spanned {
    fn begin(&self) -> Timestamp;

    fn end(&self) -> Timestamp;

    /// Alias of `begin`
    fn start(&self) -> Timestamp {
        self.begin()
    }

    fn duration(&self) -> Timestamp {
        self.end().saturating_sub(self.begin())
    }

    /// Ends at or before `time`
    fn is_before(&self, time: Timestamp) -> bool {
        self.end() <= time
    }

    /// Begins at or after `time`
    fn is_after(&self, time: Timestamp) -> bool {
        self.begin() >= time
    }

    /// Visible at `time`, both ends included
    fn is_during(&self, time: Timestamp) -> bool {
        self.begin() <= time && time <= self.end()
    }

    /// Length of the overlap with `other`, or 0 when they do not overlap
    fn intersect<S: Spanned + ?Sized>(&self, other: &S) -> Timestamp {
        let begin = self.begin().max(other.begin());
        let end = self.end().min(other.end());

        if end <= begin { 0 } else { end.saturating_sub(begin) }
    }

    fn is_intersecting<S: Spanned + ?Sized>(&self, other: &S) -> bool {
        self.intersect(other) > 0
    }
}

impl Spanned for TimeSpan {
    fn begin(&self) -> Timestamp {
        self.begin
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

impl Spanned for Range<Timestamp> {
    fn begin(&self) -> Timestamp {
        self.start
    }

    fn end(&self) -> Timestamp {
        self.end
    }
}

impl Spanned for RangeInclusive<Timestamp> {
    fn begin(&self) -> Timestamp {
        *RangeInclusive::start(self)
    }

    fn end(&self) -> Timestamp {
        *RangeInclusive::end(self)
    }
}

impl BitAnd for &TimeSpan {
    type Output = Timestamp;

    fn bitand(self, other: Self) -> Timestamp {
        self.intersect(other)
    }
}

/// Operand for intersections resolved against a chain at runtime
///
/// Only spans and line nodes have a beginning and an end; intersecting with
/// an `Instant` or a sentinel node is a type mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extent {
    Span(TimeSpan),
    Node(NodeId),
    Instant(Timestamp),
}

impl From<TimeSpan> for Extent {
    fn from(span: TimeSpan) -> Self {
        Self::Span(span)
    }
}

impl From<Range<Timestamp>> for Extent {
    fn from(range: Range<Timestamp>) -> Self {
        Self::Span(range.into())
    }
}

impl From<NodeId> for Extent {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Timestamp> for Extent {
    fn from(time: Timestamp) -> Self {
        Self::Instant(time)
    }
}
