/*!
 * Line sets: time-aware traversal over a chain of lines.
 *
 * Anything that can name a head and a tail sentinel gets the same
 * algorithms: the `Subtitle` root with its real sentinels, and a `Scope`
 * built from a single line's virtual sentinels.
 *
 * - `item`: the arena, its sentinels and the primitive link operations
 */

pub mod item;

use std::iter::{self, FusedIterator};

use log::trace;

use crate::errors::{Result, SubtitleError};
use crate::line::Line;
use crate::time_span::{Spanned, Timestamp};

pub use item::{Chain, NodeId, NodeKind};

/// Time limit for a traversal, given either directly or through a line
///
/// A line used as an `after` bound contributes its end, a line used as a
/// `before` bound its beginning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Time(Timestamp),
    Node(NodeId),
}

impl From<Timestamp> for Bound {
    fn from(time: Timestamp) -> Self {
        Self::Time(time)
    }
}

impl From<NodeId> for Bound {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

fn bound_line<'a>(chain: &'a Chain, id: NodeId, role: &str) -> Result<&'a Line> {
    chain.line(id).ok_or_else(|| {
        SubtitleError::TypeMismatch(format!(
            "Unsupported type of {}: {} is a {:?}", role, id, chain.kind(id)
        ))
    })
}

fn after_time(chain: &Chain, bound: Bound) -> Result<Timestamp> {
    match bound {
        Bound::Time(time) => Ok(time),
        Bound::Node(id) => Ok(bound_line(chain, id, "after")?.end()),
    }
}

fn before_time(chain: &Chain, bound: Bound) -> Result<Timestamp> {
    match bound {
        Bound::Time(time) => Ok(time),
        Bound::Node(id) => Ok(bound_line(chain, id, "before")?.begin()),
    }
}

/// First line after `head` that begins at or after `after`
fn start_cursor(chain: &Chain, head: NodeId, after: Option<Timestamp>) -> Option<NodeId> {
    let mut cursor = chain.next(head).ok()?;

    if let Some(after) = after {
        while !chain.line(cursor)?.is_after(after) {
            cursor = chain.next(cursor).ok()?;
        }
    }

    Some(cursor)
}

/// Follow `step` from `start` a number of times, `None` if it runs out
fn walk(start: Option<NodeId>, steps: usize, step: impl Fn(NodeId) -> Option<NodeId>) -> Option<NodeId> {
    (0..steps).try_fold(start?, |id, _| step(id))
}

/// Lazy forward traversal over the lines of a set
///
/// The next item is read from the chain each time one is yielded. The
/// iterator borrows the chain, so it is not possible to delete lines while a
/// traversal is in progress; collect the ids first when that is needed.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    chain: &'a Chain,
    cursor: Option<NodeId>,
    stop: Option<Timestamp>,
}

impl<'a> Lines<'a> {
    /// Yield the lines themselves instead of their ids
    pub fn lines(self) -> impl Iterator<Item = &'a Line> + 'a {
        let chain = self.chain;
        self.filter_map(move |id| chain.line(id))
    }
}

impl Iterator for Lines<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor.take()?;
        let line = self.chain.line(current)?;

        if let Some(stop) = self.stop {
            if !line.is_before(stop) {
                return None;
            }
        }

        self.cursor = self.chain.next(current).ok();
        Some(current)
    }
}

impl FusedIterator for Lines<'_> {}

/// Traversal and query algorithms over a chain bounded by two sentinels
pub trait LineSet {
    fn chain(&self) -> &Chain;

    fn chain_mut(&mut self) -> &mut Chain;

    /// Sentinel in front of the first line of the set
    fn head(&self) -> NodeId;

    /// Sentinel behind the last line of the set
    fn tail(&self) -> NodeId;

    /// Every line from the start of the set to the end of its chain
    fn iter(&self) -> Lines<'_> {
        Lines {
            chain: self.chain(),
            cursor: self.chain().next(self.head()).ok(),
            stop: None,
        }
    }

    /// Lines within the time frame set by `before` and `after`
    ///
    /// Lines are skipped until the first one that begins at or after `after`.
    /// The traversal ends at the first line that does not end at or before
    /// `before`. Either bound may be left out.
    fn each(&self, before: Option<Bound>, after: Option<Bound>) -> Result<Lines<'_>> {
        let chain = self.chain();
        let after = after.map(|bound| after_time(chain, bound)).transpose()?;
        let stop = before.map(|bound| before_time(chain, bound)).transpose()?;

        trace!("Traversing from {} (after: {:?}, before: {:?})", self.head(), after, stop);

        Ok(Lines {
            chain,
            cursor: start_cursor(chain, self.head(), after),
            stop,
        })
    }

    /// The first line beginning at or after `after`
    fn first(&self, after: Option<Bound>) -> Result<Option<NodeId>> {
        let chain = self.chain();
        let after = after.map(|bound| after_time(chain, bound)).transpose()?;
        Ok(start_cursor(chain, self.head(), after))
    }

    /// Up to `n` consecutive lines starting where `first` would
    fn first_n(&self, n: usize, after: Option<Bound>) -> Result<Vec<NodeId>> {
        let chain = self.chain();
        let start = self.first(after)?;

        Ok(iter::successors(start, |id| chain.next(*id).ok()).take(n).collect())
    }

    /// The last line ending at or before `before`
    fn last(&self, before: Option<Bound>) -> Result<Option<NodeId>> {
        Ok(self.each(before, None)?.last())
    }

    /// Up to `n` lines ending with the one `last` would return, in chain order
    fn last_n(&self, n: usize, before: Option<Bound>) -> Result<Vec<NodeId>> {
        let chain = self.chain();
        let end = self.last(before)?;

        let mut ids: Vec<NodeId> = iter::successors(end, |id| chain.previous(*id).ok()).take(n).collect();
        ids.reverse();
        Ok(ids)
    }

    /// Delete the line at `offset`, counting from the end when negative
    ///
    /// `0` is the first line and `-1` the last. An offset outside the set
    /// leaves it untouched and returns `Ok(None)`. Fails with
    /// `StructuralError` when the reached line is already detached, which
    /// happens on a `Scope` whose anchor line was deleted.
    fn delete_at(&mut self, offset: isize) -> Result<Option<NodeId>> {
        let chain = self.chain();

        let target = if offset >= 0 {
            walk(chain.next(self.head()).ok(), offset.unsigned_abs(), |id| chain.next(id).ok())
        } else {
            let steps = offset.unsigned_abs() - 1;
            walk(chain.previous(self.tail()).ok(), steps, |id| chain.previous(id).ok())
        };

        let Some(id) = target else {
            trace!("Offset {} is outside the set, nothing deleted", offset);
            return Ok(None);
        };

        self.chain_mut().delete(id)?;
        Ok(Some(id))
    }
}

/// Virtual subset of a chain seen from one line
///
/// The line acts as the first line for forward traversal and as the last
/// line for negative offsets. Traversal still follows the real chain past
/// the line; only the starting points differ.
#[derive(Debug)]
pub struct Scope<'a> {
    chain: &'a mut Chain,
    head: NodeId,
    tail: NodeId,
}

impl<'a> Scope<'a> {
    /// Materialize (or reuse) the virtual sentinels of `line`
    pub fn new(chain: &'a mut Chain, line: NodeId) -> Result<Self> {
        let head = chain.virtual_head(line)?;
        let tail = chain.virtual_tail(line)?;
        Ok(Self { chain, head, tail })
    }

    /// Line the scope was built from
    pub fn anchor(&self) -> NodeId {
        self.chain.next_unchecked(self.head)
    }
}

impl LineSet for Scope<'_> {
    fn chain(&self) -> &Chain {
        &*self.chain
    }

    fn chain_mut(&mut self) -> &mut Chain {
        &mut *self.chain
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn tail(&self) -> NodeId {
        self.tail
    }
}
