/*!
 * Chain items and sentinels.
 *
 * Lines live in an arena (`Chain`) and refer to their neighbors through
 * `NodeId` handles. Every chain is bounded by a `Head` and a `Tail` sentinel:
 * a head's previous item is itself and can never be set, a tail's next item
 * is itself and can never be set. Handles are never reused, so a deleted
 * line can still be read through its id after it has left the chain.
 */

use std::fmt;

use log::debug;

use crate::errors::{Result, SubtitleError};
use crate::line::Line;
use crate::time_span::{Extent, Spanned, Timestamp};

/// Stable handle to a node in a `Chain`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Head,
    Tail,
    Line(Line),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    next: NodeId,
    previous: NodeId,
    // False once deleted, and always false for virtual sentinels
    attached: bool,
    // Line a virtual sentinel was created for
    anchor: Option<NodeId>,
    virtual_head: Option<NodeId>,
    virtual_tail: Option<NodeId>,
}

/// Arena owning every node of one or more chains
///
/// Methods taking a `NodeId` panic if the id was not handed out by this
/// chain, the same way slice indexing does.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    nodes: Vec<Node>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes ever allocated, sentinels and deleted lines included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, kind: NodeKind, attached: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            next: id,
            previous: id,
            attached,
            anchor: None,
            virtual_head: None,
            virtual_tail: None,
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Allocate an empty chain: a head linked directly to a tail
    pub fn sentinels(&mut self) -> (NodeId, NodeId) {
        let head = self.alloc(NodeKind::Head, true);
        let tail = self.alloc(NodeKind::Tail, true);
        self.connect(head, tail);
        (head, tail)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn is_head(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Head)
    }

    pub fn is_tail(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Tail)
    }

    pub fn is_line(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Line(_))
    }

    /// Whether the node is part of a chain right now
    ///
    /// Deleted lines and virtual sentinels are not.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).attached
    }

    /// The line a virtual sentinel stands in front of or behind
    pub fn anchor(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).anchor
    }

    pub fn line(&self, id: NodeId) -> Option<&Line> {
        match &self.node(id).kind {
            NodeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn line_mut(&mut self, id: NodeId) -> Option<&mut Line> {
        match &mut self.node_mut(id).kind {
            NodeKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Next item, failing with `EndOfSequence` when that item is a tail
    pub fn next(&self, id: NodeId) -> Result<NodeId> {
        let next = self.next_unchecked(id);
        if self.is_tail(next) {
            return Err(SubtitleError::EndOfSequence);
        }
        Ok(next)
    }

    /// Next item, whatever it is. A tail is its own next item.
    pub fn next_unchecked(&self, id: NodeId) -> NodeId {
        self.node(id).next
    }

    /// Previous item, failing with `EndOfSequence` when that item is a head
    pub fn previous(&self, id: NodeId) -> Result<NodeId> {
        let previous = self.previous_unchecked(id);
        if self.is_head(previous) {
            return Err(SubtitleError::EndOfSequence);
        }
        Ok(previous)
    }

    /// Previous item, whatever it is. A head is its own previous item.
    pub fn previous_unchecked(&self, id: NodeId) -> NodeId {
        self.node(id).previous
    }

    /// True when the real previous item is a head
    ///
    /// Virtual sentinels are never linked from the chain, so they do not
    /// affect the answer.
    pub fn is_first(&self, id: NodeId) -> bool {
        self.is_head(self.previous_unchecked(id))
    }

    /// True when the real next item is a tail
    pub fn is_last(&self, id: NodeId) -> bool {
        self.is_tail(self.next_unchecked(id))
    }

    // Both sides are written together; callers have validated them
    fn connect(&mut self, from: NodeId, to: NodeId) {
        self.node_mut(from).next = to;
        self.node_mut(to).previous = from;
    }

    fn check_next_writable(&self, id: NodeId) -> Result<()> {
        if self.is_tail(id) {
            return Err(SubtitleError::StructuralError(format!(
                "Tail {} can not have anything come after it", id
            )));
        }
        Ok(())
    }

    fn check_previous_writable(&self, id: NodeId) -> Result<()> {
        if self.is_head(id) {
            return Err(SubtitleError::StructuralError(format!(
                "Head {} can not have anything come before it", id
            )));
        }
        Ok(())
    }

    fn check_attached(&self, id: NodeId) -> Result<()> {
        let node = self.node(id);
        if let Some(anchor) = node.anchor {
            return Err(SubtitleError::StructuralError(format!(
                "Virtual sentinel {} of line {} can not be linked", id, anchor
            )));
        }
        if !node.attached {
            return Err(SubtitleError::StructuralError(format!(
                "Node {} is not attached to a chain", id
            )));
        }
        Ok(())
    }

    /// Make `to` follow `from`, updating both sides at once
    ///
    /// Nothing changes when either side may not be written.
    pub fn link(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_next_writable(from)?;
        self.check_previous_writable(to)?;
        self.connect(from, to);
        Ok(())
    }

    /// Remove a line from its chain in constant time
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        if !self.is_line(id) {
            return Err(SubtitleError::StructuralError(format!(
                "Sentinel {} can not be deleted", id
            )));
        }
        self.check_attached(id)?;

        let previous = self.previous_unchecked(id);
        let next = self.next_unchecked(id);
        self.link(previous, next)?;
        self.node_mut(id).attached = false;

        debug!("Deleted line {} (between {} and {})", id, previous, next);
        Ok(())
    }

    /// Create a line in a private chain of its own
    pub fn standalone(&mut self, line: Line) -> NodeId {
        let (head, tail) = self.sentinels();
        let id = self.alloc(NodeKind::Line(line), true);
        self.connect(head, id);
        self.connect(id, tail);

        debug!("Created standalone line {}", id);
        id
    }

    /// Splice a new line right after `after`, which keeps nothing of its old
    /// successor but the link through the new line
    pub fn insert_after(&mut self, after: NodeId, line: Line) -> Result<NodeId> {
        self.check_attached(after)?;
        self.check_next_writable(after)?;

        let successor = self.next_unchecked(after);
        let id = self.alloc(NodeKind::Line(line), true);
        self.connect(id, successor);
        self.connect(after, id);

        debug!("Inserted line {} after {}", id, after);
        Ok(id)
    }

    /// Splice a new line right before `before`
    pub fn insert_before(&mut self, before: NodeId, line: Line) -> Result<NodeId> {
        self.check_attached(before)?;
        self.check_previous_writable(before)?;

        let predecessor = self.previous_unchecked(before);
        let id = self.alloc(NodeKind::Line(line), true);
        self.connect(predecessor, id);
        self.connect(id, before);

        debug!("Inserted line {} before {}", id, before);
        Ok(id)
    }

    /// Replace the direct link `previous -> next` with `previous -> new -> next`
    pub fn insert_between(&mut self, previous: NodeId, next: NodeId, line: Line) -> Result<NodeId> {
        self.check_attached(previous)?;
        self.check_attached(next)?;
        self.check_next_writable(previous)?;
        self.check_previous_writable(next)?;

        if self.next_unchecked(previous) != next {
            return Err(SubtitleError::StructuralError(format!(
                "Nodes {} and {} are not adjacent", previous, next
            )));
        }

        let id = self.alloc(NodeKind::Line(line), true);
        self.connect(previous, id);
        self.connect(id, next);

        debug!("Inserted line {} between {} and {}", id, previous, next);
        Ok(id)
    }

    /// Append before `tail` without checks; `tail` must be an attached tail
    pub(crate) fn push_before_tail(&mut self, tail: NodeId, line: Line) -> NodeId {
        let predecessor = self.previous_unchecked(tail);
        let id = self.alloc(NodeKind::Line(line), true);
        self.connect(predecessor, id);
        self.connect(id, tail);
        id
    }

    /// Head of a virtual subset where this line is the first one
    ///
    /// Created on first request and reused afterwards. The shared chain is
    /// not touched: the sentinel points at the line, the line does not point
    /// back.
    pub fn virtual_head(&mut self, id: NodeId) -> Result<NodeId> {
        if let Some(head) = self.virtual_sentinel(id, true)? {
            return Ok(head);
        }

        let head = self.alloc(NodeKind::Head, false);
        let node = self.node_mut(head);
        node.next = id;
        node.anchor = Some(id);
        self.node_mut(id).virtual_head = Some(head);

        debug!("Created virtual head {} for line {}", head, id);
        Ok(head)
    }

    /// Tail of a virtual subset where this line is the last one
    pub fn virtual_tail(&mut self, id: NodeId) -> Result<NodeId> {
        if let Some(tail) = self.virtual_sentinel(id, false)? {
            return Ok(tail);
        }

        let tail = self.alloc(NodeKind::Tail, false);
        let node = self.node_mut(tail);
        node.previous = id;
        node.anchor = Some(id);
        self.node_mut(id).virtual_tail = Some(tail);

        debug!("Created virtual tail {} for line {}", tail, id);
        Ok(tail)
    }

    fn virtual_sentinel(&self, id: NodeId, head: bool) -> Result<Option<NodeId>> {
        if !self.is_line(id) {
            return Err(SubtitleError::TypeMismatch(format!(
                "Only lines have virtual sentinels, {} is a {:?}", id, self.kind(id)
            )));
        }
        let node = self.node(id);
        Ok(if head { node.virtual_head } else { node.virtual_tail })
    }

    /// Overlap between a line and anything with a beginning and an end
    pub fn intersect(&self, id: NodeId, other: impl Into<Extent>) -> Result<Timestamp> {
        let line = self.line(id).ok_or_else(|| {
            SubtitleError::TypeMismatch(format!("{} is not a line", id))
        })?;

        match other.into() {
            Extent::Span(span) => Ok(line.intersect(&span)),
            Extent::Node(other) => self
                .line(other)
                .map(|other| line.intersect(other))
                .ok_or_else(|| SubtitleError::TypeMismatch(format!(
                    "Sentinel {} does not have a beginning and an end", other
                ))),
            Extent::Instant(time) => Err(SubtitleError::TypeMismatch(format!(
                "Time {} does not have a beginning and an end", time
            ))),
        }
    }
}
