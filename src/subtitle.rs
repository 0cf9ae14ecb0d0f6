/*!
 * The subtitle collection root.
 *
 * A `Subtitle` owns an arena with one real chain of lines in it. Parsers for
 * on-disk formats feed it ordered `CueRecord`s and encoders read them back;
 * neither lives in this crate.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::errors::Result;
use crate::formatting::SectionSpec;
use crate::line::Line;
use crate::line_set::{Chain, LineSet, NodeId, Scope};
use crate::time_span::{Spanned, TimeSpan, Timestamp};

/// Plain timing and text of one line, the shape exchanged with encoders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueRecord {
    pub begin: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl CueRecord {
    pub fn new(begin: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
        }
    }
}

impl From<&Line> for CueRecord {
    fn from(line: &Line) -> Self {
        Self::new(line.begin(), line.end(), line.text())
    }
}

/// Ordered collection of subtitle lines
#[derive(Debug, Clone)]
pub struct Subtitle {
    chain: Chain,
    head: NodeId,
    tail: NodeId,
    config: Config,
}

impl Default for Subtitle {
    fn default() -> Self {
        Self::new()
    }
}

impl Subtitle {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut chain = Chain::with_capacity(config.initial_capacity);
        let (head, tail) = chain.sentinels();

        Self {
            chain,
            head,
            tail,
            config,
        }
    }

    /// Build a collection by appending records in the order given
    pub fn from_records<I: IntoIterator<Item = CueRecord>>(records: I) -> Self {
        let mut subtitle = Self::new();
        for record in records {
            subtitle.add(TimeSpan::new(record.begin, record.end), record.text);
        }
        subtitle
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a line after the current last one
    pub fn add(&mut self, time_span: impl Into<TimeSpan>, text: impl ToString) -> NodeId {
        let mut line = Line::new(time_span, text);

        if !self.config.default_format.is_empty() {
            // The whole-line section always resolves
            let _ = line.format(SectionSpec::Whole, &self.config.default_format);
        }

        let id = self.chain.push_before_tail(self.tail, line);
        debug!("Added line {}", id);
        id
    }

    /// First line, `None` when the collection is empty
    pub fn first_line(&self) -> Option<NodeId> {
        self.chain.next(self.head).ok()
    }

    /// Last line, `None` when the collection is empty
    pub fn last_line(&self) -> Option<NodeId> {
        self.chain.previous(self.tail).ok()
    }

    /// Number of lines currently in the collection
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first_line().is_none()
    }

    pub fn line(&self, id: NodeId) -> Option<&Line> {
        self.chain.line(id)
    }

    pub fn line_mut(&mut self, id: NodeId) -> Option<&mut Line> {
        self.chain.line_mut(id)
    }

    /// Line following `id`, `None` at the end of the collection
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.chain.next(id).ok()
    }

    /// Line preceding `id`, `None` at the start of the collection
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.chain.previous(id).ok()
    }

    /// Line set seen from `line`, which becomes its first and last line
    pub fn scope(&mut self, line: NodeId) -> Result<Scope<'_>> {
        Scope::new(&mut self.chain, line)
    }

    /// Timing and text of every line in order
    pub fn records(&self) -> Vec<CueRecord> {
        self.iter().lines().map(CueRecord::from).collect()
    }
}

impl LineSet for Subtitle {
    fn chain(&self) -> &Chain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn tail(&self) -> NodeId {
        self.tail
    }
}
