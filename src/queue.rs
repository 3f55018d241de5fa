use crate::model::{NodeId, SelectionPolicy, TrackNode};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::fmt;
use tracing::debug;

/// Ordered chain of named tracks with a single playback cursor.
///
/// Nodes live in an arena of slots and link to each other through
/// [`NodeId`]s, so relinking a neighbour is O(1) and the cursor can never
/// outlive the node it points at: every structural mutation repairs it.
#[derive(Debug)]
pub struct MediaQueue {
    slots: Vec<Option<TrackNode>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    cursor: Option<NodeId>,
    len: usize,
    policy: SelectionPolicy,
    rng: SmallRng,
}

impl Default for MediaQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaQueue {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::try_from_rng(&mut rand::rngs::SysRng).expect("unexpected failure from SysRng"))
    }

    /// Queue whose shuffle draws are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            cursor: None,
            len: 0,
            policy: SelectionPolicy::Sequential,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    pub fn node(&self, id: NodeId) -> Option<&TrackNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TrackNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.policy.is_shuffle()
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.policy = SelectionPolicy::from_shuffle(enabled);
    }

    /// Appends a track at the tail. The first track of an empty queue also
    /// becomes the current one.
    ///
    /// Any name is accepted here; blank or padded names are refused when the
    /// queue is saved, and the command front end trims and refuses blanks.
    pub fn insert(&mut self, name: impl Into<String>) {
        let mut node = TrackNode::detached(name.into());
        node.prev = self.tail;
        let id = self.alloc(node);

        match self.tail {
            Some(tail) => {
                if let Some(last) = self.node_mut(tail) {
                    last.next = Some(id);
                }
            }
            None => {
                self.head = Some(id);
                self.cursor = Some(id);
            }
        }
        self.tail = Some(id);
        self.len += 1;
        debug!(node = %id, len = self.len, "track inserted");
    }

    fn alloc(&mut self, node: TrackNode) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Removes the first track named exactly `name`.
    ///
    /// If that track was current, the cursor moves to its successor, or to
    /// its predecessor when it was the tail, or clears when the queue
    /// becomes empty.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(id) = self.find(name) else {
            debug!(name, "remove found no match");
            return false;
        };
        let Some(node) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return false;
        };

        match node.prev {
            Some(prev) => {
                if let Some(before) = self.node_mut(prev) {
                    before.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(after) = self.node_mut(next) {
                    after.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        if self.cursor == Some(id) {
            self.cursor = node.next.or(node.prev);
        }
        self.free.push(id.0);
        self.len -= 1;
        debug!(node = %id, len = self.len, "track removed");
        true
    }

    /// Moves the cursor forward according to the selection policy.
    ///
    /// Sequential mode stops at the tail. Shuffle mode draws uniformly from
    /// every other track and leaves a single-track queue where it is.
    pub fn advance(&mut self) {
        let Some(current) = self.cursor else {
            return;
        };

        if self.policy.is_shuffle() {
            let mut candidates: Vec<NodeId> = self
                .nodes()
                .map(|(id, _)| id)
                .filter(|id| *id != current)
                .collect();
            candidates.shuffle(&mut self.rng);
            if let Some(pick) = candidates.first().copied() {
                self.cursor = Some(pick);
            }
        } else if let Some(next) = self.node(current).and_then(TrackNode::next) {
            self.cursor = Some(next);
        }
    }

    /// Moves the cursor to the previous track. Always sequential.
    pub fn retreat(&mut self) {
        if let Some(prev) = self
            .cursor
            .and_then(|current| self.node(current))
            .and_then(TrackNode::prev)
        {
            self.cursor = Some(prev);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|id| self.node(id))
            .map(TrackNode::name)
    }

    /// Zero-based chain position of the current track.
    pub fn cursor_position(&self) -> Option<usize> {
        let cursor = self.cursor?;
        self.nodes().position(|(id, _)| id == cursor)
    }

    /// Current track again, cursor untouched.
    pub fn replay(&self) -> Option<&str> {
        let current = self.current();
        debug!(track = current, "replaying current track");
        current
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Zero-based chain positions of every track named exactly `name`.
    pub fn positions(&self, name: &str) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, candidate)| *candidate == name)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn to_sequence(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes().map(|(_, node)| node.name())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.cursor = None;
        self.len = 0;
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    fn nodes(&self) -> Nodes<'_> {
        Nodes {
            queue: self,
            next: self.head,
        }
    }
}

struct Nodes<'a> {
    queue: &'a MediaQueue,
    next: Option<NodeId>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (NodeId, &'a TrackNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.queue.node(id)?;
        self.next = node.next;
        Some((id, node))
    }
}

impl<S: Into<String>> Extend<S> for MediaQueue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, names: I) {
        for name in names {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for MediaQueue {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        let mut queue = Self::new();
        queue.extend(names);
        queue
    }
}

impl fmt::Display for MediaQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        for (position, name) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" → ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
