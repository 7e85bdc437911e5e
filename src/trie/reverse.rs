//! The reverse trie: replacement prefixes to the sources behind them.

use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slab::Slab;

use super::{empty_children, NodeId};
use crate::digits::Alphabet;

/// A node on the path of some replacement prefix.
///
/// `sources` is a bag: a source appears once per rule currently
/// redirecting through this path, and duplicates are tolerated until the
/// query-time dedup pass. Nodes are never torn out one by one, so no
/// parent link is kept here.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
struct ReverseNode {
    children: Box<[Option<NodeId>]>,
    sources: Vec<String>,
}

impl ReverseNode {
    fn new(width: usize) -> Self {
        ReverseNode {
            children: empty_children(width),
            sources: Vec::new(),
        }
    }
}

/// Prefix trie over replacement numbers, keyed by digit index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
#[derive(Debug)]
pub(crate) struct ReverseTree<A: Alphabet> {
    nodes: Slab<ReverseNode>,
    root: NodeId,
    _alphabet: PhantomData<A>,
}

impl<A: Alphabet> ReverseTree<A> {
    pub(crate) fn new() -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(ReverseNode::new(A::SIZE));
        ReverseTree {
            nodes,
            root,
            _alphabet: PhantomData,
        }
    }

    /// Walks down along `digits`, creating empty slots on the way, and
    /// returns the node the full path spells.
    pub(crate) fn ensure_path(&mut self, digits: &[u8]) -> NodeId {
        let mut node = self.root;
        for &d in digits {
            node = match self.nodes[node].children[d as usize] {
                Some(next) => next,
                None => {
                    let next = self.nodes.insert(ReverseNode::new(A::SIZE));
                    self.nodes[node].children[d as usize] = Some(next);
                    next
                }
            };
        }
        node
    }

    fn node_at(&self, digits: &[u8]) -> Option<NodeId> {
        let mut node = self.root;
        for &d in digits {
            node = self.nodes[node].children[d as usize]?;
        }
        Some(node)
    }

    /// Appends `source` to the bag at `node`.
    pub(crate) fn push_source(&mut self, node: NodeId, source: String) {
        self.nodes[node].sources.push(source);
    }

    /// Removes one bag entry equal to `source` at the node `target`
    /// spells, if both exist.
    ///
    /// Used when a rule is overwritten; entries of other rules sharing the
    /// node stay untouched. Bag order is irrelevant, results are sorted at
    /// query time.
    pub(crate) fn remove_source_once(&mut self, target: &[u8], source: &str) {
        if let Some(node) = self.node_at(target) {
            let sources = &mut self.nodes[node].sources;
            if let Some(at) = sources.iter().position(|s| s == source) {
                sources.swap_remove(at);
            }
        }
    }

    /// Drops every bag entry in the whole tree that `prefix` is a prefix
    /// of.
    ///
    /// Runs as a depth-first traversal over an explicit stack; the node
    /// structure itself is left in place.
    pub(crate) fn evict_prefixed(&mut self, prefix: &str) {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            self.nodes[node]
                .sources
                .retain(|s| !s.starts_with(prefix));
            stack.extend(self.nodes[node].children.iter().flatten());
        }
    }

    /// Iterates the non-empty bags on the path of `digits`, in root-to-leaf
    /// order, together with the digit count consumed to reach each one.
    pub(crate) fn sources_along<'t>(&'t self, digits: &'t [u8]) -> SourcesAlong<'t, A> {
        SourcesAlong {
            tree: self,
            node: self.root,
            digits,
            consumed: 0,
        }
    }
}

/// Walk of the reverse trie along a fixed key.
pub(crate) struct SourcesAlong<'t, A: Alphabet> {
    tree: &'t ReverseTree<A>,
    node: NodeId,
    digits: &'t [u8],
    consumed: usize,
}

impl<'t, A: Alphabet> Iterator for SourcesAlong<'t, A> {
    type Item = (usize, &'t [String]);

    fn next(&mut self) -> Option<Self::Item> {
        while self.consumed < self.digits.len() {
            let d = self.digits[self.consumed] as usize;
            self.node = self.tree.nodes[self.node].children[d]?;
            self.consumed += 1;
            let sources = &self.tree.nodes[self.node].sources;
            if !sources.is_empty() {
                return Some((self.consumed, sources));
            }
        }
        None
    }
}
