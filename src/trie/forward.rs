//! The forward trie: source prefixes to replacement strings.

use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use slab::Slab;

use super::{empty_children, NodeId};
use crate::digits::Alphabet;

/// A node on the path of some source prefix.
///
/// At most one replacement lives at a node; intermediate nodes carry none.
/// The parent link is a plain arena index, not an owning edge, and exists
/// so subtree deletion can unwind without recursing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
struct ForwardNode {
    children: Box<[Option<NodeId>]>,
    replacement: Option<String>,
    parent: Option<NodeId>,
}

impl ForwardNode {
    fn new(width: usize, parent: Option<NodeId>) -> Self {
        ForwardNode {
            children: empty_children(width),
            replacement: None,
            parent,
        }
    }
}

/// Prefix trie over source numbers, keyed by digit index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
#[derive(Debug)]
pub(crate) struct ForwardTree<A: Alphabet> {
    nodes: Slab<ForwardNode>,
    root: NodeId,
    _alphabet: PhantomData<A>,
}

impl<A: Alphabet> ForwardTree<A> {
    pub(crate) fn new() -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(ForwardNode::new(A::SIZE, None));
        ForwardTree {
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
                    let next = self.nodes.insert(ForwardNode::new(A::SIZE, Some(node)));
                    self.nodes[node].children[d as usize] = Some(next);
                    next
                }
            };
        }
        node
    }

    /// The node `digits` spells, or `None` when the path is incomplete.
    pub(crate) fn node_at(&self, digits: &[u8]) -> Option<NodeId> {
        let mut node = self.root;
        for &d in digits {
            node = self.nodes[node].children[d as usize]?;
        }
        Some(node)
    }

    pub(crate) fn replacement(&self, node: NodeId) -> Option<&str> {
        self.nodes[node].replacement.as_deref()
    }

    /// Installs `replacement` at `node`, returning the value it displaces.
    pub(crate) fn set_replacement(
        &mut self,
        node: NodeId,
        replacement: String,
    ) -> Option<String> {
        self.nodes[node].replacement.replace(replacement)
    }

    /// The deepest replacement on the path of `digits`.
    ///
    /// Walks until the key is exhausted or a slot is empty; the node the
    /// walk stops at is examined as well. Returns the replacement string
    /// and the number of digits consumed to reach its node.
    pub(crate) fn longest_rule(&self, digits: &[u8]) -> Option<(&str, usize)> {
        let mut node = self.root;
        let mut depth = 0;
        let mut hit = None;
        while depth < digits.len() {
            match self.nodes[node].children[digits[depth] as usize] {
                Some(next) => {
                    if let Some(replacement) = self.nodes[node].replacement.as_deref() {
                        hit = Some((replacement, depth));
                    }
                    node = next;
                    depth += 1;
                }
                None => break,
            }
        }
        if let Some(replacement) = self.nodes[node].replacement.as_deref() {
            hit = Some((replacement, depth));
        }
        hit
    }

    /// Deletes the whole subtree rooted at `node` and detaches it from its
    /// parent.
    ///
    /// Runs without recursion: descend into the first occupied child slot
    /// until none is left, then unlink the node, free it, and step back up
    /// through the parent link. Key length therefore never translates into
    /// stack depth.
    pub(crate) fn erase_subtree(&mut self, node: NodeId) {
        let stop = self.nodes[node].parent;
        let mut current = node;
        loop {
            if let Some(child) = self.first_child(current) {
                current = child;
                continue;
            }
            let parent = self.nodes[current].parent;
            if let Some(pid) = parent {
                self.unlink(pid, current);
            }
            self.nodes.remove(current);
            match parent {
                Some(pid) if parent != stop => current = pid,
                _ => break,
            }
        }
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].children.iter().flatten().next().copied()
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        for slot in self.nodes[parent].children.iter_mut() {
            if *slot == Some(child) {
                *slot = None;
                break;
            }
        }
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
