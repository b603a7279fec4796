//! Weighted prefix trie.
//!
//! Every node records the most popular entry in its subtree, so a prefix lookup
//! is O(k) in the prefix length with no subtree search.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<u8, usize>,
    /// Lowest rank (highest weight) of any key below this node
    best_rank: Option<usize>,
}

/// Byte trie over lowercased keys
#[derive(Debug, Clone)]
pub struct WeightedTrie {
    nodes: Vec<TrieNode>,
}

impl Default for WeightedTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Insert `key` with popularity `rank`. O(k) in the key length.
    pub fn insert(&mut self, key: &str, rank: usize) {
        let mut node_idx = 0;
        Self::offer(&mut self.nodes[node_idx], rank);

        for &byte in key.to_lowercase().as_bytes() {
            let next_idx = match self.nodes[node_idx].children.get(&byte) {
                Some(&id) => id,
                None => {
                    let new_id = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node_idx].children.insert(byte, new_id);
                    new_id
                }
            };
            node_idx = next_idx;
            Self::offer(&mut self.nodes[node_idx], rank);
        }
    }

    fn offer(node: &mut TrieNode, rank: usize) {
        match node.best_rank {
            Some(best) if best <= rank => {}
            _ => node.best_rank = Some(rank),
        }
    }

    /// Rank of the most popular key starting with `prefix`, if any.
    pub fn best_with_prefix(&self, prefix: &str) -> Option<usize> {
        let mut node_idx = 0;
        for &byte in prefix.to_lowercase().as_bytes() {
            node_idx = *self.nodes[node_idx].children.get(&byte)?;
        }
        self.nodes[node_idx].best_rank
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
