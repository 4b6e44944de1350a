//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Parents always precede their
//! children in the arena, and the whole tree is dropped at once.

use chess_core::Color;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S, M> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S, M>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S, M: PartialEq> MctsTree<S, M> {
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: S, side_to_move: Color, untried_moves: Vec<M>) -> Self {
        let root_node = MctsNode::new_root(root_state, side_to_move, untried_moves);
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S, M> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S, M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<S, M>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of a node with the highest UCB1 score.
    ///
    /// `perspective_is_opponent` is true when the side choosing at `node_id`
    /// is not the searching side. Ties go to the earliest child.
    pub fn select_child(
        &self,
        node_id: NodeId,
        perspective_is_opponent: bool,
        c: f64,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visit_count as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self
                .get(child_id)
                .ucb_score(parent_visits_ln, c, perspective_is_opponent);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node, moving `mv` out of the parent's untried moves.
    /// The child's side to move is the parent's opponent.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: M, state: S, untried_moves: Vec<M>) -> NodeId {
        let parent = self.get_mut(parent_id);
        if let Some(pos) = parent.untried_moves.iter().rposition(|m| *m == mv) {
            parent.untried_moves.remove(pos);
        }
        let side_to_move = parent.side_to_move.opponent();

        let child = MctsNode::new_child(parent_id, mv, side_to_move, state, untried_moves);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Backpropagate a reward from a node to the root.
    /// Every node on the path receives the same reward.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.update(reward);
            current_id = node.parent;
        }
    }

    /// The root child with the most visits (robust child).
    /// Ties go to the earliest expanded child. None if the root has no children.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;
        for &child_id in &root.children {
            let visits = self.get(child_id).visit_count;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child_id, visits)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Get the visit count distribution over root children.
    /// Returns (move, visit_fraction) pairs in expansion order, empty if unvisited.
    pub fn visit_distribution(&self) -> Vec<(M, f64)>
    where
        M: Copy,
    {
        let root = self.get(self.root);
        let total_visits: u32 = root
            .children
            .iter()
            .map(|id| self.get(*id).visit_count)
            .sum();

        if total_visits == 0 {
            return Vec::new();
        }

        root.children
            .iter()
            .filter_map(|id| {
                let node = self.get(*id);
                node.move_leading_here
                    .map(|mv| (mv, node.visit_count as f64 / total_visits as f64))
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_win_rate: root.win_rate(false),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Parents are allocated before their children, so one forward pass suffices
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[i] = depths[node.parent.0 as usize] + 1;
                max_depth = max_depth.max(depths[i]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    /// Root mean reward from the searching side's point of view
    pub root_win_rate: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestTree = MctsTree<u32, u8>;

    fn tree_with_moves(moves: Vec<u8>) -> TestTree {
        MctsTree::new(0, Color::White, moves)
    }

    #[test]
    fn test_new_tree() {
        let tree = tree_with_moves(vec![1, 2, 3]);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert_eq!(root.side_to_move, Color::White);
        assert_eq!(root.untried_moves, vec![1, 2, 3]);
    }

    #[test]
    fn test_add_child() {
        let mut tree = tree_with_moves(vec![1, 2, 3]);

        let child_id = tree.add_child(tree.root(), 2, 20, vec![7, 8]);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![NodeId(1)]);
        assert_eq!(root.untried_moves, vec![1, 3]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.move_leading_here, Some(2));
        assert_eq!(child.side_to_move, Color::Black);
        assert_eq!(child.state, 20);
        assert_eq!(child.untried_moves, vec![7, 8]);
    }

    #[test]
    fn test_expanding_every_move_never_duplicates() {
        let mut tree = tree_with_moves(vec![1, 2, 3]);
        let root = tree.root();

        while let Some(&mv) = tree.get(root).untried_moves.last() {
            tree.add_child(root, mv, mv as u32, vec![]);
        }

        let root_node = tree.get(root);
        assert!(root_node.is_fully_expanded());
        let mut moves: Vec<u8> = root_node
            .children
            .iter()
            .filter_map(|id| tree.get(*id).move_leading_here)
            .collect();
        moves.sort();
        assert_eq!(moves, vec![1, 2, 3]);
    }

    #[test]
    fn test_backpropagate_touches_only_the_path() {
        let mut tree = tree_with_moves(vec![0, 1]);

        // root -> (a -> grandchild, b)
        let a = tree.add_child(tree.root(), 0, 1, vec![5]);
        let b = tree.add_child(tree.root(), 1, 2, vec![]);
        let grandchild = tree.add_child(a, 5, 3, vec![]);

        tree.backpropagate(grandchild, 0.75);

        assert_eq!(tree.get(grandchild).visit_count, 1);
        assert_eq!(tree.get(a).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);
        assert_eq!(tree.get(b).visit_count, 0);

        // Same reward at every level, no negation
        for id in [grandchild, a, tree.root()] {
            assert!((tree.get(id).win_count - 0.75).abs() < 1e-12);
        }
        assert_eq!(tree.get(b).win_count, 0.0);
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let mut tree = tree_with_moves(vec![0, 1]);
        let a = tree.add_child(tree.root(), 0, 1, vec![]);
        let b = tree.add_child(tree.root(), 1, 2, vec![]);

        tree.backpropagate(a, 1.0);
        tree.backpropagate(a, 1.0);

        assert_eq!(tree.select_child(tree.root(), false, 1.0), Some(b));
    }

    #[test]
    fn test_select_child_ties_go_to_first() {
        let mut tree = tree_with_moves(vec![0, 1]);
        let a = tree.add_child(tree.root(), 0, 1, vec![]);
        tree.add_child(tree.root(), 1, 2, vec![]);

        assert_eq!(tree.select_child(tree.root(), false, 1.0), Some(a));
    }

    #[test]
    fn test_select_child_perspective_flip() {
        let mut tree = tree_with_moves(vec![0, 1]);
        let good = tree.add_child(tree.root(), 0, 1, vec![]);
        let bad = tree.add_child(tree.root(), 1, 2, vec![]);

        for _ in 0..5 {
            tree.backpropagate(good, 0.9);
            tree.backpropagate(bad, 0.1);
        }

        // Pure exploitation: searching side prefers high stored rewards,
        // the opponent prefers their complement
        assert_eq!(tree.select_child(tree.root(), false, 0.0), Some(good));
        assert_eq!(tree.select_child(tree.root(), true, 0.0), Some(bad));
    }

    #[test]
    fn test_select_child_without_children() {
        let tree = tree_with_moves(vec![]);
        assert_eq!(tree.select_child(tree.root(), false, 1.0), None);
    }

    #[test]
    fn test_best_child_by_visits() {
        let mut tree = tree_with_moves(vec![0, 1, 2]);
        assert_eq!(tree.best_child(), None);

        let c0 = tree.add_child(tree.root(), 0, 1, vec![]);
        let c1 = tree.add_child(tree.root(), 1, 2, vec![]);

        tree.get_mut(c0).visit_count = 3;
        tree.get_mut(c0).win_count = 3.0;
        tree.get_mut(c1).visit_count = 7;
        tree.get_mut(c1).win_count = 1.0;

        // Visits win over win rate
        assert_eq!(tree.best_child(), Some(c1));
    }

    #[test]
    fn test_visit_distribution() {
        let mut tree = tree_with_moves(vec![0, 1]);
        assert!(tree.visit_distribution().is_empty());

        let c1 = tree.add_child(tree.root(), 0, 1, vec![]);
        let c2 = tree.add_child(tree.root(), 1, 2, vec![]);

        tree.get_mut(c1).visit_count = 30;
        tree.get_mut(c2).visit_count = 70;

        let dist = tree.visit_distribution();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].0, 0);
        assert!((dist[0].1 - 0.3).abs() < 1e-12);
        assert_eq!(dist[1].0, 1);
        assert!((dist[1].1 - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = tree_with_moves(vec![0]);
        let child = tree.add_child(tree.root(), 0, 1, vec![3]);
        let grandchild = tree.add_child(child, 3, 2, vec![]);
        tree.backpropagate(grandchild, 1.0);
        tree.backpropagate(child, 0.0);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.root_visits, 2);
        assert!((stats.root_win_rate - 0.5).abs() < 1e-12);
        assert_eq!(stats.max_depth, 2);
    }
}
