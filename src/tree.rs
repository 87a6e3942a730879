use std::cmp;
use std::fmt::{self, Write as _};

/// Arena index of the anchor sentinel. The anchor is the permanent
/// past-the-end position; its left child is the actual tree root.
pub(crate) const ANCHOR: u32 = 0;

/// Arena index of the nil sentinel standing in for "no child".
pub(crate) const NIL: u32 = 1;

/// One arena slot. Sentinels and recycled slots have no value.
struct Slot<T> {
    parent: u32,
    left: u32,
    right: u32,
    height: u32,
    weight: u32,
    generation: u32,
    value: Option<T>,
}

/// The raw order-statistics AVL tree over a slot arena.
///
/// All links are arena indices; the two sentinel slots are created on
/// construction and never recycled. Every operation here works on bare
/// indices with no validity checking; the public container layer in
/// `vector.rs` is responsible for handle validation.
pub(crate) struct Tree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        let mut slots = Vec::with_capacity(2);
        for _ in 0..2 {
            slots.push(Slot {
                parent: NIL,
                left: NIL,
                right: NIL,
                height: 0,
                weight: 0,
                generation: 0,
                value: None,
            });
        }
        Tree {
            slots,
            free: Vec::new(),
        }
    }

    #[inline]
    fn slot(&self, n: u32) -> &Slot<T> {
        &self.slots[n as usize]
    }

    #[inline]
    fn slot_mut(&mut self, n: u32) -> &mut Slot<T> {
        &mut self.slots[n as usize]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slot(self.slot(ANCHOR).left).weight as usize
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slot(ANCHOR).left == NIL
    }

    pub(crate) fn height(&self) -> usize {
        self.slot(self.slot(ANCHOR).left).height as usize
    }

    #[inline]
    pub(crate) fn value(&self, n: u32) -> &T {
        self.slot(n)
            .value
            .as_ref()
            .expect("sentinel or free slot has no value")
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, n: u32) -> &mut T {
        self.slot_mut(n)
            .value
            .as_mut()
            .expect("sentinel or free slot has no value")
    }

    #[inline]
    pub(crate) fn generation(&self, n: u32) -> u32 {
        self.slot(n).generation
    }

    /// Returns true if `n` currently names a live payload node of this
    /// arena with a matching generation.
    pub(crate) fn is_live(&self, n: u32, generation: u32) -> bool {
        n > NIL
            && (n as usize) < self.slots.len()
            && self.slot(n).value.is_some()
            && self.slot(n).generation == generation
    }

    // Node lifecycle ========================================================

    /// Takes a free slot (or grows the arena) and initializes it as a
    /// detached leaf holding `value`.
    pub(crate) fn alloc(&mut self, value: T) -> u32 {
        match self.free.pop() {
            Some(n) => {
                let slot = self.slot_mut(n);
                slot.parent = NIL;
                slot.left = NIL;
                slot.right = NIL;
                slot.height = 1;
                slot.weight = 1;
                slot.value = Some(value);
                n
            }
            None => {
                let n = self.slots.len() as u32;
                self.slots.push(Slot {
                    parent: NIL,
                    left: NIL,
                    right: NIL,
                    height: 1,
                    weight: 1,
                    generation: 0,
                    value: Some(value),
                });
                n
            }
        }
    }

    /// Retires a node's slot and returns its payload. The generation bump
    /// invalidates every outstanding handle to the slot.
    pub(crate) fn free(&mut self, n: u32) -> T {
        debug_assert!(n != ANCHOR && n != NIL);
        let slot = self.slot_mut(n);
        let value = slot.value.take().expect("double free of arena slot");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(n);
        value
    }

    // Link primitives =======================================================

    // Linking nil as a child only rewrites the parent's side; nil's own
    // links must stay self-referential.
    fn link_left(&mut self, parent: u32, child: u32) {
        self.slot_mut(parent).left = child;
        if child != NIL {
            self.slot_mut(child).parent = parent;
        }
    }

    fn link_right(&mut self, parent: u32, child: u32) {
        self.slot_mut(parent).right = child;
        if child != NIL {
            self.slot_mut(child).parent = parent;
        }
    }

    /// Replaces `old` with `new` in `old`'s parent slot.
    fn replace_child(&mut self, old: u32, new: u32) {
        let parent = self.slot(old).parent;
        if self.slot(parent).left == old {
            self.link_left(parent, new);
        } else {
            self.link_right(parent, new);
        }
    }

    fn update_height_weight(&mut self, n: u32) {
        let left = self.slot(n).left;
        let right = self.slot(n).right;
        let height = cmp::max(self.slot(left).height, self.slot(right).height) + 1;
        let weight = self.slot(left).weight + self.slot(right).weight + 1;
        let slot = self.slot_mut(n);
        slot.height = height;
        slot.weight = weight;
    }

    fn balance(&self, n: u32) -> i32 {
        self.slot(self.slot(n).right).height as i32 - self.slot(self.slot(n).left).height as i32
    }

    /// Resets a detached node to leaf shape before it is hung back into a
    /// tree. Its links may be stale from a previous position.
    fn reset_leaf(&mut self, n: u32) {
        let slot = self.slot_mut(n);
        slot.left = NIL;
        slot.right = NIL;
        slot.height = 1;
        slot.weight = 1;
    }

    // Rotations =============================================================
    //
    // Each rotation repairs the height and weight of the demoted node only;
    // the pivot is repaired by the continuing rebalance walk.

    fn rotate_left(&mut self, n: u32) -> u32 {
        // Balance 0 occurs only for the inner step of a double rotation.
        debug_assert!(self.balance(n) >= 0 && self.slot(n).right != NIL);
        let pivot = self.slot(n).right;
        let across = self.slot(pivot).left;

        self.replace_child(n, pivot);
        self.link_left(pivot, n);
        self.link_right(n, across);

        self.update_height_weight(n);
        pivot
    }

    fn rotate_right(&mut self, n: u32) -> u32 {
        debug_assert!(self.balance(n) <= 0 && self.slot(n).left != NIL);
        let pivot = self.slot(n).left;
        let across = self.slot(pivot).right;

        self.replace_child(n, pivot);
        self.link_right(pivot, n);
        self.link_left(n, across);

        self.update_height_weight(n);
        pivot
    }

    fn rotate_left_right(&mut self, n: u32) -> u32 {
        let left = self.slot(n).left;
        let turned = self.rotate_left(left);
        self.link_left(n, turned);
        self.rotate_right(n)
    }

    fn rotate_right_left(&mut self, n: u32) -> u32 {
        let right = self.slot(n).right;
        let turned = self.rotate_right(right);
        self.link_right(n, turned);
        self.rotate_left(n)
    }

    // Rebalance walk ========================================================

    /// Walks from a mutation point up to the anchor, refreshing height and
    /// weight and rotating wherever the balance factor reaches ±2. The
    /// walk never rotates across the anchor.
    fn rebalance(&mut self, from: u32) {
        let mut node = from;
        while node != ANCHOR {
            let mut next = self.slot(node).parent;

            self.update_height_weight(node);
            let balance = self.balance(node);
            debug_assert!((-2..=2).contains(&balance));

            if balance <= -2 {
                // Continue from the pre-rotation child: it is either the new
                // local root or one of its children, so every node above it
                // still gets its height and weight refreshed.
                next = self.slot(node).left;
                if self.balance(self.slot(node).left) <= -1 {
                    self.rotate_right(node);
                } else {
                    self.rotate_left_right(node);
                }
            } else if balance >= 2 {
                next = self.slot(node).right;
                if self.balance(self.slot(node).right) >= 1 {
                    self.rotate_left(node);
                } else {
                    self.rotate_right_left(node);
                }
            }

            node = next;
            debug_assert!(node != NIL);
        }
    }

    // Navigation ============================================================

    /// First node in rank order, or the anchor if the tree is empty.
    pub(crate) fn first(&self) -> u32 {
        let mut n = self.slot(ANCHOR).left;
        if n == NIL {
            return ANCHOR;
        }
        while self.slot(n).left != NIL {
            n = self.slot(n).left;
        }
        n
    }

    /// Last payload node, or the anchor if the tree is empty.
    pub(crate) fn last_payload(&self) -> u32 {
        let mut n = self.slot(ANCHOR).left;
        if n == NIL {
            return ANCHOR;
        }
        while self.slot(n).right != NIL {
            n = self.slot(n).right;
        }
        n
    }

    /// In-order successor. Stepping from the anchor wraps to the first
    /// node; stepping from the maximum yields the anchor.
    pub(crate) fn next(&self, n: u32) -> u32 {
        if n == ANCHOR {
            return self.first();
        }
        if self.slot(n).right != NIL {
            let mut m = self.slot(n).right;
            while self.slot(m).left != NIL {
                m = self.slot(m).left;
            }
            m
        } else {
            let mut child = n;
            let mut p = self.slot(n).parent;
            while p != NIL && self.slot(p).right == child {
                child = p;
                p = self.slot(p).parent;
            }
            p
        }
    }

    /// In-order predecessor; mirror of [`Tree::next`]. The predecessor of
    /// the anchor is the last payload node.
    pub(crate) fn prev(&self, n: u32) -> u32 {
        if n == ANCHOR {
            return self.last_payload();
        }
        if self.slot(n).left != NIL {
            let mut m = self.slot(n).left;
            while self.slot(m).right != NIL {
                m = self.slot(m).right;
            }
            m
        } else {
            let mut child = n;
            let mut p = self.slot(n).parent;
            while p != ANCHOR && self.slot(p).left == child {
                child = p;
                p = self.slot(p).parent;
            }
            p
        }
    }

    /// Rank-to-node descent. `rank == len` names the anchor.
    pub(crate) fn nth(&self, rank: usize) -> u32 {
        if rank == self.len() {
            return ANCHOR;
        }
        debug_assert!(rank < self.len());
        let mut n = self.slot(ANCHOR).left;
        let mut rank = rank;
        loop {
            let left_weight = self.slot(self.slot(n).left).weight as usize;
            if rank < left_weight {
                n = self.slot(n).left;
            } else if rank == left_weight {
                return n;
            } else {
                rank -= left_weight + 1;
                n = self.slot(n).right;
            }
        }
    }

    /// Node-to-rank climb, accumulating left-subtree weights on every
    /// ascent from a right child. The anchor's rank is `len`.
    pub(crate) fn index_of(&self, n: u32) -> usize {
        let mut rank = self.slot(self.slot(n).left).weight as usize;
        let mut p = n;
        while p != ANCHOR {
            let parent = self.slot(p).parent;
            if self.slot(parent).right == p {
                rank += self.slot(self.slot(parent).left).weight as usize + 1;
            }
            p = parent;
        }
        rank
    }

    // Mutation ==============================================================

    /// Hangs a detached node into the tree immediately before `at` in rank
    /// order (`at == ANCHOR` appends) and restores balance.
    pub(crate) fn insert_node_before(&mut self, at: u32, node: u32) {
        self.reset_leaf(node);
        if self.slot(at).left == NIL {
            self.link_left(at, node);
            self.rebalance(at);
        } else {
            let mut p = self.slot(at).left;
            while self.slot(p).right != NIL {
                p = self.slot(p).right;
            }
            self.link_right(p, node);
            self.rebalance(p);
        }
    }

    /// Hangs a detached node at its sorted position (equal elements go to
    /// the right, so repeated inserts are stable). Only meaningful while
    /// the tree is sorted under `less`.
    pub(crate) fn insert_node_sorted<F>(&mut self, node: u32, less: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        self.reset_leaf(node);
        let mut cur = self.slot(ANCHOR).left;
        if cur == NIL {
            self.link_left(ANCHOR, node);
            return;
        }
        loop {
            if less(self.value(node), self.value(cur)) {
                if self.slot(cur).left == NIL {
                    self.link_left(cur, node);
                    self.rebalance(cur);
                    return;
                }
                cur = self.slot(cur).left;
            } else {
                if self.slot(cur).right == NIL {
                    self.link_right(cur, node);
                    self.rebalance(cur);
                    return;
                }
                cur = self.slot(cur).right;
            }
        }
    }

    /// Detaches `node` from the tree without retiring its slot, restoring
    /// balance on the way. Returns `node` with stale links; callers either
    /// free it or hang it elsewhere (which resets it to leaf shape).
    pub(crate) fn unlink(&mut self, node: u32) -> u32 {
        let left_nil = self.slot(node).left == NIL;
        let right_nil = self.slot(node).right == NIL;

        if left_nil && right_nil {
            let parent = self.slot(node).parent;
            self.replace_child(node, NIL);
            self.rebalance(parent);
        } else if left_nil {
            let right = self.slot(node).right;
            self.replace_child(node, right);
            self.rebalance(right);
        } else if right_nil {
            let left = self.slot(node).left;
            self.replace_child(node, left);
            self.rebalance(left);
        } else {
            // Two children: exchange tree positions with the successor or
            // predecessor (whichever lies in the taller subtree), then
            // unlink again from the relocated spot, which has at most one
            // child. Positions move, payloads and slots do not, so every
            // other node's handle stays valid.
            let partner = if self.balance(node) >= 0 {
                self.next(node)
            } else {
                self.prev(node)
            };
            self.swap_nodes(node, partner);
            return self.unlink(node);
        }
        node
    }

    /// Exchanges the tree positions of two distinct nodes: parent, child
    /// and parent-side links plus height and weight. Payloads stay put.
    /// Handles the case where one node is the other's direct child.
    fn swap_nodes(&mut self, n1: u32, n2: u32) {
        debug_assert!(n1 != n2);
        debug_assert!(n1 > NIL && n2 > NIL);

        let mut new_n1p = self.slot(n2).parent;
        let mut new_n1l = self.slot(n2).left;
        let mut new_n1r = self.slot(n2).right;
        let mut n1_link = Some((new_n1p, self.slot(new_n1p).left == n2));

        let mut new_n2p = self.slot(n1).parent;
        let mut new_n2l = self.slot(n1).left;
        let mut new_n2r = self.slot(n1).right;
        let mut n2_link = Some((new_n2p, self.slot(new_n2p).left == n1));

        if self.slot(n2).parent == n1 {
            new_n1p = n2;
            n1_link = None;
            if self.slot(n1).left == n2 {
                new_n2l = n1;
            } else {
                new_n2r = n1;
            }
        } else if self.slot(n1).parent == n2 {
            new_n2p = n1;
            n2_link = None;
            if self.slot(n2).left == n1 {
                new_n1l = n2;
            } else {
                new_n1r = n2;
            }
        }

        self.slot_mut(n1).parent = new_n1p;
        self.slot_mut(n1).left = new_n1l;
        self.slot_mut(n1).right = new_n1r;
        if new_n1l != NIL {
            self.slot_mut(new_n1l).parent = n1;
        }
        if new_n1r != NIL {
            self.slot_mut(new_n1r).parent = n1;
        }
        if let Some((parent, is_left)) = n1_link {
            if is_left {
                self.slot_mut(parent).left = n1;
            } else {
                self.slot_mut(parent).right = n1;
            }
        }

        self.slot_mut(n2).parent = new_n2p;
        self.slot_mut(n2).left = new_n2l;
        self.slot_mut(n2).right = new_n2r;
        if new_n2l != NIL {
            self.slot_mut(new_n2l).parent = n2;
        }
        if new_n2r != NIL {
            self.slot_mut(new_n2r).parent = n2;
        }
        if let Some((parent, is_left)) = n2_link {
            if is_left {
                self.slot_mut(parent).left = n2;
            } else {
                self.slot_mut(parent).right = n2;
            }
        }

        let (h1, w1) = (self.slot(n1).height, self.slot(n1).weight);
        let (h2, w2) = (self.slot(n2).height, self.slot(n2).weight);
        let slot1 = self.slot_mut(n1);
        slot1.height = h2;
        slot1.weight = w2;
        let slot2 = self.slot_mut(n2);
        slot2.height = h1;
        slot2.weight = w1;
    }

    /// Retires every payload node and empties the tree.
    pub(crate) fn clear(&mut self) {
        fn recurse<T>(tree: &mut Tree<T>, n: u32) {
            if n == NIL {
                return;
            }
            let left = tree.slot(n).left;
            let right = tree.slot(n).right;
            recurse(tree, left);
            recurse(tree, right);
            tree.free(n);
        }
        let root = self.slot(ANCHOR).left;
        recurse(self, root);
        self.slot_mut(ANCHOR).left = NIL;
    }

    // Bulk rebuild ==========================================================

    /// In-order node indices, first to last.
    pub(crate) fn flatten(&self) -> Vec<u32> {
        let mut flat = Vec::with_capacity(self.len());
        let mut n = self.first();
        while n != ANCHOR {
            flat.push(n);
            n = self.next(n);
        }
        debug_assert_eq!(flat.len(), self.len());
        flat
    }

    /// Builds a perfectly balanced subtree over a contiguous range of
    /// detached node indices by recursive midpoint selection and returns
    /// its root. Single nodes are reset to leaf shape, so stale links from
    /// the nodes' previous positions never survive a rebuild.
    fn hang(&mut self, nodes: &[u32]) -> u32 {
        match nodes {
            [] => NIL,
            [n] => {
                self.reset_leaf(*n);
                *n
            }
            _ => {
                let center = nodes.len() / 2;
                let root = nodes[center];
                let left = self.hang(&nodes[..center]);
                let right = self.hang(&nodes[center + 1..]);
                self.link_left(root, left);
                self.link_right(root, right);
                self.update_height_weight(root);
                root
            }
        }
    }

    /// Rebuilds the whole tree from an in-order list of node indices.
    pub(crate) fn rebuild(&mut self, nodes: &[u32]) {
        let root = self.hang(nodes);
        self.link_left(ANCHOR, root);
    }

    /// Retires every node, returning the payloads in rank order.
    pub(crate) fn take_values(&mut self) -> Vec<T> {
        let flat = self.flatten();
        let values = flat.into_iter().map(|n| self.free(n)).collect();
        self.slot_mut(ANCHOR).left = NIL;
        values
    }

    /// Mirrors the subtree under `n` by swapping every node's children.
    /// Heights and weights are unaffected, so no rebalancing is needed.
    fn mirror(&mut self, n: u32) {
        if n == NIL {
            return;
        }
        let slot = self.slot_mut(n);
        std::mem::swap(&mut slot.left, &mut slot.right);
        let (left, right) = (self.slot(n).left, self.slot(n).right);
        self.mirror(left);
        self.mirror(right);
    }

    pub(crate) fn reverse(&mut self) {
        let root = self.slot(ANCHOR).left;
        self.mirror(root);
    }

    // Rank queries over sorted content ======================================

    /// Number of leading elements for which `pred` holds. Meaningful only
    /// while the sequence is partitioned with respect to `pred`.
    pub(crate) fn partition_rank<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut n = self.slot(ANCHOR).left;
        let mut rank = 0;
        while n != NIL {
            if pred(self.value(n)) {
                rank += self.slot(self.slot(n).left).weight as usize + 1;
                n = self.slot(n).right;
            } else {
                n = self.slot(n).left;
            }
        }
        rank
    }

    // Diagnostics ===========================================================

    /// Verifies the structural invariants: sentinel shape, AVL balance,
    /// height and weight bookkeeping, and parent back-links.
    pub(crate) fn integrity(&self) -> bool {
        let nil = self.slot(NIL);
        if nil.left != NIL || nil.right != NIL || nil.parent != NIL {
            return false;
        }
        if nil.height != 0 || nil.weight != 0 || nil.value.is_some() {
            return false;
        }

        let anchor = self.slot(ANCHOR);
        if anchor.parent != NIL || anchor.right != NIL {
            return false;
        }
        if anchor.height != 0 || anchor.weight != 0 || anchor.value.is_some() {
            return false;
        }
        if anchor.left != NIL && self.slot(anchor.left).parent != ANCHOR {
            return false;
        }

        self.subtree_integrity(self.slot(ANCHOR).left)
    }

    fn subtree_integrity(&self, n: u32) -> bool {
        if n == NIL {
            return true;
        }

        let left = self.slot(n).left;
        let right = self.slot(n).right;
        let left_height = self.slot(left).height as i64;
        let right_height = self.slot(right).height as i64;

        if (left_height - right_height).abs() > 1 {
            return false;
        }

        let height = cmp::max(left_height, right_height) + 1;
        let weight = self.slot(left).weight as i64 + self.slot(right).weight as i64 + 1;
        if height != self.slot(n).height as i64 || weight != self.slot(n).weight as i64 {
            return false;
        }
        if self.slot(n).value.is_none() {
            return false;
        }

        let leaf = left == NIL && right == NIL;
        if (weight == 1 || height == 1 || leaf) && (weight * height != 1 || !leaf) {
            return false;
        }

        if left != NIL && (self.slot(left).parent != n || !self.subtree_integrity(left)) {
            return false;
        }
        if right != NIL && (self.slot(right).parent != n || !self.subtree_integrity(right)) {
            return false;
        }

        true
    }
}

enum Trunk {
    Root,
    Upper,
    Lower,
}

impl<T: fmt::Display> Tree<T> {
    /// Writes a sideways dump of the tree, right subtree on top.
    pub(crate) fn print(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.print_subtree(out, self.slot(ANCHOR).left, "", &Trunk::Root)
    }

    fn print_subtree(
        &self,
        out: &mut dyn fmt::Write,
        n: u32,
        prefix: &str,
        trunk: &Trunk,
    ) -> fmt::Result {
        if n == NIL {
            return Ok(());
        }

        let above = match trunk {
            Trunk::Lower => format!("{prefix}|  "),
            _ => format!("{prefix}   "),
        };
        self.print_subtree(out, self.slot(n).right, &above, &Trunk::Upper)?;

        let junction = match trunk {
            Trunk::Root => "--",
            Trunk::Upper => ".-",
            Trunk::Lower => "`-",
        };
        writeln!(out, "{prefix}{junction} {}", self.value(n))?;

        let below = match trunk {
            Trunk::Upper => format!("{prefix}|  "),
            _ => format!("{prefix}   "),
        };
        self.print_subtree(out, self.slot(n).left, &below, &Trunk::Lower)
    }
}

#[cfg(test)]
mod tests {
    use super::{Tree, ANCHOR, NIL};

    fn build(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        let nodes: Vec<u32> = values.iter().map(|&v| tree.alloc(v)).collect();
        tree.rebuild(&nodes);
        tree
    }

    fn contents(tree: &Tree<i32>) -> Vec<i32> {
        tree.flatten().into_iter().map(|n| *tree.value(n)).collect()
    }

    #[test]
    fn hang_flatten_round_trip() {
        for n in 0..32 {
            let values: Vec<i32> = (0..n).collect();
            let tree = build(&values);
            assert!(tree.integrity());
            assert_eq!(contents(&tree), values);
            // A hung tree is perfectly balanced, not merely AVL-balanced.
            let expected_height = (usize::BITS - values.len().leading_zeros()) as usize;
            assert_eq!(tree.height(), expected_height);
        }
    }

    #[test]
    fn insert_before_keeps_order() {
        let mut tree = build(&[10, 20, 30]);
        let at = tree.nth(1);
        let node = tree.alloc(15);
        tree.insert_node_before(at, node);
        assert!(tree.integrity());
        assert_eq!(contents(&tree), vec![10, 15, 20, 30]);

        let node = tree.alloc(40);
        tree.insert_node_before(ANCHOR, node);
        assert!(tree.integrity());
        assert_eq!(contents(&tree), vec![10, 15, 20, 30, 40]);
    }

    #[test]
    fn swap_nodes_distant() {
        let mut tree = build(&[0, 1, 2, 3, 4, 5, 6]);
        let a = tree.nth(0);
        let b = tree.nth(6);
        tree.swap_nodes(a, b);
        // Only the two positions changed; the handles kept their payloads.
        assert_eq!(*tree.value(a), 0);
        assert_eq!(*tree.value(b), 6);
        assert_eq!(contents(&tree), vec![6, 1, 2, 3, 4, 5, 0]);
        tree.swap_nodes(b, a);
        assert!(tree.integrity());
        assert_eq!(contents(&tree), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn swap_nodes_adjacent() {
        // Parent/child in both argument orders.
        for flip in [false, true] {
            let mut tree = build(&[0, 1, 2, 3, 4, 5, 6]);
            let parent = tree.nth(3);
            let child = tree.slot(parent).right;
            assert_eq!(tree.slot(child).parent, parent);
            if flip {
                tree.swap_nodes(child, parent);
            } else {
                tree.swap_nodes(parent, child);
            }
            assert_eq!(tree.index_of(child), 3);
            assert_eq!(tree.index_of(parent), 5);
            // Heights and weights were exchanged along with the positions.
            assert_eq!(tree.slot(child).height, 3);
            assert_eq!(tree.slot(child).weight, 7);
        }
    }

    #[test]
    fn unlink_two_children_preserves_partner_handles() {
        let mut tree = build(&[0, 1, 2, 3, 4, 5, 6]);
        let root = tree.nth(3);
        let successor = tree.next(root);
        let unlinked = tree.unlink(root);
        assert_eq!(unlinked, root);
        assert!(tree.integrity());
        assert_eq!(contents(&tree), vec![0, 1, 2, 4, 5, 6]);
        // The promoted successor still answers through its old handle.
        assert_eq!(*tree.value(successor), 4);
        tree.free(unlinked);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn reverse_mirrors_in_place() {
        let mut tree = build(&[1, 2, 3, 4, 5]);
        tree.reverse();
        assert!(tree.integrity());
        assert_eq!(contents(&tree), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn print_shows_every_element() {
        let tree = build(&[1, 2, 3]);
        let mut out = String::new();
        tree.print(&mut out).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("-- 2"));
    }

    #[test]
    fn sentinels_stay_pristine() {
        let mut tree = build(&[3, 1, 2, 5, 4]);
        let n = tree.nth(0);
        let unlinked = tree.unlink(n);
        tree.free(unlinked);
        let node = tree.alloc(9);
        tree.insert_node_before(ANCHOR, node);
        assert!(tree.integrity());
        assert_eq!(tree.slot(NIL).parent, NIL);
        assert_eq!(tree.slot(ANCHOR).right, NIL);
    }
}
