//! Indexed binary min-heap for the search frontier.
//!
//! Unlike `std::collections::BinaryHeap`, every queued cell's slot is
//! tracked in a side table, so a cheaper path to a queued cell updates its
//! entry in place instead of pushing a stale duplicate.

use std::collections::HashMap;

use jpsplus_core::{Cell, Direction};

/// One frontier entry: a cell, the direction it was entered in, its cost
/// from the start (`g`) and its estimated total cost (`f`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) cell: Cell,
    pub(crate) direction: Direction,
    pub(crate) g: f64,
    pub(crate) f: f64,
}

/// Min-heap on `f` with a cell → slot index.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    nodes: Vec<FrontierEntry>,
    index_of: HashMap<Cell, usize>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The queued entry for `cell`, if any.
    #[inline]
    pub(crate) fn get(&self, cell: Cell) -> Option<&FrontierEntry> {
        self.index_of.get(&cell).map(|&i| &self.nodes[i])
    }

    /// Insert a new entry. The cell must not already be queued.
    pub(crate) fn push(&mut self, entry: FrontierEntry) {
        debug_assert!(!self.index_of.contains_key(&entry.cell));
        let i = self.nodes.len();
        self.index_of.insert(entry.cell, i);
        self.nodes.push(entry);
        self.sift_up(i);
    }

    /// Remove and return the entry with the smallest `f`.
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        if self.nodes.is_empty() {
            return None;
        }
        let last = self.nodes.len() - 1;
        self.swap(0, last);
        let top = self.nodes.pop()?;
        self.index_of.remove(&top.cell);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Replace the costs and entry direction of a queued cell and restore
    /// heap order. Returns `false` if the cell is not queued.
    pub(crate) fn update(&mut self, cell: Cell, g: f64, f: f64, direction: Direction) -> bool {
        let Some(&i) = self.index_of.get(&cell) else {
            return false;
        };
        let node = &mut self.nodes[i];
        let old_f = node.f;
        node.g = g;
        node.f = f;
        node.direction = direction;
        if f < old_f {
            self.sift_up(i);
        } else {
            self.sift_down(i);
        }
        true
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.nodes[a].f.total_cmp(&self.nodes[b].f).is_lt()
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.index_of.insert(self.nodes[a].cell, b);
        self.index_of.insert(self.nodes[b].cell, a);
        self.nodes.swap(a, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn check_index(&self) {
        assert_eq!(self.index_of.len(), self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            assert_eq!(self.index_of[&node.cell], i);
            if i > 0 {
                assert!(self.nodes[(i - 1) / 2].f <= node.f);
            }
        }
    }
}
