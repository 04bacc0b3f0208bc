//! Bounded top-k collector.
//!
//! [`BoundedTopK`] keeps the `k` best-ranked items seen so far. Ranking and
//! identity are separate: a heap orders entries by score so the worst one is
//! always at the root, and a membership set keyed by [`Ranked::rank_key`]
//! keeps two equal-scored items distinct while rejecting re-inserts of the
//! same item.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::hash::Hash;

use super::models::{Prediction, UnorderedPair};

/// An item that can be ranked by a score and identified by a key.
pub trait Ranked {
    type Key: Clone + Eq + Hash;

    fn rank_key(&self) -> Self::Key;

    /// Ranking score. NaN scores are never retained.
    fn rank_score(&self) -> f64;
}

impl<V: Clone + Eq + Hash, P> Ranked for Prediction<V, P> {
    type Key = UnorderedPair<V>;

    fn rank_key(&self) -> UnorderedPair<V> {
        self.pair.clone()
    }

    fn rank_score(&self) -> f64 {
        self.score
    }
}

/// Which end of the score range counts as best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    Highest,
    Lowest,
}

// ============================================================================
// Heap entry
// ============================================================================

/// Heap entry ordered so that the *worst* item compares greatest and sits
/// at the root of the max-heap.
struct Entry<T: Ranked> {
    /// Score oriented so that larger is better
    rank: f64,
    /// Insertion sequence; among equal ranks the later insert is worse
    seq: u64,
    key: T::Key,
    item: T,
}

impl<T: Ranked> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ranked> Eq for Entry<T> {}

impl<T: Ranked> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ranked> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .total_cmp(&self.rank)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// ============================================================================
// BoundedTopK
// ============================================================================

/// Fixed-capacity collection of the best-ranked items.
pub struct BoundedTopK<T: Ranked> {
    capacity: usize,
    order: RankOrder,
    heap: BinaryHeap<Entry<T>>,
    members: HashSet<T::Key>,
    next_seq: u64,
}

impl<T: Ranked> BoundedTopK<T> {
    pub fn new(capacity: usize, order: RankOrder) -> Self {
        Self {
            capacity,
            order,
            heap: BinaryHeap::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Keep the `capacity` highest scores.
    pub fn highest(capacity: usize) -> Self {
        Self::new(capacity, RankOrder::Highest)
    }

    /// Keep the `capacity` lowest scores.
    pub fn lowest(capacity: usize) -> Self {
        Self::new(capacity, RankOrder::Lowest)
    }

    /// Offer an item. Returns `true` if it was retained.
    ///
    /// When full, an item ranking worse than or equal to the current worst is
    /// discarded; otherwise the worst is evicted to make room. An item whose
    /// key is already retained, or whose score is NaN, is ignored.
    pub fn insert(&mut self, item: T) -> bool {
        if self.capacity == 0 || item.rank_score().is_nan() {
            return false;
        }
        let key = item.rank_key();
        if self.members.contains(&key) {
            return false;
        }
        let rank = match self.order {
            RankOrder::Highest => item.rank_score(),
            RankOrder::Lowest => -item.rank_score(),
        };

        if self.heap.len() >= self.capacity {
            match self.heap.peek() {
                Some(worst) if rank.total_cmp(&worst.rank) != Ordering::Greater => return false,
                _ => {}
            }
            if let Some(evicted) = self.heap.pop() {
                self.members.remove(&evicted.key);
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.members.insert(key.clone());
        self.heap.push(Entry {
            rank,
            seq,
            key,
            item,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.members.contains(key)
    }

    /// Score of the worst retained item.
    pub fn worst_score(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.item.rank_score())
    }

    /// Retained items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|entry| &entry.item)
    }

    /// Retained items in no particular order.
    pub fn into_vec(self) -> Vec<T> {
        self.heap.into_vec().into_iter().map(|entry| entry.item).collect()
    }

    /// Retained items, best first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.item)
            .collect()
    }
}

impl<T: Ranked + fmt::Debug> fmt::Debug for BoundedTopK<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedTopK")
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .field("items", &self.heap.iter().map(|e| &e.item).collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Ranked> Extend<T> for BoundedTopK<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        score: f64,
    }

    impl Ranked for Item {
        type Key = u32;

        fn rank_key(&self) -> u32 {
            self.id
        }

        fn rank_score(&self) -> f64 {
            self.score
        }
    }

    fn item(id: u32, score: f64) -> Item {
        Item { id, score }
    }

    fn sorted_ids(top: BoundedTopK<Item>) -> Vec<u32> {
        let mut ids: Vec<u32> = top.into_vec().into_iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_keeps_highest_regardless_of_order() {
        let scores = [3.0, 9.0, 1.0, 7.0, 5.0, 8.0, 2.0];
        let orders: [Vec<usize>; 3] = [
            (0..7).collect(),
            (0..7).rev().collect(),
            vec![3, 0, 6, 1, 5, 2, 4],
        ];
        for order in &orders {
            let mut top = BoundedTopK::highest(3);
            for &i in order {
                top.insert(item(i as u32, scores[i]));
            }
            assert_eq!(top.len(), 3);
            // 9.0, 8.0, 7.0 → ids 1, 5, 3
            assert_eq!(sorted_ids(top), vec![1, 3, 5]);
        }
    }

    #[test]
    fn test_fills_unconditionally_below_capacity() {
        let mut top = BoundedTopK::highest(5);
        assert!(top.insert(item(1, -10.0)));
        assert!(top.insert(item(2, f64::NEG_INFINITY)));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_equal_scores_both_retained() {
        let mut top = BoundedTopK::highest(3);
        assert!(top.insert(item(1, 4.0)));
        assert!(top.insert(item(2, 4.0)));
        assert_eq!(top.len(), 2);
        assert!(top.contains(&1));
        assert!(top.contains(&2));
    }

    #[test]
    fn test_equal_to_worst_discarded_when_full() {
        let mut top = BoundedTopK::highest(2);
        top.insert(item(1, 5.0));
        top.insert(item(2, 3.0));
        assert!(!top.insert(item(3, 3.0)));
        assert!(!top.insert(item(4, 1.0)));
        assert!(top.insert(item(5, 4.0)));
        assert_eq!(sorted_ids(top), vec![1, 5]);
    }

    #[test]
    fn test_duplicate_key_ignored() {
        let mut top = BoundedTopK::highest(3);
        assert!(top.insert(item(1, 1.0)));
        assert!(!top.insert(item(1, 10.0)));
        assert_eq!(top.len(), 1);
        assert_eq!(top.worst_score(), Some(1.0));
    }

    #[test]
    fn test_evicted_key_can_return() {
        let mut top = BoundedTopK::highest(1);
        top.insert(item(1, 1.0));
        top.insert(item(2, 2.0));
        assert!(!top.contains(&1));
        assert!(top.insert(item(1, 3.0)));
        assert_eq!(sorted_ids(top), vec![1]);
    }

    #[test]
    fn test_lowest_order() {
        let mut top = BoundedTopK::lowest(2);
        top.extend([item(1, 3.0), item(2, 1.0), item(3, 2.0), item(4, 0.5)]);
        let best: Vec<u32> = top.into_sorted_vec().into_iter().map(|i| i.id).collect();
        assert_eq!(best, vec![4, 2]);
    }

    #[test]
    fn test_sorted_vec_best_first() {
        let mut top = BoundedTopK::highest(4);
        top.extend([item(1, 2.0), item(2, 8.0), item(3, 5.0)]);
        let scores: Vec<f64> = top.into_sorted_vec().into_iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![8.0, 5.0, 2.0]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut top = BoundedTopK::highest(0);
        assert!(!top.insert(item(1, 100.0)));
        assert!(top.is_empty());
        assert_eq!(top.worst_score(), None);
    }

    #[test]
    fn test_nan_score_rejected_in_both_orders() {
        let mut top = BoundedTopK::highest(1);
        assert!(top.insert(item(1, 5.0)));
        assert!(!top.insert(item(2, f64::NAN)));
        assert_eq!(sorted_ids(top), vec![1]);

        let mut top = BoundedTopK::lowest(2);
        assert!(!top.insert(item(1, f64::NAN)));
        assert!(top.is_empty());
    }

    #[test]
    fn test_debug_lists_items() {
        let mut top = BoundedTopK::highest(2);
        top.insert(item(7, 1.5));
        let out = format!("{:?}", top);
        assert!(out.contains("BoundedTopK"));
        assert!(out.contains("id: 7"));
    }

    #[test]
    fn test_prediction_pairs_deduplicated() {
        let mut top: BoundedTopK<Prediction<&str>> = BoundedTopK::highest(4);
        assert!(top.insert(Prediction::new("a", "b", 1.0)));
        assert!(!top.insert(Prediction::new("b", "a", 1.0)));
        assert!(top.insert(Prediction::new("a", "c", 1.0)));
        assert_eq!(top.len(), 2);
    }
}
