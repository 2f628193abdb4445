//! Ascending two-pointer merge over two sorted key streams.
//!
//! Yields the union of both streams without materializing it: whichever
//! side has the smaller current key is advanced, and both are advanced on a
//! tie, so each key is produced exactly once. Cost is O(n₁ + n₂).

use std::cmp::Ordering;
use std::iter::Peekable;

/// Where a merged key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Both,
}

pub struct MergeKeys<L, R>
where
    L: Iterator<Item = usize>,
    R: Iterator<Item = usize>,
{
    left: Peekable<L>,
    right: Peekable<R>,
}

impl<L, R> MergeKeys<L, R>
where
    L: Iterator<Item = usize>,
    R: Iterator<Item = usize>,
{
    pub fn new(left: L, right: R) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
        }
    }
}

impl<L, R> Iterator for MergeKeys<L, R>
where
    L: Iterator<Item = usize>,
    R: Iterator<Item = usize>,
{
    type Item = (usize, Side);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.left.peek().copied(), self.right.peek().copied()) {
            (None, None) => None,
            (Some(a), None) => {
                self.left.next();
                Some((a, Side::Left))
            }
            (None, Some(b)) => {
                self.right.next();
                Some((b, Side::Right))
            }
            (Some(a), Some(b)) => match a.cmp(&b) {
                Ordering::Less => {
                    self.left.next();
                    Some((a, Side::Left))
                }
                Ordering::Greater => {
                    self.right.next();
                    Some((b, Side::Right))
                }
                Ordering::Equal => {
                    self.left.next();
                    self.right.next();
                    Some((a, Side::Both))
                }
            },
        }
    }
}

/// Merge two ascending key streams.
pub fn merge_keys<L, R>(left: L, right: R) -> MergeKeys<L::IntoIter, R::IntoIter>
where
    L: IntoIterator<Item = usize>,
    R: IntoIterator<Item = usize>,
{
    MergeKeys::new(left.into_iter(), right.into_iter())
}
