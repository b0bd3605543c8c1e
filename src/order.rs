//! Sorting, searching, and heap primitives parameterised by a comparator and a context.
//!
//! Every comparison receives a `&mut C` context next to the two operands, so comparators can
//! carry state (a pivot point, a polygon to index into, a counter) without captures or globals.
//! All functions are generic and get monomorphised per element type and comparator.
use std::cmp::Ordering::{self, *};

/// Partitions at or below this length are finished with an insertion sort.
pub const INSERTION_SORT_THRESHOLD: usize = 16;

/// Sort `v` with an insertion sort. Stable, _O(n²)_.
pub fn insertion_sort_by<T, C, F>(v: &mut [T], ctx: &mut C, mut cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp(&v[j], &v[j - 1], ctx) == Less {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sort `v` with a quicksort. Unstable.
///
/// The pivot is the median of the first, middle and last elements. Only the smaller side of
/// each partition is recursed into, the larger one is looped on, so the stack depth stays
/// _O(log n)_.
///
/// # Example
/// ```rust
/// # use geomalgo::*;
/// // sort by distance from a pivot held in the context
/// let mut v = vec![1, 8, 4, 6, 5];
/// quicksort_by(&mut v, &mut 5i32, |a, b, pivot| {
///     (a - *pivot).abs().cmp(&(b - *pivot).abs())
/// });
/// assert_eq!(v[0], 5);
/// assert_eq!(&v[3..], &[8, 1]);
/// ```
pub fn quicksort_by<T, C, F>(v: &mut [T], ctx: &mut C, mut cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    quicksort(v, ctx, &mut cmp)
}

fn quicksort<T, C, F>(mut v: &mut [T], ctx: &mut C, cmp: &mut F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    loop {
        let n = v.len();
        if n <= INSERTION_SORT_THRESHOLD {
            insertion_sort_by(v, ctx, &mut *cmp);
            return;
        }

        // median of three, ordering v[0] <= v[mid] <= v[n - 1]
        let mid = n / 2;
        if cmp(&v[0], &v[mid], ctx) == Greater {
            v.swap(0, mid);
        }
        if cmp(&v[mid], &v[n - 1], ctx) == Greater {
            v.swap(mid, n - 1);
        }
        if cmp(&v[0], &v[mid], ctx) == Greater {
            v.swap(0, mid);
        }

        let p = partition(v, ctx, cmp, mid);

        // pivot is in its final place at p
        let (left, rest) = std::mem::take(&mut v).split_at_mut(p);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort(left, ctx, cmp);
            v = right;
        } else {
            quicksort(right, ctx, cmp);
            v = left;
        }
    }
}

/// Hoare partition around `v[pivot]`, returns the pivot's final index.
fn partition<T, C, F>(v: &mut [T], ctx: &mut C, cmp: &mut F, pivot: usize) -> usize
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    v.swap(0, pivot);
    let n = v.len();
    let (mut i, mut j) = (0, n);

    loop {
        i += 1;
        while i < n && cmp(&v[i], &v[0], ctx) == Less {
            i += 1;
        }
        j -= 1;
        // v[0] is the pivot so this stops at 0 at the latest
        while cmp(&v[j], &v[0], ctx) == Greater {
            j -= 1;
        }
        if i >= j {
            break;
        }
        v.swap(i, j);
    }

    v.swap(0, j);
    j
}

/// Binary search a sorted `v` for `key`.
///
/// Returns `Ok(index)` of the first equal element met by the halving traversal, or `Err(index)`
/// of where `key` would be inserted to keep `v` sorted.
pub fn bsearch_by<T, C, F>(key: &T, v: &[T], ctx: &mut C, mut cmp: F) -> Result<usize, usize>
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    let (mut lo, mut n) = (0, v.len());

    while n > 0 {
        let mid = lo + n / 2;
        match cmp(&v[mid], key, ctx) {
            Equal => return Ok(mid),
            Less => {
                n -= mid + 1 - lo;
                lo = mid + 1;
            }
            Greater => n = mid - lo,
        }
    }

    Err(lo)
}

/// Restore the heap property after `heap[i]` may have become smaller than its parent.
pub fn heap_sift_up<T, C, F>(heap: &mut [T], mut i: usize, ctx: &mut C, mut cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    while i > 0 {
        let parent = (i - 1) / 2;
        if cmp(&heap[parent], &heap[i], ctx) != Greater {
            break;
        }
        heap.swap(parent, i);
        i = parent;
    }
}

/// Restore the heap property after `heap[i]` may have become larger than its children.
pub fn heap_sift_down<T, C, F>(heap: &mut [T], mut i: usize, ctx: &mut C, mut cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    let n = heap.len();
    loop {
        let l = 2 * i + 1;
        if l >= n {
            break;
        }
        let r = l + 1;
        let c = if r < n && cmp(&heap[r], &heap[l], ctx) == Less {
            r
        } else {
            l
        };
        if cmp(&heap[i], &heap[c], ctx) != Greater {
            break;
        }
        heap.swap(i, c);
        i = c;
    }
}

/// Arrange `heap` into a min-heap under `cmp`, bottom up in _O(n)_.
pub fn heap_build<T, C, F>(heap: &mut [T], ctx: &mut C, mut cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    for i in (0..heap.len() / 2).rev() {
        heap_sift_down(heap, i, ctx, &mut cmp);
    }
}

pub fn heap_push<T, C, F>(heap: &mut Vec<T>, item: T, ctx: &mut C, cmp: F)
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    heap.push(item);
    let i = heap.len() - 1;
    heap_sift_up(heap, i, ctx, cmp);
}

/// Remove and return the minimum.
pub fn heap_pop<T, C, F>(heap: &mut Vec<T>, ctx: &mut C, cmp: F) -> Option<T>
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    let last = heap.len().checked_sub(1)?;
    heap.swap(0, last);
    let min = heap.pop();
    heap_sift_down(heap, 0, ctx, cmp);
    min
}

/// Replace the minimum with `item`, returning the old minimum.
///
/// Equivalent to a pop followed by a push but with a single sift and no length change.
///
/// # Panics
/// Panics if `heap` is empty.
pub fn heap_replace_top<T, C, F>(heap: &mut [T], item: T, ctx: &mut C, cmp: F) -> T
where
    F: FnMut(&T, &T, &mut C) -> Ordering,
{
    assert!(!heap.is_empty(), "cannot replace the top of an empty heap");
    let top = std::mem::replace(&mut heap[0], item);
    heap_sift_down(heap, 0, ctx, cmp);
    top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural(a: &i32, b: &i32, _: &mut ()) -> Ordering {
        a.cmp(b)
    }

    fn is_heap(heap: &[i32]) -> bool {
        (1..heap.len()).all(|i| heap[(i - 1) / 2] <= heap[i])
    }

    #[quickcheck]
    fn quicksort_matches_std(mut v: Vec<i32>) -> bool {
        let mut expected = v.clone();
        expected.sort_unstable();
        quicksort_by(&mut v, &mut (), natural);
        v == expected
    }

    #[quickcheck]
    fn quicksort_many_duplicates(v: Vec<u8>) -> bool {
        let mut v: Vec<i32> = v.into_iter().map(|x| (x % 4) as i32).collect();
        let mut expected = v.clone();
        expected.sort_unstable();
        quicksort_by(&mut v, &mut (), natural);
        v == expected
    }

    #[test]
    fn quicksort_reversed_and_equal() {
        let mut v = (0..1000).rev().collect::<Vec<i32>>();
        quicksort_by(&mut v, &mut (), natural);
        assert_eq!(v, (0..1000).collect::<Vec<_>>());

        let mut v = vec![3; 500];
        quicksort_by(&mut v, &mut (), natural);
        assert_eq!(v, vec![3; 500]);
    }

    #[test]
    fn context_is_threaded_through_comparisons() {
        let mut v = (0..100).rev().collect::<Vec<i32>>();
        let mut count = 0usize;
        quicksort_by(&mut v, &mut count, |a, b, count| {
            *count += 1;
            a.cmp(b)
        });
        assert!(count > 0);
        assert_eq!(v[0], 0);
        assert_eq!(v[99], 99);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut v = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        insertion_sort_by(&mut v, &mut (), |a, b, _| a.0.cmp(&b.0));
        assert_eq!(v, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn bsearch_testing() {
        let v = [1, 3, 5, 7, 9, 11];
        for (i, x) in v.iter().enumerate() {
            assert_eq!(bsearch_by(x, &v, &mut (), natural), Ok(i));
        }
        assert_eq!(bsearch_by(&0, &v, &mut (), natural), Err(0));
        assert_eq!(bsearch_by(&4, &v, &mut (), natural), Err(2));
        assert_eq!(bsearch_by(&12, &v, &mut (), natural), Err(6));
        assert_eq!(bsearch_by(&12, &[], &mut (), natural), Err(0));
    }

    #[quickcheck]
    fn bsearch_agrees_with_partition_point(mut v: Vec<i32>, key: i32) -> bool {
        v.sort_unstable();
        match bsearch_by(&key, &v, &mut (), natural) {
            Ok(i) => v[i] == key,
            Err(i) => i == v.partition_point(|x| *x < key) && !v.contains(&key),
        }
    }

    #[quickcheck]
    fn heap_pops_in_order(v: Vec<i32>) -> bool {
        let mut heap = v.clone();
        heap_build(&mut heap, &mut (), natural);
        if !is_heap(&heap) {
            return false;
        }

        let mut expected = v;
        expected.sort_unstable();
        let popped = std::iter::from_fn(|| heap_pop(&mut heap, &mut (), natural)).collect::<Vec<_>>();
        popped == expected
    }

    #[quickcheck]
    fn heap_push_keeps_property(v: Vec<i32>) -> bool {
        let mut heap = Vec::new();
        for x in v {
            heap_push(&mut heap, x, &mut (), natural);
            if !is_heap(&heap) {
                return false;
            }
        }
        true
    }

    #[test]
    fn heap_replace_top_testing() {
        let mut heap = vec![5, 1, 8, 3, 9];
        heap_build(&mut heap, &mut (), natural);
        assert_eq!(heap[0], 1);

        let old = heap_replace_top(&mut heap, 7, &mut (), natural);
        assert_eq!(old, 1);
        assert_eq!(heap.len(), 5);
        assert!(is_heap(&heap));
        assert_eq!(heap[0], 3);

        let old = heap_replace_top(&mut heap, 0, &mut (), natural);
        assert_eq!(old, 3);
        assert_eq!(heap[0], 0);
    }

    #[test]
    fn heap_pop_empty() {
        let mut heap: Vec<i32> = Vec::new();
        assert_eq!(heap_pop(&mut heap, &mut (), natural), None);
    }
}
