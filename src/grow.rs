//! Buffer growth for algorithms that may run out of working memory.
//!
//! Algorithms in this crate write into caller-owned `Vec`s whose _length_ is their capacity:
//! every slot is storage the algorithm may overwrite. When a buffer fills up the algorithm asks
//! a [`Grow`] implementation for larger storage through [`grow_buffer`]. Either the caller's
//! buffer is replaced in one step by the larger storage, or it is left exactly as it was and the
//! whole algorithm fails with a [`GrowError`].
use crate::*;
use std::collections::TryReserveError;

/// Reasons a buffer could not be grown.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GrowError {
    /// No more storage is available (or growth was not permitted).
    #[error("buffer exhausted at capacity {capacity}, {requested} slots were requested")]
    Exhausted { capacity: usize, requested: usize },
    /// The byte size of the requested storage might not fit in a `usize`.
    #[error("growing capacity {capacity} towards {requested} slots overflows")]
    Overflow { capacity: usize, requested: usize },
    /// The allocator refused the reservation.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    /// The grower returned less storage than requested.
    #[error("grower returned {returned} slots, at least {requested} were requested")]
    Undersized { requested: usize, returned: usize },
}

/// A buffer reallocation policy.
///
/// Given the current storage `old`, produce new storage of _at least_ `requested` slots whose
/// prefix is a copy of `old`. Any state the policy needs (allocation arenas, counters, limits)
/// lives in the implementor.
///
/// Closures of the form `FnMut(&[T], usize) -> Result<Vec<T>, GrowError>` are growers.
pub trait Grow<T> {
    fn grow(&mut self, old: &[T], requested: usize) -> Result<Vec<T>, GrowError>;
}

impl<T, F> Grow<T> for F
where
    F: FnMut(&[T], usize) -> Result<Vec<T>, GrowError>,
{
    fn grow(&mut self, old: &[T], requested: usize) -> Result<Vec<T>, GrowError> {
        self(old, requested)
    }
}

/// Never grows, algorithms fail as soon as a buffer is full.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGrow;

impl<T> Grow<T> for NoGrow {
    fn grow(&mut self, old: &[T], requested: usize) -> Result<Vec<T>, GrowError> {
        Err(GrowError::Exhausted {
            capacity: old.len(),
            requested,
        })
    }
}

/// Grows storage to `max(requested, ⌈old * 1.5⌉)` slots.
///
/// New slots are filled with `T::default()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScaleGrow;

impl ScaleGrow {
    /// The capacity this policy would grow `old` to when `requested` slots are needed.
    pub fn capacity(old: usize, requested: usize) -> Result<usize, GrowError> {
        if mul_overflows(old, 3) {
            return Err(GrowError::Overflow {
                capacity: old,
                requested,
            });
        }

        Ok(requested.max(old + old.div_ceil(2)))
    }
}

impl<T: Clone + Default> Grow<T> for ScaleGrow {
    fn grow(&mut self, old: &[T], requested: usize) -> Result<Vec<T>, GrowError> {
        let capacity = Self::capacity(old.len(), requested)?;
        if mul_overflows(capacity, std::mem::size_of::<T>()) {
            return Err(GrowError::Overflow {
                capacity: old.len(),
                requested,
            });
        }

        let mut v = Vec::new();
        v.try_reserve_exact(capacity)?;
        v.extend_from_slice(old);
        v.resize(capacity, T::default());
        Ok(v)
    }
}

/// Grow `buf` to hold at least `requested` slots.
///
/// On success `buf` is replaced by the new storage, its length is the new capacity.
/// On failure `buf` is untouched: same allocation, same length, same content.
///
/// # Panics
/// Panics if `requested` does not exceed the current capacity.
pub fn grow_buffer<T, G>(grower: &mut G, buf: &mut Vec<T>, requested: usize) -> Result<(), GrowError>
where
    G: Grow<T> + ?Sized,
{
    assert!(
        requested > buf.len(),
        "growth must request more than the current capacity"
    );

    let new = match grower.grow(buf.as_slice(), requested) {
        Ok(new) if new.len() >= requested => new,
        Ok(new) => {
            let e = GrowError::Undersized {
                requested,
                returned: new.len(),
            };
            log::warn!("{e}");
            return Err(e);
        }
        Err(e) => {
            log::warn!("buffer growth failed: {e}");
            return Err(e);
        }
    };

    log::debug!("grew buffer from {} to {} slots", buf.len(), new.len());
    *buf = new;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_capacity() {
        assert_eq!(ScaleGrow::capacity(0, 1), Ok(1));
        assert_eq!(ScaleGrow::capacity(1, 2), Ok(2));
        assert_eq!(ScaleGrow::capacity(2, 3), Ok(3));
        assert_eq!(ScaleGrow::capacity(3, 4), Ok(5));
        assert_eq!(ScaleGrow::capacity(10, 11), Ok(15));
        assert_eq!(ScaleGrow::capacity(10, 40), Ok(40));
        assert!(matches!(
            ScaleGrow::capacity(usize::MAX / 2, usize::MAX / 2 + 1),
            Err(GrowError::Overflow { .. })
        ));
    }

    #[test]
    fn scale_grow_keeps_prefix() {
        let mut buf = vec![1u32, 2, 3, 4];
        grow_buffer(&mut ScaleGrow, &mut buf, 5).unwrap();
        assert_eq!(buf, vec![1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn no_grow_leaves_buffer() {
        let mut buf = vec![1u32, 2, 3];
        let ptr = buf.as_ptr();
        let e = grow_buffer(&mut NoGrow, &mut buf, 4).unwrap_err();
        assert_eq!(
            e,
            GrowError::Exhausted {
                capacity: 3,
                requested: 4
            }
        );
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(buf, vec![1, 2, 3]);
    }

    #[test]
    fn undersized_is_rejected() {
        let mut short = |old: &[u32], _: usize| -> Result<Vec<u32>, GrowError> { Ok(old.to_vec()) };
        let mut buf = vec![7u32; 2];
        let e = grow_buffer(&mut short, &mut buf, 3).unwrap_err();
        assert_eq!(
            e,
            GrowError::Undersized {
                requested: 3,
                returned: 2
            }
        );
        assert_eq!(buf, vec![7, 7]);
    }

    #[test]
    fn closure_state_is_threaded() {
        let mut calls = 0;
        let mut counting = |old: &[u8], requested: usize| -> Result<Vec<u8>, GrowError> {
            calls += 1;
            let mut v = old.to_vec();
            v.resize(requested * 2, 0);
            Ok(v)
        };
        let mut buf = vec![1u8];
        grow_buffer(&mut counting, &mut buf, 2).unwrap();
        grow_buffer(&mut counting, &mut buf, 5).unwrap();
        assert_eq!(calls, 2);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf[0], 1);
    }

    #[test]
    #[should_panic]
    fn must_request_more() {
        let mut buf = vec![0u8; 4];
        let _ = grow_buffer(&mut ScaleGrow, &mut buf, 4);
    }
}
