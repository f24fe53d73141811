//! Coefficient storage for curves.
//!
//! A curve keeps its roots, offsets and per-segment control data in
//! sequences whose backing is chosen by a [`Storage`] type parameter:
//! [`Heap`] grows on demand, [`Bounded`] uses a fixed-size array and
//! refuses to grow past its capacity.

use core::fmt;
use core::ops::Deref;

use crate::error::StorageError;

/// An append-only sequence of `Copy` values.
pub trait Sequence<T>: Deref<Target = [T]> + fmt::Debug {
    /// Creates an empty sequence.
    fn empty() -> Self;

    /// Appends a value, failing when the sequence is at capacity.
    fn push(&mut self, value: T) -> Result<(), StorageError>;

    /// Maximum number of elements, `None` when unbounded.
    fn capacity_limit() -> Option<usize>;

    /// Builds a sequence from a slice.
    fn from_slice(values: &[T]) -> Result<Self, StorageError>
    where
        Self: Sized,
        T: Copy,
    {
        let mut seq = Self::empty();
        for &value in values {
            seq.push(value)?;
        }
        Ok(seq)
    }
}

/// Selects the sequence type a curve stores its data in.
pub trait Storage {
    type Seq<T: Default + Copy + fmt::Debug>: Sequence<T>;
}

/// Growable heap storage backed by `Vec`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heap;

/// Fixed-capacity storage holding at most `N` elements per sequence.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounded<const N: usize>;

/// Storage for memory-constrained targets: three roots, i.e. a two-segment curve.
pub type Embedded = Bounded<3>;

impl Storage for Heap {
    type Seq<T: Default + Copy + fmt::Debug> = Vec<T>;
}

impl<const N: usize> Storage for Bounded<N> {
    type Seq<T: Default + Copy + fmt::Debug> = FixedBuffer<T, N>;
}

impl<T: fmt::Debug> Sequence<T> for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn push(&mut self, value: T) -> Result<(), StorageError> {
        Vec::push(self, value);
        Ok(())
    }

    fn capacity_limit() -> Option<usize> {
        None
    }
}

/// An append-only buffer over a fixed-size array.
#[derive(Clone, Copy)]
pub struct FixedBuffer<T, const N: usize> {
    buffer: [T; N],
    len: usize,
}

impl<T, const N: usize> FixedBuffer<T, N>
where
    T: Default + Copy,
{
    /// Creates an empty buffer with default-filled slots.
    pub fn new() -> Self {
        Self {
            buffer: [T::default(); N],
            len: 0,
        }
    }

    /// Checks if the buffer is full.
    pub fn is_full(&self) -> bool {
        self.len == N
    }
}

impl<T: Default + Copy, const N: usize> Default for FixedBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for FixedBuffer<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buffer[..self.len]
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.buffer[..self.len]).finish()
    }
}

impl<T, const N: usize> Sequence<T> for FixedBuffer<T, N>
where
    T: Default + Copy + fmt::Debug,
{
    fn empty() -> Self {
        Self::new()
    }

    fn push(&mut self, value: T) -> Result<(), StorageError> {
        if self.is_full() {
            return Err(StorageError::CapacityExceeded { capacity: N });
        }
        self.buffer[self.len] = value;
        self.len += 1;
        Ok(())
    }

    fn capacity_limit() -> Option<usize> {
        Some(N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_buffer_appends_in_order() {
        let mut buf: FixedBuffer<i32, 3> = FixedBuffer::new();
        assert!(buf.is_empty());
        buf.push(1).unwrap();
        buf.push(2).unwrap();
        assert_eq!(&*buf, &[1, 2]);
        assert!(!buf.is_full());
        buf.push(3).unwrap();
        assert!(buf.is_full());
        assert_eq!(buf.len(), 3);
        assert_eq!(buf[2], 3);
    }

    #[test]
    fn fixed_buffer_overflow_fails_loudly() {
        let mut buf: FixedBuffer<i32, 2> = FixedBuffer::new();
        buf.push(1).unwrap();
        buf.push(2).unwrap();
        assert_eq!(buf.push(3), Err(StorageError::CapacityExceeded { capacity: 2 }));
        // contents are untouched by the rejected push
        assert_eq!(&*buf, &[1, 2]);
    }

    #[test]
    fn from_slice_respects_capacity() {
        assert!(<FixedBuffer<u8, 3> as Sequence<u8>>::from_slice(&[1, 2, 3]).is_ok());
        assert!(<FixedBuffer<u8, 3> as Sequence<u8>>::from_slice(&[1, 2, 3, 4]).is_err());
        let v = <Vec<u8> as Sequence<u8>>::from_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(v, vec![1, 2, 3, 4]);
    }

    #[test]
    fn capacity_limits() {
        assert_eq!(<Vec<f64> as Sequence<f64>>::capacity_limit(), None);
        assert_eq!(<FixedBuffer<f64, 3> as Sequence<f64>>::capacity_limit(), Some(3));
    }
}
