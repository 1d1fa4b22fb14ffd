use std::fmt;
use std::marker::PhantomData;

use crate::Bitable;

/// A set of [`Bitable`] flags packed into a single `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask<T: Bitable>(u64, PhantomData<T>);

impl<T: Bitable> Bitmask<T> {
    /// Create a bitmask holding every value of the slice.
    pub fn new(values: &[T]) -> Self {
        let bits = values.iter().fold(0, |acc, v| acc | v.bit());
        Self(bits, PhantomData)
    }

    /// Create an empty bitmask.
    pub const fn empty() -> Self {
        Self(0, PhantomData)
    }

    /// Create a bitmask from raw flag bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits, PhantomData)
    }

    /// Raw flag bits.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        (self.0 & value.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, value: T) {
        self.0 |= value.bit();
    }

    #[inline]
    pub fn remove(&mut self, value: T) {
        self.0 &= !value.bit();
    }

    /// Insert the value when `on` is true, remove it otherwise.
    #[inline]
    pub fn set(&mut self, value: T, on: bool) {
        if on {
            self.insert(value);
        } else {
            self.remove(value);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Every flag of `self` is also set in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Bitmask<T>) -> bool {
        self.0 & other.0 == self.0
    }

    #[inline]
    pub fn union(&self, other: &Bitmask<T>) -> Self {
        Self(self.0 | other.0, PhantomData)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl<T: Bitable> Default for Bitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Bitable> fmt::Debug for Bitmask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmask({:#06x})", self.0)
    }
}
