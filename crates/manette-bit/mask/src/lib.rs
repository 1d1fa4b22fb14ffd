mod bitmask;

pub use bitmask::Bitmask;

/// A fieldless value that occupies exactly one bit of a [`Bitmask`].
pub trait Bitable {
    /// The flag value, a single set bit.
    fn bit(&self) -> u64;
    /// Position of the bit, `bit() == 1 << index()`.
    fn index(&self) -> u32;
}
