// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Domain-tagged numeric wrappers.
//!
//! A [`Tagged<T, Tag>`] stores exactly one primitive `T`. The `Tag` is an
//! uninhabited marker type that only exists at compile time, so two values
//! with the same primitive but different tags cannot be added, subtracted or
//! compared with each other.
//!
//! | Alias | Primitive | Meaning |
//! |---|---|---|
//! | [`Offset`] | `usize` | byte offset into a file or buffer |
//! | [`Rva`] | `u32` | address relative to an image base |
//! | [`Va`] | `usize` | absolute virtual address |
//!
//! Mixing domains does not compile:
//!
//! ```compile_fail
//! use tagmem_core::{Rva, Va};
//! let _ = Va::new(0x40_0000) + Rva::new(0x1000);
//! ```
//!
//! ```compile_fail
//! use tagmem_core::{Offset, Va};
//! let _ = Va::new(0x40_0000) == Offset::new(0x40_0000);
//! ```
//!
//! ```compile_fail
//! use tagmem_core::{Offset, Va};
//! let _ = Va::new(0x40_0000) - Offset::new(0x10);
//! ```
//!
//! Nor does implicit conversion to the primitive:
//!
//! ```compile_fail
//! use tagmem_core::Offset;
//! let raw: usize = Offset::new(8);
//! ```


use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{AsPrimitive, WrappingAdd, WrappingSub};

// =============================================================================
// Domain Tags
// =============================================================================

/// Marker trait for domain tags.
pub trait DomainTag: 'static {
    /// Short name used when formatting tagged values with `{:?}`.
    const NAME: &'static str;
}

/// Tag for byte offsets into files and buffers.
#[derive(Debug)]
pub enum OffsetTag {}

/// Tag for relative virtual addresses.
#[derive(Debug)]
pub enum RvaTag {}

/// Tag for absolute virtual addresses.
#[derive(Debug)]
pub enum VaTag {}

impl DomainTag for OffsetTag {
    const NAME: &'static str = "Offset";
}

impl DomainTag for RvaTag {
    const NAME: &'static str = "Rva";
}

impl DomainTag for VaTag {
    const NAME: &'static str = "Va";
}

/// A byte offset into a file or buffer.
pub type Offset = Tagged<usize, OffsetTag>;

/// An address relative to an image base.
pub type Rva = Tagged<u32, RvaTag>;

/// An absolute virtual address.
pub type Va = Tagged<usize, VaTag>;

// =============================================================================
// Tagged
// =============================================================================

/// A primitive value that belongs to exactly one domain.
///
/// The wrapper has the size and ABI of `T`. Arithmetic wraps on overflow,
/// matching machine address arithmetic.
#[repr(transparent)]
pub struct Tagged<T, Tag> {
    value: T,
    tag: PhantomData<fn() -> Tag>,
}

impl<T, Tag> Tagged<T, Tag> {
    /// Wrap a primitive value.
    #[inline]
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            tag: PhantomData,
        }
    }

    /// Wrap a value of another integer type, converting it with `as`
    /// semantics (truncating or extending).
    ///
    /// The caller is responsible for making sure no information is lost.
    #[inline]
    #[must_use]
    pub fn cast_from<U>(value: U) -> Self
    where
        T: Copy + 'static,
        U: AsPrimitive<T>,
    {
        Self::new(value.as_())
    }

    /// Get the wrapped value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> T
    where
        T: Copy,
    {
        self.value
    }

    /// Borrow the wrapped value.
    #[inline]
    #[must_use]
    pub const fn as_value(&self) -> &T {
        &self.value
    }

    /// Unwrap into the primitive value.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Clone, Tag> Clone for Tagged<T, Tag> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: Copy, Tag> Copy for Tagged<T, Tag> {}

impl<T: Default, Tag> Default for Tagged<T, Tag> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq, Tag> PartialEq for Tagged<T, Tag> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, Tag> Eq for Tagged<T, Tag> {}

impl<T: PartialOrd, Tag> PartialOrd for Tagged<T, Tag> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord, Tag> Ord for Tagged<T, Tag> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash, Tag> Hash for Tagged<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, Tag> AsRef<T> for Tagged<T, Tag> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl<T: WrappingAdd, Tag> Add<T> for Tagged<T, Tag> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: T) -> Self::Output {
        Self::new(self.value.wrapping_add(&rhs))
    }
}

impl<T: WrappingSub, Tag> Sub<T> for Tagged<T, Tag> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: T) -> Self::Output {
        Self::new(self.value.wrapping_sub(&rhs))
    }
}

/// The distance between two positions of the same domain is a plain number.
impl<T: WrappingSub, Tag> Sub for Tagged<T, Tag> {
    type Output = T;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.value.wrapping_sub(&rhs.value)
    }
}

impl<T: WrappingAdd, Tag> AddAssign<T> for Tagged<T, Tag> {
    #[inline]
    fn add_assign(&mut self, rhs: T) {
        self.value = self.value.wrapping_add(&rhs);
    }
}

impl<T: WrappingSub, Tag> SubAssign<T> for Tagged<T, Tag> {
    #[inline]
    fn sub_assign(&mut self, rhs: T) {
        self.value = self.value.wrapping_sub(&rhs);
    }
}

// =============================================================================
// Formatting
// =============================================================================

impl<T: fmt::LowerHex, Tag: DomainTag> fmt::Debug for Tagged<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#x})", Tag::NAME, self.value)
    }
}

impl<T: fmt::LowerHex, Tag> fmt::Display for Tagged<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.value)
    }
}

impl<T: fmt::LowerHex, Tag> fmt::LowerHex for Tagged<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl<T: fmt::UpperHex, Tag> fmt::UpperHex for Tagged<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

// =============================================================================
// Domain-specific helpers
// =============================================================================

impl Offset {
    /// The zero offset.
    pub const ZERO: Self = Self::new(0);
}

impl Va {
    /// The null address.
    pub const NULL: Self = Self::new(0);

    /// Check if this is the null address.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.value == 0
    }

    /// Resolve an RVA against the image base it is relative to.
    #[inline]
    #[must_use]
    pub fn from_rva(image_base: Self, rva: Rva) -> Self {
        image_base + rva.get() as usize
    }

    /// Express this address relative to `image_base`.
    ///
    /// Returns `None` if the address lies below the base or the distance
    /// does not fit in 32 bits.
    #[inline]
    #[must_use]
    pub fn to_rva(self, image_base: Self) -> Option<Rva> {
        let delta = self.value.checked_sub(image_base.value)?;
        u32::try_from(delta).ok().map(Rva::new)
    }
}

// Tags must not add to the footprint of the wrapped primitive.
const _: () = {
    assert!(core::mem::size_of::<Offset>() == core::mem::size_of::<usize>());
    assert!(core::mem::size_of::<Rva>() == core::mem::size_of::<u32>());
    assert!(core::mem::size_of::<Va>() == core::mem::size_of::<usize>());
    assert!(core::mem::align_of::<Va>() == core::mem::align_of::<usize>());
};
