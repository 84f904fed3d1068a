// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Power-of-two alignment for unsigned integers and tagged values.
//!
//! The free functions accept either a bare unsigned integer or a
//! [`Tagged`] value; aligning a tagged value returns the same tagged type, so
//! an [`Offset`](crate::Offset) stays an offset:
//!
//! ```
//! use tagmem_core::{Offset, align_down, align_up};
//!
//! assert_eq!(align_up(0x1234_u64, 0x1000), 0x2000);
//! let section: Offset = align_down(Offset::new(0x1234), 0x200);
//! assert_eq!(section, Offset::new(0x1200));
//! ```
//!
//! The alignment must be a power of two. This is not checked; any other value
//! produces an unspecified (but non-panicking) result.


use num_traits::{PrimInt, Unsigned, WrappingAdd, WrappingSub};

use crate::domain::Tagged;

/// A value that can be rounded to a power-of-two boundary.
pub trait Alignable: Copy {
    /// The primitive type of the alignment argument.
    type Alignment: Copy;

    /// Round up to the next multiple of `alignment`.
    #[must_use]
    fn align_up(self, alignment: Self::Alignment) -> Self;

    /// Round down to the previous multiple of `alignment`.
    #[must_use]
    fn align_down(self, alignment: Self::Alignment) -> Self;

    /// Check whether this value is a multiple of `alignment`.
    #[must_use]
    fn is_aligned(self, alignment: Self::Alignment) -> bool;
}

#[inline(always)]
fn mask_of<T: PrimInt + WrappingSub>(alignment: T) -> T {
    alignment.wrapping_sub(&T::one())
}

#[inline(always)]
fn up<T: PrimInt + Unsigned + WrappingAdd + WrappingSub>(value: T, alignment: T) -> T {
    let mask = mask_of(alignment);
    value.wrapping_add(&mask) & !mask
}

#[inline(always)]
fn down<T: PrimInt + Unsigned + WrappingSub>(value: T, alignment: T) -> T {
    value & !mask_of(alignment)
}

macro_rules! impl_alignable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Alignable for $ty {
                type Alignment = Self;

                #[inline(always)]
                fn align_up(self, alignment: Self) -> Self {
                    up(self, alignment)
                }

                #[inline(always)]
                fn align_down(self, alignment: Self) -> Self {
                    down(self, alignment)
                }

                #[inline(always)]
                fn is_aligned(self, alignment: Self) -> bool {
                    self & mask_of(alignment) == 0
                }
            }
        )*
    };
}

impl_alignable!(u8, u16, u32, u64, u128, usize);

impl<T: Alignable<Alignment = T>, Tag> Alignable for Tagged<T, Tag> {
    type Alignment = T;

    #[inline(always)]
    fn align_up(self, alignment: T) -> Self {
        Self::new(self.get().align_up(alignment))
    }

    #[inline(always)]
    fn align_down(self, alignment: T) -> Self {
        Self::new(self.get().align_down(alignment))
    }

    #[inline(always)]
    fn is_aligned(self, alignment: T) -> bool {
        self.get().is_aligned(alignment)
    }
}

/// Round `value` up to a multiple of `alignment` (a power of two).
///
/// Computes `(value + alignment - 1) & !(alignment - 1)` with wrapping
/// arithmetic.
#[inline(always)]
#[must_use]
pub fn align_up<V: Alignable>(value: V, alignment: V::Alignment) -> V {
    value.align_up(alignment)
}

/// Round `value` down to a multiple of `alignment` (a power of two).
///
/// Computes `value & !(alignment - 1)`.
#[inline(always)]
#[must_use]
pub fn align_down<V: Alignable>(value: V, alignment: V::Alignment) -> V {
    value.align_down(alignment)
}

/// Check whether `value` is a multiple of `alignment` (a power of two).
#[inline(always)]
#[must_use]
pub fn is_aligned<V: Alignable>(value: V, alignment: V::Alignment) -> bool {
    value.is_aligned(alignment)
}
