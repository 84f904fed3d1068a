// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Typed memory reads and writes at `base + offset`.
//!
//! Two families are provided:
//!
//! | Function | Access | Alignment |
//! |---|---|---|
//! | [`read`] / [`write`] | byte-wise copy | any |
//! | [`read_raw`] / [`write_raw`] | typed dereference | must match `T` |
//!
//! The copy-based pair is the default for externally sourced or memory-mapped
//! data, where alignment is not guaranteed. The raw pair is for buffers the
//! caller controls and knows to be aligned; it compiles down to a single load
//! or store.
//!
//! None of these functions check bounds, alignment or permissions. The byte
//! offset is always an [`Offset`], so an [`Rva`](crate::Rva) or
//! [`Va`](crate::Va) cannot be passed by mistake.
//!
//! ```
//! use tagmem_core::{Offset, read};
//!
//! let bytes = [0xAA_u8, 0x34, 0x12];
//! // SAFETY: bytes 1 and 2 lie within `bytes`.
//! let value = unsafe { read::<u16>(bytes.as_ptr(), Offset::new(1)) };
//! assert_eq!(value, u16::from_ne_bytes([0x34, 0x12]));
//! ```
//!
//! Payloads with invalid bit patterns are rejected:
//!
//! ```compile_fail
//! use tagmem_core::{Offset, read};
//!
//! let bytes = [1_u8];
//! // SAFETY: one readable byte.
//! let _ = unsafe { read::<bool>(bytes.as_ptr(), Offset::ZERO) };
//! ```
//!
//! So are pointers:
//!
//! ```compile_fail
//! use tagmem_core::{Offset, read};
//!
//! let bytes = [0_u8; 16];
//! // SAFETY: sixteen readable bytes.
//! let _ = unsafe { read::<*const u8>(bytes.as_ptr(), Offset::ZERO) };
//! ```
//!
//! A zero-sized implementor fails the build as soon as an accessor is
//! instantiated for it:
//!
//! ```compile_fail
//! use tagmem_core::{BinaryReadable, Offset, read};
//!
//! #[derive(Clone, Copy)]
//! struct Empty;
//!
//! // SAFETY: no bytes, no padding, no pointers.
//! unsafe impl BinaryReadable for Empty {}
//!
//! let bytes = [0_u8; 1];
//! // SAFETY: reads nothing.
//! let _ = unsafe { read::<Empty>(bytes.as_ptr(), Offset::ZERO) };
//! ```

#[cfg(test)]
mod mem_test;

use core::mem::{MaybeUninit, size_of};
use core::ptr;

use crate::addr::{AddressLike, Uptr, normalize};
use crate::domain::{Offset, Tagged};

// =============================================================================
// BinaryReadable
// =============================================================================

/// A payload type that may be copied to and from raw memory byte-for-byte.
///
/// Only binary-readable types can be read or written through [`read`],
/// [`write`], [`read_raw`] and [`write_raw`], or the stream helpers built on
/// them.
///
/// # Safety
///
/// Implementors must guarantee that the type:
/// - has a fixed layout (a primitive, an array, or `#[repr(C)]` /
///   `#[repr(transparent)]` over binary-readable fields),
/// - is valid for every bit pattern of its size (rules out `bool`, `char`,
///   enums and references),
/// - has no padding bytes,
/// - contains no pointers.
///
/// Zero-sized implementors are rejected at compile time by every operation.
pub unsafe trait BinaryReadable: Copy + 'static {}

macro_rules! impl_binary_readable {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive numbers accept every bit pattern.
            unsafe impl BinaryReadable for $ty {}
        )*
    };
}

impl_binary_readable!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

// SAFETY: arrays have no padding between elements and inherit validity from `T`.
unsafe impl<T: BinaryReadable, const N: usize> BinaryReadable for [T; N] {}

// SAFETY: `Tagged` is `repr(transparent)` over `T`.
unsafe impl<T: BinaryReadable, Tag: 'static> BinaryReadable for Tagged<T, Tag> {}

/// Evaluated at monomorphization time; fails the build for zero-sized payloads.
struct NonEmpty<T>(core::marker::PhantomData<T>);

impl<T> NonEmpty<T> {
    const CHECK: () = assert!(
        size_of::<T>() != 0,
        "binary-readable payloads must not be zero-sized"
    );
}

#[inline(always)]
fn effective_address(base: impl AddressLike, off: Offset) -> Uptr {
    normalize(base).wrapping_add(off.get())
}

// =============================================================================
// Copy-based access
// =============================================================================

/// Read a `T` from `base + off` by copying its bytes.
///
/// Works for any alignment of the source address.
///
/// # Safety
///
/// `base + off` must point to `size_of::<T>()` bytes that are valid for
/// reads for the duration of the call and not concurrently written.
#[inline(always)]
#[must_use]
pub unsafe fn read<T: BinaryReadable>(base: impl AddressLike, off: Offset) -> T {
    let () = NonEmpty::<T>::CHECK;

    let src = ptr::with_exposed_provenance::<u8>(effective_address(base, off));
    let mut value = MaybeUninit::<T>::uninit();

    // SAFETY: the caller guarantees `size_of::<T>()` readable bytes at `src`.
    // The destination is a distinct local of exactly that size and byte
    // copies carry no alignment requirement.
    unsafe {
        ptr::copy_nonoverlapping(src, value.as_mut_ptr().cast::<u8>(), size_of::<T>());
    }

    // SAFETY: every byte was initialized above and `T` is valid for any bit
    // pattern.
    unsafe { value.assume_init() }
}

/// Write `value` to `base + off` by copying its bytes.
///
/// Works for any alignment of the destination address.
///
/// # Safety
///
/// `base + off` must point to `size_of::<T>()` bytes that are valid for
/// writes for the duration of the call and not concurrently accessed.
#[inline(always)]
pub unsafe fn write<T: BinaryReadable>(base: impl AddressLike, off: Offset, value: T) {
    let () = NonEmpty::<T>::CHECK;

    let dst = ptr::with_exposed_provenance_mut::<u8>(effective_address(base, off));
    let src = ptr::from_ref(&value).cast::<u8>();

    // SAFETY: the caller guarantees `size_of::<T>()` writable bytes at `dst`;
    // `src` is a local and cannot overlap it.
    unsafe {
        ptr::copy_nonoverlapping(src, dst, size_of::<T>());
    }
}

// =============================================================================
// Direct-dereference access
// =============================================================================

/// Read a `T` from `base + off` through a typed pointer.
///
/// # Safety
///
/// Same as [`read`], and additionally `base + off` must be aligned to
/// `align_of::<T>()`. A misaligned address is undefined behavior; it is not
/// checked.
#[inline(always)]
#[must_use]
pub unsafe fn read_raw<T: BinaryReadable>(base: impl AddressLike, off: Offset) -> T {
    let () = NonEmpty::<T>::CHECK;

    let src = ptr::with_exposed_provenance::<T>(effective_address(base, off));

    // SAFETY: the caller guarantees `src` is valid, aligned and initialized.
    unsafe { *src }
}

/// Write `value` to `base + off` through a typed pointer.
///
/// # Safety
///
/// Same as [`write`], and additionally `base + off` must be aligned to
/// `align_of::<T>()`. A misaligned address is undefined behavior; it is not
/// checked.
#[inline(always)]
pub unsafe fn write_raw<T: BinaryReadable>(base: impl AddressLike, off: Offset, value: T) {
    let () = NonEmpty::<T>::CHECK;

    let dst = ptr::with_exposed_provenance_mut::<T>(effective_address(base, off));

    // SAFETY: the caller guarantees `dst` is valid for writes and aligned.
    unsafe { dst.write(value) }
}
