// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address-like inputs and their normalization.
//!
//! Memory access and alignment accept any of a small, closed set of address
//! representations:
//!
//! - raw pointers (`*const T`, `*mut T`)
//! - platform-width integers (`usize`, `isize`)
//! - absolute virtual addresses ([`Va`])
//!
//! [`normalize`] turns any of them into the canonical [`Uptr`]. The set is
//! sealed; anything else is rejected at the call site:
//!
//! ```compile_fail
//! use tagmem_core::{Rva, normalize};
//! let _ = normalize(Rva::new(0x1000));
//! ```
//!
//! ```compile_fail
//! use tagmem_core::{Offset, normalize};
//! let _ = normalize(Offset::new(0x10));
//! ```
//!
//! ```compile_fail
//! use tagmem_core::normalize;
//! let _ = normalize(0x1000_u32);
//! ```


use crate::domain::Va;

/// Canonical pointer-sized unsigned address.
pub type Uptr = usize;

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for *const T {}
    impl<T> Sealed for *mut T {}
    impl Sealed for usize {}
    impl Sealed for isize {}
    impl Sealed for crate::domain::Va {}
}

/// A value that may be treated as a memory address.
///
/// This trait is sealed: it is implemented for raw pointers, `usize`,
/// `isize` and [`Va`], and cannot be implemented outside this crate.
pub trait AddressLike: sealed::Sealed + Copy {
    /// Reinterpret this value as a canonical address.
    fn to_uptr(self) -> Uptr;
}

impl<T> AddressLike for *const T {
    #[inline(always)]
    fn to_uptr(self) -> Uptr {
        // Exposed so the address can be turned back into a pointer by `mem`.
        self.expose_provenance()
    }
}

impl<T> AddressLike for *mut T {
    #[inline(always)]
    fn to_uptr(self) -> Uptr {
        self.expose_provenance()
    }
}

impl AddressLike for usize {
    #[inline(always)]
    fn to_uptr(self) -> Uptr {
        self
    }
}

impl AddressLike for isize {
    #[inline(always)]
    #[allow(clippy::cast_sign_loss)]
    fn to_uptr(self) -> Uptr {
        self as Uptr
    }
}

impl AddressLike for Va {
    #[inline(always)]
    fn to_uptr(self) -> Uptr {
        self.get()
    }
}

/// Normalize an address-like value into a canonical [`Uptr`].
///
/// Pointers yield their address bits, integers are reinterpreted at platform
/// width, and a [`Va`] yields its wrapped value.
#[inline(always)]
#[must_use]
pub fn normalize<A: AddressLike>(addr: A) -> Uptr {
    addr.to_uptr()
}
