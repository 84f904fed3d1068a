// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Typed function pointers from raw addresses.
//!
//! A [`Caller`] turns an address-like value (an entry point found in a loaded
//! image, a pointer returned by a loader, a [`Va`](tagmem_core::Va)) into a
//! callable of a chosen signature. Address zero yields an empty caller whose
//! `call` returns `None`.
//!
//! ```
//! use tagmem_host::{Caller, caller};
//!
//! fn triple(x: u32) -> u32 {
//!     x * 3
//! }
//!
//! let entry = triple as fn(u32) -> u32;
//! // SAFETY: `entry` is a function of exactly this signature.
//! let f: Caller<fn(u32) -> u32> = unsafe { caller(entry as usize) };
//! assert_eq!(f.call(7), Some(21));
//! ```
//!
//! Signatures with up to six parameters are supported for `fn`,
//! `extern "C" fn` and their `unsafe` variants. Parameters that borrow
//! (`fn(&T)`) are higher-ranked and are not covered; pass raw pointers
//! instead.


use core::fmt;
use core::mem::{size_of, transmute_copy};

use tagmem_core::{AddressLike, normalize};

mod sealed {
    pub trait Sealed {}
}

/// A function pointer type that can be built from an address.
///
/// Sealed: implemented for `fn`, `extern "C" fn`, `unsafe fn` and
/// `unsafe extern "C" fn` of arity 0 to 6.
pub trait FnPointer: sealed::Sealed + Copy {
    /// Address of the function.
    fn addr(self) -> usize;
}

/// A possibly empty function pointer of type `F`.
#[derive(Clone, Copy)]
pub struct Caller<F: FnPointer> {
    entry: Option<F>,
}

impl<F: FnPointer> Caller<F> {
    /// A caller with no target.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { entry: None }
    }

    /// Wrap an existing function pointer.
    #[inline]
    #[must_use]
    pub const fn from_fn(entry: F) -> Self {
        Self { entry: Some(entry) }
    }

    /// The target, if any.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> Option<F> {
        self.entry
    }

    /// Returns `true` if the caller has a target.
    #[inline]
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        self.entry.is_some()
    }
}

impl<F: FnPointer> Default for Caller<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: FnPointer> fmt::Debug for Caller<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry {
            Some(entry) => write!(f, "Caller({:#x})", entry.addr()),
            None => f.write_str("Caller(empty)"),
        }
    }
}

/// Build a caller of type `F` for the function at `addr`.
///
/// Address zero gives an empty caller.
///
/// # Safety
///
/// A non-zero `addr` must be the entry point of a function whose signature
/// and ABI match `F` exactly, and that code must stay mapped for as long as
/// the caller is used.
pub unsafe fn caller<F: FnPointer>(addr: impl AddressLike) -> Caller<F> {
    const { assert!(size_of::<F>() == size_of::<usize>()) };

    let raw = normalize(addr);
    if raw == 0 {
        return Caller::empty();
    }

    let ptr = core::ptr::with_exposed_provenance::<()>(raw);
    // SAFETY: `F` is a function pointer of the same size as a data pointer;
    // the caller guarantees that `raw` is a function of type `F`.
    let entry = unsafe { transmute_copy::<*const (), F>(&ptr) };
    Caller::from_fn(entry)
}

// =============================================================================
// Signatures
// =============================================================================

macro_rules! fn_pointers {
    (@safe $fn_ty:ty; $($arg:ident $val:ident),*) => {
        fn_pointers!(@pointer $fn_ty; $($arg),*);

        impl<R, $($arg),*> Caller<$fn_ty> {
            /// Call the target, or return `None` if the caller is empty.
            #[inline]
            pub fn call(&self, $($val: $arg),*) -> Option<R> {
                self.entry.map(|entry| entry($($val),*))
            }
        }
    };

    (@unsafe $fn_ty:ty; $($arg:ident $val:ident),*) => {
        fn_pointers!(@pointer $fn_ty; $($arg),*);

        impl<R, $($arg),*> Caller<$fn_ty> {
            /// Call the target, or return `None` if the caller is empty.
            ///
            /// # Safety
            ///
            /// The target's own safety contract must hold for these arguments.
            #[inline]
            pub unsafe fn call(&self, $($val: $arg),*) -> Option<R> {
                // SAFETY: forwarded to the caller.
                self.entry.map(|entry| unsafe { entry($($val),*) })
            }
        }
    };

    (@pointer $fn_ty:ty; $($arg:ident),*) => {
        impl<R, $($arg),*> sealed::Sealed for $fn_ty {}

        impl<R, $($arg),*> FnPointer for $fn_ty {
            #[inline]
            fn addr(self) -> usize {
                self as usize
            }
        }
    };

    ($($arg:ident $val:ident),*) => {
        fn_pointers!(@safe fn($($arg),*) -> R; $($arg $val),*);
        fn_pointers!(@safe extern "C" fn($($arg),*) -> R; $($arg $val),*);
        fn_pointers!(@unsafe unsafe fn($($arg),*) -> R; $($arg $val),*);
        fn_pointers!(@unsafe unsafe extern "C" fn($($arg),*) -> R; $($arg $val),*);
    };
}

fn_pointers!();
fn_pointers!(A0 a0);
fn_pointers!(A0 a0, A1 a1);
fn_pointers!(A0 a0, A1 a1, A2 a2);
fn_pointers!(A0 a0, A1 a1, A2 a2, A3 a3);
fn_pointers!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
fn_pointers!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
