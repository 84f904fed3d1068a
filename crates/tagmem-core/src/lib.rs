// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Compile-time typed addresses and offsets for low-level tooling.
//!
//! File offsets, relative virtual addresses and absolute virtual addresses are
//! all plain integers to the machine. Mixing them up (adding an RVA to a VA,
//! treating a file offset as a pointer) is a classic source of bugs in binary
//! parsers and loaders. This crate gives every domain its own type so those
//! mix-ups become compile errors, at zero runtime cost.
//!
//! # Modules
//!
//! - [`domain`]: tagged numeric wrappers ([`Offset`], [`Rva`], [`Va`])
//! - [`addr`]: the closed set of address-like inputs and [`normalize`]
//! - [`mem`]: typed reads and writes at `base + offset`
//! - [`align`]: power-of-two alignment that keeps the domain tag
//! - [`range`]: sentinel-terminated forward/backward ranges
//!
//! # Design Principles
//!
//! - **No allocation, no I/O**: every item is a plain value
//! - **No runtime guards**: contract violations are either type errors or
//!   documented caller obligations
//! - **`no_std`**: usable from loaders and kernels
//!
//! # Example
//!
//! ```
//! use tagmem_core::{Offset, Va, align_up, normalize, range};
//!
//! let base = Va::new(0x1000);
//! let header = base + 0x40;
//! assert_eq!(header - base, 0x40);
//!
//! let aligned = align_up(Offset::new(0x123), 0x100);
//! assert_eq!(aligned, Offset::new(0x200));
//!
//! assert_eq!(normalize(header), 0x1040);
//! assert_eq!(range(3_u8).iter().collect::<Vec<_>>(), [0, 1, 2]);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod addr;
pub mod align;
pub mod domain;
pub mod mem;
pub mod range;

// Re-export commonly used items at crate root
pub use addr::{AddressLike, Uptr, normalize};
pub use align::{Alignable, align_down, align_up, is_aligned};
pub use domain::{DomainTag, Offset, OffsetTag, Rva, RvaTag, Tagged, Va, VaTag};
pub use mem::{BinaryReadable, read, read_raw, write, write_raw};
pub use range::{
    Boundary, Direction, Range, RangeIter, Steppable, irange, irange_between, irange_step, range,
    range_between, range_step,
};
