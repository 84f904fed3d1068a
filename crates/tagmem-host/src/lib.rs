// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Host-side helpers built on `tagmem-core`.
//!
//! The core crate is `no_std` and has no I/O. This crate adds the pieces a
//! binary tool running on a normal OS needs around it:
//!
//! - [`stream`]: seek-and-read of binary-readable values from `Read + Seek`
//! - [`dump`]: hexadecimal memory dumps into any `fmt::Write` sink
//! - [`invoke`]: typed function pointers from address-like values
//! - [`time`]: Unix timestamps and a monotonic stop watch
//!
//! All of them consume the core's [`Offset`](tagmem_core::Offset),
//! [`AddressLike`](tagmem_core::AddressLike) and
//! [`BinaryReadable`](tagmem_core::BinaryReadable) contracts; none of them
//! adds new address arithmetic.
//!
//! Logging goes through `tracing`; install a subscriber in the binary to see
//! seek/read traces.

pub mod dump;
pub mod invoke;
pub mod stream;
pub mod time;

// Re-export commonly used types at crate root
pub use dump::{BYTES_PER_LINE, DumpOptions, dump, dump_bytes, dump_to_string};
pub use invoke::{Caller, FnPointer, caller};
pub use stream::{
    Origin, StreamError, read_array, read_into, read_value, read_vec, set_pos, skip,
};
pub use time::{
    StopWatch, from_unix_millis, from_unix_seconds, to_unix_millis, to_unix_seconds,
    unix_millis_now, unix_seconds_now,
};
