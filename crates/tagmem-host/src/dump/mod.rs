// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hexadecimal memory dumps.
//!
//! Each line shows 16 bytes:
//!
//! ```text
//! 0x00007ffd5c3e1a40: 4d 5a 90 00 03 00 00 00 04 00 00 00 ff ff 00 00 |MZ..............|
//! 0x00007ffd5c3e1a50: b8 00 00 00                                     |....            |
//! ```
//!
//! The address column is zero-padded to the platform pointer width. Output
//! goes to a caller-supplied [`fmt::Write`] sink; nothing is buffered between
//! calls.


use core::fmt::{self, Write};
use core::mem::size_of;

use tagmem_core::{AddressLike, Uptr, normalize};
use tracing::trace;

/// Bytes shown per line.
pub const BYTES_PER_LINE: usize = 16;

/// Hex digits needed for a full address.
const ADDR_WIDTH: usize = size_of::<Uptr>() * 2;

const COLOR_ADDR: &str = "\x1b[38;5;12m";
const COLOR_RESET: &str = "\x1b[0m";

/// Formatting options for dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Highlight the address column with ANSI colors.
    pub color: bool,
}

impl DumpOptions {
    /// No escape sequences; suitable for logs and files.
    pub const PLAIN: Self = Self { color: false };

    /// Address column highlighted for terminals.
    pub const COLORED: Self = Self { color: true };
}

impl Default for DumpOptions {
    /// Colored when the `color` feature is enabled.
    fn default() -> Self {
        Self {
            color: cfg!(feature = "color"),
        }
    }
}

/// Dump `bytes`, labelling the first one with address `base`.
pub fn dump_bytes<W: Write>(
    out: &mut W,
    bytes: &[u8],
    base: Uptr,
    options: DumpOptions,
) -> fmt::Result {
    trace!(base, len = bytes.len(), "hex dump");

    for (index, line) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let addr = base.wrapping_add(index * BYTES_PER_LINE);
        write_line(out, addr, line, options)?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, addr: Uptr, line: &[u8], options: DumpOptions) -> fmt::Result {
    let missing = BYTES_PER_LINE - line.len();

    if options.color {
        out.write_str(COLOR_ADDR)?;
    }
    write!(out, "0x{addr:0width$x}", width = ADDR_WIDTH)?;
    if options.color {
        out.write_str(COLOR_RESET)?;
    }
    out.write_str(": ")?;

    for byte in line {
        write!(out, "{byte:02x} ")?;
    }
    for _ in 0..missing {
        out.write_str("   ")?;
    }

    out.write_char('|')?;
    for &byte in line {
        out.write_char(printable(byte))?;
    }
    for _ in 0..missing {
        out.write_char(' ')?;
    }
    out.write_str("|\n")
}

const fn printable(byte: u8) -> char {
    if matches!(byte, 0x20..=0x7e) {
        byte as char
    } else {
        '.'
    }
}

/// Dump `len` bytes of memory starting at `base`.
///
/// # Safety
///
/// `len` bytes starting at `base` must be readable for the duration of the
/// call and not concurrently written.
pub unsafe fn dump<W: Write>(
    out: &mut W,
    base: impl AddressLike,
    len: usize,
    options: DumpOptions,
) -> fmt::Result {
    if len == 0 {
        return Ok(());
    }

    let addr = normalize(base);
    let ptr = core::ptr::with_exposed_provenance::<u8>(addr);

    // SAFETY: the caller guarantees `len` readable bytes at `addr`; `len` is
    // non-zero so `ptr` is not dangling.
    let bytes = unsafe { core::slice::from_raw_parts(ptr, len) };
    dump_bytes(out, bytes, addr, options)
}

/// Dump `bytes` into a new `String`.
#[must_use]
pub fn dump_to_string(bytes: &[u8], base: Uptr, options: DumpOptions) -> String {
    let lines = bytes.len().div_ceil(BYTES_PER_LINE);
    let mut text = String::with_capacity(lines * (ADDR_WIDTH + 4 * BYTES_PER_LINE + 32));

    let written = dump_bytes(&mut text, bytes, base, options);
    debug_assert!(written.is_ok(), "writing into a String cannot fail");
    text
}
