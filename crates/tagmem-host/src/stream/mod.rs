// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Seek-and-read helpers for binary files.
//!
//! Positions are [`Offset`]s, never addresses: a stream position has nothing
//! to do with where the data ends up in memory. Only [`BinaryReadable`]
//! payloads can be read, so every byte pattern in the file produces a valid
//! value. Values are read in native byte order.
//!
//! For [`Origin::Current`] and [`Origin::End`] the offset is reinterpreted as
//! a signed distance, so a wrapped offset seeks backwards:
//!
//! ```
//! use std::io::Cursor;
//! use tagmem_core::Offset;
//! use tagmem_host::{Origin, read_value};
//!
//! let mut file = Cursor::new(vec![0, 0, 0, 0, 0xAA, 0xBB]);
//! let trailer: [u8; 2] = read_value(&mut file, Offset::ZERO - 2, Origin::End)?;
//! assert_eq!(trailer, [0xAA, 0xBB]);
//! # Ok::<(), tagmem_host::StreamError>(())
//! ```


use core::fmt;
use core::mem::{MaybeUninit, size_of, size_of_val};
use std::io::{self, Read, Seek, SeekFrom};

use tagmem_core::{BinaryReadable, Offset};
use tracing::{debug, trace};

// =============================================================================
// Types
// =============================================================================

/// Reference point for a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// From the start of the stream.
    #[default]
    Begin,
    /// From the current position.
    Current,
    /// From the end of the stream.
    End,
}

impl Origin {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    const fn seek_from(self, offset: Offset) -> SeekFrom {
        let raw = offset.get();
        match self {
            Self::Begin => SeekFrom::Start(raw as u64),
            Self::Current => SeekFrom::Current(raw as isize as i64),
            Self::End => SeekFrom::End(raw as isize as i64),
        }
    }
}

/// Error while reading from a stream.
#[derive(Debug)]
pub enum StreamError {
    /// The underlying stream failed.
    Io(io::Error),
    /// The stream ended before the value was complete.
    UnexpectedEof {
        /// Stream position where the read started.
        offset: u64,
        /// Number of bytes the read needed.
        wanted: usize,
    },
    /// A buffer for `count` values cannot be allocated.
    TooLarge {
        /// Number of values requested.
        count: usize,
    },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "stream error: {err}"),
            Self::UnexpectedEof { offset, wanted } => {
                write!(f, "unexpected end of stream reading {wanted} bytes at {offset:#x}")
            }
            Self::TooLarge { count } => write!(f, "cannot allocate a buffer for {count} values"),
        }
    }
}

impl core::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::UnexpectedEof { .. } | Self::TooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

// =============================================================================
// Internals
// =============================================================================

/// A value with every byte zeroed.
fn zeroed<T: BinaryReadable>() -> T {
    // SAFETY: binary-readable types are valid for every bit pattern,
    // including all zeros.
    unsafe { MaybeUninit::<T>::zeroed().assume_init() }
}

/// View a slice of binary-readable values as its raw bytes.
fn bytes_of_mut<T: BinaryReadable>(values: &mut [T]) -> &mut [u8] {
    let len = size_of_val(values);
    // SAFETY: the bytes belong to `values`, which are initialized and have no
    // padding; any bytes written through the view form valid `T`s.
    unsafe { core::slice::from_raw_parts_mut(values.as_mut_ptr().cast::<u8>(), len) }
}

fn read_bytes<R: Read + Seek>(reader: &mut R, bytes: &mut [u8]) -> Result<(), StreamError> {
    let offset = reader.stream_position()?;
    let wanted = bytes.len();
    trace!(offset, wanted, "read");

    reader.read_exact(bytes).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            debug!(offset, wanted, "short read");
            StreamError::UnexpectedEof { offset, wanted }
        } else {
            StreamError::Io(err)
        }
    })
}

/// Fail with `UnexpectedEof` unless `wanted` bytes remain after the current
/// position. Leaves the position unchanged.
fn ensure_remaining<R: Seek>(reader: &mut R, wanted: usize) -> Result<(), StreamError> {
    let offset = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(offset))?;

    let remaining = end.saturating_sub(offset);
    if !u64::try_from(wanted).is_ok_and(|wanted| wanted <= remaining) {
        debug!(offset, wanted, remaining, "read past end of stream");
        return Err(StreamError::UnexpectedEof { offset, wanted });
    }
    Ok(())
}

// =============================================================================
// Public API
// =============================================================================

/// Move the stream to `offset` relative to `origin`.
///
/// Returns the new position from the start of the stream.
pub fn set_pos<R: Seek>(reader: &mut R, offset: Offset, origin: Origin) -> Result<u64, StreamError> {
    let position = reader.seek(origin.seek_from(offset))?;
    trace!(offset = offset.get(), ?origin, position, "seek");
    Ok(position)
}

/// Skip `offset` bytes forward from the current position.
pub fn skip<R: Seek>(reader: &mut R, offset: Offset) -> Result<u64, StreamError> {
    set_pos(reader, offset, Origin::Current)
}

/// Seek to `offset` and read one `T`.
pub fn read_value<T: BinaryReadable, R: Read + Seek>(
    reader: &mut R,
    offset: Offset,
    origin: Origin,
) -> Result<T, StreamError> {
    set_pos(reader, offset, origin)?;

    let mut value = zeroed::<T>();
    read_bytes(reader, bytes_of_mut(core::slice::from_mut(&mut value)))?;
    Ok(value)
}

/// Fill `out` with consecutive values read from the current position.
pub fn read_into<T: BinaryReadable, R: Read + Seek>(
    reader: &mut R,
    out: &mut [T],
) -> Result<(), StreamError> {
    if out.is_empty() {
        return Ok(());
    }
    read_bytes(reader, bytes_of_mut(out))
}

/// Seek to `offset` and read `count` consecutive values.
///
/// `count` usually comes from the file itself, so the stream length is
/// checked before anything is allocated: a count larger than the rest of the
/// stream fails with [`StreamError::UnexpectedEof`], and one whose byte size
/// overflows or cannot be allocated fails with [`StreamError::TooLarge`].
pub fn read_vec<T: BinaryReadable, R: Read + Seek>(
    reader: &mut R,
    offset: Offset,
    count: usize,
    origin: Origin,
) -> Result<Vec<T>, StreamError> {
    set_pos(reader, offset, origin)?;

    let wanted = count
        .checked_mul(size_of::<T>())
        .ok_or(StreamError::TooLarge { count })?;
    ensure_remaining(reader, wanted)?;

    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|_| StreamError::TooLarge { count })?;
    values.resize(count, zeroed::<T>());

    read_into(reader, &mut values)?;
    Ok(values)
}

/// Seek to `offset` and read exactly `N` consecutive values.
///
/// ```
/// use std::io::Cursor;
/// use tagmem_core::Offset;
/// use tagmem_host::{Origin, read_array};
///
/// let mut file = Cursor::new(vec![1_u8, 2, 3, 4]);
/// let pair = read_array::<u8, 2, _>(&mut file, Offset::new(1), Origin::Begin)?;
/// assert_eq!(pair, [2, 3]);
/// # Ok::<(), tagmem_host::StreamError>(())
/// ```
///
/// `N` must be greater than zero; an empty array fails to build:
///
/// ```compile_fail
/// use std::io::Cursor;
/// use tagmem_core::Offset;
/// use tagmem_host::{Origin, read_array};
///
/// let mut file = Cursor::new(vec![1_u8, 2, 3, 4]);
/// let _ = read_array::<u8, 0, _>(&mut file, Offset::ZERO, Origin::Begin);
/// ```
pub fn read_array<T: BinaryReadable, const N: usize, R: Read + Seek>(
    reader: &mut R,
    offset: Offset,
    origin: Origin,
) -> Result<[T; N], StreamError> {
    const { assert!(N > 0, "read_array needs at least one element") };

    set_pos(reader, offset, origin)?;

    let mut values = [zeroed::<T>(); N];
    read_into(reader, &mut values)?;
    Ok(values)
}
