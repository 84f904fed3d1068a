// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for typed memory access.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{BinaryReadable, read, read_raw, write, write_raw};
use crate::{Offset, Rva, Va};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SectionHeader {
    virtual_address: Rva,
    size: u32,
    characteristics: u32,
    reserved: [u8; 4],
}

// SAFETY: repr(C), four 4-byte-aligned binary-readable fields, no padding.
unsafe impl BinaryReadable for SectionHeader {}

#[test]
fn read_native_endian_integers() {
    let bytes = [0x78_u8, 0x56, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x89];

    // SAFETY: both reads stay within `bytes`.
    let (low, high) = unsafe {
        (
            read::<u32>(bytes.as_ptr(), Offset::ZERO),
            read::<u32>(bytes.as_ptr(), Offset::new(4)),
        )
    };

    assert_eq!(low, u32::from_ne_bytes([0x78, 0x56, 0x34, 0x12]));
    assert_eq!(high, u32::from_ne_bytes([0xEF, 0xCD, 0xAB, 0x89]));
}

#[test]
fn write_then_read_at_every_misalignment() {
    let mut bytes = [0_u8; 32];
    let base = bytes.as_mut_ptr();

    for shift in 0..8 {
        let off = Offset::new(shift);
        let value = 0x0123_4567_89AB_CDEF_u64.rotate_left(u32::try_from(shift).unwrap());

        // SAFETY: `shift + 8 <= 32`, within `bytes`.
        let back = unsafe {
            write(base, off, value);
            read::<u64>(base, off)
        };
        assert_eq!(back, value, "round trip failed at offset {shift}");
    }
}

#[test]
fn write_only_touches_payload_bytes() {
    let mut bytes = [0xAA_u8; 8];

    // SAFETY: writes two bytes inside `bytes`.
    unsafe { write(bytes.as_mut_ptr(), Offset::new(3), 0_u16) };

    assert_eq!(bytes, [0xAA, 0xAA, 0xAA, 0, 0, 0xAA, 0xAA, 0xAA]);
}

#[test]
fn read_through_va_and_usize_bases() {
    let words = [10_u32, 20, 30, 40];
    let addr = words.as_ptr() as usize;

    // SAFETY: offsets 8 and 12 are inside `words`.
    let (third, fourth) = unsafe {
        (
            read::<u32>(Va::new(addr), Offset::new(8)),
            read::<u32>(addr, Offset::new(12)),
        )
    };

    assert_eq!(third, 30);
    assert_eq!(fourth, 40);
}

#[test]
fn read_struct_and_tagged_fields() {
    let header = SectionHeader {
        virtual_address: Rva::new(0x1000),
        size: 0x200,
        characteristics: 0x6000_0020,
        reserved: [1, 2, 3, 4],
    };
    let mut bytes = [0_u8; 40];

    // SAFETY: a 16-byte header at offset 5 fits in 40 bytes.
    let back = unsafe {
        write(bytes.as_mut_ptr(), Offset::new(5), header);
        read::<SectionHeader>(bytes.as_ptr(), Offset::new(5))
    };
    assert_eq!(back, header);

    // SAFETY: the RVA is the first field of the header written above.
    let rva = unsafe { read::<Rva>(bytes.as_ptr(), Offset::new(5)) };
    assert_eq!(rva, Rva::new(0x1000));
}

#[test]
fn read_arrays() {
    let bytes: [u8; 6] = *b"MZ\x90\0\x03\0";

    // SAFETY: reads the first two bytes.
    let magic = unsafe { read::<[u8; 2]>(bytes.as_ptr(), Offset::ZERO) };
    assert_eq!(&magic, b"MZ");
}

#[test]
fn raw_access_on_aligned_buffer() {
    let mut words = [0_u64; 4];
    let base = words.as_mut_ptr();

    // SAFETY: every offset is a multiple of 8 inside `words`.
    unsafe {
        write_raw(base, Offset::new(8), 0xDEAD_BEEF_u64);
        write_raw(base, Offset::new(24), u64::MAX);
        assert_eq!(read_raw::<u64>(base, Offset::new(8)), 0xDEAD_BEEF);
        assert_eq!(read_raw::<u64>(base, Offset::new(24)), u64::MAX);
        assert_eq!(read_raw::<u32>(base, Offset::new(16)), 0);
    }

    assert_eq!(words, [0, 0xDEAD_BEEF, 0, u64::MAX]);
}

#[test]
fn raw_and_copy_agree_on_aligned_data() {
    let values = [1.5_f64, -2.25, 1e300];

    for index in 0..values.len() {
        let off = Offset::new(index * 8);
        // SAFETY: aligned, in-bounds reads of `values`.
        let (copied, direct) = unsafe {
            (
                read::<f64>(values.as_ptr(), off),
                read_raw::<f64>(values.as_ptr(), off),
            )
        };
        assert_eq!(copied.to_bits(), direct.to_bits());
    }
}
