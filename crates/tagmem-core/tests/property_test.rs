// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Property tests for the tagmem core laws.
//!
//! Verifies that:
//! 1. Same-domain differences equal the primitive difference
//! 2. Copy-based write followed by read returns the written value at any alignment
//! 3. `align_down <= v <= align_up`, and aligning an aligned value is a no-op
//! 4. Alignment keeps the domain tag
//! 5. Ranges match their closed-form enumeration and are restartable
//! 6. Pointers, integers and `Va` of the same bits normalize identically

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use tagmem_core::{
    Boundary, Direction, Offset, Rva, Va, align_down, align_up, irange_step, is_aligned,
    normalize, read, range_step, write,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Power-of-two alignments up to 64 KiB.
fn alignment_strategy() -> impl Strategy<Value = u64> {
    (0_u32..=16).prop_map(|shift| 1_u64 << shift)
}

/// Values far enough from `u64::MAX` that `align_up` cannot wrap.
fn alignable_value_strategy() -> impl Strategy<Value = u64> {
    0_u64..=(u64::MAX >> 1)
}

// ============================================================================
// DOMAIN PROPERTIES
// ============================================================================

proptest! {
    /// Property: the difference of two same-domain values is the primitive
    /// difference, and adding it back restores the original position.
    #[test]
    fn prop_tagged_difference(a in any::<u32>(), b in any::<u32>()) {
        let (ra, rb) = (Rva::new(a), Rva::new(b));
        prop_assert_eq!(ra - rb, a.wrapping_sub(b));
        prop_assert_eq!(rb + (ra - rb), ra);
    }

    /// Property: ordering of tagged values follows the wrapped primitive.
    #[test]
    fn prop_tagged_ordering(a in any::<usize>(), b in any::<usize>()) {
        prop_assert_eq!(Offset::new(a).cmp(&Offset::new(b)), a.cmp(&b));
    }
}

// ============================================================================
// MEMORY PROPERTIES
// ============================================================================

proptest! {
    /// Property: write then copy-based read at the same offset round-trips,
    /// whatever the alignment of the offset.
    #[test]
    fn prop_copy_round_trip_u64(value in any::<u64>(), shift in 0_usize..24) {
        let mut buffer = [0_u8; 32];
        let off = Offset::new(shift);

        // SAFETY: `shift + 8 <= 32`.
        let back = unsafe {
            write(buffer.as_mut_ptr(), off, value);
            read::<u64>(buffer.as_ptr(), off)
        };
        prop_assert_eq!(back, value);
    }

    /// Property: the same round trip holds for arrays and tagged payloads.
    #[test]
    fn prop_copy_round_trip_compound(
        words in any::<[u16; 5]>(),
        rva in any::<u32>(),
        shift in 0_usize..16,
    ) {
        let mut buffer = [0_u8; 40];
        let base = buffer.as_mut_ptr();
        let words_at = Offset::new(shift);
        let rva_at = Offset::new(shift + 10);

        // SAFETY: 10 + 4 bytes starting at most at offset 15 fit in 40 bytes.
        let (words_back, rva_back) = unsafe {
            write(base, words_at, words);
            write(base, rva_at, Rva::new(rva));
            (read::<[u16; 5]>(base, words_at), read::<Rva>(base, rva_at))
        };
        prop_assert_eq!(words_back, words);
        prop_assert_eq!(rva_back, Rva::new(rva));
    }
}

// ============================================================================
// ALIGNMENT PROPERTIES
// ============================================================================

proptest! {
    /// Property: `align_down(v) <= v <= align_up(v)` and both results are aligned.
    #[test]
    fn prop_align_brackets_value(
        value in alignable_value_strategy(),
        alignment in alignment_strategy(),
    ) {
        let down = align_down(value, alignment);
        let up = align_up(value, alignment);
        prop_assert!(down <= value);
        prop_assert!(value <= up);
        prop_assert!(up - down == 0 || up - down == alignment);
        prop_assert!(is_aligned(down, alignment));
        prop_assert!(is_aligned(up, alignment));
    }

    /// Property: aligning an already aligned value changes nothing.
    #[test]
    fn prop_align_idempotent(
        value in alignable_value_strategy(),
        alignment in alignment_strategy(),
    ) {
        let down = align_down(value, alignment);
        prop_assert_eq!(align_up(down, alignment), down);
        prop_assert_eq!(align_down(down, alignment), down);
    }

    /// Property: aligning a tagged value gives the tagged result of aligning
    /// its primitive.
    #[test]
    fn prop_align_preserves_tag(value in any::<u32>(), shift in 0_u32..12) {
        let alignment = 1_usize << shift;
        let va = Va::new(value as usize);

        let up: Va = align_up(va, alignment);
        let down: Va = align_down(va, alignment);
        prop_assert_eq!(up.get(), align_up(value as usize, alignment));
        prop_assert_eq!(down.get(), align_down(value as usize, alignment));
    }
}

// ============================================================================
// RANGE PROPERTIES
// ============================================================================

proptest! {
    /// Property: forward exclusive ranges enumerate `from, from + step, ...`
    /// strictly below `to`, matching the standard library's `step_by`.
    #[test]
    fn prop_forward_exclusive_matches_step_by(
        from in 0_u32..200,
        to in 0_u32..200,
        step in 1_u32..17,
    ) {
        let ours: Vec<u32> =
            range_step(from, to, step, Direction::Forward, Boundary::Exclusive).into_iter().collect();
        let expected: Vec<u32> = (from..to).step_by(step as usize).collect();
        prop_assert_eq!(ours, expected);
    }

    /// Property: backward inclusive ranges mirror `(to..=from).rev().step_by`.
    #[test]
    fn prop_backward_inclusive_matches_rev(
        from in -100_i32..100,
        to in -100_i32..100,
        step in 1_i32..9,
    ) {
        let ours: Vec<i32> =
            irange_step(from, to, step, Direction::Backward).into_iter().collect();
        let expected: Vec<i32> = (to..=from).rev().step_by(step as usize).collect();
        prop_assert_eq!(ours, expected);
    }

    /// Property: tagged ranges produce the same positions as their primitive
    /// counterparts, rebuilt in the domain.
    #[test]
    fn prop_tagged_range_matches_primitive(from in 0_usize..64, to in 0_usize..64) {
        let tagged: Vec<Offset> =
            range_step(Offset::new(from), Offset::new(to), 1, Direction::Forward, Boundary::Exclusive)
                .into_iter()
                .collect();
        let raw: Vec<Offset> = (from..to).map(Offset::new).collect();
        prop_assert_eq!(tagged, raw);
    }

    /// Property: a second traversal of the same descriptor starts over.
    #[test]
    fn prop_range_restartable(from in 0_u16..100, to in 0_u16..100, step in 1_u16..7) {
        let descriptor = irange_step(from, to, step, Direction::Forward);
        let first: Vec<u16> = descriptor.iter().collect();
        let second: Vec<u16> = descriptor.iter().collect();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// NORMALIZATION PROPERTIES
// ============================================================================

proptest! {
    /// Property: the same bit pattern normalizes identically from every
    /// address-like representation.
    #[test]
    fn prop_normalize_agrees(bits in any::<usize>()) {
        let from_usize = normalize(bits);
        prop_assert_eq!(from_usize, bits);
        prop_assert_eq!(normalize(bits as isize), bits);
        prop_assert_eq!(normalize(Va::new(bits)), bits);
        prop_assert_eq!(normalize(core::ptr::without_provenance::<u8>(bits)), bits);
    }
}
