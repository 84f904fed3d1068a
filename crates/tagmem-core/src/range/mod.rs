// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Sentinel-terminated numeric ranges.
//!
//! A [`Range`] walks from a start value towards an end value in a fixed
//! [`Direction`], stepping by a fixed magnitude. Whether the end value itself
//! is produced is decided by the [`Boundary`]. The stop test is evaluated
//! before every yield rather than precomputing a trip count:
//!
//! | Direction | Inclusive stops when | Exclusive stops when |
//! |---|---|---|
//! | Forward | cursor > end | cursor >= end |
//! | Backward | cursor < end | cursor <= end |
//!
//! Ranges work over raw integers and over [`Tagged`] values alike. For tagged
//! values the cursor is the underlying primitive and each yielded item is
//! rebuilt in the same domain:
//!
//! ```
//! use tagmem_core::{Direction, Offset, irange_step, range};
//!
//! let offsets: Vec<Offset> = range(Offset::new(3)).into_iter().collect();
//! assert_eq!(offsets, [Offset::new(0), Offset::new(1), Offset::new(2)]);
//!
//! let countdown: Vec<u8> = irange_step(10, 0, 5, Direction::Backward).into_iter().collect();
//! assert_eq!(countdown, [10, 5, 0]);
//! ```
//!
//! A step that would overflow the primitive ends the traversal.


use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use num_traits::{CheckedAdd, CheckedSub, One, PrimInt, Zero};

use crate::domain::Tagged;

// =============================================================================
// Parameters
// =============================================================================

/// Direction of progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Add the step on each advance.
    Forward,
    /// Subtract the step on each advance.
    Backward,
}

/// Whether the end value is part of the produced sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The end value is produced if the steps land on it.
    Inclusive,
    /// The end value is never produced.
    Exclusive,
}

// =============================================================================
// Steppable
// =============================================================================

/// A value that can be iterated by stepping its primitive representation.
pub trait Steppable: Copy {
    /// The primitive the cursor is stored and stepped in.
    type Repr: PrimInt + fmt::Debug;

    /// Lower into the primitive representation.
    fn into_repr(self) -> Self::Repr;

    /// Rebuild a value from its primitive representation.
    fn from_repr(repr: Self::Repr) -> Self;
}

macro_rules! impl_steppable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Steppable for $ty {
                type Repr = Self;

                #[inline(always)]
                fn into_repr(self) -> Self {
                    self
                }

                #[inline(always)]
                fn from_repr(repr: Self) -> Self {
                    repr
                }
            }
        )*
    };
}

impl_steppable!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

impl<T: PrimInt + fmt::Debug, Tag> Steppable for Tagged<T, Tag> {
    type Repr = T;

    #[inline(always)]
    fn into_repr(self) -> T {
        self.get()
    }

    #[inline(always)]
    fn from_repr(repr: T) -> Self {
        Self::new(repr)
    }
}

/// Reduce a step to its magnitude. Zero is a contract violation.
fn magnitude<R: PrimInt>(step: R) -> R {
    assert!(!step.is_zero(), "range step must be nonzero");
    if step < R::zero() {
        // MIN has no positive counterpart; MAX is the closest magnitude.
        R::zero().checked_sub(&step).unwrap_or_else(R::max_value)
    } else {
        step
    }
}

// =============================================================================
// Range
// =============================================================================

/// An immutable range descriptor.
///
/// Iterating does not consume or modify the descriptor; every call to
/// [`Range::iter`] starts over from the first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T: Steppable> {
    from: T::Repr,
    to: T::Repr,
    step: T::Repr,
    direction: Direction,
    boundary: Boundary,
    marker: PhantomData<fn() -> T>,
}

impl<T: Steppable> Range<T> {
    /// Create a fully specified range.
    ///
    /// `step` is a magnitude: its sign is ignored, the direction alone
    /// decides whether the cursor grows or shrinks.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    #[must_use]
    pub fn new(from: T, to: T, step: T::Repr, direction: Direction, boundary: Boundary) -> Self {
        Self {
            from: from.into_repr(),
            to: to.into_repr(),
            step: magnitude(step),
            direction,
            boundary,
            marker: PhantomData,
        }
    }

    /// Replace the step magnitude.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    #[must_use]
    pub fn with_step(mut self, step: T::Repr) -> Self {
        self.step = magnitude(step);
        self
    }

    /// Replace the direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Replace the boundary mode.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// The first value the range starts from.
    #[must_use]
    pub fn start(&self) -> T {
        T::from_repr(self.from)
    }

    /// The end value the range runs towards.
    #[must_use]
    pub fn end(&self) -> T {
        T::from_repr(self.to)
    }

    /// The step magnitude.
    #[must_use]
    pub const fn step(&self) -> T::Repr {
        self.step
    }

    /// The direction of progression.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The boundary mode.
    #[must_use]
    pub const fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Start a fresh traversal.
    #[must_use]
    pub const fn iter(&self) -> RangeIter<T> {
        RangeIter {
            cursor: Some(self.from),
            end: self.to,
            step: self.step,
            direction: self.direction,
            boundary: self.boundary,
            marker: PhantomData,
        }
    }
}

impl<T: Steppable> IntoIterator for Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Steppable> IntoIterator for &Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// RangeIter
// =============================================================================

/// Cursor over a [`Range`].
#[derive(Debug, Clone)]
pub struct RangeIter<T: Steppable> {
    /// `None` once the traversal ended or a step overflowed.
    cursor: Option<T::Repr>,
    end: T::Repr,
    step: T::Repr,
    direction: Direction,
    boundary: Boundary,
    marker: PhantomData<fn() -> T>,
}

impl<T: Steppable> RangeIter<T> {
    /// The element the next call to `next` would yield, without advancing.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.cursor
            .filter(|&cursor| !self.is_past_end(cursor))
            .map(T::from_repr)
    }

    fn is_past_end(&self, cursor: T::Repr) -> bool {
        match (self.direction, self.boundary) {
            (Direction::Forward, Boundary::Inclusive) => cursor > self.end,
            (Direction::Forward, Boundary::Exclusive) => cursor >= self.end,
            (Direction::Backward, Boundary::Inclusive) => cursor < self.end,
            (Direction::Backward, Boundary::Exclusive) => cursor <= self.end,
        }
    }

    fn advance(&self, cursor: T::Repr) -> Option<T::Repr> {
        match self.direction {
            Direction::Forward => cursor.checked_add(&self.step),
            Direction::Backward => cursor.checked_sub(&self.step),
        }
    }
}

impl<T: Steppable> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let cursor = self.cursor?;
        if self.is_past_end(cursor) {
            self.cursor = None;
            return None;
        }
        self.cursor = self.advance(cursor);
        Some(T::from_repr(cursor))
    }
}

impl<T: Steppable> FusedIterator for RangeIter<T> {}

// =============================================================================
// Constructors
// =============================================================================

/// `0, 1, ..., to - 1`.
#[must_use]
pub fn range<T: Steppable>(to: T) -> Range<T> {
    Range::new(
        T::from_repr(T::Repr::zero()),
        to,
        T::Repr::one(),
        Direction::Forward,
        Boundary::Exclusive,
    )
}

/// From `from` towards `to` (exclusive) in steps of one.
#[must_use]
pub fn range_between<T: Steppable>(from: T, to: T, direction: Direction) -> Range<T> {
    Range::new(from, to, T::Repr::one(), direction, Boundary::Exclusive)
}

/// Fully explicit range.
///
/// # Panics
///
/// Panics if `step` is zero.
#[must_use]
pub fn range_step<T: Steppable>(
    from: T,
    to: T,
    step: T::Repr,
    direction: Direction,
    boundary: Boundary,
) -> Range<T> {
    Range::new(from, to, step, direction, boundary)
}

/// `0, 1, ..., to`.
#[must_use]
pub fn irange<T: Steppable>(to: T) -> Range<T> {
    range(to).with_boundary(Boundary::Inclusive)
}

/// From `from` towards `to` (inclusive) in steps of one.
#[must_use]
pub fn irange_between<T: Steppable>(from: T, to: T, direction: Direction) -> Range<T> {
    Range::new(from, to, T::Repr::one(), direction, Boundary::Inclusive)
}

/// From `from` towards `to` (inclusive) in steps of `step`.
///
/// # Panics
///
/// Panics if `step` is zero.
#[must_use]
pub fn irange_step<T: Steppable>(from: T, to: T, step: T::Repr, direction: Direction) -> Range<T> {
    Range::new(from, to, step, direction, Boundary::Inclusive)
}
