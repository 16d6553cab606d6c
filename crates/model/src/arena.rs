//! Bump arenas backing the two allocation lifetimes of a document.
//!
//! `TransientArena` hands out brush masks that live for one update call.
//! `PointArena` is the append-only home of finalized stroke points.

use bitvec::prelude::{BitSlice, BitVec, Lsb0};

use crate::geometry::V2l;

pub type MaskBits = BitSlice<usize, Lsb0>;

#[derive(Debug, Default)]
pub struct TransientArena {
    bits: BitVec<usize, Lsb0>,
    offset: usize,
}

impl TransientArena {
    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, bit_capacity),
            offset: 0,
        }
    }

    /// Rewinds the arena. Backing storage is kept for the next frame.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Returns a zeroed mask of `len` cells. The borrow ends before the next `reset`.
    pub fn alloc_mask(&mut self, len: usize) -> &mut MaskBits {
        let start = self.offset;
        let end = start + len;
        if end > self.bits.len() {
            self.bits.resize(end, false);
        }
        self.offset = end;
        let mask = &mut self.bits[start..end];
        mask.fill(false);
        mask
    }

    pub fn allocated(&self) -> usize {
        self.offset
    }
}

/// Handle to a run of points inside a `PointArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointSpan {
    start: usize,
    len: usize,
}

impl PointSpan {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Default)]
pub struct PointArena {
    points: Vec<V2l>,
}

impl PointArena {
    pub fn with_capacity(point_capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(point_capacity),
        }
    }

    pub fn push_slice(&mut self, points: &[V2l]) -> PointSpan {
        let start = self.points.len();
        self.points.extend_from_slice(points);
        PointSpan {
            start,
            len: points.len(),
        }
    }

    pub fn get(&self, span: PointSpan) -> Option<&[V2l]> {
        let end = span.start.checked_add(span.len)?;
        self.points.get(span.start..end)
    }

    /// Points held, including ones no stroke references anymore.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Teardown only. Invalidates every span handed out so far.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
