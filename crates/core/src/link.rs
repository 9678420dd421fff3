//! The `Link`: a 64-bit tagged pointer, the sole heap cell value.
//!
//! ```text
//! bit:   63                        20 19        12 11         4 3    0
//!        +---------------------------+------------+------------+-----+
//!        |      pos (44 bits)        |  ex1 (8)   |  ex0 (8)   | tag |
//!        +---------------------------+------------+------------+-----+
//! ```
//!
//! `pos` is a base index into the heap; `field(i)` computes the cell holding
//! the node's i-th field. `ex0`/`ex1` hold small auxiliary values: a fan
//! label, a constructor/function id, or an arity, depending on `tag`.

use crate::error::LinkError;
use crate::tag::Tag;

const TAG_BITS: u32 = 4;
const EX0_BITS: u32 = 8;
const EX1_BITS: u32 = 8;
const POS_BITS: u32 = 44;

const TAG_SHIFT: u32 = 0;
const EX0_SHIFT: u32 = TAG_BITS;
const EX1_SHIFT: u32 = EX0_SHIFT + EX0_BITS;
const POS_SHIFT: u32 = EX1_SHIFT + EX1_BITS;

const TAG_MASK: u64 = (1 << TAG_BITS) - 1;
const EX0_MASK: u64 = (1 << EX0_BITS) - 1;
const EX1_MASK: u64 = (1 << EX1_BITS) - 1;
/// Largest address `pos` can hold: 2^44 - 1 (~140 T cells, per spec §6.4).
pub const MAX_POS: u64 = (1 << POS_BITS) - 1;

/// A 64-bit tagged pointer: the value stored in every heap cell.
///
/// `Link` is `Copy` and carries no lifetime — locations are plain indices
/// into a `Heap`, not smart pointers, by design (see DESIGN.md).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link(u64);

impl Link {
    /// Pack a tag, two auxiliary bytes, and a base position into a `Link`.
    ///
    /// `ex0`/`ex1` are truncated to 8 bits and `pos` to 44 bits; callers in
    /// this workspace never exceed those ranges (arity ≤ `MAX_ARITY`, heap
    /// addresses bounded by `MAX_POS`), so truncation is a non-issue rather
    /// than a silently-accepted overflow.
    pub const fn new(tag: Tag, ex0: u8, ex1: u8, pos: u64) -> Link {
        let raw = ((tag as u64) << TAG_SHIFT)
            | ((ex0 as u64) << EX0_SHIFT)
            | ((ex1 as u64) << EX1_SHIFT)
            | ((pos & MAX_POS) << POS_SHIFT);
        Link(raw)
    }

    /// The sentinel `Nil` link (the zero word).
    pub const NIL: Link = Link::new(Tag::Nil, 0, 0, 0);

    /// Reinterpret a raw 64-bit word as a `Link` without validating its tag.
    ///
    /// Used only when reading a word straight out of the heap array, where
    /// `tag()` performs the actual validation on demand.
    pub const fn from_raw(raw: u64) -> Link {
        Link(raw)
    }

    /// The raw 64-bit word, for heap storage or a [`crate::LinkError`]-free
    /// host-native exchange format.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Decode the 4-bit tag field.
    pub const fn tag(self) -> Result<Tag, LinkError> {
        Tag::from_u8(((self.0 >> TAG_SHIFT) & TAG_MASK) as u8)
    }

    /// The raw tag byte, for contexts (like a pattern match guard) that
    /// would rather compare against an already-validated [`Tag`].
    pub const fn tag_raw(self) -> u8 {
        ((self.0 >> TAG_SHIFT) & TAG_MASK) as u8
    }

    /// First auxiliary byte: a fan label (`Par`/`Dp0`/`Dp1`) or a
    /// function/constructor id (`Cal`/`Ctr`).
    pub const fn ex0(self) -> u8 {
        ((self.0 >> EX0_SHIFT) & EX0_MASK) as u8
    }

    /// Second auxiliary byte: arity, for `Ctr`/`Cal`.
    pub const fn ex1(self) -> u8 {
        ((self.0 >> EX1_SHIFT) & EX1_MASK) as u8
    }

    /// Base heap location this link addresses.
    pub const fn pos(self) -> u64 {
        (self.0 >> POS_SHIFT) & MAX_POS
    }

    /// The cell holding this node's i-th field: `pos + i`.
    pub const fn field(self, i: u64) -> u64 {
        self.pos() + i
    }

    /// Same link with a different base position (used when relocating a
    /// link to point at a freshly allocated block of the same shape).
    pub const fn with_pos(self, pos: u64) -> Link {
        Link::new_raw_tag(self.tag_raw(), self.ex0(), self.ex1(), pos)
    }

    const fn new_raw_tag(tag_raw: u8, ex0: u8, ex1: u8, pos: u64) -> Link {
        let raw = ((tag_raw as u64) << TAG_SHIFT)
            | ((ex0 as u64) << EX0_SHIFT)
            | ((ex1 as u64) << EX1_SHIFT)
            | ((pos & MAX_POS) << POS_SHIFT);
        Link(raw)
    }
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag() {
            Ok(tag) => f
                .debug_struct("Link")
                .field("tag", &tag)
                .field("ex0", &self.ex0())
                .field("ex1", &self.ex1())
                .field("pos", &self.pos())
                .finish(),
            Err(_) => write!(f, "Link(invalid tag, raw=0x{:016x})", self.0),
        }
    }
}
