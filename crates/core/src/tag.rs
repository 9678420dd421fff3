//! Node tags occupying bits 0–3 of a `Link`.

use crate::error::LinkError;

/// The kind of node a `Link` points at (or, for `Var`/`Arg`, the kind of
/// back-reference it is).
///
/// Ten variants fit in the 4-bit tag field; the other six 4-bit patterns are
/// not assigned and decode to [`LinkError::InvalidTag`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Empty / erased marker.
    Nil = 0,
    /// Lambda abstraction (size 2: binder slot, body).
    Lam = 1,
    /// Application (size 2: function, argument).
    App = 2,
    /// Superposition / fan node (size 2: lane 0, lane 1).
    Par = 3,
    /// First output of a duplicator (size 3, shares `pos` with `Dp1`).
    Dp0 = 4,
    /// Second output of a duplicator (size 3, shares `pos` with `Dp0`).
    Dp1 = 5,
    /// Use-site reference to a `Lam`/`Dp0`/`Dp1` binder.
    Var = 6,
    /// Back-reference stored in a binder slot, pointing at its user.
    Arg = 7,
    /// Data constructor (size = arity).
    Ctr = 8,
    /// Unreduced user-function call (size = arity).
    Cal = 9,
}

impl Tag {
    /// Decode a raw 4-bit value into a `Tag`.
    pub const fn from_u8(raw: u8) -> Result<Tag, LinkError> {
        match raw {
            0 => Ok(Tag::Nil),
            1 => Ok(Tag::Lam),
            2 => Ok(Tag::App),
            3 => Ok(Tag::Par),
            4 => Ok(Tag::Dp0),
            5 => Ok(Tag::Dp1),
            6 => Ok(Tag::Var),
            7 => Ok(Tag::Arg),
            8 => Ok(Tag::Ctr),
            9 => Ok(Tag::Cal),
            other => Err(LinkError::InvalidTag(other)),
        }
    }

    /// True for tags whose `Link` targets a binder slot that must carry an
    /// `Arg` back-edge once this link is written (invariant 1 in the data
    /// model): `Var`, `Dp0`, `Dp1`.
    pub const fn is_binder_use(self) -> bool {
        matches!(self, Tag::Var | Tag::Dp0 | Tag::Dp1)
    }
}
