//! icalc-core: the tagged `Link` word shared by every part of the icalc runtime
//!
//! A `Link` is the single 64-bit value that occupies every heap cell. This
//! crate only knows how to pack and unpack that word — it has no heap, no
//! allocator, and performs no mutation. Everything that *does* mutate a heap
//! (the linker, collector, reducer, normaliser) lives in `icalc-runtime` and
//! is built on top of the types here.
//!
//! # Modules
//!
//! - `tag`: the `Tag` enumeration occupying bits 0–3 of a `Link`.
//! - `link`: the `Link` newtype and its bit-field accessors.
//! - `error`: the one fallible operation in this crate (decoding an
//!   out-of-range tag).

pub mod error;
pub mod link;
pub mod tag;

pub use error::LinkError;
pub use link::Link;
pub use tag::Tag;

/// Cells per size class the allocator must support (`0..=MAX_ARITY`).
///
/// Mirrors the teacher's practice of naming small allocator/pool limits as
/// top-level constants (`ARENA_RESET_THRESHOLD`, `MAX_POOL_SIZE`) rather than
/// burying them in a config struct nobody needs to construct.
pub const MAX_ARITY: usize = 16;
