//! The fatal/non-fatal error taxonomy (spec §7).
//!
//! Only the allocator running out of address space and a corrupt heap are
//! errors at all. A stuck `Cal` (no rule case matched) and a `seen`-guarded
//! revisit are ordinary control flow, never a [`HeapError`] — they are
//! absorbed locally by [`crate::reduce`]/[`crate::normal`] instead of
//! propagated.

/// Fatal conditions that halt [`crate::normalise`] immediately, leaving the
/// heap in its last-written, unfinished state.
#[derive(Debug, thiserror::Error)]
pub enum HeapError {
    /// The allocator could not extend the heap to satisfy a block request.
    #[error("heap exhausted: could not allocate a block of {requested} cells")]
    OutOfMemory { requested: usize },

    /// A tag, arity, or back-edge did not match what the invariants in the
    /// data model require.
    #[error("corrupt heap at location {loc}: {reason}")]
    MalformedLink { loc: u64, reason: String },

    /// A raw 64-bit word decoded to a tag outside the enumerated set.
    #[error(transparent)]
    Link(#[from] icalc_core::LinkError),
}
