//! icalc-runtime: the graph-rewriting engine at the heart of an optimal
//! lambda-calculus evaluator
//!
//! Everything here operates on a single [`heap::Heap`] — an append-only
//! arena of [`icalc_core::Link`] cells plus typed-size free-lists. There is
//! no garbage collector beyond the rule-local discipline in
//! [`collect`]/[`subst`], no concurrency, and no persistence beyond the
//! plain snapshot in [`image`].
//!
//! # Modules
//!
//! - `heap`: the arena, its allocator, and the `link`/`collect`/`subst`
//!   primitives that keep the VAR/ARG back-edge invariant intact.
//! - `reduce`: weak-head normal form via the local rewrite rules (β,
//!   fan-over-λ, fan-over-fan, fan-over-constructor).
//! - `rules`: the data shape a compiled user-rule table takes, and the
//!   dispatcher that drives `CAL` nodes against it.
//! - `normal`: full normal form with a revisit guard for shared subgraphs.
//! - `image`: the persisted/exchanged heap snapshot.
//! - `error`: the fatal/non-fatal error taxonomy.

pub mod error;
pub mod heap;
pub mod image;
pub mod normal;
pub mod reduce;
pub mod rules;

pub use error::HeapError;
pub use heap::{Heap, Loc};
pub use image::HeapImage;
pub use rules::{Case, CaseCtx, Pattern, RuleTable};

use icalc_core::Link;

/// The one evaluator entry point (spec §6.2): drive `root` to full normal
/// form, mutating `heap` in place, and return the number of rewrites fired.
pub fn normalise(heap: &mut Heap, rules: &RuleTable, root: Loc) -> Result<u64, HeapError> {
    let mut gas = 0u64;
    let mut seen = normal::Seen::with_capacity(heap.watermark() as usize);
    let result = normal::normal_go(heap, rules, root, &mut seen, &mut gas)?;
    heap.link(root, result)?;
    Ok(gas)
}

/// Drive `host` to weak-head normal form without descending into children.
///
/// Exposed alongside [`normalise`] because the reducer is independently
/// useful (e.g. for the `reduce`-on-argument half of rule dispatch, or for
/// tests that check a single rewrite rule in isolation without a full
/// normalisation pass).
pub fn reduce(heap: &mut Heap, rules: &RuleTable, host: Loc) -> Result<(Link, u64), HeapError> {
    let mut gas = 0u64;
    let term = heap.reduce(host, rules, &mut gas)?;
    Ok((term, gas))
}
