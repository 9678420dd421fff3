//! The normaliser: full normal form over a reduced graph, guarded against
//! revisiting shared subgraphs (§4.7).

use bitvec::vec::BitVec;

use icalc_core::{Link, Tag};

use crate::error::HeapError;
use crate::heap::{Heap, Loc};
use crate::rules::RuleTable;

/// A growable revisit guard, indexed by `get_loc(term, 0)` (i.e. a node's
/// own `pos`), per spec §9. Sized to the heap's watermark when a
/// [`crate::normalise`] call begins and grown on demand if reduction
/// allocates past that point mid-traversal — the fixed 16 MB static array
/// of the historical source is replaced with this so no heap-size ceiling
/// has to be guessed up front.
pub struct Seen(BitVec);

impl Seen {
    pub fn with_capacity(cells: usize) -> Seen {
        Seen(BitVec::repeat(false, cells))
    }

    pub fn get(&self, loc: u64) -> bool {
        self.0.get(loc as usize).map(|b| *b).unwrap_or(false)
    }

    pub fn mark(&mut self, loc: u64) {
        let idx = loc as usize;
        if idx >= self.0.len() {
            self.0.resize(idx + 1, false);
        }
        self.0.set(idx, true);
    }
}

/// Bring `host` to full normal form: reduce to weak-head normal form, then
/// recurse into the children the resulting tag actually has, writing each
/// normalised child back into its own cell.
///
/// A node whose `pos` is already marked `seen` is returned as-is without
/// re-reducing or re-descending — this is what bounds work when the same
/// duplicator output (or any other shared node) is reachable through more
/// than one parent.
pub fn normal_go(
    heap: &mut Heap,
    rules: &RuleTable,
    host: Loc,
    seen: &mut Seen,
    gas: &mut u64,
) -> Result<Link, HeapError> {
    let pre = heap.at(host)?;
    if seen.get(pre.field(0)) {
        return Ok(pre);
    }

    let term = heap.reduce(host, rules, gas)?;
    seen.mark(term.field(0));

    match term.tag()? {
        Tag::Lam => {
            let child = normal_go(heap, rules, term.field(1), seen, gas)?;
            heap.link(term.field(1), child)?;
        }
        Tag::App | Tag::Par => {
            let c0 = normal_go(heap, rules, term.field(0), seen, gas)?;
            heap.link(term.field(0), c0)?;
            let c1 = normal_go(heap, rules, term.field(1), seen, gas)?;
            heap.link(term.field(1), c1)?;
        }
        Tag::Dp0 | Tag::Dp1 => {
            let shared = normal_go(heap, rules, term.field(2), seen, gas)?;
            heap.link(term.field(2), shared)?;
        }
        Tag::Ctr | Tag::Cal => {
            let arity = term.ex1() as u64;
            for i in 0..arity {
                let ci = normal_go(heap, rules, term.field(i), seen, gas)?;
                heap.link(term.field(i), ci)?;
            }
        }
        Tag::Nil | Tag::Var | Tag::Arg => {}
    }

    Ok(term)
}
