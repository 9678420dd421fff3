//! The compiled user-rule table (§4.6 CAL rules, §4.8, §6.3).
//!
//! This workspace defines the *shape* a compiled rule table takes and the
//! dispatcher that drives it — not the rule compiler itself, which is an
//! out-of-scope external collaborator (spec §1). A [`RuleTable`] maps a
//! function id to an ordered list of [`Case`]s; each case names which
//! argument position it scrutinizes, the constructor shape it expects
//! there (or "any"), and a `build` function that assembles the
//! right-hand side once the case is chosen.

use icalc_core::{Link, Tag};

use crate::error::HeapError;
use crate::heap::{Heap, Loc};

/// What a [`Case`] expects to find at its scrutinee position once that
/// position has been driven to weak-head normal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Matches anything; the scrutinee is not reduced at all (dispatch
    /// obligation (a) in spec §4.6: an argument is reduced only if some
    /// case actually needs to inspect it).
    Any,
    /// Matches a `Ctr` with the given constructor id and arity.
    Ctr { id: u8, arity: u8 },
}

/// The context a case's `build` function assembles its right-hand side
/// from: the `Cal` node's own location and link, and the (possibly
/// already-reduced) scrutinee.
pub struct CaseCtx {
    pub host: Loc,
    pub term: Link,
    pub scrutinee: Link,
}

/// A case's compiled rewrite transaction: given the matched context,
/// perform whatever further `reduce`s, allocations, `link`/`subst`
/// operations, and `clear`s assemble the right-hand side at `host`.
///
/// Returns `Ok(true)` if it fired (the case's pattern, including any
/// deeper structure it chose to inspect itself, truly matched and the
/// rewrite was applied) or `Ok(false)` if, having looked further, it
/// decided not to fire after all — in which case the dispatcher falls
/// through to the next case, supporting the multi-position/nested
/// patterns spec §6.3 allows beyond this table's single declared
/// scrutinee.
pub type CaseBuilder = fn(&mut Heap, &mut u64, CaseCtx) -> Result<bool, HeapError>;

/// One case of one function's rule set.
pub struct Case {
    pub scrutinee: usize,
    pub pattern: Pattern,
    pub build: CaseBuilder,
}

impl Case {
    pub fn new(scrutinee: usize, pattern: Pattern, build: CaseBuilder) -> Case {
        Case {
            scrutinee,
            pattern,
            build,
        }
    }
}

/// `function_id -> [case]`, tried top-to-bottom (§6.3). Case guards are a
/// compiler obligation to keep disjoint; this table does not itself check
/// for overlap.
pub struct RuleTable {
    functions: Vec<Vec<Case>>,
}

impl RuleTable {
    /// An empty table with `num_functions` function ids, each starting
    /// with no cases (every `Cal` to them is immediately stuck).
    pub fn new(num_functions: usize) -> RuleTable {
        RuleTable {
            functions: (0..num_functions).map(|_| Vec::new()).collect(),
        }
    }

    /// Append a case to `function_id`'s case list.
    pub fn push_case(&mut self, function_id: usize, case: Case) {
        self.functions[function_id].push(case);
    }

    /// Try `term`'s function's cases top-to-bottom against `host`. Returns
    /// the post-rewrite link if a case fired, or `None` if the `Cal` is
    /// stuck (no case matched).
    pub fn dispatch(
        &self,
        heap: &mut Heap,
        host: Loc,
        term: Link,
        gas: &mut u64,
    ) -> Result<Option<Link>, HeapError> {
        let function_id = term.ex0() as usize;
        let cases = self
            .functions
            .get(function_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for case in cases {
            let scrutinee = match case.pattern {
                Pattern::Any => Link::NIL,
                Pattern::Ctr { .. } => {
                    let loc = term.field(case.scrutinee as u64);
                    heap.reduce(loc, self, gas)?
                }
            };
            let matched = match case.pattern {
                Pattern::Any => true,
                Pattern::Ctr { id, arity } => {
                    scrutinee.tag()? == Tag::Ctr && scrutinee.ex0() == id && scrutinee.ex1() == arity
                }
            };
            if matched {
                let ctx = CaseCtx {
                    host,
                    term,
                    scrutinee,
                };
                if (case.build)(heap, gas, ctx)? {
                    return Ok(Some(heap.at(host)?));
                }
            }
        }
        Ok(None)
    }
}
