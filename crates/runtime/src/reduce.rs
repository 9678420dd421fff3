//! The reducer: weak-head normal form via the local rewrite rules (§4.6).
//!
//! `Heap::reduce` loops at a fixed `host`, dereferencing, dispatching on the
//! head, and either looping again (the same host may hold a fresh redex) or
//! returning (the rewrite left non-principal work for the normaliser). It
//! recurses only along principal ports: the function of an `App`, the
//! shared expression of a `Dp0`/`Dp1`.

use icalc_core::{Link, Tag};

use crate::error::HeapError;
use crate::heap::{Heap, Loc};
use crate::rules::RuleTable;

impl Heap {
    /// Drive the cell at `host` to weak-head normal form, counting every
    /// fired rewrite into `gas`.
    pub fn reduce(&mut self, host: Loc, rules: &RuleTable, gas: &mut u64) -> Result<Link, HeapError> {
        loop {
            let term = self.at(host)?;
            match term.tag()? {
                Tag::App => {
                    let func = self.reduce(term.field(0), rules, gas)?;
                    match func.tag()? {
                        Tag::Lam => {
                            *gas += 1;
                            let lam_binder = self.arg(func, 0)?;
                            let arg = self.arg(term, 1)?;
                            self.subst(lam_binder, arg)?;
                            let body = self.arg(func, 1)?;
                            self.link(host, body)?;
                            self.clear(term.field(0), 2);
                            self.clear(func.field(0), 2);
                            continue;
                        }
                        Tag::Par => {
                            *gas += 1;
                            self.app_over_par(host, term, func)?;
                            return self.at(host);
                        }
                        _ => return Ok(term),
                    }
                }
                Tag::Dp0 | Tag::Dp1 => {
                    let expr = self.reduce(term.field(2), rules, gas)?;
                    match expr.tag()? {
                        Tag::Lam => {
                            *gas += 1;
                            self.dup_over_lam(host, term, expr)?;
                            continue;
                        }
                        Tag::Par if expr.ex0() == term.ex0() => {
                            *gas += 1;
                            self.dup_annihilate_par(host, term, expr)?;
                            continue;
                        }
                        Tag::Par => {
                            *gas += 1;
                            self.dup_commute_par(host, term, expr)?;
                            return self.at(host);
                        }
                        Tag::Ctr => {
                            *gas += 1;
                            self.dup_over_ctr(host, term, expr)?;
                            return self.at(host);
                        }
                        _ => return Ok(term),
                    }
                }
                Tag::Cal => match rules.dispatch(self, host, term, gas)? {
                    Some(_) => continue,
                    None => return Ok(term),
                },
                _ => return Ok(term),
            }
        }
    }

    /// APP over a fan: `APP(PAR_L(a, b), x)` distributes across both lanes,
    /// duplicating the single argument `x` with a fresh `L`-labelled pair.
    fn app_over_par(&mut self, host: Loc, term: Link, func: Link) -> Result<(), HeapError> {
        let label = func.ex0();
        let a = self.arg(func, 0)?;
        let b = self.arg(func, 1)?;
        let x = self.arg(term, 1)?;

        let let0 = self.alloc(3)?;
        let app0 = self.alloc(2)?;
        let app1 = self.alloc(2)?;
        let par0 = self.alloc(2)?;

        self.link(let0 + 2, x)?;
        self.link(app0, a)?;
        self.link(app0 + 1, Link::new(Tag::Dp0, label, 0, let0))?;
        self.link(app1, b)?;
        self.link(app1 + 1, Link::new(Tag::Dp1, label, 0, let0))?;
        self.link(par0, Link::new(Tag::App, 0, 0, app0))?;
        self.link(par0 + 1, Link::new(Tag::App, 0, 0, app1))?;
        self.link(host, Link::new(Tag::Par, label, 0, par0))?;

        self.clear(term.field(0), 2);
        self.clear(func.field(0), 2);
        Ok(())
    }

    /// Duplicator over a lambda: produces two fresh lambdas sharing the
    /// original body through a new duplicator pair, and replaces the single
    /// original use of the lambda's own parameter with a fresh fan of the
    /// two new parameters.
    fn dup_over_lam(&mut self, host: Loc, term: Link, expr: Link) -> Result<(), HeapError> {
        let label = term.ex0();
        let term0 = self.arg(term, 0)?;
        let term1 = self.arg(term, 1)?;
        let expr_binder = self.arg(expr, 0)?;
        let body = self.arg(expr, 1)?;

        let lam0 = self.alloc(2)?;
        let lam1 = self.alloc(2)?;
        let par0 = self.alloc(2)?;
        let let0 = self.alloc(3)?;

        self.link(lam0 + 1, Link::new(Tag::Dp0, label, 0, let0))?;
        self.link(lam1 + 1, Link::new(Tag::Dp1, label, 0, let0))?;
        self.link(par0, Link::new(Tag::Var, 0, 0, lam0))?;
        self.link(par0 + 1, Link::new(Tag::Var, 0, 0, lam1))?;
        self.link(let0 + 2, body)?;

        self.subst(term0, Link::new(Tag::Lam, 0, 0, lam0))?;
        self.subst(term1, Link::new(Tag::Lam, 0, 0, lam1))?;
        self.subst(expr_binder, Link::new(Tag::Par, label, 0, par0))?;

        let chosen = if term.tag()? == Tag::Dp0 { lam0 } else { lam1 };
        self.link(host, Link::new(Tag::Lam, 0, 0, chosen))?;

        self.clear(term.field(0), 3);
        self.clear(expr.field(0), 2);
        Ok(())
    }

    /// Fan annihilation: `DP_L(PAR_L(a, b))` projects straight to `a`/`b`
    /// with no new allocation.
    fn dup_annihilate_par(&mut self, host: Loc, term: Link, expr: Link) -> Result<(), HeapError> {
        let term0 = self.arg(term, 0)?;
        let term1 = self.arg(term, 1)?;
        let a = self.arg(expr, 0)?;
        let b = self.arg(expr, 1)?;

        self.subst(term0, a)?;
        self.subst(term1, b)?;
        let result = if term.tag()? == Tag::Dp0 { a } else { b };
        self.link(host, result)?;

        self.clear(term.field(0), 3);
        self.clear(expr.field(0), 2);
        Ok(())
    }

    /// Fan commutation: `DP_L(PAR_M(a, b))` with `L != M` duplicates each
    /// lane under `L` and recombines under `M`.
    fn dup_commute_par(&mut self, host: Loc, term: Link, expr: Link) -> Result<(), HeapError> {
        let dup_label = term.ex0();
        let fan_label = expr.ex0();
        let term0 = self.arg(term, 0)?;
        let term1 = self.arg(term, 1)?;
        let a = self.arg(expr, 0)?;
        let b = self.arg(expr, 1)?;

        let par0 = self.alloc(2)?;
        let par1 = self.alloc(2)?;
        let let0 = self.alloc(3)?;
        let let1 = self.alloc(3)?;

        self.link(par0, Link::new(Tag::Dp0, dup_label, 0, let0))?;
        self.link(par0 + 1, Link::new(Tag::Dp0, dup_label, 0, let1))?;
        self.link(par1, Link::new(Tag::Dp1, dup_label, 0, let0))?;
        self.link(par1 + 1, Link::new(Tag::Dp1, dup_label, 0, let1))?;
        self.link(let0 + 2, a)?;
        self.link(let1 + 2, b)?;

        self.subst(term0, Link::new(Tag::Par, fan_label, 0, par0))?;
        self.subst(term1, Link::new(Tag::Par, fan_label, 0, par1))?;

        let chosen = if term.tag()? == Tag::Dp0 { par0 } else { par1 };
        self.link(host, Link::new(Tag::Par, fan_label, 0, chosen))?;

        self.clear(term.field(0), 3);
        self.clear(expr.field(0), 2);
        Ok(())
    }

    /// Duplicator over a constructor: duplicates every field behind its own
    /// fresh one-cell `let`, preserving the duplicator's own label on each
    /// field's `Dp0`/`Dp1` pair (see DESIGN.md "Open Questions resolved" —
    /// the historical source hardcodes label 0 here, which this
    /// implementation does not follow).
    fn dup_over_ctr(&mut self, host: Loc, term: Link, expr: Link) -> Result<(), HeapError> {
        let label = term.ex0();
        let func = expr.ex0();
        let arity = expr.ex1();
        let term0 = self.arg(term, 0)?;
        let term1 = self.arg(term, 1)?;

        let ctr0 = self.alloc(arity as usize)?;
        let ctr1 = self.alloc(arity as usize)?;
        for i in 0..arity as u64 {
            let leti = self.alloc(3)?;
            self.link(ctr0 + i, Link::new(Tag::Dp0, label, 0, leti))?;
            self.link(ctr1 + i, Link::new(Tag::Dp1, label, 0, leti))?;
            let field = self.arg(expr, i)?;
            self.link(leti + 2, field)?;
        }

        self.subst(term0, Link::new(Tag::Ctr, func, arity, ctr0))?;
        self.subst(term1, Link::new(Tag::Ctr, func, arity, ctr1))?;

        let chosen = if term.tag()? == Tag::Dp0 { ctr0 } else { ctr1 };
        self.link(host, Link::new(Tag::Ctr, func, arity, chosen))?;

        self.clear(term.field(0), 3);
        self.clear(expr.field(0), arity as usize);
        Ok(())
    }
}
