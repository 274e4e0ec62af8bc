//! "Related items" recommendations for a focal record.
//!
//! Candidates are drawn from an ordered chain of tiers sharing one
//! accumulator. A tier is only consulted while the accumulator is short of the
//! limit, and a record is admitted at most once:
//!
//! 1. same category
//! 2. same district, different category
//! 3. at least one tag in common (case-insensitive)
//! 4. random fill from whatever is left
//!
//! Tiers 1-3 walk the catalog in order and are deterministic. Tier 4 goes
//! through a [`Shuffle`], which is the only source of non-determinism; its
//! picks are an unordered fill, not a ranking.

mod shuffle;

pub use shuffle::{KeepOrder, RandomShuffle, Shuffle};

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::record::Record;

pub const DEFAULT_LIMIT: usize = 3;

#[derive(Debug)]
enum Tier {
    SameCategory,
    SameDistrict,
    SharedTags(HashSet<String>),
}

impl Tier {
    fn chain(focal: &Record) -> [Tier; 3] {
        let tags = focal.tags.iter().map(|t| t.to_lowercase()).collect();
        [Tier::SameCategory, Tier::SameDistrict, Tier::SharedTags(tags)]
    }

    fn admits(&self, focal: &Record, candidate: &Record) -> bool {
        match self {
            Tier::SameCategory => candidate.category == focal.category,
            Tier::SameDistrict => {
                candidate.district == focal.district && candidate.category != focal.category
            }
            Tier::SharedTags(tags) => candidate
                .tags
                .iter()
                .any(|t| tags.contains(&t.to_lowercase())),
        }
    }
}

struct Accumulator<'a> {
    limit: usize,
    picked: Vec<&'a Record>,
    ids: HashSet<u64>,
}

impl<'a> Accumulator<'a> {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            picked: Vec::with_capacity(limit),
            ids: HashSet::with_capacity(limit),
        }
    }

    fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.picked.len())
    }

    fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    fn extend(&mut self, candidates: impl IntoIterator<Item = &'a Record>) {
        for candidate in candidates {
            if self.remaining() == 0 {
                break;
            }
            if self.ids.insert(candidate.id) {
                self.picked.push(candidate);
            }
        }
    }
}

/// Up to `limit` records related to `focal`, drawn from `catalog`.
///
/// Fewer than `limit` records come back only when the catalog holds fewer than
/// `limit` records besides the focal one.
pub fn related_items<'a>(
    catalog: &'a Catalog,
    focal: &Record,
    limit: usize,
    shuffle: &mut impl Shuffle,
) -> Vec<&'a Record> {
    let mut acc = Accumulator::new(limit);

    for tier in Tier::chain(focal) {
        if acc.remaining() == 0 {
            break;
        }
        let before = acc.picked.len();
        acc.extend(others(catalog, focal.id).filter(|r| tier.admits(focal, r)));
        debug!(?tier, added = acc.picked.len() - before, "related tier applied");
    }

    if acc.remaining() > 0 {
        let mut rest: Vec<_> = others(catalog, focal.id)
            .filter(|r| !acc.contains(r.id))
            .collect();
        shuffle.shuffle(&mut rest);
        debug!(candidates = rest.len(), needed = acc.remaining(), "random fill");
        acc.extend(rest);
    }

    acc.picked
}

fn others(catalog: &Catalog, focal_id: u64) -> impl Iterator<Item = &Record> {
    catalog.all().iter().filter(move |r| r.id != focal_id)
}
