use std::cmp::Ordering;

use normalizer::OverrideTable;
use tracing::debug;

use crate::eligibility::listing_decision;
use crate::scorer::RankedRepository;

/// Entries in the "recently updated" list.
pub const OVERVIEW_LIMIT: usize = 3;

/// Descending hotness. Repositories with an unparseable timestamp come after
/// every repository with valid times; ties keep input order.
pub fn rank_order(repos: &[RankedRepository]) -> Vec<&RankedRepository> {
    let mut ordered: Vec<&RankedRepository> = repos.iter().collect();
    ordered.sort_by(|a, b| compare_rank(b, a));
    ordered
}

/// Rank order restricted to repositories eligible for the grid.
pub fn grid<'a>(repos: &'a [RankedRepository], overrides: &OverrideTable) -> Vec<&'a RankedRepository> {
    rank_order(repos)
        .into_iter()
        .filter(|ranked| {
            let decision = listing_decision(&ranked.repository, overrides);
            if !decision.is_listed() {
                debug!(repo = %ranked.name(), reason = decision.as_str(), "repository left out of grid");
            }
            decision.is_listed()
        })
        .collect()
}

/// Descending last push, truncated to `limit`. Not filtered by eligibility.
pub fn recency_order(repos: &[RankedRepository], limit: usize) -> Vec<&RankedRepository> {
    let mut ordered: Vec<&RankedRepository> = repos.iter().collect();
    // `None < Some(_)`, so unparseable push times sort last.
    ordered.sort_by(|a, b| b.repository.pushed_at.cmp(&a.repository.pushed_at));
    ordered.truncate(limit);
    ordered
}

fn compare_rank(a: &RankedRepository, b: &RankedRepository) -> Ordering {
    a.repository
        .has_valid_times()
        .cmp(&b.repository.has_valid_times())
        .then_with(|| a.hotness.total_cmp(&b.hotness))
}

/// Both views of one cycle's collection.
#[derive(Debug)]
pub struct Presentation<'a> {
    pub grid: Vec<&'a RankedRepository>,
    pub overview: Vec<&'a RankedRepository>,
    pub total: usize,
}

impl<'a> Presentation<'a> {
    pub fn build(repos: &'a [RankedRepository], overrides: &OverrideTable) -> Self {
        Self {
            grid: grid(repos, overrides),
            overview: recency_order(repos, OVERVIEW_LIMIT),
            total: repos.len(),
        }
    }
}
