use normalizer::{NormalizedRepository, OverrideTable};

/// Why a repository is or is not listed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingDecision {
    /// Named in the include list; listed regardless of the other checks.
    Included,
    Listed,
    Empty,
    Fork,
    Excluded,
}

impl ListingDecision {
    pub fn is_listed(self) -> bool {
        matches!(self, Self::Included | Self::Listed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::Listed => "listed",
            Self::Empty => "empty",
            Self::Fork => "fork",
            Self::Excluded => "excluded",
        }
    }
}

pub fn listing_decision(repo: &NormalizedRepository, overrides: &OverrideTable) -> ListingDecision {
    let name = repo.name();
    if overrides.is_included(name) {
        ListingDecision::Included
    } else if repo.raw.size == 0 {
        ListingDecision::Empty
    } else if repo.raw.fork {
        ListingDecision::Fork
    } else if overrides.is_excluded(name) {
        ListingDecision::Excluded
    } else {
        ListingDecision::Listed
    }
}

pub fn is_eligible(repo: &NormalizedRepository, overrides: &OverrideTable) -> bool {
    listing_decision(repo, overrides).is_listed()
}
