pub mod eligibility;
pub mod presenter;
pub mod relative_time;
pub mod scorer;

pub use eligibility::{is_eligible, listing_decision, ListingDecision};
pub use presenter::{grid, rank_order, recency_order, Presentation, OVERVIEW_LIMIT};
pub use relative_time::{pretty_date, relative_time};
pub use scorer::{hotness, score_all, HotnessWeights, RankedRepository};
