pub mod models;
pub mod overrides;
pub mod payloads;
pub mod transform;

pub use models::NormalizedRepository;
pub use overrides::OverrideTable;
pub use payloads::RawRepository;
pub use transform::{normalize_all, normalize_repository, parse_timestamp};
