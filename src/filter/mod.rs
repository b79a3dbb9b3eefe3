mod eligibility;
mod search;

pub use eligibility::{collect_candidates, file_extension, file_stem, is_eligible};
pub use search::matches_search;
