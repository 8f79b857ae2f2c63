//! GitHub profiles: the record, its activity aggregate, and the service
//! that creates, reads, merges and deletes them.

mod community_stats;
mod model;
mod service;
mod supplied;

pub use community_stats::{map_community_state, CommunityStats};
pub use model::{ActivityEvent, GithubProfile, ProfileInput};
pub use service::ProfileService;
