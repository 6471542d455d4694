//! Source collectors for discovering agent-related work.
//!
//! Each collector follows a consistent pattern:
//!
//! 1. **Querying**: Issue a search request against the external API
//! 2. **Mapping**: Convert raw results into [`Finding`](crate::models::Finding)s
//! 3. **Filtering**: Keep only findings accepted by the relevance predicates
//!
//! Collectors return their findings to the caller instead of appending to
//! shared state, so each one can be exercised in isolation. Requests are
//! issued one at a time; a failure degrades the run rather than aborting it:
//!
//! | Source | Module | Failure scope |
//! |--------|--------|---------------|
//! | GitHub | [`github`] | One topic's results are skipped |
//! | arXiv | [`arxiv`] | The whole arXiv contribution is skipped |

pub mod arxiv;
pub mod github;
