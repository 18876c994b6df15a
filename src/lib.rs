//! Review-participation statistics for GitHub repositories.
//!
//! Fetches the first page of pull requests (with timelines) per repository,
//! counts how many pull requests opened by others a user reviewed, commented
//! on, or closed, and renders the result as JSON.

pub mod cli;
pub mod github;
pub mod model;
pub mod render;
pub mod repo_processor;
pub mod review;
pub mod util;
