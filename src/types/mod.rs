//! Core identifier types shared by the normalizer, the extractor and quick actions.

pub mod ids;

pub use ids::{DeliveryId, IssueNumber, RepoId};
