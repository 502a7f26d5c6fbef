//! GeoPrompt Intent - From free text to an executable query
//!
//! This crate turns a user's request into a [`Directive`]: center the map on
//! a place, explain what can be asked, or execute a [`QueryIntent`] built by
//! the reasoning service, the canned query catalog, or a deterministic SQL
//! template.
//!
//! [`QueryIntent`]: geoprompt_core::models::QueryIntent

pub mod catalog;
pub mod patterns;
pub mod prompt;
pub mod recovery;
pub mod resolver;
pub mod sql;

pub use catalog::{describe_catalog, list_canned, match_keyword, CannedQuery};
pub use recovery::RecoveryError;
pub use resolver::{default_intent, Directive, IntentResolver, IntentSource, ResolverSettings};
