//! # Bireli URLs
//!
//! URL routing for the Bireli framework: named route rules with
//! `/blog/{id}/` style patterns, first-match resolution, reverse lookup by
//! route name, and the positional-segment parsing that feeds the dispatch
//! core's direct-route fallback when no named route matched.
//!
//! The router only *matches*; resolving a matched [`Route`] into a concrete
//! controller invocation is the dispatch core's job.

pub mod pattern;
pub mod route;
pub mod router;

pub use pattern::{PathPattern, PatternError};
pub use route::Route;
pub use router::{DefaultRouter, ReverseError, Router, UrlRule};
