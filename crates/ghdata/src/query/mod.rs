//! SQL text construction.
//!
//! Everything interpolated here comes from `&'static str` identifiers baked
//! into the catalog or from [`Granularity::keyword`]. Caller-supplied values
//! only ever travel as bound `:repoid` / `:userid` parameters.
//!
//! [`Granularity::keyword`]: crate::models::Granularity::keyword

pub mod bucket;
pub mod optional;

pub use bucket::{count_by_bucket_query, count_by_bucket_query_raw, merged_pulls_by_bucket_query};
pub use optional::{
    CONTRIBUTION_SOURCES, ComposedQuery, ContributionSource, FRAGMENT_CLOSE, FRAGMENT_OPEN,
    compose_optional_clauses, contributions_query, contributions_template,
};

pub const REPOID_PARAM: &str = "repoid";
pub const USERID_PARAM: &str = "userid";
