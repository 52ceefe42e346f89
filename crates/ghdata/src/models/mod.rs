pub mod granularity;
pub mod ids;
pub mod query_envelope;
pub mod result_table;

pub use granularity::Granularity;
pub use ids::{RepositoryId, UserId};
pub use query_envelope::{
    QUERY_ENVELOPE_SCHEMA_VERSION, QueryEnvelope, QueryEnvelopeCommandFailure, QueryEnvelopeError,
    QueryEnvelopeWarning, envelope_json_schema,
};
pub use result_table::{Cell, ResultTable};
