use anyhow::Result;

use super::print_envelope;
use crate::models::{QueryEnvelope, envelope_json_schema};

pub fn run() -> Result<()> {
    print_envelope(&QueryEnvelope::ok("schema", envelope_json_schema()))
}
