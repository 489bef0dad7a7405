//! Glue between the universe, the data sources and the ranking pipeline.

pub(crate) mod ingest;
pub(crate) mod logging;
pub(crate) mod publish;
