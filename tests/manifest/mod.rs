//! Manifest assembly and the queries that read it.

pub mod tests_audit;
