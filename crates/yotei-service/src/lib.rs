//! Scheduling services: recurrence expansion, the schedule write
//! pipeline, and calendar view aggregation.
//!
//! Everything here is request-scoped and stateless between calls. The
//! services are written against the collaborator traits of `yotei-db`;
//! Postgres entry points wrapping the generic cores in a transaction are
//! provided alongside.

pub mod calendar;
pub mod error;
pub mod schedule;
