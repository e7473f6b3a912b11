//! Persistence layer for the yotei scheduling engine.
//!
//! Owns the relational schema for schedules and their generated
//! occurrences, read access to the externally maintained date dimension,
//! and the collaborator traits the service layer is written against.
//! Two implementations of those traits ship here: a Postgres one built on
//! diesel-async and an in-memory one for tests and embedded use.

pub mod db;
pub mod error;
pub mod model;
pub mod store;
