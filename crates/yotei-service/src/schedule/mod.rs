pub mod recurrence;
pub mod service;
