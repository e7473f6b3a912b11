pub mod date_dimension;
pub mod occurrence;
pub mod schedule;
