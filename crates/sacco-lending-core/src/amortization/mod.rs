pub mod quote;

#[cfg(feature = "schedule")]
pub mod schedule;
