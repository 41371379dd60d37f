//! Unit tests for the scheduling engine.

mod driver_lifecycle;
mod properties;
mod scenarios;
mod summaries;
