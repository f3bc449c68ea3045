//! Daily football picks: analyse fixtures from league standings, recent form
//! and head-to-head history, then keep the most confident selections.

pub mod config;
pub mod engine;
pub mod feed;
pub mod models;
pub mod settlement;
pub mod slate;
pub mod stats;

#[cfg(test)]
mod test_support;
