pub mod analyzer;
pub mod goals;
pub mod reasoning;
pub mod selector;

pub use analyzer::{analyse, pick_label};
pub use selector::{
    apply_threshold_cascade, select_top_picks, StandingsByCompetition, DEFAULT_PICK_COUNT,
};
