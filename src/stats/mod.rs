pub mod form;
pub mod h2h;

pub use form::form_from_results;
pub use h2h::{compute_h2h, H2H_MAX_MEETINGS};
