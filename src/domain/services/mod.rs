pub mod actions;
mod app_state;
pub mod events;
mod settings_form;
mod transcript;

pub use app_state::*;
pub use settings_form::*;
pub use transcript::*;
