mod action;
mod backend;
mod banner;
mod chat_turn;
mod citation;
mod config_snapshot;
mod event;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use banner::*;
pub use chat_turn::*;
pub use citation::*;
pub use config_snapshot::*;
pub use event::*;
pub use slash_commands::*;
pub use textarea::*;
