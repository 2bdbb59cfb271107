//! Terminal UI: the game screen plus the timing that paces drops and bot
//! moves on top of the synchronous session.

mod app;
mod game_view;

pub use app::App;
