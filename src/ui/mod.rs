//! Terminal UI: the game screen with score panel, drop preview, winning
//! highlight and game-over dialog.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
