use crate::config::AppConfig;
use crate::game::{BoardEngine, MoveRejected, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::game_view::{self, GameView};

/// Terminal front end. Turns key presses into engine commands and renders
/// whatever state the engine reports back.
pub struct App {
    engine: BoardEngine,
    config: AppConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    modal: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            engine: BoardEngine::new(),
            selected_column: config.ui.start_column,
            config,
            should_quit: false,
            message: None,
            modal: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let col = c as usize - '1' as usize;
                if col < COLS {
                    self.selected_column = col;
                    self.drop_piece(col);
                }
            }
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('n') => {
                self.engine.reset_scores();
                self.restart();
                self.message = Some("New match started, scores cleared.".to_string());
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                self.modal = None;
                self.restart();
            }
            KeyCode::Esc | KeyCode::Char('c') => {
                self.modal = None;
                self.message = Some("Press 'r' to play again.".to_string());
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.selected_column = self.config.ui.start_column;
    }

    /// Drop the current player's piece in `col`
    fn drop_piece(&mut self, col: usize) {
        match self.engine.apply_move(col) {
            Ok(result) => {
                if result.is_win {
                    let name = self.config.players.name(result.player);
                    self.modal = Some(format!("{} wins!", name.to_uppercase()));
                } else if result.is_draw {
                    self.modal = Some("It's a draw!".to_string());
                }
            }
            Err(MoveRejected::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(e) => {
                self.message = Some(format!("Cannot drop in column {}: {e}", col + 1));
            }
        }
    }

    fn undo(&mut self) {
        match self.engine.undo() {
            Ok(record) => {
                self.selected_column = record.col;
                self.message = Some(format!(
                    "Took back {}'s move in column {}",
                    self.config.players.name(record.player),
                    record.col + 1
                ));
            }
            Err(e) => {
                self.message = Some(format!("Cannot undo: {e}"));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let view = GameView {
            engine: &self.engine,
            names: &self.config.players,
            ui: &self.config.ui,
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            modal: self.modal.as_deref(),
        };
        game_view::render(frame, &view);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player};
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn press_all(app: &mut App, keys: &str) {
        for c in keys.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_number_keys_drop_into_column() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.engine.board().get(5, 0), Cell::Red);
        assert_eq!(app.selected_column, 0);
        assert_eq!(app.engine.current_player(), Player::Yellow);
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = App::default();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, COLS - 1);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_full_column_reports_message() {
        let mut app = App::default();
        press_all(&mut app, "444444");
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.engine.history_len(), 6);
        assert_eq!(
            app.message.as_deref(),
            Some("Cannot drop in column 4: column is full")
        );
    }

    #[test]
    fn test_win_opens_modal_and_play_again_resets() {
        let mut app = App::default();
        press_all(&mut app, "1212121");
        assert_eq!(app.modal.as_deref(), Some("PLAYER 1 wins!"));
        assert_eq!(app.engine.scores().get(Player::Red), 1);

        // Board keys are ignored while the modal is open
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.engine.history_len(), 7);

        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert!(app.engine.is_history_empty());
        assert_eq!(app.engine.scores().get(Player::Red), 1);
    }

    #[test]
    fn test_closed_modal_rejects_moves() {
        let mut app = App::default();
        press_all(&mut app, "1212121");
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.engine.history_len(), 7);
        assert_eq!(
            app.message.as_deref(),
            Some("Game over! Press 'r' to restart.")
        );
    }

    #[test]
    fn test_undo_key() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.message.as_deref(), Some("Cannot undo: nothing to undo"));

        press_all(&mut app, "56");
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.engine.history_len(), 1);
        assert_eq!(app.engine.current_player(), Player::Yellow);
        assert_eq!(app.selected_column, 5);
    }

    #[test]
    fn test_new_match_clears_scores() {
        let mut app = App::default();
        press_all(&mut app, "1212121");
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.engine.scores().get(Player::Red), 0);
        assert!(app.engine.is_history_empty());
        assert_eq!(app.selected_column, 3);
    }

    #[test]
    fn test_quit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_into_test_backend() {
        let mut app = App::default();
        press_all(&mut app, "1212121");

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("PLAYER 1 wins!"));
        assert!(screen.contains("Game Over"));
    }
}
