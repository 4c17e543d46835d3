use super::board_widget::{board_lines, player_color};
use crate::config::{PlayerNames, UiConfig};
use crate::game::{BoardEngine, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Everything the game screen reads; the view never mutates the engine.
pub struct GameView<'a> {
    pub engine: &'a BoardEngine,
    pub names: &'a PlayerNames,
    pub ui: &'a UiConfig,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub modal: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Scores
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(area);

    render_header(frame, view, chunks[0]);
    render_scores(frame, view, chunks[1]);
    render_board(frame, view, chunks[2]);
    render_message(frame, view.message, chunks[3]);
    render_controls(frame, view.engine.can_undo(), chunks[4]);

    if let Some(text) = view.modal {
        render_modal(frame, text, area);
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let current_player = view.engine.current_player();
    let color = player_color(current_player);

    let status = if view.engine.is_game_over() {
        "Game Over".to_string()
    } else {
        format!(
            "Current Player: {} ({})",
            view.names.name(current_player),
            current_player
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_scores(frame: &mut Frame, view: &GameView, area: Rect) {
    let scores = view.engine.scores();
    let mut spans = Vec::new();

    for (i, player) in [Player::Red, Player::Yellow].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("     "));
        }
        let active = !view.engine.is_game_over() && view.engine.current_player() == player;
        spans.push(Span::raw(if active { "▶ " } else { "  " }));
        spans.push(Span::styled(
            format!("{} ({})", view.names.name(player), player),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {}", scores.get(player))));
    }

    let panel = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));

    frame.render_widget(panel, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let engine = view.engine;

    let preview = if view.ui.drop_preview && !engine.is_game_over() {
        engine
            .lowest_empty_row(view.selected_column)
            .map(|row| (row, engine.current_player()))
    } else {
        None
    };

    let winning = if view.ui.highlight_winning {
        engine.winning_cells()
    } else {
        None
    };
    let winning = winning.as_ref().map(|cells| cells.as_slice()).unwrap_or(&[]);

    let lines = board_lines(engine.board(), view.selected_column, preview, winning);
    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let text = message.unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, can_undo: bool, area: Rect) {
    let undo_style = if can_undo {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line1 = Line::from("←/→: Move  |  1-7: Drop in column  |  Enter: Drop");
    let line2 = Line::from(vec![
        Span::styled("U: Undo", undo_style),
        Span::raw("  |  R: Restart  |  N: New match  |  Q: Quit"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

fn render_modal(frame: &mut Frame, text: &str, area: Rect) {
    let popup = centered_rect(36, 6, area);
    let lines = vec![
        Line::from(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Enter: Play again  |  Esc: Close"),
    ];

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game Over"));

    frame.render_widget(Clear, popup);
    frame.render_widget(modal, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
