use crate::game::{Board, Cell, Player, COLS, ROWS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

/// Build the bordered board with column numbers and a cursor under the
/// selected column.
///
/// `preview` marks the cell a disc would land in; `winning` cells are drawn
/// reversed.
pub fn board_lines(
    board: &Board,
    selected_column: usize,
    preview: Option<(usize, Player)>,
    winning: &[(usize, usize)],
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(ROWS + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(COLS * 3 + 1))));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            row_spans.push(cell_span(
                board.get(row, col),
                (row, col),
                selected_column,
                preview,
                winning,
            ));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(COLS * 3 + 1))));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

fn cell_span(
    cell: Cell,
    (row, col): (usize, usize),
    selected_column: usize,
    preview: Option<(usize, Player)>,
    winning: &[(usize, usize)],
) -> Span<'static> {
    match cell.player() {
        Some(player) => {
            let mut style = Style::default().fg(player_color(player));
            if winning.contains(&(row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Span::styled(" ● ", style)
        }
        None => match preview {
            Some((preview_row, player)) if preview_row == row && col == selected_column => {
                Span::styled(" ○ ", Style::default().fg(player_color(player)))
            }
            _ => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_at<'a>(lines: &'a [Line<'static>], row: usize, col: usize) -> &'a Span<'static> {
        // Two header lines, then "  ║" before the first cell
        &lines[row + 2].spans[col + 1]
    }

    #[test]
    fn test_board_line_count() {
        let lines = board_lines(&Board::new(), 3, None, &[]);
        assert_eq!(lines.len(), ROWS + 4);
    }

    #[test]
    fn test_preview_only_in_selected_empty_cell() {
        let mut board = Board::new();
        board.drop_piece(2, Cell::Red).unwrap();
        let lines = board_lines(&board, 2, Some((4, Player::Yellow)), &[]);

        let preview = cell_at(&lines, 4, 2);
        assert_eq!(preview.content, " ○ ");
        assert_eq!(preview.style.fg, Some(Color::Yellow));
        // Same row, other columns stay empty
        assert_eq!(cell_at(&lines, 4, 3).content, " . ");
        assert_eq!(cell_at(&lines, 5, 2).content, " ● ");
    }

    #[test]
    fn test_winning_cells_highlighted() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        board.drop_piece(4, Cell::Red).unwrap();
        let winning = [(5, 0), (5, 1), (5, 2), (5, 3)];
        let lines = board_lines(&board, 0, None, &winning);

        for col in 0..4 {
            assert!(cell_at(&lines, 5, col)
                .style
                .add_modifier
                .contains(Modifier::REVERSED));
        }
        assert!(!cell_at(&lines, 5, 4)
            .style
            .add_modifier
            .contains(Modifier::REVERSED));
    }
}
