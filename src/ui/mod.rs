use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::config::{CELL_W, COLUMNS, MIN_PANE_WIDTH, PLAY_H, PLAY_W, ROWS};
use crate::game::{Cell, Location, Session};

type Glyph = (char, Option<Color>);

pub fn draw_game(frame: &mut Frame, game: &Session) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH {
        let msg = Paragraph::new(format!("RESIZE PANE (min width: {})", MIN_PANE_WIDTH))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("FALLING BLOCKS"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("FALLING BLOCKS")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    // Play area on the left, sidebar on the right.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min((PLAY_W as u16 + 6).max(30)),
            Constraint::Length(24),
        ])
        .split(cabinet_inner);

    // Center the fixed-size playfield within the left column.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(PLAY_H as u16),
            Constraint::Min(1),
        ])
        .split(cols[0]);
    let h_center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(PLAY_W as u16),
            Constraint::Min(1),
        ])
        .split(v_center[1]);
    let play_rect = h_center[1];

    draw_playfield(frame, game, play_rect);
    draw_sidebar(frame, game, cols[1]);
}

fn draw_playfield(frame: &mut Frame, game: &Session, play_rect: Rect) {
    let mut glyphs: Vec<Vec<Glyph>> = vec![vec![(' ', None); PLAY_W]; PLAY_H];

    // Border: top/ceiling, sides, heavy floor.
    glyphs[0][0] = ('┌', None);
    glyphs[0][PLAY_W - 1] = ('┐', None);
    for x in 1..PLAY_W - 1 {
        glyphs[0][x] = ('─', None);
    }
    for y in 1..PLAY_H - 1 {
        glyphs[y][0] = ('│', None);
        glyphs[y][PLAY_W - 1] = ('│', None);
    }
    glyphs[PLAY_H - 1][0] = ('└', None);
    glyphs[PLAY_H - 1][PLAY_W - 1] = ('┘', None);
    for x in 1..PLAY_W - 1 {
        glyphs[PLAY_H - 1][x] = ('═', None);
    }

    // Plot one board cell as two display characters. Board row 0 is the
    // bottom, so rows flip going to screen coordinates; anything outside
    // the visible board is simply not drawn.
    let plot = |glyphs: &mut Vec<Vec<Glyph>>, location: Location, ch: char, color: Option<Color>| {
        if location.row < 0 || location.column < 0 {
            return;
        }
        let (row, column) = (location.row as usize, location.column as usize);
        if row >= ROWS {
            return;
        }
        let gy = 1 + (ROWS - 1 - row);
        let gx = 1 + column * CELL_W;
        glyphs[gy][gx] = (ch, color);
        glyphs[gy][gx + 1] = (ch, color);
    };

    // Locked cells are identityless blocks.
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            if game.grid().cell(row, column) == Cell::Block {
                plot(
                    &mut glyphs,
                    Location::new(row as i32, column as i32),
                    '█',
                    None,
                );
            }
        }
    }

    // Ghost outline at the drop target, then the piece itself on top.
    let ghost = game.drop_target();
    for location in ghost.grid_locations() {
        plot(&mut glyphs, location, '·', Some(Color::DarkGray));
    }
    let (r, g, b) = game.piece().color();
    let piece_color = Color::Rgb(r, g, b);
    for location in game.piece().grid_locations() {
        plot(&mut glyphs, location, '█', Some(piece_color));
    }

    let lines: Vec<Line> = glyphs
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|(ch, color)| match color {
                        Some(c) => Span::styled(ch.to_string(), Style::default().fg(*c)),
                        None => Span::raw(ch.to_string()),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, play_rect);

    if game.is_over() {
        let overlay_w = (PLAY_W as u16).saturating_sub(4).max(8);
        let overlay_h = 5u16;
        let popup = Rect {
            x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
            y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
            width: overlay_w,
            height: overlay_h,
        };
        let overlay = Paragraph::new("GAME OVER\nPress q")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(overlay, popup);
    }
}

fn draw_sidebar(frame: &mut Frame, game: &Session, area: Rect) {
    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    draw_next_piece(frame, game, stack[0]);
    draw_stats(frame, game, stack[1]);
    draw_controls(frame, stack[2]);
}

fn draw_next_piece(frame: &mut Frame, game: &Session, area: Rect) {
    let block = Block::default().title("NEXT").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (r, g, b) = game.next_piece().color();
    let style = Style::default().fg(Color::Rgb(r, g, b));

    // Piece-local frame, flipped so frame row 0 sits at the bottom.
    let lines: Vec<Line> = game
        .next_piece()
        .frame()
        .iter()
        .rev()
        .map(|cells| {
            Line::from(
                cells
                    .iter()
                    .map(|cell| {
                        if *cell == Cell::Block {
                            Span::styled("██", style)
                        } else {
                            Span::raw("  ")
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let preview = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(preview, inner);
}

fn draw_stats(frame: &mut Frame, game: &Session, area: Rect) {
    let block = Block::default().title("STATS").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = Paragraph::new(vec![
        Line::raw(format!("{:<7} {}", "LEVEL:", game.level())),
        Line::raw(format!("{:<7} {}", "LINES:", game.lines())),
        Line::raw(format!("{:<7} {}", "SCORE:", game.score())),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(stats, inner);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let block = Block::default().title("CONTROLS").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help = Paragraph::new(vec![
        Line::raw("←/a →/d move"),
        Line::raw("↓/s rotate cw"),
        Line::raw("↑/w rotate ccw"),
        Line::raw("space drop"),
        Line::raw("q/esc quit"),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(help, inner);
}
