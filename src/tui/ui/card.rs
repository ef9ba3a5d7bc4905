use crate::card::{Ball, Column, Position, GRID_SIZE};
use crate::evaluator::cells_to_win;
use crate::game::{Game, HistoryEvent, Status};
use crate::tui::app::{AppState, HUMAN_SEAT};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered_rect, inner};

const CELL_WIDTH: usize = 6;

pub(super) fn draw_card(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(9),    // card + board
            Constraint::Length(4), // status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((CELL_WIDTH * GRID_SIZE + 4) as u16),
            Constraint::Min(20),
        ])
        .split(chunks[1]);
    draw_grid(f, body[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(body[1]);
    draw_called_board(f, right[0], &app.game);
    draw_players(f, right[1], app);

    draw_status(f, chunks[2], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Waiting => "Waiting for first call",
        Status::Playing => "Playing",
        Status::Finished => "Finished",
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let caller = app.game.caller();
    let last = caller.last_called().map(|b| b.to_string()).unwrap_or_else(|| "--".to_string());
    let auto = if app.auto_call {
        format!("on ({} ms)", app.call_interval_ms)
    } else {
        "off".to_string()
    };
    let card_id = app.human_card().map(|c| c.id().to_string()).unwrap_or_default();
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("Calls: {}/75   Last: ", caller.called().len())),
            Span::styled(last, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(format!("   Status: {}", status_label(app.game.status()))),
        ]),
        Line::from(format!(
            "Card: {card_id}   Auto-call: {auto}   Auto-daub: {}",
            if app.auto_daub() { "on" } else { "off" }
        )),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("bingo-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_grid(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(card) = app.human_card() else { return };
    let won = app.game.player(HUMAN_SEAT).and_then(|p| p.bingo());
    let title = match won {
        Some(pattern) => format!("Your card: BINGO ({pattern})"),
        None => format!("Your card: {} to go", cells_to_win(card.marked())),
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if won.is_some() {
        block = block.border_style(Style::default().fg(Color::Green));
    }

    let header_style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = Vec::with_capacity(GRID_SIZE * 2 + 1);
    lines.push(Line::from(
        Column::ALL
            .iter()
            .map(|c| Span::styled(format!("{:^CELL_WIDTH$}", c.letter()), header_style))
            .collect::<Vec<_>>(),
    ));
    for row in 0..GRID_SIZE {
        let mut spans = Vec::with_capacity(GRID_SIZE);
        for column in 0..GRID_SIZE {
            let Ok(pos) = Position::try_new(column, row) else { continue };
            let text = match card.number_at(pos) {
                Some(ball) => format!("{:^CELL_WIDTH$}", ball.number()),
                None => format!("{:^CELL_WIDTH$}", "FREE"),
            };
            spans.push(Span::styled(text, cell_style(app, pos)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner(area));
}

fn cell_style(app: &AppState, pos: Position) -> Style {
    let Some(card) = app.human_card() else { return Style::default() };
    let mut style = if card.is_marked(pos) || pos.is_free() {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else if card.number_at(pos).is_some_and(|b| app.game.caller().is_called(b)) {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    if pos == app.cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn draw_called_board(f: &mut Frame, area: Rect, game: &Game) {
    let caller = game.caller();
    let last = caller.last_called();
    let lines: Vec<Line> = Column::ALL
        .iter()
        .map(|column| {
            let mut spans = vec![Span::styled(
                format!("{} ", column.letter()),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )];
            for n in column.range() {
                let Ok(ball) = Ball::try_new(n) else { continue };
                let style = if last == Some(ball) {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else if caller.is_called(ball) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                spans.push(Span::styled(format!("{n:>2}"), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();
    let block = Block::default().title("Called").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_players(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.game.num_players());
    for (seat, p) in app.game.players().iter().enumerate() {
        let marked = p.card().marked().count_marked();
        let mut text = format!("{:<4} {:>2}/25 marked", p.name(), marked);
        match p.bingo() {
            Some(pattern) => text.push_str(&format!("  BINGO ({pattern})")),
            None => text.push_str(&format!("  {} to go", cells_to_win(p.card().marked()))),
        }
        if let Some(label) = app.bot_profile_label(seat) {
            text.push_str(&format!("  [BOT:{label}]"));
        }
        let style = if p.bingo().is_some() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if seat == HUMAN_SEAT {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    let block = Block::default().title("Players").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner(area));

    let mut left = Vec::with_capacity(2);
    match app.game.status() {
        Status::Waiting => left.push(Line::from("Press C to call the first number.")),
        Status::Playing if app.game.caller().is_exhausted() => {
            left.push(Line::from("All numbers called. Press N for a new game."))
        }
        Status::Playing => left.push(Line::from("Arrows move • Enter/Space mark • C call")),
        Status::Finished => left.push(Line::from("Game over. Press N for a new game.")),
    }
    if let Some(notice) = app.notice() {
        let color = if notice.starts_with("BINGO") { Color::Green } else { Color::Cyan };
        left.push(Line::from(Span::styled(notice.to_string(), Style::default().fg(color))));
    }
    let right = vec![
        Line::from("A auto-call • N new • Q quit"),
        Line::from("? help • H history • M menu"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn seat_name(game: &Game, seat: usize) -> String {
    game.player(seat).map(|p| p.name().to_string()).unwrap_or_else(|| format!("P{}", seat + 1))
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let detail = match entry.event {
                HistoryEvent::NumberCalled(ball) => ball.to_string(),
                HistoryEvent::Marked { seat, ball } => {
                    format!("{} {ball}", seat_name(&app.game, seat))
                }
                HistoryEvent::Bingo { seat, pattern } => {
                    format!("{} {pattern}", seat_name(&app.game, seat))
                }
                HistoryEvent::Exhausted => "no balls left".to_string(),
            };
            lines.push(Line::from(format!(
                "#{:<3} {:<5} {detail}",
                entry.calls,
                entry.event.label()
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Card:", bold)),
        Line::from("- Arrows: move cursor"),
        Line::from("- Enter / Space: mark cell under cursor"),
        Line::from("- C: call next number"),
        Line::from("- A: toggle auto-call"),
        Line::from("- N: new game (fresh cards)"),
        Line::from("- H: history"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Winning lines:", bold)),
        Line::from("- any full row, column, or diagonal"),
        Line::from("- the FREE center counts as marked"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply and deal"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}
