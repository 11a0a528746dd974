use crate::graph::node::ValveId;
use crate::search::scorer;
use crate::state::valve_state::ValveState;
use crate::tui::app::{App, SortMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length((app.engine.best().schedule().len() + 3) as u16),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_schedule_table(app), chunks[2]);
    frame.render_widget(build_valve_table(app), chunks[4]);
    frame.render_widget(build_footer(), chunks[5]);
}

fn state_style(state: &ValveState) -> Style {
    match state {
        ValveState::Open { .. } => Style::default().fg(Color::Green),
        ValveState::Opening { .. } => Style::default().fg(Color::Yellow).bold(),
        ValveState::Closed => Style::default().add_modifier(Modifier::DIM),
    }
}

fn state_label(state: &ValveState) -> String {
    match state {
        ValveState::Open { since } => format!("open since {}", since),
        ValveState::Opening { at } => format!("opening at {}", at),
        ValveState::Closed => "closed".to_string(),
    }
}

fn build_header(app: &'_ App) -> Block<'_> {
    let snapshot = app.engine.current_snapshot();
    let dim = Style::default().add_modifier(Modifier::DIM);
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Valvegraph ").style(Style::default().bold().cyan()),
            Span::raw("|").style(dim),
            Span::raw(" Minute: ").style(dim),
            Span::raw(format!("{}/{}", snapshot.minute(), app.engine.budget()))
                .style(Style::default().bold()),
            Span::raw("  Released: ").style(dim),
            Span::raw(format!("{}", snapshot.released())).style(Style::default().bold()),
            Span::raw(format!(" (+{})", app.engine.released_last_step()))
                .style(Style::default().fg(Color::Green)),
            Span::raw("  Flow: ").style(dim),
            Span::raw(format!(
                "{}/min ({:.0}%)",
                snapshot.flow(),
                app.engine.flow_utilization() * 100.0
            ))
            .style(Style::default().bold()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_footer() -> Line<'static> {
    Line::from(" space: next minute   e: end   r: rewind   s: sort   q: quit ")
        .style(Style::default().add_modifier(Modifier::DIM))
}

fn build_schedule_table(app: &'_ App) -> Table<'_> {
    let graph = app.engine.graph();
    let budget = app.engine.budget();
    let minute = app.engine.current_snapshot().minute();

    Table::new(
        app.engine
            .best()
            .schedule()
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let rate = graph.rate(a.valve);
                let style = if a.minute <= minute {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                Row::new(vec![
                    Cell::from(format!("{:>2}", i + 1)),
                    Cell::from(graph.name(a.valve).to_owned()),
                    Cell::from(format!("{:>6}", a.minute)),
                    Cell::from(format!("{:>5}", rate)),
                    Cell::from(format!("{:>7}", scorer::gain(rate, a.minute, budget))),
                ])
                .style(style)
            }),
        [
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new([
            Cell::from("#"),
            Cell::from("Valve"),
            Cell::from("Minute"),
            Cell::from(" Rate"),
            Cell::from("  Yield"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Schedule ").style(Style::default().bold()),
                Span::from(format!("total {} ", app.engine.best().total())),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_valve_table(app: &'_ App) -> Table<'_> {
    let snapshot = app.engine.current_snapshot();
    let states = snapshot.valve_states();
    let graph = app.engine.graph();
    let position = snapshot.position();

    let mut rows = graph.flowing();
    match app.sort_mode {
        SortMode::Rate => rows.sort_by_key(|id| std::cmp::Reverse(graph.rate(*id))),
        SortMode::Schedule => {
            let schedule = app.engine.best().schedule();
            rows.sort_by_key(|id| {
                schedule
                    .iter()
                    .find(|a| a.valve == *id)
                    .map_or(u32::MAX, |a| a.minute)
            })
        }
    }

    Table::new(
        rows.iter().map(|id: &ValveId| {
            let valve = graph.valve_by_id(*id);
            let state = &states[id.index()];
            let marker = if *id == position { ">" } else { " " };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(valve.name().to_owned()),
                Cell::from(format!("{:>5}", valve.rate())),
                Cell::from(state_label(state)).style(state_style(state)),
                Cell::from(format!("{:>5}", valve.tunnels().len())),
            ])
        }),
        [
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(16),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new([
            Cell::from(""),
            Cell::from("Valve"),
            Cell::from(" Rate"),
            Cell::from("State"),
            Cell::from("Tunnels"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Valves ").style(Style::default().bold()),
                Span::from(format!(
                    "{}/{} open ",
                    snapshot.open_count(),
                    graph.flowing().len()
                )),
            ]))
            .padding(Padding::horizontal(1)),
    )
}
