//! Drawing for the navigation bar, landing page and classification form.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use super::{App, BackendStatus, Route};
use crate::domain::{Category, Field};
use crate::form::Phase;
use crate::report::{ProbabilityEntry, ResultView, render};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub(super) fn category_color(category: Category) -> Color {
    match category {
        Category::Confirmed => Color::Green,
        Category::Candidate => Color::Yellow,
        Category::FalsePositive => Color::Red,
        Category::Unknown => Color::Gray,
    }
}

impl App {
    pub(super) fn draw(&self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_nav(frame, chunks[0]);
        match self.route {
            Route::Landing => self.draw_landing(frame, chunks[1]),
            Route::Predict => self.draw_form_page(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_nav(&self, frame: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Route::ALL
            .iter()
            .enumerate()
            .map(|(i, r)| Line::from(format!("F{} {} {}", i + 1, r.title(), r.path())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.route.index())
            .block(Block::default().title("exo").borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_landing(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                "Exoplanet Transit Classifier",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw(
                "A transiting planet dims its star slightly every time it passes in front of it. \
                 The period, length and depth of those dips are enough for a trained model to \
                 tell real planets from look-alikes.",
            ),
            Line::raw(""),
            Line::raw(
                "Open the Classify page, enter the orbital period, transit duration and planetary \
                 radius, and the backend labels the signal as Confirmed, Candidate or False Positive.",
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Backend: ", Style::default().fg(Color::Gray)),
                Span::raw(self.base_url.clone()),
            ]),
            self.backend_line(),
        ];

        if let Some(m) = &self.metrics {
            lines.push(Line::from(Span::styled(
                format!(
                    "Model: accuracy {:.1}% | precision {:.1}% | recall {:.1}% | F1 {:.3}",
                    m.accuracy * 100.0,
                    m.precision * 100.0,
                    m.recall * 100.0,
                    m.f1_score
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn backend_line(&self) -> Line<'static> {
        let (text, color) = match &self.backend {
            BackendStatus::Checking => ("checking...".to_string(), Color::Yellow),
            BackendStatus::Online(h) if h.is_ready() => (format!("{}, model loaded", h.status), Color::Green),
            BackendStatus::Online(h) => (format!("{}, model not loaded", h.status), Color::Yellow),
            BackendStatus::Offline(msg) => (format!("offline ({msg})"), Color::Red),
        };
        Line::from(vec![
            Span::styled("Status:  ", Style::default().fg(Color::Gray)),
            Span::styled(text, Style::default().fg(color)),
        ])
    }

    fn draw_form_page(&self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_outcome(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let input = self.session.input();
        let label_w = Field::ALL
            .iter()
            .map(|f| f.display_name().len() + f.unit().len() + 3)
            .max()
            .unwrap_or(0);

        let mut lines: Vec<Line> = Vec::new();
        for field in Field::ALL {
            let focused = field == self.focus;
            let marker = if focused { "» " } else { "  " };
            let label = format!("{} ({}):", field.display_name(), field.unit());
            let mut value = input.get(field).to_string();
            if focused {
                value.push('▏');
            }
            let value_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{label:<label_w$} "), Style::default().fg(Color::Gray)),
                Span::styled(value, value_style),
            ]));
        }

        lines.push(Line::raw(""));
        let button = if self.session.is_loading() {
            Span::styled("[ Classifying... ]", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                "[ Classify ]",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(vec![Span::raw("  "), button]));

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Transit measurements").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_outcome(&self, frame: &mut Frame<'_>, area: Rect) {
        match self.session.phase() {
            Phase::Idle => {
                let p = Paragraph::new("Fill in all three fields and press Enter.")
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().title("Result").borders(Borders::ALL));
                frame.render_widget(p, area);
            }
            Phase::Loading => {
                let spin = SPINNER[self.tick % SPINNER.len()];
                let p = Paragraph::new(format!("{spin} Classifying..."))
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().title("Result").borders(Borders::ALL));
                frame.render_widget(p, area);
            }
            Phase::Failed(msg) => {
                let p = Paragraph::new(format!("✗ {msg}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(Block::default().title("Error").borders(Borders::ALL));
                frame.render_widget(p, area);
            }
            Phase::Ready(result) => draw_result(frame, area, &render(result)),
        }
    }

    fn draw_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let help = match self.route {
            Route::Landing => "Enter classify  h recheck backend  F1/F2 switch page  q quit",
            Route::Predict => "↑/↓ field  type to edit  Enter classify  Esc back  Ctrl+C quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_result(frame: &mut Frame<'_>, area: Rect, view: &ResultView) {
    let grouped_h = view.grouped.as_ref().map(|g| g.len() as u16 + 2).unwrap_or(0);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(grouped_h), Constraint::Min(0)])
        .split(area);

    let color = category_color(view.category);
    let headline = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} {}", view.category.glyph(), view.prediction),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({})", view.category.display_name()),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().title("Prediction").borders(Borders::ALL));
    frame.render_widget(headline, chunks[0]);

    if let Some(grouped) = &view.grouped {
        draw_bars(frame, chunks[1], grouped);
    }
    if let Some(detailed) = &view.detailed {
        draw_tiles(frame, chunks[2], detailed);
    }
}

/// Horizontal bars, one per entry; fill is `probability` of the bar width.
fn draw_bars(frame: &mut Frame<'_>, area: Rect, entries: &[ProbabilityEntry]) {
    let block = Block::default().title("Confidence").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_w = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
    let bar_w = (inner.width as usize).saturating_sub(label_w + 10);

    let lines: Vec<Line> = entries
        .iter()
        .map(|e| {
            let filled = e.bar_cells(bar_w).min(inner.width as usize);
            let empty = bar_w.saturating_sub(filled);
            let color = category_color(Category::classify(&e.label));
            Line::from(vec![
                Span::raw(format!("{:<label_w$} ", e.label)),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {:>7}", e.percent_label())),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Compact tiles, one per entry, wrapped to the available width.
fn draw_tiles(frame: &mut Frame<'_>, area: Rect, entries: &[ProbabilityEntry]) {
    let mut spans: Vec<Span> = Vec::with_capacity(entries.len() * 2);
    for e in entries {
        let color = category_color(Category::classify(&e.label));
        spans.push(Span::styled(
            format!("[{} {}]", e.label, e.percent_label()),
            Style::default().fg(color),
        ));
        spans.push(Span::raw(" "));
    }
    let p = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!("Detailed breakdown ({} classes)", entries.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(p, area);
}
