//! Shared UI pieces for the quest scenes.

use kosh::PlayerProfile;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Areas returned by [`create_quest_layout`].
pub struct QuestLayout {
    /// Where the 800x600 stage is drawn.
    pub stage: Rect,
    /// Two lines: status message and controls.
    pub status_bar: Rect,
    pub info_panel: Rect,
}

/// Bordered quest frame: stage on the left with a status bar under it,
/// info panel on the right.
pub fn create_quest_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> QuestLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(2)])
        .split(columns[0]);

    QuestLayout {
        stage: rows[0],
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Status message on the first line, `[key] action` pairs on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(status_text)
            .style(Style::default().fg(status_color))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < 2 || controls.is_empty() {
        return;
    }
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Info panel border; returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Kosh ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// `Energy: [#####.....] 50/100`
pub fn energy_line(profile: &PlayerProfile, bar_width: usize) -> Line<'static> {
    let filled = (profile.energy() as usize * bar_width)
        .checked_div(profile.max_energy() as usize)
        .unwrap_or(0);
    let color = match profile.energy() {
        e if e >= 50 => Color::Green,
        e if e >= 20 => Color::Yellow,
        _ => Color::Red,
    };
    Line::from(vec![
        Span::raw("Energy "),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(bar_width.saturating_sub(filled)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}/{}", profile.energy(), profile.max_energy())),
    ])
}

/// Result box over the lower part of the stage.
pub fn render_dialog(frame: &mut Frame, stage: Rect, message: &str, footer: &str) {
    let height = 6.min(stage.height);
    let width = stage.width.saturating_sub(4).max(10).min(stage.width);
    let area = Rect {
        x: stage.x + (stage.width - width) / 2,
        y: stage.y + stage.height - height,
        width,
        height,
    };
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(120, 120, 160)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            footer.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from("Terminal too small"),
        Line::from(format!("Need at least {min_width}x{min_height}")),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow)),
        area,
    );
}
