//! Title screen, overworld quest list and the quest result screen.

use super::game_common::energy_line;
use kosh::{PlayerProfile, QuestId, QuestOutcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const TITLE_ART: [&str; 4] = [
    " _  __         _     ",
    "| |/ /___  ___| |__  ",
    "| ' </ _ \\(_-<| '_ \\ ",
    "|_|\\_\\___//__/|_| |_|",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    NewGame,
    Continue,
    Quit,
}

impl MainMenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::Continue => "Continue",
            Self::Quit => "Quit",
        }
    }
}

/// Continue is only offered when a save file exists.
pub fn main_menu_items(has_save: bool) -> Vec<MainMenuItem> {
    let mut items = vec![MainMenuItem::NewGame];
    if has_save {
        items.push(MainMenuItem::Continue);
    }
    items.push(MainMenuItem::Quit);
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverworldItem {
    Quest(QuestId),
    Save,
    MainMenu,
}

/// Every quest the profile may start, then Save and Main Menu.
pub fn overworld_items(profile: &PlayerProfile) -> Vec<OverworldItem> {
    profile
        .available_quests()
        .into_iter()
        .map(OverworldItem::Quest)
        .chain([OverworldItem::Save, OverworldItem::MainMenu])
        .collect()
}

fn menu_line(label: String, selected: bool, color: Color) -> ListItem<'static> {
    let prefix = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    ListItem::new(format!("{prefix}{label}")).style(style)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_main_menu(frame: &mut Frame, area: Rect, items: &[MainMenuItem], selected: usize) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" The Adventures of Kosh ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightMagenta));
    let box_area = centered(area, 40, 16);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_ART.len() as u16 + 1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let art: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Rgb(255, 220, 150)))))
        .collect();
    frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), chunks[0]);

    let list: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| menu_line(item.label().to_string(), i == selected, Color::White))
        .collect();
    frame.render_widget(List::new(list), chunks[1]);

    frame.render_widget(
        Paragraph::new("[↑/↓] Navigate  [Enter] Select")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

pub fn render_overworld(
    frame: &mut Frame,
    area: Rect,
    profile: &PlayerProfile,
    items: &[OverworldItem],
    selected: usize,
    notice: Option<&str>,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Kosh's House ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let box_area = centered(area, 50, 18);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let header = vec![
        energy_line(profile, 20),
        Line::from(format!("Completion: {}%", profile.completion_percent())),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let list: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (label, color) = match item {
                OverworldItem::Quest(quest) if profile.is_completed(*quest) => {
                    (format!("{} [DONE]", quest.title()), Color::Green)
                }
                OverworldItem::Quest(quest) if quest.is_secret() => {
                    (quest.title().to_string(), Color::LightMagenta)
                }
                OverworldItem::Quest(quest) => (quest.title().to_string(), Color::White),
                OverworldItem::Save => ("Save Game".to_string(), Color::Gray),
                OverworldItem::MainMenu => ("Main Menu".to_string(), Color::Gray),
            };
            menu_line(label, i == selected, color)
        })
        .collect();
    frame.render_widget(List::new(list), chunks[1]);

    if let Some(notice) = notice {
        frame.render_widget(
            Paragraph::new(notice)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }

    frame.render_widget(
        Paragraph::new("[↑/↓] Navigate  [Enter] Select  [Esc] Main Menu")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

pub fn render_outcome(frame: &mut Frame, area: Rect, outcome: &QuestOutcome) {
    frame.render_widget(Clear, area);
    let (heading, color) = if outcome.is_success() {
        ("Quest complete!", Color::Green)
    } else {
        ("Quest failed", Color::Red)
    };
    let block = Block::default()
        .title(format!(" {} ", outcome.quest.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let box_area = centered(area, 46, 9);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(outcome.detail.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press ENTER",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
