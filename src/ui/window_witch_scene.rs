//! Window Witch scene: bedroom, two sleeping dads, tactic menu.

use super::game_common::{
    create_quest_layout, energy_line, render_dialog, render_info_panel_frame, render_status_bar,
};
use super::sprites;
use super::stage::Stage;
use kosh::core::constants::{KOSH_POS, WINDOW_POS};
use kosh::core::Vec2;
use kosh::effects::EffectSystem;
use kosh::quests::window_witch::{DadTarget, Tactic, WindowWitchQuest, WitchPhase};
use kosh::PlayerProfile;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Returns the stage area so clicks can be mapped back.
pub fn render_window_witch_scene(
    frame: &mut Frame,
    area: Rect,
    quest: &WindowWitchQuest,
    profile: &PlayerProfile,
    effects: &EffectSystem,
) -> Rect {
    let layout = create_quest_layout(frame, area, " Window Witch ", Color::Magenta, 30);

    let mut stage = Stage::new(layout.stage);
    draw_bedroom(&mut stage, quest);
    stage.particles(effects);
    stage.render(frame, layout.stage);

    if let Some(message) = quest.dialog() {
        render_dialog(frame, layout.stage, message, "Press ENTER to continue");
    }

    let (status, color) = match quest.phase() {
        WitchPhase::Resolving { .. } => ("", Color::White),
        WitchPhase::Resolved => ("The window is open!", Color::Green),
        _ => (quest.objective(), Color::Yellow),
    };
    render_status_bar(
        frame,
        layout.status_bar,
        status,
        color,
        &[("[↑↓]", "Tactic"), ("[Enter]", "Confirm"), ("[Click]", "Poke"), ("[Esc]", "Leave")],
    );

    render_info(frame, layout.info_panel, quest, profile);
    layout.stage
}

fn draw_bedroom(stage: &mut Stage, quest: &WindowWitchQuest) {
    stage.fill(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0), Color::Rgb(20, 20, 40));
    stage.fill(Vec2::new(40.0, 220.0), Vec2::new(720.0, 60.0), Color::Rgb(60, 40, 60));

    let window = Vec2::from(WINDOW_POS) + Vec2::new(0.0, -200.0);
    if quest.window_open() {
        stage.sprite(window, &sprites::WINDOW_OPEN, Color::LightCyan);
    } else {
        stage.sprite(window, &sprites::WINDOW_CLOSED, Color::Gray);
    }

    for dad in [DadTarget::One, DadTarget::Two] {
        let art = if quest.is_awake(dad) {
            &sprites::DAD_AWAKE
        } else {
            &sprites::DAD_ASLEEP
        };
        let highlighted = quest.target() == Some(dad);
        let color = if highlighted { Color::Yellow } else { Color::White };
        stage.sprite(dad.head() + Vec2::new(0.0, 40.0), art, color);
        stage.text(dad.head() + Vec2::new(0.0, 100.0), dad.label(), color);
    }

    if let Some(egg) = quest.egg() {
        stage.sprite(egg.position(), &sprites::EGG, Color::Rgb(255, 200, 255));
    }

    let kosh = match quest.kosh_action() {
        Some(Tactic::Meow) => &sprites::KOSH_MEOW,
        Some(Tactic::PawTap) => &sprites::KOSH_PAW,
        Some(Tactic::Zoomies) => &sprites::KOSH_ZOOM,
        None => &sprites::KOSH_IDLE,
    };
    stage.sprite(Vec2::from(KOSH_POS), kosh, Color::Rgb(255, 220, 150));
}

fn render_info(frame: &mut Frame, area: Rect, quest: &WindowWitchQuest, profile: &PlayerProfile) {
    let inner = render_info_panel_frame(frame, area);
    let mut lines = vec![energy_line(profile, 10), Line::from("")];

    let choosing = matches!(quest.phase(), WitchPhase::ChoosingTactic(_));
    for tactic in Tactic::ALL {
        let selected = choosing && quest.selected_tactic() == tactic;
        let affordable = profile.can_afford(tactic.energy_cost());
        let style = match (selected, affordable) {
            (true, _) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", tactic.name()),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "   {:.0}% · {} energy",
                tactic.success_rate() * 100.0,
                tactic.energy_cost()
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("   {}", tactic.description()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    for dad in [DadTarget::One, DadTarget::Two] {
        let state = if quest.is_awake(dad) { "awake" } else { "asleep" };
        lines.push(Line::from(format!("{}: {state}", dad.label())));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
