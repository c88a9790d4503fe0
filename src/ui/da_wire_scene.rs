//! Da Wire scene: the swinging string toy, lick zone and grip bar.

use super::game_common::{
    create_quest_layout, energy_line, render_dialog, render_info_panel_frame, render_status_bar,
};
use super::sprites;
use super::stage::Stage;
use kosh::core::constants::{KOSH_POS, WIRE_LICK_THRESHOLD};
use kosh::core::Vec2;
use kosh::effects::EffectSystem;
use kosh::quests::da_wire::{difficulty_multiplier, DaWireQuest, WirePhase};
use kosh::PlayerProfile;
use ratatui::{layout::Rect, style::Color, text::Line, widgets::Paragraph, Frame};

const ANCHOR: Vec2 = Vec2::new(400.0, 100.0);
const STRING_LENGTH: f64 = 150.0;
const SWING_WIDTH: f64 = 200.0;

pub fn render_da_wire_scene(
    frame: &mut Frame,
    area: Rect,
    quest: &DaWireQuest,
    profile: &PlayerProfile,
    effects: &EffectSystem,
) -> Rect {
    let layout = create_quest_layout(frame, area, " Da Wire ", Color::LightRed, 26);

    let mut stage = Stage::new(layout.stage);
    stage.fill(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0), Color::Rgb(60, 50, 80));

    if quest.phase() == WirePhase::TimingWindow {
        let half = WIRE_LICK_THRESHOLD * SWING_WIDTH;
        stage.fill(
            Vec2::new(ANCHOR.x - half, 240.0),
            Vec2::new(half * 2.0, 40.0),
            Color::Rgb(40, 110, 60),
        );
    }

    let end = Vec2::new(
        ANCHOR.x + quest.wire_position() * SWING_WIDTH,
        ANCHOR.y + STRING_LENGTH,
    );
    for step in 0..=12 {
        let t = f64::from(step) / 12.0;
        let point = Vec2::new(ANCHOR.x + (end.x - ANCHOR.x) * t, ANCHOR.y + (end.y - ANCHOR.y) * t);
        stage.put(point, '│', Color::Gray);
    }
    stage.put(end, sprites::STRING_TOY, Color::Rgb(255, 100, 150));

    let kosh = match quest.phase() {
        WirePhase::TimingWindow if quest.wire_position().abs() < 0.2 => &sprites::KOSH_MEOW,
        WirePhase::Hold => &sprites::KOSH_PAW,
        _ => &sprites::KOSH_IDLE,
    };
    stage.sprite(Vec2::from(KOSH_POS), kosh, Color::Rgb(255, 220, 150));

    if quest.phase() == WirePhase::Hold {
        let filled = ((quest.grip_fraction() * 20.0).round() as usize).min(20);
        let bar = format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled));
        stage.text(Vec2::new(400.0, 450.0), &bar, Color::Green);
        stage.text(Vec2::new(400.0, 420.0), "HOLD!", Color::Yellow);
    }

    stage.particles(effects);
    stage.render(frame, layout.stage);

    if let Some(message) = quest.result_message() {
        render_dialog(frame, layout.stage, message, "Press ENTER to continue");
    }

    let color = match quest.phase() {
        WirePhase::TimingWindow => Color::Yellow,
        WirePhase::Hold => Color::Green,
        _ => Color::White,
    };
    render_status_bar(
        frame,
        layout.status_bar,
        quest.instructions(),
        color,
        &[("[Space]", "Lick/Grip"), ("[Enter]", "Next"), ("[Esc]", "Leave")],
    );

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let lines = vec![
        energy_line(profile, 8),
        Line::from(""),
        Line::from(format!("Round: {}/{}", quest.round(), quest.max_rounds())),
        Line::from(format!("Won: {}", quest.wins())),
        Line::from(format!(
            "Speed: x{:.2}",
            difficulty_multiplier(quest.round())
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    layout.stage
}
