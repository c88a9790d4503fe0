//! Witch in the Wardrobe scene: intro walk-up, then peek-a-boo inside.

use super::game_common::{
    create_quest_layout, energy_line, render_info_panel_frame, render_status_bar,
};
use super::sprites;
use super::stage::Stage;
use kosh::core::constants::WARDROBE_X;
use kosh::core::Vec2;
use kosh::effects::EffectSystem;
use kosh::quests::wardrobe::{WardrobePhase, WardrobeQuest};
use kosh::PlayerProfile;
use ratatui::{layout::Rect, style::Color, text::Line, widgets::Paragraph, Frame};

const WARDROBE_Y: f64 = 220.0;

pub fn render_wardrobe_scene(
    frame: &mut Frame,
    area: Rect,
    quest: &WardrobeQuest,
    profile: &PlayerProfile,
    effects: &EffectSystem,
) -> Rect {
    let layout = create_quest_layout(frame, area, " Witch in the Wardrobe ", Color::LightMagenta, 26);

    let mut stage = Stage::new(layout.stage);
    let kosh_color = Color::Rgb(255, 220, 150);
    if quest.phase().is_intro() {
        stage.fill(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0), Color::Rgb(30, 25, 40));
        let wardrobe = Vec2::new(WARDROBE_X, WARDROBE_Y);
        stage.sprite(wardrobe, &sprites::WARDROBE, Color::Rgb(140, 100, 60));
        if quest.door_openness() > 0.0 {
            let gap = quest.door_openness() * 60.0;
            stage.fill(
                Vec2::new(WARDROBE_X - gap / 2.0, WARDROBE_Y - 30.0),
                Vec2::new(gap.max(1.0), 60.0),
                Color::Rgb(10, 5, 15),
            );
        }
        let kosh = if quest.phase() == WardrobePhase::Jump {
            &sprites::KOSH_ZOOM
        } else {
            &sprites::KOSH_IDLE
        };
        stage.sprite(quest.kosh_position(), kosh, kosh_color);
    } else {
        stage.fill(Vec2::new(200.0, 150.0), Vec2::new(500.0, 300.0), Color::Rgb(40, 25, 20));
        stage.text(Vec2::new(450.0, 160.0), "═══════════════", Color::Rgb(120, 80, 50));
        stage.text(Vec2::new(450.0, 280.0), "═══════════════", Color::Rgb(120, 80, 50));
        stage.sprite(quest.kosh_position(), &sprites::KOSH_IDLE, kosh_color);
        if let Some(target) = quest.target() {
            stage.sprite(target, &sprites::RACCOON, Color::Rgb(200, 200, 200));
        }
        if let Some(message) = quest.result_message() {
            stage.text(Vec2::new(400.0, 480.0), message, Color::Yellow);
        }
    }
    stage.particles(effects);
    stage.render(frame, layout.stage);

    let color = if quest.phase() == WardrobePhase::Peeking {
        Color::LightRed
    } else {
        Color::White
    };
    render_status_bar(
        frame,
        layout.status_bar,
        quest.instructions(),
        color,
        &[("[Click]", "Catch"), ("[Esc]", "Leave")],
    );

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let mut lines = vec![energy_line(profile, 8), Line::from("")];
    if !quest.phase().is_intro() {
        lines.push(Line::from(format!(
            "Round: {}/{}",
            quest.round(),
            quest.max_rounds()
        )));
        lines.push(Line::from(format!(
            "Caught: {}/{}",
            quest.catches(),
            quest.catches_needed()
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    layout.stage
}
