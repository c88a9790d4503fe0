//! In and Out scene: two rooms, a door, and the food bowl.

use super::game_common::{
    create_quest_layout, energy_line, render_info_panel_frame, render_status_bar,
};
use super::sprites;
use super::stage::Stage;
use kosh::core::constants::{FOOD_BOWL_POS, IN_AND_OUT_MAX_TRIPS};
use kosh::core::Vec2;
use kosh::effects::EffectSystem;
use kosh::quests::in_and_out::{InAndOutQuest, KoshSpot};
use kosh::PlayerProfile;
use ratatui::{layout::Rect, style::Color, text::Line, widgets::Paragraph, Frame};

const KOSH_Y: f64 = 350.0;

pub fn render_in_and_out_scene(
    frame: &mut Frame,
    area: Rect,
    quest: &InAndOutQuest,
    profile: &PlayerProfile,
    effects: &EffectSystem,
) -> Rect {
    let layout = create_quest_layout(frame, area, " In and Out ", Color::LightYellow, 26);

    let mut stage = Stage::new(layout.stage);
    stage.fill(Vec2::new(0.0, 0.0), Vec2::new(400.0, 600.0), Color::Rgb(50, 45, 60));
    stage.fill(Vec2::new(400.0, 0.0), Vec2::new(400.0, 600.0), Color::Rgb(70, 60, 50));
    for y in (100..600).step_by(20) {
        stage.put(Vec2::new(400.0, f64::from(y)), '┃', Color::Rgb(100, 80, 60));
    }
    stage.text(Vec2::new(200.0, 120.0), "INSIDE", Color::Gray);
    stage.text(Vec2::new(600.0, 120.0), "KITCHEN", Color::Gray);

    let bowl = Vec2::from(FOOD_BOWL_POS);
    if quest.food_visible() {
        stage.sprite(bowl, &sprites::BOWL_FULL, Color::Rgb(200, 150, 100));
    } else {
        stage.sprite(bowl, &sprites::BOWL_EMPTY, Color::Rgb(150, 150, 170));
    }

    let kosh = match quest.spot() {
        KoshSpot::TravelingOut | KoshSpot::TravelingBack => &sprites::KOSH_ZOOM,
        KoshSpot::Outside if quest.food_appeared() => &sprites::KOSH_MEOW,
        _ => &sprites::KOSH_IDLE,
    };
    stage.sprite(Vec2::new(quest.kosh_x(), KOSH_Y), kosh, Color::Rgb(255, 220, 150));

    stage.particles(effects);
    stage.render(frame, layout.stage);

    let message = quest.message(profile.energy());
    let color = match quest.spot() {
        KoshSpot::Outside if quest.food_appeared() => Color::Green,
        KoshSpot::Outside => Color::Gray,
        _ => Color::Yellow,
    };
    render_status_bar(
        frame,
        layout.status_bar,
        message,
        color,
        &[("[Space]", "Check bowl"), ("[Enter]", "Eat/Back/Give up"), ("[Esc]", "Leave")],
    );

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let lines = vec![
        energy_line(profile, 8),
        Line::from(""),
        Line::from(format!("Trips: {}/{}", quest.trips(), IN_AND_OUT_MAX_TRIPS)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    layout.stage
}
