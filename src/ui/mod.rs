pub mod da_wire_scene;
pub mod game_common;
pub mod in_and_out_scene;
pub mod menu_scene;
mod sprites;
pub mod stage;
pub mod wardrobe_scene;
pub mod window_witch_scene;

use crate::Screen;
use game_common::render_too_small;
use kosh::core::{GameRng, QuestHost};
use kosh::ActiveQuest;
use ratatui::{layout::Rect, Frame};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

/// Draw the current screen. Returns the stage area while a quest is shown,
/// so mouse clicks can be mapped back to logical coordinates.
pub fn draw(
    frame: &mut Frame,
    screen: &Screen,
    host: &QuestHost<GameRng>,
    has_save: bool,
) -> Option<Rect> {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return None;
    }

    match screen {
        Screen::MainMenu { selected } => {
            let items = menu_scene::main_menu_items(has_save);
            menu_scene::render_main_menu(frame, area, &items, *selected);
            None
        }
        Screen::Overworld { selected, notice } => {
            let profile = host.profile();
            let items = menu_scene::overworld_items(profile);
            menu_scene::render_overworld(
                frame,
                area,
                profile,
                &items,
                *selected,
                notice.as_deref(),
            );
            None
        }
        Screen::Quest => draw_quest(frame, area, host),
        Screen::Outcome(outcome) => {
            menu_scene::render_outcome(frame, area, outcome);
            None
        }
    }
}

fn draw_quest(frame: &mut Frame, area: Rect, host: &QuestHost<GameRng>) -> Option<Rect> {
    let profile = host.profile();
    let effects = host.effects();
    let stage = match host.active()? {
        ActiveQuest::WindowWitch(quest) => {
            window_witch_scene::render_window_witch_scene(frame, area, quest, profile, effects)
        }
        ActiveQuest::DaWire(quest) => {
            da_wire_scene::render_da_wire_scene(frame, area, quest, profile, effects)
        }
        ActiveQuest::InAndOut(quest) => {
            in_and_out_scene::render_in_and_out_scene(frame, area, quest, profile, effects)
        }
        ActiveQuest::Wardrobe(quest) => {
            wardrobe_scene::render_wardrobe_scene(frame, area, quest, profile, effects)
        }
    };
    Some(stage)
}
