use crate::game::{Game, GameConfig, MAX_PLAYERS, MIN_PLAYERS};

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    BotDifficulty,
    CallInterval,
    StrictMarking,
    AutoDaub,
}

const MENU_ITEMS: [MenuItem; 5] = [
    MenuItem::Players,
    MenuItem::BotDifficulty,
    MenuItem::CallInterval,
    MenuItem::StrictMarking,
    MenuItem::AutoDaub,
];

const INTERVAL_STEP_MS: u64 = 250;
const MIN_INTERVAL_MS: u64 = 500;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::BotDifficulty => {
                format!("Bot Difficulty: {}", app.cfg_bot_difficulty.label())
            }
            MenuItem::CallInterval => {
                format!("Auto-call Interval (ms): {}", app.cfg_call_interval_ms)
            }
            MenuItem::StrictMarking => {
                format!("Only Called Numbers: {}", on_off(app.cfg_strict_marking))
            }
            MenuItem::AutoDaub => format!("Auto-daub My Card: {}", on_off(app.cfg_auto_daub)),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.next(),
            MenuItem::CallInterval => {
                app.cfg_call_interval_ms =
                    app.cfg_call_interval_ms.saturating_add(INTERVAL_STEP_MS);
            }
            MenuItem::StrictMarking => app.cfg_strict_marking = !app.cfg_strict_marking,
            MenuItem::AutoDaub => app.cfg_auto_daub = !app.cfg_auto_daub,
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > MIN_PLAYERS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::BotDifficulty => app.cfg_bot_difficulty = app.cfg_bot_difficulty.prev(),
            MenuItem::CallInterval => {
                app.cfg_call_interval_ms = app
                    .cfg_call_interval_ms
                    .saturating_sub(INTERVAL_STEP_MS)
                    .max(MIN_INTERVAL_MS);
            }
            MenuItem::StrictMarking => app.cfg_strict_marking = !app.cfg_strict_marking,
            MenuItem::AutoDaub => app.cfg_auto_daub = !app.cfg_auto_daub,
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        match self.scene {
            Scene::Menu => self.scene = Scene::Card,
            _ => self.open_menu(),
        }
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.auto_call = false;
        self.menu_index = 0;
        self.cfg_num_players = self.game.num_players();
        self.cfg_bot_difficulty = self.bot_difficulty;
        self.cfg_call_interval_ms = self.call_interval_ms;
        self.cfg_strict_marking = self.game.config().strict_marking;
        self.cfg_auto_daub = self.auto_daub;
        self.scene = Scene::Menu;
    }

    /// Apply staged settings and deal a new game.
    pub fn apply_menu(&mut self) {
        self.cfg_num_players = self.cfg_num_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.cfg_call_interval_ms = self.cfg_call_interval_ms.max(MIN_INTERVAL_MS);

        self.bot_difficulty = self.cfg_bot_difficulty;
        self.call_interval_ms = self.cfg_call_interval_ms;
        self.auto_daub = self.cfg_auto_daub;
        let config = GameConfig::default()
            .with_players(self.cfg_num_players)
            .with_strict_marking(self.cfg_strict_marking);
        self.game = Game::with_clamped_config(config);
        self.seat_agents();
        self.new_game();
        self.scene = Scene::Card;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Card;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
