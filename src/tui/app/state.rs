use crate::agents::{AgentKind, AgentTable, BotAgent, BotProfile, Difficulty, HumanAgent, Intent};
use crate::card::{Card, Position, GRID_SIZE};
use crate::game::{Game, GameConfig, GameError, Status};
use std::time::{Duration, Instant};

/// Seat driven by the keyboard. All other seats are bots.
pub const HUMAN_SEAT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Card,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewGame,
    CallNumber,
    ToggleAutoCall,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    MarkCursor,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Core game engine instance
    pub game: Game,
    pub agents: AgentTable,
    // Highlighted cell on the human card
    pub cursor: Position,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_bot_difficulty: Difficulty,
    pub cfg_call_interval_ms: u64,
    pub cfg_strict_marking: bool,
    pub cfg_auto_daub: bool,
    // Applied settings
    pub bot_difficulty: Difficulty,
    pub call_interval_ms: u64,
    pub auto_call: bool,
    pub(crate) auto_daub: bool,
    last_call_at: Option<Instant>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    notice: Option<String>,
    notice_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = GameConfig::default();
        let players = config.players;
        let strict = config.strict_marking;
        let default_interval = 2000;
        let default_difficulty = Difficulty::Medium;
        let mut app = Self {
            scene: Scene::Menu,
            game: Game::with_clamped_config(config),
            agents: AgentTable::for_seats(players),
            cursor: Position::FREE,
            menu_index: 0,
            cfg_num_players: players,
            cfg_bot_difficulty: default_difficulty,
            cfg_call_interval_ms: default_interval,
            cfg_strict_marking: strict,
            cfg_auto_daub: false,
            bot_difficulty: default_difficulty,
            call_interval_ms: default_interval,
            auto_call: false,
            auto_daub: false,
            last_call_at: None,
            help_open: false,
            history_open: false,
            history_offset: 0,
            notice: None,
            notice_at: None,
        };
        app.seat_agents();
        app
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const NOTICE_TTL: Duration = Duration::from_secs(4);
    /// Bot reaction window in milliseconds.
    const BOT_REACTION_MS: (u64, u64) = (300, 1200);

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn auto_daub(&self) -> bool {
        self.auto_daub
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn human_card(&self) -> Option<&Card> {
        self.game.player(HUMAN_SEAT).map(|p| p.card())
    }

    pub fn bot_profile_label(&self, seat: usize) -> Option<&'static str> {
        if !matches!(self.agents.agent_kind(seat), Some(AgentKind::Bot)) {
            return None;
        }
        Some(self.bot_difficulty.label())
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
        self.notice_at = Some(Instant::now());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
        self.notice_at = None;
    }

    /// Rebuild the agent table for the current game: human at seat 0, bots elsewhere.
    pub(crate) fn seat_agents(&mut self) {
        let n = self.game.num_players();
        self.agents = AgentTable::for_seats(n);
        let human = HumanAgent::new().with_auto_daub(self.auto_daub);
        self.agents.set_agent(HUMAN_SEAT, Some(Box::new(human)));
        let (min_delay, max_delay) = Self::BOT_REACTION_MS;
        for seat in 1..n {
            let profile =
                BotProfile::for_difficulty(self.bot_difficulty).with_delay_ms(min_delay, max_delay);
            self.agents.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
        }
    }

    fn playing(&self) -> bool {
        self.scene == Scene::Card && self.game.status() != Status::Finished
    }

    pub fn call_number(&mut self) -> bool {
        if self.scene != Scene::Card {
            return false;
        }
        self.last_call_at = Some(Instant::now());
        match self.game.call_next() {
            Ok(ball) => {
                self.set_notice(format!("Called {ball}"));
                true
            }
            Err(err) => {
                if matches!(err, GameError::Exhausted | GameError::Finished) {
                    self.auto_call = false;
                }
                self.set_notice(capitalize(&err.to_string()));
                false
            }
        }
    }

    pub fn mark_cursor(&mut self) -> bool {
        if self.scene != Scene::Card {
            return false;
        }
        self.agents.receive(HUMAN_SEAT, Intent::Mark(self.cursor))
    }

    fn move_cursor(&mut self, dc: isize, dr: isize) {
        let n = GRID_SIZE as isize;
        let column = (self.cursor.column() as isize + dc).rem_euclid(n) as usize;
        let row = (self.cursor.row() as isize + dr).rem_euclid(n) as usize;
        if let Ok(pos) = Position::try_new(column, row) {
            self.cursor = pos;
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Card {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Card {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Card && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Card && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewGame => {
                if self.scene == Scene::Card {
                    self.new_game();
                }
                false
            }
            InputAction::CallNumber => self.call_number(),
            InputAction::ToggleAutoCall => {
                if self.playing() {
                    self.auto_call = !self.auto_call;
                }
                false
            }
            InputAction::CursorUp => {
                self.move_cursor(0, -1);
                false
            }
            InputAction::CursorDown => {
                self.move_cursor(0, 1);
                false
            }
            InputAction::CursorLeft => {
                self.move_cursor(-1, 0);
                false
            }
            InputAction::CursorRight => {
                self.move_cursor(1, 0);
                false
            }
            InputAction::MarkCursor => self.mark_cursor(),
        }
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
        self.agents.reset();
        self.auto_call = false;
        self.last_call_at = None;
        self.history_offset = 0;
        self.cursor = Position::FREE;
        self.clear_notice();
    }

    /// Drive timers and agents. Called by the controller on every tick and after
    /// any input that queued a mark.
    pub fn on_tick(&mut self) {
        if self.scene != Scene::Card {
            return;
        }
        if let Some(at) = self.notice_at {
            if at.elapsed() >= Self::NOTICE_TTL {
                self.clear_notice();
            }
        }
        if self.auto_call && self.playing() {
            let interval = Duration::from_millis(self.call_interval_ms);
            let due = self.last_call_at.map(|at| at.elapsed() >= interval).unwrap_or(true);
            if due {
                let _ = self.call_number();
            }
        }

        let winners_before = self.game.winners().len();
        let report = self.agents.on_tick(&mut self.game);
        if let Some((_, err)) = report.errors.iter().find(|(seat, _)| *seat == HUMAN_SEAT) {
            self.set_notice(capitalize(&err.to_string()));
        }
        if self.game.winners().len() > winners_before {
            self.auto_call = false;
            let names: Vec<String> = self.game.winners()[winners_before..]
                .iter()
                .filter_map(|&seat| {
                    let p = self.game.player(seat)?;
                    Some(format!("{} ({})", p.name(), p.bingo()?))
                })
                .collect();
            self.set_notice(format!("BINGO! {}", names.join(", ")));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
