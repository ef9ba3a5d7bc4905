use bingo_rs::card::Position;
use bingo_rs::game::Status;
use bingo_rs::tui::app::{AppState, InputAction, Scene, HUMAN_SEAT};
use bingo_rs::tui::controller::handle_key;
use crossterm::event::KeyCode;

fn setup_card_app() -> AppState {
    let mut app = AppState::default();
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Card));
}

#[test]
fn menu_changes_player_count() {
    let mut app = AppState::default();
    let before = app.cfg_num_players;
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuApply);
    assert_eq!(app.game.num_players(), before - 1);
    assert!(app.bot_profile_label(HUMAN_SEAT).is_none());
    assert!(app.bot_profile_label(1).is_some());
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_card_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn call_then_mark_under_cursor() {
    let mut app = setup_card_app();
    assert!(app.handle_input(InputAction::CallNumber));
    assert_eq!(app.game.status(), Status::Playing);

    // Keep calling until a number on the human card comes up, then mark it.
    let card_pos = loop {
        let ball = app.game.caller().last_called().unwrap();
        if let Some(pos) = app.human_card().unwrap().position_of(ball) {
            break pos;
        }
        assert!(app.handle_input(InputAction::CallNumber));
    };
    if app.game.status() == Status::Finished {
        return;
    }
    app.cursor = card_pos;
    assert!(app.handle_input(InputAction::MarkCursor));
    app.on_tick();
    assert!(app.human_card().unwrap().is_marked(card_pos));
}

#[test]
fn new_game_resets_the_board() {
    let mut app = setup_card_app();
    let _ = app.handle_input(InputAction::CallNumber);
    app.cursor = Position::try_new(0, 0).unwrap();
    let _ = app.handle_input(InputAction::NewGame);
    assert!(app.game.caller().called().is_empty());
    assert_eq!(app.cursor, Position::FREE);
    assert!(!app.auto_call);
}

#[test]
fn auto_call_only_toggles_on_the_card_scene() {
    let mut app = AppState::default();
    let _ = app.handle_input(InputAction::ToggleAutoCall);
    assert!(!app.auto_call);
    let _ = app.handle_input(InputAction::MenuApply);
    let _ = app.handle_input(InputAction::ToggleAutoCall);
    assert!(app.auto_call);
    app.on_tick();
    assert_eq!(app.game.caller().called().len(), 1);
}

#[test]
fn menu_toggle_round_trip_keeps_the_game() {
    let mut app = setup_card_app();
    let _ = app.handle_input(InputAction::CallNumber);
    let _ = app.handle_input(InputAction::ToggleMenu);
    assert!(matches!(app.scene, Scene::Menu));
    let _ = app.handle_input(InputAction::MenuCancel);
    assert!(matches!(app.scene, Scene::Card));
    assert_eq!(app.game.caller().called().len(), 1);
}

#[test]
fn q_quits_from_both_scenes() {
    let mut app = AppState::default();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
    let mut app = setup_card_app();
    assert!(!handle_key(&mut app, KeyCode::Char('c')));
    assert!(handle_key(&mut app, KeyCode::Char('Q')));
}

#[test]
fn q_is_ignored_while_an_overlay_is_open() {
    let mut app = setup_card_app();
    assert!(!handle_key(&mut app, KeyCode::Char('?')));
    assert!(app.help_open());
    assert!(!handle_key(&mut app, KeyCode::Char('q')));
    assert!(!handle_key(&mut app, KeyCode::Esc));
    assert!(!app.help_open());
}
