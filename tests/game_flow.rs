use bingo_rs::card::{Ball, Position};
use bingo_rs::game::{ConfigError, Game, GameConfig, GameError, HistoryEvent, Status};
use bingo_rs::marks::MarkOutcome;

fn mk_game(players: usize, seed: u64) -> Game {
    Game::new(GameConfig::default().with_players(players).with_seed(seed)).unwrap()
}

/// Call and daub for every seat until someone wins.
fn play_out(game: &mut Game) -> Ball {
    loop {
        let ball = game.call_next().expect("someone wins before the pool runs out");
        for seat in 0..game.num_players() {
            game.daub(seat, ball).unwrap();
        }
        if game.status() == Status::Finished {
            return ball;
        }
    }
}

#[test]
fn player_count_is_validated() {
    assert_eq!(
        Game::new(GameConfig::default().with_players(0)).unwrap_err(),
        ConfigError::TooFewPlayers(0)
    );
    assert_eq!(
        Game::new(GameConfig::default().with_players(9)).unwrap_err(),
        ConfigError::TooManyPlayers { max: 8, got: 9 }
    );
    assert_eq!(Game::with_clamped_config(GameConfig::default().with_players(20)).num_players(), 8);
}

#[test]
fn full_game_ends_with_a_winner() {
    let mut game = mk_game(4, 2024);
    assert_eq!(game.status(), Status::Waiting);
    let last = play_out(&mut game);

    assert!(!game.winners().is_empty());
    for &seat in game.winners() {
        let player = game.player(seat).unwrap();
        assert!(player.card().has_won());
        assert!(player.bingo().is_some());
        assert!(player.card().contains(last));
    }
    assert_eq!(game.call_next(), Err(GameError::Finished));
    let bingos = game
        .history_recent(game.history_len())
        .iter()
        .filter(|e| matches!(e.event, HistoryEvent::Bingo { .. }))
        .count();
    assert_eq!(bingos, game.winners().len());
}

#[test]
fn strict_marking_rejects_uncalled_numbers() {
    let mut game = mk_game(1, 8);
    let pos = Position::try_new(0, 0).unwrap();
    let ball = game.player(0).unwrap().card().number_at(pos).unwrap();
    assert_eq!(game.mark(0, pos), Err(GameError::NotCalled(ball)));
    assert!(!game.player(0).unwrap().card().is_marked(pos));
}

#[test]
fn relaxed_marking_accepts_any_cell() {
    let mut game =
        Game::new(GameConfig::default().with_players(1).with_seed(8).with_strict_marking(false))
            .unwrap();
    let pos = Position::try_new(4, 4).unwrap();
    assert_eq!(game.mark(0, pos), Ok(MarkOutcome::Marked));
    assert_eq!(game.mark(0, pos), Ok(MarkOutcome::AlreadyMarked));
    assert_eq!(game.mark(0, Position::FREE), Ok(MarkOutcome::FreeSpace));
}

#[test]
fn unknown_seat_is_an_error() {
    let mut game = mk_game(2, 1);
    assert_eq!(game.mark(5, Position::FREE), Err(GameError::NoSuchSeat(5)));
}

#[test]
fn pool_runs_dry_without_ending_the_game() {
    let mut game = mk_game(2, 3);
    for _ in 0..75 {
        game.call_next().unwrap();
    }
    assert_eq!(game.call_next(), Err(GameError::Exhausted));
    assert_eq!(game.call_next(), Err(GameError::Exhausted));
    assert_eq!(game.status(), Status::Playing);
    let exhausted = game
        .history_recent(game.history_len())
        .iter()
        .filter(|e| e.event == HistoryEvent::Exhausted)
        .count();
    assert_eq!(exhausted, 1);
    // Marking still works after the last ball.
    let any = game.caller().called()[10];
    assert!(game.daub(0, any).is_ok());
}

#[test]
fn new_game_deals_fresh_cards() {
    let mut game = mk_game(3, 77);
    let before = game.player(0).unwrap().card().id().clone();
    play_out(&mut game);
    game.new_game();
    assert_eq!(game.status(), Status::Waiting);
    assert!(game.winners().is_empty());
    assert!(game.caller().called().is_empty());
    assert_eq!(game.history_len(), 0);
    assert_ne!(game.player(0).unwrap().card().id(), &before);
    assert_eq!(game.player(0).unwrap().card().marked().count_marked(), 0);
}

#[test]
fn same_seed_same_game() {
    let mut a = mk_game(2, 9);
    let mut b = mk_game(2, 9);
    assert_eq!(a.player(1).unwrap().card(), b.player(1).unwrap().card());
    for _ in 0..10 {
        assert_eq!(a.call_next(), b.call_next());
    }
}
