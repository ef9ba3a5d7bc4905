use bingo_rs::card::{Ball, Card, CardId, CardError, Column, Position};
use bingo_rs::generator::generate_seeded;
use bingo_rs::marks::{GridError, MarkError, MarkGrid, MarkOutcome};

fn fixture() -> Card {
    Card::from_columns(
        CardId::new("fixture"),
        [
            [Some(1), Some(2), Some(3), Some(4), Some(5)],
            [Some(16), Some(17), Some(18), Some(19), Some(20)],
            [Some(31), Some(32), None, Some(34), Some(35)],
            [Some(46), Some(47), Some(48), Some(49), Some(50)],
            [Some(61), Some(62), Some(63), Some(64), Some(65)],
        ],
    )
    .unwrap()
}

fn ball(n: u8) -> Ball {
    Ball::try_new(n).unwrap()
}

#[test]
fn marking_twice_is_a_noop() {
    let mut card = fixture();
    let pos = Position::try_new(3, 1).unwrap();
    assert_eq!(card.mark(pos), MarkOutcome::Marked);
    let snapshot = *card.marked();
    assert_eq!(card.mark(pos), MarkOutcome::AlreadyMarked);
    assert_eq!(*card.marked(), snapshot);
}

#[test]
fn free_space_mark_changes_nothing() {
    let mut card = fixture();
    assert_eq!(card.mark(Position::FREE), MarkOutcome::FreeSpace);
    assert_eq!(card.marked().count_marked(), 0);
    assert!(card.derived_marked_values().is_empty());
}

#[test]
fn out_of_bounds_coordinates_are_rejected() {
    let mut card = fixture();
    assert!(matches!(card.mark_at(5, 0), Err(MarkError::Position(_))));
    assert!(matches!(card.mark_at(0, 7), Err(MarkError::Position(_))));
    assert_eq!(card.marked().count_marked(), 0);
}

#[test]
fn marked_values_follow_the_grid() {
    let mut card = fixture();
    card.daub(ball(17));
    card.daub(ball(63));
    card.daub(ball(17));
    let values: Vec<u8> = card.derived_marked_values().iter().map(|b| b.number()).collect();
    assert_eq!(values, vec![17, 63]);
}

#[test]
fn daub_ignores_numbers_off_the_card() {
    let mut card = fixture();
    assert_eq!(card.daub(ball(75)), None);
    assert_eq!(card.marked().count_marked(), 0);
}

#[test]
fn daubing_a_column_wins() {
    let mut card = generate_seeded(11);
    let balls: Vec<Ball> = card.column_values(Column::G).collect();
    for b in &balls[..4] {
        card.daub(*b);
        assert!(!card.has_won());
    }
    card.daub(balls[4]);
    assert!(card.has_won());
}

#[test]
fn grid_shape_is_checked() {
    assert_eq!(MarkGrid::try_from(vec![vec![false; 5]; 4]), Err(GridError::Columns(4)));
    let mut rows = vec![vec![false; 5]; 5];
    rows[3] = vec![true; 6];
    assert_eq!(MarkGrid::try_from(rows), Err(GridError::Rows { column: 3, len: 6 }));
    assert!(MarkGrid::try_from(vec![vec![true; 5]; 5]).is_ok());
}

#[test]
fn malformed_cards_are_rejected() {
    let mut columns = [
        [Some(1), Some(2), Some(3), Some(4), Some(5)],
        [Some(16), Some(17), Some(18), Some(19), Some(20)],
        [Some(31), Some(32), None, Some(34), Some(35)],
        [Some(46), Some(47), Some(48), Some(49), Some(50)],
        [Some(61), Some(62), Some(63), Some(64), Some(65)],
    ];
    columns[1][0] = Some(5);
    assert_eq!(
        Card::from_columns(CardId::new("x"), columns),
        Err(CardError::NumberOutOfRange { column: Column::I, value: 5 })
    );
    columns[1][0] = Some(17);
    assert_eq!(
        Card::from_columns(CardId::new("x"), columns),
        Err(CardError::DuplicateInColumn { column: Column::I, value: 17 })
    );
    columns[1][0] = Some(16);
    columns[2][2] = Some(33);
    assert_eq!(
        Card::from_columns(CardId::new("x"), columns),
        Err(CardError::FreeSpaceOccupied(33))
    );
}
