//! Property tests for board geometry, dice, and the history deck.

use proptest::prelude::*;

use moundbuilders::board::land::{from_land_index, to_land_index, LAND_COUNT};
use moundbuilders::board::{HistoryDeck, Land, ALL_TRIBES};
use moundbuilders::protocol::parse_action;
use moundbuilders::{Dice, Game, SeededDice};

proptest! {
    #[test]
    fn land_index_round_trips(index in 0usize..LAND_COUNT) {
        let (tribe, position) = from_land_index(index).unwrap();
        prop_assert!((1..=6).contains(&position));
        prop_assert_eq!(to_land_index(tribe, position), index);
        let land = Land::at(tribe, position).unwrap();
        prop_assert_eq!(land.index(), index);
        prop_assert_eq!(land.tribe(), tribe);
    }

    #[test]
    fn out_of_range_positions_have_no_land(tribe in 0usize..5, position in 7u8..=255) {
        prop_assert!(Land::at(ALL_TRIBES[tribe], position).is_none());
        prop_assert!(Land::at(ALL_TRIBES[tribe], 0).is_none());
    }

    #[test]
    fn seeded_rolls_stay_on_the_die(seed in any::<u64>()) {
        let mut dice = SeededDice::new(seed);
        for _ in 0..50 {
            let roll = dice.roll();
            prop_assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>(), len in 0usize..40) {
        let mut dice = SeededDice::new(seed);
        let mut items: Vec<usize> = (0..len).collect();
        dice.shuffle(&mut items);
        items.sort_unstable();
        prop_assert_eq!(items, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn assembled_deck_holds_every_card_once(seed in any::<u64>()) {
        let deck = HistoryDeck::assemble(&mut SeededDice::new(seed));
        let mut numbers: Vec<u8> = deck.numbers().collect();
        numbers.sort_unstable();
        prop_assert_eq!(numbers, (1..=50).collect::<Vec<u8>>());
    }

    #[test]
    fn parser_never_panics(input in "[a-z ]{0,24}") {
        let _ = parse_action(&input);
    }

    #[test]
    fn preview_never_changes_the_game(seed in any::<u64>()) {
        let mut game = Game::new(SeededDice::new(seed));
        game.start().unwrap();
        let before = game.clone();
        let preview = game.available_warpath_actions();
        prop_assert_eq!(preview.len(), 5);
        prop_assert_eq!(game, before);
    }
}
