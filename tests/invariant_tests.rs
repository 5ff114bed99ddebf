//! Property tests: random command sequences against the rule invariants.
//!
//! Each case starts a two-human game from a random shuffle and throws a
//! random mix of legal and illegal commands at it. Rejected commands must
//! leave the state untouched; accepted ones must keep every invariant.

mod common;

use std::collections::HashSet;

use common::{card_locations, repeat, standard_deck, two_humans};
use crystal_duel::cards::CardRegistry;
use crystal_duel::core::{GameRng, InstanceId, PlayerSlot, PreserveOrder, RulesConfig, Zone};
use crystal_duel::games::duel::{DrawOutcome, Game, GameBuilder, Player};
use crystal_duel::rules::{AttackTarget, GameEvent, RecordingObserver};
use crystal_duel::zones::Deck;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Command {
    Play { wrong_slot: bool, pick: usize },
    Attack { pick: usize, target: usize },
    EndTurn,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (any::<bool>(), any::<usize>()).prop_map(|(wrong_slot, pick)| Command::Play { wrong_slot, pick }),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(pick, target)| Command::Attack { pick, target }),
        2 => Just(Command::EndTurn),
    ]
}

fn pick<T: Clone>(items: impl Iterator<Item = T>, index: usize) -> Option<T> {
    let items: Vec<T> = items.collect();
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}

/// Returns `Some(accepted)` if a command was issued.
fn apply(game: &mut Game<RecordingObserver>, command: &Command) -> Option<bool> {
    let current = game.current_player();
    match *command {
        Command::Play { wrong_slot, pick: index } => {
            let slot = if wrong_slot { current.other() } else { current };
            let card = pick(game.player(slot).hand().iter().map(|c| c.instance_id()), index)?;
            Some(game.player_play_card(slot, card).is_ok())
        }
        Command::Attack { pick: index, target } => {
            let attacker = pick(game.player(current).field().iter().map(|c| c.instance_id()), index)?;
            let defender = game.player(current.other());
            let targets: Vec<AttackTarget> = defender
                .field()
                .iter()
                .map(|c| AttackTarget::Unit(c.instance_id()))
                .chain([AttackTarget::Player(current.other()), AttackTarget::Player(current)])
                .collect();
            let target = targets[target % targets.len()];
            Some(game.player_declare_attack(current, attacker, target).is_ok())
        }
        Command::EndTurn => Some(game.end_turn().is_ok()),
    }
}

fn check_player(player: &Player, rules: &RulesConfig) -> Result<(), TestCaseError> {
    prop_assert!(player.crystals() <= player.max_crystals());
    prop_assert!(player.max_crystals() as usize <= player.resources().len());
    prop_assert!(player.resources().len() <= rules.max_resources);
    prop_assert!(player.field().len() <= rules.max_field_size);
    prop_assert!(player.life() >= 0);
    prop_assert!(player.life() > 0 || player.has_lost());

    for card in player.field().iter() {
        let unit = card.as_challenger();
        prop_assert!(unit.is_some(), "non-unit on the field");
        let unit = unit.unwrap();
        prop_assert!(unit.current_health > 0, "dead unit left on the field");
        prop_assert!(unit.attacks_performed_this_turn <= unit.max_attacks_per_turn);
    }
    for card in player.resources().iter() {
        prop_assert!(card.is_resource());
    }
    for card in player.all_cards() {
        prop_assert_eq!(card.zone(), player.zone_of(card.instance_id()));
        prop_assert_eq!(card.owner(), Some(player.slot()));
    }
    Ok(())
}

fn check_game(game: &Game<RecordingObserver>) -> Result<(), TestCaseError> {
    let locations = card_locations(game);
    let unique: HashSet<InstanceId> = locations.iter().map(|(id, _, _)| *id).collect();
    prop_assert_eq!(unique.len(), locations.len(), "a card is in two places");
    prop_assert_eq!(locations.len(), 80);

    for (_, player) in game.players().iter() {
        check_player(player, game.rules())?;
    }

    let someone_lost = game.players().iter().any(|(_, p)| p.has_lost());
    prop_assert_eq!(game.is_ended(), someone_lost);
    prop_assert_eq!(game.is_ended(), game.result().is_some());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random play keeps every rule invariant; rejected commands are no-ops.
    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..300),
    ) {
        let deck = standard_deck();
        let mut game = two_humans().shuffler(GameRng::new(seed)).build(&deck, &deck);
        game.start_game();
        check_game(&game)?;

        for command in &commands {
            let before = game.snapshot();
            let published = game.observer().snapshots.len();
            let current = game.current_player();
            let resources = game.player(current).resources().len();
            let crystals = game.player(current).crystals();
            let hand_ids: Vec<InstanceId> = game.player(current).hand().iter().map(|c| c.instance_id()).collect();

            let Some(accepted) = apply(&mut game, command) else {
                continue;
            };

            let after = game.snapshot();
            if !accepted {
                prop_assert_eq!(&after, &before);
                prop_assert_eq!(game.observer().snapshots.len(), published);
                continue;
            }

            prop_assert_eq!(game.observer().snapshots.len(), published + 1);
            prop_assert_eq!(game.observer().last_snapshot(), Some(&after));

            if let Command::Play { .. } = command {
                let player = game.player(current);
                prop_assert!(player.resources().len() <= resources + 1);
                let played: Vec<InstanceId> = hand_ids
                    .iter()
                    .copied()
                    .filter(|&id| player.zone_of(id) != Some(Zone::Hand))
                    .collect();
                prop_assert_eq!(played.len(), 1);
                let card = player.card(played[0]).unwrap();
                if card.is_resource() {
                    prop_assert_eq!(player.crystals(), crystals);
                } else {
                    prop_assert!(card.cost() <= crystals, "paid more than was available");
                    prop_assert_eq!(player.crystals(), crystals - card.cost());
                }
                if player.zone_of(played[0]) == Some(Zone::Field) {
                    prop_assert!(!card.as_challenger().unwrap().is_able_to_attack(), "no summoning sickness");
                }
            }

            check_game(&game)?;
        }

        // Once over, the result never changes.
        if game.is_ended() {
            let result = game.result();
            game.end_game();
            prop_assert_eq!(game.check_win_condition(), result);
            prop_assert_eq!(game.result(), result);
            prop_assert_eq!(game.observer().count(|e| matches!(e, GameEvent::GameEnded { .. })), 1);
        }
    }

    /// Drawing loses exactly once, on the first draw from an empty deck.
    #[test]
    fn prop_deck_out_is_final(size in 0usize..12, extra in 1usize..5) {
        let mut registry = CardRegistry::standard();
        let list = repeat("crystal", size);
        let rules = RulesConfig::default().with_max_hand_size(100);
        let mut player = Player::new(PlayerSlot::Player, "p", Deck::build(&list, &mut registry), &rules);
        player.initialize(&mut PreserveOrder);

        prop_assert_eq!(player.hand().len(), size.min(5));
        prop_assert!(!player.has_lost());

        let remaining = player.deck().len();
        for _ in 0..remaining {
            prop_assert!(matches!(player.draw_card(), DrawOutcome::Drawn(_)));
        }
        prop_assert!(!player.has_lost());

        prop_assert_eq!(player.draw_card(), DrawOutcome::Decked);
        prop_assert!(player.has_lost());
        for _ in 0..extra {
            prop_assert_eq!(player.draw_card(), DrawOutcome::AlreadyLost);
        }
        prop_assert_eq!(player.hand().len(), size);
    }

    /// Any seed gives a playable opening from a 40-card deck.
    #[test]
    fn prop_opening_never_loses(seed in any::<u64>()) {
        let deck = standard_deck();
        let mut game = GameBuilder::new()
            .rules(RulesConfig::default().headless())
            .human(PlayerSlot::Opponent)
            .seed(seed)
            .build(&deck, &deck);
        game.start_game();

        prop_assert!(!game.is_ended());
        for (_, player) in game.players().iter() {
            prop_assert_eq!(player.hand().len(), 5);
            prop_assert_eq!(player.card_count(), 40);
        }
    }
}
