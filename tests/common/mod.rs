//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use crystal_duel::cards::{Card, CardFactory, CardRegistry, TemplateId};
use crystal_duel::core::{GameSnapshot, InstanceId, PlayerMap, PlayerSlot, PreserveOrder, RulesConfig, TurnPhase, Zone};
use crystal_duel::games::duel::{Game, GameBuilder, HeuristicPolicy, Player};
use crystal_duel::rules::RecordingObserver;
use crystal_duel::zones::Deck;

/// Deck list from template ids, bottom card first.
pub fn list(ids: &[&str]) -> Vec<TemplateId> {
    ids.iter().map(|&id| id.into()).collect()
}

/// `n` copies of one template.
pub fn repeat(id: &str, n: usize) -> Vec<TemplateId> {
    vec![TemplateId::new(id); n]
}

/// 15 resources and 25 units, interleaved. Counting from the top, every
/// block of eight starts with three crystals, so an unshuffled opening hand
/// holds three crystals and two units.
pub fn standard_deck() -> Vec<TemplateId> {
    let units = ["kaelen", "golem", "sylph", "roric", "stalker"];
    let mut deck = Vec::with_capacity(40);
    for i in 0..40 {
        if (39 - i) % 8 < 3 {
            deck.push(TemplateId::new("crystal"));
        } else {
            deck.push(TemplateId::new(units[i % units.len()]));
        }
    }
    deck
}

/// Headless game with no policies and unshuffled decks.
pub fn two_humans() -> GameBuilder<RecordingObserver> {
    GameBuilder::new()
        .rules(RulesConfig::default().headless())
        .human(PlayerSlot::Opponent)
        .shuffler(PreserveOrder)
        .observer(RecordingObserver::new())
}

/// Hand-built board state, restored into a running game.
///
/// Both players start with an empty hand, ten crystals in the deck, and no
/// resources. Units placed with `unit` are ready when the game resumes.
pub struct Board {
    registry: CardRegistry,
    players: PlayerMap<Player>,
}

impl Board {
    pub fn new() -> Self {
        Self::with_rules(&RulesConfig::default().headless())
    }

    pub fn with_rules(rules: &RulesConfig) -> Self {
        let mut registry = CardRegistry::standard();
        let players = PlayerMap::new(|slot| {
            let deck = Deck::build(&repeat("crystal", 10), &mut registry);
            Player::new(slot, slot.default_name(), deck, rules)
        });
        Self { registry, players }
    }

    fn create(&mut self, template: &str) -> Card {
        self.registry
            .create_card(&template.into())
            .expect("template should be registered")
    }

    /// Put a card in `slot`'s hand.
    pub fn hand(&mut self, slot: PlayerSlot, template: &str) -> InstanceId {
        let card = self.create(template);
        let id = card.instance_id();
        self.players[slot].add_card(card, Zone::Hand);
        id
    }

    /// Put a unit on `slot`'s field.
    pub fn unit(&mut self, slot: PlayerSlot, template: &str) -> InstanceId {
        let card = self.create(template);
        let id = card.instance_id();
        self.players[slot].add_card(card, Zone::Field);
        id
    }

    /// Give `slot` `n` more crystals per turn, played over earlier turns.
    pub fn crystals(&mut self, slot: PlayerSlot, n: u32) {
        for _ in 0..n {
            let id = self.hand(slot, "crystal");
            self.players[slot].play_card(id).expect("crystal should be playable");
            self.players[slot].start_turn_without_draw();
        }
    }

    pub fn damage(&mut self, slot: PlayerSlot, amount: i32) {
        self.players[slot].take_damage(amount);
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot]
    }

    fn into_snapshot(mut self, current: PlayerSlot) -> GameSnapshot {
        for (_, player) in self.players.iter_mut() {
            player.start_turn_without_draw();
        }
        GameSnapshot {
            turn: 1,
            current_player: current,
            phase: TurnPhase::Main,
            ended: false,
            result: None,
            players: self.players,
        }
    }

    /// Two humans, `current` to act.
    pub fn into_game(self, current: PlayerSlot) -> Game<RecordingObserver> {
        let mut game = two_humans().build(&[], &[]);
        game.restore(self.into_snapshot(current));
        game.observer_mut().clear();
        game
    }

    /// The heuristic policy drives the `Opponent` slot. If it is the
    /// opponent's turn, the policy plays it out during the restore.
    pub fn into_policy_game(self, current: PlayerSlot) -> Game<RecordingObserver> {
        let mut game = GameBuilder::new()
            .rules(RulesConfig::default().headless())
            .policy(PlayerSlot::Opponent, HeuristicPolicy::new())
            .shuffler(PreserveOrder)
            .observer(RecordingObserver::new())
            .build(&[], &[]);
        game.restore(self.into_snapshot(current));
        game
    }
}

/// Every card the game knows about, with the zone its owner files it under.
pub fn card_locations(game: &Game<RecordingObserver>) -> Vec<(InstanceId, PlayerSlot, Zone)> {
    let mut out = Vec::new();
    for (slot, player) in game.players().iter() {
        for card in player.all_cards() {
            let zone = player.zone_of(card.instance_id()).expect("held card has a zone");
            out.push((card.instance_id(), slot, zone));
        }
    }
    out
}
