//! Player state and zone rules.
//!
//! A `Player` owns a deck and four insertion-ordered zones (hand, field,
//! resources, discard). Every card that belongs to the player lives in
//! exactly one of them, and its `zone()` always names that collection.
//!
//! ## Draw rules
//!
//! - Drawing from an empty deck makes the player lose (`has_lost` is sticky).
//! - Drawing with a full hand does nothing; the card stays on the deck.
//! - A player who has lost never draws again.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, error, info, trace, warn};

use crate::cards::{Card, CardKind};
use crate::core::config::{RulesConfig, Zone};
use crate::core::entity::InstanceId;
use crate::core::error::ActionError;
use crate::core::player::PlayerSlot;
use crate::core::rng::Shuffler;
use crate::zones::Deck;

/// Result of a draw attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// The card moved from the deck to the hand.
    Drawn(InstanceId),
    /// The hand was at its limit; nothing moved.
    HandFull,
    /// The deck was empty; the player has lost.
    Decked,
    /// The player had already lost; nothing happened.
    AlreadyLost,
}

impl DrawOutcome {
    /// The drawn card, if any.
    #[must_use]
    pub fn card(self) -> Option<InstanceId> {
        match self {
            DrawOutcome::Drawn(id) => Some(id),
            _ => None,
        }
    }
}

/// One of the two participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    slot: PlayerSlot,
    name: String,

    life: i32,
    max_life: i32,

    deck: Deck,
    hand: Vector<Card>,
    field: Vector<Card>,
    resources: Vector<Card>,
    discard: Vector<Card>,

    crystals: u32,
    max_crystals: u32,
    played_resource_this_turn: bool,
    has_lost: bool,

    initial_hand_size: usize,
    max_hand_size: usize,
    max_field_size: usize,
    max_resources: usize,
}

impl Player {
    /// Create a player owning every card of `deck`.
    #[must_use]
    pub fn new(slot: PlayerSlot, name: impl Into<String>, mut deck: Deck, rules: &RulesConfig) -> Self {
        for card in deck.iter_mut() {
            card.assign_owner(slot);
        }

        Self {
            slot,
            name: name.into(),
            life: rules.starting_life,
            max_life: rules.starting_life,
            deck,
            hand: Vector::new(),
            field: Vector::new(),
            resources: Vector::new(),
            discard: Vector::new(),
            crystals: 0,
            max_crystals: 0,
            played_resource_this_turn: false,
            has_lost: false,
            initial_hand_size: rules.initial_hand_size,
            max_hand_size: rules.max_hand_size,
            max_field_size: rules.max_field_size,
            max_resources: rules.max_resources,
        }
    }

    /// Prepare for a new game.
    ///
    /// Gathers every card back into the deck, restores counters, shuffles,
    /// and draws the initial hand. A deck too small for the initial hand is
    /// logged and the hand is left short; it does not cost the game.
    pub fn initialize(&mut self, shuffler: &mut dyn Shuffler) {
        self.gather_cards();

        self.life = self.max_life;
        self.crystals = 0;
        self.max_crystals = 0;
        self.played_resource_this_turn = false;
        self.has_lost = false;

        self.deck.shuffle(shuffler);
        for card in self.deck.iter_mut() {
            card.assign_owner(self.slot);
        }

        for _ in 0..self.initial_hand_size {
            match self.deck.draw() {
                Some(mut card) => {
                    card.set_zone(Zone::Hand);
                    self.hand.push_back(card);
                }
                None => {
                    warn!(player = %self.slot, hand = self.hand.len(), "deck too small for the initial hand");
                    break;
                }
            }
        }

        debug!(player = %self.slot, hand = self.hand.len(), deck = self.deck.len(), "player initialized");
    }

    /// Move every card outside the deck back into it, with fresh unit state.
    fn gather_cards(&mut self) {
        let scattered: Vec<Card> = [
            std::mem::take(&mut self.hand),
            std::mem::take(&mut self.field),
            std::mem::take(&mut self.resources),
            std::mem::take(&mut self.discard),
        ]
        .into_iter()
        .flatten()
        .collect();

        for mut card in scattered {
            if let Some(unit) = card.as_challenger_mut() {
                unit.restore();
            }
            self.deck.put_on_top(card);
        }
        for card in self.deck.iter_mut() {
            if let Some(unit) = card.as_challenger_mut() {
                unit.restore();
            }
        }
    }

    /// Draw the top card into the hand.
    pub fn draw_card(&mut self) -> DrawOutcome {
        if self.has_lost {
            return DrawOutcome::AlreadyLost;
        }

        if !self.deck.is_empty() && self.hand.len() >= self.max_hand_size {
            debug!(player = %self.slot, hand = self.hand.len(), "hand full, draw skipped");
            return DrawOutcome::HandFull;
        }

        match self.deck.draw() {
            Some(mut card) => {
                let id = card.instance_id();
                card.set_zone(Zone::Hand);
                self.hand.push_back(card);
                trace!(player = %self.slot, card = %id, "drew");
                DrawOutcome::Drawn(id)
            }
            None => {
                info!(player = %self.slot, "drew from an empty deck");
                self.has_lost = true;
                DrawOutcome::Decked
            }
        }
    }

    /// Play a card from hand.
    ///
    /// Returns the zone the card ended up in. On error nothing changed.
    pub fn play_card(&mut self, id: InstanceId) -> Result<Zone, ActionError> {
        let index = self
            .hand
            .iter()
            .position(|c| c.instance_id() == id)
            .ok_or(ActionError::CardNotInHand(id))?;
        let card = &self.hand[index];

        if !card.can_be_played(self.crystals) {
            return Err(ActionError::InsufficientCrystals {
                cost: card.cost(),
                available: self.crystals,
            });
        }

        let target = match card.kind() {
            CardKind::Resource => {
                if self.played_resource_this_turn {
                    return Err(ActionError::ResourceAlreadyPlayed);
                }
                if self.resources.len() >= self.max_resources {
                    return Err(ActionError::ResourceZoneFull);
                }
                Zone::Resources
            }
            CardKind::Challenger(_) => {
                if self.field.len() >= self.max_field_size {
                    return Err(ActionError::FieldFull);
                }
                Zone::Field
            }
            // No ability execution yet: pay and discard.
            CardKind::Support => Zone::Discard,
        };

        let card = self.hand.remove(index);
        if target == Zone::Resources {
            self.played_resource_this_turn = true;
            self.max_crystals += 1;
        } else {
            self.crystals -= card.cost();
        }

        debug!(player = %self.slot, card = %id, name = card.name(), zone = %target, crystals = self.crystals, "played");
        Ok(self.place_card(card, target))
    }

    /// Move a card this player holds to `zone`.
    ///
    /// Returns the zone the card landed in (see `add_card`), or `None` if
    /// the player holds no such card.
    pub fn move_card_to_zone(&mut self, id: InstanceId, zone: Zone) -> Option<Zone> {
        let Some(card) = self.take_card(id) else {
            debug!(player = %self.slot, card = %id, "move ignored, card not held");
            return None;
        };
        Some(self.place_card(card, zone))
    }

    /// Give the player a card from outside its zones, placing it in `zone`.
    ///
    /// The card's owner is set to this player if it had none.
    pub fn add_card(&mut self, mut card: Card, zone: Zone) -> Zone {
        card.assign_owner(self.slot);
        self.place_card(card, zone)
    }

    /// Append a card to the collection for `zone`.
    ///
    /// Non-units routed to the field and non-resources routed to the
    /// resource zone go to the discard instead. Units entering the field
    /// are summoning-sick. Cards sent to the deck go on top.
    fn place_card(&mut self, mut card: Card, zone: Zone) -> Zone {
        let zone = match zone {
            Zone::Field if !card.is_challenger() => {
                error!(card = %card.instance_id(), "non-unit sent to the field, discarding");
                Zone::Discard
            }
            Zone::Resources if !card.is_resource() => {
                error!(card = %card.instance_id(), "non-resource sent to the resource zone, discarding");
                Zone::Discard
            }
            other => other,
        };

        card.set_zone(zone);
        match zone {
            Zone::Deck => self.deck.put_on_top(card),
            Zone::Hand => self.hand.push_back(card),
            Zone::Field => {
                if let Some(unit) = card.as_challenger_mut() {
                    unit.summon();
                }
                self.field.push_back(card);
            }
            Zone::Resources => self.resources.push_back(card),
            Zone::Discard => self.discard.push_back(card),
        }
        zone
    }

    /// Remove a card from whichever collection holds it.
    fn take_card(&mut self, id: InstanceId) -> Option<Card> {
        for list in [&mut self.hand, &mut self.field, &mut self.resources, &mut self.discard] {
            if let Some(index) = list.iter().position(|c| c.instance_id() == id) {
                return Some(list.remove(index));
            }
        }
        self.deck.remove(id)
    }

    /// Refill crystals, allow a resource, and ready every unit.
    fn refresh(&mut self) {
        self.crystals = self.max_crystals;
        self.played_resource_this_turn = false;
        for card in self.field.iter_mut() {
            if let Some(unit) = card.as_challenger_mut() {
                unit.ready_up();
            }
        }
    }

    /// Turn-start upkeep followed by a draw.
    pub fn start_turn(&mut self) -> DrawOutcome {
        if self.has_lost {
            return DrawOutcome::AlreadyLost;
        }
        self.refresh();
        self.draw_card()
    }

    /// Turn-start upkeep without the draw.
    pub fn start_turn_without_draw(&mut self) {
        if self.has_lost {
            return;
        }
        self.refresh();
    }

    /// End-of-turn hook. Nothing happens at end of turn yet.
    pub fn end_turn(&mut self) {
        if self.has_lost {
            return;
        }
        trace!(player = %self.slot, "end of turn");
    }

    /// Lose life, flooring at zero. Reaching zero loses the game.
    ///
    /// Negative amounts count as zero.
    pub fn take_damage(&mut self, amount: i32) {
        if self.has_lost {
            return;
        }
        self.life = self.life.saturating_sub(amount.max(0));
        if self.life <= 0 {
            self.life = 0;
            self.has_lost = true;
            info!(player = %self.slot, "life reduced to zero");
        }
    }

    /// Move every unit at zero or less health from the field to the discard.
    ///
    /// Survivors keep their relative order. Returns the destroyed ids in
    /// field order.
    pub fn sweep_dead(&mut self) -> SmallVec<[InstanceId; 4]> {
        let mut destroyed = SmallVec::new();
        if !self.field.iter().any(is_destroyed) {
            return destroyed;
        }

        let (dead, survivors): (Vector<Card>, Vector<Card>) =
            std::mem::take(&mut self.field).into_iter().partition(is_destroyed);
        self.field = survivors;

        for card in dead {
            debug!(player = %self.slot, card = %card.instance_id(), name = card.name(), "unit destroyed");
            destroyed.push(card.instance_id());
            self.place_card(card, Zone::Discard);
        }
        destroyed
    }

    // === Queries ===

    #[must_use]
    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn life(&self) -> i32 {
        self.life
    }

    #[must_use]
    pub fn max_life(&self) -> i32 {
        self.max_life
    }

    /// Crystals left to spend this turn.
    #[must_use]
    pub fn crystals(&self) -> u32 {
        self.crystals
    }

    #[must_use]
    pub fn max_crystals(&self) -> u32 {
        self.max_crystals
    }

    #[must_use]
    pub fn played_resource_this_turn(&self) -> bool {
        self.played_resource_this_turn
    }

    /// Sticky once set.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.has_lost
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    #[must_use]
    pub fn field(&self) -> &Vector<Card> {
        &self.field
    }

    #[must_use]
    pub fn resources(&self) -> &Vector<Card> {
        &self.resources
    }

    #[must_use]
    pub fn discard(&self) -> &Vector<Card> {
        &self.discard
    }

    #[must_use]
    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    #[must_use]
    pub fn max_field_size(&self) -> usize {
        self.max_field_size
    }

    #[must_use]
    pub fn max_resources(&self) -> usize {
        self.max_resources
    }

    /// Room for another unit on the field.
    #[must_use]
    pub fn field_has_room(&self) -> bool {
        self.field.len() < self.max_field_size
    }

    #[must_use]
    pub fn hand_card(&self, id: InstanceId) -> Option<&Card> {
        self.hand.iter().find(|c| c.instance_id() == id)
    }

    #[must_use]
    pub fn field_card(&self, id: InstanceId) -> Option<&Card> {
        self.field.iter().find(|c| c.instance_id() == id)
    }

    pub(crate) fn field_card_mut(&mut self, id: InstanceId) -> Option<&mut Card> {
        self.field.iter_mut().find(|c| c.instance_id() == id)
    }

    /// Every card this player holds, in any zone.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.field.iter())
            .chain(self.resources.iter())
            .chain(self.discard.iter())
    }

    /// Find a held card in any zone.
    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&Card> {
        self.all_cards().find(|c| c.instance_id() == id)
    }

    /// The collection currently holding `id`.
    #[must_use]
    pub fn zone_of(&self, id: InstanceId) -> Option<Zone> {
        let holds = |list: &Vector<Card>| list.iter().any(|c| c.instance_id() == id);
        if self.deck.contains(id) {
            Some(Zone::Deck)
        } else if holds(&self.hand) {
            Some(Zone::Hand)
        } else if holds(&self.field) {
            Some(Zone::Field)
        } else if holds(&self.resources) {
            Some(Zone::Resources)
        } else if holds(&self.discard) {
            Some(Zone::Discard)
        } else {
            None
        }
    }

    /// Total cards held.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.hand.len() + self.field.len() + self.resources.len() + self.discard.len()
    }
}

fn is_destroyed(card: &Card) -> bool {
    card.as_challenger().is_some_and(|unit| unit.is_destroyed())
}
