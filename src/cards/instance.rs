//! Card instances - runtime card state.
//!
//! `Card` is a single physical card in a game. It carries the template's
//! static attributes, its identity, its placement (zone and owner), and a
//! variant payload:
//!
//! - `CardKind::Resource`: no combat state
//! - `CardKind::Challenger`: a unit with attack, health, and readiness
//! - `CardKind::Support`: placeholder, no mechanical effect
//!
//! Zone placement is changed by the owning `Player` only.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::definition::TemplateId;
use crate::core::config::{CardType, Zone};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerSlot;

/// Combat state of a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenger {
    /// Printed attack.
    pub base_attack: i32,

    /// Current attack; damage dealt when attacking.
    pub attack: i32,

    /// Printed health.
    pub max_health: i32,

    /// Current health. May drop to zero or below until the death sweep.
    pub current_health: i32,

    /// Flavor tag (Attacker, Defender, ...).
    pub role: String,

    /// False while tapped.
    pub is_ready: bool,

    /// False while summoning-sick.
    pub can_attack: bool,

    /// Attacks declared since the last ready-up.
    pub attacks_performed_this_turn: u32,

    /// Attack quota per turn.
    pub max_attacks_per_turn: u32,
}

impl Challenger {
    /// A fresh unit: tapped and summoning-sick until its first ready-up.
    #[must_use]
    pub fn new(attack: i32, health: i32, role: impl Into<String>) -> Self {
        Self {
            base_attack: attack,
            attack,
            max_health: health,
            current_health: health,
            role: role.into(),
            is_ready: false,
            can_attack: false,
            attacks_performed_this_turn: 0,
            max_attacks_per_turn: 1,
        }
    }

    /// Subtract `amount` from current health.
    ///
    /// No floor is applied; destruction is left to the death sweep so that
    /// simultaneous damage is all applied first.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_health -= amount;
    }

    /// Untap, clear summoning sickness, and reset the attack counter.
    pub fn ready_up(&mut self) {
        self.is_ready = true;
        self.can_attack = true;
        self.attacks_performed_this_turn = 0;
    }

    /// Mark as used for this turn.
    pub fn tap(&mut self) {
        self.is_ready = false;
    }

    /// Ready, not summoning-sick, and quota remaining.
    #[must_use]
    pub fn is_able_to_attack(&self) -> bool {
        self.is_ready && self.can_attack && self.attacks_performed_this_turn < self.max_attacks_per_turn
    }

    /// Consume one attack from the quota, tapping once it is exhausted.
    pub fn register_attack(&mut self) {
        self.attacks_performed_this_turn += 1;
        if self.attacks_performed_this_turn >= self.max_attacks_per_turn {
            self.tap();
        }
    }

    /// Force summoning sickness (used when entering the battlefield).
    pub fn summon(&mut self) {
        self.is_ready = false;
        self.can_attack = false;
    }

    /// Current health is zero or below.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.current_health <= 0
    }

    /// Back to printed stats, sick and with no attacks used.
    pub fn restore(&mut self) {
        self.attack = self.base_attack;
        self.current_health = self.max_health;
        self.attacks_performed_this_turn = 0;
        self.summon();
    }
}

/// Variant payload of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Resource,
    Challenger(Challenger),
    Support,
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    template_id: TemplateId,
    instance_id: InstanceId,
    name: String,
    cost: u32,
    text: String,
    zone: Option<Zone>,
    owner: Option<PlayerSlot>,
    kind: CardKind,
}

impl Card {
    /// Create a card instance with no zone and no owner.
    #[must_use]
    pub fn new(
        template_id: TemplateId,
        instance_id: InstanceId,
        name: impl Into<String>,
        cost: u32,
        text: impl Into<String>,
        kind: CardKind,
    ) -> Self {
        // Resources are free regardless of what the caller passes.
        let cost = if matches!(kind, CardKind::Resource) { 0 } else { cost };
        Self {
            template_id,
            instance_id,
            name: name.into(),
            cost,
            text: text.into(),
            zone: None,
            owner: None,
            kind,
        }
    }

    /// Content key shared by all instances of the template.
    #[must_use]
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    /// Unique runtime id.
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current zone, `None` before the first placement.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    pub(crate) fn set_zone(&mut self, zone: Zone) {
        self.zone = Some(zone);
    }

    /// Owning slot, `None` until the card enters a player's deck.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerSlot> {
        self.owner
    }

    /// Assign the owner. Only the first assignment sticks.
    ///
    /// Returns false if the card already belonged to a different slot.
    pub fn assign_owner(&mut self, owner: PlayerSlot) -> bool {
        match self.owner {
            None => {
                self.owner = Some(owner);
                true
            }
            Some(current) if current == owner => true,
            Some(current) => {
                warn!(card = %self.instance_id, %current, requested = %owner, "owner reassignment ignored");
                false
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Resource => CardType::Resource,
            CardKind::Challenger(_) => CardType::Challenger,
            CardKind::Support => CardType::Support,
        }
    }

    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self.kind, CardKind::Resource)
    }

    #[must_use]
    pub fn is_challenger(&self) -> bool {
        matches!(self.kind, CardKind::Challenger(_))
    }

    /// Unit state, if this card is a unit.
    #[must_use]
    pub fn as_challenger(&self) -> Option<&Challenger> {
        match &self.kind {
            CardKind::Challenger(unit) => Some(unit),
            _ => None,
        }
    }

    /// Mutable unit state, if this card is a unit.
    pub fn as_challenger_mut(&mut self) -> Option<&mut Challenger> {
        match &mut self.kind {
            CardKind::Challenger(unit) => Some(unit),
            _ => None,
        }
    }

    /// Whether the card's cost can be paid from `available` crystals.
    ///
    /// Resources always report playable; the one-per-turn cap is enforced
    /// by the player.
    #[must_use]
    pub fn can_be_played(&self, available: u32) -> bool {
        match self.kind {
            CardKind::Resource => true,
            _ => available >= self.cost,
        }
    }

    /// Apply damage if this is a unit. Other cards ignore it.
    pub fn take_damage(&mut self, amount: i32) {
        let id = self.instance_id;
        if let Some(unit) = self.as_challenger_mut() {
            unit.take_damage(amount);
            trace!(card = %id, amount, health = unit.current_health, "unit damaged");
        }
    }
}
