//! Opponent policies.
//!
//! A policy decides the main-phase actions of a slot. It only sees the game
//! through `GameCommands`, the same contract a human front end uses, and it
//! never ends the turn itself: the game does that once the policy returns.

use smallvec::SmallVec;
use tracing::debug;

use super::player::Player;
use crate::cards::Card;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerSlot;
use crate::rules::{AttackTarget, GameCommands};

/// Decision procedure for a policy-driven slot.
pub trait OpponentPolicy: Send {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Take the main-phase actions of `slot`'s turn.
    fn play_turn(&mut self, game: &mut dyn GameCommands, slot: PlayerSlot);
}

/// Reference checklist policy.
///
/// 1. Play a resource card if none was played this turn.
/// 2. Play the most expensive affordable unit, if the field has room.
/// 3. Attack with every unit that was able to attack when this step began:
///    a killable enemy unit first (strongest such), else the strongest
///    enemy unit, else the enemy player.
///
/// Ties go to the earliest card in hand or field order.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The first resource card in hand, unless one was already played.
    #[must_use]
    pub fn choose_resource(player: &Player) -> Option<InstanceId> {
        if player.played_resource_this_turn() {
            return None;
        }
        player.hand().iter().find(|c| c.is_resource()).map(Card::instance_id)
    }

    /// The most expensive unit in hand the player can pay for and place.
    #[must_use]
    pub fn choose_unit(player: &Player) -> Option<InstanceId> {
        if !player.field_has_room() {
            return None;
        }

        let mut best: Option<&Card> = None;
        for card in player.hand().iter() {
            if !card.is_challenger() || card.cost() > player.crystals() {
                continue;
            }
            if best.map_or(true, |b| card.cost() > b.cost()) {
                best = Some(card);
            }
        }
        best.map(Card::instance_id)
    }

    /// Target for an attacker with `attack` against `defender`.
    #[must_use]
    pub fn choose_target(attack: i32, defender: &Player) -> AttackTarget {
        let killable = defender
            .field()
            .iter()
            .filter(|c| c.as_challenger().is_some_and(|u| u.current_health <= attack));

        strongest(killable)
            .or_else(|| strongest(defender.field().iter()))
            .map_or(AttackTarget::Player(defender.slot()), AttackTarget::Unit)
    }
}

/// Highest-attack unit, earliest on ties.
fn strongest<'a>(cards: impl Iterator<Item = &'a Card>) -> Option<InstanceId> {
    let mut best: Option<(InstanceId, i32)> = None;
    for card in cards {
        let Some(unit) = card.as_challenger() else {
            continue;
        };
        if best.map_or(true, |(_, attack)| unit.attack > attack) {
            best = Some((card.instance_id(), unit.attack));
        }
    }
    best.map(|(id, _)| id)
}

impl OpponentPolicy for HeuristicPolicy {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn play_turn(&mut self, game: &mut dyn GameCommands, slot: PlayerSlot) {
        if game.is_ended() {
            return;
        }
        if let Some(id) = Self::choose_resource(game.player(slot)) {
            if let Err(err) = game.play_card(slot, id) {
                debug!(%slot, card = %id, %err, "resource play rejected");
            }
        }

        if game.is_ended() {
            return;
        }
        if let Some(id) = Self::choose_unit(game.player(slot)) {
            if let Err(err) = game.play_card(slot, id) {
                debug!(%slot, card = %id, %err, "unit play rejected");
            }
        }

        if game.is_ended() {
            return;
        }
        let attackers: SmallVec<[(InstanceId, i32); 5]> = game
            .player(slot)
            .field()
            .iter()
            .filter_map(|c| {
                let unit = c.as_challenger()?;
                unit.is_able_to_attack().then_some((c.instance_id(), unit.attack))
            })
            .collect();

        for (attacker, attack) in attackers {
            if game.is_ended() {
                return;
            }
            let target = Self::choose_target(attack, game.player(slot.other()));
            if let Err(err) = game.declare_attack(slot, attacker, target) {
                debug!(%slot, %attacker, %target, %err, "attack rejected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardFactory, CardRegistry, TemplateId};
    use crate::core::config::{RulesConfig, Zone};
    use crate::core::rng::PreserveOrder;
    use crate::zones::Deck;

    fn player(slot: PlayerSlot, hand: &[&str], registry: &mut CardRegistry) -> Player {
        let list: Vec<TemplateId> = hand.iter().map(|&id| id.into()).collect();
        let mut player = Player::new(slot, slot.default_name(), Deck::build(&list, registry), &RulesConfig::default());
        player.initialize(&mut PreserveOrder);
        player
    }

    fn field_unit(player: &mut Player, template: &str, registry: &mut CardRegistry) -> InstanceId {
        let card = registry.create_card(&template.into()).unwrap();
        let id = card.instance_id();
        player.add_card(card, Zone::Field);
        id
    }

    fn grant_crystals(p: &mut Player, n: u32, registry: &mut CardRegistry) {
        for _ in 0..n {
            let crystal = registry.create_card(&"crystal".into()).unwrap();
            let id = crystal.instance_id();
            p.add_card(crystal, Zone::Hand);
            p.play_card(id).unwrap();
            p.start_turn_without_draw();
        }
    }

    #[test]
    fn test_choose_resource() {
        let mut registry = CardRegistry::standard();
        // Opening hand is drawn from the top: crystal, crystal, kaelen.
        let mut p = player(PlayerSlot::Opponent, &["kaelen", "crystal", "crystal"], &mut registry);
        let first_crystal = p.hand()[0].instance_id();

        assert_eq!(HeuristicPolicy::choose_resource(&p), Some(first_crystal));

        p.play_card(first_crystal).unwrap();
        assert_eq!(HeuristicPolicy::choose_resource(&p), None);
    }

    #[test]
    fn test_choose_unit_prefers_cost_then_hand_order() {
        let mut registry = CardRegistry::standard();
        // Hand order: golem, roric, kaelen, sylph.
        let mut p = player(PlayerSlot::Opponent, &["sylph", "kaelen", "roric", "golem"], &mut registry);

        grant_crystals(&mut p, 1, &mut registry);
        assert_eq!(HeuristicPolicy::choose_unit(&p), None);

        grant_crystals(&mut p, 2, &mut registry);
        assert_eq!(p.crystals(), 3);

        // roric and kaelen both cost 3; roric comes first in hand.
        let roric = p.hand()[1].instance_id();
        assert_eq!(p.hand()[1].template_id().as_str(), "roric");
        assert_eq!(HeuristicPolicy::choose_unit(&p), Some(roric));
    }

    #[test]
    fn test_choose_unit_needs_field_room() {
        let mut registry = CardRegistry::standard();
        let mut p = player(PlayerSlot::Opponent, &["sylph"], &mut registry);
        grant_crystals(&mut p, 2, &mut registry);
        assert!(HeuristicPolicy::choose_unit(&p).is_some());

        for _ in 0..5 {
            field_unit(&mut p, "golem", &mut registry);
        }
        assert_eq!(HeuristicPolicy::choose_unit(&p), None);
    }

    #[test]
    fn test_target_priority() {
        let mut registry = CardRegistry::standard();
        let mut defender = player(PlayerSlot::Player, &[], &mut registry);

        assert_eq!(
            HeuristicPolicy::choose_target(3, &defender),
            AttackTarget::Player(PlayerSlot::Player)
        );

        field_unit(&mut defender, "golem", &mut registry); // 2/6
        let kaelen = field_unit(&mut defender, "kaelen", &mut registry); // 4/3
        let sylph = field_unit(&mut defender, "sylph", &mut registry); // 1/2

        // Nothing killable with 1 attack: strongest unit.
        assert_eq!(HeuristicPolicy::choose_target(1, &defender), AttackTarget::Unit(kaelen));

        // Only sylph is killable with 2.
        assert_eq!(HeuristicPolicy::choose_target(2, &defender), AttackTarget::Unit(sylph));

        // Kaelen and sylph killable with 3; kaelen hits harder.
        assert_eq!(HeuristicPolicy::choose_target(3, &defender), AttackTarget::Unit(kaelen));

        // Everything killable with 6.
        assert_eq!(HeuristicPolicy::choose_target(6, &defender), AttackTarget::Unit(kaelen));
    }

    #[test]
    fn test_strongest_ties_go_first() {
        let mut registry = CardRegistry::standard();
        let mut defender = player(PlayerSlot::Player, &[], &mut registry);
        let first = field_unit(&mut defender, "roric", &mut registry); // 3/3
        field_unit(&mut defender, "stalker", &mut registry); // 3/1

        assert_eq!(HeuristicPolicy::choose_target(0, &defender), AttackTarget::Unit(first));
    }
}
