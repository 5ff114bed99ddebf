//! Draw pile.
//!
//! A `Deck` is an ordered sequence of cards. The top of the deck is the back
//! of the sequence: `draw` pops from the back and `put_on_top` pushes to it.
//!
//! Backed by `im::Vector` so snapshots of a player are cheap to take.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{Card, CardFactory, TemplateId};
use crate::core::config::Zone;
use crate::core::entity::InstanceId;
use crate::core::rng::Shuffler;

/// Ordered draw pile.
///
/// ## Example
///
/// ```
/// use crystal_duel::cards::{CardRegistry, TemplateId};
/// use crystal_duel::zones::Deck;
///
/// let mut registry = CardRegistry::standard();
/// let list: Vec<TemplateId> = ["crystal", "golem", "unknown"].iter().map(|&id| id.into()).collect();
///
/// let mut deck = Deck::build(&list, &mut registry);
/// assert_eq!(deck.len(), 2);
///
/// // Last listed card is on top.
/// assert_eq!(deck.draw().unwrap().template_id().as_str(), "golem");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck from cards, bottom first. Every card is placed in the
    /// `Deck` zone.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let cards = cards
            .into_iter()
            .map(|mut card| {
                card.set_zone(Zone::Deck);
                card
            })
            .collect();
        Self { cards }
    }

    /// Build a deck from a list of template ids, bottom first.
    ///
    /// Unknown ids are skipped.
    pub fn build(list: &[TemplateId], factory: &mut dyn CardFactory) -> Self {
        let cards: Vec<Card> = list
            .iter()
            .filter_map(|id| {
                let card = factory.create_card(id);
                if card.is_none() {
                    warn!(template = %id, "skipping unknown template in deck list");
                }
                card
            })
            .collect();
        debug!(requested = list.len(), built = cards.len(), "deck built");
        Self::from_cards(cards)
    }

    /// Remove and return the top card, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Place a card on top of the deck.
    pub fn put_on_top(&mut self, mut card: Card) {
        card.set_zone(Zone::Deck);
        self.cards.push_back(card);
    }

    /// Permute the deck in place.
    pub fn shuffle(&mut self, shuffler: &mut dyn Shuffler) {
        let mut cards: Vec<Card> = self.cards.iter().cloned().collect();
        shuffler.shuffle(&mut cards);
        self.cards = Vector::from(cards);
    }

    /// Take a card out of the deck by instance id.
    pub fn remove(&mut self, id: InstanceId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.instance_id() == id)?;
        Some(self.cards.remove(index))
    }

    /// The card that would be drawn next.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.iter().any(|c| c.instance_id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::core::rng::{GameRng, PreserveOrder};

    fn list(ids: &[&str]) -> Vec<TemplateId> {
        ids.iter().map(|&id| TemplateId::from(id)).collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut registry = CardRegistry::standard();
        let mut deck = Deck::build(&list(&["crystal", "kaelen", "golem"]), &mut registry);

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.draw().unwrap().template_id().as_str(), "golem");
        assert_eq!(deck.draw().unwrap().template_id().as_str(), "kaelen");
        assert_eq!(deck.draw().unwrap().template_id().as_str(), "crystal");
        assert!(deck.draw().is_none());
        assert!(deck.draw().is_none());
    }

    #[test]
    fn test_build_places_in_deck_zone() {
        let mut registry = CardRegistry::standard();
        let deck = Deck::build(&list(&["crystal", "sylph"]), &mut registry);
        assert!(deck.iter().all(|c| c.zone() == Some(Zone::Deck)));
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let mut registry = CardRegistry::standard();
        let deck = Deck::build(&list(&["nope", "crystal", "also-nope"]), &mut registry);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_put_on_top() {
        let mut registry = CardRegistry::standard();
        let mut deck = Deck::build(&list(&["crystal", "crystal"]), &mut registry);
        let golem = registry.create_card(&"golem".into()).unwrap();
        let id = golem.instance_id();

        deck.put_on_top(golem);
        assert_eq!(deck.top().unwrap().instance_id(), id);
        assert_eq!(deck.top().unwrap().zone(), Some(Zone::Deck));
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut registry = CardRegistry::standard();
        let ids: Vec<&str> = std::iter::repeat("crystal").take(20).collect();
        let mut deck = Deck::build(&list(&ids), &mut registry);
        let before: Vec<_> = deck.iter().map(Card::instance_id).collect();

        deck.shuffle(&mut GameRng::new(42));
        let mut after: Vec<_> = deck.iter().map(Card::instance_id).collect();
        assert_ne!(before, after);

        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_preserve_order_shuffle() {
        let mut registry = CardRegistry::standard();
        let mut deck = Deck::build(&list(&["crystal", "golem"]), &mut registry);
        let before = deck.clone();

        deck.shuffle(&mut PreserveOrder);
        assert_eq!(deck, before);
    }

    #[test]
    fn test_remove_by_id() {
        let mut registry = CardRegistry::standard();
        let mut deck = Deck::build(&list(&["crystal", "golem", "sylph"]), &mut registry);
        let middle = deck.iter().nth(1).unwrap().instance_id();

        let removed = deck.remove(middle).unwrap();
        assert_eq!(removed.template_id().as_str(), "golem");
        assert!(!deck.contains(middle));
        assert!(deck.remove(middle).is_none());
        assert_eq!(deck.len(), 2);
    }
}
