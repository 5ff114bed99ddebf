//! Card registry and factory.
//!
//! The `CardRegistry` stores the templates available to a game and owns the
//! `IdGenerator` that stamps every new instance. It implements
//! `CardFactory`, the only capability the rules engine needs from the card
//! catalog.

use rustc_hash::FxHashMap;
use tracing::{error, warn};

use super::definition::{CardTemplate, TemplateId};
use super::instance::Card;
use crate::core::entity::IdGenerator;

/// Produces card instances from template ids.
pub trait CardFactory {
    /// Create a new instance of `template`, with a fresh instance id.
    ///
    /// Returns `None` if the template is unknown or no fresh id is left.
    fn create_card(&mut self, template: &TemplateId) -> Option<Card>;
}

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use crystal_duel::cards::{CardFactory, CardRegistry, CardTemplate, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::resource("crystal", "Crystal Shard"));
///
/// let a = registry.create_card(&TemplateId::new("crystal")).unwrap();
/// let b = registry.create_card(&TemplateId::new("crystal")).unwrap();
/// assert_ne!(a.instance_id(), b.instance_id());
///
/// assert!(registry.create_card(&TemplateId::new("missing")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    templates: FxHashMap<TemplateId, CardTemplate>,
    ids: IdGenerator,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry using the given id generator.
    #[must_use]
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            templates: FxHashMap::default(),
            ids,
        }
    }

    /// The reference card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(
            CardTemplate::resource("crystal", "Crystal Shard").with_text("Generates 1 crystal per turn."),
        );
        registry.register(
            CardTemplate::challenger("kaelen", "Kaelen, Arcane Edge", 3, 4, 3, "Attacker")
                .with_text("Ethereal Strike: +1 damage when attacking a defender with less attack."),
        );
        registry.register(
            CardTemplate::challenger("golem", "Steam Golem VII", 4, 2, 6, "Defender")
                .with_text("Reinforced Plating: takes 1 less damage."),
        );
        registry.register(
            CardTemplate::challenger("sylph", "Sylph, the Whispering", 2, 1, 2, "Controller")
                .with_text("Protective Winds (1 crystal): protect an ally until your next turn."),
        );
        registry.register(
            CardTemplate::challenger("roric", "Inquisitor Roric", 3, 3, 3, "Anti-Magic")
                .with_text("Seal of Silence: on entry, silence an enemy until their next turn."),
        );
        registry.register(
            CardTemplate::challenger("stalker", "Shadow Stalker", 2, 3, 1, "Stealth")
                .with_text("Ambush: cannot be attacked unless it attacked."),
        );
        registry.register(
            CardTemplate::support("potion", "Healing Potion", 1).with_text("Restore 3 health to a unit."),
        );

        registry
    }

    /// Register a template.
    ///
    /// Panics if a template with the same id already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.id) {
            panic!("Template {} already registered", template.id);
        }
        self.templates.insert(template.id.clone(), template);
    }

    /// Get a template by id.
    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&CardTemplate> {
        self.templates.get(id)
    }

    /// Check if a template id is registered.
    #[must_use]
    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }

    /// The id generator stamping new instances.
    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }
}

impl CardFactory for CardRegistry {
    fn create_card(&mut self, template: &TemplateId) -> Option<Card> {
        let Some(found) = self.templates.get(template) else {
            warn!(%template, "unknown card template");
            return None;
        };
        let Some(id) = self.ids.next_id() else {
            error!(%template, "instance ids exhausted");
            return None;
        };
        Some(found.instantiate(id))
    }
}
