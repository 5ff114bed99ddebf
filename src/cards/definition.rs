//! Card templates - static card data.
//!
//! `CardTemplate` holds the attributes every instance of a card shares:
//! name, cost, text, and the variant payload (base stats for units).
//! Runtime state such as damage, readiness, and zone lives on `Card`.

use serde::{Deserialize, Serialize};

use super::instance::{Card, CardKind, Challenger};
use crate::core::config::CardType;
use crate::core::entity::InstanceId;

/// Content key identifying a card template (e.g. `"kaelen"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-specific static attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
    Resource,
    Challenger {
        attack: i32,
        health: i32,
        role: String,
    },
    Support,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use crystal_duel::cards::CardTemplate;
/// use crystal_duel::core::{CardType, InstanceId};
///
/// let golem = CardTemplate::challenger("golem", "Steam Golem VII", 4, 2, 6, "Defender")
///     .with_text("Reinforced plating.");
///
/// let card = golem.instantiate(InstanceId(9));
/// assert_eq!(card.card_type(), CardType::Challenger);
/// assert_eq!(card.cost(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Content key.
    pub id: TemplateId,

    /// Display name.
    pub name: String,

    /// Crystal cost to play.
    pub cost: u32,

    /// Descriptive text (flavor only).
    pub text: String,

    /// Variant payload.
    pub kind: TemplateKind,
}

impl CardTemplate {
    /// A resource template. Resources always cost 0.
    #[must_use]
    pub fn resource(id: impl Into<TemplateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: 0,
            text: String::new(),
            kind: TemplateKind::Resource,
        }
    }

    /// A unit template.
    #[must_use]
    pub fn challenger(
        id: impl Into<TemplateId>,
        name: impl Into<String>,
        cost: u32,
        attack: i32,
        health: i32,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            text: String::new(),
            kind: TemplateKind::Challenger {
                attack,
                health,
                role: role.into(),
            },
        }
    }

    /// A support template.
    #[must_use]
    pub fn support(id: impl Into<TemplateId>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            text: String::new(),
            kind: TemplateKind::Support,
        }
    }

    /// Set the descriptive text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The card type this template produces.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            TemplateKind::Resource => CardType::Resource,
            TemplateKind::Challenger { .. } => CardType::Challenger,
            TemplateKind::Support => CardType::Support,
        }
    }

    /// Build a fresh instance carrying `instance_id`.
    ///
    /// The new card has no zone and no owner yet.
    #[must_use]
    pub fn instantiate(&self, instance_id: InstanceId) -> Card {
        let kind = match &self.kind {
            TemplateKind::Resource => CardKind::Resource,
            TemplateKind::Challenger { attack, health, role } => {
                CardKind::Challenger(Challenger::new(*attack, *health, role.clone()))
            }
            TemplateKind::Support => CardKind::Support,
        };

        Card::new(
            self.id.clone(),
            instance_id,
            self.name.clone(),
            self.cost,
            self.text.clone(),
            kind,
        )
    }
}
