//! Card system: templates, instances, and the card factory.
//!
//! ## Key Types
//!
//! - `TemplateId`: Content key shared by all instances of a template
//! - `CardTemplate`: Static card data
//! - `Card`: Runtime instance (identity, zone, owner, variant state)
//! - `CardKind` / `Challenger`: Variant payload and unit behaviour
//! - `CardRegistry` / `CardFactory`: Template lookup and instance creation

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardTemplate, TemplateId, TemplateKind};
pub use instance::{Card, CardKind, Challenger};
pub use registry::{CardFactory, CardRegistry};
