//! Swimlane - element model and structural rules for BPMN diagram editors.
//!
//! Element kinds are registered once at startup into a kind registry that
//! fixes each kind's role, base shape and capabilities. Diagrams are built
//! from elements of those kinds. Behavior is decided by capability checks
//! and classification predicates, never by inspecting concrete types, and
//! structural mutations enforce the pool, lane, boundary event and label
//! rules of BPMN.

pub mod builtin;
pub mod classify;
pub mod config;
pub mod model;
pub mod structure;

mod error;

pub use swimlane_core::{capability, geometry, identifier, kind, registry};

pub use error::{AttachmentRule, KindUse, ModelError, SwimlaneError};
pub use model::{Diagram, Edge, Element, has_capability};
pub use structure::Deletion;

use std::rc::Rc;

use log::{debug, info};

use swimlane_core::{
    identifier::Id,
    kind::KindDescriptor,
    registry::{KindRegistry, KindRegistryBuilder, RegistryError},
};

use config::AppConfig;

/// Builder for the kind registry and diagrams.
///
/// # Examples
///
/// ```rust
/// use swimlane::{DiagramBuilder, builtin::kinds, config::AppConfig, geometry::Bounds};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let mut diagram = builder.new_diagram().expect("built-in kinds register");
///
/// let pool = diagram
///     .create_element(kinds::POOL, None, Bounds::default())
///     .expect("pools live at the root");
/// assert_eq!(diagram.pools(), vec![pool]);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registers every configured kind and seals the registry.
    ///
    /// Kinds are registered in order: the built-in table (unless disabled),
    /// then custom kinds. Overrides adjust capabilities before registration.
    ///
    /// # Errors
    ///
    /// Returns `SwimlaneError::Registry` for duplicate kinds, conflicting
    /// label modes or overrides naming an unknown kind.
    pub fn build_registry(&self) -> Result<KindRegistry, SwimlaneError> {
        let registry_config = self.config.registry();

        let mut table: Vec<KindDescriptor> = Vec::new();
        if registry_config.builtin() {
            table.extend(builtin::builtin_kinds());
        }
        table.extend(registry_config.kinds().iter().map(|kind| kind.to_descriptor()));

        for kind_override in registry_config.overrides() {
            let kind_id = Id::new(kind_override.kind());
            let descriptor = table
                .iter_mut()
                .find(|descriptor| descriptor.kind_id() == kind_id)
                .ok_or(RegistryError::UnknownKind(kind_id))?;
            *descriptor = descriptor
                .clone()
                .with_capabilities(kind_override.apply(descriptor.capabilities()));
            debug!(kind_id:% = kind_id, capabilities:% = descriptor.capabilities(); "Override applied");
        }

        let mut builder = KindRegistryBuilder::new();
        for descriptor in table {
            builder.register(descriptor)?;
        }
        Ok(builder.seal())
    }

    /// Creates an empty diagram over a freshly built registry.
    pub fn new_diagram(&self) -> Result<Diagram, SwimlaneError> {
        let registry = Rc::new(self.build_registry()?);
        info!(kinds = registry.len(); "Diagram created");
        Ok(Diagram::with_label_config(
            registry,
            self.config.labels().clone(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    /// An empty diagram over the built-in kind table.
    pub fn builtin_diagram() -> Diagram {
        DiagramBuilder::default()
            .new_diagram()
            .expect("built-in kinds register")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builtin::kinds,
        capability::CapabilityFlag,
        config::{KindConfig, OverrideConfig, RegistryConfig},
        kind::{BaseShape, ElementRole},
    };

    fn builder(registry: RegistryConfig) -> DiagramBuilder {
        DiagramBuilder::new(AppConfig::new(registry, Default::default()))
    }

    #[test]
    fn test_default_builder_registers_builtin_kinds() {
        let registry = DiagramBuilder::default().build_registry().unwrap();

        assert_eq!(registry.len(), builtin::builtin_kinds().len());
        assert!(registry.contains(kinds::USER_TASK));
        assert!(registry.contains(kinds::SEQUENCE_FLOW));
    }

    #[test]
    fn test_custom_kind_and_override() {
        let custom = KindConfig::new(
            "callActivity",
            ElementRole::Task,
            BaseShape::Rectangular,
            vec![CapabilityFlag::Movable, CapabilityFlag::Connectable],
        );
        let pool_override =
            OverrideConfig::new(kinds::POOL, vec![CapabilityFlag::Movable], vec![]);
        let registry = builder(RegistryConfig::new(true, vec![custom], vec![pool_override]))
            .build_registry()
            .unwrap();

        let call = registry.lookup("callActivity").unwrap();
        assert_eq!(call.role(), ElementRole::Task);
        assert!(call.has_capability(CapabilityFlag::Connectable));
        assert!(!call.has_capability(CapabilityFlag::Deletable));
        assert!(
            registry
                .lookup(kinds::POOL)
                .unwrap()
                .has_capability(CapabilityFlag::Movable)
        );
    }

    #[test]
    fn test_override_of_unknown_kind_fails() {
        let ghost = OverrideConfig::new("ghost", vec![], vec![CapabilityFlag::Movable]);
        let err = builder(RegistryConfig::new(true, vec![], vec![ghost]))
            .build_registry()
            .unwrap_err();

        assert!(matches!(
            err,
            SwimlaneError::Registry(RegistryError::UnknownKind(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_custom_kind_cannot_shadow_builtin() {
        let shadow = KindConfig::new(
            kinds::TASK,
            ElementRole::Task,
            BaseShape::Rectangular,
            vec![],
        );
        let err = builder(RegistryConfig::new(true, vec![shadow], vec![]))
            .build_registry()
            .unwrap_err();

        assert!(matches!(
            err,
            SwimlaneError::Registry(RegistryError::DuplicateKind(id)) if id == kinds::TASK
        ));
    }

    #[test]
    fn test_builtin_table_can_be_disabled() {
        let registry = builder(RegistryConfig::new(false, vec![], vec![]))
            .build_registry()
            .unwrap();

        assert!(registry.is_empty());
    }
}
