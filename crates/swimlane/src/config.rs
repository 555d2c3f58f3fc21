//! Configuration types for Swimlane bootstrap.
//!
//! This module provides the configuration structures that control which
//! element kinds get registered and how independent labels are placed. All
//! types implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining registry and label settings.
//! - [`RegistryConfig`] - Built-in kind table toggle, custom kinds and capability overrides.
//! - [`LabelConfig`] - Kind and placement of newly created independent labels.
//!
//! # Example
//!
//! ```
//! # use swimlane::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.registry().builtin());
//! assert_eq!(config.labels().kind(), "BPMNLabel");
//! ```

use serde::Deserialize;

use swimlane_core::{
    capability::{Capabilities, CapabilityFlag},
    identifier::Id,
    kind::{BaseShape, ElementRole, KindDescriptor},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Kind registry section.
    #[serde(default)]
    registry: RegistryConfig,

    /// Independent label section.
    #[serde(default)]
    labels: LabelConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(registry: RegistryConfig, labels: LabelConfig) -> Self {
        Self { registry, labels }
    }

    /// Returns the registry configuration.
    pub fn registry(&self) -> &RegistryConfig {
        &self.registry
    }

    /// Returns the label configuration.
    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }
}

/// Which kinds are registered at bootstrap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Register the built-in BPMN kind table.
    builtin: bool,

    /// Additional kinds registered after the built-in ones.
    kinds: Vec<KindConfig>,

    /// Capability adjustments applied before registration.
    overrides: Vec<OverrideConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            kinds: Vec::new(),
            overrides: Vec::new(),
        }
    }
}

impl RegistryConfig {
    pub fn new(builtin: bool, kinds: Vec<KindConfig>, overrides: Vec<OverrideConfig>) -> Self {
        Self {
            builtin,
            kinds,
            overrides,
        }
    }

    pub fn builtin(&self) -> bool {
        self.builtin
    }

    pub fn kinds(&self) -> &[KindConfig] {
        &self.kinds
    }

    pub fn overrides(&self) -> &[OverrideConfig] {
        &self.overrides
    }
}

/// A custom kind declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KindConfig {
    id: String,
    role: ElementRole,
    #[serde(default)]
    shape: BaseShape,
    #[serde(default)]
    capabilities: Vec<CapabilityFlag>,
    #[serde(default)]
    default_subtype: Option<String>,
}

impl KindConfig {
    pub fn new(
        id: impl Into<String>,
        role: ElementRole,
        shape: BaseShape,
        capabilities: Vec<CapabilityFlag>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            shape,
            capabilities,
            default_subtype: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Builds the descriptor this entry declares.
    pub fn to_descriptor(&self) -> KindDescriptor {
        let descriptor = KindDescriptor::new(
            Id::new(&self.id),
            self.role,
            self.shape,
            Capabilities::from_flags(self.capabilities.iter().copied()),
        );
        match &self.default_subtype {
            Some(subtype) => descriptor.with_default_subtype(Id::new(subtype)),
            None => descriptor,
        }
    }
}

/// Enables and disables individual capabilities of an existing kind.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideConfig {
    kind: String,
    #[serde(default)]
    enable: Vec<CapabilityFlag>,
    #[serde(default)]
    disable: Vec<CapabilityFlag>,
}

impl OverrideConfig {
    pub fn new(
        kind: impl Into<String>,
        enable: Vec<CapabilityFlag>,
        disable: Vec<CapabilityFlag>,
    ) -> Self {
        Self {
            kind: kind.into(),
            enable,
            disable,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Applies the override to a capability set.
    pub fn apply(&self, capabilities: Capabilities) -> Capabilities {
        capabilities.with_overrides(self.enable.iter().copied(), self.disable.iter().copied())
    }
}

/// Placement of newly created independent labels.
///
/// A new label is centred horizontally below its owner, `offset` units under
/// the owner's bottom edge.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    kind: String,
    offset: f32,
    width: f32,
    height: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            kind: "BPMNLabel".to_string(),
            offset: 5.0,
            width: 100.0,
            height: 20.0,
        }
    }
}

impl LabelConfig {
    /// The kind id used for new independent labels.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert!(config.registry().builtin());
        assert!(config.registry().kinds().is_empty());
        assert_eq!(config.labels().kind(), "BPMNLabel");
        assert_eq!(config.labels().offset(), 5.0);
    }

    #[test]
    fn test_full_document() {
        let source = r#"
            [registry]
            builtin = false

            [[registry.kinds]]
            id = "escalationTask"
            role = "task"
            shape = "rectangular"
            capabilities = ["movable", "connectable", "deletable"]

            [[registry.kinds]]
            id = "timerBoundary"
            role = "event"
            shape = "circular"
            capabilities = ["independent_label"]
            default_subtype = "boundaryEvent"

            [[registry.overrides]]
            kind = "escalationTask"
            disable = ["movable"]

            [labels]
            offset = 12.5
        "#;
        let config: AppConfig = toml::from_str(source).unwrap();

        assert!(!config.registry().builtin());
        assert_eq!(config.registry().kinds().len(), 2);
        assert_eq!(config.labels().offset(), 12.5);
        assert_eq!(config.labels().width(), 100.0);

        let task = config.registry().kinds()[0].to_descriptor();
        assert_eq!(task.role(), ElementRole::Task);
        assert_eq!(
            task.capabilities(),
            Capabilities::MOVABLE | Capabilities::CONNECTABLE | Capabilities::DELETABLE
        );

        let timer = config.registry().kinds()[1].to_descriptor();
        assert_eq!(timer.default_subtype(), Some(Id::new("boundaryEvent")));

        let adjusted = config.registry().overrides()[0].apply(task.capabilities());
        assert_eq!(adjusted, Capabilities::CONNECTABLE | Capabilities::DELETABLE);
    }

    #[test]
    fn test_unknown_capability_is_rejected() {
        let source = r#"
            [[registry.kinds]]
            id = "odd"
            role = "task"
            capabilities = ["levitating"]
        "#;

        assert!(toml::from_str::<AppConfig>(source).is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let source = r#"
            [[registry.kinds]]
            id = "odd"
            role = "swimlane"
        "#;

        assert!(toml::from_str::<AppConfig>(source).is_err());
    }
}
