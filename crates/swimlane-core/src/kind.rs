//! Element kind descriptors.
//!
//! A [`KindDescriptor`] binds a kind id such as `userTask` to the semantic
//! [`ElementRole`] it plays, the [`BaseShape`] it is drawn with, and the
//! [`Capabilities`] every element of that kind gets. Many kind ids can share
//! one role: `task`, `userTask` and `serviceTask` are all [`ElementRole::Task`].

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    capability::{Capabilities, CapabilityFlag},
    identifier::Id,
};

/// The subtype tag marking an event that sits on a task's boundary.
pub const BOUNDARY_EVENT: &str = "boundaryEvent";

/// Base geometric category of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseShape {
    #[default]
    Rectangular,
    Circular,
    Diamond,
    Freeform,
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseShape::Rectangular => "rectangular",
            BaseShape::Circular => "circular",
            BaseShape::Diamond => "diamond",
            BaseShape::Freeform => "freeform",
        };
        f.write_str(name)
    }
}

/// The flavor of a connecting edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeRole {
    SequenceFlow,
    MessageFlow,
    Association,
}

/// The semantic family a kind belongs to.
///
/// Classification predicates compare this tag, never the shape or the
/// element's position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ElementRole {
    Task,
    Event,
    Gateway,
    DataObject,
    Message,
    TextAnnotation,
    Pool,
    Lane,
    /// A free-standing caption that belongs to another element.
    Label,
    /// An inline heading embedded in a node.
    Heading,
    /// A structural sub-part of a node (headers, compartments).
    Compartment,
    Icon,
    TextNode,
    LaneDivider,
    Edge(EdgeRole),
}

impl ElementRole {
    /// All roles, in declaration order.
    pub const ALL: [ElementRole; 17] = [
        ElementRole::Task,
        ElementRole::Event,
        ElementRole::Gateway,
        ElementRole::DataObject,
        ElementRole::Message,
        ElementRole::TextAnnotation,
        ElementRole::Pool,
        ElementRole::Lane,
        ElementRole::Label,
        ElementRole::Heading,
        ElementRole::Compartment,
        ElementRole::Icon,
        ElementRole::TextNode,
        ElementRole::LaneDivider,
        ElementRole::Edge(EdgeRole::SequenceFlow),
        ElementRole::Edge(EdgeRole::MessageFlow),
        ElementRole::Edge(EdgeRole::Association),
    ];

    /// Returns true for the roles that connect two elements.
    pub fn is_edge(self) -> bool {
        matches!(self, ElementRole::Edge(_))
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementRole::Task => "task",
            ElementRole::Event => "event",
            ElementRole::Gateway => "gateway",
            ElementRole::DataObject => "data_object",
            ElementRole::Message => "message",
            ElementRole::TextAnnotation => "text_annotation",
            ElementRole::Pool => "pool",
            ElementRole::Lane => "lane",
            ElementRole::Label => "label",
            ElementRole::Heading => "heading",
            ElementRole::Compartment => "compartment",
            ElementRole::Icon => "icon",
            ElementRole::TextNode => "text_node",
            ElementRole::LaneDivider => "lane_divider",
            ElementRole::Edge(EdgeRole::SequenceFlow) => "sequence_flow",
            ElementRole::Edge(EdgeRole::MessageFlow) => "message_flow",
            ElementRole::Edge(EdgeRole::Association) => "association",
        };
        f.write_str(name)
    }
}

/// Returned when a string does not name an [`ElementRole`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element role `{0}`")]
pub struct ParseRoleError(String);

impl FromStr for ElementRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementRole::ALL
            .into_iter()
            .find(|role| role.to_string() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

impl TryFrom<String> for ElementRole {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable description of one element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDescriptor {
    kind_id: Id,
    role: ElementRole,
    base_shape: BaseShape,
    capabilities: Capabilities,
    default_subtype: Option<Id>,
}

impl KindDescriptor {
    /// Create a new descriptor.
    pub fn new(
        kind_id: Id,
        role: ElementRole,
        base_shape: BaseShape,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            kind_id,
            role,
            base_shape,
            capabilities,
            default_subtype: None,
        }
    }

    /// Replaces the capability set before the descriptor is registered.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the subtype applied to elements created without one.
    pub fn with_default_subtype(mut self, subtype: Id) -> Self {
        self.default_subtype = Some(subtype);
        self
    }

    pub fn kind_id(&self) -> Id {
        self.kind_id
    }

    pub fn role(&self) -> ElementRole {
        self.role
    }

    pub fn base_shape(&self) -> BaseShape {
        self.base_shape
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn default_subtype(&self) -> Option<Id> {
        self.default_subtype
    }

    /// Returns true if the kind declares `flag`.
    pub fn has_capability(&self, flag: CapabilityFlag) -> bool {
        self.capabilities.contains_flag(flag)
    }
}

impl fmt::Display for KindDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.kind_id, self.role, self.base_shape)
    }
}
