//! Error types for Swimlane operations.
//!
//! - [`ModelError`] is returned by every diagram query and mutation that can
//!   fail. A rejected mutation never leaves the diagram partially changed.
//! - [`SwimlaneError`] is the top-level error of the bootstrap facade and the
//!   CLI; it wraps model and registry errors together with I/O and
//!   configuration failures.

use std::{fmt, io};

use thiserror::Error;

use swimlane_core::{capability::CapabilityFlag, identifier::Id, registry::RegistryError};

/// The structural rule an attachment request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentRule {
    /// An element cannot be placed inside itself or one of its descendants.
    Cycle,
    /// Lanes live only inside pools.
    LaneOutsidePool,
    /// Pools are top-level containers.
    PoolNotTopLevel,
    /// Boundary events attach only to tasks.
    BoundaryHostNotTask,
    /// Boundary events cannot be left without a host.
    BoundaryEventDetached,
    /// Flow nodes live only in pools, lanes or the diagram root.
    NotAContainer,
    /// Labels have no children.
    InsideLabel,
    /// Independent labels move with their owner and are never reparented directly.
    LabelFollowsOwner,
    /// Independent labels are created through their owner.
    LabelWithoutOwner,
    /// The owner's kind does not use an independent label.
    LabelOwnerNotLabelled,
    /// The owner already has an independent label.
    LabelAlreadyPresent,
    /// Both edge endpoints must be connectable.
    EndpointNotConnectable,
}

impl fmt::Display for AttachmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AttachmentRule::Cycle => "an element cannot contain itself",
            AttachmentRule::LaneOutsidePool => "a lane must be placed inside a pool",
            AttachmentRule::PoolNotTopLevel => "a pool cannot be nested",
            AttachmentRule::BoundaryHostNotTask => "a boundary event must be attached to a task",
            AttachmentRule::BoundaryEventDetached => "a boundary event cannot be detached from its host",
            AttachmentRule::NotAContainer => "the target is not a pool or a lane",
            AttachmentRule::InsideLabel => "a label cannot contain other elements",
            AttachmentRule::LabelFollowsOwner => "an independent label always follows its owner",
            AttachmentRule::LabelWithoutOwner => "an independent label needs an owner",
            AttachmentRule::LabelOwnerNotLabelled => "the owner does not use an independent label",
            AttachmentRule::LabelAlreadyPresent => "the owner already has an independent label",
            AttachmentRule::EndpointNotConnectable => "the endpoint is not connectable",
        };
        f.write_str(reason)
    }
}

/// How a kind was expected to be used when it turned out to be unsuitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindUse {
    Node,
    Edge,
    Event,
    Label,
}

impl fmt::Display for KindUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usage = match self {
            KindUse::Node => "a node",
            KindUse::Edge => "an edge",
            KindUse::Event => "an event",
            KindUse::Label => "a label",
        };
        f.write_str(usage)
    }
}

/// Errors returned by [`Diagram`](crate::model::Diagram) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid attachment of `{element}`: {reason}")]
    InvalidAttachment {
        element: Id,
        target: Option<Id>,
        reason: AttachmentRule,
    },

    #[error("unknown element `{0}`")]
    UnknownElement(Id),

    #[error("unknown edge `{0}`")]
    UnknownEdge(Id),

    #[error("`{element}` is not {flag}")]
    MissingCapability { element: Id, flag: CapabilityFlag },

    #[error("element kind `{kind_id}` cannot be used as {expected}")]
    KindMismatch { kind_id: Id, expected: KindUse },

    #[error("subtype `{subtype}` conflicts with the fixed subtype `{fixed}` of element kind `{kind_id}`")]
    SubtypeConflict { kind_id: Id, subtype: Id, fixed: Id },
}

impl ModelError {
    pub(crate) fn attachment(element: Id, target: Option<Id>, reason: AttachmentRule) -> Self {
        Self::InvalidAttachment {
            element,
            target,
            reason,
        }
    }

    /// Returns true for structural-rule rejections.
    pub fn is_invalid_attachment(&self) -> bool {
        matches!(self, Self::InvalidAttachment { .. })
    }

    /// Returns the violated rule for structural-rule rejections.
    pub fn attachment_rule(&self) -> Option<AttachmentRule> {
        match self {
            Self::InvalidAttachment { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// The main error type for Swimlane bootstrap and tooling.
#[derive(Debug, Error)]
pub enum SwimlaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attachment_message() {
        let err = ModelError::attachment(
            Id::new("lane_2"),
            Some(Id::new("task_1")),
            AttachmentRule::LaneOutsidePool,
        );

        assert_eq!(
            err.to_string(),
            "invalid attachment of `lane_2`: a lane must be placed inside a pool"
        );
        assert!(err.is_invalid_attachment());
        assert_eq!(err.attachment_rule(), Some(AttachmentRule::LaneOutsidePool));
    }

    #[test]
    fn test_registry_error_is_transparent() {
        let err: ModelError = RegistryError::UnknownKind(Id::new("ghost")).into();

        assert_eq!(err.to_string(), "unknown element kind `ghost`");
        assert!(!err.is_invalid_attachment());
        assert_eq!(err.attachment_rule(), None);
    }

    #[test]
    fn test_missing_capability_message() {
        let err = ModelError::MissingCapability {
            element: Id::new("lane_0"),
            flag: CapabilityFlag::Movable,
        };

        assert_eq!(err.to_string(), "`lane_0` is not movable");
    }

    #[test]
    fn test_subtype_conflict_message() {
        let err = ModelError::SubtypeConflict {
            kind_id: Id::new("boundaryEvent"),
            subtype: Id::new("timer"),
            fixed: Id::new("boundaryEvent"),
        };

        assert_eq!(
            err.to_string(),
            "subtype `timer` conflicts with the fixed subtype `boundaryEvent` of element kind `boundaryEvent`"
        );
    }

    #[test]
    fn test_swimlane_error_wraps_model_error() {
        let err: SwimlaneError = ModelError::UnknownElement(Id::new("x")).into();
        assert_eq!(err.to_string(), "Model error: unknown element `x`");
    }
}
