//! Swimlane Core Types and Definitions
//!
//! This crate provides the foundational types for describing the graphical
//! element kinds of a BPMN diagram editor. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Capabilities**: Orthogonal behavior flags ([`capability`] module)
//! - **Kinds**: Immutable kind descriptors ([`kind`] module)
//! - **Registry**: The load-time kind table ([`registry`] module)

pub mod capability;
pub mod geometry;
pub mod identifier;
pub mod kind;
pub mod registry;
