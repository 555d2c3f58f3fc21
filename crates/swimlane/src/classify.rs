//! Classification predicates.
//!
//! Every predicate is a pure equality test on an element's immutable role
//! and, for sub-roles, its subtype tag. They never fail and never look at
//! geometry or structure. Exactly one base predicate holds for any element.

use swimlane_core::{
    capability::CapabilityFlag,
    kind::{BOUNDARY_EVENT, EdgeRole, ElementRole},
};

use crate::model::{Edge, Element};

pub fn is_task_node(element: &Element) -> bool {
    element.role() == ElementRole::Task
}

pub fn is_event_node(element: &Element) -> bool {
    element.role() == ElementRole::Event
}

pub fn is_gateway_node(element: &Element) -> bool {
    element.role() == ElementRole::Gateway
}

pub fn is_data_object_node(element: &Element) -> bool {
    element.role() == ElementRole::DataObject
}

pub fn is_message_node(element: &Element) -> bool {
    element.role() == ElementRole::Message
}

pub fn is_text_annotation_node(element: &Element) -> bool {
    element.role() == ElementRole::TextAnnotation
}

pub fn is_pool_node(element: &Element) -> bool {
    element.role() == ElementRole::Pool
}

pub fn is_lane_node(element: &Element) -> bool {
    element.role() == ElementRole::Lane
}

/// Independent caption elements.
pub fn is_label_node(element: &Element) -> bool {
    element.role() == ElementRole::Label
}

/// Header parts of pools and lanes.
pub fn is_heading(element: &Element) -> bool {
    element.role() == ElementRole::Heading
}

pub fn is_compartment(element: &Element) -> bool {
    element.role() == ElementRole::Compartment
}

pub fn is_icon(element: &Element) -> bool {
    element.role() == ElementRole::Icon
}

pub fn is_text_node(element: &Element) -> bool {
    element.role() == ElementRole::TextNode
}

pub fn is_lane_divider(element: &Element) -> bool {
    element.role() == ElementRole::LaneDivider
}

/// Pools and lanes.
pub fn is_container_node(element: &Element) -> bool {
    matches!(element.role(), ElementRole::Pool | ElementRole::Lane)
}

/// Elements carrying BPMN semantics of their own.
///
/// Lanes are deliberately excluded: a lane partitions its pool and resolves
/// to it through [`Diagram::semantic_node`](crate::model::Diagram::semantic_node).
pub fn is_bpmn_node(element: &Element) -> bool {
    is_flow_node(element) || is_pool_node(element)
}

/// Tasks, events, gateways, data objects and messages.
pub fn is_flow_node(element: &Element) -> bool {
    matches!(
        element.role(),
        ElementRole::Task
            | ElementRole::Event
            | ElementRole::Gateway
            | ElementRole::DataObject
            | ElementRole::Message
    )
}

/// Returns true if the element's kind captions through a separate label
/// element rather than an inline one.
pub fn is_bpmn_label_node(element: &Element) -> bool {
    element.has_capability(CapabilityFlag::IndependentLabel)
}

/// Returns true if the element edits its caption in place.
pub fn has_inline_label(element: &Element) -> bool {
    element.has_capability(CapabilityFlag::EditableLabel)
}

pub fn is_boundary_event(element: &Element) -> bool {
    is_event_node(element) && element.subtype().is_some_and(|tag| tag == BOUNDARY_EVENT)
}

/// Sub-parts that decorate another element: headings, compartments, icons,
/// text nodes and lane dividers.
pub fn is_node_part(element: &Element) -> bool {
    matches!(
        element.role(),
        ElementRole::Heading
            | ElementRole::Compartment
            | ElementRole::Icon
            | ElementRole::TextNode
            | ElementRole::LaneDivider
    )
}

pub fn is_sequence_flow(edge: &Edge) -> bool {
    edge.edge_role() == Some(EdgeRole::SequenceFlow)
}

pub fn is_message_flow(edge: &Edge) -> bool {
    edge.edge_role() == Some(EdgeRole::MessageFlow)
}

pub fn is_association(edge: &Edge) -> bool {
    edge.edge_role() == Some(EdgeRole::Association)
}

/// The base predicates in role order, paired with their names.
pub const BASE_PREDICATES: [(&str, fn(&Element) -> bool); 14] = [
    ("is_task_node", is_task_node),
    ("is_event_node", is_event_node),
    ("is_gateway_node", is_gateway_node),
    ("is_data_object_node", is_data_object_node),
    ("is_message_node", is_message_node),
    ("is_text_annotation_node", is_text_annotation_node),
    ("is_pool_node", is_pool_node),
    ("is_lane_node", is_lane_node),
    ("is_label_node", is_label_node),
    ("is_heading", is_heading),
    ("is_compartment", is_compartment),
    ("is_icon", is_icon),
    ("is_text_node", is_text_node),
    ("is_lane_divider", is_lane_divider),
];

/// The derived predicates paired with their names.
pub const DERIVED_PREDICATES: [(&str, fn(&Element) -> bool); 7] = [
    ("is_container_node", is_container_node),
    ("is_bpmn_node", is_bpmn_node),
    ("is_flow_node", is_flow_node),
    ("is_bpmn_label_node", is_bpmn_label_node),
    ("has_inline_label", has_inline_label),
    ("is_boundary_event", is_boundary_event),
    ("is_node_part", is_node_part),
];
