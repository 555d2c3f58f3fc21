//! The built-in BPMN kind table.
//!
//! Every kind id a BPMN editor works with, grouped by role. Flow node kinds of
//! the same role share one capability set; pools and lanes carry the
//! per-kind adjustments of the editor (a pool is never dragged, a lane is
//! neither dragged nor selected on its own).

use swimlane_core::{
    capability::{Capabilities, CapabilityFlag},
    identifier::Id,
    kind::{BOUNDARY_EVENT, BaseShape, EdgeRole, ElementRole, KindDescriptor},
};

/// Kind ids of the built-in table.
pub mod kinds {
    pub const TASK: &str = "task";
    pub const MANUAL_TASK: &str = "manualTask";
    pub const USER_TASK: &str = "userTask";
    pub const SCRIPT_TASK: &str = "scriptTask";
    pub const BUSINESS_RULE_TASK: &str = "businessRuleTask";
    pub const SERVICE_TASK: &str = "serviceTask";
    pub const SEND_TASK: &str = "sendTask";
    pub const RECEIVE_TASK: &str = "receiveTask";

    pub const START_EVENT: &str = "startEvent";
    pub const END_EVENT: &str = "endEvent";
    pub const INTERMEDIATE_CATCH_EVENT: &str = "intermediateCatchEvent";
    pub const INTERMEDIATE_THROW_EVENT: &str = "intermediateThrowEvent";
    pub const BOUNDARY_EVENT: &str = "boundaryEvent";

    pub const EXCLUSIVE_GATEWAY: &str = "exclusiveGateway";
    pub const INCLUSIVE_GATEWAY: &str = "inclusiveGateway";
    pub const PARALLEL_GATEWAY: &str = "parallelGateway";
    pub const EVENT_BASED_GATEWAY: &str = "eventBasedGateway";
    pub const COMPLEX_GATEWAY: &str = "complexGateway";

    pub const DATA_OBJECT: &str = "dataObject";
    pub const MESSAGE: &str = "message";
    pub const TEXT_ANNOTATION: &str = "textAnnotation";

    pub const POOL: &str = "pool";
    pub const LANE: &str = "lane";

    pub const LABEL: &str = "BPMNLabel";
    pub const HEADING: &str = "label:heading";
    pub const COMPARTMENT: &str = "comp:comp";
    pub const POOL_HEADER: &str = "pool_header";
    pub const LANE_HEADER: &str = "lane_header";
    pub const CONTAINER: &str = "container";
    pub const ICON: &str = "icon";
    pub const TEXT_NODE: &str = "bpmn-text-node";
    pub const LANE_DIVIDER: &str = "lane-divider";

    pub const SEQUENCE_FLOW: &str = "sequenceFlow";
    pub const MESSAGE_FLOW: &str = "messageFlow";
    pub const ASSOCIATION: &str = "association";
}

const FLOW_NODE_CAPS: Capabilities = Capabilities::CONNECTABLE
    .union(Capabilities::DELETABLE)
    .union(Capabilities::SELECTABLE)
    .union(Capabilities::BOUNDS_AWARE)
    .union(Capabilities::MOVABLE)
    .union(Capabilities::CONTAINER_LAYOUT)
    .union(Capabilities::FADEABLE)
    .union(Capabilities::HOVER_FEEDBACK);

const LABELLED_FLOW_NODE_CAPS: Capabilities = FLOW_NODE_CAPS
    .union(Capabilities::POPUP_CAPABLE)
    .union(Capabilities::NAMEABLE)
    .union(Capabilities::INDEPENDENT_LABEL);

const MESSAGE_CAPS: Capabilities = FLOW_NODE_CAPS
    .union(Capabilities::POPUP_CAPABLE)
    .union(Capabilities::INDEPENDENT_LABEL);

const TEXT_ANNOTATION_CAPS: Capabilities = FLOW_NODE_CAPS.union(Capabilities::POPUP_CAPABLE);

const CONTAINER_CAPS: Capabilities = Capabilities::DELETABLE
    .union(Capabilities::SELECTABLE)
    .union(Capabilities::BOUNDS_AWARE)
    .union(Capabilities::MOVABLE)
    .union(Capabilities::CONTAINER_LAYOUT)
    .union(Capabilities::FADEABLE)
    .union(Capabilities::HOVER_FEEDBACK)
    .union(Capabilities::POPUP_CAPABLE)
    .union(Capabilities::NAMEABLE)
    .union(Capabilities::EDITABLE_LABEL);

const LABEL_CAPS: Capabilities = Capabilities::SELECTABLE
    .union(Capabilities::MOVABLE)
    .union(Capabilities::CONTAINER_LAYOUT)
    .union(Capabilities::HOVER_FEEDBACK);

const HEADING_CAPS: Capabilities = Capabilities::BOUNDS_AWARE
    .union(Capabilities::FADEABLE)
    .union(Capabilities::EDITABLE_LABEL);

const PART_CAPS: Capabilities = Capabilities::BOUNDS_AWARE
    .union(Capabilities::CONTAINER_LAYOUT)
    .union(Capabilities::FADEABLE);

const LANE_DIVIDER_CAPS: Capabilities = Capabilities::BOUNDS_AWARE
    .union(Capabilities::MOVABLE)
    .union(Capabilities::SELECTABLE)
    .union(Capabilities::HOVER_FEEDBACK);

const EDGE_CAPS: Capabilities = Capabilities::DELETABLE
    .union(Capabilities::SELECTABLE)
    .union(Capabilities::FADEABLE)
    .union(Capabilities::HOVER_FEEDBACK);

fn descriptor(
    kind_id: &str,
    role: ElementRole,
    shape: BaseShape,
    capabilities: Capabilities,
) -> KindDescriptor {
    KindDescriptor::new(Id::new(kind_id), role, shape, capabilities)
}

/// Returns the built-in kind table in registration order.
pub fn builtin_kinds() -> Vec<KindDescriptor> {
    let mut table = Vec::new();

    for kind_id in [
        kinds::TASK,
        kinds::MANUAL_TASK,
        kinds::USER_TASK,
        kinds::SCRIPT_TASK,
        kinds::BUSINESS_RULE_TASK,
        kinds::SERVICE_TASK,
        kinds::SEND_TASK,
        kinds::RECEIVE_TASK,
    ] {
        table.push(descriptor(
            kind_id,
            ElementRole::Task,
            BaseShape::Rectangular,
            FLOW_NODE_CAPS,
        ));
    }

    for kind_id in [
        kinds::START_EVENT,
        kinds::END_EVENT,
        kinds::INTERMEDIATE_CATCH_EVENT,
        kinds::INTERMEDIATE_THROW_EVENT,
    ] {
        table.push(descriptor(
            kind_id,
            ElementRole::Event,
            BaseShape::Circular,
            LABELLED_FLOW_NODE_CAPS,
        ));
    }
    table.push(
        descriptor(
            kinds::BOUNDARY_EVENT,
            ElementRole::Event,
            BaseShape::Circular,
            LABELLED_FLOW_NODE_CAPS,
        )
        .with_default_subtype(Id::new(BOUNDARY_EVENT)),
    );

    for kind_id in [
        kinds::EXCLUSIVE_GATEWAY,
        kinds::INCLUSIVE_GATEWAY,
        kinds::PARALLEL_GATEWAY,
        kinds::EVENT_BASED_GATEWAY,
        kinds::COMPLEX_GATEWAY,
    ] {
        table.push(descriptor(
            kind_id,
            ElementRole::Gateway,
            BaseShape::Diamond,
            LABELLED_FLOW_NODE_CAPS,
        ));
    }

    table.push(descriptor(
        kinds::DATA_OBJECT,
        ElementRole::DataObject,
        BaseShape::Rectangular,
        LABELLED_FLOW_NODE_CAPS,
    ));
    table.push(descriptor(
        kinds::MESSAGE,
        ElementRole::Message,
        BaseShape::Rectangular,
        MESSAGE_CAPS,
    ));
    table.push(descriptor(
        kinds::TEXT_ANNOTATION,
        ElementRole::TextAnnotation,
        BaseShape::Rectangular,
        TEXT_ANNOTATION_CAPS,
    ));

    table.push(descriptor(
        kinds::POOL,
        ElementRole::Pool,
        BaseShape::Rectangular,
        CONTAINER_CAPS.with_overrides([], [CapabilityFlag::Movable]),
    ));
    table.push(descriptor(
        kinds::LANE,
        ElementRole::Lane,
        BaseShape::Rectangular,
        CONTAINER_CAPS.with_overrides([], [CapabilityFlag::Movable, CapabilityFlag::Selectable]),
    ));

    table.push(descriptor(
        kinds::LABEL,
        ElementRole::Label,
        BaseShape::Rectangular,
        LABEL_CAPS,
    ));
    table.push(descriptor(
        kinds::HEADING,
        ElementRole::Heading,
        BaseShape::Freeform,
        HEADING_CAPS,
    ));
    for kind_id in [kinds::COMPARTMENT, kinds::POOL_HEADER, kinds::LANE_HEADER, kinds::CONTAINER] {
        table.push(descriptor(
            kind_id,
            ElementRole::Compartment,
            BaseShape::Rectangular,
            PART_CAPS,
        ));
    }
    table.push(descriptor(kinds::ICON, ElementRole::Icon, BaseShape::Rectangular, PART_CAPS));
    table.push(descriptor(
        kinds::TEXT_NODE,
        ElementRole::TextNode,
        BaseShape::Freeform,
        Capabilities::BOUNDS_AWARE,
    ));
    table.push(descriptor(
        kinds::LANE_DIVIDER,
        ElementRole::LaneDivider,
        BaseShape::Freeform,
        LANE_DIVIDER_CAPS,
    ));

    for (kind_id, role) in [
        (kinds::SEQUENCE_FLOW, EdgeRole::SequenceFlow),
        (kinds::MESSAGE_FLOW, EdgeRole::MessageFlow),
        (kinds::ASSOCIATION, EdgeRole::Association),
    ] {
        table.push(descriptor(
            kind_id,
            ElementRole::Edge(role),
            BaseShape::Freeform,
            EDGE_CAPS,
        ));
    }

    table
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn find(kind_id: &str) -> KindDescriptor {
        builtin_kinds()
            .into_iter()
            .find(|kind| kind.kind_id() == kind_id)
            .unwrap_or_else(|| panic!("built-in kind `{kind_id}` is missing"))
    }

    #[test]
    fn test_kind_ids_are_unique() {
        let table = builtin_kinds();
        let ids: HashSet<Id> = table.iter().map(|kind| kind.kind_id()).collect();
        assert_eq!(ids.len(), table.len());
    }

    #[test]
    fn test_no_kind_has_conflicting_label_modes() {
        for kind in builtin_kinds() {
            assert!(
                !kind.capabilities().has_conflicting_label_modes(),
                "{kind} declares both label modes"
            );
        }
    }

    #[test]
    fn test_task_capabilities() {
        let task = find(kinds::SERVICE_TASK);

        assert_eq!(task.role(), ElementRole::Task);
        assert!(task.has_capability(CapabilityFlag::Movable));
        assert!(task.has_capability(CapabilityFlag::Connectable));
        assert!(!task.has_capability(CapabilityFlag::IndependentLabel));
        assert!(!task.has_capability(CapabilityFlag::EditableLabel));
    }

    #[test]
    fn test_independent_label_set() {
        let labelled: HashSet<ElementRole> = builtin_kinds()
            .into_iter()
            .filter(|kind| kind.has_capability(CapabilityFlag::IndependentLabel))
            .map(|kind| kind.role())
            .collect();

        let expected: HashSet<ElementRole> = [
            ElementRole::Event,
            ElementRole::Gateway,
            ElementRole::DataObject,
            ElementRole::Message,
        ]
        .into_iter()
        .collect();
        assert_eq!(labelled, expected);
    }

    #[test]
    fn test_container_adjustments() {
        let pool = find(kinds::POOL);
        let lane = find(kinds::LANE);

        assert!(!pool.has_capability(CapabilityFlag::Movable));
        assert!(pool.has_capability(CapabilityFlag::Selectable));
        assert!(pool.has_capability(CapabilityFlag::EditableLabel));
        assert!(!lane.has_capability(CapabilityFlag::Movable));
        assert!(!lane.has_capability(CapabilityFlag::Selectable));
        assert!(lane.has_capability(CapabilityFlag::Deletable));
    }

    #[test]
    fn test_boundary_event_defaults_subtype() {
        let boundary = find(kinds::BOUNDARY_EVENT);

        assert_eq!(boundary.role(), ElementRole::Event);
        assert_eq!(boundary.default_subtype(), Some(Id::new(BOUNDARY_EVENT)));
        assert_eq!(find(kinds::START_EVENT).default_subtype(), None);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(find(kinds::END_EVENT).base_shape(), BaseShape::Circular);
        assert_eq!(find(kinds::PARALLEL_GATEWAY).base_shape(), BaseShape::Diamond);
        assert_eq!(find(kinds::MESSAGE_FLOW).base_shape(), BaseShape::Freeform);
    }
}
