//! End-to-end checks of the structural rules over the built-in kind table.

use proptest::prelude::*;

use swimlane::{
    AttachmentRule, Diagram, DiagramBuilder, ModelError,
    builtin::{self, kinds},
    capability::CapabilityFlag,
    classify::{self, BASE_PREDICATES},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    kind::{BOUNDARY_EVENT, ElementRole},
};

fn diagram() -> Diagram {
    DiagramBuilder::default()
        .new_diagram()
        .expect("Failed to build diagram")
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
    Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
}

#[test]
fn test_task_scenario() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let task = diagram
        .create_child(pool, kinds::TASK, None, rect(50.0, 50.0, 100.0, 80.0))
        .unwrap();

    let element = diagram.element(task).unwrap();
    assert!(classify::is_task_node(element));
    assert!(!classify::is_event_node(element));
    for flag in [
        CapabilityFlag::Connectable,
        CapabilityFlag::Deletable,
        CapabilityFlag::Selectable,
        CapabilityFlag::Movable,
        CapabilityFlag::BoundsAware,
    ] {
        assert!(swimlane::has_capability(element, flag), "task lacks {flag}");
    }
}

#[test]
fn test_delete_pool_removes_lane_and_task() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let lane = diagram
        .create_child(pool, kinds::LANE, None, rect(30.0, 0.0, 470.0, 200.0))
        .unwrap();
    let task = diagram
        .create_child(lane, kinds::TASK, None, rect(50.0, 50.0, 100.0, 80.0))
        .unwrap();

    let deletion = diagram.delete(pool).unwrap();

    assert_eq!(deletion.elements(), &[pool, lane, task]);
    assert!(diagram.element(lane).is_none());
    assert!(diagram.element(task).is_none());
    assert!(diagram.pools().is_empty());
}

#[test]
fn test_boundary_event_scenario() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let lane = diagram
        .create_child(pool, kinds::LANE, None, rect(30.0, 0.0, 470.0, 200.0))
        .unwrap();
    let task = diagram
        .create_child(lane, kinds::TASK, None, rect(50.0, 50.0, 100.0, 80.0))
        .unwrap();
    let gateway = diagram
        .create_child(lane, kinds::EXCLUSIVE_GATEWAY, None, rect(250.0, 60.0, 50.0, 50.0))
        .unwrap();
    let boundary = diagram
        .attach_boundary_event(kinds::BOUNDARY_EVENT, task, rect(130.0, 110.0, 36.0, 36.0))
        .unwrap();
    let before = diagram.element(boundary).unwrap().bounds();

    let err = diagram.attach(boundary, gateway).unwrap_err();
    assert_eq!(
        err.attachment_rule(),
        Some(AttachmentRule::BoundaryHostNotTask)
    );
    assert_eq!(diagram.parent(boundary), Some(task));
    assert_eq!(diagram.element(boundary).unwrap().bounds(), before);

    let deletion = diagram.delete(task).unwrap();
    assert_eq!(deletion.elements(), &[task, boundary]);
    assert!(!diagram.contains(boundary));
}

#[test]
fn test_reparent_lane_under_task_is_rejected() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let lane = diagram
        .create_child(pool, kinds::LANE, None, rect(30.0, 0.0, 470.0, 100.0))
        .unwrap();
    let second = diagram
        .create_child(pool, kinds::LANE, None, rect(30.0, 100.0, 470.0, 100.0))
        .unwrap();
    let task = diagram
        .create_child(lane, kinds::TASK, None, rect(50.0, 10.0, 100.0, 80.0))
        .unwrap();

    let err = diagram.attach(second, task).unwrap_err();

    assert!(err.is_invalid_attachment());
    assert_eq!(diagram.parent(second), Some(pool));
    assert_eq!(diagram.lanes(pool), vec![lane, second]);
}

#[test]
fn test_delete_cascades_to_edges() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let start = diagram
        .create_child(pool, kinds::START_EVENT, None, rect(10.0, 10.0, 36.0, 36.0))
        .unwrap();
    let task = diagram
        .create_child(pool, kinds::TASK, None, rect(100.0, 10.0, 100.0, 80.0))
        .unwrap();
    let end = diagram
        .create_child(pool, kinds::END_EVENT, None, rect(300.0, 10.0, 36.0, 36.0))
        .unwrap();
    let first = diagram.connect(kinds::SEQUENCE_FLOW, start, task, None).unwrap();
    let second = diagram.connect(kinds::SEQUENCE_FLOW, task, end, None).unwrap();
    let note = diagram
        .create_child(pool, kinds::TEXT_ANNOTATION, None, rect(300.0, 100.0, 80.0, 40.0))
        .unwrap();
    let association = diagram.connect(kinds::ASSOCIATION, note, start, None).unwrap();

    let deletion = diagram.delete(task).unwrap();

    assert_eq!(deletion.edges(), &[first, second]);
    assert!(diagram.edge(association).is_some());
    assert_eq!(diagram.edges_of(start).count(), 1);
}

#[test]
fn test_resolver_through_labels_and_parts() {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .unwrap();
    let header = diagram
        .create_child(pool, kinds::POOL_HEADER, None, rect(0.0, 0.0, 30.0, 200.0))
        .unwrap();
    let heading = diagram
        .create_child(header, kinds::HEADING, None, rect(0.0, 0.0, 30.0, 200.0))
        .unwrap();
    let message = diagram
        .create_child(pool, kinds::MESSAGE, None, rect(100.0, 50.0, 40.0, 30.0))
        .unwrap();
    let label = diagram.create_label(message).unwrap();

    assert_eq!(diagram.semantic_node(heading), Some(pool));
    assert_eq!(diagram.semantic_node(label), Some(message));
}

#[test]
fn test_missing_elements_are_reported() {
    let mut diagram = diagram();
    let ghost = Id::new("ghost_0");

    assert_eq!(diagram.detach(ghost), Err(ModelError::UnknownElement(ghost)));
    assert_eq!(
        diagram.move_by(ghost, Point::new(1.0, 1.0)),
        Err(ModelError::UnknownElement(ghost))
    );
    assert!(diagram.children(ghost).is_empty());
    assert_eq!(diagram.label_of(ghost), None);
}

/// Builds an element of `kind` in a scratch diagram, trying the root, a pool
/// and a task as parent in that order.
fn element_of(kind: Id, boundary: bool) -> Option<(Diagram, Id)> {
    let mut diagram = diagram();
    let pool = diagram
        .create_element(kinds::POOL, None, rect(0.0, 0.0, 500.0, 200.0))
        .ok()?;
    let task = diagram
        .create_child(pool, kinds::TASK, None, rect(50.0, 50.0, 100.0, 80.0))
        .ok()?;
    let subtype = boundary.then_some(BOUNDARY_EVENT);
    let bounds = rect(60.0, 60.0, 20.0, 20.0);

    let id = [None, Some(pool), Some(task)]
        .into_iter()
        .find_map(|parent| match parent {
            Some(parent) => diagram.create_child(parent, kind, subtype, bounds).ok(),
            None => diagram.create_element(kind, subtype, bounds).ok(),
        })?;
    Some((diagram, id))
}

fn node_kinds() -> Vec<Id> {
    builtin::builtin_kinds()
        .into_iter()
        .filter(|kind| !kind.role().is_edge() && kind.role() != ElementRole::Label)
        .map(|kind| kind.kind_id())
        .collect()
}

proptest! {
    #[test]
    fn check_exactly_one_base_predicate(index in 0usize..64, boundary in any::<bool>()) {
        let kinds = node_kinds();
        let kind = kinds[index % kinds.len()];
        if let Some((diagram, id)) = element_of(kind, boundary) {
            let element = diagram.element(id).unwrap();
            let hits = BASE_PREDICATES
                .iter()
                .filter(|(_, predicate)| predicate(element))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }

    #[test]
    fn check_boundary_event_equivalence(index in 0usize..64, boundary in any::<bool>()) {
        let kinds = node_kinds();
        let kind = kinds[index % kinds.len()];
        if let Some((diagram, id)) = element_of(kind, boundary) {
            let element = diagram.element(id).unwrap();
            let tagged = element.subtype().is_some_and(|tag| tag == BOUNDARY_EVENT);
            prop_assert_eq!(
                classify::is_boundary_event(element),
                classify::is_event_node(element) && tagged
            );
        }
    }
}
