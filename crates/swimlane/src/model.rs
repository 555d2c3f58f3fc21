//! The element instance model.
//!
//! A [`Diagram`] owns every [`Element`] and [`Edge`] in an id-keyed store.
//! Elements reference their parent by id only; the ordered `children` list is
//! what expresses ownership. Each element holds the [`KindDescriptor`] it was
//! created with, so its kind and capabilities are fixed for its lifetime and
//! steady-state queries never touch the registry.
//!
//! Structural mutations (attach, delete, move, labels, edges) live in
//! [`crate::structure`].

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, trace};

use swimlane_core::{
    capability::{Capabilities, CapabilityFlag},
    geometry::Bounds,
    identifier::Id,
    kind::{EdgeRole, ElementRole, KindDescriptor},
    registry::KindRegistry,
};

use crate::{
    classify,
    config::LabelConfig,
    error::{AttachmentRule, KindUse, ModelError},
};

/// A graphical element of a diagram.
#[derive(Debug, Clone)]
pub struct Element {
    id: Id,
    kind: Rc<KindDescriptor>,
    subtype: Option<Id>,
    bounds: Bounds,
    parent: Option<Id>,
    children: Vec<Id>,
    label_owner: Option<Id>,
    name: Option<String>,
    documentation: Option<String>,
}

impl Element {
    pub(crate) fn new(
        id: Id,
        kind: Rc<KindDescriptor>,
        subtype: Option<Id>,
        bounds: Bounds,
    ) -> Self {
        let subtype = subtype.or_else(|| kind.default_subtype());
        Self {
            id,
            kind,
            subtype,
            bounds,
            parent: None,
            children: Vec::new(),
            label_owner: None,
            name: None,
            documentation: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The kind id this element was created with.
    pub fn kind_id(&self) -> Id {
        self.kind.kind_id()
    }

    /// The descriptor bound at construction.
    pub fn kind(&self) -> &KindDescriptor {
        &self.kind
    }

    pub fn role(&self) -> ElementRole {
        self.kind.role()
    }

    pub fn subtype(&self) -> Option<Id> {
        self.subtype
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn has_capability(&self, flag: CapabilityFlag) -> bool {
        self.kind.has_capability(flag)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The containing element, or `None` at the diagram root.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Owned children in visual order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// The element an independent label belongs to.
    pub fn label_owner(&self) -> Option<Id> {
        self.label_owner
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Id>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Id> {
        &mut self.children
    }

    pub(crate) fn set_label_owner(&mut self, owner: Id) {
        self.label_owner = Some(owner);
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_documentation(&mut self, documentation: Option<String>) {
        self.documentation = documentation;
    }
}

/// Returns true if the element's kind declares `flag`.
pub fn has_capability(element: &Element, flag: CapabilityFlag) -> bool {
    element.has_capability(flag)
}

/// Checks an explicit subtype against the kind's default.
///
/// A kind with a default subtype fixes it: the only explicit subtype it
/// accepts is that same tag. Kinds without a default take any subtype.
pub(crate) fn resolve_subtype(
    kind: &KindDescriptor,
    subtype: Option<&str>,
) -> Result<Option<Id>, ModelError> {
    let subtype = subtype.map(Id::new);
    match (kind.default_subtype(), subtype) {
        (Some(fixed), Some(subtype)) if fixed != subtype => Err(ModelError::SubtypeConflict {
            kind_id: kind.kind_id(),
            subtype,
            fixed,
        }),
        (fixed, subtype) => Ok(subtype.or(fixed)),
    }
}

/// A connection between two elements, referenced by id.
#[derive(Debug, Clone)]
pub struct Edge {
    id: Id,
    kind: Rc<KindDescriptor>,
    source: Id,
    target: Id,
    subtype: Option<Id>,
}

impl Edge {
    pub(crate) fn new(
        id: Id,
        kind: Rc<KindDescriptor>,
        source: Id,
        target: Id,
        subtype: Option<Id>,
    ) -> Self {
        let subtype = subtype.or_else(|| kind.default_subtype());
        Self {
            id,
            kind,
            source,
            target,
            subtype,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind_id(&self) -> Id {
        self.kind.kind_id()
    }

    pub fn kind(&self) -> &KindDescriptor {
        &self.kind
    }

    /// The edge flavor, or `None` if the kind is not an edge kind.
    pub fn edge_role(&self) -> Option<EdgeRole> {
        match self.kind.role() {
            ElementRole::Edge(role) => Some(role),
            _ => None,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn subtype(&self) -> Option<Id> {
        self.subtype
    }

    pub fn has_capability(&self, flag: CapabilityFlag) -> bool {
        self.kind.has_capability(flag)
    }

    /// Returns true if `element` is either endpoint.
    pub fn touches(&self, element: Id) -> bool {
        self.source == element || self.target == element
    }
}

/// An editable diagram: the element and edge store plus the registry it
/// resolves kinds against.
#[derive(Debug)]
pub struct Diagram {
    registry: Rc<KindRegistry>,
    labels: LabelConfig,
    pub(crate) elements: IndexMap<Id, Element>,
    pub(crate) roots: Vec<Id>,
    pub(crate) edges: IndexMap<Id, Edge>,
    next_index: usize,
}

impl Diagram {
    /// Creates an empty diagram over a sealed registry.
    pub fn new(registry: Rc<KindRegistry>) -> Self {
        Self::with_label_config(registry, LabelConfig::default())
    }

    /// Creates an empty diagram with custom label placement.
    pub fn with_label_config(registry: Rc<KindRegistry>, labels: LabelConfig) -> Self {
        Self {
            registry,
            labels,
            elements: IndexMap::new(),
            roots: Vec::new(),
            edges: IndexMap::new(),
            next_index: 0,
        }
    }

    pub fn registry(&self) -> &Rc<KindRegistry> {
        &self.registry
    }

    pub(crate) fn label_config(&self) -> &LabelConfig {
        &self.labels
    }

    /// The id the next stored element or edge of `kind_id` receives.
    pub(crate) fn peek_id(&self, kind_id: Id) -> Id {
        Id::indexed(kind_id, self.next_index)
    }

    pub(crate) fn next_id(&mut self, kind_id: Id) -> Id {
        let id = self.peek_id(kind_id);
        self.next_index += 1;
        id
    }

    /// Creates a node at the diagram root.
    ///
    /// The kind's capabilities are bound to the element here and never change.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Registry`] if `kind_id` is not registered.
    /// - [`ModelError::KindMismatch`] for edge kinds.
    /// - [`ModelError::SubtypeConflict`] if `subtype` differs from the
    ///   kind's default subtype.
    /// - [`ModelError::InvalidAttachment`] for kinds that cannot live at the
    ///   root: lanes, boundary events and independent labels.
    pub fn create_element(
        &mut self,
        kind_id: impl Into<Id>,
        subtype: Option<&str>,
        bounds: Bounds,
    ) -> Result<Id, ModelError> {
        let element = self.instantiate(kind_id.into(), subtype, bounds)?;
        self.check_placement(&element, None)?;
        Ok(self.insert(element, None, None))
    }

    /// Creates a node directly inside `parent`.
    ///
    /// Applies the same rules as [`Diagram::attach`]; nothing is created if
    /// the placement is rejected. Boundary events are snapped onto the host
    /// outline.
    pub fn create_child(
        &mut self,
        parent: Id,
        kind_id: impl Into<Id>,
        subtype: Option<&str>,
        bounds: Bounds,
    ) -> Result<Id, ModelError> {
        let mut element = self.instantiate(kind_id.into(), subtype, bounds)?;
        self.check_placement(&element, Some(parent))?;
        if classify::is_boundary_event(&element) {
            let host = self.try_element(parent)?.bounds();
            element.set_bounds(bounds.snap_center_to_outline(host));
        }
        Ok(self.insert(element, Some(parent), None))
    }

    fn instantiate(
        &self,
        kind_id: Id,
        subtype: Option<&str>,
        bounds: Bounds,
    ) -> Result<Element, ModelError> {
        let kind = Rc::clone(self.registry.lookup(kind_id)?);
        if kind.role().is_edge() {
            return Err(ModelError::KindMismatch {
                kind_id,
                expected: KindUse::Node,
            });
        }

        let subtype = resolve_subtype(&kind, subtype)?;
        let id = self.peek_id(kind_id);
        Ok(Element::new(id, kind, subtype, bounds))
    }

    /// Stores a freshly minted `element` under `parent`, at `index` or at the
    /// end.
    pub(crate) fn insert(&mut self, mut element: Element, parent: Option<Id>, index: Option<usize>) -> Id {
        let id = element.id();
        self.next_index += 1;
        element.set_parent(parent);
        debug!(
            element_id:% = id,
            kind_id:% = element.kind_id(),
            parent:? = parent.map(|p| p.to_string());
            "Element created"
        );
        self.elements.insert(id, element);
        self.link_child(id, parent, index);
        id
    }

    pub(crate) fn link_child(&mut self, id: Id, parent: Option<Id>, index: Option<usize>) {
        let siblings = match parent.and_then(|p| self.elements.get_mut(&p)) {
            Some(parent) => parent.children_mut(),
            None => &mut self.roots,
        };
        let index = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, id);
    }

    pub(crate) fn unlink_child(&mut self, id: Id, parent: Option<Id>) {
        let siblings = match parent.and_then(|p| self.elements.get_mut(&p)) {
            Some(parent) => parent.children_mut(),
            None => &mut self.roots,
        };
        siblings.retain(|child| *child != id);
    }

    /// Checks whether `element` may live under `parent` (`None` = root).
    pub(crate) fn check_placement(
        &self,
        element: &Element,
        parent: Option<Id>,
    ) -> Result<(), ModelError> {
        let reject = |reason| Err(ModelError::attachment(element.id(), parent, reason));

        let target = match parent {
            Some(parent_id) => {
                let target = self
                    .elements
                    .get(&parent_id)
                    .ok_or(ModelError::UnknownElement(parent_id))?;
                if parent_id == element.id() || self.is_ancestor(element.id(), parent_id) {
                    return reject(AttachmentRule::Cycle);
                }
                Some(target)
            }
            None => None,
        };

        if classify::is_label_node(element) {
            return reject(if element.label_owner().is_some() {
                AttachmentRule::LabelFollowsOwner
            } else {
                AttachmentRule::LabelWithoutOwner
            });
        }

        if target.is_some_and(classify::is_label_node) {
            return reject(AttachmentRule::InsideLabel);
        }

        if classify::is_boundary_event(element) {
            return match target {
                Some(host) if classify::is_task_node(host) => Ok(()),
                Some(_) => reject(AttachmentRule::BoundaryHostNotTask),
                None => reject(AttachmentRule::BoundaryEventDetached),
            };
        }

        let Some(target) = target else {
            if classify::is_lane_node(element) {
                return reject(AttachmentRule::LaneOutsidePool);
            }
            return Ok(());
        };

        if classify::is_pool_node(element) {
            return reject(AttachmentRule::PoolNotTopLevel);
        }
        if classify::is_lane_node(element) {
            return if classify::is_pool_node(target) {
                Ok(())
            } else {
                reject(AttachmentRule::LaneOutsidePool)
            };
        }
        if classify::is_node_part(element) || classify::is_container_node(target) {
            Ok(())
        } else {
            reject(AttachmentRule::NotAContainer)
        }
    }

    /// Returns true if `ancestor` is on the parent chain of `id`.
    pub(crate) fn is_ancestor(&self, ancestor: Id, id: Id) -> bool {
        let mut current = self.elements.get(&id).and_then(Element::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(&parent).and_then(Element::parent);
        }
        false
    }

    /// Returns the element with `id`.
    pub fn element(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns the element with `id` or [`ModelError::UnknownElement`].
    pub fn try_element(&self, id: Id) -> Result<&Element, ModelError> {
        self.elements.get(&id).ok_or(ModelError::UnknownElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: Id) -> Result<&mut Element, ModelError> {
        self.elements
            .get_mut(&id)
            .ok_or(ModelError::UnknownElement(id))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn edge(&self, id: Id) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterates all elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Iterates all edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of elements (edges excluded).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when the diagram holds no elements. Edges need elements as
    /// endpoints, so an empty diagram never has edges either.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-level elements in order.
    pub fn roots(&self) -> &[Id] {
        &self.roots
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.elements.get(&id).and_then(Element::parent)
    }

    /// Children of `id` in visual order; empty for unknown ids.
    pub fn children(&self, id: Id) -> &[Id] {
        self.elements
            .get(&id)
            .map(Element::children)
            .unwrap_or_default()
    }

    fn children_where(&self, id: Id, predicate: fn(&Element) -> bool) -> Vec<Id> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.elements.get(child).is_some_and(predicate))
            .collect()
    }

    /// Top-level pools in order.
    pub fn pools(&self) -> Vec<Id> {
        self.roots
            .iter()
            .copied()
            .filter(|id| self.elements.get(id).is_some_and(classify::is_pool_node))
            .collect()
    }

    /// Lanes of `pool`, top to bottom.
    pub fn lanes(&self, pool: Id) -> Vec<Id> {
        self.children_where(pool, classify::is_lane_node)
    }

    /// Boundary events hosted by `task`.
    pub fn boundary_events(&self, task: Id) -> Vec<Id> {
        self.children_where(task, classify::is_boundary_event)
    }

    /// The independent label owned by `owner`, if one exists.
    pub fn label_of(&self, owner: Id) -> Option<Id> {
        self.elements
            .values()
            .find(|element| element.label_owner() == Some(owner))
            .map(Element::id)
    }

    /// Edges with `element` as source or target.
    pub fn edges_of(&self, element: Id) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |edge| edge.touches(element))
    }

    /// Resolves any element to the semantic node it belongs to.
    ///
    /// Walks up the parent chain from sub-parts such as headers, icons or
    /// compartments until an element satisfying [`classify::is_bpmn_node`] is
    /// found. An independent label resolves through its owner. Returns `None`
    /// when the chain ends without a semantic node.
    pub fn semantic_node(&self, id: Id) -> Option<Id> {
        let mut current = id;
        loop {
            let element = self.elements.get(&current)?;
            if classify::is_bpmn_node(element) {
                trace!(from:% = id, to:% = current; "Resolved semantic node");
                return Some(current);
            }
            current = match element.label_owner() {
                Some(owner) => owner,
                None => element.parent()?,
            };
        }
    }
}
