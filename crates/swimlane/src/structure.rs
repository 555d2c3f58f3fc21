//! Structural mutations of a [`Diagram`].
//!
//! Every operation validates first and mutates second, so a rejected request
//! leaves the diagram exactly as it was. Followers move with their leader:
//! an element's subtree and its independent label follow it, and boundary
//! events are kept on their host's outline.

use std::rc::Rc;

use indexmap::IndexSet;
use log::{debug, info};

use swimlane_core::{
    capability::CapabilityFlag,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    kind::{BOUNDARY_EVENT, ElementRole},
};

use crate::{
    classify,
    error::{AttachmentRule, KindUse, ModelError},
    model::{Diagram, Edge, Element, resolve_subtype},
};

/// The ids removed by [`Diagram::delete`], in removal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deletion {
    elements: Vec<Id>,
    edges: Vec<Id>,
}

impl Deletion {
    pub fn elements(&self) -> &[Id] {
        &self.elements
    }

    pub fn edges(&self) -> &[Id] {
        &self.edges
    }

    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains(&id) || self.edges.contains(&id)
    }
}

impl Diagram {
    /// Moves `id` to the end of `parent`'s children.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidAttachment`] when the placement breaks a
    /// structural rule, [`ModelError::UnknownElement`] when either id is
    /// missing.
    pub fn attach(&mut self, id: Id, parent: Id) -> Result<(), ModelError> {
        self.reparent(id, Some(parent), None)
    }

    /// Moves `id` into `parent` at `index` among its children.
    ///
    /// An index past the end appends.
    pub fn attach_at(&mut self, id: Id, parent: Id, index: usize) -> Result<(), ModelError> {
        self.reparent(id, Some(parent), Some(index))
    }

    /// Moves `id` to the diagram root.
    pub fn detach(&mut self, id: Id) -> Result<(), ModelError> {
        self.reparent(id, None, None)
    }

    fn reparent(&mut self, id: Id, parent: Option<Id>, index: Option<usize>) -> Result<(), ModelError> {
        let element = self.try_element(id)?;
        self.check_placement(element, parent)?;

        let old_parent = element.parent();
        let boundary = classify::is_boundary_event(element);
        let label = self.label_of(id);

        self.unlink_child(id, old_parent);
        self.link_child(id, parent, index);
        self.element_mut(id)?.set_parent(parent);

        if let Some(label) = label {
            let label_parent = self.parent(label);
            self.unlink_child(label, label_parent);
            let after_owner = self.sibling_index(id, parent).map(|i| i + 1);
            self.link_child(label, parent, after_owner);
            self.element_mut(label)?.set_parent(parent);
        }

        if boundary {
            self.snap_to_host(id)?;
        }

        debug!(
            element_id:% = id,
            parent:? = parent.map(|p| p.to_string());
            "Element reparented"
        );
        Ok(())
    }

    fn sibling_index(&self, id: Id, parent: Option<Id>) -> Option<usize> {
        let siblings = match parent {
            Some(parent) => self.children(parent),
            None => self.roots(),
        };
        siblings.iter().position(|sibling| *sibling == id)
    }

    /// Creates a boundary event of `kind_id` on `host`.
    ///
    /// The event receives the boundary subtype regardless of its kind's
    /// default, and its bounds are snapped so the centre lies on the host
    /// outline.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KindMismatch`] if the kind is not an event kind.
    /// - [`ModelError::InvalidAttachment`] with
    ///   [`AttachmentRule::BoundaryHostNotTask`] if `host` is not a live task.
    pub fn attach_boundary_event(
        &mut self,
        kind_id: impl Into<Id>,
        host: Id,
        bounds: Bounds,
    ) -> Result<Id, ModelError> {
        let kind_id = kind_id.into();
        let kind = Rc::clone(self.registry().lookup(kind_id)?);
        if kind.role() != ElementRole::Event {
            return Err(ModelError::KindMismatch {
                kind_id,
                expected: KindUse::Event,
            });
        }

        let id = self.peek_id(kind_id);
        let host_bounds = match self.element(host) {
            Some(element) if classify::is_task_node(element) => element.bounds(),
            _ => {
                return Err(ModelError::attachment(
                    id,
                    Some(host),
                    AttachmentRule::BoundaryHostNotTask,
                ));
            }
        };

        let element = Element::new(
            id,
            kind,
            Some(Id::new(BOUNDARY_EVENT)),
            bounds.snap_center_to_outline(host_bounds),
        );
        Ok(self.insert(element, Some(host), None))
    }

    /// Creates the independent label of `owner`.
    ///
    /// The label is a sibling placed right after its owner, centred below it
    /// at the configured offset and size, and carries the owner's name.
    ///
    /// # Errors
    ///
    /// - [`ModelError::UnknownElement`] if `owner` is missing.
    /// - [`ModelError::InvalidAttachment`] with
    ///   [`AttachmentRule::LabelOwnerNotLabelled`] or
    ///   [`AttachmentRule::LabelAlreadyPresent`].
    /// - [`ModelError::Registry`] or [`ModelError::KindMismatch`] if the
    ///   configured label kind is unusable.
    pub fn create_label(&mut self, owner: Id) -> Result<Id, ModelError> {
        let owner_element = self.try_element(owner)?;
        let label_kind = Id::new(self.label_config().kind());
        let id = self.peek_id(label_kind);

        if !classify::is_bpmn_label_node(owner_element) {
            return Err(ModelError::attachment(
                id,
                Some(owner),
                AttachmentRule::LabelOwnerNotLabelled,
            ));
        }
        if self.label_of(owner).is_some() {
            return Err(ModelError::attachment(
                id,
                Some(owner),
                AttachmentRule::LabelAlreadyPresent,
            ));
        }

        let kind = Rc::clone(self.registry().lookup(label_kind)?);
        if kind.role() != ElementRole::Label {
            return Err(ModelError::KindMismatch {
                kind_id: label_kind,
                expected: KindUse::Label,
            });
        }

        let owner_bounds = owner_element.bounds();
        let parent = owner_element.parent();
        let name = owner_element.name().map(str::to_owned);
        let config = self.label_config();
        let top_left = Point::new(
            owner_bounds.center().x() - config.width() / 2.0,
            owner_bounds.max_y() + config.offset(),
        );
        let bounds =
            Bounds::new_from_top_left(top_left, Size::new(config.width(), config.height()));

        let mut label = Element::new(id, kind, None, bounds);
        label.set_label_owner(owner);
        label.set_name(name);

        let index = self.sibling_index(owner, parent).map(|i| i + 1);
        Ok(self.insert(label, parent, index))
    }

    /// Connects `source` to `target` with an edge of `kind_id`.
    ///
    /// Without an explicit `subtype` the edge takes its kind's default.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KindMismatch`] if the kind is not an edge kind.
    /// - [`ModelError::SubtypeConflict`] if `subtype` differs from the
    ///   kind's default subtype.
    /// - [`ModelError::UnknownElement`] if an endpoint is missing.
    /// - [`ModelError::InvalidAttachment`] with
    ///   [`AttachmentRule::EndpointNotConnectable`].
    pub fn connect(
        &mut self,
        kind_id: impl Into<Id>,
        source: Id,
        target: Id,
        subtype: Option<&str>,
    ) -> Result<Id, ModelError> {
        let kind_id = kind_id.into();
        let kind = Rc::clone(self.registry().lookup(kind_id)?);
        if !kind.role().is_edge() {
            return Err(ModelError::KindMismatch {
                kind_id,
                expected: KindUse::Edge,
            });
        }
        let subtype = resolve_subtype(&kind, subtype)?;

        for (endpoint, other) in [(source, target), (target, source)] {
            if !self
                .try_element(endpoint)?
                .has_capability(CapabilityFlag::Connectable)
            {
                return Err(ModelError::attachment(
                    endpoint,
                    Some(other),
                    AttachmentRule::EndpointNotConnectable,
                ));
            }
        }

        let id = self.next_id(kind_id);
        debug!(edge_id:% = id, source:% = source, target:% = target; "Edge created");
        self.edges
            .insert(id, Edge::new(id, kind, source, target, subtype));
        Ok(id)
    }

    /// Deletes `id` together with everything that cannot outlive it.
    ///
    /// The cascade covers the element's subtree (lanes, flow nodes, parts and
    /// boundary events), the independent labels of every removed element and
    /// every edge touching a removed element.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingCapability`] if the element is not deletable.
    /// Cascaded removals are not checked.
    pub fn delete(&mut self, id: Id) -> Result<Deletion, ModelError> {
        let element = self.try_element(id)?;
        require(element, CapabilityFlag::Deletable)?;

        let mut removed: IndexSet<Id> = self.subtree(id).into_iter().collect();
        let labels: Vec<Id> = self
            .elements
            .values()
            .filter(|e| e.label_owner().is_some_and(|owner| removed.contains(&owner)))
            .map(Element::id)
            .collect();
        removed.extend(labels);

        let edges: Vec<Id> = self
            .edges
            .values()
            .filter(|edge| removed.contains(&edge.source()) || removed.contains(&edge.target()))
            .map(Edge::id)
            .collect();

        for removed_id in &removed {
            let parent = self.parent(*removed_id);
            if parent.is_none_or(|p| !removed.contains(&p)) {
                self.unlink_child(*removed_id, parent);
            }
        }
        for removed_id in &removed {
            self.elements.shift_remove(removed_id);
        }
        for edge in &edges {
            self.edges.shift_remove(edge);
        }

        info!(
            element_id:% = id,
            elements = removed.len(),
            edges = edges.len();
            "Element deleted"
        );
        Ok(Deletion {
            elements: removed.into_iter().collect(),
            edges,
        })
    }

    /// Deletes a single edge.
    pub fn delete_edge(&mut self, id: Id) -> Result<(), ModelError> {
        let edge = self.edges.get(&id).ok_or(ModelError::UnknownEdge(id))?;
        if !edge.has_capability(CapabilityFlag::Deletable) {
            return Err(ModelError::MissingCapability {
                element: id,
                flag: CapabilityFlag::Deletable,
            });
        }
        self.edges.shift_remove(&id);
        debug!(edge_id:% = id; "Edge deleted");
        Ok(())
    }

    /// `id` followed by its descendants in preorder.
    pub(crate) fn subtree(&self, id: Id) -> Vec<Id> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    /// Translates `id` by `delta`, together with its subtree and label.
    ///
    /// A moved boundary event is snapped back onto its host outline.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingCapability`] if the element is not movable.
    pub fn move_by(&mut self, id: Id, delta: Point) -> Result<(), ModelError> {
        let element = self.try_element(id)?;
        require(element, CapabilityFlag::Movable)?;
        let boundary = classify::is_boundary_event(element);

        self.translate_followers(id, delta, true);
        if boundary {
            self.snap_to_host(id)?;
        }
        debug!(element_id:% = id, dx = delta.x(), dy = delta.y(); "Element moved");
        Ok(())
    }

    /// Moves `id` so its top-left corner lands on `position`.
    pub fn move_to(&mut self, id: Id, position: Point) -> Result<(), ModelError> {
        let current = self.try_element(id)?.bounds().min_point();
        self.move_by(id, position.sub_point(current))
    }

    /// Replaces the bounds of `id`.
    ///
    /// Descendants and the label follow the top-left corner; boundary events
    /// of a resized task are snapped onto the new outline.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingCapability`] if the element is not bounds aware.
    pub fn set_bounds(&mut self, id: Id, bounds: Bounds) -> Result<(), ModelError> {
        let element = self.try_element(id)?;
        require(element, CapabilityFlag::BoundsAware)?;
        let boundary = classify::is_boundary_event(element);
        let delta = bounds.min_point().sub_point(element.bounds().min_point());

        self.translate_followers(id, delta, false);
        self.element_mut(id)?.set_bounds(bounds);

        for event in self.boundary_events(id) {
            self.snap_to_host(event)?;
        }
        if boundary {
            self.snap_to_host(id)?;
        }
        debug!(element_id:% = id; "Element bounds changed");
        Ok(())
    }

    fn translate_followers(&mut self, id: Id, delta: Point, include_self: bool) {
        if delta.is_zero() {
            return;
        }

        let skip = usize::from(!include_self);
        let followers: Vec<Id> = self
            .subtree(id)
            .into_iter()
            .skip(skip)
            .chain(self.label_of(id))
            .collect();

        for follower in followers {
            if let Some(element) = self.elements.get_mut(&follower) {
                element.set_bounds(element.bounds().translate(delta));
            }
        }
    }

    fn snap_to_host(&mut self, event: Id) -> Result<(), ModelError> {
        let Some(host) = self.parent(event) else {
            return Ok(());
        };
        let outline = self.try_element(host)?.bounds();
        let element = self.element_mut(event)?;
        let snapped = element.bounds().snap_center_to_outline(outline);
        let delta = snapped.min_point().sub_point(element.bounds().min_point());
        element.set_bounds(snapped);
        if let Some(label) = self.label_of(event) {
            let label = self.element_mut(label)?;
            label.set_bounds(label.bounds().translate(delta));
        }
        Ok(())
    }

    /// Renames `id`; the independent label mirrors the owner's name.
    ///
    /// # Errors
    ///
    /// [`ModelError::MissingCapability`] unless the element is nameable or
    /// carries a label.
    pub fn set_name(&mut self, id: Id, name: impl Into<String>) -> Result<(), ModelError> {
        let element = self.try_element(id)?;
        let nameable = [
            CapabilityFlag::Nameable,
            CapabilityFlag::EditableLabel,
            CapabilityFlag::IndependentLabel,
        ]
        .into_iter()
        .any(|flag| element.has_capability(flag));
        if !nameable {
            return Err(ModelError::MissingCapability {
                element: id,
                flag: CapabilityFlag::Nameable,
            });
        }

        let name = name.into();
        if let Some(label) = self.label_of(id) {
            self.element_mut(label)?.set_name(Some(name.clone()));
        }
        self.element_mut(id)?.set_name(Some(name));
        Ok(())
    }

    pub fn set_documentation(
        &mut self,
        id: Id,
        documentation: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.element_mut(id)?
            .set_documentation(Some(documentation.into()));
        Ok(())
    }
}

fn require(element: &Element, flag: CapabilityFlag) -> Result<(), ModelError> {
    if element.has_capability(flag) {
        Ok(())
    } else {
        Err(ModelError::MissingCapability {
            element: element.id(),
            flag,
        })
    }
}
