//! The kind registry.
//!
//! Kinds are a closed, load-time configuration. The registry therefore has two
//! phases, expressed as two types:
//!
//! 1. [`KindRegistryBuilder`] accepts registrations. Registering an id twice
//!    fails instead of overwriting.
//! 2. [`KindRegistry`] is produced by [`KindRegistryBuilder::seal`] and only
//!    answers lookups. There is no way back to the builder.
//!
//! # Example
//!
//! ```
//! # use swimlane_core::{
//! #     capability::Capabilities,
//! #     identifier::Id,
//! #     kind::{BaseShape, ElementRole, KindDescriptor},
//! #     registry::{KindRegistryBuilder, RegistryError},
//! # };
//! let mut builder = KindRegistryBuilder::new();
//! let task = KindDescriptor::new(
//!     Id::new("task"),
//!     ElementRole::Task,
//!     BaseShape::Rectangular,
//!     Capabilities::MOVABLE | Capabilities::CONNECTABLE,
//! );
//! builder.register(task.clone()).unwrap();
//! assert_eq!(builder.register(task), Err(RegistryError::DuplicateKind(Id::new("task"))));
//!
//! let registry = builder.seal();
//! assert_eq!(registry.lookup("task").unwrap().role(), ElementRole::Task);
//! assert!(registry.lookup("lane").is_err());
//! ```

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info, trace};
use thiserror::Error;

use crate::{
    identifier::Id,
    kind::{ElementRole, KindDescriptor},
};

/// Errors raised by registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown element kind `{0}`")]
    UnknownKind(Id),

    #[error("element kind `{0}` is already registered")]
    DuplicateKind(Id),

    #[error("element kind `{0}` declares both an editable label and an independent label")]
    ConflictingLabelModes(Id),
}

type KindTable = IndexMap<Id, Rc<KindDescriptor>>;

fn lookup_in(kinds: &KindTable, kind_id: Id) -> Result<&Rc<KindDescriptor>, RegistryError> {
    trace!(kind_id:% = kind_id; "Looking up element kind");
    kinds
        .get(&kind_id)
        .ok_or(RegistryError::UnknownKind(kind_id))
}

/// Configuration phase of the registry.
#[derive(Debug, Default)]
pub struct KindRegistryBuilder {
    kinds: KindTable,
}

impl KindRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new kind.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateKind`] if the kind id is already present.
    /// - [`RegistryError::ConflictingLabelModes`] if the descriptor declares
    ///   both label mechanisms.
    ///
    /// The builder is left untouched on error.
    pub fn register(&mut self, descriptor: KindDescriptor) -> Result<(), RegistryError> {
        let kind_id = descriptor.kind_id();

        if self.kinds.contains_key(&kind_id) {
            return Err(RegistryError::DuplicateKind(kind_id));
        }
        if descriptor.capabilities().has_conflicting_label_modes() {
            return Err(RegistryError::ConflictingLabelModes(kind_id));
        }

        debug!(
            kind_id:% = kind_id,
            role:% = descriptor.role(),
            capabilities:% = descriptor.capabilities();
            "Registered element kind"
        );
        self.kinds.insert(kind_id, Rc::new(descriptor));
        Ok(())
    }

    /// Looks up a kind registered so far.
    pub fn lookup(&self, kind_id: impl Into<Id>) -> Result<&Rc<KindDescriptor>, RegistryError> {
        lookup_in(&self.kinds, kind_id.into())
    }

    /// Returns true if `kind_id` has been registered.
    pub fn contains(&self, kind_id: impl Into<Id>) -> bool {
        self.kinds.contains_key(&kind_id.into())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Ends the configuration phase.
    pub fn seal(self) -> KindRegistry {
        info!(kinds_count = self.kinds.len(); "Kind registry sealed");
        KindRegistry { kinds: self.kinds }
    }
}

/// Operational phase of the registry: read-only lookups.
#[derive(Debug, Default)]
pub struct KindRegistry {
    kinds: KindTable,
}

impl KindRegistry {
    /// Returns the descriptor for `kind_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownKind`] if the kind was never registered.
    pub fn lookup(&self, kind_id: impl Into<Id>) -> Result<&Rc<KindDescriptor>, RegistryError> {
        lookup_in(&self.kinds, kind_id.into())
    }

    /// Returns true if `kind_id` is registered.
    pub fn contains(&self, kind_id: impl Into<Id>) -> bool {
        self.kinds.contains_key(&kind_id.into())
    }

    /// Iterates all descriptors in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &Rc<KindDescriptor>> {
        self.kinds.values()
    }

    /// Iterates the descriptors playing `role`, in registration order.
    pub fn kinds_with_role(&self, role: ElementRole) -> impl Iterator<Item = &Rc<KindDescriptor>> {
        self.kinds().filter(move |kind| kind.role() == role)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
