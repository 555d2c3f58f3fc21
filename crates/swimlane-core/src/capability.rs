//! Capability flags attachable to element kinds.
//!
//! A capability answers one behavioral question ("can the user move this?",
//! "does it own an independent label?") with a single membership test, so a
//! consumer never needs to know which concrete kind it is looking at.
//!
//! - [`CapabilityFlag`] names one behavior and is what configuration files and
//!   callers talk about.
//! - [`Capabilities`] is the packed set stored on a kind descriptor.
//!
//! Flags never interact: rules such as "moving requires bounds" belong to the
//! consumer, not to this module.

use std::{fmt, str::FromStr};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags! {
    /// A set of behavior flags.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const MOVABLE = 1 << 0;
        const CONNECTABLE = 1 << 1;
        const DELETABLE = 1 << 2;
        const BOUNDS_AWARE = 1 << 3;
        const CONTAINER_LAYOUT = 1 << 4;
        const FADEABLE = 1 << 5;
        const HOVER_FEEDBACK = 1 << 6;
        const POPUP_CAPABLE = 1 << 7;
        const NAMEABLE = 1 << 8;
        const EDITABLE_LABEL = 1 << 9;
        const SELECTABLE = 1 << 10;
        /// The kind's caption lives in a separate label element.
        const INDEPENDENT_LABEL = 1 << 11;
    }
}

/// A single named behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityFlag {
    Movable,
    Connectable,
    Deletable,
    BoundsAware,
    ContainerLayout,
    Fadeable,
    HoverFeedback,
    PopupCapable,
    Nameable,
    EditableLabel,
    Selectable,
    IndependentLabel,
}

impl CapabilityFlag {
    /// All flags, in declaration order.
    pub const ALL: [CapabilityFlag; 12] = [
        CapabilityFlag::Movable,
        CapabilityFlag::Connectable,
        CapabilityFlag::Deletable,
        CapabilityFlag::BoundsAware,
        CapabilityFlag::ContainerLayout,
        CapabilityFlag::Fadeable,
        CapabilityFlag::HoverFeedback,
        CapabilityFlag::PopupCapable,
        CapabilityFlag::Nameable,
        CapabilityFlag::EditableLabel,
        CapabilityFlag::Selectable,
        CapabilityFlag::IndependentLabel,
    ];

    /// The bit this flag occupies in a [`Capabilities`] set.
    pub fn bit(self) -> Capabilities {
        match self {
            CapabilityFlag::Movable => Capabilities::MOVABLE,
            CapabilityFlag::Connectable => Capabilities::CONNECTABLE,
            CapabilityFlag::Deletable => Capabilities::DELETABLE,
            CapabilityFlag::BoundsAware => Capabilities::BOUNDS_AWARE,
            CapabilityFlag::ContainerLayout => Capabilities::CONTAINER_LAYOUT,
            CapabilityFlag::Fadeable => Capabilities::FADEABLE,
            CapabilityFlag::HoverFeedback => Capabilities::HOVER_FEEDBACK,
            CapabilityFlag::PopupCapable => Capabilities::POPUP_CAPABLE,
            CapabilityFlag::Nameable => Capabilities::NAMEABLE,
            CapabilityFlag::EditableLabel => Capabilities::EDITABLE_LABEL,
            CapabilityFlag::Selectable => Capabilities::SELECTABLE,
            CapabilityFlag::IndependentLabel => Capabilities::INDEPENDENT_LABEL,
        }
    }

    /// The `snake_case` name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            CapabilityFlag::Movable => "movable",
            CapabilityFlag::Connectable => "connectable",
            CapabilityFlag::Deletable => "deletable",
            CapabilityFlag::BoundsAware => "bounds_aware",
            CapabilityFlag::ContainerLayout => "container_layout",
            CapabilityFlag::Fadeable => "fadeable",
            CapabilityFlag::HoverFeedback => "hover_feedback",
            CapabilityFlag::PopupCapable => "popup_capable",
            CapabilityFlag::Nameable => "nameable",
            CapabilityFlag::EditableLabel => "editable_label",
            CapabilityFlag::Selectable => "selectable",
            CapabilityFlag::IndependentLabel => "independent_label",
        }
    }
}

impl fmt::Display for CapabilityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a [`CapabilityFlag`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability `{0}`")]
pub struct ParseCapabilityError(String);

impl FromStr for CapabilityFlag {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CapabilityFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| ParseCapabilityError(s.to_string()))
    }
}

impl Capabilities {
    /// Builds a set from individual flags.
    pub fn from_flags(flags: impl IntoIterator<Item = CapabilityFlag>) -> Self {
        flags
            .into_iter()
            .fold(Capabilities::empty(), |set, flag| set | flag.bit())
    }

    /// Returns true if `flag` is a member of this set.
    pub fn contains_flag(self, flag: CapabilityFlag) -> bool {
        self.contains(flag.bit())
    }

    /// Iterates the member flags in declaration order.
    pub fn flags(self) -> impl Iterator<Item = CapabilityFlag> {
        CapabilityFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains_flag(*flag))
    }

    /// Returns a copy with `enable` added and then `disable` removed.
    ///
    /// A flag listed in both ends up disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane_core::capability::{Capabilities, CapabilityFlag};
    /// let lane = Capabilities::MOVABLE | Capabilities::SELECTABLE | Capabilities::NAMEABLE;
    /// let lane = lane.with_overrides([], [CapabilityFlag::Movable, CapabilityFlag::Selectable]);
    /// assert_eq!(lane, Capabilities::NAMEABLE);
    /// ```
    pub fn with_overrides(
        self,
        enable: impl IntoIterator<Item = CapabilityFlag>,
        disable: impl IntoIterator<Item = CapabilityFlag>,
    ) -> Self {
        (self | Capabilities::from_flags(enable)) - Capabilities::from_flags(disable)
    }

    /// Returns true if both label mechanisms are declared at once.
    pub fn has_conflicting_label_modes(self) -> bool {
        self.contains(Capabilities::EDITABLE_LABEL | Capabilities::INDEPENDENT_LABEL)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for flag in self.flags() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{flag}")?;
        }
        Ok(())
    }
}

impl FromIterator<CapabilityFlag> for Capabilities {
    fn from_iter<T: IntoIterator<Item = CapabilityFlag>>(iter: T) -> Self {
        Capabilities::from_flags(iter)
    }
}
