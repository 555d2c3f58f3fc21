//! Error adapter for converting SwimlaneError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code, and the ones a user can fix get a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use swimlane::{ModelError, SwimlaneError, registry::RegistryError};

/// Adapter rendering a [`SwimlaneError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a SwimlaneError);

impl ErrorAdapter<'_> {
    fn registry_error(&self) -> Option<&RegistryError> {
        match self.0 {
            SwimlaneError::Registry(err) | SwimlaneError::Model(ModelError::Registry(err)) => {
                Some(err)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = if let Some(err) = self.registry_error() {
            match err {
                RegistryError::UnknownKind(_) => "swimlane::registry::unknown_kind",
                RegistryError::DuplicateKind(_) => "swimlane::registry::duplicate_kind",
                RegistryError::ConflictingLabelModes(_) => {
                    "swimlane::registry::conflicting_label_modes"
                }
            }
        } else {
            match self.0 {
                SwimlaneError::Io(_) => "swimlane::io",
                SwimlaneError::Config(_) => "swimlane::config",
                SwimlaneError::Model(ModelError::InvalidAttachment { .. }) => {
                    "swimlane::model::invalid_attachment"
                }
                SwimlaneError::Model(ModelError::UnknownElement(_)) => {
                    "swimlane::model::unknown_element"
                }
                SwimlaneError::Model(ModelError::UnknownEdge(_)) => "swimlane::model::unknown_edge",
                SwimlaneError::Model(ModelError::MissingCapability { .. }) => {
                    "swimlane::model::missing_capability"
                }
                SwimlaneError::Model(ModelError::KindMismatch { .. }) => {
                    "swimlane::model::kind_mismatch"
                }
                SwimlaneError::Model(ModelError::SubtypeConflict { .. }) => {
                    "swimlane::model::subtype_conflict"
                }
                SwimlaneError::Registry(_) | SwimlaneError::Model(ModelError::Registry(_)) => {
                    return None;
                }
            }
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match (self.registry_error(), self.0) {
            (Some(RegistryError::UnknownKind(_)), _) => {
                "run `swimlane kinds` to list the registered kinds"
            }
            (Some(RegistryError::DuplicateKind(_)), _) => {
                "custom kinds must not reuse a registered kind id"
            }
            (Some(RegistryError::ConflictingLabelModes(_)), _) => {
                "declare either `editable_label` or `independent_label`, not both"
            }
            (None, SwimlaneError::Config(_)) => "check the TOML syntax of the configuration file",
            (None, SwimlaneError::Model(ModelError::KindMismatch { .. })) => {
                "run `swimlane kinds --role <ROLE>` to find a kind of the expected role"
            }
            (None, SwimlaneError::Model(ModelError::SubtypeConflict { .. })) => {
                "omit `--subtype` to use the kind's fixed subtype"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
