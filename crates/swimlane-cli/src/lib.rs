//! CLI logic for the Swimlane kind inspector.
//!
//! The CLI bootstraps the kind registry from configuration and prints what
//! it contains: the kind table, or how a single kind classifies once an
//! element of it exists in a diagram.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::rc::Rc;

use log::info;

use swimlane::{
    Diagram, DiagramBuilder, Edge, Element, ModelError, SwimlaneError,
    builtin::kinds,
    capability::CapabilityFlag,
    classify::{self, BASE_PREDICATES, DERIVED_PREDICATES},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    kind::{ElementRole, KindDescriptor},
    registry::KindRegistry,
};

/// Run the Swimlane CLI application
///
/// Returns the report to print on success.
///
/// # Errors
///
/// Returns `SwimlaneError` for:
/// - Configuration loading errors
/// - Registry errors (duplicate kinds, unknown overrides)
/// - Model errors while placing the classified element
pub fn run(args: &Args) -> Result<String, SwimlaneError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    match &args.command {
        Command::Kinds { role } => {
            let registry = builder.build_registry()?;
            info!(kinds = registry.len(); "Listing kinds");
            Ok(kind_table(&registry, *role))
        }
        Command::Classify { kind, subtype } => {
            info!(kind_id = kind.as_str(); "Classifying kind");
            let mut diagram = builder.new_diagram()?;
            classify_kind(&mut diagram, Id::new(kind), subtype.as_deref())
        }
    }
}

/// Formats the registered kinds as an aligned table.
fn kind_table(registry: &KindRegistry, role: Option<ElementRole>) -> String {
    let rows: Vec<[String; 4]> = registry
        .kinds()
        .filter(|kind| role.is_none_or(|role| kind.role() == role))
        .map(|kind| {
            [
                kind.kind_id().to_string(),
                kind.role().to_string(),
                kind.base_shape().to_string(),
                kind.capabilities().to_string(),
            ]
        })
        .collect();

    let header = ["KIND", "ROLE", "SHAPE", "CAPABILITIES"].map(str::to_string);
    let mut widths = header.each_ref().map(String::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    std::iter::once(&header)
        .chain(&rows)
        .map(|row| {
            format!(
                "{:<w0$}  {:<w1$}  {:<w2$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn scratch_bounds(x: f32, y: f32, width: f32, height: f32) -> Bounds {
    Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
}

/// Parents a scratch element may be tried under, in order.
struct Scaffold {
    pool: Option<Id>,
    lane: Option<Id>,
    task: Option<Id>,
}

impl Scaffold {
    /// Builds a pool, a lane and a task when the built-in kinds exist.
    fn build(diagram: &mut Diagram) -> Self {
        let pool = diagram
            .create_element(kinds::POOL, None, scratch_bounds(0.0, 0.0, 800.0, 400.0))
            .ok();
        let lane = pool.and_then(|pool| {
            diagram
                .create_child(pool, kinds::LANE, None, scratch_bounds(30.0, 0.0, 770.0, 400.0))
                .ok()
        });
        let task = lane.and_then(|lane| {
            diagram
                .create_child(lane, kinds::TASK, None, scratch_bounds(100.0, 100.0, 100.0, 80.0))
                .ok()
        });
        Self { pool, lane, task }
    }

    /// The diagram root followed by every scaffold element that exists.
    fn parents(&self) -> impl Iterator<Item = Option<Id>> {
        std::iter::once(None).chain(
            [self.pool, self.lane, self.task]
                .into_iter()
                .flatten()
                .map(Some),
        )
    }
}

/// Places an element of `kind_id` in `diagram` and reports its classification.
fn classify_kind(
    diagram: &mut Diagram,
    kind_id: Id,
    subtype: Option<&str>,
) -> Result<String, SwimlaneError> {
    let descriptor = Rc::clone(diagram.registry().lookup(kind_id)?);
    let scaffold = Scaffold::build(diagram);

    if descriptor.role().is_edge() {
        let endpoint = scaffold.task.ok_or(ModelError::UnknownElement(Id::new(kinds::TASK)))?;
        let edge = diagram.connect(kind_id, endpoint, endpoint, subtype)?;
        let edge = diagram.edge(edge).ok_or(ModelError::UnknownEdge(edge))?;
        return Ok(edge_report(&descriptor, edge));
    }

    if descriptor.role() == ElementRole::Label {
        if let Some(label) = label_for(diagram, &scaffold, kind_id) {
            return Ok(element_report(&descriptor, diagram.try_element(label)?));
        }
    }

    let mut last_error = None;
    for parent in scaffold.parents() {
        let placed = match parent {
            Some(parent) => diagram.create_child(
                parent,
                kind_id,
                subtype,
                scratch_bounds(110.0, 110.0, 36.0, 36.0),
            ),
            None => diagram.create_element(kind_id, subtype, scratch_bounds(0.0, 500.0, 36.0, 36.0)),
        };
        match placed {
            Ok(id) => return Ok(element_report(&descriptor, diagram.try_element(id)?)),
            Err(err) => last_error = Some(err),
        }
    }
    Err(last_error
        .unwrap_or(ModelError::UnknownElement(kind_id))
        .into())
}

/// Creates a label through its owner when `kind_id` is the configured label kind.
fn label_for(diagram: &mut Diagram, scaffold: &Scaffold, kind_id: Id) -> Option<Id> {
    let lane = scaffold.lane?;
    let owner = diagram
        .create_child(lane, kinds::START_EVENT, None, scratch_bounds(300.0, 100.0, 36.0, 36.0))
        .ok()?;
    let label = diagram.create_label(owner).ok()?;
    let element = diagram.element(label)?;
    (element.kind_id() == kind_id).then_some(label)
}

fn capability_lines(descriptor: &KindDescriptor) -> Vec<String> {
    CapabilityFlag::ALL
        .into_iter()
        .map(|flag| format!("  {:<20} {}", flag.to_string(), descriptor.has_capability(flag)))
        .collect()
}

fn element_report(descriptor: &KindDescriptor, element: &Element) -> String {
    let mut lines = vec![
        format!("kind: {descriptor}"),
        format!(
            "subtype: {}",
            element
                .subtype()
                .map_or_else(|| "-".to_string(), |tag| tag.to_string())
        ),
        "predicates:".to_string(),
    ];
    lines.extend(
        BASE_PREDICATES
            .iter()
            .chain(DERIVED_PREDICATES.iter())
            .map(|(name, predicate)| format!("  {name:<24} {}", predicate(element))),
    );
    lines.push("capabilities:".to_string());
    lines.extend(capability_lines(descriptor));
    lines.join("\n")
}

fn edge_report(descriptor: &KindDescriptor, edge: &Edge) -> String {
    let predicates: [(&str, fn(&Edge) -> bool); 3] = [
        ("is_sequence_flow", classify::is_sequence_flow),
        ("is_message_flow", classify::is_message_flow),
        ("is_association", classify::is_association),
    ];

    let mut lines = vec![format!("kind: {descriptor}"), "predicates:".to_string()];
    lines.extend(
        predicates
            .iter()
            .map(|(name, predicate)| format!("  {name:<24} {}", predicate(edge))),
    );
    lines.push("capabilities:".to_string());
    lines.extend(capability_lines(descriptor));
    lines.join("\n")
}
