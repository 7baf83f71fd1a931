//! One snapshot node per object identity
//!
//! Building a node is a pure description step: it checks the target and resolves the accessor
//! list without invoking anything on the source object. Rendering walks the accessors, classifies
//! each return value, expands nested nodes and writes the formatted text into a once-only cache.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use error_stack::{Report, ResultExt};
use once_cell::unsync::OnceCell;
use strum_macros::Display;
use tracing::{debug, trace};

use super::policy::{self, Classification};
use super::recursion::RecursionTypes;
use super::schema;
use super::session::GenerationSession;
use super::trail::DiagnosticTrail;
use crate::codegen::{AnonymousClass, Expr, Statement, format_source};
use crate::context::Context;
use crate::error::{AccessorOrigin, Error, Result};
use crate::literal;
use crate::model::{LiveObject, MethodDescriptor, ObjectId, RuntimeType, TargetType, TypeRef, Value};

/// Lifecycle of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeState {
    /// Built, not rendered yet
    Pending,
    /// Accessors are being invoked
    InProgress,
    /// Rendered text is cached
    Complete,
    /// Never retried once reached
    Failed,
}

/// Description of how one object is snapshotted as one target type
pub struct SnapshotNode {
    source:    Rc<dyn LiveObject>,
    runtime:   RuntimeType,
    target:    Rc<TargetType>,
    accessors: Vec<MethodDescriptor>,
    recursion: Rc<RecursionTypes>,
    state:     Cell<NodeState>,
    rendered:  OnceCell<String>,
    trail:     RefCell<DiagnosticTrail>,
}

impl fmt::Debug for SnapshotNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotNode")
            .field("source", &self.source.describe())
            .field("target", self.target.name())
            .field("accessors", &self.accessors.len())
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

impl SnapshotNode {
    /// Describe how `source` will be snapshotted as `target`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `target` cannot be extended, is not assignable from
    /// the source's runtime type, or declares a method with parameters.
    pub fn build(
        source: Rc<dyn LiveObject>,
        target: Rc<TargetType>,
        recursion: Rc<RecursionTypes>,
    ) -> Result<Self> {
        target.ensure_extendable()?;

        let runtime = source.runtime_type();
        if !target.is_assignable_from(&runtime) {
            return Err(Report::new(Error::invalid(
                "type to extend",
                format!(
                    "{} is not assignable from runtime type {}",
                    target.name(),
                    runtime.name
                ),
            ))
            .attach(format!("Object: {}", source.describe())));
        }

        let accessors = schema::resolve(&target)?;

        Ok(Self {
            source,
            runtime,
            target,
            accessors,
            recursion,
            state: Cell::new(NodeState::Pending),
            rendered: OnceCell::new(),
            trail: RefCell::new(DiagnosticTrail::default()),
        })
    }

    /// Identity of the snapshotted object
    #[must_use]
    pub fn identity(&self) -> ObjectId { ObjectId::of(&self.source) }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> NodeState { self.state.get() }

    /// Type the generated anonymous class extends
    #[must_use]
    pub fn target(&self) -> &TargetType { &self.target }

    /// Accessors overridden by the snapshot, sorted by name
    #[must_use]
    pub fn accessors(&self) -> &[MethodDescriptor] { &self.accessors }

    /// Text cached by an earlier successful render
    #[must_use]
    pub fn cached(&self) -> Option<&str> { self.rendered.get().map(String::as_str) }

    /// Render the node, reusing the cached text when there is one
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] when the node is already in progress in `session`, and
    /// otherwise the first accessor or nested expansion failure, annotated with this node. Once a
    /// render fails every later render fails without invoking accessors.
    pub fn render(&self, ctx: &Context, session: &mut GenerationSession) -> Result<String> {
        if let Some(text) = self.rendered.get() {
            return Ok(text.clone());
        }
        if self.state.get() == NodeState::Failed {
            return Err(Report::new(Error::failed_to(
                "render snapshot",
                format!("an earlier attempt for {} failed", self.source.describe()),
            )));
        }

        let id = self.identity();
        session
            .enter(id, || self.source.describe())
            .map_err(|report| self.annotate(report))?;
        self.state.set(NodeState::InProgress);
        trace!(object = %id, target = %self.target.name(), "Rendering snapshot node");

        let result = self.generate_body(ctx, session);
        session.leave(id);

        match result {
            Ok(source) => {
                let text = self
                    .rendered
                    .get_or_init(|| format_source(&source, ctx.options()))
                    .clone();
                self.state.set(NodeState::Complete);
                debug!(
                    object = %id,
                    target = %self.target.name(),
                    accessors = self.accessors.len(),
                    "Rendered snapshot node"
                );
                Ok(text)
            }
            Err(report) => {
                self.state.set(NodeState::Failed);
                debug!(object = %id, error = %report.current_context(), "Snapshot node failed");
                Err(self.annotate(report))
            }
        }
    }

    fn annotate(&self, report: Report<Error>) -> Report<Error> {
        report.attach(format!(
            "While generating a snapshot of {} (actual type: {}; type to extend: {})",
            self.source.describe(),
            self.runtime.name,
            self.target.name()
        ))
    }

    fn generate_body(&self, ctx: &Context, session: &mut GenerationSession) -> Result<String> {
        let nested = ctx.with_snapshot_types(self.recursion.iter().cloned());
        let mut class = AnonymousClass::extending(self.target.as_type_ref());

        for accessor in &self.accessors {
            match self
                .snapshot_accessor(accessor, ctx, &nested, session)
                .map_err(|report| self.annotate_accessor(report, accessor))?
            {
                Some(body) => {
                    class.override_returning(&accessor.name, accessor.return_type.clone(), body);
                }
                None => class.override_empty(&accessor.name, accessor.return_type.clone()),
            }
        }

        Expr::NewAnonymous(class).to_source(&nested)
    }

    /// Body of the override for `accessor`, `None` for void methods
    fn snapshot_accessor(
        &self,
        accessor: &MethodDescriptor,
        ctx: &Context,
        nested: &Context,
        session: &mut GenerationSession,
    ) -> Result<Option<Expr>> {
        if accessor.return_type.is_void() {
            return Ok(None);
        }

        let value = self.source.invoke(&accessor.name).change_context(Error::failed_to(
            "extract value for snapshot",
            accessor.qualified_name(),
        ))?;
        session.retain(&value);
        self.trail.borrow_mut().record_value(&value, accessor);
        trace!(accessor = %accessor.qualified_name(), value = %value.describe(), "Invoked accessor");

        let expr = match policy::classify(
            &value,
            &accessor.return_type,
            ctx,
            &self.recursion,
            session,
        )? {
            Classification::Null => Expr::null(),
            Classification::Canned(expr) => expr,
            Classification::Literal => literal::encode(
                &value,
                Some(&accessor.return_type),
                nested,
                &self.recursion,
                session,
            )?,
            Classification::Recurse(target) => match &value {
                Value::Object(object) => expand(object, target, &self.recursion, nested, session)?,
                other => return Err(policy::not_literalizable(other)),
            },
        };

        if let Some(id) = value.identity() {
            session.record(id, expr.clone());
        }
        Ok(Some(expr))
    }

    fn annotate_accessor(&self, report: Report<Error>, accessor: &MethodDescriptor) -> Report<Error> {
        let origin = match report.current_context() {
            Error::NotLiteralizable { identity, .. } if !report.contains::<AccessorOrigin>() => {
                Some(
                    identity
                        .and_then(|id| self.trail.borrow().origin_of(id))
                        .unwrap_or_else(|| AccessorOrigin::from(accessor)),
                )
            }
            _ => None,
        };
        let report = match origin {
            Some(origin) => report.attach(origin),
            None => report,
        };
        report.attach(format!(
            "In attempt to snapshot return value of {}",
            accessor.qualified_name()
        ))
    }
}

impl Statement for SnapshotNode {
    /// Cached text, or a render in a session of its own
    fn generate(&self, ctx: &Context) -> Result<String> {
        if let Some(text) = self.cached() {
            return Ok(text.to_string());
        }
        self.render(ctx, &mut GenerationSession::default())
    }

    fn described_type(&self) -> TypeRef { self.target.as_type_ref() }
}

/// Expression for `object` snapshotted as `target`, reusing one recorded earlier for its identity
pub(crate) fn expand(
    object: &Rc<dyn LiveObject>,
    target: Rc<TargetType>,
    recursion: &Rc<RecursionTypes>,
    ctx: &Context,
    session: &mut GenerationSession,
) -> Result<Expr> {
    let id = ObjectId::of(object);
    if let Some(expr) = session.lookup(id) {
        return Ok(expr.clone());
    }

    let node = Rc::new(SnapshotNode::build(
        Rc::clone(object),
        target,
        Rc::clone(recursion),
    )?);
    node.render(ctx, session)?;

    let expr = Expr::Statement(node);
    session.record(id, expr.clone());
    Ok(expr)
}
