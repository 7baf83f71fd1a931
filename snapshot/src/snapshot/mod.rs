//! Object-graph snapshot generation
//!
//! [`make_snapshot_as_subclass`] describes how a live object is frozen into an anonymous subclass
//! of a target type; the returned [`Snapshot`] renders that description to source on demand.
//! Every render of an uncached snapshot runs in its own [`GenerationSession`], so identity state
//! never leaks between invocations.

mod canned;
mod cycle;
mod memo;
mod node;
mod policy;
mod recursion;
mod schema;
mod session;
mod trail;

use std::fmt;
use std::rc::Rc;

pub use canned::CannedRepresentations;
pub use cycle::CycleDetector;
use error_stack::Report;
pub use memo::Memoizer;
pub(crate) use node::expand;
pub use node::{NodeState, SnapshotNode};
pub(crate) use policy::not_literalizable;
pub use policy::{Classification, classify};
pub use recursion::RecursionTypes;
pub use schema::resolve;
pub use session::GenerationSession;
pub use trail::DiagnosticTrail;
use tracing::debug;

use crate::codegen::Statement;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::{TargetType, TypeRef, Value};

/// A described, lazily rendered snapshot of one object
pub struct Snapshot {
    root:   Rc<SnapshotNode>,
    canned: CannedRepresentations,
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("root", &self.root)
            .field("canned", &self.canned.len())
            .finish()
    }
}

impl Snapshot {
    /// Node describing the snapshotted object
    #[must_use]
    pub fn root(&self) -> &SnapshotNode { &self.root }

    /// Type the generated anonymous class extends
    #[must_use]
    pub fn target(&self) -> &TargetType { self.root.target() }

    /// Render to formatted source; same as [`Statement::generate`]
    ///
    /// # Errors
    ///
    /// Returns the first failure met while invoking accessors or expanding nested values. A
    /// failed snapshot keeps failing without invoking accessors again.
    pub fn render(&self, ctx: &Context) -> Result<String> { self.generate(ctx) }
}

impl Statement for Snapshot {
    fn generate(&self, ctx: &Context) -> Result<String> {
        if let Some(text) = self.root.cached() {
            return Ok(text.to_string());
        }
        let mut session = GenerationSession::new(&self.canned);
        let text = self.root.render(ctx, &mut session)?;
        debug!(
            target = %self.root.target().name(),
            memoized = session.memoized(),
            "Generated snapshot"
        );
        Ok(text)
    }

    fn described_type(&self) -> TypeRef { self.root.target().as_type_ref() }
}

/// Describe `object` as an anonymous subclass of `type_to_extend`
///
/// Values returned by accessors whose identity is a key of `canned` are replaced by the canned
/// expression. Values whose declared type is one of `recursion_types` are expanded by nested
/// snapshots. No accessor is invoked until the snapshot is rendered.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `object` is not an object, when the object's runtime
/// type cannot be assigned to `type_to_extend`, when `type_to_extend` cannot be extended, or when
/// it declares a public method with parameters other than `equals` and `hashCode`.
pub fn make_snapshot_as_subclass(
    object: &Value,
    type_to_extend: &TargetType,
    canned: Option<&CannedRepresentations>,
    recursion_types: &[TargetType],
) -> Result<Snapshot> {
    let source = match object {
        Value::Object(source) => Rc::clone(source),
        Value::Null => {
            return Err(Report::new(Error::invalid(
                "object to snapshot",
                "cannot snapshot null",
            )));
        }
        other => {
            return Err(Report::new(Error::invalid(
                "object to snapshot",
                format!("{} of type {} has no accessors", other.describe(), other.type_name()),
            )));
        }
    };

    let recursion = Rc::new(RecursionTypes::new(recursion_types.iter().cloned()));
    let root = SnapshotNode::build(source, Rc::new(type_to_extend.clone()), recursion)?;

    Ok(Snapshot {
        root:   Rc::new(root),
        canned: canned.cloned().unwrap_or_default(),
    })
}
