//! Accessor provenance for diagnostics

use std::collections::HashMap;

use crate::error::AccessorOrigin;
use crate::model::{MethodDescriptor, ObjectId, Value};

impl From<&MethodDescriptor> for AccessorOrigin {
    fn from(accessor: &MethodDescriptor) -> Self {
        Self {
            declaring_type: accessor.declaring_type.clone(),
            accessor:       accessor.name.clone(),
            return_type:    accessor.return_type.clone(),
        }
    }
}

/// Which accessor produced each identity-bearing return value of one node
#[derive(Debug, Default)]
pub struct DiagnosticTrail {
    origins: HashMap<ObjectId, MethodDescriptor>,
}

impl DiagnosticTrail {
    /// Remember that `accessor` returned the value identified by `id`
    pub fn record(&mut self, id: ObjectId, accessor: &MethodDescriptor) {
        self.origins.insert(id, accessor.clone());
    }

    /// Record `value` and, for lists, every element reachable through it
    pub fn record_value(&mut self, value: &Value, accessor: &MethodDescriptor) {
        if let Some(id) = value.identity() {
            self.record(id, accessor);
        }
        if let Value::List(items) = value {
            for item in items.iter() {
                self.record_value(item, accessor);
            }
        }
    }

    /// Accessor that returned the value identified by `id`
    #[must_use]
    pub fn origin_of(&self, id: ObjectId) -> Option<AccessorOrigin> {
        self.origins.get(&id).map(AccessorOrigin::from)
    }

    /// Number of recorded identities
    #[must_use]
    pub fn len(&self) -> usize { self.origins.len() }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool { self.origins.is_empty() }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::{TargetType, TypeRef};

    #[test]
    fn test_origin_names_declaring_type_and_accessor() {
        let target = TargetType::interface("com.example.Owner")
            .accessor("getPet", TypeRef::named("com.example.Pet"));
        let mut trail = DiagnosticTrail::default();
        trail.record(ObjectId::from_raw(3), &target.methods()[0]);

        let origin = trail.origin_of(ObjectId::from_raw(3)).unwrap();
        assert_eq!(origin.declaring_type.as_str(), "com.example.Owner");
        assert_eq!(origin.accessor, "getPet");
        assert_eq!(origin.return_type, TypeRef::named("com.example.Pet"));
        assert!(trail.origin_of(ObjectId::from_raw(4)).is_none());
    }

    #[test]
    fn test_list_elements_share_the_accessor_of_their_list() {
        let target = TargetType::interface("com.example.Owner")
            .accessor("getTags", TypeRef::generic("java.util.List", [TypeRef::string()]));
        let inner = Value::list([Value::string("a")]);
        let outer = Value::list([inner.clone(), Value::Int(1)]);
        let mut trail = DiagnosticTrail::default();
        trail.record_value(&outer, &target.methods()[0]);

        assert_eq!(trail.len(), 2);
        let origin = trail.origin_of(inner.identity().unwrap()).unwrap();
        assert_eq!(origin.accessor, "getTags");
    }
}
