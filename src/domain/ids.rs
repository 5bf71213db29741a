use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// A typed identifier wrapper. The phantom tag prevents, say, a `NodeId`
/// from being passed where an `EdgeName` is expected, while the wire
/// representation stays a plain string.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
pub struct Id<T> {
    pub id: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct EdgeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct PrincipalTag;

/// An intersection/location in the road network. Nodes have no lifecycle of
/// their own; they exist by being referenced from a road.
pub type NodeId = Id<NodeTag>;

/// The administrative name of a road segment, e.g. `"N1--To--N2"`.
pub type EdgeName = Id<EdgeTag>;

/// An authenticated caller identity, issued by the (external) access layer.
pub type PrincipalId = Id<PrincipalTag>;
