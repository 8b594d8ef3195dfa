use crate::ast::{Node, NodeKind};

/// Sort direction of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One field of an `@index(...)` directive.
///
/// `direction` is `None` when the source omitted it (`@index(name)`), which
/// sorts ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexField {
    pub name: String,
    pub direction: Option<Direction>,
}

impl IndexField {
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or(Direction::Asc)
    }
}

impl Node {
    /// Collection name, for `Collection` nodes
    pub fn collection_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Collection { name, .. } => Some(name),
            _ => None,
        }
    }

    fn items(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Collection { items, .. } => items,
            _ => &[],
        }
    }

    /// Field declarations of a collection, in source order.
    pub fn fields(&self) -> impl Iterator<Item = &Node> {
        self.items()
            .iter()
            .filter(|item| matches!(item.kind, NodeKind::Field { .. }))
    }

    /// Functions declared inside a collection, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &Node> {
        self.items()
            .iter()
            .filter(|item| matches!(item.kind, NodeKind::Function { .. }))
    }

    /// Index directives of a collection, in source order.
    pub fn indexes(&self) -> impl Iterator<Item = &Node> {
        self.items()
            .iter()
            .filter(|item| matches!(item.kind, NodeKind::Index { .. }))
    }

    /// Looks up a function of a collection by name.
    pub fn function(&self, wanted: &str) -> Option<&Node> {
        self.functions()
            .find(|f| matches!(&f.kind, NodeKind::Function { name, .. } if name == wanted))
    }
}

/// Finds a top-level collection by name.
pub fn find_collection<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
    nodes
        .iter()
        .find(|node| node.collection_name() == Some(name))
}
