//! Generic traversal helpers over syntax trees.
//!
//! Children are reached through named slots. The two helpers deliberately walk
//! different slot sets:
//!
//! - [`filter_nodes`] visits `left`, `op`, `right`, `value`, `args`, `prefix`
//! - [`map_nodes`] additionally visits `body`, `params`, `expression`
//!
//! Neither visits declaration names, object keys, field types or the `elses`
//! of an `if`. Downstream validators rely on exactly these sets.

use crate::ast::{Node, NodeKind};

/// A named child position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Left operand of binary and assignment nodes
    Left,
    /// Operator node of binary and assignment nodes
    Op,
    /// Right operand of binary and assignment nodes
    Right,
    /// Operand of unary nodes, value of declarations and returns, items of
    /// array and object literals
    Value,
    /// Call arguments
    Args,
    /// The expression a node chains from
    Prefix,
    /// Statements of functions, `if`/`else` branches, items of collections
    Body,
    /// Function parameters
    Params,
    /// Condition of `if`/`else if`, inner expression of computed keys
    Expression,
}

/// Slots visited by [`filter_nodes`], in visiting order.
pub const FILTER_SLOTS: [Slot; 6] = [
    Slot::Left,
    Slot::Op,
    Slot::Right,
    Slot::Value,
    Slot::Args,
    Slot::Prefix,
];

/// Slots visited by [`map_nodes`], in visiting order.
pub const MAP_SLOTS: [Slot; 9] = [
    Slot::Left,
    Slot::Op,
    Slot::Right,
    Slot::Value,
    Slot::Args,
    Slot::Prefix,
    Slot::Body,
    Slot::Params,
    Slot::Expression,
];

impl Node {
    /// Children held in `slot`, in source order.
    pub fn children(&self, slot: Slot) -> Vec<&Node> {
        if slot == Slot::Prefix {
            return self.prefix.as_deref().into_iter().collect();
        }

        match (slot, &self.kind) {
            (Slot::Left, NodeKind::Binary { left, .. } | NodeKind::Assign { left, .. }) => {
                vec![left.as_ref()]
            }
            (Slot::Op, NodeKind::Binary { op, .. } | NodeKind::Assign { op, .. }) => {
                vec![op.as_ref()]
            }
            (Slot::Right, NodeKind::Binary { right, .. } | NodeKind::Assign { right, .. }) => {
                vec![right.as_ref()]
            }
            (
                Slot::Value,
                NodeKind::Array { items } | NodeKind::Object { entries: items },
            ) => items.iter().collect(),
            (
                Slot::Value,
                NodeKind::ObjectKeyValue { value, .. }
                | NodeKind::Not { value }
                | NodeKind::Negate { value }
                | NodeKind::Const { value, .. },
            ) => vec![value.as_ref()],
            (Slot::Value, NodeKind::Return { value } | NodeKind::Let { value, .. }) => {
                value.as_deref().into_iter().collect()
            }
            (Slot::Args, NodeKind::Call { args }) => args.iter().collect(),
            (
                Slot::Body,
                NodeKind::Function { body, .. }
                | NodeKind::If { body, .. }
                | NodeKind::ElseIf { body, .. }
                | NodeKind::Else { body }
                | NodeKind::Collection { items: body, .. },
            ) => body.iter().collect(),
            (Slot::Params, NodeKind::Function { params, .. }) => params.iter().collect(),
            (
                Slot::Expression,
                NodeKind::If { expression, .. }
                | NodeKind::ElseIf { expression, .. }
                | NodeKind::Computed { expression },
            ) => vec![expression.as_ref()],
            _ => Vec::new(),
        }
    }

    fn children_mut(&mut self, slot: Slot) -> Vec<&mut Node> {
        if slot == Slot::Prefix {
            return self.prefix.as_deref_mut().into_iter().collect();
        }

        match (slot, &mut self.kind) {
            (Slot::Left, NodeKind::Binary { left, .. } | NodeKind::Assign { left, .. }) => {
                vec![left.as_mut()]
            }
            (Slot::Op, NodeKind::Binary { op, .. } | NodeKind::Assign { op, .. }) => {
                vec![op.as_mut()]
            }
            (Slot::Right, NodeKind::Binary { right, .. } | NodeKind::Assign { right, .. }) => {
                vec![right.as_mut()]
            }
            (
                Slot::Value,
                NodeKind::Array { items } | NodeKind::Object { entries: items },
            ) => items.iter_mut().collect(),
            (
                Slot::Value,
                NodeKind::ObjectKeyValue { value, .. }
                | NodeKind::Not { value }
                | NodeKind::Negate { value }
                | NodeKind::Const { value, .. },
            ) => vec![value.as_mut()],
            (Slot::Value, NodeKind::Return { value } | NodeKind::Let { value, .. }) => {
                value.as_deref_mut().into_iter().collect()
            }
            (Slot::Args, NodeKind::Call { args }) => args.iter_mut().collect(),
            (
                Slot::Body,
                NodeKind::Function { body, .. }
                | NodeKind::If { body, .. }
                | NodeKind::ElseIf { body, .. }
                | NodeKind::Else { body }
                | NodeKind::Collection { items: body, .. },
            ) => body.iter_mut().collect(),
            (Slot::Params, NodeKind::Function { params, .. }) => params.iter_mut().collect(),
            (
                Slot::Expression,
                NodeKind::If { expression, .. }
                | NodeKind::ElseIf { expression, .. }
                | NodeKind::Computed { expression },
            ) => vec![expression.as_mut()],
            _ => Vec::new(),
        }
    }
}

/// Collects every node matching `predicate`, children before their parent.
///
/// # Examples
///
/// ```
/// use schema_lang::{filter_all, parse};
///
/// let nodes = parse("10 / func(name)").unwrap();
/// let calls = filter_all(&nodes, |n| n.type_name() == "call");
/// assert_eq!(calls.len(), 1);
/// ```
pub fn filter_nodes<'a, P>(node: &'a Node, predicate: P) -> Vec<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    let mut found = Vec::new();
    collect(node, &predicate, &mut found);
    found
}

/// [`filter_nodes`] over a statement list.
pub fn filter_all<'a, P>(nodes: &'a [Node], predicate: P) -> Vec<&'a Node>
where
    P: Fn(&Node) -> bool,
{
    let mut found = Vec::new();
    for node in nodes {
        collect(node, &predicate, &mut found);
    }
    found
}

fn collect<'a, P>(node: &'a Node, predicate: &P, found: &mut Vec<&'a Node>)
where
    P: Fn(&Node) -> bool,
{
    for slot in FILTER_SLOTS {
        for child in node.children(slot) {
            collect(child, predicate, found);
        }
    }
    if predicate(node) {
        found.push(node);
    }
}

/// Builds a new tree by applying `f` to every node, parents first.
///
/// `f` sees a node before its children are visited; the children of the node
/// it returns are the ones mapped next. The input tree is left untouched.
///
/// # Examples
///
/// ```
/// use schema_lang::{Node, NodeKind, map_nodes, parse, unparse};
///
/// let nodes = parse("a + b").unwrap();
/// let renamed = map_nodes(&nodes[0], |n| match &n.kind {
///     NodeKind::Name(name) if name == "a" => Node {
///         kind: NodeKind::Name("x".into()),
///         ..n.clone()
///     },
///     _ => n.clone(),
/// });
/// assert_eq!(unparse(&renamed), "x + b");
/// ```
pub fn map_nodes<F>(node: &Node, mut f: F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    map_node(node, &mut f)
}

/// [`map_nodes`] over a statement list.
pub fn map_all<F>(nodes: &[Node], mut f: F) -> Vec<Node>
where
    F: FnMut(&Node) -> Node,
{
    nodes.iter().map(|node| map_node(node, &mut f)).collect()
}

fn map_node<F>(node: &Node, f: &mut F) -> Node
where
    F: FnMut(&Node) -> Node,
{
    let mut mapped = f(node);
    for slot in MAP_SLOTS {
        for child in mapped.children_mut(slot) {
            *child = map_node(child, f);
        }
    }
    mapped
}
