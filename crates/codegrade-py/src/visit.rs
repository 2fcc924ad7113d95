//! Document-order traversal over a syntax tree.
//!
//! [`walk`] visits every named node in pre-order, which is the order the
//! nodes appear in the source. Each node is classified with
//! [`SyntaxNode::classify`] and handed to the matching [`Visitor`] method.
//!
//! ```
//! use codegrade_py::{AssignNode, ParsedModule, Visitor};
//!
//! struct CountAssignments(usize);
//!
//! impl<'t> Visitor<'t> for CountAssignments {
//!     fn visit_assign(&mut self, _node: &AssignNode<'t>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let module = ParsedModule::parse("a = 1\nb = 2\n");
//! let mut counter = CountAssignments(0);
//! module.walk(&mut counter);
//! assert_eq!(counter.0, 2);
//! ```

use tree_sitter::Node;

use crate::node::{AssignNode, FunctionDefNode, SyntaxNode};

/// Callbacks for [`walk`]. Every method defaults to doing nothing.
pub trait Visitor<'t> {
    /// Called for each assignment statement.
    fn visit_assign(&mut self, _node: &AssignNode<'t>) {}

    /// Called for each function definition.
    fn visit_function_def(&mut self, _node: &FunctionDefNode<'t>) {}

    /// Called for every other named node.
    fn visit_other(&mut self, _node: Node<'t>) {}
}

/// Visits `root` and all of its named descendants in pre-order.
///
/// Iterative, so deeply nested sources cannot overflow the stack.
pub fn walk<'t, V>(root: Node<'t>, visitor: &mut V)
where
    V: Visitor<'t> + ?Sized,
{
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_named() {
            dispatch(SyntaxNode::classify(node), visitor);
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn dispatch<'t, V>(node: SyntaxNode<'t>, visitor: &mut V)
where
    V: Visitor<'t> + ?Sized,
{
    match node {
        SyntaxNode::Assign(a) => visitor.visit_assign(&a),
        SyntaxNode::FunctionDef(f) => visitor.visit_function_def(&f),
        SyntaxNode::Other(n) => visitor.visit_other(n),
    }
}
