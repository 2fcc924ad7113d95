//! Closed classification of Python syntax tree nodes.
//!
//! Extraction only needs two node kinds. Everything else is carried as
//! [`SyntaxNode::Other`] so visitors can ignore it without inspecting
//! grammar kind strings themselves.

use tree_sitter::Node;

/// Grammar kind of `name = value` statements (also chained and annotated forms).
const ASSIGNMENT: &str = "assignment";
/// Grammar kind of `def` and `async def` statements.
const FUNCTION_DEFINITION: &str = "function_definition";

/// A syntax tree node, classified by what extraction does with it.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'t> {
    /// An assignment statement.
    Assign(AssignNode<'t>),
    /// A function definition.
    FunctionDef(FunctionDefNode<'t>),
    /// Any other node.
    Other(Node<'t>),
}

impl<'t> SyntaxNode<'t> {
    /// Classifies a raw tree-sitter node.
    #[must_use]
    pub fn classify(node: Node<'t>) -> Self {
        match node.kind() {
            ASSIGNMENT => Self::Assign(AssignNode { node }),
            FUNCTION_DEFINITION => Self::FunctionDef(FunctionDefNode { node }),
            _ => Self::Other(node),
        }
    }

    /// The underlying tree-sitter node.
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        match self {
            Self::Assign(a) => a.node,
            Self::FunctionDef(f) => f.node,
            Self::Other(n) => *n,
        }
    }

    /// Line of the node's first byte (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        line_of(&self.node())
    }
}

fn line_of(node: &Node<'_>) -> usize {
    node.start_position().row + 1
}

fn text<'s>(node: &Node<'_>, src: &'s [u8]) -> Option<&'s str> {
    node.utf8_text(src).ok()
}

/// An `assignment` node.
#[derive(Debug, Clone, Copy)]
pub struct AssignNode<'t> {
    node: Node<'t>,
}

impl<'t> AssignNode<'t> {
    /// The underlying tree-sitter node.
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Left-hand side of the assignment.
    #[must_use]
    pub fn target(&self) -> Option<Node<'t>> {
        self.node.child_by_field_name("left")
    }

    /// Whether the target carries a type annotation (`x: int = 1`).
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.node.child_by_field_name("type").is_some()
    }

    /// The bound name, if this is a plain `name = value` assignment.
    ///
    /// Tuple, attribute and subscript targets return `None`, as do
    /// annotated assignments.
    #[must_use]
    pub fn simple_target<'s>(&self, src: &'s [u8]) -> Option<&'s str> {
        if self.is_annotated() {
            return None;
        }
        let target = self.target()?;
        if target.kind() != "identifier" {
            return None;
        }
        text(&target, src)
    }

    /// Line of the assignment (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        line_of(&self.node)
    }
}

/// A `function_definition` node.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDefNode<'t> {
    node: Node<'t>,
}

impl<'t> FunctionDefNode<'t> {
    /// The underlying tree-sitter node.
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Function name.
    #[must_use]
    pub fn name<'s>(&self, src: &'s [u8]) -> Option<&'s str> {
        let name = self.node.child_by_field_name("name")?;
        text(&name, src)
    }

    /// Whether this is an `async def`.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.node.child(0).is_some_and(|c| c.kind() == "async")
    }

    /// Declared parameter names in order.
    ///
    /// Plain, typed and defaulted parameters are included, keyword-only
    /// ones too. `*args`, `**kwargs` and the bare `*` and `/` separators
    /// are not.
    #[must_use]
    pub fn parameter_names(&self, src: &[u8]) -> Vec<String> {
        let Some(params) = self.node.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            let ident = match param.kind() {
                "identifier" => Some(param),
                "default_parameter" | "typed_default_parameter" => {
                    param.child_by_field_name("name")
                }
                // The name of a typed parameter is its first child; for
                // `*args: int` that child is a splat pattern, not an identifier.
                "typed_parameter" => param.named_child(0),
                _ => None,
            };

            if let Some(ident) = ident.filter(|n| n.kind() == "identifier") {
                if let Some(name) = text(&ident, src) {
                    names.push(name.to_owned());
                }
            }
        }
        names
    }

    /// Line of the `def` keyword (1-indexed), excluding decorators.
    #[must_use]
    pub fn line(&self) -> usize {
        line_of(&self.node)
    }
}
