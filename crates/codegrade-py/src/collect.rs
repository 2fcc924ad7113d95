//! Visitors that collect variable and function records.

use codegrade_core::{FunctionRecord, VariableRecord};

use crate::node::{AssignNode, FunctionDefNode};
use crate::visit::Visitor;

/// Collects one [`VariableRecord`] per simple `name = value` assignment.
pub struct VariableCollector<'s> {
    src: &'s [u8],
    records: Vec<VariableRecord>,
}

impl<'s> VariableCollector<'s> {
    /// Creates a collector reading identifier text from `src`.
    #[must_use]
    pub fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            records: Vec::new(),
        }
    }

    /// Consumes the collector, returning records in document order.
    #[must_use]
    pub fn into_records(self) -> Vec<VariableRecord> {
        self.records
    }
}

impl<'t> Visitor<'t> for VariableCollector<'_> {
    fn visit_assign(&mut self, node: &AssignNode<'t>) {
        if let Some(name) = node.simple_target(self.src) {
            self.records.push(VariableRecord::new(name, node.line()));
        }
    }
}

/// Collects one [`FunctionRecord`] per function definition, nested ones included.
pub struct FunctionCollector<'s> {
    src: &'s [u8],
    records: Vec<FunctionRecord>,
}

impl<'s> FunctionCollector<'s> {
    /// Creates a collector reading identifier text from `src`.
    #[must_use]
    pub fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            records: Vec::new(),
        }
    }

    /// Consumes the collector, returning records in document order.
    #[must_use]
    pub fn into_records(self) -> Vec<FunctionRecord> {
        self.records
    }
}

impl<'t> Visitor<'t> for FunctionCollector<'_> {
    fn visit_function_def(&mut self, node: &FunctionDefNode<'t>) {
        let Some(name) = node.name(self.src) else {
            return;
        };
        self.records.push(
            FunctionRecord::new(name, node.parameter_names(self.src), node.line())
                .with_async(node.is_async()),
        );
    }
}
