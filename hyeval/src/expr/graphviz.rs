//! Graphviz (`dot`) description of an expression tree.
//!
//! Node identifiers are path prefixes: the root is `_`, the children of a binary node at
//! `p` are `pl` and `pr`, and the operand of a unary node at `p` is `p_`. Inner nodes are
//! labelled with their operator and the number of descendants.
use std::fmt::Write;

use crate::expr::Expression;

impl Expression {
    /// Render this tree as a `digraph` description.
    pub fn to_graphviz(&self) -> String {
        let mut out = String::from("digraph G {\n");
        let mut prefix = String::from("_");
        write_node(self, &mut prefix, &mut out);
        out.push_str("}\n");
        out
    }
}

// Writing into a `String` never fails, so the `fmt::Result`s below are discarded.
fn write_node(expr: &Expression, prefix: &mut String, out: &mut String) {
    match expr {
        Expression::Constant(_) | Expression::Variable(_) => {
            let _ = writeln!(out, "{prefix} [label=\"{expr}\"]");
        }
        Expression::Unary(node) => {
            write_inner_label(prefix, node.op().symbol(), expr.node_count(), out);
            write_child(node.operand(), prefix, '_', out);
        }
        Expression::Binary(node) => {
            write_inner_label(prefix, node.op().symbol(), expr.node_count(), out);
            let _ = writeln!(out, "{prefix} -> {prefix}l [label=\"\"]");
            let _ = writeln!(out, "{prefix} -> {prefix}r [label=\"\"]");
            descend(node.lhs(), prefix, 'l', out);
            descend(node.rhs(), prefix, 'r', out);
        }
    }
}

fn write_inner_label(prefix: &str, symbol: &str, count: usize, out: &mut String) {
    let _ = writeln!(out, "{prefix} [label=\"{symbol} [{}]\"]", count - 1);
}

fn write_child(child: &Expression, prefix: &mut String, suffix: char, out: &mut String) {
    let _ = writeln!(out, "{prefix} -> {prefix}{suffix} [label=\"\"]");
    descend(child, prefix, suffix, out);
}

fn descend(child: &Expression, prefix: &mut String, suffix: char, out: &mut String) {
    prefix.push(suffix);
    write_node(child, prefix, out);
    prefix.pop();
}
