//! RcDoc-based pretty-printer with termcolor annotations for [`Expression`].
//!
//! Role
//! - Convert an expression into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! The layout keeps the fully parenthesised shape of [`Display`](std::fmt::Display) but may
//! break long binary nodes across lines, nesting the right operand.

use crate::expr::Expression;
use crate::expr::variant::UnaryOp;
use pretty::{RcDoc, RenderAnnotated};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Constant, // T, F
    Operator, // !, &&, ||, ^, <->, ->
    Ident,    // variables
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    5 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Constant => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
        }
        s
    }
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Operator)
}

fn to_doc_with_depth(e: &Expression, depth: u8) -> RcDoc<'static, Style> {
    let inner = depth.wrapping_add(1);
    match e {
        Expression::Constant(value) => {
            RcDoc::as_string(if *value { "T" } else { "F" }).annotate(Style::Constant)
        }
        Expression::Variable(node) => RcDoc::as_string(node.name()).annotate(Style::Ident),
        Expression::Unary(node) => {
            let body = to_doc_with_depth(node.operand(), inner);
            let body = match node.op() {
                UnaryOp::Identity => body,
                UnaryOp::Negation => op("!").append(body),
            };
            lparen(depth).append(body).append(rparen(depth)).group()
        }
        Expression::Binary(node) => lparen(depth)
            .append(to_doc_with_depth(node.lhs(), inner))
            .append(RcDoc::space())
            .append(op(node.op().symbol()))
            .append(RcDoc::line().append(to_doc_with_depth(node.rhs(), inner)).nest(1))
            .append(rparen(depth))
            .group(),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Convenience: retrieve the width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for expressions.
pub trait PrettyExpr {
    /// Build an RcDoc representation of this expression with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render this expression with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print this expression to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()>;

    /// Format this expression into a plain string (no colors) at the given width.
    fn pretty_string(&self, width: usize) -> String;
}

impl PrettyExpr for Expression {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)
    }

    fn pretty_string(&self, width: usize) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(width, &mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::func::*;

    fn sample() -> Expression {
        identity(or(
            implies(constant(false), equiv(constant(true), constant(true))),
            and(xor(constant(true), not(constant(true))), constant(false)),
        ))
    }

    #[test]
    fn wide_layout_matches_display() {
        let e = sample();
        assert_eq!(e.pretty_string(200), e.to_string());
    }

    #[test]
    fn narrow_layout_breaks_lines() {
        let e = sample();
        let narrow = e.pretty_string(10);
        assert!(narrow.contains('\n'));
        let flattened: String = narrow.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(flattened, e.to_string());
    }

    #[test]
    fn colored_render_to_buffer() {
        let e = and(variable("a").unwrap(), constant(true));
        let mut buf = termcolor::Buffer::no_color();
        e.pretty_render_to(80, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), "(a && T)");
    }
}
