//! Syntax checking against the Python grammar proper.
//!
//! Tree-sitter recovers from errors and still accepts Python 2 statements,
//! so it cannot decide validity on its own. Sources are first run through
//! `rustpython-parser`, then through the checks Python performs on the
//! finished tree (assignment targets, default argument order).

use codegrade_core::{ParseError, ParseErrorKind, Span};
use rustpython_parser::ast::{self, Expr, Stmt};
use rustpython_parser::{parse, Mode, ParseErrorType};

/// Checks `source` as a Python module.
///
/// # Errors
///
/// Returns the first syntax error in the source.
pub fn check(source: &str) -> Result<(), ParseError> {
    let module = parse(source, Mode::Module, "<string>").map_err(|e| {
        let kind = match e.error {
            ParseErrorType::Eof => ParseErrorKind::MissingToken,
            _ => ParseErrorKind::InvalidSyntax,
        };
        ParseError::new(kind, e.error.to_string(), span_at(source, e.offset.into()))
    })?;

    let body = match module {
        ast::Mod::Module(m) => m.body,
        _ => return Ok(()),
    };

    match check_suite(&body) {
        Some((offset, message)) => Err(ParseError::new(
            ParseErrorKind::InvalidSyntax,
            message,
            span_at(source, offset),
        )),
        None => Ok(()),
    }
}

/// Converts a byte offset into a 1-indexed line/column span.
fn span_at(source: &str, offset: usize) -> Span {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    let length = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    Span::new(line, column).with_bytes(offset, length)
}

type Violation = (usize, &'static str);

fn check_suite(stmts: &[Stmt]) -> Option<Violation> {
    stmts.iter().find_map(check_stmt)
}

fn check_stmt(stmt: &Stmt) -> Option<Violation> {
    match stmt {
        Stmt::Assign(s) if !s.targets.iter().all(is_store_target) => {
            Some((at(s.range.start()), "cannot assign to expression"))
        }
        Stmt::AugAssign(s) if !is_single_target(&s.target) => Some((
            at(s.range.start()),
            "illegal expression for augmented assignment",
        )),
        Stmt::AnnAssign(s) if !is_single_target(&s.target) => {
            Some((at(s.range.start()), "illegal target for annotation"))
        }
        Stmt::FunctionDef(f) => {
            check_defaults(&f.args, at(f.range.start())).or_else(|| check_suite(&f.body))
        }
        Stmt::AsyncFunctionDef(f) => {
            check_defaults(&f.args, at(f.range.start())).or_else(|| check_suite(&f.body))
        }
        Stmt::ClassDef(c) => check_suite(&c.body),
        Stmt::For(s) => check_loop_target(&s.target, at(s.range.start()))
            .or_else(|| check_suite(&s.body))
            .or_else(|| check_suite(&s.orelse)),
        Stmt::AsyncFor(s) => check_loop_target(&s.target, at(s.range.start()))
            .or_else(|| check_suite(&s.body))
            .or_else(|| check_suite(&s.orelse)),
        Stmt::While(s) => check_suite(&s.body).or_else(|| check_suite(&s.orelse)),
        Stmt::If(s) => check_suite(&s.body).or_else(|| check_suite(&s.orelse)),
        Stmt::With(s) => check_suite(&s.body),
        Stmt::AsyncWith(s) => check_suite(&s.body),
        Stmt::Match(s) => s.cases.iter().find_map(|case| check_suite(&case.body)),
        Stmt::Try(s) => check_try(&s.body, &s.handlers, &s.orelse, &s.finalbody),
        Stmt::TryStar(s) => check_try(&s.body, &s.handlers, &s.orelse, &s.finalbody),
        _ => None,
    }
}

fn check_try(
    body: &[Stmt],
    handlers: &[ast::ExceptHandler],
    orelse: &[Stmt],
    finalbody: &[Stmt],
) -> Option<Violation> {
    check_suite(body)
        .or_else(|| {
            handlers.iter().find_map(|handler| {
                let ast::ExceptHandler::ExceptHandler(h) = handler;
                check_suite(&h.body)
            })
        })
        .or_else(|| check_suite(orelse))
        .or_else(|| check_suite(finalbody))
}

fn check_loop_target(target: &Expr, offset: usize) -> Option<Violation> {
    (!is_store_target(target)).then_some((offset, "cannot assign to expression"))
}

/// A parameter without a default may not follow one that has a default.
fn check_defaults(args: &ast::Arguments, offset: usize) -> Option<Violation> {
    let mut seen_default = false;
    for arg in args.posonlyargs.iter().chain(&args.args) {
        if arg.default.is_some() {
            seen_default = true;
        } else if seen_default {
            return Some((offset, "non-default argument follows default argument"));
        }
    }
    None
}

fn is_single_target(expr: &Expr) -> bool {
    matches!(expr, Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_))
}

fn is_store_target(expr: &Expr) -> bool {
    match expr {
        Expr::Starred(s) => is_store_target(&s.value),
        Expr::Tuple(t) => t.elts.iter().all(is_store_target),
        Expr::List(l) => l.elts.iter().all(is_store_target),
        other => is_single_target(other),
    }
}

fn at(position: impl Into<usize>) -> usize {
    position.into()
}
