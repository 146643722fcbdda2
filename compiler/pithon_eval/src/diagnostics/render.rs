//! Localized rendering of evaluation errors.
//!
//! # Error Codes
//!
//! | code  | kind |
//! |-------|------|
//! | P0001 | syntax |
//! | P0002 | name |
//! | P0003 | type |
//! | P0004 | zero division |
//! | P0005 | index |
//! | P0006 | attribute |
//! | P0007 | call |
//! | P0008 | loop control outside loop |
//! | P0009 | recursion limit |
//! | P0010 | sequence too large |

use std::fmt::{self, Write};

use crate::errors::{Arity, CallProblem, EvalError, EvalErrorKind};

/// Stable identifier for each error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    P0001,
    P0002,
    P0003,
    P0004,
    P0005,
    P0006,
    P0007,
    P0008,
    P0009,
    P0010,
}

impl ErrorCode {
    pub fn for_kind(kind: &EvalErrorKind) -> Self {
        match kind {
            EvalErrorKind::Syntax { .. } => ErrorCode::P0001,
            EvalErrorKind::Name { .. } => ErrorCode::P0002,
            EvalErrorKind::Type { .. } => ErrorCode::P0003,
            EvalErrorKind::ZeroDivision => ErrorCode::P0004,
            EvalErrorKind::Index { .. } => ErrorCode::P0005,
            EvalErrorKind::Attribute { .. } => ErrorCode::P0006,
            EvalErrorKind::Call { .. } => ErrorCode::P0007,
            EvalErrorKind::ControlOutsideLoop { .. } => ErrorCode::P0008,
            EvalErrorKind::RecursionLimit { .. } => ErrorCode::P0009,
            EvalErrorKind::TooLarge { .. } => ErrorCode::P0010,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::P0001 => "P0001",
            ErrorCode::P0002 => "P0002",
            ErrorCode::P0003 => "P0003",
            ErrorCode::P0004 => "P0004",
            ErrorCode::P0005 => "P0005",
            ErrorCode::P0006 => "P0006",
            ErrorCode::P0007 => "P0007",
            ErrorCode::P0008 => "P0008",
            ErrorCode::P0009 => "P0009",
            ErrorCode::P0010 => "P0010",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of user-facing messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    English,
    French,
}

fn label(kind: &EvalErrorKind, locale: Locale) -> &'static str {
    match (locale, kind) {
        (Locale::English, EvalErrorKind::Syntax { .. }) => "Syntax error",
        (Locale::English, EvalErrorKind::Name { .. }) => "Name error",
        (Locale::English, EvalErrorKind::Type { .. }) => "Type error",
        (Locale::English, EvalErrorKind::ZeroDivision) => "Division error",
        (Locale::English, EvalErrorKind::Index { .. }) => "Index error",
        (Locale::English, EvalErrorKind::Attribute { .. }) => "Attribute error",
        (Locale::English, EvalErrorKind::Call { .. }) => "Call error",
        (Locale::English, EvalErrorKind::ControlOutsideLoop { .. }) => "Control flow error",
        (Locale::English, EvalErrorKind::RecursionLimit { .. }) => "Recursion error",
        (Locale::English, EvalErrorKind::TooLarge { .. }) => "Overflow error",
        (Locale::French, EvalErrorKind::Syntax { .. }) => "Erreur de syntaxe",
        (Locale::French, EvalErrorKind::Name { .. }) => "Erreur de nom",
        (Locale::French, EvalErrorKind::Type { .. }) => "Erreur de type",
        (Locale::French, EvalErrorKind::ZeroDivision) => "Erreur de division",
        (Locale::French, EvalErrorKind::Index { .. }) => "Erreur d'index",
        (Locale::French, EvalErrorKind::Attribute { .. }) => "Erreur d'attribut",
        (Locale::French, EvalErrorKind::Call { .. }) => "Erreur d'appel",
        (Locale::French, EvalErrorKind::ControlOutsideLoop { .. }) => "Erreur de contrôle",
        (Locale::French, EvalErrorKind::RecursionLimit { .. }) => "Erreur de récursion",
        (Locale::French, EvalErrorKind::TooLarge { .. }) => "Erreur de dépassement",
    }
}

fn french_arity(arity: Arity) -> String {
    match arity {
        Arity::Exactly(n) => n.to_string(),
        Arity::Between(lo, hi) => format!("{lo} à {hi}"),
        Arity::AtLeast(n) => format!("au moins {n}"),
    }
}

fn french_message(kind: &EvalErrorKind) -> String {
    match kind {
        EvalErrorKind::Syntax { message, line } => match line {
            Some(line) => format!("{message} à la ligne {line}"),
            None => message.clone(),
        },
        EvalErrorKind::Name { name, .. } => format!("Variable '{name}' non définie"),
        EvalErrorKind::Type {
            expected,
            got,
            operation,
        } => {
            let mut msg = format!("attendu {expected}, reçu {got}");
            if let Some(op) = operation {
                let _ = write!(msg, " pour l'opération '{op}'");
            }
            msg
        }
        EvalErrorKind::ZeroDivision => "Division par zéro".to_string(),
        EvalErrorKind::Index { index, len } => {
            format!("Index {index} hors limites pour une séquence de taille {len}")
        }
        EvalErrorKind::TooLarge { operation, limit } => format!(
            "le résultat de '{operation}' dépasse la taille maximale de séquence ({limit})"
        ),
        EvalErrorKind::Attribute {
            class_name,
            attribute,
        } => format!("L'objet '{class_name}' n'a pas d'attribut '{attribute}'"),
        EvalErrorKind::Call { name, problem } => match problem {
            CallProblem::MissingArgument { expected, got } => {
                format!("Argument manquant pour '{name}': attendu {expected}, reçu {got}")
            }
            CallProblem::TooManyArguments { expected, got } => {
                format!("Trop d'arguments pour '{name}': attendu {expected}, reçu {got}")
            }
            CallProblem::Arity { expected, got } => format!(
                "'{name}' attend {} argument(s), reçu {got}",
                french_arity(*expected)
            ),
        },
        EvalErrorKind::ControlOutsideLoop { keyword } => {
            if *keyword == "return" {
                "'return' en dehors d'une fonction".to_string()
            } else {
                format!("'{keyword}' en dehors d'une boucle")
            }
        }
        EvalErrorKind::RecursionLimit { depth } => {
            format!("profondeur de récursion maximale dépassée (limite: {depth})")
        }
    }
}

/// Render `err` as `"<kind label>: <message>"` in the given locale.
///
/// Name errors list their suggestions. A backtrace, when present, follows
/// on its own lines.
pub fn render(err: &EvalError, locale: Locale) -> String {
    let mut out = String::from(label(&err.kind, locale));
    out.push_str(": ");
    match locale {
        Locale::English => out.push_str(&err.message),
        Locale::French => out.push_str(&french_message(&err.kind)),
    }

    if let EvalErrorKind::Name { suggestions, .. } = &err.kind {
        if !suggestions.is_empty() {
            let lead = match locale {
                Locale::English => ". Did you mean: ",
                Locale::French => ". Suggestions: ",
            };
            out.push_str(lead);
            out.push_str(&suggestions.join(", "));
        }
    }

    if let Some(bt) = &err.backtrace {
        if !bt.is_empty() {
            let heading = match locale {
                Locale::English => "call stack:",
                Locale::French => "pile d'appels:",
            };
            let _ = write!(out, "\n{heading}\n{bt}");
            if out.ends_with('\n') {
                out.pop();
            }
        }
    }

    out
}

/// Like [`render`], with the error's source line when its span is known.
pub fn render_with_source(err: &EvalError, locale: Locale, source: &str) -> String {
    let rendered = render(err, locale);
    let Some(span) = err.span else {
        return rendered;
    };
    let line = span.line_in(source);
    let location = match locale {
        Locale::English => format!("line {line}: "),
        Locale::French => format!("ligne {line}: "),
    };
    format!("{location}{rendered}")
}
