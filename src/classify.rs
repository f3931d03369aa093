//! Declaration classifier and annotation filter.
//!
//! Stateless, total predicates over modules and declarations. Every later
//! stage consumes a classification computed here exactly once per
//! declaration; nothing downstream re-scans source text for markers.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::ast::{ClassDecl, FunctionDecl, Module};

/// Per-class opt-in decorator (modern form, without the `@`).
pub const BINDGEN_DECORATOR: &str = "jsonBindgen";

/// Module-wide opt-in marker (deprecated form).
pub const MODULE_MARKER: &str = "@jsonfile";

/// Explicit opt-out marker; always wins over any opt-in.
pub const OPT_OUT_MARKER: &str = "@notJsonfile";

/// Payability decorator on functions. Parsed but never altered.
pub const PAYABLE_DECORATOR: &str = "payable";

/// Prefix of every generated wrapper function name.
pub const WRAPPER_PREFIX: &str = "__wrapper_";

fn write_out_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"//.*@jsonfile .*out").expect("write-out marker pattern is valid")
    })
}

/// How a class came to be selected for codec generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Selected by the `@jsonBindgen` decorator on the class itself.
    Decorator,

    /// Selected by the deprecated module-wide `@jsonfile` marker.
    ModuleMarker,
}

/// Classification result for a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassDisposition {
    /// Generate codec methods into the class body.
    Codec {
        /// Which annotation selected the class.
        via: AnnotationKind,
    },

    /// Leave the class untouched.
    Passthrough,
}

/// Check whether a module participates in binding generation at all.
///
/// A module is selected when it carries the module-wide marker, contains a
/// per-class decorator, or is the user entry unit — unless it also carries
/// the explicit opt-out marker, which always wins.
pub fn module_selected(module: &Module) -> bool {
    let decorator = format!("@{}", BINDGEN_DECORATOR);
    let opted_in = module.text.contains(MODULE_MARKER)
        || module.text.contains(&decorator)
        || module.is_user_entry();
    opted_in && !module.text.contains(OPT_OUT_MARKER)
}

/// Resolve how a class should be treated, once, at classification time.
pub fn class_disposition(module: &Module, class: &ClassDecl) -> ClassDisposition {
    if class.has_decorator("notJsonfile") {
        return ClassDisposition::Passthrough;
    }
    if class.has_decorator(BINDGEN_DECORATOR) {
        return ClassDisposition::Codec {
            via: AnnotationKind::Decorator,
        };
    }
    if module.text.contains(MODULE_MARKER) {
        return ClassDisposition::Codec {
            via: AnnotationKind::ModuleMarker,
        };
    }
    ClassDisposition::Passthrough
}

/// Check whether a function belongs to the user entry unit.
pub fn is_entry_function(module: &Module, _func: &FunctionDecl) -> bool {
    module.is_user_entry()
}

/// Check whether a function should receive a wrapper.
///
/// A function is wrappable when it is an entry function, is exported, has
/// not been wrapped before, and actually has something to marshal (a
/// zero-parameter void function is never wrapped).
pub fn is_wrappable(module: &Module, func: &FunctionDecl, wrapped: &HashSet<String>) -> bool {
    is_entry_function(module, func)
        && func.exported
        && !wrapped.contains(&func.name)
        && !(func.params.is_empty() && func.returns_void())
}

/// Check whether a function is marked payable: at least one decorator is
/// literally named `payable`.
pub fn is_payable(func: &FunctionDecl) -> bool {
    func.decorators.iter().any(|d| d == PAYABLE_DECORATOR)
}

/// Check whether a module asks for its generated text to be written to disk.
pub fn wants_write_out(module: &Module) -> bool {
    write_out_regex().is_match(&module.text)
}
