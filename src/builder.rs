//! Module orchestrator.
//!
//! Walks a module's declarations once, in order, and assembles the output
//! text: codec classes are replaced by their augmented rendering, wrappable
//! entry functions are demoted and get a buffered top-level wrapper, and
//! everything else passes through. The builder owns the only mutable state
//! of the transform.

use std::collections::HashSet;

use crate::ast::{Declaration, Module};
use crate::classify::{class_disposition, is_wrappable, AnnotationKind, ClassDisposition};
use crate::codec::codec_methods;
use crate::diagnostics::Diagnostics;
use crate::error::TransformError;
use crate::fragment::{render_class, render_function, Fragment};
use crate::wrapper::wrapper_function;

/// Single-pass bindings generator for one or more modules.
///
/// State carried across builds: classes already given a codec (so the
/// deprecation warning fires once per class) and functions already wrapped
/// (so re-visiting a module never produces a second wrapper).
#[derive(Debug, Default)]
pub struct BindingsBuilder {
    seen_classes: HashSet<String>,
    wrapped_fns: HashSet<String>,
    fragments: Vec<Fragment>,
    diagnostics: Diagnostics,
}

impl BindingsBuilder {
    /// Create a builder with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the output text for a module.
    ///
    /// The input is not mutated; the result is a fresh module-level text
    /// blob. A fatal error aborts the whole module with no partial output.
    pub fn build(&mut self, module: &Module) -> Result<String, TransformError> {
        // Synthesize every codec fragment up front: codec generation is the
        // only fallible step, and failing here leaves the builder untouched,
        // so an aborted module produces no partial output and no stale state.
        let mut codecs: Vec<Option<(String, AnnotationKind)>> = Vec::new();
        for declaration in &module.declarations {
            let codec = match declaration {
                Declaration::Class(class) => match class_disposition(module, class) {
                    ClassDisposition::Codec { via } => Some((codec_methods(class)?, via)),
                    ClassDisposition::Passthrough => None,
                },
                _ => None,
            };
            codecs.push(codec);
        }

        let mut rendered: Vec<String> = Vec::new();
        for (declaration, codec) in module.declarations.iter().zip(codecs) {
            match declaration {
                Declaration::Class(class) => {
                    if let Some((methods, via)) = codec {
                        let first_time = self.seen_classes.insert(class.name.clone());
                        if first_time && via == AnnotationKind::ModuleMarker {
                            self.diagnostics.deprecated_module_marker(&class.type_name());
                        }
                        rendered.push(render_class(class, Some(&methods)));
                    } else {
                        rendered.push(render_class(class, None));
                    }
                }
                Declaration::Function(func) => {
                    if self.wrapped_fns.contains(&func.name) {
                        rendered.push(render_function(&func.clone().exported(false)));
                    } else if is_wrappable(module, func, &self.wrapped_fns) {
                        self.fragments.push(wrapper_function(func));
                        self.wrapped_fns.insert(func.name.clone());
                        rendered.push(render_function(&func.clone().exported(false)));
                    } else {
                        rendered.push(render_function(func));
                    }
                }
                Declaration::Other(other) => {
                    rendered.push(other.text.clone());
                }
            }
        }

        for fragment in self.fragments.drain(..) {
            rendered.push(fragment.text);
        }

        Ok(rendered.join("\n"))
    }

    /// Check whether a function has already been wrapped.
    pub fn is_wrapped(&self, name: &str) -> bool {
        self.wrapped_fns.contains(name)
    }

    /// Warnings recorded across all builds so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the builder and take its warnings.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassDecl, FieldDecl, FunctionDecl, Member, OtherDecl, Param, SourceKind};
    use proptest::prelude::*;

    fn point_class() -> ClassDecl {
        ClassDecl::new("Point")
            .with_header("@jsonBindgen\nexport class Point")
            .with_decorator("jsonBindgen")
            .with_members(vec![
                Member::Field(FieldDecl::new("x").with_type("i32")),
                Member::Field(FieldDecl::new("y").with_type("i32").with_initializer("0")),
            ])
    }

    fn add_function() -> FunctionDecl {
        FunctionDecl::new("add")
            .with_params(vec![
                Param::new("a", "i32"),
                Param::new("b", "i32").with_initializer("1"),
            ])
            .returns("i32")
            .exported(true)
            .with_body_text("function add(a: i32, b: i32 = 1): i32 { return a + b; }")
    }

    fn entry_module() -> Module {
        Module::new("assembly/main.ts", SourceKind::UserEntry)
            .with_text("@jsonBindgen\nexport class Point {}\nexport function add() {}")
            .with_declarations(vec![
                Declaration::Class(point_class()),
                Declaration::Function(add_function()),
            ])
    }

    #[test]
    fn test_codec_class_is_augmented() {
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&entry_module()).unwrap();
        assert!(output.contains("@jsonBindgen\nexport class Point {"));
        assert!(output.contains("this.y = obj.has(\"y\") ? decode<i32, JSON.Obj>(obj, \"y\") : 0;"));
        assert!(output.contains("encode<i32, JSONEncoder>(this.x, \"x\", encoder);"));
    }

    #[test]
    fn test_wrapped_function_is_demoted_and_reexported() {
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&entry_module()).unwrap();
        // Original keeps its body but loses the direct export.
        assert!(output.contains("\nfunction add(a: i32, b: i32 = 1): i32 { return a + b; }"));
        assert!(!output.contains("export function add"));
        // The wrapper takes over the name.
        assert!(output.contains("function __wrapper_add(): void {"));
        assert!(output.contains("export { __wrapper_add as add }"));
    }

    #[test]
    fn test_wrappers_come_after_declarations() {
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&entry_module()).unwrap();
        let decl_pos = output.find("function add(a: i32").unwrap();
        let wrapper_pos = output.find("__wrapper_add").unwrap();
        assert!(decl_pos < wrapper_pos);
    }

    #[test]
    fn test_rebuild_never_wraps_twice() {
        let mut builder = BindingsBuilder::new();
        let module = entry_module();
        let first = builder.build(&module).unwrap();
        assert_eq!(first.matches("__wrapper_add").count(), 2); // definition + rename
        assert!(builder.is_wrapped("add"));

        let second = builder.build(&module).unwrap();
        assert_eq!(second.matches("__wrapper_add").count(), 0);
        assert!(second.contains("\nfunction add(a: i32"));
    }

    #[test]
    fn test_passthrough_module_renders_declarations_only() {
        let module = Module::new("lib.ts", SourceKind::Library)
            .with_text("export function helper(a: i32): i32 { return a; }")
            .with_declarations(vec![
                Declaration::Other(OtherDecl::new("import { x } from \"./y\";")),
                Declaration::Function(
                    FunctionDecl::new("helper")
                        .with_params(vec![Param::new("a", "i32")])
                        .returns("i32")
                        .exported(true)
                        .with_body_text("function helper(a: i32): i32 { return a; }"),
                ),
            ]);
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&module).unwrap();
        assert_eq!(
            output,
            "import { x } from \"./y\";\nexport function helper(a: i32): i32 { return a; }"
        );
        assert!(builder.diagnostics().is_empty());
    }

    #[test]
    fn test_module_marker_selection_warns_but_generates() {
        let module = Module::new("assembly/model.ts", SourceKind::Library)
            .with_text("// @jsonfile\nexport class Point {}")
            .with_declarations(vec![Declaration::Class(
                ClassDecl::new("Point")
                    .with_header("export class Point")
                    .with_members(vec![Member::Field(FieldDecl::new("x").with_type("i32"))]),
            )]);
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&module).unwrap();
        assert!(output.contains("private _decode(obj: JSON.Obj): Point {"));
        let warnings = builder.diagnostics().warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("@jsonfile is deprecated"));
        assert!(warnings[0].contains("Point"));

        // Re-building does not repeat the warning.
        builder.build(&module).unwrap();
        assert_eq!(builder.diagnostics().warnings().len(), 1);
    }

    #[test]
    fn test_decorator_selection_does_not_warn() {
        let mut builder = BindingsBuilder::new();
        builder.build(&entry_module()).unwrap();
        assert!(builder.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_field_type_aborts_with_no_output() {
        let module = Module::new("assembly/main.ts", SourceKind::UserEntry)
            .with_text("@jsonBindgen")
            .with_declarations(vec![Declaration::Class(
                ClassDecl::new("Broken")
                    .with_decorator("jsonBindgen")
                    .with_members(vec![Member::Field(FieldDecl::new("oops"))]),
            )]);
        let mut builder = BindingsBuilder::new();
        let err = builder.build(&module).unwrap_err();
        assert!(matches!(err, TransformError::MissingFieldType { .. }));
    }

    #[test]
    fn test_zero_param_void_function_passes_through() {
        let module = Module::new("assembly/main.ts", SourceKind::UserEntry)
            .with_text("export function init(): void {}")
            .with_declarations(vec![Declaration::Function(
                FunctionDecl::new("init")
                    .exported(true)
                    .with_body_text("function init(): void {}"),
            )]);
        let mut builder = BindingsBuilder::new();
        let output = builder.build(&module).unwrap();
        assert_eq!(output, "export function init(): void {}");
        assert!(!builder.is_wrapped("init"));
    }

    proptest! {
        #[test]
        fn prop_fresh_builders_are_deterministic(
            field_names in proptest::collection::vec("[a-z][a-z0-9]{0,8}", 1..5)
        ) {
            let members = field_names
                .iter()
                .map(|n| Member::Field(FieldDecl::new(n.clone()).with_type("i32")))
                .collect::<Vec<_>>();
            let module = Module::new("assembly/main.ts", SourceKind::UserEntry)
                .with_text("@jsonBindgen")
                .with_declarations(vec![Declaration::Class(
                    ClassDecl::new("Data")
                        .with_decorator("jsonBindgen")
                        .with_members(members),
                )]);
            let first = BindingsBuilder::new().build(&module).unwrap();
            let second = BindingsBuilder::new().build(&module).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_wrapper_emitted_at_most_once(rebuilds in 1usize..4) {
            let module = Module::new("assembly/main.ts", SourceKind::UserEntry)
                .with_text("export function f(a: i32): i32 { return a; }")
                .with_declarations(vec![Declaration::Function(
                    FunctionDecl::new("f")
                        .with_params(vec![Param::new("a", "i32")])
                        .returns("i32")
                        .exported(true)
                        .with_body_text("function f(a: i32): i32 { return a; }"),
                )]);
            let mut builder = BindingsBuilder::new();
            let mut total_wrappers = 0;
            for _ in 0..rebuilds {
                let output = builder.build(&module).unwrap();
                total_wrappers += output.matches("function __wrapper_f(): void {").count();
            }
            prop_assert_eq!(total_wrappers, 1);
        }
    }
}
