//! End-to-end pipeline over the host traits.
//!
//! Drives the two compiler hook points: after parse (select modules,
//! generate bindings, hand the text back to the host) and after compile
//! (binary-level validation). Test-run detection replaces per-module
//! global flags with state owned by the pipeline value.

use tracing::{debug, info};

use crate::ast::Module;
use crate::builder::BindingsBuilder;
use crate::classify::{module_selected, wants_write_out};
use crate::diagnostics::Diagnostics;
use crate::error::PipelineError;
use crate::host::{Host, TypeCheck};

/// Pipeline state spanning the parse and compile hooks.
///
/// Each module is built with its own [`BindingsBuilder`], so wrapped-name
/// and seen-class tracking never leak between modules; two modules may
/// export same-named entry functions and each gets its own wrapper.
#[derive(Debug, Default)]
pub struct Transformer {
    test_run: bool,
    diagnostics: Diagnostics,
}

impl Transformer {
    /// Create a pipeline with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current compilation was detected as a test run.
    ///
    /// Meaningful after [`Transformer::after_parse`]; test runs skip both
    /// validation passes.
    pub fn is_test_run(&self) -> bool {
        self.test_run
    }

    /// Warnings recorded while generating bindings, across all modules.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Parse-time hook: generate bindings for every selected module and
    /// feed the text back through the host.
    pub fn after_parse<H: Host, C: TypeCheck>(
        &mut self,
        host: &mut H,
        checker: &mut C,
        modules: &[Module],
    ) -> Result<(), PipelineError> {
        let selected: Vec<&Module> = modules.iter().filter(|m| module_selected(m)).collect();
        self.test_run = selected.iter().any(|m| m.path.contains("spec"));
        info!(
            selected = selected.len(),
            test_run = self.test_run,
            "generating bindings"
        );

        for module in selected {
            debug!(path = %module.path, "building module");
            let mut builder = BindingsBuilder::new();
            let text = builder.build(module)?;
            self.diagnostics.merge(builder.into_diagnostics());

            if wants_write_out(module) {
                let out_path = format!("out/{}", module.path);
                host.write_file(&out_path, &text)
                    .map_err(|source| PipelineError::Host {
                        action: "write",
                        path: out_path,
                        source,
                    })?;
            }

            let is_entry = module.is_user_entry();
            let reparse_path = if is_entry {
                module.path.clone()
            } else {
                format!("./{}", module.path)
            };
            host.reparse(&reparse_path, &text, is_entry)
                .map_err(|source| PipelineError::Host {
                    action: "reparse",
                    path: reparse_path,
                    source,
                })?;
        }

        if !self.test_run {
            checker.check_after_parse().map_err(PipelineError::TypeCheck)?;
        }
        Ok(())
    }

    /// Compile-time hook for one compiled unit: binary-level validation,
    /// skipped for test runs.
    pub fn after_compile<C: TypeCheck>(
        &mut self,
        checker: &mut C,
        module: &Module,
    ) -> Result<(), PipelineError> {
        if !self.test_run {
            checker
                .check_after_compile(module)
                .map_err(PipelineError::TypeCheck)?;
        }
        Ok(())
    }
}
