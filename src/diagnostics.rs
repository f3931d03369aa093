//! Recoverable warnings raised during generation.
//!
//! Fatal conditions go through [`crate::error::TransformError`]; everything
//! the transform can recover from lands here. Warnings are collected on the
//! builder so callers can inspect them, and mirrored to `tracing` for
//! operators watching the compilation log.

/// Warning sink threaded through the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a class was selected through the deprecated module-wide
    /// marker instead of the per-class decorator. Generation proceeds.
    pub fn deprecated_module_marker(&mut self, class: &str) {
        let message = format!(
            "@jsonfile is deprecated, use the @jsonBindgen decorator on {}",
            class
        );
        tracing::warn!(class = %class, "{}", message);
        self.warnings.push(message);
    }

    /// Absorb the warnings of another sink, preserving emission order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    /// Warnings recorded so far, in emission order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Check whether any warning was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_marker_warning() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.deprecated_module_marker("Point");
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].contains("@jsonfile is deprecated"));
        assert!(diagnostics.warnings()[0].contains("Point"));
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut first = Diagnostics::new();
        first.deprecated_module_marker("A");
        let mut second = Diagnostics::new();
        second.deprecated_module_marker("B");

        first.merge(second);
        assert_eq!(first.warnings().len(), 2);
        assert!(first.warnings()[0].contains("A"));
        assert!(first.warnings()[1].contains("B"));
    }

    #[test]
    fn test_warnings_keep_emission_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.deprecated_module_marker("A");
        diagnostics.deprecated_module_marker("B");
        assert!(diagnostics.warnings()[0].contains("A"));
        assert!(diagnostics.warnings()[1].contains("B"));
    }
}
