//! External collaborator traits.
//!
//! The transform never touches the filesystem or the downstream compiler
//! directly; a host front end supplies these capabilities. Implementations
//! live outside this crate.

use crate::ast::Module;
use crate::error::HostError;

/// Compiler front end the transform feeds generated text back into.
pub trait Host {
    /// Re-parse a module from its generated text.
    ///
    /// `is_entry` preserves the module's compilation-unit kind across the
    /// round trip.
    fn reparse(&mut self, path: &str, text: &str, is_entry: bool) -> Result<(), HostError>;

    /// Write generated text to a path, for modules that asked for it.
    fn write_file(&mut self, path: &str, text: &str) -> Result<(), HostError>;
}

/// Downstream semantic validation, run outside test compilations.
pub trait TypeCheck {
    /// Validate the program after the generated modules are re-parsed.
    fn check_after_parse(&mut self) -> Result<(), HostError>;

    /// Validate externally-visible types in the compiled unit. The module
    /// identifies which source the binary was produced from.
    fn check_after_compile(&mut self, module: &Module) -> Result<(), HostError>;
}
