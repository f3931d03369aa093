//! Generated-code fragments and declaration rendering.
//!
//! Generated text never gets spliced into raw source by position. Instead
//! each piece of generated code is a [`Fragment`] with an explicit placement
//! slot, and declarations are rebuilt from their structured parts with the
//! fragment slotted in.

use serde::{Deserialize, Serialize};

use crate::ast::{ClassDecl, FunctionDecl};

/// Where a generated fragment belongs in the output module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot")]
pub enum Slot {
    /// Inside the body of a named class, after the original members.
    Inline {
        /// Name of the class that receives the fragment.
        class: String,
    },

    /// At module top level, after all original declarations.
    TopLevel,
}

/// A piece of generated code with its placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Placement slot.
    pub slot: Slot,

    /// Generated source text.
    pub text: String,
}

impl Fragment {
    /// Create a fragment placed inside the body of a class.
    pub fn inline(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            slot: Slot::Inline {
                class: class.into(),
            },
            text: text.into(),
        }
    }

    /// Create a fragment placed at module top level.
    pub fn top_level(text: impl Into<String>) -> Self {
        Self {
            slot: Slot::TopLevel,
            text: text.into(),
        }
    }
}

/// Render a class from its header and members, with an optional inline
/// fragment appended after the original members.
pub fn render_class(class: &ClassDecl, inline: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&class.header);
    out.push_str(" {\n");
    for member in &class.members {
        out.push_str(&member.text());
        out.push('\n');
    }
    if let Some(fragment) = inline {
        out.push_str(fragment);
        out.push('\n');
    }
    out.push('}');
    out
}

/// Render a function declaration, prepending `export ` while the flag is
/// set. Demotion is a flag flip on a clone, never text surgery.
pub fn render_function(func: &FunctionDecl) -> String {
    if func.exported {
        format!("export {}", func.declaration_text())
    } else {
        func.declaration_text()
    }
}
