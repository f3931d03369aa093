//! Declaration data model.
//!
//! This module defines the tagged-variant view of a parsed contract module
//! that the transform consumes. The host front end produces these values;
//! the transform never mutates them. All types are serde-serializable so a
//! host can hand modules across a process boundary as JSON.

use serde::{Deserialize, Serialize};

/// Kind of compilation unit a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// The user's own entry compilation unit.
    UserEntry,

    /// An imported or library unit.
    Library,
}

/// A parsed module: ordered top-level declarations plus raw source text.
///
/// The raw text is kept alongside the declarations because annotation
/// markers are detected by substring/pattern match on the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Normalized source path (e.g. "assembly/main.ts").
    pub path: String,

    /// Whether this is a user entry unit or a library unit.
    pub kind: SourceKind,

    /// Raw source text of the whole module.
    pub text: String,

    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Module {
    /// Create an empty module with the given path and kind.
    pub fn new(path: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
            text: String::new(),
            declarations: Vec::new(),
        }
    }

    /// Set the raw source text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the declaration list.
    pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
        self.declarations = declarations;
        self
    }

    /// Check whether this module is the user entry unit.
    pub fn is_user_entry(&self) -> bool {
        self.kind == SourceKind::UserEntry
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    /// A class declaration.
    Class(ClassDecl),

    /// A function declaration.
    Function(FunctionDecl),

    /// Anything else; passed through verbatim.
    Other(OtherDecl),
}

impl Declaration {
    /// Name of the declaration, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Class(c) => Some(&c.name),
            Declaration::Function(f) => Some(&f.name),
            Declaration::Other(_) => None,
        }
    }
}

/// A class declaration with its ordered members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Class name without type parameters.
    pub name: String,

    /// Generic type parameter names, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,

    /// Decorator names attached to the class (without the `@`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,

    /// Original leading text of the declaration up to (not including) the
    /// opening brace, e.g. `@jsonBindgen\nexport class Point`. The renderer
    /// rebuilds the class from this header plus the member list, so no
    /// brace-scanning of rendered text is ever needed.
    pub header: String,

    /// Class members in declaration order.
    pub members: Vec<Member>,
}

impl ClassDecl {
    /// Create a class with a plain `class Name` header.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            header: format!("class {}", name),
            name,
            type_params: Vec::new(),
            decorators: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Replace the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the generic type parameters.
    pub fn with_type_params(mut self, params: Vec<String>) -> Self {
        self.type_params = params;
        self
    }

    /// Add a decorator by name (without the `@`).
    pub fn with_decorator(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(name.into());
        self
    }

    /// Set the member list.
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Check whether a decorator with the given name is attached.
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d == name)
    }

    /// The class name as it appears in type position, including generics
    /// (`Point` or `Pair<K, V>`).
    pub fn type_name(&self) -> String {
        if self.type_params.is_empty() {
            self.name.clone()
        } else {
            format!("{}<{}>", self.name, self.type_params.join(", "))
        }
    }

    /// Iterate over the field members in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            Member::Other(_) => None,
        })
    }
}

/// A class member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Member {
    /// An instance field.
    Field(FieldDecl),

    /// Any other member (method, static, etc.); passed through verbatim.
    Other(OtherMember),
}

impl Member {
    /// Source text of the member as it appears inside the class body.
    pub fn text(&self) -> String {
        match self {
            Member::Field(f) => f.text(),
            Member::Other(o) => o.text.clone(),
        }
    }
}

/// An instance field declaration.
///
/// The declared type is optional here because the host parser may produce
/// untyped fields; codec generation treats a missing type as a fatal error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,

    /// Declared type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    /// Initializer expression, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl FieldDecl {
    /// Create a field with no type and no initializer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            initializer: None,
        }
    }

    /// Set the declared type.
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Set the initializer expression.
    pub fn with_initializer(mut self, init: impl Into<String>) -> Self {
        self.initializer = Some(init.into());
        self
    }

    /// Render the field as it appears in the class body.
    pub fn text(&self) -> String {
        let mut s = format!("  {}", self.name);
        if let Some(ty) = &self.ty {
            s.push_str(": ");
            s.push_str(ty);
        }
        if let Some(init) = &self.initializer {
            s.push_str(" = ");
            s.push_str(init);
        }
        s.push(';');
        s
    }
}

/// A class member the transform does not touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherMember {
    /// Verbatim member text, including indentation.
    pub text: String,
}

impl OtherMember {
    /// Create a passthrough member from its source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,

    /// Parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,

    /// Declared return type; `void` when absent in source.
    pub return_type: String,

    /// Whether the function is exported from the module.
    #[serde(default)]
    pub exported: bool,

    /// Decorator names attached to the function (without the `@`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,

    /// Declaration text without any leading `export` keyword. Rendering
    /// prepends `export ` while the flag is set, so demoting a wrapped
    /// function is a flag flip rather than text surgery.
    ///
    /// Hosts must supply this for every function whose body matters in the
    /// output; an empty value renders as a signature-only placeholder.
    #[serde(default)]
    pub body_text: String,
}

impl FunctionDecl {
    /// Create a void function with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: "void".to_string(),
            exported: false,
            decorators: Vec::new(),
            body_text: String::new(),
        }
    }

    /// Set the parameter list.
    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    /// Set the export flag.
    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Add a decorator by name (without the `@`).
    pub fn with_decorator(mut self, name: impl Into<String>) -> Self {
        self.decorators.push(name.into());
        self
    }

    /// Set the declaration text (without the `export` keyword).
    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = text.into();
        self
    }

    /// Check whether the function returns `void`.
    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }

    /// Declaration text, synthesized from the signature when the host did
    /// not supply one.
    ///
    /// The synthesized form has an empty body and exists so partially
    /// constructed declarations still render somewhere visible; it is not a
    /// substitute for [`FunctionDecl::body_text`] on real input.
    pub fn declaration_text(&self) -> String {
        if !self.body_text.is_empty() {
            return self.body_text.clone();
        }
        let params: Vec<String> = self.params.iter().map(Param::text).collect();
        format!(
            "function {}({}): {} {{}}",
            self.name,
            params.join(", "),
            self.return_type
        )
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: String,

    /// Declared type.
    pub ty: String,

    /// Default value expression, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl Param {
    /// Create a parameter with the given name and type.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            initializer: None,
        }
    }

    /// Set the default value expression.
    pub fn with_initializer(mut self, init: impl Into<String>) -> Self {
        self.initializer = Some(init.into());
        self
    }

    /// Render the parameter as it appears in a signature.
    pub fn text(&self) -> String {
        match &self.initializer {
            Some(init) => format!("{}: {} = {}", self.name, self.ty, init),
            None => format!("{}: {}", self.name, self.ty),
        }
    }
}

/// A top-level declaration the transform does not touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherDecl {
    /// Verbatim declaration text.
    pub text: String,
}

impl OtherDecl {
    /// Create a passthrough declaration from its source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
