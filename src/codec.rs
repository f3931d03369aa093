//! Class codec synthesizer.
//!
//! Given a class selected for binding generation, produces the textual
//! decode/encode method block that gets appended to the class body. The
//! generated code targets the host runtime's marshalling primitives
//! (`decode`, `encode`, `JSON.Obj`, `JSONEncoder`, `defaultValue`); this
//! module only emits calls to them.

use crate::ast::ClassDecl;
use crate::error::TransformError;

/// A field with its type and fallback resolved, ready for codec generation.
///
/// Every bound field has a type (a typeless field is a fatal error) and an
/// initializer (fields without one get the synthesized type default), so
/// statement generation never has to deal with absent values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    /// Field name.
    pub name: String,

    /// Declared type.
    pub ty: String,

    /// Fallback expression used when the decoded object lacks the key.
    pub initializer: String,
}

/// Resolve the fields of a class for codec generation, in declaration order.
///
/// Fails with [`TransformError::MissingFieldType`] on the first field that
/// has no declared type, aborting generation for the whole module.
pub fn effective_fields(class: &ClassDecl) -> Result<Vec<BoundField>, TransformError> {
    class
        .fields()
        .map(|field| {
            let ty = field
                .ty
                .clone()
                .ok_or_else(|| TransformError::MissingFieldType {
                    class: class.name.clone(),
                    field: field.name.clone(),
                })?;
            let initializer = field
                .initializer
                .clone()
                .unwrap_or_else(|| format!("defaultValue<{}>()", ty));
            Ok(BoundField {
                name: field.name.clone(),
                ty,
                initializer,
            })
        })
        .collect()
}

/// Expression decoding a named key at a declared type out of `obj`.
///
/// Shared by field decode statements and wrapper argument expressions.
pub fn decode_expression(name: &str, ty: &str) -> String {
    format!("decode<{}, JSON.Obj>(obj, \"{}\")", ty, name)
}

/// Statement assigning one decoded field, falling back to its initializer
/// when the key is absent.
pub fn decode_statement(field: &BoundField) -> String {
    format!(
        "this.{name} = obj.has(\"{name}\") ? {decode} : {init};",
        name = field.name,
        decode = decode_expression(&field.name, &field.ty),
        init = field.initializer,
    )
}

/// Statement writing one field into the object-shaped encoder.
pub fn encode_statement(field: &BoundField) -> String {
    format!(
        "encode<{ty}, JSONEncoder>(this.{name}, \"{name}\", encoder);",
        ty = field.ty,
        name = field.name,
    )
}

/// Generate the full codec method block for a class.
///
/// The block is an inline fragment: it belongs inside the class body, after
/// the original members. It contains the instance decode entry point (byte
/// buffer or already-parsed object), the type-level decode constructor, the
/// private per-field decode routine, the encoder routine, the byte-level
/// `encode`/`serialize` pair, and `toJSON`.
pub fn codec_methods(class: &ClassDecl) -> Result<String, TransformError> {
    let fields = effective_fields(class)?;
    let class_name = class.type_name();
    let decode_statements: Vec<String> = fields.iter().map(decode_statement).collect();
    let encode_statements: Vec<String> = fields.iter().map(encode_statement).collect();

    Ok(format!(
        r#"  decode<_V = Uint8Array>(buf: _V): {class_name} {{
    let json: JSON.Obj;
    if (buf instanceof Uint8Array) {{
      json = JSON.parse(buf);
    }} else {{
      assert(buf instanceof JSON.Obj, "argument must be Uint8Array or Json Object");
      json = <JSON.Obj> buf;
    }}
    return this._decode(json);
  }}

  static decode(buf: Uint8Array): {class_name} {{
    return decode<{class_name}>(buf);
  }}

  private _decode(obj: JSON.Obj): {class_name} {{
    {decode_body}
    return this;
  }}

  _encode(name: string | null = "", _encoder: JSONEncoder | null = null): JSONEncoder {{
    let encoder = _encoder == null ? new JSONEncoder() : _encoder;
    encoder.pushObject(name);
    {encode_body}
    encoder.popObject();
    return encoder;
  }}

  encode(): Uint8Array {{
    return this._encode().serialize();
  }}

  serialize(): Uint8Array {{
    return this.encode();
  }}

  toJSON(): string {{
    return this._encode().toString();
  }}"#,
        class_name = class_name,
        decode_body = decode_statements.join("\n    "),
        encode_body = encode_statements.join("\n    "),
    ))
}
