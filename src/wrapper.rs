//! Entry function wrapper generator.
//!
//! Exported entry functions are wrapped in a generated marshalling shim:
//! the shim reads the host input, decodes each argument out of it, calls
//! the original function, encodes a non-void result, and returns the bytes
//! through the host. The shim is then exported under the original name via
//! a rename, and the original function loses its direct export.

use crate::ast::{FunctionDecl, Param};
use crate::classify::WRAPPER_PREFIX;
use crate::codec::decode_expression;
use crate::fragment::Fragment;

/// Strip `null` arms from a union return type.
///
/// Returns the non-null type (arms trimmed, rejoined with `|`) and whether
/// any `null` arm was present. A nullable result needs a `changetype` cast
/// before encoding.
pub fn strip_null(return_type: &str) -> (String, bool) {
    let has_null = return_type.contains("null");
    let stripped = return_type
        .split('|')
        .map(str::trim)
        .filter(|arm| *arm != "null")
        .collect::<Vec<_>>()
        .join("|");
    (stripped, has_null)
}

/// Expression producing one argument for the inner call.
///
/// Present keys decode at the declared type; absent keys fall back to the
/// parameter default, routed through `assertNonNull` so a missing required
/// argument traps with the parameter name.
pub fn argument_expression(param: &Param) -> String {
    let fallback = param.initializer.as_deref().unwrap_or("null");
    format!(
        "obj.has('{name}') ? {decode} : assertNonNull<{ty}>('{name}', <{ty}>{fallback})",
        name = param.name,
        decode = decode_expression(&param.name, &param.ty),
        ty = param.ty,
    )
}

/// Generate the top-level wrapper fragment for an exported entry function.
pub fn wrapper_function(func: &FunctionDecl) -> Fragment {
    let (result_type, has_null) = strip_null(&func.return_type);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("function {}{}(): void {{", WRAPPER_PREFIX, func.name));
    if !func.params.is_empty() {
        lines.push("  const obj = getInput();".to_string());
    }

    let args = func
        .params
        .iter()
        .map(argument_expression)
        .collect::<Vec<_>>()
        .join(", ");
    let call = format!("{}({})", func.name, args);

    if func.returns_void() {
        lines.push(format!("  {};", call));
    } else {
        lines.push(format!("  let result: {} = {};", func.return_type, call));
        let encoded = if has_null {
            format!("changetype<{}>(result)", result_type)
        } else {
            "result".to_string()
        };
        lines.push(format!("  const val = encode<{}>({});", result_type, encoded));
        lines.push("  value_return(val.byteLength, val.dataStart);".to_string());
    }

    lines.push("}".to_string());
    lines.push(format!(
        "export {{ {}{} as {} }}",
        WRAPPER_PREFIX, func.name, func.name
    ));

    Fragment::top_level(lines.join("\n"))
}
