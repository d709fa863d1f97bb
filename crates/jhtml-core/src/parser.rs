use crate::value::Value;
use crate::CompileError;

/// Parse relaxed JSON (JSON5) source into a value. Object keys keep their
/// source order, which later becomes attribute order.
///
/// Integer literals must fit in 64 bits: `json5` rejects larger ones (decimal
/// or hex) as a syntax error rather than widening them to a float.
pub fn parse_source(source: &str) -> Result<Value, CompileError> {
    let value: Value = json5::from_str(source)?;
    tracing::debug!(bytes = source.len(), "parsed source");
    Ok(value)
}
