//! YAML report rendering.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Serializes a value to YAML, emitting multi-line strings as literal blocks.
///
/// Descriptions and context snippets often span lines of bill text; the
/// yaml-rust emitter keeps those readable instead of escaping newlines.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize to serde value")?;

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter
        .dump(&to_emitter_value(&value))
        .context("Failed to emit YAML")?;

    Ok(output)
}

/// Converts a serde_yaml value into the emitter's document model.
///
/// Floats keep a fractional part ("50000000.0") so dollar values read back as
/// floats; non-finite floats use the YAML spellings.
fn to_emitter_value(value: &serde_yaml::Value) -> Yaml {
    use serde_yaml::Value;

    match value {
        Value::Null => Yaml::Null,
        Value::Bool(b) => Yaml::Boolean(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Yaml::Integer(i),
            (None, Some(f)) => Yaml::Real(format_real(f)),
            (None, None) => Yaml::String(n.to_string()),
        },
        Value::String(s) => Yaml::String(s.clone()),
        Value::Sequence(items) => Yaml::Array(items.iter().map(to_emitter_value).collect()),
        Value::Mapping(map) => Yaml::Hash(
            map.iter()
                .map(|(k, v)| (to_emitter_value(k), to_emitter_value(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => to_emitter_value(&tagged.value),
    }
}

fn format_real(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { ".inf" } else { "-.inf" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Deserializes a YAML string.
pub fn from_yaml<T: for<'de> Deserialize<'de>>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
}
