use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a permission flag from a stored record.
///
/// Only a JSON `true` grants the flag. `null` and any non-boolean value read
/// as `false`; combine with `#[serde(default)]` so absent keys do too.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}
