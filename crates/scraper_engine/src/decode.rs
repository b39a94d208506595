use engine_logging::engine_warn;
use scraper_core::Record;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed position payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

// Fields are kept raw so that one bad value costs that value, not the batch.
// Missing fields fall back to zero values; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRecord {
    #[serde(rename = "ID")]
    id: Option<Value>,
    #[serde(rename = "PosX")]
    pos_x: Option<Value>,
    #[serde(rename = "PosY")]
    pos_y: Option<Value>,
    #[serde(rename = "Available")]
    available: Option<Value>,
}

/// Decode a JSON array of positions, preserving payload order.
///
/// Only a body that is not a JSON array is an error, and callers treat that
/// as an empty batch. A `null` or mistyped field is replaced by its zero
/// value and the record is kept.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let items: Vec<Value> = serde_json::from_slice(bytes)?;
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| coerce_record(index, item))
        .collect())
}

fn coerce_record(index: usize, item: Value) -> Record {
    let wire = match WireRecord::deserialize(item) {
        Ok(wire) => wire,
        Err(err) => {
            engine_warn!("Position {} is not an object ({}); using zero values", index, err);
            WireRecord::default()
        }
    };

    let mut coerced = Vec::new();
    let id = field(wire.id, "ID", &mut coerced, |v| v.as_str().map(str::to_owned));
    let pos_x = field(wire.pos_x, "PosX", &mut coerced, Value::as_i64);
    let pos_y = field(wire.pos_y, "PosY", &mut coerced, Value::as_i64);
    let available = field(wire.available, "Available", &mut coerced, Value::as_bool);

    if !coerced.is_empty() {
        engine_warn!(
            "Position {} ({:?}) had unusable fields {:?}; zero values used",
            index,
            id,
            coerced
        );
    }
    Record::new(id, pos_x, pos_y, available)
}

fn field<T: Default>(
    raw: Option<Value>,
    name: &'static str,
    coerced: &mut Vec<&'static str>,
    convert: impl Fn(&Value) -> Option<T>,
) -> T {
    match raw {
        None => T::default(),
        Some(value) => convert(&value).unwrap_or_else(|| {
            coerced.push(name);
            T::default()
        }),
    }
}
