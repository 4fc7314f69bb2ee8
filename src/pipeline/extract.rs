use serde_json::Value;

/// Resource name used under the `_embedded` collection envelope
pub const EMBEDDED_RESOURCE: &str = "benefits";

/// Locate the raw record array in a payload of unknown envelope shape.
///
/// Probed in order: a bare array, `items`, `data`, then
/// `_embedded.benefits`. Anything else yields no records.
pub fn extract_records(payload: &Value) -> Vec<Value> {
    let probes: [fn(&Value) -> Option<&Value>; 4] = [
        |payload| Some(payload),
        |payload| payload.get("items"),
        |payload| payload.get("data"),
        |payload| payload.get("_embedded")?.get(EMBEDDED_RESOURCE),
    ];

    probes
        .iter()
        .filter_map(|probe| probe(payload)?.as_array())
        .next()
        .cloned()
        .unwrap_or_default()
}
