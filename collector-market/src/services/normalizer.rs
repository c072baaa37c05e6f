//! Order shape resolution. The marketplace API returns the same order in
//! several layouts, sometimes nesting parameters and signature under a
//! `protocol_data` wrapper and sometimes at the top level. Every consumer
//! goes through [`normalize_order`] so the rest of the crate only ever sees
//! one canonical type.

use serde_json::{Map, Value};

use crate::models::order::SignedOrder;

/// Converts a loosely-typed remote order object into a canonical signed
/// order. Returns `None` when the input holds no usable order data, or when
/// a signature is required but absent. Pure and deterministic.
pub fn normalize_order(raw: &Value, require_signature: bool) -> Option<SignedOrder> {
    let order = raw.as_object()?;
    let protocol_data = order.get("protocol_data").and_then(Value::as_object);

    let parameters = protocol_data
        .and_then(|wrapper| wrapper.get("parameters"))
        .or_else(|| order.get("parameters"))?
        .as_object()?;

    let signature = protocol_data
        .and_then(|wrapper| wrapper.get("signature"))
        .or_else(|| order.get("signature"))
        .and_then(Value::as_str)
        .unwrap_or("");

    if require_signature && signature.is_empty() {
        return None;
    }

    let mut parameters: Map<String, Value> = parameters.clone();

    // Seaport encodes the counter as an exact-width integer string; mixing
    // numeric and string types breaks signature and hash verification.
    let counter = match parameters.get("counter").filter(|value| !value.is_null()) {
        Some(counter) => counter.clone(),
        None => protocol_data
            .and_then(|wrapper| wrapper.get("counter"))
            .filter(|value| !value.is_null())
            .or_else(|| order.get("counter").filter(|value| !value.is_null()))
            .cloned()
            .unwrap_or_else(|| Value::String("0".to_string())),
    };
    parameters.insert("counter".to_string(), Value::String(counter_string(&counter)));

    Some(SignedOrder {
        parameters: Value::Object(parameters),
        signature: signature.to_string(),
    })
}

fn counter_string(value: &Value) -> String {
    match value {
        Value::String(counter) => counter.clone(),
        Value::Number(counter) => counter.to_string(),
        _ => "0".to_string(),
    }
}
