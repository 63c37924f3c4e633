//! Scroll offsets stored inside a history entry's state object.
//!
//! Offsets live in two extra fields merged into whatever JSON state the page
//! already associates with the entry, so a page that reads its own state
//! still sees its own fields untouched.

use serde_json::{Map, Value};

use super::scroll::ScrollPosition;

/// State field carrying the horizontal scroll offset.
pub const SCROLL_X_KEY: &str = "__scrollX";
/// State field carrying the vertical scroll offset.
pub const SCROLL_Y_KEY: &str = "__scrollY";

/// Helpers for reading and writing scroll offsets in a navigation state.
pub struct ScrollOffsets;

impl ScrollOffsets {
    /// Returns the stored offsets when both fields hold finite numbers.
    ///
    /// Missing state, missing fields, strings and nulls all yield `None`.
    pub fn from_state(state: &Value) -> Option<ScrollPosition> {
        let x = state.get(SCROLL_X_KEY)?.as_f64()?;
        let y = state.get(SCROLL_Y_KEY)?.as_f64()?;
        let position = ScrollPosition::new(x, y);
        position.is_finite().then_some(position)
    }

    /// Copy of `state` with the offsets of `position` merged on top.
    ///
    /// A non-object state contributes no fields of its own.
    pub fn merged_into(state: &Value, position: ScrollPosition) -> Value {
        let mut merged = object_fields(state);
        merged.insert(SCROLL_X_KEY.to_string(), Value::from(position.x));
        merged.insert(SCROLL_Y_KEY.to_string(), Value::from(position.y));
        Value::Object(merged)
    }

    /// Builds the state to store for a replace: the previously recorded
    /// offset fields of `current` as a base, with `incoming` merged on top.
    ///
    /// When `current` has no recorded offsets and `incoming` is not an object,
    /// `incoming` is returned unchanged.
    pub fn preserved_on_replace(current: &Value, incoming: Value) -> Value {
        let mut base = Map::new();
        for key in [SCROLL_X_KEY, SCROLL_Y_KEY] {
            if let Some(previous) = current.get(key) {
                base.insert(key.to_string(), previous.clone());
            }
        }

        match incoming {
            Value::Object(fields) => {
                base.extend(fields);
                Value::Object(base)
            }
            other if base.is_empty() => other,
            _ => Value::Object(base),
        }
    }
}

fn object_fields(state: &Value) -> Map<String, Value> {
    match state {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    }
}
