//! Presence rules for request fields.
//!
//! An update only overwrites a field when the caller's value is "supplied":
//! empty strings and zero counts read the same as an absent field, so they
//! can never clear or zero a stored value. A present list always counts,
//! even when empty.

use serde_json::Value;

use super::model::ActivityEvent;

pub(crate) trait Supplied {
    fn is_supplied(&self) -> bool;
}

impl Supplied for String {
    fn is_supplied(&self) -> bool {
        !self.is_empty()
    }
}

impl Supplied for u64 {
    fn is_supplied(&self) -> bool {
        *self != 0
    }
}

impl Supplied for Vec<Value> {
    fn is_supplied(&self) -> bool {
        true
    }
}

impl Supplied for ActivityEvent {
    fn is_supplied(&self) -> bool {
        true
    }
}

/// Keep `value` only if it counts as supplied.
pub(crate) fn supplied<T: Supplied>(value: Option<T>) -> Option<T> {
    value.filter(Supplied::is_supplied)
}
