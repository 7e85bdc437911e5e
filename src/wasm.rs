//! JavaScript bindings for the extended-alphabet database.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::{Extended, PhoneForward};

/// A forwarding database handle for JavaScript callers.
#[wasm_bindgen]
pub struct Forwarder {
    db: PhoneForward<Extended>,
}

#[wasm_bindgen]
impl Forwarder {
    /// Creates an empty database.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Forwarder {
        Forwarder {
            db: PhoneForward::new(),
        }
    }

    /// Installs `from -> to`, reporting success as a boolean.
    pub fn add(&mut self, from: &str, to: &str) -> bool {
        self.db.add(from, to).is_ok()
    }

    /// Deletes every rule whose source starts with `prefix`.
    pub fn remove(&mut self, prefix: &str) {
        self.db.remove(prefix);
    }

    /// Redirects `number`, or returns `undefined` for malformed input.
    pub fn get(&self, number: &str) -> Option<String> {
        self.db.get(number).get(0).map(str::to_string)
    }

    /// Pre-image expansion of `number` as an array of strings.
    pub fn reverse(&self, number: &str) -> Array {
        self.db.reverse(number).iter().map(JsValue::from).collect()
    }

    /// Exact pre-image of `number` as an array of strings.
    #[wasm_bindgen(js_name = getReverse)]
    pub fn get_reverse(&self, number: &str) -> Array {
        self.db
            .get_reverse(number)
            .iter()
            .map(JsValue::from)
            .collect()
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}
