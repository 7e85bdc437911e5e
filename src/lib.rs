//! Prefix-rewriting phone number forwarding.
//!
//! A [`PhoneForward`] database holds redirection rules over phone-number
//! prefixes and answers two dual questions: where a dialed number ends up
//! ([`get`](PhoneForward::get)), and which dialed numbers could end up at a
//! given one ([`reverse`](PhoneForward::reverse) for the expansion,
//! [`get_reverse`](PhoneForward::get_reverse) for the exact pre-image).
//! Internally the rule set is indexed by two coupled prefix tries, one per
//! query direction, kept consistent across overwrites and removals.
//!
//! ```
//! use phonefwd::PhoneForward;
//!
//! let mut db: PhoneForward = PhoneForward::new();
//! db.add("431", "432").unwrap();
//! db.add("432", "433").unwrap();
//!
//! assert_eq!(db.get("4315").get(0), Some("4325"));
//! let expansion = db.reverse("433");
//! let sources: Vec<&str> = expansion.iter().collect();
//! assert_eq!(sources, ["432", "433"]);
//! ```
//!
//! Two alphabets are supported: the default [`Extended`] variant with
//! `'*'` and `'#'` as extra digits, and the plain [`Decimal`] variant.

pub mod digits;
mod error;
mod forwarding;
mod numbers;
mod trie;

#[cfg(feature = "wasm")]
mod wasm;

pub use digits::{Alphabet, Decimal, Extended};
pub use error::{Error, Result};
pub use forwarding::PhoneForward;
pub use numbers::PhoneNumbers;
