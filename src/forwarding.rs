//! The forwarding database and its query operations.

use debug_print::debug_println;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::digits::{cmp_numbers, digits_of, Alphabet, Extended};
use crate::error::{Error, Result};
use crate::numbers::PhoneNumbers;
use crate::trie::forward::ForwardTree;
use crate::trie::reverse::ReverseTree;

/// A phone-number forwarding database.
///
/// Stores rules of the form "numbers starting with `s` are redirected to
/// `t` followed by the rest of the number". At most one rule per source
/// prefix; adding again overwrites. The same state is indexed twice, by
/// source prefix for [`get`](PhoneForward::get) and by replacement prefix
/// for [`reverse`](PhoneForward::reverse), and every mutation keeps the
/// two tries consistent.
///
/// The alphabet parameter picks the variant: [`Extended`] (the default)
/// accepts `'0'..='9'`, `'*'` and `'#'`, [`Decimal`](crate::Decimal) the
/// ten digits only.
///
/// ```
/// use phonefwd::PhoneForward;
///
/// let mut db: PhoneForward = PhoneForward::new();
/// db.add("11", "113").unwrap();
/// assert_eq!(db.get("114").get(0), Some("1134"));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
#[derive(Debug)]
pub struct PhoneForward<A: Alphabet = Extended> {
    fwd: ForwardTree<A>,
    rev: ReverseTree<A>,
}

impl<A: Alphabet> PhoneForward<A> {
    /// Creates an empty database.
    pub fn new() -> Self {
        PhoneForward {
            fwd: ForwardTree::new(),
            rev: ReverseTree::new(),
        }
    }

    /// Installs the rule `num1 -> num2`, overwriting any rule already held
    /// by `num1`.
    ///
    /// Fails when either string is not a phone number or when both are the
    /// same number; the database is untouched in that case.
    ///
    /// ```
    /// use phonefwd::{Error, PhoneForward};
    ///
    /// let mut db: PhoneForward = PhoneForward::new();
    /// db.add("119", "1").unwrap();
    /// assert_eq!(db.add("7", "7"), Err(Error::SelfForward));
    /// assert!(matches!(db.add("12x", "7"), Err(Error::NotANumber(_))));
    /// ```
    pub fn add(&mut self, num1: &str, num2: &str) -> Result<()> {
        let src = digits_of::<A>(num1).ok_or_else(|| Error::NotANumber(num1.to_string()))?;
        let tgt = digits_of::<A>(num2).ok_or_else(|| Error::NotANumber(num2.to_string()))?;
        if num1 == num2 {
            return Err(Error::SelfForward);
        }

        let node = self.fwd.ensure_path(&src);
        // An overwritten rule leaves a stale bag entry behind its old
        // target; take out exactly that one before installing.
        if let Some(old) = self.fwd.replacement(node).and_then(digits_of::<A>) {
            self.rev.remove_source_once(&old, num1);
        }
        self.fwd.set_replacement(node, num2.to_string());

        let target = self.rev.ensure_path(&tgt);
        self.rev.push_source(target, num1.to_string());
        debug_println!("rule installed: {} -> {}", num1, num2);
        Ok(())
    }

    /// Deletes every rule whose source starts with `prefix`.
    ///
    /// Silent when `prefix` is not a phone number or no rule matches.
    pub fn remove(&mut self, prefix: &str) {
        let digits = match digits_of::<A>(prefix) {
            Some(digits) => digits,
            None => return,
        };
        if let Some(node) = self.fwd.node_at(&digits) {
            self.fwd.erase_subtree(node);
        }
        // Rules rooted below `prefix` may point anywhere, so the stale bag
        // entries are spread over the whole reverse trie.
        self.rev.evict_prefixed(prefix);
        debug_println!("rules under {} removed", prefix);
    }

    /// Redirects `num` through the longest matching rule.
    ///
    /// The rule whose source is the longest prefix of `num` wins and its
    /// replacement is substituted for that prefix. Without a matching rule
    /// the result is `num` itself; a malformed `num` yields the empty
    /// list.
    ///
    /// ```
    /// use phonefwd::PhoneForward;
    ///
    /// let mut db: PhoneForward = PhoneForward::new();
    /// db.add("123", "1").unwrap();
    /// assert_eq!(db.get("123123").get(0), Some("1123"));
    /// assert_eq!(db.get("12089").get(0), Some("12089"));
    /// ```
    pub fn get(&self, num: &str) -> PhoneNumbers {
        let digits = match digits_of::<A>(num) {
            Some(digits) => digits,
            None => return PhoneNumbers::default(),
        };
        match self.fwd.longest_rule(&digits) {
            None => PhoneNumbers::singleton(num.to_string()),
            Some((replacement, consumed)) => {
                // every digit is one byte, so digit counts slice the text
                let tail = &num[consumed..];
                let mut redirected = String::with_capacity(replacement.len() + tail.len());
                redirected.push_str(replacement);
                redirected.push_str(tail);
                PhoneNumbers::singleton(redirected)
            }
        }
    }

    /// Expands `num` into every number some rule could have redirected
    /// into it, plus `num` itself.
    ///
    /// Candidates are sorted by digit index (see
    /// [`cmp_numbers`](crate::digits::cmp_numbers)) and deduplicated. The
    /// expansion is an over-approximation of the true pre-image; see
    /// [`get_reverse`](PhoneForward::get_reverse) for the exact one.
    pub fn reverse(&self, num: &str) -> PhoneNumbers {
        let digits = match digits_of::<A>(num) {
            Some(digits) => digits,
            None => return PhoneNumbers::default(),
        };
        let mut candidates = vec![num.to_string()];
        for (consumed, sources) in self.rev.sources_along(&digits) {
            let tail = &num[consumed..];
            for source in sources {
                let mut candidate = String::with_capacity(source.len() + tail.len());
                candidate.push_str(source);
                candidate.push_str(tail);
                candidates.push(candidate);
            }
        }
        candidates.sort_by(|a, b| cmp_numbers::<A>(a, b));
        candidates.dedup();
        PhoneNumbers::from(candidates)
    }

    /// The exact pre-image of `num`: every `x` with `get(x) == [num]`.
    ///
    /// Filters [`reverse`](PhoneForward::reverse) by re-running the
    /// forward query on each candidate, keeping the sorted order.
    pub fn get_reverse(&self, num: &str) -> PhoneNumbers {
        let candidates = self.reverse(num);
        let kept: Vec<String> = candidates
            .into_iter()
            .filter(|candidate| self.get(candidate).get(0) == Some(num))
            .collect();
        PhoneNumbers::from(kept)
    }
}

impl<A: Alphabet> Default for PhoneForward<A> {
    fn default() -> Self {
        Self::new()
    }
}
