//! # Placeholder Customer Data
//!
//! Providers insist on an email and a phone number even when the customer
//! gave neither. The generator here synthesizes plausible values from an
//! injected [`RandomSource`], so tests can pin the output exactly.

use rand::Rng;
use std::sync::{Arc, Mutex};

/// Domains used for synthesized addresses
pub const EMAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Local part used when the customer name has no alphanumeric characters
const FALLBACK_LOCAL_PART: &str = "cliente";

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync {
    /// A value in `0..bound`. `bound == 0` yields 0.
    fn next_below(&self, bound: u32) -> u32;
}

/// Production source backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic source cycling through a fixed script (each value taken
/// modulo the requested bound)
#[derive(Debug)]
pub struct ScriptedRandom {
    state: Mutex<(Vec<u32>, usize)>,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            state: Mutex::new((values.into(), 0)),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&self, bound: u32) -> u32 {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let (values, cursor) = &mut *guard;
        if bound == 0 || values.is_empty() {
            return 0;
        }
        let value = values[*cursor % values.len()];
        *cursor += 1;
        value % bound
    }
}

/// Builds placeholder emails and phone numbers
#[derive(Clone)]
pub struct PlaceholderGenerator {
    random: Arc<dyn RandomSource>,
}

impl PlaceholderGenerator {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// `{lowercased alphanumerics of name}{4 digits}@{common domain}`
    pub fn email(&self, name: &str) -> String {
        let mut local: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if local.is_empty() {
            local.push_str(FALLBACK_LOCAL_PART);
        }
        let suffix = self.digits(4);
        let domain = EMAIL_DOMAINS[self.random.next_below(EMAIL_DOMAINS.len() as u32) as usize];
        format!("{}{}@{}", local, suffix, domain)
    }

    /// Two-digit area code (11..=99) followed by eight digits
    pub fn phone(&self) -> String {
        let area_code = 11 + self.random.next_below(89);
        format!("{}{}", area_code, self.digits(8))
    }

    fn digits(&self, count: usize) -> String {
        (0..count)
            .map(|_| char::from(b'0' + self.random.next_below(10) as u8))
            .collect()
    }
}

impl Default for PlaceholderGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for PlaceholderGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderGenerator").finish_non_exhaustive()
    }
}
