//! Short code generation
//!
//! The allocator never touches a random generator directly; it asks an
//! injected [`CodeSource`], so tests can substitute a fixed sequence.

use std::iter;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::distr::{Alphanumeric, Distribution};
use rand::rngs::StdRng;

use crate::utils::CODE_ALPHABET;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Produces candidate codes drawn uniformly from the 62-symbol alphabet.
pub trait CodeSource: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// 进程级线程本地随机源（默认）
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl CodeSource for ThreadRngSource {
    fn generate(&self, length: usize) -> String {
        iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
            .take(length)
            .collect()
    }
}

/// 固定种子的随机源，同一种子产生同一序列
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeSource for SeededSource {
    fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock();
        iter::repeat_with(|| Alphanumeric.sample(&mut *rng) as char)
            .take(length)
            .collect()
    }
}

/// Replays a fixed list of codes in order, wrapping around at the end.
///
/// `length` is ignored. Meant for tests that need to force collisions.
/// An empty list yields `None`.
pub struct SequenceSource {
    codes: Vec<String>,
    cursor: AtomicUsize,
}

impl SequenceSource {
    pub fn new<I, S>(codes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            return None;
        }
        Some(Self {
            codes,
            cursor: AtomicUsize::new(0),
        })
    }
}

impl CodeSource for SequenceSource {
    fn generate(&self, _length: usize) -> String {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.codes[i % self.codes.len()].clone()
    }
}
