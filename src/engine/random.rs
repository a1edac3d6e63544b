// Uniform index selection and Fisher-Yates shuffling over an injectable random source.

use parking_lot::Mutex;
use rand::Rng;

/// Source of uniform randomness over `[0, 1)`. Not required to be cryptographically secure.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Thread-local PRNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: Mutex<usize>,
}

impl SequenceRandom {
    /// Values outside `[0, 1)` are clamped into range.
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&self) -> f64 {
        let mut cursor = self.cursor.lock();
        let v = self.values[*cursor % self.values.len()];
        *cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// `floor(random() * n)`; `None` when there is nothing to pick from.
pub fn uniform_index(n: usize, random: &dyn RandomSource) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let idx = (random.next_unit() * n as f64).floor() as usize;
    // A source returning values a hair below 1.0 can round up to n.
    Some(idx.min(n - 1))
}

/// In-place Fisher-Yates shuffle, walking backwards from the last element.
pub fn shuffle<T>(items: &mut [T], random: &dyn RandomSource) {
    for i in (1..items.len()).rev() {
        if let Some(j) = uniform_index(i + 1, random) {
            items.swap(i, j);
        }
    }
}
