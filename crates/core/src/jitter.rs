//! Jitter Sources
//!
//! Display-only perturbation (lot sparklines, carried-forward trend days) is
//! drawn from an injected source instead of ambient randomness, so a fixed
//! source gives byte-identical output.

/// Source of uniform samples used for display jitter.
pub trait JitterSource: Send {
    /// Next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Next sample in `[-amplitude, amplitude)`.
    fn spread(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() - 0.5) * 2.0 * amplitude
    }
}

/// A source that always sits at the midpoint, i.e. adds no jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_unit(&mut self) -> f64 {
        0.5
    }
}

/// Replays a fixed sequence of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceJitter {
    samples: Vec<f64>,
    cursor: usize,
}

impl SequenceJitter {
    /// Create a replaying source. An empty sequence behaves like [`NoJitter`].
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl JitterSource for SequenceJitter {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.5;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_jitter_spread_is_zero() {
        let mut source = NoJitter;
        assert_eq!(source.spread(3.0), 0.0);
    }

    #[test]
    fn test_sequence_jitter_cycles() {
        let mut source = SequenceJitter::new(vec![0.0, 1.0]);
        assert_eq!(source.spread(1.0), -1.0);
        assert_eq!(source.spread(1.0), 1.0);
        assert_eq!(source.spread(1.0), -1.0);
    }

    #[test]
    fn test_empty_sequence_is_neutral() {
        let mut source = SequenceJitter::new(Vec::new());
        assert_eq!(source.next_unit(), 0.5);
    }
}
