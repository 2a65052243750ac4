use crate::constants::{HISTORY_COMPACTION_FACTOR, HISTORY_COMPACTION_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub time: f64,     // s
    pub velocity: f64, // m/s
}

// Bounded velocity-over-time record backing the chart. Appends are O(1);
// once the threshold is reached the whole sequence is compacted by averaging
// adjacent groups, trading resolution for a bounded point count.
#[derive(Debug, Clone)]
pub struct History {
    samples: Vec<HistorySample>,
    threshold: usize,
    factor: usize,
}

impl History {
    pub fn new() -> Self {
        History::with_limits(HISTORY_COMPACTION_THRESHOLD, HISTORY_COMPACTION_FACTOR)
    }

    pub fn with_limits(threshold: usize, factor: usize) -> Self {
        assert!(factor >= 2, "compaction factor must merge at least two samples");
        assert!(threshold > factor, "threshold must exceed the compaction factor");

        History {
            samples: vec![HistorySample {
                time: 0.0,
                velocity: 0.0,
            }],
            threshold,
            factor,
        }
    }

    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push(sample);
        if self.samples.len() >= self.threshold {
            self.compact();
        }
    }

    // Replaces each full group of `factor` adjacent samples with their
    // arithmetic mean. An incomplete trailing group contributes its first
    // sample unchanged.
    fn compact(&mut self) {
        let factor = self.factor as f64;
        let compacted = self
            .samples
            .chunks(self.factor)
            .map(|group| {
                if group.len() == self.factor {
                    HistorySample {
                        time: group.iter().map(|s| s.time).sum::<f64>() / factor,
                        velocity: group.iter().map(|s| s.velocity).sum::<f64>() / factor,
                    }
                } else {
                    group[0]
                }
            })
            .collect();
        self.samples = compacted;
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.samples.push(HistorySample {
            time: 0.0,
            velocity: 0.0,
        });
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&HistorySample> {
        self.samples.last()
    }
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}
