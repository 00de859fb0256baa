/// A detected gap in incoming sequence numbers.
///
/// Signals that at least one prior frame never arrived. The wire format
/// carries no information to reconstruct an exact loss count, so a burst
/// of drops yields one gap, not one per dropped frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceGap {
    /// The sequence number the reader expected next.
    pub expected: i64,
    /// The sequence number actually observed.
    pub observed: i64,
}

/// Per-direction loss-detection state.
///
/// Fresh (or freshly reset) state adopts the first observed value as the
/// baseline without signalling; thereafter each frame must carry
/// `previous + 1`. The counter resynchronizes to the observed value on
/// every frame, matched or not, so one loss event never cascades into
/// repeated false positives.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: Option<i64>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one incoming sequence number against the expected value and
    /// resynchronize to it.
    pub fn observe(&mut self, sequence: i64) -> Option<SequenceGap> {
        let gap = match self.last {
            Some(previous) if sequence != previous.wrapping_add(1) => Some(SequenceGap {
                expected: previous.wrapping_add(1),
                observed: sequence,
            }),
            _ => None,
        };
        self.last = Some(sequence);
        gap
    }

    /// Forget the baseline; used when the remote endpoint is known to have
    /// restarted and will sequence from 0 again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
