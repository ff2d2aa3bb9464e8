//! Fix-validity state machine.
//!
//! Consumes decoded samples, applies the validity predicate, and tracks
//! fix-acquired transitions plus the cumulative counters the telemetry
//! reports expose. Owns the [`SentenceDecoder`]; everything GPS-related
//! flows through [`FixTracker::ingest_byte`].
//!
//! Two predicates exist on purpose:
//! - the **report** predicate (counts `validCount`, shown as `valid` in the
//!   GPS report) also rejects exactly-zero coordinates;
//! - the **first-fix** predicate (controls the one-time "fix acquired"
//!   notification and the sticky `initialized` flag) does not.
//!
//! The asymmetry matches the shipped device behaviour the host controller
//! was calibrated against — do not unify them.

use crate::app::events::Report;
use crate::app::ports::ReportSink;
use crate::config::SystemConfig;

use super::decoder::{FeedResult, GpsSample, SentenceDecoder, NO_POSITION};

/// Seconds reported in `lastValid` when no valid fix was ever seen.
pub const NEVER_VALID_SENTINEL_SECS: u32 = 999;

/// Snapshot of the tracker's bookkeeping, mutated only on sentence
/// completion or explicit reset.
#[derive(Debug, Clone, Default)]
pub struct FixState {
    /// Sticky first-fix flag. Set once by the first-fix predicate, cleared
    /// only by [`FixTracker::reset`] — never by later invalid samples.
    pub initialized: bool,
    /// Samples that passed the report predicate.
    pub valid_count: u32,
    /// Bytes fed to the decoder, regardless of parse outcome.
    pub total_decoded_bytes: u32,
    /// Loop time of the last report-valid sample. Survives `reset()`.
    pub last_valid_at_ms: Option<u32>,
    /// Latest decoded sample, if any.
    pub current: Option<GpsSample>,
}

pub struct FixTracker {
    decoder: SentenceDecoder,
    state: FixState,
    min_satellites: i32,
    max_fix_age_ms: u32,
}

impl FixTracker {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            decoder: SentenceDecoder::new(),
            state: FixState::default(),
            min_satellites: config.min_satellites,
            max_fix_age_ms: config.max_fix_age_ms,
        }
    }

    /// Feed one receiver byte. Returns whether a full sentence was just
    /// parsed. Emits the one-time "fix acquired" report through `sink`.
    pub fn ingest_byte(&mut self, byte: u8, now_ms: u32, sink: &mut impl ReportSink) -> bool {
        self.state.total_decoded_bytes = self.state.total_decoded_bytes.wrapping_add(1);

        match self.decoder.feed(byte, now_ms) {
            FeedResult::Pending => false,
            FeedResult::Complete(None) => true,
            FeedResult::Complete(Some(sample)) => {
                self.on_sentence_complete(sample, now_ms, sink);
                true
            }
        }
    }

    /// Evaluate a freshly completed sample against both predicates.
    fn on_sentence_complete(&mut self, sample: GpsSample, now_ms: u32, sink: &mut impl ReportSink) {
        if self.report_valid(&sample) {
            self.state.valid_count += 1;
            self.state.last_valid_at_ms = Some(now_ms);
        }

        if !self.state.initialized && self.first_fix_valid(&sample) {
            self.state.initialized = true;
            sink.emit(&Report::System {
                message: "GPS fix obtido com sucesso!".to_string(),
            });
        }

        self.state.current = Some(sample);
    }

    /// Clear the sticky flag and counters; `last_valid_at_ms` and the
    /// retained sample survive so the heartbeat keeps its history.
    pub fn reset(&mut self) {
        self.state.initialized = false;
        self.state.valid_count = 0;
        self.state.total_decoded_bytes = 0;
    }

    /// Read-only view for report building. Does not touch the decoder.
    pub fn snapshot(&self) -> &FixState {
        &self.state
    }

    /// Report predicate evaluated against the retained sample with its age
    /// recomputed at `now_ms` — freshness is judged at report time, not at
    /// decode time.
    pub fn current_validity(&self, now_ms: u32) -> bool {
        match &self.state.current {
            Some(sample) => {
                let aged = GpsSample {
                    fix_age_ms: self.decoder.age_ms(now_ms),
                    ..*sample
                };
                self.report_valid(&aged)
            }
            None => false,
        }
    }

    /// Age of the last decoded position at `now_ms` (`u32::MAX` if none).
    pub fn age_ms(&self, now_ms: u32) -> u32 {
        self.decoder.age_ms(now_ms)
    }

    /// Seconds since the last report-valid sample, or the 999 sentinel.
    pub fn secs_since_last_valid(&self, now_ms: u32) -> u32 {
        match self.state.last_valid_at_ms {
            Some(at) => now_ms.wrapping_sub(at) / 1000,
            None => NEVER_VALID_SENTINEL_SECS,
        }
    }

    // ── Predicates ────────────────────────────────────────────

    fn report_valid(&self, s: &GpsSample) -> bool {
        self.first_fix_valid(s) && s.latitude != 0.0 && s.longitude != 0.0
    }

    fn first_fix_valid(&self, s: &GpsSample) -> bool {
        s.latitude != NO_POSITION
            && s.longitude != NO_POSITION
            && s.fix_age_ms < self.max_fix_age_ms
            && s.satellites >= self.min_satellites
    }

    #[cfg(test)]
    pub(crate) fn feed_sample(&mut self, sample: GpsSample, now_ms: u32, sink: &mut impl ReportSink) {
        self.on_sentence_complete(sample, now_ms, sink);
    }
}
