//! Incremental GPS sentence decoder.
//!
//! Thin stateful wrapper around the `nmea0183` parser. The receiver
//! interleaves several sentence types; position comes from RMC and GGA,
//! satellite count only from GGA, and the calendar date only from RMC.
//! This decoder merges them into one rolling last-known view the same way
//! the receiver-side libraries do, so a sample built after any
//! position-bearing sentence always carries the freshest of each field.

use nmea0183::{ParseResult, Parser};

/// Sentinel latitude/longitude meaning "no position decoded yet".
/// Outside the valid ±180° range, so it can never collide with a real fix.
pub const NO_POSITION: f64 = 1000.0;

/// Satellite count before the first GGA sentence.
const NO_SATELLITES: i32 = 0;

/// Decoded UTC calendar date + time (from RMC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// One position sample, produced whenever a position-bearing sentence
/// completes. Transient — the tracker retains at most the latest one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsSample {
    pub latitude: f64,
    pub longitude: f64,
    /// Age of the position at sample time (ms). Zero for a sample built
    /// from the sentence that just completed.
    pub fix_age_ms: u32,
    pub satellites: i32,
    pub timestamp: Option<GpsDateTime>,
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedResult {
    /// Mid-sentence, or a sentence that failed its checksum.
    Pending,
    /// A checksum-valid sentence completed. `Some` when it carried a
    /// position (RMC/GGA with fix), `None` for other sentence types.
    Complete(Option<GpsSample>),
}

pub struct SentenceDecoder {
    parser: Parser,
    latitude: f64,
    longitude: f64,
    satellites: i32,
    /// Loop time of the last position-bearing sentence.
    position_at_ms: Option<u32>,
    timestamp: Option<GpsDateTime>,
}

impl SentenceDecoder {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            latitude: NO_POSITION,
            longitude: NO_POSITION,
            satellites: NO_SATELLITES,
            position_at_ms: None,
            timestamp: None,
        }
    }

    /// Feed one byte from the receiver stream.
    pub fn feed(&mut self, byte: u8, now_ms: u32) -> FeedResult {
        let Some(result) = self.parser.parse_from_byte(byte) else {
            return FeedResult::Pending;
        };

        match result {
            Ok(ParseResult::RMC(Some(rmc))) => {
                self.latitude = rmc.latitude.as_f64();
                self.longitude = rmc.longitude.as_f64();
                self.position_at_ms = Some(now_ms);
                self.timestamp = Some(GpsDateTime {
                    year: rmc.datetime.date.year,
                    month: rmc.datetime.date.month,
                    day: rmc.datetime.date.day,
                    hour: rmc.datetime.time.hours,
                    minute: rmc.datetime.time.minutes,
                    second: rmc.datetime.time.seconds as u8,
                });
                FeedResult::Complete(Some(self.sample()))
            }
            Ok(ParseResult::GGA(Some(gga))) => {
                self.latitude = gga.latitude.as_f64();
                self.longitude = gga.longitude.as_f64();
                self.satellites = i32::from(gga.sat_in_use);
                self.position_at_ms = Some(now_ms);
                FeedResult::Complete(Some(self.sample()))
            }
            // Valid sentence without a committed position: receiver alive
            // but fixless, or a sentence type we don't track.
            Ok(_) => FeedResult::Complete(None),
            // Checksum / format errors are not completions.
            Err(_) => FeedResult::Pending,
        }
    }

    /// Age of the last decoded position at `now_ms`. `u32::MAX` before the
    /// first position-bearing sentence. Wraparound-safe.
    pub fn age_ms(&self, now_ms: u32) -> u32 {
        match self.position_at_ms {
            Some(at) => now_ms.wrapping_sub(at),
            None => u32::MAX,
        }
    }

    fn sample(&self) -> GpsSample {
        GpsSample {
            latitude: self.latitude,
            longitude: self.longitude,
            fix_age_ms: 0,
            satellites: self.satellites,
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA_8_SATS: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const RMC_2024: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230324,003.1,W*61\r\n";

    fn feed_all(dec: &mut SentenceDecoder, bytes: &[u8], now: u32) -> Option<GpsSample> {
        let mut last = None;
        for &b in bytes {
            if let FeedResult::Complete(Some(sample)) = dec.feed(b, now) {
                last = Some(sample);
            }
        }
        last
    }

    #[test]
    fn gga_yields_position_and_satellites() {
        let mut dec = SentenceDecoder::new();
        let sample = feed_all(&mut dec, GGA_8_SATS, 1000).expect("position sample");
        assert!((sample.latitude - 48.1173).abs() < 0.001);
        assert!((sample.longitude - 11.516_666).abs() < 0.001);
        assert_eq!(sample.satellites, 8);
        assert!(sample.timestamp.is_none(), "GGA carries no calendar date");
    }

    #[test]
    fn rmc_carries_calendar_date() {
        let mut dec = SentenceDecoder::new();
        let sample = feed_all(&mut dec, RMC_2024, 0).expect("position sample");
        let ts = sample.timestamp.expect("RMC date");
        assert_eq!(ts.year, 2024);
        assert_eq!(ts.month, 3);
        assert_eq!(ts.day, 23);
        assert_eq!((ts.hour, ts.minute, ts.second), (12, 35, 19));
    }

    #[test]
    fn fields_merge_across_sentence_types() {
        let mut dec = SentenceDecoder::new();
        feed_all(&mut dec, GGA_8_SATS, 0);
        let sample = feed_all(&mut dec, RMC_2024, 0).expect("position sample");
        // Satellite count from the earlier GGA survives the RMC update.
        assert_eq!(sample.satellites, 8);
        assert!(sample.timestamp.is_some());
    }

    #[test]
    fn age_is_max_before_first_position() {
        let dec = SentenceDecoder::new();
        assert_eq!(dec.age_ms(5000), u32::MAX);
    }

    #[test]
    fn age_tracks_elapsed_time_and_wraps() {
        let mut dec = SentenceDecoder::new();
        feed_all(&mut dec, GGA_8_SATS, u32::MAX - 500);
        assert_eq!(dec.age_ms(u32::MAX - 500), 0);
        // 1000 ms later, across the u32 boundary.
        assert_eq!(dec.age_ms(499), 1000);
    }

    #[test]
    fn garbage_bytes_never_complete() {
        let mut dec = SentenceDecoder::new();
        for &b in b"not an nmea sentence\r\n" {
            assert!(
                !matches!(dec.feed(b, 0), FeedResult::Complete(Some(_))),
                "garbage must not produce a position"
            );
        }
        assert_eq!(dec.age_ms(0), u32::MAX);
    }
}
