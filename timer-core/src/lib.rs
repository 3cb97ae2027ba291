//! Pure timing logic library with no platform dependencies.
//! Testable on host, usable from the wasm widget.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Elapsed-time bookkeeping. All timestamps are milliseconds from the
/// same monotonic clock; the caller supplies `now_ms` on every call.
#[derive(Clone, Debug)]
pub struct TimerCore {
    pub state: TimerState,
    accumulated_ms: u64,
    segment_start_ms: u64,
}

impl Default for TimerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerCore {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            accumulated_ms: 0,
            segment_start_ms: 0,
        }
    }

    /// Begins a run segment. Returns `false` if already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state == TimerState::Running {
            return false;
        }
        self.segment_start_ms = now_ms;
        self.state = TimerState::Running;
        true
    }

    /// Folds the current segment into the accumulator.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.accumulated_ms += now_ms.saturating_sub(self.segment_start_ms);
        self.state = TimerState::Paused;
        true
    }

    /// Same as [`start`](Self::start), but only from `Paused`.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.start(now_ms)
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.state != TimerState::Stopped || self.accumulated_ms != 0;
        self.accumulated_ms = 0;
        self.segment_start_ms = 0;
        self.state = TimerState::Stopped;
        changed
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            TimerState::Running => {
                self.accumulated_ms + now_ms.saturating_sub(self.segment_start_ms)
            }
            _ => self.accumulated_ms,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    /// 1-based position in the log.
    pub index: u32,
    pub total_ms: u64,
    /// Signed: laps outlive a reset, so a later lap can have a smaller total.
    pub diff_ms: i64,
}

/// Append-only lap sequence. Independent of [`TimerCore`] resets.
#[derive(Clone, Debug, Default)]
pub struct LapLog {
    laps: Vec<Lap>,
}

impl LapLog {
    pub fn new() -> Self {
        Self { laps: Vec::new() }
    }

    pub fn record(&mut self, total_ms: u64) -> Lap {
        let diff_ms = match self.laps.last() {
            Some(prev) => total_ms as i64 - prev.total_ms as i64,
            None => total_ms as i64,
        };
        let lap = Lap {
            index: self.laps.len() as u32 + 1,
            total_ms,
            diff_ms,
        };
        self.laps.push(lap);
        lap
    }

    pub fn clear(&mut self) -> bool {
        let had_laps = !self.laps.is_empty();
        self.laps.clear();
        had_laps
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn last(&self) -> Option<&Lap> {
        self.laps.last()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl ClockParts {
    pub fn hours_text(&self) -> String {
        format!("{:02}", self.hours)
    }

    pub fn minutes_text(&self) -> String {
        format!("{:02}", self.minutes)
    }

    pub fn seconds_text(&self) -> String {
        format!("{:02}", self.seconds)
    }

    pub fn millis_text(&self) -> String {
        format!("{:03}", self.millis)
    }
}

/// Split milliseconds into display fields. Hours are not capped.
pub fn split_clock(ms: u64) -> ClockParts {
    ClockParts {
        hours: ms / 3_600_000,
        minutes: (ms % 3_600_000) / 60_000,
        seconds: (ms % 60_000) / 1000,
        millis: ms % 1000,
    }
}

/// Format milliseconds as "MM:SS.mmm", or "HH:MM:SS.mmm" from one hour up
pub fn format_lap_time(ms: u64) -> String {
    let t = split_clock(ms);
    if t.hours == 0 {
        format!("{:02}:{:02}.{:03}", t.minutes, t.seconds, t.millis)
    } else {
        format!("{:02}:{:02}:{:02}.{:03}", t.hours, t.minutes, t.seconds, t.millis)
    }
}

/// Diff cell text: an em dash for the first lap, otherwise a signed lap time.
pub fn format_lap_diff(lap: &Lap) -> String {
    if lap.index == 1 {
        return "\u{2014}".to_string();
    }
    let sign = if lap.diff_ms < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_lap_time(lap.diff_ms.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let mut sw = TimerCore::new();
        assert_eq!(sw.state, TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(0), 0);

        assert!(sw.start(1000));
        assert_eq!(sw.state, TimerState::Running);
        assert_eq!(sw.elapsed_ms(1500), 500);
        assert_eq!(sw.elapsed_ms(2000), 1000);

        assert!(sw.pause(2000));
        assert_eq!(sw.state, TimerState::Paused);
        assert_eq!(sw.elapsed_ms(5000), 1000); // Stays at 1000 when paused

        assert!(sw.resume(5000));
        assert_eq!(sw.elapsed_ms(5500), 1500);

        assert!(sw.reset());
        assert_eq!(sw.state, TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(10000), 0);
    }

    #[test]
    fn test_pause_resume_example() {
        let mut sw = TimerCore::new();
        sw.start(0);
        sw.pause(1500);
        assert_eq!(sw.elapsed_ms(1500), 1500);

        sw.resume(9000);
        sw.pause(9500);
        assert_eq!(sw.elapsed_ms(20_000), 2000);
    }

    #[test]
    fn test_elapsed_is_sum_of_running_intervals() {
        let intervals = [(0u64, 120u64), (400, 1000), (1003, 1004), (5000, 7777)];
        let mut sw = TimerCore::new();
        for &(on, off) in &intervals {
            sw.start(on);
            sw.pause(off);
        }
        let expected: u64 = intervals.iter().map(|(on, off)| off - on).sum();
        assert_eq!(sw.elapsed_ms(100_000), expected);
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut sw = TimerCore::new();
        assert!(!sw.pause(100));
        assert!(!sw.resume(100));
        assert_eq!(sw.state, TimerState::Stopped);

        sw.start(100);
        assert!(!sw.start(200)); // origin kept
        assert!(!sw.resume(200));
        assert_eq!(sw.elapsed_ms(300), 200);

        sw.pause(300);
        assert!(!sw.pause(400));
        assert_eq!(sw.elapsed_ms(400), 200);
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let mut sw = TimerCore::new();
        sw.start(1000);
        assert_eq!(sw.elapsed_ms(900), 0);
        sw.pause(900);
        assert_eq!(sw.accumulated_ms(), 0);
    }

    #[test]
    fn test_reset_from_running() {
        let mut sw = TimerCore::new();
        sw.start(0);
        assert!(sw.reset());
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(5000), 0);
        assert!(!sw.reset());
    }

    #[test]
    fn test_lap_diffs() {
        let mut log = LapLog::new();
        let diffs: Vec<i64> = [1000, 2500, 4000]
            .iter()
            .map(|&t| log.record(t).diff_ms)
            .collect();
        assert_eq!(diffs, vec![1000, 1500, 1500]);
        assert_eq!(log.last().map(|l| l.index), Some(3));

        let sum: i64 = log.laps().iter().map(|l| l.diff_ms).sum();
        assert_eq!(sum, 4000);
    }

    #[test]
    fn test_lap_after_shorter_total_is_negative() {
        let mut log = LapLog::new();
        log.record(5000);
        let lap = log.record(1200);
        assert_eq!(lap.index, 2);
        assert_eq!(lap.diff_ms, -3800);

        let sum: i64 = log.laps().iter().map(|l| l.diff_ms).sum();
        assert_eq!(sum, 1200);
    }

    #[test]
    fn test_clear_restarts_indexing() {
        let mut log = LapLog::new();
        log.record(10);
        log.record(20);
        assert!(log.clear());
        assert!(log.is_empty());
        assert!(!log.clear());

        let lap = log.record(50);
        assert_eq!((lap.index, lap.diff_ms), (1, 50));
    }

    #[test]
    fn test_split_clock() {
        let t = split_clock(3_723_456);
        assert_eq!(t, ClockParts { hours: 1, minutes: 2, seconds: 3, millis: 456 });
        assert_eq!(t.hours_text(), "01");
        assert_eq!(t.millis_text(), "456");

        let big = split_clock(100 * 3_600_000 + 7);
        assert_eq!(big.hours_text(), "100");
        assert_eq!(big.millis_text(), "007");
    }

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(0), "00:00.000");
        assert_eq!(format_lap_time(61_005), "01:01.005");
        assert_eq!(format_lap_time(3_599_999), "59:59.999");
        assert_eq!(format_lap_time(3_600_000), "01:00:00.000");
    }

    #[test]
    fn test_format_lap_diff() {
        let mut log = LapLog::new();
        let first = log.record(1000);
        let second = log.record(2500);
        let third = log.record(500);
        assert_eq!(format_lap_diff(&first), "\u{2014}");
        assert_eq!(format_lap_diff(&second), "+00:01.500");
        assert_eq!(format_lap_diff(&third), "-00:02.000");
    }
}
