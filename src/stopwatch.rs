use timer_core::{Lap, LapLog, TimerCore, TimerState};

/// User-facing operations, one per button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    Start,
    Pause,
    Resume,
    Reset,
    Lap,
    ClearLaps,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Button availability for a given phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    pub resume_visible: bool,
    pub reset: bool,
    pub lap: bool,
    pub clear_laps: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase, lap_count: usize) -> Self {
        let clear_laps = lap_count > 0;
        match phase {
            Phase::Idle => Self {
                start: true,
                pause: false,
                resume: false,
                resume_visible: false,
                reset: false,
                lap: false,
                clear_laps,
            },
            Phase::Running => Self {
                start: false,
                pause: true,
                resume: false,
                resume_visible: false,
                reset: true,
                lap: true,
                clear_laps,
            },
            // lap stays off while paused
            Phase::Paused => Self {
                start: false,
                pause: false,
                resume: true,
                resume_visible: true,
                reset: true,
                lap: false,
                clear_laps,
            },
        }
    }
}

/// The timer controller: one clock plus its lap log.
///
/// Every mutating call returns `true` when it changed something; callers
/// treat that as the cue to re-render controls. Invalid transitions are
/// ignored and return `false`.
pub struct StopwatchState {
    pub timer: TimerCore,
    laps: LapLog,
}

impl Default for StopwatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchState {
    pub fn new() -> Self {
        Self {
            timer: TimerCore::new(),
            laps: LapLog::new(),
        }
    }

    pub fn start(&mut self, now_ms: u64) -> bool {
        self.timer.start(now_ms)
    }

    pub fn pause(&mut self, now_ms: u64) -> bool {
        self.timer.pause(now_ms)
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        self.timer.resume(now_ms)
    }

    /// Zeroes the clock from any state. Laps are kept.
    pub fn reset(&mut self) -> bool {
        self.timer.reset()
    }

    pub fn record_lap(&mut self, now_ms: u64) -> Option<Lap> {
        if !self.timer.is_running() {
            return None;
        }
        let total = self.timer.elapsed_ms(now_ms);
        Some(self.laps.record(total))
    }

    pub fn clear_laps(&mut self) -> bool {
        self.laps.clear()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.timer.elapsed_ms(now_ms)
    }

    pub fn laps(&self) -> &[Lap] {
        self.laps.laps()
    }

    pub fn phase(&self) -> Phase {
        match self.timer.state {
            TimerState::Stopped => Phase::Idle,
            TimerState::Running => Phase::Running,
            TimerState::Paused => Phase::Paused,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(self.phase(), self.laps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut sw = StopwatchState::new();
        assert_eq!(sw.phase(), Phase::Idle);

        assert!(!sw.resume(0));
        assert_eq!(sw.phase(), Phase::Idle);

        assert!(sw.start(0));
        assert_eq!(sw.phase(), Phase::Running);
        assert!(sw.pause(100));
        assert_eq!(sw.phase(), Phase::Paused);
        assert!(sw.resume(200));
        assert_eq!(sw.phase(), Phase::Running);
        assert!(sw.reset());
        assert_eq!(sw.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_from_paused_continues() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.pause(1500);
        assert!(sw.start(3000));
        assert_eq!(sw.elapsed_ms(3500), 2000);
    }

    #[test]
    fn test_lap_indices_and_diffs() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        let laps: Vec<Lap> = [1000, 2500, 4000]
            .iter()
            .filter_map(|&t| sw.record_lap(t))
            .collect();
        assert_eq!(laps.iter().map(|l| l.index).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(laps.iter().map(|l| l.diff_ms).collect::<Vec<_>>(), vec![1000, 1500, 1500]);

        let next = sw.record_lap(4200).unwrap();
        assert_eq!(next.index, 4);
        let sum: i64 = sw.laps().iter().map(|l| l.diff_ms).sum();
        assert_eq!(sum, next.total_ms as i64);
    }

    #[test]
    fn test_lap_ignored_unless_running() {
        let mut sw = StopwatchState::new();
        assert!(sw.record_lap(100).is_none());

        sw.start(0);
        sw.pause(500);
        assert!(sw.record_lap(600).is_none());
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_lap_measures_elapsed_not_wall_time() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.pause(1000);
        sw.resume(10_000);
        let lap = sw.record_lap(10_250).unwrap();
        assert_eq!(lap.total_ms, 1250);
    }

    #[test]
    fn test_reset_keeps_laps() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.record_lap(300);
        sw.record_lap(700);
        assert!(sw.reset());
        assert_eq!(sw.phase(), Phase::Idle);
        assert_eq!(sw.elapsed_ms(5000), 0);
        assert_eq!(sw.laps().len(), 2);

        // diff is measured against the surviving lap
        sw.start(6000);
        let lap = sw.record_lap(6100).unwrap();
        assert_eq!((lap.index, lap.total_ms, lap.diff_ms), (3, 100, -600));
    }

    #[test]
    fn test_clear_laps_keeps_phase() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        sw.record_lap(100);
        assert!(sw.clear_laps());
        assert_eq!(sw.phase(), Phase::Running);
        assert!(sw.laps().is_empty());

        sw.record_lap(200);
        sw.pause(300);
        assert!(sw.clear_laps());
        assert_eq!(sw.phase(), Phase::Paused);
        assert_eq!(sw.elapsed_ms(900), 300);

        sw.reset();
        assert!(!sw.clear_laps());
        assert_eq!(sw.phase(), Phase::Idle);
    }

    #[test]
    fn test_controls_table() {
        let idle = Controls::for_phase(Phase::Idle, 0);
        assert!(idle.start && !idle.pause && !idle.resume && !idle.resume_visible);
        assert!(!idle.reset && !idle.lap && !idle.clear_laps);

        let running = Controls::for_phase(Phase::Running, 2);
        assert!(!running.start && running.pause && !running.resume_visible);
        assert!(running.reset && running.lap && running.clear_laps);

        let paused = Controls::for_phase(Phase::Paused, 0);
        assert!(!paused.start && !paused.pause && paused.resume && paused.resume_visible);
        assert!(paused.reset && !paused.lap && !paused.clear_laps);
    }

    #[test]
    fn test_controls_follow_laps() {
        let mut sw = StopwatchState::new();
        sw.start(0);
        assert!(!sw.controls().clear_laps);
        sw.record_lap(10);
        assert!(sw.controls().clear_laps);
        sw.reset();
        let c = sw.controls();
        assert!(c.start && c.clear_laps && !c.reset);
    }
}
