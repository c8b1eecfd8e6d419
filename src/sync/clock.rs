use log::debug;
use std::time::{Duration, Instant};

/// Catch-up ceiling for fixed stepping. If a tick arrives later than this
/// many whole timesteps, the remainder of the backlog is dropped.
const MAX_CATCHUP_STEPS: u32 = 8;

/// How the clock derives physics step sizes from tick times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Deterministic stepping: elapsed time feeds an accumulator and the
    /// simulation advances in whole `timestep` increments.
    Fixed { timestep: Duration },
    /// Advance by exactly the measured time between ticks.
    Measured,
}

/// The steps one tick should run: `count` physics advances of `step` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSteps {
    pub step: f32,
    pub count: u32,
}

/// Tracks elapsed time between ticks.
///
/// The clock never runs backwards; a tick timestamp earlier than the previous
/// one counts as zero elapsed time. Tests feed explicit instants through
/// [`SimulationClock::tick_at`] instead of relying on wall time.
pub struct SimulationClock {
    mode: StepMode,
    last_tick: Instant,
    accumulator: Duration,
}

impl SimulationClock {
    pub fn new(mode: StepMode) -> Self {
        Self::with_origin(mode, Instant::now())
    }

    /// A clock whose "previous tick" is pinned to `origin`.
    pub fn with_origin(mode: StepMode, origin: Instant) -> Self {
        SimulationClock {
            mode,
            last_tick: origin,
            accumulator: Duration::ZERO,
        }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Registers a tick at the current wall time.
    pub fn tick(&mut self) -> TickSteps {
        self.tick_at(Instant::now())
    }

    /// Registers a tick at `now` and returns the physics steps it owes.
    pub fn tick_at(&mut self, now: Instant) -> TickSteps {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        match self.mode {
            StepMode::Measured => TickSteps {
                step: elapsed.as_secs_f32(),
                count: u32::from(!elapsed.is_zero()),
            },
            StepMode::Fixed { timestep } => {
                self.accumulator += elapsed;

                let mut count = 0;
                while self.accumulator >= timestep {
                    self.accumulator -= timestep;
                    count += 1;
                }
                if count > MAX_CATCHUP_STEPS {
                    debug!("Tick fell {count} steps behind, clamping catch-up");
                    count = MAX_CATCHUP_STEPS;
                }

                TickSteps {
                    step: timestep.as_secs_f32(),
                    count,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn fixed_mode_accumulates_whole_steps() {
        let origin = Instant::now();
        let mut clock = SimulationClock::with_origin(StepMode::Fixed { timestep: STEP }, origin);

        let steps = clock.tick_at(origin + Duration::from_millis(25));
        assert_eq!(steps.count, 2);
        assert_eq!(steps.step, 0.01);

        // 5ms remainder carries over.
        let steps = clock.tick_at(origin + Duration::from_millis(30));
        assert_eq!(steps.count, 1);
    }

    #[test]
    fn measured_mode_returns_elapsed() {
        let origin = Instant::now();
        let mut clock = SimulationClock::with_origin(StepMode::Measured, origin);

        let steps = clock.tick_at(origin + Duration::from_millis(16));
        assert_eq!(steps.count, 1);
        assert!((steps.step - 0.016).abs() < 1e-6);
    }

    #[test]
    fn clock_is_monotonic() {
        let origin = Instant::now();
        let mut clock = SimulationClock::with_origin(StepMode::Measured, origin);

        clock.tick_at(origin + Duration::from_millis(20));
        // An out-of-order timestamp counts as no time passing.
        let steps = clock.tick_at(origin + Duration::from_millis(5));
        assert_eq!(steps.count, 0);
        assert_eq!(steps.step, 0.0);
    }

    #[test]
    fn fixed_mode_clamps_huge_gaps() {
        let origin = Instant::now();
        let mut clock = SimulationClock::with_origin(StepMode::Fixed { timestep: STEP }, origin);

        let steps = clock.tick_at(origin + Duration::from_secs(10));
        assert_eq!(steps.count, MAX_CATCHUP_STEPS);
    }
}
