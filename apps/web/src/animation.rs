//! Frame counter for the "Loading scores..." spinner.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Running,
    Paused,
}

pub const SPINNER_FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

const FRAMES_PER_SECOND: f64 = 12.0;
const MAX_FRAME_DELTA: f64 = 0.25;
#[allow(clippy::cast_precision_loss)]
const CYCLE_LENGTH: f64 = SPINNER_FRAMES.len() as f64;

/// Moves `counter` forward by the time elapsed since `last_tick`.
///
/// Long gaps (a backgrounded tab) are clamped so the spinner does not jump,
/// and a clock that runs backwards never reverses it.
pub fn advance_animation_counter(
    counter: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: AnimationMode,
) -> (f64, Option<f64>) {
    let delta = last_tick.map_or(0.0, |last| {
        (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA)
    });

    let next = match mode {
        AnimationMode::Running => (counter + delta * FRAMES_PER_SECOND).rem_euclid(CYCLE_LENGTH),
        AnimationMode::Paused => counter.rem_euclid(CYCLE_LENGTH),
    };

    (next, Some(now_seconds))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn spinner_frame(counter: f64) -> char {
    let index = counter.rem_euclid(CYCLE_LENGTH).floor() as usize;
    SPINNER_FRAMES[index.min(SPINNER_FRAMES.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn first_tick_only_records_the_clock() {
        let (counter, last_tick) =
            advance_animation_counter(3.5, None, 10.0, AnimationMode::Running);
        assert_close(counter, 3.5);
        assert_eq!(last_tick, Some(10.0));
    }

    #[test]
    fn running_spinner_wraps_around_the_frames() {
        let (counter, _) = advance_animation_counter(7.5, Some(4.0), 4.1, AnimationMode::Running);
        assert_close(counter, (7.5 + 0.1 * FRAMES_PER_SECOND) % CYCLE_LENGTH);
        assert_eq!(spinner_frame(counter), SPINNER_FRAMES[0]);
    }

    #[test]
    fn paused_spinner_holds_its_frame() {
        let (counter, last_tick) =
            advance_animation_counter(2.25, Some(1.0), 1.2, AnimationMode::Paused);
        assert_close(counter, 2.25);
        assert_eq!(last_tick, Some(1.2));
    }

    #[test]
    fn long_gaps_and_clock_skew_are_clamped() {
        let (counter, _) = advance_animation_counter(0.0, Some(3.0), 30.0, AnimationMode::Running);
        assert_close(counter, MAX_FRAME_DELTA * FRAMES_PER_SECOND);

        let (counter, last_tick) =
            advance_animation_counter(1.0, Some(10.0), 9.0, AnimationMode::Running);
        assert_close(counter, 1.0);
        assert_eq!(last_tick, Some(9.0));
    }

    #[test]
    fn frames_follow_the_counter() {
        assert_eq!(spinner_frame(0.0), '⣾');
        assert_eq!(spinner_frame(1.9), '⣽');
        assert_eq!(spinner_frame(-0.5), '⣷');
    }
}
