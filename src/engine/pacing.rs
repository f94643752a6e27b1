//! Frame pacing for hosts that drive the engine from a plain loop.

use std::time::{Duration, Instant};

/// Duration of one frame at `fps` (clamped to at least 1 fps)
pub fn frame_duration(fps: u64) -> Duration {
    Duration::from_micros(1_000_000 / fps.max(1))
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each loop iteration. Sleeps for whatever remains of
/// `frame` since `frame_start`; the engine advances one step per frame, so
/// this is what keeps game speed independent of machine speed.
///
/// # Example
/// ```rust,no_run
/// use std::time::Instant;
/// # use pong_arena::engine::pacing::{frame_duration, limit_frame_rate};
/// let frame_start = Instant::now();
/// // ... tick the engine ...
/// limit_frame_rate(frame_start, frame_duration(60));
/// ```
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}
