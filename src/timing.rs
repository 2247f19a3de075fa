use std::time::Instant;

use log::info;

/// Seconds between frame rate reports.
const REPORT_INTERVAL: f64 = 1.0;

/// Delta time and frames-per-second bookkeeping for the frame loop.
pub struct FrameTimer {
    pub begin_time: Instant,
    frame_start: Instant,
    /// Seconds the previous frame took. Assumed 1/60 before the first frame ends.
    pub delta_time: f64,
    frame_count: u32,
    interval_elapsed: f64,
    fps: f64,
    print_fps: bool,
}

impl FrameTimer {
    pub fn new(now: Instant, print_fps: bool) -> FrameTimer {
        FrameTimer {
            begin_time: now,
            frame_start: now,
            delta_time: 1.0 / 60.0,
            frame_count: 0,
            interval_elapsed: 0.0,
            fps: 0.0,
            print_fps,
        }
    }

    pub fn frame_started(&mut self, now: Instant) {
        self.frame_start = now;
    }

    /// Ends the frame. Returns the new frame rate when a report interval has
    /// just elapsed.
    pub fn frame_finished(&mut self, now: Instant) -> Option<f64> {
        self.delta_time = now.duration_since(self.frame_start).as_secs_f64();
        self.frame_count += 1;
        self.interval_elapsed += self.delta_time;

        if self.interval_elapsed < REPORT_INTERVAL {
            return None;
        }

        self.fps = self.frame_count as f64 / self.interval_elapsed;
        if self.print_fps {
            info!("FPS: {:.1}", self.fps);
        }
        self.frame_count = 0;
        self.interval_elapsed = 0.0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time as f32
    }

    /// Seconds since the timer was created.
    pub fn elapsed(&self, now: Instant) -> f64 {
        now.duration_since(self.begin_time).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_delta_is_a_sixtieth() {
        let timer = FrameTimer::new(Instant::now(), false);
        assert!((timer.delta_time - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn fps_is_reported_once_per_interval() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(start, false);
        let frame = Duration::from_millis(100);
        let mut now = start;
        let mut reports = Vec::new();
        for _ in 0..25 {
            timer.frame_started(now);
            now += frame;
            if let Some(fps) = timer.frame_finished(now) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 10.0).abs() < 1e-6);
        assert!((timer.delta_time - 0.1).abs() < 1e-9);
    }

    #[test]
    fn one_long_frame_reports_at_once() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(start, false);
        timer.frame_started(start);
        assert_eq!(timer.frame_finished(start + Duration::from_secs(2)), Some(0.5));
    }
}
