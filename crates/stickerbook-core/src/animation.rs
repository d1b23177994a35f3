//! Viewport fly-to animation as an explicit interpolation value.

use crate::viewport::Viewport;
use kurbo::Point;

/// A time-driven interpolation between two viewport states.
///
/// The animation is advanced by an external clock via [`tick`]; the
/// engine samples [`current`] once per frame. Cancelling is simply
/// dropping the value — there is no lifecycle to dispose.
///
/// [`tick`]: ViewportAnimation::tick
/// [`current`]: ViewportAnimation::current
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportAnimation {
    /// Viewport at the start of the animation.
    pub start: Viewport,
    /// Target viewport.
    pub end: Viewport,
    /// Time elapsed so far, in seconds.
    pub elapsed: f64,
    /// Total duration, in seconds.
    pub duration: f64,
}

impl ViewportAnimation {
    /// Begin a fly-to from `start` to `end` over `duration` seconds.
    ///
    /// A non-positive duration produces an animation that is already
    /// finished, sampling at the target.
    pub fn new(start: Viewport, end: Viewport, duration: f64) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Interpolation progress in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether the animation has reached its target.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Sample the viewport at the current progress.
    ///
    /// Center and zoom interpolate linearly.
    pub fn current(&self) -> Viewport {
        let t = self.progress();
        Viewport {
            center: Point::new(
                lerp(self.start.center.x, self.end.center.x, t),
                lerp(self.start.center.y, self.end.center.y, t),
            ),
            zoom: lerp(self.start.zoom, self.end.zoom, t),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
