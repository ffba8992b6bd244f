use super::*;

/// Tunables for the page behaviors. The defaults are the values the landing
/// page ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Header switches to `scrolled` strictly above this offset.
    pub scroll_threshold_px: i64,
    pub reveal_threshold: f64,
    /// Shrinks the bottom edge of the reveal trigger region.
    pub reveal_bottom_margin_px: i64,
    pub counter_steps: u32,
    pub frame_interval_ms: i64,
    pub carousel_period_ms: i64,
    pub press_feedback_ms: i64,
    pub parallax_content_factor: f64,
    pub parallax_particle_factor: f64,
    pub smooth_scroll_duration_ms: i64,
    pub viewport_height: i64,
    /// Re-run every counter each time a stats container re-enters view.
    pub restart_counters_on_repeat_reveal: bool,
    /// Clear the card's view-button transform on pointer leave.
    pub hide_view_on_leave: bool,
    pub timer_step_limit: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 100,
            reveal_threshold: 0.2,
            reveal_bottom_margin_px: 50,
            counter_steps: 50,
            frame_interval_ms: 16,
            carousel_period_ms: 6_000,
            press_feedback_ms: 200,
            parallax_content_factor: 0.1,
            parallax_particle_factor: 0.05,
            smooth_scroll_duration_ms: 300,
            viewport_height: 800,
            restart_counters_on_repeat_reveal: false,
            hide_view_on_leave: false,
            timer_step_limit: 10_000,
        }
    }
}

impl PageConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("frame_interval_ms", self.frame_interval_ms),
            ("carousel_period_ms", self.carousel_period_ms),
            ("press_feedback_ms", self.press_feedback_ms),
            ("smooth_scroll_duration_ms", self.smooth_scroll_duration_ms),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.counter_steps == 0 {
            return Err(Error::Config("counter_steps must be at least 1".into()));
        }
        if self.timer_step_limit == 0 {
            return Err(Error::Config("timer_step_limit must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(Error::Config(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if self.reveal_bottom_margin_px < 0 {
            return Err(Error::Config(format!(
                "reveal_bottom_margin_px must not be negative, got {}",
                self.reveal_bottom_margin_px
            )));
        }
        if !self.parallax_content_factor.is_finite() || !self.parallax_particle_factor.is_finite()
        {
            return Err(Error::Config("parallax factors must be finite".into()));
        }
        Ok(())
    }
}
