use super::*;

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: i64,
    to: i64,
    started_at: i64,
    frame_task: TimerId,
}

/// Animated in-page scrolling for `#fragment` links. At most one animation
/// runs at a time.
#[derive(Debug)]
pub(crate) struct SmoothScroll {
    animation: Option<ScrollAnimation>,
    duration_ms: i64,
    frame_interval_ms: i64,
}

impl SmoothScroll {
    pub(crate) fn new(duration_ms: i64, frame_interval_ms: i64) -> Self {
        Self {
            animation: None,
            duration_ms,
            frame_interval_ms,
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub(crate) fn destination(&self) -> Option<i64> {
        self.animation.map(|animation| animation.to)
    }

    /// Begins a scroll from `from` to `to`, replacing any animation in flight.
    pub(crate) fn start(&mut self, scheduler: &mut SchedulerState, from: i64, to: i64) {
        self.cancel(scheduler);
        if from == to {
            return;
        }
        let frame_task =
            scheduler.schedule_timeout(TaskKind::SmoothScrollFrame, self.frame_interval_ms);
        self.animation = Some(ScrollAnimation {
            from,
            to,
            started_at: scheduler.now_ms,
            frame_task,
        });
    }

    pub(crate) fn cancel(&mut self, scheduler: &mut SchedulerState) {
        if let Some(animation) = self.animation.take() {
            scheduler.clear(animation.frame_task);
        }
    }

    /// Offset for the current frame, or `None` when nothing is animating.
    /// Schedules the following frame until the destination is reached.
    pub(crate) fn on_frame(&mut self, scheduler: &mut SchedulerState) -> Option<i64> {
        let animation = self.animation.as_mut()?;
        let elapsed = scheduler.now_ms - animation.started_at;
        let progress = (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0);
        if progress >= 1.0 {
            let to = animation.to;
            self.animation = None;
            return Some(to);
        }

        let distance = (animation.to - animation.from) as f64;
        let offset = animation.from + (distance * ease_in_out_cubic(progress)).round() as i64;
        animation.frame_task =
            scheduler.schedule_timeout(TaskKind::SmoothScrollFrame, self.frame_interval_ms);
        Some(offset)
    }
}

/// Resolves the target of an in-page link. `#` alone and fragments that are
/// not valid selectors resolve to nothing.
pub(crate) fn resolve_fragment(dom: &Dom, href: &str) -> Option<NodeId> {
    if !href.starts_with('#') || href == "#" {
        return None;
    }
    dom.query_selector(href).ok().flatten()
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(smooth: &mut SmoothScroll, scheduler: &mut SchedulerState) -> Vec<i64> {
        let mut offsets = Vec::new();
        while let Some(idx) = scheduler.next_task_index(None) {
            let task = scheduler.begin_task(idx, true);
            offsets.extend(smooth.on_frame(scheduler));
            scheduler.finish_task(task);
        }
        offsets
    }

    #[test]
    fn eases_monotonically_and_lands_on_destination() {
        let mut scheduler = SchedulerState::default();
        let mut smooth = SmoothScroll::new(300, 16);
        smooth.start(&mut scheduler, 0, 1_200);
        assert_eq!(smooth.destination(), Some(1_200));

        let offsets = run_frames(&mut smooth, &mut scheduler);
        assert_eq!(offsets.last(), Some(&1_200));
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(offsets.len() > 10);
        assert!(!smooth.is_animating());
        assert!(scheduler.now_ms >= 300 && scheduler.now_ms < 320);
    }

    #[test]
    fn restart_cancels_the_previous_animation() {
        let mut scheduler = SchedulerState::default();
        let mut smooth = SmoothScroll::new(300, 16);
        smooth.start(&mut scheduler, 0, 500);
        smooth.start(&mut scheduler, 0, 900);
        assert_eq!(scheduler.queue_len(), 1);
        assert_eq!(run_frames(&mut smooth, &mut scheduler).last(), Some(&900));

        smooth.start(&mut scheduler, 40, 40);
        assert!(!smooth.is_animating());
        assert_eq!(scheduler.queue_len(), 0);
    }

    #[test]
    fn fragment_resolution() -> Result<()> {
        let dom = html::parse_html(r#"<section id="contact"></section>"#)?;
        assert!(resolve_fragment(&dom, "#contact").is_some());
        assert_eq!(resolve_fragment(&dom, "#"), None);
        assert_eq!(resolve_fragment(&dom, "#missing"), None);
        assert_eq!(resolve_fragment(&dom, "#1bad["), None);
        assert_eq!(resolve_fragment(&dom, "/about"), None);
        Ok(())
    }

    #[test]
    fn curve_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }
}
