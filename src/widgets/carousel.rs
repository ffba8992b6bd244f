use super::*;

/// Which testimonial is showing. A value type: transitions return the next
/// state and the widget projects it onto the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarouselState {
    len: usize,
    active: usize,
}

impl CarouselState {
    /// `None` for an empty carousel.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, active: 0 })
    }

    pub fn panel_count(self) -> usize {
        self.len
    }

    pub fn active_index(self) -> usize {
        self.active
    }

    /// `None` when `index` is past the last panel.
    pub fn show(self, index: usize) -> Option<Self> {
        (index < self.len).then_some(Self {
            active: index,
            ..self
        })
    }

    pub fn next(self) -> Self {
        Self {
            active: (self.active + 1) % self.len,
            ..self
        }
    }

    pub fn prev(self) -> Self {
        Self {
            active: (self.active + self.len - 1) % self.len,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Carousel {
    panels: Vec<NodeId>,
    dots: Vec<NodeId>,
    state: CarouselState,
    timer: Option<TimerId>,
    period_ms: i64,
}

impl Carousel {
    pub(crate) fn new(panels: Vec<NodeId>, dots: Vec<NodeId>, period_ms: i64) -> Option<Self> {
        let state = CarouselState::new(panels.len())?;
        Some(Self {
            panels,
            dots,
            state,
            timer: None,
            period_ms,
        })
    }

    pub(crate) fn state(&self) -> CarouselState {
        self.state
    }

    pub(crate) fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Returns `false` and leaves the markup alone for an out-of-range index.
    pub(crate) fn show(&mut self, dom: &mut Dom, index: usize) -> Result<bool> {
        let Some(state) = self.state.show(index) else {
            return Ok(false);
        };
        self.apply(dom, state)?;
        Ok(true)
    }

    pub(crate) fn advance(&mut self, dom: &mut Dom) -> Result<()> {
        self.apply(dom, self.state.next())
    }

    pub(crate) fn retreat(&mut self, dom: &mut Dom) -> Result<()> {
        self.apply(dom, self.state.prev())
    }

    fn apply(&mut self, dom: &mut Dom, state: CarouselState) -> Result<()> {
        self.state = state;
        let active = state.active_index();
        for (idx, panel) in self.panels.iter().enumerate() {
            dom.class_set(*panel, "active", idx == active)?;
        }
        for (idx, dot) in self.dots.iter().enumerate() {
            dom.class_set(*dot, "active", idx == active)?;
        }
        Ok(())
    }

    /// Replaces any running auto-advance timer with a fresh one.
    pub(crate) fn restart_timer(&mut self, scheduler: &mut SchedulerState) -> TimerId {
        self.cancel_timer(scheduler);
        let id = scheduler.schedule_interval(TaskKind::CarouselAdvance, self.period_ms);
        self.timer = Some(id);
        id
    }

    pub(crate) fn cancel_timer(&mut self, scheduler: &mut SchedulerState) -> bool {
        self.timer
            .take()
            .is_some_and(|id| scheduler.clear(id))
    }
}
