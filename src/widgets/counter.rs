use super::*;

/// One rendered step of a counter animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    /// 1-based step number.
    pub frame: u32,
    pub value: i64,
    pub last: bool,
}

/// Linear ramp from 0 to `target` in fixed increments of `target / steps`.
///
/// Every frame but the last renders the floor of the running value; the last
/// one renders `target` exactly. Targets at or below zero finish on the first
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRamp {
    current: f64,
    target: i64,
    step: f64,
    frames: u32,
    finished: bool,
}

impl CounterRamp {
    pub fn new(target: i64, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            current: 0.0,
            target,
            step: target as f64 / f64::from(steps),
            frames: 0,
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterRamp {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        if self.finished {
            return None;
        }
        self.current += self.step;
        self.frames += 1;
        if self.current < self.target as f64 {
            return Some(CounterFrame {
                frame: self.frames,
                value: self.current.floor() as i64,
                last: false,
            });
        }
        self.finished = true;
        Some(CounterFrame {
            frame: self.frames,
            value: self.target,
            last: true,
        })
    }
}

/// Leading integer of `raw` the way `parseInt(raw, 10)` reads it: optional
/// leading whitespace, an optional sign, then decimal digits up to the first
/// non-digit. `None` when no digit follows or the value overflows `i64`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone)]
struct CounterRun {
    node: NodeId,
    ramp: CounterRamp,
}

/// Drives every live counter ramp off a single animation-frame task.
#[derive(Debug)]
pub(crate) struct CounterAnimator {
    counters: Vec<NodeId>,
    runs: Vec<CounterRun>,
    frame_task: Option<TimerId>,
    steps: u32,
    frame_interval_ms: i64,
}

impl CounterAnimator {
    pub(crate) fn new(steps: u32, frame_interval_ms: i64) -> Self {
        Self {
            counters: Vec::new(),
            runs: Vec::new(),
            frame_task: None,
            steps,
            frame_interval_ms,
        }
    }

    /// Registers the counter elements and shows `0` in each of them.
    pub(crate) fn install(&mut self, dom: &mut Dom, counters: Vec<NodeId>) -> Result<()> {
        for node in &counters {
            dom.set_text_content(*node, "0")?;
        }
        self.counters = counters;
        Ok(())
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.runs.is_empty()
    }

    /// Starts (or restarts) the ramp of every registered counter. The first
    /// frame renders immediately.
    pub(crate) fn start_all(
        &mut self,
        dom: &mut Dom,
        scheduler: &mut SchedulerState,
        trace: &mut TraceState,
    ) -> Result<()> {
        for node in self.counters.clone() {
            let raw = dom.attr(node, "data-count").unwrap_or_default();
            let Some(target) = parse_leading_int(&raw) else {
                trace.line(|| {
                    format!(
                        "[counter] skip {} data-count={raw:?}",
                        dom.label(node)
                    )
                });
                continue;
            };

            let mut ramp = CounterRamp::new(target, self.steps);
            self.runs.retain(|run| run.node != node);
            if let Some(frame) = ramp.next() {
                dom.set_text_content(node, &frame.value.to_string())?;
            }
            trace.line(|| format!("[counter] start {} target={target}", dom.label(node)));
            if !ramp.is_finished() {
                self.runs.push(CounterRun { node, ramp });
            }
        }
        self.ensure_frame_task(scheduler);
        Ok(())
    }

    /// Renders one frame for every live ramp and schedules the next frame
    /// while any ramp is still running.
    pub(crate) fn on_frame(&mut self, dom: &mut Dom, scheduler: &mut SchedulerState) -> Result<()> {
        self.frame_task = None;
        for run in &mut self.runs {
            if let Some(frame) = run.ramp.next() {
                dom.set_text_content(run.node, &frame.value.to_string())?;
            }
        }
        self.runs.retain(|run| !run.ramp.is_finished());
        self.ensure_frame_task(scheduler);
        Ok(())
    }

    fn ensure_frame_task(&mut self, scheduler: &mut SchedulerState) {
        if self.runs.is_empty() || self.frame_task.is_some() {
            return;
        }
        self.frame_task =
            Some(scheduler.schedule_timeout(TaskKind::CounterFrame, self.frame_interval_ms));
    }
}
