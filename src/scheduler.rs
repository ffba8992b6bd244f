use super::*;

pub type TimerId = i64;

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    CarouselAdvance,
    PressReset(NodeId),
    CounterFrame,
    SmoothScrollFrame,
}

impl TaskKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::CarouselAdvance => "carousel_advance",
            Self::PressReset(_) => "press_reset",
            Self::CounterFrame => "counter_frame",
            Self::SmoothScrollFrame => "smooth_scroll_frame",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: TimerId,
    pub(crate) due_at: i64,
    order: i64,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) kind: TaskKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
    pub interval_ms: Option<i64>,
    pub kind: TaskKind,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    next_timer_id: TimerId,
    next_task_order: i64,
    running_timer_id: Option<TimerId>,
    running_timer_canceled: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
            running_timer_id: None,
            running_timer_canceled: false,
        }
    }
}

impl SchedulerState {
    fn allocate_timer_id(&mut self) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    pub(crate) fn schedule_timeout(&mut self, kind: TaskKind, delay_ms: i64) -> TimerId {
        self.push_task(kind, delay_ms.max(0), None)
    }

    pub(crate) fn schedule_interval(&mut self, kind: TaskKind, interval_ms: i64) -> TimerId {
        let interval_ms = interval_ms.max(0);
        self.push_task(kind, interval_ms, Some(interval_ms))
    }

    fn push_task(&mut self, kind: TaskKind, delay_ms: i64, interval_ms: Option<i64>) -> TimerId {
        let id = self.allocate_timer_id();
        let order = self.allocate_task_order();
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms),
            order,
            interval_ms,
            kind,
        });
        id
    }

    /// Returns whether the id referred to a queued or currently running task.
    pub(crate) fn clear(&mut self, id: TimerId) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        let removed = before != self.task_queue.len();
        if self.running_timer_id == Some(id) {
            self.running_timer_canceled = true;
            return true;
        }
        removed
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
                kind: task.kind,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.task_queue.len()
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    /// Removes the task and marks it running; the clock moves forward to its
    /// due time when `advance_clock` is set.
    pub(crate) fn begin_task(&mut self, idx: usize, advance_clock: bool) -> ScheduledTask {
        let task = self.task_queue.remove(idx);
        if advance_clock && task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        self.running_timer_id = Some(task.id);
        self.running_timer_canceled = false;
        task
    }

    /// Requeues an interval unless it was cancelled while running. Returns
    /// the new due time when requeued.
    pub(crate) fn finish_task(&mut self, task: ScheduledTask) -> Option<i64> {
        let canceled = self.running_timer_canceled;
        self.running_timer_id = None;
        self.running_timer_canceled = false;

        let interval_ms = task.interval_ms?;
        if canceled {
            return None;
        }
        let due_at = task.due_at.saturating_add(interval_ms);
        let order = self.allocate_task_order();
        self.task_queue.push(ScheduledTask {
            due_at,
            order,
            ..task
        });
        Some(due_at)
    }

    pub(crate) fn describe_next(&self, due_limit: Option<i64>) -> String {
        self.next_task_index(due_limit)
            .and_then(|idx| self.task_queue.get(idx))
            .map(|task| {
                let interval_desc = task
                    .interval_ms
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "none".into());
                format!(
                    "id={},kind={},due_at={},order={},interval_ms={}",
                    task.id,
                    task.kind.label(),
                    task.due_at,
                    task.order,
                    interval_desc
                )
            })
            .unwrap_or_else(|| "none".into())
    }
}
