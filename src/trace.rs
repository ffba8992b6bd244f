use super::*;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    logs: VecDeque<String>,
    log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

impl TraceState {
    pub(crate) fn event_line(&mut self, line: impl FnOnce() -> String) {
        if self.enabled && self.events {
            self.push(line());
        }
    }

    pub(crate) fn timer_line(&mut self, line: impl FnOnce() -> String) {
        if self.enabled && self.timers {
            self.push(line());
        }
    }

    pub(crate) fn line(&mut self, line: impl FnOnce() -> String) {
        if self.enabled {
            self.push(line());
        }
    }

    fn push(&mut self, line: String) {
        tracing::debug!(target: "estate_page", "{line}");
        if self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_and_limit_are_respected() -> Result<()> {
        let mut trace = TraceState::default();
        trace.line(|| "dropped while disabled".into());
        assert!(trace.take().is_empty());

        trace.enabled = true;
        trace.timers = false;
        trace.timer_line(|| "[timer] hidden".into());
        trace.event_line(|| "[event] a".into());
        trace.event_line(|| "[event] b".into());
        trace.event_line(|| "[event] c".into());
        trace.set_log_limit(2)?;
        assert_eq!(trace.take(), vec!["[event] b", "[event] c"]);
        assert!(trace.set_log_limit(0).is_err());
        Ok(())
    }
}
