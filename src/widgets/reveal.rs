use super::*;
use crate::observer::IntersectionObserver;

const STATS_CONTAINER_CLASSES: [&str; 2] = ["hero-stats", "stats-container"];

/// Adds `animated` to sections and cards once they scroll into view, and
/// kicks off the counters when a stats block shows up.
#[derive(Debug)]
pub(crate) struct RevealController {
    observer: IntersectionObserver,
    revealed: HashSet<NodeId>,
    counters_started: bool,
    restart_counters: bool,
}

/// What the page has to do after an intersection update.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RevealOutcome {
    pub(crate) newly_revealed: Vec<NodeId>,
    pub(crate) start_counters: bool,
}

impl RevealController {
    pub(crate) fn new(config: &PageConfig, targets: &[NodeId]) -> Self {
        let mut observer =
            IntersectionObserver::new(config.reveal_threshold, config.reveal_bottom_margin_px);
        for target in targets {
            observer.observe(*target);
        }
        Self {
            observer,
            revealed: HashSet::new(),
            counters_started: false,
            restart_counters: config.restart_counters_on_repeat_reveal,
        }
    }

    pub(crate) fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub(crate) fn observed(&self) -> &[NodeId] {
        self.observer.targets()
    }

    pub(crate) fn on_viewport_change(
        &mut self,
        dom: &mut Dom,
        viewport: &Viewport,
    ) -> Result<RevealOutcome> {
        let mut outcome = RevealOutcome::default();
        for entry in self.observer.take_records(viewport) {
            if !entry.is_intersecting {
                continue;
            }
            dom.class_add(entry.target, "animated")?;
            if self.revealed.insert(entry.target) {
                outcome.newly_revealed.push(entry.target);
            }
            let is_stats = STATS_CONTAINER_CLASSES
                .iter()
                .any(|class| dom.class_contains(entry.target, class));
            if is_stats && (self.restart_counters || !self.counters_started) {
                self.counters_started = true;
                outcome.start_counters = true;
            }
        }
        Ok(outcome)
    }
}
