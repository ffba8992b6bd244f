use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Threshold observer over the viewport. Delivers an entry the first time a
/// target is evaluated and afterwards only when its intersecting state flips.
#[derive(Debug)]
pub(crate) struct IntersectionObserver {
    threshold: f64,
    bottom_margin: i64,
    targets: Vec<NodeId>,
    last_state: HashMap<NodeId, bool>,
}

impl IntersectionObserver {
    pub(crate) fn new(threshold: f64, bottom_margin: i64) -> Self {
        Self {
            threshold,
            bottom_margin,
            targets: Vec::new(),
            last_state: HashMap::new(),
        }
    }

    pub(crate) fn observe(&mut self, target: NodeId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub(crate) fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub(crate) fn take_records(&mut self, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for target in &self.targets {
            let ratio = viewport
                .intersection_ratio(*target, self.bottom_margin)
                .unwrap_or(0.0);
            let is_intersecting = ratio > 0.0 && ratio >= self.threshold;
            let previous = self.last_state.insert(*target, is_intersecting);
            if previous != Some(is_intersecting) {
                entries.push(IntersectionEntry {
                    target: *target,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}
