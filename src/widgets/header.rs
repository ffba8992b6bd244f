use super::*;

/// Toggles `scrolled` on the page header from the scroll offset.
#[derive(Debug, Clone)]
pub(crate) struct HeaderScroll {
    header: NodeId,
    threshold: i64,
}

impl HeaderScroll {
    pub(crate) fn new(header: NodeId, threshold: i64) -> Self {
        Self { header, threshold }
    }

    pub(crate) fn is_scrolled(&self, scroll_y: i64) -> bool {
        scroll_y > self.threshold
    }

    pub(crate) fn on_scroll(&self, dom: &mut Dom, scroll_y: i64) -> Result<()> {
        dom.class_set(self.header, "scrolled", self.is_scrolled(scroll_y))
    }
}
