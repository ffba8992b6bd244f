use super::*;

/// Vertical placement of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBox {
    pub top: i64,
    pub height: i64,
}

impl LayoutBox {
    pub fn new(top: i64, height: i64) -> Self {
        Self {
            top,
            height: height.max(0),
        }
    }

    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Debug)]
pub(crate) struct Viewport {
    pub(crate) scroll_y: i64,
    pub(crate) height: i64,
    /// Without an explicit document height, scrolling is only bounded at 0.
    pub(crate) document_height: Option<i64>,
    boxes: HashMap<NodeId, LayoutBox>,
}

impl Viewport {
    pub(crate) fn new(height: i64) -> Self {
        Self {
            scroll_y: 0,
            height,
            document_height: None,
            boxes: HashMap::new(),
        }
    }

    pub(crate) fn layout_of(&self, node: NodeId) -> Option<LayoutBox> {
        self.boxes.get(&node).copied()
    }

    pub(crate) fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        self.boxes.insert(node, layout);
    }

    pub(crate) fn document_height(&self) -> Option<i64> {
        let declared = self.document_height?;
        let content = self.boxes.values().map(LayoutBox::bottom).max().unwrap_or(0);
        Some(declared.max(content).max(self.height))
    }

    pub(crate) fn max_scroll(&self) -> i64 {
        self.document_height()
            .map(|height| (height - self.height).max(0))
            .unwrap_or(i64::MAX)
    }

    pub(crate) fn clamp_scroll(&self, y: i64) -> i64 {
        y.clamp(0, self.max_scroll())
    }

    /// Visible fraction of the node inside the viewport after shrinking its
    /// bottom edge by `bottom_margin`. `None` when the node has no layout.
    pub(crate) fn intersection_ratio(&self, node: NodeId, bottom_margin: i64) -> Option<f64> {
        let layout = self.layout_of(node)?;
        let root_top = self.scroll_y;
        let root_bottom = self.scroll_y + (self.height - bottom_margin).max(0);

        if layout.height == 0 {
            let inside = layout.top >= root_top && layout.top <= root_bottom;
            return Some(if inside { 1.0 } else { 0.0 });
        }

        let overlap = layout.bottom().min(root_bottom) - layout.top.max(root_top);
        if overlap <= 0 {
            return Some(0.0);
        }
        Some(overlap as f64 / layout.height as f64)
    }
}
