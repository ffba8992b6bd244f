use super::*;

pub(crate) const OPEN_GLYPH: &str = r#"<i class="fas fa-times"></i>"#;
pub(crate) const CLOSED_GLYPH: &str = r#"<i class="fas fa-bars"></i>"#;
const OPEN_ICON_CLASS: &str = "fas fa-times";
const CLOSED_ICON_CLASS: &str = "fas fa-bars";

/// Mobile navigation panel driven by the hamburger button.
#[derive(Debug, Clone)]
pub(crate) struct NavMenu {
    button: NodeId,
    panel: NodeId,
    open: bool,
}

impl NavMenu {
    /// Picks up the initial state from the panel's markup.
    pub(crate) fn new(dom: &Dom, button: NodeId, panel: NodeId) -> Self {
        Self {
            button,
            panel,
            open: dom.class_contains(panel, "active"),
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn toggle(&mut self, dom: &mut Dom) -> Result<()> {
        self.open = !self.open;
        self.project(dom)
    }

    pub(crate) fn close(&mut self, dom: &mut Dom) -> Result<()> {
        self.open = false;
        self.project(dom)
    }

    fn project(&self, dom: &mut Dom) -> Result<()> {
        dom.class_set(self.panel, "active", self.open)?;
        let (glyph, icon_class) = if self.open {
            (OPEN_GLYPH, OPEN_ICON_CLASS)
        } else {
            (CLOSED_GLYPH, CLOSED_ICON_CLASS)
        };
        // The arena never frees nodes, so a lone icon is rewritten in place.
        match self.lone_icon(dom) {
            Some(icon) => dom.replace_attrs(icon, &[("class", icon_class)]),
            None => dom.set_inner_html(self.button, glyph),
        }
    }

    fn lone_icon(&self, dom: &Dom) -> Option<NodeId> {
        let [child] = dom.nodes[self.button.0].children.as_slice() else {
            return None;
        };
        let empty = dom.nodes[child.0].children.is_empty();
        (dom.tag_name(*child) == Some("i") && empty).then_some(*child)
    }
}
