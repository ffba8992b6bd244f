use super::*;

pub(crate) const PRESSED_TRANSFORM: &str = "scale(0.95)";
pub(crate) const VIEW_SHOWN_TRANSFORM: &str = "translateY(0)";

/// Brief shrink on click, reverted by a timer.
#[derive(Debug)]
pub(crate) struct PressFeedback {
    pending: HashMap<NodeId, TimerId>,
    duration_ms: i64,
}

impl PressFeedback {
    pub(crate) fn new(duration_ms: i64) -> Self {
        Self {
            pending: HashMap::new(),
            duration_ms,
        }
    }

    /// A press while the previous one is still showing restarts the revert
    /// timer.
    pub(crate) fn press(
        &mut self,
        dom: &mut Dom,
        scheduler: &mut SchedulerState,
        node: NodeId,
    ) -> Result<()> {
        dom.style_set(node, "transform", PRESSED_TRANSFORM)?;
        if let Some(previous) = self.pending.remove(&node) {
            scheduler.clear(previous);
        }
        let id = scheduler.schedule_timeout(TaskKind::PressReset(node), self.duration_ms);
        self.pending.insert(node, id);
        Ok(())
    }

    pub(crate) fn release(&mut self, dom: &mut Dom, node: NodeId) -> Result<()> {
        self.pending.remove(&node);
        dom.style_set(node, "transform", "")
    }

    pub(crate) fn is_pressed(&self, node: NodeId) -> bool {
        self.pending.contains_key(&node)
    }
}

/// The card's view button, when the card has both the overlay and the button.
pub(crate) fn view_button(dom: &Dom, card: NodeId) -> Result<Option<NodeId>> {
    if dom.query_selector_from(card, ".property-overlay")?.is_none() {
        return Ok(None);
    }
    dom.query_selector_from(card, ".view-property")
}

pub(crate) fn show_view_button(dom: &mut Dom, card: NodeId) -> Result<()> {
    if let Some(button) = view_button(dom, card)? {
        dom.style_set(button, "transform", VIEW_SHOWN_TRANSFORM)?;
    }
    Ok(())
}

pub(crate) fn hide_view_button(dom: &mut Dom, card: NodeId) -> Result<()> {
    if let Some(button) = view_button(dom, card)? {
        dom.style_set(button, "transform", "")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_press_restarts_the_revert_timer() -> Result<()> {
        let mut dom = html::parse_html(r#"<button class="search-btn">Go</button>"#)?;
        let button = dom
            .query_selector(".search-btn")?
            .ok_or_else(|| Error::SelectorNotFound(".search-btn".into()))?;
        let mut scheduler = SchedulerState::default();
        let mut press = PressFeedback::new(200);

        press.press(&mut dom, &mut scheduler, button)?;
        scheduler.now_ms = 150;
        press.press(&mut dom, &mut scheduler, button)?;
        let pending = scheduler.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].due_at, 350);
        assert_eq!(dom.style_get(button, "transform")?, PRESSED_TRANSFORM);
        assert!(press.is_pressed(button));

        press.release(&mut dom, button)?;
        assert_eq!(dom.attr(button, "style"), None);
        assert!(!press.is_pressed(button));
        Ok(())
    }

    #[test]
    fn hover_needs_both_overlay_and_button() -> Result<()> {
        let mut dom = html::parse_html(
            r#"<div class="property-card" id="full">
                 <div class="property-overlay"><a class="view-property">View</a></div>
               </div>
               <div class="property-card" id="bare"><a class="view-property">View</a></div>"#,
        )?;
        let cards = dom.query_selector_all(".property-card")?;
        let buttons = dom.query_selector_all(".view-property")?;

        show_view_button(&mut dom, cards[0])?;
        show_view_button(&mut dom, cards[1])?;
        assert_eq!(dom.style_get(buttons[0], "transform")?, VIEW_SHOWN_TRANSFORM);
        assert_eq!(dom.style_get(buttons[1], "transform")?, "");

        hide_view_button(&mut dom, cards[0])?;
        assert_eq!(dom.style_get(buttons[0], "transform")?, "");
        Ok(())
    }
}
