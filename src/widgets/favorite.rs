use super::*;

pub(crate) const FAVORITE_COLOR: &str = "#E64C2E";

/// Heart buttons on property cards. Each button's state is seeded from its
/// icon: an icon without `far` counts as favorited.
#[derive(Debug, Default, Clone)]
pub(crate) struct FavoriteButtons {
    states: HashMap<NodeId, bool>,
}

impl FavoriteButtons {
    pub(crate) fn install(&mut self, dom: &Dom, buttons: &[NodeId]) -> Result<()> {
        for button in buttons {
            let favorited = match dom.query_selector_from(*button, "i")? {
                Some(icon) => !dom.class_contains(icon, "far"),
                None => false,
            };
            self.states.insert(*button, favorited);
        }
        Ok(())
    }

    pub(crate) fn is_favorited(&self, button: NodeId) -> Option<bool> {
        self.states.get(&button).copied()
    }

    /// Flips the button's state and restyles its icon. Returns the new state.
    pub(crate) fn toggle(&mut self, dom: &mut Dom, button: NodeId) -> Result<bool> {
        let state = self.states.entry(button).or_default();
        *state = !*state;
        let favorited = *state;

        let Some(icon) = dom.query_selector_from(button, "i")? else {
            return Ok(favorited);
        };
        dom.class_set(icon, "far", !favorited)?;
        dom.class_set(icon, "fas", favorited)?;
        dom.style_set(icon, "color", if favorited { FAVORITE_COLOR } else { "" })?;
        Ok(favorited)
    }
}
