use super::*;

/// Scroll-linked vertical offsets for the hero content and its particles.
#[derive(Debug, Clone)]
pub(crate) struct Parallax {
    content: NodeId,
    particles: Vec<NodeId>,
    content_factor: f64,
    particle_factor: f64,
}

impl Parallax {
    pub(crate) fn new(
        content: NodeId,
        particles: Vec<NodeId>,
        content_factor: f64,
        particle_factor: f64,
    ) -> Self {
        Self {
            content,
            particles,
            content_factor,
            particle_factor,
        }
    }

    pub(crate) fn content_offset(&self, scroll_y: i64) -> f64 {
        scroll_y as f64 * self.content_factor
    }

    /// Deeper particles (later in document order) move faster.
    pub(crate) fn particle_offset(&self, scroll_y: i64, index: usize) -> f64 {
        (scroll_y as f64 * self.particle_factor) * (index + 1) as f64
    }

    pub(crate) fn on_scroll(&self, dom: &mut Dom, scroll_y: i64) -> Result<()> {
        dom.style_set(
            self.content,
            "transform",
            &translate_y(self.content_offset(scroll_y)),
        )?;
        for (index, particle) in self.particles.iter().enumerate() {
            dom.style_set(
                *particle,
                "transform",
                &translate_y(self.particle_offset(scroll_y, index)),
            )?;
        }
        Ok(())
    }
}

fn translate_y(offset: f64) -> String {
    format!("translateY({}px)", format_px(offset))
}
