use super::*;

pub(crate) mod carousel;
pub(crate) mod counter;
pub(crate) mod favorite;
pub(crate) mod header;
pub(crate) mod micro;
pub(crate) mod nav_menu;
pub(crate) mod parallax;
pub(crate) mod reveal;
pub(crate) mod smooth_scroll;

use carousel::Carousel;
use counter::CounterAnimator;
use favorite::FavoriteButtons;
use header::HeaderScroll;
use micro::PressFeedback;
use nav_menu::NavMenu;
use parallax::Parallax;
use reveal::RevealController;
use smooth_scroll::SmoothScroll;

/// Sections observed for reveal; only the first match of each is used.
const REVEAL_SECTION_SELECTORS: [&str; 5] = [
    ".hero-stats",
    ".featured-properties",
    ".services",
    ".map-section",
    ".testimonials",
];

/// Every element the behaviors act on, looked up once when the page is ready.
#[derive(Debug, Default, Clone)]
pub(crate) struct ElementSet {
    pub(crate) header: Option<NodeId>,
    pub(crate) menu_button: Option<NodeId>,
    pub(crate) nav_panel: Option<NodeId>,
    pub(crate) nav_links: Vec<NodeId>,
    pub(crate) counters: Vec<NodeId>,
    pub(crate) reveal_targets: Vec<NodeId>,
    pub(crate) testimonials: Vec<NodeId>,
    pub(crate) dots: Vec<NodeId>,
    pub(crate) prev_button: Option<NodeId>,
    pub(crate) next_button: Option<NodeId>,
    pub(crate) slider: Option<NodeId>,
    pub(crate) favorite_buttons: Vec<NodeId>,
    pub(crate) anchors: Vec<NodeId>,
    pub(crate) property_cards: Vec<NodeId>,
    pub(crate) search_button: Option<NodeId>,
    pub(crate) location_badges: Vec<NodeId>,
    pub(crate) hero: Option<NodeId>,
    pub(crate) hero_content: Option<NodeId>,
    pub(crate) particles: Vec<NodeId>,
}

impl ElementSet {
    pub(crate) fn resolve(dom: &Dom) -> Result<Self> {
        let mut reveal_targets = Vec::new();
        for selector in REVEAL_SECTION_SELECTORS {
            if let Some(section) = dom.query_selector(selector)? {
                reveal_targets.push(section);
            }
        }
        let property_cards = dom.query_selector_all(".property-card")?;
        reveal_targets.extend(property_cards.iter().copied());

        Ok(Self {
            header: dom.query_selector("header")?,
            menu_button: dom.query_selector(".mobile-menu-btn")?,
            nav_panel: dom.query_selector(".nav-links")?,
            nav_links: dom.query_selector_all(".nav-links a")?,
            counters: dom.query_selector_all(".stat-number")?,
            reveal_targets,
            testimonials: dom.query_selector_all(".testimonial-card")?,
            dots: dom.query_selector_all(".dot")?,
            prev_button: dom.query_selector(".testimonial-prev")?,
            next_button: dom.query_selector(".testimonial-next")?,
            slider: dom.query_selector(".testimonial-slider")?,
            favorite_buttons: dom.query_selector_all(".favorite-btn")?,
            anchors: dom.query_selector_all("a[href^=\"#\"]")?,
            property_cards,
            search_button: dom.query_selector(".search-btn")?,
            location_badges: dom.query_selector_all(".location-badge")?,
            hero: dom.query_selector(".hero")?,
            hero_content: dom.query_selector(".hero-content")?,
            particles: dom.query_selector_all(".particle")?,
        })
    }
}

/// Live state of every installed behavior. `None` marks a widget that stayed
/// inert because its markup is missing.
#[derive(Debug)]
pub(crate) struct Widgets {
    pub(crate) header: Option<HeaderScroll>,
    pub(crate) nav: Option<NavMenu>,
    pub(crate) reveal: Option<RevealController>,
    pub(crate) counters: CounterAnimator,
    pub(crate) carousel: Option<Carousel>,
    pub(crate) favorites: FavoriteButtons,
    pub(crate) smooth_scroll: SmoothScroll,
    pub(crate) press: PressFeedback,
    pub(crate) parallax: Option<Parallax>,
}

impl Widgets {
    pub(crate) fn new(config: &PageConfig) -> Self {
        Self {
            header: None,
            nav: None,
            reveal: None,
            counters: CounterAnimator::new(config.counter_steps, config.frame_interval_ms),
            carousel: None,
            favorites: FavoriteButtons::default(),
            smooth_scroll: SmoothScroll::new(
                config.smooth_scroll_duration_ms,
                config.frame_interval_ms,
            ),
            press: PressFeedback::new(config.press_feedback_ms),
            parallax: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_first_section_of_each_kind_then_cards() -> Result<()> {
        let dom = html::parse_html(
            r##"
            <section class="services" id="s1"></section>
            <section class="services" id="s2"></section>
            <div class="hero-stats" id="stats"></div>
            <div class="property-card" id="c1"></div>
            <div class="property-card" id="c2"></div>
            <a href="#s1" id="jump">x</a>
            <a href="/contact" id="away">y</a>
            "##,
        )?;
        let elements = ElementSet::resolve(&dom)?;
        let ids = |nodes: &[NodeId]| {
            nodes
                .iter()
                .filter_map(|node| dom.attr(*node, "id"))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&elements.reveal_targets), vec!["stats", "s1", "c1", "c2"]);
        assert_eq!(ids(&elements.anchors), vec!["jump"]);
        assert!(elements.header.is_none());
        assert!(elements.testimonials.is_empty());
        Ok(())
    }
}
