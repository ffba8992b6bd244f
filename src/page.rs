use super::*;
use crate::widgets::carousel::Carousel;
use crate::widgets::header::HeaderScroll;
use crate::widgets::nav_menu::NavMenu;
use crate::widgets::parallax::Parallax;
use crate::widgets::reveal::RevealController;
use crate::widgets::{ElementSet, Widgets, micro, smooth_scroll};

const DOM_SNIPPET_CHARS: usize = 200;

/// A link the page would have followed because nothing prevented the click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
}

/// A loaded landing page with every behavior wired up.
///
/// `Page` owns the document, the fake clock and the viewport. Tests and hosts
/// drive it with signals (`scroll_to`, `click`, `pointer_enter`, ...) and time
/// (`advance_time`, `flush`), then inspect the resulting markup.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    config: PageConfig,
    viewport: Viewport,
    scheduler: SchedulerState,
    subscriptions: SubscriptionRegistry,
    widgets: Widgets,
    navigations: Vec<Navigation>,
    /// Elements under the pointer, outermost first.
    hovered: Vec<NodeId>,
    trace: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, PageConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: PageConfig) -> Result<Self> {
        config.validate()?;
        let dom = html::parse_html(html)?;
        let mut scheduler = SchedulerState::default();
        scheduler.timer_step_limit = config.timer_step_limit;

        let mut page = Self {
            dom,
            viewport: Viewport::new(config.viewport_height),
            scheduler,
            subscriptions: SubscriptionRegistry::default(),
            widgets: Widgets::new(&config),
            navigations: Vec::new(),
            hovered: Vec::new(),
            trace: TraceState::default(),
            config,
        };
        page.boot()?;
        Ok(page)
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    fn boot(&mut self) -> Result<()> {
        let elements = ElementSet::resolve(&self.dom)?;
        self.install("header", |page| page.install_header(&elements));
        self.install("nav_menu", |page| page.install_nav_menu(&elements));
        self.install("reveal", |page| page.install_reveal(&elements));
        self.install("carousel", |page| page.install_carousel(&elements));
        self.install("favorites", |page| page.install_favorites(&elements));
        self.install("smooth_scroll", |page| page.install_smooth_scroll(&elements));
        self.install("card_hover", |page| page.install_card_hover(&elements));
        self.install("press_feedback", |page| page.install_press_feedback(&elements));
        self.install("parallax", |page| page.install_parallax(&elements));
        self.update_intersections()
    }

    /// A failing widget is left out; the others still install.
    fn install(&mut self, widget: &str, install: impl FnOnce(&mut Self) -> Result<()>) {
        if let Err(err) = install(self) {
            tracing::warn!(target: "estate_page", widget, error = %err, "widget install failed");
            self.trace
                .line(|| format!("[boot] install failed widget={widget} error={err}"));
        }
    }

    fn install_header(&mut self, elements: &ElementSet) -> Result<()> {
        let Some(header) = elements.header else {
            return Ok(());
        };
        self.widgets.header = Some(HeaderScroll::new(header, self.config.scroll_threshold_px));
        self.subscriptions
            .add(SignalKind::Scroll, None, Handler::HeaderScroll);
        Ok(())
    }

    fn install_nav_menu(&mut self, elements: &ElementSet) -> Result<()> {
        let (Some(button), Some(panel)) = (elements.menu_button, elements.nav_panel) else {
            return Ok(());
        };
        self.widgets.nav = Some(NavMenu::new(&self.dom, button, panel));
        self.subscriptions
            .add(SignalKind::Click, Some(button), Handler::MenuToggle);
        for link in &elements.nav_links {
            self.subscriptions
                .add(SignalKind::Click, Some(*link), Handler::MenuLinkClose);
        }
        Ok(())
    }

    fn install_reveal(&mut self, elements: &ElementSet) -> Result<()> {
        self.widgets
            .counters
            .install(&mut self.dom, elements.counters.clone())?;
        self.widgets.reveal = Some(RevealController::new(
            &self.config,
            &elements.reveal_targets,
        ));
        Ok(())
    }

    fn install_carousel(&mut self, elements: &ElementSet) -> Result<()> {
        let Some(mut carousel) = Carousel::new(
            elements.testimonials.clone(),
            elements.dots.clone(),
            self.config.carousel_period_ms,
        ) else {
            return Ok(());
        };
        carousel.show(&mut self.dom, 0)?;
        let timer = carousel.restart_timer(&mut self.scheduler);
        self.widgets.carousel = Some(carousel);
        self.trace_scheduled(timer);

        if let Some(next) = elements.next_button {
            self.subscriptions
                .add(SignalKind::Click, Some(next), Handler::CarouselNext);
        }
        if let Some(prev) = elements.prev_button {
            self.subscriptions
                .add(SignalKind::Click, Some(prev), Handler::CarouselPrev);
        }
        for (index, dot) in elements.dots.iter().enumerate() {
            self.subscriptions
                .add(SignalKind::Click, Some(*dot), Handler::CarouselDot(index));
        }
        if let Some(slider) = elements.slider {
            self.subscriptions
                .add(SignalKind::PointerEnter, Some(slider), Handler::CarouselPause);
            self.subscriptions
                .add(SignalKind::PointerLeave, Some(slider), Handler::CarouselResume);
        }
        Ok(())
    }

    fn install_favorites(&mut self, elements: &ElementSet) -> Result<()> {
        self.widgets
            .favorites
            .install(&self.dom, &elements.favorite_buttons)?;
        for button in &elements.favorite_buttons {
            self.subscriptions
                .add(SignalKind::Click, Some(*button), Handler::FavoriteToggle);
        }
        Ok(())
    }

    fn install_smooth_scroll(&mut self, elements: &ElementSet) -> Result<()> {
        for anchor in &elements.anchors {
            self.subscriptions
                .add(SignalKind::Click, Some(*anchor), Handler::SmoothScroll);
        }
        Ok(())
    }

    fn install_card_hover(&mut self, elements: &ElementSet) -> Result<()> {
        for card in &elements.property_cards {
            if micro::view_button(&self.dom, *card)?.is_none() {
                continue;
            }
            self.subscriptions
                .add(SignalKind::PointerEnter, Some(*card), Handler::CardHoverReveal);
            if self.config.hide_view_on_leave {
                self.subscriptions
                    .add(SignalKind::PointerLeave, Some(*card), Handler::CardHoverHide);
            }
        }
        Ok(())
    }

    fn install_press_feedback(&mut self, elements: &ElementSet) -> Result<()> {
        if let Some(search) = elements.search_button {
            self.subscriptions.add(
                SignalKind::Click,
                Some(search),
                Handler::PressFeedback {
                    prevent_default: true,
                },
            );
        }
        for badge in &elements.location_badges {
            self.subscriptions.add(
                SignalKind::Click,
                Some(*badge),
                Handler::PressFeedback {
                    prevent_default: false,
                },
            );
        }
        Ok(())
    }

    fn install_parallax(&mut self, elements: &ElementSet) -> Result<()> {
        let (Some(_), Some(content)) = (elements.hero, elements.hero_content) else {
            return Ok(());
        };
        self.widgets.parallax = Some(Parallax::new(
            content,
            elements.particles.clone(),
            self.config.parallax_content_factor,
            self.config.parallax_particle_factor,
        ));
        self.subscriptions
            .add(SignalKind::Scroll, None, Handler::Parallax);
        Ok(())
    }

    fn dispatch(&mut self, signal: SignalKind, target: Option<NodeId>) -> Result<EventState> {
        let mut event = EventState::new(signal, target);
        let path = match target {
            Some(node) if signal.bubbles() => self
                .dom
                .ancestors_inclusive(node)
                .into_iter()
                .map(Some)
                .collect::<Vec<_>>(),
            other => vec![other],
        };

        let mut handled = 0usize;
        for current in path {
            event.current_target = current;
            for handler in self.subscriptions.handlers_for(signal, current) {
                handled += 1;
                self.run_handler(handler, &mut event)?;
            }
        }

        self.trace.event_line(|| {
            let target = event
                .target
                .map(|node| self.dom.label(node))
                .unwrap_or_else(|| "window".into());
            format!(
                "[event] {} target={} handlers={} default_prevented={}",
                event.signal.name(),
                target,
                handled,
                event.default_prevented
            )
        });
        Ok(event)
    }

    fn run_handler(&mut self, handler: Handler, event: &mut EventState) -> Result<()> {
        let current = event.current_target;
        match handler {
            Handler::HeaderScroll => {
                if let Some(header) = &self.widgets.header {
                    header.on_scroll(&mut self.dom, self.viewport.scroll_y)?;
                }
            }
            Handler::Parallax => {
                if let Some(parallax) = &self.widgets.parallax {
                    parallax.on_scroll(&mut self.dom, self.viewport.scroll_y)?;
                }
            }
            Handler::MenuToggle => {
                if let Some(nav) = self.widgets.nav.as_mut() {
                    nav.toggle(&mut self.dom)?;
                }
            }
            Handler::MenuLinkClose => {
                if let Some(nav) = self.widgets.nav.as_mut() {
                    nav.close(&mut self.dom)?;
                }
            }
            Handler::CarouselNext => {
                if let Some(carousel) = self.widgets.carousel.as_mut() {
                    carousel.advance(&mut self.dom)?;
                }
            }
            Handler::CarouselPrev => {
                if let Some(carousel) = self.widgets.carousel.as_mut() {
                    carousel.retreat(&mut self.dom)?;
                }
            }
            Handler::CarouselDot(index) => {
                let Some(carousel) = self.widgets.carousel.as_mut() else {
                    return Ok(());
                };
                if !carousel.show(&mut self.dom, index)? {
                    let panels = carousel.state().panel_count();
                    self.trace
                        .line(|| format!("[carousel] ignore dot index={index} panels={panels}"));
                }
            }
            Handler::CarouselPause => {
                let Some(carousel) = self.widgets.carousel.as_mut() else {
                    return Ok(());
                };
                let timer = carousel.timer();
                if carousel.cancel_timer(&mut self.scheduler) {
                    self.trace
                        .timer_line(|| format!("[timer] clear id={}", timer.unwrap_or_default()));
                }
            }
            Handler::CarouselResume => {
                let Some(carousel) = self.widgets.carousel.as_mut() else {
                    return Ok(());
                };
                let timer = carousel.restart_timer(&mut self.scheduler);
                self.trace_scheduled(timer);
            }
            Handler::FavoriteToggle => {
                event.prevent_default();
                if let Some(button) = current {
                    let favorited = self.widgets.favorites.toggle(&mut self.dom, button)?;
                    self.trace.event_line(|| {
                        format!(
                            "[favorite] {} favorited={favorited}",
                            self.dom.label(button)
                        )
                    });
                }
            }
            Handler::SmoothScroll => {
                event.prevent_default();
                if let Some(anchor) = current {
                    self.start_smooth_scroll(anchor);
                }
            }
            Handler::CardHoverReveal => {
                if let Some(card) = current {
                    micro::show_view_button(&mut self.dom, card)?;
                }
            }
            Handler::CardHoverHide => {
                if let Some(card) = current {
                    micro::hide_view_button(&mut self.dom, card)?;
                }
            }
            Handler::PressFeedback { prevent_default } => {
                if prevent_default {
                    event.prevent_default();
                }
                if let Some(node) = current {
                    self.widgets
                        .press
                        .press(&mut self.dom, &mut self.scheduler, node)?;
                }
            }
        }
        Ok(())
    }

    fn start_smooth_scroll(&mut self, anchor: NodeId) {
        let href = self.dom.attr(anchor, "href").unwrap_or_default();
        let Some(target) = smooth_scroll::resolve_fragment(&self.dom, &href) else {
            self.trace
                .line(|| format!("[scroll] no target href={href:?}"));
            return;
        };
        let Some(layout) = self.viewport.layout_of(target) else {
            self.trace
                .line(|| format!("[scroll] target has no layout href={href:?}"));
            return;
        };

        let from = self.viewport.scroll_y;
        let to = self.viewport.clamp_scroll(layout.top);
        self.widgets
            .smooth_scroll
            .start(&mut self.scheduler, from, to);
        self.trace
            .line(|| format!("[scroll] smooth href={href:?} from={from} to={to}"));
    }

    /// Moves the viewport and notifies scroll listeners. No notification when
    /// the clamped offset does not change.
    fn apply_scroll(&mut self, y: i64) -> Result<()> {
        let y = self.viewport.clamp_scroll(y);
        if y == self.viewport.scroll_y {
            return Ok(());
        }
        self.viewport.scroll_y = y;
        self.dispatch(SignalKind::Scroll, None)?;
        self.update_intersections()
    }

    fn update_intersections(&mut self) -> Result<()> {
        let Some(reveal) = self.widgets.reveal.as_mut() else {
            return Ok(());
        };
        let outcome = reveal.on_viewport_change(&mut self.dom, &self.viewport)?;
        for node in &outcome.newly_revealed {
            self.trace
                .event_line(|| format!("[reveal] {}", self.dom.label(*node)));
        }
        if outcome.start_counters {
            self.widgets
                .counters
                .start_all(&mut self.dom, &mut self.scheduler, &mut self.trace)?;
        }
        Ok(())
    }

    fn trace_scheduled(&mut self, id: TimerId) {
        let Some(timer) = self
            .scheduler
            .pending()
            .into_iter()
            .find(|timer| timer.id == id)
        else {
            return;
        };
        self.trace.timer_line(|| match timer.interval_ms {
            Some(interval_ms) => format!(
                "[timer] schedule interval id={} kind={} due_at={} interval_ms={}",
                timer.id,
                timer.kind.label(),
                timer.due_at,
                interval_ms
            ),
            None => format!(
                "[timer] schedule timeout id={} kind={} due_at={}",
                timer.id,
                timer.kind.label(),
                timer.due_at
            ),
        });
    }

    pub fn scroll_to(&mut self, y: i64) -> Result<()> {
        if self.widgets.smooth_scroll.is_animating() {
            self.widgets.smooth_scroll.cancel(&mut self.scheduler);
            self.trace.line(|| "[scroll] smooth scroll interrupted".into());
        }
        self.apply_scroll(y)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let event = self.dispatch(SignalKind::Click, Some(target))?;
        if !event.default_prevented {
            self.follow_link(target);
        }
        Ok(())
    }

    fn follow_link(&mut self, target: NodeId) {
        let href = self
            .dom
            .ancestors_inclusive(target)
            .into_iter()
            .filter(|node| self.dom.tag_name(*node) == Some("a"))
            .find_map(|node| self.dom.attr(node, "href"));
        let Some(href) = href else {
            return;
        };
        self.trace
            .event_line(|| format!("[event] navigate href={href:?}"));
        self.navigations.push(Navigation { href });
    }

    /// Moves the pointer onto the element. Elements the pointer no longer
    /// covers get a leave (innermost first), and each newly covered ancestor
    /// gets an enter (outermost first).
    pub fn pointer_enter(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let path = self.element_path(target);
        self.move_pointer(path)
    }

    /// Moves the pointer off the element onto its parent. An element that is
    /// not under the pointer still receives a single leave.
    pub fn pointer_leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        match self.hovered.iter().position(|node| *node == target) {
            Some(depth) => {
                let path = self.hovered[..depth].to_vec();
                self.move_pointer(path)
            }
            None => {
                self.dispatch(SignalKind::PointerLeave, Some(target))?;
                Ok(())
            }
        }
    }

    fn element_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = self
            .dom
            .ancestors_inclusive(node)
            .into_iter()
            .filter(|ancestor| self.dom.tag_name(*ancestor).is_some())
            .collect::<Vec<_>>();
        path.reverse();
        path
    }

    fn move_pointer(&mut self, path: Vec<NodeId>) -> Result<()> {
        let shared = self
            .hovered
            .iter()
            .zip(&path)
            .take_while(|(current, next)| current == next)
            .count();
        let left = self.hovered.split_off(shared);
        for node in left.into_iter().rev() {
            self.dispatch(SignalKind::PointerLeave, Some(node))?;
        }
        for node in path.into_iter().skip(shared) {
            self.hovered.push(node);
            self.dispatch(SignalKind::PointerEnter, Some(node))?;
        }
        Ok(())
    }

    pub fn set_viewport_height(&mut self, height: i64) -> Result<()> {
        if height <= 0 {
            return Err(Error::Config(format!(
                "viewport height must be positive, got {height}"
            )));
        }
        self.viewport.height = height;
        self.apply_scroll(self.viewport.scroll_y)?;
        self.update_intersections()
    }

    /// Bounds scrolling to `height - viewport_height`. `None` removes the
    /// bound (the default).
    pub fn set_document_height(&mut self, height: Option<i64>) -> Result<()> {
        if let Some(height) = height {
            if height < 0 {
                return Err(Error::Config(format!(
                    "document height must not be negative, got {height}"
                )));
            }
        }
        self.viewport.document_height = height;
        self.apply_scroll(self.viewport.scroll_y)
    }

    pub fn set_layout(&mut self, selector: &str, layout: LayoutBox) -> Result<()> {
        self.set_layout_at(selector, 0, layout)
    }

    /// Places the `index`-th match of `selector`.
    pub fn set_layout_at(&mut self, selector: &str, index: usize, layout: LayoutBox) -> Result<()> {
        let node = self
            .dom
            .query_selector_all(selector)?
            .get(index)
            .copied()
            .ok_or_else(|| Error::SelectorNotFound(format!("{selector} (index {index})")))?;
        self.viewport.set_layout(node, layout);
        self.update_intersections()
    }

    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        let to = from.saturating_add(delta_ms);
        let ran = self.run_until(to)?;
        self.trace.timer_line(|| {
            format!("[timer] advance delta_ms={delta_ms} from={from} to={to} ran_due={ran}")
        });
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.scheduler.now_ms;
        if target_ms < from {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={from})"
            )));
        }
        let ran = self.run_until(target_ms)?;
        self.trace.timer_line(|| {
            format!("[timer] advance_to from={from} to={target_ms} ran_due={ran}")
        });
        Ok(())
    }

    /// Runs every task due up to `target_ms`, moving the clock to each task's
    /// due time, then leaves the clock at `target_ms`.
    fn run_until(&mut self, target_ms: i64) -> Result<usize> {
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.scheduler.now_ms = target_ms;
        Ok(ran)
    }

    /// Runs the whole queue. With the carousel installed this never drains and
    /// ends in the step-limit error.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace.timer_line(|| {
            format!(
                "[timer] flush from={from} to={} ran={ran}",
                self.scheduler.now_ms
            )
        });
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(idx) = self.scheduler.next_task_index(None) else {
            self.trace.timer_line(|| "[timer] run_next none".into());
            return Ok(false);
        };
        self.execute_task(idx, true)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace.timer_line(|| {
            format!(
                "[timer] run_due now_ms={} ran={ran}",
                self.scheduler.now_ms
            )
        });
        Ok(ran)
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn clear_timer(&mut self, timer_id: TimerId) -> bool {
        let existed = self.scheduler.clear(timer_id);
        self.trace
            .timer_line(|| format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Config(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            self.execute_task(idx, advance_clock)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "timer queue exceeded max task steps (possible uncleared setInterval): limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={}",
            self.scheduler.timer_step_limit,
            self.scheduler.now_ms,
            self.scheduler.queue_len(),
            self.scheduler.describe_next(due_limit)
        ))
    }

    fn execute_task(&mut self, idx: usize, advance_clock: bool) -> Result<()> {
        let task = self.scheduler.begin_task(idx, advance_clock);
        let (id, kind) = (task.id, task.kind);
        self.trace.timer_line(|| {
            format!(
                "[timer] run id={id} kind={} now_ms={}",
                kind.label(),
                self.scheduler.now_ms
            )
        });

        let result = self.run_task(kind);
        if let Some(due_at) = self.scheduler.finish_task(task) {
            self.trace
                .timer_line(|| format!("[timer] requeue id={id} due_at={due_at}"));
        }
        result
    }

    fn run_task(&mut self, kind: TaskKind) -> Result<()> {
        match kind {
            TaskKind::CarouselAdvance => {
                if let Some(carousel) = self.widgets.carousel.as_mut() {
                    carousel.advance(&mut self.dom)?;
                }
            }
            TaskKind::PressReset(node) => self.widgets.press.release(&mut self.dom, node)?,
            TaskKind::CounterFrame => self
                .widgets
                .counters
                .on_frame(&mut self.dom, &mut self.scheduler)?,
            TaskKind::SmoothScrollFrame => {
                if let Some(offset) = self.widgets.smooth_scroll.on_frame(&mut self.scheduler) {
                    self.apply_scroll(offset)?;
                }
            }
        }
        Ok(())
    }

    pub fn scroll_y(&self) -> i64 {
        self.viewport.scroll_y
    }

    /// First element matching `selector`.
    pub fn node(&self, selector: &str) -> Result<NodeId> {
        self.select_one(selector)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    /// Inline style value; empty when the property is not set.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    /// `None` when the page has no testimonials.
    pub fn carousel_index(&self) -> Option<usize> {
        self.widgets
            .carousel
            .as_ref()
            .map(|carousel| carousel.state().active_index())
    }

    pub fn carousel_state(&self) -> Option<CarouselState> {
        self.widgets.carousel.as_ref().map(Carousel::state)
    }

    pub fn carousel_timer(&self) -> Option<TimerId> {
        self.widgets.carousel.as_ref().and_then(Carousel::timer)
    }

    /// `None` when the page has no mobile menu.
    pub fn menu_open(&self) -> Option<bool> {
        self.widgets.nav.as_ref().map(NavMenu::is_open)
    }

    pub fn is_revealed(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self
            .widgets
            .reveal
            .as_ref()
            .is_some_and(|reveal| reveal.is_revealed(target)))
    }

    pub fn reveal_targets(&self) -> Vec<NodeId> {
        self.widgets
            .reveal
            .as_ref()
            .map(|reveal| reveal.observed().to_vec())
            .unwrap_or_default()
    }

    /// `None` when `selector` is not a favorite button.
    pub fn is_favorited(&self, selector: &str) -> Result<Option<bool>> {
        let target = self.select_one(selector)?;
        Ok(self.widgets.favorites.is_favorited(target))
    }

    pub fn is_pressed(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.widgets.press.is_pressed(target))
    }

    pub fn counters_running(&self) -> bool {
        self.widgets.counters.is_running()
    }

    /// Where the smooth scroll in flight will land.
    pub fn smooth_scroll_destination(&self) -> Option<i64> {
        self.widgets.smooth_scroll.destination()
    }

    pub fn is_hovered(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.hovered.contains(&target))
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        self.subscriptions.all()
    }

    pub fn take_navigations(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.navigations)
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("has class {class_name:?}: {expected}"),
                actual: format!("has class {class_name:?}: {actual}"),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("{property}: {expected}"),
                actual: format!("{property}: {actual}"),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), DOM_SNIPPET_CHARS)
    }
}
