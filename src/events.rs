use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Scroll,
    Click,
    PointerEnter,
    PointerLeave,
}

impl SignalKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Click => "click",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
        }
    }

    /// Enter/leave never bubble. The page sends them to each element the
    /// pointer crosses instead.
    pub(crate) fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }
}

/// Every reaction the page can wire at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    HeaderScroll,
    Parallax,
    MenuToggle,
    MenuLinkClose,
    CarouselNext,
    CarouselPrev,
    CarouselDot(usize),
    CarouselPause,
    CarouselResume,
    FavoriteToggle,
    SmoothScroll,
    CardHoverReveal,
    CardHoverHide,
    PressFeedback { prevent_default: bool },
}

/// One `(signal, target, handler)` registration. A `None` target listens on
/// the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub signal: SignalKind,
    pub target: Option<NodeId>,
    pub handler: Handler,
}

#[derive(Debug, Default)]
pub(crate) struct SubscriptionRegistry {
    entries: Vec<Subscription>,
}

impl SubscriptionRegistry {
    pub(crate) fn add(&mut self, signal: SignalKind, target: Option<NodeId>, handler: Handler) {
        self.entries.push(Subscription {
            signal,
            target,
            handler,
        });
    }

    pub(crate) fn all(&self) -> &[Subscription] {
        &self.entries
    }

    /// Handlers registered on `target` for `signal`, in registration order.
    pub(crate) fn handlers_for(&self, signal: SignalKind, target: Option<NodeId>) -> Vec<Handler> {
        self.entries
            .iter()
            .filter(|entry| entry.signal == signal && entry.target == target)
            .map(|entry| entry.handler)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) signal: SignalKind,
    pub(crate) target: Option<NodeId>,
    pub(crate) current_target: Option<NodeId>,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(signal: SignalKind, target: Option<NodeId>) -> Self {
        Self {
            signal,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
