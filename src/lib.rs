use std::collections::{HashMap, HashSet, VecDeque};

mod config;
mod dom;
mod events;
mod html;
mod observer;
mod page;
mod scheduler;
mod selector;
mod trace;
mod viewport;
mod widgets;

pub use config::PageConfig;
pub use dom::NodeId;
pub use events::{Handler, SignalKind, Subscription};
pub use observer::IntersectionEntry;
pub use page::{Navigation, Page};
pub use scheduler::{PendingTimer, TaskKind, TimerId};
pub use viewport::LayoutBox;
pub use widgets::carousel::CarouselState;
pub use widgets::counter::{CounterFrame, CounterRamp, parse_leading_int};

use dom::Dom;
use events::{EventState, SubscriptionRegistry};
use scheduler::SchedulerState;
use trace::TraceState;
use viewport::Viewport;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

/// Formats a pixel value the way a browser serializes numbers into inline
/// styles: shortest round-trip decimal, no trailing `.0`.
fn format_px(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
