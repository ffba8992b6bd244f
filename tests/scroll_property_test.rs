use estate_page::{LayoutBox, Page, PageConfig};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const SCROLL_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/scroll_property_test.txt";
const DEFAULT_SCROLL_PROPTEST_CASES: u32 = 128;
const CARD_COUNT: usize = 4;

const SCROLL_HTML: &str = r#"
<header class="site-header"><nav><a class="logo" href="/">Estate</a></nav></header>
<section class="hero">
  <div class="hero-content"><h1>Find a home</h1></div>
  <div class="particle"></div><div class="particle"></div><div class="particle"></div>
</section>
<section class="featured-properties">
  <div class="property-card" id="card0">A</div>
  <div class="property-card" id="card1">B</div>
  <div class="property-card" id="card2">C</div>
  <div class="property-card" id="card3">D</div>
</section>
"#;

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn scroll_proptest_cases() -> u32 {
    std::env::var("ESTATE_PAGE_SCROLL_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| {
            env_proptest_cases("ESTATE_PAGE_PROPTEST_CASES", DEFAULT_SCROLL_PROPTEST_CASES)
        })
}

fn fail(err: estate_page::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn px(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn card_layouts_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    vec((0i64..=6_000, 1i64..=600), CARD_COUNT)
}

/// Same geometry the page uses: the visible band loses its bottom margin.
fn visible_ratio(config: &PageConfig, scroll_y: i64, (top, height): (i64, i64)) -> f64 {
    let band_top = scroll_y;
    let band_bottom = scroll_y + (config.viewport_height - config.reveal_bottom_margin_px).max(0);
    let overlap = (top + height).min(band_bottom) - top.max(band_top);
    if overlap <= 0 {
        0.0
    } else {
        overlap as f64 / height as f64
    }
}

fn assert_scroll_effects(layouts: &[(i64, i64)], offsets: &[i64]) -> TestCaseResult {
    let config = PageConfig::default();
    let mut page = Page::from_html(SCROLL_HTML).map_err(fail)?;
    for (idx, (top, height)) in layouts.iter().enumerate() {
        page.set_layout_at(".property-card", idx, LayoutBox::new(*top, *height))
            .map_err(fail)?;
    }

    let mut visited = vec![0i64];
    let mut moved = false;
    let mut previously_revealed = vec![false; CARD_COUNT];

    for &y in offsets {
        page.scroll_to(y).map_err(fail)?;
        prop_assert_eq!(page.scroll_y(), y);
        visited.push(y);
        moved |= y != 0;

        let scrolled = page.has_class("header", "scrolled").map_err(fail)?;
        if moved {
            prop_assert_eq!(scrolled, y > config.scroll_threshold_px, "header at y={}", y);
            prop_assert_eq!(
                page.style(".hero-content", "transform").map_err(fail)?,
                format!("translateY({}px)", px(y as f64 * config.parallax_content_factor))
            );
            for idx in 0..3 {
                let selector = format!(".particle:nth-child({})", idx + 2);
                let expected = y as f64 * config.parallax_particle_factor * (idx + 1) as f64;
                prop_assert_eq!(
                    page.style(&selector, "transform").map_err(fail)?,
                    format!("translateY({}px)", px(expected))
                );
            }
        } else {
            prop_assert!(!scrolled);
        }

        for (idx, layout) in layouts.iter().enumerate() {
            let revealed = page.is_revealed(&format!("#card{idx}")).map_err(fail)?;
            let expected = visited.iter().any(|seen| {
                let ratio = visible_ratio(&config, *seen, *layout);
                ratio > 0.0 && ratio >= config.reveal_threshold
            });
            prop_assert_eq!(revealed, expected, "card {} after y={}", idx, y);
            prop_assert!(revealed || !previously_revealed[idx], "card {} was hidden again", idx);
            previously_revealed[idx] = revealed;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: scroll_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(SCROLL_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn scroll_effects_track_offset(
        layouts in card_layouts_strategy(),
        offsets in vec(0i64..=6_000, 1..=24),
    ) {
        assert_scroll_effects(&layouts, &offsets)?;
    }

    #[test]
    fn declared_height_clamps_every_offset(
        document_height in 0i64..=5_000,
        offsets in vec(-2_000i64..=9_000, 1..=16),
    ) {
        let mut page = Page::from_html(SCROLL_HTML).map_err(fail)?;
        page.set_document_height(Some(document_height)).map_err(fail)?;
        let max_scroll = (document_height.max(800) - 800).max(0);
        for y in offsets {
            page.scroll_to(y).map_err(fail)?;
            prop_assert_eq!(page.scroll_y(), y.clamp(0, max_scroll));
        }
    }
}
