use estate_page::{Error, Handler, LayoutBox, Navigation, Page, PageConfig, Result, SignalKind};
use tracing_subscriber::EnvFilter;

const LANDING_PAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Hearth &amp; Home Realty</title>
  <link rel="stylesheet" href="styles.css">
  <style>.hero { min-height: 100vh; } a > i { color: red; }</style>
</head>
<body>
  <!-- Header -->
  <header>
    <div class="container">
      <a href="#home" class="logo">Hearth<span>Home</span></a>
      <ul class="nav-links">
        <li><a href="#home">Home</a></li>
        <li><a href="#properties">Properties</a></li>
        <li><a href="#services">Services</a></li>
        <li><a href="#testimonials">Reviews</a></li>
        <li><a href="#contact">Contact</a></li>
      </ul>
      <div class="mobile-menu-btn"><i class="fas fa-bars"></i></div>
    </div>
  </header>

  <section class="hero" id="home">
    <div class="particles">
      <div class="particle"></div>
      <div class="particle"></div>
      <div class="particle"></div>
      <div class="particle"></div>
    </div>
    <div class="hero-content">
      <h1>Find a home you'll love</h1>
      <form class="search-box">
        <input type="text" placeholder="City, neighborhood or ZIP">
        <button class="search-btn" type="submit"><i class="fas fa-search"></i> Search</button>
      </form>
      <div class="hero-stats">
        <div class="stat"><span class="stat-number" data-count="2500">2500+</span><p>Listings</p></div>
        <div class="stat"><span class="stat-number" data-count="98">98%</span><p>Happy clients</p></div>
        <div class="stat"><span class="stat-number" data-count="35">35</span><p>Cities</p></div>
      </div>
    </div>
  </section>

  <section class="featured-properties" id="properties">
    <h2>Featured Properties</h2>
    <div class="property-grid">
      <div class="property-card">
        <div class="property-image">
          <img src="house-1.jpg" alt="Modern villa">
          <div class="property-overlay"><a href="listing-1.html" class="view-property">View Details</a></div>
          <a href="#" class="favorite-btn"><i class="far fa-heart"></i></a>
        </div>
        <div class="property-info">
          <a href="map.html?id=1" class="location-badge"><i class="fas fa-map-marker-alt"></i> Austin, TX</a>
          <h3>Modern Villa</h3>
          <p class="price">$1,250,000</p>
        </div>
      </div>
      <div class="property-card">
        <div class="property-image">
          <img src="house-2.jpg" alt="Lake cabin">
          <div class="property-overlay"><a href="listing-2.html" class="view-property">View Details</a></div>
          <a href="#" class="favorite-btn"><i class="fas fa-heart"></i></a>
        </div>
        <div class="property-info"><h3>Lake Cabin</h3></div>
      </div>
    </div>
  </section>

  <section class="services" id="services">
    <div class="stats-container">
      <span class="stat-number" data-count="15">15</span>
    </div>
  </section>

  <section class="testimonials" id="testimonials">
    <div class="testimonial-slider">
      <div class="testimonial-card active"><p>&ldquo;They found us the perfect house.&rdquo;</p></div>
      <div class="testimonial-card"><p>Fast and honest.</p></div>
      <div class="testimonial-card"><p>Best agent in town.</p></div>
      <div class="testimonial-card"><p>Closed in three weeks.</p></div>
    </div>
    <div class="testimonial-controls">
      <button class="testimonial-prev"><i class="fas fa-chevron-left"></i></button>
      <div class="testimonial-dots">
        <span class="dot active"></span><span class="dot"></span><span class="dot"></span><span class="dot"></span>
      </div>
      <button class="testimonial-next"><i class="fas fa-chevron-right"></i></button>
    </div>
  </section>

  <section class="map-section" id="contact">
    <p>Visit us at 12 Main St.</p>
  </section>

  <footer>
    <p>&copy; 2024 Hearth &amp; Home. <a href="privacy.html">Privacy</a></p>
  </footer>
  <script src="script.js"></script>
  <script>
    if (a < b && c > d) { console.log("</div>"); }
  </script>
</body>
</html>
"##;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn load() -> Result<Page> {
    init_tracing();
    let mut page = Page::from_html(LANDING_PAGE_HTML)?;
    page.set_document_height(Some(5_200))?;
    page.set_layout(".hero", LayoutBox::new(0, 900))?;
    page.set_layout(".hero-stats", LayoutBox::new(730, 150))?;
    page.set_layout(".featured-properties", LayoutBox::new(900, 1_100))?;
    page.set_layout_at(".property-card", 0, LayoutBox::new(1_050, 420))?;
    page.set_layout_at(".property-card", 1, LayoutBox::new(1_050, 420))?;
    page.set_layout(".services", LayoutBox::new(2_000, 900))?;
    page.set_layout(".testimonials", LayoutBox::new(2_900, 800))?;
    page.set_layout(".map-section", LayoutBox::new(3_700, 1_000))?;
    Ok(page)
}

#[test]
fn boot_wires_every_widget_on_a_full_page() -> Result<()> {
    let page = load()?;
    assert_eq!(page.menu_open(), Some(false));
    assert_eq!(page.carousel_index(), Some(0));
    page.assert_text(".hero-stats .stat-number", "0")?;
    page.assert_text(".stats-container .stat-number", "0")?;
    page.assert_text(".hero-content h1", "Find a home you'll love")?;

    // Hero stats start at 730 with an 800 px viewport: only 20 px is above
    // the shrunken bottom edge, under the 20% threshold.
    assert!(!page.is_revealed(".hero-stats")?);
    assert!(!page.counters_running());

    let subscriptions = page.subscriptions();
    let count = |handler: Handler| {
        subscriptions
            .iter()
            .filter(|sub| sub.handler == handler)
            .count()
    };
    assert_eq!(count(Handler::MenuLinkClose), 5);
    assert_eq!(count(Handler::FavoriteToggle), 2);
    assert_eq!(count(Handler::CardHoverReveal), 2);
    assert_eq!(count(Handler::CarouselDot(3)), 1);
    // Favorite buttons use href="#" and count as in-page anchors too.
    assert_eq!(count(Handler::SmoothScroll), 8);
    assert!(subscriptions
        .iter()
        .any(|sub| sub.signal == SignalKind::PointerEnter && sub.handler == Handler::CarouselPause));
    Ok(())
}

#[test]
fn scrolling_down_the_page_reveals_sections_and_runs_counters() -> Result<()> {
    let mut page = load()?;
    page.scroll_to(120)?;
    page.assert_class("header", "scrolled", true)?;
    page.assert_style(".hero-content", "transform", "translateY(12px)")?;
    page.assert_style(".particle:nth-child(4)", "transform", "translateY(24px)")?;
    assert!(page.is_revealed(".hero-stats")?);
    assert!(page.counters_running());

    page.advance_time(1_000)?;
    page.assert_text(".hero-stats .stat-number", "2500")?;
    page.assert_text(".hero-stats .stat:nth-child(2) .stat-number", "98")?;
    // Counters fan out to every stat on the page, revealed or not.
    page.assert_text(".stats-container .stat-number", "15")?;

    page.scroll_to(1_000)?;
    assert!(page.is_revealed(".property-card")?);
    assert!(!page.is_revealed(".services")?);
    page.scroll_to(1_500)?;
    assert!(page.is_revealed(".services")?);
    assert!(!page.is_revealed(".testimonials")?);

    page.scroll_to(4_400)?;
    assert_eq!(page.scroll_y(), 4_400);
    page.scroll_to(9_999)?;
    assert_eq!(page.scroll_y(), 4_400);
    assert!(page.is_revealed(".map-section")?);
    page.assert_class(".hero-stats", "animated", true)?;
    Ok(())
}

#[test]
fn mobile_menu_link_jumps_to_contact() -> Result<()> {
    let mut page = load()?;
    page.click(".mobile-menu-btn")?;
    page.assert_class(".nav-links", "active", true)?;

    page.click(".nav-links li:last-child a")?;
    page.assert_class(".nav-links", "active", false)?;
    assert_eq!(
        page.dump_dom(".mobile-menu-btn")?,
        r#"<div class="mobile-menu-btn"><i class="fas fa-bars"></i></div>"#
    );
    page.advance_time(320)?;
    assert_eq!(page.scroll_y(), 3_700);
    assert!(page.take_navigations().is_empty());
    Ok(())
}

#[test]
fn clicking_the_icon_inside_a_control_still_triggers_it() -> Result<()> {
    let mut page = load()?;
    page.click(".testimonial-next i")?;
    assert_eq!(page.carousel_index(), Some(1));
    page.click(".favorite-btn i")?;
    page.assert_style(".favorite-btn i", "color", "#E64C2E")?;
    page.click(".mobile-menu-btn i")?;
    assert_eq!(page.menu_open(), Some(true));
    // The old icon was replaced; the new one is clickable as well.
    page.click(".mobile-menu-btn i")?;
    assert_eq!(page.menu_open(), Some(false));
    Ok(())
}

#[test]
fn favorite_links_do_not_navigate_but_listing_links_do() -> Result<()> {
    let mut page = load()?;
    page.click(".favorite-btn")?;
    page.click(".location-badge")?;
    page.click(".view-property")?;
    page.click("footer a")?;
    let hrefs = page
        .take_navigations()
        .into_iter()
        .map(|Navigation { href }| href)
        .collect::<Vec<_>>();
    assert_eq!(hrefs, vec!["map.html?id=1", "listing-1.html", "privacy.html"]);
    page.assert_style(".location-badge", "transform", "scale(0.95)")?;
    Ok(())
}

#[test]
fn search_submit_is_suppressed_with_press_feedback() -> Result<()> {
    let mut page = load()?;
    page.click(".search-btn")?;
    page.assert_style(".search-btn", "transform", "scale(0.95)")?;
    assert!(page.take_navigations().is_empty());
    page.advance_time(200)?;
    page.assert_style(".search-btn", "transform", "")?;
    Ok(())
}

#[test]
fn testimonials_rotate_through_all_four_and_pause_on_hover() -> Result<()> {
    let mut page = load()?;
    let mut seen = Vec::new();
    for _ in 0..4 {
        page.advance_time(6_000)?;
        seen.extend(page.carousel_index());
    }
    assert_eq!(seen, vec![1, 2, 3, 0]);

    page.pointer_enter(".testimonial-slider")?;
    page.advance_time(60_000)?;
    assert_eq!(page.carousel_index(), Some(0));
    page.pointer_leave(".testimonial-slider")?;
    page.advance_time(6_000)?;
    assert_eq!(page.carousel_index(), Some(1));
    page.assert_class(".dot:nth-child(2)", "active", true)?;
    Ok(())
}

#[test]
fn script_and_style_bodies_stay_inert() -> Result<()> {
    let page = load()?;
    page.assert_text(
        "body > script:last-child",
        "\n    if (a < b && c > d) { console.log(\"</div>\"); }\n  ",
    )?;
    page.assert_text("title", "Hearth & Home Realty")?;
    Ok(())
}

#[test]
fn misconfigured_pages_fail_fast() {
    init_tracing();
    let config = PageConfig {
        reveal_threshold: 1.5,
        ..PageConfig::default()
    };
    assert!(matches!(
        Page::from_html_with_config(LANDING_PAGE_HTML, config),
        Err(Error::Config(_))
    ));
}
