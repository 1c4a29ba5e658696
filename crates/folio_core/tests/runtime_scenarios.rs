use folio_core::service::skills::SkillsPhase;
use folio_core::testing::{CountingIcons, ManualClock, RecordingSurface};
use folio_core::{
    ClickEvent, Collaborators, Effect, ElementRef, FormField, FormFields, IntersectionEntry,
    MemoryPreferenceStore, NotificationState, PageLayout, PointerPhase, PortfolioConfig,
    PortfolioRuntime, Severity, SubmitOutcome, ViewportSnapshot,
};

struct Page {
    runtime: PortfolioRuntime,
    surface: RecordingSurface,
    clock: ManualClock,
    icons: CountingIcons,
}

fn layout() -> PageLayout {
    serde_json::from_value(serde_json::json!({
        "navbar": "navbar",
        "sections": ["home", "about", "skills"],
        "nav_links": [
            { "element": "nav-home", "section": "home" },
            { "element": "nav-about", "section": "about" },
            { "element": "nav-skills", "section": "skills" }
        ],
        "skills": {
            "container": "skills",
            "bars": [
                { "element": "bar-a", "data_width": "90" },
                { "element": "bar-b", "data_width": "60" },
                { "element": "bar-c", "data_width": "40" }
            ]
        },
        "animated_cards": ["card-1"],
        "certificate_cards": ["cert-1"],
        "project_cards": ["project-1"],
        "lazy_images": [{ "element": "avatar", "data_src": "/img/avatar.webp" }],
        "mobile_menu": {
            "button": "mobile-menu-btn",
            "menu": "mobile-menu",
            "icon": "mobile-menu-icon"
        },
        "back_to_top": "back-to-top",
        "contact_form": {
            "form": "contact-form",
            "submit_button": "contact-submit",
            "submit_html": "Send Message"
        },
        "theme_toggle": "theme-toggle",
        "hero": "home"
    }))
    .unwrap()
}

fn viewport() -> ViewportSnapshot {
    ViewportSnapshot::new(0.0, 900.0)
        .with_element("home", 0.0, 800.0)
        .with_element("about", 800.0, 800.0)
        .with_element("skills", 1_600.0, 600.0)
        .with_element("card-1", 1_000.0, 200.0)
        .with_element("cert-1", 1_900.0, 300.0)
        .with_element("avatar", 300.0, 100.0)
}

fn boot_with(layout: PageLayout, surface: RecordingSurface) -> Page {
    boot_configured(PortfolioConfig::default(), layout, surface)
}

fn boot_configured(
    config: PortfolioConfig,
    layout: PageLayout,
    surface: RecordingSurface,
) -> Page {
    let clock = ManualClock::new();
    let icons = CountingIcons::new();
    let runtime = PortfolioRuntime::new(
        config,
        layout,
        Collaborators {
            surface: Box::new(surface.clone()),
            icons: Some(Box::new(icons.clone())),
            preferences: Box::new(MemoryPreferenceStore::new()),
            clock: Box::new(clock.clone()),
        },
    )
    .unwrap();
    Page {
        runtime,
        surface,
        clock,
        icons,
    }
}

fn boot() -> Page {
    boot_with(layout(), RecordingSurface::new())
}

fn widths(effects: &[Effect]) -> Vec<(String, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::SetStyle {
                target,
                property,
                value,
            } if property == "width" => Some((target.to_string(), value.clone())),
            _ => None,
        })
        .collect()
}

fn count(effects: &[Effect], expected: &Effect) -> usize {
    effects.iter().filter(|effect| *effect == expected).count()
}

#[test]
fn startup_marks_section_cards_and_renders_icons() {
    let page = boot();
    assert_eq!(
        page.surface.effects(),
        vec![Effect::add_class(&ElementRef::new("card-1"), "section-animate")]
    );
    assert_eq!(page.icons.renders(), 1);
    assert_eq!(
        page.runtime.active_components(),
        vec![
            "navigation",
            "notification",
            "anchor_scroll",
            "skills",
            "reveal",
            "mobile_menu",
            "contact_form",
            "theme",
            "back_to_top",
            "parallax",
            "project_hover",
            "lazy_images",
        ]
    );
}

#[test]
fn skill_bars_animate_once_after_settle_and_stagger() {
    let mut page = boot();
    let layout = viewport();

    page.runtime.on_scroll(&layout);
    assert_eq!(page.runtime.skills_phase(), Some(SkillsPhase::Idle));

    page.runtime.on_scroll(&layout.scrolled_to(1_300.0));
    assert_eq!(page.runtime.skills_phase(), Some(SkillsPhase::Settling));
    assert_eq!(page.runtime.next_deadline(), Some(300));

    // Leaving and re-entering never arms a second settle timer.
    page.runtime.on_scroll(&layout);
    page.runtime.on_scroll(&layout.scrolled_to(1_300.0));
    page.runtime.on_intersection(&[IntersectionEntry {
        target: ElementRef::new("skills"),
        is_intersecting: true,
        ratio: 1.0,
    }]);
    assert_eq!(page.runtime.pending_timers(), 1);

    page.clock.set(299);
    page.runtime.poll_timers();
    assert!(widths(&page.surface.effects()).is_empty());

    page.clock.set(300);
    page.runtime.poll_timers();
    assert_eq!(
        widths(&page.surface.effects()),
        vec![("bar-a".to_string(), "90%".to_string())]
    );

    page.clock.set(700);
    page.runtime.poll_timers();
    assert_eq!(
        widths(&page.surface.effects()),
        vec![
            ("bar-a".to_string(), "90%".to_string()),
            ("bar-b".to_string(), "60%".to_string()),
            ("bar-c".to_string(), "40%".to_string()),
        ]
    );

    page.clock.set(10_000);
    page.runtime.on_scroll(&layout);
    page.runtime.on_scroll(&layout.scrolled_to(1_300.0));
    page.clock.set(20_000);
    page.runtime.poll_timers();
    assert_eq!(widths(&page.surface.effects()).len(), 3);
    assert_eq!(page.runtime.skills_phase(), Some(SkillsPhase::Animated));
}

#[test]
fn newer_notification_replaces_older_without_stale_callbacks() {
    let mut page = boot();

    page.runtime.notify("first", Severity::Info);
    let first = page.runtime.notification().unwrap().element();

    page.clock.set(100);
    page.runtime.poll_timers();
    page.clock.set(5_100);
    page.runtime.poll_timers();
    assert_eq!(
        page.runtime.notification().map(|toast| toast.state),
        Some(NotificationState::Dismissing)
    );
    page.surface.take();

    page.clock.set(5_200);
    page.runtime.notify("second", Severity::Warning);
    let second = page.runtime.notification().unwrap().element();
    assert_ne!(first, second);

    page.clock.set(60_000);
    page.runtime.poll_timers();

    let after = page.surface.effects();
    assert_eq!(
        after[0],
        Effect::RemoveElement {
            target: first.clone()
        }
    );
    assert_eq!(
        after
            .iter()
            .filter(|effect| effect.target() == Some(&first))
            .count(),
        1
    );
    assert!(after.contains(&Effect::RemoveElement { target: second }));
    assert!(page.runtime.notification().is_none());
    assert_eq!(page.runtime.pending_timers(), 0);
}

#[test]
fn handlers_drain_due_timers_before_handling_their_event() {
    let mut page = boot();
    page.runtime.notify("hello", Severity::Success);
    let toast = page.runtime.notification().unwrap().element();

    page.clock.set(150);
    page.runtime.on_key("Enter");

    assert!(page
        .surface
        .effects()
        .contains(&Effect::remove_class(&toast, "translate-x-full")));
    assert_eq!(
        page.runtime.notification().map(|toast| toast.state),
        Some(NotificationState::Visible)
    );
}

#[test]
fn certificate_card_is_shown_once_past_the_viewport_fraction() {
    let mut page = boot();
    let layout = viewport();
    let shown = Effect::add_class(&ElementRef::new("cert-1"), "show");

    // 1900 - 1000 = 900, not below 900 / 1.2 = 750.
    page.runtime.on_scroll(&layout.scrolled_to(1_000.0));
    assert_eq!(count(&page.surface.effects(), &shown), 0);

    // 1900 - 1151 = 749.
    page.runtime.on_scroll(&layout.scrolled_to(1_151.0));
    assert_eq!(count(&page.surface.effects(), &shown), 1);

    page.runtime.on_scroll(&layout);
    page.runtime.on_scroll(&layout.scrolled_to(1_800.0));
    assert_eq!(count(&page.surface.effects(), &shown), 1);
    assert!(page.runtime.is_revealed(&ElementRef::new("cert-1")));
}

#[test]
fn section_cards_and_lazy_images_reveal_by_intersection() {
    let mut page = boot();
    let layout = viewport();

    page.runtime.on_scroll(&layout);
    let effects = page.surface.effects();
    assert!(effects.contains(&Effect::set_attribute(
        &ElementRef::new("avatar"),
        "src",
        "/img/avatar.webp"
    )));
    assert!(effects.contains(&Effect::remove_class(&ElementRef::new("avatar"), "lazy")));
    assert!(!page.runtime.is_revealed(&ElementRef::new("card-1")));

    // Card top 700, root bottom 850: 150 of 200px visible.
    page.runtime.on_scroll(&layout.scrolled_to(300.0));
    let animate = Effect::add_class(&ElementRef::new("card-1"), "animate");
    assert_eq!(count(&page.surface.effects(), &animate), 1);

    page.runtime.on_scroll(&layout);
    page.runtime.on_scroll(&layout.scrolled_to(300.0));
    assert_eq!(count(&page.surface.effects(), &animate), 1);
    assert_eq!(page.surface.count_for(&ElementRef::new("avatar")), 2);
}

#[test]
fn host_fed_entries_reveal_without_scroll_ticks() {
    let mut page = boot();
    page.runtime.on_intersection(&[
        IntersectionEntry {
            target: ElementRef::new("card-1"),
            is_intersecting: true,
            ratio: 0.5,
        },
        IntersectionEntry {
            target: ElementRef::new("cert-1"),
            is_intersecting: true,
            ratio: 1.0,
        },
    ]);
    assert!(page.runtime.is_revealed(&ElementRef::new("card-1")));
    // Certificates only reveal through the position check.
    assert!(!page.runtime.is_revealed(&ElementRef::new("cert-1")));
}

#[test]
fn navigation_highlights_about_at_650() {
    let mut page = boot();
    page.runtime.on_scroll(&viewport().scrolled_to(650.0));

    let nav = page.runtime.nav_state().unwrap();
    assert_eq!(nav.active_section_id.as_deref(), Some("about"));
    assert!(nav.header_elevated);

    let effects = page.surface.effects();
    assert!(effects.contains(&Effect::add_class(&ElementRef::new("navbar"), "shadow-md")));
    assert!(effects.contains(&Effect::add_class(&ElementRef::new("nav-about"), "active")));
    assert!(effects.contains(&Effect::remove_class(&ElementRef::new("nav-home"), "active")));
    assert!(effects.contains(&Effect::add_class(&ElementRef::new("back-to-top"), "visible")));
    assert!(effects.contains(&Effect::set_style(
        &ElementRef::new("home"),
        "transform",
        "translateY(-195px)"
    )));
}

#[test]
fn contact_form_rejects_then_sends_with_success_toast() {
    let mut page = boot();

    let rejected = page
        .runtime
        .submit_contact_form(&FormFields::new(
            "Al",
            "not-an-email",
            "Hi!",
            "This is long enough.",
        ))
        .unwrap();
    let SubmitOutcome::Rejected(err) = &rejected else {
        panic!("expected rejection, got {rejected:?}");
    };
    assert_eq!(err.field, FormField::Email);
    let toast = page.runtime.notification().unwrap();
    assert_eq!(toast.severity, Severity::Error);
    assert_eq!(toast.message, "Please enter a valid email address.");

    let valid = FormFields::new("Al", "a@b.com", "Hi!", "This is long enough.");
    assert_eq!(
        page.runtime.submit_contact_form(&valid).unwrap(),
        SubmitOutcome::Sending
    );
    assert!(page.runtime.is_sending());
    assert_eq!(
        page.runtime.submit_contact_form(&valid).unwrap(),
        SubmitOutcome::Busy
    );
    page.surface.take();

    page.clock.set(2_000);
    page.runtime.poll_timers();
    assert!(!page.runtime.is_sending());

    let toast = page.runtime.notification().unwrap();
    assert_eq!(toast.severity, Severity::Success);
    assert_eq!(
        toast.message,
        "Thank you! Your message has been sent successfully."
    );
    let effects = page.surface.effects();
    assert!(effects.contains(&Effect::ResetForm {
        target: ElementRef::new("contact-form")
    }));
    assert!(effects.contains(&Effect::RemoveAttribute {
        target: ElementRef::new("contact-submit"),
        name: "disabled".to_string(),
    }));
}

#[test]
fn rejection_toast_quotes_the_configured_minimum() {
    let mut config = PortfolioConfig::default();
    config.form.min_message_chars = 30;
    let mut page = boot_configured(config, layout(), RecordingSurface::new());

    let rejected = page
        .runtime
        .submit_contact_form(&FormFields::new(
            "Al",
            "a@b.com",
            "Hi!",
            "Fifteen chars!!",
        ))
        .unwrap();
    assert!(matches!(rejected, SubmitOutcome::Rejected(_)));
    assert_eq!(
        page.runtime.notification().unwrap().message,
        "Please enter a message (at least 30 characters)."
    );
}

#[test]
fn mobile_menu_follows_button_outside_link_and_escape() {
    let mut page = boot();
    let layout = viewport();

    page.runtime.on_click(&ClickEvent::on("mobile-menu-btn"), &layout);
    assert!(page.runtime.is_menu_open());

    page.runtime.on_click(&ClickEvent::default().inside_menu(), &layout);
    assert!(page.runtime.is_menu_open());

    page.runtime.on_click(&ClickEvent::default(), &layout);
    assert!(!page.runtime.is_menu_open());

    page.runtime.on_click(&ClickEvent::on("mobile-menu-btn"), &layout);
    page.surface.take();
    page.runtime.on_click(&ClickEvent::anchor("#about").inside_menu(), &layout);
    assert!(!page.runtime.is_menu_open());
    let effects = page.surface.effects();
    assert!(effects.contains(&Effect::add_class(&ElementRef::new("mobile-menu"), "hidden")));
    assert!(effects.contains(&Effect::ScrollTo {
        top: 720.0,
        smooth: true
    }));

    page.runtime.on_click(&ClickEvent::on("mobile-menu-btn"), &layout);
    page.runtime.on_key("Escape");
    assert!(!page.runtime.is_menu_open());
}

#[test]
fn external_menu_link_closes_menu_without_scrolling() {
    let mut page = boot();
    let layout = viewport();

    page.runtime.on_click(&ClickEvent::on("mobile-menu-btn"), &layout);
    assert!(page.runtime.is_menu_open());
    page.surface.take();

    page.runtime.on_click(&ClickEvent::default().menu_link(), &layout);
    assert!(!page.runtime.is_menu_open());
    let effects = page.surface.effects();
    assert!(effects.contains(&Effect::add_class(&ElementRef::new("mobile-menu"), "hidden")));
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::ScrollTo { .. })));
}

#[test]
fn back_to_top_theme_and_hover_clicks() {
    let mut page = boot();
    let layout = viewport();

    page.runtime.on_click(&ClickEvent::on("back-to-top"), &layout);
    assert!(page.surface.effects().contains(&Effect::ScrollTo {
        top: 0.0,
        smooth: true
    }));

    page.runtime.on_click(&ClickEvent::on("theme-toggle"), &layout);
    assert!(page.runtime.is_dark_theme());

    page.runtime.on_pointer(&ElementRef::new("project-1"), PointerPhase::Enter);
    assert!(page.surface.effects().contains(&Effect::set_style(
        &ElementRef::new("project-1"),
        "transform",
        "translateY(-8px) scale(1.02)"
    )));
}

#[test]
fn missing_elements_disable_only_their_component() {
    let page_layout = PageLayout {
        navbar: Some(ElementRef::new("navbar")),
        sections: vec![ElementRef::new("home")],
        ..PageLayout::default()
    };
    let mut page = boot_with(page_layout, RecordingSurface::new().with_missing("navbar"));

    let scrolled = ViewportSnapshot::new(400.0, 900.0).with_element("home", 0.0, 800.0);
    page.runtime.on_scroll(&scrolled);
    assert!(page.surface.effects().is_empty());
    assert_eq!(
        page.runtime.nav_state().and_then(|nav| nav.active_section_id.as_deref()),
        Some("home")
    );

    assert!(page
        .runtime
        .submit_contact_form(&FormFields::default())
        .is_err());
    assert!(page.runtime.toggle_theme().is_err());
    page.runtime.on_key("Escape");
    page.runtime.on_click(&ClickEvent::anchor("#nowhere"), &ViewportSnapshot::default());

    page.runtime.notify("still works", Severity::Info);
    assert!(page.runtime.notification().is_some());
}
