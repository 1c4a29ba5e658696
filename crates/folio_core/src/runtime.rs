//! Page runtime: the composition root wiring components to host collaborators.
//!
//! # Responsibility
//! - Build every component from config + page layout, independently.
//! - Route host events (scroll, intersection, click, key, pointer, submit)
//!   to components and apply the resulting effects.
//! - Own the timer queue and drain it against the injected clock.
//!
//! # Invariants
//! - Every handler drains due timers before handling its event.
//! - A missing element disables only the component that needs it.
//! - Surface failures are logged and swallowed; one failed write never
//!   aborts the rest of an effect batch.
//! - `RenderIcons` only reaches the icon renderer, never the surface.

use crate::config::PortfolioConfig;
use crate::error::{CoreError, CoreResult};
use crate::host::viewport::ViewportQuery;
use crate::host::{Clock, IconRenderer, PresentationSurface};
use crate::logging::sanitize_message;
use crate::model::effect::Effect;
use crate::model::element::{ElementKind, ElementRef, RevealStrategy};
use crate::model::form::FormFields;
use crate::model::layout::PageLayout;
use crate::model::nav::NavState;
use crate::model::notification::{Notification, Severity};
use crate::repo::preference_repo::PreferenceStore;
use crate::service::contact_form::{ContactForm, SubmitOutcome, SENT_MESSAGE};
use crate::service::menu::MobileMenu;
use crate::service::navigation::NavigationTracker;
use crate::service::notification::NotificationCenter;
use crate::service::scroll_extras::{
    AnchorScroller, BackToTop, LazyImageLoader, Parallax, PointerPhase, ProjectHover,
};
use crate::service::skills::{SkillBarAnimator, SkillsPhase};
use crate::service::theme::ThemeService;
use crate::service::visibility::{
    IntersectionEntry, IntersectionWatcher, Revealed, VisibilityEvaluator,
};
use crate::service::{ScheduledTask, Timers};
use log::{error, info, warn};
use serde::Deserialize;

const SECTION_ANIMATE_CLASS: &str = "section-animate";
const SECTION_REVEALED_CLASS: &str = "animate";
const CERTIFICATE_REVEALED_CLASS: &str = "show";
const MAX_REPORTED_ERROR_CHARS: usize = 160;

/// Host capabilities injected once at construction.
pub struct Collaborators {
    pub surface: Box<dyn PresentationSurface>,
    /// `None` when the icon library is not loaded on the page.
    pub icons: Option<Box<dyn IconRenderer>>,
    pub preferences: Box<dyn PreferenceStore>,
    pub clock: Box<dyn Clock>,
}

/// Click as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClickEvent {
    /// Id of the clicked control, when it has one the layout names.
    pub target: Option<ElementRef>,
    /// `href` of the enclosing in-page link, e.g. `#about`.
    pub anchor: Option<String>,
    /// Whether the click landed inside the mobile menu panel.
    pub inside_menu: bool,
    /// Whether the click hit a link inside the menu panel, in-page or not.
    pub menu_link: bool,
}

impl ClickEvent {
    pub fn on(target: impl Into<ElementRef>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn anchor(href: impl Into<String>) -> Self {
        Self {
            anchor: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn inside_menu(mut self) -> Self {
        self.inside_menu = true;
        self
    }

    /// Marks the click as landing on a link inside the menu panel.
    pub fn menu_link(mut self) -> Self {
        self.inside_menu = true;
        self.menu_link = true;
        self
    }
}

pub struct PortfolioRuntime {
    surface: Box<dyn PresentationSurface>,
    icons: Option<Box<dyn IconRenderer>>,
    clock: Box<dyn Clock>,
    timers: Timers,
    evaluator: VisibilityEvaluator,
    watcher: IntersectionWatcher,
    notifications: NotificationCenter,
    navigation: NavigationTracker,
    anchors: AnchorScroller,
    hover: ProjectHover,
    lazy_images: LazyImageLoader,
    skills: Option<SkillBarAnimator>,
    menu: Option<MobileMenu>,
    contact: Option<ContactForm>,
    theme: Option<(ElementRef, ThemeService)>,
    back_to_top: Option<BackToTop>,
    parallax: Option<Parallax>,
    /// Kept when no theme control exists so callers can still reclaim it.
    idle_preferences: Option<Box<dyn PreferenceStore>>,
}

impl PortfolioRuntime {
    /// Builds the runtime and applies the startup effects.
    ///
    /// # Errors
    /// - `Config` when `config` fails validation.
    ///
    /// Missing page elements are not errors; the affected component is
    /// skipped and logged.
    pub fn new(
        config: PortfolioConfig,
        layout: PageLayout,
        collaborators: Collaborators,
    ) -> CoreResult<Self> {
        config.validate()?;
        let Collaborators {
            surface,
            icons,
            preferences,
            clock,
        } = collaborators;

        let mut startup = Vec::new();
        let mut evaluator = VisibilityEvaluator::new();
        let reveal = &config.reveal;

        for card in &layout.animated_cards {
            evaluator.track(
                card.clone(),
                ElementKind::SectionCard,
                RevealStrategy::Intersection {
                    ratio: reveal.section_card_ratio,
                    margin_bottom_px: reveal.section_card_margin_bottom_px,
                },
            );
            startup.push(Effect::add_class(card, SECTION_ANIMATE_CLASS));
        }
        for certificate in &layout.certificate_cards {
            evaluator.track(
                certificate.clone(),
                ElementKind::CertificateCard,
                RevealStrategy::TopPosition {
                    viewport_divisor: reveal.certificate_viewport_divisor,
                },
            );
        }

        let skills = match SkillBarAnimator::from_layout(layout.skills.as_ref(), &config.skills) {
            Ok(animator) => {
                evaluator.track(
                    animator.container().clone(),
                    ElementKind::SkillBar,
                    RevealStrategy::Intersection {
                        ratio: reveal.skills_container_ratio,
                        margin_bottom_px: 0.0,
                    },
                );
                Some(animator)
            }
            Err(err) => disabled("skills", err),
        };

        for image in &layout.lazy_images {
            evaluator.track(
                image.element.clone(),
                ElementKind::LazyImage,
                RevealStrategy::Intersection {
                    ratio: 0.0,
                    margin_bottom_px: 0.0,
                },
            );
        }

        let mut watcher = IntersectionWatcher::new();
        for (target, ratio, margin_bottom_px) in evaluator.intersection_watches() {
            watcher.watch(target.clone(), ratio, margin_bottom_px);
        }

        let menu = MobileMenu::from_layout(layout.mobile_menu.as_ref())
            .map_or_else(|err| disabled("mobile_menu", err), Some);
        let contact = ContactForm::from_layout(layout.contact_form.as_ref(), config.form.clone())
            .map_or_else(|err| disabled("contact_form", err), Some);

        let (theme, idle_preferences) = match layout.theme_toggle {
            Some(toggle) => {
                let (service, effects) =
                    ThemeService::load(preferences, config.theme_storage_key.clone());
                startup.extend(effects);
                (Some((toggle, service)), None)
            }
            None => (
                disabled("theme", CoreError::MissingElement("theme-toggle")),
                Some(preferences),
            ),
        };

        let back_to_top = layout
            .back_to_top
            .map(|button| BackToTop::new(button, config.navigation.back_to_top_px));
        let parallax = layout
            .hero
            .map(|hero| Parallax::new(hero, config.parallax.clone()));

        startup.push(Effect::RenderIcons);

        let mut runtime = Self {
            timers: Timers::starting_at(clock.now_ms()),
            surface,
            icons,
            clock,
            evaluator,
            watcher,
            notifications: NotificationCenter::new(config.notification.clone()),
            navigation: NavigationTracker::new(
                layout.navbar,
                layout.sections,
                layout.nav_links,
                config.navigation.clone(),
            ),
            anchors: AnchorScroller::new(&config.navigation),
            hover: ProjectHover::new(layout.project_cards),
            lazy_images: LazyImageLoader::new(layout.lazy_images),
            skills,
            menu,
            contact,
            theme,
            back_to_top,
            parallax,
            idle_preferences,
        };

        info!(
            "event=portfolio_init module=runtime status=ok components={} tracked={} icons={}",
            runtime.active_components().join(","),
            runtime.evaluator.len(),
            runtime.icons.is_some()
        );
        runtime.apply_all(startup);
        Ok(runtime)
    }

    /// Names of the components that found their elements.
    pub fn active_components(&self) -> Vec<&'static str> {
        let mut active = vec!["navigation", "notification", "anchor_scroll"];
        if self.skills.is_some() {
            active.push("skills");
        }
        if !self.evaluator.is_empty() {
            active.push("reveal");
        }
        if self.menu.is_some() {
            active.push("mobile_menu");
        }
        if self.contact.is_some() {
            active.push("contact_form");
        }
        if self.theme.is_some() {
            active.push("theme");
        }
        if self.back_to_top.is_some() {
            active.push("back_to_top");
        }
        if self.parallax.is_some() {
            active.push("parallax");
        }
        if !self.hover.is_empty() {
            active.push("project_hover");
        }
        if !self.lazy_images.is_empty() {
            active.push("lazy_images");
        }
        active
    }

    /// Runs every timer due at the current clock reading.
    pub fn poll_timers(&mut self) {
        let now_ms = self.clock.now_ms();
        while let Some(fired) = self.timers.pop_due(now_ms) {
            let effects = self.run_task(fired.task);
            self.apply_all(effects);
        }
        self.timers.settle(now_ms);
    }

    /// Earliest pending deadline, for hosts that arm a real timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn on_scroll(&mut self, viewport: &dyn ViewportQuery) {
        self.poll_timers();

        let mut effects = self.navigation.on_scroll(viewport);
        for revealed in self.evaluator.evaluate(viewport) {
            effects.extend(self.reveal(revealed));
        }
        for entry in self.watcher.observe(viewport) {
            if let Some(revealed) = self.evaluator.on_intersection(&entry) {
                effects.extend(self.reveal(revealed));
            }
        }
        if let Some(button) = self.back_to_top.as_mut() {
            effects.extend(button.on_scroll(viewport.scroll_offset_y()));
        }
        if let Some(parallax) = self.parallax.as_mut() {
            effects.extend(parallax.on_scroll(viewport));
        }
        self.apply_all(effects);
    }

    /// Threshold-crossing entries from a host-side observer.
    ///
    /// Entries for elements already revealed through `on_scroll` are no-ops.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) {
        self.poll_timers();
        let mut effects = Vec::new();
        for entry in entries {
            if let Some(revealed) = self.evaluator.on_intersection(entry) {
                effects.extend(self.reveal(revealed));
            }
        }
        self.apply_all(effects);
    }

    /// `viewport` resolves anchor targets; it is not otherwise consulted.
    pub fn on_click(&mut self, click: &ClickEvent, viewport: &dyn ViewportQuery) {
        self.poll_timers();
        let mut effects = Vec::new();
        let target = click.target.as_ref();

        if let Some(menu) = self.menu.as_mut() {
            if target == Some(menu.button()) {
                effects.extend(menu.toggle());
            } else if !click.inside_menu || click.menu_link || click.anchor.is_some() {
                effects.extend(menu.close());
            }
        }
        if let Some(href) = click.anchor.as_deref() {
            effects.extend(self.anchors.on_click(href, viewport));
        }
        if let Some(button) = self.back_to_top.as_ref() {
            if target == Some(button.button()) {
                effects.push(button.on_click());
            }
        }
        if let Some((toggle, theme)) = self.theme.as_mut() {
            if target == Some(&*toggle) {
                effects.extend(theme.toggle());
            }
        }
        self.apply_all(effects);
    }

    pub fn on_key(&mut self, key: &str) {
        self.poll_timers();
        let effects = match self.menu.as_mut() {
            Some(menu) => menu.on_key(key),
            None => Vec::new(),
        };
        self.apply_all(effects);
    }

    pub fn on_pointer(&mut self, target: &ElementRef, phase: PointerPhase) {
        self.poll_timers();
        let effects = self.hover.on_pointer(target, phase);
        self.apply_all(effects);
    }

    /// Validates and submits the contact form.
    ///
    /// Rejections are surfaced to the visitor as an error toast.
    ///
    /// # Errors
    /// - `MissingElement` when the page has no contact form.
    pub fn submit_contact_form(&mut self, fields: &FormFields) -> CoreResult<SubmitOutcome> {
        self.poll_timers();
        let contact = self
            .contact
            .as_mut()
            .ok_or(CoreError::MissingElement("contact-form"))?;
        let (outcome, mut effects) = contact.submit(fields, &mut self.timers);
        if let SubmitOutcome::Rejected(err) = &outcome {
            let message = err.user_message(contact.config());
            effects.extend(
                self.notifications
                    .show(message, Severity::Error, &mut self.timers),
            );
        }
        self.apply_all(effects);
        Ok(outcome)
    }

    /// Shows a toast, replacing any live one.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.poll_timers();
        let effects = self.notifications.show(message, severity, &mut self.timers);
        self.apply_all(effects);
    }

    /// Flips the theme and returns whether dark mode is now on.
    ///
    /// # Errors
    /// - `MissingElement` when the page has no theme control.
    pub fn toggle_theme(&mut self) -> CoreResult<bool> {
        self.poll_timers();
        let (_, theme) = self
            .theme
            .as_mut()
            .ok_or(CoreError::MissingElement("theme-toggle"))?;
        let effects = theme.toggle();
        let is_dark = theme.is_dark();
        self.apply_all(effects);
        Ok(is_dark)
    }

    /// Logs an error raised outside any component (e.g. a host script error).
    pub fn report_error(&self, message: &str) {
        let err = unexpected_error(message);
        error!(
            "event=runtime_error module=runtime status=error code={} error={}",
            err.code(),
            err
        );
    }

    pub fn nav_state(&self) -> Option<&NavState> {
        self.navigation.state()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn is_revealed(&self, element: &ElementRef) -> bool {
        self.evaluator.is_revealed(element)
    }

    pub fn skills_phase(&self) -> Option<SkillsPhase> {
        self.skills.as_ref().map(SkillBarAnimator::phase)
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MobileMenu::is_open)
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme
            .as_ref()
            .is_some_and(|(_, theme)| theme.is_dark())
    }

    pub fn is_sending(&self) -> bool {
        self.contact.as_ref().is_some_and(ContactForm::is_sending)
    }

    /// Tears the runtime down and returns the preference store.
    pub fn into_preferences(self) -> Option<Box<dyn PreferenceStore>> {
        self.theme
            .map(|(_, theme)| theme.into_store())
            .or(self.idle_preferences)
    }

    fn run_task(&mut self, task: ScheduledTask) -> Vec<Effect> {
        match task {
            ScheduledTask::Notification { id, step } => {
                self.notifications.on_timer(id, step, &mut self.timers)
            }
            ScheduledTask::SkillsSettle => {
                if let Some(skills) = self.skills.as_mut() {
                    skills.on_settled(&mut self.timers);
                }
                Vec::new()
            }
            ScheduledTask::SkillBarWidth { index } => self
                .skills
                .as_ref()
                .map(|skills| skills.on_bar_due(index))
                .unwrap_or_default(),
            ScheduledTask::ContactSendComplete => {
                let Some(contact) = self.contact.as_mut() else {
                    return Vec::new();
                };
                let restore = contact.on_send_complete();
                let mut effects =
                    self.notifications
                        .show(SENT_MESSAGE, Severity::Success, &mut self.timers);
                effects.extend(restore);
                effects
            }
        }
    }

    fn reveal(&mut self, revealed: Revealed) -> Vec<Effect> {
        match revealed.kind {
            ElementKind::SectionCard => {
                vec![Effect::add_class(&revealed.id, SECTION_REVEALED_CLASS)]
            }
            ElementKind::CertificateCard => {
                vec![Effect::add_class(&revealed.id, CERTIFICATE_REVEALED_CLASS)]
            }
            ElementKind::SkillBar => {
                if let Some(skills) = self.skills.as_mut() {
                    skills.on_container_revealed(&mut self.timers);
                }
                Vec::new()
            }
            ElementKind::LazyImage => {
                self.watcher.unwatch(&revealed.id);
                self.lazy_images.on_revealed(&revealed.id)
            }
        }
    }

    fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if effect == Effect::RenderIcons {
                if let Some(icons) = self.icons.as_mut() {
                    icons.render_icons();
                }
                continue;
            }
            if let Err(err) = self.surface.apply(&effect) {
                warn!(
                    "event=effect_apply module=runtime status=error op={} error={}",
                    effect.op_name(),
                    err
                );
            }
        }
    }
}

fn disabled<T>(component: &'static str, err: CoreError) -> Option<T> {
    warn!(
        "event=component_disabled module=runtime component={} code={} error={}",
        component,
        err.code(),
        err
    );
    None
}

fn unexpected_error(message: &str) -> CoreError {
    CoreError::UnexpectedRuntime(sanitize_message(message, MAX_REPORTED_ERROR_CHARS))
}
