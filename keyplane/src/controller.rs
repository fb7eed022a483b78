// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction controller.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use keyplane_layout::{
    LayoutCalculator, LayoutConstants, LayoutParams, Orientation, PageFrames, keyboard_height,
    popup_frame,
};
use keyplane_pool::{PoolMode, ViewId, ViewPool};
use keyplane_table::{Key, KeyId, KeyKind, Keyboard};
use keyplane_touch::{Routed, TapCounter, TouchDispatcher, nearest_view};
use kurbo::{Point, Rect};

use crate::appearance::{Theme, key_appearance};
use crate::autocap::{AutoPeriodState, period_shortcut_applies, should_autocapitalize};
use crate::host::{Environment, KeyRenderer, KeyboardHost};
use crate::settings::Settings;
use crate::shift::{ShiftMachine, ShiftState};
use crate::timer::{TimerKind, TimerToken, Timers};
use crate::wiring::{KeyActions, key_actions};

/// Host identifier of a touch.
pub type TouchId = u64;

/// Progress of a held backspace key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackspaceState {
    /// Backspace is not held.
    #[default]
    Idle,
    /// Deleted once; waiting for auto-repeat to start.
    InitialDelay,
    /// Auto-repeating.
    Repeating,
}

/// Which key, if any, shows its preview callout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupPreview {
    /// No callout is visible.
    #[default]
    Hidden,
    /// The callout of this key is visible.
    ShownFor(KeyId),
}

/// Drives layout, pooling, and touch dispatch for one keyboard surface and
/// turns key events into edits on the host.
///
/// The controller is single threaded and event driven. The host forwards raw
/// touches, layout passes, and the passage of time (in milliseconds of any
/// monotonic clock); everything else happens inside those calls.
///
/// ```
/// use keyplane::{Autocapitalization, KeyboardController, KeyboardHost, Settings};
/// use keyplane_table::default_keyboard;
/// use kurbo::{Point, Rect};
///
/// #[derive(Default)]
/// struct Field(String);
///
/// impl KeyboardHost for Field {
///     fn insert_text(&mut self, text: &str) {
///         self.0.push_str(text);
///     }
///     fn delete_backward(&mut self) {
///         self.0.pop();
///     }
///     fn text_before_cursor(&self) -> Option<String> {
///         Some(self.0.clone())
///     }
///     fn autocapitalization(&self) -> Autocapitalization {
///         Autocapitalization::None
///     }
/// }
///
/// let mut keyboard =
///     KeyboardController::new(default_keyboard(), Settings::default(), Field::default(), ());
/// keyboard.layout(Rect::new(0.0, 0.0, 320.0, 216.0));
///
/// // Tap "q" (top-left key).
/// keyboard.touch_began(1, Point::new(10.0, 20.0), 0, None);
/// keyboard.touch_ended(1, Point::new(10.0, 20.0), 40);
/// assert_eq!(keyboard.host().0, "q");
/// ```
pub struct KeyboardController<H, R> {
    keyboard: Keyboard,
    calculator: LayoutCalculator,
    settings: Settings,
    host: H,
    renderer: R,
    pool: ViewPool,
    touches: TouchDispatcher<TouchId, ViewId>,
    taps: TapCounter<ViewId>,
    timers: Timers,
    shift: ShiftMachine,
    auto_period: AutoPeriodState,
    backspace: BackspaceState,
    popup: Option<(ViewId, KeyId)>,
    popup_container: Option<Rect>,
    page: usize,
    page_epoch: u64,
    params: Option<LayoutParams>,
    frames: HashMap<usize, PageFrames>,
    precomputed: bool,
    environment: Environment,
    theme: Theme,
    tap_count: u32,
    now: u64,
}

impl<H, R> fmt::Debug for KeyboardController<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardController")
            .field("page", &self.page)
            .field("shift", &self.shift.state())
            .field("backspace", &self.backspace)
            .field("auto_period", &self.auto_period)
            .field("popup", &self.popup)
            .field("params", &self.params)
            .field("views", &self.pool.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<H: KeyboardHost, R: KeyRenderer> KeyboardController<H, R> {
    /// Creates a controller showing the first page of `keyboard`.
    ///
    /// Nothing is laid out until the first [`layout`](Self::layout) call, but
    /// the initial shift state already follows the host's capitalization policy.
    pub fn new(keyboard: Keyboard, settings: Settings, host: H, renderer: R) -> Self {
        let environment = host.environment();
        let mode = if settings.pool_views {
            PoolMode::Pooled
        } else {
            PoolMode::PerSlot
        };
        let mut controller = Self {
            keyboard,
            calculator: LayoutCalculator::default(),
            settings,
            host,
            renderer,
            pool: ViewPool::new(mode),
            touches: TouchDispatcher::default(),
            taps: TapCounter::new(),
            timers: Timers::default(),
            shift: ShiftMachine::default(),
            auto_period: AutoPeriodState::NoSpace,
            backspace: BackspaceState::Idle,
            popup: None,
            popup_container: None,
            page: 0,
            page_epoch: 0,
            params: None,
            frames: HashMap::new(),
            precomputed: false,
            environment,
            theme: theme_of(&environment),
            tap_count: 1,
            now: 0,
        };
        controller.set_caps_if_needed();
        controller
    }

    /// Replaces the layout constants. Takes effect on the next layout pass.
    #[must_use]
    pub fn with_layout_constants(mut self, constants: LayoutConstants) -> Self {
        self.calculator = LayoutCalculator::new(constants);
        self.frames.clear();
        self.params = None;
        self
    }

    /// The key table.
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The view pool.
    pub fn pool(&self) -> &ViewPool {
        &self.pool
    }

    /// Index of the visible page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Frames of the visible page, once laid out.
    pub fn page_frames(&self) -> Option<&PageFrames> {
        self.frames.get(&self.page)
    }

    /// Surface bounds of the last layout pass.
    pub fn bounds(&self) -> Option<Rect> {
        self.params.map(|p| p.bounds)
    }

    /// Environment as of the last poll.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Current shift state.
    pub fn shift_state(&self) -> ShiftState {
        self.shift.state()
    }

    /// Backspace progress.
    pub fn backspace_state(&self) -> BackspaceState {
        self.backspace
    }

    /// Period shortcut progress.
    pub fn auto_period_state(&self) -> AutoPeriodState {
        self.auto_period
    }

    /// Visible preview callout.
    pub fn popup_preview(&self) -> PopupPreview {
        match self.popup {
            Some((_, key)) => PopupPreview::ShownFor(key),
            None => PopupPreview::Hidden,
        }
    }

    /// The timers, for hosts that schedule native callbacks per token.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Earliest time at which [`advance_time`](Self::advance_time) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_due().map(|(due, _)| due)
    }

    /// Latest time the controller has seen.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Keyboard height the host should request for `orientation`.
    pub fn preferred_height(&self, orientation: Orientation) -> f64 {
        keyboard_height(
            self.environment.device,
            orientation,
            self.environment.screen_width,
        )
    }

    /// Sets the area popups must stay inside. Defaults to the surface bounds.
    pub fn set_popup_container(&mut self, container: Option<Rect>) {
        self.popup_container = container;
    }

    /// Sets the shift state directly, as a settings screen might.
    pub fn set_shift_state(&mut self, state: ShiftState) {
        self.update_shift(|shift| shift.set(state));
    }

    /// Lays the visible page out inside `bounds`.
    ///
    /// Zero-area bounds are ignored and the previous layout stays. Repeating a
    /// pass with unchanged bounds, device class, and scale only re-polls the
    /// environment. A pass with new geometry cancels tracked touches and a held
    /// backspace before views are rebound.
    pub fn layout(&mut self, bounds: Rect) {
        let environment = self.host.environment();
        self.apply_environment(environment);
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            tracing::trace!("skipping layout of an empty surface");
            return;
        }
        let params = LayoutParams::new(bounds, environment.device, environment.scale);
        if self.params == Some(params) {
            return;
        }
        tracing::debug!(
            width = bounds.width(),
            height = bounds.height(),
            "keyboard layout"
        );
        // Views are about to be rebound; nothing may keep pointing at the old ones.
        self.reset_touches();
        self.shift.clear_gesture();
        self.cancel_backspace();
        self.page_epoch = self.page_epoch.wrapping_add(1);

        self.params = Some(params);
        self.frames.clear();
        self.touches.set_bounds(bounds);
        self.place_page();

        if let Some(period) = self.settings.timing.trait_poll_interval_ms {
            if !self.timers.is_armed(TimerKind::TraitPoll) {
                self.timers
                    .schedule_repeating(TimerKind::TraitPoll, self.now, period, period);
            }
        }
    }

    /// Switches to `page`, rebinding views and cancelling tracked touches.
    ///
    /// Switching to the visible page or to a page that does not exist does nothing.
    pub fn set_page(&mut self, page: usize) {
        if page == self.page {
            return;
        }
        if page >= self.keyboard.page_count() {
            tracing::debug!(page, "ignoring switch to a missing page");
            return;
        }
        self.reset_touches();
        self.shift.clear_gesture();
        self.cancel_backspace();
        self.page = page;
        self.page_epoch = self.page_epoch.wrapping_add(1);
        tracing::debug!(page, "page changed");
        if self.params.is_some() {
            self.place_page();
        }
    }

    /// A touch went down at `pos`.
    ///
    /// `host_tap_count` is the host's multi-tap count for this touch; without
    /// one, taps are counted with a [`TapCounter`].
    pub fn touch_began(
        &mut self,
        touch: TouchId,
        pos: Point,
        now: u64,
        host_tap_count: Option<u32>,
    ) {
        self.advance_time(now);
        let candidates: Vec<(ViewId, Rect)> = self.pool.visible_views().collect();
        let tap_count = match host_tap_count {
            Some(count) => count,
            None => {
                let hit = nearest_view(candidates.iter().copied(), pos, self.touches.bounds());
                self.taps.register(hit, pos, now)
            }
        };
        self.tap_count = tap_count;
        let events = self.touches.begin(touch, pos, tap_count, candidates);
        self.dispatch(events);
    }

    /// A tracked touch moved to `pos`.
    pub fn touch_moved(&mut self, touch: TouchId, pos: Point, now: u64) {
        self.advance_time(now);
        if !self.touches.is_tracking(touch) {
            return;
        }
        let candidates: Vec<(ViewId, Rect)> = self.pool.visible_views().collect();
        let events = self.touches.moved(touch, pos, candidates);
        self.dispatch(events);
    }

    /// A tracked touch lifted at `pos`.
    pub fn touch_ended(&mut self, touch: TouchId, pos: Point, now: u64) {
        self.advance_time(now);
        let events = self.touches.end(touch, pos);
        self.dispatch(events);
    }

    /// The host cancelled a tracked touch.
    pub fn touch_cancelled(&mut self, touch: TouchId, now: u64) {
        self.advance_time(now);
        let events = self.touches.cancel(touch);
        self.dispatch(events);
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn advance_time(&mut self, now: u64) {
        while let Some((due, kind)) = self.timers.next_due() {
            if due > now {
                break;
            }
            let Some(token) = self.timers.token(kind) else {
                break;
            };
            self.fire(token);
        }
        self.now = self.now.max(now);
    }

    /// Fires one timer. Returns `false` for a stale or cancelled token.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let Some(due) = self.timers.consume(token) else {
            return false;
        };
        self.now = self.now.max(due);
        self.run_timer(token.kind, due);
        true
    }

    /// The text around the cursor changed outside of the keyboard.
    pub fn text_did_change(&mut self) {
        self.set_caps_if_needed();
        self.auto_period = AutoPeriodState::NoSpace;
    }

    /// The interface is about to rotate to `orientation`.
    ///
    /// Cancels tracked touches and pending timers, and returns the keyboard
    /// height for the new orientation.
    pub fn will_rotate(&mut self, orientation: Orientation) -> f64 {
        self.reset_touches();
        self.shift.clear_gesture();
        self.cancel_backspace();
        self.clear_popup();
        self.preferred_height(orientation)
    }

    /// Re-reads the environment and repaints key colors if the theme changed.
    ///
    /// Returns `true` when the theme changed.
    pub fn poll_traits(&mut self) -> bool {
        let environment = self.host.environment();
        self.apply_environment(environment)
    }

    fn apply_environment(&mut self, environment: Environment) -> bool {
        self.environment = environment;
        let theme = theme_of(&environment);
        if theme == self.theme {
            return false;
        }
        tracing::debug!(dark = theme.dark, solid = theme.solid, "theme changed");
        self.theme = theme;
        self.refresh_appearance();
        true
    }

    fn ensure_frames(&mut self, page: usize) -> bool {
        if self.frames.contains_key(&page) {
            return true;
        }
        let Some(params) = self.params else {
            return false;
        };
        match self.calculator.layout_page(&self.keyboard, page, &params) {
            Some(frames) => {
                self.frames.insert(page, frames);
                true
            }
            None => false,
        }
    }

    /// Binds views for the visible page and repaints them.
    fn place_page(&mut self) {
        self.clear_popup();
        if self.pool.mode() == PoolMode::Pooled && !self.precomputed {
            // Size the pool for every page up front so page switches reuse views.
            for page in 0..self.keyboard.page_count() {
                if self.ensure_frames(page) {
                    if let Some(frames) = self.frames.get(&page) {
                        self.pool.place_page(frames, &mut self.renderer);
                    }
                }
            }
            self.precomputed = true;
            tracing::debug!(views = self.pool.len(), "view pool warmed up");
        }
        if !self.ensure_frames(self.page) {
            return;
        }
        if let Some(frames) = self.frames.get(&self.page) {
            self.pool.place_page(frames, &mut self.renderer);
        }
        for (_, view) in self.pool.bindings() {
            self.renderer.set_highlighted(view, false);
        }
        self.refresh_appearance();
        self.refresh_caps();
    }

    fn refresh_appearance(&mut self) {
        for (id, view) in self.pool.bindings() {
            if let Some(key) = self.keyboard.get(id) {
                let appearance = key_appearance(key, self.theme);
                self.renderer.set_appearance(view, &appearance);
            }
        }
    }

    fn refresh_caps(&mut self) {
        let shift = self.shift.state();
        for (id, view) in self.pool.bindings() {
            if let Some(key) = self.keyboard.get(id) {
                paint_caps(&mut self.renderer, key, view, shift);
            }
        }
    }

    fn update_shift(&mut self, f: impl FnOnce(&mut ShiftMachine)) {
        let before = self.shift.state();
        f(&mut self.shift);
        let after = self.shift.state();
        if after != before {
            tracing::trace!(?before, ?after, "shift state");
            self.refresh_caps();
        }
    }

    fn set_caps_if_needed(&mut self) {
        let capitalize = self.settings.auto_capitalization
            && should_autocapitalize(
                self.host.autocapitalization(),
                self.host.text_before_cursor().as_deref(),
            );
        self.update_shift(|shift| shift.auto(capitalize));
    }

    fn reset_touches(&mut self) {
        for routed in self.touches.reset_tracked_views() {
            self.handle(routed);
        }
    }

    fn dispatch(&mut self, events: Vec<Routed<ViewId>>) {
        let epoch = self.page_epoch;
        for routed in events {
            // Views were rebound; the rest of the batch targets stale views.
            if self.page_epoch != epoch {
                break;
            }
            self.handle(routed);
        }
    }

    fn handle(&mut self, routed: Routed<ViewId>) {
        let view = routed.view;
        let Some(id) = self.pool.key_for_view(view) else {
            return;
        };
        let Some(key) = self.keyboard.get(id) else {
            return;
        };
        let kind = key.kind;
        let target_page = key.target_page;
        let actions = key_actions(kind, self.environment.device, key.has_output(), routed.event);
        tracing::trace!(event = ?routed.event, ?kind, "key event");

        if actions.contains(KeyActions::PLAY_CLICK) && self.settings.keyboard_clicks {
            self.host.play_input_click();
        }
        if actions.contains(KeyActions::SHIFT_DOWN) {
            let tap_count = self.tap_count;
            self.update_shift(|shift| shift.down(tap_count));
        }
        if actions.contains(KeyActions::SHIFT_UP) {
            self.update_shift(ShiftMachine::up);
        }
        if actions.contains(KeyActions::SHIFT_DOUBLE_TAP) {
            self.update_shift(ShiftMachine::double_tap);
        }
        if actions.contains(KeyActions::BACKSPACE_DOWN) {
            self.backspace_down();
        }
        if actions.contains(KeyActions::BACKSPACE_UP) {
            self.cancel_backspace();
        }
        if actions.contains(KeyActions::CHANGE_PAGE) {
            if let Some(page) = target_page {
                self.set_page(page);
            }
            return;
        }
        if actions.contains(KeyActions::ADVANCE_INPUT_MODE) {
            self.reset_touches();
            self.shift.clear_gesture();
            self.host.advance_input_mode();
        }
        if actions.contains(KeyActions::HIGHLIGHT) {
            self.renderer.set_highlighted(view, true);
        }
        if actions.contains(KeyActions::UNHIGHLIGHT) {
            self.renderer.set_highlighted(view, false);
        }
        if actions.contains(KeyActions::SHOW_POPUP) {
            self.show_popup(view, id);
        }
        if actions.contains(KeyActions::HIDE_POPUP) {
            self.hide_popup(view);
        }
        if actions.contains(KeyActions::HIDE_POPUP_DELAYED) {
            self.hide_popup_later(view);
        }
        if actions.contains(KeyActions::COMMIT_OUTPUT) {
            self.commit(id);
        }
    }

    fn commit(&mut self, id: KeyId) {
        let Some(key) = self.keyboard.get(id) else {
            return;
        };
        let uppercase = self.shift.state().is_uppercase();
        self.host.insert_text(key.output_for_case(uppercase));
        let kind = key.kind;
        let back_to_letters = matches!(kind, KeyKind::Character | KeyKind::Space | KeyKind::Return)
            || key.lowercase_output.as_deref() == Some("'");
        if back_to_letters {
            self.set_page(0);
        }
        self.handle_auto_period(kind);
        self.set_caps_if_needed();
    }

    fn handle_auto_period(&mut self, kind: KeyKind) {
        if !self.settings.period_shortcut {
            return;
        }
        match self.auto_period {
            AutoPeriodState::FirstSpace => {
                if kind == KeyKind::Space
                    && period_shortcut_applies(self.host.text_before_cursor().as_deref())
                {
                    self.host.delete_backward();
                    self.host.delete_backward();
                    self.host.insert_text(". ");
                }
                self.auto_period = AutoPeriodState::NoSpace;
            }
            AutoPeriodState::NoSpace => {
                if kind == KeyKind::Space {
                    self.auto_period = AutoPeriodState::FirstSpace;
                }
            }
        }
    }

    fn backspace_down(&mut self) {
        self.cancel_backspace();
        self.host.delete_backward();
        self.set_caps_if_needed();
        self.timers.schedule(
            TimerKind::BackspaceDelay,
            self.now,
            self.settings.timing.backspace_delay_ms,
        );
        self.backspace = BackspaceState::InitialDelay;
    }

    fn cancel_backspace(&mut self) {
        self.timers.cancel(TimerKind::BackspaceDelay);
        self.timers.cancel(TimerKind::BackspaceRepeat);
        self.backspace = BackspaceState::Idle;
    }

    fn repeat_delete(&mut self) {
        if self.settings.keyboard_clicks {
            self.host.play_input_click();
        }
        self.host.delete_backward();
        self.set_caps_if_needed();
    }

    fn run_timer(&mut self, kind: TimerKind, due: u64) {
        tracing::trace!(?kind, due, "timer fired");
        match kind {
            TimerKind::BackspaceDelay => {
                self.backspace = BackspaceState::Repeating;
                self.repeat_delete();
                let repeat = self.settings.timing.backspace_repeat_ms;
                self.timers
                    .schedule_repeating(TimerKind::BackspaceRepeat, due, repeat, repeat);
            }
            TimerKind::BackspaceRepeat => self.repeat_delete(),
            TimerKind::PopupHide => {
                if let Some((view, _)) = self.popup.take() {
                    self.renderer.hide_popup(view);
                }
            }
            TimerKind::TraitPoll => {
                self.poll_traits();
            }
        }
    }

    fn show_popup(&mut self, view: ViewId, key: KeyId) {
        self.timers.cancel(TimerKind::PopupHide);
        match self.popup {
            Some((shown, _)) if shown == view => return,
            Some((shown, _)) => self.renderer.hide_popup(shown),
            None => {}
        }
        self.popup = None;
        let Some(frame) = self.pool.frame_of(view) else {
            return;
        };
        let container = self
            .popup_container
            .unwrap_or_else(|| self.touches.bounds());
        let placement = popup_frame(
            self.calculator.constants(),
            frame,
            self.environment.screen_width,
            container,
        );
        self.renderer.show_popup(view, &placement);
        self.popup = Some((view, key));
    }

    fn hide_popup(&mut self, view: ViewId) {
        if self.popup.is_some_and(|(shown, _)| shown == view) {
            self.clear_popup();
        }
    }

    fn hide_popup_later(&mut self, view: ViewId) {
        if self.popup.is_some_and(|(shown, _)| shown == view) {
            self.timers.schedule(
                TimerKind::PopupHide,
                self.now,
                self.settings.timing.popup_hide_delay_ms,
            );
        }
    }

    fn clear_popup(&mut self) {
        self.timers.cancel(TimerKind::PopupHide);
        if let Some((view, _)) = self.popup.take() {
            self.renderer.hide_popup(view);
        }
    }
}

fn theme_of(environment: &Environment) -> Theme {
    Theme {
        dark: environment.dark,
        solid: environment.reduced_transparency,
        device: environment.device,
    }
}

/// Updates the label of `view`, plus the lit and lock looks of the shift key.
fn paint_caps<R: KeyRenderer>(renderer: &mut R, key: &Key, view: ViewId, shift: ShiftState) {
    renderer.set_text(view, key.key_cap_for_case(shift.is_uppercase()));
    if key.kind == KeyKind::Shift {
        renderer.set_highlighted(view, shift.is_uppercase());
        renderer.set_selected(view, shift == ShiftState::Locked);
    }
}
