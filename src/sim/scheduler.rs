//! Mod activation scheduler
//!
//! Owns the four directional slots, tracks the selected slot, and turns input
//! edges into click/hold activations. Charge, cooldowns and the max-hold
//! timeout are all advanced explicitly by [`ModScheduler::tick`].

use log::{debug, info, warn};

use super::capability::{ModBinding, ModCapability, ModKind, ShipEnvironment};
use super::direction::ModDirection;
use super::events::{ModEvent, ModEventSink};
use super::slot::{CooldownStep, ModSlot};
use crate::consts::MOD_SLOT_COUNT;
use crate::timer_reached;

/// Why a request was accepted but did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No slot has a mod bound
    NoModSelected,
    /// Target slot is empty
    NoSuchMod,
    /// Target slot is already the selected one
    AlreadySelected,
    /// Slot is cooling down or locked out
    Unusable,
    /// Activation is blocked externally (paused, docked)
    Blocked,
    /// Input was not a released-to-pressed transition
    NotPressEdge,
    /// Passive mods cannot be activated
    PassiveMod,
    /// A hold is already in progress
    AlreadyCharging,
    /// Released before any charge accrued
    NoCharge,
    /// No hold is in progress for this slot
    NotHolding,
}

/// Result of [`ModScheduler::select_mod`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection moved to the requested slot
    Switched,
    /// A hold is charging; selection is locked
    Locked,
    Rejected(IgnoreReason),
}

impl SelectOutcome {
    /// True when the request was consumed (switched, or swallowed by the lock)
    pub fn handled(&self) -> bool {
        !matches!(self, SelectOutcome::Rejected(_))
    }
}

/// Result of [`ModScheduler::activate`] and [`ModScheduler::force_release`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivateOutcome {
    Clicked,
    HoldStarted,
    Released { charge: f32 },
    Ignored(IgnoreReason),
}

/// Armed max-hold countdown for the slot that started the hold
#[derive(Debug, Clone, Copy, PartialEq)]
struct HoldTimeout {
    direction: ModDirection,
    limit: f32,
    /// Unsuspended hold time so far
    elapsed: f64,
}

/// The ship's mod scheduler. One instance per game session.
#[derive(Debug)]
pub struct ModScheduler<S = Vec<ModEvent>> {
    slots: [ModSlot; MOD_SLOT_COUNT],
    selected: Option<ModDirection>,
    charging: bool,
    current_charge: f32,
    hold_timeout: Option<HoldTimeout>,
    blocked: bool,
    sink: S,
}

impl<S: ModEventSink> ModScheduler<S> {
    /// Bind one optional mod per direction (Left, Up, Right, Down) and select
    /// the first bound slot.
    pub fn new(bindings: [Option<ModBinding>; MOD_SLOT_COUNT], sink: S) -> Self {
        let slots = bindings.map(|b| b.map_or_else(ModSlot::empty, ModSlot::bound));
        let selected = ModDirection::ALL
            .into_iter()
            .find(|dir| slots[dir.index()].is_bound());

        match selected {
            Some(dir) => info!(
                "Mod scheduler ready: {} mod(s) bound, {} selected",
                slots.iter().filter(|s| s.is_bound()).count(),
                dir
            ),
            None => warn!("No mods are set on the player ship!"),
        }

        Self {
            slots,
            selected,
            charging: false,
            current_charge: 0.0,
            hold_timeout: None,
            blocked: false,
            sink,
        }
    }

    // === Per-tick update ===

    /// Advance one fixed step: passives, charge, cooldowns, then hold timeout.
    pub fn tick(&mut self, dt: f32, env: &ShipEnvironment) {
        for slot in &mut self.slots {
            if let Some(ModCapability::Passive(m)) = slot.capability_mut() {
                m.on_passive(env, dt);
            }
        }

        if self.charging {
            let max = self
                .selected
                .map_or(0.0, |dir| self.slots[dir.index()].descriptor().max_charge);
            // Clamp after accumulating
            self.current_charge = (self.current_charge + dt).min(max).max(0.0);
        }

        for dir in ModDirection::ALL {
            match self.slots[dir.index()].advance_cooldown(dt) {
                Some(CooldownStep::Progress(fraction)) => {
                    self.sink.emit(ModEvent::ModCooldownProgress(dir, fraction));
                }
                Some(CooldownStep::Ended) => {
                    debug!("Mod {} ready", dir);
                    self.sink.emit(ModEvent::ModCooldownEnded(dir));
                }
                None => {}
            }
        }

        self.advance_hold_timeout(dt, env);
    }

    fn advance_hold_timeout(&mut self, dt: f32, env: &ShipEnvironment) {
        let Some(mut timeout) = self.hold_timeout else {
            return;
        };
        if !self.charging {
            self.hold_timeout = None;
            return;
        }

        let suspended = match self.slots[timeout.direction.index()].capability() {
            Some(ModCapability::Hold(m)) => m.should_suspend_timeout(env),
            _ => false,
        };
        if !suspended {
            timeout.elapsed += f64::from(dt);
        }

        if !timer_reached(timeout.elapsed, timeout.limit) {
            self.hold_timeout = Some(timeout);
            return;
        }

        self.hold_timeout = None;
        let dir = timeout.direction;
        if self.selected == Some(dir) && self.slots[dir.index()].kind() == Some(ModKind::Hold) {
            debug!("Mod {} reached max hold time", dir);
            self.finalize_hold(dir);
        }
    }

    // === Inbound requests ===

    /// Move the selection to `direction`.
    ///
    /// Locked while a hold is charging; rejected for empty slots and for the
    /// slot that is already selected.
    pub fn select_mod(&mut self, direction: ModDirection) -> SelectOutcome {
        if self.charging {
            debug!("Ignoring switch to {}: hold in progress", direction);
            return SelectOutcome::Locked;
        }
        if !self.slots[direction.index()].is_bound() {
            return SelectOutcome::Rejected(IgnoreReason::NoSuchMod);
        }
        if self.selected == Some(direction) {
            return SelectOutcome::Rejected(IgnoreReason::AlreadySelected);
        }

        if let Some(previous) = self.selected {
            self.sink.emit(ModEvent::ModDeselected(previous));
        }
        self.selected = Some(direction);
        debug!("Switched mod to {}", direction);
        self.sink.emit(ModEvent::ModSwitched(direction));
        SelectOutcome::Switched
    }

    /// Feed an activation-control state change.
    ///
    /// `press_edge` marks the released-to-pressed transition. Releasing an
    /// active hold skips the blocked/usable checks.
    pub fn activate(&mut self, pressed: bool, press_edge: bool) -> ActivateOutcome {
        let Some(dir) = self.selected else {
            return ActivateOutcome::Ignored(IgnoreReason::NoModSelected);
        };

        let releasing_hold = !pressed && self.charging;
        if !releasing_hold {
            if self.blocked {
                return ActivateOutcome::Ignored(IgnoreReason::Blocked);
            }
            if !self.slots[dir.index()].usable() {
                return ActivateOutcome::Ignored(IgnoreReason::Unusable);
            }
        }

        let is_press = pressed && press_edge;
        match self.slots[dir.index()].kind() {
            None => ActivateOutcome::Ignored(IgnoreReason::NoSuchMod),
            Some(ModKind::Passive) => ActivateOutcome::Ignored(IgnoreReason::PassiveMod),
            Some(ModKind::Click) => {
                if !is_press {
                    return ActivateOutcome::Ignored(IgnoreReason::NotPressEdge);
                }
                if let Some(ModCapability::Click(m)) = self.slots[dir.index()].capability_mut() {
                    m.on_click();
                }
                debug!("Mod {} clicked", dir);
                self.sink.emit(ModEvent::ModActivated(dir));
                self.start_cooldown(dir);
                ActivateOutcome::Clicked
            }
            Some(ModKind::Hold) => {
                if is_press {
                    self.start_hold(dir)
                } else if !pressed {
                    self.release_hold(dir)
                } else {
                    ActivateOutcome::Ignored(IgnoreReason::NotPressEdge)
                }
            }
        }
    }

    fn start_hold(&mut self, dir: ModDirection) -> ActivateOutcome {
        if self.charging {
            return ActivateOutcome::Ignored(IgnoreReason::AlreadyCharging);
        }

        let slot = &mut self.slots[dir.index()];
        let max_hold_time = slot.descriptor().max_hold_time;
        self.charging = true;
        self.current_charge = 0.0;
        if let Some(ModCapability::Hold(m)) = slot.capability_mut() {
            m.on_hold();
        }
        self.hold_timeout = (max_hold_time > 0.0).then_some(HoldTimeout {
            direction: dir,
            limit: max_hold_time,
            elapsed: 0.0,
        });

        debug!("Mod {} hold started", dir);
        self.sink.emit(ModEvent::ModActivated(dir));
        ActivateOutcome::HoldStarted
    }

    fn release_hold(&mut self, dir: ModDirection) -> ActivateOutcome {
        if !self.charging {
            return ActivateOutcome::Ignored(IgnoreReason::NotHolding);
        }
        // Mods without a charge mechanic never accrue charge, so any release ends them
        let has_charge_mechanic = self.slots[dir.index()].descriptor().max_charge > 0.0;
        if self.current_charge <= 0.0 && has_charge_mechanic {
            return ActivateOutcome::Ignored(IgnoreReason::NoCharge);
        }
        let charge = self.finalize_hold(dir);
        ActivateOutcome::Released { charge }
    }

    /// End the active hold early (e.g. resource exhaustion) as if released.
    /// No-op unless `direction` is the slot currently charging.
    pub fn force_release(&mut self, direction: ModDirection) -> ActivateOutcome {
        let is_active_hold = self.charging
            && self.selected == Some(direction)
            && self.slots[direction.index()].kind() == Some(ModKind::Hold);
        if !is_active_hold {
            return ActivateOutcome::Ignored(IgnoreReason::NotHolding);
        }

        debug!("Mod {} force released", direction);
        let charge = self.finalize_hold(direction);
        ActivateOutcome::Released { charge }
    }

    /// External lockout for a slot (e.g. "out of stamina"). Does not cancel a
    /// running cooldown; empty slots stay unusable.
    pub fn set_usable(&mut self, direction: ModDirection, usable: bool) {
        self.slots[direction.index()].set_locked_out(!usable);
    }

    /// Paused / in-vehicle gate for new activations
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    // === Internal transitions ===

    fn finalize_hold(&mut self, dir: ModDirection) -> f32 {
        let charge = self.current_charge;
        self.charging = false;
        self.current_charge = 0.0;
        self.hold_timeout = None;

        if let Some(ModCapability::Hold(m)) = self.slots[dir.index()].capability_mut() {
            m.on_release(charge);
        }
        debug!("Mod {} released with charge {:.2}", dir, charge);
        self.sink.emit(ModEvent::ModReleased(dir, charge));
        self.start_cooldown(dir);
        charge
    }

    fn start_cooldown(&mut self, dir: ModDirection) {
        self.sink.emit(ModEvent::ModCooldownStarted(dir));
        if self.slots[dir.index()].start_cooldown() {
            self.sink.emit(ModEvent::ModCooldownEnded(dir));
        }
    }

    // === Read-only access for presentation ===

    pub fn selected(&self) -> Option<ModDirection> {
        self.selected
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn current_charge(&self) -> f32 {
        self.current_charge
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Seconds left before the active hold is forcibly released
    pub fn hold_time_remaining(&self) -> Option<f32> {
        self.hold_timeout
            .map(|t| (f64::from(t.limit) - t.elapsed) as f32)
    }

    pub fn slot(&self, direction: ModDirection) -> &ModSlot {
        &self.slots[direction.index()]
    }

    /// Slot currently holding the capability named `name`
    pub fn direction_of(&self, name: &str) -> Option<ModDirection> {
        ModDirection::ALL
            .into_iter()
            .find(|dir| self.slots[dir.index()].name() == Some(name))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl ModScheduler<Vec<ModEvent>> {
    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<ModEvent> {
        std::mem::take(&mut self.sink)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::sim::capability::{ClickMod, HoldMod, ModDescriptor, PassiveMod};

    type CallLog = Rc<RefCell<Vec<String>>>;

    struct TestClick(CallLog);

    impl ClickMod for TestClick {
        fn name(&self) -> &'static str {
            "test_click"
        }

        fn on_click(&mut self) {
            self.0.borrow_mut().push("click".into());
        }
    }

    struct TestHold {
        log: CallLog,
        suspend: Rc<Cell<bool>>,
    }

    impl HoldMod for TestHold {
        fn name(&self) -> &'static str {
            "test_hold"
        }

        fn on_hold(&mut self) {
            self.log.borrow_mut().push("hold".into());
        }

        fn on_release(&mut self, charge: f32) {
            self.log.borrow_mut().push(format!("release {charge:.2}"));
        }

        fn should_suspend_timeout(&self, _env: &ShipEnvironment) -> bool {
            self.suspend.get()
        }
    }

    struct TestPassive(CallLog);

    impl PassiveMod for TestPassive {
        fn name(&self) -> &'static str {
            "test_passive"
        }

        fn on_passive(&mut self, _env: &ShipEnvironment, _dt: f32) {
            self.0.borrow_mut().push("passive".into());
        }
    }

    fn click(log: &CallLog, cooldown: f32) -> Option<ModBinding> {
        Some(ModBinding::new(
            ModCapability::click(TestClick(log.clone())),
            ModDescriptor::new(0.0, cooldown, 0.0),
        ))
    }

    fn hold(log: &CallLog, descriptor: ModDescriptor) -> (Option<ModBinding>, Rc<Cell<bool>>) {
        let suspend = Rc::new(Cell::new(false));
        let binding = ModBinding::new(
            ModCapability::hold(TestHold {
                log: log.clone(),
                suspend: suspend.clone(),
            }),
            descriptor,
        );
        (Some(binding), suspend)
    }

    fn ticks(s: &mut ModScheduler, n: usize, dt: f32) {
        let env = ShipEnvironment::default();
        for _ in 0..n {
            s.tick(dt, &env);
        }
    }

    fn events() -> Vec<ModEvent> {
        Vec::new()
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn test_click_then_hold_scenario() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(3.0, 1.0, 0.0));
        let mut s = ModScheduler::new([click(&log, 2.0), None, hold_slot, None], events());
        assert_eq!(s.selected(), Some(ModDirection::Left));

        // Click fires once and starts a 2s cooldown
        assert_eq!(s.activate(true, true), ActivateOutcome::Clicked);
        assert_eq!(calls(&log), vec!["click"]);
        assert!(!s.slot(ModDirection::Left).usable());
        ticks(&mut s, 3, 0.5);
        assert!(!s.slot(ModDirection::Left).usable());
        ticks(&mut s, 1, 0.5);
        assert!(s.slot(ModDirection::Left).usable());

        // Switch to the only other bound slot
        assert_eq!(s.select_mod(ModDirection::Right), SelectOutcome::Switched);
        assert_eq!(s.selected(), Some(ModDirection::Right));

        // Hold for 1.5s and release
        assert_eq!(s.activate(true, true), ActivateOutcome::HoldStarted);
        assert!(s.is_charging());
        assert_eq!(s.current_charge(), 0.0);
        ticks(&mut s, 3, 0.5);
        assert_eq!(s.current_charge(), 1.5);
        assert_eq!(
            s.activate(false, false),
            ActivateOutcome::Released { charge: 1.5 }
        );
        assert_eq!(calls(&log), vec!["click", "hold", "release 1.50"]);
        assert!(!s.is_charging());
        assert_eq!(s.current_charge(), 0.0);
        assert!(!s.slot(ModDirection::Right).usable());
        ticks(&mut s, 2, 0.5);
        assert!(s.slot(ModDirection::Right).usable());
    }

    #[test]
    fn test_event_stream_for_click() {
        let log = CallLog::default();
        let mut s = ModScheduler::new([click(&log, 1.0), None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 2, 0.5);
        assert_eq!(
            s.drain_events(),
            vec![
                ModEvent::ModActivated(ModDirection::Left),
                ModEvent::ModCooldownStarted(ModDirection::Left),
                ModEvent::ModCooldownProgress(ModDirection::Left, 0.5),
                ModEvent::ModCooldownEnded(ModDirection::Left),
            ]
        );
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_click_ignores_release_and_repeat() {
        let log = CallLog::default();
        let mut s = ModScheduler::new([click(&log, 0.0), None, None, None], events());
        assert_eq!(
            s.activate(true, false),
            ActivateOutcome::Ignored(IgnoreReason::NotPressEdge)
        );
        assert_eq!(
            s.activate(false, false),
            ActivateOutcome::Ignored(IgnoreReason::NotPressEdge)
        );
        // Zero cooldown: usable again straight away
        assert_eq!(s.activate(true, true), ActivateOutcome::Clicked);
        assert!(s.slot(ModDirection::Left).usable());
        assert_eq!(s.activate(true, true), ActivateOutcome::Clicked);
        assert_eq!(calls(&log).len(), 2);
    }

    #[test]
    fn test_max_hold_time_auto_releases() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(5.0, 1.0, 2.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 3, 0.5);
        assert!(s.is_charging());
        ticks(&mut s, 1, 0.5);
        assert!(!s.is_charging());
        assert_eq!(calls(&log), vec!["hold", "release 2.00"]);
        assert!(!s.slot(ModDirection::Left).usable());
    }

    #[test]
    fn test_max_hold_time_caps_at_max_charge() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(1.0, 0.0, 2.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 20, 0.1);
        assert!(!s.is_charging());
        assert_eq!(calls(&log), vec!["hold", "release 1.00"]);
    }

    #[test]
    fn test_hold_survives_until_full_max_hold_time() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(5.0, 0.0, 1.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 1, 0.99995);
        assert!(s.is_charging());
        ticks(&mut s, 1, 0.0001);
        assert!(!s.is_charging());
    }

    #[test]
    fn test_cooldown_not_usable_before_full_duration() {
        let log = CallLog::default();
        let mut s = ModScheduler::new([click(&log, 1.0), None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 1, 0.99995);
        assert!(!s.slot(ModDirection::Left).usable());
        ticks(&mut s, 1, 0.0001);
        assert!(s.slot(ModDirection::Left).usable());
    }

    #[test]
    fn test_timeout_suspended_by_capability() {
        let log = CallLog::default();
        let (hold_slot, suspend) = hold(&log, ModDescriptor::new(10.0, 0.0, 1.0));
        let mut s = ModScheduler::new([None, hold_slot, None, None], events());
        assert_eq!(s.selected(), Some(ModDirection::Up));

        s.activate(true, true);
        suspend.set(true);
        ticks(&mut s, 8, 0.5);
        assert!(s.is_charging());
        assert_eq!(s.hold_time_remaining(), Some(1.0));

        suspend.set(false);
        ticks(&mut s, 2, 0.5);
        assert!(!s.is_charging());
        assert_eq!(calls(&log), vec!["hold", "release 5.00"]);
    }

    #[test]
    fn test_release_cancels_armed_timeout() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(5.0, 0.0, 2.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());

        s.activate(true, true);
        ticks(&mut s, 3, 0.5);
        s.activate(false, false);
        assert_eq!(s.hold_time_remaining(), None);

        // Second hold gets a fresh 2s budget
        s.activate(true, true);
        ticks(&mut s, 3, 0.5);
        assert!(s.is_charging());
        assert_eq!(s.hold_time_remaining(), Some(0.5));
    }

    #[test]
    fn test_selection_locked_while_charging() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(3.0, 0.0, 0.0));
        let mut s = ModScheduler::new([hold_slot, click(&log, 0.0), None, None], events());

        s.activate(true, true);
        let outcome = s.select_mod(ModDirection::Up);
        assert_eq!(outcome, SelectOutcome::Locked);
        assert!(outcome.handled());
        assert_eq!(s.selected(), Some(ModDirection::Left));

        ticks(&mut s, 1, 0.5);
        s.activate(false, false);
        assert_eq!(s.select_mod(ModDirection::Up), SelectOutcome::Switched);
    }

    #[test]
    fn test_select_rejections() {
        let log = CallLog::default();
        let mut s = ModScheduler::new([click(&log, 0.0), None, None, None], events());
        let empty = s.select_mod(ModDirection::Down);
        assert_eq!(empty, SelectOutcome::Rejected(IgnoreReason::NoSuchMod));
        assert!(!empty.handled());
        assert_eq!(
            s.select_mod(ModDirection::Left),
            SelectOutcome::Rejected(IgnoreReason::AlreadySelected)
        );
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_switch_emits_deselect_then_switch() {
        let log = CallLog::default();
        let mut s = ModScheduler::new(
            [None, click(&log, 0.0), None, click(&log, 0.0)],
            events(),
        );
        assert_eq!(s.selected(), Some(ModDirection::Up));
        s.select_mod(ModDirection::Down);
        assert_eq!(
            s.drain_events(),
            vec![
                ModEvent::ModDeselected(ModDirection::Up),
                ModEvent::ModSwitched(ModDirection::Down),
            ]
        );
    }

    #[test]
    fn test_no_mods_bound() {
        let mut s: ModScheduler = ModScheduler::new([None, None, None, None], events());
        assert_eq!(s.selected(), None);
        for dir in ModDirection::ALL {
            assert!(!s.slot(dir).usable());
            s.set_usable(dir, true);
            assert!(!s.slot(dir).usable());
            assert!(!s.select_mod(dir).handled());
        }
        assert_eq!(
            s.activate(true, true),
            ActivateOutcome::Ignored(IgnoreReason::NoModSelected)
        );
        ticks(&mut s, 5, 0.5);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_passives_run_regardless_of_selection() {
        let log = CallLog::default();
        let mut s = ModScheduler::new(
            [
                click(&log, 0.0),
                Some(ModBinding::new(
                    ModCapability::passive(TestPassive(log.clone())),
                    ModDescriptor::default(),
                )),
                None,
                Some(ModBinding::new(
                    ModCapability::passive(TestPassive(log.clone())),
                    ModDescriptor::default(),
                )),
            ],
            events(),
        );
        ticks(&mut s, 2, 0.5);
        assert_eq!(calls(&log), vec!["passive"; 4]);

        s.select_mod(ModDirection::Up);
        assert_eq!(
            s.activate(true, true),
            ActivateOutcome::Ignored(IgnoreReason::PassiveMod)
        );
    }

    #[test]
    fn test_lockout_and_block() {
        let log = CallLog::default();
        let mut s = ModScheduler::new([click(&log, 0.0), None, None, None], events());

        s.set_usable(ModDirection::Left, false);
        assert_eq!(
            s.activate(true, true),
            ActivateOutcome::Ignored(IgnoreReason::Unusable)
        );
        s.set_usable(ModDirection::Left, true);

        s.set_blocked(true);
        assert_eq!(
            s.activate(true, true),
            ActivateOutcome::Ignored(IgnoreReason::Blocked)
        );
        s.set_blocked(false);
        assert_eq!(s.activate(true, true), ActivateOutcome::Clicked);
        assert_eq!(calls(&log), vec!["click"]);
    }

    #[test]
    fn test_release_honoured_while_blocked() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(3.0, 0.0, 0.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 1, 0.5);
        s.set_blocked(true);
        assert_eq!(
            s.activate(false, false),
            ActivateOutcome::Released { charge: 0.5 }
        );
    }

    #[test]
    fn test_release_without_charge_keeps_holding() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(3.0, 0.0, 0.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        assert_eq!(
            s.activate(false, false),
            ActivateOutcome::Ignored(IgnoreReason::NoCharge)
        );
        assert!(s.is_charging());
    }

    #[test]
    fn test_chargeless_hold_releases_immediately() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(0.0, 0.0, 0.0));
        let mut s = ModScheduler::new([hold_slot, None, None, None], events());
        s.activate(true, true);
        ticks(&mut s, 2, 0.5);
        assert_eq!(s.current_charge(), 0.0);
        assert_eq!(
            s.activate(false, false),
            ActivateOutcome::Released { charge: 0.0 }
        );
    }

    #[test]
    fn test_force_release() {
        let log = CallLog::default();
        let (hold_slot, _) = hold(&log, ModDescriptor::new(3.0, 1.0, 0.0));
        let mut s = ModScheduler::new([click(&log, 0.0), None, hold_slot, None], events());

        let dir = s.direction_of("test_hold");
        assert_eq!(dir, Some(ModDirection::Right));
        assert_eq!(
            s.force_release(ModDirection::Right),
            ActivateOutcome::Ignored(IgnoreReason::NotHolding)
        );

        s.select_mod(ModDirection::Right);
        s.activate(true, true);
        ticks(&mut s, 2, 0.5);
        assert_eq!(
            s.force_release(ModDirection::Left),
            ActivateOutcome::Ignored(IgnoreReason::NotHolding)
        );
        assert_eq!(
            s.force_release(ModDirection::Right),
            ActivateOutcome::Released { charge: 1.0 }
        );
        assert!(!s.is_charging());
        assert_eq!(s.current_charge(), 0.0);
        assert!(!s.slot(ModDirection::Right).usable());
    }
}
