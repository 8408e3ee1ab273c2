//! A small, reusable hierarchical state-machine engine.
//!
//! A state type implements [`MachineState`]: it declares a static table of
//! guarded [`Transition`]s per state and optional enter/update/exit hooks.
//! A [`StateMachine`] tracks the current state and the time spent in it.
//!
//! Each call to [`StateMachine::update`]:
//!
//! 1. Advances time-in-state by `dt`.
//! 2. Evaluates the current state's guards. The highest priority guard
//!    that holds wins; among equal priorities the one declared first wins.
//! 3. If a transition fires, the old state's exit hook runs, then the new
//!    state's enter hook, and time-in-state resets to zero. The new
//!    state's update hook does **not** run on this tick.
//! 4. Otherwise the current state's update hook runs.
//!
//! Nesting is done by storing another [`StateMachine`] inside the context
//! and driving it from a parent state's update hook.

use core::fmt::Debug;

/// A guarded edge out of a state.
pub struct Transition<S: MachineState> {
    /// State to move to when the guard holds.
    pub target: S,
    /// Higher fires first.
    pub priority: u8,
    /// Pure predicate over the context and the current time-in-state.
    pub guard: fn(&S::Context, f32) -> bool,
}

/// A state of a [`StateMachine`].
pub trait MachineState: Copy + Eq + Debug + 'static {
    /// Data the hooks and guards operate on.
    type Context;

    /// Outgoing transitions of this state, in declaration order.
    fn transitions(self) -> &'static [Transition<Self>];

    /// Runs when the machine enters this state.
    fn on_enter(self, _ctx: &mut Self::Context) {}

    /// Runs on every tick spent in this state, except the tick it was entered.
    fn on_update(self, _ctx: &mut Self::Context, _dt: f32) {}

    /// Runs when the machine leaves this state.
    fn on_exit(self, _ctx: &mut Self::Context) {}
}

/// A transition that fired during [`StateMachine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitioned<S> {
    /// State that was left.
    pub from: S,
    /// State that was entered.
    pub to: S,
}

/// Current state plus time spent in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateMachine<S: MachineState> {
    current: S,
    previous: Option<S>,
    time_in_state: f32,
}

impl<S: MachineState> StateMachine<S> {
    /// Start a machine in `initial`, running its enter hook.
    pub fn start(initial: S, ctx: &mut S::Context) -> Self {
        initial.on_enter(ctx);
        Self {
            current: initial,
            previous: None,
            time_in_state: 0.0,
        }
    }

    /// Rebuild a machine mid-flight without running any hook.
    ///
    /// Used when restoring from a snapshot: the context already reflects
    /// whatever the enter hook did originally.
    pub fn resume(current: S, time_in_state: f32) -> Self {
        let time_in_state = if time_in_state.is_finite() {
            time_in_state.max(0.0)
        } else {
            0.0
        };
        Self {
            current,
            previous: None,
            time_in_state,
        }
    }

    /// The state the machine is in.
    pub const fn current(&self) -> S {
        self.current
    }

    /// The state before the most recent transition, if any.
    pub const fn previous(&self) -> Option<S> {
        self.previous
    }

    /// Seconds spent in the current state.
    pub const fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Advance by `dt` seconds and fire at most one transition.
    ///
    /// A negative or non-finite `dt` advances nothing but still evaluates
    /// the guards.
    pub fn update(&mut self, ctx: &mut S::Context, dt: f32) -> Option<Transitioned<S>> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time_in_state += dt;

        let mut chosen: Option<&Transition<S>> = None;
        for transition in self.current.transitions() {
            if chosen.is_none_or(|best| transition.priority > best.priority)
                && (transition.guard)(ctx, self.time_in_state)
            {
                chosen = Some(transition);
            }
        }

        if let Some(transition) = chosen {
            let from = self.current;
            let to = transition.target;
            from.on_exit(ctx);
            self.previous = Some(from);
            self.current = to;
            self.time_in_state = 0.0;
            to.on_enter(ctx);
            return Some(Transitioned { from, to });
        }

        self.current.on_update(ctx, dt);
        None
    }
}
