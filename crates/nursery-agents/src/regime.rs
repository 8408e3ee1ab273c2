//! The five behavioral regimes and the nested tantrum machine.
//!
//! [`Regime`] and [`TantrumPhase`] implement [`MachineState`] over a shared
//! [`AgentContext`]. Guards only read the context. Hooks choose actions
//! through the selector and push outbound signals into the context's
//! outbox, which the owning [`Agent`](crate::agent::Agent) drains.
//!
//! | From     | To       | Priority | Guard                                                |
//! |----------|----------|----------|------------------------------------------------------|
//! | Sleeping | Content  | 1        | fatigue < `wake_fatigue`                             |
//! | Sleeping | Needy    | 2        | hunger > `wake_hunger`                               |
//! | Content  | Needy    | 1        | `has_urgent_need(content_urgent_threshold)`          |
//! | Content  | Sleeping | 2        | fatigue > `content_sleep_fatigue`                    |
//! | Needy    | Content  | 1        | not `has_urgent_need(needy_settle_threshold)`        |
//! | Needy    | Upset    | 2        | `is_critical` or trust < `needy_trust_floor`         |
//! | Upset    | Needy    | 1        | trust > `upset_recover_trust` and not `is_critical`  |
//! | Upset    | Tantrum  | 2        | time > `upset_timeout_seconds` or hungry and tired   |
//! | Tantrum  | Upset    | 1        | time > `tantrum_timeout_seconds` or exhausted        |
//! | Tantrum  | Sleeping | 2        | fatigue > `tantrum_collapse_fatigue`                 |

use std::sync::Arc;

use nursery_types::{Action, EventKind, Personality, Regime, TantrumPhase};

use crate::config::BehaviorConfig;
use crate::emotion::EmotionalState;
use crate::machine::{MachineState, StateMachine, Transition};
use crate::selector::select_action;
use crate::situation::Situation;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Progress of an ongoing tantrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TantrumState {
    /// Nested phase machine.
    pub(crate) phase: StateMachine<TantrumPhase>,
    /// Seconds since the tantrum began.
    pub(crate) elapsed: f32,
    /// Seconds since the last tantrum-tick signal.
    pub(crate) tick_timer: f32,
}

impl TantrumState {
    /// Current phase.
    pub const fn phase(&self) -> TantrumPhase {
        self.phase.current()
    }

    /// Seconds since the tantrum began.
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Everything the regime machine reads and writes for one agent.
///
/// Owned by exactly one [`Agent`](crate::agent::Agent). Other agents never
/// touch it; cross-agent effects arrive as deltas through
/// [`EmotionalState::apply`].
#[derive(Debug, Clone)]
pub struct AgentContext {
    pub(crate) mood: EmotionalState,
    pub(crate) personality: Personality,
    pub(crate) situation: Situation,
    pub(crate) action: Action,
    /// Seconds since the selector last ran in the current regime.
    pub(crate) since_evaluation: f32,
    pub(crate) tantrum: Option<TantrumState>,
    pub(crate) config: Arc<BehaviorConfig>,
    pub(crate) outbox: Vec<EventKind>,
}

impl AgentContext {
    /// Build a context. The action starts as `Sleep` until the first
    /// regime's enter hook picks one.
    pub(crate) const fn new(
        mood: EmotionalState,
        personality: Personality,
        situation: Situation,
        config: Arc<BehaviorConfig>,
    ) -> Self {
        Self {
            mood,
            personality,
            situation,
            action: Action::Sleep,
            since_evaluation: 0.0,
            tantrum: None,
            config,
            outbox: Vec::new(),
        }
    }

    /// Switch to `action`, emitting a signal only if it actually changed.
    fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.outbox.push(EventKind::ActionChanged {
                from: self.action,
                to: action,
            });
            self.action = action;
        }
    }

    /// Run the selector for `regime` and adopt its choice.
    fn reselect(&mut self, regime: Regime) {
        self.since_evaluation = 0.0;
        let action = select_action(regime, &self.mood, &self.personality, &self.situation);
        self.set_action(action);
    }

    /// Advance the re-evaluation timer and reselect when it expires.
    fn tick_reevaluation(&mut self, regime: Regime, interval: f32, dt: f32) {
        self.since_evaluation += dt;
        if self.since_evaluation >= interval {
            self.reselect(regime);
        }
    }

    /// Drive the nested tantrum machine and the periodic tantrum tick.
    fn tick_tantrum(&mut self, dt: f32) {
        let Some(mut tantrum) = self.tantrum.take() else {
            return;
        };
        tantrum.phase.update(self, dt);
        tantrum.elapsed += dt;
        tantrum.tick_timer += dt;
        let interval = self.config.regime.tantrum_tick_seconds;
        while interval > 0.0 && tantrum.tick_timer >= interval {
            tantrum.tick_timer -= interval;
            self.outbox.push(EventKind::TantrumTick {
                elapsed_seconds: tantrum.elapsed,
            });
        }
        self.tantrum = Some(tantrum);
    }
}

// ---------------------------------------------------------------------------
// Regime transitions
// ---------------------------------------------------------------------------

const SLEEPING: &[Transition<Regime>] = &[
    Transition {
        target: Regime::Content,
        priority: 1,
        guard: |ctx, _| ctx.mood.fatigue() < ctx.config.regime.wake_fatigue,
    },
    Transition {
        target: Regime::Needy,
        priority: 2,
        guard: |ctx, _| ctx.mood.hunger() > ctx.config.regime.wake_hunger,
    },
];

const CONTENT: &[Transition<Regime>] = &[
    Transition {
        target: Regime::Needy,
        priority: 1,
        guard: |ctx, _| {
            ctx.mood
                .has_urgent_need(ctx.config.regime.content_urgent_threshold)
        },
    },
    Transition {
        target: Regime::Sleeping,
        priority: 2,
        guard: |ctx, _| ctx.mood.fatigue() > ctx.config.regime.content_sleep_fatigue,
    },
];

const NEEDY: &[Transition<Regime>] = &[
    Transition {
        target: Regime::Content,
        priority: 1,
        guard: |ctx, _| {
            !ctx.mood
                .has_urgent_need(ctx.config.regime.needy_settle_threshold)
        },
    },
    Transition {
        target: Regime::Upset,
        priority: 2,
        guard: |ctx, _| {
            let cfg = &ctx.config.regime;
            ctx.mood.is_critical(cfg.critical_threshold) || ctx.mood.trust() < cfg.needy_trust_floor
        },
    },
];

const UPSET: &[Transition<Regime>] = &[
    Transition {
        target: Regime::Needy,
        priority: 1,
        guard: |ctx, _| {
            let cfg = &ctx.config.regime;
            ctx.mood.trust() > cfg.upset_recover_trust && !ctx.mood.is_critical(cfg.critical_threshold)
        },
    },
    Transition {
        target: Regime::Tantrum,
        priority: 2,
        guard: |ctx, time| {
            let cfg = &ctx.config.regime;
            time > cfg.upset_timeout_seconds
                || (ctx.mood.hunger() > cfg.meltdown_hunger && ctx.mood.fatigue() > cfg.meltdown_fatigue)
        },
    },
];

const TANTRUM: &[Transition<Regime>] = &[
    Transition {
        target: Regime::Upset,
        priority: 1,
        guard: |ctx, time| {
            let cfg = &ctx.config.regime;
            time > cfg.tantrum_timeout_seconds || ctx.mood.fatigue() > cfg.tantrum_exhausted_fatigue
        },
    },
    Transition {
        target: Regime::Sleeping,
        priority: 2,
        guard: |ctx, _| ctx.mood.fatigue() > ctx.config.regime.tantrum_collapse_fatigue,
    },
];

impl MachineState for Regime {
    type Context = AgentContext;

    fn transitions(self) -> &'static [Transition<Self>] {
        match self {
            Self::Sleeping => SLEEPING,
            Self::Content => CONTENT,
            Self::Needy => NEEDY,
            Self::Upset => UPSET,
            Self::Tantrum => TANTRUM,
        }
    }

    fn on_enter(self, ctx: &mut AgentContext) {
        ctx.reselect(self);
        if self == Self::Tantrum {
            ctx.outbox.push(EventKind::TantrumEntered { action: ctx.action });
            let phase = StateMachine::start(TantrumPhase::Building, ctx);
            ctx.tantrum = Some(TantrumState {
                phase,
                elapsed: 0.0,
                tick_timer: 0.0,
            });
        }
    }

    fn on_update(self, ctx: &mut AgentContext, dt: f32) {
        match self {
            Self::Content => {
                let interval = ctx.config.selector.content_reevaluate_seconds;
                ctx.tick_reevaluation(self, interval, dt);
            }
            Self::Needy => {
                let interval = ctx.config.selector.needy_reevaluate_seconds;
                ctx.tick_reevaluation(self, interval, dt);
            }
            Self::Tantrum => ctx.tick_tantrum(dt),
            Self::Sleeping | Self::Upset => {}
        }
    }

    fn on_exit(self, ctx: &mut AgentContext) {
        if self == Self::Tantrum {
            ctx.tantrum = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tantrum phases
// ---------------------------------------------------------------------------

const BUILDING: &[Transition<TantrumPhase>] = &[Transition {
    target: TantrumPhase::ContagiousCrying,
    priority: 1,
    guard: |ctx, time| {
        ctx.action.is_audible_tantrum() && time >= ctx.config.regime.contagion_onset_seconds
    },
}];

impl MachineState for TantrumPhase {
    type Context = AgentContext;

    fn transitions(self) -> &'static [Transition<Self>] {
        match self {
            Self::Building => BUILDING,
            Self::ContagiousCrying => &[],
        }
    }

    fn on_enter(self, ctx: &mut AgentContext) {
        if self == Self::ContagiousCrying {
            ctx.outbox.push(EventKind::ContagiousCry);
        }
    }
}
