//! End-to-end household scenarios driven through the public tick cycle.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::Arc;

use nursery_agents::{
    Agent, BehaviorConfig, EmotionalState, EncounterKind, MoodConfig, Population, Profile,
    Situation,
};
use nursery_core::{
    SimClock, SimulationState, SituationSource, SourceError, StaticSituation, TickSummary,
    run_tick,
};
use nursery_types::{AgeTier, AgentId, EventKind, Food, Personality, Regime, RoomId};
use proptest::prelude::*;

const STEP: f32 = 0.5;

fn frozen() -> Arc<BehaviorConfig> {
    Arc::new(BehaviorConfig {
        mood: MoodConfig::frozen(),
        ..BehaviorConfig::default()
    })
}

fn child(
    index: u32,
    tier: AgeTier,
    mood: EmotionalState,
    situation: Situation,
    config: &Arc<BehaviorConfig>,
) -> Agent {
    Agent::new(
        AgentId::new(index),
        Profile {
            personality: Personality::balanced(tier),
            mood,
        },
        situation,
        Arc::clone(config),
    )
}

fn household(agents: Vec<Agent>, config: Arc<BehaviorConfig>) -> SimulationState {
    let mut population = Population::new();
    for agent in agents {
        population.insert(agent).unwrap();
    }
    SimulationState::new(SimClock::new(STEP).unwrap(), population, config)
}

fn calm() -> EmotionalState {
    EmotionalState::new(0.2, 0.2, 0.3, 0.6, 0.1, 0.8)
}

/// Hungry and exhausted enough to melt down straight out of sleep.
fn meltdown() -> EmotionalState {
    EmotionalState::new(0.95, 0.2, 0.85, 0.6, 0.1, 0.8)
}

fn tick(state: &mut SimulationState) -> TickSummary {
    run_tick(state, &mut StaticSituation::new()).unwrap()
}

#[test]
fn mischievous_playmates_fight() {
    let config = frozen();
    let mut playing = Situation::in_room(RoomId::new(2));
    playing.playing = true;
    let mut state = household(
        vec![
            child(0, AgeTier::Child, calm(), playing, &config),
            child(1, AgeTier::Child, calm().with_mischief(0.8), playing, &config),
        ],
        config,
    );

    let summary = tick(&mut state);
    assert!(
        summary
            .encounters
            .iter()
            .any(|e| e.kind == EncounterKind::Fight)
    );
    for agent in state.population.iter() {
        assert!(agent.mood().comfort() < 0.8, "{} kept its comfort", agent.id());
    }
}

#[test]
fn tantrum_subsides_within_one_tick_of_timeout() {
    let config = frozen();
    let mut state = household(
        vec![child(
            0,
            AgeTier::Toddler,
            meltdown(),
            Situation::in_room(RoomId::new(0)),
            &config,
        )],
        config,
    );
    assert_eq!(state.population.get(AgentId::new(0)).unwrap().regime(), Regime::Sleeping);

    let mut entered = None;
    let mut left = None;
    for _ in 0..400 {
        let summary = tick(&mut state);
        for event in &summary.events {
            match event.kind {
                EventKind::RegimeChanged {
                    to: Regime::Tantrum,
                    ..
                } if entered.is_none() => entered = Some(summary.tick),
                EventKind::RegimeChanged {
                    from: Regime::Tantrum,
                    to,
                } if left.is_none() => {
                    assert_eq!(to, Regime::Upset);
                    left = Some(summary.tick);
                }
                _ => {}
            }
        }
        if left.is_some() {
            break;
        }
    }

    let ticks = left.unwrap() - entered.unwrap();
    let seconds = f64::from(u32::try_from(ticks).unwrap()) * f64::from(STEP);
    assert!(seconds > 45.0);
    assert!(seconds <= 45.0 + f64::from(STEP) + 1e-6);
}

#[test]
fn crying_upsets_the_roommate_only() {
    let config = frozen();
    let mut state = household(
        vec![
            child(
                0,
                AgeTier::Toddler,
                meltdown(),
                Situation::in_room(RoomId::new(0)),
                &config,
            ),
            child(1, AgeTier::Infant, calm(), Situation::in_room(RoomId::new(0)), &config),
            child(2, AgeTier::Child, calm(), Situation::in_room(RoomId::new(1)), &config),
        ],
        config,
    );

    let mut cried = false;
    for _ in 0..100 {
        let before = state.population.get(AgentId::new(1)).unwrap().mood().comfort();
        let summary = tick(&mut state);
        let cry = summary
            .events
            .iter()
            .any(|e| e.agent_id == AgentId::new(0) && e.kind == EventKind::ContagiousCry);
        if cry {
            cried = true;
            let contagion: Vec<_> = summary
                .encounters
                .iter()
                .filter(|e| e.kind == EncounterKind::Contagion)
                .collect();
            assert_eq!(contagion.len(), 1, "only the roommate is affected");
            assert_eq!(contagion[0].source, AgentId::new(0));
            assert_eq!(contagion[0].target, AgentId::new(1));
            let after = state.population.get(AgentId::new(1)).unwrap().mood().comfort();
            assert!(after < before);
        }
    }
    assert!(cried, "a screaming tantrum should turn contagious");
    let other_room = state.population.get(AgentId::new(2)).unwrap();
    assert!((other_room.mood().comfort() - 0.8).abs() < 1e-6);
}

/// Feeds any child that asks for food.
struct AttentiveParent {
    meals: u32,
}

impl SituationSource for AttentiveParent {
    fn prepare(
        &mut self,
        _tick: u64,
        _step_seconds: f32,
        population: &mut Population,
    ) -> Result<(), SourceError> {
        for agent in population.iter_mut() {
            if agent.regime() == Regime::Needy && agent.urgent_need() == nursery_types::Need::Hunger {
                agent.feed(Food::Fruit);
                self.meals += 1;
            }
        }
        Ok(())
    }
}

#[test]
fn feeding_a_needy_child_settles_them() {
    let config = frozen();
    let mut state = household(
        vec![child(
            0,
            AgeTier::Child,
            calm().with_hunger(0.75),
            Situation::in_room(RoomId::new(0)),
            &config,
        )],
        config,
    );
    let mut parent = AttentiveParent { meals: 0 };

    let first = run_tick(&mut state, &mut parent).unwrap();
    assert_eq!(first.count(Regime::Needy), 1);

    let second = run_tick(&mut state, &mut parent).unwrap();
    assert_eq!(parent.meals, 1);
    assert_eq!(second.count(Regime::Content), 1);
    assert!(second.events.iter().any(|e| e.kind
        == EventKind::RegimeChanged {
            from: Regime::Needy,
            to: Regime::Content
        }));
}

#[test]
fn restored_household_continues_identically() {
    let config = Arc::new(BehaviorConfig::default());
    let mut original = SimulationState::new(
        SimClock::new(STEP).unwrap(),
        Population::spawn(77, 6, 2, &config),
        Arc::clone(&config),
    );
    for _ in 0..120 {
        tick(&mut original);
    }

    let mut population = Population::new();
    for agent in original.population.iter() {
        let json = serde_json::to_string(&agent.snapshot()).unwrap();
        let snapshot = serde_json::from_str(&json).unwrap();
        population
            .insert(Agent::restore(&snapshot, Arc::clone(&config)).unwrap())
            .unwrap();
    }
    let mut restored = SimulationState::new(
        SimClock::from_parts(original.clock.tick(), STEP).unwrap(),
        population,
        config,
    );

    for _ in 0..300 {
        assert_eq!(tick(&mut original), tick(&mut restored));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn households_stay_bounded(seed in any::<u64>(), children in 1_u32..8, rooms in 1_u32..4) {
        let config = Arc::new(BehaviorConfig::default());
        let mut state = SimulationState::new(
            SimClock::new(STEP).unwrap(),
            Population::spawn(seed, children, rooms, &config),
            config,
        );
        for _ in 0..200 {
            let summary = tick(&mut state);
            prop_assert_eq!(summary.regime_counts.values().sum::<u32>(), children);
            for agent in state.population.iter() {
                for value in agent.mood().values() {
                    prop_assert!((0.0..=1.0).contains(&value));
                }
                prop_assert_eq!(agent.regime() == Regime::Tantrum, agent.tantrum_phase().is_some());
            }
        }
    }
}
