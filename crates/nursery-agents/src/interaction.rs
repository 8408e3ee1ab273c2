//! Pairwise rules between co-located children.
//!
//! The driver builds one [`Participant`] view per agent, then calls
//! [`resolve_interactions`]. The scan reads only the views, which are a
//! snapshot taken before any delta lands, and sums every rule's effect
//! into a per-agent [`MoodDelta`]. The caller applies the totals
//! afterwards, so the outcome never depends on the order of the input.
//!
//! Rules:
//!
//! - **Contagion**: every child near a contagious crier loses comfort,
//!   more so if an infant or already uncomfortable.
//! - **Fighting / cooperating**: two children both engaged in an activity
//!   fight (both lose comfort) if either is mischievous, otherwise they
//!   play together (both lose boredom and some mischief).
//! - **Bullying**: in a pair with exactly one child-tier member, a
//!   mischievous older child wears down the younger one's comfort and
//!   trust.

use std::collections::{BTreeMap, BTreeSet};

use nursery_types::{AgeTier, AgentId, RoomId};
use serde::{Deserialize, Serialize};

use crate::config::InteractionConfig;
use crate::emotion::MoodDelta;
use crate::situation::Position;

/// Read-only view of one agent for the interaction scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
    /// Agent identifier.
    pub id: AgentId,
    /// Room the agent is in.
    pub room: RoomId,
    /// Position inside the room, if known.
    pub position: Option<Position>,
    /// Age tier.
    pub age_tier: AgeTier,
    /// Mischief at the start of the scan.
    pub mischief: f32,
    /// Comfort at the start of the scan.
    pub comfort: f32,
    /// Whether the agent is engaged in an activity.
    pub engaged: bool,
}

/// Which rule produced an [`Encounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    /// A crier upset a bystander.
    Contagion,
    /// Two engaged children fought.
    Fight,
    /// Two engaged children played together.
    Cooperate,
    /// A child bullied a younger one.
    Bully,
}

/// One rule firing between two agents.
///
/// For directed rules, `source` is the crier or bully and `target` the one
/// affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Rule that fired.
    pub kind: EncounterKind,
    /// Initiating agent (lower id for symmetric rules).
    pub source: AgentId,
    /// Affected agent (higher id for symmetric rules).
    pub target: AgentId,
}

/// Result of one interaction scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionOutcome {
    /// Summed deltas per agent, to be applied after the scan.
    pub deltas: BTreeMap<AgentId, MoodDelta>,
    /// Every rule that fired, in scan order.
    pub encounters: Vec<Encounter>,
}

impl InteractionOutcome {
    fn add(&mut self, id: AgentId, delta: MoodDelta) {
        *self.deltas.entry(id).or_default() += delta;
    }
}

impl Participant {
    /// Whether `other` is co-located with this participant.
    ///
    /// Sharing a room is required. When both report a position they must
    /// also be within `radius`; otherwise the room alone counts.
    pub fn is_near(&self, other: &Self, radius: f32) -> bool {
        if self.room != other.room {
            return false;
        }
        match (self.position, other.position) {
            (Some(a), Some(b)) => a.distance(b) <= radius,
            _ => true,
        }
    }
}

/// Comfort lost by `bystander` when someone in the room cries.
fn contagion_loss(bystander: &Participant, cfg: &InteractionConfig) -> f32 {
    let base = if bystander.age_tier == AgeTier::Infant {
        cfg.contagion_infant_comfort_loss
    } else {
        cfg.contagion_comfort_loss
    };
    if bystander.comfort < cfg.low_comfort_threshold {
        base + cfg.contagion_low_comfort_extra
    } else {
        base
    }
}

/// Run every interaction rule over `participants`.
///
/// `criers` lists the agents that started crying contagiously this tick;
/// ids without a matching participant are ignored. Duplicate participant
/// ids keep only the first occurrence.
pub fn resolve_interactions(
    participants: &[Participant],
    criers: &BTreeSet<AgentId>,
    dt: f32,
    cfg: &InteractionConfig,
) -> InteractionOutcome {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let mut ordered: Vec<&Participant> = participants.iter().collect();
    ordered.sort_by_key(|p| p.id);
    ordered.dedup_by_key(|p| p.id);

    let mut outcome = InteractionOutcome::default();

    for crier in &ordered {
        if !criers.contains(&crier.id) {
            continue;
        }
        for bystander in &ordered {
            if bystander.id == crier.id || !crier.is_near(bystander, cfg.proximity_radius) {
                continue;
            }
            outcome.add(
                bystander.id,
                MoodDelta {
                    comfort: -contagion_loss(bystander, cfg),
                    ..MoodDelta::ZERO
                },
            );
            outcome.encounters.push(Encounter {
                kind: EncounterKind::Contagion,
                source: crier.id,
                target: bystander.id,
            });
        }
    }

    for (i, a) in ordered.iter().enumerate() {
        for b in ordered.iter().skip(i + 1) {
            if !a.is_near(b, cfg.proximity_radius) {
                continue;
            }

            if a.engaged && b.engaged {
                let fighting = a.mischief > cfg.fight_mischief_threshold
                    || b.mischief > cfg.fight_mischief_threshold;
                let (kind, delta) = if fighting {
                    (
                        EncounterKind::Fight,
                        MoodDelta {
                            comfort: -cfg.fight_comfort_loss_per_second * dt,
                            ..MoodDelta::ZERO
                        },
                    )
                } else {
                    (
                        EncounterKind::Cooperate,
                        MoodDelta {
                            boredom: -cfg.cooperate_boredom_relief_per_second * dt,
                            mischief: -cfg.cooperate_mischief_relief_per_second * dt,
                            ..MoodDelta::ZERO
                        },
                    )
                };
                outcome.add(a.id, delta);
                outcome.add(b.id, delta);
                outcome.encounters.push(Encounter {
                    kind,
                    source: a.id,
                    target: b.id,
                });
            }

            let bully_pair = match (a.age_tier == AgeTier::Child, b.age_tier == AgeTier::Child) {
                (true, false) => Some((a, b)),
                (false, true) => Some((b, a)),
                _ => None,
            };
            if let Some((bully, victim)) = bully_pair
                && bully.mischief > cfg.bully_mischief_threshold
            {
                outcome.add(
                    victim.id,
                    MoodDelta {
                        comfort: -cfg.bully_comfort_loss_per_second * dt,
                        trust: -cfg.bully_trust_loss_per_second * dt,
                        ..MoodDelta::ZERO
                    },
                );
                outcome.encounters.push(Encounter {
                    kind: EncounterKind::Bully,
                    source: bully.id,
                    target: victim.id,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn kid(id: u32, tier: AgeTier) -> Participant {
        Participant {
            id: AgentId::new(id),
            room: RoomId::new(1),
            position: None,
            age_tier: tier,
            mischief: 0.1,
            comfort: 0.8,
            engaged: false,
        }
    }

    fn delta_of(outcome: &InteractionOutcome, id: u32) -> MoodDelta {
        outcome
            .deltas
            .get(&AgentId::new(id))
            .copied()
            .unwrap_or_default()
    }

    #[test]
    fn mischievous_players_fight() {
        let mut a = kid(0, AgeTier::Child);
        let mut b = kid(1, AgeTier::Child);
        a.engaged = true;
        b.engaged = true;
        a.mischief = 0.8;
        let cfg = InteractionConfig::default();
        let outcome = resolve_interactions(&[a, b], &BTreeSet::new(), 1.0, &cfg);
        assert!(delta_of(&outcome, 0).comfort < 0.0);
        assert!(delta_of(&outcome, 1).comfort < 0.0);
        assert!(outcome
            .encounters
            .iter()
            .any(|e| e.kind == EncounterKind::Fight));
    }

    #[test]
    fn calm_players_cooperate() {
        let mut a = kid(0, AgeTier::Toddler);
        let mut b = kid(1, AgeTier::Toddler);
        a.engaged = true;
        b.engaged = true;
        let cfg = InteractionConfig::default();
        let outcome = resolve_interactions(&[a, b], &BTreeSet::new(), 2.0, &cfg);
        for id in [0, 1] {
            let d = delta_of(&outcome, id);
            assert!((d.boredom + cfg.cooperate_boredom_relief_per_second * 2.0).abs() < 1e-6);
            assert!(d.mischief < 0.0);
            assert!(d.comfort.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn only_one_engaged_does_nothing() {
        let mut a = kid(0, AgeTier::Toddler);
        a.engaged = true;
        let b = kid(1, AgeTier::Toddler);
        let outcome =
            resolve_interactions(&[a, b], &BTreeSet::new(), 1.0, &InteractionConfig::default());
        assert!(outcome.deltas.is_empty());
        assert!(outcome.encounters.is_empty());
    }

    #[test]
    fn child_bullies_younger_sibling() {
        let mut bully = kid(3, AgeTier::Child);
        bully.mischief = 0.9;
        let toddler = kid(1, AgeTier::Toddler);
        let cfg = InteractionConfig::default();
        let outcome = resolve_interactions(&[bully, toddler], &BTreeSet::new(), 1.0, &cfg);
        let victim = delta_of(&outcome, 1);
        assert!(victim.comfort < 0.0);
        assert!(victim.trust < 0.0);
        assert!(delta_of(&outcome, 3).is_zero());
        assert_eq!(
            outcome.encounters,
            vec![Encounter {
                kind: EncounterKind::Bully,
                source: AgentId::new(3),
                target: AgentId::new(1),
            }]
        );
    }

    #[test]
    fn two_children_do_not_bully_each_other() {
        let mut a = kid(0, AgeTier::Child);
        let mut b = kid(1, AgeTier::Child);
        a.mischief = 0.9;
        b.mischief = 0.9;
        let outcome =
            resolve_interactions(&[a, b], &BTreeSet::new(), 1.0, &InteractionConfig::default());
        assert!(outcome.deltas.is_empty());
    }

    #[test]
    fn contagion_reaches_nearby_children_and_weights_infants() {
        let mut crier = kid(0, AgeTier::Toddler);
        crier.position = Some(Position::new(1.0, 1.0));
        let mut near_child = kid(1, AgeTier::Child);
        near_child.position = Some(Position::new(2.0, 1.0));
        let mut sad_infant = kid(2, AgeTier::Infant);
        sad_infant.comfort = 0.3;
        let mut elsewhere = kid(3, AgeTier::Child);
        elsewhere.room = RoomId::new(9);

        let cfg = InteractionConfig::default();
        let criers = BTreeSet::from([AgentId::new(0)]);
        let outcome = resolve_interactions(
            &[crier, near_child, sad_infant, elsewhere],
            &criers,
            0.1,
            &cfg,
        );

        assert!((delta_of(&outcome, 1).comfort + cfg.contagion_comfort_loss).abs() < 1e-6);
        let expected = cfg.contagion_infant_comfort_loss + cfg.contagion_low_comfort_extra;
        assert!((delta_of(&outcome, 2).comfort + expected).abs() < 1e-6);
        assert!(delta_of(&outcome, 0).is_zero());
        assert!(delta_of(&outcome, 3).is_zero());
    }

    #[test]
    fn crying_across_the_room_does_not_spread() {
        let mut crier = kid(0, AgeTier::Toddler);
        crier.position = Some(Position::new(0.0, 0.0));
        let mut far_child = kid(1, AgeTier::Child);
        far_child.position = Some(Position::new(100.0, 0.0));

        let criers = BTreeSet::from([AgentId::new(0)]);
        let outcome = resolve_interactions(
            &[crier, far_child],
            &criers,
            0.1,
            &InteractionConfig::default(),
        );
        assert!(delta_of(&outcome, 1).is_zero());
        assert!(outcome.encounters.is_empty());
    }

    #[test]
    fn unknown_crier_is_ignored() {
        let criers = BTreeSet::from([AgentId::new(42)]);
        let outcome = resolve_interactions(
            &[kid(0, AgeTier::Child), kid(1, AgeTier::Child)],
            &criers,
            1.0,
            &InteractionConfig::default(),
        );
        assert!(outcome.deltas.is_empty());
    }

    #[test]
    fn radius_applies_only_when_both_positioned() {
        let mut a = kid(0, AgeTier::Child);
        let mut b = kid(1, AgeTier::Child);
        a.engaged = true;
        b.engaged = true;
        a.position = Some(Position::new(0.0, 0.0));
        b.position = Some(Position::new(5.0, 0.0));
        let cfg = InteractionConfig::default();
        let apart = resolve_interactions(&[a, b], &BTreeSet::new(), 1.0, &cfg);
        assert!(apart.encounters.is_empty());

        b.position = None;
        let unknown = resolve_interactions(&[a, b], &BTreeSet::new(), 1.0, &cfg);
        assert_eq!(unknown.encounters.len(), 1);
    }

    fn arb_participant() -> impl Strategy<Value = Participant> {
        (
            0_u32..6,
            0_u32..2,
            prop::option::of((0.0_f32..6.0, 0.0_f32..6.0)),
            prop::sample::select(AgeTier::ALL.to_vec()),
            0.0_f32..=1.0,
            0.0_f32..=1.0,
            any::<bool>(),
        )
            .prop_map(|(id, room, pos, tier, mischief, comfort, engaged)| Participant {
                id: AgentId::new(id),
                room: RoomId::new(room),
                position: pos.map(|(x, y)| Position::new(x, y)),
                age_tier: tier,
                mischief,
                comfort,
                engaged,
            })
    }

    proptest! {
        #[test]
        fn outcome_is_independent_of_input_order(
            people in prop::collection::vec(arb_participant(), 0..8),
            crier_ids in prop::collection::btree_set(0_u32..6, 0..3),
        ) {
            // Distinct ids so that deduplication cannot pick differently.
            let mut people = people;
            people.sort_by_key(|p| p.id);
            people.dedup_by_key(|p| p.id);

            let criers: BTreeSet<AgentId> = crier_ids.into_iter().map(AgentId::new).collect();
            let cfg = InteractionConfig::default();
            let forward = resolve_interactions(&people, &criers, 0.5, &cfg);
            let mut reversed = people.clone();
            reversed.reverse();
            let backward = resolve_interactions(&reversed, &criers, 0.5, &cfg);
            prop_assert_eq!(forward, backward);
        }
    }
}
