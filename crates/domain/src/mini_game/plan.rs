//! Turning validated inputs into a result or a simulation to run.

use serde::{Deserialize, Serialize};

use super::attempt::{AttemptOutcome, FailureReason};
use super::parameters::GameInputs;
use super::rules::MiniGameRules;
use crate::physics::{
    compute_projectile, friction_limited_acceleration, jump_apex_height, jump_launch_velocity,
    net_push_force, CollisionReport, Simulation, Trajectory,
};

/// Physics figures computed for an attempt, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptDetail {
    Projectile {
        trajectory: Trajectory,
        target_distance: f64,
    },
    Collision(CollisionReport),
    Push {
        net_force: f64,
        acceleration: Option<f64>,
    },
    Jump {
        launch_velocity: Option<f64>,
        apex_height: Option<f64>,
    },
    Fall {
        initial_height: f64,
    },
    /// Nothing was computed (input rejected)
    Rejected,
}

/// What the controller must do with an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptPlan {
    /// Closed-form game or physics refusal: the outcome is known now
    Resolved {
        outcome: AttemptOutcome,
        detail: AttemptDetail,
    },
    /// Step `simulation` until it finishes, then emit `on_finish`.
    ///
    /// The outcome is decided up front; stepping only produces frames.
    Simulate {
        simulation: Simulation,
        on_finish: AttemptOutcome,
        detail: AttemptDetail,
    },
}

impl AttemptPlan {
    pub fn detail(&self) -> &AttemptDetail {
        match self {
            Self::Resolved { detail, .. } | Self::Simulate { detail, .. } => detail,
        }
    }
}

/// Plan an attempt from validated inputs.
///
/// `draw_target` returns an integer in the inclusive range it is given and is
/// only called for the Knight's projectile game, once per attempt.
pub fn plan_attempt(
    inputs: &GameInputs,
    rules: &MiniGameRules,
    draw_target: impl FnOnce(i32, i32) -> i32,
) -> AttemptPlan {
    match *inputs {
        GameInputs::Projectile {
            velocity,
            angle_degrees,
            gravity,
        } => {
            let target = f64::from(draw_target(rules.target_min, rules.target_max));
            let trajectory = compute_projectile(velocity, angle_degrees, gravity);
            let difference = (trajectory.range - target).abs();
            let outcome = if difference <= rules.hit_tolerance {
                AttemptOutcome::Success {
                    damage: rules.knight_damage,
                }
            } else {
                AttemptOutcome::Failure(FailureReason::Missed {
                    target,
                    reached: trajectory.range,
                    difference,
                })
            };
            AttemptPlan::Resolved {
                outcome,
                detail: AttemptDetail::Projectile {
                    trajectory,
                    target_distance: target,
                },
            }
        }
        GameInputs::Collision {
            kind,
            mass1,
            velocity1,
            mass2,
            velocity2,
        } => AttemptPlan::Resolved {
            outcome: AttemptOutcome::Observed,
            detail: AttemptDetail::Collision(CollisionReport::compute(
                mass1, velocity1, mass2, velocity2, kind,
            )),
        },
        GameInputs::Push {
            force,
            mass,
            friction,
        } => {
            let gravity = rules.standard_gravity;
            let net_force = net_push_force(force, mass, friction, gravity);
            let acceleration = friction_limited_acceleration(force, mass, friction, gravity);
            let detail = AttemptDetail::Push {
                net_force,
                acceleration,
            };
            match acceleration {
                None => AttemptPlan::Resolved {
                    outcome: AttemptOutcome::Failure(FailureReason::InsufficientForce {
                        net_force,
                    }),
                    detail,
                },
                Some(acceleration) => AttemptPlan::Simulate {
                    simulation: Simulation::slide(
                        acceleration,
                        rules.archer_track_length,
                        rules.coarse_time_step,
                    ),
                    on_finish: AttemptOutcome::Success {
                        damage: rules.archer_damage,
                    },
                    detail,
                },
            }
        }
        GameInputs::Jump { force, mass } => {
            let gravity = rules.standard_gravity;
            match jump_launch_velocity(force, mass) {
                None => AttemptPlan::Resolved {
                    outcome: AttemptOutcome::Failure(FailureReason::NoLift { jump_force: force }),
                    detail: AttemptDetail::Jump {
                        launch_velocity: None,
                        apex_height: None,
                    },
                },
                Some(launch_velocity) => {
                    let apex = jump_apex_height(launch_velocity, gravity);
                    let on_finish = if apex >= rules.jump_apex_threshold {
                        AttemptOutcome::Success {
                            damage: rules.sorcerer_damage,
                        }
                    } else {
                        AttemptOutcome::Failure(FailureReason::BelowThreshold {
                            apex,
                            threshold: rules.jump_apex_threshold,
                        })
                    };
                    AttemptPlan::Simulate {
                        simulation: Simulation::jump(
                            launch_velocity,
                            gravity,
                            rules.coarse_time_step,
                        ),
                        on_finish,
                        detail: AttemptDetail::Jump {
                            launch_velocity: Some(launch_velocity),
                            apex_height: Some(apex),
                        },
                    }
                }
            }
        }
        GameInputs::Fall {
            height,
            velocity,
            gravity,
        } => AttemptPlan::Simulate {
            simulation: Simulation::fall(height, velocity, gravity, rules.fine_time_step),
            on_finish: AttemptOutcome::Observed,
            detail: AttemptDetail::Fall {
                initial_height: height,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mini_game::{RawParameters, Role};
    use crate::physics::CollisionKind;

    fn rules() -> MiniGameRules {
        MiniGameRules::default()
    }

    fn projectile() -> GameInputs {
        GameInputs::Projectile {
            velocity: 20.0,
            angle_degrees: 45.0,
            gravity: 9.8,
        }
    }

    #[test]
    fn knight_hits_within_tolerance() {
        let plan = plan_attempt(&projectile(), &rules(), |_, _| 44);
        match plan {
            AttemptPlan::Resolved { outcome, detail } => {
                assert_eq!(outcome, AttemptOutcome::Success { damage: 25 });
                assert!(matches!(
                    detail,
                    AttemptDetail::Projectile { target_distance, .. } if target_distance == 44.0
                ));
            }
            other => panic!("expected resolved plan, got {:?}", other),
        }
    }

    #[test]
    fn knight_hit_tolerance_is_inclusive() {
        // range ≈ 40.816: target 36 is 4.816 away, target 35 is 5.816 away
        let hit = plan_attempt(&projectile(), &rules(), |_, _| 36);
        assert!(matches!(
            hit,
            AttemptPlan::Resolved {
                outcome: AttemptOutcome::Success { damage: 25 },
                ..
            }
        ));

        let miss = plan_attempt(&projectile(), &rules(), |_, _| 35);
        match miss {
            AttemptPlan::Resolved {
                outcome: AttemptOutcome::Failure(FailureReason::Missed { difference, .. }),
                ..
            } => assert!((difference - 5.816).abs() < 0.001),
            other => panic!("expected miss, got {:?}", other),
        }
    }

    #[test]
    fn knight_misses_and_reports_difference() {
        let plan = plan_attempt(&projectile(), &rules(), |_, _| 60);
        match plan {
            AttemptPlan::Resolved {
                outcome:
                    AttemptOutcome::Failure(FailureReason::Missed {
                        target,
                        reached,
                        difference,
                    }),
                ..
            } => {
                assert_eq!(target, 60.0);
                assert!((reached - 40.816).abs() < 0.001);
                assert!((difference - (60.0 - reached)).abs() < 1e-9);
            }
            other => panic!("expected miss, got {:?}", other),
        }
    }

    #[test]
    fn knight_draws_from_rule_range() {
        let mut seen = None;
        plan_attempt(&projectile(), &rules(), |min, max| {
            seen = Some((min, max));
            min
        });
        assert_eq!(seen, Some((20, 100)));
    }

    #[test]
    fn guardian_is_observational() {
        let inputs = GameInputs::Collision {
            kind: CollisionKind::Elastic,
            mass1: 2.0,
            velocity1: 3.0,
            mass2: 4.0,
            velocity2: -2.0,
        };
        let plan = plan_attempt(&inputs, &rules(), |_, _| unreachable!());
        assert!(matches!(
            plan,
            AttemptPlan::Resolved {
                outcome: AttemptOutcome::Observed,
                detail: AttemptDetail::Collision(_)
            }
        ));
    }

    #[test]
    fn archer_push_simulates_to_success() {
        let inputs = GameInputs::Push {
            force: 50.0,
            mass: 5.0,
            friction: 0.2,
        };
        match plan_attempt(&inputs, &rules(), |_, _| unreachable!()) {
            AttemptPlan::Simulate {
                on_finish, detail, ..
            } => {
                assert_eq!(on_finish, AttemptOutcome::Success { damage: 20 });
                match detail {
                    AttemptDetail::Push {
                        acceleration: Some(a),
                        ..
                    } => assert!((a - 8.04).abs() < 1e-9),
                    other => panic!("unexpected detail {:?}", other),
                }
            }
            other => panic!("expected simulation, got {:?}", other),
        }
    }

    #[test]
    fn archer_without_enough_force_fails_immediately() {
        let inputs = GameInputs::Push {
            force: 5.0,
            mass: 5.0,
            friction: 0.5,
        };
        match plan_attempt(&inputs, &rules(), |_, _| unreachable!()) {
            AttemptPlan::Resolved {
                outcome: AttemptOutcome::Failure(FailureReason::InsufficientForce { net_force }),
                ..
            } => assert!((net_force - -19.5).abs() < 1e-9),
            other => panic!("expected insufficient force, got {:?}", other),
        }
    }

    #[test]
    fn weak_jump_lands_below_threshold() {
        let inputs = GameInputs::Jump {
            force: 50.0,
            mass: 5.0,
        };
        match plan_attempt(&inputs, &rules(), |_, _| unreachable!()) {
            AttemptPlan::Simulate { on_finish, .. } => assert!(matches!(
                on_finish,
                AttemptOutcome::Failure(FailureReason::BelowThreshold { .. })
            )),
            other => panic!("expected simulation, got {:?}", other),
        }
    }

    #[test]
    fn strong_jump_succeeds() {
        // v0 = -20 → apex ≈ 20.4
        let inputs = GameInputs::Jump {
            force: 100.0,
            mass: 5.0,
        };
        match plan_attempt(&inputs, &rules(), |_, _| unreachable!()) {
            AttemptPlan::Simulate { on_finish, .. } => {
                assert_eq!(on_finish, AttemptOutcome::Success { damage: 25 })
            }
            other => panic!("expected simulation, got {:?}", other),
        }
    }

    #[test]
    fn jump_without_force_is_refused() {
        let inputs = GameInputs::Jump {
            force: -20.0,
            mass: 5.0,
        };
        let plan = plan_attempt(&inputs, &rules(), |_, _| unreachable!());
        assert_eq!(
            plan.detail(),
            &AttemptDetail::Jump {
                launch_velocity: None,
                apex_height: None
            }
        );
        assert!(matches!(
            plan,
            AttemptPlan::Resolved {
                outcome: AttemptOutcome::Failure(FailureReason::NoLift { jump_force }),
                ..
            } if jump_force == -20.0
        ));
    }

    #[test]
    fn stepped_games_plan_a_simulation() {
        let rules = rules();
        for role in Role::ALL {
            for game in role.mini_games() {
                let inputs = GameInputs::parse(game, &RawParameters::new()).unwrap();
                let plan = plan_attempt(&inputs, &rules, |min, _| min);
                assert_eq!(
                    matches!(plan, AttemptPlan::Simulate { .. }),
                    game.is_stepped(),
                    "{}",
                    game
                );
            }
        }
    }

    #[test]
    fn fall_is_observational() {
        let inputs = GameInputs::Fall {
            height: 20.0,
            velocity: 0.0,
            gravity: 9.8,
        };
        match plan_attempt(&inputs, &rules(), |_, _| unreachable!()) {
            AttemptPlan::Simulate {
                on_finish,
                simulation,
                ..
            } => {
                assert_eq!(on_finish, AttemptOutcome::Observed);
                assert!((simulation.time_step() - 1.0 / 60.0).abs() < 1e-12);
            }
            other => panic!("expected simulation, got {:?}", other),
        }
    }
}
