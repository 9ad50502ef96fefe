//! Fixed-step simulations driven one frame at a time.
//!
//! A `Simulation` owns the private state of one stepped mini-game. The caller
//! decides the pacing (one step per rendered frame); each `step` reports
//! whether the termination predicate now holds.

use serde::{Deserialize, Serialize};

use super::kinematics::{free_fall_height, MotionState};

/// One rendered frame of a stepped simulation.
///
/// `position` and `velocity` are measured along the mini-game's axis: distance
/// travelled for a slide, height above the floor (up positive) for jumps and
/// falls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: u32,
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}

/// Result of advancing a simulation by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Continue(Frame),
    /// Termination predicate holds; this is the last frame
    Finished(Frame),
}

impl Step {
    pub fn frame(&self) -> Frame {
        match self {
            Self::Continue(frame) | Self::Finished(frame) => *frame,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Motion {
    /// Body pushed along a track until it passes the far end
    Slide {
        state: MotionState,
        acceleration: f64,
        track_length: f64,
    },
    /// Body launched up from the floor; screen coordinates (down positive)
    Jump { state: MotionState, gravity: f64 },
    /// Body released from a height; closed-form height per frame
    Fall {
        initial_height: f64,
        initial_velocity: f64,
        gravity: f64,
    },
}

/// Private state of one stepped mini-game.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    motion: Motion,
    dt: f64,
    frames: u32,
}

impl Simulation {
    pub fn slide(acceleration: f64, track_length: f64, dt: f64) -> Self {
        Self {
            motion: Motion::Slide {
                state: MotionState::default(),
                acceleration,
                track_length,
            },
            dt,
            frames: 0,
        }
    }

    /// `launch_velocity` is negative for an upward jump.
    pub fn jump(launch_velocity: f64, gravity: f64, dt: f64) -> Self {
        Self {
            motion: Motion::Jump {
                state: MotionState::new(0.0, launch_velocity),
                gravity,
            },
            dt,
            frames: 0,
        }
    }

    /// `initial_velocity` is positive upwards.
    pub fn fall(initial_height: f64, initial_velocity: f64, gravity: f64, dt: f64) -> Self {
        Self {
            motion: Motion::Fall {
                initial_height,
                initial_velocity,
                gravity,
            },
            dt,
            frames: 0,
        }
    }

    pub fn time_step(&self) -> f64 {
        self.dt
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn step(&mut self) -> Step {
        self.frames += 1;
        let index = self.frames;
        let time = f64::from(index) * self.dt;
        let dt = self.dt;

        match &mut self.motion {
            Motion::Slide {
                state,
                acceleration,
                track_length,
            } => {
                state.step(*acceleration, dt);
                let frame = Frame {
                    index,
                    time,
                    position: state.position,
                    velocity: state.velocity,
                };
                if state.position > *track_length {
                    Step::Finished(frame)
                } else {
                    Step::Continue(frame)
                }
            }
            Motion::Jump { state, gravity } => {
                state.step(*gravity, dt);
                if state.position >= 0.0 {
                    state.position = 0.0;
                    return Step::Finished(Frame {
                        index,
                        time,
                        position: 0.0,
                        velocity: -state.velocity,
                    });
                }
                Step::Continue(Frame {
                    index,
                    time,
                    position: -state.position,
                    velocity: -state.velocity,
                })
            }
            Motion::Fall {
                initial_height,
                initial_velocity,
                gravity,
            } => {
                let height = free_fall_height(*initial_height, *initial_velocity, *gravity, time);
                let frame = Frame {
                    index,
                    time,
                    position: height,
                    velocity: *initial_velocity - *gravity * time,
                };
                if height <= 0.0 {
                    Step::Finished(frame)
                } else {
                    Step::Continue(frame)
                }
            }
        }
    }
}
