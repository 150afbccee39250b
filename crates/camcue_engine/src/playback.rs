// SPDX-License-Identifier: MIT OR Apache-2.0
//! The playback engine.
//!
//! One owner for all mutable plugin state:
//! - The single-cursor advance-on-match state machine
//! - The token-based delayed action scheduler
//! - The action executor and camera mode mirror
//! - The recurring yaw correction
//! - Reset/guard logic with a completion watchdog

use crate::action::CameraAction;
use crate::event::GameEvent;
use crate::host::{GameHost, TimerToken};
use crate::sequence::{Mapping, Sequence};
use std::collections::HashMap;

/// Minimum spacing between two counted ball touches, in host seconds.
/// The hit hook fires once per physics contact, several times per
/// visible touch.
const BALL_TOUCH_COOLDOWN_SECONDS: f64 = 0.2;

/// Interval of the completion watchdog while playback is running.
const WATCHDOG_INTERVAL_SECONDS: f32 = 1.0;

/// Camera units at 100% swivel yaw.
const YAW_RANGE_UNITS: f32 = 23500.0;

/// What a pending timer firing should do.
#[derive(Debug, Clone, PartialEq)]
enum TimerPayload {
    /// Execute a scheduled step action, captured by value at schedule
    /// time.
    Action {
        /// The action to perform.
        action: CameraAction,
        /// The step's custom value.
        value: f32,
    },
    /// Re-check for a completed run that never reset.
    Watchdog,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingTimer {
    payload: TimerPayload,
    generation: u64,
}

/// The playback engine. Holds the host handle and forwards every camera
/// effect through it; the host-facing shell forwards its callbacks in.
pub struct PlaybackEngine<H: GameHost> {
    host: H,
    /// Steps copied from the library at start; playback never reads the
    /// library itself.
    steps: Vec<Mapping>,
    running: bool,
    cursor: usize,
    /// Local mirror of the host behind-view flag. Treated as
    /// authoritative: nothing else flips the host flag while the plugin
    /// is loaded.
    behind_view: bool,
    /// Sign multiplied into yaw percentages at execution time. Flipped
    /// by [`CameraAction::ToggleSwivelDirection`].
    yaw_direction: f32,
    /// Armed yaw correction target, in camera units.
    yaw_target: Option<f32>,
    /// Last target reported from a swivel tick, to keep the tick-rate
    /// log quiet while the value is unchanged.
    last_logged_yaw: Option<f32>,
    pending: HashMap<TimerToken, PendingTimer>,
    next_token: u64,
    /// Bumped by `start` and `stop`. A fired timer whose captured
    /// generation is older is stale and dropped, so a user abort or a
    /// restart can never execute leftovers from a previous run. Natural
    /// completion does not bump it: the final step's delayed action
    /// still lands after the auto-reset.
    generation: u64,
    last_ball_touch: Option<f64>,
}

impl<H: GameHost> PlaybackEngine<H> {
    /// Create an engine around a host handle.
    pub fn new(host: H) -> Self {
        Self {
            host,
            steps: Vec::new(),
            running: false,
            cursor: 0,
            behind_view: false,
            yaw_direction: 1.0,
            yaw_target: None,
            last_logged_yaw: None,
            pending: HashMap::new(),
            next_token: 0,
            generation: 0,
            last_ball_touch: None,
        }
    }

    /// Access the host handle (hook registration, log draining).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether a sequence is currently playing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the next expected step while playing.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of steps in the active copy.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Begin playback of `sequence`. An empty sequence is a logged
    /// no-op. The steps are copied, so library edits during playback
    /// cannot touch the run.
    pub fn start(&mut self, sequence: &Sequence) {
        if sequence.is_empty() {
            tracing::warn!("sequence {:?} has no steps, not starting", sequence.name);
            return;
        }

        self.generation += 1;
        self.steps = sequence.steps.clone();
        self.running = true;
        self.cursor = 0;
        self.schedule_watchdog();

        tracing::info!(
            "playback started: {:?} ({} steps)",
            sequence.name,
            self.steps.len()
        );
    }

    /// User-initiated abort: restore defaults from any cursor position
    /// and drop whatever delayed actions are still in flight.
    pub fn stop(&mut self) {
        tracing::info!("playback stopped");
        self.generation += 1;
        self.reset();
    }

    /// A recognized in-game event arrived. Applies the per-event
    /// detection gates, then advances at most one step.
    pub fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BallTouch => {
                let now = self.host.now();
                if let Some(last) = self.last_ball_touch {
                    if now - last < BALL_TOUCH_COOLDOWN_SECONDS {
                        return;
                    }
                }
                self.last_ball_touch = Some(now);
                tracing::debug!("ball touch");
                self.advance(&GameEvent::BallTouch);
            }
            GameEvent::Explosion => {
                tracing::debug!("goal explosion");
                self.advance(&GameEvent::Explosion);
            }
            GameEvent::Jump => {
                let Some(grounded) = self.host.is_car_grounded() else {
                    tracing::warn!("no local car, ignoring jump");
                    return;
                };
                // The jump hook also fires for air presses; only a
                // grounded press is a jump.
                if grounded {
                    tracing::debug!("jump");
                    self.advance(&GameEvent::Jump);
                }
            }
            GameEvent::DoubleJump => {
                let Some(grounded) = self.host.is_car_grounded() else {
                    tracing::warn!("no local car, ignoring double jump");
                    return;
                };
                if !grounded {
                    tracing::debug!("double jump");
                    self.advance(&GameEvent::DoubleJump);
                }
            }
            GameEvent::Flip => {
                tracing::debug!("flip");
                self.advance(&GameEvent::Flip);
            }
            GameEvent::Unknown(name) => {
                tracing::debug!("unrecognized event {name:?} ignored");
            }
        }
    }

    /// Advance at most one step: only while running, only when the
    /// cursor's expected event matches. Anything else is a no-op, so
    /// wrong-type events can never advance or corrupt the cursor.
    fn advance(&mut self, event: &GameEvent) {
        if !self.running || self.cursor >= self.steps.len() {
            return;
        }

        let step = &self.steps[self.cursor];
        if step.event != *event {
            return;
        }

        let (action, delay, value) = (step.action.clone(), step.delay, step.value);
        self.schedule(action, delay, value);
        self.cursor += 1;

        if self.cursor >= self.steps.len() {
            tracing::info!("sequence complete");
            self.reset();
        }
    }

    /// Hand one step action to the host timer, captured by value so
    /// later edits to the step list cannot change it.
    fn schedule(&mut self, action: CameraAction, delay: f32, value: f32) {
        tracing::debug!("scheduling {action} in {delay}s");
        let token = self.mint_token(TimerPayload::Action { action, value });
        self.host.schedule_once(delay.max(0.0), token);
    }

    fn schedule_watchdog(&mut self) {
        let token = self.mint_token(TimerPayload::Watchdog);
        self.host.schedule_once(WATCHDOG_INTERVAL_SECONDS, token);
    }

    fn mint_token(&mut self, payload: TimerPayload) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.insert(
            token,
            PendingTimer {
                payload,
                generation: self.generation,
            },
        );
        token
    }

    /// The host timer fired for `token`.
    pub fn on_timer(&mut self, token: TimerToken) {
        let Some(pending) = self.pending.remove(&token) else {
            tracing::debug!(?token, "timer fired with no pending entry");
            return;
        };

        if pending.generation != self.generation {
            tracing::debug!(?token, "stale timer dropped");
            return;
        }

        match pending.payload {
            TimerPayload::Action { action, value } => self.execute(&action, value),
            TimerPayload::Watchdog => {
                if self.running && self.cursor >= self.steps.len() {
                    tracing::warn!("watchdog caught an unreset completed run");
                    self.reset();
                } else if self.running {
                    self.schedule_watchdog();
                }
            }
        }
    }

    /// Perform one camera action immediately.
    pub fn execute(&mut self, action: &CameraAction, value: f32) {
        match action {
            CameraAction::ToggleReverseCam => {
                self.behind_view = !self.behind_view;
                self.host.set_behind_view(self.behind_view);
                tracing::info!(
                    "reverse cam {}",
                    if self.behind_view { "enabled" } else { "disabled" }
                );
            }
            CameraAction::EnableReverseCam => {
                if !self.behind_view {
                    self.behind_view = true;
                    self.host.set_behind_view(true);
                    tracing::info!("reverse cam enabled");
                }
            }
            CameraAction::DisableReverseCam => {
                if self.behind_view {
                    self.behind_view = false;
                    self.host.set_behind_view(false);
                    tracing::info!("reverse cam disabled");
                }
            }
            CameraAction::ToggleBallCam => {
                let enabled = value != 0.0;
                self.host.set_ball_cam(enabled);
                tracing::info!("ball cam {}", if enabled { "enabled" } else { "disabled" });
            }
            CameraAction::AdjustYaw => self.adjust_yaw(value),
            CameraAction::ToggleSwivelDirection => {
                self.yaw_direction = -self.yaw_direction;
                tracing::info!(
                    "swivel direction now {}",
                    if self.yaw_direction > 0.0 { "right" } else { "left" }
                );
            }
            CameraAction::Unknown(name) => {
                tracing::warn!("unrecognized action {name:?} ignored");
            }
        }
    }

    /// Clamp `percentage` to [-100, 100], map it linearly into camera
    /// units, and (re)arm the recurring correction. Zero disarms it and
    /// restores the host's default swivel behavior.
    pub fn adjust_yaw(&mut self, percentage: f32) {
        let percentage = percentage.clamp(-100.0, 100.0);

        if percentage == 0.0 {
            if self.yaw_target.take().is_some() {
                self.host.unhook_swivel_updates();
                tracing::info!("yaw correction cleared, default swivel restored");
            }
            self.last_logged_yaw = None;
            return;
        }

        let target = self.yaw_direction * (percentage / 100.0) * YAW_RANGE_UNITS;

        // Unhook before re-hooking so corrections never stack.
        if self.yaw_target.is_some() {
            self.host.unhook_swivel_updates();
        }
        self.yaw_target = Some(target);
        self.host.hook_swivel_updates();

        tracing::info!("yaw correction armed: {percentage}% -> {target} units");
    }

    /// A host swivel-update tick. Re-applies the stored yaw, leaving
    /// pitch and roll host-controlled.
    pub fn on_swivel_tick(&mut self) {
        let Some(target) = self.yaw_target else {
            return;
        };
        let Some(mut swivel) = self.host.current_swivel() else {
            tracing::warn!("no camera, skipping yaw correction");
            return;
        };

        swivel.yaw = target;
        self.host.set_swivel(swivel);

        if self.last_logged_yaw != Some(target) {
            tracing::debug!("applied camera yaw {target}");
            self.last_logged_yaw = Some(target);
        }
    }

    /// Restore default camera state and rewind the playback state.
    /// Safe to call at any time, any number of times.
    pub fn reset(&mut self) {
        if self.behind_view {
            self.execute(&CameraAction::ToggleReverseCam, 0.0);
        }
        self.adjust_yaw(0.0);
        self.running = false;
        self.cursor = 0;
    }
}
