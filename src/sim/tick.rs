//! Fixed timestep simulation tick
//!
//! Each tick runs the player first, then every enemy in roster order, then
//! re-evaluates the win/lose condition. Once the run is over the state is
//! frozen and further ticks do nothing.

use glam::Vec2;

use super::ai::{self, AiCommand, PlayerView};
use super::collision::resolve_player_contacts;
use super::entity::Role;
use super::roster::Handle;
use super::state::{DefeatCause, GameEvent, GamePhase, GameState, Outcome};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Desired movement direction (normalised by the simulation)
    pub movement: Vec2,
    /// Jump request (ignored while airborne)
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_over() {
        return;
    }
    state.time_ticks += 1;

    state.player.set_movement_intent(input.movement);
    if input.jump && state.player.request_jump() {
        log::debug!("Player jumped at tick {}", state.time_ticks);
        state.push_event(GameEvent::Jumped);
    }

    update_player(state, dt);

    for handle in state.enemies.handles() {
        update_enemy(state, handle, dt);
    }

    state.enemies_defeated = state.enemies.defeated();
    evaluate_outcome(state);
}

fn update_player(state: &mut GameState, dt: f32) {
    if !state.player.active {
        return;
    }
    state.player.update_physics(&state.map, &state.tuning, dt);

    if state
        .player
        .below_death_line(&state.map, state.tuning.fall_death_margin)
    {
        log::debug!("Player fell out of the level");
        state.player.deactivate();
        state.push_event(GameEvent::PlayerDefeated);
        return;
    }

    let report = resolve_player_contacts(&mut state.player, &mut state.enemies, &state.tuning);
    for enemy in report.stomped {
        log::debug!("Enemy {} stomped", enemy);
        state.push_event(GameEvent::EnemyDefeated {
            enemy,
            cause: DefeatCause::Stomped,
        });
    }
    if let Some(enemy) = report.defeated_by {
        log::debug!("Player defeated by enemy {}", enemy);
        state.push_event(GameEvent::PlayerDefeated);
    }
}

fn update_enemy(state: &mut GameState, handle: Handle, dt: f32) {
    let player = PlayerView::of(&state.player);
    let Some(enemy) = state.enemies.get_mut(handle) else {
        return;
    };
    if !enemy.active {
        return;
    }

    enemy.update_physics(&state.map, &state.tuning, dt);

    if enemy.below_death_line(&state.map, state.tuning.fall_death_margin) {
        if enemy.is_bullet() {
            enemy.reset_bullet();
        } else {
            log::debug!("Enemy {} fell out of the level", handle);
            enemy.deactivate();
            state.push_event(GameEvent::EnemyDefeated {
                enemy: handle,
                cause: DefeatCause::Fell,
            });
        }
        return;
    }

    let command = ai::think(enemy, &player, &state.map, &state.tuning, dt);
    if let Some(command) = command {
        apply_command(state, handle, command);
    }
}

/// Carry out a cross-entity action requested by `source`
fn apply_command(state: &mut GameState, source: Handle, command: AiCommand) {
    match command {
        AiCommand::FireBullet {
            bullet,
            origin,
            direction,
        } => {
            let launched = state
                .enemies
                .get_mut(bullet)
                .is_some_and(|b| b.launch_bullet(origin, direction));
            if !launched {
                return;
            }
            let cooldown = state.tuning.shooter_cooldown;
            if let Some(Role::Shooter(brain)) = state.enemies.get_mut(source).map(|e| &mut e.role) {
                brain.cooldown = cooldown;
            }
            log::debug!("Shooter {} fired bullet {}", source, bullet);
            state.push_event(GameEvent::ShotFired { shooter: source });
        }
    }
}

/// Freeze the run once every countable enemy is down or the player is.
/// A win in the same tick as a loss counts as a win.
fn evaluate_outcome(state: &mut GameState) {
    let outcome = if state.enemies_defeated == state.enemies_to_defeat() {
        Outcome::Won
    } else if !state.player.active {
        Outcome::Lost
    } else {
        return;
    };

    state.phase = GamePhase::GameOver(outcome);
    log::info!(
        "Game over at tick {}: {:?} ({}/{} enemies defeated)",
        state.time_ticks,
        outcome,
        state.enemies_defeated,
        state.enemies_to_defeat()
    );
    state.push_event(GameEvent::GameOver(outcome));
}

/// Fixed-timestep accumulator.
///
/// Frame time is added with [`FixedStep::accumulate`]; each successful
/// [`FixedStep::consume`] takes exactly one step out, so a frame can run
/// zero, one or several ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over that has not yet made a full step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn accumulate(&mut self, frame_dt: f32) {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
    }

    /// Take one step out of the accumulator if a full step is available
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }
}
