//! Frame-level driver
//!
//! Hosts call [`Session::update`] once per rendered frame with the measured
//! frame time; the session runs as many fixed ticks as the accumulator holds
//! and keeps the camera on the player.

use glam::Vec2;

use crate::renderer::{Camera, RenderFrame, extract};
use crate::sim::{FixedStep, GameEvent, GameState, TickInput, tick};

/// A running game: simulation state, accumulator and pending input
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    stepper: FixedStep,
    input: TickInput,
    camera: Camera,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        let stepper = FixedStep::new(state.tuning.fixed_timestep);
        let camera = Camera::follow(state.player.position());
        Self {
            state,
            stepper,
            input: TickInput::default(),
            camera,
        }
    }

    /// Held movement direction; persists until changed
    pub fn set_movement_intent(&mut self, movement: Vec2) {
        self.input.movement = movement;
    }

    /// One-shot jump request, consumed by the next tick
    pub fn request_jump(&mut self) {
        self.input.jump = true;
    }

    /// Advance by one frame. Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.stepper.accumulate(frame_dt);

        let mut ticks = 0;
        while self.stepper.consume() {
            if self.state.is_over() {
                continue;
            }
            tick(&mut self.state, &self.input, self.stepper.step());
            ticks += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
        }

        self.camera = Camera::follow(self.state.player.position());
        ticks
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Draw data for the current state
    pub fn frame(&self) -> RenderFrame {
        extract(&self.state, self.camera)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Outcome, level_one};
    use crate::tuning::Tuning;

    fn session() -> Session {
        Session::new(level_one(Tuning::default()).unwrap())
    }

    #[test]
    fn test_update_runs_whole_ticks() {
        let mut session = session();
        let dt = session.state.tuning.fixed_timestep;
        assert_eq!(session.update(dt * 0.5), 0);
        assert_eq!(session.update(dt * 0.6), 1);
        assert_eq!(session.update(dt * 3.0), 3);
        assert_eq!(session.state.time_ticks, 4);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let mut session = session();
        let dt = session.state.tuning.fixed_timestep;
        // Land on the ledge first
        for _ in 0..120 {
            session.update(dt);
        }
        session.drain_events();

        session.request_jump();
        session.update(dt * 2.0);
        let jumps = session
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Jumped)
            .count();
        assert_eq!(jumps, 1);

        // Not replayed once landed again
        for _ in 0..120 {
            session.update(dt);
        }
        assert!(!session.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_camera_follows_player() {
        let mut session = session();
        session.update(session.state.tuning.fixed_timestep * 10.0);
        let player = session.state.player.position();
        assert_eq!(session.camera().offset, Vec2::new(-player.x, -player.y / 2.0));
        assert_eq!(session.frame().camera, session.camera());
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut session = session();
        session.state.phase = GamePhase::GameOver(Outcome::Won);
        assert_eq!(session.update(1.0), 0);
        assert_eq!(session.state.time_ticks, 0);
        assert!(session.frame().banner.is_some());
    }
}
