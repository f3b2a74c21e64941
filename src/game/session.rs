//! Binds a [`GameEngine`] to a timer.
//!
//! The engine never waits on anything; `tick()` only reports whether the game
//! should keep going. The session turns that answer into scheduler calls:
//! the first accepted turn of an idle game schedules the first tick, every
//! tick that keeps the game running schedules the next one with the interval
//! read from the engine at that moment, and a reset cancels whatever is
//! pending before the engine is reinitialised.

use std::time::Duration;

use tracing::debug;

use super::{
    action::{Command, Direction},
    engine::{GameEngine, TickOutcome},
    snapshot::GameSnapshot,
    state::GameStatus,
};

/// Timer collaborator that fires a single pending tick
pub trait Scheduler {
    /// Arrange for one tick after `delay`, replacing any pending one
    fn schedule_after(&mut self, delay: Duration);

    /// Drop the pending tick, if any
    fn cancel(&mut self);
}

pub struct GameSession<S: Scheduler> {
    engine: GameEngine,
    scheduler: S,
}

impl<S: Scheduler> GameSession<S> {
    pub fn new(engine: GameEngine, scheduler: S) -> Self {
        Self { engine, scheduler }
    }

    /// Apply a command from an input adapter. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Turn(direction) => self.turn(direction),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        let was_idle = self.engine.status() == GameStatus::Idle;
        let accepted = self.engine.set_direction(direction);

        if accepted && was_idle {
            self.scheduler.schedule_after(self.engine.tick_interval());
        }

        accepted
    }

    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.engine.reset();
    }

    /// Run the tick the scheduler just fired and decide on the next one
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();

        if outcome.should_continue() {
            self.scheduler.schedule_after(self.engine.tick_interval());
        } else {
            self.scheduler.cancel();
            debug!(status = ?outcome.status, "tick loop stopped");
        }

        outcome
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, GameConfig, Marker, Position};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Schedule(Duration),
        Cancel,
    }

    #[derive(Default)]
    struct RecordingScheduler {
        calls: Vec<Call>,
    }

    impl Scheduler for RecordingScheduler {
        fn schedule_after(&mut self, delay: Duration) {
            self.calls.push(Call::Schedule(delay));
        }

        fn cancel(&mut self) {
            self.calls.push(Call::Cancel);
        }
    }

    fn session() -> GameSession<RecordingScheduler> {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 11).unwrap();
        engine.place_food(Some(Food {
            position: Position::new(0, 0),
            marker: Marker(0),
        }));
        GameSession::new(engine, RecordingScheduler::default())
    }

    #[test]
    fn test_idle_session_schedules_nothing() {
        let session = session();
        assert!(session.scheduler().calls.is_empty());
    }

    #[test]
    fn test_first_turn_schedules_first_tick() {
        let mut session = session();

        assert!(session.apply(Command::Turn(Direction::Right)));

        assert_eq!(
            session.scheduler().calls,
            vec![Call::Schedule(Duration::from_millis(120))]
        );
    }

    #[test]
    fn test_later_turns_do_not_reschedule() {
        let mut session = session();
        session.turn(Direction::Right);
        session.turn(Direction::Up);
        session.turn(Direction::Down);

        assert_eq!(session.scheduler().calls.len(), 1);
    }

    #[test]
    fn test_rejected_first_turn_does_not_schedule() {
        let mut session = session();
        session.engine_mut().state_mut().status = GameStatus::GameOver;

        assert!(!session.turn(Direction::Up));
        assert!(session.scheduler().calls.is_empty());
    }

    #[test]
    fn test_running_tick_reschedules_with_fresh_interval() {
        let mut session = session();
        session.turn(Direction::Right);
        session.engine_mut().state_mut().tick_interval = Duration::from_millis(70);

        let outcome = session.on_tick();

        assert!(outcome.should_continue());
        assert_eq!(
            session.scheduler().calls.last(),
            Some(&Call::Schedule(Duration::from_millis(70)))
        );
    }

    #[test]
    fn test_game_over_stops_loop() {
        let mut session = session();
        session.turn(Direction::Left);

        let outcome = session.on_tick();

        assert_eq!(outcome.status, GameStatus::GameOver);
        assert_eq!(session.scheduler().calls.last(), Some(&Call::Cancel));
    }

    #[test]
    fn test_reset_cancels_pending_tick_first() {
        let mut session = session();
        session.turn(Direction::Right);
        session.on_tick();

        session.apply(Command::Reset);

        assert_eq!(session.scheduler().calls.last(), Some(&Call::Cancel));
        assert_eq!(session.engine().status(), GameStatus::Idle);
        assert_eq!(session.snapshot().score, 0);
    }
}
