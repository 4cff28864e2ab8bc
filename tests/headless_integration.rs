use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use spotter::clock::ManualClock;
use spotter::config::GameConfig;
use spotter::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use spotter::ui::{audio::TimedAudio, route_keys, stage::TerminalStage};
use spotter::{GameError, GameMode, GameSession, PlayerMode, StepOutcome};

// Headless driver: the real stage, audio and runtime, with a manual clock
// standing in for wall time.
struct Harness {
    clock: ManualClock,
    session: GameSession<ManualClock, StdRng>,
    stage: TerminalStage,
    audio: TimedAudio<ManualClock>,
    runner: Runner<TestEventSource, FixedTicker>,
    tx: Sender<GameEvent>,
}

impl Harness {
    fn new() -> Self {
        let cfg = GameConfig {
            bell: false,
            ..GameConfig::default()
        };
        let clock = ManualClock::new();
        let (tx, rx) = mpsc::channel();
        Self {
            session: GameSession::from_config(&cfg, clock.clone(), StdRng::seed_from_u64(5)),
            stage: TerminalStage::new(cfg.bounds(), cfg.class_to_detect.clone(), cfg.object_size_px),
            audio: TimedAudio::from_config(&cfg, clock.clone()),
            runner: Runner::new(
                TestEventSource::new(rx),
                FixedTicker::new(Duration::from_millis(1)),
            ),
            clock,
            tx,
        }
    }

    fn frame(&mut self, keys: &[KeyCode]) -> Result<StepOutcome, GameError> {
        for code in keys {
            self.tx
                .send(GameEvent::Key(KeyEvent::new(*code, KeyModifiers::NONE)))
                .unwrap();
        }
        let mut events = vec![self.runner.step()];
        events.extend(self.runner.drain());
        let input = route_keys(&events, &mut self.stage, 5);
        self.session.step(input, &mut self.stage, &mut self.audio)
    }

    fn tick(&mut self) {
        assert_eq!(self.frame(&[]), Ok(StepOutcome::Continue));
    }

    fn shows(&self, text: &str) -> bool {
        self.stage.shown_texts().any(|t| t == text)
    }

    fn calibrate(&mut self) {
        self.frame(&[KeyCode::Char('c')]).unwrap();
        assert_eq!(self.session.mode, GameMode::Calibrating);
        self.tick();
        self.clock.advance_secs(3.2);
        self.tick();
        self.tick();
        assert_eq!(self.session.mode, GameMode::SelectingPlayers);
    }

    fn count_in(&mut self, players: char) {
        self.frame(&[KeyCode::Char(players)]).unwrap();
        assert_eq!(self.session.mode, GameMode::Countdown);
        for (t, label) in [(0.0, "3"), (1.0, "2"), (1.0, "1"), (1.1, "GO")] {
            self.clock.advance_secs(t);
            self.tick();
            assert!(self.shows(label), "expected countdown {label}");
        }
        assert_eq!(self.session.mode, GameMode::Playing);
    }

    fn hit_current_target(&mut self) {
        let target = self.session.round.target.expect("target placed");
        self.stage.place_object_at(target.top_left);
        self.tick();
        assert!(self.session.round.is_object_in_position);
        self.tick();
    }
}

#[test]
fn headless_full_game_and_replay() {
    let mut h = Harness::new();

    h.tick();
    assert!(h.shows("Press 'C' to calibrate"));
    h.calibrate();
    assert_eq!(h.session.min_object_size(), Some(60));
    h.tick();
    assert!(h.shows("Players?"));

    h.count_in('1');
    assert_eq!(h.session.player_mode, Some(PlayerMode::One));

    // move the object away so the first target can't be hit by accident
    h.stage.place_object_at(spotter::geometry::Point::new(0, 0));
    h.tick();
    let first = h.session.round.target.unwrap();
    assert!(h.shows("0/2"));

    h.hit_current_target();
    assert_eq!(h.session.round.current_rep, 1);
    assert!(h.session.round.show_result);

    // hit cue still playing: target frozen
    h.clock.advance_secs(0.5);
    h.tick();
    assert_eq!(h.session.round.target, Some(first));

    h.clock.advance_secs(0.6);
    h.tick();
    assert!(!h.session.round.show_result);
    let second = h.session.round.target.unwrap();
    assert_eq!(second.width(), first.width());

    h.clock.advance_secs(10.0);
    h.hit_current_target();
    assert!(h.session.round.win_level);
    assert_eq!(h.session.round.win_level_elapsed_secs, 11);
    assert!(h.shows("00:11"));
    assert!(h.shows("2/2"));

    h.clock.advance_secs(2.6);
    h.tick();
    assert_eq!(h.session.mode, GameMode::AwaitingPlayAgainConfirm);
    assert_eq!(h.session.round.current_rep, 0);
    assert_eq!(h.session.player_mode, None);

    h.tick();
    assert!(h.shows("Play again?"));
    h.frame(&[KeyCode::Char('y')]).unwrap();
    assert_eq!(h.session.mode, GameMode::SelectingPlayers);

    h.count_in('2');
    assert_eq!(h.session.player_mode, Some(PlayerMode::Two));
    assert_eq!(h.session.min_object_size(), Some(60));

    assert_eq!(h.frame(&[KeyCode::Esc]), Ok(StepOutcome::Exit));
}

#[test]
fn headless_no_at_replay_prompt_exits() {
    let mut h = Harness::new();
    h.session.mode = GameMode::AwaitingPlayAgainConfirm;
    assert_eq!(h.frame(&[KeyCode::Char('n')]), Ok(StepOutcome::Exit));
}

#[test]
fn headless_steering_with_arrow_keys_scores() {
    let mut h = Harness::new();
    h.tick();
    h.calibrate();
    h.count_in('1');
    h.tick();
    let target = h.session.round.target.unwrap();

    for _ in 0..400u32 {
        if h.session.round.current_rep == 1 {
            break;
        }
        let bbox = h.stage.object.bbox();
        let mut keys = Vec::new();
        let dx = target.top_left.x - bbox.x_left;
        let dy = target.top_left.y - bbox.y_top;
        if dx >= 5 {
            keys.push(KeyCode::Right);
        } else if dx <= -5 {
            keys.push(KeyCode::Left);
        }
        if dy >= 5 {
            keys.push(KeyCode::Down);
        } else if dy <= -5 {
            keys.push(KeyCode::Up);
        }
        h.frame(&keys).unwrap();
    }

    assert_eq!(h.session.round.current_rep, 1);
}

#[test]
fn headless_hiding_object_fails_calibration() {
    let mut h = Harness::new();
    h.frame(&[KeyCode::Char('c')]).unwrap();
    h.tick();
    h.frame(&[KeyCode::Char(' ')]).unwrap();
    h.clock.advance_secs(3.5);
    assert_eq!(
        h.frame(&[]),
        Err(GameError::CalibrationFailed {
            step: 1,
            sub_step: 2
        })
    );
}

#[test]
fn headless_cancel_from_every_reachable_mode() {
    let mut h = Harness::new();
    assert_eq!(h.frame(&[KeyCode::Esc]), Ok(StepOutcome::Exit));

    let mut h = Harness::new();
    h.frame(&[KeyCode::Char('c')]).unwrap();
    assert_eq!(h.frame(&[KeyCode::Esc]), Ok(StepOutcome::Exit));

    let mut h = Harness::new();
    h.tick();
    h.calibrate();
    h.frame(&[KeyCode::Char('1')]).unwrap();
    assert_eq!(h.frame(&[KeyCode::Esc]), Ok(StepOutcome::Exit));
}
