#![allow(dead_code)]

use myrtio_led_arcade::{
    Button, Duration, Game, GameOutcome, InputSnapshot, InputSource, Instant, LedBank, LedIndex,
    MAX_LEDS, OutputSink, PatternCode, PatternController, PhaseTargets, Stage,
};
use rand::RngCore;

pub const TICK: Duration = Duration::from_millis(10);

/// Output sink that keeps the whole write history
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub pins: [bool; MAX_LEDS],
    /// Every `set_pin` call in order
    pub writes: Vec<(LedIndex, bool)>,
    /// Lit LEDs after every committed frame
    pub frames: Vec<PatternCode>,
    pub cleaned: bool,
}

impl RecordingSink {
    pub fn lit(&self) -> PatternCode {
        (0..)
            .zip(self.pins.iter())
            .filter(|(_, on)| **on)
            .fold(PatternCode::EMPTY, |code, (index, _)| code.with(index))
    }
}

impl OutputSink for RecordingSink {
    fn set_pin(&mut self, index: LedIndex, on: bool) {
        self.pins[index as usize] = on;
        self.writes.push((index, on));
    }

    fn cleanup_all(&mut self) {
        self.cleaned = true;
    }

    fn write_frame(&mut self, targets: &PhaseTargets) {
        for (index, target) in (0..).zip(targets.iter()) {
            if let Some(on) = *target {
                self.set_pin(index, on);
            }
        }
        let lit = self.lit();
        self.frames.push(lit);
    }
}

/// Random generator returning a fixed list of values, cycling
pub struct ScriptedRng {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Input source replaying snapshots, the last one repeats
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pub snapshots: Vec<InputSnapshot>,
    pub position: usize,
    pub disconnected: bool,
    pub closed: bool,
}

impl ScriptedInput {
    pub fn new(snapshots: &[InputSnapshot]) -> Self {
        Self {
            snapshots: snapshots.to_vec(),
            ..Self::default()
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_snapshot(&mut self) -> InputSnapshot {
        let snapshot = self
            .snapshots
            .get(self.position)
            .or(self.snapshots.last())
            .copied()
            .unwrap_or_default();
        self.position += 1;
        snapshot
    }

    fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

pub fn bank(count: u8) -> LedBank {
    LedBank::new(count).unwrap()
}

pub fn controller(count: u8) -> PatternController<RecordingSink> {
    PatternController::new(RecordingSink::default(), bank(count))
}

pub fn press(button: Button) -> InputSnapshot {
    InputSnapshot::idle().with(button)
}

/// Button selecting `led`
pub fn led_button(led: LedIndex) -> Button {
    match led {
        0 => Button::A,
        1 => Button::B,
        2 => Button::X,
        3 => Button::Y,
        _ => panic!("no button for led {led}"),
    }
}

/// Steps a game through time, 10 ms per tick
pub struct Driver {
    pub now: Instant,
    pub leds: PatternController<RecordingSink>,
}

impl Driver {
    pub fn new(count: u8) -> Self {
        Self {
            now: Instant::from_millis(0),
            leds: controller(count),
        }
    }

    pub fn tick<G: Game>(&mut self, game: &mut G, input: &InputSnapshot) -> GameOutcome {
        let outcome = game.tick(self.now, input, &mut self.leds);
        self.now += TICK;
        outcome
    }

    /// Keep `input` for `ticks` ticks
    pub fn hold<G: Game>(
        &mut self,
        game: &mut G,
        input: &InputSnapshot,
        ticks: u32,
    ) -> GameOutcome {
        let mut outcome = GameOutcome::Running;
        for _ in 0..ticks {
            outcome = self.tick(game, input);
        }
        outcome
    }

    /// Press `button` for one tick and release it
    pub fn tap<G: Game>(&mut self, game: &mut G, button: Button) -> GameOutcome {
        self.tick(game, &press(button));
        self.tick(game, &InputSnapshot::idle())
    }

    /// Tick with nothing held until the game reaches `stage`
    pub fn idle_until<G: Game>(&mut self, game: &mut G, stage: Stage) {
        for _ in 0..10_000 {
            if game.stage() == stage {
                return;
            }
            self.tick(game, &InputSnapshot::idle());
        }
        panic!("stage {stage:?} not reached, stuck in {:?}", game.stage());
    }

    /// Tick with nothing held until the session is over
    pub fn finish<G: Game>(&mut self, game: &mut G) -> GameOutcome {
        for _ in 0..10_000 {
            let outcome = self.tick(game, &InputSnapshot::idle());
            if outcome.is_over() {
                return outcome;
            }
        }
        panic!("session did not end, stuck in {:?}", game.stage());
    }
}
