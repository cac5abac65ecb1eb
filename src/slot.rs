//! Slot machine title cycling.
//!
//! [`TitleCycler`] rotates through a [`TitleList`], one [`LetterCell`] per
//! character. Each transition runs in four phases:
//!
//! 1. the cells are resized to the next title's length, new cells start blank;
//! 2. every non-space cell flashes random characters for a fixed number of
//!    shuffle ticks;
//! 3. cell `i` starts resolving `i * stagger` later, flashes a few more
//!    random characters and locks to its target, giving a left-to-right
//!    cascade;
//! 4. once every cell has locked the cycler settles, advances its index and
//!    re-arms the idle timer.
//!
//! All timing goes through a [`Scheduler`]; the cycler itself never waits.
//! Events that arrive out of phase are dropped.

use std::fmt;

use fastrand::Rng;
use tracing::debug;

use crate::config::{CycleTimings, SlotMachineConfig};
use crate::error::{Error, Result};
use crate::timer::{Scheduler, TimerId};

/// Non-empty rotation of display strings. Indices wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleList {
    titles: Vec<String>,
}

impl TitleList {
    pub fn new<I, S>(titles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        if titles.is_empty() {
            return Err(Error::EmptyTitleList);
        }
        Ok(Self { titles })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, index: usize) -> &str {
        &self.titles[index % self.titles.len()]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.titles.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// A freshly added cell with nothing to show yet.
    Blank,
    /// Rendered as a non-breaking space so the cell keeps its width.
    Space,
    Char(char),
}

impl Glyph {
    pub fn from_target(c: char) -> Self {
        if c == ' ' {
            Glyph::Space
        } else {
            Glyph::Char(c)
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Glyph::Blank => Ok(()),
            Glyph::Space => f.write_str("\u{00a0}"),
            Glyph::Char(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellPhase {
    Idle,
    Shuffling,
    /// Just locked; cleared after the highlight delay.
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterCell {
    pub glyph: Glyph,
    pub phase: CellPhase,
}

impl LetterCell {
    pub const BLANK: LetterCell = LetterCell {
        glyph: Glyph::Blank,
        phase: CellPhase::Idle,
    };

    fn showing(c: char) -> Self {
        Self {
            glyph: Glyph::from_target(c),
            phase: CellPhase::Idle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Shuffling { ticks: u32 },
    Resolving { resolved: usize },
    Settling,
}

/// Timer events driving a [`TitleCycler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEvent {
    /// The idle period elapsed.
    Advance,
    ShuffleTick,
    ResolveStart { cell: usize },
    ResolveTick { cell: usize, flashes: u32 },
    ClearHighlight { cell: usize },
    Settle,
}

#[derive(Debug)]
pub struct TitleCycler {
    titles: TitleList,
    alphabet: Vec<char>,
    timings: CycleTimings,
    current: usize,
    phase: Phase,
    cells: Vec<LetterCell>,
    target: Vec<char>,
    idle_timer: Option<TimerId>,
}

impl TitleCycler {
    pub fn new(titles: TitleList, alphabet: &str, timings: CycleTimings) -> Result<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(Self {
            titles,
            alphabet,
            timings,
            current: 0,
            phase: Phase::Idle,
            cells: Vec::new(),
            target: Vec::new(),
            idle_timer: None,
        })
    }

    pub fn from_config(config: &SlotMachineConfig) -> Result<Self> {
        let titles = TitleList::new(config.titles.iter().cloned())?;
        Self::new(titles, &config.alphabet, config.timings)
    }

    /// Shows the current title and arms the idle timer.
    pub fn start<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S) {
        self.cells = self.titles.get(self.current).chars().map(LetterCell::showing).collect();
        self.phase = Phase::Idle;
        self.arm_idle(timers);
    }

    /// Begins a transition to the next title. Returns `false` and changes
    /// nothing if a transition is already running.
    pub fn trigger<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S) -> bool {
        if self.is_animating() {
            debug!(phase = ?self.phase, "transition already running");
            return false;
        }
        if let Some(id) = self.idle_timer.take() {
            timers.cancel(id);
        }

        let next = self.next_index();
        self.target = self.titles.get(next).chars().collect();
        // resize first so the layout never reflows mid-animation
        self.cells.resize(self.target.len(), LetterCell::BLANK);
        debug!(from = self.current, to = next, cells = self.cells.len(), "title transition");

        self.phase = Phase::Shuffling { ticks: 0 };
        if self.timings.shuffle_ticks == 0 {
            self.begin_resolve(timers);
        } else {
            timers.schedule(self.timings.shuffle_interval_ms, CycleEvent::ShuffleTick);
        }
        true
    }

    pub fn handle<S: Scheduler<CycleEvent>>(
        &mut self,
        event: CycleEvent,
        timers: &mut S,
        rng: &mut Rng,
    ) {
        match event {
            CycleEvent::Advance => {
                self.idle_timer = None;
                self.trigger(timers);
            }
            CycleEvent::ShuffleTick => self.shuffle_tick(timers, rng),
            CycleEvent::ResolveStart { cell } => {
                if matches!(self.phase, Phase::Resolving { .. }) && cell < self.cells.len() {
                    timers.schedule(
                        self.timings.resolve_interval_ms,
                        CycleEvent::ResolveTick { cell, flashes: 0 },
                    );
                }
            }
            CycleEvent::ResolveTick { cell, flashes } => self.resolve_tick(cell, flashes, timers, rng),
            CycleEvent::ClearHighlight { cell } => {
                if let Some(c) = self.cells.get_mut(cell) {
                    if c.phase == CellPhase::Resolved {
                        c.phase = CellPhase::Idle;
                    }
                }
            }
            CycleEvent::Settle => {
                if self.phase == Phase::Settling {
                    self.current = self.next_index();
                    self.phase = Phase::Idle;
                    debug!(index = self.current, "title settled");
                    self.arm_idle(timers);
                }
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_index(&self) -> usize {
        self.titles.next_index(self.current)
    }

    pub fn cells(&self) -> &[LetterCell] {
        &self.cells
    }

    /// Current cell contents with spaces as plain `' '`.
    pub fn displayed_text(&self) -> String {
        self.cells
            .iter()
            .filter_map(|cell| match cell.glyph {
                Glyph::Blank => None,
                Glyph::Space => Some(' '),
                Glyph::Char(c) => Some(c),
            })
            .collect()
    }

    fn arm_idle<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S) {
        if let Some(id) = self.idle_timer.take() {
            timers.cancel(id);
        }
        self.idle_timer = Some(timers.schedule(self.timings.idle_ms, CycleEvent::Advance));
    }

    fn random_glyph(&self, rng: &mut Rng) -> Glyph {
        Glyph::Char(self.alphabet[rng.usize(..self.alphabet.len())])
    }

    fn shuffle_tick<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S, rng: &mut Rng) {
        let Phase::Shuffling { ticks } = self.phase else {
            return;
        };
        for i in 0..self.cells.len() {
            if self.cells[i].glyph != Glyph::Space {
                self.cells[i] = LetterCell {
                    glyph: self.random_glyph(rng),
                    phase: CellPhase::Shuffling,
                };
            }
        }

        let ticks = ticks + 1;
        if ticks >= self.timings.shuffle_ticks {
            self.begin_resolve(timers);
        } else {
            self.phase = Phase::Shuffling { ticks };
            timers.schedule(self.timings.shuffle_interval_ms, CycleEvent::ShuffleTick);
        }
    }

    fn begin_resolve<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S) {
        self.phase = Phase::Resolving { resolved: 0 };
        if self.target.is_empty() {
            self.complete(timers);
            return;
        }
        for cell in 0..self.target.len() {
            let delay = (cell as u32).saturating_mul(self.timings.stagger_ms);
            timers.schedule(delay, CycleEvent::ResolveStart { cell });
        }
    }

    fn resolve_tick<S: Scheduler<CycleEvent>>(
        &mut self,
        cell: usize,
        flashes: u32,
        timers: &mut S,
        rng: &mut Rng,
    ) {
        let Phase::Resolving { resolved } = self.phase else {
            return;
        };
        let Some(&target) = self.target.get(cell) else {
            return;
        };

        if flashes < self.timings.resolve_flashes {
            self.cells[cell].glyph = self.random_glyph(rng);
            timers.schedule(
                self.timings.resolve_interval_ms,
                CycleEvent::ResolveTick {
                    cell,
                    flashes: flashes + 1,
                },
            );
            return;
        }

        self.cells[cell] = LetterCell {
            glyph: Glyph::from_target(target),
            phase: CellPhase::Resolved,
        };
        timers.schedule(self.timings.highlight_ms, CycleEvent::ClearHighlight { cell });

        let resolved = resolved + 1;
        if resolved == self.target.len() {
            self.complete(timers);
        } else {
            self.phase = Phase::Resolving { resolved };
        }
    }

    fn complete<S: Scheduler<CycleEvent>>(&mut self, timers: &mut S) {
        self.phase = Phase::Settling;
        timers.schedule(self.timings.settle_ms, CycleEvent::Settle);
    }
}
