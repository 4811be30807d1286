use std::time::{Duration, Instant};

use crate::motion::{FadeIn, RowMotion};

/// Durée totale de la révélation, de la première à la dernière ligne.
pub const REVEAL_DURATION: Duration = Duration::from_millis(4000);

/// Disclosure state.
///
/// # Example
/// ```
/// use ar_render::reveal::{RevealEngine, RevealPhase};
/// let engine = RevealEngine::new(false);
/// assert_eq!(engine.phase(), RevealPhase::Empty);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    /// Nothing to show (no grid yet, or the last conversion failed).
    Empty,
    /// Rows are being disclosed on every tick.
    Revealing,
    /// Every row is visible; rows float, no more ticks are needed.
    Settled,
}

/// Permission for exactly one tick of one disclosure run.
///
/// Issued by [`RevealEngine::present`] and [`RevealEngine::on_tick`]; a
/// request from an older run, or delivered after [`RevealEngine::cancel`], is
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRequest {
    run: u64,
}

/// How one revealed row is drawn at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPresentation {
    /// Horizontal displacement, percent of the row width.
    pub offset_pct: f64,
    /// Foreground opacity in [0, 1].
    pub opacity: f32,
}

impl RowPresentation {
    /// Displacement rounded to whole terminal columns for a row `width` cells wide.
    #[must_use]
    pub fn offset_columns(&self, width: usize) -> i64 {
        (self.offset_pct / 100.0 * width as f64).round() as i64
    }
}

/// Progressive row disclosure followed by per-row ambient motion.
///
/// The engine only knows the row count of the grid it reveals; the grid itself
/// stays with its owner and is borrowed at draw time.
///
/// # Example
/// ```
/// use std::time::{Duration, Instant};
/// use ar_render::reveal::{RevealEngine, RevealPhase};
///
/// let mut engine = RevealEngine::new(false);
/// let t0 = Instant::now();
/// let tick = engine.present(10, t0).unwrap();
/// let tick = engine.on_tick(tick, t0 + Duration::from_millis(2000)).unwrap();
/// assert_eq!(engine.revealed_rows(), 5);
/// assert!(engine.on_tick(tick, t0 + Duration::from_secs(4)).is_none());
/// assert_eq!(engine.phase(), RevealPhase::Settled);
/// ```
#[derive(Debug)]
pub struct RevealEngine {
    phase: RevealPhase,
    run: u64,
    total_rows: usize,
    revealed_rows: usize,
    started_at: Option<Instant>,
    settled_at: Option<Instant>,
    /// Instant where each revealed row appeared, by row index.
    revealed_at: Vec<Instant>,
    /// Filled once, when the run settles.
    motions: Vec<RowMotion>,
    cancelled: bool,
    reduce_motion: bool,
}

impl RevealEngine {
    /// Create an empty engine.
    #[must_use]
    pub fn new(reduce_motion: bool) -> Self {
        Self {
            phase: RevealPhase::Empty,
            run: 0,
            total_rows: 0,
            revealed_rows: 0,
            started_at: None,
            settled_at: None,
            revealed_at: Vec::new(),
            motions: Vec::new(),
            cancelled: false,
            reduce_motion,
        }
    }

    /// Disable fades and oscillation (rows still appear on schedule).
    pub fn set_reduce_motion(&mut self, reduce_motion: bool) {
        self.reduce_motion = reduce_motion;
    }

    /// Start revealing a fresh grid of `total_rows` rows, discarding any
    /// previous run.
    ///
    /// Returns the request for the next tick, or `None` if the run settled
    /// immediately.
    pub fn present(&mut self, total_rows: usize, now: Instant) -> Option<TickRequest> {
        self.reset();
        self.phase = RevealPhase::Revealing;
        self.total_rows = total_rows;
        self.started_at = Some(now);
        self.revealed_at.reserve(total_rows);
        log::debug!("Révélation #{} : {total_rows} lignes", self.run);
        self.advance(now);
        self.next_request()
    }

    /// Drop the current grid and go back to [`RevealPhase::Empty`].
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Deliver a tick. Stale requests are discarded.
    ///
    /// Returns the request for the following tick while still revealing.
    pub fn on_tick(&mut self, request: TickRequest, now: Instant) -> Option<TickRequest> {
        if self.cancelled || request.run != self.run || self.phase != RevealPhase::Revealing {
            log::debug!("Tick périmé ignoré (run {} ≠ {})", request.run, self.run);
            return None;
        }
        self.advance(now);
        self.next_request()
    }

    /// Invalidate every outstanding tick. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("Révélation #{} annulée", self.run);
        }
        self.cancelled = true;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Rows currently disclosed (`revealedRowCount`).
    #[must_use]
    pub fn revealed_rows(&self) -> usize {
        self.revealed_rows
    }

    /// Rows of the grid being revealed.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Motion table, populated once the run has settled.
    #[must_use]
    pub fn motions(&self) -> &[RowMotion] {
        &self.motions
    }

    /// `true` while ticks are still wanted.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.phase == RevealPhase::Revealing && !self.cancelled
    }

    /// How row `row` should be drawn at `now`, or `None` if it is not revealed.
    #[must_use]
    pub fn row_presentation(&self, row: usize, now: Instant) -> Option<RowPresentation> {
        if row >= self.revealed_rows {
            return None;
        }
        let still = RowPresentation {
            offset_pct: 0.0,
            opacity: 1.0,
        };
        if self.reduce_motion {
            return Some(still);
        }
        match self.phase {
            RevealPhase::Empty => None,
            RevealPhase::Revealing => {
                let appeared = self.revealed_at.get(row)?;
                let since_reveal = now.saturating_duration_since(*appeared);
                let opacity = FadeIn::for_row(row).opacity(since_reveal);
                Some(RowPresentation {
                    offset_pct: 0.0,
                    opacity,
                })
            }
            RevealPhase::Settled => {
                let (Some(settled_at), Some(motion)) = (self.settled_at, self.motions.get(row))
                else {
                    return Some(still);
                };
                Some(RowPresentation {
                    offset_pct: motion.offset_pct(now.saturating_duration_since(settled_at)),
                    opacity: 1.0,
                })
            }
        }
    }

    fn reset(&mut self) {
        self.run = self.run.wrapping_add(1);
        self.phase = RevealPhase::Empty;
        self.total_rows = 0;
        self.revealed_rows = 0;
        self.started_at = None;
        self.settled_at = None;
        self.revealed_at.clear();
        self.motions.clear();
        self.cancelled = false;
    }

    fn advance(&mut self, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let progress = (elapsed.as_secs_f64() / REVEAL_DURATION.as_secs_f64()).min(1.0);
        let target = ((progress * self.total_rows as f64).floor() as usize).min(self.total_rows);

        if target > self.revealed_rows {
            self.revealed_at.resize(target, now);
            self.revealed_rows = target;
        }

        if progress >= 1.0 {
            self.revealed_rows = self.total_rows;
            self.revealed_at.resize(self.total_rows, now);
            self.phase = RevealPhase::Settled;
            self.settled_at = Some(now);
            self.motions = (0..self.total_rows).map(RowMotion::for_row).collect();
            log::info!("Révélation terminée : {} lignes", self.total_rows);
        }
    }

    fn next_request(&self) -> Option<TickRequest> {
        self.is_ticking().then_some(TickRequest { run: self.run })
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(false)
    }
}
