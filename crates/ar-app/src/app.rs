use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ar_core::config::{AppConfig, ConversionConfig};
use ar_core::frame::Grid;
use ar_core::reference::ImageRef;
use ar_core::traits::ImageLoader;
use ar_render::reveal::{RevealEngine, TickRequest};
use ar_render::ui::{self, DrawContext};
use arc_swap::ArcSwap;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::pipeline::{self, ConversionEvent};

/// Pas d'ajustement de la résolution (touches + / -).
const RESOLUTION_STEP: f64 = 0.01;

/// Application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Normal running state.
    Running,
    /// Fermeture : la boucle se termine au prochain tour.
    Quitting,
}

/// Main application struct holding all state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Config courante (lecture via arc-swap, écrite par le hot-reload et les touches).
    pub config: Arc<ArcSwap<AppConfig>>,
    loader: Arc<dyn ImageLoader>,
    reference: ImageRef,
    reference_label: String,
    /// Génération de la dernière requête de conversion.
    generation: u64,
    /// Conversion settings of the last request; a mismatch triggers a new one.
    requested: Option<ConversionConfig>,
    events_tx: flume::Sender<ConversionEvent>,
    events_rx: flume::Receiver<ConversionEvent>,
    /// Grille de la dernière conversion réussie.
    pub grid: Option<Grid>,
    /// Message de la dernière conversion échouée.
    pub error: Option<String>,
    /// Disclosure and motion of `grid`.
    pub reveal: RevealEngine,
    pending_tick: Option<TickRequest>,
}

impl App {
    /// Create the app. No conversion starts until the first loop iteration.
    pub fn new(
        config: Arc<ArcSwap<AppConfig>>,
        loader: Arc<dyn ImageLoader>,
        reference: ImageRef,
    ) -> Self {
        let reduce_motion = config.load().display.reduce_motion;
        let (events_tx, events_rx) = flume::unbounded();
        let reference_label = reference.to_string();
        Self {
            state: AppState::Running,
            config,
            loader,
            reference,
            reference_label,
            generation: 0,
            requested: None,
            events_tx,
            events_rx,
            grid: None,
            error: None,
            reveal: RevealEngine::new(reduce_motion),
            pending_tick: None,
        }
    }

    /// Main loop: events, conversion results, reveal ticks, draw.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            // === Sortie si quitting ===
            if self.state == AppState::Quitting {
                break;
            }

            // === Calcul du frame timing ===
            let fps = self.config.load().display.target_fps.max(1);
            let frame_duration = Duration::from_secs_f64(1.0 / f64::from(fps));

            let now = Instant::now();
            let elapsed = now - last_frame;

            if elapsed < frame_duration {
                // Dormir le temps restant, mais rester réactif aux événements
                if event::poll(frame_duration.saturating_sub(elapsed))? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = now;

            // === Polling événements non-bloquant ===
            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            self.sync_config();
            self.drain_events(now);
            self.advance_reveal(now);

            let config = self.config.load();
            let ctx = DrawContext {
                grid: self.grid.as_ref(),
                reveal: &self.reveal,
                config: &config.conversion,
                error: self.error.as_deref(),
                reference: &self.reference_label,
                now,
            };
            terminal.draw(|frame| ui::draw(frame, &ctx))?;
        }

        self.reveal.cancel();
        Ok(())
    }

    /// Start a new conversion with the current config. Older results become stale.
    pub fn request_conversion(&mut self) {
        let config = self.config.load();
        self.generation += 1;
        self.requested = Some(config.conversion.clone());
        self.error = None;
        log::info!("Conversion #{} demandée : {}", self.generation, self.reference);

        if let Err(e) = pipeline::spawn_conversion(
            Arc::clone(&self.loader),
            self.reference.clone(),
            config.conversion.clone(),
            config.display.probe,
            self.generation,
            self.events_tx.clone(),
        ) {
            log::error!("{e:#}");
            self.show_error(format!("{e:#}"));
        }
    }

    /// Pick up config changes from hot reload or key bindings.
    fn sync_config(&mut self) {
        let config = self.config.load();
        self.reveal.set_reduce_motion(config.display.reduce_motion);
        if self.requested.as_ref() != Some(&config.conversion) {
            self.request_conversion();
        }
    }

    fn drain_events(&mut self, now: Instant) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event, now);
        }
    }

    /// Apply one conversion result. Returns `false` if it was stale.
    fn apply_event(&mut self, event: ConversionEvent, now: Instant) -> bool {
        if event.generation != self.generation {
            log::debug!(
                "Conversion #{} périmée ignorée (courante #{})",
                event.generation,
                self.generation
            );
            return false;
        }
        match event.outcome {
            Ok(conversion) => {
                let rows = conversion.grid.height();
                self.grid = Some(conversion.grid);
                self.error = None;
                self.pending_tick = self.reveal.present(rows, now);
            }
            Err(e) => {
                log::warn!("Conversion échouée : {e}");
                self.show_error(e.to_string());
            }
        }
        true
    }

    fn show_error(&mut self, message: String) {
        self.grid = None;
        self.error = Some(message);
        self.reveal.clear();
        self.pending_tick = None;
    }

    fn advance_reveal(&mut self, now: Instant) {
        if let Some(request) = self.pending_tick.take() {
            self.pending_tick = self.reveal.on_tick(request, now);
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = *event
        else {
            return;
        };

        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('r') => self.request_conversion(),
            KeyCode::Char('i') => {
                self.toggle_config(|c| c.conversion.invert = !c.conversion.invert);
            }
            KeyCode::Char('g') => {
                self.toggle_config(|c| c.conversion.grayscale = !c.conversion.grayscale);
            }
            KeyCode::Char('p') => {
                self.toggle_config(|c| c.conversion.palette = c.conversion.palette.next());
            }
            KeyCode::Char('+' | '=') => {
                self.toggle_config(|c| {
                    c.conversion.resolution = step_resolution(c.conversion.resolution, 1.0);
                });
            }
            KeyCode::Char('-') => {
                self.toggle_config(|c| {
                    c.conversion.resolution = step_resolution(c.conversion.resolution, -1.0);
                });
            }
            _ => {}
        }
    }

    /// Helper: clone config, mutate, store.
    fn toggle_config(&mut self, mutate: impl FnOnce(&mut AppConfig)) {
        let config = self.config.load();
        let mut new = (**config).clone();
        mutate(&mut new);
        self.config.store(Arc::new(new));
    }
}

/// One resolution step up or down, kept on the 0.01 grid and inside [0.01, 1].
fn step_resolution(current: f64, direction: f64) -> f64 {
    let steps = (current / RESOLUTION_STEP).round() + direction;
    (steps * RESOLUTION_STEP).clamp(RESOLUTION_STEP, 1.0)
}
