//! Ratatui-based terminal UI.
//!
//! Two routes behind a navigation bar: `/` (landing) and `/predict` (the
//! classification form). Requests run on worker threads; their outcomes come
//! back over a channel that the event loop drains every tick, so the form
//! stays editable while a classification is in flight.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::data::ApiClient;
use crate::domain::{ClassificationResult, Field, HealthStatus, PerformanceMetrics};
use crate::error::{AppError, SubmitError};
use crate::form::{Classifier, Dispatch, Pending, Phase, Session, Ticket};

mod views;

/// Start the TUI.
pub fn run(settings: Settings) -> Result<(), AppError> {
    let client = Arc::new(ApiClient::new(settings)?);
    let (tx, rx) = mpsc::channel();
    let workers = Workers { client, tx };

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(workers.client.base_url());
    workers.check_backend();
    event_loop(&mut app, &workers, &rx, &mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Client-side routes shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Predict,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Landing, Route::Predict];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Predict => "/predict",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Predict => "Classify",
        }
    }

    fn index(self) -> usize {
        match self {
            Route::Landing => 0,
            Route::Predict => 1,
        }
    }
}

/// Backend reachability as shown on the landing page.
#[derive(Debug, Clone, PartialEq)]
enum BackendStatus {
    Checking,
    Online(HealthStatus),
    Offline(String),
}

/// Results coming back from worker threads.
enum WorkerEvent {
    Classified {
        ticket: Ticket,
        outcome: Result<ClassificationResult, SubmitError>,
    },
    Health(Result<HealthStatus, SubmitError>),
    Metrics(Result<PerformanceMetrics, SubmitError>),
}

/// Work the event loop must start on the app's behalf.
#[derive(Debug)]
enum Effect {
    Quit,
    Classify(Pending),
    CheckBackend,
}

struct Workers {
    client: Arc<ApiClient>,
    tx: Sender<WorkerEvent>,
}

impl Workers {
    fn classify(&self, pending: Pending) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = client.classify(&pending.request);
            // The receiver is gone only when the UI has exited.
            let _ = tx.send(WorkerEvent::Classified {
                ticket: pending.ticket,
                outcome,
            });
        });
    }

    fn check_backend(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerEvent::Health(client.health()));
            let _ = tx.send(WorkerEvent::Metrics(client.performance()));
        });
    }
}

fn event_loop<B: ratatui::backend::Backend>(
    app: &mut App,
    workers: &Workers,
    rx: &Receiver<WorkerEvent>,
    terminal: &mut Terminal<B>,
) -> Result<(), AppError> {
    let mut needs_redraw = true;
    loop {
        while let Ok(ev) = rx.try_recv() {
            app.apply(ev);
            needs_redraw = true;
        }

        if needs_redraw {
            terminal
                .draw(|f| app.draw(f))
                .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(100))
            .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
        {
            // Keep the spinner moving.
            if app.session.is_loading() {
                app.tick = app.tick.wrapping_add(1);
                needs_redraw = true;
            }
            continue;
        }

        match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Some(Effect::Quit) => break,
                    Some(Effect::Classify(pending)) => workers.classify(pending),
                    Some(Effect::CheckBackend) => workers.check_backend(),
                    None => {}
                }
                needs_redraw = true;
            }
            Event::Resize(_, _) => {
                needs_redraw = true;
            }
            _ => {}
        }
    }
    tracing::info!("tui exiting");
    Ok(())
}

struct App {
    route: Route,
    session: Session,
    focus: Field,
    base_url: String,
    backend: BackendStatus,
    metrics: Option<PerformanceMetrics>,
    status: String,
    tick: usize,
}

impl App {
    fn new(base_url: &str) -> Self {
        Self {
            route: Route::Landing,
            session: Session::new(),
            focus: Field::OrbitalPeriod,
            base_url: base_url.to_string(),
            backend: BackendStatus::Checking,
            metrics: None,
            status: "Checking backend...".to_string(),
            tick: 0,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Effect::Quit);
        }
        match key.code {
            KeyCode::F(1) => {
                self.navigate(Route::Landing);
                return None;
            }
            KeyCode::F(2) => {
                self.navigate(Route::Predict);
                return None;
            }
            _ => {}
        }

        match self.route {
            Route::Landing => self.handle_landing_key(key.code),
            Route::Predict => self.handle_form_key(key),
        }
    }

    fn handle_landing_key(&mut self, code: KeyCode) -> Option<Effect> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Effect::Quit),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right | KeyCode::Char('p') => {
                self.navigate(Route::Predict);
            }
            KeyCode::Char('h') => {
                self.backend = BackendStatus::Checking;
                self.status = "Checking backend...".to_string();
                return Some(Effect::CheckBackend);
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => self.navigate(Route::Landing),
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Down | KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Backspace => self.session.pop_char(self.focus),
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.push_char(self.focus, c);
            }
            _ => {}
        }
        None
    }

    fn submit(&mut self) -> Option<Effect> {
        match crate::form::prepare(&mut self.session) {
            Dispatch::Started(pending) => {
                self.status = "Classifying...".to_string();
                Some(Effect::Classify(pending))
            }
            Dispatch::Rejected => {
                self.status = "Fix the form and press Enter again.".to_string();
                None
            }
            Dispatch::Busy => {
                self.status = "A classification is already in flight.".to_string();
                None
            }
        }
    }

    /// Switch views. Leaving the form discards its state and orphans any
    /// request still in flight.
    fn navigate(&mut self, to: Route) {
        if to == self.route {
            return;
        }
        if self.route == Route::Predict {
            self.session.reset();
            self.focus = Field::OrbitalPeriod;
        }
        tracing::debug!(from = self.route.path(), to = to.path(), "navigate");
        self.route = to;
        self.status = match to {
            Route::Landing => String::new(),
            Route::Predict => "Enter the transit measurements, then press Enter.".to_string(),
        };
    }

    fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Classified { ticket, outcome } => {
                if !crate::form::settle(&mut self.session, ticket, outcome) {
                    return;
                }
                self.status = match self.session.phase() {
                    Phase::Ready(result) => format!("Prediction: {}", result.prediction),
                    Phase::Failed(_) => "Classification failed.".to_string(),
                    Phase::Idle | Phase::Loading => String::new(),
                };
            }
            WorkerEvent::Health(Ok(health)) => {
                self.status = format!("Backend {}", health.status);
                self.backend = BackendStatus::Online(health);
            }
            WorkerEvent::Health(Err(err)) => {
                let msg = err.user_message();
                tracing::warn!(error = %msg, "health check failed");
                self.status = "Backend unreachable.".to_string();
                self.backend = BackendStatus::Offline(msg);
            }
            WorkerEvent::Metrics(Ok(metrics)) => self.metrics = Some(metrics),
            WorkerEvent::Metrics(Err(err)) => {
                tracing::debug!(error = %err, "metrics unavailable");
                self.metrics = None;
            }
        }
    }
}
