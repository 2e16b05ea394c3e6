//! Application orchestration layer
//!
//! Wires the input thread, the load worker, and the renderer around a [`RenderLoopState`].
//! The loop itself holds no data state; everything it shows comes from the browser.

use crate::browser::Browser;
use crate::config::BrowserConfig;
use crate::dataset::load_worker_loop;
use crate::error::{BrowserError, Result};
use crate::input::{spawn_input_thread, RawInputEvent};
use crate::render::protocol::{LoadCommand, LoadResponse};
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const LOAD_CHANNEL_CAPACITY: usize = 8;

/// Application orchestrator
pub struct Application {
    render_state: RenderLoopState,
    ui_renderer: Box<dyn UIRenderer>,
    initial_file: Option<PathBuf>,
}

impl Application {
    pub fn new(
        config: &BrowserConfig,
        ui_renderer: Box<dyn UIRenderer>,
        initial_file: Option<PathBuf>,
    ) -> Self {
        Self {
            render_state: RenderLoopState::new(Browser::with_min_search_length(
                config.min_search_length,
            )),
            ui_renderer,
            initial_file,
        }
    }

    /// Run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop().await;
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.session(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::error!("input thread panicked");
        }
        result
    }

    /// Browse until quit or failure. The load worker is stopped before this returns either way.
    async fn session(&mut self, mut input_rx: UnboundedReceiver<RawInputEvent>) -> Result<()> {
        let (load_tx, load_rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        let worker = tokio::spawn(load_worker_loop(load_rx, response_tx));

        let result = self.drive(&mut input_rx, &mut response_rx, &load_tx).await;

        let _ = load_tx.send(LoadCommand::Shutdown).await;
        if let Err(err) = worker.await {
            log::error!("load worker failed: {err}");
        }
        result
    }

    async fn drive(
        &mut self,
        input_rx: &mut UnboundedReceiver<RawInputEvent>,
        response_rx: &mut mpsc::Receiver<LoadResponse>,
        load_tx: &mpsc::Sender<LoadCommand>,
    ) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height);
        view_state.refresh(self.render_state.browser());

        if let Some(path) = self.initial_file.take() {
            self.render_state
                .open_file(path, &mut view_state, load_tx)
                .await?;
        }
        self.ui_renderer.render(&view_state)?;

        loop {
            tokio::select! {
                event = input_rx.recv() => {
                    let Some(event) = event else {
                        return Err(BrowserError::ui("terminal input stopped"));
                    };
                    if !self
                        .render_state
                        .process_event(event, &mut view_state, load_tx)
                        .await?
                    {
                        return Ok(());
                    }
                }
                Some(response) = response_rx.recv() => {
                    self.render_state.handle_response(response, &mut view_state);
                }
            }

            self.ui_renderer.render(&view_state)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::MockUIRenderer;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::io::Write;
    use tokio::time::timeout;

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn app(renderer: MockUIRenderer, initial_file: Option<PathBuf>) -> Application {
        Application::new(&BrowserConfig::default(), Box::new(renderer), initial_file)
    }

    fn ctrl_c() -> RawInputEvent {
        RawInputEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
    }

    #[tokio::test]
    async fn quit_ends_session_cleanly() {
        let mut app = app(MockUIRenderer::new(), None);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ctrl_c()).unwrap();

        let result = timeout(TIMEOUT, app.session(rx)).await.expect("session hung");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn render_failure_still_stops_worker() {
        let mut renderer = MockUIRenderer::new();
        renderer.fail_render = true;
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "NAMA\nSiti\n").unwrap();
        let mut app = app(renderer, Some(file.path().to_path_buf()));
        let (_tx, rx) = mpsc::unbounded_channel();

        // Returning at all means the worker received Shutdown and was joined
        let result = timeout(TIMEOUT, app.session(rx)).await.expect("session hung");
        assert!(matches!(result, Err(BrowserError::UIError { .. })));
    }

    #[tokio::test]
    async fn closed_input_is_reported() {
        let mut app = app(MockUIRenderer::new(), None);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(tx);

        let result = timeout(TIMEOUT, app.session(rx)).await.expect("session hung");
        assert!(matches!(result, Err(BrowserError::UIError { .. })));
    }
}
