//! High‑level Application abstraction inspired by GPUI.

use crate::component::{component_ref, Action, Component, ComponentRef, Event};
use crate::error::{RuntimeSnafu, TerminalSnafu};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use snafu::ResultExt;
use std::io::{self, stdout};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Application context providing access to global services.
#[derive(Clone)]
pub struct AppContext {
    /// The root component to render, if set by the user.
    root: Arc<Mutex<Option<ComponentRef>>>,
    /// Internal: Channel to trigger a re-render.
    re_render_tx: mpsc::UnboundedSender<()>,
}

impl AppContext {
    /// Create a context that is not attached to a running terminal.
    ///
    /// The receiver yields one message per requested refresh. Useful for
    /// driving components against a `TestBackend`.
    pub fn detached() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (re_render_tx, re_render_rx) = mpsc::unbounded_channel();
        let cx = Self {
            root: Arc::new(Mutex::new(None)),
            re_render_tx,
        };
        (cx, re_render_rx)
    }

    /// Set the root component of the application.
    pub fn set_root<C: Component>(&self, root: C) -> crate::Result<()> {
        let mut guard = self.root.lock().map_err(|_| crate::Error::LockPoisoned)?;
        *guard = Some(component_ref(root));
        drop(guard);
        self.refresh();
        Ok(())
    }

    /// Trigger a re-render.
    pub fn refresh(&self) {
        let _ = self.re_render_tx.send(());
    }
}

/// A specialized context passed to component methods.
pub struct Context<V: ?Sized + Send + Sync> {
    pub app: AppContext,
    pub area: Rect,
    view: PhantomData<fn(&V)>,
}

impl<V: ?Sized + Send + Sync> Context<V> {
    pub fn new(app: AppContext, area: Rect) -> Self {
        Self {
            app,
            area,
            view: PhantomData,
        }
    }

    /// Access the underlying AppContext.
    pub fn app(&self) -> &AppContext {
        &self.app
    }

    /// Cast this context to another view type.
    pub fn cast<U: ?Sized + Send + Sync + 'static>(&self) -> Context<U> {
        Context::new(self.app.clone(), self.area)
    }

    /// Cast this context to another view type that renders into `area`.
    pub fn child<U: ?Sized + Send + Sync + 'static>(&self, area: Rect) -> Context<U> {
        Context::new(self.app.clone(), area)
    }

    /// Explicitly trigger a re-render.
    pub fn notify(&self) {
        self.app.refresh();
    }
}

/// Main application handle.
pub struct Application {
    tick_rate: Duration,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// How long to wait for terminal input before checking for re-renders.
    pub fn tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Run the application with the given closure that receives a context.
    pub fn run<F, E>(self, setup: F) -> Result<(), E>
    where
        F: FnOnce(&AppContext) -> Result<(), E>,
        E: From<crate::Error>,
    {
        let rt = Runtime::new().context(RuntimeSnafu)?;

        let (app_context, re_render_rx) = AppContext::detached();

        let _guard = rt.enter();
        setup(&app_context)?;
        drop(_guard);

        let root = {
            let guard = app_context.root.lock().map_err(|_| crate::Error::LockPoisoned)?;
            guard.clone().unwrap_or_else(|| component_ref(DummyView))
        };

        rt.block_on(async move { self.run_loop(app_context, root, re_render_rx).await })
            .map_err(E::from)
    }

    async fn run_loop(
        &self,
        app: AppContext,
        root: ComponentRef,
        re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> crate::Result<()> {
        enable_raw_mode().context(TerminalSnafu)?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, event::EnableFocusChange)
            .context(TerminalSnafu)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context(TerminalSnafu)?;

        // The terminal is restored below whether or not the root ever starts.
        let result = match terminal.size().context(TerminalSnafu) {
            Ok(size) => match mount_root(&app, &root, Rect::new(0, 0, size.width, size.height)) {
                Ok(()) => self.run_app_loop(app, &mut terminal, root, re_render_rx).await,
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };

        disable_raw_mode().context(TerminalSnafu)?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            event::DisableFocusChange
        )
        .context(TerminalSnafu)?;
        terminal.show_cursor().context(TerminalSnafu)?;

        result
    }

    async fn run_app_loop(
        &self,
        app: AppContext,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        root: ComponentRef,
        mut re_render_rx: mpsc::UnboundedReceiver<()>,
    ) -> crate::Result<()> {
        // Initial render
        app.refresh();

        loop {
            tokio::select! {
                _ = re_render_rx.recv() => {
                    let mut render_result = Ok(());
                    terminal.draw(|frame| {
                        let area = frame.area();
                        render_result = root.update_with_cx(&app, area, |c, cx| c.render_any(frame, cx));
                    }).context(TerminalSnafu)?;
                    render_result?;
                }
                event_ready = async { event::poll(self.tick_rate) } => {
                    if let Ok(true) = event_ready {
                        let crossterm_event = event::read().context(TerminalSnafu)?;
                        let internal_event = match crossterm_event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            CrosstermEvent::FocusGained => Some(Event::FocusGained),
                            CrosstermEvent::FocusLost => Some(Event::FocusLost),
                            CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
                            _ => None,
                        };

                        if let Some(event) = internal_event {
                            let size = terminal.size().context(TerminalSnafu)?;
                            let area = Rect::new(0, 0, size.width, size.height);

                            let quit = root.update_with_cx(&app, area, |c, cx| {
                                let action = c.handle_event_any(event, cx);
                                if action == Some(Action::Quit) {
                                    // Lifecycle: shut down before leaving the loop
                                    c.on_shutdown_any(cx);
                                    true
                                } else {
                                    false
                                }
                            })?;
                            app.refresh(); // Trigger refresh after any event handling

                            if quit {
                                tracing::info!("application quit requested");
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Lifecycle: mount then enter the root component.
fn mount_root(app: &AppContext, root: &ComponentRef, area: Rect) -> crate::Result<()> {
    root.update_with_cx(app, area, |c, cx| {
        c.on_mount_any(cx);
        c.on_enter_any(cx);
    })
}

struct DummyView;

impl Component for DummyView {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context<Self>) {
        let paragraph = ratatui::widgets::Paragraph::new("No component set")
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(paragraph, cx.area);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut Context<Self>) -> Option<Action> {
        match event {
            Event::Key(key) if key.code == crossterm::event::KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}
