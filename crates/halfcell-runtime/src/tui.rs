#![forbid(unsafe_code)]

//! The orchestration loop.
//!
//! [`Tui::run`] starts an update cadence and a render cadence, both feeding one
//! channel, and consumes ticks in arrival order until a close request:
//!
//! - **update**: clear the visible area to the background style, draw every
//!   component in ascending z-order, fire [`TuiEvent::Update`];
//! - **render**: write the frame, fire [`TuiEvent::Render`] with its timing;
//! - **resize**: rebuild the buffer, force a full frame, fire
//!   [`TuiEvent::Resize`];
//! - **key press**: fire [`TuiEvent::KeyPress`];
//! - **close**: show the cursor, fire [`TuiEvent::Close`], stop the cadences
//!   and return.
//!
//! Listener tasks queued while handling a tick run before the next tick is
//! taken. External sources (OS signals, input readers, other threads) reach the
//! loop through a [`LoopHandle`].

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use halfcell_core::signals::{self, OsSignal};
use halfcell_render::{Canvas, FrameTiming};
use halfcell_style::CompiledStyle;

use crate::cadence::{Cadence, CadenceKind, TickAck};
use crate::component::{Component, ComponentId, ComponentList};
use crate::config::TuiConfig;
use crate::emitter::{Callback, EventEmitter};
use crate::event::{EventPayload, KeyPress, TuiEvent};

/// One unit of work for the loop.
#[derive(Debug)]
pub(crate) enum Tick {
    Update(TickAck),
    Render(TickAck),
    Resize,
    Key(KeyPress),
    Close,
}

/// Whether the loop keeps going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// Cloneable, thread-safe handle for raising loop signals.
///
/// Every method returns `false` once the loop's [`Tui`] is gone.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    sender: mpsc::Sender<Tick>,
}

impl LoopHandle {
    /// Ask the loop to close.
    pub fn close(&self) -> bool {
        self.sender.send(Tick::Close).is_ok()
    }

    /// Tell the loop the terminal size changed.
    pub fn resize(&self) -> bool {
        self.sender.send(Tick::Resize).is_ok()
    }

    /// Deliver a key press.
    pub fn key_press(&self, key: KeyPress) -> bool {
        self.sender.send(Tick::Key(key)).is_ok()
    }

    /// Route an OS signal: resize to [`resize`](Self::resize), everything
    /// else to [`close`](Self::close).
    pub fn signal(&self, signal: OsSignal) -> bool {
        if signal.is_close() {
            self.close()
        } else {
            self.resize()
        }
    }
}

/// Canvas, components and lifecycle events driven by two cadences.
pub struct Tui {
    canvas: Canvas,
    emitter: EventEmitter<TuiEvent, EventPayload>,
    components: ComponentList,
    update_interval: Duration,
    background: Option<CompiledStyle>,
    install_signal_hooks: bool,
    sender: mpsc::Sender<Tick>,
    receiver: mpsc::Receiver<Tick>,
    closed: bool,
}

impl Tui {
    /// Loop over `canvas` with the default configuration.
    pub fn new(canvas: Canvas) -> Self {
        Self::with_config(canvas, TuiConfig::default())
    }

    /// Loop over `canvas` with `config`.
    pub fn with_config(canvas: Canvas, config: TuiConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        let update_interval = config
            .update_interval()
            .unwrap_or_else(|| canvas.refresh_interval());
        Self {
            emitter: EventEmitter::new().with_once_policy(config.once_policy()),
            components: ComponentList::default(),
            update_interval,
            background: config.background().cloned(),
            install_signal_hooks: config.install_signal_hooks(),
            sender,
            receiver,
            closed: false,
            canvas,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Interval between update ticks.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// The lifecycle event emitter.
    pub fn emitter(&self) -> &EventEmitter<TuiEvent, EventPayload> {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut EventEmitter<TuiEvent, EventPayload> {
        &mut self.emitter
    }

    /// Listen to a lifecycle event.
    pub fn on(
        &mut self,
        event: TuiEvent,
        f: impl Fn(&EventPayload) + 'static,
    ) -> Callback<EventPayload> {
        self.emitter.on(event, f)
    }

    /// Listen to the next occurrence of a lifecycle event.
    pub fn once(
        &mut self,
        event: TuiEvent,
        f: impl Fn(&EventPayload) + 'static,
    ) -> Callback<EventPayload> {
        self.emitter.once(event, f)
    }

    /// A handle for raising loop signals from anywhere.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            sender: self.sender.clone(),
        }
    }

    /// Whether the close path already ran.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Register a component.
    pub fn add_component(&mut self, component: impl Component + 'static) -> ComponentId {
        let id = self.components.add(Box::new(component));
        self.emitter
            .emit(&TuiEvent::AddComponent, EventPayload::Component(id));
        tracing::debug!(%id, "component added");
        id
    }

    /// Unregister a component. Returns `false` for unknown ids.
    pub fn remove_component(&mut self, id: ComponentId) -> bool {
        if self.components.remove(id).is_none() {
            return false;
        }
        self.emitter
            .emit(&TuiEvent::RemoveComponent, EventPayload::Component(id));
        tracing::debug!(%id, "component removed");
        true
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// One update step: clear to the background, draw components, notify.
    pub fn update(&mut self) {
        let bounds = self.canvas.size().bounds();
        self.canvas
            .draw_rectangle(bounds, " ", self.background.as_ref());
        self.components.draw_all(&mut self.canvas);
        self.emitter.emit(&TuiEvent::Update, EventPayload::None);
    }

    /// One render step: write the frame and notify with its timing.
    pub fn render(&mut self) -> io::Result<FrameTiming> {
        let timing = self.canvas.render()?;
        self.emitter
            .emit(&TuiEvent::Render, EventPayload::Timing(timing));
        Ok(timing)
    }

    /// Rebuild for the current terminal size and notify.
    pub fn handle_resize(&mut self) -> io::Result<()> {
        self.canvas.resize()?;
        let size = self.canvas.size();
        tracing::debug!(rows = size.rows, columns = size.columns, "resized");
        self.emitter
            .emit(&TuiEvent::Resize, EventPayload::Size(size));
        Ok(())
    }

    /// Deliver a key press to listeners.
    ///
    /// On platforms without native interrupt signals, Ctrl+C closes the loop.
    pub fn handle_key(&mut self, key: KeyPress) -> io::Result<bool> {
        let interrupt = cfg!(not(unix)) && key.is_interrupt();
        self.emitter.emit(&TuiEvent::KeyPress, EventPayload::Key(key));
        if interrupt {
            self.close()?;
        }
        Ok(interrupt)
    }

    /// Run the close path: show the cursor, notify, drain listeners.
    ///
    /// Later calls do nothing.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.canvas.show_cursor()?;
        self.emitter.emit(&TuiEvent::Close, EventPayload::None);
        self.emitter.run_pending();
        tracing::info!("loop closed");
        Ok(())
    }

    /// Consume ticks until a close request.
    ///
    /// Returns immediately if the loop was already closed. An I/O failure
    /// while writing a frame runs the close path and is returned.
    pub fn run(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }

        let _signals = if self.install_signal_hooks {
            let handle = self.handle();
            match signals::install(move |signal| {
                handle.signal(signal);
            }) {
                Ok(guard) => Some(guard),
                Err(error) => {
                    tracing::warn!(%error, "signal hooks unavailable");
                    None
                }
            }
        } else {
            None
        };

        let update = Cadence::spawn(
            CadenceKind::Update,
            self.update_interval,
            self.sender.clone(),
            Tick::Update,
        );
        let render = Cadence::spawn(
            CadenceKind::Render,
            self.canvas.refresh_interval(),
            self.sender.clone(),
            Tick::Render,
        );
        tracing::info!(
            update_interval = ?self.update_interval,
            refresh_interval = ?self.canvas.refresh_interval(),
            components = self.components.len(),
            "loop started"
        );

        let result = loop {
            // The loop holds a sender itself, so the channel never disconnects.
            let Ok(tick) = self.receiver.recv() else {
                break Ok(());
            };
            match self.dispatch(tick) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Close) => break Ok(()),
                Err(error) => {
                    tracing::error!(%error, "loop aborted");
                    let _ = self.close();
                    break Err(error);
                }
            }
        };

        update.stop();
        render.stop();
        result
    }

    fn dispatch(&mut self, tick: Tick) -> io::Result<Flow> {
        match tick {
            Tick::Update(ack) => {
                let start = Instant::now();
                self.update();
                self.emitter.run_pending();
                ack.done(start.elapsed());
            }
            Tick::Render(ack) => {
                let start = Instant::now();
                self.render()?;
                self.emitter.run_pending();
                ack.done(start.elapsed());
            }
            Tick::Resize => {
                self.handle_resize()?;
                self.emitter.run_pending();
            }
            Tick::Key(key) => {
                let closed = self.handle_key(key)?;
                self.emitter.run_pending();
                if closed {
                    return Ok(Flow::Close);
                }
            }
            Tick::Close => {
                self.close()?;
                return Ok(Flow::Close);
            }
        }
        Ok(Flow::Continue)
    }
}

impl std::fmt::Debug for Tui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tui")
            .field("canvas", &self.canvas)
            .field("components", &self.components.len())
            .field("update_interval", &self.update_interval)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
