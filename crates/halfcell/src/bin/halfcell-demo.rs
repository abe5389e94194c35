#![forbid(unsafe_code)]

//! Interactive demo: a bouncing box, a frame-rate readout and a key echo.
//!
//! Press `q` or Ctrl+C to quit. Set `HALFCELL_LOG` (an env-filter directive
//! such as `debug`) to write logs to `HALFCELL_LOG_FILE`, `halfcell.log` by
//! default. Logs never go to the terminal being drawn on.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use halfcell::prelude::*;
use halfcell::{CompiledStyle, LoopHandle};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging()?;
    terminal::enable_raw_mode()?;
    let result = run();
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn init_logging() -> Result<()> {
    let Ok(filter) = EnvFilter::try_from_env("HALFCELL_LOG") else {
        return Ok(());
    };
    let path = std::env::var("HALFCELL_LOG_FILE").unwrap_or_else(|_| "halfcell.log".to_string());
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let background = Styler::new().background("black").compile(&AnsiKeywords)?;
    let box_style = Styler::new()
        .background("brightMagenta")
        .compile(&AnsiKeywords)?;
    let status_style = Styler::new()
        .foreground("brightYellow")
        .background("black")
        .attribute("bold")
        .compile(&AnsiKeywords)?;

    let mut tui = Tui::with_config(
        Canvas::new(CanvasOptions::stdout()),
        TuiConfig::default().with_background(background),
    );

    let fps = Rc::new(Cell::new(0.0));
    let last_key = Rc::new(RefCell::new(String::from("-")));

    tui.add_component(Bouncer::new(box_style));
    tui.add_component(Status {
        fps: fps.clone(),
        last_key: last_key.clone(),
        style: status_style,
    });

    tui.on(TuiEvent::Render, move |payload| {
        if let Some(timing) = payload.timing() {
            fps.set(timing.fps);
        }
    });

    let handle = tui.handle();
    tui.on(TuiEvent::KeyPress, move |payload| {
        let Some(key) = payload.key() else {
            return;
        };
        *last_key.borrow_mut() = describe(key);
        if key.key == "q" || key.is_interrupt() {
            handle.close();
        }
    });

    spawn_input(tui.handle());
    tui.run()?;
    Ok(())
}

/// Forward terminal input to the loop until it goes away.
fn spawn_input(handle: LoopHandle) {
    let spawned = thread::Builder::new()
        .name("halfcell-input".to_string())
        .spawn(move || {
            loop {
                let delivered = match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        handle.key_press(key_press(key))
                    }
                    Ok(Event::Resize(..)) => handle.resize(),
                    Ok(_) => true,
                    Err(error) => {
                        tracing::warn!(%error, "input read failed");
                        false
                    }
                };
                if !delivered {
                    break;
                }
            }
        });
    if let Err(error) = spawned {
        tracing::error!(%error, "failed to spawn input thread");
    }
}

fn key_press(event: KeyEvent) -> KeyPress {
    let name = match event.code {
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        KeyCode::Enter => "return".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        other => format!("{other:?}").to_lowercase(),
    };
    let mut key = KeyPress::new(name);
    key.ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    key.meta = event.modifiers.contains(KeyModifiers::ALT);
    key.shift = event.modifiers.contains(KeyModifiers::SHIFT)
        || matches!(event.code, KeyCode::Char(c) if c.is_uppercase());
    key
}

fn describe(key: &KeyPress) -> String {
    let mut out = String::new();
    if key.ctrl {
        out.push_str("ctrl+");
    }
    if key.meta {
        out.push_str("meta+");
    }
    if key.shift {
        out.push_str("shift+");
    }
    out.push_str(&key.key);
    out
}

struct Bouncer {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    style: CompiledStyle,
}

impl Bouncer {
    const WIDTH: i32 = 8;
    const HEIGHT: i32 = 4;

    fn new(style: CompiledStyle) -> Self {
        Self {
            x: 0,
            y: 1,
            dx: 1,
            dy: 1,
            style,
        }
    }
}

impl Component for Bouncer {
    fn draw(&mut self, canvas: &mut Canvas) {
        let size = canvas.size();
        let max_x = (i32::from(size.columns) - Self::WIDTH).max(0);
        let max_y = (i32::from(size.rows) - Self::HEIGHT).max(1);

        if !(0..=max_x).contains(&(self.x + self.dx)) {
            self.dx = -self.dx;
        }
        if !(1..=max_y).contains(&(self.y + self.dy)) {
            self.dy = -self.dy;
        }
        self.x = (self.x + self.dx).clamp(0, max_x);
        self.y = (self.y + self.dy).clamp(1, max_y);

        let rect = Rect::new(
            self.x as u16,
            self.y as u16,
            Self::WIDTH as u16,
            Self::HEIGHT as u16,
        );
        canvas.draw_rectangle(rect, " ", Some(&self.style));
        canvas.draw_text(
            self.x as usize + 1,
            self.y as usize + 1,
            "半角",
            Some(&self.style),
        );
    }

    fn z_index(&self) -> i32 {
        1
    }
}

struct Status {
    fps: Rc<Cell<f64>>,
    last_key: Rc<RefCell<String>>,
    style: CompiledStyle,
}

impl Component for Status {
    fn draw(&mut self, canvas: &mut Canvas) {
        let line = format!(
            "fps {:5.1} | last key: {} | q to quit",
            self.fps.get(),
            self.last_key.borrow()
        );
        canvas.draw_text(0, 0, &line, Some(&self.style));
    }

    fn z_index(&self) -> i32 {
        2
    }
}
