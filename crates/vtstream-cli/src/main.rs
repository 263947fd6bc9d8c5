use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event as CEvent, KeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vtstream_common::types::Size;
use vtstream_core::input::{InputEncoder, Key, KeyEvent, Modifiers};
use vtstream_core::{Event, HostCommand, SharedScreen, Terminal};

#[derive(Parser, Debug)]
#[command(author, version, about = "vtstream terminal core test harness", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Terminal rows (defaults to current terminal size)
    #[arg(long)]
    rows: Option<u16>,

    /// Terminal columns (defaults to current terminal size)
    #[arg(long)]
    cols: Option<u16>,

    /// Override shell to use (e.g., /bin/sh, /bin/bash)
    #[arg(long)]
    shell: Option<String>,

    /// Use minimal environment (env -i)
    #[arg(long)]
    minimal_env: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug { "vtstream=debug" } else { "vtstream=info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vtstream CLI");

    let (width, height) = terminal::size().unwrap_or((80, 24));
    let size = Size::new(
        args.cols.unwrap_or(if width > 0 { width } else { 80 }),
        args.rows.unwrap_or(if height > 0 { height } else { 24 }),
    );

    info!("Terminal size: {:?}", size);

    if size.rows == 0 || size.cols == 0 {
        error!("Invalid terminal size detected: {:?}", size);
        return Err(anyhow::anyhow!("Terminal must have non-zero size"));
    }

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), Hide)?;

    if let Some(shell) = &args.shell {
        std::env::set_var("SHELL", shell);
        info!("Using shell override: {}", shell);
    }

    if args.minimal_env {
        std::env::set_var("VTSTREAM_MINIMAL_ENV", "1");
        info!("Using minimal environment");
    }

    let terminal = Terminal::new(size)?;
    let cmd_sender = terminal.command_sender();
    let mut event_receiver = terminal.event_receiver();
    let screen = terminal.screen();

    let terminal_task = tokio::spawn(async move { terminal.run().await });
    let input_task = tokio::spawn(handle_input(cmd_sender.clone()));

    let event_task = tokio::spawn(async move {
        info!("Event handler started");
        while let Ok(event) = event_receiver.recv().await {
            match event {
                Event::OutputReady(_) | Event::StateChanged => {
                    debug!("Redrawing from screen snapshot");
                    if let Err(e) = redraw(&screen) {
                        error!("Failed to redraw: {}", e);
                    }
                }
                Event::Bell => {
                    debug!("Bell rung");
                }
                Event::TitleChanged(title) => {
                    let _ = execute!(io::stdout(), crossterm::terminal::SetTitle(title));
                }
                Event::Closed => {
                    info!("Received Closed event - terminal closed");
                    break;
                }
                _ => {
                    debug!("Received unhandled event");
                }
            }
        }
        info!("Event handler exiting");
    });

    tokio::select! {
        result = terminal_task => {
            info!("Terminal task ended: {:?}", result);
        }
        result = input_task => {
            info!("Input task ended: {:?}", result);
        }
        result = event_task => {
            info!("Event task ended: {:?}", result);
        }
    }

    execute!(stdout, Show)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

/// Paints the live screen grid to the real terminal. A production embedder
/// would diff against the previous frame; this harness redraws in full,
/// which is fine at interactive speeds for a test tool.
fn redraw(screen: &SharedScreen) -> Result<()> {
    let screen = screen.read();
    let model = screen.model();
    let size = model.size();
    let mut out = io::stdout();

    execute!(out, crossterm::cursor::MoveTo(0, 0))?;
    let buf = model.active_buffer();
    for row in 0..size.rows {
        if let Some(line) = buf.line(row) {
            let mut text = String::new();
            for cell in &line.cells {
                if cell.width > 0 {
                    text.push(cell.base_char());
                }
            }
            write!(out, "{}", text)?;
        }
        execute!(out, Clear(ClearType::UntilNewLine))?;
        if row + 1 < size.rows {
            write!(out, "\r\n")?;
        }
    }

    let pos = model.cursor().position();
    let cursor_col = (pos.column.saturating_sub(1)).min(u16::MAX as u32) as u16;
    let cursor_row = (pos.row.saturating_sub(1)).min(u16::MAX as u32) as u16;
    execute!(out, crossterm::cursor::MoveTo(cursor_col, cursor_row))?;
    out.flush()?;
    Ok(())
}

async fn handle_input(cmd_sender: mpsc::Sender<HostCommand>) -> Result<()> {
    info!("Input handler started");
    let encoder = InputEncoder::new();
    let idle_modes = vtstream_common::types::Modes::new();

    loop {
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                CEvent::Key(CKeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL, .. }) => {
                    info!("Ctrl+C pressed, closing terminal");
                    let bytes = encoder.encode_key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL), &idle_modes);
                    cmd_sender.send(HostCommand::Write(bytes)).await?;
                }
                CEvent::Key(CKeyEvent { code, modifiers, .. }) => {
                    let mods = to_modifiers(modifiers);
                    if let Some(key) = to_key(code) {
                        let bytes = encoder.encode_key(KeyEvent::new(key, mods), &idle_modes);
                        if !bytes.is_empty() {
                            cmd_sender.send(HostCommand::Write(bytes)).await?;
                        }
                    }
                }
                CEvent::Resize(cols, rows) => {
                    info!("Terminal resized to {}x{}", cols, rows);
                    cmd_sender.send(HostCommand::Resize(Size::new(cols, rows))).await?;
                }
                _ => {
                    debug!("Unhandled input event");
                }
            }
        }
    }
}

fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    out
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::F(n) => Some(Key::Function(n)),
        _ => None,
    }
}
