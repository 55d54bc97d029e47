//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input, request completions and
//!   animations.
//! - Route input to the main view and execute returned `Effect`s.
//!
//! Smart ticking: a fast interval (100 ms) only while a request is in flight
//! or the spinner is visible; a long interval (5 s) when idle.
use anyhow::Result;
use crossterm::event::MouseEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fortune_types::{Effect, Msg};
use futures_util::{StreamExt, stream::FuturesUnordered};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::App;
use crate::cmd;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

type PendingExecs = FuturesUnordered<cmd::PendingExec>;

/// Spawn the input task: polls terminal input and forwards `crossterm`
/// events over a Tokio channel. Mouse moves are throttled to one per 16 ms.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_move: Option<Instant> = Some(Instant::now());

    tokio::spawn(async move {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if !matches!(event::poll(sixteen_ms), Ok(true)) {
                continue;
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    let should_send = !is_mouse_move || last_mouse_move.is_some_and(|last| last.elapsed() >= sixteen_ms);
                    if is_mouse_move && should_send {
                        last_mouse_move = Some(Instant::now());
                    }

                    if should_send && let Err(e) = sender.send(event).await {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so the selector appearing or
    // disappearing with the selection mode is reflected.
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = Rc::new(FocusBuilder::rebuild_for(app, Some(Rc::unwrap_or_clone(old_focus))));
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the input
/// task, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(mut app: App) -> Result<()> {
    info!(theme = app.ctx.theme_id, api_mode = %app.api_mode(), "TUI started");
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let mut pending_execs: PendingExecs = FuturesUnordered::new();
    let mut effects = app.initial_effects();

    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Some terminals drop resize notifications; compare sizes each turn.
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();
    let mut needs_render = true;

    loop {
        if effects.contains(&Effect::Quit) {
            info!("quit requested");
            break;
        }
        if !effects.is_empty() {
            let effects_to_process = std::mem::take(&mut effects);
            effects.extend(process_effects(&mut app, &mut main_view, effects_to_process, &mut pending_execs));
            needs_render = true;
            continue;
        }

        if needs_render {
            render(&mut terminal, &mut app, &mut main_view)?;
            needs_render = false;
        }

        let needs_animation = app.needs_animation();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                effects.extend(handle_input_event(&mut app, &mut main_view, event));
                needs_render = true;
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, Msg::Tick));
                needs_render = needs_animation;
            }

            Some(outcome) = pending_execs.next(), if !pending_execs.is_empty() => {
                app.executing = !pending_execs.is_empty();
                if !app.executing {
                    app.throbber_idx = 0;
                }
                effects.extend(main_view.handle_message(&mut app, Msg::ExecCompleted(Box::new(outcome))));
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if let Ok((w, h)) = crossterm::terminal::size()
            && last_size != Some((w, h))
        {
            last_size = Some((w, h));
            effects.extend(main_view.handle_message(&mut app, Msg::Resize(w, h)));
            needs_render = true;
        }
    }

    // Requests still in flight are detached; their results are not needed.
    app.save_preferences();
    cleanup_terminal(&mut terminal)?;
    Ok(())
}

/// Run `effects` and return whatever follow-up effects the immediate
/// outcomes produce. Background work joins `pending_execs`.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>, pending_execs: &mut PendingExecs) -> Vec<Effect> {
    let command_batch = cmd::run_from_effects(app, effects);
    if !command_batch.pending.is_empty() {
        if !app.executing {
            app.throbber_idx = 0;
        }
        pending_execs.extend(command_batch.pending);
        app.executing = true;
    }

    let mut follow_up = Vec::new();
    for outcome in command_batch.immediate {
        follow_up.extend(main_view.handle_message(app, Msg::ExecCompleted(Box::new(outcome))));
    }
    follow_up
}
