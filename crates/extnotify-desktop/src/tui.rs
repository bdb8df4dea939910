use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use extnotify_core::Phase;
use extnotify_core::gpio::{Level, Pin};
use extnotify_core::journal::JournalEvent;
use extnotify_core::peripheral::Peripheral;
use log::Level as LogLevel;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{Action, App};
use crate::log_capture;

// Extension trait for log::Level to provide UI rendering methods
trait LevelExt {
    fn color(&self) -> Color;
    fn prefix(&self) -> &str;
}

impl LevelExt for LogLevel {
    fn color(&self) -> Color {
        match *self {
            LogLevel::Error => Color::Red,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Info => Color::Cyan,
            LogLevel::Debug => Color::Gray,
            LogLevel::Trace => Color::DarkGray,
        }
    }

    fn prefix(&self) -> &str {
        match *self {
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

pub fn run(app: &mut App) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    log_capture::set_echo(false);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal even if the loop failed
    log_capture::set_echo(true);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), io::Error> {
    loop {
        app.service();
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(app.poll_timeout_ms()))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Char('m') => Action::RemoteMessage,
            KeyCode::Char('b') => Action::RemoteBell,
            KeyCode::Char('l') => Action::LocalMessage,
            KeyCode::Char('s') => Action::Stop,
            KeyCode::Char('g') => Action::GetRingtone,
            KeyCode::Char('n') => Action::NextRingtone,
            _ => continue,
        };
        app.apply(action);
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(7), // Outputs
            Constraint::Min(8),    // Journal + logs
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new(format!(
        "External Notification Simulator - node {:#010x}",
        app.settings.local_node
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_outputs(f, chunks[1], app);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_journal(f, lower[0], app);
    render_logs(f, lower[1]);

    let help = Paragraph::new(
        "m: message | b: bell | l: own message | s: stop | g: get ringtone | n: next ringtone | q: quit",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, chunks[3]);
}

fn pin_label(app: &App, pin: Option<Pin>) -> String {
    match pin {
        Some(pin) => match app.notifier.io().level(pin) {
            Some(Level::High) => format!("{} HIGH", pin),
            Some(Level::Low) => format!("{} LOW", pin),
            None => format!("{} -", pin),
        },
        None => "no pin".to_string(),
    }
}

fn render_outputs(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Outputs");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let pins = app.notifier.pins();
    let mut lines: Vec<Line> = Peripheral::ALL
        .iter()
        .map(|&peripheral| {
            let pin = match peripheral {
                Peripheral::Signal => pins.signal,
                Peripheral::Buzzer => pins.buzzer,
                Peripheral::Vibration => pins.vibra,
            };
            let state = app.notifier.peripheral(peripheral);
            let (text, color) = if state.active { ("ON ", Color::Green) } else { ("off", Color::DarkGray) };
            Line::from(vec![
                Span::styled(format!("{:<8}", peripheral.name()), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}  since {} ms", pin_label(app, pin), state.last_changed.0)),
            ])
        })
        .collect();

    let melody = match app.notifier.melody().note() {
        Some(note) => format!("tone {}: note {}", pin_label(app, pins.tone), note),
        None => format!("tone {}: silent", pin_label(app, pins.tone)),
    };
    lines.push(Line::from(melody));
    f.render_widget(Paragraph::new(lines), columns[0]);

    let now = app.clock.now();
    let phase_color = match app.notifier.phase() {
        Phase::Idle => Color::DarkGray,
        Phase::Holding => Color::Yellow,
        Phase::Draining => Color::Magenta,
    };
    let cutoff = match app.notifier.cutoff().remaining(now) {
        Some(ms) => format!("{} ms", ms),
        None => "unbounded".to_string(),
    };
    let next_tick = match app.next_tick_in() {
        Some(ms) => format!("{} ms", ms),
        None => "never".to_string(),
    };
    let (r, g, b) = app.led.color();
    let status = vec![
        Line::from(vec![
            Span::raw("phase:    "),
            Span::styled(format!("{:?}", app.notifier.phase()), Style::default().fg(phase_color)),
        ]),
        Line::from(format!("nagging:  {}", app.notifier.is_nagging())),
        Line::from(format!("cutoff:   {}", cutoff)),
        Line::from(format!("next run: {}", next_tick)),
        Line::from(vec![
            Span::raw("rgb:      "),
            Span::styled("      ", Style::default().bg(Color::Rgb(r, g, b))),
        ]),
    ];
    f.render_widget(Paragraph::new(status), columns[1]);
}

fn describe(event: &JournalEvent) -> String {
    match event {
        JournalEvent::Armed(trigger, peripheral) => format!("armed {} by {:?}", peripheral.name(), trigger),
        JournalEvent::On(peripheral) => format!("{} on", peripheral.name()),
        JournalEvent::Off(peripheral) => format!("{} off", peripheral.name()),
        JournalEvent::MelodyStarted => "melody started".to_string(),
        JournalEvent::EpisodeEnded => "episode ended".to_string(),
        JournalEvent::Stopped => "stopped".to_string(),
    }
}

fn render_journal(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Journal (newest first)");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = app
        .notifier
        .journal()
        .recent(inner.height as usize)
        .map(|entry| ListItem::new(format!("{:>8} {}", entry.at.0, describe(&entry.event))))
        .collect();
    f.render_widget(List::new(items), inner);
}

fn render_logs(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = log_capture::recent(inner.height as usize)
        .into_iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled(line.level.prefix().to_string(), Style::default().fg(line.level.color())),
                Span::raw(" "),
                Span::raw(line.message),
            ]))
        })
        .collect();
    f.render_widget(List::new(items), inner);
}
