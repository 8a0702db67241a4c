//! passerelle-monitor: terminal dashboard for the chat-completion gateway
//!
//! Polls `/health` and `/metrics` and renders the counters live.
//!
//! # Usage
//!
//! ```bash
//! # Start the gateway in one terminal
//! passerelle serve --demo
//!
//! # Monitor in another terminal
//! passerelle-monitor --url http://127.0.0.1:8000
//! ```
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────────────────┬────────────────────────────┐
//! │ Average latency                     │ Counters                   │
//! │ ▁▂▃▄▅▆▇█▇▆▅▄▃▂▁▂▃▄▅▆▇█▇▆▅▄▃▂▁     │ Requests: 1,234            │
//! │ Current: 42.1 ms   Trend: ↑         │ Errors:   3                │
//! ├─────────────────────────────────────┤ Avg:      42.10 ms         │
//! │ Error rate                          ├────────────────────────────┤
//! │ ██░░░░░░░░░░░░░░░░░░░░  0.2%        │ Gateway                    │
//! │                                     │ Health: ● online           │
//! └─────────────────────────────────────┴────────────────────────────┘
//! │ [q] Quit  [r] Reset  [p] Pause                                   │
//! ```

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline},
};

use passerelle::client::GatewayClient;
use passerelle::metrics::MetricsSnapshot;

/// Monitor state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonitorState {
    /// Not connected to the gateway
    Disconnected,
    /// Connected and receiving snapshots
    Connected,
    /// Connected but updates paused
    Paused,
}

/// Error-rate color coding
///
/// - Green: < 1% (healthy)
/// - Yellow: 1-5% (warning)
/// - Red: > 5% (critical)
fn error_rate_color(percent: f64) -> Color {
    if percent > 5.0 {
        Color::Red
    } else if percent >= 1.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "passerelle-monitor")]
#[command(about = "Terminal dashboard for the passerelle gateway")]
#[command(version)]
struct Args {
    /// Gateway URL to monitor
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    /// Refresh rate in milliseconds
    #[arg(short, long, default_value = "1000")]
    refresh_ms: u64,
}

/// Time series with a bounded ring buffer
#[derive(Debug, Clone)]
struct TimeSeries {
    data: VecDeque<f64>,
    capacity: usize,
}

impl TimeSeries {
    fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, value: f64) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    fn as_u64_vec(&self) -> Vec<u64> {
        self.data.iter().map(|&v| v as u64).collect()
    }

    fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    /// Trend direction over the last few samples
    fn trend(&self) -> &'static str {
        if self.data.len() < 5 {
            return "→";
        }
        let recent: Vec<f64> = self.data.iter().rev().take(5).copied().collect();
        let first_avg = (recent[3] + recent[4]) / 2.0;
        let last_avg = (recent[0] + recent[1]) / 2.0;

        let range = self.max().unwrap_or(1.0) - self.min().unwrap_or(0.0);
        let threshold = range * 0.05;

        if last_avg > first_avg + threshold {
            "↑"
        } else if last_avg < first_avg - threshold {
            "↓"
        } else {
            "→"
        }
    }
}

/// Monitor application state
struct MonitorApp {
    client: GatewayClient,
    /// Latest counter snapshot
    snapshot: MetricsSnapshot,
    /// Whether /health answered ok on the last poll
    healthy: bool,
    /// Average latency over time
    latency_series: TimeSeries,
    /// Request rate derived from successive snapshots
    request_rate: f64,
    /// Previous snapshot for rate derivation
    previous: Option<(u64, Instant)>,
    state: MonitorState,
    last_error: Option<String>,
    should_quit: bool,
}

impl MonitorApp {
    fn new(client: GatewayClient) -> Self {
        Self {
            client,
            snapshot: MetricsSnapshot {
                requests_total: 0,
                errors_total: 0,
                total_response_time_ms: 0.0,
                average_response_time_ms: 0.0,
            },
            healthy: false,
            latency_series: TimeSeries::new(120),
            request_rate: 0.0,
            previous: None,
            state: MonitorState::Disconnected,
            last_error: None,
            should_quit: false,
        }
    }

    /// Poll the gateway once
    ///
    /// Connection failures flip the state to Disconnected and are shown to
    /// the operator; the next tick simply polls again (no retry logic).
    fn poll(&mut self) {
        if self.state == MonitorState::Paused {
            return;
        }

        self.healthy = matches!(self.client.health(), Ok(h) if h.status == "ok");

        match self.client.metrics() {
            Ok(snapshot) => {
                let now = Instant::now();
                if let Some((prev_requests, prev_at)) = self.previous {
                    let elapsed = now.duration_since(prev_at).as_secs_f64();
                    if elapsed > 0.0 {
                        let delta = snapshot.requests_total.saturating_sub(prev_requests);
                        self.request_rate = delta as f64 / elapsed;
                    }
                }
                self.previous = Some((snapshot.requests_total, now));
                self.latency_series.push(snapshot.average_response_time_ms);
                self.snapshot = snapshot;
                self.state = MonitorState::Connected;
                self.last_error = None;
            },
            Err(e) => {
                self.state = MonitorState::Disconnected;
                self.last_error = Some(e.to_string());
            },
        }
    }

    /// Error rate in percent
    fn error_rate_pct(&self) -> f64 {
        if self.snapshot.requests_total == 0 {
            return 0.0;
        }
        self.snapshot.errors_total as f64 / self.snapshot.requests_total as f64 * 100.0
    }

    /// Reset derived statistics (server counters are untouched)
    fn reset(&mut self) {
        self.latency_series = TimeSeries::new(120);
        self.request_rate = 0.0;
        self.previous = None;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let client = GatewayClient::with_timeout(args.url.as_str(), Duration::from_millis(500))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = MonitorApp::new(client);
    let refresh = Duration::from_millis(args.refresh_ms);

    let result = run_app(&mut terminal, &mut app, refresh);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut MonitorApp,
    refresh: Duration,
) -> io::Result<()> {
    let mut last_poll: Option<Instant> = None;

    loop {
        if last_poll.is_none_or(|t| t.elapsed() >= refresh) {
            app.poll();
            last_poll = Some(Instant::now());
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        },
                        KeyCode::Char('r') => {
                            app.reset();
                        },
                        KeyCode::Char('p') => {
                            app.state = match app.state {
                                MonitorState::Connected => MonitorState::Paused,
                                MonitorState::Paused => MonitorState::Connected,
                                MonitorState::Disconnected => MonitorState::Disconnected,
                            };
                        },
                        _ => {},
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &MonitorApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(outer[0]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    // Left: average latency sparkline
    let latency_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Average latency ");
    let inner = latency_block.inner(left_chunks[0]);
    f.render_widget(latency_block, left_chunks[0]);

    let chart_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    let data = app.latency_series.as_u64_vec();
    let sparkline = Sparkline::default()
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, chart_layout[0]);

    let trend = app.latency_series.trend();
    let trend_color = match trend {
        "↑" => Color::Red, // rising latency is bad news
        "↓" => Color::Green,
        _ => Color::Yellow,
    };
    let stats_text = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled(
                format!("{:.2} ms ", app.snapshot.average_response_time_ms),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled(trend, Style::default().fg(trend_color).bold()),
            Span::raw(format!("   Rate: {:.1} req/s", app.request_rate)),
        ]),
        Line::from(vec![
            Span::raw("Samples: "),
            Span::raw(format!("{}", app.latency_series.len())),
            Span::raw("   Min: "),
            Span::raw(format!("{:.1}", app.latency_series.min().unwrap_or(0.0))),
            Span::raw("   Max: "),
            Span::raw(format!("{:.1}", app.latency_series.max().unwrap_or(0.0))),
        ]),
    ]);
    f.render_widget(stats_text, chart_layout[1]);

    // Left: error rate gauge
    let error_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Error rate ");
    let error_inner = error_block.inner(left_chunks[1]);
    f.render_widget(error_block, left_chunks[1]);

    let pct = app.error_rate_pct();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(error_rate_color(pct)))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(format!("{pct:.1}%"));
    let gauge_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(error_inner);
    f.render_widget(gauge, gauge_area[0]);

    // Right: counters
    let counters_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Counters ");
    let counters_inner = counters_block.inner(right_chunks[0]);
    f.render_widget(counters_block, right_chunks[0]);

    let counters = Paragraph::new(vec![
        Line::from(format!("Requests: {}", app.snapshot.requests_total)),
        Line::from(format!("Errors:   {}", app.snapshot.errors_total)),
        Line::from(format!(
            "Total:    {:.2} ms",
            app.snapshot.total_response_time_ms
        )),
        Line::from(format!(
            "Average:  {:.2} ms",
            app.snapshot.average_response_time_ms
        )),
    ]);
    f.render_widget(counters, counters_inner);

    // Right: gateway status
    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Gateway ");
    let status_inner = status_block.inner(right_chunks[1]);
    f.render_widget(status_block, right_chunks[1]);

    let (health_dot, health_color) = if app.healthy {
        ("● online", Color::Green)
    } else {
        ("● offline", Color::Red)
    };
    let state_label = match app.state {
        MonitorState::Connected => "connected",
        MonitorState::Paused => "paused",
        MonitorState::Disconnected => "disconnected",
    };
    let mut status_lines = vec![
        Line::from(vec![
            Span::raw("Health: "),
            Span::styled(health_dot, Style::default().fg(health_color)),
        ]),
        Line::from(format!("State:  {state_label}")),
    ];
    if let Some(err) = &app.last_error {
        status_lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Paragraph::new(status_lines), status_inner);

    // Bottom: key help
    let help = Paragraph::new(" [q] Quit  [r] Reset  [p] Pause")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, outer[1]);
}
