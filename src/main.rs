mod app;
mod event;
mod ui;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use typesnip::config::Config;
use typesnip::logging;
use typesnip::replay;
use typesnip::session;
use typesnip::snippet::SNIPPET;
use ui::components::result_panel::ResultPanel;
use ui::components::stats_sidebar::StatsSidebar;
use ui::components::typing_area::TypingArea;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "typesnip", version, about = "Typing practice against a code snippet")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Keep accepting keys after the snippet is finished")]
    keep_going: bool,

    #[arg(long, value_name = "FILE", help = "Run a key script headless and print metrics as JSON")]
    replay: Option<PathBuf>,

    #[arg(long, value_name = "MS", default_value_t = replay::DEFAULT_STEP_MS, help = "Delay between untimed script keys")]
    step_ms: u64,

    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,

    #[arg(long, help = "Write the effective settings to the config file and exit")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.keep_going {
        config.stop_on_completion = false;
    }

    let _log_guard = logging::init_tracing(Path::new(&config.log_dir), &config.log_filter())?;
    if let Some(err) = load_err {
        tracing::warn!(?err, "config file unreadable, using defaults");
        eprintln!("Warning: config file unreadable, using defaults: {err:#}");
    }

    if cli.save_config {
        config.save()?;
        tracing::info!("config saved");
        return Ok(());
    }

    if let Some(path) = cli.replay {
        return run_replay(&path, cli.step_ms);
    }

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(?err, "run loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_replay(path: &Path, step_ms: u64) -> Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("reading key script {}", path.display()))?;
    let keys = replay::parse_script(&script, step_ms)?;
    tracing::info!(keys = keys.len(), path = %path.display(), "replaying script");

    let state = replay::run_script(SNIPPET, &keys);
    let metrics = session::snapshot_metrics(&state);
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = AppLayout::new(area);
    let metrics = app.metrics();
    let buf = frame.buffer_mut();

    let header = if let Some(sidebar) = layout.sidebar {
        let cursor = app
            .config
            .show_cursor_position
            .then_some(app.session.cursor);
        StatsSidebar::new(&metrics, app.session.elapsed_ms(app::now_ms()), cursor, colors)
            .render(sidebar, buf);
        format!(" typesnip  {:.0}%", app.session.progress() * 100.0)
    } else {
        format!(
            " typesnip  {:.0}%  acc {:.0}%  raw {:.0}%  {}/{}",
            app.session.progress() * 100.0,
            metrics.accuracy * 100.0,
            metrics.raw_accuracy * 100.0,
            metrics.correct_count,
            metrics.total_count,
        )
    };
    Paragraph::new(Line::from(header))
        .style(Style::default().fg(colors.header_fg()).bg(colors.header_bg()))
        .render(layout.header, buf);

    let show_cursor = app.screen == AppScreen::Typing;
    TypingArea::new(&app.session, colors, show_cursor).render(layout.main, buf);

    let hints = pack_hint_lines(&["[Esc] Quit", "[Tab] Restart"], layout.footer.width as usize);
    if let Some(first) = hints.into_iter().next() {
        Paragraph::new(Line::from(first))
            .style(Style::default().fg(colors.text_pending()))
            .render(layout.footer, buf);
    }

    if app.screen == AppScreen::Result {
        let popup = centered_rect(44, 8, area);
        ResultPanel::new(&metrics, colors).render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["typesnip", "--save-config", "--keep-going"]).unwrap();
        assert!(cli.save_config);
        assert!(cli.keep_going);
        assert_eq!(cli.step_ms, replay::DEFAULT_STEP_MS);

        let cli = Cli::try_parse_from(["typesnip"]).unwrap();
        assert!(!cli.save_config);
        assert!(cli.replay.is_none());
    }
}
