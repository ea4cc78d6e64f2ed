mod api;
mod app;
mod config;
mod constants;
mod graphics;
mod input;
mod theme;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::time::Duration;
use tracing::info;

use api::ApiClient;
use app::App;
use constants::constants;
use graphics::{RenderMode, ThumbMode, kitty_delete_all, kitty_render_image};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Base URL of the playlist server.
  #[arg(short, long, default_value_t = constants().api_base_url.clone())]
  server: String,

  /// Thumbnail rendering: 'auto', 'kitty', 'halfblock', or 'ascii' (default: auto-detect)
  #[arg(short, long, default_value = "auto")]
  thumb_mode: ThumbMode,

  /// Print shell completions for the given shell and exit.
  #[arg(long, value_name = "SHELL")]
  completions: Option<clap_complete::Shell>,
}

// --- Logging ---

/// Route tracing output to a file under the platform data directory; the
/// terminal itself belongs to the TUI. Returns the guard that flushes the
/// writer on drop. Filter via the VQ_LOG env var (default "info").
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let proj_dirs = directories::ProjectDirs::from("", "", "vq")?;
  let log_dir = proj_dirs.data_dir().join("logs");
  std::fs::create_dir_all(&log_dir).ok()?;

  let appender = tracing_appender::rolling::never(&log_dir, "vq.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = tracing_subscriber::EnvFilter::try_from_env("VQ_LOG")
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
  Some(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    return Ok(());
  }

  let _guard = init_tracing();

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, args).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, args: Args) -> Result<()> {
  let render_mode = args.thumb_mode.resolve();
  let mut app = App::new(ApiClient::new(args.server), render_mode);
  info!(mode = render_mode.label(), "starting");

  // The playlist loads once on startup; 'r' refetches on demand.
  app.trigger_refresh();

  let uses_kitty = render_mode == RenderMode::Kitty;

  loop {
    app.check_pending();

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    // Kitty images travel out-of-band, after the frame that reserved
    // their cell area has been drawn.
    if uses_kitty {
      if let Some(area) = app.gfx.thumb_area {
        let key = app.selected_thumb().map(|(id, _)| (id.to_string(), area));
        if let Some(key) = key
          && app.gfx.last_sent.as_ref() != Some(&key)
        {
          kitty_delete_all()?;
          if let Some((_, image)) = app.selected_thumb() {
            kitty_render_image(image, area)?;
          }
          app.gfx.last_sent = Some(key);
        }
      } else if app.gfx.last_sent.is_some() {
        kitty_delete_all()?;
        app.gfx.last_sent = None;
      }
    }

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key)?;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  if uses_kitty {
    kitty_delete_all()?;
  }
  Ok(())
}
