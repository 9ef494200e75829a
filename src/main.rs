use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use parish::config::Config;
use parish::schedule::SystemClock;
use parish::ui::{self, App, actions::Action, render};
use parish::{logging, storage};

fn main() -> anyhow::Result<()> {
    // 配置文件路径 (~/.config/parish/config.toml)
    let config_path = Config::default_path()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // 数据目录 (~/.local/share/parish/)
    let data_dir = storage::data_dir()?;
    logging::init(&data_dir.join("parish.log"), &config.logging.level)?;

    let content_path = data_dir.join("content.toml");
    let content = storage::load_content(&content_path).context("loading parish content")?;
    info!(path = %content_path.display(), "starting parish");

    // 创建应用状态
    let mut app = App::new(content, &config, Box::new(SystemClock));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, config.tick_rate());

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("parish exited");
    result.context("terminal event loop failed")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| render(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let quit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    ui::handle_key_event(app, key.code)
                }
                Event::Mouse(mouse) => ui::handle_mouse_event(app, mouse),
                _ => false,
            };
            if quit {
                break;
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.dispatch(Action::Tick(elapsed));
            last_tick = Instant::now();
        }
    }
    Ok(())
}
