use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;

use bloom_maze::config::{Settings, DEFAULT_LOG_FILTER};
use bloom_maze::input::{control_key, movement_key, tilt_key, Control};
use bloom_maze::{Result, Session, Tilt};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::Rng;
use tracing_subscriber::EnvFilter;

mod render;

use render::Renderer;

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    let mut rng = rand::thread_rng();
    // Bad dimensions are reported before the terminal is taken over.
    let mut session = Session::new(&mut rng, settings.rows, settings.cols)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session, &mut rng, &settings);

    stdout.execute(Show)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_new(&settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(rows = settings.rows, cols = settings.cols, "bloom starting");
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    session: &mut Session,
    rng: &mut impl Rng,
    settings: &Settings,
) -> Result<()> {
    let mut tilt = Tilt::default();
    let mut renderer = Renderer::new(session.maze().rows(), session.maze().cols());
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));

    renderer.draw(stdout, session, &tilt)?;
    loop {
        if !event::poll(frame_time)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                if let Some(dir) = movement_key(key.code) {
                    session.step(dir);
                }
                if let Some(nudge) = tilt_key(key.code) {
                    tilt.nudge(nudge);
                }
                match control_key(key.code) {
                    Some(Control::Quit) => return Ok(()),
                    Some(Control::Resume) => {
                        if session.press_resume(rng)? {
                            renderer.invalidate();
                        }
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                match renderer.board_fraction(mouse.column, mouse.row) {
                    Some((fx, fy)) => tilt.follow_pointer(fx, fy),
                    None => tilt.level(),
                }
            }
            Event::Resize(_, _) => renderer.invalidate(),
            _ => {}
        }
        renderer.draw(stdout, session, &tilt)?;
    }
}
