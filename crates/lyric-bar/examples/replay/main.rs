mod fixture;
mod renderer;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use fixture::Fixture;
use lyric_bar::{AnimationHost, AnimationRequest, LyricPhrase, LyricTrack, SlotProperty};
use ratatui::DefaultTerminal;

const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(clap::Parser)]
#[command(name = "replay", about = "Replay a lyric chart in the terminal")]
struct Args {
    #[arg(short, long, default_value_t = Fixture::Ballad)]
    fixture: Fixture,

    /// Playback speed multiplier.
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,
}

struct Tween {
    from: f32,
    to: f32,
    start: f64,
    duration: f64,
}

/// Manual per-frame lerp over the requests the core issues — the simplest
/// implementation of the animation contract. New requests overwrite any
/// in-flight tween on the same key.
#[derive(Default)]
struct LerpHost {
    now: f64,
    tweens: HashMap<(usize, SlotProperty), Tween>,
}

impl LerpHost {
    fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    /// Interpolated value for a property, or the core's target when no tween
    /// has ever touched it.
    fn value(&self, slot: usize, property: SlotProperty, target: f32) -> f32 {
        let Some(tween) = self.tweens.get(&(slot, property)) else {
            return target;
        };
        if tween.duration <= 0.0 {
            return tween.to;
        }
        let t = ((self.now - tween.start) / tween.duration).clamp(0.0, 1.0) as f32;
        tween.from + (tween.to - tween.from) * t
    }
}

impl AnimationHost for LerpHost {
    fn animate(&mut self, request: AnimationRequest) {
        self.tweens.insert(
            (request.slot, request.property),
            Tween {
                from: request.from,
                to: request.to,
                start: self.now,
                duration: request.duration,
            },
        );
    }
}

struct App {
    track: LyricTrack,
    host: LerpHost,
    phrases: Vec<LyricPhrase>,
    song_time: f64,
    speed: f64,
    paused: bool,
    fixture_name: String,
}

impl App {
    fn new(phrases: Vec<LyricPhrase>, speed: f64, fixture_name: String) -> Self {
        let mut track = LyricTrack::new();
        track.on_load(phrases.clone());
        Self {
            track,
            host: LerpHost::default(),
            phrases,
            song_time: 0.0,
            speed,
            paused: false,
            fixture_name,
        }
    }

    fn song_end(&self) -> f64 {
        self.phrases.last().map_or(0.0, |p| p.end) + 1.0
    }

    fn advance(&mut self, dt: f64) {
        self.song_time += dt * self.speed;
        self.host.set_time(self.song_time);
        self.track.tick(self.song_time, &mut self.host);
    }

    fn restart(&mut self) {
        self.song_time = 0.0;
        self.host = LerpHost::default();
        self.track = LyricTrack::new();
        self.track.on_load(self.phrases.clone());
    }

    fn is_done(&self) -> bool {
        self.song_time >= self.song_end()
    }
}

fn main() {
    use clap::Parser;
    let args = Args::parse();
    let fixture_name = args.fixture.to_string();
    let phrases = args.fixture.phrases();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, phrases, args.speed, fixture_name.clone());
    ratatui::restore();

    match result {
        Ok(app) => {
            println!(
                "Done at t={:.2}s ({} fixture, {} phrases).",
                app.song_time,
                fixture_name,
                app.phrases.len(),
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    phrases: Vec<LyricPhrase>,
    speed: f64,
    fixture_name: String,
) -> std::io::Result<App> {
    let mut app = App::new(phrases, speed, fixture_name);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| renderer::render(frame, &app))?;

        let timeout = FRAME_TIME.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        app.paused = !app.paused;
                        last_frame = Instant::now();
                    }
                    KeyCode::Char('r') => {
                        app.restart();
                        last_frame = Instant::now();
                    }
                    // Song time only moves forward; skipping ahead is the
                    // one seek the core's clock contract allows.
                    KeyCode::Right => {
                        app.advance(1.0);
                    }
                    _ => {}
                }
            }
        } else {
            let dt = last_frame.elapsed().as_secs_f64();
            last_frame = Instant::now();
            if !app.paused && !app.is_done() {
                app.advance(dt);
            }
        }
    }

    Ok(app)
}
