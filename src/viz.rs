//! Drivers around the life engine: the interactive terminal loop and the
//! headless print mode.

use crate::colors::pixel_color;
use crate::config::{LifeConfig, PrintConfig};
use crate::engine::patterns::{self, Pattern, PATTERNS};
use crate::engine::{Cell, Life};
use crate::screenshot;
use crate::terminal::Terminal;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color;
use rand::prelude::*;
use std::io;
use std::time::Instant;
use tracing::{info, warn};

/// Divisor for calculating injection count (w * h / INJECTION_DIVISOR)
const INJECTION_DIVISOR: usize = 50;
/// Frames per fps sample
const FPS_WINDOW: u32 = 10;
/// Input polling delay while paused
const PAUSED_SLEEP: f32 = 0.05;

/// The engine together with the pixel buffer it paints into
pub struct Sim {
    pub life: Life,
    pub pixels: Vec<u32>,
}

impl Sim {
    /// Build a grid and seed it with `pattern` at the centre, or a random
    /// soup when no pattern is given
    pub fn new(
        width: usize,
        height: usize,
        seed: Option<u64>,
        pattern: Option<&Pattern>,
    ) -> crate::Result<Self> {
        let mut life = match seed {
            Some(seed) => Life::with_seed(width, height, seed)?,
            None => Life::new(width, height)?,
        };
        match pattern {
            Some(pattern) => stamp_centered(&mut life, pattern),
            None => life.populate(),
        }
        Ok(Self {
            pixels: vec![0; width * height],
            life,
        })
    }

    pub fn step(&mut self) -> crate::Result<()> {
        self.life.step(&mut self.pixels)
    }

    /// Copy the pixel buffer into the terminal back buffer, one cell each
    pub fn paint(&self, term: &mut Terminal, draw_char: char) {
        for (i, &pixel) in self.pixels.iter().enumerate() {
            let (x, y) = self.life.coords(i);
            let (x, y) = (x as i32, y as i32);
            match pixel_color(pixel) {
                Some(color) => term.set(x, y, draw_char, Some(color)),
                None => term.set(x, y, ' ', None),
            }
        }
    }
}

pub fn stamp_centered(life: &mut Life, pattern: &Pattern) {
    let (pw, ph) = pattern.size();
    let x = (life.width() as i32 - pw as i32) / 2;
    let y = (life.height() as i32 - ph as i32) / 2;
    life.stamp_pattern(x, y, pattern);
}

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Populate,
    Clear,
    TogglePause,
    Step,
    NextPattern,
    StampCenter,
    StampAt(i32, i32),
    PerturbAt(i32, i32),
    Screenshot,
    Speed(f32),
    Resize(u16, u16),
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('s') if ctrl => Some(Action::Screenshot),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('r') => Some(Action::Populate),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('c') => Some(Action::Clear),
        KeyCode::Char('n') => Some(Action::Step),
        KeyCode::Tab => Some(Action::NextPattern),
        KeyCode::Char('p') => Some(Action::StampCenter),
        KeyCode::Char(c) => speed_preset(c).map(Action::Speed),
        _ => None,
    }
}

/// Number keys: 1 = fastest, 9 = slow, 0 = very slow
fn speed_preset(c: char) -> Option<f32> {
    let speed = match c.to_digit(10)? {
        0 => 0.5,
        1 => 0.0,
        2 => 0.01,
        3 => 0.02,
        4 => 0.03,
        5 => 0.05,
        6 => 0.07,
        7 => 0.1,
        8 => 0.15,
        _ => 0.2,
    };
    Some(speed)
}

/// Left-button state: press and release without a drag is a click
#[derive(Debug, Default)]
pub struct Pointer {
    down: bool,
    dragged: bool,
}

impl Pointer {
    pub fn action(&mut self, event: MouseEvent) -> Option<Action> {
        let (x, y) = (event.column as i32, event.row as i32);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.down = true;
                self.dragged = false;
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if self.down => {
                self.dragged = true;
                Some(Action::PerturbAt(x, y))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let clicked = self.down && !self.dragged;
                *self = Self::default();
                clicked.then_some(Action::StampAt(x, y))
            }
            _ => None,
        }
    }
}

/// Set random cells alive so the soup never settles completely
fn inject(life: &mut Life, rng: &mut StdRng) {
    let (w, h) = (life.width(), life.height());
    for _ in 0..(w * h) / INJECTION_DIVISOR {
        let x = rng.gen_range(0..w) as i32;
        let y = rng.gen_range(0..h) as i32;
        life.set(x, y, Cell::Alive);
    }
}

fn status_line(life: &Life, selected: &Pattern, fps: f32, paused: bool, notice: &str) -> String {
    let mut line = format!(
        " gen {} | pop {} | {:.1} fps | {} ",
        life.generation(),
        life.population(),
        fps,
        selected.name
    );
    if paused {
        line.push_str("| paused ");
    }
    if !notice.is_empty() {
        line.push_str("| ");
        line.push_str(notice);
        line.push(' ');
    }
    line
}

fn pattern_index(name: &str) -> crate::Result<usize> {
    let found = match patterns::find(name) {
        Ok(found) => found,
        Err(err) => {
            warn!(name, "unknown pattern");
            return Err(err);
        }
    };
    Ok(PATTERNS.iter().position(|p| p.name == found.name).unwrap_or(0))
}

/// Grid for the whole terminal, seeded the same way on start and on resize
fn fresh_sim(
    width: u16,
    height: u16,
    config: &LifeConfig,
    initial: Option<&Pattern>,
) -> crate::Result<Sim> {
    Sim::new(width as usize, height as usize, config.seed, initial)
}

/// Run the interactive simulation until the user quits
pub fn run(config: &LifeConfig) -> io::Result<()> {
    // Resolve the pattern before taking over the terminal so errors print cleanly
    let mut selected = match config.pattern.as_deref() {
        Some(name) => pattern_index(name)?,
        None => 0,
    };
    let initial = config.pattern.as_ref().map(|_| &PATTERNS[selected]);

    let mut term = Terminal::new(true)?;
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

    let (w, h) = term.size();
    let mut sim = fresh_sim(w, h, config, initial)?;
    info!(width = w, height = h, pattern = ?config.pattern, "simulation started");

    let mut pointer = Pointer::default();
    let mut paused = false;
    let mut speed = config.time_step;
    let mut notice = String::new();
    let mut fps = 0.0f32;
    let mut frames = 0u32;
    let mut window_start = Instant::now();

    loop {
        let mut step_once = false;

        while let Some(event) = term.poll_event()? {
            let action = match event {
                Event::Key(key) => key_action(key),
                Event::Mouse(mouse) => pointer.action(mouse),
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };
            let Some(action) = action else { continue };

            match action {
                Action::Quit => return Ok(()),
                Action::Populate => sim.life.populate(),
                Action::Clear => sim.life.clear(),
                Action::TogglePause => paused = !paused,
                Action::Step => step_once = true,
                Action::NextPattern => selected = (selected + 1) % PATTERNS.len(),
                Action::StampCenter => stamp_centered(&mut sim.life, &PATTERNS[selected]),
                Action::StampAt(x, y) => sim.life.stamp_pattern(x, y, &PATTERNS[selected]),
                Action::PerturbAt(x, y) => sim.life.perturb(x, y),
                Action::Speed(s) => speed = s,
                Action::Screenshot => {
                    let saved = screenshot::save(
                        &sim.pixels,
                        sim.life.width(),
                        sim.life.height(),
                        &config.screenshot_dir,
                    );
                    notice = match saved {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(err) => {
                            warn!(%err, "screenshot failed");
                            format!("screenshot failed: {}", err)
                        }
                    };
                }
                Action::Resize(w, h) => {
                    if w == 0 || h == 0 {
                        continue;
                    }
                    info!(width = w, height = h, "terminal resized");
                    term.resize(w, h);
                    term.clear_screen()?;
                    sim = fresh_sim(w, h, config, initial)?;
                }
            }
        }

        if !paused || step_once {
            sim.step()?;
            if config.inject_interval > 0 && sim.life.generation() % config.inject_interval == 0 {
                inject(&mut sim.life, &mut rng);
            }

            frames += 1;
            if frames == FPS_WINDOW {
                let elapsed = window_start.elapsed().as_secs_f32().max(f32::EPSILON);
                fps = frames as f32 / elapsed;
                frames = 0;
                window_start = Instant::now();
            }
        }

        sim.paint(&mut term, config.draw_char);
        let status = status_line(&sim.life, &PATTERNS[selected], fps, paused, &notice);
        term.set_str(0, 0, &status, Some(Color::White));
        term.present()?;
        term.sleep(if paused { PAUSED_SLEEP } else { speed });
    }
}

/// Simulate headlessly and return the final frame
pub fn render_frame(config: &PrintConfig) -> crate::Result<Terminal> {
    let pattern = config.pattern.as_deref().map(patterns::find).transpose()?;
    let mut sim = Sim::new(config.width as usize, config.height as usize, config.seed, pattern)?;
    for _ in 0..config.generations {
        sim.step()?;
    }
    let mut term = Terminal::headless(config.width, config.height);
    sim.paint(&mut term, config.draw_char);
    Ok(term)
}

/// Print mode: run the generations and dump the last frame to stdout
pub fn print(config: &PrintConfig) -> io::Result<()> {
    render_frame(config)?.print_to_stdout()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn print_config(pattern: Option<&str>, generations: u64) -> PrintConfig {
        PrintConfig {
            width: 6,
            height: 4,
            generations,
            seed: Some(11),
            pattern: pattern.map(String::from),
            draw_char: '#',
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(key_action(key(KeyCode::Esc)), Some(Action::Populate));
        assert_eq!(key_action(key(KeyCode::Char('c'))), Some(Action::Clear));
        assert_eq!(key_action(key(KeyCode::Char(' '))), Some(Action::TogglePause));
        assert_eq!(key_action(key(KeyCode::Tab)), Some(Action::NextPattern));
        assert_eq!(key_action(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn control_keys() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(key_action(ctrl('c')), Some(Action::Quit));
        assert_eq!(key_action(ctrl('s')), Some(Action::Screenshot));
    }

    #[test]
    fn speed_presets() {
        assert_eq!(key_action(key(KeyCode::Char('1'))), Some(Action::Speed(0.0)));
        assert_eq!(key_action(key(KeyCode::Char('9'))), Some(Action::Speed(0.2)));
        assert_eq!(key_action(key(KeyCode::Char('0'))), Some(Action::Speed(0.5)));
    }

    #[test]
    fn click_stamps_and_drag_perturbs() {
        let mut pointer = Pointer::default();
        assert_eq!(pointer.action(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)), None);
        assert_eq!(
            pointer.action(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2)),
            Some(Action::StampAt(4, 2))
        );

        pointer.action(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        assert_eq!(
            pointer.action(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 1)),
            Some(Action::PerturbAt(2, 1))
        );
        assert_eq!(pointer.action(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1)), None);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut pointer = Pointer::default();
        assert_eq!(pointer.action(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 1)), None);
        assert_eq!(pointer.action(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1)), None);
    }

    #[test]
    fn stamp_centered_places_block_in_middle() {
        let mut life = Life::with_seed(6, 4, 1).unwrap();
        stamp_centered(&mut life, patterns::find("block").unwrap());
        assert_eq!(life.population(), 4);
        assert!(life.get(2, 1).is_alive());
        assert!(life.get(3, 2).is_alive());
    }

    #[test]
    fn injection_adds_life() {
        let mut life = Life::with_seed(20, 10, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        inject(&mut life, &mut rng);
        let pop = life.population();
        assert!(pop > 0 && pop <= 4, "population {}", pop);
    }

    #[test]
    fn status_line_mentions_state() {
        let life = Life::with_seed(4, 4, 1).unwrap();
        let glider = patterns::find("glider").unwrap();
        let line = status_line(&life, glider, 12.34, true, "saved x.png");
        assert!(line.contains("gen 0"));
        assert!(line.contains("12.3 fps"));
        assert!(line.contains("glider"));
        assert!(line.contains("paused"));
        assert!(line.contains("saved x.png"));
    }

    #[test]
    fn seeded_grid_is_rebuilt_identically() {
        let config = LifeConfig {
            seed: Some(21),
            ..LifeConfig::default()
        };
        let a = fresh_sim(30, 12, &config, None).unwrap();
        let b = fresh_sim(30, 12, &config, None).unwrap();
        assert!(a.life.population() > 0);
        assert_eq!(a.life.cells(), b.life.cells());

        let glider = patterns::find("glider").ok();
        let c = fresh_sim(9, 9, &config, glider).unwrap();
        assert_eq!(c.life.population(), 5);
    }

    #[test]
    fn unknown_pattern_name_is_not_found() {
        assert!(matches!(pattern_index("unicorn"), Err(Error::NotFound(_))));
        assert_eq!(pattern_index("GLIDER").ok().map(|i| PATTERNS[i].name), Some("glider"));
    }

    #[test]
    fn paint_maps_pixels_to_cells() {
        let mut sim = Sim::new(3, 2, Some(1), patterns::find("blinker").ok()).unwrap();
        sim.pixels = vec![0, 0, 0, 0, crate::ALIVE_COLOR, 0];
        let mut term = Terminal::headless(3, 2);
        sim.paint(&mut term, '#');
        assert_eq!(term.get(1, 1).map(|c| c.ch), Some('#'));
        assert_eq!(term.get(1, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn render_block_frame() {
        let frame = render_frame(&print_config(Some("block"), 1)).unwrap().to_ansi();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "      ");
        assert_eq!(lines[3], "      ");
        assert_eq!(frame.matches('#').count(), 4);
        assert!(lines[1].starts_with("  \x1b[38;2;240;16;32m#"));
    }

    #[test]
    fn render_is_deterministic_with_seed() {
        let a = render_frame(&print_config(None, 5)).unwrap().to_ansi();
        let b = render_frame(&print_config(None, 5)).unwrap().to_ansi();
        assert_eq!(a, b);
    }

    #[test]
    fn render_unknown_pattern() {
        assert!(matches!(
            render_frame(&print_config(Some("nope"), 1)),
            Err(Error::NotFound(_))
        ));
    }
}
