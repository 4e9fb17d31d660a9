use std::collections::VecDeque;
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::debug;

use crate::error::{GameError, Result};
use crate::game::{Command, InputSource, Renderer};
use crate::grid::{Bounds, GridInt, Position, GRID_HEIGHT, GRID_WIDTH};
use crate::menu::{Key, Prompt};
use crate::snake::Direction;

const BORDER_CHAR: char = '#';
const SNAKE_HEAD_CHAR: char = 'O';
const SNAKE_BODY_CHAR: char = '+';
const FOOD_CHAR: char = '$';

/// Columns needed: the interior plus both border columns.
const MIN_WIDTH: u16 = GRID_WIDTH as u16 + 2;
/// Rows needed: the interior, both border rows, a gap and three stat lines.
const MIN_HEIGHT: u16 = GRID_HEIGHT as u16 + 6;

/// Owns the terminal while the game runs. Raw mode and the alternate screen
/// are undone by [`TermManager::restore`], or on drop.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(GameError::TerminalTooSmall {
                needed_w: MIN_WIDTH,
                needed_h: MIN_HEIGHT,
                actual_w: width,
                actual_h: height,
            });
        }

        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        debug!(width = self.width, height = self.height, "terminal ready");
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = &mut self.stdout;
        teardown(terminal::disable_raw_mode, || {
            execute!(stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
        })?;
        self.active = false;
        debug!("terminal restored");
        Ok(())
    }

    fn print_at(&mut self, pos: Position, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.x as u16, pos.y as u16), Print(ch))
    }

    fn print_lines_at(&mut self, col: u16, row: u16, lines: &[&str]) -> io::Result<()> {
        for (i, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(col, row + i as u16), Print(line))?;
        }
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Renderer for TermManager {
    fn clear_frame(&mut self) -> io::Result<()> {
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
    }

    fn draw_border(&mut self, bounds: Bounds) -> io::Result<()> {
        let (end_x, end_y) = (bounds.width + 1, bounds.height + 1);
        queue!(self.stdout, SetForegroundColor(Color::White), SetBackgroundColor(Color::White))?;

        for x in 0..=end_x {
            self.print_at(Position::new(x, 0), BORDER_CHAR)?;
            self.print_at(Position::new(x, end_y), BORDER_CHAR)?;
        }

        for y in 1..end_y {
            self.print_at(Position::new(0, y), BORDER_CHAR)?;
            self.print_at(Position::new(end_x, y), BORDER_CHAR)?;
        }

        queue!(self.stdout, ResetColor)
    }

    fn draw_snake(&mut self, head: Position, body: &VecDeque<Position>) -> io::Result<()> {
        queue!(self.stdout, SetForegroundColor(Color::Green), SetBackgroundColor(Color::Black))?;
        self.print_at(head, SNAKE_HEAD_CHAR)?;
        for pos in body {
            self.print_at(*pos, SNAKE_BODY_CHAR)?;
        }
        queue!(self.stdout, ResetColor)
    }

    fn draw_food(&mut self, food: Position) -> io::Result<()> {
        queue!(self.stdout, SetForegroundColor(Color::Red), SetBackgroundColor(Color::Red))?;
        self.print_at(food, FOOD_CHAR)?;
        queue!(self.stdout, ResetColor)
    }

    fn draw_stats(&mut self, score: u32, moves: u32, offset: (GridInt, GridInt)) -> io::Result<()> {
        let lines = [
            format!("Score: {}", score),
            format!("Move counter: {}", moves),
            format!("Player pos: x={}, y={}", offset.0, offset.1),
        ];
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.print_lines_at(0, GRID_HEIGHT as u16 + 3, &lines)
    }

    fn draw_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let msg_height = lines.len() as u16 + 2;
        let center = (MIN_WIDTH / 2, (GRID_HEIGHT as u16 + 2) / 2);
        let left = center.0.saturating_sub(msg_width / 2);
        let top = center.1.saturating_sub(msg_height / 2);

        let blank = " ".repeat(msg_width as usize);
        self.print_lines_at(left, top, &[blank.as_str()])?;
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_lines_at(left, top + 1 + i as u16, &[padded.as_str()])?;
        }
        self.print_lines_at(left, top + msg_height - 1, &[blank.as_str()])
    }

    fn present_frame(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl InputSource for TermManager {
    fn poll_commands(&mut self) -> io::Result<Vec<Command>> {
        let mut commands = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if let Some(command) = command_for(&ev) {
                    commands.push(command);
                }
            }
        }

        Ok(commands)
    }
}

impl Prompt for TermManager {
    fn show(&mut self, lines: &[&str]) -> io::Result<()> {
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        self.print_lines_at(0, 0, lines)?;
        self.stdout.flush()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(key_for(&ev));
                }
            }
        }
    }
}

/// Leaves raw mode, then the alternate screen. The second step runs even if
/// the first fails; the first error wins.
fn teardown<R, S>(raw_mode: R, screen: S) -> io::Result<()>
where
    R: FnOnce() -> io::Result<()>,
    S: FnOnce() -> io::Result<()>,
{
    let raw = raw_mode();
    let screen = screen();
    raw.and(screen)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Maps a key press during play; anything unrecognised is no input.
fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let dir = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Direction::Up,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Direction::Left,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Direction::Down,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Direction::Right,
        KeyCode::Esc => return Some(Command::TogglePause),
        _ => return None,
    };
    Some(Command::Steer(dir))
}

fn key_for(ev: &KeyEvent) -> Key {
    if is_ctrl_c(ev) {
        return Key::Interrupt;
    }
    match ev.code {
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => Key::Other,
    }
}
