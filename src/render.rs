use std::io::{Stdout, Write};

use bloom_maze::{Phase, Pos, Session, Tile, Tilt};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
const BLOOM_COLORS: [Color; 4] = [Color::Magenta, Color::DarkMagenta, Color::Yellow, Color::Red];

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Blank,
    Branch,
    Trail,
    Player,
    Goal,
    Bloom,
    Blossom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Blank,
    color: Color::Reset,
};

pub struct Renderer {
    rows: usize,
    cols: usize,
    last: Vec<Cell>,
    last_hud: String,
    last_footer: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            last: vec![BLANK; rows * cols],
            last_hud: String::new(),
            last_footer: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    fn board_size(&self) -> (u16, u16) {
        ((self.cols * CELL_W) as u16, self.rows as u16)
    }

    /// Pointer position as fractions of the board, `None` when off the board.
    pub fn board_fraction(&self, column: u16, row: u16) -> Option<(f32, f32)> {
        let (w, h) = self.board_size();
        if column < self.origin_x
            || row < self.origin_y
            || column >= self.origin_x + w
            || row >= self.origin_y + h
        {
            return None;
        }
        let fx = (f32::from(column - self.origin_x) + 0.5) / f32::from(w);
        let fy = (f32::from(row - self.origin_y) + 0.5) / f32::from(h);
        Some((fx, fy))
    }

    pub fn draw(&mut self, stdout: &mut Stdout, session: &Session, tilt: &Tilt) -> std::io::Result<()> {
        let (board_w, board_h) = self.board_size();
        let needed_h = board_h + 2;

        stdout.queue(MoveTo(0, 0))?;
        let (term_w, term_h) = terminal::size()?;
        if term_w < board_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                board_w, needed_h, term_w, term_h
            )))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - board_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(session, tilt);
        if self.needs_full || hud != self.last_hud {
            self.print_line(stdout, self.origin_y - 1, &hud, Color::White)?;
            self.last_hud = hud;
        }

        for y in 0..self.rows {
            for x in 0..self.cols {
                let cell = cell_for(session, Pos::new(x, y));
                let idx = y * self.cols + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }

        let footer = footer_line(session);
        if self.needs_full || footer != self.last_footer {
            let color = if session.is_won() { Color::Green } else { Color::DarkGrey };
            self.print_line(stdout, self.origin_y + board_h, &footer, color)?;
            self.last_footer = footer;
        }
        self.needs_full = false;

        stdout.flush()
    }

    fn print_line(&self, stdout: &mut Stdout, y: u16, text: &str, color: Color) -> std::io::Result<()> {
        stdout.queue(MoveTo(0, y))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(MoveTo(self.origin_x, y))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> std::io::Result<()> {
        let text = match cell.glyph {
            Glyph::Blank => "  ",
            Glyph::Branch => "░░",
            Glyph::Trail => "▓▓",
            Glyph::Player => "❀",
            Glyph::Goal => "◆",
            Glyph::Bloom => "✿",
            Glyph::Blossom => "🌸",
        };
        stdout.queue(MoveTo(
            self.origin_x + (x * CELL_W) as u16,
            self.origin_y + y as u16,
        ))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            stdout.queue(Print(' '))?;
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn cell_for(session: &Session, pos: Pos) -> Cell {
    let maze = session.maze();
    if maze.tile(pos) != Some(Tile::Open) {
        return BLANK;
    }
    let won = session.is_won();
    if pos == maze.end() {
        return if won {
            Cell {
                glyph: Glyph::Blossom,
                color: Color::Magenta,
            }
        } else {
            Cell {
                glyph: Glyph::Goal,
                color: Color::Magenta,
            }
        };
    }
    if pos == session.position() && !won {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Cyan,
        };
    }
    match session.trail().position_of(pos) {
        Some(idx) if won => Cell {
            glyph: Glyph::Bloom,
            color: BLOOM_COLORS[idx % BLOOM_COLORS.len()],
        },
        Some(_) => Cell {
            glyph: Glyph::Trail,
            color: Color::Green,
        },
        None => Cell {
            glyph: Glyph::Branch,
            color: Color::DarkYellow,
        },
    }
}

fn hud_line(session: &Session, tilt: &Tilt) -> String {
    let status = match session.phase() {
        Phase::Playing => "PLAY BLOOM",
        Phase::Won => "BLOSSOM",
    };
    format!(
        "{}  Trail: {}  Moves: {}  Tilt: {:+.0}/{:+.0}",
        status,
        session.trail().len(),
        session.moves(),
        tilt.x,
        tilt.y
    )
}

fn footer_line(session: &Session) -> String {
    if session.is_won() {
        "MAZE BLOOMED! SPACE TO RESET".to_string()
    } else {
        "WASD/arrows move  IJKL tilt  q quit".to_string()
    }
}
