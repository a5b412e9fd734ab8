//! Terminal front-ends for both games.
//!
//! Everything presentation-shaped lives here: drawing tiles and cards,
//! decoding clicks and keys into slot indices, and turning wall-clock time
//! into the engine's 1 Hz ticks. The engine side of the seam is
//! [`RenderSink`]; this module implements it with a small recorder so the
//! draw pass after each event can paint what the engine reported.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tile_games::memory::{Flip, MemoryGame};
use tile_games::{Board, Direction, Edges, RenderSink, Session, Slot};

const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 4;
const TILE_W: usize = 6;
const TILE_H: usize = 3;

/// Memory layout: fixed five cards per row.
const CARD_COLS: usize = 5;

const GLYPHS: [char; 30] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4',
];

/// Raw-mode/alt-screen guard; restores the terminal however we leave.
struct Term;

impl Term {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Term)
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// What the engine reported since the last draw.
#[derive(Default)]
struct FrameNotes {
    effects: Vec<Edges>,
    settled: Option<Slot>,
    won: Option<(u32, u32, u32)>,
    dirty: bool,
}

impl RenderSink for FrameNotes {
    fn board_changed(&mut self, _board: &Board, effects: &[Edges]) {
        self.effects = effects.to_vec();
        self.settled = None;
        self.dirty = true;
    }

    fn tile_settled(&mut self, slot: Slot) {
        self.settled = Some(slot);
    }

    fn game_won(&mut self, moves: u32, elapsed_secs: u32, score: u32) {
        self.won = Some((moves, elapsed_secs, score));
    }
}

pub fn run_slide(rows: usize, cols: usize, difficulty: u32, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("slide seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut notes = FrameNotes::default();
    let mut session = Session::new(rows, cols, difficulty, &mut rng, &mut notes)?;

    let _term = Term::enter()?;
    let mut out = io::stdout();
    let mut last_tick = Instant::now();

    loop {
        if notes.dirty {
            draw_slide(&mut out, &session, &notes)?;
            notes.dirty = false;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        session = Session::new(rows, cols, difficulty, &mut rng, &mut notes)?;
                        notes.won = None;
                        last_tick = Instant::now();
                    }
                    code => {
                        if let Some(dir) = arrow_direction(code) {
                            // Arrow = direction the tile travels, so the tile
                            // sits on the opposite side of the hole.
                            let board = session.board();
                            if let Some(slot) =
                                board.neighbor(board.empty_slot(), dir.opposite())
                            {
                                session.attempt_move(slot, &mut notes);
                            }
                        }
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(slot) = hit_test(session.board(), column, row) {
                        session.attempt_move(slot, &mut notes);
                    }
                }
                Event::Resize(_, _) => notes.dirty = true,
                _ => {}
            }
        }

        while last_tick.elapsed() >= Duration::from_secs(1) {
            last_tick += Duration::from_secs(1);
            session.tick();
            notes.dirty = true;
        }
    }

    Ok(())
}

fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        _ => None,
    }
}

fn hit_test(board: &Board, column: u16, row: u16) -> Option<Slot> {
    let x = column.checked_sub(BOARD_X)? as usize / TILE_W;
    let y = row.checked_sub(BOARD_Y)? as usize / TILE_H;
    (x < board.cols() && y < board.rows()).then(|| y * board.cols() + x)
}

fn draw_slide(out: &mut Stdout, session: &Session, notes: &FrameNotes) -> Result<()> {
    let board = session.board();

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print("Sliding Puzzle"),
        SetAttribute(Attribute::Reset),
        MoveTo(0, 1),
        Print(format!(
            "Moves: {:<5} Time: {}s",
            session.moves(),
            session.elapsed_secs()
        )),
        MoveTo(0, 2),
        SetForegroundColor(Color::DarkGrey),
        Print("click a tile or use the arrows - r restart - q quit"),
        ResetColor,
    )?;

    for slot in 0..board.len() {
        draw_tile(out, board, notes, slot)?;
    }

    if let Some((moves, elapsed_secs, score)) = notes.won {
        let y = BOARD_Y + (board.rows() * TILE_H) as u16 + 1;
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(Color::Green),
            Print(format!(
                "Solved in {} moves and {}s - score {}",
                moves, elapsed_secs, score
            )),
            ResetColor,
        )?;
    }

    out.flush()?;
    Ok(())
}

fn draw_tile(out: &mut Stdout, board: &Board, notes: &FrameNotes, slot: Slot) -> Result<()> {
    let (row, col) = board.row_col(slot);
    let x = BOARD_X + (col * TILE_W) as u16;
    let y = BOARD_Y + (row * TILE_H) as u16;
    let tile = board.tile(slot);

    // The hole stays blank until the win, then the reveal fills in the one
    // tile the player never got to slide.
    if tile == board.empty_id() && notes.won.is_none() {
        for dy in 0..TILE_H as u16 {
            queue!(out, MoveTo(x, y + dy), Print("      "))?;
        }
        return Ok(());
    }

    let edges = notes
        .effects
        .get(slot)
        .copied()
        .unwrap_or_else(Edges::empty);
    let settled = notes.settled == Some(slot);

    queue!(
        out,
        MoveTo(x, y),
        SetForegroundColor(edge_color(edges.contains(Edges::TOP))),
        Print("┌────┐"),
        MoveTo(x, y + 1),
        SetForegroundColor(edge_color(edges.contains(Edges::LEFT))),
        Print("│"),
        ResetColor,
    )?;

    if settled {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    queue!(out, Print(format!(" {:>2} ", u16::from(tile) + 1)))?;
    if settled {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }

    queue!(
        out,
        SetForegroundColor(edge_color(edges.contains(Edges::RIGHT))),
        Print("│"),
        MoveTo(x, y + 2),
        SetForegroundColor(edge_color(edges.contains(Edges::BOTTOM))),
        Print("└────┘"),
        ResetColor,
    )?;
    Ok(())
}

fn edge_color(lit: bool) -> Color {
    if lit {
        Color::Yellow
    } else {
        Color::DarkGrey
    }
}

pub fn run_memory(pairs: usize, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("memory seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut game = MemoryGame::new(pairs, &mut rng)?;

    let _term = Term::enter()?;
    let mut out = io::stdout();
    let mut last_tick = Instant::now();
    let mut resolve_at: Option<Instant> = None;
    let mut dirty = true;

    loop {
        if dirty {
            draw_memory(&mut out, &game)?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => {
                        game = MemoryGame::new(pairs, &mut rng)?;
                        resolve_at = None;
                        last_tick = Instant::now();
                        dirty = true;
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(index) = hit_test_card(&game, column, row) {
                        match game.flip(index) {
                            Flip::FaceUp => dirty = true,
                            Flip::Pair { matched } => {
                                // Let the player see both cards before the
                                // pair is settled; a mismatch lingers longer.
                                let delay = if matched { 500 } else { 1000 };
                                resolve_at =
                                    Some(Instant::now() + Duration::from_millis(delay));
                                dirty = true;
                            }
                            Flip::Ignored => {}
                        }
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if let Some(deadline) = resolve_at {
            if Instant::now() >= deadline {
                resolve_at = None;
                game.resolve();
                dirty = true;
            }
        }

        while last_tick.elapsed() >= Duration::from_secs(1) {
            last_tick += Duration::from_secs(1);
            game.tick();
            dirty = true;
        }
    }

    Ok(())
}

fn hit_test_card(game: &MemoryGame, column: u16, row: u16) -> Option<usize> {
    let x = column.checked_sub(BOARD_X)? as usize / TILE_W;
    let y = row.checked_sub(BOARD_Y)? as usize / TILE_H;
    let index = y * CARD_COLS + x;
    (x < CARD_COLS && index < game.cards().len()).then(|| index)
}

fn draw_memory(out: &mut Stdout, game: &MemoryGame) -> Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print("Memory Match"),
        SetAttribute(Attribute::Reset),
        MoveTo(0, 1),
        Print(format!(
            "Moves: {:<5} Time: {}  Matches: {}/{}",
            game.moves(),
            format_mmss(game.elapsed_secs()),
            game.matches(),
            game.pairs()
        )),
        MoveTo(0, 2),
        SetForegroundColor(Color::DarkGrey),
        Print("click a card to flip it - r new deal - q quit"),
        ResetColor,
    )?;

    for index in 0..game.cards().len() {
        draw_card(out, game, index)?;
    }

    if game.is_won() {
        let rows = (game.cards().len() + CARD_COLS - 1) / CARD_COLS;
        let y = BOARD_Y + (rows * TILE_H) as u16 + 1;
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(Color::Green),
            Print(format!(
                "All pairs found in {} moves - time {}",
                game.moves(),
                format_mmss(game.elapsed_secs())
            )),
            ResetColor,
        )?;
    }

    out.flush()?;
    Ok(())
}

fn draw_card(out: &mut Stdout, game: &MemoryGame, index: usize) -> Result<()> {
    let card = game.cards()[index];
    let x = BOARD_X + (index % CARD_COLS * TILE_W) as u16;
    let y = BOARD_Y + (index / CARD_COLS * TILE_H) as u16;

    let border = if card.is_matched() {
        Color::Green
    } else if card.is_face_up() {
        Color::Yellow
    } else {
        Color::DarkGrey
    };
    let face = if card.is_face_up() || card.is_matched() {
        format!(" {}  ", GLYPHS[card.character() as usize])
    } else {
        "░░░░".to_string()
    };

    queue!(
        out,
        SetForegroundColor(border),
        MoveTo(x, y),
        Print("┌────┐"),
        MoveTo(x, y + 1),
        Print("│"),
        ResetColor,
        Print(face),
        SetForegroundColor(border),
        Print("│"),
        MoveTo(x, y + 2),
        Print("└────┘"),
        ResetColor,
    )?;
    Ok(())
}

fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
