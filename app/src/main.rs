use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use maze_app::files::{load_moves, save_snapshot};
use maze_app::input::{command_for_key, Command};
use maze_app::render::{render_ascii, Markers};
use maze_app::{apply_move, replay_moves, resolve_seed, MazeConfig, MazeSession, MazeSnapshot, SessionPhase};
use maze_core::{Direction, Maze, MoveOutcome, Position, DEFAULT_CANVAS_SIZE, DEFAULT_COLS, DEFAULT_ROWS};

/// Perfect maze generator and walker
#[derive(Parser, Debug)]
#[command(name = "maze", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Watch the maze being carved, then walk it with w/a/s/d or the arrow keys
    Play(PlayArgs),
    /// Generate a maze and print it
    Generate(GenerateArgs),
    /// Replay a JSON moves file against a maze and report whether it reaches the goal
    Replay(ReplayArgs),
    /// Try a single move from a cell and report where it ends up
    Move(MoveArgs),
}

#[derive(Args, Debug)]
struct MazeArgs {
    /// Number of cell rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of cell columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Maze seed; a random one is picked when omitted
    #[arg(long)]
    seed: Option<u32>,

    /// Side of the square canvas, in pixels, recorded in saved snapshots
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    canvas_size: f64,
}

impl MazeArgs {
    fn config(&self) -> MazeConfig {
        MazeConfig {
            canvas_size: self.canvas_size,
            ..MazeConfig::new(self.rows, self.cols)
        }
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    maze: MazeArgs,

    /// Delay between generation steps
    #[arg(long, default_value_t = 16)]
    frame_delay_ms: u64,

    /// Skip the carving animation
    #[arg(long)]
    no_animate: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    maze: MazeArgs,

    /// Save the maze snapshot (JSON) to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON file containing the moves array (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST)
    moves_file: PathBuf,

    #[command(flatten)]
    maze: MazeArgs,
}

#[derive(Args, Debug)]
struct MoveArgs {
    /// north/up/top, east/right, south/down/bottom or west/left
    direction: Direction,

    /// Row of the starting cell
    #[arg(long, default_value_t = 0)]
    row: usize,

    /// Column of the starting cell
    #[arg(long, default_value_t = 0)]
    col: usize,

    #[command(flatten)]
    maze: MazeArgs,
}

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        CliCommand::Play(args) => play_command(args),
        CliCommand::Generate(args) => generate_command(args),
        CliCommand::Replay(args) => replay_command(args),
        CliCommand::Move(args) => move_command(args),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn generate_command(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.maze.config();
    let maze_seed = resolve_seed(args.maze.seed);

    println!("📋 Generating maze");
    println!("  Maze seed: {}", maze_seed);
    println!("  Size: {}x{} cells", config.rows, config.cols);
    println!();

    config.validate()?;
    let start = Instant::now();
    let maze = Maze::generate(config.rows, config.cols, maze_seed)?;
    let elapsed = start.elapsed();
    let snapshot = MazeSnapshot::from_maze(&maze, config.canvas_size);

    let markers = Markers {
        player: Some(Position::ORIGIN),
        goal: Some(snapshot.goal),
        ..Markers::default()
    };
    println!("{}", render_ascii(maze.grid(), &markers));
    println!("✅ Maze generated in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!(
        "  Steps: {} ({} carves, {} backtracks)",
        snapshot.summary.steps, snapshot.summary.carves, snapshot.summary.backtracks
    );

    if let Some(path) = args.output {
        save_snapshot(&snapshot, &path)?;
        println!("💾 Maze snapshot saved to: {}", path.display());
    }

    Ok(())
}

fn replay_command(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let maze_seed = args
        .maze
        .seed
        .ok_or("replay needs the maze seed (--seed)")?;
    let config = args.maze.config();

    let moves = load_moves(&args.moves_file)?;
    println!("📦 Loaded {} moves from {}", moves.len(), args.moves_file.display());
    println!("  First 20 moves: {:?}", &moves[..20.min(moves.len())]);
    println!();

    let summary = replay_moves(maze_seed, &config, &moves)?;

    println!("  Final position: {}", summary.final_position);
    println!("  Moves applied: {} ({} blocked)", summary.moves_applied, summary.blocked);
    println!("  Goal reached: {}", if summary.reached_goal { "Yes ✓" } else { "No ✗" });
    Ok(())
}

fn move_command(args: MoveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let maze_seed = args.maze.seed.ok_or("move needs the maze seed (--seed)")?;
    let config = args.maze.config();
    let from = Position::new(args.row, args.col);

    match apply_move(maze_seed, &config, from, args.direction)? {
        MoveOutcome::Moved(to) => println!("✅ Moved {} from {} to {}", args.direction, from, to),
        MoveOutcome::Blocked { reason, .. } => {
            println!("🚫 Can't move {} from {}: blocked by {:?}", args.direction, from, reason)
        }
    }
    Ok(())
}

/// Puts the terminal back the way we found it, even on early return
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// How a round of play ended
enum RoundEnd {
    Quit,
    Restart,
}

const NAVIGATE_HINT: &str = "Reach X with w/a/s/d or arrows (r for a new maze, q to quit)";

fn play_command(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.maze.config();
    config.validate()?;
    let maze_seed = resolve_seed(args.maze.seed);
    tracing::info!("Starting {}x{} maze with seed {}", config.rows, config.cols, maze_seed);

    let mut session = MazeSession::new(config.rows, config.cols, maze_seed)?;
    let delay = Duration::from_millis(args.frame_delay_ms);

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    loop {
        if args.no_animate {
            session.finish_generation();
        } else if !animate_generation(&mut stdout, &mut session, delay)? {
            return Ok(());
        }

        match navigate_round(&mut stdout, &mut session)? {
            RoundEnd::Quit => return Ok(()),
            RoundEnd::Restart => {
                let seed = resolve_seed(None);
                tracing::debug!("New maze with seed {}", seed);
                session.restart(seed);
            }
        }
    }
}

/// One generation step per frame. Returns false when the player quit.
fn animate_generation(stdout: &mut io::Stdout, session: &mut MazeSession, delay: Duration) -> io::Result<bool> {
    while session.phase() == SessionPhase::Generating {
        session.tick();
        draw(stdout, session, "Generating... (q to quit)")?;

        if event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
                if command_for_key(code) == Some(Command::Quit) {
                    return Ok(false);
                }
            }
        }
        thread::sleep(delay);
    }
    Ok(true)
}

fn navigate_round(stdout: &mut io::Stdout, session: &mut MazeSession) -> io::Result<RoundEnd> {
    draw(stdout, session, NAVIGATE_HINT)?;

    loop {
        let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? else {
            continue;
        };

        match command_for_key(code) {
            Some(Command::Quit) => return Ok(RoundEnd::Quit),
            Some(Command::Restart) => return Ok(RoundEnd::Restart),
            Some(Command::Move(direction)) => {
                let status = match session.move_player(direction) {
                    Some(MoveOutcome::Blocked { .. }) => "Can't move that way",
                    _ => NAVIGATE_HINT,
                };

                if session.at_goal() {
                    draw(stdout, session, "🎊 You made it! Press r for a new maze, any other key to exit")?;
                    return Ok(loop {
                        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
                            break match command_for_key(code) {
                                Some(Command::Restart) => RoundEnd::Restart,
                                _ => RoundEnd::Quit,
                            };
                        }
                    });
                }
                draw(stdout, session, status)?;
            }
            None => {}
        }
    }
}

fn draw(stdout: &mut io::Stdout, session: &MazeSession, status: &str) -> io::Result<()> {
    let markers = Markers {
        cursor: session.cursor(),
        player: session.player(),
        goal: session.player().map(|_| session.goal()),
    };
    let frame = render_ascii(session.grid(), &markers);

    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    // Raw mode does not translate \n into \r\n
    for line in frame.lines() {
        write!(stdout, "{}\r\n", line)?;
    }
    write!(stdout, "{}\r\n", status)?;
    stdout.flush()
}
