use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::config::parse_depth;
use connect4_engine::*;

/// A human opponent typing moves into the terminal
struct TerminalOpponent {
    stdin: Stdin,
}

impl GameInterface for TerminalOpponent {
    fn opponent_move(&mut self, board: &BoardState) -> Result<usize> {
        loop {
            print!("Move input > ");
            stdout().flush().expect("Failed to flush to stdout!");
            let mut input_str = String::new();
            if self.stdin.read_line(&mut input_str)? == 0 {
                return Err(anyhow!("Input closed"));
            }

            match input_str.trim().parse::<usize>() {
                Err(_) => println!("Invalid number: {}", input_str.trim()),
                Ok(column) if column < 1 || column > WIDTH => println!(
                    "Invalid move, column {} out of range. Columns must be between 1 and {}",
                    column, WIDTH
                ),
                Ok(column) if !board.is_legal(column) => {
                    println!("Invalid move, column {} full", column)
                }
                Ok(column) => return Ok(column),
            }
        }
    }

    fn play_move(&mut self, column: usize) -> Result<()> {
        println!("AI plays column {}", column);
        Ok(())
    }

    fn show(&mut self, board: &BoardState) -> Result<()> {
        draw_board(board)
    }
}

fn draw_board(board: &BoardState) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for row in board.snapshot().iter() {
        for cell in row.iter() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush().expect("failed to flush to stdout!");
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("Input closed"));
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_depth(stdin: &Stdin) -> Result<u32> {
    loop {
        let mut buffer = String::new();
        print!("Search depth [{}]: ", config::DEFAULT_DEPTH);
        stdout().flush().expect("failed to flush to stdout!");
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("Input closed"));
        }
        match parse_depth(&buffer) {
            Ok(depth) => return Ok(depth),
            Err(err) => println!("{}", err),
        }
    }
}

fn ask_games(stdin: &Stdin) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("Number of games: ");
        stdout().flush().expect("failed to flush to stdout!");
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("Input closed"));
        }
        match buffer.trim().parse::<usize>() {
            Ok(games) if games > 0 => return Ok(games),
            _ => println!("Invalid number: {}", buffer.trim()),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    if ask_yes_no(
        &stdin,
        "Play a self-play benchmark against a random opponent instead? y/n: ",
    )? {
        let games = ask_games(&stdin)?;
        let depth = ask_depth(&stdin)?;
        let summary = run_matches(games, Config::default().with_depth(depth)?)?;
        println!("{}", summary);
        return Ok(());
    }

    let depth = ask_depth(&stdin)?;
    let engine_first = ask_yes_no(&stdin, "Does the AI (red) move first? y/n: ")?;
    let config = Config {
        engine_first,
        ..Config::default().with_depth(depth)?
    };

    let mut driver = GameDriver::new(TerminalOpponent { stdin }, config);
    match driver.run()? {
        GameState::PlayerOneWin => println!("The AI wins!"),
        GameState::PlayerTwoWin => println!("You win!"),
        GameState::Draw => println!("Draw!"),
        GameState::Playing => unreachable!("game loop only returns finished games"),
    }
    Ok(())
}
