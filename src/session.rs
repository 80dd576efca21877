/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, Write},
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};
use clap::{error::ErrorKind, Parser};
use log::{debug, info};

use crate::{perft, splitperft, Game, GameCommand, GameStatus, Move, MoveMap, Square};

/// What the session loop should do after executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// An interactive game of chess, played by entering [`GameCommand`]s.
#[derive(Debug)]
pub struct Session {
    /// The game being played.
    ///
    /// This is modified whenever moves are played or new positions are given,
    /// and is reset whenever a new game is started.
    game: Game,

    /// One half of a channel, responsible for sending commands to the session to execute.
    sender: Sender<GameCommand>,

    /// One half of a channel, responsible for receiving commands for the session to execute.
    receiver: Receiver<GameCommand>,
}

impl Session {
    /// Constructs a new [`Session`] at the starting position, to be executed with [`Session::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the program's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Fetch the game being played.
    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Sends a [`GameCommand`] to the session to be executed once it runs.
    pub fn send_command(&self, command: GameCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to queue command for the session")
    }

    /// Execute the main event loop for the session.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands,
    /// until the game ends or the player quits.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting {}", self.name());

        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                debug!("Input handler thread stopping: {err:#}");
            }
        });

        let mut out = io::stdout();
        writeln!(out, "Welcome to Chess!")?;
        write_prompt(&mut out, &self.game)?;

        while let Ok(cmd) = self.receiver.recv() {
            match self.execute(cmd, &mut out) {
                Ok(Flow::Continue) => write_prompt(&mut out, &self.game)?,
                Ok(Flow::Stop) => break,
                // Keep running, even on error
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    write_prompt(&mut out, &self.game)?;
                }
            }
        }

        out.flush().context("Failed to flush stdout")
    }

    /// Executes a single [`GameCommand`], writing any output to `out`.
    fn execute(&mut self, cmd: GameCommand, out: &mut impl Write) -> Result<Flow> {
        match cmd {
            GameCommand::Board => writeln!(out, "{}", self.game)?,

            GameCommand::Fen { fen } => {
                if fen.is_empty() {
                    writeln!(out, "{}", self.game.to_fen())?;
                } else {
                    self.game = Game::from_fen(&fen.join(" "))?;
                    writeln!(out, "{}", self.game)?;
                }
            }

            GameCommand::List { square } => {
                let moves = if let Some(square) = square {
                    MoveMap::from([(square, self.game.legal_moves_from(square))])
                } else {
                    self.game.legal_moves()
                };

                let list = Move::list(&moves);
                if list.is_empty() {
                    writeln!(out, "(none)")?;
                }
                for mv in list {
                    writeln!(out, "{mv:#}")?;
                }
            }

            GameCommand::Move { from, to } => return self.play(from, to, out),

            GameCommand::New => {
                self.game.reset();
                writeln!(out, "{}", self.game)?;
            }

            GameCommand::Perft { depth } => {
                writeln!(out, "{}", perft(&self.game, depth))?;
            }

            GameCommand::Splitperft { depth } => {
                // Flush anything pending, since the per-move counts are printed directly
                out.flush()?;
                let nodes = splitperft(&self.game, depth);
                writeln!(out, "\n{nodes}")?;
            }

            GameCommand::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Stop);
            }
        }

        Ok(Flow::Continue)
    }

    /// Attempts to play a move, announcing the outcome.
    ///
    /// Ends the session if the move ended the game.
    fn play(&mut self, from: Square, to: Square, out: &mut impl Write) -> Result<Flow> {
        let mover = self.game.side_to_move();

        if !self.game.try_move(from, to) {
            writeln!(out, "Invalid move")?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "{}", self.game)?;

        let flow = match self.game.status() {
            GameStatus::Checkmate => {
                writeln!(out, "The game is over. Congrats to {mover}.")?;
                Flow::Stop
            }
            GameStatus::Stalemate => {
                writeln!(out, "The game is over. It's a draw.")?;
                Flow::Stop
            }
            GameStatus::Check => {
                writeln!(out, "Check! {} must save the king!", self.game.side_to_move())?;
                Flow::Continue
            }
            GameStatus::Ongoing => Flow::Continue,
        };

        Ok(flow)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Announces whose turn it is.
fn write_prompt(out: &mut impl Write, game: &Game) -> Result<()> {
    writeln!(out, "{}'s move", game.side_to_move())?;
    out.flush().context("Failed to flush stdout")
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<GameCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(GameCommand::Quit)
                .context("Failed to send 'quit' command after receiving empty input")?;

            bail!("Received input of 0 bytes and is quitting");
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match GameCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to session")?,

            // `help` is an "error" according to Clap
            Err(err) if err.kind() == ErrorKind::DisplayHelp => println!("{err}"),

            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_commands(session: &mut Session, commands: &[&str]) -> (String, Flow) {
        let mut out = Vec::new();
        let mut flow = Flow::Continue;

        for cmd in commands {
            let cmd = cmd.parse::<GameCommand>().unwrap();
            flow = session.execute(cmd, &mut out).unwrap();
        }

        (String::from_utf8(out).unwrap(), flow)
    }

    #[test]
    fn test_invalid_move_is_reported() {
        let mut session = Session::new();
        let (out, flow) = run_commands(&mut session, &["move e2 e5"]);
        assert_eq!(out, "Invalid move\n");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(*session.game(), Game::new());
    }

    #[test]
    fn test_list_single_square() {
        let mut session = Session::new();
        let (out, _) = run_commands(&mut session, &["list b1"]);
        assert_eq!(out, "b1 a3\nb1 c3\n");

        let (out, _) = run_commands(&mut session, &["list e4"]);
        assert_eq!(out, "(none)\n");
    }

    #[test]
    fn test_list_all_moves() {
        let mut session = Session::new();
        let (out, _) = run_commands(&mut session, &["list"]);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines.first(), Some(&"b1 a3"));
        assert_eq!(lines.last(), Some(&"h2 h4"));
    }

    #[test]
    fn test_check_is_announced() {
        let mut session = Session::new();
        let (out, flow) =
            run_commands(&mut session, &["move e2 e4", "move f7 f6", "move d1 h5"]);
        assert!(out.ends_with("Check! Black must save the king!\n"), "{out}");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_checkmate_ends_session() {
        let mut session = Session::new();
        let (out, flow) = run_commands(
            &mut session,
            &["move f2 f3", "move e7 e5", "move g2 g4", "move d8 h4"],
        );
        assert!(out.ends_with("The game is over. Congrats to Black.\n"), "{out}");
        assert_eq!(flow, Flow::Stop);
    }

    #[test]
    fn test_stalemate_ends_session() {
        let mut session = Session::new();
        let (out, flow) = run_commands(
            &mut session,
            &["fen 7k/4Q3/6K1/8/8/8/8/8 w", "move e7 f7"],
        );
        assert!(out.ends_with("The game is over. It's a draw.\n"), "{out}");
        assert_eq!(flow, Flow::Stop);
    }

    #[test]
    fn test_fen_load_and_print() {
        let mut session = Session::new();
        let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 1";
        let (_, _) = run_commands(&mut session, &[&format!("fen {fen}")]);
        let (out, _) = run_commands(&mut session, &["fen"]);
        assert_eq!(out, format!("{fen}\n"));

        // A bad FEN is an error, and the position is kept
        let bad = "fen 8/8/8/8/8/8/8/8 w".parse::<GameCommand>().unwrap();
        assert!(session.execute(bad, &mut Vec::new()).is_err());
        assert_eq!(session.game().to_fen(), fen);
    }

    #[test]
    fn test_new_and_quit() {
        let mut session = Session::new();
        let (_, _) = run_commands(&mut session, &["move e2 e4", "new"]);
        assert_eq!(*session.game(), Game::new());

        let (out, flow) = run_commands(&mut session, &["quit"]);
        assert_eq!(out, "Goodbye!\n");
        assert_eq!(flow, Flow::Stop);
    }

    #[test]
    fn test_perft() {
        let mut session = Session::new();
        let (out, _) = run_commands(&mut session, &["perft 2"]);
        assert_eq!(out, "400\n");
    }
}
