//! Interactive play loop and scripted replays.

use anyhow::{Context, Result, bail};
use derive_getters::Getters;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use strictly_rush_hour::{
    BoardSnapshot, CollisionMode, LevelDefinition, LevelId, MoveError, MoveOutcome,
    PuzzleObserver, PuzzleSession, SolvedSummary,
};
use tracing::{debug, info, instrument, warn};

use crate::commands::{HELP, PlayerCommand};
use crate::config::GameConfig;
use crate::loader::LevelLoader;
use crate::render::TextRenderer;

/// What happened over a play session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct PlaySummary {
    /// Levels solved, in order.
    solved: Vec<SolvedSummary>,
    /// Whether the last bundled level was solved.
    completed: bool,
}

enum LevelEnd {
    Solved(SolvedSummary),
    Quit,
}

/// Plays levels from the configured directory, reading commands from `input`.
///
/// Starts at the configured level and moves on to the next one after each
/// win and the celebration delay. Returns when the player quits, input runs
/// out, or the last level is solved.
#[instrument(skip(config, input, output), fields(levels_dir = %config.levels_dir().display()))]
pub fn run_play<R: BufRead, W: Write>(
    config: &GameConfig,
    input: R,
    output: W,
) -> Result<PlaySummary> {
    let loader = LevelLoader::new(config.levels_dir());
    let mut lines = input.lines();
    let mut renderer = TextRenderer::new(output);
    let mut summary = PlaySummary::default();
    let mut number = *config.start_level();

    renderer.message("Type `help` for commands.")?;

    loop {
        let level = loader.load(number)?;
        renderer.message(format!("\nLevel {}", level.id()))?;

        let mut session =
            PuzzleSession::with_observer(level, renderer).with_collision_mode(*config.collision());
        session.load()?;
        let end = play_level(&mut session, &mut lines)?;

        renderer = session.into_observer();
        if let Some(error) = renderer.take_error() {
            return Err(error).context("Failed to draw board");
        }

        match end {
            LevelEnd::Quit => {
                info!(solved = summary.solved.len(), "Player left");
                break;
            }
            LevelEnd::Solved(solved) => {
                summary.solved.push(solved);
                std::thread::sleep(config.celebration_delay());
                if !loader.exists(number + 1) {
                    renderer.message("All levels solved.")?;
                    summary.completed = true;
                    break;
                }
                number += 1;
            }
        }
    }

    Ok(summary)
}

fn play_level<W: Write>(
    session: &mut PuzzleSession<TextRenderer<W>>,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<LevelEnd> {
    loop {
        let Some(line) = lines.next() else {
            debug!("Input closed");
            return Ok(LevelEnd::Quit);
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<PlayerCommand>() {
            Ok(command) => command,
            Err(error) => {
                session.observer_mut().message(error.to_string())?;
                continue;
            }
        };

        match command {
            PlayerCommand::Move { piece, col, row } => {
                let result = session.request_move(piece, col, row);
                report(session, result)?;
            }
            PlayerCommand::Shift { piece, delta } => {
                let result = session.request_shift(piece, delta);
                report(session, result)?;
            }
            PlayerCommand::Reset => session.reset()?,
            PlayerCommand::Show => {
                if let Some(snapshot) = session.snapshot() {
                    session.observer_mut().board_changed(&snapshot);
                }
            }
            PlayerCommand::Moves => {
                let listing = if session.history().is_empty() {
                    "No moves yet.".to_string()
                } else {
                    session
                        .history()
                        .iter()
                        .enumerate()
                        .map(|(i, slide)| format!("{:>3}. {}", i + 1, slide))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                session.observer_mut().message(listing)?;
            }
            PlayerCommand::Help => session.observer_mut().message(HELP)?,
            PlayerCommand::Quit => return Ok(LevelEnd::Quit),
        }

        if let Some(summary) = session.summary() {
            return Ok(LevelEnd::Solved(summary));
        }
    }
}

/// Tells the player why a move did not happen.
fn report<W: Write>(
    session: &mut PuzzleSession<TextRenderer<W>>,
    result: Result<MoveOutcome, MoveError>,
) -> io::Result<()> {
    match result {
        Ok(outcome) => match outcome.rejection() {
            Some(reason) => session.observer_mut().message(format!("Blocked: {}", reason)),
            None => Ok(()),
        },
        Err(error) => {
            warn!(%error, "Move request refused");
            session.observer_mut().message(format!("Error: {}", error))
        }
    }
}

/// One scripted move and what became of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ReplayStep {
    /// Move as given.
    command: String,
    /// Session's answer.
    outcome: MoveOutcome,
}

/// Result of replaying a move list against a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct ReplayReport {
    /// Level replayed.
    level: LevelId,
    /// Every move in order.
    steps: Vec<ReplayStep>,
    /// Accepted moves.
    moves: usize,
    /// Whether the hero reached the exit.
    won: bool,
    /// Final board.
    board: BoardSnapshot,
}

/// Parses a scripted move: `A:2:3` for an absolute slide, `A:+1` for a relative one.
pub fn parse_move_token(token: &str) -> Result<PlayerCommand> {
    let command: PlayerCommand = token
        .replace(':', " ")
        .parse()
        .with_context(|| format!("Bad move `{}`", token))?;
    match command {
        PlayerCommand::Move { .. } | PlayerCommand::Shift { .. } => Ok(command),
        other => bail!("Bad move `{}`: {:?} is not a move", token, other),
    }
}

/// Replays `tokens` on a fresh session of `level`.
///
/// Blocked moves are recorded and skipped. Unknown pieces or off-axis
/// targets stop the replay with an error.
#[instrument(skip(level, tokens), fields(level = %level.id(), count = tokens.len()))]
pub fn replay_commands(
    level: LevelDefinition,
    mode: CollisionMode,
    tokens: &[String],
) -> Result<ReplayReport> {
    let mut session = PuzzleSession::new(level).with_collision_mode(mode);
    session.load()?;

    let mut steps = Vec::with_capacity(tokens.len());
    for token in tokens {
        let outcome = match parse_move_token(token)? {
            PlayerCommand::Move { piece, col, row } => session.request_move(piece, col, row),
            PlayerCommand::Shift { piece, delta } => session.request_shift(piece, delta),
            other => bail!("Bad move `{}`: {:?} is not a move", token, other),
        }
        .with_context(|| format!("Move `{}` refused", token))?;
        steps.push(ReplayStep {
            command: token.clone(),
            outcome,
        });
    }

    let board = session
        .snapshot()
        .context("Session lost its board during replay")?;
    Ok(ReplayReport {
        level: session.level().id().clone(),
        steps,
        moves: session.moves(),
        won: session.is_won(),
        board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_token() {
        assert_eq!(
            parse_move_token("X:4:2").unwrap(),
            PlayerCommand::Move {
                piece: "X".into(),
                col: 4,
                row: 2
            }
        );
        assert_eq!(
            parse_move_token("A:-1").unwrap(),
            PlayerCommand::Shift {
                piece: "A".into(),
                delta: -1
            }
        );
        assert!(parse_move_token("reset").is_err());
        assert!(parse_move_token("X:left").is_err());
    }
}
