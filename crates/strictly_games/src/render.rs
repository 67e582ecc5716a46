//! Text renderer for puzzle sessions.

use std::io::{self, Write};
use strictly_rush_hour::{BoardSnapshot, PuzzleObserver, SolvedSummary};
use tracing::warn;

/// Draws the board as text every time it changes.
///
/// Observer callbacks cannot fail, so write errors are logged and kept;
/// [`TextRenderer::take_error`] hands back the first one.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Writes a line of text below the board.
    pub fn message(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())?;
        self.out.flush()
    }

    /// First write error seen by an observer callback, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(error) = result {
            warn!(%error, "Failed to draw board");
            self.error.get_or_insert(error);
        }
    }
}

impl<W: Write> PuzzleObserver for TextRenderer<W> {
    fn board_changed(&mut self, snapshot: &BoardSnapshot) {
        let result = write!(self.out, "\n{}", snapshot.display()).and_then(|_| self.out.flush());
        self.record(result);
    }

    fn solved(&mut self, summary: &SolvedSummary) {
        let result = self.message(format!("{}!", summary));
        self.record(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_rush_hour::{
        CarDefinition, Exit, LevelDefinition, LevelId, Orientation, PuzzleSession,
    };

    #[test]
    fn test_renders_on_load_and_win() {
        let level = LevelDefinition::new(
            LevelId::Number(7),
            6,
            Exit::Right { row: 0 },
            vec![CarDefinition::new("X", Orientation::Horizontal, 2, 2, 0).hero()],
        );
        let mut session = PuzzleSession::with_observer(level, TextRenderer::new(Vec::new()));
        session.load().unwrap();
        session.request_move("X", 4, 0).unwrap();

        let mut renderer = session.into_observer();
        assert!(renderer.take_error().is_none());
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("\n. . X X . . >\n"));
        assert!(text.ends_with("Level 7 solved in 1 moves!\n"));
    }
}
