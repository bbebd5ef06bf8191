//! Presentation boundary.
//!
//! A `Session` owns an engine and a presenter. Every mutating call goes
//! through the session, which renders a fresh snapshot afterwards, so the
//! presenter never reads engine state on its own.

use std::io::{self, Write};

use crate::board::{Square, BOARD_SIZE};
use crate::engine::{ActionError, Engine, Outcome};
use crate::protocol::notation::NotationError;
use crate::protocol::snapshot::Snapshot;

/// Errors surfaced by a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("failed to render: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Draws snapshots somewhere.
pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), SessionError>;

    /// Emits a single labelled line, such as an error or an encoded position.
    fn report(&mut self, label: &str, text: &str) -> Result<(), SessionError>;
}

/// Renders an ASCII board followed by turn and status lines.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        TextPresenter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), SessionError> {
        self.out.write_all(render_text(snapshot).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, label: &str, text: &str) -> Result<(), SessionError> {
        writeln!(self.out, "{label}: {text}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Renders each snapshot as one JSON line.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        JsonPresenter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), SessionError> {
        writeln!(self.out, "{}", snapshot.to_json()?)?;
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, label: &str, text: &str) -> Result<(), SessionError> {
        let mut line = serde_json::Map::new();
        line.insert(label.to_string(), serde_json::Value::from(text));
        writeln!(self.out, "{}", serde_json::Value::Object(line))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Formats a snapshot for a terminal.
///
/// Every cell is three characters: a prefix, the piece letter or `.`, and a
/// suffix. The prefix is `[` for the selected piece and `*` for an offered
/// square; the suffix is `+` for a shield and `!` for immunity.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut s = String::with_capacity(512);
    s.push_str("    ");
    for c in 0..BOARD_SIZE {
        s.push_str(&format!("{c}  "));
    }
    s.push('\n');

    for (r, row) in snapshot.board.iter().enumerate() {
        s.push_str(&format!("{r:>2} "));
        for (c, cell) in row.iter().enumerate() {
            let square = Square::new(r, c);
            let selected = square.is_some() && square == snapshot.selected;
            let offered = square.is_some_and(|sq| snapshot.is_highlighted(sq));
            s.push(if selected {
                '['
            } else if offered {
                '*'
            } else {
                ' '
            });
            match cell {
                Some(p) => {
                    s.push(p.notation_char());
                    s.push(if p.is_immune {
                        '!'
                    } else if p.has_shield {
                        '+'
                    } else {
                        ' '
                    });
                }
                None => s.push_str(". "),
            }
        }
        s.push('\n');
    }

    let turn = &snapshot.turn;
    let slot = |used: bool| if used { "Used" } else { "Available" };
    s.push_str(&format!(
        "{} | Standard Move: {} | Special Move: {}\n",
        turn.current_player.name(),
        slot(turn.standard_move_made),
        slot(turn.special_move_made)
    ));
    if let Some(outcome) = snapshot.outcome {
        let result = match outcome {
            Outcome::Victory { winner } => format!("{} wins", winner.name()),
            Outcome::Stalled => "stalled".to_string(),
        };
        s.push_str(&format!("Game over: {result}\n"));
    }
    s.push_str(&snapshot.status);
    s.push('\n');
    s
}

/// One game wired to one presenter.
pub struct Session<P: Presenter> {
    engine: Engine,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    pub fn new(engine: Engine, presenter: P) -> Self {
        Session { engine, presenter }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Renders the current state without changing it.
    pub fn show(&mut self) -> Result<(), SessionError> {
        self.presenter.render(&self.engine.snapshot())
    }

    /// Forwards a click to the engine and renders the result.
    ///
    /// The snapshot is rendered even when the engine rejects the click, since
    /// a rejection may still have reset the selection.
    pub fn on_square_activated(&mut self, row: isize, col: isize) -> Result<(), SessionError> {
        let result = self.engine.handle_click(row, col);
        self.show()?;
        Ok(result?)
    }

    pub fn finish_turn(&mut self) -> Result<(), SessionError> {
        let result = self.engine.finish_turn();
        self.show()?;
        Ok(result?)
    }

    pub fn new_game(&mut self) -> Result<(), SessionError> {
        self.engine.new_game();
        self.show()
    }

    pub fn set_position(&mut self, notation: &str) -> Result<(), SessionError> {
        self.engine.set_position(notation)?;
        self.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Snapshot>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, snapshot: &Snapshot) -> Result<(), SessionError> {
            self.frames.push(snapshot.clone());
            Ok(())
        }

        fn report(&mut self, _label: &str, _text: &str) -> Result<(), SessionError> {
            Ok(())
        }
    }

    #[test]
    fn every_click_renders_once() {
        let mut session = Session::new(Engine::default(), Recorder::default());
        session.on_square_activated(8, 4).unwrap();
        session.on_square_activated(7, 4).unwrap();
        assert!(session.on_square_activated(-3, 0).is_err());
        assert_eq!(session.presenter().frames.len(), 3);
    }

    #[test]
    fn rejected_position_does_not_render() {
        let mut session = Session::new(Engine::default(), Recorder::default());
        assert!(matches!(
            session.set_position("nonsense"),
            Err(SessionError::Notation(_))
        ));
        assert!(session.presenter().frames.is_empty());
    }

    #[test]
    fn text_marks_selection_and_targets() {
        let mut engine = Engine::default();
        engine.handle_click(8, 4).unwrap();
        let text = render_text(&engine.snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + BOARD_SIZE + 2);
        assert!(lines[9].contains("[P+"));
        assert!(lines[8].contains('*'));
        assert!(lines[11].starts_with("White | Standard Move: Available"));
        assert_eq!(lines[12], "Select a destination, target, or special action.");
    }

    #[test]
    fn shielded_attack_target_is_marked() {
        let mut engine =
            Engine::from_notation("10/5p4/10/10/10/10/10/10/10/5R4 w -", Default::default())
                .unwrap();
        engine.handle_click(9, 5).unwrap();
        assert_eq!(engine.valid_attacks(), &[Square::new(1, 5).unwrap()]);
        let text = render_text(&engine.snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].contains("*p+"), "{}", lines[2]);
        assert!(lines[3].contains("*."));
    }

    #[test]
    fn json_presenter_writes_one_line_per_frame() {
        let mut session = Session::new(Engine::default(), JsonPresenter::new(Vec::new()));
        session.show().unwrap();
        session.on_square_activated(8, 4).unwrap();
        let out = String::from_utf8(session.into_presenter().into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
        for line in out.lines() {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn reports_are_labelled() {
        let mut text = TextPresenter::new(Vec::new());
        text.report("error", "bad click").unwrap();
        assert_eq!(String::from_utf8(text.into_inner()).unwrap(), "error: bad click\n");

        let mut json = JsonPresenter::new(Vec::new());
        json.report("position", "10/10 w -").unwrap();
        assert_eq!(
            String::from_utf8(json.into_inner()).unwrap(),
            "{\"position\":\"10/10 w -\"}\n"
        );
    }
}
