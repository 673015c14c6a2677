//! Turn-driven game controller.
//!
//! The controller owns one [`Board`] and alternates strictly between the
//! human side (X, moves first) and the automated side (O). Save, load,
//! and standings commands keep the turn with the human; a completed line
//! of five, a draw, or `quit` ends the loop.

use crate::ai::MoveSource;
use crate::board::{Board, BoardError, Mark, Position};
use crate::codec;
use crate::console::{parse_position, Console};
use crate::scores::ScoreRepository;
use derive_more::{Display, Error, From};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// Display name recorded for wins by the automated side.
const AI_NAME: &str = "Computer";

/// Display name used when the human declines to give one.
const DEFAULT_PLAYER_NAME: &str = "Player";

/// Entries shown by the in-game `highscore` command.
const HIGHSCORE_LIMIT: usize = 10;

/// Help line printed before every human prompt.
const COMMANDS_HELP: &str = "Commands: lep <b3> | save <f.txt> | load <f.txt> | \
     savexml <f.xml> | loadxml <f.xml> | highscore | quit | <position, e.g. b3>";

/// Command vocabulary of the human turn. The keyword mapping is the
/// derive-generated [`FromStr`] table; any token that matches none of the
/// keywords is treated as a bare board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
enum Command {
    Lep,
    Save,
    Load,
    SaveXml,
    LoadXml,
    Highscore,
    Quit,
}

/// Outcome of one dispatched human command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnResult {
    /// Command did not consume the turn; prompt again.
    KeepTurn,
    /// A mark was placed and the game continues with the other side.
    Continue,
    /// The game is over (win or quit).
    Stop,
}

/// Errors that abort a running game.
///
/// Everything recoverable (bad coordinates, illegal placements, codec
/// failures) is reported to the player and retried; only a failing
/// console or a board rejection during the forced opening move ends
/// [`Game::run`].
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    /// The console could not be read or ended.
    #[display("console failure: {_0}")]
    Console(std::io::Error),

    /// The board rejected an internally generated placement.
    #[display("{_0}")]
    Board(BoardError),
}

/// The game state machine, generic over its console and move source so
/// tests can drive it with scripted collaborators.
pub struct Game<C: Console, M: MoveSource> {
    console: C,
    mover: M,
    scores: ScoreRepository,
    human_name: String,
    prompt_name: bool,
    board: Option<Board>,
}

impl<C: Console, M: MoveSource> Game<C, M> {
    /// Creates a game. When `name` is `None` the setup phase prompts the
    /// player for one.
    pub fn new(console: C, mover: M, scores: ScoreRepository, name: Option<String>) -> Self {
        let prompt_name = name.is_none();
        Self {
            console,
            mover,
            scores,
            human_name: name.unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
            prompt_name,
            board: None,
        }
    }

    /// The board of the finished (or aborted) game, if setup got that far.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Runs setup and the turn loop to completion.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Console`] when input fails (e.g. EOF);
    /// recoverable game errors never surface here.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<(), GameError> {
        let mut board = self.setup_board()?;
        let result = self.play(&mut board);
        self.board = Some(board);
        result
    }

    /// Interactive setup: greeting, player name, then a fresh or loaded
    /// board, seeded with the forced center opening when empty.
    fn setup_board(&mut self) -> Result<Board, GameError> {
        self.console.println("Gomoku (NxM)");
        self.console.println(
            "Rule: marks may only be placed adjacent (including diagonals) to \
             existing marks. 5 in a row wins.\n",
        );

        if self.prompt_name {
            let name = self.console.ask("Your name (Enter = Player): ")?;
            let name = name.trim();
            if !name.is_empty() {
                self.human_name = name.to_string();
            }
        }

        let answer = self.console.ask("Load board from a text file? (y/n) ")?;
        let mut board = if answer.trim().to_lowercase().starts_with('y') {
            self.load_board_interactive()?
        } else {
            self.create_board_interactive()?
        };

        if board.legal_positions_by_adjacency().is_empty() {
            let center = board.center();
            board.place(Mark::X, center)?;
            info!(%center, "Forced opening move");
            self.console
                .println(&format!("Automatic opening move: X at {center}"));
        }
        Ok(board)
    }

    /// Asks for a file and loads it as Format A; on failure falls back to
    /// interactive creation instead of aborting.
    fn load_board_interactive(&mut self) -> Result<Board, GameError> {
        let file = self.console.ask("File name (e.g. board.txt): ")?;
        match codec::text::load(Path::new(file.trim())) {
            Ok(board) => {
                self.console.println("Board loaded.");
                Ok(board)
            }
            Err(e) => {
                warn!(error = %e, "Setup load failed, falling back to board creation");
                self.console.println(&format!("Load failed: {e}"));
                self.create_board_interactive()
            }
        }
    }

    /// Prompts for dimensions until a valid board can be constructed.
    fn create_board_interactive(&mut self) -> Result<Board, GameError> {
        loop {
            let rows = self.ask_number("Rows N (4 <= M <= N <= 25): ")?;
            let cols = self.ask_number("Cols M (4 <= M <= N <= 25): ")?;
            match Board::new(rows, cols) {
                Ok(board) => return Ok(board),
                Err(e) => self.console.println(&format!("Invalid dimensions: {e}")),
            }
        }
    }

    /// Prompts until the player enters a non-negative integer.
    fn ask_number(&mut self, prompt: &str) -> Result<usize, GameError> {
        let mut input = self.console.ask(prompt)?;
        loop {
            match input.trim().parse() {
                Ok(n) => return Ok(n),
                Err(_) => {
                    self.console.println("Enter a number!");
                    input = self.console.ask("> ")?;
                }
            }
        }
    }

    /// The alternating turn loop; ends on win, draw, or quit.
    fn play(&mut self, board: &mut Board) -> Result<(), GameError> {
        let mut turn = Mark::X;
        loop {
            self.console.println("");
            self.console.println(&board.render());
            self.console.println(COMMANDS_HELP);

            if turn == Mark::X {
                match self.human_turn(board)? {
                    TurnResult::Stop => break,
                    _ => turn = Mark::O,
                }
            } else {
                if !self.ai_turn(board)? {
                    break;
                }
                turn = Mark::X;
            }
        }
        Ok(())
    }

    /// Reads and dispatches human commands until one consumes the turn or
    /// ends the game. Empty lines re-prompt silently.
    #[instrument(skip(self, board))]
    fn human_turn(&mut self, board: &mut Board) -> Result<TurnResult, GameError> {
        loop {
            let line = self
                .console
                .ask(&format!("{} (X) move: ", self.human_name))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            let keyword = parts[0].to_lowercase();

            let result = match Command::from_str(&keyword) {
                Ok(Command::Lep) => self.handle_place(board, &parts)?,
                Ok(Command::Save) => self.handle_save(board, &parts),
                Ok(Command::Load) => self.handle_load(board, &parts),
                Ok(Command::SaveXml) => self.handle_save_xml(board, &parts),
                Ok(Command::LoadXml) => self.handle_load_xml(board, &parts),
                Ok(Command::Highscore) => self.handle_highscore(),
                Ok(Command::Quit) => self.handle_quit(),
                Err(_) => self.try_place(board, parts[0])?,
            };

            if result != TurnResult::KeepTurn {
                return Ok(result);
            }
        }
    }

    /// `lep <coord>` — explicit placement.
    fn handle_place(&mut self, board: &mut Board, parts: &[&str]) -> Result<TurnResult, GameError> {
        if parts.len() < 2 {
            self.console.println("Usage: lep b3");
            return Ok(TurnResult::KeepTurn);
        }
        self.try_place(board, parts[1])
    }

    /// Shared placement path for `lep <coord>` and bare coordinates:
    /// parse, check adjacency legality, place, then check for a win.
    fn try_place(&mut self, board: &mut Board, token: &str) -> Result<TurnResult, GameError> {
        let position = match parse_position(token, *board.rows(), *board.cols()) {
            Ok(position) => position,
            Err(e) => {
                self.console.println(&format!("Error: {e}"));
                return Ok(TurnResult::KeepTurn);
            }
        };
        if !board.legal_positions_by_adjacency().contains(&position) {
            self.console
                .println("Not adjacent to an occupied cell.");
            return Ok(TurnResult::KeepTurn);
        }
        if let Err(e) = board.place(Mark::X, position) {
            self.console.println(&format!("Error: {e}"));
            return Ok(TurnResult::KeepTurn);
        }
        let name = self.human_name.clone();
        Ok(self.after_move(board, Mark::X, position, &name))
    }

    /// `save <path>` — Format A, keep-turn.
    fn handle_save(&mut self, board: &Board, parts: &[&str]) -> TurnResult {
        if parts.len() < 2 {
            self.console.println("Usage: save <board.txt>");
            return TurnResult::KeepTurn;
        }
        match codec::text::save(board, Path::new(parts[1])) {
            Ok(()) => self.console.println("Saved as text."),
            Err(e) => {
                warn!(error = %e, "Text save failed");
                self.console.println(&format!("I/O error: {e}"));
            }
        }
        TurnResult::KeepTurn
    }

    /// `load <path>` — Format A, keep-turn; the live board is replaced
    /// only after a fully successful decode.
    fn handle_load(&mut self, board: &mut Board, parts: &[&str]) -> TurnResult {
        if parts.len() < 2 {
            self.console.println("Usage: load <board.txt>");
            return TurnResult::KeepTurn;
        }
        match codec::text::load(Path::new(parts[1])) {
            Ok(loaded) => {
                *board = loaded;
                self.console.println("Loaded from text.");
            }
            Err(e) => {
                warn!(error = %e, "Text load failed");
                self.console.println(&format!("Load failed: {e}"));
            }
        }
        TurnResult::KeepTurn
    }

    /// `savexml <path>` — Format B, keep-turn.
    fn handle_save_xml(&mut self, board: &Board, parts: &[&str]) -> TurnResult {
        if parts.len() < 2 {
            self.console.println("Usage: savexml <board.xml>");
            return TurnResult::KeepTurn;
        }
        match codec::xml::save(board, Path::new(parts[1])) {
            Ok(()) => self.console.println("Saved as XML."),
            Err(e) => {
                warn!(error = %e, "XML save failed");
                self.console.println(&format!("I/O error: {e}"));
            }
        }
        TurnResult::KeepTurn
    }

    /// `loadxml <path>` — Format B, keep-turn; same replacement contract
    /// as the text load.
    fn handle_load_xml(&mut self, board: &mut Board, parts: &[&str]) -> TurnResult {
        if parts.len() < 2 {
            self.console.println("Usage: loadxml <board.xml>");
            return TurnResult::KeepTurn;
        }
        match codec::xml::load(Path::new(parts[1])) {
            Ok(loaded) => {
                *board = loaded;
                self.console.println("Loaded from XML.");
            }
            Err(e) => {
                warn!(error = %e, "XML load failed");
                self.console.println(&format!("Load failed: {e}"));
            }
        }
        TurnResult::KeepTurn
    }

    /// `highscore` — print the standings, keep-turn.
    fn handle_highscore(&mut self) -> TurnResult {
        let top = self.scores.top_scores(HIGHSCORE_LIMIT);
        if top.is_empty() {
            self.console.println("No high score data.");
            return TurnResult::KeepTurn;
        }
        self.console.println("High score:");
        for (rank, (name, wins)) in top.iter().enumerate() {
            self.console
                .println(&format!("{}. {} - {}", rank + 1, name, wins));
        }
        TurnResult::KeepTurn
    }

    /// `quit` — end the game without a winner.
    fn handle_quit(&mut self) -> TurnResult {
        self.console.println("Quitting...");
        TurnResult::Stop
    }

    /// One automated turn. Returns `false` when the game ended (draw or
    /// automated win).
    #[instrument(skip(self, board))]
    fn ai_turn(&mut self, board: &mut Board) -> Result<bool, GameError> {
        let Some(position) = self.mover.choose_move(board) else {
            info!("No legal move for the automated side");
            self.console.println("The computer cannot move. Draw.");
            return Ok(false);
        };
        board.place(Mark::O, position)?;
        self.console
            .println(&format!("{AI_NAME} (O) plays: {position}"));
        if board.has_winning_line_through(Mark::O, position) {
            self.console.println(&board.render());
            self.console.println(&format!("{AI_NAME} wins!"));
            self.scores.record_win(AI_NAME);
            return Ok(false);
        }
        Ok(true)
    }

    /// Win check shared by both human placement paths.
    fn after_move(
        &mut self,
        board: &Board,
        mark: Mark,
        position: Position,
        name: &str,
    ) -> TurnResult {
        if board.has_winning_line_through(mark, position) {
            info!(%position, name, "Winning line completed");
            self.console.println(&board.render());
            self.console.println(&format!("{name} wins!"));
            self.scores.record_win(name);
            return TurnResult::Stop;
        }
        TurnResult::Continue
    }
}
