use crate::board::{Coord, Position};
use crate::error::MoveError;
use crate::search::{Search, SearchConfig};
use anyhow::Result;
use log::{error, info, warn};
use std::io::{self, BufRead, Write};

/// Line-oriented front end in the style of UCI. Holds the live position and
/// answers `go` with the engine's move for the side to move.
pub struct UciHandler {
    position: Position,
    config: SearchConfig,
}

impl UciHandler {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        UciHandler {
            position: Position::new(),
            config,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Read commands from `reader` until `quit` or end of input. A command
    /// that fails is logged and skipped; only I/O errors end the loop.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<()> {
        let mut line = String::new();

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }
            match self.handle_command(command) {
                Ok(response) => {
                    write!(writer, "{}", response)?;
                    writer.flush()?;
                }
                Err(err) => error!("{}: {:#}", command, err),
            }
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        match parts[0] {
            "uci" => Ok(self.handle_uci()),
            "isready" => Ok("readyok\n".to_string()),
            "ucinewgame" => Ok(self.handle_ucinewgame()),
            "position" => self.handle_position(&parts[1..]),
            "setoption" => Ok(self.handle_setoption(&parts[1..])),
            "go" => self.handle_go(&parts[1..]),
            "d" => Ok(format!("{}\nFen: {}\n", self.position, self.position.to_fen())),
            _ => Ok(String::new()),
        }
    }

    fn handle_uci(&self) -> String {
        format!(
            "id name Minimax Chess\nid author Minimax Chess developers\n\
             option name Depth type spin default {} min 1 max 8\n\
             option name Seed type string default <empty>\nuciok\n",
            self.config.depth
        )
    }

    fn handle_ucinewgame(&mut self) -> String {
        self.position = Position::new();
        String::new()
    }

    fn handle_position(&mut self, parts: &[&str]) -> Result<String> {
        let moves_at = parts.iter().position(|&part| part == "moves");
        let (setup, moves) = match moves_at {
            Some(index) => (&parts[..index], &parts[index + 1..]),
            None => (parts, &[][..]),
        };

        match setup.first() {
            Some(&"startpos") => self.position = Position::new(),
            Some(&"fen") => self.position = Position::from_fen(&setup[1..].join(" "))?,
            _ => return Ok(String::new()),
        }

        for move_str in moves {
            if let Err(err) = self.play(move_str) {
                warn!("rejected move {}: {}", move_str, err);
                break;
            }
        }
        Ok(String::new())
    }

    fn play(&mut self, move_str: &str) -> std::result::Result<(), MoveError> {
        let (from, to) = parse_move(move_str)?;
        self.position.apply_move(from, to)
    }

    fn handle_setoption(&mut self, parts: &[&str]) -> String {
        // setoption name <Name> value <Value>
        let name = parts
            .iter()
            .position(|&part| part == "name")
            .and_then(|i| parts.get(i + 1));
        let value = parts
            .iter()
            .position(|&part| part == "value")
            .and_then(|i| parts.get(i + 1));

        match (name.map(|n| n.to_ascii_lowercase()), value) {
            (Some(name), Some(value)) if name == "depth" => match value.parse::<u32>() {
                Ok(depth) if depth > 0 => self.config.depth = depth,
                _ => warn!("ignoring depth '{}'", value),
            },
            (Some(name), Some(value)) if name == "seed" => match value.parse::<u64>() {
                Ok(seed) => self.config.seed = Some(seed),
                Err(_) => warn!("ignoring seed '{}'", value),
            },
            _ => warn!("unsupported option: {}", parts.join(" ")),
        }
        String::new()
    }

    fn handle_go(&mut self, parts: &[&str]) -> Result<String> {
        let mut depth = self.config.depth;
        for i in 0..parts.len() {
            if parts[i] == "depth" {
                if let Some(d) = parts.get(i + 1).and_then(|s| s.parse::<u32>().ok()) {
                    depth = d;
                }
            }
        }

        let mut search = Search::new(self.position.turn(), &self.config);
        let response = match search.select_move(&self.position, depth)? {
            Some((from, to)) => {
                info!(
                    "{} nodes searched, {} cutoffs",
                    search.get_nodes_searched(),
                    search.get_cutoffs()
                );
                format!("bestmove {}\n", format_move(from, to))
            }
            None => "bestmove (none)\n".to_string(),
        };
        Ok(response)
    }
}

impl Default for UciHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinate notation such as `e2e3`.
pub fn parse_move(move_str: &str) -> std::result::Result<(Coord, Coord), MoveError> {
    let from = move_str.get(0..2).unwrap_or(move_str).parse::<Coord>()?;
    let to = move_str.get(2..).unwrap_or("").parse::<Coord>()?;
    Ok((from, to))
}

pub fn format_move(from: Coord, to: Coord) -> String {
    format!("{}{}", from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PieceKind};
    use crate::board::BoardView;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_handshake() {
        let mut uci = UciHandler::new();
        let response = uci.handle_command("uci").unwrap();
        assert!(response.starts_with("id name Minimax Chess"));
        assert!(response.contains("id author Minimax Chess developers\n"));
        assert!(!response.contains("example.com"));
        assert!(response.ends_with("uciok\n"));
        assert_eq!(uci.handle_command("isready").unwrap(), "readyok\n");
        assert_eq!(uci.handle_command("").unwrap(), "");
        assert_eq!(uci.handle_command("bogus").unwrap(), "");
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let mut uci = UciHandler::new();
        uci.handle_command("position startpos moves e2e3 e7e6 g1f3")
            .unwrap();
        let position = uci.position();
        assert_eq!(position.turn(), Color::Black);
        assert_eq!(
            position.piece_at(sq("f3")),
            Some((PieceKind::Knight, Color::White))
        );
        assert!(position.is_empty(sq("e7")));
    }

    #[test]
    fn test_illegal_move_stops_the_list() {
        let mut uci = UciHandler::new();
        uci.handle_command("position startpos moves e2e4 e7e6").unwrap();
        assert_eq!(uci.position(), &Position::new());

        uci.handle_command("position startpos moves e2e3 zz e7e6").unwrap();
        assert_eq!(uci.position().turn(), Color::Black);
        assert!(!uci.position().is_empty(sq("e7")));
    }

    #[test]
    fn test_position_fen() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen 7k/3p4/8/8/8/8/8/3QK3 w - - 0 1 moves d1d7")
            .unwrap();
        assert_eq!(
            uci.position().piece_at(sq("d7")),
            Some((PieceKind::Queen, Color::White))
        );
        assert!(uci.handle_command("position fen 8/8 w").is_err());
    }

    #[test]
    fn test_go_finds_capture() {
        let mut uci = UciHandler::new();
        uci.handle_command("setoption name Seed value 5").unwrap();
        uci.handle_command("position fen 7k/3p4/8/8/8/8/8/3QK3 w").unwrap();
        assert_eq!(uci.handle_command("go depth 1").unwrap(), "bestmove d1d7\n");
    }

    #[test]
    fn test_go_without_moves() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen R6k/6pp/8/8/8/8/8/6K1 b").unwrap();
        assert_eq!(uci.handle_command("go").unwrap(), "bestmove (none)\n");
    }

    #[test]
    fn test_go_without_king_fails() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen 8/8/8/8/8/8/8/4K3 w").unwrap();
        assert!(uci.handle_command("go depth 1").is_err());
    }

    #[test]
    fn test_setoption() {
        let mut uci = UciHandler::new();
        uci.handle_command("setoption name Depth value 2").unwrap();
        uci.handle_command("setoption name Seed value 99").unwrap();
        uci.handle_command("setoption name Depth value zero").unwrap();
        assert_eq!(
            uci.config(),
            &SearchConfig {
                depth: 2,
                seed: Some(99)
            }
        );
    }

    #[test]
    fn test_ucinewgame_resets() {
        let mut uci = UciHandler::new();
        uci.handle_command("position startpos moves e2e3").unwrap();
        uci.handle_command("ucinewgame").unwrap();
        assert_eq!(uci.position(), &Position::new());
    }

    #[test]
    fn test_bad_commands_do_not_stop_the_loop() {
        let mut uci = UciHandler::new();
        let input = "position fen 8/8 w\n\
                     isready\n\
                     position fen 8/8/8/8/8/8/8/4K3 w\n\
                     go depth 1\n\
                     isready\n\
                     quit\n\
                     isready\n";
        let mut output = Vec::new();
        uci.run_with(input.as_bytes(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "readyok\nreadyok\n");
    }

    #[test]
    fn test_move_notation() {
        assert_eq!(parse_move("e2e3").unwrap(), (sq("e2"), sq("e3")));
        assert!(parse_move("e2").is_err());
        assert!(parse_move("e2e9").is_err());
        assert_eq!(format_move(sq("a7"), sq("a8")), "a7a8");
    }

    #[test]
    fn test_display_command() {
        let mut uci = UciHandler::new();
        let response = uci.handle_command("d").unwrap();
        assert!(response.starts_with("r n b q k b n r"));
        assert!(response.contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"));
    }
}
