use rookery::board::{Color, PieceKind, PieceState};
use rookery::game::Game;
use rookery::relay::Relay;
use rookery::save::GameSnapshot;
use rookery::square::Square;
use std::io::{self, Write};
use std::str::FromStr;

/// Rendering options, passed explicitly rather than kept in process-wide
/// state.
struct RenderConfig {
    unicode: bool,
    color: bool,
}

struct Session {
    relay: Option<Relay>,
    local_color: Color,
}

enum Action {
    Continue,
    Quit,
}

fn main() {
    rookery::logger::init("logs/rookery.log", "rookery=debug");

    let mut cfg = RenderConfig {
        unicode: true,
        color: true,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--ascii" => cfg.unicode = false,
            "--no-color" => cfg.color = false,
            other => eprintln!("ignoring unknown option `{other}`"),
        }
    }

    let mut game = Game::new();
    let mut session = Session {
        relay: None,
        local_color: Color::White,
    };

    print_welcome();

    loop {
        render(&game, &cfg);
        println!("{}", game.status_string());
        if let Some(mv) = game.last_move() {
            println!("Last move: {mv}");
        }
        println!();

        if game.is_game_over() {
            println!("Game over. Commands still available: undo, new, quit.");
        }

        // In networked play, the opponent's turns arrive over the wire and
        // run through the same command handler as typed input.
        if session.relay.is_some()
            && game.current_player() != session.local_color
            && !game.is_game_over()
        {
            println!("Waiting for opponent ({})...", game.current_player());
            let received = session
                .relay
                .as_mut()
                .and_then(|relay| relay.recv_line().ok().flatten());
            match received {
                Some(line) => {
                    if let Action::Quit = handle_command(&line, &mut game, &mut session, false) {
                        println!("Opponent left the game.");
                        session.relay = None;
                    }
                }
                None => {
                    println!("Connection lost; back to local play.");
                    session.relay = None;
                }
            }
            continue;
        }

        print!("{}> ", game.current_player());
        io::stdout().flush().ok();

        let Some(line) = read_line() else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        if let Action::Quit = handle_command(&line, &mut game, &mut session, true) {
            if let Some(relay) = session.relay.as_mut() {
                let _ = relay.send_line("quit");
            }
            break;
        }
    }

    println!("Thanks for playing!");
}

/// Apply one command line. `interactive` is true for locally typed input:
/// it enables prompts (promotion choice) and relays the command to a
/// connected opponent; remote lines replay with neither.
fn handle_command(line: &str, game: &mut Game, session: &mut Session, interactive: bool) -> Action {
    // Keep arguments (paths, hosts) in their original case; only the
    // command word itself is case-insensitive.
    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = parts.first().map(|s| s.to_ascii_lowercase()).unwrap_or_default();

    match command.as_str() {
        "quit" | "exit" | "q" => return Action::Quit,
        "help" | "h" | "?" => print_help(),
        "new" => {
            game.start_new_game();
            relay_if(session, interactive, line);
            println!("New game started.");
        }
        "undo" | "u" => {
            game.undo_last_move();
            relay_if(session, interactive, line);
        }
        "draw" | "d" => {
            game.offer_draw();
            relay_if(session, interactive, line);
            println!("{} offers a draw. Type `accept` to accept.", game.current_player());
        }
        "accept" => {
            if game.accept_draw() {
                relay_if(session, interactive, line);
                println!("Draw agreed.");
            } else {
                println!("No draw offer on the table.");
            }
        }
        "resign" | "r" => {
            let resigner = game.current_player();
            game.resign(resigner);
            relay_if(session, interactive, line);
            println!("{resigner} resigns.");
        }
        "history" => print_history(game),
        "moves" => {
            let Some(from) = parts
                .get(1)
                .and_then(|s| Square::from_str(&s.to_ascii_lowercase()).ok())
            else {
                println!("Usage: moves <square>, e.g. `moves e2`");
                return Action::Continue;
            };
            let destinations = game.valid_moves(from);
            if destinations.is_empty() {
                println!("No valid moves from {from}.");
            } else {
                let rendered: Vec<String> = destinations.iter().map(|s| s.to_string()).collect();
                println!("Valid moves from {from}: {}", rendered.join(", "));
            }
        }
        "save" if interactive => {
            let Some(path) = parts.get(1) else {
                println!("Usage: save <path>");
                return Action::Continue;
            };
            match save_game(game, path) {
                Ok(()) => println!("Game saved to {path}."),
                Err(err) => println!("Could not save: {err}"),
            }
        }
        "load" if interactive => {
            let Some(path) = parts.get(1) else {
                println!("Usage: load <path>");
                return Action::Continue;
            };
            match load_game(path) {
                Ok(loaded) => {
                    *game = loaded;
                    println!("Game loaded from {path}.");
                }
                Err(err) => println!("Could not load: {err}"),
            }
        }
        "host" if interactive => {
            let Some(port) = parts.get(1).and_then(|s| s.parse::<u16>().ok()) else {
                println!("Usage: host <port>");
                return Action::Continue;
            };
            println!("Hosting on port {port}; waiting for an opponent...");
            match Relay::host(port) {
                Ok(relay) => {
                    session.relay = Some(relay);
                    session.local_color = Color::White;
                    game.start_new_game();
                    println!("Opponent connected. You play White.");
                }
                Err(err) => println!("Could not host: {err}"),
            }
        }
        "join" if interactive => {
            let (Some(host), Some(port)) = (
                parts.get(1),
                parts.get(2).and_then(|s| s.parse::<u16>().ok()),
            ) else {
                println!("Usage: join <host> <port>");
                return Action::Continue;
            };
            match Relay::join(host, port) {
                Ok(relay) => {
                    session.relay = Some(relay);
                    session.local_color = Color::Black;
                    game.start_new_game();
                    println!("Connected. You play Black.");
                }
                Err(err) => println!("Could not connect: {err}"),
            }
        }
        _ => return handle_move(line, game, session, interactive),
    }

    Action::Continue
}

fn handle_move(line: &str, game: &mut Game, session: &mut Session, interactive: bool) -> Action {
    let Some((from, to, explicit_promotion)) = parse_move(line) else {
        println!("Unrecognized command `{line}`. Type `help` for the command list.");
        return Action::Continue;
    };

    if !game.is_valid_move(from, to) {
        println!("Illegal move: {from}{to}");
        return Action::Continue;
    }

    let is_promotion = game
        .board()
        .piece_at(from)
        .is_some_and(|p| p.kind == PieceKind::Pawn && to.row() == p.color.promotion_rank());

    let promotion = match explicit_promotion {
        Some(kind) => kind,
        None if is_promotion && interactive => prompt_promotion(),
        None => PieceKind::Queen,
    };

    if !game.make_move_promoting(from, to, promotion) {
        println!("Illegal move: {from}{to}");
        return Action::Continue;
    }

    if interactive && session.relay.is_some() {
        // Forward the move as typed; a locally prompted promotion piece is
        // appended so both boards stay identical.
        let mut text = line.to_string();
        if is_promotion && explicit_promotion.is_none() && promotion != PieceKind::Queen {
            text.push(promotion.letter().to_ascii_lowercase());
        }
        relay_if(session, true, &text);
    }

    Action::Continue
}

/// Forward a command line to the opponent, dropping the session if the
/// connection has gone away.
fn relay_if(session: &mut Session, interactive: bool, line: &str) {
    if !interactive {
        return;
    }
    let failed = session
        .relay
        .as_mut()
        .is_some_and(|relay| relay.send_line(line).is_err());
    if failed {
        println!("Connection lost; back to local play.");
        session.relay = None;
    }
}

/// Accept `e2e4`, `e2-e4`, and an optional trailing promotion letter
/// (`e7e8q`).
fn parse_move(input: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let compact: String = input
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|&c| c != '-')
        .collect();
    if compact.len() != 4 && compact.len() != 5 {
        return None;
    }
    let from = Square::from_str(&compact[0..2]).ok()?;
    let to = Square::from_str(&compact[2..4]).ok()?;
    let promotion = if compact.len() == 5 {
        Some(parse_promotion(&compact[4..5])?)
    } else {
        None
    };
    Some((from, to, promotion))
}

fn parse_promotion(s: &str) -> Option<PieceKind> {
    match s {
        "q" | "queen" => Some(PieceKind::Queen),
        "r" | "rook" => Some(PieceKind::Rook),
        "b" | "bishop" => Some(PieceKind::Bishop),
        "n" | "knight" => Some(PieceKind::Knight),
        _ => None,
    }
}

/// One trimmed line from stdin; `None` on end of input.
fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_promotion() -> PieceKind {
    print!("Promote to [q/r/b/n] (queen): ");
    io::stdout().flush().ok();
    let Some(answer) = read_line() else {
        return PieceKind::Queen;
    };
    parse_promotion(answer.to_ascii_lowercase().as_str()).unwrap_or(PieceKind::Queen)
}

fn save_game(game: &Game, path: &str) -> Result<(), String> {
    let bytes = game.snapshot().to_bytes().map_err(|e| e.to_string())?;
    std::fs::write(path, bytes).map_err(|e| e.to_string())
}

fn load_game(path: &str) -> Result<Game, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let snapshot = GameSnapshot::from_bytes(&bytes).map_err(|e| e.to_string())?;
    Ok(Game::restore(snapshot))
}

fn render(game: &Game, cfg: &RenderConfig) {
    let board = game.board();
    println!();
    println!("     a b c d e f g h");
    for row in 0..8u8 {
        print!("  {}  ", 8 - row);
        for col in 0..8u8 {
            let sq = Square::from_index(row << 3 | col);
            if cfg.color {
                let light = (row + col) % 2 == 0;
                print!(
                    "{}",
                    if light {
                        "\x1b[47m\x1b[30m"
                    } else {
                        "\x1b[100m\x1b[97m"
                    }
                );
            }
            match board.piece_at(sq) {
                Some(piece) => print!("{} ", glyph(piece, cfg.unicode)),
                None if cfg.color => print!("  "),
                None => print!(". "),
            }
        }
        if cfg.color {
            print!("\x1b[0m");
        }
        println!(" {}", 8 - row);
    }
    println!("     a b c d e f g h");
    println!();
}

fn glyph(piece: PieceState, unicode: bool) -> char {
    if !unicode {
        return piece.symbol();
    }
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

fn print_history(game: &Game) {
    let history = game.move_history();
    if history.is_empty() {
        println!("No moves played yet.");
        return;
    }
    println!("Move history:");
    for (i, pair) in history.chunks(2).enumerate() {
        let white = pair[0].to_string();
        let black = pair.get(1).map(|m| m.to_string()).unwrap_or_default();
        println!("{:>3}. {:<10} {}", i + 1, white, black);
    }
}

fn print_welcome() {
    println!("===============================================");
    println!("                  rookery");
    println!("===============================================");
    println!("Console chess. Type `help` for commands.");
}

fn print_help() {
    println!();
    println!("Moves are typed as from-square + to-square: e2e4 or e2-e4.");
    println!("A pawn reaching the last rank promotes; append a letter to");
    println!("pick the piece (e7e8n) or answer the prompt.");
    println!();
    println!("Commands:");
    println!("  moves <sq>        list valid destinations for a square");
    println!("  history           show the move list");
    println!("  undo / u          take back the last move");
    println!("  draw / d          offer a draw");
    println!("  accept            accept a draw offer");
    println!("  resign / r        resign the game");
    println!("  new               start a new game");
    println!("  save <path>       save the game");
    println!("  load <path>       load a saved game");
    println!("  host <port>       host a network game (you play White)");
    println!("  join <host> <port>  join a network game (you play Black)");
    println!("  help / h          this message");
    println!("  quit / q          leave");
    println!();
}
