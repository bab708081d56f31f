//! Integration tests for the gridfront engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use gridfront::protocol::{parse_move, START_POSITION};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_gridfront");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start gridfront");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn status_line(lines: &[String]) -> &str {
    lines.iter().rev().find(|l| l.starts_with("status ")).map(String::as_str).unwrap()
}

#[test]
fn gtp_handshake() {
    let lines = run_engine(&["gtp", "quit"]);

    assert!(lines.iter().any(|l| l == "id name gridfront"));
    assert!(lines.iter().any(|l| l.starts_with("id author ")));
    assert_eq!(lines.last().map(String::as_str), Some("gtpok"));

    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 4);
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "isready", "quit"]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], "readyok");
}

#[test]
fn setoption_produces_no_output() {
    let lines = run_engine(&[
        "gtp",
        "setoption name FourMoveVariant value true",
        "setoption name TimeControl value 600",
        "isready",
        "quit",
    ]);
    assert_eq!(lines.last().map(String::as_str), Some("readyok"));
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn status_at_start() {
    let lines = run_engine(&["newgame", "status", "quit"]);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("position {}", START_POSITION));
    assert_eq!(lines[1], "status side red turn 0 moves 0 elapsed 0 0 result ongoing");
}

#[test]
fn play_legal_and_illegal_moves() {
    let lines = run_engine(&["newgame", "play b2b4", "play b4b8", "play zz", "status", "quit"]);
    assert_eq!(lines[0], "ok");
    assert!(lines[1].starts_with("error "), "got {}", lines[1]);
    assert!(lines[2].starts_with("error "), "got {}", lines[2]);
    assert_eq!(
        lines[3],
        "position 1avp1hpav1/iti2iti/8/8/1T6/8/I1I2ITI/1A^P1HPA^1 IITPSG iitpsg r b2b4"
    );
    assert_eq!(status_line(&lines), "status side red turn 0 moves 1 elapsed 0 0 result ongoing");
}

#[test]
fn skip_hands_turn_over_and_charges_time() {
    let lines = run_engine(&["newgame", "elapsed 25", "play skip", "status", "quit"]);
    assert_eq!(lines[0], "ok");
    assert_eq!(status_line(&lines), "status side blue turn 1 moves 0 elapsed 25 0 result ongoing");
}

#[test]
fn undo_and_redo() {
    let lines = run_engine(&["newgame", "undo", "play b2b4", "undo", "status", "redo", "redo", "quit"]);
    assert_eq!(lines[0], "error nothing to undo");
    assert_eq!(lines[1], "ok");
    assert_eq!(lines[2], "ok");
    assert_eq!(lines[3], format!("position {}", START_POSITION));
    assert_eq!(lines[5], "ok");
    assert_eq!(lines[6], "error nothing to redo");
}

#[test]
fn legal_lists_moves_ending_in_skip() {
    let lines = run_engine(&["newgame", "legal", "quit"]);
    assert_eq!(lines.len(), 1);
    let moves: Vec<&str> = lines[0].strip_prefix("legal ").unwrap().split(' ').collect();
    assert_eq!(moves.last(), Some(&"skip"));
    assert!(moves.contains(&"b2b4"));
    for mv in moves {
        assert!(parse_move(mv).is_ok(), "unparseable legal move {}", mv);
    }
}

#[test]
fn go_answers_with_a_legal_move() {
    let lines = run_engine(&["newgame", "go", "legal", "quit"]);
    let chosen = lines[0].strip_prefix("bestmove ").unwrap();
    let legal: Vec<&str> = lines[1].strip_prefix("legal ").unwrap().split(' ').collect();
    assert!(legal.contains(&chosen), "{} is not among the legal moves", chosen);
}

#[test]
fn finished_game_reports_result() {
    let lines = run_engine(&["position 8/8/8/8/8/8/8/4H3 - - r -", "status", "legal", "go", "play skip", "quit"]);
    assert_eq!(status_line(&lines), "status side red turn 0 moves 0 elapsed 0 0 result win red hq_capture");
    assert_eq!(lines[2], "legal ");
    assert_eq!(lines[3], "bestmove none");
    assert!(lines[4].starts_with("error "));
}

#[test]
fn bad_position_keeps_current_game() {
    let lines = run_engine(&["newgame", "play b2b4", "position garbage", "status", "quit"]);
    assert_eq!(lines[0], "ok");
    assert_eq!(status_line(&lines), "status side red turn 0 moves 1 elapsed 0 0 result ongoing");
}

#[test]
fn eval_is_symmetric_at_start() {
    let lines = run_engine(&["newgame", "eval", "quit"]);
    assert_eq!(lines, vec!["eval 0".to_string()]);
}
