//! Tests for loading session configuration from TOML files.

mod common;

use common::ScriptedEngine;
use jungle_table::{
    BoardView, CallbackRegistry, Difficulty, GameMode, GameTable, Player, SessionConfig,
    TurnState,
};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, filename: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(filename);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_ai_game_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "table.toml",
        "mode = \"human_vs_ai\"\ndifficulty = 4\nhuman_side = \"red\"\n",
    );

    let config = SessionConfig::from_file(&path).unwrap();
    assert_eq!(*config.mode(), GameMode::HumanVsAi);
    assert_eq!(*config.difficulty(), Difficulty::new(4));
    assert_eq!(config.ai_side(), Some(Player::Blue));
}

#[test]
fn test_empty_file_is_local_game() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "empty.toml", "");

    let config = SessionConfig::from_file(&path).unwrap();
    assert_eq!(config, SessionConfig::local());
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = SessionConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_mode_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bad.toml", "mode = \"spectator\"\n");

    let err = SessionConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_loaded_config_drives_table() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "red.toml",
        "mode = \"human_vs_ai\"\ndifficulty = 2\nhuman_side = \"red\"\n",
    );
    let config = SessionConfig::from_file(&path).unwrap();

    let mut table = GameTable::with_engine(
        ScriptedEngine::new(),
        CallbackRegistry::new(BoardView::new()),
        BoardView::new(),
    );
    table.new_game(config).unwrap();

    assert_eq!(table.engine().log()[1], "ai blue 2");
    assert_eq!(table.state(), TurnState::AwaitingHumanSelection(Player::Red));
}
