//! Integration tests for the workbook export: saving and the fallback retry.

use capoeira_jogos::export::{
    default_fallback, export_with_fallback, write_pairing_sheets, write_results, FALLBACK_FILE,
};
use capoeira_jogos::{
    close_round, start_category, Category, CategoryConfig, CategoryId, JogosError, Player,
};
use std::path::{Path, PathBuf};

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jogos-export-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir(&dir).unwrap();
    dir
}

fn open_category(name: &str) -> Category {
    let players: Vec<Player> = (0..4).map(|i| Player::new(format!("P{i}"))).collect();
    let mut category = Category::new(CategoryId::new(name), players, CategoryConfig::default());
    start_category(&mut category).unwrap();
    category
}

fn finished_category(name: &str) -> Category {
    let mut category = open_category(name);
    close_round(&mut category, 4).unwrap(); // everyone advances: a final
    category
}

#[test]
fn writes_the_results_workbook() {
    let dir = temp_dir();
    let path = dir.join("results.xlsx");
    let categories = [finished_category("Adult A"), open_category("Youth B")];

    write_results(&path, &categories).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn sheet_names_survive_awkward_category_ids() {
    let dir = temp_dir();
    let path = dir.join("results.xlsx");
    let categories = [
        finished_category("Adult/Male: A"),
        finished_category("Brazilian Capoeira Adult Male Advanced"),
    ];

    write_results(&path, &categories).unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn writes_pairing_sheets_for_open_rounds() {
    let dir = temp_dir();
    let path = dir.join("pairings.xlsx");

    write_pairing_sheets(&path, &[open_category("Adult A")]).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    // A workbook is still produced when nothing is open.
    let idle = dir.join("idle.xlsx");
    write_pairing_sheets(&idle, &[finished_category("Adult A")]).unwrap();
    assert!(std::fs::metadata(&idle).is_ok());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn fallback_is_used_when_the_primary_cannot_be_written() {
    let dir = temp_dir();
    let primary = dir.join("missing").join("results.xlsx");
    let fallback = dir.join(FALLBACK_FILE);
    let categories = [finished_category("Adult A")];

    let saved = export_with_fallback(&primary, &fallback, &categories).unwrap();
    assert_eq!(saved, fallback);
    assert!(std::fs::metadata(&fallback).unwrap().len() > 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failing_both_targets_reports_the_export_error() {
    let dir = temp_dir();
    let primary = dir.join("missing").join("results.xlsx");
    let fallback = dir.join("also-missing").join("fallback.xlsx");

    assert!(matches!(
        export_with_fallback(&primary, &fallback, &[finished_category("Adult A")]),
        Err(JogosError::ExportFailed(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn the_default_fallback_sits_next_to_the_primary() {
    assert_eq!(
        default_fallback(Path::new("exports/results.xlsx")),
        Path::new("exports").join(FALLBACK_FILE)
    );
}
