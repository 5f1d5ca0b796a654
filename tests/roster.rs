//! Integration tests for roster input: CSV parsing and directory loading.

use capoeira_jogos::roster::{load_dir, load_file, parse_players};
use capoeira_jogos::{Apelido, CategoryConfig, CategoryPhase, JogosError};
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jogos-roster-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir(&dir).unwrap();
    dir
}

#[test]
fn parses_every_roster_column() {
    let csv = "Apelido,Vorname,Name,Kordel,Land,Stadt\n\
               Macaco,Max,Muster,Verde,Brasil,Salvador\n";
    let players = parse_players(csv.as_bytes()).unwrap();
    assert_eq!(players.len(), 1);

    let player = &players[0];
    assert_eq!(player.apelido, Apelido::new("Macaco"));
    assert_eq!(player.first_name, "Max");
    assert_eq!(player.last_name, "Muster");
    assert_eq!(player.corda, "Verde");
    assert_eq!(player.country, "Brasil");
    assert_eq!(player.city, "Salvador");
}

#[test]
fn blank_apelido_falls_back_to_the_name() {
    let csv = "Apelido,Vorname,Name\n\
               ,Ana,Alves\n\
               ,,Costa\n";
    let players = parse_players(csv.as_bytes()).unwrap();
    assert_eq!(players[0].apelido, Apelido::new("Ana")); // Vorname first
    assert_eq!(players[1].apelido, Apelido::new("Costa"));
}

#[test]
fn headers_match_case_insensitively() {
    let csv = "apelido,VORNAME\n\
               Macaco,Max\n";
    let players = parse_players(csv.as_bytes()).unwrap();
    assert_eq!(players[0].first_name, "Max");
}

#[test]
fn a_roster_without_apelido_column_is_refused() {
    let csv = "Vorname,Name\n\
               Max,Muster\n";
    assert_eq!(
        parse_players(csv.as_bytes()).unwrap_err(),
        JogosError::MissingColumn("Apelido".to_string())
    );
}

#[test]
fn a_nameless_row_is_reported_with_its_line_number() {
    let csv = "Apelido,Vorname,Name\n\
               Macaco,Max,Muster\n\
               ,,\n";
    assert_eq!(
        parse_players(csv.as_bytes()).unwrap_err(),
        JogosError::MissingApelido { row: 3 }
    );
}

#[test]
fn duplicate_apelidos_are_refused_case_insensitively() {
    let csv = "Apelido\n\
               Macaco\n\
               macaco\n";
    assert_eq!(
        parse_players(csv.as_bytes()).unwrap_err(),
        JogosError::DuplicateApelido(Apelido::new("macaco"))
    );
}

#[test]
fn a_roster_without_rows_is_refused() {
    assert!(matches!(
        parse_players("Apelido\n\n".as_bytes()),
        Err(JogosError::EmptyRoster)
    ));
}

#[test]
fn load_file_names_the_category_after_the_file() {
    let dir = temp_dir();
    let path = dir.join("Youth B.csv");
    std::fs::write(&path, "Apelido\nMacaco\nAna\nCosta\nPele\n").unwrap();

    let category = load_file(&path, CategoryConfig::default()).unwrap();
    assert_eq!(category.id.as_str(), "Youth B");
    assert_eq!(category.roster.len(), 4);
    // The first round is drawn as part of the load.
    assert_eq!(category.phase, CategoryPhase::RoundOpen);
    assert_eq!(category.rounds.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_dir_reads_every_roster_in_name_order() {
    let dir = temp_dir();
    std::fs::write(dir.join("B Youth.csv"), "Apelido\nAna\nCosta\n").unwrap();
    std::fs::write(dir.join("A Adult.csv"), "Apelido\nMacaco\nPele\n").unwrap();
    std::fs::write(dir.join("C Kids.CSV"), "Apelido\nSereia\n").unwrap();
    std::fs::write(dir.join("notes.txt"), "not a roster").unwrap();

    let categories = load_dir(&dir, &CategoryConfig::default()).unwrap();
    let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["A Adult", "B Youth", "C Kids"]);
    assert!(categories
        .iter()
        .all(|c| c.phase == CategoryPhase::RoundOpen));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn one_bad_roster_fails_the_whole_load() {
    let dir = temp_dir();
    std::fs::write(dir.join("good.csv"), "Apelido\nMacaco\n").unwrap();
    std::fs::write(dir.join("bad.csv"), "Apelido\nAna\nana\n").unwrap();

    assert!(matches!(
        load_dir(&dir, &CategoryConfig::default()),
        Err(JogosError::DuplicateApelido(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn a_directory_without_rosters_is_refused() {
    let dir = temp_dir();
    assert!(matches!(
        load_dir(&dir, &CategoryConfig::default()),
        Err(JogosError::RosterParse(_))
    ));
    let _ = std::fs::remove_dir_all(&dir);

    assert!(matches!(
        load_dir(&dir.join("missing"), &CategoryConfig::default()),
        Err(JogosError::RosterParse(_))
    ));
}
