//! Roster input: one CSV file per category.

use crate::logic::start_category;
use crate::models::{Apelido, Category, CategoryConfig, CategoryId, JogosError, Player};
use std::path::{Path, PathBuf};

/// Required column: every player needs an apelido (possibly filled from a name).
pub const APELIDO_COLUMN: &str = "Apelido";

/// Parse roster rows from CSV input.
///
/// Headers and cells are whitespace-trimmed. `Apelido` is required; a blank
/// apelido is filled from `Vorname`, then `Name`. The optional columns
/// `Kordel`, `Land` and `Stadt` are carried as display metadata. Duplicate
/// apelidos (case-insensitive) refuse the whole roster.
pub fn parse_players<R: std::io::Read>(input: R) -> Result<Vec<Player>, JogosError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| JogosError::RosterParse(e.to_string()))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let apelido_col = column(APELIDO_COLUMN)
        .ok_or_else(|| JogosError::MissingColumn(APELIDO_COLUMN.to_string()))?;
    let vorname_col = column("Vorname");
    let name_col = column("Name");
    let kordel_col = column("Kordel");
    let land_col = column("Land");
    let stadt_col = column("Stadt");

    let mut players: Vec<Player> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| JogosError::RosterParse(e.to_string()))?;
        // 1-based row number counting the header line.
        let row = i + 2;
        let cell = |column: Option<usize>| -> String {
            column
                .and_then(|c| record.get(c))
                .unwrap_or("")
                .to_string()
        };

        let first_name = cell(vorname_col);
        let last_name = cell(name_col);
        let mut apelido = record.get(apelido_col).unwrap_or("").to_string();
        if apelido.is_empty() {
            apelido = if !first_name.is_empty() {
                first_name.clone()
            } else {
                last_name.clone()
            };
        }
        if apelido.is_empty() {
            return Err(JogosError::MissingApelido { row });
        }

        let apelido = Apelido::new(apelido);
        let duplicate = players
            .iter()
            .any(|p| p.apelido.as_str().eq_ignore_ascii_case(apelido.as_str()));
        if duplicate {
            return Err(JogosError::DuplicateApelido(apelido));
        }

        players.push(Player {
            apelido,
            first_name,
            last_name,
            corda: cell(kordel_col),
            country: cell(land_col),
            city: cell(stadt_col),
        });
    }

    if players.is_empty() {
        return Err(JogosError::EmptyRoster);
    }
    Ok(players)
}

/// Load one category from a roster file; the file stem names the category.
/// The returned category already has its first round open.
pub fn load_file(path: &Path, config: CategoryConfig) -> Result<Category, JogosError> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            JogosError::RosterParse(format!("{}: not a usable file name", path.display()))
        })?;
    let file = std::fs::File::open(path)
        .map_err(|e| JogosError::RosterParse(format!("{}: {}", path.display(), e)))?;
    let players = parse_players(file)?;

    let mut category = Category::new(CategoryId::new(name), players, config);
    start_category(&mut category)?;
    Ok(category)
}

/// Load every `*.csv` in a directory, sorted by file name, into ready
/// categories.
///
/// Everything is validated before anything is returned: one bad file fails
/// the whole load, so an existing session is never half-replaced.
pub fn load_dir(dir: &Path, config: &CategoryConfig) -> Result<Vec<Category>, JogosError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| JogosError::RosterParse(format!("{}: {}", dir.display(), e)))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(JogosError::RosterParse(format!(
            "{}: no roster files (*.csv)",
            dir.display()
        )));
    }

    let mut categories = Vec::with_capacity(paths.len());
    for path in &paths {
        categories.push(load_file(path, config.clone())?);
    }
    Ok(categories)
}
