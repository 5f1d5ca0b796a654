//! Workbook export: raw results plus winners, and pairing sheets for print.

use crate::models::{Category, JogosError, REFEREE_COUNT};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};

/// File name used when the primary export target cannot be written, which in
/// practice means the operator still has it open in Excel.
pub const FALLBACK_FILE: &str = "IF_THIS_APPEARS_CLOSE_EXCEL.xlsx";

/// Default fallback target: `FALLBACK_FILE` next to the primary file.
pub fn default_fallback(primary: &Path) -> PathBuf {
    primary.with_file_name(FALLBACK_FILE)
}

/// Excel limits sheet names to 31 chars and a handful of characters.
fn sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            c => c,
        })
        .take(31)
        .collect()
}

/// Write the full results workbook: one sheet of raw score rows per category,
/// plus a winners summary over the running totals.
pub fn write_results(path: &Path, categories: &[Category]) -> Result<(), JogosError> {
    let mut workbook =
        build_results(categories).map_err(|e| JogosError::ExportFailed(e.to_string()))?;
    workbook
        .save(path)
        .map_err(|e| JogosError::ExportFailed(format!("{}: {}", path.display(), e)))
}

/// Write print sheets for the current open round of every category: the
/// pairings in play order with the score columns left blank for the referees.
pub fn write_pairing_sheets(path: &Path, categories: &[Category]) -> Result<(), JogosError> {
    let mut workbook =
        build_pairing_sheets(categories).map_err(|e| JogosError::ExportFailed(e.to_string()))?;
    workbook
        .save(path)
        .map_err(|e| JogosError::ExportFailed(format!("{}: {}", path.display(), e)))
}

/// Save the results workbook, retrying once at `fallback` when the primary
/// path cannot be written. Returns the path actually saved to.
pub fn export_with_fallback(
    primary: &Path,
    fallback: &Path,
    categories: &[Category],
) -> Result<PathBuf, JogosError> {
    let mut workbook =
        build_results(categories).map_err(|e| JogosError::ExportFailed(e.to_string()))?;
    match workbook.save(primary) {
        Ok(()) => Ok(primary.to_path_buf()),
        Err(first) => match workbook.save(fallback) {
            Ok(()) => Ok(fallback.to_path_buf()),
            Err(second) => Err(JogosError::ExportFailed(format!(
                "{}: {}; fallback {}: {}",
                primary.display(),
                first,
                fallback.display(),
                second
            ))),
        },
    }
}

fn build_results(categories: &[Category]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    for category in categories {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(category.id.as_str()))?;
        write_category_rows(sheet, category)?;
    }
    let summary = workbook.add_worksheet();
    summary.set_name("Winners")?;
    write_winners(summary, categories)?;
    Ok(workbook)
}

fn build_pairing_sheets(categories: &[Category]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let mut wrote_any = false;

    for category in categories {
        let round = match category.current_round() {
            Some(round) => round,
            None => continue,
        };
        wrote_any = true;

        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&format!(
            "{}_round_{}",
            category.id, round.number
        )))?;

        write_score_headers(sheet, &["Chave", "Game", "Name A", "Name B"])?;
        for (i, pairing) in round.pairings.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, pairing.chave.0 as f64)?;
            sheet.write_string(row, 1, pairing.game_type.to_string())?;
            sheet.write_string(row, 2, pairing.side_a.to_string())?;
            sheet.write_string(row, 3, pairing.side_b.to_string())?;
        }
    }

    if !wrote_any {
        // A workbook needs at least one sheet to be worth opening.
        workbook.add_worksheet().set_name("No open rounds")?;
    }
    Ok(workbook)
}

/// Fixed headers followed by "Ref n A/B/Game" triplets for the referees.
fn write_score_headers(sheet: &mut Worksheet, fixed: &[&str]) -> Result<(), XlsxError> {
    for (col, title) in fixed.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    let mut col = fixed.len() as u16;
    for referee in 1..=REFEREE_COUNT {
        sheet.write_string(0, col, format!("Ref {} A", referee))?;
        sheet.write_string(0, col + 1, format!("Ref {} B", referee))?;
        sheet.write_string(0, col + 2, format!("Ref {} Game", referee))?;
        col += 3;
    }
    Ok(())
}

fn write_category_rows(sheet: &mut Worksheet, category: &Category) -> Result<(), XlsxError> {
    const FIXED: [&str; 5] = ["Round", "Game", "Chave", "Name A", "Name B"];
    write_score_headers(sheet, &FIXED)?;

    let mut row: u32 = 1;
    for round in &category.rounds {
        for pairing in &round.pairings {
            sheet.write_number(row, 0, round.number as f64)?;
            sheet.write_string(row, 1, pairing.game_type.to_string())?;
            sheet.write_number(row, 2, pairing.chave.0 as f64)?;
            sheet.write_string(row, 3, pairing.side_a.to_string())?;
            sheet.write_string(row, 4, pairing.side_b.to_string())?;

            if let Some(score) = round.scores.get(&pairing.id) {
                let mut col = FIXED.len() as u16;
                for entry in &score.referees {
                    sheet.write_string(row, col, entry.points_a.as_str())?;
                    sheet.write_string(row, col + 1, entry.points_b.as_str())?;
                    sheet.write_string(row, col + 2, entry.points_game.as_str())?;
                    col += 3;
                }
            }
            row += 1;
        }
    }
    Ok(())
}

fn write_winners(sheet: &mut Worksheet, categories: &[Category]) -> Result<(), XlsxError> {
    sheet.write_string(
        0,
        0,
        format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
    )?;
    for (col, title) in ["Category", "Rank", "Apelido", "Points"].iter().enumerate() {
        sheet.write_string(1, col as u16, *title)?;
    }

    let mut row: u32 = 2;
    for category in categories {
        for (i, (apelido, points)) in category.standings().iter().enumerate() {
            sheet.write_string(row, 0, category.id.as_str())?;
            sheet.write_number(row, 1, (i + 1) as f64)?;
            sheet.write_string(row, 2, apelido.as_str())?;
            sheet.write_number(row, 3, *points)?;
            row += 1;
        }
    }
    Ok(())
}
