// core/src/workout.rs
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::grid::{cell_at, Grid};

/// Første celle i overskriftsraden for en økt.
pub const SESSION_HEADER_MARKER: &str = "дата тренировки";
/// Første celle i "самочувствие"-blokken etter øvelsene.
pub const STATUS_MARKER: &str = "самочувствие";
/// Overskrift + underoverskrift før første øvelse.
pub const HEADER_SKIP_ROWS: usize = 2;
/// Kortere rader enn dette er ikke en øvelse.
pub const MIN_EXERCISE_COLUMNS: usize = 10;
pub const COMMENT_COLUMN: usize = 38;
pub const DEFAULT_WORKING_RPE: &str = "8";

// Faste kolonner i en øvelsesrad
const COL_NAME: usize = 0;
const COL_PRIOR_WEIGHT: usize = 1;
const COL_PRIOR_REPS: usize = 2;
const COL_PRIOR_RPE: usize = 3;
const COL_WARMUPS: usize = 4;
const COL_EXTRA_NOTE: usize = 5;
const COL_EXTRA_COUNT: usize = 6;
const COL_WORK_WEIGHT: usize = 7;
const COL_WORK_REPS: usize = 8;
const COL_WORK_RPE: usize = 9;

/// Forrige beste sett. Lagres som visningstekst, slik det står i arket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorBest {
    pub weight: String,
    pub reps: Option<String>,
    pub rpe: Option<String>,
}

/// Ekstra ("добивочные") sett etter arbeidssettet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraSets {
    pub count: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub name: String,
    pub prior_best: Option<PriorBest>,
    pub warmups: Vec<String>,
    pub working_weight: Option<String>,
    pub working_reps: Option<String>,
    /// "8" når cellen er tom.
    pub working_rpe: String,
    pub extra_sets: Option<ExtraSets>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub exercises: Vec<ExerciseRecord>,
    /// Tom streng hvis ingen kommentar.
    pub comment: String,
    /// Rader i økten som var for korte til å bli en øvelse.
    pub skipped_rows: usize,
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

fn starts_with_marker(row: &[String], marker: &str) -> bool {
    cell_at(row, 0).trim().to_lowercase().starts_with(marker)
}

/// Indeks til første rad med overskriftsmarkøren, ellers 0.
pub fn find_session_start(grid: &Grid) -> usize {
    match grid
        .lines
        .iter()
        .position(|row| starts_with_marker(row, SESSION_HEADER_MARKER))
    {
        Some(i) => i,
        None => {
            warn!("fant ikke \"{}\" – leser fra rad 0", SESSION_HEADER_MARKER);
            0
        }
    }
}

/// Oppvarmingssett: "40*10; 60*5" → ["40×10", "60×5"].
pub fn parse_warmups(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(|w| w.trim().replace('*', "×"))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Antall ekstrasett. Ugyldig tall → `None` (linjen utelates, øvelsen beholdes).
pub fn parse_extra_count(cell: &str) -> Option<u32> {
    let t = cell.trim();
    if t.is_empty() {
        return None;
    }
    match t.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!("ekstrasett ikke et heltall: {:?}", cell);
            None
        }
    }
}

/// Én rad → øvelse. `None` hvis raden er kortere enn `MIN_EXERCISE_COLUMNS`.
pub fn parse_exercise_row(row: &[String]) -> Option<ExerciseRecord> {
    if row.len() < MIN_EXERCISE_COLUMNS {
        return None;
    }
    let c = |i: usize| cell_at(row, i).trim();

    let prior_best = non_empty(c(COL_PRIOR_WEIGHT)).map(|weight| PriorBest {
        weight,
        reps: non_empty(c(COL_PRIOR_REPS)),
        rpe: non_empty(c(COL_PRIOR_RPE)),
    });

    let extra_sets = parse_extra_count(c(COL_EXTRA_COUNT)).map(|count| ExtraSets {
        count,
        note: non_empty(c(COL_EXTRA_NOTE)),
    });

    Some(ExerciseRecord {
        name: c(COL_NAME).to_string(),
        prior_best,
        warmups: parse_warmups(c(COL_WARMUPS)),
        working_weight: non_empty(c(COL_WORK_WEIGHT)),
        working_reps: non_empty(c(COL_WORK_REPS)),
        working_rpe: non_empty(c(COL_WORK_RPE)).unwrap_or_else(|| DEFAULT_WORKING_RPE.to_string()),
        extra_sets,
    })
}

/// Siste (øverste) økt fra radvis rutenett.
///
/// Leser fra overskrift + `HEADER_SKIP_ROWS` til første helt tomme rad eller
/// "самочувствие"-raden. Korte rader hoppes over. Kommentaren er første
/// ikke-tomme celle i kolonne `COMMENT_COLUMN` blant øktens rader.
pub fn extract_latest_workout(grid: &Grid) -> WorkoutSession {
    let start = find_session_start(grid) + HEADER_SKIP_ROWS;

    let rows: Vec<&[String]> = grid
        .lines
        .iter()
        .skip(start)
        .map(Vec::as_slice)
        .take_while(|row| !is_blank_row(row) && !starts_with_marker(row, STATUS_MARKER))
        .collect();

    let mut session = WorkoutSession::default();
    for row in &rows {
        match parse_exercise_row(row) {
            Some(rec) => session.exercises.push(rec),
            None => {
                debug!("hopper over kort rad ({} kolonner)", row.len());
                session.skipped_rows += 1;
            }
        }
    }

    session.comment = rows
        .iter()
        .map(|row| cell_at(row, COMMENT_COLUMN).trim())
        .find(|c| !c.is_empty())
        .unwrap_or("")
        .to_string();

    session
}
