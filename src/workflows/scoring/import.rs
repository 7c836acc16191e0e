use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::MatchAttempt;
use super::repository::{RepositoryError, RosterRepository};

/// Outcome counters for one CSV import pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub enum SessionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Repository(RepositoryError),
}

impl std::fmt::Display for SessionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionImportError::Io(err) => write!(f, "failed to read session export: {}", err),
            SessionImportError::Csv(err) => write!(f, "invalid session CSV data: {}", err),
            SessionImportError::Repository(err) => {
                write!(f, "could not store imported attempt: {}", err)
            }
        }
    }
}

impl std::error::Error for SessionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionImportError::Io(err) => Some(err),
            SessionImportError::Csv(err) => Some(err),
            SessionImportError::Repository(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SessionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SessionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RepositoryError> for SessionImportError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// Registers raw session logs exported by the play device as match attempts.
///
/// Rows referencing players or classes missing from the roster are skipped
/// and counted rather than failing the import; device exports routinely lag
/// roster edits.
pub struct SessionLogImporter;

impl SessionLogImporter {
    pub fn from_path<P, R>(path: P, roster: &R) -> Result<ImportOutcome, SessionImportError>
    where
        P: AsRef<Path>,
        R: RosterRepository,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, roster)
    }

    pub fn from_reader<In, R>(reader: In, roster: &R) -> Result<ImportOutcome, SessionImportError>
    where
        In: Read,
        R: RosterRepository,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut outcome = ImportOutcome::default();

        for row in csv_reader.deserialize::<SessionLogRow>() {
            let row = row?;

            let player = roster.find_player(&row.player_ref)?;
            let classroom = roster.find_classroom(&row.class_code)?;
            let (Some(player), Some(classroom)) = (player, classroom) else {
                outcome.skipped += 1;
                continue;
            };

            let recorded_at = row.recorded_at();
            roster.record_attempt(MatchAttempt {
                player: player.id,
                classroom: classroom.id,
                match_number: row.match_number,
                raw_log: row.raw_log,
                recorded_at,
            })?;
            outcome.imported += 1;
        }

        Ok(outcome)
    }
}

#[derive(Debug, Deserialize)]
struct SessionLogRow {
    #[serde(rename = "Player")]
    player_ref: String,
    #[serde(rename = "Class")]
    class_code: String,
    #[serde(rename = "Match")]
    match_number: u32,
    #[serde(rename = "Log")]
    raw_log: String,
    #[serde(
        rename = "Recorded At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    recorded_at: Option<String>,
}

impl SessionLogRow {
    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
