//! Flat CSV file holding one header row and one row per game.
//!
//! Rows end in `\r\n` and fields are quoted only when they contain a comma, a
//! quote or a line break. Dates are `YYYY-MM-DD`; absent values are empty.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::{
    game::{Game, GameSnapshot},
    types::{GameId, Rating, Status},
};

use super::{GameSink, PersistError, PersistResult};

/// Column names, in on-disk order.
pub const COLUMNS: [&str; 9] = [
    "id",
    "title",
    "platform",
    "status",
    "rating",
    "genre",
    "review",
    "date_added",
    "completion_date",
];

const LINE_TERMINATOR: &str = "\r\n";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// [`GameSink`] backed by a CSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvGameFile {
    path: PathBuf,
    atomic_rewrite: bool,
}

impl CsvGameFile {
    /// Binds to `path`; the file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_rewrite: true,
        }
    }

    /// When set (the default), rewrites go to a sibling temp file that is then
    /// renamed over the original. Otherwise the file is truncated in place.
    pub fn with_atomic_rewrite(mut self, atomic: bool) -> Self {
        self.atomic_rewrite = atomic;
        self
    }

    fn tail(&self) -> PersistResult<Tail> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                return match PersistError::io(&self.path, err) {
                    PersistError::Missing { .. } => Ok(Tail::Empty),
                    other => Err(other),
                };
            }
        };
        let io_err = |e: io::Error| PersistError::io(&self.path, e);
        if file.metadata().map_err(io_err)?.len() == 0 {
            return Ok(Tail::Empty);
        }
        file.seek(SeekFrom::End(-1)).map_err(io_err)?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).map_err(io_err)?;
        Ok(if last[0] == b'\n' {
            Tail::Terminated
        } else {
            Tail::Unterminated
        })
    }

    fn write_atomic(&self, contents: &str) -> PersistResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistError::io(dir, e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| PersistError::io(tmp.path(), e))?;
        // Keep the mode of the file being replaced; temp files start out 0600.
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| PersistError::io(tmp.path(), e))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| PersistError::io(&self.path, e.error))?;
        Ok(())
    }
}

/// How the backing file currently ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
    /// Missing or zero length; the header has to be written first.
    Empty,
    /// Last byte is `\n`.
    Terminated,
    /// Last row was left without a terminator, e.g. by a hand edit.
    Unterminated,
}

impl GameSink for CsvGameFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> PersistResult<Vec<Game>> {
        let text = fs::read_to_string(&self.path).map_err(|e| PersistError::io(&self.path, e))?;
        parse_document(&text)
    }

    fn append(&mut self, game: &Game) -> PersistResult<()> {
        let mut out = String::new();
        match self.tail()? {
            Tail::Empty => out.push_str(&encode_header()),
            Tail::Unterminated => out.push_str(LINE_TERMINATOR),
            Tail::Terminated => {}
        }
        out.push_str(&encode_row(game));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PersistError::io(&self.path, e))?;
        file.write_all(out.as_bytes())
            .map_err(|e| PersistError::io(&self.path, e))?;
        trace!(path = %self.path.display(), id = game.id(), "appended row");
        Ok(())
    }

    fn rewrite(&mut self, games: &[Game]) -> PersistResult<()> {
        let contents = encode_document(games);
        if self.atomic_rewrite {
            self.write_atomic(&contents)?;
        } else {
            fs::write(&self.path, contents).map_err(|e| PersistError::io(&self.path, e))?;
        }
        trace!(path = %self.path.display(), rows = games.len(), "rewrote file");
        Ok(())
    }
}

/// Header row including the terminator.
pub fn encode_header() -> String {
    let mut line = COLUMNS.join(",");
    line.push_str(LINE_TERMINATOR);
    line
}

/// One record row including the terminator.
pub fn encode_row(game: &Game) -> String {
    let fields = [
        game.id().to_string(),
        game.title().to_string(),
        game.platform().to_string(),
        game.status().to_string(),
        game.rating().map(|r| r.to_string()).unwrap_or_default(),
        game.genre().to_string(),
        game.review().unwrap_or_default().to_string(),
        game.date_added().format(DATE_FORMAT).to_string(),
        game.completion_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
    ];
    let mut line = fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str(LINE_TERMINATOR);
    line
}

/// Header followed by every row.
pub fn encode_document(games: &[Game]) -> String {
    let mut out = encode_header();
    for game in games {
        out.push_str(&encode_row(game));
    }
    out
}

/// Parses a whole file, skipping rows whose first column is not an id.
pub fn parse_document(text: &str) -> PersistResult<Vec<Game>> {
    let mut games = Vec::new();
    for row in split_rows(text) {
        if let Some(game) = decode_row(&row)? {
            games.push(game);
        }
    }
    Ok(games)
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawRow {
    line: usize,
    fields: Vec<String>,
}

/// Tokenizes CSV text into rows. Blank lines produce no row.
fn split_rows(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if row_started {
                    fields.push(std::mem::take(&mut field));
                    rows.push(RawRow {
                        line: row_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                line += 1;
                row_line = line;
                row_started = false;
            }
            _ => {
                field.push(ch);
                row_started = true;
            }
        }
    }

    if row_started {
        fields.push(field);
        rows.push(RawRow {
            line: row_line,
            fields,
        });
    }
    rows
}

fn decode_row(row: &RawRow) -> PersistResult<Option<Game>> {
    let Some(first) = row.fields.first() else {
        return Ok(None);
    };
    if first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit()) {
        debug!(line = row.line, "skipping row without a numeric id");
        return Ok(None);
    }
    let Ok(id) = first.parse::<GameId>() else {
        debug!(line = row.line, id = %first, "skipping row with an out-of-range id");
        return Ok(None);
    };
    if row.fields.len() != COLUMNS.len() {
        return Err(parse_error(
            row.line,
            "row",
            format!(
                "expected {} columns, found {}",
                COLUMNS.len(),
                row.fields.len()
            ),
        ));
    }

    let f = &row.fields;
    let status = f[3]
        .parse::<Status>()
        .map_err(|e| parse_error(row.line, "status", e.to_string()))?;
    let rating = optional(&f[4])
        .map(|v| v.parse::<Rating>())
        .transpose()
        .map_err(|e| parse_error(row.line, "rating", e.to_string()))?;
    let date_added = optional(&f[7])
        .ok_or_else(|| parse_error(row.line, "date_added", "value is missing".to_string()))
        .and_then(|v| parse_date(row.line, "date_added", v))?;
    let completion_date = optional(&f[8])
        .map(|v| parse_date(row.line, "completion_date", v))
        .transpose()?;

    Ok(Some(Game::restore(GameSnapshot {
        id,
        title: f[1].clone(),
        platform: f[2].clone(),
        status,
        rating,
        genre: f[5].clone(),
        review: optional(&f[6]).map(str::to_string),
        date_added,
        completion_date,
    })))
}

fn optional(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn parse_date(line: usize, field: &'static str, value: &str) -> PersistResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| parse_error(line, field, format!("`{value}`: {e}")))
}

fn parse_error(line: usize, field: &'static str, message: String) -> PersistError {
    PersistError::Parse {
        line,
        field,
        message,
    }
}
