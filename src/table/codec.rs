//! Fixed-width, pipe-delimited row format used by the user table file.
//!
//! A row is eight columns. The first seven are right-padded with spaces to
//! their display width and followed by `"| "`; the last column (role) is
//! written as-is. Padding is cosmetic only: decoding splits on `|` and trims,
//! so a value wider than its column shifts the alignment but never the data.
//!
//! Values are not escaped. A `|` or a newline inside a value corrupts the row.

use crate::core::error::StoreError;
use crate::models::user::{UserRecord, DEFAULT_ROLE};

/// Display widths of the padded columns: id, name, email, password, goal,
/// registration time and IP address. The role column is unpadded.
pub const COLUMN_WIDTHS: [usize; 7] = [6, 16, 26, 21, 21, 22, 16];

/// Number of columns in a row, including the terminal role column.
pub const COLUMN_COUNT: usize = COLUMN_WIDTHS.len() + 1;

/// Column titles written on the first line of a fresh table.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = [
    "ID",
    "NAME",
    "EMAIL",
    "PASSWORD",
    "GOAL",
    "DATE & TIME",
    "IP ADDRESS",
    "ROLE",
];

/// Number of leading lines (titles + separator) that never hold data.
pub const HEADER_LINES: usize = 2;

const SEPARATOR_WIDTH: usize = 155;

const COLUMN_SEPARATOR: &str = "| ";

/// The two header lines of a fresh table, each terminated by a newline.
pub fn header() -> String {
    format!(
        "{}\n{}\n",
        encode_row(&COLUMN_TITLES),
        "-".repeat(SEPARATOR_WIDTH)
    )
}

/// Right-pad `value` with spaces to `width` characters. Longer values are
/// returned untouched.
pub fn pad_right(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    let mut padded = String::with_capacity(value.len() + (width - len));
    padded.push_str(value);
    padded.extend(std::iter::repeat(' ').take(width - len));
    padded
}

/// Encode columns into one row.
///
/// Missing trailing columns are written empty and extra columns are dropped,
/// so the result always has exactly [`COLUMN_COUNT`] columns.
pub fn encode_row<S: AsRef<str>>(columns: &[S]) -> String {
    let value = |i: usize| columns.get(i).map(|c| c.as_ref()).unwrap_or("");

    let mut line = String::with_capacity(160);
    for (i, width) in COLUMN_WIDTHS.iter().enumerate() {
        line.push_str(&pad_right(value(i), *width));
        line.push_str(COLUMN_SEPARATOR);
    }
    line.push_str(value(COLUMN_COUNT - 1));
    line
}

/// Split a row on `|` and trim every column.
pub fn decode_row(line: &str) -> Vec<String> {
    line.split('|').map(|c| c.trim().to_string()).collect()
}

/// Whether a line past the header holds a user row.
///
/// Blank lines, repeated title lines and separator lines are not rows.
pub fn is_data_row(line: &str) -> bool {
    if !line.contains('|') {
        return false;
    }
    let trimmed = line.trim();
    if trimmed.chars().all(|c| c == '-') {
        return false;
    }
    !is_title_line(line)
}

/// Whether `line` is a column-title line.
pub fn is_title_line(line: &str) -> bool {
    line.contains('|') && first_column(line) == COLUMN_TITLES[0]
}

/// Trimmed content of the first column of a row.
pub fn first_column(line: &str) -> &str {
    line.split('|').next().unwrap_or("").trim()
}

pub fn encode_record(record: &UserRecord) -> String {
    let id = record.id.to_string();
    encode_row(&[
        id.as_str(),
        record.name.as_str(),
        record.email.as_str(),
        record.password.as_str(),
        record.goal.as_str(),
        record.registered_at.as_str(),
        record.ip_address.as_str(),
        record.role.as_str(),
    ])
}

/// Decode a data row into a [`UserRecord`].
///
/// The id column must be a positive integer. Missing columns decode as empty
/// strings, and an empty role decodes as [`DEFAULT_ROLE`].
pub fn decode_record(line: &str) -> Result<UserRecord, StoreError> {
    let mut columns = decode_row(line).into_iter();
    let mut next = || columns.next().unwrap_or_default();

    let raw_id = next();
    let id = match raw_id.parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => {
            return Err(StoreError::MalformedRow {
                line: line.to_string(),
                reason: format!("invalid id '{}'", raw_id),
            })
        }
    };

    let name = next();
    let email = next();
    let password = next();
    let goal = next();
    let registered_at = next();
    let ip_address = next();
    let role = match next() {
        role if role.is_empty() => DEFAULT_ROLE.to_string(),
        role => role,
    };

    Ok(UserRecord {
        id,
        name,
        email,
        password,
        goal,
        registered_at,
        ip_address,
        role,
    })
}

/// Re-encode a row with its role column replaced.
///
/// Columns 0 to 6 are carried over from the existing row and re-padded.
pub fn rewrite_role(line: &str, new_role: &str) -> String {
    let mut columns = decode_row(line);
    columns.resize(COLUMN_COUNT, String::new());
    columns[COLUMN_COUNT - 1] = new_role.to_string();
    encode_row(&columns)
}
