use crate::core::error::StoreError;
use crate::models::user::{NewUser, UserRecord};
use crate::table::codec::{self, HEADER_LINES};
use crate::utils::fs::write_replace;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// User table backed by a fixed-width text file.
///
/// Every call works on a fresh read of the whole file. Mutations hold
/// `write_lock` across their read-modify-write so that two requests in this
/// process cannot interleave and lose an update or hand out the same id.
/// The unlocked building blocks ([`UserTable::snapshot`], [`next_id`],
/// [`UserTable::append_line`]) carry no such guarantee.
pub struct UserTable {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserTable {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the file starts with the two header lines.
    ///
    /// A missing or empty file gets a fresh header. A non-empty file whose
    /// first line is not the column-title line is refused with
    /// [`StoreError::MissingHeader`], since its first two lines would be
    /// skipped as header on every read. Returns true when a header was written.
    pub async fn ensure_initialized(&self) -> Result<bool, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.is_empty() => {
                write_replace(&self.path, codec::header().as_bytes()).await?;
                warn!(path = %self.path.display(), "User table was empty, header written");
                return Ok(true);
            }
            Ok(content) => {
                let first_line = content.lines().next().unwrap_or("");
                if codec::is_title_line(first_line) {
                    return Ok(false);
                }
                error!(path = %self.path.display(), "User table has no header");
                return Err(StoreError::MissingHeader(self.path.clone()));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        file.write_all(codec::header().as_bytes()).await?;
        file.flush().await?;

        info!(path = %self.path.display(), "User table created");
        Ok(true)
    }

    /// Raw file content.
    pub async fn snapshot(&self) -> Result<String, StoreError> {
        Ok(fs::read_to_string(&self.path).await?)
    }

    /// All users in file order.
    pub async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let content = self.snapshot().await?;
        Ok(parse_records(&content))
    }

    /// First user whose email matches, ignoring case.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.list_all().await?;
        Ok(find_email(&users, email).cloned())
    }

    /// First user whose email matches ignoring case and whose password
    /// matches exactly.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.list_all().await?;
        Ok(users
            .into_iter()
            .find(|user| user.email_matches(email) && user.password == password))
    }

    /// Register a new user.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the email is already
    /// taken in any letter case. The new row gets `max(id) + 1` (or 1) and
    /// is appended to the end of the file.
    pub async fn insert(
        &self,
        candidate: NewUser,
        registered_at: String,
        ip_address: String,
    ) -> Result<UserRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        self.ensure_initialized().await?;
        let existing = parse_records(&self.snapshot().await?);

        if find_email(&existing, &candidate.email).is_some() {
            warn!(email = %candidate.email, "Registration rejected: email already in use");
            return Err(StoreError::DuplicateEmail(candidate.email));
        }

        let id = next_id(&existing)?;
        let record = candidate.into_record(id, registered_at, ip_address);
        self.append_line(&codec::encode_record(&record)).await?;

        info!(
            user_id = record.id,
            email = %record.email,
            ip = %record.ip_address,
            "User registered"
        );

        Ok(record)
    }

    /// Append one encoded row, preceded by a newline.
    pub async fn append_line(&self, line: &str) -> Result<(), StoreError> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("\n{}", line).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Set the role of the user with `id` and rewrite the whole file.
    ///
    /// Returns the number of rows changed. Every other line is written back
    /// byte for byte.
    pub async fn update_role(&self, id: u64, new_role: &str) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let content = self.snapshot().await?;
        let (updated, changed) = apply_role_update(&content, id, new_role);

        if changed == 0 {
            warn!(user_id = id, "Role update matched no rows");
            return Ok(0);
        }

        write_replace(&self.path, updated.as_bytes()).await?;

        info!(user_id = id, role = %new_role, rows = changed, "Role updated");
        Ok(changed)
    }
}

/// Decode every data row past the header, skipping rows that fail to decode.
pub fn parse_records(content: &str) -> Vec<UserRecord> {
    content
        .lines()
        .enumerate()
        .skip(HEADER_LINES)
        .filter(|(_, line)| codec::is_data_row(line))
        .filter_map(|(line_num, line)| match codec::decode_record(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(line_num = line_num + 1, error = %e, "Skipping malformed user row");
                None
            }
        })
        .collect()
}

/// First record whose email matches `email`, ignoring case.
pub fn find_email<'a>(users: &'a [UserRecord], email: &str) -> Option<&'a UserRecord> {
    users.iter().find(|user| user.email_matches(email))
}

/// Id for the next registration: one past the highest existing id, or 1.
pub fn next_id(existing: &[UserRecord]) -> Result<u64, StoreError> {
    match existing.iter().map(|user| user.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| StoreError::IdsExhausted(max.to_string())),
    }
}

/// Replace the role column of every row whose id column equals `id`.
///
/// The id column is parsed the same way listing parses it, so `01` matches
/// id 1 while id 1 never matches a row for id 10. Returns the new content
/// and the number of rows changed.
pub fn apply_role_update(content: &str, id: u64, new_role: &str) -> (String, usize) {
    let mut changed = 0;

    let lines: Vec<String> = content
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i >= HEADER_LINES
                && codec::is_data_row(line)
                && codec::first_column(line).parse::<u64>() == Ok(id)
            {
                changed += 1;
                debug!(user_id = id, "Rewriting role column");
                codec::rewrite_role(line, new_role)
            } else {
                line.to_string()
            }
        })
        .collect();

    (lines.join("\n"), changed)
}
