// src/db.rs

use crate::error::{DiaryError, Result};
use crate::models::Entry;
use chrono::{Local, NaiveDateTime};
use log::debug;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Text layout of the `timestamp` column, in local time.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// "DD/MM/YYYY HH:MM:SS" is rebuilt as "YYYYMMDDHH:MM:SS" so that text order is time order.
const ORDER_BY_TIME: &str = "ORDER BY substr(timestamp, 7, 4) || substr(timestamp, 4, 2) || substr(timestamp, 1, 2) || substr(timestamp, 12) DESC, id DESC";

/// Fixed location of the diary file (~/.config/diary/diary.db).
pub fn get_db_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(DiaryError::HomeDirNotFound)?;
    Ok(home_dir.join(".config/diary/diary.db"))
}

/// The diary's entry table and the single connection that owns it.
///
/// Opened once at startup and handed to the menu loop. Call [`Store::close`]
/// on shutdown; if the store is dropped instead (e.g. while unwinding), the
/// connection is still released.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if needed) the database file and makes sure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| DiaryError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let conn = Connection::open(path)?;
        debug!("opened diary database at {}", path.display());
        let store = Store { conn };
        store.initialize()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let store = Store {
            conn: Connection::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates the entry table if it does not exist yet. Safe to repeat.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Stores `content` stamped with the current local time.
    ///
    /// The connection runs in autocommit mode, so the row is durable once
    /// this returns.
    pub fn insert(&self, content: &str) -> Result<()> {
        self.insert_at(content, Local::now().naive_local())
    }

    fn insert_at(&self, content: &str, at: NaiveDateTime) -> Result<()> {
        let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(
            "INSERT INTO entries (timestamp, content) VALUES (?1, ?2)",
            params![timestamp, content],
        )?;
        debug!(
            "inserted entry #{} at {}",
            self.conn.last_insert_rowid(),
            timestamp
        );
        Ok(())
    }

    /// All entries, most recent first.
    pub fn list_all(&self) -> Result<Vec<Entry>> {
        let query = format!("SELECT id, timestamp, content FROM entries {}", ORDER_BY_TIME);
        let mut stmt = self.conn.prepare(&query)?;
        let entries = stmt
            .query_map([], |row| {
                Ok(Entry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    content: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Entries whose content contains `term`, ignoring case, most recent first.
    ///
    /// Only `content` is matched; the timestamp never is. `term` is taken
    /// literally (no `%`/`_` wildcards). SQLite's `lower()` only folds ASCII,
    /// so the comparison is done here instead.
    pub fn search(&self, term: &str) -> Result<Vec<Entry>> {
        let needle = term.to_lowercase();
        let matches: Vec<Entry> = self
            .list_all()?
            .into_iter()
            .filter(|entry| entry.content.to_lowercase().contains(&needle))
            .collect();
        debug!("search for {:?} matched {} entries", needle, matches.len());
        Ok(matches)
    }

    #[cfg(test)]
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Releases the database handle.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| DiaryError::Sql(e))?;
        debug!("closed diary database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, month: u32, year: i32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn contents(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.content.as_str()).collect()
    }

    #[test]
    fn initialize_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.insert("kept").unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        let entries = store.list_all().unwrap();
        assert_eq!(contents(&entries), vec!["kept"]);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.list_all().unwrap().is_empty());
        assert!(store.search("anything").unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn list_orders_by_time_not_by_text() {
        let store = Store::open_in_memory().unwrap();
        // As plain text "31/01/2024" sorts after "01/02/2024" and "15/12/2023".
        store.insert_at("t2", at(31, 1, 2024, 9)).unwrap();
        store.insert_at("t3", at(1, 2, 2024, 8)).unwrap();
        store.insert_at("t1", at(15, 12, 2023, 23)).unwrap();

        let entries = store.list_all().unwrap();
        assert_eq!(contents(&entries), vec!["t3", "t2", "t1"]);
        assert_eq!(entries[0].timestamp, "01/02/2024 08:00:00");
    }

    #[test]
    fn same_second_entries_list_latest_insert_first() {
        let store = Store::open_in_memory().unwrap();
        let moment = at(5, 5, 2024, 12);
        store.insert_at("first", moment).unwrap();
        store.insert_at("second", moment).unwrap();

        let entries = store.list_all().unwrap();
        assert_eq!(contents(&entries), vec!["second", "first"]);
        assert!(entries[0].id > entries[1].id);
    }

    #[test]
    fn multiline_content_round_trips() {
        let store = Store::open_in_memory().unwrap();
        store.insert("line1\nline2").unwrap();

        let entries = store.list_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "line1\nline2");
    }

    #[test]
    fn insert_stamps_local_time_in_diary_format() {
        let store = Store::open_in_memory().unwrap();
        store.insert("now").unwrap();

        let entry = &store.list_all().unwrap()[0];
        assert!(NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(entry.timestamp.len(), "DD/MM/YYYY HH:MM:SS".len());
    }

    #[test]
    fn search_ignores_case() {
        let store = Store::open_in_memory().unwrap();
        store.insert("Hello World").unwrap();

        assert_eq!(contents(&store.search("world").unwrap()), vec!["Hello World"]);
        assert_eq!(contents(&store.search("WORLD").unwrap()), vec!["Hello World"]);
        assert!(store.search("xyz").unwrap().is_empty());
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let store = Store::open_in_memory().unwrap();
        store.insert("Reunião na ÁREA nova").unwrap();

        assert_eq!(store.search("área").unwrap().len(), 1);
    }

    #[test]
    fn search_does_not_match_timestamps() {
        let store = Store::open_in_memory().unwrap();
        store.insert_at("nothing dated here", at(3, 4, 2024, 10)).unwrap();

        assert!(store.search("2024").unwrap().is_empty());
        assert!(store.search("03/04").unwrap().is_empty());
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let store = Store::open_in_memory().unwrap();
        store.insert("plain text").unwrap();
        store.insert("100% done").unwrap();

        assert_eq!(contents(&store.search("%").unwrap()), vec!["100% done"]);
        assert!(store.search("_").unwrap().is_empty());
    }

    #[test]
    fn search_results_are_ordered_by_time() {
        let store = Store::open_in_memory().unwrap();
        store.insert_at("note old", at(1, 1, 2020, 0)).unwrap();
        store.insert_at("unrelated", at(1, 1, 2021, 0)).unwrap();
        store.insert_at("note new", at(1, 1, 2022, 0)).unwrap();

        let found = store.search("note").unwrap();
        assert_eq!(contents(&found), vec!["note new", "note old"]);
    }

    #[test]
    fn write_list_search_scenario() {
        let store = Store::open_in_memory().unwrap();
        store.insert("A").unwrap();
        store.insert("B").unwrap();

        assert_eq!(contents(&store.list_all().unwrap()), vec!["B", "A"]);
        assert_eq!(contents(&store.search("a").unwrap()), vec!["A"]);
    }

    #[test]
    fn entries_survive_close_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/diary.db");

        let store = Store::open(&path).unwrap();
        store.insert("persisted").unwrap();
        store.close().unwrap();

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.list_all().unwrap()[0].content, "persisted");
        reopened.close().unwrap();
    }
}
