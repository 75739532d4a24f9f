// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;

/// A persistent string-to-string map backed by SQLite.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        log::debug!("Opening database at {database_path}");
        let conn = Connection::open(database_path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Read the value stored under `key`, if any.
    pub fn get_item(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from kv where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }

    /// Delete `key`. Deleting a missing key does nothing.
    pub fn remove_item(&self, key: &str) -> Fallible<()> {
        let sql = "delete from kv where key = ?;";
        self.conn.execute(sql, [key])?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_missing() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.get_item("lastResetWeek")?, None);
        Ok(())
    }

    #[test]
    fn test_set_get_remove() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set_item("کارت بابا", "used")?;
        assert_eq!(db.get_item("کارت بابا")?, Some("used".to_string()));
        db.set_item("کارت بابا", "other")?;
        assert_eq!(db.get_item("کارت بابا")?, Some("other".to_string()));
        db.remove_item("کارت بابا")?;
        assert_eq!(db.get_item("کارت بابا")?, None);
        db.remove_item("کارت بابا")?;
        Ok(())
    }

    #[test]
    fn test_persists_across_connections() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("poolcards.db");
        let path = path.to_str().unwrap();
        {
            let db = Database::new(path)?;
            db.set_item("lastResetWeek", "12")?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.get_item("lastResetWeek")?, Some("12".to_string()));
        Ok(())
    }
}
