use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::core::error::TodoResult;
use crate::core::models::Task;

/// SQLite-backed storage for the task collection.
///
/// The store is deliberately dumb: it persists the collection exactly as
/// ordered and never interprets it. `position` is the task's index within the
/// collection at save time, so stored order and collection order are the same
/// thing.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> TodoResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> TodoResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> TodoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                position INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                deadline TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                completed_at TEXT
            );",
        )?;
        Ok(())
    }

    /// Loads the whole collection in stored order.
    pub fn load(&self) -> TodoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, deadline, completed, created_at, completed_at
             FROM tasks ORDER BY position",
        )?;

        let tasks: Result<Vec<_>, _> = stmt.query_map([], |row| row_to_task(row))?.collect();

        Ok(tasks?)
    }

    /// Replaces the stored collection with `tasks`, in order, atomically.
    pub fn save(&mut self, tasks: &[Task]) -> TodoResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (position, title, deadline, completed, created_at, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    task.title,
                    task.deadline,
                    task.completed,
                    task.created_at,
                    task.completed_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        title: row.get(0)?,
        deadline: row.get(1)?,
        completed: row.get(2)?,
        created_at: row.get(3)?,
        completed_at: row.get(4)?,
    })
}
