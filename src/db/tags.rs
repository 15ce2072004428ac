use rusqlite::{params, Connection, OptionalExtension, Result};
use std::collections::HashMap;

const INSERT_TAG: &str = "INSERT INTO tags (name) VALUES (?1)";
const SELECT_TAG_ID_BY_NAME: &str = "SELECT id FROM tags WHERE name = ?1";
const SELECT_TAGS_BY_TASK: &str = "
    SELECT t.name FROM tags t
    JOIN task_tags tt ON t.id = tt.tag_id
    WHERE tt.task_id = ?1
    ORDER BY tt.position
";
const SELECT_ALL_TASK_TAGS: &str = "
    SELECT tt.task_id, t.name FROM task_tags tt
    JOIN tags t ON t.id = tt.tag_id
    ORDER BY tt.task_id, tt.position
";
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id, position) VALUES (?1, ?2, ?3)";
const DELETE_ALL_TASK_TAGS: &str = "DELETE FROM task_tags WHERE task_id = ?1";
const DELETE_UNUSED_TAGS: &str = "DELETE FROM tags WHERE id NOT IN (SELECT DISTINCT tag_id FROM task_tags)";

/// Tag rows and the ordered task/tag junction.
///
/// Borrows a connection so it can run inside the caller's transaction.
pub struct Tags<'a> {
    conn: &'a Connection,
}

impl<'a> Tags<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// ID of the tag called `name`, creating it on first use.
    pub fn get_or_create(&self, name: &str) -> Result<i64> {
        if let Some(id) = self.conn.query_row(SELECT_TAG_ID_BY_NAME, params![name], |row| row.get(0)).optional()? {
            return Ok(id);
        }
        self.conn.execute(INSERT_TAG, params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replaces the tags of a task, keeping the given order.
    pub fn set_task_tags(&self, task_id: &str, names: &[String]) -> Result<()> {
        self.conn.execute(DELETE_ALL_TASK_TAGS, params![task_id])?;
        for (position, name) in names.iter().enumerate() {
            let tag_id = self.get_or_create(name)?;
            self.conn.execute(INSERT_TASK_TAG, params![task_id, tag_id, position as i64])?;
        }
        Ok(())
    }

    pub fn get_task_tags(&self, task_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_BY_TASK)?;
        let names = stmt.query_map(params![task_id], |row| row.get(0))?.collect::<Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Tags of every task, in one query.
    pub fn all_task_tags(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TASK_TAGS)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut by_task: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let (task_id, name) = row?;
            by_task.entry(task_id).or_default().push(name);
        }
        Ok(by_task)
    }

    /// Removes tags no task refers to anymore. Returns how many were removed.
    pub fn prune_unused(&self) -> Result<usize> {
        self.conn.execute(DELETE_UNUSED_TAGS, [])
    }
}
