//! SQLite persistence.
//!
//! Every operation is a single parameter-bound statement against a shared
//! pool. Rows-affected counts drive the not-found contract; sqlx errors
//! propagate to the caller unmodified.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::model::Todo;

const SEED_TODOS: [(&str, bool); 3] = [
    ("Learn the web framework", false),
    ("Build Todo App", false),
    ("Write Tests", false),
];

#[derive(Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Open an in-memory database. A single connection keeps every
    /// statement on the same database instance.
    pub async fn open_in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// Create the todos table if it does not exist. Idempotent; never
    /// touches existing rows.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos
             (id INTEGER PRIMARY KEY AUTOINCREMENT,
              task TEXT NOT NULL,
              completed BOOLEAN NOT NULL DEFAULT 0)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert the default rows, but only into an empty table.
    pub async fn seed_if_empty(&self) -> Result<(), sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            debug!("todos table has {count} rows, skipping seed");
            return Ok(());
        }

        for (task, completed) in SEED_TODOS {
            sqlx::query("INSERT INTO todos (task, completed) VALUES (?, ?)")
                .bind(task)
                .bind(completed)
                .execute(&self.pool)
                .await?;
        }
        info!("seeded todos table with {} default rows", SEED_TODOS.len());
        Ok(())
    }

    /// All rows, in the store's native order (no ORDER BY).
    pub async fn list_all(&self) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>("SELECT id, task, completed FROM todos")
            .fetch_all(&self.pool)
            .await
    }

    /// Insert one row and return the assigned id.
    pub async fn insert(&self, task: &str, completed: bool) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO todos (task, completed) VALUES (?, ?)")
            .bind(task)
            .bind(completed)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Update the row matching `id`; false means no such row.
    pub async fn update_by_id(
        &self,
        id: i64,
        task: &str,
        completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE todos SET task = ?, completed = ? WHERE id = ?")
            .bind(task)
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the row matching `id`; false means no such row.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch a single row by id.
    pub async fn fetch_by_id(&self, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>("SELECT id, task, completed FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh_store() -> TodoStore {
        let store = TodoStore::open_in_memory().await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = fresh_store().await;
        store.init_schema().await.unwrap();

        let id = store.insert("keep me", false).await.unwrap();
        store.init_schema().await.unwrap();
        assert!(store.fetch_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn seed_only_fills_an_empty_table() {
        let store = fresh_store().await;

        store.seed_if_empty().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 3);

        store.seed_if_empty().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn seed_skips_a_non_empty_table() {
        let store = fresh_store().await;
        store.insert("existing", true).await.unwrap();

        store.seed_if_empty().await.unwrap();
        let todos = store.list_all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].task, "existing");
    }

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let store = fresh_store().await;
        let id = store.insert("Buy milk", false).await.unwrap();

        let todos = store.list_all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, Some(id));
        assert_eq!(todos[0].task, "Buy milk");
        assert!(!todos[0].completed);
    }

    #[tokio::test]
    async fn update_reports_whether_a_row_matched() {
        let store = fresh_store().await;
        let id = store.insert("Buy milk", false).await.unwrap();

        assert!(store.update_by_id(id, "Buy milk", true).await.unwrap());
        let todo = store.fetch_by_id(id).await.unwrap().unwrap();
        assert!(todo.completed);

        assert!(!store.update_by_id(id + 100, "ghost", false).await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_matched() {
        let store = fresh_store().await;
        let id = store.insert("Buy milk", false).await.unwrap();

        assert!(store.delete_by_id(id).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(!store.delete_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = fresh_store().await;
        let first = store.insert("first", false).await.unwrap();
        store.delete_by_id(first).await.unwrap();

        let second = store.insert("second", false).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn open_creates_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let store = TodoStore::open(path.to_str().unwrap()).await.unwrap();
        store.init_schema().await.unwrap();
        store.seed_if_empty().await.unwrap();

        assert!(path.exists());
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }
}
