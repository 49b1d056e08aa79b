use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::Player;

/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL DEFAULT '',
    position TEXT    NOT NULL DEFAULT '',
    age      INTEGER NOT NULL DEFAULT 0,
    team     TEXT    NOT NULL DEFAULT '',
    goals    INTEGER NOT NULL DEFAULT 0,
    assists  INTEGER NOT NULL DEFAULT 0
)"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no player with id {0}")]
    Missing(i64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract the API layer and the seeder are written against.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn count(&self) -> StoreResult<i64>;

    async fn find_all(&self) -> StoreResult<Vec<Player>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Player>>;

    /// Inserts when `player.id` is unset, otherwise overwrites the row with that id.
    ///
    /// Saving with the id of a row that no longer exists fails with
    /// [`StoreError::Missing`] instead of inserting it again.
    async fn save(&self, player: Player) -> StoreResult<Player>;

    /// Overwrites every field of row `id`; `None` when there is no such row.
    async fn update(&self, id: i64, player: Player) -> StoreResult<Option<Player>>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> StoreResult<Vec<Player>>;

    async fn find_by_position(&self, position: &str) -> StoreResult<Vec<Player>>;

    async fn find_by_team(&self, team: &str) -> StoreResult<Vec<Player>>;
}

/// Open a pool, creating the database file if it does not exist yet.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct SqlitePlayerStore {
    pool: SqlitePool,
}

impl SqlitePlayerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    async fn count(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM players"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_all(&self) -> StoreResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players ORDER BY id"#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn save(&self, player: Player) -> StoreResult<Player> {
        // An id means the row already exists; never recreate a deleted one.
        if let Some(id) = player.id {
            return self.update(id, player).await?.ok_or(StoreError::Missing(id));
        }

        let saved = sqlx::query_as::<_, Player>(
            r#"INSERT INTO players (name, position, age, team, goals, assists)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
        .bind(&player.name)
        .bind(&player.position)
        .bind(player.age)
        .bind(&player.team)
        .bind(player.goals)
        .bind(player.assists)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = ?saved.id, name = %saved.name, "inserted player");

        Ok(saved)
    }

    async fn update(&self, id: i64, player: Player) -> StoreResult<Option<Player>> {
        let updated = sqlx::query_as::<_, Player>(
            r#"UPDATE players SET
                   name = ?,
                   position = ?,
                   age = ?,
                   team = ?,
                   goals = ?,
                   assists = ?
               WHERE id = ?
               RETURNING *"#
        )
        .bind(&player.name)
        .bind(&player.position)
        .bind(player.age)
        .bind(&player.team)
        .bind(player.goals)
        .bind(player.assists)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(player) = &updated {
            tracing::debug!(id, name = %player.name, "updated player");
        }

        Ok(updated)
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let matches = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM players WHERE id = ?"#
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(matches > 0)
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> StoreResult<Vec<Player>> {
        // instr() rather than LIKE so '%' and '_' in the input match literally.
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE instr(lower(name), lower(?)) > 0 ORDER BY id"#
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn find_by_position(&self, position: &str) -> StoreResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE position = ? ORDER BY id"#
        )
        .bind(position)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    async fn find_by_team(&self, team: &str) -> StoreResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"SELECT * FROM players WHERE team = ? ORDER BY id"#
        )
        .bind(team)
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One connection, so every query sees the same in-memory database.
    async fn memory_store() -> SqlitePlayerStore {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        init_schema(&pool).await.unwrap();
        SqlitePlayerStore::new(pool)
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let store = memory_store().await;

        let first = store.save(Player::new("A", "Forward", 20, "X", 1, 0)).await.unwrap();
        let second = store.save(Player::new("B", "Defender", 21, "X", 0, 1)).await.unwrap();

        let (first_id, second_id) = (first.id.unwrap(), second.id.unwrap());
        assert!(first_id > 0);
        assert!(second_id > first_id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_row() {
        let store = memory_store().await;
        let created = store.save(Player::new("Old", "Forward", 20, "X", 5, 5)).await.unwrap();
        let id = created.id.unwrap();

        let updated = store
            .save(Player::new("New", "Goalkeeper", 33, "Y", 0, 0).with_id(id))
            .await
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(store.find_by_id(id).await.unwrap(), Some(updated));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_removes_row_and_id_is_not_reused() {
        let store = memory_store().await;
        let created = store.save(Player::new("Gone", "Forward", 20, "X", 0, 0)).await.unwrap();
        let id = created.id.unwrap();

        assert!(store.exists_by_id(id).await.unwrap());
        store.delete_by_id(id).await.unwrap();
        assert!(!store.exists_by_id(id).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap(), None);

        let next = store.save(Player::new("Next", "Forward", 20, "X", 0, 0)).await.unwrap();
        assert!(next.id.unwrap() > id);
    }

    #[tokio::test]
    async fn deleted_row_stays_deleted_after_update_or_save() {
        let store = memory_store().await;
        let created = store.save(Player::new("Ghost", "Forward", 20, "X", 0, 0)).await.unwrap();
        let id = created.id.unwrap();
        store.delete_by_id(id).await.unwrap();

        let updated = store
            .update(id, Player::new("Ghost", "Defender", 21, "Y", 1, 1))
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert!(!store.exists_by_id(id).await.unwrap());

        let err = store
            .save(Player::new("Ghost", "Defender", 21, "Y", 1, 1).with_id(id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Missing(missing) if missing == id));
        assert!(!store.exists_by_id(id).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_ignores_id_inside_payload() {
        let store = memory_store().await;
        let first = store.save(Player::new("First", "Forward", 20, "X", 0, 0)).await.unwrap();
        let second = store.save(Player::new("Second", "Forward", 20, "X", 0, 0)).await.unwrap();
        let first_id = first.id.unwrap();

        let payload = Player::new("Renamed", "Midfielder", 22, "Z", 2, 3).with_id(second.id.unwrap());
        let updated = store.update(first_id, payload).await.unwrap().unwrap();

        assert_eq!(updated.id, Some(first_id));
        assert_eq!(updated.name, "Renamed");
        assert_eq!(store.find_by_id(second.id.unwrap()).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn name_search_is_case_insensitive_substring() {
        let store = memory_store().await;
        store.save(Player::new("Lionel Messi", "Forward", 36, "Inter Miami", 25, 12)).await.unwrap();
        store.save(Player::new("Erling Haaland", "Forward", 23, "Manchester City", 31, 4)).await.unwrap();

        let found = store.find_by_name_containing_ignore_case("messi").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lionel Messi");

        let found = store.find_by_name_containing_ignore_case("AAL").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Erling Haaland");

        assert!(store.find_by_name_containing_ignore_case("zz").await.unwrap().is_empty());
        assert!(store.find_by_name_containing_ignore_case("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn position_and_team_match_exactly() {
        let store = memory_store().await;
        store.save(Player::new("Upper", "Forward", 20, "Liverpool", 0, 0)).await.unwrap();
        store.save(Player::new("Lower", "forward", 20, "liverpool", 0, 0)).await.unwrap();

        let forwards = store.find_by_position("Forward").await.unwrap();
        assert_eq!(forwards.len(), 1);
        assert_eq!(forwards[0].name, "Upper");

        let reds = store.find_by_team("liverpool").await.unwrap();
        assert_eq!(reds.len(), 1);
        assert_eq!(reds[0].name, "Lower");

        assert!(store.find_by_team("Liver").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let store = SqlitePlayerStore::new(pool);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
