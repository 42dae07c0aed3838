use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::models::{CreateUserRecord, UpdateUserRecord, UserRecord};

const RECORD_COLUMNS: &str = "id, username, nacimiento, numero, gmail, profesion, certificado_N";

/// Access to the `personas` table. Every method runs a single statement on a
/// connection borrowed from the pool for that statement only.
#[derive(Clone)]
pub struct UserRecordService {
    db: SqlitePool,
}

impl UserRecordService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_record(&self, input: CreateUserRecord) -> Result<UserRecord> {
        let sql = format!(
            "INSERT INTO personas (username, nacimiento, numero, gmail, profesion, certificado_N) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {RECORD_COLUMNS}"
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(&input.username)
            .bind(&input.nacimiento)
            .bind(&input.numero)
            .bind(&input.gmail)
            .bind(&input.profesion)
            .bind(&input.certificado_n)
            .fetch_one(&self.db)
            .await
            .context("insert into personas")?;

        tracing::debug!(id = record.id, "Inserted persona");
        Ok(record)
    }

    pub async fn get_record(&self, id: i64) -> Result<Option<UserRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM personas WHERE id = ?");

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("select persona by id")?;

        Ok(record)
    }

    /// All rows. Ordered by id, callers should not rely on it.
    pub async fn list_records(&self) -> Result<Vec<UserRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM personas ORDER BY id");

        let records = sqlx::query_as::<_, UserRecord>(&sql)
            .fetch_all(&self.db)
            .await
            .context("select personas")?;

        Ok(records)
    }

    /// Rows whose `profesion` is exactly `profesion`. An empty result is not an error here.
    pub async fn list_records_by_profession(&self, profesion: &str) -> Result<Vec<UserRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM personas WHERE profesion = ? ORDER BY id");

        let records = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(profesion)
            .fetch_all(&self.db)
            .await
            .context("select personas by profesion")?;

        Ok(records)
    }

    /// Overwrites the row `id`. `None` when no such row exists.
    ///
    /// A missing `certificado_N` keeps the stored value.
    pub async fn update_record(
        &self,
        id: i64,
        input: UpdateUserRecord,
    ) -> Result<Option<UserRecord>> {
        let sql = format!(
            "UPDATE personas \
             SET username = ?, nacimiento = ?, numero = ?, gmail = ?, profesion = ?, \
                 certificado_N = COALESCE(?, certificado_N) \
             WHERE id = ? \
             RETURNING {RECORD_COLUMNS}"
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(&input.username)
            .bind(&input.nacimiento)
            .bind(&input.numero)
            .bind(&input.gmail)
            .bind(&input.profesion)
            .bind(&input.certificado_n)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .context("update persona")?;

        Ok(record)
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .context("ping database")?;
        Ok(())
    }
}
