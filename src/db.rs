use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};
use uuid::Uuid;

use crate::config::Settings;
use crate::models::{CompletedSession, HairColor, PreferenceRecord, SessionStatus, SkinTone};
use crate::store::{StoreError, TreatmentStore};

pub const SEED_USER_ID: &str = "5b0d3c1e-8a52-4f3e-9d7a-2c41e6b9f0a7";
const SEED_PREFERENCE_ID: &str = "9e4f27a3-61c8-4b0d-8f52-3d7a1e6c0b94";

const INSERT_PREFERENCE: &str = r#"
    INSERT INTO ipl_tracker.user_preferences (id, user_id, skin_tone, hair_color)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (id) DO NOTHING
"#;

#[derive(Clone)]
pub struct PgTreatmentStore {
    pool: PgPool,
}

impl PgTreatmentStore {
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let database_url = settings.database_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to Postgres")?;
        Ok(Self { pool })
    }

    pub async fn init_db(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn save_preference(
        &self,
        user_id: Uuid,
        skin_tone: SkinTone,
        hair_color: HairColor,
    ) -> anyhow::Result<()> {
        self.insert_preference(Uuid::new_v4(), user_id, skin_tone, hair_color)
            .await?;
        Ok(())
    }

    /// Safe to rerun: the preference and every session use fixed keys.
    pub async fn seed(&self) -> anyhow::Result<Uuid> {
        let user_id = Uuid::parse_str(SEED_USER_ID)?;
        let preference_id = Uuid::parse_str(SEED_PREFERENCE_ID)?;
        self.insert_preference(preference_id, user_id, SkinTone::Bege, HairColor::CastanhoEscuro)
            .await?;

        for (source_key, session_date, status) in seed_sessions()? {
            self.insert_session(user_id, session_date, status, source_key)
                .await?;
        }

        Ok(user_id)
    }

    async fn insert_preference(
        &self,
        id: Uuid,
        user_id: Uuid,
        skin_tone: SkinTone,
        hair_color: HairColor,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(INSERT_PREFERENCE)
            .bind(id)
            .bind(user_id)
            .bind(skin_tone.code())
            .bind(hair_color.code())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn import_csv(&self, csv_path: &std::path::Path) -> anyhow::Result<usize> {
        #[derive(serde::Deserialize)]
        struct CsvRow {
            user_id: Uuid,
            session_date: NaiveDate,
            status: String,
            source_key: Option<String>,
        }

        let mut reader = csv::Reader::from_path(csv_path)
            .with_context(|| format!("failed to open {}", csv_path.display()))?;
        let mut inserted = 0usize;

        for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.with_context(|| format!("invalid session row {}", line + 1))?;
            let source_key = row
                .source_key
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

            if self
                .insert_session(row.user_id, row.session_date, row.status.trim(), &source_key)
                .await?
            {
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    async fn insert_session(
        &self,
        user_id: Uuid,
        session_date: NaiveDate,
        status: &str,
        source_key: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO ipl_tracker.treatment_sessions
            (id, user_id, session_date, status, source_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(session_date)
        .bind(status)
        .bind(source_key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn seed_sessions() -> anyhow::Result<Vec<(&'static str, NaiveDate, &'static str)>> {
    let sessions = vec![
        ("seed-001", (2026, 1, 5), "completed"),
        ("seed-002", (2026, 1, 19), "completed"),
        ("seed-003", (2026, 2, 2), "completed"),
        ("seed-004", (2026, 2, 16), "cancelled"),
        ("seed-005", (2026, 3, 2), "scheduled"),
    ];

    sessions
        .into_iter()
        .map(|(source_key, (year, month, day), status)| {
            let session_date = NaiveDate::from_ymd_opt(year, month, day).context("invalid date")?;
            Ok((source_key, session_date, status))
        })
        .collect()
}

/// Decodes one column; a value that does not fit the expected type is an
/// invalid record rather than a database fault.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|err| StoreError::invalid_record(name, err))
}

#[async_trait]
impl TreatmentStore for PgTreatmentStore {
    async fn latest_preference(&self, user_id: Uuid) -> Result<Option<PreferenceRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT skin_tone, hair_color, created_at
            FROM ipl_tracker.user_preferences
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(PreferenceRecord {
            skin_tone: column(&row, "skin_tone")?,
            hair_color: column(&row, "hair_color")?,
            created_at: column(&row, "created_at")?,
        }))
    }

    async fn completed_sessions(&self, user_id: Uuid) -> Result<Vec<CompletedSession>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT session_date, status
            FROM ipl_tracker.treatment_sessions
            WHERE user_id = $1 AND status = 'completed'
            ORDER BY session_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            let status: String = column(&row, "status")?;
            sessions.push(CompletedSession {
                date: column(&row, "session_date")?,
                status: SessionStatus::from_code(&status),
            });
        }

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_uses_fixed_keys() {
        assert!(Uuid::parse_str(SEED_USER_ID).is_ok());
        assert!(Uuid::parse_str(SEED_PREFERENCE_ID).is_ok());
        assert!(INSERT_PREFERENCE.contains("ON CONFLICT (id) DO NOTHING"));

        let first = seed_sessions().unwrap();
        let second = seed_sessions().unwrap();
        assert_eq!(first, second);

        let mut keys: Vec<&str> = first.iter().map(|(key, _, _)| *key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), first.len());
    }

    #[test]
    fn seed_history_has_three_completed_sessions() {
        let sessions = seed_sessions().unwrap();
        let completed = sessions
            .iter()
            .filter(|(_, _, status)| SessionStatus::from_code(status) == SessionStatus::Completed)
            .count();
        assert_eq!(completed, 3);
    }
}
