use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_timestamp, encode_timestamp, first_row, single_row, StorageResult};
use crate::domain::models::DomainStudent;
use crate::storage::connection::DbConnection;

/// Repository for student rows. Payments are loaded separately by PaymentRepository.
#[derive(Clone)]
pub struct StudentRepository {
    db: DbConnection,
}

impl StudentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a student and return it with its assigned id
    pub async fn create_student(
        &self,
        name: &str,
        phone: &str,
        now: DateTime<Utc>,
    ) -> StorageResult<DomainStudent> {
        let timestamp = encode_timestamp(&now);
        let rows = sqlx::query(
            r#"
            INSERT INTO students (name, phone, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, phone, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(&timestamp)
        .bind(&timestamp)
        .fetch_all(self.db.pool())
        .await?;
        let row = single_row(rows)?;

        Self::map_row(&row)
    }

    /// Get a student by ID, without payments
    pub async fn get_student(&self, student_id: i64) -> StorageResult<Option<DomainStudent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, phone, created_at, updated_at
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(student_id)
        .fetch_all(self.db.pool())
        .await?;
        let row = first_row(rows);

        row.as_ref().map(Self::map_row).transpose()
    }

    /// List all students ordered by id, without payments
    pub async fn list_students(&self) -> StorageResult<Vec<DomainStudent>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, phone, created_at, updated_at
            FROM students
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> StorageResult<DomainStudent> {
        Ok(DomainStudent {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            payments: Vec::new(),
            created_at: decode_timestamp(row.try_get("created_at")?)?,
            updated_at: decode_timestamp(row.try_get("updated_at")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> StudentRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        StudentRepository::new(db)
    }

    #[tokio::test]
    async fn test_create_and_get_student() {
        let repo = setup_test().await;
        let now = Utc::now();

        let created = repo
            .create_student("Ana Souza", "11 99999-0000", now)
            .await
            .expect("Failed to create student");
        assert!(created.id > 0);
        assert!(created.payments.is_empty());

        let fetched = repo
            .get_student(created.id)
            .await
            .expect("Failed to get student")
            .expect("Student should exist");
        assert_eq!(fetched.name, "Ana Souza");
        assert_eq!(fetched.phone, "11 99999-0000");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_missing_student() {
        let repo = setup_test().await;
        assert!(repo.get_student(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_students_in_id_order() {
        let repo = setup_test().await;
        let now = Utc::now();
        let first = repo.create_student("Zeca", "1", now).await.unwrap();
        let second = repo.create_student("Ana", "2", now).await.unwrap();

        let students = repo.list_students().await.unwrap();
        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
