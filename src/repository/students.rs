//! Students repository for database operations

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::student::{CreateStudent, Student, UpdateStudent},
};

#[derive(Clone)]
pub struct StudentsRepository {
    pool: DbPool,
}

impl StudentsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all students
    pub async fn list(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>("SELECT id, name, age FROM students ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT id, name, age FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Create a new student
    pub async fn create(&self, data: &CreateStudent) -> AppResult<Student> {
        let row = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, age) VALUES (?, ?) RETURNING id, name, age",
        )
        .bind(&data.name)
        .bind(data.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the provided fields of a student
    pub async fn update(&self, id: i64, data: &UpdateStudent) -> AppResult<Student> {
        let mut sets = Vec::new();

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ?", $name));
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.age, "age");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE students SET {} WHERE id = ? RETURNING id, name, age",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Student>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.age);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Delete a student; books they borrowed keep their borrower_id
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn repo_with_ana() -> (StudentsRepository, Student) {
        let repo = StudentsRepository::new(db::in_memory().await.unwrap());
        let ana = repo
            .create(&CreateStudent { name: "Ana".into(), age: 20 })
            .await
            .unwrap();
        (repo, ana)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (repo, ana) = repo_with_ana().await;

        let updated = repo
            .update(ana.id, &UpdateStudent { name: None, age: Some(21) })
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.age, 21);
    }

    #[tokio::test]
    async fn test_update_applies_zero_age() {
        let (repo, ana) = repo_with_ana().await;

        let updated = repo
            .update(ana.id, &UpdateStudent { name: Some("Ana Maria".into()), age: Some(0) })
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.age, 0);
    }

    #[tokio::test]
    async fn test_empty_update_of_missing_student_is_not_found() {
        let (repo, _) = repo_with_ana().await;

        let err = repo.update(99, &UpdateStudent::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo
            .update(99, &UpdateStudent { name: None, age: Some(3) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_student_is_not_found() {
        let (repo, ana) = repo_with_ana().await;

        repo.delete(ana.id).await.unwrap();
        assert!(matches!(repo.delete(ana.id).await, Err(AppError::NotFound(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }
}
