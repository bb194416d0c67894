use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::SqlitePool;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

pub async fn get_questions_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
SELECT COUNT(*) FROM questions
        "#,
    )
    .fetch_one(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    sqlx::query(
        r#"
DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

// SQLite LIKE is case-insensitive for ASCII; an empty term matches every row.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE question LIKE '%' || ?1 || '%'
ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Picks a random question outside the exclusion list, optionally limited to
/// one category. The exclusion list is bound as a JSON array so the statement
/// stays static.
pub async fn next_quiz_question(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    let exclude = format!(
        "[{}]",
        exclude
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE (?1 IS NULL OR category = ?1)
  AND id NOT IN (SELECT value FROM json_each(?2))
ORDER BY RANDOM()
LIMIT 1
        "#,
    )
    .bind(category)
    .bind(exclude)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::categories::create_category;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let pool = test_pool().await;
        create_question(&pool, "What planet is red?", "Mars", None, Some(1))
            .await
            .unwrap();
        create_question(&pool, "Who painted the Mona Lisa?", "Da Vinci", None, Some(2))
            .await
            .unwrap();

        let hits = search_questions(&pool, "PLANET").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].answer, "Mars");

        let all = search_questions(&pool, "").await.unwrap();
        assert_eq!(all.len(), 2);

        let none = search_questions(&pool, "volcano").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn quiz_pick_respects_category_and_exclusions() {
        let pool = test_pool().await;
        let science = create_category(&pool, "Science").await.unwrap();
        let history = create_category(&pool, "History").await.unwrap();
        let q1 = create_question(&pool, "Symbol for gold?", "Au", Some(science), Some(1))
            .await
            .unwrap();
        let q2 = create_question(&pool, "Speed of light?", "c", Some(science), Some(3))
            .await
            .unwrap();
        create_question(&pool, "First Roman emperor?", "Augustus", Some(history), Some(2))
            .await
            .unwrap();

        let picked = next_quiz_question(&pool, Some(science), &[q1])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(picked.id, q2);

        let exhausted = next_quiz_question(&pool, Some(science), &[q1, q2])
            .await
            .unwrap();
        assert!(exhausted.is_none());

        let any = next_quiz_question(&pool, None, &[]).await.unwrap().unwrap();
        assert!([science, history].contains(&any.category.unwrap()));
    }

    #[tokio::test]
    async fn pages_slice_in_id_order() {
        let pool = test_pool().await;
        for n in 0..12 {
            create_question(&pool, &format!("Question {n}?"), "Answer", None, None)
                .await
                .unwrap();
        }

        let first = get_questions_page(&pool, 10, 0).await.unwrap();
        assert_eq!(first.len(), 10);
        assert!(first.windows(2).all(|w| w[0].id < w[1].id));

        let second = get_questions_page(&pool, 10, 10).await.unwrap();
        assert_eq!(second.len(), 2);

        let beyond = get_questions_page(&pool, 10, 100).await.unwrap();
        assert!(beyond.is_empty());

        assert_eq!(count_questions(&pool).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = test_pool().await;
        let id = create_question(&pool, "Ephemeral?", "Yes", None, None)
            .await
            .unwrap();
        assert!(get_question_by_id(&pool, id).await.unwrap().is_some());

        delete_question(&pool, id).await.unwrap();
        assert!(get_question_by_id(&pool, id).await.unwrap().is_none());
    }
}
