use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_FAVORITES_COUNT_CHECK: &str = "articles_favorites_count_check";
const CNT_FAVORITE_MARK: &str = "favorite_marks_pkey";
const CNT_ARTICLE_TAGS_ARTICLE: &str = "article_tags_article_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => {
                        DomainError::ConstraintViolation("slug already exists".into())
                    }
                    CNT_FAVORITE_MARK => {
                        DomainError::ConstraintViolation("article already favorited".into())
                    }
                    CNT_FAVORITES_COUNT_CHECK => DomainError::ConstraintViolation(
                        "favorites count cannot be negative".into(),
                    ),
                    CNT_ARTICLE_TAGS_ARTICLE => DomainError::NotFound("article not found".into()),
                    other => DomainError::ConstraintViolation(format!(
                        "database constraint violation: {other}"
                    )),
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::ConstraintViolation(
                            "unique constraint violated".into(),
                        );
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    // serialization_failure, deadlock_detected
                    "40001" | "40P01" => {
                        return DomainError::Aborted(db_err.message().to_string());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
