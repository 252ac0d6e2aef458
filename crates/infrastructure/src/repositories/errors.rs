use callhome_domain::DomainError;
use sqlx::error::ErrorKind;
use tracing::error;

/// Classifies a failed write: values the schema refuses are `InvalidEvent`,
/// everything else is `SaveEvent`.
pub(crate) fn map_write_error(e: sqlx::Error, what: &str) -> DomainError {
    error!(error = %e, "Failed to {}", what);
    match &e {
        sqlx::Error::Database(db)
            if matches!(
                db.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) =>
        {
            DomainError::InvalidEvent(format!("{}: {}", what, e))
        }
        sqlx::Error::Encode(_) => DomainError::InvalidEvent(format!("{}: {}", what, e)),
        _ => DomainError::SaveEvent(format!("{}: {}", what, e)),
    }
}

pub(crate) fn map_read_error(e: sqlx::Error, what: &str) -> DomainError {
    error!(error = %e, "Failed to {}", what);
    match &e {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DomainError::InvalidEvent(format!("{}: {}", what, e))
        }
        _ => DomainError::DatabaseError(format!("{}: {}", what, e)),
    }
}
