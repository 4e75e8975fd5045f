//! Errors raised by the record store itself, independent of any record type.

/// Errors that can occur within the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Permission denied on {0}")]
    PermissionDenied(String),
    #[error("Record error: {0}")]
    RecordError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the record's own error type from a [`StoreError::RecordError`].
    ///
    /// Anything else (including a record error of another type) is handed back unchanged.
    pub fn into_record_error<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::RecordError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(StoreError::RecordError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn test_record_error_round_trips_through_store_error() {
        let wrapped = StoreError::RecordError(Box::new(OutOfStock));
        assert_eq!(wrapped.into_record_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn test_other_errors_are_handed_back() {
        let closed = StoreError::StoreClosed.into_record_error::<OutOfStock>();
        assert!(matches!(closed, Err(StoreError::StoreClosed)));

        let foreign = StoreError::RecordError(Box::new(std::fmt::Error));
        assert!(matches!(
            foreign.into_record_error::<OutOfStock>(),
            Err(StoreError::RecordError(_))
        ));
    }
}
