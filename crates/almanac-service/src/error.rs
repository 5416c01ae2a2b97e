use thiserror::Error;

use almanac_core::types::CollectionKind;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] almanac_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),

    #[error("Nothing to merge: no {} given", .0.record_noun())]
    NothingToMerge(CollectionKind),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
