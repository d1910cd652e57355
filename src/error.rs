//! Crate-level error type.
//!
//! Each module keeps its own error enum; this rolls them up for callers
//! that drive more than one view.

use thiserror::Error;

use crate::api::ApiError;
use crate::cases::CaseStoreError;
use crate::config::ConfigError;
use crate::floor_plan::{AnnotatorError, CaseDetailError};
use crate::users::UserError;
use crate::validation::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("api: {0}")]
    Api(#[from] ApiError),

    #[error("cases: {0}")]
    Cases(#[from] CaseStoreError),

    #[error("floor plan: {0}")]
    Annotator(#[from] AnnotatorError),

    #[error("case detail: {0}")]
    CaseDetail(#[from] CaseDetailError),

    #[error("users: {0}")]
    Users(#[from] UserError),

    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
