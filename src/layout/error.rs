use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("edge `{edge}` references unknown node `{node}`")]
    InvalidReference { edge: String, node: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("layout placer returned no coordinates for node `{node}`")]
    Unplaced { node: String },
}

impl LayoutError {
    pub(super) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
