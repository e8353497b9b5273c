//! CLI errors

use medboard_lib::error::Error;
use medboard_lib::error::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Medboard(#[from] Error),

    #[error("no API URL; pass --api-url or set MEDBOARD_API_URL")]
    MissingApiUrl,

    #[error("login needs --token or MEDBOARD_TOKEN")]
    MissingToken,

    #[error("not signed in; run `medboard login --token TOKEN` or pass --token")]
    NotSignedIn,

    #[error("aborted")]
    Aborted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::Medboard(Error::Table(e))
    }
}
