use std::io;

use thiserror::Error;

/// 文件读写相关错误；界面逻辑本身不会产生错误
#[derive(Debug, Error)]
pub enum ParishError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the user {0} directory")]
    NoDir(&'static str),
}

pub type Result<T> = std::result::Result<T, ParishError>;
