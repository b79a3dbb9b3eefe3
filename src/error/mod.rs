mod codes;

pub use codes::ExitCode;

use crate::batch::BatchError;
use crate::entry::FileRole;
use crate::renamelog::LogError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Rename log could not be read: {message}")]
    LogReadError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Rename log could not be written: {message}")]
    LogWriteError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Invalid rename of {role} {path}")]
    InvalidRename { role: FileRole, path: PathBuf },

    #[error("Rename failed: {from} -> {to}")]
    RenameError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rename of {path} was not committed")]
    NotCommitted { path: PathBuf, message: String },

    #[error("Rename log out of sync for {path}")]
    Unreconciled { path: PathBuf, detail: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::LogReadError { .. } => ExitCode::LogReadError,
            AppError::LogWriteError { .. } => ExitCode::LogWriteError,
            AppError::NotCommitted { .. } => ExitCode::LogWriteError,
            AppError::InvalidRename { .. } => ExitCode::GeneralError,
            AppError::RenameError { .. } => ExitCode::RenameError,
            AppError::Unreconciled { .. } => ExitCode::Unreconciled,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Attach the log file location to log errors that lack one
    pub fn with_log_path(self, log_path: PathBuf) -> Self {
        match self {
            AppError::LogReadError { path: None, message } => AppError::LogReadError {
                path: Some(log_path),
                message,
            },
            AppError::LogWriteError { path: None, message } => AppError::LogWriteError {
                path: Some(log_path),
                message,
            },
            other => other,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::LogReadError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Rename log error:\n  {}\n{}\n\
                     Earlier renames in this directory are unknown, so nothing was changed.\n\
                     Fix the log file, or discard it with --clear-history.",
                    message, path_info
                )
            }

            AppError::LogWriteError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Failed to write rename log:\n  {}\n{}\n\
                     Check that the directory is writable.",
                    message, path_info
                )
            }

            AppError::InvalidRename { role, path } => {
                format!(
                    "Refusing to record a rename of {} {} to itself.",
                    role,
                    path.display()
                )
            }

            AppError::RenameError { from, to, source } => {
                format!(
                    "Failed to rename file:\n\
                     From: {}\n\
                     To:   {}\n\
                     Error: {}\n\n\
                     Check file permissions and ensure no files are open.",
                    from.display(),
                    to.display(),
                    source
                )
            }

            AppError::NotCommitted { path, message } => {
                format!(
                    "The rename of {} could not be logged:\n  {}\n\n\
                     The file was moved back to its original name.",
                    path.display(),
                    message
                )
            }

            AppError::Unreconciled { path, detail } => {
                format!(
                    "The rename log and the files on disk no longer agree:\n  {}\n  {}\n\n\
                     Please check this file by hand before running again.",
                    path.display(),
                    detail
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<LogError> for AppError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::ReadError(message) | LogError::HistoryUnavailable(message) => {
                AppError::LogReadError {
                    path: None,
                    message,
                }
            }
            LogError::WriteError(message) => AppError::LogWriteError {
                path: None,
                message,
            },
            LogError::InvalidLogItem { role, path } => AppError::InvalidRename { role, path },
        }
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Log(e) => e.into(),
            BatchError::RenameError { from, to, source } => {
                AppError::RenameError { from, to, source }
            }
            BatchError::NotCommitted { path, source } => AppError::NotCommitted {
                path,
                message: source.to_string(),
            },
            BatchError::Unreconciled { path, detail } => AppError::Unreconciled { path, detail },
        }
    }
}
