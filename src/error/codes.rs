#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    GeneralError = 1,
    // 2 is clap's exit code for usage errors
    DirectoryNotFound = 3,
    PermissionError = 4,
    LogReadError = 5,
    LogWriteError = 6,
    RenameError = 7,
    Unreconciled = 8,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::GeneralError as i32, 1);
        assert_eq!(ExitCode::DirectoryNotFound as i32, 3);
        assert_eq!(ExitCode::PermissionError as i32, 4);
        assert_eq!(ExitCode::LogReadError as i32, 5);
        assert_eq!(ExitCode::LogWriteError as i32, 6);
        assert_eq!(ExitCode::RenameError as i32, 7);
        assert_eq!(ExitCode::Unreconciled as i32, 8);
    }

    #[test]
    fn test_exit_code_into_i32() {
        let code: i32 = ExitCode::LogReadError.into();
        assert_eq!(code, 5);
    }
}
