/// Error code registry for reposync
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 4000-4999: Execution errors
/// - 6000-6999: Git errors
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_JSON: u16 = 1003;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_DUPLICATE_DIRECTORY: u16 = 1006;

    // Execution errors (4000-4999)
    pub const EXEC_GENERIC: u16 = 4000;
    pub const EXEC_COMMAND_NOT_FOUND: u16 = 4001;
    pub const EXEC_SPAWN_FAILED: u16 = 4006;

    // Git errors (6000-6999)
    pub const GIT_GENERIC: u16 = 6000;
    pub const GIT_NOT_REPO: u16 = 6001;
    pub const GIT_BRANCH_NOT_FOUND: u16 = 6002;
    pub const GIT_UNCOMMITTED: u16 = 6003;
    pub const GIT_COMMAND_FAILED: u16 = 6005;
    pub const GIT_REMOTE_NOT_FOUND: u16 = 6006;
    pub const GIT_AUTH_FAILED: u16 = 6007;
    pub const GIT_PUSH_REJECTED: u16 = 6008;
    pub const GIT_UNAVAILABLE: u16 = 6009;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_NOT_A_DIRECTORY: u16 = 7001;
    pub const VALIDATION_NOT_A_REPOSITORY: u16 = 7002;
    pub const VALIDATION_REMOTE_MISMATCH: u16 = 7003;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Human readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration or manifest file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Settings file is not valid TOML",
        ErrorCode::CONFIG_INVALID_JSON => "Manifest is not valid JSON",
        ErrorCode::CONFIG_MISSING_REQUIRED => "Required manifest field is missing",
        ErrorCode::CONFIG_INVALID_VALUE => "Configuration value is invalid",
        ErrorCode::CONFIG_DUPLICATE_DIRECTORY => "Two repositories share a checkout directory",

        ErrorCode::EXEC_GENERIC => "General execution error",
        ErrorCode::EXEC_COMMAND_NOT_FOUND => "Executable not found",
        ErrorCode::EXEC_SPAWN_FAILED => "Subprocess could not be started",

        ErrorCode::GIT_GENERIC => "General git error",
        ErrorCode::GIT_NOT_REPO => "Not a git repository",
        ErrorCode::GIT_BRANCH_NOT_FOUND => "Branch or revision not found",
        ErrorCode::GIT_UNCOMMITTED => "Uncommitted changes block the operation",
        ErrorCode::GIT_COMMAND_FAILED => "Git command failed",
        ErrorCode::GIT_REMOTE_NOT_FOUND => "Remote not found",
        ErrorCode::GIT_AUTH_FAILED => "Git authentication failed",
        ErrorCode::GIT_PUSH_REJECTED => "Push rejected by the remote",
        ErrorCode::GIT_UNAVAILABLE => "Git executable is not available",

        ErrorCode::VALIDATION_GENERIC => "General validation error",
        ErrorCode::VALIDATION_NOT_A_DIRECTORY => "Checkout path is not a directory",
        ErrorCode::VALIDATION_NOT_A_REPOSITORY => "Checkout path is not a git repository",
        ErrorCode::VALIDATION_REMOTE_MISMATCH => "Checkout remote does not match the manifest",

        ErrorCode::OTHER_GENERIC => "Unexpected error",
        _ => "Unknown error code",
    }
}
