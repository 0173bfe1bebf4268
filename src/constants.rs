//! Centralized constants for file names, permissions, and limits.

/// Project configuration file name.
pub const CONFIG_FILE_NAME: &str = "credfile.toml";

/// Ignore-list file consulted by `doctor` and updated by `init`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Default plain-text secret file, relative to the project root.
pub const DEFAULT_SECRET_FILE: &str = "api_key.txt";

/// Default YAML credential file, relative to the project root.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.yml";

/// Env var overriding the project root.
pub const ROOT_ENV_VAR: &str = "CREDFILE_ROOT";

/// Env var holding the log filter directive.
pub const LOG_ENV_VAR: &str = "CREDFILE_LOG";

/// Most permissive mode accepted for secret files by default.
pub const DEFAULT_MAX_FILE_MODE: u32 = 0o600;

/// Permission mode for files created by `init`.
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Maximum secret file size in bytes (1 MiB).
pub const MAX_SECRET_SIZE: u64 = 1_048_576;

/// Number of hex characters shown for a secret fingerprint.
pub const FINGERPRINT_LEN: usize = 12;
