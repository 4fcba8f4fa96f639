//! Constants for the Fuusor API

/// OAuth scope for dataset uploads.
pub const SCOPE_FILE_UPLOAD: &str = "fileupload";

/// OAuth scope for the user and user-group endpoints.
pub const SCOPE_USERS: &str = "users";

/// Grant type sent to the token endpoint.
pub const GRANT_TYPE_PASSWORD: &str = "password";

/// `filetype` marker the token endpoint expects alongside the password grant.
pub const TOKEN_FILETYPE: &str = "JsonTransformer";

/// Token endpoint.
pub const DEFAULT_URI_CONNECT: &str = "https://api.fuusor.fi/connect/token";

/// Base for the generic JSON endpoints (`User/...`, `UserGroup/...`).
pub const DEFAULT_URI_BASE: &str = "https://api.fuusor.fi/api/v1";

/// Dataset upload endpoint.
pub const DEFAULT_URI_DATASET: &str = "https://api.fuusor.fi/api/v1/dataset";

/// Legacy file upload endpoint.
pub const DEFAULT_URI_UPLOAD_FILE: &str = "https://api.fuusor.fi/api/v1/uploadfile";

/// Per-request timeout applied by the HTTP client, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
