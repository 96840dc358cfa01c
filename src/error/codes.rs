/// Error code registry for logsweep
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Input file errors
/// - 4000-4999: Log line parse errors
/// - 5000-5999: Chart errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1008;
    pub const CONFIG_MISSING_CREDENTIALS: u16 = 1010;

    // Input errors (3000-3999)
    pub const INPUT_NOT_FOUND: u16 = 3001;
    pub const INPUT_PERMISSION_DENIED: u16 = 3002;
    pub const INPUT_READ_FAILED: u16 = 3003;

    // Parse errors (4000-4999)
    pub const PARSE_NO_GET_REQUEST: u16 = 4001;
    pub const PARSE_MISSING_SEPARATOR: u16 = 4002;
    pub const PARSE_TRUNCATED_TIMESTAMP: u16 = 4003;
    pub const PARSE_INVALID_TIME: u16 = 4004;
    pub const PARSE_INVALID_RESPONSE_TIME: u16 = 4005;

    // Chart errors (5000-5999)
    pub const CHART_GENERIC: u16 = 5000;
    pub const CHART_NETWORK: u16 = 5001;
    pub const CHART_REJECTED: u16 = 5002;
    pub const CHART_WRITE_FAILED: u16 = 5003;

    // Other errors (9000-9999)
    pub const OTHER_UNEXPECTED: u16 = 9001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1004 => "Required configuration field is missing",
        1005 => "Invalid value in configuration",
        1008 => "Configuration validation failed",
        1010 => "Chart credentials are missing",

        // Input errors
        3001 => "Input file not found",
        3002 => "Input file permission denied",
        3003 => "Failed to read input file",

        // Parse errors
        4001 => "Line is not a GET request with a response time",
        4002 => "Line has no ' - - ' separator before the timestamp",
        4003 => "Bracketed timestamp is too short",
        4004 => "Time of day is not hh:mm:ss",
        4005 => "Response time is not a number",

        // Chart errors
        5000 => "Generic chart error",
        5001 => "Chart service unreachable",
        5002 => "Chart service rejected the figure",
        5003 => "Failed to write chart figure",

        // Other errors
        9001 => "Unexpected error",

        _ => "Unknown error code",
    }
}
