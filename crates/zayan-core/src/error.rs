use std::fmt;

/// Machine-readable error codes surfaced by the CLI in JSON mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidCredentials,
    ConfigReadError,
    ConfigParseError,
    EmptyTitle,
    EmptyMessage,
    UnknownAgent,
    InvalidEnumValue,
    TerminalUnavailable,
}

impl ErrorCode {
    pub const ALL: [Self; 8] = [
        Self::InvalidCredentials,
        Self::ConfigReadError,
        Self::ConfigParseError,
        Self::EmptyTitle,
        Self::EmptyMessage,
        Self::UnknownAgent,
        Self::InvalidEnumValue,
        Self::TerminalUnavailable,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E1001",
            Self::ConfigReadError => "E1002",
            Self::ConfigParseError => "E1003",
            Self::EmptyTitle => "E2001",
            Self::EmptyMessage => "E2002",
            Self::UnknownAgent => "E2003",
            Self::InvalidEnumValue => "E2004",
            Self::TerminalUnavailable => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials",
            Self::ConfigReadError => "Config file could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyTitle => "Task title is empty",
            Self::EmptyMessage => "Chat message is empty",
            Self::UnknownAgent => "Agent not found",
            Self::InvalidEnumValue => "Invalid enum value",
            Self::TerminalUnavailable => "Terminal unavailable",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidCredentials => Some("Check the username and password, then retry."),
            Self::ConfigReadError => Some("Check the path given by --config or ZAYAN_HQ_CONFIG."),
            Self::ConfigParseError => Some("Fix the TOML syntax in the config file and retry."),
            Self::EmptyTitle => Some("Give the task a non-blank title."),
            Self::EmptyMessage => Some("Type a message before sending."),
            Self::UnknownAgent => Some("Run `zhq agents` to list valid agent ids."),
            Self::InvalidEnumValue => Some("Run the command with --help to list accepted values."),
            Self::TerminalUnavailable => Some("Run `zhq ui` from an interactive terminal."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
