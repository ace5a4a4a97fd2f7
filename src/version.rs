// Version information for the Tote Vision node

/// Full version string
pub const VERSION: &str = "v1.0.0-2025-12-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2025-12-18";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Tote Vision Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
