use crate::app::config::AdbSettings;

/// Program name or path used to invoke adb. An empty or whitespace-only
/// configured path falls back to `"adb"` resolved via PATH; wrapping quotes
/// pasted from a shell are stripped.
pub fn adb_program(settings: &AdbSettings) -> String {
    let trimmed = settings.command_path.trim();
    let unquoted = strip_quotes(trimmed, '"')
        .or_else(|| strip_quotes(trimmed, '\''))
        .unwrap_or(trimmed)
        .trim();
    if unquoted.is_empty() {
        "adb".to_string()
    } else {
        unquoted.to_string()
    }
}

fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    value.strip_prefix(quote)?.strip_suffix(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(command_path: &str) -> AdbSettings {
        AdbSettings {
            command_path: command_path.to_string(),
        }
    }

    #[test]
    fn empty_path_defaults_to_adb() {
        assert_eq!(adb_program(&settings("")), "adb");
        assert_eq!(adb_program(&settings("   ")), "adb");
    }

    #[test]
    fn strips_wrapping_quotes() {
        assert_eq!(
            adb_program(&settings("  \"/opt/platform-tools/adb\"  ")),
            "/opt/platform-tools/adb"
        );
        assert_eq!(
            adb_program(&settings("'/opt/platform-tools/adb'")),
            "/opt/platform-tools/adb"
        );
    }

    #[test]
    fn keeps_plain_path() {
        assert_eq!(adb_program(&settings("/usr/bin/adb")), "/usr/bin/adb");
    }
}
