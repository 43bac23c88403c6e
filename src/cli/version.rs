//! Version display for the expo-chat CLI.

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line printed by `--version`.
pub fn version_line() -> String {
    format!("expo-chat {}", VERSION)
}

/// Print the version and exit.
///
/// This function never returns.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let line = version_line();
        assert!(line.starts_with("expo-chat "));
        assert!(line.ends_with(VERSION));
    }
}
