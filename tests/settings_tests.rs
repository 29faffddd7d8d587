use std::io::Write;

use submerge::settings::{init_settings, update_settings_from_content, Settings, SettingsError};
use tempfile::NamedTempFile;

#[cfg(test)]
mod settings_tests {
    use super::*;

    // Both cases touch the process-wide settings, so they run in one test.
    #[test]
    fn test_init_and_update_current_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  listen_port: 8081\n  max_concur_threads: 2\ndefaults:\n  emoji: false\n  dedupe: false"
        )
        .unwrap();

        let settings = init_settings(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.server.listen_port, 8081);
        assert_eq!(settings.server.max_concur_threads, 2);
        assert!(!settings.defaults.emoji);
        assert_eq!(Settings::current(), settings);

        // empty path keeps whatever is current
        assert_eq!(init_settings("").unwrap().server.listen_port, 8081);

        update_settings_from_content("[fetch]\ntimeout = 3\n").unwrap();
        let current = Settings::current();
        assert_eq!(current.fetch.timeout, 3);
        assert_eq!(current.server.listen_port, 25500);
        assert!(current.defaults.dedupe);

        assert!(update_settings_from_content("[fetch\ntimeout = ").is_err());
        assert_eq!(Settings::current().fetch.timeout, 3);
    }

    #[test]
    fn test_missing_file() {
        match Settings::load_from_file("/nonexistent/submerge.toml") {
            Err(SettingsError::Io { path, .. }) => assert_eq!(path, "/nonexistent/submerge.toml"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
