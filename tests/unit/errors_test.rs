use tabshell::types::errors::*;

// === ShellError Tests ===

#[test]
fn shell_error_surface_creation_display() {
    let err = ShellError::SurfaceCreation("out of handles".to_string());
    assert_eq!(err.to_string(), "Surface creation failed: out of handles");
}

#[test]
fn shell_error_closed_display() {
    assert_eq!(ShellError::Closed.to_string(), "Host window is closed");
}

#[test]
fn shell_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ShellError::Closed);
    assert!(err.source().is_none());
}

#[test]
fn shell_error_variants_are_all_raised_by_the_core() {
    // Exhaustive: a new variant must come with a caller that returns it.
    fn origin(err: &ShellError) -> &'static str {
        match err {
            ShellError::SurfaceCreation(_) => "surface factory",
            ShellError::Closed => "create_tab after shutdown",
        }
    }
    assert_eq!(origin(&ShellError::Closed), "create_tab after shutdown");
    assert_eq!(
        origin(&ShellError::SurfaceCreation(String::new())),
        "surface factory"
    );
}

// === ConfigError Tests ===

#[test]
fn config_error_display_variants() {
    assert_eq!(
        ConfigError::Io("disk full".to_string()).to_string(),
        "Config I/O error: disk full"
    );
    assert_eq!(
        ConfigError::Serialization("trailing comma".to_string()).to_string(),
        "Config serialization error: trailing comma"
    );
    assert_eq!(
        ConfigError::InvalidKey("nope".to_string()).to_string(),
        "Invalid config key: nope"
    );
    assert_eq!(
        ConfigError::InvalidValue("width".to_string()).to_string(),
        "Invalid config value: width"
    );
}
