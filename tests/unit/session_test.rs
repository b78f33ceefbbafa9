use tabshell::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
use tabshell::session::HostSession;
use tabshell::surface::memory::{MemoryControlSurface, MemorySurfaceFactory};
use tabshell::types::errors::ShellError;
use tabshell::types::options::ShellOptions;
use tabshell::types::tab::SurfaceId;

type Session = HostSession<MemorySurfaceFactory, MemoryControlSurface>;

type Mux = TabMultiplexer<MemorySurfaceFactory, MemoryControlSurface>;

fn build(control: MemoryControlSurface) -> Result<Mux, ShellError> {
    Ok(TabMultiplexer::new(
        ShellOptions::default(),
        MemorySurfaceFactory::new(1),
        control,
    ))
}

#[test]
fn test_new_session_is_empty() {
    let session = Session::new();
    assert!(!session.is_open());
    assert!(session.current().is_none());
}

#[test]
fn test_create_opens_once() {
    let mut session = Session::default();
    session
        .create(|| build(MemoryControlSurface::new(SurfaceId(0))))
        .unwrap()
        .control_ready();
    assert_eq!(session.current().unwrap().tab_count(), 1);

    // A second activation reuses the open window instead of building another.
    let mux = session
        .create(|| panic!("window already open, builder must not run"))
        .unwrap();
    assert_eq!(mux.tab_count(), 1);
}

#[test]
fn test_build_failure_leaves_session_closed() {
    let mut session = Session::new();
    let result = session.create(|| Err(ShellError::SurfaceCreation("no display".to_string())));
    assert!(matches!(result, Err(ShellError::SurfaceCreation(_))));
    assert!(!session.is_open());
}

#[test]
fn test_destroy_shuts_down_and_allows_recreate() {
    let mut session = Session::new();
    let control = MemoryControlSurface::new(SurfaceId(0));
    let outbox = control.clone();
    session.create(|| build(control)).unwrap().control_ready();
    outbox.clear();

    assert!(session.destroy());
    assert!(!session.is_open());
    assert!(!session.destroy());
    assert!(outbox.sent().is_empty());

    session
        .create(|| build(MemoryControlSurface::new(SurfaceId(0))))
        .unwrap();
    assert!(session.is_open());
    assert_eq!(session.current_mut().unwrap().tab_count(), 0);
}
