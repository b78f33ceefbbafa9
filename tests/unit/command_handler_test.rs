//! Tests for control-channel dispatch: sender validation, wire parsing, and
//! the end-to-end command scenarios.

use tabshell::command_handler::{handle_command, handle_message};
use tabshell::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
use tabshell::surface::memory::{MemoryControlSurface, MemorySurfaceFactory};
use tabshell::types::message::{ControlCommand, ShellMessage};
use tabshell::types::options::ShellOptions;
use tabshell::types::tab::SurfaceId;

type Mux = TabMultiplexer<MemorySurfaceFactory, MemoryControlSurface>;

const CONTROL: SurfaceId = SurfaceId(0);
const START: &str = "https://start.test/";

fn ready_shell() -> (Mux, MemoryControlSurface) {
    let options = ShellOptions {
        start_page: START.to_string(),
        ..ShellOptions::default()
    };
    let control = MemoryControlSurface::new(CONTROL);
    let outbox = control.clone();
    let mut mux = TabMultiplexer::new(options, MemorySurfaceFactory::new(1), control);
    assert!(handle_message(&mut mux, CONTROL, r#"{"kind":"control-ready"}"#));
    mux.pump_surface_events();
    (mux, outbox)
}

fn send(mux: &mut Mux, body: &str) -> bool {
    let handled = handle_message(mux, CONTROL, body);
    mux.pump_surface_events();
    handled
}

#[test]
fn test_new_tab_scenario() {
    let (mut mux, outbox) = ready_shell();
    assert_eq!(mux.surface(SurfaceId(1)).unwrap().history(), [START]);
    outbox.clear();

    assert!(send(
        &mut mux,
        r#"{"kind":"new-tab","payload":{"url":"https://example.com"}}"#
    ));

    assert_eq!(mux.tab_count(), 2);
    let new_id = mux.active_tab().unwrap();
    assert_ne!(new_id, SurfaceId(1));

    let sent = outbox.sent();
    let first_tabs = sent.iter().find_map(|m| match m {
        ShellMessage::TabsUpdate(s) => Some(s.tabs.clone()),
        _ => None,
    });
    assert_eq!(first_tabs, Some(vec![SurfaceId(1), new_id]));
    assert!(sent.contains(&ShellMessage::ActiveUpdate(new_id)));
}

#[test]
fn test_close_tab_scenario() {
    let (mut mux, _) = ready_shell();
    send(&mut mux, r#"{"kind":"new-tab","payload":{}}"#);
    send(&mut mux, r#"{"kind":"new-tab","payload":{}}"#);
    send(&mut mux, r#"{"kind":"switch-tab","payload":{"tabId":1}}"#);
    assert_eq!(mux.tab_order(), [SurfaceId(1), SurfaceId(2), SurfaceId(3)]);
    assert_eq!(mux.active_tab(), Some(SurfaceId(1)));

    send(&mut mux, r#"{"kind":"close-tab","payload":{"tabId":1}}"#);

    assert_eq!(mux.active_tab(), Some(SurfaceId(2)));
    assert_eq!(mux.tab_order(), [SurfaceId(2), SurfaceId(3)]);
}

#[test]
fn test_command_from_unregistered_sender_is_dropped() {
    let (mut mux, outbox) = ready_shell();
    outbox.clear();

    let handled = handle_command(
        &mut mux,
        SurfaceId(1),
        ControlCommand::NewTab {
            url: Some("https://evil.test/".to_string()),
            options: None,
        },
    );

    assert!(!handled);
    assert_eq!(mux.tab_count(), 1);
    assert!(outbox.sent().is_empty());
}

#[test]
fn test_repeated_control_ready_keeps_single_tab() {
    let (mut mux, _) = ready_shell();
    send(&mut mux, r#"{"kind":"control-ready"}"#);
    send(&mut mux, r#"{"kind":"control-ready"}"#);
    assert_eq!(mux.tab_count(), 1);
}

#[test]
fn test_url_change_edits_metadata_without_navigating() {
    let (mut mux, _) = ready_shell();
    send(&mut mux, r#"{"kind":"url-change","payload":{"url":"https://typing.te"}}"#);

    let active = mux.active_tab().unwrap();
    assert_eq!(
        mux.metadata(active).unwrap().url.as_deref(),
        Some("https://typing.te")
    );
    assert_eq!(mux.surface(active).unwrap().history(), [START]);
}

#[test]
fn test_url_enter_navigates_active_tab() {
    let (mut mux, _) = ready_shell();
    send(&mut mux, r#"{"kind":"url-enter","payload":{"url":"https://docs.rs/"}}"#);

    let active = mux.active_tab().unwrap();
    assert_eq!(mux.surface(active).unwrap().history(), [START, "https://docs.rs/"]);
    assert_eq!(mux.metadata(active).unwrap().can_go_back, Some(true));
}

#[test]
fn test_act_commands() {
    let (mut mux, _) = ready_shell();
    send(&mut mux, r#"{"kind":"url-enter","payload":{"url":"https://b.test/"}}"#);
    send(&mut mux, r#"{"kind":"act","payload":{"action":"goBack"}}"#);
    let active = mux.active_tab().unwrap();
    assert_eq!(mux.metadata(active).unwrap().url.as_deref(), Some(START));

    send(&mut mux, r#"{"kind":"act","payload":{"action":"goForward"}}"#);
    assert_eq!(
        mux.metadata(active).unwrap().url.as_deref(),
        Some("https://b.test/")
    );

    // Unknown actions are accepted on the wire and ignored by the multiplexer.
    assert!(send(&mut mux, r#"{"kind":"act","payload":{"action":"teleport"}}"#));
    assert_eq!(mux.tab_count(), 1);
}

#[test]
fn test_new_tab_with_surface_options() {
    let (mut mux, _) = ready_shell();
    send(
        &mut mux,
        r#"{"kind":"new-tab","payload":{"options":{"userAgent":"Agent/2"}}}"#,
    );
    let active = mux.active_tab().unwrap();
    let surface = mux.surface(active).unwrap();
    assert_eq!(surface.options().user_agent.as_deref(), Some("Agent/2"));
    assert_eq!(surface.history(), ["about:blank"]);
}

#[test]
fn test_malformed_messages_are_dropped() {
    let (mut mux, outbox) = ready_shell();
    outbox.clear();

    assert!(!send(&mut mux, "not json"));
    assert!(!send(&mut mux, r#"{"kind":"self-destruct"}"#));
    assert!(!send(&mut mux, r#"{"kind":"switch-tab","payload":{"tabId":"one"}}"#));

    assert_eq!(mux.tab_count(), 1);
    assert!(outbox.sent().is_empty());
}

#[test]
fn test_commands_after_shutdown_are_dropped() {
    let (mut mux, _) = ready_shell();
    mux.shutdown();
    assert!(!send(&mut mux, r#"{"kind":"new-tab","payload":{}}"#));
    assert_eq!(mux.tab_count(), 0);
}
