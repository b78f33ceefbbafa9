//! Tabshell: a multi-view browsing shell.
//!
//! Entry point: opens the host window with its control surface and tabs.
//! When built without the `gui` feature, runs a console demo against the
//! in-memory surface backend.

#[cfg(feature = "gui")]
fn main() {
    tabshell::logging::init("tabshell=info");
    if let Err(e) = tabshell::ui::webview_app::run() {
        tracing::error!(error = %e, "tabshell failed to start");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use tabshell::command_handler::handle_command;
    use tabshell::managers::tab_multiplexer::{TabMultiplexer, TabMultiplexerTrait};
    use tabshell::surface::memory::{MemoryControlSurface, MemorySurfaceFactory};
    use tabshell::types::message::ControlCommand;
    use tabshell::types::options::ShellOptions;
    use tabshell::types::tab::SurfaceId;

    tabshell::logging::init("tabshell=info");

    println!(
        "Tabshell v{} (demo mode, built without the `gui` feature)",
        env!("CARGO_PKG_VERSION")
    );
    println!("Use `tabshell-headless` to drive the shell over stdin/stdout.");
    println!();

    let options = ShellOptions {
        start_page: "https://example.com/".to_string(),
        blank_title: "New tab".to_string(),
        ..ShellOptions::default()
    };
    let control = MemoryControlSurface::new(SurfaceId(0));
    let mut mux = TabMultiplexer::new(options, MemorySurfaceFactory::new(1), control);
    let control_id = mux.control_id();

    let script = [
        ControlCommand::ControlReady,
        ControlCommand::NewTab {
            url: Some("https://www.rust-lang.org/".to_string()),
            options: None,
        },
        ControlCommand::UrlEnter {
            url: "https://docs.rs/".to_string(),
        },
        ControlCommand::Act {
            action: "goBack".to_string(),
        },
        ControlCommand::SwitchTab { tab_id: SurfaceId(1) },
        ControlCommand::CloseTab { tab_id: SurfaceId(1) },
    ];

    for command in script {
        let channel = command.channel();
        handle_command(&mut mux, control_id, command);
        mux.pump_surface_events();
        println!(
            "{:<12} active={:?} tabs={:?}",
            channel,
            mux.active_tab().map(|id| id.0),
            mux.tab_order().iter().map(|id| id.0).collect::<Vec<_>>()
        );
    }

    println!();
    match serde_json::to_string_pretty(&mux.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to render snapshot: {}", e),
    }
    mux.shutdown();
}
