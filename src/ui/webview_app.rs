//! Native host window: one tao window holding the control WebView and one
//! child WebView per tab, driven by a `TabMultiplexer`.

use std::rc::Rc;

use tao::dpi::LogicalSize as WindowSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{info, warn};

use super::wry_surface::{UserEvent, WryControlSurface, WrySurfaceFactory};
use crate::command_handler::handle_message;
use crate::managers::tab_multiplexer::TabMultiplexer;
use crate::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use crate::session::HostSession;
use crate::types::errors::ShellError;
use crate::types::geometry::Size;
use crate::types::tab::SurfaceId;

const CONTROL_ID: SurfaceId = SurfaceId(0);

/// Open the host window and run the event loop until it is closed.
pub fn run() -> Result<(), ShellError> {
    let mut config = ConfigEngine::new(None);
    if let Err(e) = config.load() {
        warn!(error = %e, path = config.config_path(), "using default options");
    }
    let options = config.into_options();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Tabshell")
        .with_inner_size(WindowSize::new(options.width as f64, options.height as f64))
        .build(&event_loop)
        .map_err(|e| ShellError::SurfaceCreation(format!("host window: {}", e)))?;
    let window = Rc::new(window);

    let control = WryControlSurface::build(&window, CONTROL_ID, &options, proxy.clone())?;
    let factory = WrySurfaceFactory::new(
        Rc::clone(&window),
        proxy,
        options.popup_override.clone(),
        CONTROL_ID.0 + 1,
    );

    let mut session: HostSession<WrySurfaceFactory, WryControlSurface> = HostSession::new();
    session.create(move || Ok(TabMultiplexer::new(options, factory, control)))?;
    info!("host window open");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                session.destroy();
                info!("host window closed");
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical),
                ..
            } => {
                let logical = physical.to_logical::<u32>(window.scale_factor());
                if let Some(mux) = session.current_mut() {
                    mux.resize(Size::new(logical.width, logical.height));
                }
            }
            Event::UserEvent(UserEvent::Ipc { sender, body }) => {
                if let Some(mux) = session.current_mut() {
                    handle_message(mux, sender, &body);
                    mux.pump_surface_events();
                }
            }
            Event::UserEvent(UserEvent::SurfaceActivity) => {
                if let Some(mux) = session.current_mut() {
                    mux.pump_surface_events();
                }
            }
            _ => {}
        }
    })
}
