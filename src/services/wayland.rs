// Author: Dustin Pilgrim
// License: MIT

use tokio::task::JoinHandle;

use wayland_client::{
    Connection, Dispatch, QueueHandle,
    protocol::{wl_registry, wl_seat::WlSeat},
};
use wayland_protocols::ext::idle_notify::v1::client::{
    ext_idle_notification_v1::{Event as IdleEvent, ExtIdleNotificationV1},
    ext_idle_notifier_v1::ExtIdleNotifierV1,
};

use crate::core::{
    collab::{InputEmitter, InputSource},
    events::InputKind,
};
use crate::{sdebug, sinfo, swarn};

// Short enough that any pause in typing or pointer motion yields a fresh Resumed.
const SEAT_IDLE_THRESHOLD_MS: u32 = 250;

#[derive(Debug)]
pub enum WaylandError {
    Connect(String),
    Roundtrip(String),
    Unsupported,
}

impl std::fmt::Display for WaylandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaylandError::Connect(s) => write!(f, "wayland connect failed: {s}"),
            WaylandError::Roundtrip(s) => write!(f, "wayland roundtrip failed: {s}"),
            WaylandError::Unsupported => {
                write!(f, "ext_idle_notifier_v1 or wl_seat missing")
            }
        }
    }
}

impl std::error::Error for WaylandError {}

struct WaylandState {
    emitter: InputEmitter,

    idle_notifier: Option<ExtIdleNotifierV1>,
    seat: Option<WlSeat>,
    notification: Option<ExtIdleNotificationV1>,
}

impl WaylandState {
    fn new(emitter: InputEmitter) -> Self {
        Self {
            emitter,
            idle_notifier: None,
            seat: None,
            notification: None,
        }
    }
}

// ---------------- Registry binding ----------------

impl Dispatch<wl_registry::WlRegistry, ()> for WaylandState {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_registry::Event::Global { name, interface, .. } = event {
            match interface.as_str() {
                "ext_idle_notifier_v1" => {
                    state.idle_notifier =
                        Some(registry.bind::<ExtIdleNotifierV1, _, _>(name, 1, qh, ()));
                }
                "wl_seat" if state.seat.is_none() => {
                    state.seat = Some(registry.bind::<WlSeat, _, _>(name, 1, qh, ()));
                }
                _ => {}
            }
        }
    }
}

impl Dispatch<ExtIdleNotifierV1, ()> for WaylandState {
    fn event(
        _: &mut Self,
        _: &ExtIdleNotifierV1,
        _: <ExtIdleNotifierV1 as wayland_client::Proxy>::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        // no-op
    }
}

impl Dispatch<WlSeat, ()> for WaylandState {
    fn event(
        _: &mut Self,
        _: &WlSeat,
        _: wayland_client::protocol::wl_seat::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        // no-op
    }
}

// ---------------- Idle notifications ----------------

impl Dispatch<ExtIdleNotificationV1, ()> for WaylandState {
    fn event(
        state: &mut Self,
        _: &ExtIdleNotificationV1,
        event: IdleEvent,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        // Resumed is the compositor telling us the seat saw pointer or key input.
        if let IdleEvent::Resumed = event {
            state.emitter.emit(InputKind::Seat);
        }
    }
}

/// Seat activity reported by the compositor through `ext_idle_notifier_v1`.
#[derive(Debug, Default, Clone)]
pub struct WaylandInput;

impl InputSource for WaylandInput {
    fn subscribe(&self, emitter: InputEmitter) -> Option<JoinHandle<()>> {
        // Detached thread: blocking_dispatch ignores task abort.
        let spawned = std::thread::Builder::new()
            .name("tally-wayland".to_string())
            .spawn(move || {
                if let Err(e) = run_wayland(emitter) {
                    swarn!("Tally", "wayland: {}; seat activity disabled", e);
                }
            });

        if let Err(e) = spawned {
            swarn!("Tally", "wayland: failed to spawn listener: {}", e);
        }
        None
    }
}

/// Blocking dispatch loop. Returns on the first event after the subscription is dropped.
fn run_wayland(emitter: InputEmitter) -> Result<(), WaylandError> {
    let conn = Connection::connect_to_env().map_err(|e| WaylandError::Connect(e.to_string()))?;
    let mut event_queue = conn.new_event_queue();
    let qh = event_queue.handle();
    let display = conn.display();

    let mut state = WaylandState::new(emitter);

    let _registry = display.get_registry(&qh, ());
    event_queue
        .roundtrip(&mut state)
        .map_err(|e| WaylandError::Roundtrip(e.to_string()))?;

    let (Some(notifier), Some(seat)) = (&state.idle_notifier, &state.seat) else {
        return Err(WaylandError::Unsupported);
    };

    let notification = notifier.get_idle_notification(SEAT_IDLE_THRESHOLD_MS, seat, &qh, ());
    state.notification = Some(notification);
    sinfo!(
        "Tally",
        "wayland: seat activity listener active (threshold={}ms)",
        SEAT_IDLE_THRESHOLD_MS
    );

    while state.emitter.is_live() {
        if let Err(e) = event_queue.blocking_dispatch(&mut state) {
            swarn!("Tally", "wayland: dispatch error: {}", e);
            break;
        }
    }

    if let Some(n) = state.notification.take() {
        n.destroy();
    }
    let _ = conn.flush();

    sdebug!("Tally", "wayland: listener stopped");
    Ok(())
}
