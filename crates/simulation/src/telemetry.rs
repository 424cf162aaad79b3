//! Placement telemetry side-channel.
//!
//! Every successful build emits a [`PlacementEvent`]; a sink forwards the
//! record to the backend fire-and-forget. The sink never blocks and its
//! outcome never alters local state — it is a log line from the core's
//! perspective. The default sink writes to the application log; a real
//! transport plugs in via [`TelemetrySink`].

use bevy::prelude::*;

use crate::objects::ObjectKind;

/// The backend expects fixed placeholder coordinates with each record.
pub const PLACEHOLDER_POINT: (f32, f32) = (10.0, 30.0);

#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlacementEvent {
    pub place: &'static str,
    pub point: (f32, f32),
}

impl PlacementEvent {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            place: kind.label(),
            point: PLACEHOLDER_POINT,
        }
    }
}

pub trait TelemetrySink: Send + Sync + 'static {
    fn record(&self, user_id: &str, event: &PlacementEvent);
}

/// Default sink: the record goes to the log and nowhere else.
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn record(&self, user_id: &str, event: &PlacementEvent) {
        info!(
            "placement: user={} place={} point=({}, {})",
            user_id, event.place, event.point.0, event.point.1
        );
    }
}

#[derive(Resource)]
pub struct Telemetry {
    pub user_id: String,
    sink: Box<dyn TelemetrySink>,
}

impl Default for Telemetry {
    fn default() -> Self {
        let user_id =
            std::env::var("VILLAGECRAFT_USER_ID").unwrap_or_else(|_| "anonymous".to_string());
        Self {
            user_id,
            sink: Box::new(LogSink),
        }
    }
}

impl Telemetry {
    pub fn with_sink(user_id: impl Into<String>, sink: impl TelemetrySink) -> Self {
        Self {
            user_id: user_id.into(),
            sink: Box::new(sink),
        }
    }
}

/// Drain pending placement events into the sink.
pub fn forward_placements(telemetry: Res<Telemetry>, mut events: EventReader<PlacementEvent>) {
    for event in events.read() {
        telemetry.sink.record(&telemetry.user_id, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct CaptureSink(Arc<Mutex<Vec<(String, PlacementEvent)>>>);

    impl TelemetrySink for CaptureSink {
        fn record(&self, user_id: &str, event: &PlacementEvent) {
            self.0
                .lock()
                .unwrap()
                .push((user_id.to_string(), event.clone()));
        }
    }

    #[test]
    fn test_events_carry_placeholder_coordinates() {
        let event = PlacementEvent::new(ObjectKind::StreetLight);
        assert_eq!(event.place, "streetlight");
        assert_eq!(event.point, PLACEHOLDER_POINT);
    }

    #[test]
    fn test_sink_receives_forwarded_records() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let telemetry = Telemetry::with_sink("user-7", CaptureSink(captured.clone()));

        let mut app = App::new();
        app.add_event::<PlacementEvent>();
        app.insert_resource(telemetry);
        app.add_systems(Update, forward_placements);

        app.world_mut()
            .send_event(PlacementEvent::new(ObjectKind::House));
        app.update();

        let records = captured.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "user-7");
        assert_eq!(records[0].1.place, "house");
    }
}
