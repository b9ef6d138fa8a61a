//! Text command protocol between the viewer frontend and the pick core.
//!
//! Each connection owns one viewport and at most one active pick session.
//! The session holds a handle to the connection's viewport, so a connection
//! closed mid-pick still leaves the viewport released.
//! Frames are `COMMAND` or `COMMAND:{json}`; every handled frame yields the
//! replies to send back, in order.

use primitive_core::construct::{ConstructionError, PickedPoint, SurfaceLocation, ThreePointCircle};
use primitive_core::geometry::{derive_placement, Frame, Point3, Vector3};
use primitive_core::pick::{PickError, PickEvent, PickPhase, PickSession, PickStatus, SceneViewport, SharedViewport};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::script::{axis_angle_placement_expr, circle_command, placement_expr, UniqueNames};

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

fn construction_error(err: &ConstructionError) -> String {
    format_error(&format!("{:?}", err.kind), err.message, "error")
}

type ConnectionViewport = SharedViewport<SceneViewport>;

enum ActivePick {
    Circle(PickSession<ConnectionViewport, ThreePointCircle>),
    Location(PickSession<ConnectionViewport, SurfaceLocation>),
}

impl ActivePick {
    fn phase(&self) -> PickPhase {
        match self {
            ActivePick::Circle(s) => s.phase(),
            ActivePick::Location(s) => s.phase(),
        }
    }

    fn progress(&self) -> (usize, usize) {
        match self {
            ActivePick::Circle(s) => (s.points().len(), s.required()),
            ActivePick::Location(s) => (s.points().len(), s.required()),
        }
    }
}

#[derive(Deserialize)]
struct PointCmd {
    point: [f64; 3],
    normal: Option<[f64; 3]>,
}

#[derive(Deserialize)]
struct LocationCmd {
    #[serde(default)]
    angle: f64,
}

#[derive(Deserialize)]
struct FrameCmd {
    origin: [f64; 3],
    primary: [f64; 3],
    secondary: [f64; 3],
}

pub struct ConnectionState {
    viewport: ConnectionViewport,
    active: Option<ActivePick>,
    names: UniqueNames,
    decimals: usize,
}

impl ConnectionState {
    pub fn new(decimals: usize) -> Self {
        Self {
            viewport: SharedViewport::new(SceneViewport::new()),
            active: None,
            names: UniqueNames::new(),
            decimals,
        }
    }

    #[cfg(test)]
    pub fn viewport(&self) -> std::sync::RwLockReadGuard<'_, SceneViewport> {
        self.viewport.read()
    }

    pub fn is_picking(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.phase() == PickPhase::Picking)
    }

    pub fn handle_message(&mut self, text: &str) -> Vec<String> {
        let (command, payload) = match text.split_once(':') {
            Some((command, payload)) => (command, payload),
            None => (text, ""),
        };

        match command {
            "PICK_CIRCLE" => self.start(ActivePick::Circle(PickSession::new(self.viewport.clone(), ThreePointCircle))),
            "PICK_LOCATION" => {
                let angle = if payload.is_empty() {
                    0.0
                } else {
                    match serde_json::from_str::<LocationCmd>(payload) {
                        Ok(cmd) => cmd.angle,
                        Err(e) => {
                            warn!("Failed to parse PICK_LOCATION command: {}", e);
                            return vec![format_error("BAD_COMMAND", &e.to_string(), "warning")];
                        }
                    }
                };
                self.start(ActivePick::Location(PickSession::new(self.viewport.clone(), SurfaceLocation::new(angle))))
            }
            "PICK_POINT" => match serde_json::from_str::<PointCmd>(payload) {
                Ok(cmd) => {
                    let point = Point3::from(cmd.point);
                    let hit = match cmd.normal {
                        Some(n) => PickedPoint::with_normal(point, Vector3::from(n)),
                        None => PickedPoint::new(point),
                    };
                    self.feed(PickEvent::Primary { hit: Some(hit) })
                }
                Err(e) => {
                    warn!("Failed to parse PICK_POINT command: {}", e);
                    vec![format_error("BAD_COMMAND", &e.to_string(), "warning")]
                }
            },
            "PICK_MISS" => self.feed(PickEvent::Primary { hit: None }),
            "PICK_CANCEL" => self.feed(PickEvent::Secondary),
            "PLACEMENT" => match serde_json::from_str::<FrameCmd>(payload) {
                Ok(cmd) => self.placement(cmd),
                Err(e) => {
                    warn!("Failed to parse PLACEMENT command: {}", e);
                    vec![format_error("BAD_COMMAND", &e.to_string(), "warning")]
                }
            },
            _ => {
                warn!("Unknown command: {}", command);
                vec![format_error("UNKNOWN_COMMAND", command, "warning")]
            }
        }
    }

    fn pick_state(&self) -> String {
        let (phase, collected, required) = match &self.active {
            Some(active) => {
                let (collected, required) = active.progress();
                (active.phase(), collected, required)
            }
            None => (PickPhase::Idle, 0, 0),
        };
        format!("PICK_STATE:{}", json!({
            "phase": phase,
            "collected": collected,
            "required": required
        }))
    }

    fn start(&mut self, mut pick: ActivePick) -> Vec<String> {
        let begun = match &mut pick {
            ActivePick::Circle(s) => s.begin(),
            ActivePick::Location(s) => s.begin(),
        };
        match begun {
            Ok(()) => {
                info!("Pick session started");
                self.active = Some(pick);
                vec![self.pick_state()]
            }
            Err(PickError::SessionActive) => {
                vec![format_error("PICK_BUSY", &PickError::SessionActive.to_string(), "warning")]
            }
            Err(e) => vec![format_error("PICK_ERROR", &e.to_string(), "error")],
        }
    }

    fn feed(&mut self, event: PickEvent) -> Vec<String> {
        let decimals = self.decimals;
        let Some(active) = self.active.as_mut() else {
            return vec![format_error("NOT_PICKING", "no pick session is active", "warning")];
        };

        let reply = match active {
            ActivePick::Circle(session) => match session.handle(event) {
                Ok(PickStatus::Pending) => None,
                Ok(PickStatus::Cancelled) => None,
                Ok(PickStatus::Completed(Ok(circle))) => {
                    let name = self.names.next("Circle");
                    info!("Picked circle {} with radius {}", name, circle.radius);
                    Some(format!("CIRCLE_RESULT:{}", json!({
                        "name": name,
                        "circle": circle,
                        "command": circle_command(&name, &circle, decimals)
                    })))
                }
                Ok(PickStatus::Completed(Err(e))) => Some(construction_error(&e)),
                Err(e) => Some(format_error("NOT_PICKING", &e.to_string(), "warning")),
            },
            ActivePick::Location(session) => match session.handle(event) {
                Ok(PickStatus::Pending) => None,
                Ok(PickStatus::Cancelled) => None,
                Ok(PickStatus::Completed(Ok(placement))) => Some(format!("LOCATION_RESULT:{}", json!({
                    "placement": placement,
                    "expr": axis_angle_placement_expr(&placement, decimals)
                }))),
                Ok(PickStatus::Completed(Err(e))) => Some(construction_error(&e)),
                Err(e) => Some(format_error("NOT_PICKING", &e.to_string(), "warning")),
            },
        };

        let mut replies = Vec::new();
        replies.extend(reply);
        replies.push(self.pick_state());
        if self.active.as_ref().is_some_and(|a| a.phase().is_terminal()) {
            self.active = None;
        }
        replies
    }

    fn placement(&self, cmd: FrameCmd) -> Vec<String> {
        let frame = Frame::new(
            Point3::from(cmd.origin),
            Vector3::from(cmd.primary),
            Vector3::from(cmd.secondary),
        );
        if !frame.is_orthonormal() {
            return vec![format_error("BAD_FRAME", "frame directions must be orthonormal", "warning")];
        }
        let placement = derive_placement(&frame);
        vec![format!("PLACEMENT_UPDATE:{}", json!({
            "placement": placement,
            "expr": placement_expr(&placement, self.decimals)
        }))]
    }
}
