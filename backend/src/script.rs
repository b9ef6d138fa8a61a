//! Script text for creating picked primitives in the document.

use primitive_core::{CircleResult, Placement};
use std::collections::HashMap;

/// `Base.Placement(...)` with the rotation written as a quaternion (x, y, z, w).
pub fn placement_expr(placement: &Placement, decimals: usize) -> String {
    let p = placement.position;
    let q = placement.quaternion();
    format!(
        "Base.Placement(Base.Vector({:.d$},{:.d$},{:.d$}),Base.Rotation({:.d$},{:.d$},{:.d$},{:.d$}))",
        p.x, p.y, p.z, q[0], q[1], q[2], q[3],
        d = decimals
    )
}

/// `App.Placement(...)` with the rotation written as axis and angle in degrees.
pub fn axis_angle_placement_expr(placement: &Placement, decimals: usize) -> String {
    let p = placement.position;
    let a = placement.axis;
    format!(
        "App.Placement(App.Vector({:.d$},{:.d$},{:.d$}),App.Rotation(App.Vector({:.d$},{:.d$},{:.d$}),{:.d$}))",
        p.x, p.y, p.z, a.x, a.y, a.z, placement.angle_degrees(),
        d = decimals
    )
}

/// Commands adding a `Part::Circle` named `name` for a picked circle.
pub fn circle_command(name: &str, circle: &CircleResult, decimals: usize) -> String {
    format!(
        "App.ActiveDocument.addObject(\"Part::Circle\",\"{name}\")\n\
         App.ActiveDocument.{name}.Radius={:.d$}\n\
         App.ActiveDocument.{name}.Angle0={:.d$}\n\
         App.ActiveDocument.{name}.Angle1={:.d$}\n\
         App.ActiveDocument.{name}.Placement={}\n",
        circle.radius,
        circle.start_angle,
        circle.end_angle,
        placement_expr(&circle.placement, decimals),
        name = name,
        d = decimals
    )
}

/// Hands out document-unique object names: `Circle`, `Circle001`, ...
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashMap<String, usize>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, base: &str) -> String {
        let count = self.used.entry(base.to_string()).or_insert(0);
        let name = if *count == 0 {
            base.to_string()
        } else {
            format!("{}{:03}", base, count)
        };
        *count += 1;
        name
    }
}
