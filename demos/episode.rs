//! Drives a short scripted episode through one experiment variant and prints
//! every step as JSON.
//!
//! ```text
//! cargo run --example episode -- complete_state
//! ```

use tarmac::control::{Actions, Control};
use tarmac::experiment::{Experiment, SkillSource, Variant};
use tarmac::reward::{DrivingState, Vec3};
use tarmac::skill::SkillClassifier;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let variant: Variant = std::env::args()
        .nth(1)
        .map(|name| name.parse())
        .transpose()?
        .unwrap_or(Variant::CompleteState);
    let mut experiment = Experiment::for_variant(variant)?;
    let classifier = SkillClassifier::default();

    let route = Vec3::new(1.0, 0.0, 0.0);
    let script = [
        Control::new(0.8, 0.0, 0.0, false),
        Control::new(0.6, 0.2, 0.0, false),
        Control::new(0.0, 0.0, 0.5, false),
        Control::new(0.4, -0.3, 0.0, true),
    ];

    for (t, control) in script.iter().enumerate() {
        let actions = match variant.skill_source() {
            SkillSource::Indexed(_) => classifier.control_to_actions(control).0,
            _ => {
                let mut raw = vec![control.throttle - control.brake, control.steer, 0.0, 0.0, 0.0];
                raw.truncate(variant.action_len());
                Actions::vector(raw)
            }
        };

        let state = DrivingState {
            speed: 10.0 * (t + 1) as f32,
            speed_limit: 30.0,
            heading: route,
            route_forward: route,
            travelled_distance: 10.0 * t as f32,
            route_length: 100.0,
            distance_to_destination: 100.0 - 10.0 * t as f32,
            distance_to_next_waypoint: 2.0,
        };
        let outcome = experiment.step(&actions, &state)?;
        println!("{}", serde_json::to_string(&outcome)?);
    }

    println!("{}", serde_json::to_string_pretty(&experiment.summary())?);
    Ok(())
}
