//! Transform synchronization between the scene snapshot and rendering.
//!
//! Snapshot bodies are in catalog order, so each mesh looks itself up by
//! index. Rotations are wrapped in f64 before narrowing to f32.

use bevy::prelude::*;

use crate::render::bodies::{AttachmentVisual, BodyVisual};
use crate::scene::LatestFrame;
use crate::types::{display_angle, to_render};

/// Rotation of an attachment relative to its body after the body has turned
/// by `body_angle`.
///
/// The child inherits the body's spin, so only the difference is applied:
/// `spin = 1` locks it to the surface, `spin = 0` keeps `base` fixed in space.
pub fn attachment_rotation(body_angle: f64, spin: f64, base: Quat) -> Quat {
    let relative = display_angle((spin - 1.0) * body_angle) as f32;
    Quat::from_rotation_y(relative) * base
}

/// Copy snapshot positions and spins onto body meshes.
pub fn sync_body_transforms(
    latest: Res<LatestFrame>,
    mut bodies: Query<(&BodyVisual, &mut Transform), Without<AttachmentVisual>>,
    mut attachments: Query<(&AttachmentVisual, &mut Transform), Without<BodyVisual>>,
) {
    let Some(frame) = &latest.0 else {
        return;
    };

    for (visual, mut transform) in bodies.iter_mut() {
        let Some(body) = frame.bodies.get(visual.index) else {
            continue;
        };
        transform.translation = to_render(body.position);
        transform.rotation = Quat::from_rotation_y(display_angle(body.rotation_angle) as f32);
    }

    for (attachment, mut transform) in attachments.iter_mut() {
        let Some(body) = frame.bodies.get(attachment.body_index) else {
            continue;
        };
        transform.rotation =
            attachment_rotation(body.rotation_angle, attachment.spin, attachment.base);
    }
}
