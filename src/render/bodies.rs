//! Body meshes and their attachments.
//!
//! One sphere per catalog entry, plus child entities for clouds, atmosphere
//! and rings. Surface textures are used when present in the asset folder;
//! otherwise each body gets a flat color. Bump and specular maps are not
//! rendered.

use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;

use crate::catalog::{Attachment, BodyDefinition};
use crate::scene::SceneOrchestrator;
use crate::types::{to_render, DEG_TO_RAD};

/// Component linking a mesh to its catalog entry.
#[derive(Component)]
pub struct BodyVisual {
    /// Catalog index (and snapshot index).
    pub index: usize,
    pub name: String,
}

/// Component for a child mesh that spins relative to its body.
#[derive(Component)]
pub struct AttachmentVisual {
    pub body_index: usize,
    /// Rotation rate relative to the body; 0 holds a fixed orientation.
    pub spin: f64,
    /// Orientation at zero rotation.
    pub base: Quat,
}

/// Plugin spawning body meshes.
pub struct BodyVisualPlugin;

impl Plugin for BodyVisualPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies);
    }
}

/// Fallback color when a body has no texture on disk.
fn body_color(name: &str) -> Color {
    match name {
        "Sun" => Color::srgb(1.0, 0.8, 0.2),
        "Mercury" => Color::srgb(0.6, 0.6, 0.6),
        "Venus" => Color::srgb(0.9, 0.85, 0.7),
        "Earth" => Color::srgb(0.2, 0.5, 0.8),
        "Moon" => Color::srgb(0.7, 0.7, 0.7),
        "Mars" => Color::srgb(0.8, 0.4, 0.2),
        "Jupiter" => Color::srgb(0.8, 0.7, 0.6),
        "Saturn" => Color::srgb(0.9, 0.85, 0.6),
        "Uranus" => Color::srgb(0.6, 0.8, 0.9),
        "Neptune" => Color::srgb(0.3, 0.5, 0.9),
        _ => Color::srgb(0.5, 0.5, 0.5),
    }
}

/// Folder the default asset source reads from (`AssetPlugin::file_path`).
const ASSET_DIR: &str = "assets";

/// Asset folder resolved the way Bevy's file reader resolves it
/// (`BEVY_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`, then the executable's directory).
fn asset_root() -> PathBuf {
    FileAssetReader::get_base_path().join(ASSET_DIR)
}

/// Whether `path` (relative to the asset folder) is shipped under `root`.
fn texture_shipped(root: &Path, path: &str) -> bool {
    root.join(path).is_file()
}

/// Load `path` only if the file is actually shipped.
fn optional_texture(asset_server: &AssetServer, path: Option<&str>) -> Option<Handle<Image>> {
    let path = path?;
    if texture_shipped(&asset_root(), path) {
        Some(asset_server.load(path.to_string()))
    } else {
        debug!("Texture {} not found, using flat color", path);
        None
    }
}

fn surface_material(body: &BodyDefinition, asset_server: &AssetServer) -> StandardMaterial {
    let appearance = &body.appearance;
    let texture = optional_texture(asset_server, appearance.texture.as_deref());
    let base_color = if texture.is_some() {
        Color::WHITE
    } else {
        body_color(&body.name)
    };

    StandardMaterial {
        base_color,
        base_color_texture: texture.clone(),
        perceptual_roughness: 0.9,
        // Stars light themselves
        emissive: if appearance.emissive {
            base_color.to_linear() * 2.0
        } else {
            LinearRgba::BLACK
        },
        emissive_texture: if appearance.emissive { texture } else { None },
        unlit: appearance.emissive,
        ..default()
    }
}

fn translucent_material(
    texture: &str,
    opacity: f32,
    asset_server: &AssetServer,
) -> StandardMaterial {
    let texture = optional_texture(asset_server, Some(texture));
    let tint = if texture.is_some() { 1.0 } else { 0.9 };
    StandardMaterial {
        base_color: Color::srgba(tint, tint, tint, opacity),
        base_color_texture: texture,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Spawn the attachment meshes under `parent`.
fn spawn_attachments(
    parent: &mut ChildSpawnerCommands,
    index: usize,
    body: &BodyDefinition,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
) {
    for attachment in &body.attachments {
        let (mesh, material, spin, base) = match attachment {
            Attachment::Clouds {
                texture,
                scale,
                opacity,
                spin,
            }
            | Attachment::Atmosphere {
                texture,
                scale,
                opacity,
                spin,
            } => (
                meshes.add(Sphere::new((body.radius * scale) as f32).mesh().uv(48, 24)),
                translucent_material(texture, *opacity, asset_server),
                *spin,
                Quat::IDENTITY,
            ),
            Attachment::Rings {
                texture,
                inner_radius,
                outer_radius,
                opacity,
                tilt_degrees,
            } => {
                let tilt = (*tilt_degrees * DEG_TO_RAD).as_vec3();
                // Annulus meshes lie in XY; lay them into the orbital plane first
                let base = Quat::from_euler(EulerRot::XYZ, tilt.x, tilt.y, tilt.z)
                    * Quat::from_rotation_x(-FRAC_PI_2);
                (
                    meshes.add(
                        Annulus::new(*inner_radius as f32, *outer_radius as f32)
                            .mesh()
                            .resolution(96),
                    ),
                    translucent_material(texture, *opacity, asset_server),
                    0.0,
                    base,
                )
            }
        };

        parent.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(material)),
            Transform::from_rotation(base),
            AttachmentVisual {
                body_index: index,
                spin,
                base,
            },
        ));
    }
}

/// Spawn one mesh per catalog body at its starting position.
fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    scene: Res<SceneOrchestrator>,
) {
    let registry = scene.registry();

    for (index, (body, state)) in registry.iter().enumerate() {
        let mesh = meshes.add(Sphere::new(body.radius as f32).mesh().uv(64, 32));
        let material = materials.add(surface_material(body, &asset_server));

        commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(to_render(state.position)),
                BodyVisual {
                    index,
                    name: body.name.clone(),
                },
                Name::new(body.name.clone()),
            ))
            .with_children(|parent| {
                spawn_attachments(
                    parent,
                    index,
                    body,
                    &mut meshes,
                    &mut materials,
                    &asset_server,
                );
            });
    }

    info!("Spawned {} bodies", registry.catalog().len());
}
