//! Background rendering for the orrery.
//!
//! Provides the starfield shell and scene lighting.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::OrreryConfig;
use crate::scene::LatestFrame;
use crate::types::SceneSet;

/// Number of brightness buckets; stars share one material per bucket.
const STAR_SHADES: usize = 8;

/// Parent entity of every star; rotating it turns the whole sky.
#[derive(Component)]
pub struct StarfieldRoot;

/// One generated star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    /// HSL lightness in `[0.5, 1.0]`
    pub lightness: f32,
}

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting))
            .add_systems(Update, rotate_starfield.in_set(SceneSet::Present));
    }
}

/// Scatter `count` stars uniformly over a spherical shell.
///
/// The same seed always yields the same sky.
pub fn generate_stars(count: usize, seed: u64, inner: f32, outer: f32) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let theta = rng.gen_range(0.0..TAU);
            let cos_phi: f32 = rng.gen_range(-1.0..=1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            let radius = rng.gen_range(inner..=outer);
            let direction = Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin());
            Star {
                position: direction * radius,
                size: rng.gen_range(0.1..0.6),
                lightness: 0.5 + rng.gen_range(0.0..0.5),
            }
        })
        .collect()
}

/// Spawn the starfield under a single rotating root.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<OrreryConfig>,
) {
    let [inner, outer] = config.star_shell;
    let stars = generate_stars(config.star_count, config.star_seed, inner, outer);

    // Blue-white shades, unlit so the Sun's light does not touch them
    let shades: Vec<Handle<StandardMaterial>> = (0..STAR_SHADES)
        .map(|i| {
            let lightness = 0.5 + 0.5 * (i as f32 + 0.5) / STAR_SHADES as f32;
            let color = Color::hsl(216.0, 0.8, lightness);
            materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear(),
                unlit: true,
                ..default()
            })
        })
        .collect();

    let star_mesh = meshes.add(
        Sphere::new(1.0)
            .mesh()
            .ico(1)
            .unwrap_or_else(|_| Sphere::new(1.0).mesh().uv(8, 4)),
    );

    commands
        .spawn((StarfieldRoot, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for star in &stars {
                let shade = (((star.lightness - 0.5) * 2.0 * STAR_SHADES as f32) as usize)
                    .min(STAR_SHADES - 1);
                parent.spawn((
                    Mesh3d(star_mesh.clone()),
                    MeshMaterial3d(shades[shade].clone()),
                    Transform::from_translation(star.position).with_scale(Vec3::splat(star.size)),
                ));
            }
        });

    info!("Spawned {} background stars", stars.len());
}

/// Turn the sky slowly while the simulation runs.
fn rotate_starfield(
    time: Res<Time>,
    latest: Res<LatestFrame>,
    config: Res<OrreryConfig>,
    mut roots: Query<&mut Transform, With<StarfieldRoot>>,
) {
    let running = latest.0.as_ref().is_some_and(|frame| !frame.paused);
    if !running {
        return;
    }
    for mut transform in roots.iter_mut() {
        transform.rotate_y(config.star_spin * time.delta_secs());
    }
}

/// Spawn lighting for the scene.
fn spawn_lighting(mut commands: Commands) {
    // The Sun's light, from the origin
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xff, 0xcc, 0x33),
            intensity: 4.0e7,
            range: 500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Dim fill from above the ecliptic so night sides are not pitch black
    commands.spawn((
        DirectionalLight {
            illuminance: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Scene lighting initialized");
}
