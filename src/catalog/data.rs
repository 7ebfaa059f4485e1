//! Built-in solar system.
//!
//! Distances and radii are scene units, not astronomical ones: the layout is
//! chosen so every planet is visible at once. Speeds are radians per
//! simulation second.

use bevy::math::DVec3;

use super::{Attachment, BodyDefinition};

fn texture(name: &str) -> String {
    format!("textures/{name}")
}

/// The Sun, eight planets and Earth's Moon, in display order.
pub fn solar_system() -> Vec<BodyDefinition> {
    let mut sun = BodyDefinition::central("Sun", 5.0)
        .with_texture(texture("sun.jpg"))
        .with_info("type", "Star")
        .with_info("temperature", "5,778 K")
        .with_info("mass", "1.989 × 10^30 kg");
    sun.appearance.emissive = true;

    let mercury = BodyDefinition::orbiting("Mercury", 0.4, 10.0, 4.0, 0.004)
        .with_texture(texture("mercury.jpg"))
        .with_info("type", "Terrestrial")
        .with_info("temperature", "167°C to -183°C")
        .with_info("gravity", "3.7 m/s²")
        .with_info("orbital period", "88 Earth days");

    let venus = BodyDefinition::orbiting("Venus", 0.9, 15.0, 1.5, 0.002)
        .with_texture(texture("venus_surface.jpg"))
        .with_attachment(Attachment::Atmosphere {
            texture: texture("venus_atmosphere.png"),
            scale: 1.02,
            opacity: 0.7,
            spin: 0.8,
        })
        .with_info("type", "Terrestrial")
        .with_info("temperature", "462°C")
        .with_info("gravity", "8.87 m/s²")
        .with_info("atmosphere", "96.5% CO2, 3.5% N2")
        .with_info("orbital period", "225 Earth days");

    let mut earth = BodyDefinition::orbiting("Earth", 1.0, 20.0, 1.0, 0.01)
        .with_texture(texture("earth.jpg"))
        .with_attachment(Attachment::Clouds {
            texture: texture("earth_clouds.jpg"),
            scale: 1.01,
            opacity: 0.4,
            spin: 1.1,
        })
        .with_info("type", "Terrestrial")
        .with_info("temperature", "15°C")
        .with_info("gravity", "9.81 m/s²")
        .with_info("orbital period", "365.25 Earth days");
    earth.appearance.bump_map = Some(texture("earth_bump.jpeg"));
    earth.appearance.specular_map = Some(texture("earth_specular.jpg"));

    let moon = BodyDefinition::orbiting("Moon", 0.27, 2.5, 3.0, 0.005)
        .around("Earth")
        .with_texture(texture("moon.jpg"))
        .with_info("type", "Satellite")
        .with_info("temperature", "-20°C to 120°C")
        .with_info("gravity", "1.62 m/s²");

    let mut mars = BodyDefinition::orbiting("Mars", 0.5, 25.0, 0.8, 0.009)
        .with_texture(texture("mars.jpg"))
        .with_info("type", "Terrestrial")
        .with_info("temperature", "-63°C")
        .with_info("gravity", "3.72 m/s²")
        .with_info("orbital period", "687 Earth days");
    mars.appearance.bump_map = Some(texture("mars_bump.jpg"));

    let jupiter = BodyDefinition::orbiting("Jupiter", 3.5, 35.0, 0.2, 0.02)
        .with_texture(texture("jupiter.jpg"))
        .with_info("type", "Gas Giant")
        .with_info("temperature", "-110°C")
        .with_info("gravity", "24.79 m/s²")
        .with_info("orbital period", "11.9 Earth years");

    let saturn = BodyDefinition::orbiting("Saturn", 3.0, 45.0, 0.09, 0.018)
        .with_texture(texture("saturn.jpg"))
        .with_attachment(Attachment::Rings {
            texture: texture("saturn_rings.png"),
            inner_radius: 3.5,
            outer_radius: 7.0,
            opacity: 0.8,
            tilt_degrees: DVec3::new(26.73, 0.0, 0.0),
        })
        .with_info("type", "Gas Giant")
        .with_info("temperature", "-178°C")
        .with_info("gravity", "10.44 m/s²")
        .with_info("orbital period", "29.5 Earth years");

    let uranus = BodyDefinition::orbiting("Uranus", 1.8, 55.0, 0.04, 0.012)
        .with_texture(texture("uranus.jpg"))
        .with_info("type", "Ice Giant")
        .with_info("temperature", "-224°C")
        .with_info("gravity", "8.69 m/s²")
        .with_info("orbital period", "84 Earth years");

    let neptune = BodyDefinition::orbiting("Neptune", 1.8, 65.0, 0.01, 0.014)
        .with_texture(texture("neptune.jpg"))
        .with_info("type", "Ice Giant")
        .with_info("temperature", "-214°C")
        .with_info("gravity", "11.15 m/s²")
        .with_info("orbital period", "165 Earth years");

    vec![
        sun, mercury, venus, earth, moon, mars, jupiter, saturn, uranus, neptune,
    ]
}
