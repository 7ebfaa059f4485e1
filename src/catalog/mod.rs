//! Body catalog: the immutable definitions every simulated body is built from.
//!
//! The catalog is validated once at load time. After that, all lookups are
//! by case-insensitive name, and the resolution order guarantees that a
//! parent is always positioned before any body orbiting it.

pub mod data;

use std::collections::HashMap;

use bevy::math::DVec3;

use crate::error::{DefinitionProblem, SimError};
use crate::types::name_key;

/// Visual sub-element bound to a body. Opaque to the simulation; the
/// renderer dispatches on the variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Attachment {
    /// Translucent shell slightly above the surface.
    Clouds {
        texture: String,
        /// Shell radius as a multiple of the body radius
        scale: f64,
        opacity: f32,
        /// Rotation rate relative to the body (1.0 = locked to the surface)
        spin: f64,
    },
    /// Thick translucent atmosphere shell.
    Atmosphere {
        texture: String,
        scale: f64,
        opacity: f32,
        spin: f64,
    },
    /// Flat annulus around the equator.
    Rings {
        texture: String,
        inner_radius: f64,
        outer_radius: f64,
        opacity: f32,
        /// Fixed tilt (x, y, z) in degrees
        tilt_degrees: DVec3,
    },
}

/// Surface texture references, passed straight through to rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
    pub texture: Option<String>,
    pub bump_map: Option<String>,
    pub specular_map: Option<String>,
    /// Self-illuminated (stars)
    pub emissive: bool,
}

/// Ordered display metadata. Never read by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyInfo {
    entries: Vec<(String, String)>,
}

impl BodyInfo {
    /// Append or replace an entry, keeping insertion order.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Static definition of one celestial body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDefinition {
    /// Unique name (compared case-insensitively)
    pub name: String,
    /// Render radius in scene units
    pub radius: f64,
    /// Orbit radius around the parent (or the origin); 0 for a central body
    pub orbital_distance: f64,
    /// Signed angular speed of the orbit in radians per simulation second
    pub orbital_speed: f64,
    /// Spin in radians per simulation second
    pub rotation_speed: f64,
    /// Body this one orbits, if not the origin
    pub parent: Option<String>,
    pub attachments: Vec<Attachment>,
    pub appearance: Appearance,
    pub info: BodyInfo,
}

impl BodyDefinition {
    /// A body fixed at the origin.
    pub fn central(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            orbital_distance: 0.0,
            orbital_speed: 0.0,
            rotation_speed: 0.0,
            parent: None,
            attachments: Vec::new(),
            appearance: Appearance::default(),
            info: BodyInfo::default(),
        }
    }

    /// A body on a circular orbit around the origin.
    pub fn orbiting(
        name: impl Into<String>,
        radius: f64,
        orbital_distance: f64,
        orbital_speed: f64,
        rotation_speed: f64,
    ) -> Self {
        Self {
            orbital_distance,
            orbital_speed,
            rotation_speed,
            ..Self::central(name, radius)
        }
    }

    /// Make this body orbit `parent` instead of the origin.
    pub fn around(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.appearance.texture = Some(texture.into());
        self
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.set(key, value);
        self
    }

    /// Central bodies have no parent and no orbit; they always sit at the origin.
    pub fn is_central(&self) -> bool {
        self.parent.is_none() && self.orbital_distance == 0.0
    }

    fn check(&self) -> Result<(), DefinitionProblem> {
        if self.name.trim().is_empty() {
            return Err(DefinitionProblem::EmptyName);
        }
        // Written so that NaN is rejected too
        if !(self.radius > 0.0) {
            return Err(DefinitionProblem::NonPositiveRadius(self.radius));
        }
        if self.orbital_distance < 0.0 {
            return Err(DefinitionProblem::NegativeDistance(self.orbital_distance));
        }
        for attachment in &self.attachments {
            if let Attachment::Rings {
                inner_radius,
                outer_radius,
                ..
            } = attachment
                && !(*inner_radius >= 0.0 && inner_radius < outer_radius)
            {
                return Err(DefinitionProblem::InvalidRings {
                    inner: *inner_radius,
                    outer: *outer_radius,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered collection of body definitions.
#[derive(Clone, Debug)]
pub struct BodyCatalog {
    bodies: Vec<BodyDefinition>,
    /// Lowercased name -> index into `bodies`
    index: HashMap<String, usize>,
    /// Parent index per body
    parents: Vec<Option<usize>>,
    /// Central bodies, then origin-orbiting bodies, then moons
    order: Vec<usize>,
}

impl BodyCatalog {
    /// Validate `bodies` and build the catalog.
    pub fn new(bodies: Vec<BodyDefinition>) -> Result<Self, SimError> {
        let invalid = |body: &BodyDefinition, problem| SimError::InvalidDefinition {
            body: body.name.clone(),
            problem,
        };

        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            body.check().map_err(|p| invalid(body, p))?;
            if index.insert(name_key(&body.name), i).is_some() {
                return Err(invalid(body, DefinitionProblem::DuplicateName));
            }
        }

        let mut parents = Vec::with_capacity(bodies.len());
        for body in &bodies {
            let parent = match &body.parent {
                None => None,
                Some(name) => match index.get(&name_key(name)) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(invalid(body, DefinitionProblem::UnknownParent(name.clone())));
                    }
                },
            };
            parents.push(parent);
        }

        for (i, body) in bodies.iter().enumerate() {
            let Some(first) = parents[i] else {
                continue;
            };
            // Walk the chain; anything longer than one hop is either a loop or nesting
            let mut steps = 0;
            let mut cursor = Some(first);
            while let Some(current) = cursor {
                if current == i {
                    return Err(invalid(body, DefinitionProblem::ParentCycle));
                }
                steps += 1;
                if steps > bodies.len() {
                    break;
                }
                cursor = parents[current];
            }
            if parents[first].is_some() {
                return Err(invalid(
                    body,
                    DefinitionProblem::NestedParent(bodies[first].name.clone()),
                ));
            }
        }

        let mut order: Vec<usize> = (0..bodies.len())
            .filter(|&i| bodies[i].is_central())
            .collect();
        order.extend((0..bodies.len()).filter(|&i| parents[i].is_none() && !bodies[i].is_central()));
        order.extend((0..bodies.len()).filter(|&i| parents[i].is_some()));

        Ok(Self {
            bodies,
            index,
            parents,
            order,
        })
    }

    /// The built-in solar system.
    pub fn solar_system() -> Result<Self, SimError> {
        Self::new(data::solar_system())
    }

    pub fn bodies(&self) -> &[BodyDefinition] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(&name_key(name)).copied()
    }

    /// Look up a definition by case-insensitive name.
    pub fn get(&self, name: &str) -> Result<&BodyDefinition, SimError> {
        self.index_of(name)
            .map(|i| &self.bodies[i])
            .ok_or_else(|| SimError::NotFound(name.to_string()))
    }

    pub fn parent_index(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    /// Bodies that orbit `name`, in catalog order.
    pub fn children_of(&self, name: &str) -> impl Iterator<Item = &BodyDefinition> + '_ {
        let parent = self.index_of(name);
        self.bodies
            .iter()
            .zip(&self.parents)
            .filter(move |(_, p)| parent.is_some() && **p == parent)
            .map(|(b, _)| b)
    }

    /// Indices in an order where every parent precedes its children.
    pub fn resolution_order(&self) -> &[usize] {
        &self.order
    }
}
