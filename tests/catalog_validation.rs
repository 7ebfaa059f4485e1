//! Catalog validation as seen by a caller building a custom system.

use orrery::catalog::{Attachment, BodyCatalog, BodyDefinition};
use orrery::config::OrreryConfig;
use orrery::error::{DefinitionProblem, SimError};
use orrery::scene::SceneOrchestrator;

fn problem_of(bodies: Vec<BodyDefinition>) -> DefinitionProblem {
    match BodyCatalog::new(bodies) {
        Err(SimError::InvalidDefinition { problem, .. }) => problem,
        other => panic!("expected a definition error, got {other:?}"),
    }
}

#[test]
fn test_builtin_catalog_is_valid() {
    let catalog = BodyCatalog::solar_system().unwrap();
    assert_eq!(catalog.len(), 10);
    assert!(catalog.get("SATURN").is_ok());
    assert_eq!(catalog.children_of("Earth").count(), 1);
}

#[test]
fn test_negative_radius_rejected() {
    let problem = problem_of(vec![BodyDefinition::central("Sun", -1.0)]);
    assert_eq!(problem, DefinitionProblem::NonPositiveRadius(-1.0));
}

#[test]
fn test_case_insensitive_duplicates_rejected() {
    let problem = problem_of(vec![
        BodyDefinition::central("Sun", 5.0),
        BodyDefinition::orbiting("Mars", 0.5, 25.0, 0.8, 0.0),
        BodyDefinition::orbiting("MARS", 0.5, 30.0, 0.8, 0.0),
    ]);
    assert_eq!(problem, DefinitionProblem::DuplicateName);
}

#[test]
fn test_missing_parent_rejected() {
    let problem = problem_of(vec![
        BodyDefinition::central("Sun", 5.0),
        BodyDefinition::orbiting("Phobos", 0.1, 1.0, 2.0, 0.0).around("Mars"),
    ]);
    assert_eq!(problem, DefinitionProblem::UnknownParent("Mars".into()));
}

#[test]
fn test_moon_of_a_moon_rejected() {
    let problem = problem_of(vec![
        BodyDefinition::central("Sun", 5.0),
        BodyDefinition::orbiting("Earth", 1.0, 20.0, 1.0, 0.0),
        BodyDefinition::orbiting("Moon", 0.27, 2.5, 3.0, 0.0).around("Earth"),
        BodyDefinition::orbiting("Pebble", 0.01, 0.5, 9.0, 0.0).around("Moon"),
    ]);
    assert_eq!(problem, DefinitionProblem::NestedParent("Moon".into()));
}

#[test]
fn test_inverted_rings_rejected() {
    let saturn = BodyDefinition::orbiting("Saturn", 3.0, 45.0, 0.09, 0.018).with_attachment(
        Attachment::Rings {
            texture: "textures/saturn_ring.png".into(),
            inner_radius: 7.0,
            outer_radius: 3.5,
            opacity: 0.8,
            tilt_degrees: Default::default(),
        },
    );
    let problem = problem_of(vec![BodyDefinition::central("Sun", 5.0), saturn]);
    assert!(matches!(problem, DefinitionProblem::InvalidRings { .. }));
}

#[test]
fn test_definition_errors_are_fatal() {
    let err = BodyCatalog::new(vec![BodyDefinition::central("", 1.0)]).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_bad_config_blocks_scene() {
    let config = OrreryConfig {
        focus_duration: 0.0,
        ..OrreryConfig::default()
    };
    let catalog = BodyCatalog::solar_system().unwrap();
    assert!(matches!(
        SceneOrchestrator::new(catalog, &config),
        Err(SimError::InvalidInput { .. })
    ));
}
