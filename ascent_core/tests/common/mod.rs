// ascent_core/tests/common/mod.rs
#![allow(dead_code)]
use ascent_core::animation::curve::AnimationCurve;
use ascent_core::constants::FIXED_DT;
use ascent_core::elevator::elevator::ElevatorSettings;
use ascent_core::game::game::Game;
use ascent_core::game::game_manager::GameManagerTemplate;
use ascent_core::rooms::RoomKind;
use ascent_core::rooms::finale::{FinaleTiming, InstrumentRequirement};
use ascent_core::scene::catalog_loader::CatalogSceneLoader;
use ascent_core::scene::layout::{SceneCatalog, SceneLayout};
use ascent_core::world::room_configuration::{MasterConfiguration, RoomConfiguration};
use ascent_core::world::room_definition::{ControllerKind, ControllerTemplate, RoomDefinition};
use ascent_core::world::room_manager::ElevatorPlanes;
use glam::Vec3;
use std::rc::Rc;

pub const BASEMENT: &str = "Scenes/Basement";
pub const SHAFT: &str = "Scenes/Shaft";
pub const GREENHOUSE: &str = "Scenes/Greenhouse";
pub const FINALE: &str = "Scenes/Finale";

/// Basement, a pass-through shaft, the greenhouse and the finale.
pub fn rooms() -> RoomConfiguration {
    RoomConfiguration::new(vec![
        RoomDefinition::new("Basement", BASEMENT)
            .with_controller(ControllerTemplate::new(ControllerKind::Basement, "BasementElevator")),
        RoomDefinition::new("Shaft", SHAFT),
        RoomDefinition::new("Greenhouse", GREENHOUSE)
            .with_controller(ControllerTemplate::new(ControllerKind::Greenhouse, "GreenhouseElevator")),
        RoomDefinition::new("Finale", FINALE)
            .with_controller(ControllerTemplate::new(ControllerKind::Finale, "FinaleElevator")),
    ])
}

pub fn catalog() -> SceneCatalog {
    let finale = RoomKind::Finale {
        requirements: vec![InstrumentRequirement::new("drums", 1)],
        timing: FinaleTiming {
            complete_all_delay: 0.1,
            playalong_fade_in_frames: 3,
            end_delay: 0.1,
        },
    };

    SceneCatalog::new(vec![
        SceneLayout::new(
            BASEMENT,
            RoomKind::Basement { required_generators: 3 },
            0.0,
            ElevatorPlanes::new(-5.0, 0.0, 4.0, 6.0),
        ),
        // Authored at the origin, stacked on top of the basement at runtime
        SceneLayout::new(SHAFT, RoomKind::PassThrough, 0.0, ElevatorPlanes::new(0.0, 1.0, 3.0, 5.0)),
        SceneLayout::new(GREENHOUSE, RoomKind::Greenhouse, 11.0, ElevatorPlanes::new(11.0, 13.0, 16.0, 18.0)),
        SceneLayout::new(FINALE, finale, 18.0, ElevatorPlanes::new(18.0, 20.0, 24.0, 26.0)),
    ])
}

pub fn template() -> GameManagerTemplate {
    GameManagerTemplate {
        config: Some(MasterConfiguration {
            room_configuration: Some(rooms()),
            persistent_objects: vec!["Player".into()],
            preloaded_resource_paths: Vec::new(),
        }),
        blend_time: 0.5,
        blend_material: Default::default(),
    }
}

pub fn settings() -> ElevatorSettings {
    ElevatorSettings {
        movement_speed: 4.0,
        velocity_curve: AnimationCurve::constant(1.0),
        stopping_curve: AnimationCurve::linear(&[(0.0, 0.1), (1.0, 1.0)]),
        ..Default::default()
    }
}

/// A game started cold in the basement, with loads taking `latency` frames.
pub fn game(latency: u32) -> (Game, Rc<CatalogSceneLoader>) {
    game_with_catalog(catalog(), latency)
}

/// Like [`game`], loading from `catalog`.
pub fn game_with_catalog(catalog: SceneCatalog, latency: u32) -> (Game, Rc<CatalogSceneLoader>) {
    let loader = Rc::new(CatalogSceneLoader::new(catalog, latency));
    let mut game = Game::new(settings(), 0.0);

    let content = loader.catalog().find(BASEMENT).unwrap().instantiate();
    game.init(&template(), loader.clone(), Vec3::ZERO)
        .unwrap()
        .start_in_scene(BASEMENT, content)
        .unwrap();

    (game, loader)
}

/// Runs frames until `done` holds, returning how many ran.
pub fn run_until(game: &mut Game, max_frames: u32, mut done: impl FnMut(&Game) -> bool) -> u32 {
    for frame in 0..max_frames {
        if done(game) {
            return frame;
        }
        game.frame(FIXED_DT);
    }
    panic!("condition not reached after {max_frames} frames");
}

pub fn current_scene_name(game: &Game) -> Option<String> {
    game.manager()
        .and_then(|m| m.current_room_manager())
        .map(|room| room.name().to_string())
}
