// ascent_game/tests/data_files.rs
use ascent_core::rooms::RoomKind;
use ascent_core::storage::core_storage::{load_elevator_settings, load_game_template, load_scene_catalog};
use ascent_core::world::room_definition::ControllerKind;
use ascent_game_lib::kiosk::Kiosk;
use ascent_game_lib::settings::Settings;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_data_parses() {
    let template = load_game_template(&data_dir()).unwrap();
    let catalog = load_scene_catalog(&data_dir()).unwrap();
    let elevator = load_elevator_settings(&data_dir()).unwrap();

    let config = template.config.as_ref().unwrap();
    let rooms = config.validate().unwrap();
    assert_eq!(rooms.first_room().unwrap().name, "Lobby");
    assert_eq!(
        rooms.rooms[1].animator_controller.as_ref().map(|c| c.kind),
        Some(ControllerKind::Basement)
    );

    // Every room in the sequence has authored content
    for room in &rooms.rooms {
        assert!(catalog.find(&room.scene_path).is_some(), "{} has no layout", room.scene_path);
    }
    assert!(matches!(catalog.find("Scenes/Shaft").unwrap().kind, RoomKind::PassThrough));
    assert_eq!(elevator.velocity_curve.max_time(), 1.5);
}

#[test]
fn shipped_rooms_stack_without_moving() {
    let catalog = load_scene_catalog(&data_dir()).unwrap();
    let template = load_game_template(&data_dir()).unwrap();
    let rooms = template.config.as_ref().unwrap().validate().unwrap();

    for pair in rooms.rooms.windows(2) {
        let below = catalog.find(&pair[0].scene_path).unwrap();
        let above = catalog.find(&pair[1].scene_path).unwrap();
        assert_eq!(below.planes.top, above.planes.bottom, "{} does not meet {}", pair[0].name, pair[1].name);
    }
}

#[test]
fn kiosk_starts_from_shipped_data() {
    let settings = Settings {
        data_dir: Some(data_dir()),
        realtime: false,
        max_frames: Some(120),
        ..Default::default()
    };
    let template = load_game_template(&settings.data_dir()).unwrap();
    let catalog = load_scene_catalog(&settings.data_dir()).unwrap();
    let elevator = load_elevator_settings(&settings.data_dir()).unwrap();

    let mut kiosk = Kiosk::new(settings, template, catalog, elevator).unwrap();
    kiosk.run().unwrap();

    assert_eq!(kiosk.frames(), 120);
    let manager = kiosk.game().manager().unwrap();
    assert_eq!(manager.current_room().unwrap().name, "Lobby");
}
