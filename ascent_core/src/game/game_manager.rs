// ascent_core/src/game/game_manager.rs
use crate::constants::DEFAULT_BLEND_TIME;
use crate::error::{AscentError, AscentResult};
use crate::lighting::fog_blender::{BlendMaterial, FogBlender};
use crate::lighting::room_lighting::{Environment, RoomLightingSettings};
use crate::onscreen_info;
use crate::scene::frame::FrameSignal;
use crate::scene::loader::{SceneContent, SceneHandle, SceneLoader};
use crate::world::room_configuration::{MasterConfiguration, RoomConfiguration};
use crate::world::room_definition::RoomDefinition;
use crate::world::room_manager::{detect_entry, ElevatorProbe, RoomManager};
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

fn default_blend_time() -> f32 {
    DEFAULT_BLEND_TIME
}

/// Authored game manager asset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameManagerTemplate {
    #[serde(default)]
    pub config: Option<MasterConfiguration>,
    /// Seconds the fog takes to crossfade between rooms.
    #[serde(default = "default_blend_time")]
    pub blend_time: f32,
    #[serde(default)]
    pub blend_material: BlendMaterial,
}

/// An object created at startup that lives through every room transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentObject {
    pub name: String,
    pub position: Vec3,
    pub active: bool,
    /// Times the object has been (re)enabled.
    pub enable_count: u32,
}

/// A loaded unit of scene content and the room manager inside it.
struct LoadedScene {
    handle: SceneHandle,
    scene_path: String,
    room: Box<dyn RoomManager>,
}

struct PendingLoad {
    room: RoomDefinition,
    /// Scene that was active when the load started.
    previous_scene: Option<SceneHandle>,
    receiver: oneshot::Receiver<AscentResult<SceneContent>>,
}

/// Owns the current and previous rooms, loads and unloads room scenes and
/// starts the lighting transition between them.
pub struct GameManager {
    config: MasterConfiguration,
    loader: Rc<dyn SceneLoader>,
    frames: FrameSignal,
    pool: LocalPool,
    spawner: LocalSpawner,
    loaded: Vec<LoadedScene>,
    active_scene: Option<SceneHandle>,
    current_room: Option<RoomDefinition>,
    current_manager: Option<SceneHandle>,
    previous_manager: Option<SceneHandle>,
    pending: Option<PendingLoad>,
    environment: Environment,
    fog_blender: FogBlender,
    current_lighting: RoomLightingSettings,
    previous_lighting: RoomLightingSettings,
    has_transitioned_lighting: bool,
    persistent_objects: Vec<PersistentObject>,
    is_complete: bool,
    restart_requested: bool,
    unload_requests: u32,
    last_voice_over: Option<String>,
}

impl GameManager {
    /// Creates the manager in `slot` unless one already lives there.
    pub fn init<'a>(
        slot: &'a mut Option<GameManager>,
        template: &GameManagerTemplate,
        loader: Rc<dyn SceneLoader>,
        origin: Vec3,
    ) -> AscentResult<&'a mut GameManager> {
        let manager = match slot.take() {
            Some(existing) => existing,
            None => GameManager::new(template, loader, origin)?,
        };
        Ok(slot.insert(manager))
    }

    fn new(template: &GameManagerTemplate, loader: Rc<dyn SceneLoader>, origin: Vec3) -> AscentResult<Self> {
        let config = template
            .config
            .clone()
            .ok_or(AscentError::MissingMasterConfiguration)?;
        config.validate()?;

        let persistent_objects = config
            .persistent_objects
            .iter()
            .map(|name| PersistentObject {
                name: name.clone(),
                position: origin,
                active: true,
                enable_count: 1,
            })
            .collect();

        let environment = Environment::default();
        let initial_lighting = RoomLightingSettings::capture(&environment, None);
        let pool = LocalPool::new();
        let spawner = pool.spawner();

        log::info!("GameManager created with {} persistent objects", config.persistent_objects.len());

        Ok(Self {
            config,
            loader,
            frames: FrameSignal::new(),
            pool,
            spawner,
            loaded: Vec::new(),
            active_scene: None,
            current_room: None,
            current_manager: None,
            previous_manager: None,
            pending: None,
            environment,
            fog_blender: FogBlender::new(template.blend_time, template.blend_material.clone(), initial_lighting),
            current_lighting: initial_lighting,
            previous_lighting: initial_lighting,
            has_transitioned_lighting: false,
            persistent_objects,
            is_complete: false,
            restart_requested: false,
            unload_requests: 0,
            last_voice_over: None,
        })
    }

    /// Cold start in a scene that is already loaded.
    pub fn start_in_scene(&mut self, scene_path: &str, content: SceneContent) -> AscentResult<()> {
        let rooms = self.config.validate()?;
        let room = rooms.room_for_scene(scene_path).cloned();
        if room.is_none() {
            log::error!(
                "Starting in scene {scene_path}, which the room configuration does not list. Room transitions may be unavailable."
            );
        }

        let handle = self.register_scene(scene_path, content);
        self.active_scene = Some(handle);
        self.current_room = room;
        self.current_manager = Some(handle);

        if let Some(clear_color) = self.current_room_manager().map(|r| r.base().camera_clear_color) {
            self.environment.camera_clear_color = clear_color;
        }
        self.current_lighting = self.capture_lighting(Some(handle));
        self.previous_lighting = self.current_lighting;

        onscreen_info!("Starting in {scene_path}");
        Ok(())
    }

    /// Starts loading `room`. The current room becomes the previous one and
    /// there is no current room manager until the load completes.
    pub fn load_room(&mut self, room: &RoomDefinition) -> AscentResult<()> {
        log::info!("LoadRoom: {}", room.name);
        if !room.has_scene() {
            return Err(AscentError::EmptyScenePath(room.name.clone()));
        }
        if let Some(pending) = &self.pending {
            return Err(AscentError::LoadInFlight {
                requested: room.name.clone(),
                pending: pending.room.name.clone(),
            });
        }

        let (sender, receiver) = oneshot::channel();
        let load = self.loader.load(&room.scene_path, &self.frames);
        self.spawner
            .spawn_local(async move {
                // The receiver is gone only if the manager was dropped
                let _ = sender.send(load.await);
            })
            .map_err(|e| {
                log::error!("Could not schedule the load of {}: {e}", room.name);
                AscentError::LoadCancelled(room.scene_path.clone())
            })?;

        // After a failed load there is no current manager and the previous
        // room is still the one to unload
        if let Some(current) = self.current_manager.take() {
            self.previous_lighting = self.capture_lighting(Some(current));
            self.previous_manager = Some(current);
        }
        self.pending = Some(PendingLoad {
            room: room.clone(),
            previous_scene: self.active_scene,
            receiver,
        });
        Ok(())
    }

    /// Deactivates and unloads the previous room without waiting for it.
    pub fn unload_previous_room(&mut self) {
        let Some(handle) = self.previous_manager.take() else {
            return;
        };
        let Some(index) = self.loaded.iter().position(|s| s.handle == handle) else {
            return;
        };

        let mut scene = self.loaded.remove(index);
        scene.room.base_mut().set_active(false);
        self.unload_requests += 1;
        log::info!("Unloading {}", scene.scene_path);

        let unload = self.loader.unload(&scene.scene_path, &self.frames);
        if let Err(e) = self.spawner.spawn_local(unload) {
            log::warn!("Could not schedule the unload of {}: {e}", scene.scene_path);
        }
    }

    /// Crossfades from the previous room's lighting to the current one's.
    /// Only the first call per room visit does anything.
    pub fn start_lighting_transition(&mut self) {
        if self.has_transitioned_lighting {
            return;
        }

        self.fog_blender
            .set_settings(self.previous_lighting, self.current_lighting, &mut self.environment);
        let texture = self.current_room_manager().and_then(|r| r.base().pedestal_texture.clone());
        self.fog_blender.set_blend_texture(texture);
        self.has_transitioned_lighting = true;
    }

    /// Per-frame tick. Rooms run first, then the frame ends and any
    /// finished load is picked up.
    pub fn update(&mut self, dt: f32, probe: &ElevatorProbe) {
        self.update_rooms(dt, probe);
        self.fog_blender.update(dt, &mut self.environment);

        self.frames.advance();
        self.pool.run_until_stalled();
        self.poll_pending_load();
    }

    fn update_rooms(&mut self, dt: f32, probe: &ElevatorProbe) {
        for scene in self.loaded.iter_mut() {
            let room = scene.room.as_mut();
            if !room.base().is_active() {
                continue;
            }

            if detect_entry(room, probe) {
                log::info!("Entered {}", room.name());
            }
            room.update(dt, probe);

            for clip in room.base_mut().voice_over.update(dt) {
                log::info!("[{}] Playing voice-over {clip}", room.name());
                self.last_voice_over = Some(clip);
            }

            if room.experience_complete() && !self.is_complete {
                self.is_complete = true;
                onscreen_info!("Experience complete");
            }
        }
    }

    fn poll_pending_load(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        let result = match pending.receiver.try_recv() {
            Ok(None) => return,
            Ok(Some(result)) => result,
            Err(_) => Err(AscentError::LoadCancelled(pending.room.scene_path.clone())),
        };

        if let Some(pending) = self.pending.take() {
            self.finish_load(pending, result);
        }
    }

    fn finish_load(&mut self, pending: PendingLoad, result: AscentResult<SceneContent>) {
        let next_scene = match result {
            Ok(content) => {
                self.has_transitioned_lighting = false;
                let handle = self.register_scene(&pending.room.scene_path, content);
                self.active_scene = Some(handle);
                self.current_lighting = self.capture_lighting(Some(handle));
                self.previous_lighting.set(&mut self.environment, None);
                self.reenable_persistent_objects();
                Some(handle)
            }
            Err(e) => {
                onscreen_error_load(&pending.room, &e);
                self.current_lighting = self.previous_lighting;
                None
            }
        };

        for scene in &self.loaded {
            if Some(scene.handle) == next_scene {
                self.current_manager = Some(scene.handle);
            } else if Some(scene.handle) == pending.previous_scene {
                self.previous_manager = Some(scene.handle);
            }
        }

        log::info!("Room {} loaded", pending.room.name);
        self.current_room = Some(pending.room);
        self.reposition_current_room();
    }

    /// Stacks the current room so its shaft bottom meets the previous top.
    fn reposition_current_room(&mut self) {
        let Some(previous_top) = self.previous_room_manager().map(|r| r.base().planes.top) else {
            return;
        };
        let Some(current) = self.current_room_manager_mut() else {
            return;
        };

        let base = current.base_mut();
        let original_y = base.origin_y;
        let target_y = previous_top + (base.origin_y - base.planes.bottom);
        base.move_origin_to(target_y);

        if original_y != target_y {
            log::warn!(
                "The Y position of {} ({original_y}) does not match its position in the scene asset ({target_y}). The room was moved, but static objects may break.",
                current.name()
            );
        }
    }

    fn register_scene(&mut self, scene_path: &str, content: SceneContent) -> SceneHandle {
        let handle = SceneHandle::new();
        self.environment.render = content.render;
        self.loaded.push(LoadedScene {
            handle,
            scene_path: scene_path.to_string(),
            room: content.room,
        });
        handle
    }

    fn capture_lighting(&self, scene: Option<SceneHandle>) -> RoomLightingSettings {
        let room = scene.and_then(|handle| self.scene(handle)).map(|s| s.room.base());
        RoomLightingSettings::capture(&self.environment, room)
    }

    fn scene(&self, handle: SceneHandle) -> Option<&LoadedScene> {
        self.loaded.iter().find(|s| s.handle == handle)
    }

    fn scene_mut(&mut self, handle: SceneHandle) -> Option<&mut LoadedScene> {
        self.loaded.iter_mut().find(|s| s.handle == handle)
    }

    /// Persistent objects carry over into every newly loaded room.
    fn reenable_persistent_objects(&mut self) {
        for object in self.persistent_objects.iter_mut() {
            object.active = true;
            object.enable_count += 1;
        }
    }

    /// Resuming after the experience completed sends the kiosk back to the
    /// splash screen.
    pub fn on_application_pause(&mut self, paused: bool) {
        if !paused && self.is_complete {
            onscreen_info!("Resumed after completion, restarting");
            self.is_complete = false;
            self.restart_requested = true;
        }
    }

    /// Returns true once after a restart was requested.
    pub fn take_restart_request(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Restores shared assets on shutdown.
    pub fn on_application_quit(&mut self) {
        self.fog_blender.reset_material();
    }

    pub fn current_room(&self) -> Option<&RoomDefinition> {
        self.current_room.as_ref()
    }

    pub fn current_room_manager(&self) -> Option<&dyn RoomManager> {
        self.current_manager
            .and_then(|handle| self.scene(handle))
            .map(|s| s.room.as_ref())
    }

    pub fn current_room_manager_mut(&mut self) -> Option<&mut dyn RoomManager> {
        let handle = self.current_manager?;
        self.scene_mut(handle).map(|s| s.room.as_mut())
    }

    pub fn previous_room_manager(&self) -> Option<&dyn RoomManager> {
        self.previous_manager
            .and_then(|handle| self.scene(handle))
            .map(|s| s.room.as_ref())
    }

    pub fn previous_room_manager_mut(&mut self) -> Option<&mut dyn RoomManager> {
        let handle = self.previous_manager?;
        self.scene_mut(handle).map(|s| s.room.as_mut())
    }

    /// The current room manager as its concrete type.
    pub fn current_room_as<T: RoomManager>(&mut self) -> Option<&mut T> {
        self.current_room_manager_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Every loaded room manager, oldest first.
    pub fn loaded_room_managers(&self) -> impl Iterator<Item = &dyn RoomManager> {
        self.loaded.iter().map(|s| -> &dyn RoomManager { s.room.as_ref() })
    }

    pub fn loaded_scene_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn config(&self) -> &MasterConfiguration {
        &self.config
    }

    pub fn room_configuration(&self) -> Option<&RoomConfiguration> {
        self.config.room_configuration.as_ref()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn fog_blender(&self) -> &FogBlender {
        &self.fog_blender
    }

    pub fn current_lighting(&self) -> &RoomLightingSettings {
        &self.current_lighting
    }

    pub fn previous_lighting(&self) -> &RoomLightingSettings {
        &self.previous_lighting
    }

    pub fn has_transitioned_lighting(&self) -> bool {
        self.has_transitioned_lighting
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn persistent_objects(&self) -> &[PersistentObject] {
        &self.persistent_objects
    }

    /// Unloads issued so far.
    pub fn unload_requests(&self) -> u32 {
        self.unload_requests
    }

    pub fn last_voice_over(&self) -> Option<&str> {
        self.last_voice_over.as_deref()
    }

    pub fn frames(&self) -> &FrameSignal {
        &self.frames
    }
}

fn onscreen_error_load(room: &RoomDefinition, error: &AscentError) {
    crate::onscreen_error!("Could not load room {}: {error}", room.name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::RoomKind;
    use crate::scene::catalog_loader::CatalogSceneLoader;
    use crate::scene::layout::{SceneCatalog, SceneLayout};
    use crate::world::room_manager::ElevatorPlanes;

    fn template() -> GameManagerTemplate {
        GameManagerTemplate {
            config: Some(MasterConfiguration {
                room_configuration: Some(RoomConfiguration::new(vec![
                    RoomDefinition::new("Lobby", "Scenes/Lobby"),
                    RoomDefinition::new("Shaft", "Scenes/Shaft"),
                ])),
                persistent_objects: vec!["Player".into(), "Hands".into()],
                preloaded_resource_paths: Vec::new(),
            }),
            ..Default::default()
        }
    }

    fn catalog() -> SceneCatalog {
        SceneCatalog::new(vec![
            SceneLayout::new(
                "Scenes/Lobby",
                RoomKind::Lobby { screen_clip_length: 1.0 },
                0.0,
                ElevatorPlanes::new(-5.0, 0.0, 4.0, 6.0),
            ),
            // Authored away from where it will be stacked
            SceneLayout::new("Scenes/Shaft", RoomKind::PassThrough, 0.0, ElevatorPlanes::new(-2.0, 1.0, 3.0, 5.0)),
        ])
    }

    fn started(latency: u32) -> (GameManager, Rc<CatalogSceneLoader>) {
        let loader = Rc::new(CatalogSceneLoader::new(catalog(), latency));
        let mut slot = None;
        GameManager::init(&mut slot, &template(), loader.clone(), Vec3::ZERO).unwrap();
        let mut manager = slot.unwrap();

        let content = loader.catalog().find("Scenes/Lobby").unwrap().instantiate();
        manager.start_in_scene("Scenes/Lobby", content).unwrap();
        (manager, loader)
    }

    fn probe() -> ElevatorProbe {
        ElevatorProbe { y: -100.0, moving: true, rounding_threshold: 0.0001 }
    }

    #[test]
    fn init_keeps_the_first_instance() {
        let loader: Rc<dyn SceneLoader> = Rc::new(CatalogSceneLoader::new(catalog(), 0));
        let mut slot = None;

        GameManager::init(&mut slot, &template(), loader.clone(), Vec3::ZERO)
            .unwrap()
            .set_complete_for_test();
        let again = GameManager::init(&mut slot, &template(), loader, Vec3::ONE).unwrap();

        assert!(again.is_complete());
        assert_eq!(again.persistent_objects()[0].position, Vec3::ZERO);
    }

    #[test]
    fn missing_configuration_is_fatal() {
        let loader: Rc<dyn SceneLoader> = Rc::new(CatalogSceneLoader::new(catalog(), 0));
        let mut slot = None;

        let err = GameManager::init(&mut slot, &GameManagerTemplate::default(), loader, Vec3::ZERO)
            .err()
            .unwrap();
        assert!(matches!(err, AscentError::MissingMasterConfiguration));
        assert!(slot.is_none());
    }

    #[test]
    fn starting_scene_resolves_its_room() {
        let (manager, _) = started(0);
        assert_eq!(manager.current_room().unwrap().name, "Lobby");
        assert_eq!(manager.current_room_manager().unwrap().name(), "Lobby");
        assert!(manager.previous_room_manager().is_none());
        assert_eq!(manager.persistent_objects().len(), 2);
    }

    #[test]
    fn load_runs_across_frames_and_stacks_the_room() {
        let (mut manager, loader) = started(1);
        let shaft = RoomDefinition::new("Shaft", "Scenes/Shaft");

        manager.load_room(&shaft).unwrap();
        assert!(manager.is_loading());
        assert!(manager.current_room_manager().is_none());
        // The definition only moves on once the load is done
        assert_eq!(manager.current_room().unwrap().name, "Lobby");

        manager.update(0.1, &probe());
        assert!(manager.is_loading());
        manager.update(0.1, &probe());
        assert!(!manager.is_loading());

        assert_eq!(loader.loaded(), vec!["Scenes/Shaft".to_string()]);
        assert_eq!(manager.current_room().unwrap().name, "Shaft");
        assert_eq!(manager.previous_room_manager().unwrap().name(), "Lobby");

        let planes = manager.current_room_manager().unwrap().base().planes;
        assert_eq!(planes.bottom, 6.0);
        assert_eq!(planes.floor, 9.0);
    }

    #[test]
    fn second_load_is_rejected_while_one_is_pending() {
        let (mut manager, _) = started(3);
        manager.load_room(&RoomDefinition::new("Shaft", "Scenes/Shaft")).unwrap();

        let err = manager
            .load_room(&RoomDefinition::new("Lobby", "Scenes/Lobby"))
            .unwrap_err();
        assert!(matches!(err, AscentError::LoadInFlight { ref pending, .. } if pending == "Shaft"));
    }

    #[test]
    fn empty_scene_path_is_rejected() {
        let (mut manager, _) = started(0);
        let err = manager.load_room(&RoomDefinition::new("Void", "")).unwrap_err();
        assert!(matches!(err, AscentError::EmptyScenePath(_)));
        assert!(!manager.is_loading());
    }

    #[test]
    fn unknown_scene_leaves_no_current_manager() {
        let (mut manager, _) = started(0);
        manager.load_room(&RoomDefinition::new("Attic", "Scenes/Attic")).unwrap();
        manager.update(0.1, &probe());

        assert!(!manager.is_loading());
        assert!(manager.current_room_manager().is_none());
        assert_eq!(manager.current_room().unwrap().name, "Attic");
    }

    #[test]
    fn unload_is_fire_and_forget() {
        let (mut manager, loader) = started(0);
        manager.load_room(&RoomDefinition::new("Shaft", "Scenes/Shaft")).unwrap();
        manager.update(0.1, &probe());

        manager.unload_previous_room();
        assert_eq!(manager.unload_requests(), 1);
        assert_eq!(loader.unloaded(), vec!["Scenes/Lobby".to_string()]);
        assert!(manager.previous_room_manager().is_none());
        assert_eq!(manager.loaded_scene_count(), 1);

        // Nothing left to unload
        manager.unload_previous_room();
        assert_eq!(manager.unload_requests(), 1);
    }

    #[test]
    fn lighting_transition_runs_once_per_visit() {
        let (mut manager, _) = started(0);
        manager.load_room(&RoomDefinition::new("Shaft", "Scenes/Shaft")).unwrap();
        manager.update(0.1, &probe());

        manager.start_lighting_transition();
        assert!(manager.has_transitioned_lighting());
        assert!(manager.fog_blender().is_blending());

        let timer = manager.fog_blender().timer();
        manager.start_lighting_transition();
        assert_eq!(manager.fog_blender().timer(), timer);
    }

    #[test]
    fn resuming_after_completion_requests_a_restart() {
        let (mut manager, _) = started(0);
        manager.on_application_pause(false);
        assert!(!manager.take_restart_request());

        manager.set_complete_for_test();
        manager.on_application_pause(true);
        assert!(manager.is_complete());
        manager.on_application_pause(false);

        assert!(!manager.is_complete());
        assert!(manager.take_restart_request());
        assert!(!manager.take_restart_request());
    }

    #[test]
    fn persistent_objects_follow_each_loaded_room() {
        let (mut manager, _) = started(0);
        assert!(manager.persistent_objects().iter().all(|o| o.active && o.enable_count == 1));

        manager.load_room(&RoomDefinition::new("Shaft", "Scenes/Shaft")).unwrap();
        manager.update(0.1, &probe());
        assert!(manager.persistent_objects().iter().all(|o| o.active && o.enable_count == 2));

        // A failed load enters no room
        manager.load_room(&RoomDefinition::new("Attic", "Scenes/Attic")).unwrap();
        manager.update(0.1, &probe());
        assert!(manager.persistent_objects().iter().all(|o| o.enable_count == 2));
    }

    #[test]
    fn load_after_a_failed_one_keeps_the_previous_room() {
        let (mut manager, loader) = started(0);
        manager.load_room(&RoomDefinition::new("Attic", "Scenes/Attic")).unwrap();
        manager.update(0.1, &probe());
        assert!(manager.current_room_manager().is_none());
        assert_eq!(manager.previous_room_manager().unwrap().name(), "Lobby");

        manager.load_room(&RoomDefinition::new("Shaft", "Scenes/Shaft")).unwrap();
        assert_eq!(manager.previous_room_manager().unwrap().name(), "Lobby");
        manager.update(0.1, &probe());

        assert_eq!(manager.current_room_manager().unwrap().name(), "Shaft");
        assert_eq!(manager.current_room_manager().unwrap().base().planes.bottom, 6.0);
        manager.unload_previous_room();
        assert_eq!(loader.unloaded(), vec!["Scenes/Lobby".to_string()]);
        assert_eq!(manager.loaded_scene_count(), 1);
    }

    impl GameManager {
        fn set_complete_for_test(&mut self) {
            self.is_complete = true;
        }
    }
}
