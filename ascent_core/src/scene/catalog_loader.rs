// ascent_core/src/scene/catalog_loader.rs
use crate::error::{AscentError, AscentResult};
use crate::scene::frame::FrameSignal;
use crate::scene::layout::SceneCatalog;
use crate::scene::loader::{SceneContent, SceneLoader};
use futures::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds scenes from authored layouts, taking a fixed number of frames
/// per load the way streamed content would.
pub struct CatalogSceneLoader {
    catalog: Rc<SceneCatalog>,
    latency_frames: u32,
    loads: Rc<RefCell<Vec<String>>>,
    unloads: Rc<RefCell<Vec<String>>>,
}

impl CatalogSceneLoader {
    pub fn new(catalog: SceneCatalog, latency_frames: u32) -> Self {
        Self {
            catalog: Rc::new(catalog),
            latency_frames,
            loads: Rc::new(RefCell::new(Vec::new())),
            unloads: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Scene paths whose load has finished, in order.
    pub fn loaded(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }

    /// Scene paths whose unload was requested, in order.
    pub fn unloaded(&self) -> Vec<String> {
        self.unloads.borrow().clone()
    }
}

impl SceneLoader for CatalogSceneLoader {
    fn load(&self, scene_path: &str, frames: &FrameSignal) -> LocalBoxFuture<'static, AscentResult<SceneContent>> {
        let catalog = self.catalog.clone();
        let loads = self.loads.clone();
        let frames = frames.clone();
        let latency = self.latency_frames;
        let scene_path = scene_path.to_string();

        async move {
            for _ in 0..latency {
                frames.next_frame().await;
            }

            let layout = catalog
                .find(&scene_path)
                .ok_or_else(|| AscentError::UnknownScene(scene_path.clone()))?;
            loads.borrow_mut().push(scene_path.clone());
            log::debug!("Scene {scene_path} loaded after {latency} frames");
            Ok(layout.instantiate())
        }
        .boxed_local()
    }

    fn unload(&self, scene_path: &str, frames: &FrameSignal) -> LocalBoxFuture<'static, ()> {
        self.unloads.borrow_mut().push(scene_path.to_string());
        let frames = frames.clone();
        let scene_path = scene_path.to_string();

        async move {
            frames.next_frame().await;
            log::debug!("Scene {scene_path} unloaded");
        }
        .boxed_local()
    }
}
