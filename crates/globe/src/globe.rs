use foundation::time::Time;
use gpu::RenderDevice;
use runtime::{FrameHost, FrameTicket, InputHost};
use scene::{AnimationLoop, InputEvent, InteractionController, Marker, SceneState, Viewport};
use surface::{DotField, LandMaskResource, generate_dots};

use crate::config::GlobeConfig;
use crate::error::GlobeError;
use crate::overlay::OverlayFrame;
use crate::theme::{Theme, apply_theme};

/// One mounted globe.
///
/// Lifecycle: [`Globe::new`] generates the dot field; [`Globe::resize`] builds
/// the scene once the host reports a usable size; [`Globe::start`] schedules
/// frames and every host callback goes through [`Globe::on_frame`];
/// [`Globe::teardown`] cancels everything. Input handlers and frames run on
/// the same thread, so a frame always sees every earlier input.
#[derive(Debug)]
pub struct Globe {
    device: Box<dyn RenderDevice>,
    config: GlobeConfig,
    dots: DotField,
    markers: Vec<Marker>,
    theme: Theme,
    scene: Option<SceneState>,
    interaction: InteractionController,
    animation: AnimationLoop,
    torn_down: bool,
}

impl Globe {
    pub fn new(
        land: &LandMaskResource,
        markers: Vec<Marker>,
        theme: Theme,
        config: GlobeConfig,
        device: Box<dyn RenderDevice>,
    ) -> Result<Self, GlobeError> {
        config.validate()?;
        let dots = generate_dots(config.dots.count, config.dots.radius, land.get());
        Ok(Self {
            device,
            interaction: InteractionController::new(config.interaction),
            animation: AnimationLoop::new(config.animation),
            config,
            dots,
            markers,
            theme,
            scene: None,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn dots(&self) -> &DotField {
        &self.dots
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn scene(&self) -> Option<&SceneState> {
        self.scene.as_ref()
    }

    pub fn device(&self) -> &dyn RenderDevice {
        self.device.as_ref()
    }

    /// Premultiplied RGBA8 of the last frame, for devices that can read back.
    pub fn read_pixels(&mut self) -> Result<Option<Vec<u8>>, GlobeError> {
        if self.torn_down {
            return Err(GlobeError::TornDown);
        }
        Ok(self.device.read_pixels()?)
    }

    pub fn is_ready(&self) -> bool {
        self.scene.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The frame callback the host currently owes this globe.
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.animation.pending()
    }

    /// Report the drawable size in CSS pixels.
    ///
    /// The scene is built on the first usable size. Zero or non-finite sizes
    /// return `Ok(false)` and leave the globe as it was.
    pub fn resize(&mut self, css_width: f64, css_height: f64, pixel_ratio: f64) -> Result<bool, GlobeError> {
        if self.torn_down {
            return Err(GlobeError::TornDown);
        }
        let Some(viewport) = Viewport::new(css_width, css_height) else {
            tracing::debug!(css_width, css_height, "deferring scene construction");
            return Ok(false);
        };
        if let Some(scene) = &mut self.scene {
            return Ok(scene.resize(self.device.as_mut(), viewport, pixel_ratio));
        }
        self.scene = SceneState::new(
            self.device.as_mut(),
            &self.dots,
            &self.markers,
            viewport,
            pixel_ratio,
            self.config.scene_config(),
            &self.theme.palette(),
        );
        Ok(self.scene.is_some())
    }

    /// Returns whether the camera changed. Ignored before the scene exists.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let Some(scene) = &mut self.scene else {
            return false;
        };
        self.interaction.handle(event, &mut scene.camera, &self.config.camera)
    }

    /// Schedule the first frame. `Ok(false)` if the scene is not built yet or
    /// the loop is already running.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, GlobeError> {
        if self.torn_down {
            return Err(GlobeError::TornDown);
        }
        if self.scene.is_none() {
            return Ok(false);
        }
        Ok(self.animation.start(host))
    }

    /// Host frame callback. `None` for stale tickets and after teardown.
    pub fn on_frame<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        ticket: FrameTicket,
        timestamp_ms: f64,
    ) -> Option<OverlayFrame> {
        let scene = self.scene.as_mut()?;
        let output = self.animation.tick(
            host,
            ticket,
            Time::from_millis(timestamp_ms),
            scene,
            self.device.as_mut(),
            &self.markers,
            self.interaction.is_dragging(),
        )?;
        Some(OverlayFrame::new(output.markers, &self.theme))
    }

    /// Cards for the current camera without advancing the animation.
    pub fn overlay(&self) -> OverlayFrame {
        let markers = self
            .scene
            .as_ref()
            .map(|s| s.project(&self.markers))
            .unwrap_or_default();
        OverlayFrame::new(markers, &self.theme)
    }

    /// Switch colors in place. Returns the number of materials updated.
    pub fn set_theme(&mut self, theme: Theme) -> usize {
        self.theme = theme;
        match &self.scene {
            Some(scene) => apply_theme(scene, self.device.as_mut(), &self.theme),
            None => 0,
        }
    }

    pub fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        if let Some(scene) = &mut self.scene {
            scene.set_markers(self.device.as_mut(), &self.markers);
        }
    }

    /// Stop everything: cancel any drag, cancel the pending frame, release
    /// device resources, shut the device down and detach listeners. Returns
    /// `false` if the globe was already torn down.
    pub fn teardown<H: FrameHost + InputHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.interaction.cancel();
        let stopped = self.animation.stop(host);
        let released = self
            .scene
            .as_mut()
            .map_or(0, |scene| scene.release(self.device.as_mut()));
        self.device.shutdown();
        let detached = host.detach_listeners();
        tracing::debug!(stopped, released, detached, "globe torn down");
        true
    }
}

impl Drop for Globe {
    fn drop(&mut self) {
        if !self.torn_down && self.animation.is_running() {
            tracing::warn!("globe dropped while its frame loop is still scheduled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Globe;
    use crate::config::GlobeConfig;
    use crate::error::GlobeError;
    use crate::markers::showcase_markers;
    use crate::theme::Theme;
    use gpu::RecordingDevice;
    use pretty_assertions::assert_eq;
    use runtime::HeadlessHost;
    use scene::{InputEvent, Marker};
    use surface::{LandMaskConfig, LandMaskResource};

    fn small_config() -> GlobeConfig {
        let mut config = GlobeConfig::default();
        config.dots.count = 1200;
        config.land_mask = LandMaskConfig {
            width: 360,
            height: 180,
            ..LandMaskConfig::default()
        };
        config
    }

    fn globe(land: &LandMaskResource, markers: Vec<Marker>) -> Globe {
        Globe::new(land, markers, Theme::light(), small_config(), Box::new(RecordingDevice::new())).unwrap()
    }

    #[test]
    fn construction_waits_for_a_real_size() {
        let land = LandMaskResource::world(small_config().land_mask);
        let mut globe = globe(&land, showcase_markers());
        let mut host = HeadlessHost::with_input_listeners();
        assert_eq!(globe.resize(0.0, 0.0, 1.0).unwrap(), false);
        assert_eq!(globe.resize(f64::NAN, 700.0, 1.0).unwrap(), false);
        assert!(!globe.is_ready());
        assert!(!globe.handle_input(InputEvent::Wheel { delta_y: 10.0 }));
        assert_eq!(globe.start(&mut host).unwrap(), false);

        assert!(globe.resize(700.0, 700.0, 1.0).unwrap());
        assert!(globe.is_ready());
        assert!(globe.start(&mut host).unwrap());
        globe.teardown(&mut host);
    }

    #[test]
    fn globes_share_one_land_mask() {
        let land = LandMaskResource::world(small_config().land_mask);
        let a = globe(&land, Vec::new());
        let b = globe(&land, Vec::new());
        assert!(land.is_built());
        assert_eq!(a.dots(), b.dots());
    }

    #[test]
    fn paris_card_appears_in_first_frame() {
        let land = LandMaskResource::world(small_config().land_mask);
        let paris = Marker::new("Café de Flore", "Paris, France", 4.8, "Iconic literary café since 1887", 48.854, 2.333);
        let mut globe = globe(&land, vec![paris]);
        let mut host = HeadlessHost::with_input_listeners();
        globe.resize(700.0, 700.0, 1.0).unwrap();
        globe.start(&mut host).unwrap();

        let ticket = host.frames.fire().unwrap();
        let overlay = globe.on_frame(&mut host, ticket, 0.0).unwrap();
        assert_eq!(overlay.markers.len(), 1);
        let card = &overlay.markers[0];
        assert_eq!(card.name, "Café de Flore");
        assert!((card.screen_x - 364.0).abs() < 50.0, "x {}", card.screen_x);
        assert!(card.screen_y > 0.0, "y {}", card.screen_y);
        assert_eq!(overlay.cards[0].filled_stars, 5);
        let stats = globe.device().stats();
        assert_eq!((stats.frames, stats.live_buffers, stats.live_materials), (1, 3, 4));
        let size = globe.scene().unwrap().surface_size();
        assert_eq!((size.width, size.height), (700, 700));
        assert_eq!(globe.read_pixels().unwrap(), None);
        globe.teardown(&mut host);
    }

    #[test]
    fn theme_switch_recolors_without_reallocating() {
        let land = LandMaskResource::world(small_config().land_mask);
        let mut globe = globe(&land, showcase_markers());
        let mut host = HeadlessHost::new();
        assert_eq!(globe.set_theme(Theme::dark()), 0);
        globe.resize(300.0, 300.0, 2.0).unwrap();
        let before = globe.device().stats();
        assert_eq!(globe.set_theme(Theme::light()), 4);
        assert_eq!(globe.device().stats(), before);
        assert_eq!(globe.overlay().card_background, Theme::light().card_background);
        globe.teardown(&mut host);
    }

    #[test]
    fn drag_pauses_idle_rotation() {
        let land = LandMaskResource::world(small_config().land_mask);
        let mut globe = globe(&land, Vec::new());
        let mut host = HeadlessHost::new();
        globe.resize(700.0, 700.0, 1.0).unwrap();
        globe.start(&mut host).unwrap();
        globe.handle_input(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        for i in 0..5 {
            let ticket = host.frames.fire().unwrap();
            globe.on_frame(&mut host, ticket, i as f64 * 16.0);
        }
        assert_eq!(globe.scene().unwrap().camera.rotation_y, 0.0);
        globe.handle_input(InputEvent::PointerLeave);
        let ticket = host.frames.fire().unwrap();
        globe.on_frame(&mut host, ticket, 100.0);
        assert!((globe.scene().unwrap().camera.rotation_y - 0.002).abs() < 1e-12);
        globe.teardown(&mut host);
    }

    #[test]
    fn teardown_mid_drag_cancels_everything() {
        let land = LandMaskResource::world(small_config().land_mask);
        let mut globe = globe(&land, showcase_markers());
        let mut host = HeadlessHost::with_input_listeners();
        globe.resize(700.0, 700.0, 1.0).unwrap();
        globe.start(&mut host).unwrap();
        globe.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        let pending = host.frames.pending()[0];
        assert_eq!(globe.pending_frame(), Some(pending));

        assert!(globe.teardown(&mut host));
        assert!(!globe.is_dragging());
        assert!(host.frames.pending().is_empty());
        assert_eq!(host.listener_count(), 0);
        let stats = globe.device().stats();
        assert_eq!((stats.live_buffers, stats.live_materials, stats.resident_bytes), (0, 0, 0));
        assert!(matches!(globe.read_pixels(), Err(GlobeError::TornDown)));

        // A callback that slipped through after teardown does nothing.
        assert!(globe.on_frame(&mut host, pending, 16.0).is_none());
        assert_eq!(host.frames.requested_count(), 1);
        assert!(!globe.teardown(&mut host));
        assert_eq!(globe.pending_frame(), None);
        assert!(matches!(globe.resize(700.0, 700.0, 1.0), Err(GlobeError::TornDown)));
        assert!(matches!(globe.start(&mut host), Err(GlobeError::TornDown)));
    }

    #[test]
    fn rejects_invalid_config() {
        let land = LandMaskResource::world(LandMaskConfig::default());
        let mut config = GlobeConfig::default();
        config.camera.min_zoom = 10.0;
        assert!(matches!(
            Globe::new(&land, Vec::new(), Theme::light(), config, Box::new(RecordingDevice::new())),
            Err(GlobeError::Config(_))
        ));
        assert!(!land.is_built());
    }
}
