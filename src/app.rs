//! Window, frame loop and input routing.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};
use minifb::{Key, ScaleMode, Window, WindowOptions};

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::error::BasecodeError;
use crate::gui::Gui;
use crate::input::{FrameInput, MouseLook, movement_for_key};
use crate::model::Model;
use crate::projection::Projection;
use crate::renderer::Renderer;
use crate::scenes::gui_scene::GuiScene;
use crate::scenes::model_scene::ModelScene;
use crate::scenes::{DemoScene, FrameStats, SceneSelector, SceneView};
use crate::timing::FrameTimer;

pub struct App {
    window: Window,
    title: String,
    renderer: Renderer,
    camera: Camera,
    projection: Projection,
    gui: Gui,
    scenes: Vec<Box<dyn DemoScene>>,
    selector: SceneSelector,
    timer: FrameTimer,
    mouse_look: MouseLook,
    screenshot_count: usize,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, BasecodeError> {
        let window_config = &config.window;
        let mut window = Window::new(
            &window_config.title,
            window_config.width,
            window_config.height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::UpperLeft,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(window_config.target_fps);

        let (width, height) = window.get_size();
        let width = width.max(1);
        let height = height.max(1);
        info!("Opened a {width}x{height} window");

        let mut model = Model::load(&config.model.path, config.model.drawing_method)?;
        model.scale(config.model.scale);

        let renderer = Renderer::new(width, height);
        let scenes: Vec<Box<dyn DemoScene>> = vec![
            Box::new(ModelScene::new(
                &model,
                &config.model,
                &config.quad,
                renderer.light(),
            )),
            Box::new(GuiScene::default()),
        ];
        let selector = SceneSelector::new(scenes.len(), config.start_scene);

        Ok(Self {
            window,
            title: window_config.title.clone(),
            renderer,
            camera: Camera::from_config(&config.camera),
            projection: Projection::new(width, height, &config.projection),
            gui: Gui::new(),
            scenes,
            selector,
            timer: FrameTimer::new(Instant::now(), config.print_fps),
            mouse_look: MouseLook::default(),
            screenshot_count: 0,
        })
    }

    pub fn run(&mut self) -> Result<(), BasecodeError> {
        info!("Starting on scene \"{}\"", self.scenes[self.selector.index()].name());

        while self.window.is_open() {
            self.timer.frame_started(Instant::now());

            if !self.window.is_active() {
                self.camera.release_all();
            }

            let input = FrameInput::poll(&self.window);
            if input.pressed.contains(&Key::Escape) {
                info!("Escape pressed, closing");
                break;
            }
            let take_screenshot = self.handle_keys(&input);
            self.handle_resize(input.window_size);

            let over_gui = self.gui.wants_pointer();
            self.handle_mouse(&input, over_gui);

            let delta_time = self.timer.delta_time();
            self.camera.move_camera(delta_time);

            let scene = &mut self.scenes[self.selector.index()];
            scene.update(delta_time);

            let view = SceneView {
                view: self.camera.get_view_mat(),
                perspective: *self.projection.perspective(),
                ortho: *self.projection.ortho(),
                camera_pos: self.camera.position,
                width: self.projection.width(),
                height: self.projection.height(),
            };
            self.renderer.clear(scene.clear_colour());
            scene.draw(&mut self.renderer, &view);

            let stats = FrameStats {
                fps: self.timer.fps(),
                delta_time,
                camera_rotation: self.camera.rotation,
                fov_mode: self.projection.mode(),
                hfov_degs: self.projection.hfov_degs(),
            };
            let raw_input = self
                .gui
                .raw_input(&input, self.timer.elapsed(Instant::now()), over_gui);
            self.gui.run(raw_input, |ctx| scene.ui(ctx, &stats));
            self.gui.paint(self.renderer.framebuffer_mut());

            if take_screenshot {
                self.save_screenshot();
            }

            let framebuffer = self.renderer.framebuffer();
            self.window
                .update_with_buffer(&framebuffer.data, framebuffer.width, framebuffer.height)?;

            if let Some(fps) = self.timer.frame_finished(Instant::now()) {
                self.window.set_title(&format!("{} - {:.0} FPS", self.title, fps));
            }
        }

        Ok(())
    }

    /// Scene switching, FoV mode and camera keys. Returns true when a
    /// screenshot was requested.
    fn handle_keys(&mut self, input: &FrameInput) -> bool {
        let mut take_screenshot = false;

        for key in &input.pressed {
            match key {
                Key::Left | Key::Right => {
                    let changed = if *key == Key::Left {
                        self.selector.previous()
                    } else {
                        self.selector.next()
                    };
                    if changed {
                        info!("Switched to scene \"{}\"", self.scenes[self.selector.index()].name());
                    }
                }
                Key::F => {
                    self.projection.toggle_mode();
                    info!("FoV mode: {}", self.projection.mode().label());
                }
                Key::P => take_screenshot = true,
                key => {
                    if let Some(movement) = movement_for_key(*key) {
                        self.camera.handle_key(movement, true);
                    }
                }
            }
        }

        for key in &input.released {
            if let Some(movement) = movement_for_key(*key) {
                self.camera.handle_key(movement, false);
            }
        }

        take_screenshot
    }

    fn handle_resize(&mut self, (width, height): (usize, usize)) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == (self.projection.width(), self.projection.height()) {
            return;
        }
        debug!("Resized to {width}x{height}");
        self.projection.resize(width, height);
        self.renderer.resize(width, height);
    }

    /// Right button held over the 3D view looks around; the wheel zooms
    /// unless the GUI has the pointer.
    fn handle_mouse(&mut self, input: &FrameInput, over_gui: bool) {
        let looking = input.right_down && (self.mouse_look.is_active() || !over_gui);

        match input.mouse_pos {
            Some(pos) if looking => {
                if !self.mouse_look.is_active() {
                    self.window.set_cursor_visibility(false);
                }
                let (dx, dy) = self.mouse_look.delta(pos);
                self.camera.handle_mouse_move(dx, dy);
            }
            _ => {
                if self.mouse_look.is_active() {
                    self.mouse_look.reset();
                    self.window.set_cursor_visibility(true);
                }
            }
        }

        if !over_gui {
            if let Some((_, y)) = input.scroll {
                self.projection.scroll(y);
            }
        }
    }

    fn save_screenshot(&mut self) {
        let path = PathBuf::from(format!("screenshot_{:03}.png", self.screenshot_count));
        match self.renderer.framebuffer().save_to_image(&path) {
            Ok(()) => {
                info!("Saved {}", path.display());
                self.screenshot_count += 1;
            }
            Err(err) => warn!("{err}"),
        }
    }
}
