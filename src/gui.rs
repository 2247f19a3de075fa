//! Immediate-mode GUI: egui driven by polled window input and painted in
//! software on top of the rendered frame.

pub mod painter;

use egui::epaint::ClippedPrimitive;
use egui::{Event, Modifiers, MouseWheelUnit, PointerButton, Pos2, RawInput, Rect};

use crate::framebuffer::FrameBuffer;
use crate::input::FrameInput;

use self::painter::SoftwarePainter;

pub struct Gui {
    ctx: egui::Context,
    painter: SoftwarePainter,
    primitives: Vec<ClippedPrimitive>,
    pending_free: Vec<egui::TextureId>,
    pixels_per_point: f32,
    left_was_down: bool,
    last_pointer: Option<Pos2>,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

impl Gui {
    pub fn new() -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());
        Self {
            ctx,
            painter: SoftwarePainter::default(),
            primitives: Vec::new(),
            pending_free: Vec::new(),
            pixels_per_point: 1.0,
            left_was_down: false,
            last_pointer: None,
        }
    }

    /// Whether the pointer is over a GUI panel or dragging one, in which case
    /// mouse input belongs to the GUI rather than the camera.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.is_pointer_over_area() || self.ctx.is_using_pointer()
    }

    /// Translates one frame of window input into egui input. The wheel is only
    /// forwarded when `forward_scroll` is set.
    pub fn raw_input(&mut self, input: &FrameInput, time: f64, forward_scroll: bool) -> RawInput {
        let (width, height) = input.window_size;
        let mut events = Vec::new();

        match input.mouse_pos {
            Some((x, y)) => {
                let pos = Pos2::new(x, y);
                if self.last_pointer != Some(pos) {
                    events.push(Event::PointerMoved(pos));
                }
                self.last_pointer = Some(pos);
            }
            None => {
                if self.last_pointer.take().is_some() {
                    events.push(Event::PointerGone);
                }
            }
        }

        if input.left_down != self.left_was_down {
            if let Some(pos) = self.last_pointer {
                events.push(Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: input.left_down,
                    modifiers: Modifiers::default(),
                });
            }
            self.left_was_down = input.left_down;
        }

        if forward_scroll {
            if let Some((dx, dy)) = input.scroll {
                events.push(Event::MouseWheel {
                    unit: MouseWheelUnit::Line,
                    delta: egui::vec2(dx, dy),
                    modifiers: Modifiers::default(),
                });
            }
        }

        RawInput {
            screen_rect: Some(Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(width as f32, height as f32),
            )),
            time: Some(time),
            events,
            ..Default::default()
        }
    }

    /// Runs the GUI code for this frame and tessellates its output.
    pub fn run(&mut self, raw_input: RawInput, run_ui: impl FnMut(&egui::Context)) {
        let output = self.ctx.run(raw_input, run_ui);

        for (id, delta) in &output.textures_delta.set {
            self.painter.set_texture(*id, delta);
        }
        self.pending_free.extend(output.textures_delta.free.iter().copied());

        self.pixels_per_point = output.pixels_per_point;
        self.primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
    }

    /// Paints the last tessellated frame over the framebuffer.
    pub fn paint(&mut self, framebuffer: &mut FrameBuffer) {
        self.painter
            .paint(framebuffer, &self.primitives, self.pixels_per_point);
        for id in self.pending_free.drain(..) {
            self.painter.free_texture(&id);
        }
    }
}
