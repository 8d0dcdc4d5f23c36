use egui::{Context, PointerButton, Pos2, Rect, Vec2, pos2};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in surface pixel coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events the editor consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved
    PointerMove { location: InputLocation },
    /// Primary button was released
    PointerUp { location: InputLocation },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location } => *location,
        }
    }
}

/// Converts raw egui pointer input into surface-local `InputEvent`s.
///
/// The canvas may be displayed at a different size than the surface, so
/// screen positions are scaled as well as offset.
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    surface_size: Vec2,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, surface_size: [u32; 2]) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            surface_size: Vec2::new(surface_size[0] as f32, surface_size[1] as f32),
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect, surface_size: [u32; 2]) {
        self.canvas_rect = rect;
        self.surface_size = Vec2::new(surface_size[0] as f32, surface_size[1] as f32);
    }

    /// Creates an InputLocation from a screen position
    pub fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        let rect = self.canvas_rect;
        let scale_x = if rect.width() > 0.0 { self.surface_size.x / rect.width() } else { 1.0 };
        let scale_y = if rect.height() > 0.0 { self.surface_size.y / rect.height() } else { 1.0 };
        let offset = screen_pos - rect.min;
        InputLocation {
            position: pos2(offset.x * scale_x, offset.y * scale_y),
            is_in_canvas: rect.contains(screen_pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pos = input.pointer.latest_pos();

            if let Some(pos) = pos {
                if input.pointer.button_pressed(PointerButton::Primary) {
                    let location = self.make_location(pos);
                    if location.is_in_canvas {
                        events.push(InputEvent::PointerDown { location });
                    }
                }

                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
            }

            if input.pointer.button_released(PointerButton::Primary) {
                if let Some(pos) = pos.or(self.last_pointer_pos) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                    });
                }
            }

            if pos.is_some() {
                self.last_pointer_pos = pos;
            }
        });

        events
    }
}
