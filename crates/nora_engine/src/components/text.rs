//! Screen-space text component

use crate::foundation::math::Vec2;
use crate::render::{Color, GuiPass, RenderError};
use crate::scene::{Component, GuiRenderable, OwnerSlot};

/// Text drawn in the GUI pass
///
/// The owner's local position is the baseline origin in pixels (origin at the
/// bottom-left corner) and its local X scale multiplies the font size.
#[derive(Debug, Clone)]
pub struct Text {
    owner: OwnerSlot,
    /// Content
    pub text: String,
    /// Font name, resolved by the backend
    pub font: String,
    /// Font size in pixels before scaling
    pub font_size: u32,
    /// Fill color
    pub color: Color,
}

impl Text {
    /// White text in the default font
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            owner: OwnerSlot::new(),
            text: text.into(),
            font: "default".to_string(),
            font_size: 48,
            color: Color::WHITE,
        }
    }

    /// Builder pattern: Set font name and size
    pub fn with_font(mut self, font: impl Into<String>, size: u32) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    /// Builder pattern: Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Component for Text {
    fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }

    fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
        &mut self.owner
    }

    fn as_gui(&self) -> Option<&(dyn GuiRenderable + 'static)> {
        Some(self)
    }

    fn as_gui_mut(&mut self) -> Option<&mut (dyn GuiRenderable + 'static)> {
        Some(self)
    }
}

impl GuiRenderable for Text {
    fn render_gui(&self, pass: &mut GuiPass<'_>) -> Result<(), RenderError> {
        let position = pass.transform().local_position();
        let scale = pass.transform().local_scale().x;
        let size = (self.font_size as f32 * scale).round().max(0.0) as u32;

        pass.draw_text(&self.text, &self.font, size, self.color, Vec2::new(position.x, position.y))
    }
}

crate::native_capability!(Text, "Text");
