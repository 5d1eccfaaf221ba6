use super::{ChangeListener, StyleEditor, clamp_scale, markup_text};
use mapmark_core::model::DURATION_MAX;
use mapmark_core::{Color, IconName, IconShape, IconStyle, MarkerKind, MarkerStyle};

/// Curated icon templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPreset {
    Direction,
    Warning,
    Construction,
}

impl IconPreset {
    pub const ALL: [IconPreset; 3] = [
        IconPreset::Direction,
        IconPreset::Warning,
        IconPreset::Construction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IconPreset::Direction => "Direction",
            IconPreset::Warning => "Warning",
            IconPreset::Construction => "Construction",
        }
    }

    pub fn style(self) -> IconStyle {
        match self {
            IconPreset::Direction => IconStyle::default(),
            IconPreset::Warning => IconStyle {
                color: Color::new("#f59e0b"),
                icon: IconName::Warning,
                shape: IconShape::Rounded,
                animated: false,
                ..IconStyle::default()
            },
            IconPreset::Construction => IconStyle {
                color: Color::new("#ea580c"),
                icon: IconName::Construction,
                shape: IconShape::Square,
                animated: false,
                ..IconStyle::default()
            },
        }
    }
}

#[derive(Debug)]
pub struct IconEditor {
    form: IconStyle,
    preview: String,
    on_change: Option<ChangeListener>,
}

impl Default for IconEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl IconEditor {
    pub fn new() -> Self {
        let form = IconStyle::default();
        let preview = mapmark_render::render_style(&MarkerStyle::Icon(form.clone()));
        Self {
            form,
            preview,
            on_change: None,
        }
    }

    pub fn form(&self) -> &IconStyle {
        &self.form
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.form.color = Color::new(markup_text(color));
        self.changed();
    }

    pub fn set_stroke(&mut self, stroke: impl Into<String>) {
        self.form.stroke = Color::new(markup_text(stroke));
        self.changed();
    }

    pub fn set_icon(&mut self, icon: IconName) {
        self.form.icon = icon;
        self.changed();
    }

    pub fn set_shape(&mut self, shape: IconShape) {
        self.form.shape = shape;
        self.changed();
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.form.animated = animated;
        self.changed();
    }

    pub fn toggle_animated(&mut self) {
        self.set_animated(!self.form.animated);
    }

    /// Kept even while animation is off, so toggling it back restores the speed.
    pub fn set_duration(&mut self, duration: u8) {
        self.form.duration = duration.min(DURATION_MAX);
        self.changed();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.form.scale = clamp_scale(scale);
        self.changed();
    }

    /// Any angle in degrees; stored normalized into `0..360`.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.form.rotation = degrees.rem_euclid(360) as u16;
        self.changed();
    }

    pub fn apply_preset(&mut self, preset: IconPreset) {
        self.form = preset.style();
        self.changed();
    }

    fn changed(&mut self) {
        let style = MarkerStyle::Icon(self.form.clone());
        self.preview = mapmark_render::render_style(&style);
        if let Some(listener) = self.on_change.as_mut() {
            listener.notify(&style);
        }
    }
}

impl StyleEditor for IconEditor {
    fn kind(&self) -> MarkerKind {
        MarkerKind::Icon
    }

    fn load(&mut self, style: Option<&MarkerStyle>) {
        self.form = match style {
            Some(MarkerStyle::Icon(icon)) => icon.clone(),
            _ => IconStyle::default(),
        };
        self.changed();
    }

    fn style(&self) -> MarkerStyle {
        MarkerStyle::Icon(self.form.clone())
    }

    fn preview(&self) -> &str {
        &self.preview
    }

    fn set_on_change(&mut self, listener: Option<ChangeListener>) {
        self.on_change = listener;
    }
}
