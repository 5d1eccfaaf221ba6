use super::{ChangeListener, StyleEditor, clamp_scale, markup_text};
use mapmark_core::{Color, LabelShape, LabelStyle, MarkerKind, MarkerStyle};

/// Curated label templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPreset {
    SBahn,
    UBahn,
    BusHamburg,
    BoatHamburg,
    Label,
}

impl LabelPreset {
    pub const ALL: [LabelPreset; 5] = [
        LabelPreset::SBahn,
        LabelPreset::UBahn,
        LabelPreset::BusHamburg,
        LabelPreset::BoatHamburg,
        LabelPreset::Label,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LabelPreset::SBahn => "S-Bahn",
            LabelPreset::UBahn => "U-Bahn",
            LabelPreset::BusHamburg => "Bus (HH)",
            LabelPreset::BoatHamburg => "Boat (HH)",
            LabelPreset::Label => "Label",
        }
    }

    pub fn style(self) -> LabelStyle {
        let (color, text, shape) = match self {
            LabelPreset::SBahn => ("#33A342", "S1", LabelShape::Rounded),
            LabelPreset::UBahn => ("#1569B1", "U1", LabelShape::Rectangle),
            LabelPreset::BusHamburg => ("#DC2221", "5", LabelShape::Trapezoid),
            LabelPreset::BoatHamburg => ("#009ed4", "61", LabelShape::Ferry),
            LabelPreset::Label => ("#272c34", "Text", LabelShape::Rectangle),
        };
        LabelStyle {
            color: Color::new(color),
            text: text.to_string(),
            shape,
            scale: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct LabelEditor {
    form: LabelStyle,
    preview: String,
    on_change: Option<ChangeListener>,
}

impl Default for LabelEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelEditor {
    pub fn new() -> Self {
        let form = LabelStyle::default();
        let preview = mapmark_render::render_style(&MarkerStyle::Label(form.clone()));
        Self {
            form,
            preview,
            on_change: None,
        }
    }

    pub fn form(&self) -> &LabelStyle {
        &self.form
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.form.color = Color::new(markup_text(color));
        self.changed();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.form.text = markup_text(text);
        self.changed();
    }

    pub fn set_shape(&mut self, shape: LabelShape) {
        self.form.shape = shape;
        self.changed();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.form.scale = clamp_scale(scale);
        self.changed();
    }

    /// Replaces the whole form in one step.
    pub fn apply_preset(&mut self, preset: LabelPreset) {
        self.form = preset.style();
        self.changed();
    }

    fn changed(&mut self) {
        let style = MarkerStyle::Label(self.form.clone());
        self.preview = mapmark_render::render_style(&style);
        if let Some(listener) = self.on_change.as_mut() {
            listener.notify(&style);
        }
    }
}

impl StyleEditor for LabelEditor {
    fn kind(&self) -> MarkerKind {
        MarkerKind::Label
    }

    fn load(&mut self, style: Option<&MarkerStyle>) {
        self.form = match style {
            Some(MarkerStyle::Label(label)) => label.clone(),
            _ => LabelStyle::default(),
        };
        self.changed();
    }

    fn style(&self) -> MarkerStyle {
        MarkerStyle::Label(self.form.clone())
    }

    fn preview(&self) -> &str {
        &self.preview
    }

    fn set_on_change(&mut self, listener: Option<ChangeListener>) {
        self.on_change = listener;
    }
}
