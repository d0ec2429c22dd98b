use egui::{Align2, Color32, FontId, Pos2, Rect};

/// Gap between the control and the detail line below it.
pub(crate) const DETAIL_GAP: f32 = 4.0;

/// Which label set is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelVariant {
    #[default]
    Normal,
    Done,
}

/// A trimmed, rotated stroke ready to draw as a polyline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeFrame {
    pub points: Vec<Pos2>,
    pub color: Color32,
    pub width: f32,
}

impl StrokeFrame {
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2 && self.width > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelFrame {
    pub text: String,
    pub color: Color32,
    pub font: FontId,
    pub anchor: Pos2,
    pub align: Align2,
}

/// Everything a renderer needs to draw the control for one frame.
///
/// Colors are not yet multiplied by [`ButtonFrame::opacity`].
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonFrame {
    pub bounds: Rect,
    pub corner_radius: f32,
    pub background: Color32,
    pub opacity: f32,
    pub border: StrokeFrame,
    pub spinner: StrokeFrame,
    pub progress: StrokeFrame,
    pub variant: LabelVariant,
    pub labels: Vec<LabelFrame>,
}

impl ButtonFrame {
    pub fn label(&self, text: &str) -> Option<&LabelFrame> {
        self.labels.iter().find(|label| label.text == text)
    }
}
