//! Paints a [`ButtonFrame`] and forwards pointer input to the control.

use eframe::egui::{Id, Painter, Response, Sense, Shape, Stroke, Ui, Vec2};

use crate::button::{ButtonFrame, DownloadButton, StrokeFrame};

/// Room reserved below the control for the detail line.
const DETAIL_ROW: f32 = 24.0;

/// Allocate `size`, feed pointer changes to `button` and paint its frame.
pub fn download_button(ui: &mut Ui, button: &mut DownloadButton, size: Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    ui.allocate_space(Vec2::new(size.x, DETAIL_ROW));
    button.set_bounds(rect);
    forward_pointer(ui, &response, button);
    if ui.is_rect_visible(rect) {
        paint(ui.painter(), &button.frame());
    }
    response
}

fn forward_pointer(ui: &Ui, response: &Response, button: &mut DownloadButton) {
    let id: Id = response.id.with("pressed");
    let was_pressed = ui.data(|data| data.get_temp::<bool>(id).unwrap_or(false));
    let pressed = response.is_pointer_button_down_on();
    if pressed && !was_pressed {
        button.pointer_down();
    } else if was_pressed && !pressed {
        if response.clicked() {
            button.pointer_up();
        } else {
            button.pointer_cancelled();
        }
    }
    ui.data_mut(|data| data.insert_temp(id, pressed));
}

pub fn paint(painter: &Painter, frame: &ButtonFrame) {
    let opacity = frame.opacity;
    painter.rect_filled(
        frame.bounds,
        frame.corner_radius,
        frame.background.gamma_multiply(opacity),
    );
    for stroke in [&frame.border, &frame.spinner, &frame.progress] {
        paint_stroke(painter, stroke, opacity);
    }
    for label in &frame.labels {
        painter.text(
            label.anchor,
            label.align,
            &label.text,
            label.font.clone(),
            label.color.gamma_multiply(opacity),
        );
    }
}

fn paint_stroke(painter: &Painter, stroke: &StrokeFrame, opacity: f32) {
    if !stroke.is_visible() {
        return;
    }
    painter.add(Shape::line(
        stroke.points.clone(),
        Stroke::new(stroke.width, stroke.color.gamma_multiply(opacity)),
    ));
}
