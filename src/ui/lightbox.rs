//! Full-window image viewer
//!
//! Escape closes only the viewer, never the project window beneath it.

use eframe::egui;

/// Index of the enlarged image within the current section, if any
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    index: Option<usize>,
}

impl Lightbox {
    pub fn open(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Step forward, wrapping past the last image
    pub fn next(&mut self, len: usize) {
        self.index = step(self.index, len, true);
    }

    /// Step backward, wrapping before the first image
    pub fn prev(&mut self, len: usize) {
        self.index = step(self.index, len, false);
    }

    /// Show the viewer over everything else for `images[index]`
    pub fn show(&mut self, ctx: &egui::Context, images: &[String]) {
        let Some(index) = self.index() else {
            return;
        };
        let Some(src) = images.get(index) else {
            self.close();
            return;
        };

        let (escape, left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });

        let mut close = escape;
        let mut go_prev = left;
        let mut go_next = right;

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(200));
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());

                let image_rect = egui::Rect::from_center_size(
                    screen.center(),
                    egui::vec2(screen.width() * 0.9, screen.height() * 0.8),
                );
                ui.put(
                    image_rect,
                    egui::Image::from_uri(src.as_str())
                        .max_size(image_rect.size())
                        .maintain_aspect_ratio(true)
                        .sense(egui::Sense::click()),
                );

                let controls = egui::Rect::from_center_size(
                    egui::pos2(screen.center().x, screen.bottom() - 36.0),
                    egui::vec2(150.0, 32.0),
                );
                ui.put(controls, |ui: &mut egui::Ui| {
                    ui.horizontal(|ui| {
                        if ui.button("\u{25C0}").clicked() {
                            go_prev = true;
                        }
                        if ui.button("\u{2715}").on_hover_text("Close image").clicked() {
                            close = true;
                        }
                        if ui.button("\u{25B6}").clicked() {
                            go_next = true;
                        }
                    })
                    .response
                });

                if backdrop.clicked() {
                    close = true;
                }
            });

        if close {
            self.close();
        } else if go_prev {
            self.prev(images.len());
        } else if go_next {
            self.next(images.len());
        }
    }
}

fn step(index: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return index;
    }
    let Some(current) = index else {
        return Some(0);
    };
    let current = current.min(len - 1);
    Some(if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    })
}
