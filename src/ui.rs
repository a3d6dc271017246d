// Live editing/viewing window.
//
// A side panel lists the transform entries (editable 3x3 cells plus
// remove/reorder actions) and the central panel draws the axes, the ghost of
// the base polygon, and the folded result. Every edit re-renders from current
// state on the next frame.
//
// When the `ui` feature is disabled (or `cli_only` is enabled), `run` becomes
// a no-op so headless builds still link.

#[cfg(all(feature = "ui", not(feature = "cli_only")))]
mod imp {
    use std::collections::{HashMap, HashSet};

    use eframe::egui;

    use crate::pipeline::EntryId;
    use crate::poly::Poly;
    use crate::scene::Scene;
    use crate::surface::{self, Color, MARKER_RADIUS, Surface, View};

    pub fn run(scene: Scene, title: &str) -> Result<(), String> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 800.0)),
            ..Default::default()
        };

        log::debug!("opening window with {} transforms", scene.list.len());
        eframe::run_native(
            title,
            options,
            Box::new(move |_cc| Ok(Box::new(VizApp::new(scene)))),
        )
        .map_err(|e| e.to_string())
    }

    fn color32(c: Color) -> egui::Color32 {
        egui::Color32::from_rgb(c.r, c.g, c.b)
    }

    // Painter-backed implementation of the drawing contract. Positions are
    // computed with the shared `View` math, offset into the panel's rect.
    struct PainterSurface<'a> {
        painter: &'a egui::Painter,
        rect: egui::Rect,
        view: View,
    }

    impl PainterSurface<'_> {
        fn to_pos(&self, x: f64, y: f64) -> egui::Pos2 {
            let (sx, sy) = self.view.to_screen(x, y);
            egui::pos2(self.rect.left() + sx, self.rect.top() + sy)
        }
    }

    impl Surface for PainterSurface<'_> {
        fn clear(&mut self) {
            self.painter
                .rect_filled(self.rect, egui::CornerRadius::ZERO, egui::Color32::from_gray(20));

            let axis = egui::Stroke::new(1.0, color32(Color::AXIS));
            let origin = self.to_pos(0.0, 0.0);
            self.painter.line_segment(
                [
                    egui::pos2(origin.x, self.rect.top()),
                    egui::pos2(origin.x, self.rect.bottom()),
                ],
                axis,
            );
            self.painter.line_segment(
                [
                    egui::pos2(self.rect.left(), origin.y),
                    egui::pos2(self.rect.right(), origin.y),
                ],
                axis,
            );
        }

        fn draw(&mut self, poly: &Poly, color: Color) {
            let stroke = egui::Stroke::new(1.0, color32(color));

            let mut pts: Vec<egui::Pos2> = poly
                .points()
                .iter()
                .map(|p| self.to_pos(p[0], p[1]))
                .collect();
            if let Some(first) = pts.first().copied() {
                pts.push(first);
            }
            self.painter.add(egui::Shape::line(pts, stroke));

            for p in poly.points() {
                self.painter
                    .circle_filled(self.to_pos(p[0], p[1]), MARKER_RADIUS, color32(color));
            }
        }

        fn rescale(&mut self, w: f32, h: f32) {
            self.view.rescale(w, h);
        }
    }

    struct CellEdit {
        text: String,
        valid: bool,
    }

    enum RowAction {
        Delete(usize),
        Up(usize),
        Down(usize),
    }

    struct VizApp {
        scene: Scene,
        view: View,
        // Cell edit buffers keyed by entry id, so they survive reorders.
        cells: HashMap<(EntryId, usize, usize), CellEdit>,
        add_translate: (f64, f64),
        add_scale: (f64, f64),
        add_rotate_deg: f64,
        status: String,
    }

    impl VizApp {
        fn new(scene: Scene) -> Self {
            Self {
                scene,
                view: View::new(0.0, 0.0),
                cells: HashMap::new(),
                add_translate: (1.0, 0.0),
                add_scale: (2.0, 2.0),
                add_rotate_deg: 45.0,
                status: "edit cells | x removes | ^/v reorder | drag canvas to pan".to_owned(),
            }
        }

        fn fmt_cell(v: f64) -> String {
            format!("{v}")
        }

        fn prune_cell_buffers(&mut self) {
            let live: HashSet<EntryId> = self.scene.list.entries().iter().map(|e| e.id).collect();
            self.cells.retain(|(id, _, _), _| live.contains(id));
        }

        fn add_row(&mut self, ui: &mut egui::Ui) {
            ui.horizontal(|ui| {
                if ui.button("+ identity").clicked() {
                    self.scene.list.add_identity();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("+ translate").clicked() {
                    self.scene
                        .list
                        .add_translate(self.add_translate.0, self.add_translate.1);
                }
                ui.add(egui::DragValue::new(&mut self.add_translate.0).speed(0.1));
                ui.add(egui::DragValue::new(&mut self.add_translate.1).speed(0.1));
            });
            ui.horizontal(|ui| {
                if ui.button("+ scale").clicked() {
                    self.scene.list.add_scale(self.add_scale.0, self.add_scale.1);
                }
                ui.add(egui::DragValue::new(&mut self.add_scale.0).speed(0.1));
                ui.add(egui::DragValue::new(&mut self.add_scale.1).speed(0.1));
            });
            ui.horizontal(|ui| {
                if ui.button("+ rotate").clicked() {
                    self.scene.list.add_rotate(self.add_rotate_deg);
                }
                ui.add(egui::DragValue::new(&mut self.add_rotate_deg).speed(1.0));
                ui.label("deg");
            });
        }

        fn matrix_grid(&mut self, ui: &mut egui::Ui, id: EntryId) {
            for row in 0..3 {
                ui.horizontal(|ui| {
                    for col in 0..3 {
                        let key = (id, row, col);
                        let mut edit = self.cells.remove(&key).unwrap_or_else(|| {
                            let v = self
                                .scene
                                .list
                                .entry(id)
                                .map(|e| e.mat.cell(row, col))
                                .unwrap_or(0.0);
                            CellEdit {
                                text: Self::fmt_cell(v),
                                valid: true,
                            }
                        });

                        let mut widget =
                            egui::TextEdit::singleline(&mut edit.text).desired_width(44.0);
                        if !edit.valid {
                            widget = widget.text_color(color32(Color::SHAPE));
                        }

                        if ui.add(widget).changed() {
                            match self.scene.list.set_cell(id, row, col, &edit.text) {
                                Ok(()) => {
                                    edit.valid = true;
                                    self.status.clear();
                                }
                                Err(err) => {
                                    // Bad input stays visible (in red) but never
                                    // reaches the matrix, so the fold keeps
                                    // drawing the last good state.
                                    edit.valid = false;
                                    self.status = err.to_string();
                                }
                            }
                        }

                        self.cells.insert(key, edit);
                    }
                });
            }
        }

        fn list_panel(&mut self, ui: &mut egui::Ui) {
            ui.heading("Transforms");
            ui.separator();
            self.add_row(ui);
            ui.separator();

            let mut action: Option<RowAction> = None;

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for index in 0..self.scene.list.len() {
                        let (id, name) = {
                            let entry = &self.scene.list.entries()[index];
                            (entry.id, entry.name.clone())
                        };

                        ui.horizontal(|ui| {
                            ui.label(&name);
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("x").clicked() {
                                        action = Some(RowAction::Delete(index));
                                    }
                                    if ui.small_button("v").clicked() {
                                        action = Some(RowAction::Down(index));
                                    }
                                    if ui.small_button("^").clicked() {
                                        action = Some(RowAction::Up(index));
                                    }
                                },
                            );
                        });
                        self.matrix_grid(ui, id);
                        ui.separator();
                    }
                });

            match action {
                Some(RowAction::Delete(index)) => {
                    self.scene.list.delete(index);
                    self.prune_cell_buffers();
                }
                Some(RowAction::Up(index)) => self.scene.list.move_up(index),
                Some(RowAction::Down(index)) => self.scene.list.move_down(index),
                None => {}
            }
        }

        fn canvas(&mut self, ui: &mut egui::Ui) {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;

            // Window resizes show up here as a new rect each frame.
            self.view.rescale(rect.width(), rect.height());
            if response.dragged() {
                let delta = response.drag_delta();
                self.view.pan(delta.x, delta.y);
            }

            let mut canvas_surface = PainterSurface {
                painter: &painter,
                rect,
                view: self.view,
            };
            surface::render(&mut canvas_surface, &self.scene);
        }
    }

    impl eframe::App for VizApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::TopBottomPanel::top("top").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("matviz");
                    ui.separator();
                    ui.monospace(format!("transforms={}", self.scene.list.len()));
                    if !self.status.is_empty() {
                        ui.separator();
                        ui.monospace(&self.status);
                    }
                });
            });

            egui::SidePanel::left("left")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| {
                    self.list_panel(ui);
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                self.canvas(ui);
            });
        }
    }
}

/// No-op implementation when the ui feature is disabled or cli_only is enabled.
#[cfg(not(all(feature = "ui", not(feature = "cli_only"))))]
mod imp {
    use crate::scene::Scene;

    pub fn run(_scene: Scene, _title: &str) -> Result<(), String> {
        Ok(())
    }
}

pub use imp::*;
