use std::time::Duration;

use rusttype::Font;

use crate::overlay;
use crate::utils::SharedState;

pub struct HandtrackingApp {
    shared_state: SharedState,
    font: Option<Font<'static>>,
}

impl HandtrackingApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        shared_state: SharedState,
        font: Option<Font<'static>>,
    ) -> Self {
        Self { shared_state, font }
    }
}

impl eframe::App for HandtrackingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Self { shared_state, font } = self;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        _frame.close();
                    }
                });
            });
        });

        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let devices = shared_state
                    .lock()
                    .unwrap()
                    .devices
                    .clone()
                    .unwrap_or_default();

                if devices.is_empty() {
                    ui.label("No devices found.");
                } else {
                    let mut selected_device = shared_state
                        .lock()
                        .unwrap()
                        .current_device
                        .unwrap_or_default() as usize;
                    selected_device = selected_device.min(devices.len() - 1);

                    egui::ComboBox::from_label("Camera")
                        .selected_text(devices[selected_device].clone())
                        .show_ui(ui, |ui| {
                            for (i, device) in devices.iter().enumerate() {
                                ui.selectable_value(&mut selected_device, i, device);
                            }
                        });

                    shared_state.lock().unwrap().current_device = Some(selected_device as u32);
                }

                let fps = shared_state.lock().unwrap().fps.unwrap_or(0.0);
                let resolution = shared_state.lock().unwrap().resolution.unwrap_or((0, 0));

                ui.add(egui::Label::new(format!("FPS: {}", fps)));
                ui.add(egui::Label::new(format!(
                    "Resolution: {}x{}",
                    resolution.0, resolution.1
                )));

                let mut logging_enabled = shared_state.lock().unwrap().logging_enabled;
                ui.checkbox(&mut logging_enabled, "Log to database");
                shared_state.lock().unwrap().logging_enabled = logging_enabled;

                ui.separator();

                let hands = shared_state.lock().unwrap().hands.clone();
                let observations = shared_state.lock().unwrap().observations.clone();

                if observations.is_empty() {
                    ui.label("No hands detected.");
                }

                for (hand, obs) in hands.iter().zip(observations.iter()) {
                    ui.add(egui::Label::new(format!(
                        "{} hand ({:.0}%)",
                        hand.handedness.name(),
                        hand.confidence * 100.0
                    )));
                    ui.add(egui::Label::new(format!("Pose: {}", obs.pose)));
                    ui.add(egui::Label::new(format!("Action: {}", obs.action)));
                    ui.add(egui::Label::new(format!("Fingers: {}", obs.finger_count)));
                    ui.add(egui::Label::new(format!(
                        "Hand size: {:.1}",
                        obs.metrics.hand_size
                    )));
                    ui.separator();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if shared_state.lock().unwrap().image.is_some() {
                let mut image = shared_state.lock().unwrap().image.clone().unwrap();
                let hands = shared_state.lock().unwrap().hands.clone();
                let observations = shared_state.lock().unwrap().observations.clone();
                let fps = shared_state.lock().unwrap().fps.unwrap_or(0.0);

                for hand in hands.iter() {
                    overlay::draw_hand(&mut image, hand);
                }

                if let Some(font) = font {
                    overlay::draw_fps(&mut image, font, fps);
                    if let Some(obs) = observations.first() {
                        overlay::draw_caption(&mut image, font, obs.pose, obs.action);
                    }
                }

                let image_size = [image.width() as usize, image.height() as usize];

                if let Some(rgb) = image.as_rgb8() {
                    let ui_image =
                        egui::ColorImage::from_rgb(image_size, rgb.as_raw().as_slice());
                    let texture_hdl =
                        ctx.load_texture("image", ui_image, egui::TextureOptions::default());

                    // scale the frame to the panel width
                    let ui_img_width = ui.available_width();
                    let ui_img_height =
                        ui_img_width / (image.width() as f32 / image.height() as f32);

                    ui.image(&texture_hdl, egui::Vec2::new(ui_img_width, ui_img_height));
                }
            }
        });

        // redraw everything 30 times per second by default:
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}
