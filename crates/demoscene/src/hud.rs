//! Stats overlay rendered with egui

use egui::{Color32, Context, RichText};

/// Small fixed-position overlay with the demo name, frame rate, and
/// whatever stats the active demo reports.
pub struct Hud {
    show: bool,
}

impl Hud {
    pub fn new(show: bool) -> Self {
        Hud { show }
    }

    pub fn toggle(&mut self) {
        self.show = !self.show;
    }

    pub fn render(
        &self,
        ctx: &Context,
        demo_name: &str,
        fps: f32,
        paused: bool,
        stats: &[(&'static str, String)],
    ) {
        if !self.show {
            return;
        }

        egui::Area::new("hud".into())
            .fixed_pos(egui::pos2(10.0, 10.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(demo_name)
                        .strong()
                        .color(Color32::from_rgb(240, 240, 240)),
                );
                ui.label(format!("{fps:.0} fps"));
                if paused {
                    ui.label(RichText::new("paused").color(Color32::from_rgb(255, 180, 0)));
                }
                for (key, value) in stats {
                    ui.label(format!("{key}: {value}"));
                }
            });
    }
}
