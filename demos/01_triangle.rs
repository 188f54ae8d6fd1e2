#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(rustdoc::missing_crate_level_docs)] // it's an example

use eframe::{egui, egui_glow, glow};

use egui::mutex::Mutex;
use std::sync::Arc;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };
    eframe::run_native(
        "Triangle",
        options,
        Box::new(|cc| Ok(Box::new(MyApp::new(cc)?))),
    )
}

struct MyApp {
    /// Behind an `Arc<Mutex<…>>` so we can pass it to [`egui::PaintCallback`] and paint later.
    drawer: Arc<Mutex<Option<glshader::drawer_triangle::Drawer>>>,
}

impl MyApp {
    fn new(cc: &eframe::CreationContext<'_>) -> glshader::Result<Self> {
        let gl: &glow::Context = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");
        log_gl_version(gl);
        let sources = glshader::ShaderSourcePair::new(
            glshader::drawer_triangle::VS_SRC,
            glshader::drawer_triangle::FS_SRC,
        );
        let vtx2xy: [f32; 6] = [-0.5, -0.5, 0.0, 0.5, 0.5, -0.5];
        let drawer = glshader::drawer_triangle::Drawer::new(gl, &sources, &vtx2xy)?;
        Ok(Self {
            drawer: Arc::new(Mutex::new(Some(drawer))),
        })
    }
}

fn log_gl_version(gl: &glow::Context) {
    use glow::HasContext as _;
    let version = unsafe { gl.get_parameter_string(glow::VERSION) };
    log::info!("OpenGL {version}");
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(51, 77, 77)))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let drawer = self.drawer.clone();
                let callback = egui::PaintCallback {
                    rect,
                    callback: Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                        if let Some(drawer) = drawer.lock().as_ref() {
                            drawer.draw(painter.gl());
                        }
                    })),
                };
                ui.painter().add(callback);
            });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let (Some(gl), Some(drawer)) = (gl, self.drawer.lock().take()) {
            drawer.destroy(gl);
        }
    }
}
