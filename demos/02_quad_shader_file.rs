#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(rustdoc::missing_crate_level_docs)] // it's an example

use eframe::{egui, egui_glow, glow};

use egui::mutex::Mutex;
use std::sync::Arc;

const DEFAULT_SHADER: &str = "res/shaders/basic.shader";

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };
    eframe::run_native(
        "Quad from a shader file",
        options,
        Box::new(|cc| Ok(Box::new(MyApp::new(cc)?))),
    )
}

struct MyApp {
    drawer: Arc<Mutex<Option<glshader::drawer_quad::Drawer>>>,
    color: [f32; 4],
}

impl MyApp {
    fn new(cc: &eframe::CreationContext<'_>) -> glshader::Result<Self> {
        let gl: &glow::Context = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");
        log_gl_version(gl);
        let path = std::env::var("GLSHADER_SHADER").unwrap_or_else(|_| DEFAULT_SHADER.to_string());
        let sources = glshader::ShaderSourcePair::load(&path)?;
        let vtx2xy: [f32; 8] = [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5];
        let tri2vtx: [usize; 6] = [0, 1, 2, 2, 3, 0];
        let drawer = glshader::drawer_quad::Drawer::new(gl, &sources, &vtx2xy, &tri2vtx)?;
        let color = drawer.color;
        Ok(Self {
            drawer: Arc::new(Mutex::new(Some(drawer))),
            color,
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
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("u_Color");
                ui.color_edit_button_rgba_unmultiplied(&mut self.color);
            });
        });
        if let Some(drawer) = self.drawer.lock().as_mut() {
            drawer.set_color(self.color);
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
