mod app;
mod cli;
mod state;
mod ui;

use app::ResultsApp;
use clap::Parser;
use eframe::egui;
use eframe::egui_wgpu;

fn main() -> eframe::Result<()> {
    let args = cli::Args::parse();
    let config = args.config();

    // Initialize logging
    tracing_subscriber::fmt::init();
    tracing::info!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Simplify Results")
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                instance_descriptor: eframe::wgpu::InstanceDescriptor {
                    backends: eframe::wgpu::Backends::PRIMARY | eframe::wgpu::Backends::GL,
                    ..Default::default()
                },
                power_preference: eframe::wgpu::PowerPreference::LowPower,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    let initial_path = args.path;
    eframe::run_native(
        "Simplify Results",
        options,
        Box::new(move |cc| Ok(Box::new(ResultsApp::new(cc, config, initial_path)))),
    )
}
