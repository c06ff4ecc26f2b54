use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui;
use simplify_results::data::export;
use simplify_results::data::loader::{self, LoadedFile, SUPPORTED_EXTENSIONS};
use simplify_results::{MissingPolicy, ViewerConfig};

use crate::state::app_state::{AppState, VERSION};
use crate::ui::column_selection_dialog::{self, ColumnSelectionState, DialogResult};
use crate::ui::results_page::{self, PageAction};

type LoadSlot = Arc<Mutex<Option<simplify_results::Result<LoadedFile>>>>;

/// Pending background file load.
struct PendingLoad {
    path: PathBuf,
    result: LoadSlot,
}

/// The results viewer application.
pub struct ResultsApp {
    pub state: AppState,
    /// Active column selection dialog (shown after a table is loaded).
    pub column_selection: Option<ColumnSelectionState>,
    /// Last error, shown in the footer until dismissed.
    pub error_message: Option<String>,
    /// Last successful action, shown in the footer.
    pub status_message: Option<String>,
    pub show_about: bool,
    pending_load: Option<PendingLoad>,
}

impl ResultsApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ViewerConfig,
        initial_path: Option<PathBuf>,
    ) -> Self {
        let state = AppState::new(config);

        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.5),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(26.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(12);
        ctx.set_style(style);
        ctx.set_visuals(state.theme.visuals());

        let mut app = Self {
            state,
            column_selection: None,
            error_message: None,
            status_message: None,
            show_about: false,
            pending_load: None,
        };
        if let Some(path) = initial_path {
            app.load_file(&path);
        }
        app
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Results and tables", &SUPPORTED_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Parse a file on a background thread so the UI stays responsive.
    fn load_file(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let result: LoadSlot = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        tracing::info!("Loading {:?}", path_buf);
        let thread_path = path_buf.clone();
        std::thread::spawn(move || {
            let loaded = loader::load_file(&thread_path);
            match result_clone.lock() {
                Ok(mut slot) => *slot = Some(loaded),
                Err(_) => tracing::error!("Load result slot poisoned for {:?}", thread_path),
            }
        });

        self.pending_load = Some(PendingLoad {
            path: path_buf,
            result,
        });
    }

    /// Hand a finished background load to the state or the column dialog.
    fn poll_pending_load(&mut self) {
        let Some(pending) = self.pending_load.as_ref() else {
            return;
        };
        let finished = match pending.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => Some(Err(simplify_results::Error::no_data(
                "file loader stopped unexpectedly",
            ))),
        };
        let Some(result) = finished else {
            return;
        };
        let path = pending.path.clone();
        self.pending_load = None;

        match result {
            Ok(LoadedFile::Results(payload)) => {
                self.state.set_results(payload);
                self.error_message = None;
            }
            Ok(LoadedFile::Table(table)) => {
                self.column_selection = Some(ColumnSelectionState::new(table));
            }
            Err(e) => {
                tracing::error!("Failed to load {:?}: {e}", path);
                self.error_message = Some(format!("Failed to load file: {e}"));
            }
        }
    }

    fn download_simplified(&mut self) {
        let Some(loaded) = self.state.results.as_ref() else {
            return;
        };
        let filename = export::default_export_name(loaded.payload.file.as_ref());
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&filename)
            .add_filter("CSV Files", &["csv"])
            .save_file()
        {
            match export::export_simplified(&loaded.payload.data, &path) {
                Ok(written) => {
                    self.status_message = Some(format!("Saved {written} points to {}", path.display()));
                }
                Err(e) => {
                    tracing::error!("Export failed: {e}");
                    self.error_message = Some(format!("Failed to save file: {e}"));
                }
            }
        }
    }

    fn copy_table(&mut self) {
        let Some(loaded) = self.state.results.as_ref() else {
            return;
        };
        let text = loaded.report.to_tsv();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                tracing::info!("Copied comparison table to clipboard");
                self.status_message = Some("Table copied to clipboard".to_string());
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to copy to clipboard: {e}"));
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) -> bool {
        let mut open_clicked = false;
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let heading = ui.heading("Simplify Results");
                    heading.context_menu(|ui| {
                        if ui.button("About").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                        if ui.button("Clear Results").clicked() {
                            self.state.results = None;
                            ui.close_menu();
                        }
                    });

                    ui.separator();

                    if ui.button("Open File...").clicked() {
                        open_clicked = true;
                    }

                    ui.separator();

                    let mut policy = self.state.config.missing_policy;
                    ui.label("Missing points:");
                    egui::ComboBox::from_id_salt("missing_policy")
                        .selected_text(policy.label())
                        .show_ui(ui, |ui| {
                            for option in [MissingPolicy::Explicit, MissingPolicy::Falsy] {
                                ui.selectable_value(&mut policy, option, option.label());
                            }
                        });
                    self.state.set_missing_policy(policy);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = match self.state.theme.toggle() {
                            crate::state::theme::Theme::Dark => "Dark Mode",
                            crate::state::theme::Theme::Light => "Light Mode",
                        };
                        let current = format!("Current theme: {}", self.state.theme.label());
                        if ui.button(theme_label).on_hover_text(current).clicked() {
                            self.state.toggle_theme();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });
        open_clicked
    }

    fn show_footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    match self.state.results.as_ref() {
                        Some(loaded) => {
                            let n = loaded.payload.data.original.len();
                            ui.label(egui::RichText::new(format!("{n} points loaded")).weak());
                        }
                        None => {
                            ui.label(egui::RichText::new("No results").weak());
                        }
                    }

                    if let Some(msg) = &self.status_message {
                        ui.separator();
                        ui.label(msg);
                    }

                    if let Some(msg) = &self.error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::from_rgb(255, 80, 80), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.error_message = None;
                        }
                    }
                });
            });
    }

    fn show_about_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("About")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Simplify Results v{VERSION}"));
                ui.label("Compares an original series with its simplified version.");
            });
    }
}

impl eframe::App for ResultsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // ------------------------------------------------------------------
        // 1. Dropped files (collect paths first to avoid borrow issues)
        // ------------------------------------------------------------------
        let mut dropped_path: Option<PathBuf> = None;
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    if loader::is_supported(path) {
                        dropped_path = Some(path.clone());
                    }
                }
            }
        });
        if let Some(path) = dropped_path {
            self.load_file(&path);
        }

        // ------------------------------------------------------------------
        // 2. Background load
        // ------------------------------------------------------------------
        self.poll_pending_load();
        let loading = self.pending_load.is_some();
        if loading {
            ctx.request_repaint();
        }

        // ------------------------------------------------------------------
        // 3. Panels
        // ------------------------------------------------------------------
        let open_clicked = self.show_header(ctx);
        self.show_footer(ctx);

        let mut page_action = PageAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(16.0);
                page_action = results_page::show_results_page(
                    ui,
                    self.state.results.as_ref(),
                    loading,
                    &self.state.theme,
                );
                ui.add_space(32.0);
            });
        });

        if open_clicked {
            self.open_file_dialog();
        }
        match page_action {
            PageAction::None => {}
            PageAction::OpenFile => self.open_file_dialog(),
            PageAction::Download => self.download_simplified(),
            PageAction::CopyTable => self.copy_table(),
        }

        // ------------------------------------------------------------------
        // 4. Column selection dialog
        // ------------------------------------------------------------------
        let mut close_dialog = false;
        if let Some(ref mut selection_state) = self.column_selection {
            match column_selection_dialog::show_column_selection_dialog(ctx, selection_state) {
                Some(DialogResult::Ok(selection)) => {
                    match selection_state.loaded_data.to_payload(selection) {
                        Ok(payload) => {
                            self.state.set_results(payload);
                            self.error_message = None;
                        }
                        Err(e) => {
                            tracing::error!("Column selection failed: {e}");
                            self.error_message = Some(e.to_string());
                        }
                    }
                    close_dialog = true;
                }
                Some(DialogResult::Cancel) => close_dialog = true,
                None => {} // dialog still open
            }
        }
        if close_dialog {
            self.column_selection = None;
        }

        if self.show_about {
            self.show_about_window(ctx);
        }
    }
}
