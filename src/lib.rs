use tauri::{Manager, RunEvent, State};
use tauri_plugin_dialog::DialogExt;
use tracing::{info, warn};

pub mod config;
pub mod document;
pub mod docx_parser;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pdf_parser;
pub mod presenter;
pub mod report;
pub mod samples;
pub mod summarizer;
pub mod text_parser;

use config::AppConfig;
use document::DocumentFormat;
use error::Error;
use presenter::{process_path, ExtractionView, SummarizerInfo};
use samples::generate_sample;
use summarizer::{ClientSettings, SummaryResult, Summarizer};

// App state shared by every window; holds no per-upload data
pub struct AppState {
    config: AppConfig,
    summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let summarizer = Summarizer::new(&config.summarizer);
        Self { config, summarizer }
    }
}

/// Let the user pick a document, then extract text and build its report.
/// Returns `None` when the user cancels the dialog.
#[tauri::command]
async fn open_document(app_handle: tauri::AppHandle) -> Result<Option<ExtractionView>, Error> {
    let extensions: Vec<&str> = DocumentFormat::ALL.iter().map(|f| f.extension()).collect();

    let picked = app_handle
        .dialog()
        .file()
        .add_filter("Documents (PDF, TXT, DOCX)", &extensions)
        .blocking_pick_file();

    let Some(picked) = picked else {
        return Ok(None);
    };
    let path = picked.into_path().map_err(io_error)?;

    let view = tauri::async_runtime::spawn_blocking(move || process_path(&path))
        .await
        .map_err(io_error)??;

    Ok(Some(view))
}

/// Summarize previously extracted text
#[tauri::command]
async fn summarize(text: String, state: State<'_, AppState>) -> Result<SummaryResult, Error> {
    state.summarizer.summarize(&text).await
}

#[tauri::command]
fn summarizer_info(state: State<AppState>) -> SummarizerInfo {
    let config = &state.config.summarizer;
    SummarizerInfo {
        model: config.model.clone(),
        tls_verification: ClientSettings::from_config(config).verify_tls,
    }
}

/// Ask where to save a sample file and write it there.
/// Returns `None` when the user cancels the dialog.
#[tauri::command]
async fn save_sample(
    format: DocumentFormat,
    app_handle: tauri::AppHandle,
) -> Result<Option<String>, Error> {
    let sample = generate_sample(format)?;

    let picked = app_handle
        .dialog()
        .file()
        .set_file_name(&sample.file_name)
        .add_filter(format.type_label(), &[format.extension()])
        .blocking_save_file();

    let Some(picked) = picked else {
        return Ok(None);
    };
    let path = picked.into_path().map_err(io_error)?;

    std::fs::write(&path, &sample.bytes)?;
    info!(path = %path.display(), bytes = sample.bytes.len(), "Saved sample file");

    Ok(Some(path.to_string_lossy().to_string()))
}

fn io_error(err: impl std::fmt::Display) -> Error {
    Error::Io(std::io::Error::other(err.to_string()))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init_logging();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        warn!("{}; using default configuration", e);
        AppConfig::default()
    });

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::new(config))
        .invoke_handler(tauri::generate_handler![
            open_document,
            summarize,
            summarizer_info,
            save_sample,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                let state = app_handle.state::<AppState>();
                tauri::async_runtime::block_on(state.summarizer.shutdown());
            }
        });
}
