pub mod analysis_results;
pub mod analyze_button;
pub mod file_upload;
pub mod header;
pub mod media_preview;
pub mod toaster;
