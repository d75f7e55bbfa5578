// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active tab index into `ReportKind::ALL`
    pub current_kind_index: usize,

    /// Hide sub-item rows in the table
    pub collapse_subitems: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            current_kind_index: 0,
            collapse_subitems: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
