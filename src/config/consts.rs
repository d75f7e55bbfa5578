// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php";
pub const TIMEOUT_SECS: u64 = 30;

// Local cache (raw pages, never expired)
pub const CACHE_DIR: &str = "cache";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Env overrides
pub const ENV_BASE_URL: &str = "VITIBRASIL_BASE_URL";
pub const ENV_CACHE_DIR: &str = "VITIBRASIL_CACHE_DIR";

// Source markup
pub const PLACEHOLDER: &str = "-";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";

// Reports
pub const DEFAULT_YEAR: i32 = 2023;

// Default export stem (no extension)
pub const DEFAULT_FILE: &str = "report";
