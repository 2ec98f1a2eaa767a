use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_name() -> String {
    "my extension".to_string()
}

pub(crate) fn default_version() -> String {
    "1.0.0".to_string()
}

pub(crate) fn default_host() -> String {
    "localhost".to_string()
}

pub(crate) fn default_port() -> u16 {
    3060
}

pub(crate) fn default_manifest_version() -> u8 {
    2
}

pub(crate) fn default_debounce_ms() -> u64 {
    500
}

pub(crate) fn default_out_dir_name() -> PathBuf {
    PathBuf::from("dist")
}
