use std::path::PathBuf;

const APP_DIR: &str = "com.kanjidrill.app";

/// Platform-specific app data directory, falling back to the working directory.
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_DIR);
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".")
}

pub fn app_data_file(filename: &str) -> PathBuf {
    app_data_dir().join(filename)
}
