use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the sample programs
pub fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// Load a .toy file from demos/
pub fn load_demo(name: &str) -> String {
    let path = demos_dir().join(format!("{}.toy", name));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load demo {}: {}", name, e))
}

/// Every .toy file in demos/, sorted by name
pub fn discover_demos() -> Vec<PathBuf> {
    let mut demos: Vec<PathBuf> = fs::read_dir(demos_dir())
        .expect("Failed to read demos directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("toy"))
        .collect();
    demos.sort();
    demos
}
