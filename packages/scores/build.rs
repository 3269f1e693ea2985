use std::env;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("scores.rs");

    let library = Path::new("library");
    let mut entries: Vec<(String, String)> = Vec::new();

    if library.exists() {
        for entry in WalkDir::new(library)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "txt"))
        {
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(library) else {
                continue;
            };
            // Scores are addressed by their path without the extension
            let name = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");
            if let Ok(content) = fs::read_to_string(path) {
                entries.push((name, content));
            }
        }
    }

    let mut code = String::new();
    code.push_str("/// Embedded score files, sorted by name\n");
    code.push_str("pub static SCORES: &[(&str, &str)] = &[\n");
    for (name, content) in &entries {
        code.push_str(&format!("    ({:?}, {:?}),\n", name, content));
    }
    code.push_str("];\n");

    fs::write(&dest_path, code).expect("failed to write embedded scores");

    println!("cargo:rerun-if-changed=library");
}
