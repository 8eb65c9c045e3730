use std::fs;

use aspid::run_program;
use walkdir::WalkDir;

/// Every demo script must run to completion without diagnostics or
/// runtime errors.
#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "aspid"))
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = run_program(&source) {
            panic!("Demo script {path:?} failed:\n{source}\nError: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found under demos/");
}
