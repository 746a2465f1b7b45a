use std::env;
use std::path::PathBuf;

// Records where the shipped catalog lives so binaries run from `target/` or an
// install prefix can still fall back to it.
fn main() {
    println!("cargo:rerun-if-env-changed=PAPER_EXPLORER_DATA_HINT");
    println!("cargo:rerun-if-changed=data");

    let data_dir = match env::var_os("PAPER_EXPLORER_DATA_HINT") {
        Some(explicit) => PathBuf::from(explicit),
        None => match env::var_os("CARGO_MANIFEST_DIR") {
            Some(manifest) => PathBuf::from(manifest).join("data"),
            None => return,
        },
    };

    if !data_dir.is_dir() {
        println!(
            "cargo:warning=catalog data directory {} not found; runtime discovery only",
            data_dir.display()
        );
        return;
    }

    let data_dir = data_dir.canonicalize().unwrap_or(data_dir);
    println!(
        "cargo:rustc-env=PAPER_EXPLORER_DATA_HINT={}",
        data_dir.display()
    );
}
