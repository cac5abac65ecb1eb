//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` locally for a preview of both effects.

use std::process::{Command, ExitCode};

const PORT: &str = "8000";

fn main() -> ExitCode {
    println!("Building wasm bundle …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving the existing static/pkg, which may be stale");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{PORT} …");
    match Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .status()
    {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            ExitCode::FAILURE
        }
    }
}
