//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` on http://127.0.0.1:8000.
//!
//! Pass `--no-build` to serve whatever is already in `static/pkg`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let skip_build = env::args().skip(1).any(|a| a == "--no-build");

    if !skip_build {
        log::info!("building wasm package …");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(st) => {
                log::error!("wasm-pack exited with {st}");
                std::process::exit(1);
            }
            Err(e) => {
                log::warn!(
                    "wasm-pack not runnable ({e}); serving existing static/pkg. \
                     Install it from https://rustwasm.github.io/wasm-pack/"
                );
            }
        }
    }

    log::info!("serving static/ at http://127.0.0.1:8000 (mask: /, glow: /#glow)");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", "8000", "--bind", "127.0.0.1", "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::error!("failed to start http server: {e}");
            std::process::exit(1);
        }
    };

    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                log::error!("http server exited with {status}");
                std::process::exit(1);
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(e) => {
                log::error!("lost track of http server: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
