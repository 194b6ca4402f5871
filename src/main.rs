//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg`
//! and serves `static/` over HTTP for local viewing.
//!
//! `SKETCH_PORT` overrides the port (default 8000).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

// The sketch itself is the library; there is nothing to run inside wasm.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use plane_sketch::logging::{init_logging, LoggingConfig};

    const DEFAULT_PORT: u16 = 8000;

    pub fn run() -> Result<()> {
        init_logging(LoggingConfig::default());

        build_wasm()?;

        let port = match env::var("SKETCH_PORT") {
            Ok(p) => p
                .parse::<u16>()
                .with_context(|| format!("SKETCH_PORT is not a port number: {p}"))?,
            Err(_) => DEFAULT_PORT,
        };
        serve(port)
    }

    fn build_wasm() -> Result<()> {
        log::info!("building wasm bundle …");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status();

        match status {
            Ok(st) if st.success() => Ok(()),
            Ok(st) => bail!("wasm-pack exited with {st}"),
            Err(err) => {
                // Serving stale artifacts is still useful while iterating on static/.
                log::warn!(
                    "wasm-pack not runnable ({err}); install it from https://rustwasm.github.io/wasm-pack/. \
                     Serving existing static/pkg if present."
                );
                Ok(())
            }
        }
    }

    fn serve(port: u16) -> Result<()> {
        log::info!("serving static/ at http://127.0.0.1:{port}/ (progress variant: /progress.html)");
        let port_arg = port.to_string();
        let mut server = Command::new("python3")
            .args(["-m", "http.server", port_arg.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to start python3 http.server")?;

        loop {
            if let Some(status) = server.try_wait().context("failed to poll http server")? {
                bail!("http server exited with {status}");
            }
            thread::sleep(Duration::from_secs(1));
        }
    }
}
