// src/chart/display.rs

use anyhow::{Context, Result};
use std::{
    env, fs,
    io::{self, Write},
    net::SocketAddr,
    path::PathBuf,
    process::{Command, Stdio},
    sync::{Arc, Mutex},
};
use tokio::sync::oneshot;
use tracing::{debug, info};
use warp::Filter;

use super::{html::render_page, Figure};

/// Where finished figures go. Chosen once per run.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayTarget {
    /// Serve each page once on loopback and open it in the system browser.
    Browser,
    /// Write `<slug>.html` into the directory.
    Directory(PathBuf),
    /// Print the figure JSON.
    Stdout,
}

impl DisplayTarget {
    pub fn show(&self, slug: &str, title: &str, figure: &Figure) -> Result<()> {
        match self {
            DisplayTarget::Browser => {
                let page = render_page(title, figure)?;
                serve_once(&page, open_in_browser)
                    .with_context(|| format!("showing {} in the browser", slug))
            }
            DisplayTarget::Directory(dir) => {
                fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
                let path = dir.join(format!("{}.html", slug));
                fs::write(&path, render_page(title, figure)?)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote chart");
                Ok(())
            }
            DisplayTarget::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", figure.to_json_pretty()?)?;
                Ok(())
            }
        }
    }
}

/// Bind an ephemeral loopback port, hand its URL to `open`, then answer the
/// first `GET /` with `page` and shut the server down.
///
/// Other paths (favicon probes and the like) get a 404 and do not count.
pub fn serve_once<F>(page: &str, open: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<()>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting server runtime")?;
    rt.block_on(serve_page(page.to_string(), open))
}

async fn serve_page<F>(page: String, open: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<()>,
{
    let (served_tx, served_rx) = oneshot::channel::<()>();
    let served_tx = Arc::new(Mutex::new(Some(served_tx)));

    let chart = warp::get().and(warp::path::end()).map(move || {
        if let Some(tx) = served_tx.lock().ok().and_then(|mut slot| slot.take()) {
            let _ = tx.send(());
        }
        debug!(bytes = page.len(), "served chart");
        warp::reply::html(page.clone())
    });

    let loopback: SocketAddr = ([127, 0, 0, 1], 0).into();
    let (addr, server) = warp::serve(chart)
        .try_bind_with_graceful_shutdown(loopback, async move {
            served_rx.await.ok();
        })
        .context("binding loopback listener")?;

    let url = format!("http://{}/", addr);
    open(&url)?;
    info!(%url, "waiting for browser");
    server.await;
    Ok(())
}

/// Ask the OS to open `url`; `$BROWSER` wins when set.
fn open_in_browser(url: &str) -> Result<()> {
    let mut cmd = if let Ok(browser) = env::var("BROWSER") {
        Command::new(browser)
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("launching a browser for {}", url))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Axis, Layout, Margin, Title};
    use std::{sync::mpsc, thread};
    use tempfile::tempdir;

    fn figure() -> Figure {
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: Title::heading("t"),
                margin: Margin::default(),
                plot_bgcolor: "white",
                xaxis: Axis::default(),
                yaxis: Axis::default(),
                xaxis2: None,
                yaxis2: None,
                shapes: Vec::new(),
                annotations: Vec::new(),
            },
        }
    }

    #[test]
    fn serves_page_to_first_get() -> Result<()> {
        let (tx, rx) = mpsc::channel();
        serve_once("<p>chart</p>", |url| {
            let url = url.to_string();
            thread::spawn(move || {
                let client = reqwest::blocking::Client::new();
                let favicon = client
                    .get(format!("{}favicon.ico", url))
                    .send()
                    .map(|r| r.status().as_u16());
                let body = client.get(&url).send().and_then(|r| r.text());
                tx.send((favicon, body)).expect("send");
            });
            Ok(())
        })?;

        let (favicon, body) = rx.recv()?;
        assert_eq!(favicon?, 404);
        assert_eq!(body?, "<p>chart</p>");
        Ok(())
    }

    #[test]
    fn failing_opener_stops_the_serve() {
        let res = serve_once("<p>chart</p>", |_| anyhow::bail!("no browser"));
        assert!(res.is_err());
    }

    #[test]
    fn directory_target_writes_html() -> Result<()> {
        let dir = tempdir()?;
        let target = DisplayTarget::Directory(dir.path().join("charts"));
        target.show("gdp_recessions", "GDP", &figure())?;

        let page = fs::read_to_string(dir.path().join("charts/gdp_recessions.html"))?;
        assert!(page.contains("Plotly.newPlot"));
        Ok(())
    }
}
