use anyhow::Result;
use contribgrid::config::Config;
use contribgrid::contrib::HttpContributionSource;
use contribgrid::logging::{json_log, obj, v_num, v_str};
use contribgrid::media::{Backdrop, MediaCache, MediaLibrary};
use contribgrid::render::{render_contribution_grid, GridOutcome, Page, TerminalGridSurface};
use contribgrid::visualizer;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log(
        "page",
        obj(&[("event", v_str("load")), ("username", v_str(&cfg.username))]),
    );

    // Backdrop: one media listing per session, random choice.
    let library = MediaLibrary::new(&cfg);
    let mut media_cache = MediaCache::default();
    let mut rng = rand::thread_rng();
    match library.choose_backdrop(&mut media_cache, &mut rng).await {
        Some(Backdrop::Video(path)) => {
            json_log("backdrop", obj(&[("kind", v_str("video")), ("src", v_str(&path))]));
        }
        Some(Backdrop::Picture(path)) => {
            json_log("backdrop", obj(&[("kind", v_str("picture")), ("src", v_str(&path))]));
        }
        None => {
            json_log("backdrop", obj(&[("kind", v_str("none"))]));
        }
    }

    let bars = visualizer::radial_bars(&mut rng);
    json_log("visualizer", obj(&[("bars", v_num(bars.len() as f64))]));

    // Contribution grid: live data when the feed answers, synthetic otherwise.
    let page = Page::new();
    let surface = TerminalGridSurface::new();
    page.install(&cfg.grid_surface_id, Box::new(surface.clone()));
    let source = HttpContributionSource::new(&cfg);
    let outcome = render_contribution_grid(&page, &cfg.grid_surface_id, &source, &cfg.username).await;

    match outcome {
        GridOutcome::Rendered { synthetic, columns, cells } => {
            json_log(
                "page",
                obj(&[
                    ("event", v_str("grid_ready")),
                    ("synthetic", v_str(if synthetic { "true" } else { "false" })),
                    ("columns", v_num(columns as f64)),
                    ("cells", v_num(cells as f64)),
                ]),
            );
            println!("{}", surface.draw());
        }
        GridOutcome::SurfaceMissing => {
            json_log("page", obj(&[("event", v_str("grid_skipped"))]));
        }
        GridOutcome::Stale => {
            json_log("page", obj(&[("event", v_str("grid_stale"))]));
        }
    }

    Ok(())
}
