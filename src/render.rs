use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::contrib::{Cell, ContributionSource, Grid};
use crate::logging::{log, obj, v_num, v_str, Domain, Level};

/// Thin adapter from grid values to concrete UI primitives. Implementations
/// stay dumb: the grid carries every derived attribute already.
pub trait RenderSurface: Send {
    fn clear(&mut self);
    fn place(&mut self, column: usize, row: usize, cell: &Cell);
}

/// What a render call did. Never an error: failure modes of this widget are
/// recovered or silently skipped by contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOutcome {
    Rendered { synthetic: bool, columns: usize, cells: usize },
    SurfaceMissing,
    Stale,
}

/// Registry of named rendering surfaces plus the render generation counter.
/// Surfaces are installed by the page layout at startup; a missing id means
/// the page legitimately omits that widget.
pub struct Page {
    surfaces: Mutex<HashMap<String, Box<dyn RenderSurface>>>,
    generation: AtomicU64,
}

impl Page {
    pub fn new() -> Self {
        Self {
            surfaces: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn install(&self, id: &str, surface: Box<dyn RenderSurface>) {
        if let Ok(mut surfaces) = self.surfaces.lock() {
            surfaces.insert(id.to_string(), surface);
        }
    }

    pub fn has_surface(&self, id: &str) -> bool {
        self.surfaces.lock().map(|s| s.contains_key(id)).unwrap_or(false)
    }

    /// Start a render pass; the returned token stays valid until the next
    /// call. Results computed under a superseded token must be discarded.
    pub fn begin_render(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn with_surface<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut dyn RenderSurface) -> T,
    ) -> Option<T> {
        let mut surfaces = self.surfaces.lock().ok()?;
        surfaces.get_mut(id).map(|surface| f(surface.as_mut()))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Render entry point: locate the surface, fetch, fall back to a synthetic
/// grid on any remote failure, then clear and repopulate the surface.
///
/// The surface check runs before anything touches the network, so a page
/// without the widget costs no request. A fetch that resolves after another
/// render pass has started is discarded unapplied.
pub async fn render_contribution_grid(
    page: &Page,
    surface_id: &str,
    source: &dyn ContributionSource,
    identity: &str,
) -> GridOutcome {
    if !page.has_surface(surface_id) {
        log(
            Level::Warn,
            Domain::Render,
            "surface_missing",
            obj(&[("surface", v_str(surface_id))]),
        );
        return GridOutcome::SurfaceMissing;
    }

    let token = page.begin_render();
    let (grid, synthetic) = match source.fetch_contributions(identity).await {
        Ok(days) => (Grid::from_days(&days), false),
        Err(err) => {
            log(
                Level::Warn,
                Domain::Fetch,
                "remote_unavailable",
                obj(&[("identity", v_str(identity)), ("cause", v_str(&err.to_string()))]),
            );
            (Grid::synthetic(&mut rand::thread_rng()), true)
        }
    };

    if page.current_generation() != token {
        log(
            Level::Debug,
            Domain::Render,
            "stale_render_discarded",
            obj(&[("token", v_num(token as f64))]),
        );
        return GridOutcome::Stale;
    }

    let applied = page.with_surface(surface_id, |surface| {
        surface.clear();
        for (column, week) in grid.columns.iter().enumerate() {
            for (row, cell) in week.cells.iter().enumerate() {
                surface.place(column, row, cell);
            }
        }
    });
    // Surface uninstalled while the fetch was in flight.
    if applied.is_none() {
        return GridOutcome::SurfaceMissing;
    }

    log(
        Level::Info,
        Domain::Render,
        "grid_rendered",
        obj(&[
            ("surface", v_str(surface_id)),
            ("synthetic", v_str(if synthetic { "true" } else { "false" })),
            ("columns", v_num(grid.columns.len() as f64)),
            ("cells", v_num(grid.cell_count() as f64)),
        ]),
    );
    GridOutcome::Rendered {
        synthetic,
        columns: grid.columns.len(),
        cells: grid.cell_count(),
    }
}

const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Terminal stand-in for the page's grid container. Clones share one canvas,
/// so the page can own one handle while the caller keeps another for drawing.
#[derive(Clone, Default)]
pub struct TerminalGridSurface {
    cells: Arc<Mutex<Vec<(usize, usize, u8)>>>,
}

impl TerminalGridSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&self) -> String {
        let cells = match self.cells.lock() {
            Ok(cells) => cells,
            Err(_) => return String::new(),
        };
        let columns = cells.iter().map(|(c, _, _)| c + 1).max().unwrap_or(0);
        let rows = cells.iter().map(|(_, r, _)| r + 1).max().unwrap_or(0);
        let mut canvas = vec![vec![' '; columns]; rows];
        for (column, row, level) in cells.iter() {
            canvas[*row][*column] = SHADES[(*level).min(4) as usize];
        }
        canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl RenderSurface for TerminalGridSurface {
    fn clear(&mut self) {
        if let Ok(mut cells) = self.cells.lock() {
            cells.clear();
        }
    }

    fn place(&mut self, column: usize, row: usize, cell: &Cell) {
        if let Ok(mut cells) = self.cells.lock() {
            cells.push((column, row, cell.level));
        }
    }
}
