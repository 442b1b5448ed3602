use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use dobato_core::overlay::{MapSurface, MarkerIcon, OverlayHandle, PathStyle};
use dobato_core::resolve::NominatimResolver;
use dobato_core::route::models::types::Coordinate;
use dobato_core::route::prelude::haversine_distance;
use dobato_core::search::{SearchConfig, SearchEngine};

#[derive(Parser, Debug)]
#[command(
    name = "route-demo",
    about = "Search two places in a country and pick one of two synthesized routes",
    long_about = "Resolves both place names through Nominatim, prints the two \
                  candidate paths and the simulated hazard corridor as overlay \
                  commands, then lets you pick route A or B interactively."
)]
struct Args {
    /// Start place name
    start: String,

    /// Destination place name
    end: String,

    /// Country qualifier appended to both lookups
    #[arg(short, long, default_value = "Nepal")]
    country: String,
}

/// Map surface that narrates overlay commands to stdout.
struct ConsoleSurface {
    next_handle: AtomicU64,
}

impl ConsoleSurface {
    fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(0),
        }
    }

    fn handle(&self) -> OverlayHandle {
        OverlayHandle(self.next_handle.fetch_add(1, Ordering::SeqCst))
    }
}

impl MapSurface for ConsoleSurface {
    fn add_path(&self, points: &[Coordinate], style: PathStyle) -> OverlayHandle {
        let handle = self.handle();
        let waypoints: Vec<String> = points.iter().map(|p| p.to_string()).collect();
        println!("[map] {handle} path {} {}", style.color, waypoints.join(" -> "));
        handle
    }

    fn add_marker(&self, position: Coordinate, icon: MarkerIcon) -> OverlayHandle {
        let handle = self.handle();
        println!("[map] {handle} marker {icon:?} at {position}");
        handle
    }

    fn remove_overlay(&self, handle: OverlayHandle) {
        println!("[map] remove {handle}");
    }

    fn fit_bounds(&self, handles: &[OverlayHandle]) {
        println!("[map] fit bounds over {} overlays", handles.len());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let resolver = NominatimResolver::new(&args.country).context("building resolver")?;
    let engine = SearchEngine::new(
        Arc::new(resolver),
        Arc::new(ConsoleSurface::new()),
        SearchConfig::default(),
    );

    let session = match engine.search(&args.start, &args.end).await {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    println!();
    println!("Start: {}", session.endpoints.start.label);
    println!("End:   {}", session.endpoints.end.label);
    println!(
        "Crow-flight distance: {:.1} km",
        haversine_distance(
            session.endpoints.start.location,
            session.endpoints.end.location
        ) / 1000.0
    );
    println!();
    for candidate in [&session.routes.a, &session.routes.b] {
        println!(
            "Route {}: {:.1} km via {}",
            candidate.id,
            candidate.length_meters() / 1000.0,
            candidate.points()[1]
        );
    }
    println!();
    println!("Simulated hazards along the corridor (not live data):");
    for hazard in &session.hazards {
        println!("  {} at {}: {}", hazard.kind, hazard.position, hazard.reason);
    }

    // Selection loop; empty input quits.
    loop {
        print!("\nSelect route [A/B, empty to quit]: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        match engine.select_route_named(line) {
            Ok(explanation) => {
                println!("Route {}: {}", explanation.route, explanation.summary)
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
