use anyhow::{anyhow, bail, Context};
use clap::Parser;
use leetroute::sdk::{
    config::Config,
    export::{export_route, BlobSink, LocalSink, Sink},
    geo::{Location, Point},
    routing::{
        provider::AlternativeRoutes, DirectionsOptions, Geocoder, OrsProvider, PhotonGeocoder,
        RoutingError, RoutingProvider, Units,
    },
    util::log::init_logging,
};

/// Route between two places and export the route as KML, GPX and JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start: a free-text place query or a "lat,lon" pair
    #[arg(short, long)]
    from: String,

    /// Destination: a free-text place query or a "lat,lon" pair
    #[arg(short, long)]
    to: String,

    /// Distance units requested from the routing engine
    #[arg(short, long, value_enum, default_value_t = Units::Miles)]
    units: Units,

    /// Ask the routing engine for alternative routes
    #[arg(long)]
    alternatives: bool,

    /// [Optional] Which of the returned routes to export (0 is the best one)
    #[arg(long, default_value_t = 0)]
    route: usize,

    /// Upload the artifacts to blob storage instead of writing them locally
    #[arg(long)]
    remote: bool,

    /// More log output; repeat for HTTP internals too
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Coordinates are named through reverse geocoding; queries take the first hit.
fn resolve(geocoder: &dyn Geocoder, input: &str) -> anyhow::Result<Location> {
    if let Ok(point) = input.parse::<Point>() {
        let name = geocoder
            .reverse(point, 1)
            .with_context(|| format!("reverse geocoding {}", point))?
            .into_iter()
            .next()
            .map(|place| place.name)
            .unwrap_or_else(|| point.to_string());
        return Ok(Location::new(point, name));
    }

    let place = geocoder
        .search(input, 1, None)
        .with_context(|| format!("searching for \"{}\"", input))?
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::NoResults(input.to_string()))?;
    log::info!("Resolved \"{}\" to {}", input, place.displayname);
    Ok(place.into_location())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // --- 1. Configuration and collaborators ---
    let config = Config::from_env().context("loading configuration")?;
    let provider = OrsProvider::from_config(&config).context("building routing client")?;
    let geocoder = PhotonGeocoder::from_config(&config).context("building geocoder client")?;

    let sink: Box<dyn Sink> = if cli.remote {
        let token = config
            .blob_token
            .clone()
            .ok_or_else(|| anyhow!("--remote needs BLOB_READ_WRITE_TOKEN"))?;
        Box::new(BlobSink::new(token)?)
    } else {
        Box::new(LocalSink::new(&config.export_dir))
    };

    // --- 2. Endpoints ---
    let start = resolve(&geocoder, &cli.from)?;
    let dest = resolve(&geocoder, &cli.to)?;
    log::info!("Routing from {} to {}", start, dest);

    // --- 3. Directions ---
    let options = DirectionsOptions {
        units: cli.units,
        alternative_routes: cli.alternatives.then(AlternativeRoutes::default),
        ..Default::default()
    };
    let directions = provider
        .get_directions(start.coords, dest.coords, &options)
        .context("requesting directions")?;
    if directions.routes.is_empty() {
        bail!("the routing engine returned no route");
    }
    let route = directions.routes.get(cli.route).ok_or_else(|| {
        anyhow!(
            "route {} requested but only {} returned",
            cli.route,
            directions.routes.len()
        )
    })?;

    // --- 4. Export ---
    let locators = export_route(route, &start, &dest, sink.as_ref(), &config.export_settings())
        .context("exporting route")?;
    println!("{}", serde_json::to_string_pretty(&locators)?);

    Ok(())
}
