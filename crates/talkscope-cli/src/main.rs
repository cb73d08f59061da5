use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use talkscope::raster::{RasterError, RasterOptions};
use talkscope::{
    CatalogTag, ChartKind, Dashboard, DashboardConfig, DashboardError, DurationRange,
    OccupationPath, TagCatalog, load_csv_str,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Dashboard(DashboardError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Dashboard(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DashboardError> for CliError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<talkscope::Error> for CliError {
    fn from(value: talkscope::Error) -> Self {
        Self::Dashboard(value.into())
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Catalog,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

fn parse_chart(name: &str) -> Option<ChartKind> {
    let name = name.trim().to_ascii_lowercase();
    ChartKind::DEPENDENCY_ORDER
        .into_iter()
        .find(|kind| kind.name() == name)
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    duration: Option<DurationRange>,
    tags: Vec<String>,
    focus: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    chart: Option<ChartKind>,
    out_dir: Option<String>,
}

fn usage() -> &'static str {
    "talkscope-cli\n\
\n\
USAGE:\n\
  talkscope-cli catalog [--config <file.json>] [--pretty] [<talks.csv>|-]\n\
  talkscope-cli layout [--config <file.json>] [--duration <min:max>] [--tag <name>]... [--focus <A/B/C>] [--pretty] [<talks.csv>|-]\n\
  talkscope-cli render [--config <file.json>] [--duration <min:max>] [--tag <name>]... [--focus <A/B/C>] [--chart circle-pack|beeswarm|line-chart|chord] [--format svg|png] [--scale <n>] [--background <css-color>] [--out-dir <dir>] [<talks.csv>|-]\n\
\n\
NOTES:\n\
  - If <talks.csv> is omitted or '-', input is read from stdin.\n\
  - --tag toggles a tag as a chord click would; repeat it to select several (the oldest is evicted past capacity).\n\
  - --focus zooms the circle pack to an occupation group before the charts are captured.\n\
  - render prints the SVG of a single --chart to stdout unless --out-dir is given; otherwise\n\
    every chart is written to <out-dir>/<chart>.<format> (default out-dir: current directory).\n\
  - Set RUST_LOG to change the log filter (default: talkscope=info, written to stderr).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "catalog" => args.command = Command::Catalog,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--duration" => {
                let Some(range) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.duration =
                    Some(DurationRange::parse(range).ok_or(CliError::Usage(usage()))?);
            }
            "--tag" => {
                let Some(tag) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.tags.push(tag.trim().to_string());
            }
            "--focus" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(path.clone());
            }
            "--chart" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart = Some(parse_chart(name).ok_or(CliError::Usage(usage()))?);
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(dir.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_config(path: Option<&str>) -> Result<DashboardConfig, CliError> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(DashboardConfig::from_json_str(&text)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct CatalogOut<'a> {
    talks: usize,
    duration: DurationRange,
    tags: Vec<&'a CatalogTag>,
}

/// Replays the scripted interactions in the order a user would: duration, tags, then zoom.
fn apply_script(dashboard: &mut Dashboard, args: &Args) -> Result<(), CliError> {
    if let Some(range) = args.duration {
        dashboard.set_duration(range)?;
    }
    for tag in &args.tags {
        dashboard.toggle_tag(tag)?;
    }
    if let Some(focus) = args.focus.as_deref() {
        let path = OccupationPath::parse(focus)?;
        if !path.is_root() {
            dashboard.focus(&path)?;
            dashboard.finish();
        }
    }
    debug!(
        duration = %dashboard.selection().duration(),
        tags = ?dashboard.selection().tags(),
        path = %dashboard.selection().path(),
        "script applied"
    );
    Ok(())
}

fn render(dashboard: &Dashboard, args: &Args) -> Result<(), CliError> {
    let kinds = match args.chart {
        Some(kind) => vec![kind],
        None => ChartKind::DEPENDENCY_ORDER.to_vec(),
    };

    if args.out_dir.is_none() && args.chart.is_some() && args.render_format == RenderFormat::Svg {
        if let Some(svg) = kinds.first().and_then(|k| dashboard.svg(*k)) {
            print!("{svg}");
        }
        return Ok(());
    }

    let dir = PathBuf::from(args.out_dir.as_deref().unwrap_or("."));
    std::fs::create_dir_all(&dir)?;
    let raster = RasterOptions {
        scale: args.render_scale,
        background: args
            .background
            .clone()
            .or_else(|| RasterOptions::default().background),
    };
    for kind in kinds {
        let out = dir.join(format!("{}.{}", kind.name(), args.render_format.extension()));
        match args.render_format {
            RenderFormat::Svg => {
                let svg = dashboard.svg(kind).ok_or(RasterError::NotDrawn {
                    chart: kind.name(),
                })?;
                std::fs::write(&out, svg)?;
            }
            RenderFormat::Png => {
                std::fs::write(&out, dashboard.render_png(kind, &raster)?)?;
            }
        }
        info!(chart = kind.name(), path = %out.display(), "chart written");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let config = read_config(args.config.as_deref())?;

    if args.command == Command::Catalog {
        let dataset = load_csv_str(&text)?;
        let catalog = TagCatalog::from_records(dataset.records(), config.tags().top_n);
        let out = CatalogOut {
            talks: dataset.len(),
            duration: dataset.duration_bounds(),
            tags: catalog.iter().collect(),
        };
        return write_json(&out, args.pretty);
    }

    let mut dashboard = Dashboard::from_csv_str(&text, &config)?;
    apply_script(&mut dashboard, &args)?;

    match args.command {
        Command::Layout => write_json(&dashboard.layouts(), args.pretty),
        Command::Render => render(&dashboard, &args),
        Command::Catalog => Ok(()),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("talkscope=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
