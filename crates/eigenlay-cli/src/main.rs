use eigenlay::generators;
use eigenlay::{
    AxisChoice, Axes, ChargeModel, EdgeAnchorModel, ForceConfig, ForceModel, Graph, Point,
    SpectralOptions, simulate,
};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(eigenlay::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<eigenlay::Error> for CliError {
    fn from(value: eigenlay::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Simulate,
}

#[derive(Debug, Clone, Copy, Default)]
enum ModelKind {
    #[default]
    Charge,
    Anchor,
}

impl FromStr for ModelKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "charge" => Ok(Self::Charge),
            "anchor" | "edge-anchor" => Ok(Self::Anchor),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Input,
    Cube,
    Random(usize),
}

#[derive(Debug)]
struct Args {
    command: Command,
    source: Source,
    input: Option<String>,
    seed: u64,
    chance: f64,
    spectral: SpectralOptions,
    ticks: usize,
    model: ModelKind,
    config: Option<String>,
    pretty: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Layout,
            source: Source::Input,
            input: None,
            seed: 1,
            chance: generators::DEFAULT_CONNECTION_CHANCE,
            spectral: SpectralOptions::default(),
            ticks: 60,
            model: ModelKind::Charge,
            config: None,
            pretty: false,
        }
    }
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    size: usize,
    axes: Option<Axes>,
    eigenvalues: &'a [f64],
    edges: &'a [(usize, usize)],
    points: &'a [Point],
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<usize>,
}

fn usage() -> &'static str {
    "eigenlay-cli\n\
\n\
USAGE:\n\
  eigenlay-cli [layout] [--pretty] [--digits <n>] [--axes <x>,<y>] [--cube | --random <n> [--seed <s>] [--chance <p>] | <path>|-]\n\
  eigenlay-cli simulate [--ticks <n>] [--model charge|anchor] [--config <path>] [--pretty] [--digits <n>] [--axes <x>,<y>] [--cube | --random <n> [--seed <s>] [--chance <p>] | <path>|-]\n\
\n\
NOTES:\n\
  - If no graph source is given, or <path> is '-', the adjacency matrix is read from stdin.\n\
  - Input is a JSON array of rows, e.g. [[0,1],[1,0]].\n\
  - --axes pins eigenvector columns (solver order) instead of picking the two smallest positive eigenvalues.\n\
  - --config reads a JSON force config: {\"permeability\": 0.03, \"polarity\": \"repel\", \"moment_multiplier\": 0.2}.\n\
  - simulate uses vertex degrees as moments for the charge model.\n\
"
}

fn parse_axes(raw: &str) -> Option<AxisChoice> {
    let (x, y) = raw.split_once(',')?;
    Some(AxisChoice::Pinned {
        x: x.trim().parse().ok()?,
        y: y.trim().parse().ok()?,
    })
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "simulate" => args.command = Command::Simulate,
            "--pretty" => args.pretty = true,
            "--cube" => args.source = Source::Cube,
            "--random" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                args.source = Source::Random(n);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--chance" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chance = p.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(0.0..=1.0).contains(&args.chance) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--digits" => {
                let Some(d) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.spectral.round_digits =
                    d.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--axes" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.spectral.axes = parse_axes(raw).ok_or(CliError::Usage(usage()))?;
            }
            "--ticks" => {
                let Some(t) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.ticks = t.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--model" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.model = kind
                    .parse::<ModelKind>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
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

fn load_graph(args: &Args) -> Result<Graph, CliError> {
    match args.source {
        Source::Cube => Ok(generators::cube()),
        Source::Random(n) => Ok(generators::random_graph(n, args.chance, args.seed)),
        Source::Input => {
            let text = read_input(args.input.as_deref())?;
            let rows: Vec<Vec<f64>> = serde_json::from_str(&text)?;
            Ok(Graph::from_rows(&rows)?)
        }
    }
}

fn load_force_config(path: Option<&str>) -> Result<ForceConfig, CliError> {
    match path {
        None => Ok(ForceConfig::default()),
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let mut graph = load_graph(&args)?;
    graph.set_layout_options(args.spectral);

    let spectrum = if graph.is_empty() {
        None
    } else {
        Some(graph.spectrum()?)
    };
    let axes = spectrum
        .as_ref()
        .map(|s| s.axes(&args.spectral))
        .transpose()?;
    let eigenvalues = spectrum.as_ref().map(|s| s.eigenvalues()).unwrap_or_default();
    let edges = graph.edges();
    let mut points = graph.coordinates()?.to_vec();

    let ticks = match args.command {
        Command::Layout => None,
        Command::Simulate => {
            let config = load_force_config(args.config.as_deref())?;
            let model: Box<dyn ForceModel> = match args.model {
                ModelKind::Charge => Box::new(ChargeModel::from_graph(&graph)),
                ModelKind::Anchor => Box::new(EdgeAnchorModel::from_graph(&graph)),
            };
            points = simulate(&points, &model, &config, args.ticks);
            Some(args.ticks)
        }
    };

    let out = LayoutOut {
        size: graph.size(),
        axes,
        eigenvalues,
        edges: &edges,
        points: &points,
        ticks,
    };
    write_json(&out, args.pretty)
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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("eigenlay-cli")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_simulate_flags() {
        let args = parse_args(&argv(&[
            "simulate", "--random", "9", "--seed", "4", "--ticks", "12", "--model", "anchor",
            "--axes", "1,2",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Simulate));
        assert!(matches!(args.source, Source::Random(9)));
        assert_eq!(args.seed, 4);
        assert_eq!(args.ticks, 12);
        assert!(matches!(args.model, ModelKind::Anchor));
        assert_eq!(args.spectral.axes, AxisChoice::Pinned { x: 1, y: 2 });
    }

    #[test]
    fn stdin_dash_is_an_input_path() {
        let args = parse_args(&argv(&["layout", "-"])).unwrap();
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse_args(&argv(&["--chance", "1.5"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--axes", "1"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--model", "spring"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
    }
}
