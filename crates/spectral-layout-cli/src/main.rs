use serde::Serialize;
use spectral_layout::laplacian::build_laplacian;
use spectral_layout::{AttributeResolver, Graph, SpectralLayout, SpectralOptions};
use std::io::Read;

mod svg;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(spectral_layout::Error),
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

impl From<spectral_layout::Error> for CliError {
    fn from(value: spectral_layout::Error) -> Self {
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
    Render,
    Laplacian,
    Attributes,
}

/// Command-line overrides; `None` keeps the value from `--config` (or the default).
#[derive(Debug, Default)]
struct Overrides {
    scale: Option<f64>,
    third_component: Option<f64>,
    fourth_component: Option<f64>,
    weight_attribute: Option<String>,
    sign_attribute: Option<String>,
    ignore_weight: bool,
    ignore_sign: bool,
    zero_tolerance: Option<f64>,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    out: Option<String>,
    pretty: bool,
    verbose: bool,
    overrides: Overrides,
}

#[derive(Serialize)]
struct LaplacianOut {
    dim: usize,
    sparse: bool,
    rows: Vec<Vec<f64>>,
}

fn usage() -> &'static str {
    "spectral-layout-cli\n\
\n\
USAGE:\n\
  spectral-layout-cli [layout] [--pretty] [OPTIONS] [<path>|-]\n\
  spectral-layout-cli render [--out <path>] [OPTIONS] [<path>|-]\n\
  spectral-layout-cli laplacian [--pretty] [OPTIONS] [<path>|-]\n\
  spectral-layout-cli attributes [<path>|-]\n\
\n\
OPTIONS:\n\
  --config <path>             layout options as JSON (camelCase keys)\n\
  --scale <n>                 positive scale factor (default 1)\n\
  --third <n>                 blend of the third eigenvector into x (default 0)\n\
  --fourth <n>                blend of the fourth eigenvector into y (default 0)\n\
  --weight-attribute <name>   edge weight attribute (default weight)\n\
  --sign-attribute <name>     edge sign attribute (default sign)\n\
  --ignore-weight             treat every edge weight as 1\n\
  --ignore-sign               treat every edge sign as +1\n\
  --zero-tolerance <eps>      |v| <= eps * max(1, max degree) counts as zero (default 1e-9)\n\
  --verbose                   debug logging on stderr (RUST_LOG also applies)\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON graph is read from stdin.\n\
  - A graph is {\"nodes\": [{\"id\": ...}], \"edges\": [{\"source\": ..., \"target\": ..., <attributes>}]}.\n\
  - Command-line options override values from --config.\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(v) = value else {
        return Err(CliError::Usage(usage()));
    };
    v.parse::<f64>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "laplacian" => args.command = Command::Laplacian,
            "attributes" => args.command = Command::Attributes,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--ignore-weight" => args.overrides.ignore_weight = true,
            "--ignore-sign" => args.overrides.ignore_sign = true,
            "--scale" => args.overrides.scale = Some(parse_f64(it.next())?),
            "--third" => args.overrides.third_component = Some(parse_f64(it.next())?),
            "--fourth" => args.overrides.fourth_component = Some(parse_f64(it.next())?),
            "--zero-tolerance" => args.overrides.zero_tolerance = Some(parse_f64(it.next())?),
            "--weight-attribute" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.weight_attribute = Some(name.clone());
            }
            "--sign-attribute" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.sign_attribute = Some(name.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
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

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_options(args: &Args) -> Result<SpectralOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => SpectralOptions::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SpectralOptions::default(),
    };

    let o = &args.overrides;
    if let Some(scale) = o.scale {
        opts.set_scale(scale);
    }
    if let Some(v) = o.third_component {
        opts.third_component = v;
    }
    if let Some(v) = o.fourth_component {
        opts.fourth_component = v;
    }
    if let Some(name) = &o.weight_attribute {
        opts.weight_attribute_name = name.clone();
    }
    if let Some(name) = &o.sign_attribute {
        opts.sign_attribute_name = name.clone();
    }
    if o.ignore_weight {
        opts.weight_ignore = true;
    }
    if o.ignore_sign {
        opts.sign_ignore = true;
    }
    if let Some(tol) = o.zero_tolerance {
        opts.set_zero_tolerance(tol);
    }
    Ok(opts)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut graph: Graph = serde_json::from_str(&text)?;
    let opts = load_options(&args)?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    match args.command {
        Command::Attributes => write_json(&graph.edge_attribute_names(), args.pretty),
        Command::Laplacian => {
            let l = build_laplacian(&graph, &AttributeResolver::new(&opts))?;
            let dense = l.to_dense();
            let out = LaplacianOut {
                dim: l.dim(),
                sparse: l.is_sparse(),
                rows: dense
                    .row_iter()
                    .map(|r| r.iter().copied().collect())
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let result = spectral_layout::layout(&graph, &opts)?;
            write_json(&result, args.pretty)
        }
        Command::Render => {
            let resolver = AttributeResolver::new(&opts);
            let negative: Vec<bool> = graph.edges.iter().map(|e| resolver.sign(e) < 0.0).collect();

            let mut session = SpectralLayout::new(opts.clone());
            session.init(&graph)?;
            session.apply(&mut graph)?;
            let result = spectral_layout::LayoutResult {
                positions: graph
                    .nodes
                    .iter()
                    .map(|n| (n.id.clone(), spectral_layout::Point { x: n.x, y: n.y }))
                    .collect(),
                eigenvalues: session
                    .embedding()
                    .map(|e| e.eigenvalues)
                    .unwrap_or_default(),
            };
            session.end(&mut graph);

            let svg = svg::render_layout_svg(&graph, &result, &negative)?;
            write_text(&svg, args.out.as_deref())
        }
    }
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
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(CliError::Layout(err)) if err.is_input_error() => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
