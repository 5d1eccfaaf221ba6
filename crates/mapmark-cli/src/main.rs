use mapmark::render::StyleRegistry;
use mapmark::{EditorConfig, ExportDocument, MapView};
use std::fmt::Write as _;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Model(mapmark::Error),
    Invalid(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Model(err) => write!(f, "{err}"),
            CliError::Invalid(count) => write!(f, "{count} invalid marker(s)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mapmark::Error> for CliError {
    fn from(value: mapmark::Error) -> Self {
        Self::Model(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Render,
    Validate,
    New,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
}

fn usage() -> &'static str {
    "mapmark-cli\n\
\n\
USAGE:\n\
  mapmark-cli [render] [--pretty] [<path>|-]\n\
  mapmark-cli validate [<path>|-]\n\
  mapmark-cli new [--config <path>] [--pretty]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the export document is read from stdin.\n\
  - render prints an HTML page with one fragment per marker; broken markers render as a placeholder.\n\
  - validate lists every invalid marker and exits with status 1 if there is any.\n\
  - new prints an empty export document at the configured map view.\n\
  - Set RUST_LOG (default: warn) to see diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "validate" => args.command = Command::Validate,
            "new" => args.command = Command::New,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    match args.command {
        Command::New if args.input.is_some() => Err(CliError::Usage(usage())),
        Command::Render | Command::Validate if args.config.is_some() => {
            Err(CliError::Usage(usage()))
        }
        _ => Ok(args),
    }
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

fn load_config(path: Option<&str>) -> Result<EditorConfig, CliError> {
    match path {
        None => Ok(EditorConfig::default()),
        Some(path) => Ok(EditorConfig::from_json_str(&std::fs::read_to_string(path)?)?),
    }
}

fn render_page(doc: &ExportDocument, pretty: bool) -> String {
    let registry = StyleRegistry::builtin();
    let sep = if pretty { "\n" } else { "" };
    let indent = if pretty { "  " } else { "" };

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>");
    out.push_str(sep);
    let _ = write!(
        &mut out,
        r#"<html><head><meta charset="utf-8"><title>mapmark</title></head><body data-center="{},{}" data-zoom="{}">"#,
        doc.map.center[0], doc.map.center[1], doc.map.zoom
    );
    out.push_str(sep);
    for marker in &doc.markers {
        let _ = write!(
            &mut out,
            r#"{indent}<div class="marker" data-lat="{}" data-lon="{}">{}</div>"#,
            marker.lat,
            marker.lon,
            registry.render(&marker.kind, &marker.data),
        );
        out.push_str(sep);
    }
    out.push_str("</body></html>\n");
    out
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Render => {
            let doc = ExportDocument::from_json(&read_input(args.input.as_deref())?)?;
            print!("{}", render_page(&doc, args.pretty));
            Ok(())
        }
        Command::Validate => {
            let doc = ExportDocument::from_json(&read_input(args.input.as_deref())?)?;
            let invalid = doc.invalid_markers();
            for (idx, err) in &invalid {
                println!("marker {idx} ({}): {err}", doc.markers[*idx].kind);
            }
            if !invalid.is_empty() {
                return Err(CliError::Invalid(invalid.len()));
            }
            println!("ok: {} marker(s)", doc.markers.len());
            Ok(())
        }
        Command::New => {
            let config = load_config(args.config.as_deref())?;
            let doc = ExportDocument {
                map: MapView::new(config.map_center(), config.map_zoom()),
                markers: Vec::new(),
            };
            let text = if args.pretty {
                doc.to_json_pretty()?
            } else {
                doc.to_json()?
            };
            println!("{text}");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

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
    tracing::debug!(command = ?args.command, input = ?args.input, "starting");

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
