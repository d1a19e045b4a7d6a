use arclight::render::raster::{self, RasterOptions};
use arclight::render::{RenderOptions, SheetRenderer};
use arclight::{Bucket, Bundle, ReviewTask};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    UnexpectedFlag {
        flag: &'static str,
        command: &'static str,
    },
    Io(std::io::Error),
    Review(arclight::Error),
    Raster(raster::RasterError),
    Json(serde_json::Error),
    UnknownTask(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::UnexpectedFlag { flag, command } => {
                write!(f, "{flag} does not apply to `{command}`")
            }
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Review(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::UnknownTask(id) => write!(f, "No task {id} in this bundle"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<arclight::Error> for CliError {
    fn from(value: arclight::Error) -> Self {
        Self::Review(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
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
    List,
    Show,
    Render,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show => "show",
            Self::Render => "render",
        }
    }

    /// Flags the command consumes. `--manifest` is global and not checked.
    fn accepts(self, flag: &str) -> bool {
        match self {
            Self::List => matches!(flag, "--bucket" | "--json" | "--pretty"),
            Self::Show => matches!(flag, "--pretty"),
            Self::Render => matches!(
                flag,
                "--format" | "--scale" | "--cell" | "--background" | "--out"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    manifest: Option<String>,
    task: Option<String>,
    bucket: Option<Bucket>,
    json: bool,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    cell_size: f64,
    background: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "arclight-cli\n\
\n\
USAGE:\n\
  arclight-cli list --manifest <path> [--bucket correct|incorrect] [--json [--pretty]]\n\
  arclight-cli show --manifest <path> [--pretty] <task-id>\n\
  arclight-cli render --manifest <path> [--format svg|png|jpg|pdf] [--scale <n>] [--cell <px>] [--background <css-color>] [--out <path>|-] <task-id>\n\
\n\
NOTES:\n\
  - The manifest describes one review bundle; relative paths inside it resolve against its directory.\n\
  - render prints SVG to stdout by default; raster formats default to ./<task-id>.<ext>.\n\
  - Diagnostics go to stderr and follow RUST_LOG (e.g. RUST_LOG=arclight_core=debug).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        cell_size: 28.0,
        ..Default::default()
    };
    // Non-global flags, checked against the command once it is known
    // (flags may precede the subcommand word).
    let mut seen: Vec<&'static str> = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "list" => args.command = Command::List,
            "show" => args.command = Command::Show,
            "render" => args.command = Command::Render,
            "--manifest" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.manifest = Some(path.clone());
            }
            "--bucket" => {
                seen.push("--bucket");
                let Some(bucket) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.bucket = match bucket.trim().to_ascii_lowercase().as_str() {
                    "correct" => Some(Bucket::Correct),
                    "incorrect" => Some(Bucket::Incorrect),
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--json" => {
                seen.push("--json");
                args.json = true;
            }
            "--pretty" => {
                seen.push("--pretty");
                args.pretty = true;
            }
            "--format" => {
                seen.push("--format");
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                seen.push("--scale");
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--cell" => {
                seen.push("--cell");
                let Some(cell) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.cell_size = cell.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.cell_size.is_finite() && args.cell_size > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                seen.push("--background");
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                seen.push("--out");
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            id => {
                if args.task.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.task = Some(id.to_string());
            }
        }
    }

    for flag in seen {
        if !args.command.accepts(flag) {
            return Err(CliError::UnexpectedFlag {
                flag,
                command: args.command.name(),
            });
        }
    }
    // list takes no task id.
    if matches!(args.command, Command::List) && args.task.is_some() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
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

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ListOut<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    correct: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    incorrect: Option<Vec<&'a str>>,
}

#[derive(Serialize)]
struct ShowOut<'a> {
    bucket: Bucket,
    task: &'a ReviewTask,
}

fn bucket_ids(bundle: &Bundle, bucket: Bucket) -> Vec<&str> {
    bundle
        .partition
        .bucket(bucket)
        .iter()
        .map(|t| t.id.as_str())
        .collect()
}

fn require_task<'a>(
    bundle: &'a Bundle,
    task: Option<&str>,
) -> Result<(Bucket, &'a ReviewTask), CliError> {
    let Some(id) = task else {
        return Err(CliError::Usage(usage()));
    };
    bundle
        .partition
        .find(id)
        .ok_or_else(|| CliError::UnknownTask(id.to_string()))
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(manifest) = args.manifest.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let bundle = Bundle::load(Path::new(manifest))?;

    match args.command {
        Command::List => {
            let buckets: &[Bucket] = match args.bucket {
                Some(Bucket::Correct) => &[Bucket::Correct],
                Some(Bucket::Incorrect) => &[Bucket::Incorrect],
                None => &[Bucket::Correct, Bucket::Incorrect],
            };
            if args.json {
                let out = ListOut {
                    correct: buckets
                        .contains(&Bucket::Correct)
                        .then(|| bucket_ids(&bundle, Bucket::Correct)),
                    incorrect: buckets
                        .contains(&Bucket::Incorrect)
                        .then(|| bucket_ids(&bundle, Bucket::Incorrect)),
                };
                write_json(&out, args.pretty)?;
            } else {
                for bucket in buckets {
                    let tasks = bundle.partition.bucket(*bucket);
                    println!("{bucket} ({}):", tasks.len());
                    for task in tasks {
                        println!("  {}", task.id);
                    }
                }
            }
            Ok(())
        }
        Command::Show => {
            let (bucket, task) = require_task(&bundle, args.task.as_deref())?;
            write_json(&ShowOut { bucket, task }, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let (_, task) = require_task(&bundle, args.task.as_deref())?;
            let renderer = SheetRenderer::new()
                .with_palette(bundle.palette.clone())
                .with_options(RenderOptions {
                    cell_size: args.cell_size,
                    ..RenderOptions::default()
                });
            let svg = renderer.sheet_svg(task);

            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };
            match args.render_format {
                RenderFormat::Svg => match args.out.as_deref() {
                    None | Some("-") => print!("{svg}"),
                    Some(path) => std::fs::write(path, svg)?,
                },
                RenderFormat::Png => {
                    let bytes = raster::svg_to_png(&svg, &raster_options)?;
                    let out = args.out.clone().unwrap_or_else(|| format!("{}.png", task.id));
                    write_bytes(&bytes, &out)?;
                }
                RenderFormat::Jpeg => {
                    let bytes = raster::svg_to_jpeg(&svg, &raster_options)?;
                    let out = args.out.clone().unwrap_or_else(|| format!("{}.jpg", task.id));
                    write_bytes(&bytes, &out)?;
                }
                RenderFormat::Pdf => {
                    let bytes = raster::svg_to_pdf(&svg)?;
                    let out = args.out.clone().unwrap_or_else(|| format!("{}.pdf", task.id));
                    write_bytes(&bytes, &out)?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
    // Logs go to stderr so SVG/JSON on stdout stays machine-readable.
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err @ CliError::UnexpectedFlag { .. }) => {
            eprintln!("{err}\n\n{}", usage());
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(CliError::UnknownTask(id)) => {
            eprintln!("{}", CliError::UnknownTask(id));
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
