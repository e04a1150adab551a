use chrono::NaiveDate;
use famgraph_core::graph::dot::to_dot;
use famgraph_core::risk::ActiveFlag;
use famgraph_core::{Engine, EngineConfig, FamilyRequest, GraphDescription, RiskAssessment};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FAMGRAPH_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(famgraph_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<famgraph_core::Error> for CliError {
    fn from(value: famgraph_core::Error) -> Self {
        Self::Core(value)
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
    Report,
    Risk,
    Genogram,
    Ecomap,
    Narrative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Json,
    Dot,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: OutputFormat,
    pretty: bool,
    config: Option<String>,
    today: Option<NaiveDate>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskOut {
    #[serde(flatten)]
    assessment: RiskAssessment,
    active_flags: Vec<ActiveFlag>,
}

fn usage() -> &'static str {
    "famgraph-cli\n\
\n\
USAGE:\n\
  famgraph-cli [report] [--pretty] [--config <path>] [--today YYYY-MM-DD] [--out <path>] [<path>|-]\n\
  famgraph-cli risk [--pretty] [--out <path>] [<path>|-]\n\
  famgraph-cli genogram [--format json|dot] [--pretty] [--config <path>] [--today YYYY-MM-DD] [--out <path>] [<path>|-]\n\
  famgraph-cli ecomap [--format json|dot] [--pretty] [--config <path>] [--out <path>] [<path>|-]\n\
  famgraph-cli narrative [--config <path>] [--today YYYY-MM-DD] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the family request JSON is read from stdin.\n\
  - report prints the risk assessment, both graph descriptions and the narrative as one JSON document.\n\
  - --format dot writes Graphviz DOT (genogram and ecomap only).\n\
  - --config takes a JSON file merged over the defaults (e.g. {\"genogram\": {\"twinPairing\": \"siblingGroup\"}}).\n\
  - Set FAMGRAPH_LOG (e.g. FAMGRAPH_LOG=debug) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "report" => args.command = Command::Report,
            "risk" => args.command = Command::Risk,
            "genogram" => args.command = Command::Genogram,
            "ecomap" => args.command = Command::Ecomap,
            "narrative" => args.command = Command::Narrative,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--today" => {
                let Some(date) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.today = Some(
                    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                        .map_err(|_| CliError::Usage(usage()))?,
                );
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

    if args.format == OutputFormat::Dot
        && !matches!(args.command, Command::Genogram | Command::Ecomap)
    {
        return Err(CliError::Usage(
            "--format dot is only available for the genogram and ecomap commands",
        ));
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

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_graph(graph: &GraphDescription, args: &Args) -> Result<(), CliError> {
    match args.format {
        OutputFormat::Json => write_json(graph, args.pretty, args.out.as_deref()),
        OutputFormat::Dot => write_text(&to_dot(graph), args.out.as_deref()),
    }
}

fn load_engine(args: &Args) -> Result<Engine, CliError> {
    let mut engine = Engine::new().with_fixed_today(args.today);
    if let Some(path) = args.config.as_deref() {
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        engine = engine.with_config(EngineConfig::from_value(value))?;
        tracing::debug!(config = %path, "loaded engine config");
    }
    Ok(engine)
}

fn run(args: Args) -> Result<(), CliError> {
    let engine = load_engine(&args)?;
    let text = read_input(args.input.as_deref())?;
    tracing::debug!(command = ?args.command, bytes = text.len(), "read family request");

    match args.command {
        Command::Risk => {
            let request = FamilyRequest::from_json(&text)?;
            let out = RiskOut {
                assessment: engine.assess_risk(&request.risks),
                active_flags: request.risks.active_flags(),
            };
            write_json(&out, args.pretty, args.out.as_deref())
        }
        Command::Genogram => {
            let graph = engine.build_genogram_json(&text)?;
            write_graph(&graph, &args)
        }
        Command::Ecomap => {
            let graph = engine.build_ecomap_json(&text)?;
            write_graph(&graph, &args)
        }
        Command::Narrative => {
            let request = FamilyRequest::from_json(&text)?;
            write_text(&engine.narrative(&request), args.out.as_deref())
        }
        Command::Report => {
            let request = FamilyRequest::from_json(&text)?;
            write_json(&engine.evaluate(&request), args.pretty, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("famgraph-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_report_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Report);
        assert_eq!(args.input, None);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn parses_genogram_flags() {
        let args = parse_args(&argv(&[
            "genogram", "--format", "dot", "--today", "2026-06-01", "--out", "g.dot", "family.json",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Genogram);
        assert_eq!(args.format, OutputFormat::Dot);
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2026, 6, 1));
        assert_eq!(args.out.as_deref(), Some("g.dot"));
        assert_eq!(args.input.as_deref(), Some("family.json"));
    }

    #[test]
    fn dash_means_stdin() {
        let args = parse_args(&argv(&["risk", "-"])).unwrap();
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn rejects_bad_usage() {
        for bad in [
            &["--format"][..],
            &["genogram", "--format", "svg"],
            &["risk", "--format", "dot"],
            &["genogram", "--today", "01/06/2026"],
            &["--bogus"],
            &["a.json", "b.json"],
        ] {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?} should be a usage error"
            );
        }
    }
}
