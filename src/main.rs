use citeright::{
    annotate, resolve, MatcherOptions, PatternRegistry, ResolveContext, Segment, StatuteNameSet,
};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let registry = match build_registry(config.laws_file.as_deref()) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let segments = annotate(&config.input, &registry);
    let ctx = ResolveContext::default();

    if config.json {
        print_json(&segments, &ctx);
    } else {
        print_plain(&segments, &ctx);
    }
}

fn build_registry(laws_file: Option<&str>) -> Result<PatternRegistry, String> {
    match laws_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|err| format!("cannot read {path}: {err}"))?;
            let names = StatuteNameSet::from_json(&json).map_err(|err| err.to_string())?;
            PatternRegistry::with_statutes(&names, &MatcherOptions::default())
                .map_err(|err| err.to_string())
        }
        None => Ok(PatternRegistry::new()),
    }
}

fn print_plain(segments: &[Segment], ctx: &ResolveContext) {
    for segment in segments {
        let Segment::Citation(m) = segment else { continue };
        match resolve(m, ctx) {
            Ok(resolved) => {
                let target = match resolved.target.url() {
                    Some(url) => url.to_string(),
                    None => format!("{:?}", resolved.target),
                };
                println!("{:>5}..{:<5} {:26} {}  ->  {}", m.start, m.end, m.kind.name(), m.text, target);
            }
            Err(err) => eprintln!("warning: {err}"),
        }
    }
}

fn print_json(segments: &[Segment], ctx: &ResolveContext) {
    let mut entries = Vec::new();
    for segment in segments {
        let Segment::Citation(m) = segment else { continue };
        if let Ok(resolved) = resolve(m, ctx) {
            entries.push(serde_json::json!({
                "kind": m.kind.name(),
                "text": m.text,
                "start": m.start,
                "end": m.end,
                "citation": resolved.citation,
                "target": resolved.target,
            }));
        }
    }
    match serde_json::to_string_pretty(&entries) {
        Ok(out) => println!("{out}"),
        Err(err) => eprintln!("error: {err}"),
    }
}

struct CliConfig {
    input: String,
    laws_file: Option<String>,
    json: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut laws_file: Option<String> = None;
    let mut json = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("citeright {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--laws" => {
                let value = args.next().ok_or_else(|| "error: --laws expects a path".to_string())?;
                laws_file = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(other.to_string());
            }
            other => return Err(format!("error: unexpected argument `{other}` (see --help)")),
        }
    }

    let input = match input {
        Some(input) => input,
        None => {
            if io::stdin().is_terminal() {
                return Err("error: no input (pass text as an argument or pipe it in)".to_string());
            }
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| format!("error: cannot read stdin: {err}"))?;
            buf
        }
    };

    Ok(CliConfig { input, laws_file, json })
}

fn print_help() {
    println!(
        "citeright - find Taiwanese legal citations in text

USAGE:
    citeright [OPTIONS] [TEXT]
    echo TEXT | citeright [OPTIONS]

OPTIONS:
    -i, --input <TEXT>   Text to scan (alternative to positional/stdin)
        --laws <FILE>    JSON file of statute names to enable statute matching
        --json           Emit matches as JSON
    -h, --help           Show this help
    -V, --version        Show version

Set RUST_LOG=citeright=debug for scan/resolve traces."
    );
}
