/// Mapping Tracer - Shows the flow through Tokens → AST → CompiledMapping
///
/// Usage: cargo run --bin trace_mapping <mapping> [setting-name]
///
/// Environment:
/// - `RUST_LOG`: log filter (default: info)
/// - `SINKMAP_LOG_FORMAT`: "pretty" or "json" (default: pretty)
/// - `SINKMAP_OUTPUT`: "text" or "json" (default: text)

use sinkmap_dsl::{parse, print_mapping, MappingCompiler, Lexer};
use tracing_subscriber::EnvFilter;

const DEFAULT_SETTING: &str = "mapping";

/// Tracer configuration from environment variables.
#[derive(Debug, Clone)]
struct TraceConfig {
    json_logs: bool,
    json_output: bool,
}

impl TraceConfig {
    fn from_env() -> Self {
        Self {
            json_logs: std::env::var("SINKMAP_LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            json_output: std::env::var("SINKMAP_OUTPUT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

fn init_logging(config: &TraceConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --bin trace_mapping <mapping> [setting-name]");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --bin trace_mapping 'c1=value.f1, __ttl=value.ttl'");
        std::process::exit(1);
    }

    let config = TraceConfig::from_env();
    init_logging(&config);

    let mapping = &args[1];
    let setting = args.get(2).map(String::as_str).unwrap_or(DEFAULT_SETTING);
    tracing::info!(setting, "tracing mapping");

    let compiler = MappingCompiler::default();
    let compiled = match compiler.compile(mapping, setting) {
        Ok(compiled) => compiled,
        Err(err) => {
            tracing::error!(line = err.parse.line, column = err.parse.column, "syntax error");
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    if config.json_output {
        match serde_json::to_string_pretty(&compiled) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("TOKENS:");
        for token in Lexer::new(mapping) {
            println!(
                "  {}:{:<4} {}",
                token.span.line,
                token.span.column,
                token.kind.describe()
            );
        }
        println!();

        if let Ok(ast) = parse(mapping) {
            println!("AST: {} entries", ast.entries.len());
            for entry in &ast.entries {
                println!("  {:?} = {:?}", entry.column, entry.field);
            }
            println!();
        }

        println!("MAPPING:");
        for (column, field) in compiled.mapping.iter() {
            println!("  {} -> {}", column.as_cql(), field);
        }
        println!();
        println!("CANONICAL: {}", print_mapping(&compiled.mapping));
        println!();

        if compiled.is_valid() {
            println!("No errors.");
        } else {
            println!("ERRORS:");
            for error in &compiled.errors {
                println!("  - {}", error);
            }
        }
    }

    if !compiled.is_valid() {
        std::process::exit(3);
    }
}
