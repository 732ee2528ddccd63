use byname::{
    config, DynInvocable, DynValue, Error, Invocable, Invoker, InvokerConfig, MethodSet,
};
use clap::{Parser, Subcommand};
use std::{collections::HashMap, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, default_value = "byname.json", global = true)]
    config: PathBuf,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in demo targets
    Targets,

    /// Show the methods a target exposes
    Methods {
        /// Target name
        target: String,
    },

    /// Invoke a method with a JSON argument payload
    Call {
        /// Target name
        target: String,

        /// Method name (case-sensitive)
        method: String,

        /// JSON array of arguments, or a single JSON value
        #[arg(default_value = "[]")]
        args: String,

        /// Invoke through a shared receiver, hiding `&mut self` methods
        #[arg(long)]
        shared: bool,
    },
}

#[derive(Default)]
struct Calculator {
    memory: f64,
}

impl Calculator {
    fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }

    fn divide(&self, a: f64, b: f64) -> Result<f64, String> {
        if b == 0.0 {
            Err("division by zero".to_string())
        } else {
            Ok(a / b)
        }
    }

    fn sum(&self, values: Vec<f64>) -> f64 {
        values.iter().sum()
    }

    fn store(&mut self, value: f64) -> f64 {
        std::mem::replace(&mut self.memory, value)
    }

    fn recall(&self) -> f64 {
        self.memory
    }
}

impl Invocable for Calculator {
    fn register_methods(methods: &mut MethodSet<Self>) {
        methods
            .method("add", Calculator::add)
            .method("divide", Calculator::divide)
            .variadic("sum", Calculator::sum)
            .method("store", Calculator::store)
            .method("recall", Calculator::recall);
    }
}

struct Text;

impl Text {
    fn join(&self, sep: String, parts: Vec<String>) -> String {
        parts.join(&sep)
    }

    fn upper(&self, text: String) -> String {
        text.to_uppercase()
    }

    fn words(&self, text: String) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn count(&self, counts: HashMap<String, u32>) -> u32 {
        counts.values().sum()
    }
}

impl Invocable for Text {
    fn register_methods(methods: &mut MethodSet<Self>) {
        methods
            .variadic("join", Text::join)
            .method("upper", Text::upper)
            .method("words", Text::words)
            .method("count", Text::count);
    }
}

const TARGETS: [&str; 2] = ["calculator", "text"];

fn demo_target(name: &str) -> Result<Box<dyn DynInvocable>, Error> {
    match name {
        "calculator" => Ok(Box::new(Calculator::default())),
        "text" => Ok(Box::new(Text)),
        other => Err(Error::internal(format!(
            "unknown target {} (expected one of: {})",
            other,
            TARGETS.join(", ")
        ))),
    }
}

// Results are opaque; show what the demo targets return and fall back to the type name.
fn render(value: &DynValue) -> String {
    if let Some(v) = value.downcast_ref::<i64>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<u32>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<f64>() {
        v.to_string()
    } else if let Some(v) = value.downcast_ref::<String>() {
        format!("{:?}", v)
    } else if let Some(v) = value.downcast_ref::<Vec<String>>() {
        format!("{:?}", v)
    } else if let Some(v) = value.downcast_ref::<Result<f64, String>>() {
        format!("{:?}", v)
    } else {
        format!("<{}>", value.type_name())
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config: InvokerConfig = if cli.config.exists() {
        config::from_file(&cli.config)?
    } else {
        InvokerConfig::default()
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let invoker = Invoker::new(config);

    match &cli.command {
        Commands::Targets => {
            for name in TARGETS {
                println!("{}", name);
            }
        }
        Commands::Methods { target } => {
            let target = demo_target(target)?;
            for descriptor in target.describe() {
                println!("{}", descriptor);
            }
        }
        Commands::Call {
            target,
            method,
            args,
            shared,
        } => {
            let mut target = demo_target(target)?;
            debug!("invoking {}.{} with {}", target.type_name(), method, args);
            let results = if *shared {
                target.invoke_shared(&invoker, method, args.as_bytes())?
            } else {
                target.invoke_exclusive(&invoker, method, args.as_bytes())?
            };
            let rendered: Vec<String> = results.iter().map(render).collect();
            println!("[{}]", rendered.join(", "));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
