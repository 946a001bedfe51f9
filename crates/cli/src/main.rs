use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use toolbelt_config::{
    CompositeValuesProvider, ConfigValue, EnvValuesProvider, JsonFileValuesProvider, ParameterBag,
};
use toolbelt_connections::{ConnectionWaiter, tcp};

const WAIT_ATTEMPTS_KEY: &str = "TOOLBELT_WAIT_ATTEMPTS";
const WAIT_DELAY_MS_KEY: &str = "TOOLBELT_WAIT_DELAY_MS";
const CONNECT_TIMEOUT_KEY: &str = "TOOLBELT_CONNECT_TIMEOUT";

#[derive(Debug, Parser)]
#[command(name = "toolbelt", version, about = "Connection waiting and layered configuration lookups")]
struct Cli {
    /// JSON object consulted before the process environment.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Retry a TCP connection until it succeeds or attempts run out.
    Wait(WaitArgs),
    /// Inspect resolved configuration values.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
struct WaitArgs {
    /// Address to connect to, as host:port.
    address: String,
    /// Name used in progress messages. Defaults to the address.
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    attempts: Option<u32>,
    /// Base delay; the n-th retry waits n times this long.
    #[arg(long = "delay-ms")]
    delay_ms: Option<u32>,
    /// Timeout for each connection attempt.
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print one value coerced to the requested type.
    Get {
        key: String,
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
        /// Fail instead of falling back when the key is missing or cannot be coerced.
        #[arg(long, conflicts_with = "default")]
        required: bool,
        /// Value used for a missing key.
        #[arg(long)]
        default: Option<String>,
    },
    /// Fail with every missing key listed when any of `keys` is unset.
    Check {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print every resolved key and value as JSON.
    Dump {
        #[arg(long)]
        show_secrets: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueType {
    String,
    Strings,
    Int,
    Int64,
    Uint,
    Bool,
    /// Whole seconds, or a stored duration.
    Duration,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let bag = build_parameter_bag(cli.config.as_ref())?;

    match cli.command {
        Command::Wait(args) => run_wait(&bag, args),
        Command::Config(command) => run_config(&bag, command),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_parameter_bag(config_path: Option<&PathBuf>) -> Result<ParameterBag> {
    let mut providers = CompositeValuesProvider::default();
    if let Some(path) = config_path {
        let file = JsonFileValuesProvider::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?;
        providers = providers.with_provider(file);
    }
    Ok(ParameterBag::new(providers.with_provider(EnvValuesProvider)))
}

fn run_wait(bag: &ParameterBag, args: WaitArgs) -> Result<()> {
    let attempts = args.attempts.unwrap_or_else(|| bag.read_uint(WAIT_ATTEMPTS_KEY, 10));
    let base_delay = match args.delay_ms {
        Some(millis) => Duration::from_millis(u64::from(millis)),
        None => bag.read_duration(WAIT_DELAY_MS_KEY, Duration::from_millis(1), 1000),
    };
    let timeout = match args.timeout_secs {
        Some(secs) => Duration::from_secs(u64::from(secs)),
        None => bag.read_duration(CONNECT_TIMEOUT_KEY, Duration::from_secs(1), 2),
    };
    if timeout.is_zero() {
        bail!("connection timeout must be greater than zero");
    }
    let name = args.name.unwrap_or_else(|| args.address.clone());

    let waiter = ConnectionWaiter::new(name, attempts).with_base_delay(base_delay);
    let stream = waiter.wait_logged(|| tcp::connect(&args.address, timeout))?;
    let peer = stream.peer_addr().context("reading peer address")?;
    println!("connected to {} ({})", waiter.resource_name(), peer);
    Ok(())
}

fn run_config(bag: &ParameterBag, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Get {
            key,
            value_type,
            required,
            default,
        } => {
            let value = if required {
                read_required(bag, &key, value_type)?
            } else {
                read_lenient(bag, &key, value_type, default.as_deref())
            };
            println!("{}", value);
        }
        ConfigCommand::Check { keys } => {
            bag.check_required_values(&keys)?;
            println!("all {} required values are set", keys.len());
        }
        ConfigCommand::Dump { show_secrets } => {
            let mut entries = bag.to_key_values();
            if !show_secrets {
                toolbelt_util::redact_entries(&mut entries);
            }
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &entries)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn read_required(bag: &ParameterBag, key: &str, value_type: ValueType) -> Result<ConfigValue> {
    let value = match value_type {
        ValueType::String => bag.read_required_string(key)?.into(),
        ValueType::Strings => bag.read_required_strings(key)?.into(),
        ValueType::Int => bag.read_required_int(key)?.into(),
        ValueType::Int64 => bag.read_required_int64(key)?.into(),
        ValueType::Uint => bag.read_required_uint(key)?.into(),
        ValueType::Bool => bag.read_required_bool(key)?.into(),
        ValueType::Duration => bag.read_required_duration(key, Duration::from_secs(1))?.into(),
    };
    Ok(value)
}

/// Lenient reads need a typed default; a `--default` that does not parse as
/// the requested type falls back to that type's zero value.
fn read_lenient(bag: &ParameterBag, key: &str, value_type: ValueType, default: Option<&str>) -> ConfigValue {
    let typed_default = ConfigValue::from(default.unwrap_or_default());
    match value_type {
        ValueType::String => bag.read_string(key, default.unwrap_or_default()).into(),
        ValueType::Strings => bag.read_strings(key, default).into(),
        ValueType::Int => bag.read_int(key, typed_default.to_i64().unwrap_or_default()).into(),
        ValueType::Int64 => bag.read_int64(key, typed_default.to_i64().unwrap_or_default()).into(),
        ValueType::Uint => bag.read_uint(key, typed_default.to_u32().unwrap_or_default()).into(),
        ValueType::Bool => bag.read_bool(key, default.is_some_and(|_| typed_default.to_bool())).into(),
        ValueType::Duration => bag
            .read_duration(key, Duration::from_secs(1), typed_default.to_u32().unwrap_or_default())
            .into(),
    }
}
