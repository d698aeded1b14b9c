//! Ember CLI
//!
//! Command-line interface for interacting with an Ember cache server.

use clap::{Parser, Subcommand};
use ember_client::Client;
use tracing_subscriber::{fmt, EnvFilter};

/// Ember CLI
#[derive(Parser, Debug)]
#[command(name = "ember-cli")]
#[command(about = "CLI for the Ember in-memory cache server")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "ember://127.0.0.1:7690")]
    server: String,

    /// Auth token
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the server
    Ping,

    /// Print the server version
    Version,

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// TTL in seconds (0 = no expiry)
        #[arg(default_value = "0")]
        ttl: u32,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Check whether a key exists
    Has {
        /// The key to check
        key: String,
    },

    /// Get a value without touching its eviction standing
    Peek {
        /// The key to peek
        key: String,
    },

    /// Update a key's TTL
    Ttl {
        /// The key to update
        key: String,

        /// TTL in seconds (0 = no expiry)
        ttl: u32,
    },

    /// Print the byte size of a key's value
    Size {
        /// The key to size
        key: String,
    },

    /// Remove every object from the cache
    Wipe,

    /// Change the cache's maximum size in bytes
    Resize {
        /// New maximum size in bytes
        size: u64,
    },

    /// Change the active eviction policy
    Policy {
        /// Policy name
        policy: String,
    },

    /// Print the server status record
    Status,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ember_client=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> ember_client::Result<()> {
    let mut client = Client::connect(&args.server)?;

    if let Some(token) = &args.token {
        client.auth(token)?;
    }

    match args.command {
        Commands::Ping => println!("{}", client.ping()?),
        Commands::Version => println!("{}", client.version()?),
        Commands::Get { key } => println!("{}", client.get(&key)?),
        Commands::Set { key, value, ttl } => println!("{}", client.set(&key, &value, ttl)?),
        Commands::Del { key } => println!("{}", client.del(&key)?),
        Commands::Has { key } => println!("{}", client.has(&key)?),
        Commands::Peek { key } => println!("{}", client.peek(&key)?),
        Commands::Ttl { key, ttl } => println!("{}", client.ttl(&key, ttl)?),
        Commands::Size { key } => println!("{}", client.size(&key)?),
        Commands::Wipe => println!("{}", client.wipe()?),
        Commands::Resize { size } => println!("{}", client.resize(size)?),
        Commands::Policy { policy } => println!("{}", client.policy(&policy)?),
        Commands::Status => print_status(&client.status()?),
    }

    client.disconnect()
}

fn print_status(status: &ember_client::Status) {
    println!("pid:          {}", status.pid());
    println!("max size:     {}", status.max_size());
    println!("used size:    {}", status.used_size());
    println!("objects:      {}", status.num_objects());
    println!("rss:          {}", status.rss());
    println!("hwm:          {}", status.hwm());
    println!("total gets:   {}", status.total_gets());
    println!("total sets:   {}", status.total_sets());
    println!("total dels:   {}", status.total_dels());
    println!("miss ratio:   {:.4}", status.miss_ratio());
    println!("policies:     {}", status.policies().join(", "));
    println!("policy:       {}", status.policy());
    println!("auto policy:  {}", status.is_auto_policy());
    println!("uptime:       {} ms", status.uptime());
}
