use anyhow::Result;
use clap::{Parser, Subcommand};
use comparadb::api::{self, CompareOptions, SnapshotOptions};
use comparadb::config::{resolve_sources, AppSettings};
use comparadb::pg::sqlgen::ScriptOutcome;
use comparadb::provider::save_snapshot;
use comparadb::sink::{write_script, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comparadb")]
#[command(about = "Compare two PostgreSQL schemas and generate an update script", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two schemas and write the script that turns old into new
    Compare {
        /// Current structure: database URL or JSON snapshot
        #[arg(long, env = "COMPARADB_OLD")]
        old: Option<String>,
        /// Desired structure: database URL or JSON snapshot
        #[arg(long, env = "COMPARADB_NEW")]
        new: Option<String>,
        #[arg(long, env = "COMPARADB_SCHEMA", default_value = api::DEFAULT_TARGET_SCHEMA)]
        schema: String,
        /// Settings file with ConnectionStrings.OldDb / NewDb (default: ./appsettings.json if present)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// Print the script instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Capture a schema as a JSON snapshot
    Snapshot {
        #[arg(long)]
        source: String,
        #[arg(long, env = "COMPARADB_SCHEMA", default_value = api::DEFAULT_TARGET_SCHEMA)]
        schema: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            old,
            new,
            schema,
            config,
            output_dir,
            stdout,
        } => {
            let settings = AppSettings::load(config.as_deref())?;
            let sources = resolve_sources(old, new, &settings)?;

            let result = api::compare(
                CompareOptions::new(sources.old, sources.new).with_target_schema(schema),
            )
            .await?;

            match result.outcome {
                ScriptOutcome::NoDifferences => {
                    println!("No differences found between the two databases.");
                }
                ScriptOutcome::Changes(script) if stdout => {
                    print!("{}", script.render());
                }
                ScriptOutcome::Changes(script) => {
                    let timestamp = chrono::Local::now().naive_local();
                    let path = write_script(&output_dir, &script, timestamp)?;
                    println!("Update script written to {}", path.display());
                }
            }
            Ok(())
        }
        Commands::Snapshot {
            source,
            schema,
            output,
        } => {
            let result =
                api::snapshot(SnapshotOptions::new(source).with_target_schema(schema)).await?;

            match output {
                Some(path) => {
                    save_snapshot(&result.schema, &path)?;
                    println!("Snapshot written to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&result.schema)?),
            }
            Ok(())
        }
    }
}
