mod add;
mod ddl;
mod diagram;
mod init;
mod remove;
mod show;
mod update;
mod validate;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vault-modeler")]
#[command(version)]
#[command(about = "Model Data Vault 2.0 schemas and generate Mermaid diagrams and SQL DDL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Entity kind argument for the remove command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Hub,
    Link,
    Satellite,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty project file
    Init {
        /// Project file to create (.yaml, .yml, or .json)
        file: PathBuf,

        /// Project name (default: the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Project description
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Add a hub to the project
    AddHub {
        /// Project file
        file: PathBuf,

        /// Hub name (unique within the project)
        name: String,

        /// Name of the natural-key column
        #[arg(short = 'k', long)]
        business_key: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Add a link connecting hubs
    AddLink {
        /// Project file
        file: PathBuf,

        /// Link name (unique within the project)
        name: String,

        /// Referenced hub names, comma-separated (order drives FK order)
        #[arg(long)]
        hubs: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Add a satellite to a hub or link
    AddSatellite {
        /// Project file
        file: PathBuf,

        /// Satellite name (unique per parent)
        name: String,

        /// Parent reference as kind:name, e.g. hub:Customer or link:Purchase
        #[arg(short, long)]
        parent: String,

        /// Attribute list as name:type pairs, comma-separated
        /// (types: string, integer, float, decimal, boolean, datetime, date)
        #[arg(short, long)]
        attributes: Option<String>,
    },

    /// Update a hub's name and/or business key
    UpdateHub {
        /// Project file
        file: PathBuf,

        /// Hub to update
        name: String,

        /// New hub name
        #[arg(long)]
        rename: Option<String>,

        /// New natural-key column name
        #[arg(short = 'k', long)]
        business_key: Option<String>,
    },

    /// Update a link's name and/or referenced hub set
    UpdateLink {
        /// Project file
        file: PathBuf,

        /// Link to update
        name: String,

        /// New link name
        #[arg(long)]
        rename: Option<String>,

        /// Replacement hub names, comma-separated (order drives FK order)
        #[arg(long)]
        hubs: Option<String>,
    },

    /// Update a satellite's name, parent, and/or attributes
    UpdateSatellite {
        /// Project file
        file: PathBuf,

        /// Satellite to update
        name: String,

        /// New satellite name
        #[arg(long)]
        rename: Option<String>,

        /// New parent reference as kind:name, e.g. hub:Customer
        #[arg(short, long)]
        parent: Option<String>,

        /// Replacement attribute list as name:type pairs, comma-separated
        #[arg(short, long)]
        attributes: Option<String>,
    },

    /// Remove an entity from the project
    Remove {
        /// Project file
        file: PathBuf,

        /// Entity kind to remove
        #[arg(value_enum)]
        kind: EntityKind,

        /// Entity name
        name: String,

        /// Leave dependent satellites and link memberships in place
        /// (their references go dangling; renderers omit them)
        #[arg(long)]
        keep_dependents: bool,
    },

    /// Show a summary of the project
    Show {
        /// Project file
        file: PathBuf,

        /// Output the full model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a Mermaid diagram from the project
    Diagram {
        /// Project file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram format: er or class
        #[arg(short, long, default_value = "er")]
        format: String,

        /// Only include entities matching these glob patterns (comma-separated)
        #[arg(long)]
        entities: Option<String>,

        /// Exclude entities matching these glob patterns (comma-separated)
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Generate CREATE TABLE DDL from the project
    Ddl {
        /// Project file
        file: PathBuf,

        /// Output file or directory (default: stdout; a directory gets
        /// <project name>_ddl.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the project model for latent issues
    Validate {
        /// Project file
        file: PathBuf,

        /// Treat warnings as errors (non-zero exit on any issue)
        #[arg(long)]
        strict: bool,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init {
            file,
            name,
            description,
            force,
        } => init::run(file, name, description, force),
        Commands::AddHub {
            file,
            name,
            business_key,
            description,
        } => add::add_hub(file, name, business_key, description),
        Commands::AddLink {
            file,
            name,
            hubs,
            description,
        } => add::add_link(file, name, hubs, description),
        Commands::AddSatellite {
            file,
            name,
            parent,
            attributes,
        } => add::add_satellite(file, name, parent, attributes),
        Commands::UpdateHub {
            file,
            name,
            rename,
            business_key,
        } => update::update_hub(file, name, rename, business_key),
        Commands::UpdateLink {
            file,
            name,
            rename,
            hubs,
        } => update::update_link(file, name, rename, hubs),
        Commands::UpdateSatellite {
            file,
            name,
            rename,
            parent,
            attributes,
        } => update::update_satellite(file, name, rename, parent, attributes),
        Commands::Remove {
            file,
            kind,
            name,
            keep_dependents,
        } => remove::run(file, kind, name, keep_dependents),
        Commands::Show { file, json } => show::run(file, json),
        Commands::Diagram {
            file,
            output,
            format,
            entities,
            exclude,
        } => diagram::run(file, output, format, entities, exclude),
        Commands::Ddl { file, output } => ddl::run(file, output),
        Commands::Validate { file, strict, json } => validate::run(file, strict, json),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "vault-modeler",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
