use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ciscp-convert")]
#[command(about = "Translate Cisco IOS extended ACLs into Check Point objects and rules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Translate an ACL file and write object and rule artifacts.
    Convert(ConvertArgs),
    /// Show tokenized statements and their per-line dispositions.
    Inspect(InspectArgs),
    /// Run the translation without writing artifacts and report findings.
    Verify(VerifyArgs),
    /// Render Check Point management API payloads for a translated ACL.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// ACL file to translate.
    pub input: PathBuf,
    /// Output file for network object descriptors.
    #[arg(long, default_value = "network-objects.txt")]
    pub objects_out: PathBuf,
    /// Output file for normalized rule tuples.
    #[arg(long, default_value = "rules.txt")]
    pub rules_out: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Keep rules shadowed by an earlier ip any-service rule instead of
    /// suppressing them.
    #[arg(long)]
    pub keep_shadowed: bool,
    /// Suppress per-line findings, print the summary only.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// ACL file to inspect.
    pub input: PathBuf,
    /// Show the extracted object set instead of per-line dispositions.
    #[arg(long)]
    pub objects: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// ACL file to verify.
    pub input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Keep rules shadowed by an earlier ip any-service rule.
    #[arg(long)]
    pub keep_shadowed: bool,
    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// ACL file to translate and export.
    pub input: PathBuf,
    /// Output file for the payload JSON; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Optional services TOML file overriding the embedded table.
    #[arg(long)]
    pub services_file: Option<PathBuf>,
    /// Shared access layer the rules target.
    #[arg(long, default_value = "Core")]
    pub layer: String,
    /// Keep rules shadowed by an earlier ip any-service rule.
    #[arg(long)]
    pub keep_shadowed: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
