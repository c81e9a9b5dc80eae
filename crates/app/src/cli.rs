//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spaceport_domain::{ApiDomain, Credential, SpaceId, UserId};

#[derive(Debug, Parser)]
#[command(name = "spaceport", version)]
#[command(about = "Spaceport - export, import and install spaces through the space management API")]
pub struct Cli {
    /// API domain, e.g. webfu.se
    #[arg(long, global = true, env = "SPACEPORT_DOMAIN")]
    pub domain: Option<ApiDomain>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct TokenArg {
    /// Company REST API key
    #[arg(long, env = "SPACEPORT_TOKEN", hide_env_values = true)]
    pub token: Credential,
}

/// Which space an export reads.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ExportTarget {
    /// Export this listed space instead of the first one
    #[arg(long)]
    pub space_id: Option<SpaceId>,

    /// Export this space id without listing spaces first
    #[arg(long)]
    pub manual_id: Option<SpaceId>,
}

/// Where the document to import comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ImportSource {
    /// JSON file to import
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// JSON text to import
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the preset API domains
    Domains {
        /// Save this domain as the default in the settings file
        #[arg(long, value_name = "DOMAIN")]
        set: Option<ApiDomain>,
    },

    /// List the spaces visible to the API key
    Spaces {
        #[command(flatten)]
        auth: TokenArg,
    },

    /// List company users
    Users {
        #[command(flatten)]
        auth: TokenArg,
    },

    /// Export a space and save it as space-export-<id>.json
    Export {
        #[command(flatten)]
        auth: TokenArg,

        #[command(flatten)]
        target: ExportTarget,

        /// Directory to write the export to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the JSON instead of saving it
        #[arg(long)]
        print: bool,
    },

    /// Create a space from a JSON document and assign its admin
    Import {
        #[command(flatten)]
        auth: TokenArg,

        #[command(flatten)]
        source: ImportSource,

        /// Admin user id (defaults to the first company user)
        #[arg(long)]
        admin: Option<UserId>,

        /// Check and print the document without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Browse and install space templates
    #[command(subcommand)]
    Marketplace(MarketplaceCommand),
}

#[derive(Debug, Subcommand)]
pub enum MarketplaceCommand {
    /// List available templates
    List,

    /// Save a template body as <id>.json
    Download {
        /// Template id (its folder in the repository)
        id: String,

        /// Directory to write the template to
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Install a template as a new space
    Install {
        /// Template id (its folder in the repository)
        id: String,

        /// Company REST API key (prompted for when missing)
        #[arg(long, env = "SPACEPORT_TOKEN", hide_env_values = true)]
        token: Option<Credential>,

        /// Admin user id (prompted for when missing)
        #[arg(long)]
        admin: Option<UserId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_of_a_listed_space() {
        let cli = Cli::try_parse_from([
            "spaceport", "--domain", "sbox.net", "export", "--token", "t", "--space-id", "9",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(cli.domain.map(String::from).as_deref(), Some("sbox.net"));
        match cli.command {
            Command::Export { auth, target, print, .. } => {
                assert_eq!(auth.token.authorization_value(), "Token t");
                assert_eq!(target.space_id.map(|id| id.to_string()).as_deref(), Some("9"));
                assert!(target.manual_id.is_none());
                assert!(!print);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn listed_and_manual_space_ids_conflict() {
        let result = Cli::try_parse_from([
            "spaceport", "export", "--token", "t", "--space-id", "9", "--manual-id", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_token_is_rejected() {
        let result = Cli::try_parse_from(["spaceport", "spaces", "--token", "  "]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_domain_to_remember() {
        let cli = Cli::try_parse_from(["spaceport", "domains", "--set", "webfuse.com"])
            .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Command::Domains { set } => {
                assert_eq!(set.map(String::from).as_deref(), Some("webfuse.com"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_import_dry_run() {
        let cli = Cli::try_parse_from([
            "spaceport", "import", "--token", "t", "--json", "{}", "--dry-run",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Command::Import { source, dry_run, .. } => {
                assert_eq!(source.json.as_deref(), Some("{}"));
                assert!(source.file.is_none());
                assert!(dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn import_needs_a_source() {
        let result = Cli::try_parse_from(["spaceport", "import", "--token", "t"]);
        assert!(result.is_err());

        let both = Cli::try_parse_from([
            "spaceport", "import", "--token", "t", "--file", "a.json", "--json", "{}",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn rejects_malformed_domain() {
        let result = Cli::try_parse_from(["spaceport", "--domain", "https://x", "domains"]);
        assert!(result.is_err());
    }
}
