//! Command dispatch over the workflows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use spaceport_application::{
    ExportWorkflow, FileSystem, HeldExport, HttpClient, ImportWorkflow, InstallOutcome,
    InstallSpace, Marketplace, SpaceGateway, SpacesListing, UsersListing,
};
use spaceport_domain::{ApiDomain, CreatedSpace, Credential, KNOWN_DOMAINS, Settings, Template, UserId};
use spaceport_infrastructure::{ReqwestHttpClient, SettingsRepository, TokioFileSystem};
use tracing::info;

use crate::cli::{Command, ImportSource, MarketplaceCommand};
use crate::prompt::StdinPrompt;

/// Everything a command needs, built once from the resolved settings.
pub struct AppContext {
    settings: Settings,
    repository: SettingsRepository,
    gateway: SpaceGateway<ReqwestHttpClient>,
    client: Arc<ReqwestHttpClient>,
}

impl AppContext {
    pub fn new(settings: Settings, repository: SettingsRepository) -> Result<Self> {
        let client = Arc::new(
            ReqwestHttpClient::with_timeout(settings.request_timeout())
                .context("failed to create HTTP client")?,
        );
        let gateway = SpaceGateway::new(Arc::clone(&client), &settings.api_domain);
        Ok(Self {
            settings,
            repository,
            gateway,
            client,
        })
    }

    fn output_dir(&self, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| self.settings.download_dir())
    }

    fn marketplace(&self) -> Marketplace<ReqwestHttpClient, TokioFileSystem> {
        Marketplace::new(
            Arc::clone(&self.client),
            InstallSpace::new(self.gateway.clone()),
            TokioFileSystem::new(),
            self.settings.template_repository.clone(),
        )
    }
}

pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Domains { set: None } => {
            print_domains(&ctx.settings.api_domain);
            Ok(())
        }
        Command::Domains { set: Some(domain) } => {
            remember_domain(&ctx.repository, domain.clone()).await?;
            print_domains(&domain);
            Ok(())
        }
        Command::Spaces { auth } => spaces(ctx, &auth.token).await,
        Command::Users { auth } => users(ctx, &auth.token).await,
        Command::Export {
            auth,
            target,
            output,
            print,
        } => {
            let mut workflow = ExportWorkflow::new(ctx.gateway.clone(), TokioFileSystem::new());
            if let Some(id) = target.manual_id {
                workflow.set_manual_id(Some(id));
                workflow.set_credential(auth.token);
            } else {
                if workflow.fetch_spaces(auth.token).await? == SpacesListing::Empty {
                    bail!("No spaces found.");
                }
                if let Some(id) = &target.space_id {
                    workflow.select_space(id)?;
                }
            }

            let held = workflow.export_space().await?;
            if print {
                println!("{}", held.display_text());
                return Ok(());
            }
            if let HeldExport::Document { space_id, .. } = held {
                eprintln!("Exported space {space_id}.");
            }
            let path = workflow.download_json(&ctx.output_dir(output)).await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Import {
            auth,
            source,
            admin,
            dry_run,
        } => {
            let mut workflow = ImportWorkflow::new(ctx.gateway.clone(), TokioFileSystem::new());
            if dry_run {
                stage(&mut workflow, source).await?;
                workflow.validate_content()?;
                println!("{}", workflow.staged_content().unwrap_or_default());
                return Ok(());
            }
            import(&mut workflow, &auth.token, source, admin).await?;
            if let Some(status) = workflow.status_message() {
                println!("{status}");
            }
            Ok(())
        }
        Command::Marketplace(command) => marketplace(ctx, command).await,
    }
}

/// Stores `domain` as the default in the settings file, keeping other values.
async fn remember_domain(repository: &SettingsRepository, domain: ApiDomain) -> Result<()> {
    let mut stored = repository.load().await?;
    stored.api_domain = domain;
    repository.save(&stored).await?;
    info!(domain = %stored.api_domain, path = ?repository.path(), "default domain saved");
    Ok(())
}

fn print_domains(active: &ApiDomain) {
    for domain in KNOWN_DOMAINS {
        let marker = if *domain == active.as_str() { "*" } else { " " };
        println!("{marker} {domain}");
    }
    if !active.is_known() {
        println!("* {active} (custom)");
    }
}

async fn stage<C: HttpClient, F: FileSystem>(
    workflow: &mut ImportWorkflow<C, F>,
    source: ImportSource,
) -> Result<()> {
    match (source.file, source.json) {
        (Some(path), _) => workflow.stage_file(&path).await?,
        (None, Some(text)) => workflow.edit_content(text),
        (None, None) => bail!("Please select a JSON file to import."),
    }
    Ok(())
}

/// Stages and checks the document before any request, then imports it.
async fn import<C: HttpClient, F: FileSystem>(
    workflow: &mut ImportWorkflow<C, F>,
    credential: &Credential,
    source: ImportSource,
    admin: Option<UserId>,
) -> Result<CreatedSpace> {
    stage(workflow, source).await?;
    workflow.validate_content()?;

    match admin {
        Some(admin) => workflow.select_admin(admin),
        None => {
            if let UsersListing::Empty = workflow.fetch_users(credential).await? {
                bail!("No users found.");
            }
        }
    }

    Ok(workflow.import_space(credential).await?)
}

async fn spaces(ctx: &AppContext, credential: &Credential) -> Result<()> {
    let spaces = ctx.gateway.list_spaces(credential).await?;
    if spaces.is_empty() {
        println!("No spaces found.");
    }
    for space in spaces {
        println!("{}\t{}", space.id, space.name);
    }
    Ok(())
}

async fn users(ctx: &AppContext, credential: &Credential) -> Result<()> {
    let users = ctx.gateway.list_users(credential).await?;
    if users.is_empty() {
        println!("No users found.");
    }
    for user in users {
        println!("{}\t{}", user.id, user.display_name());
    }
    Ok(())
}

async fn marketplace(ctx: &AppContext, command: MarketplaceCommand) -> Result<()> {
    let mut market = ctx.marketplace();
    market.discover_templates().await?;

    match command {
        MarketplaceCommand::List => {
            if market.templates().is_empty() {
                println!("No templates found.");
            }
            for template in market.templates() {
                println!("{}\t{}", template.id, template.name);
            }
            Ok(())
        }
        MarketplaceCommand::Download { id, output } => {
            let template = find(&market, &id)?;
            let path = market.download(template, &ctx.output_dir(output)).await?;
            println!("{}", path.display());
            Ok(())
        }
        MarketplaceCommand::Install { id, token, admin } => {
            let template = find(&market, &id)?;
            let outcome = market.install(template, token, admin, &StdinPrompt).await?;
            match outcome {
                InstallOutcome::Installed(space) => {
                    println!("Template '{}' installed as space {space}.", template.name);
                }
                InstallOutcome::Cancelled => eprintln!("Installation cancelled."),
            }
            Ok(())
        }
    }
}

fn find<'a, F: FileSystem>(
    market: &'a Marketplace<ReqwestHttpClient, F>,
    id: &str,
) -> Result<&'a Template> {
    market
        .find(id)
        .with_context(|| format!("no template named '{id}'"))
}
