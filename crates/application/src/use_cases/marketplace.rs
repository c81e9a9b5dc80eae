//! Marketplace workflow: discover, download and install templates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use spaceport_domain::request::RequestSpec;
use spaceport_domain::response::ResponseSpec;
use spaceport_domain::template::{README_FILE, TEMPLATE_FILE};
use spaceport_domain::{CreatedSpace, Credential, RepoEntry, SpaceDocument, Template, UserId};
use tracing::{info, warn};

use super::download::save_download;
use super::install::InstallSpace;
use crate::error::{ApplicationError, ApplicationResult};
use crate::http::{decode, ensure_success};
use crate::ports::{FileSystem, HttpClient, Prompt};

const LISTING_ACCEPT: &str = "application/vnd.github+json";
const TOKEN_QUESTION: &str = "Please enter your Company REST API Key to install this template:";
const ADMIN_QUESTION: &str = "Please enter the User ID for the space admin:";

/// Result of an install request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The operator dismissed a prompt; nothing was sent.
    Cancelled,
    /// The space was created and the admin assigned.
    Installed(CreatedSpace),
}

/// Template marketplace backed by a repository directory listing.
pub struct Marketplace<C: HttpClient, F: FileSystem> {
    client: Arc<C>,
    installer: InstallSpace<C>,
    fs: F,
    repository: String,
    templates: Vec<Template>,
}

impl<C: HttpClient, F: FileSystem> Marketplace<C, F> {
    /// Creates a marketplace rooted at a directory-listing URL.
    pub fn new(
        client: Arc<C>,
        installer: InstallSpace<C>,
        fs: F,
        repository: impl Into<String>,
    ) -> Self {
        let mut repository = repository.into();
        if !repository.ends_with('/') {
            repository.push('/');
        }
        Self {
            client,
            installer,
            fs,
            repository,
            templates: Vec::new(),
        }
    }

    /// Templates found by the last discovery.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Looks up a discovered template by id.
    pub fn find(&self, id: &str) -> Option<&Template> {
        let id = id.trim_matches('/');
        self.templates.iter().find(|template| template.id == id)
    }

    /// Lists the repository and assembles one template per valid directory.
    ///
    /// Directories are looked up concurrently. A directory without both a
    /// readme and a template body, or whose lookup fails, is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository root cannot be listed.
    pub async fn discover_templates(&mut self) -> ApplicationResult<&[Template]> {
        let entries = self.list(&self.repository).await?;
        let folders: Vec<&RepoEntry> = entries.iter().filter(|entry| entry.is_dir()).collect();

        let found = join_all(folders.iter().map(|folder| self.lookup_template(folder))).await;

        self.templates = found.into_iter().flatten().collect();
        info!(
            folders = folders.len(),
            templates = self.templates.len(),
            "templates discovered"
        );
        Ok(&self.templates)
    }

    /// Fetches a template body and saves it pretty-printed as `<id>.json`.
    ///
    /// # Errors
    ///
    /// Returns the fetch, parse or write error.
    pub async fn download(&self, template: &Template, dir: &Path) -> ApplicationResult<PathBuf> {
        let document = self.fetch_body(template).await?;
        save_download(
            &self.fs,
            dir,
            &template.download_file_name(),
            &document.to_pretty_string(),
        )
        .await
    }

    /// Installs the template, prompting for whichever input is missing.
    ///
    /// The credential is asked for first, then the admin user. A dismissed
    /// prompt cancels before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed answers, or any fetch or
    /// install error, including `AdminAssignmentFailed`.
    pub async fn install<P: Prompt>(
        &self,
        template: &Template,
        credential: Option<Credential>,
        admin: Option<UserId>,
        prompt: &P,
    ) -> ApplicationResult<InstallOutcome> {
        let credential = match credential {
            Some(credential) => credential,
            None => {
                let Some(token) = prompt.ask(TOKEN_QUESTION) else {
                    return Ok(InstallOutcome::Cancelled);
                };
                Credential::new(token)?
            }
        };

        let admin = match admin {
            Some(admin) => admin,
            None => {
                let Some(answer) = prompt.ask(ADMIN_QUESTION) else {
                    return Ok(InstallOutcome::Cancelled);
                };
                answer.parse()?
            }
        };

        self.install_with(template, &credential, admin)
            .await
            .map(InstallOutcome::Installed)
    }

    /// Installs a template with already collected inputs.
    ///
    /// # Errors
    ///
    /// Returns any fetch or install error, including `AdminAssignmentFailed`.
    pub async fn install_with(
        &self,
        template: &Template,
        credential: &Credential,
        admin: UserId,
    ) -> ApplicationResult<CreatedSpace> {
        let document = self.fetch_body(template).await?;
        let space = self.installer.execute(credential, &document, admin).await?;
        info!(template = %template.id, space_id = %space.id, "template installed");
        Ok(space)
    }

    async fn lookup_template(&self, folder: &RepoEntry) -> Option<Template> {
        match self.try_lookup_template(folder).await {
            Ok(template) => template,
            Err(error) => {
                warn!(folder = %folder.path, %error, "skipping template folder");
                None
            }
        }
    }

    async fn try_lookup_template(&self, folder: &RepoEntry) -> ApplicationResult<Option<Template>> {
        let url = format!("{}{}", self.repository, folder.path);
        let files = self.list(&url).await?;

        let readme = files.iter().find(|file| file.is_named(README_FILE));
        let body = files.iter().find(|file| file.is_named(TEMPLATE_FILE));
        let (Some(readme), Some(body)) = (readme, body) else {
            return Ok(None);
        };
        let Some(readme_url) = readme.download_url.as_deref() else {
            return Ok(None);
        };

        let description = self.get(readme_url).await?.text();
        Ok(Template::from_listing(folder, body, description))
    }

    async fn fetch_body(&self, template: &Template) -> ApplicationResult<SpaceDocument> {
        let response = self.get(&template.template_url).await?;
        SpaceDocument::parse(&response.text())
            .map_err(|e| {
                ApplicationError::InvalidJson(format!(
                    "Invalid JSON in template {}: {e}",
                    template.template_url
                ))
            })
    }

    async fn list(&self, url: &str) -> ApplicationResult<Vec<RepoEntry>> {
        let request = RequestSpec::get(url).with_header("Accept", LISTING_ACCEPT);
        let response = ensure_success(self.client.execute(&request).await?)?;
        decode(url, &response)
    }

    async fn get(&self, url: &str) -> ApplicationResult<ResponseSpec> {
        let request = RequestSpec::get(url);
        ensure_success(self.client.execute(&request).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gateway::SpaceGateway;
    use crate::test_support::{MemoryFileSystem, ScriptedHttpClient, ScriptedPrompt};
    use pretty_assertions::assert_eq;
    use spaceport_domain::ApiDomain;

    const ROOT: &str = "https://api.github.com/repos/acme/templates/contents/";

    fn marketplace(
        client: &Arc<ScriptedHttpClient>,
    ) -> Marketplace<ScriptedHttpClient, MemoryFileSystem> {
        let gateway = SpaceGateway::new(Arc::clone(client), &ApiDomain::default());
        Marketplace::new(
            Arc::clone(client),
            InstallSpace::new(gateway),
            MemoryFileSystem::new(),
            ROOT,
        )
    }

    fn file(folder: &str, name: &str) -> String {
        format!(
            r#"{{"name":"{name}","path":"{folder}/{name}","type":"file","download_url":"https://raw.test/{folder}/{name}"}}"#
        )
    }

    fn dir(name: &str) -> String {
        format!(r#"{{"name":"{name}","path":"{name}","type":"dir","download_url":null}}"#)
    }

    fn market_template() -> Template {
        Template {
            id: "crm-demo".to_string(),
            name: "Crm Demo".to_string(),
            description: String::new(),
            template_url: "https://raw.test/crm-demo/template.json".to_string(),
        }
    }

    fn repository() -> ScriptedHttpClient {
        ScriptedHttpClient::new()
            .on_get(
                ROOT,
                ResponseSpec::json(
                    200,
                    format!(
                        "[{},{},{},{},{},{}]",
                        dir("crm-demo"),
                        dir("no-readme"),
                        dir("no-body"),
                        dir("broken"),
                        dir("sales-pipeline"),
                        r#"{"name":"LICENSE","path":"LICENSE","type":"file","download_url":"https://raw.test/LICENSE"}"#
                    ),
                ),
            )
            .on_get(
                &format!("{ROOT}crm-demo"),
                ResponseSpec::json(
                    200,
                    format!("[{},{}]", file("crm-demo", "README.md"), file("crm-demo", "Template.JSON")),
                ),
            )
            .on_get(
                &format!("{ROOT}no-readme"),
                ResponseSpec::json(200, format!("[{}]", file("no-readme", "template.json"))),
            )
            .on_get(
                &format!("{ROOT}no-body"),
                ResponseSpec::json(200, format!("[{}]", file("no-body", "readme.md"))),
            )
            .on_get(&format!("{ROOT}broken"), ResponseSpec::json(500, ""))
            .on_get(
                &format!("{ROOT}sales-pipeline"),
                ResponseSpec::json(
                    200,
                    format!(
                        "[{},{}]",
                        file("sales-pipeline", "template.json"),
                        file("sales-pipeline", "readme.md")
                    ),
                ),
            )
            .on_get("https://raw.test/sales-pipeline/readme.md", ResponseSpec::json(200, "Pipeline"))
            .on_get("https://raw.test/crm-demo/README.md", ResponseSpec::json(200, "# CRM demo"))
            .on_get(
                "https://raw.test/crm-demo/Template.JSON",
                ResponseSpec::json(200, r#"{"name":"CRM","widgets":[]}"#),
            )
    }

    #[tokio::test]
    async fn test_discovery_keeps_only_complete_folders() {
        let client = Arc::new(repository());
        let mut market = marketplace(&client);

        let templates = market.discover_templates().await.unwrap().to_vec();

        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["crm-demo", "sales-pipeline"]);
        assert_eq!(templates[0].name, "Crm Demo");
        assert_eq!(templates[0].description, "# CRM demo");
        assert_eq!(templates[0].template_url, "https://raw.test/crm-demo/Template.JSON");
        assert_eq!(templates[1].name, "Sales Pipeline");
        assert!(market.find("/crm-demo/").is_some());
        assert!(market.find("no-readme").is_none());
    }

    #[tokio::test]
    async fn test_root_listing_failure_is_an_error() {
        let client = Arc::new(ScriptedHttpClient::new().on_get(ROOT, ResponseSpec::json(403, "rate limited")));
        let mut market = marketplace(&client);

        let error = market.discover_templates().await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(market.templates().is_empty());
    }

    #[tokio::test]
    async fn test_download_pretty_prints_body() {
        let client = Arc::new(repository());
        let mut market = marketplace(&client);
        market.discover_templates().await.unwrap();
        let template = market.find("crm-demo").unwrap().clone();

        let path = market.download(&template, Path::new("/dl")).await.unwrap();

        assert_eq!(path, Path::new("/dl/crm-demo.json"));
        assert_eq!(
            market.fs.contents(&path).unwrap(),
            "{\n  \"name\": \"CRM\",\n  \"widgets\": []\n}"
        );
    }

    #[tokio::test]
    async fn test_install_prompts_then_runs_both_posts() {
        let client = Arc::new(
            repository()
                .on_post(
                    "https://webfu.se/api/spaces/import/",
                    ResponseSpec::json(201, r#"{"id":5,"name":"CRM"}"#),
                )
                .on_post("https://webfu.se/api/spaces/5/members/", ResponseSpec::json(201, "{}")),
        );
        let mut market = marketplace(&client);
        market.discover_templates().await.unwrap();
        let template = market.find("crm-demo").unwrap().clone();
        let prompt = ScriptedPrompt::new(&[Some("tok_abc"), Some("12")]);

        let outcome = market.install(&template, None, None, &prompt).await.unwrap();

        match outcome {
            InstallOutcome::Installed(space) => assert_eq!(space.id.as_str(), "5"),
            InstallOutcome::Cancelled => panic!("install was cancelled"),
        }
        assert_eq!(prompt.questions().len(), 2);
        let member = client
            .requests()
            .into_iter()
            .find(|r| r.url.ends_with("/members/"))
            .unwrap();
        assert_eq!(member.body.content, r#"{"member":12,"role":"admin"}"#);
        assert_eq!(member.headers.get("Authorization"), Some("Token tok_abc"));
    }

    #[tokio::test]
    async fn test_dismissed_prompt_cancels_without_requests() {
        let client = Arc::new(ScriptedHttpClient::new());
        let market = marketplace(&client);
        let template = market_template();

        let outcome = market
            .install(&template, None, None, &ScriptedPrompt::new(&[Some("tok"), None]))
            .await
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Cancelled);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_known_inputs_are_not_prompted_for() {
        let client = Arc::new(ScriptedHttpClient::new());
        let market = marketplace(&client);
        let template = market_template();
        let prompt = ScriptedPrompt::new(&[None]);

        let outcome = market
            .install(&template, Some(Credential::new("tok").unwrap()), None, &prompt)
            .await
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Cancelled);
        assert_eq!(prompt.questions(), vec![ADMIN_QUESTION.to_string()]);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_install_admin_failure_is_partial() {
        let client = Arc::new(
            repository()
                .on_post(
                    "https://webfu.se/api/spaces/import/",
                    ResponseSpec::json(201, r#"{"id":5,"name":"CRM"}"#),
                )
                .on_post("https://webfu.se/api/spaces/5/members/", ResponseSpec::json(404, "")),
        );
        let mut market = marketplace(&client);
        market.discover_templates().await.unwrap();
        let template = market.find("crm-demo").unwrap().clone();

        let error = market
            .install_with(&template, &Credential::new("t").unwrap(), UserId::new(3).unwrap())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::PartialFailure);
        assert!(error.to_string().contains("CRM (ID: 5)"));
    }
}
