use crate::compliance::domain::RemoteSource;
use crate::ports::outbound::SourceLocator;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Remote lookups give up after this long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const GITHUB_TEMPLATE: &str = "{repo}/blob/{commit}/{file}";
const GITLAB_TEMPLATE: &str = "{repo}/-/blob/{commit}/{file}";
const BITBUCKET_TEMPLATE: &str = "{repo}/src/{commit}/{file}";
const GOOGLESOURCE_TEMPLATE: &str = "{repo}/+/{commit}/{file}";

static GO_IMPORT_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+name=["']go-import["']\s+content=["']([^"']+)["']"#)
        .expect("go-import pattern is valid")
});

/// `v0.0.0-20191109021931-daa7c04131f5` and the pre-release/patch forms
static PSEUDO_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(?:[0-9A-Za-z-]+\.)*[0-9]{14}-([0-9a-f]{12})$")
        .expect("pseudo-version pattern is valid")
});

static RELEASE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v[0-9]+\.[0-9]+\.[0-9]+").expect("release version pattern is valid")
});

static MAJOR_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|/)v[0-9]+$").expect("major version pattern is valid"));

/// Repository root of a module, before the revision is known
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepoRoot {
    url: String,
    template: &'static str,
    subdir: String,
}

/// HostingSourceLocator adapter mapping module paths to public file URLs
///
/// Well-known hosts are mapped offline. Any other module path is resolved
/// through its `?go-get=1` page, whose `go-import` meta tag names the
/// repository root.
pub struct HostingSourceLocator {
    client: reqwest::Client,
    max_retries: u32,
}

impl HostingSourceLocator {
    pub fn new() -> Result<Self> {
        let user_agent = format!("depcomply/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 2,
        })
    }

    async fn discover_with_retry(&self, module_path: &str) -> Result<RepoRoot> {
        let mut attempt = 1;
        loop {
            match self.discover(module_path).await {
                Ok(root) => return Ok(root),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn discover(&self, module_path: &str) -> Result<RepoRoot> {
        let url = format!("https://{}?go-get=1", module_path);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }
        let body = response.text().await?;
        parse_go_import(module_path, &body)
    }
}

#[async_trait]
impl SourceLocator for HostingSourceLocator {
    async fn locate(&self, name: &str, version: &str) -> Result<RemoteSource> {
        validate_module_path(name)?;

        let root = match known_repo_root(name) {
            Some(root) => root,
            None => self.discover_with_retry(name).await?,
        };
        let commit = revision_for(version, &root.subdir);

        Ok(RemoteSource::new(
            root.url,
            root.template.to_string(),
            commit,
            root.subdir,
        ))
    }
}

fn validate_module_path(name: &str) -> Result<()> {
    if name.contains("..") || name.contains('\\') {
        anyhow::bail!("Security: module path {:?} contains path traversal characters", name);
    }
    if name.contains(['?', '#', '@', ' ']) {
        anyhow::bail!("Security: module path {:?} contains URL-unsafe characters", name);
    }
    Ok(())
}

fn template_for_host(host: &str) -> &'static str {
    match host {
        "github.com" => GITHUB_TEMPLATE,
        "gitlab.com" => GITLAB_TEMPLATE,
        "bitbucket.org" => BITBUCKET_TEMPLATE,
        h if h.ends_with(".googlesource.com") => GOOGLESOURCE_TEMPLATE,
        _ => "",
    }
}

/// Drops a trailing major-version element (`v2`, `sub/v3`) from a subdirectory
fn strip_major_version(subdir: &str) -> String {
    MAJOR_VERSION_SUFFIX.replace(subdir, "").trim_matches('/').to_string()
}

/// Maps module paths on well-known hosts without a network round trip
fn known_repo_root(module_path: &str) -> Option<RepoRoot> {
    let segments: Vec<&str> = module_path.split('/').collect();

    match segments.as_slice() {
        [host @ ("github.com" | "gitlab.com" | "bitbucket.org"), owner, repo, rest @ ..] => {
            Some(RepoRoot {
                url: format!("https://{}/{}/{}", host, owner, repo),
                template: template_for_host(host),
                subdir: strip_major_version(&rest.join("/")),
            })
        }
        ["golang.org", "x", repo, rest @ ..] => Some(RepoRoot {
            url: format!("https://go.googlesource.com/{}", repo),
            template: GOOGLESOURCE_TEMPLATE,
            subdir: strip_major_version(&rest.join("/")),
        }),
        ["gopkg.in", package] => {
            let (name, _) = package.rsplit_once(".v")?;
            Some(RepoRoot {
                url: format!("https://github.com/go-{}/{}", name, name),
                template: GITHUB_TEMPLATE,
                subdir: String::new(),
            })
        }
        ["gopkg.in", owner, package] => {
            let (name, _) = package.rsplit_once(".v")?;
            Some(RepoRoot {
                url: format!("https://github.com/{}/{}", owner, name),
                template: GITHUB_TEMPLATE,
                subdir: String::new(),
            })
        }
        _ => None,
    }
}

/// Reads the `go-import` meta tag whose prefix matches `module_path`
fn parse_go_import(module_path: &str, body: &str) -> Result<RepoRoot> {
    for captures in GO_IMPORT_META.captures_iter(body) {
        let fields: Vec<&str> = captures[1].split_whitespace().collect();
        let [prefix, _vcs, repo_url] = fields.as_slice() else {
            continue;
        };
        let Some(rest) = module_path.strip_prefix(prefix) else {
            continue;
        };
        if !rest.is_empty() && !rest.starts_with('/') {
            continue;
        }

        let repo_url = repo_url.trim_end_matches(".git").trim_end_matches('/');
        let host = repo_url
            .strip_prefix("https://")
            .or_else(|| repo_url.strip_prefix("http://"))
            .and_then(|s| s.split('/').next())
            .unwrap_or_default();

        return Ok(RepoRoot {
            url: repo_url.to_string(),
            template: template_for_host(host),
            subdir: strip_major_version(rest),
        });
    }

    anyhow::bail!("No go-import meta tag found for {}", module_path)
}

/// Revision used in file URLs for a module version
///
/// Pseudo-versions resolve to their commit hash. Release versions of a
/// module living in a repository subdirectory are tagged `sub/vX.Y.Z`.
fn revision_for(version: &str, subdir: &str) -> String {
    let version = version.trim_end_matches("+incompatible");

    if let Some(captures) = PSEUDO_VERSION.captures(version) {
        return captures[1].to_string();
    }
    if !subdir.is_empty() && RELEASE_VERSION.is_match(version) {
        return format!("{}/{}", subdir, version);
    }
    version.to_string()
}
