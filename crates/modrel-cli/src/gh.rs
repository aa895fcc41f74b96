// Rust guideline compliant 2026-10-17

//! Live hosting platform backed by the GitHub CLI.
//!
//! [`GhCli`] implements [`HostingApi`] by running `gh api`, `gh release`,
//! `gh issue` and `gh repo` and decoding their JSON output. Authentication,
//! host selection and rate limiting are left to `gh` itself.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use modrel_core::{
    GitRef, HostError, HostResult, HostingApi, Issue, NewRelease, PullRequest, Release, Repository,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

/// GraphQL query returning the parent of a sub-issue.
const PARENT_QUERY: &str = "query($owner: String!, $repo: String!, $number: Int!) { \
repository(owner: $owner, name: $repo) { issue(number: $number) { parent { number } } } }";

/// Hosting platform adapter shelling out to `gh`.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCli {
    /// Creates an adapter running the `gh` found on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Creates an adapter running a specific `gh` executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `gh` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if `gh` cannot be started or exits unsuccessfully.
    fn run(&self, args: &[String], stdin: Option<&str>) -> anyhow::Result<Vec<u8>> {
        tracing::debug!("{} {}", self.program, args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to run {}", self.program))?;
        let pipe = child.stdin.take();

        // Stdin is fed from its own thread while the pipes are drained, so a
        // full stdout buffer cannot stall the writer.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
                    pipe.write_all(input.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output.with_context(|| format!("failed to wait for {}", self.program))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("gh {} failed: {}", args.first().map_or("", String::as_str), stderr.trim());
        }
        written.context("failed to write to gh stdin")?;
        Ok(output.stdout)
    }

    /// Runs `gh` and decodes its JSON output.
    fn json<T: DeserializeOwned>(&self, args: &[String], stdin: Option<&str>) -> HostResult<T> {
        let stdout = self.run(args, stdin).map_err(host_error)?;
        decode(&stdout)
    }

    /// Issues a REST `GET` through `gh api`.
    fn get<T: DeserializeOwned>(&self, path: &str) -> HostResult<T> {
        self.json(&strings(&["api", path]), None)
    }
}

impl HostingApi for GhCli {
    fn repository(&self, id: &str) -> HostResult<Repository> {
        let response: RepositoryResponse = self.get(&format!("repos/{}", id))?;
        Ok(Repository {
            owner: response.owner.login,
            name: response.name,
            default_branch: response.default_branch,
        })
    }

    fn commit_range(&self, repo: &str, start: &str, end: &str) -> HostResult<Vec<String>> {
        let args = compare_pages_args(repo, start, end);
        let stdout = self.run(&args, None).map_err(host_error)?;
        parse_compare_pages(&stdout)
    }

    fn pull_requests_for_commit(&self, repo: &str, sha: &str) -> HostResult<Vec<u64>> {
        let pulls: Vec<NumberResponse> = self.get(&format!("repos/{}/commits/{}/pulls", repo, sha))?;
        Ok(pulls.into_iter().map(|pull| pull.number).collect())
    }

    fn pull_request(&self, repo: &str, number: u64) -> HostResult<PullRequest> {
        let response: PullRequestResponse = self.get(&format!("repos/{}/pulls/{}", repo, number))?;
        Ok(PullRequest {
            number: response.number,
            body: response.body.unwrap_or_default(),
            labels: label_names(response.labels),
        })
    }

    fn issue(&self, repo: &str, number: u64) -> HostResult<Issue> {
        let response: IssueResponse = self.get(&format!("repos/{}/issues/{}", repo, number))?;
        Ok(Issue {
            number: response.number,
            title: response.title,
            state: response.state,
            labels: label_names(response.labels),
        })
    }

    fn parent_issue(&self, repo: &str, number: u64) -> HostResult<Option<u64>> {
        let (owner, name) = split_repo(repo)?;
        let args = parent_query_args(owner, name, number);
        let stdout = self.run(&args, None).map_err(host_error)?;
        parse_parent(&stdout)
    }

    fn list_releases(
        &self,
        repo: &str,
        limit: usize,
        exclude_prereleases: bool,
    ) -> HostResult<Vec<Release>> {
        let args = release_list_args(repo, limit, exclude_prereleases);
        let stdout = self.run(&args, None).map_err(host_error)?;
        parse_releases(&stdout)
    }

    fn ref_sha(&self, repo: &str, git_ref: &GitRef) -> HostResult<String> {
        let response: RefResponse = self.get(&format!("repos/{}/git/ref/{}", repo, git_ref.path()))?;
        Ok(response.object.sha)
    }

    fn merge_base(&self, repo: &str, a: &str, b: &str) -> HostResult<String> {
        let response: CompareResponse = self.get(&format!("repos/{}/compare/{}...{}", repo, a, b))?;
        response
            .merge_base_commit
            .map(|commit| commit.sha)
            .ok_or_else(|| HostError::new(format!("no merge base between {} and {}", a, b)))
    }

    fn create_release(&self, repo: &str, release: &NewRelease) -> HostResult<()> {
        let args = release_create_args(repo, release);
        self.run(&args, release.notes.as_deref())
            .map(|_| ())
            .map_err(host_error)
    }

    fn delete_release(&self, repo: &str, tag: &str) -> HostResult<()> {
        let args = strings(&["release", "delete", tag, "--repo", repo, "--yes"]);
        self.run(&args, None).map(|_| ()).map_err(host_error)
    }

    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> HostResult<String> {
        let args = strings(&["issue", "comment", &number.to_string(), "--repo", repo, "--body", body]);
        let stdout = self.run(&args, None).map_err(host_error)?;
        let url = String::from_utf8_lossy(&stdout).trim().to_string();
        if !url.is_empty() {
            return Ok(url);
        }

        // Older gh releases print nothing; fall back to the newest comment.
        let comments: Vec<CommentResponse> =
            self.get(&format!("repos/{}/issues/{}/comments", repo, number))?;
        comments
            .into_iter()
            .last()
            .map(|comment| comment.html_url)
            .ok_or_else(|| HostError::new("no comments found after creation"))
    }

    fn current_repository(&self) -> HostResult<Option<String>> {
        let args = strings(&[
            "repo",
            "view",
            "--json",
            "owner,name",
            "--jq",
            ".owner.login + \"/\" + .name",
        ]);
        match self.run(&args, None) {
            Ok(stdout) => {
                let id = String::from_utf8_lossy(&stdout).trim().to_string();
                Ok((!id.is_empty()).then_some(id))
            }
            Err(err) => {
                tracing::debug!("No repository context: {:#}", err);
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    owner: OwnerResponse,
    name: String,
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct ShaResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: ShaResponse,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    total_commits: Option<usize>,
    #[serde(default)]
    commits: Vec<ShaResponse>,
    #[serde(default)]
    merge_base_commit: Option<ShaResponse>,
}

#[derive(Debug, Deserialize)]
struct NumberResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    number: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelResponse>,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    #[serde(default)]
    title: String,
    state: String,
    #[serde(default)]
    labels: Vec<LabelResponse>,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    html_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseResponse {
    tag_name: String,
    #[serde(default)]
    is_prerelease: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ParentResponse {
    data: ParentData,
}

#[derive(Debug, Deserialize)]
struct ParentData {
    repository: Option<ParentRepository>,
}

#[derive(Debug, Deserialize)]
struct ParentRepository {
    issue: Option<ParentIssue>,
}

#[derive(Debug, Deserialize)]
struct ParentIssue {
    parent: Option<NumberResponse>,
}

fn host_error(err: anyhow::Error) -> HostError {
    HostError::new(format!("{:#}", err))
}

fn decode<T: DeserializeOwned>(stdout: &[u8]) -> HostResult<T> {
    serde_json::from_slice(stdout)
        .map_err(|err| HostError::new(format!("failed to parse gh output: {}", err)))
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| (*arg).to_string()).collect()
}

fn label_names(labels: Vec<LabelResponse>) -> Vec<String> {
    labels.into_iter().map(|label| label.name).collect()
}

fn split_repo(repo: &str) -> HostResult<(&str, &str)> {
    repo.split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| HostError::new(format!("invalid repo format: {}", repo)))
}

/// Builds the `gh release list` invocation.
fn release_list_args(repo: &str, limit: usize, exclude_prereleases: bool) -> Vec<String> {
    let mut args = strings(&[
        "release",
        "list",
        "--repo",
        repo,
        "--json",
        "tagName,isPrerelease,createdAt",
        "--limit",
    ]);
    args.push(limit.to_string());
    if exclude_prereleases {
        args.push("--exclude-pre-releases".to_string());
    }
    args
}

/// Builds the `gh release create` invocation; notes are read from stdin.
fn release_create_args(repo: &str, release: &NewRelease) -> Vec<String> {
    let mut args = strings(&[
        "release",
        "create",
        &release.tag,
        "--repo",
        repo,
        "--title",
        &release.title,
        "--generate-notes",
    ]);
    if release.draft {
        args.push("--draft".to_string());
    }
    if release.prerelease {
        args.push("--prerelease".to_string());
    }
    if let Some(target) = &release.target {
        args.push("--target".to_string());
        args.push(target.clone());
    }
    if release.notes.is_some() {
        args.push("--notes-file".to_string());
        args.push("-".to_string());
    }
    args
}

fn parent_query_args(owner: &str, name: &str, number: u64) -> Vec<String> {
    vec![
        "api".to_string(),
        "graphql".to_string(),
        "-H".to_string(),
        "GraphQL-Features: sub_issues".to_string(),
        "-f".to_string(),
        format!("query={}", PARENT_QUERY),
        "-F".to_string(),
        format!("owner={}", owner),
        "-F".to_string(),
        format!("repo={}", name),
        "-F".to_string(),
        format!("number={}", number),
    ]
}

/// Builds the paginated `gh api` call listing every commit of a range.
fn compare_pages_args(repo: &str, start: &str, end: &str) -> Vec<String> {
    vec![
        "api".to_string(),
        "--paginate".to_string(),
        format!("repos/{}/compare/{}...{}?per_page=100", repo, start, end),
    ]
}

/// Merges the commits of concatenated compare pages, in range order.
///
/// # Errors
///
/// Returns an error if a page cannot be decoded, no page was returned, or
/// the pages list fewer commits than the range holds.
fn parse_compare_pages(stdout: &[u8]) -> HostResult<Vec<String>> {
    let mut commits = Vec::new();
    let mut total = None;
    for page in serde_json::Deserializer::from_slice(stdout).into_iter::<CompareResponse>() {
        let page =
            page.map_err(|err| HostError::new(format!("failed to parse gh output: {}", err)))?;
        total = total.or(page.total_commits);
        commits.extend(page.commits.into_iter().map(|commit| commit.sha));
    }

    let total = total.ok_or_else(|| HostError::new("compare returned no pages"))?;
    if commits.len() < total {
        return Err(HostError::new(format!(
            "compare listed {} of {} commits",
            commits.len(),
            total
        )));
    }
    Ok(commits)
}

fn parse_releases(stdout: &[u8]) -> HostResult<Vec<Release>> {
    let releases: Vec<ReleaseResponse> = decode(stdout)?;
    Ok(releases
        .into_iter()
        .map(|release| Release {
            tag: release.tag_name,
            is_prerelease: release.is_prerelease,
            created_at: release.created_at,
        })
        .collect())
}

fn parse_parent(stdout: &[u8]) -> HostResult<Option<u64>> {
    let response: ParentResponse = decode(stdout)?;
    Ok(response
        .data
        .repository
        .and_then(|repo| repo.issue)
        .and_then(|issue| issue.parent)
        .map(|parent| parent.number))
}
