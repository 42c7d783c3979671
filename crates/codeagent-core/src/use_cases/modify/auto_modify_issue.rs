use std::{path::Path, time::Duration};

use async_trait::async_trait;
use codeagent_config::GenerationStrategy;
use codeagent_ghapi_interface::{
    types::{GhCreatedPullRequest, GhIssue, GhPullRequestCreation, GhRepository},
    ApiError,
};
use shaku::{Component, Interface};
use time::{macros::format_description, OffsetDateTime};
use tracing::{info, warn};

use super::plan::ModificationPlan;
use crate::{
    commit_message, prompts,
    workspace::{files, AcquireMode, RetryPolicy, Workspace, WorkspaceManager},
    CoreContext, DomainError, Result,
};

/// Code change request on a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationRequest {
    pub repository: GhRepository,
    /// Issue driving the change, its body holding the full request.
    pub issue: GhIssue,
    /// Branch to start from and to open the pull request against.
    pub source_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestOutcome {
    Created(GhCreatedPullRequest),
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedModification {
    pub branch: String,
    pub commit_message: String,
    pub files: Vec<String>,
    /// Summary produced by the AI backend.
    pub summary: String,
    pub pull_request: PullRequestOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationOutcome {
    /// Generation ran but left the working copy untouched.
    NoChanges { branch: String },
    Applied(AppliedModification),
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AutoModifyIssueInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        request: &ModificationRequest,
    ) -> Result<ModificationOutcome>;
}

#[derive(Component)]
#[shaku(interface = AutoModifyIssueInterface)]
pub(crate) struct AutoModifyIssue;

#[async_trait]
impl AutoModifyIssueInterface for AutoModifyIssue {
    #[tracing::instrument(skip(self, ctx, request), fields(
        repository = request.repository.full_name,
        issue_number = request.issue.number,
        source_branch = request.source_branch
    ))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        request: &ModificationRequest,
    ) -> Result<ModificationOutcome> {
        let manager = WorkspaceManager::from_context(ctx);
        let workspace = manager
            .acquire(
                &request.repository.clone_url,
                &request.source_branch,
                AcquireMode::Exclusive,
            )
            .await?;

        let outcome = self.modify(ctx, request, &workspace).await;

        if let Err(e) = workspace.release().await {
            warn!(error = %e, "Could not release workspace");
        }

        outcome
    }
}

impl AutoModifyIssue {
    async fn modify(
        &self,
        ctx: &CoreContext<'_>,
        request: &ModificationRequest,
        workspace: &Workspace,
    ) -> Result<ModificationOutcome> {
        let path = workspace.path();
        let git = ctx.git_service;

        git.configure_identity(path, &ctx.config.git.user_name, &ctx.config.git.user_email)
            .await?;

        let branch = branch_name(request.issue.number, OffsetDateTime::now_utc());
        git.create_branch(path, &branch).await?;
        info!(branch = %branch, "Created branch");

        let summary = self.generate(ctx, &request.issue, path).await?;

        git.stage(path, &[".".to_string()]).await?;
        if !git.has_staged_changes(path).await? {
            info!("Nothing changed, skipping commit");
            return Ok(ModificationOutcome::NoChanges { branch });
        }

        let modified_files = git.staged_files(path).await?;
        let message = commit_message::build_auto_fix_commit(&request.issue, &modified_files)
            .to_string();
        git.commit(path, &message).await?;
        git.push(path, &branch).await?;
        info!(branch = %branch, files = modified_files.len(), "Pushed changes");

        let pull_request = self.open_pull_request(ctx, request, &branch).await?;

        Ok(ModificationOutcome::Applied(AppliedModification {
            branch,
            commit_message: message,
            files: modified_files,
            summary,
            pull_request,
        }))
    }

    async fn generate(&self, ctx: &CoreContext<'_>, issue: &GhIssue, path: &Path) -> Result<String> {
        let ai = ctx.ai_service;
        let policy = RetryPolicy::new(
            ctx.config.ai.max_retries,
            Duration::from_secs(ctx.config.ai.retry_backoff),
        );

        match resolve_strategy(ctx.config.ai.strategy, ai.can_write_files()) {
            GenerationStrategy::Plan => {
                let tree = files::file_tree(path);
                let analysis = ai.generate(&prompts::analyze_issue(issue, &tree)).await?;
                let prompt = prompts::modification_plan(issue, &analysis);
                let prompt = prompt.as_str();

                policy
                    .run(|_| async move {
                        let plan = ModificationPlan::parse(&ai.generate(prompt).await?)?;
                        let applied = plan.apply(path).await?;
                        Ok::<_, DomainError>(format!("{}\n\n{}", plan.summary, applied.join("\n")))
                    })
                    .await
            }
            _ => {
                let prompt = prompts::code_generation(issue);
                let prompt = prompt.as_str();
                Ok(policy
                    .run(move |_| ai.generate_in_directory(prompt, path))
                    .await?)
            }
        }
    }

    async fn open_pull_request(
        &self,
        ctx: &CoreContext<'_>,
        request: &ModificationRequest,
        branch: &str,
    ) -> Result<PullRequestOutcome> {
        let issue = &request.issue;
        let creation = GhPullRequestCreation {
            title: format!("🤖 Auto-fix issue #{}: {}", issue.number, issue.title),
            body: pull_request_body(issue.number),
            head: branch.to_string(),
            base: request.source_branch.clone(),
        };

        match ctx
            .api_service
            .pulls_create(
                &request.repository.owner.login,
                &request.repository.name,
                &creation,
            )
            .await
        {
            Ok(created) => Ok(PullRequestOutcome::Created(created)),
            Err(ApiError::PullRequestAlreadyExists { head }) => {
                info!(head = %head, "Pull request already exists");
                Ok(PullRequestOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Strategy to use: `auto` picks `direct` when the backend can edit files.
pub fn resolve_strategy(strategy: GenerationStrategy, can_write_files: bool) -> GenerationStrategy {
    match strategy {
        GenerationStrategy::Auto if can_write_files => GenerationStrategy::Direct,
        GenerationStrategy::Auto => GenerationStrategy::Plan,
        other => other,
    }
}

/// Branch name: `auto-fix-issue-<N>-<YYYYMMDD-HHMMSS>`.
pub fn branch_name(issue_number: u64, now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[year][month][day]-[hour][minute][second]"
        ))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("auto-fix-issue-{issue_number}-{stamp}")
}

fn pull_request_body(issue_number: u64) -> String {
    format!(
        "## Generated code changes\n\n\
         This pull request was generated by the AI assistant for issue #{issue_number}.\n\n\
         ### Changes\n\
         - Code changes generated from the issue description\n\n\
         ### Related issue\n\
         Closes #{issue_number}\n\n\
         ### Notes\n\
         Review the changes carefully before merging."
    )
}

#[cfg(test)]
mod tests {
    use codeagent_ai_interface::{AiError, MockAiService};
    use codeagent_ghapi_interface::{types::GhUser, MockApiService};
    use codeagent_git_interface::MockGitService;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn request() -> ModificationRequest {
        ModificationRequest {
            repository: GhRepository {
                name: "name".into(),
                full_name: "owner/name".into(),
                owner: GhUser {
                    login: "owner".into(),
                },
                clone_url: "https://github.com/owner/name.git".into(),
                ..Default::default()
            },
            issue: GhIssue {
                number: 12,
                title: "Fix login bug".into(),
                body: Some("Login fails".into()),
                html_url: "https://github.com/owner/name/issues/12".into(),
                ..Default::default()
            },
            source_branch: "main".into(),
        }
    }

    fn git_until_generation() -> MockGitService {
        let mut git = MockGitService::new();
        git.expect_clone_repository()
            .once()
            .withf(|url, branch, _| url == "https://github.com/owner/name.git" && branch == "main")
            .returning(|_, _, destination| {
                std::fs::create_dir_all(destination).unwrap();
                Ok(())
            });
        git.expect_configure_identity()
            .once()
            .withf(|_, name, email| name == "CodeAgent" && email == "codeagent@example.com")
            .returning(|_, _, _| Ok(()));
        git.expect_create_branch()
            .once()
            .withf(|_, branch| branch.starts_with("auto-fix-issue-12-"))
            .returning(|_, _| Ok(()));
        git
    }

    #[test]
    fn branch_names() {
        assert_eq!(
            branch_name(3, datetime!(2024-01-02 03:04:05 UTC)),
            "auto-fix-issue-3-20240102-030405"
        );
    }

    #[test]
    fn strategies() {
        use GenerationStrategy::{Auto, Direct, Plan};

        assert_eq!(resolve_strategy(Auto, true), Direct);
        assert_eq!(resolve_strategy(Auto, false), Plan);
        assert_eq!(resolve_strategy(Plan, true), Plan);
        assert_eq!(resolve_strategy(Direct, false), Direct);
    }

    #[tokio::test]
    async fn direct_strategy_opens_pull_request() {
        let mut ctx = CoreContextTest::new();
        ctx.config.ai.strategy = GenerationStrategy::Auto;
        ctx.ai_service = {
            let mut svc = MockAiService::new();
            svc.expect_can_write_files().return_const(true);
            svc.expect_generate_in_directory()
                .once()
                .withf(|prompt, _| prompt.contains("Fix login bug"))
                .returning(|_, _| Ok("Fixed the session check".into()));
            svc
        };
        ctx.git_service = {
            let mut git = git_until_generation();
            git.expect_stage()
                .once()
                .withf(|_, paths| paths.len() == 1 && paths[0] == ".")
                .returning(|_, _| Ok(()));
            git.expect_has_staged_changes()
                .once()
                .returning(|_| Ok(true));
            git.expect_staged_files()
                .once()
                .returning(|_| Ok(vec!["src/handlers/login.rs".into()]));
            git.expect_commit()
                .once()
                .withf(|_, message| message.starts_with("fix(handlers): Fix login bug"))
                .returning(|_, _| Ok(()));
            git.expect_push()
                .once()
                .withf(|_, branch| branch.starts_with("auto-fix-issue-12-"))
                .returning(|_, _| Ok(()));
            git
        };
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_create()
                .once()
                .withf(|owner, name, creation| {
                    owner == "owner"
                        && name == "name"
                        && creation.base == "main"
                        && creation.title == "🤖 Auto-fix issue #12: Fix login bug"
                        && creation.body.contains("Closes #12")
                })
                .return_once(|_, _, _| {
                    Ok(GhCreatedPullRequest {
                        number: 13,
                        html_url: "https://github.com/owner/name/pull/13".into(),
                    })
                });
            svc
        };

        let outcome = AutoModifyIssue
            .run(&ctx.as_context(), &request())
            .await
            .unwrap();

        let ModificationOutcome::Applied(applied) = outcome else {
            panic!("expected applied modification");
        };
        assert_eq!(applied.files, vec!["src/handlers/login.rs".to_string()]);
        assert_eq!(applied.summary, "Fixed the session check");
        assert_eq!(
            applied.pull_request,
            PullRequestOutcome::Created(GhCreatedPullRequest {
                number: 13,
                html_url: "https://github.com/owner/name/pull/13".into(),
            })
        );
        assert_eq!(
            std::fs::read_dir(ctx.work_dir.path()).unwrap().count(),
            0,
            "workspace was not cleaned"
        );
    }

    #[tokio::test]
    async fn nothing_staged() {
        let mut ctx = CoreContextTest::new();
        ctx.config.ai.strategy = GenerationStrategy::Direct;
        ctx.ai_service = {
            let mut svc = MockAiService::new();
            svc.expect_can_write_files().return_const(true);
            svc.expect_generate_in_directory()
                .once()
                .returning(|_, _| Ok("Nothing to do".into()));
            svc
        };
        ctx.git_service = {
            let mut git = git_until_generation();
            git.expect_stage().once().returning(|_, _| Ok(()));
            git.expect_has_staged_changes()
                .once()
                .returning(|_| Ok(false));
            git.expect_commit().never();
            git
        };

        let outcome = AutoModifyIssue
            .run(&ctx.as_context(), &request())
            .await
            .unwrap();

        assert!(matches!(outcome, ModificationOutcome::NoChanges { .. }));
    }

    #[tokio::test]
    async fn existing_pull_request_is_not_an_error() {
        let mut ctx = CoreContextTest::new();
        ctx.config.ai.strategy = GenerationStrategy::Plan;
        ctx.ai_service = {
            let mut svc = MockAiService::new();
            svc.expect_can_write_files().return_const(false);
            let mut seq = mockall::Sequence::new();
            svc.expect_generate()
                .once()
                .in_sequence(&mut seq)
                .withf(|prompt| prompt.contains("Project structure"))
                .returning(|_| Ok("Touch README.md".into()));
            svc.expect_generate()
                .once()
                .in_sequence(&mut seq)
                .withf(|prompt| prompt.contains("Touch README.md"))
                .returning(|_| {
                    Ok(r#"{"modifications": [{"file": "README.md", "action": "create", "content": "hello", "description": "readme"}], "summary": "Docs"}"#.into())
                });
            svc
        };
        ctx.git_service = {
            let mut git = git_until_generation();
            git.expect_stage().once().returning(|_, _| Ok(()));
            git.expect_has_staged_changes()
                .once()
                .returning(|_| Ok(true));
            git.expect_staged_files()
                .once()
                .returning(|_| Ok(vec!["README.md".into()]));
            git.expect_commit().once().returning(|_, _| Ok(()));
            git.expect_push().once().returning(|_, _| Ok(()));
            git
        };
        ctx.api_service = {
            let mut svc = MockApiService::new();
            svc.expect_pulls_create().once().return_once(|_, _, creation| {
                Err(ApiError::PullRequestAlreadyExists {
                    head: creation.head.clone(),
                })
            });
            svc
        };

        let outcome = AutoModifyIssue
            .run(&ctx.as_context(), &request())
            .await
            .unwrap();

        let ModificationOutcome::Applied(applied) = outcome else {
            panic!("expected applied modification");
        };
        assert_eq!(applied.pull_request, PullRequestOutcome::AlreadyExists);
        assert!(applied.summary.starts_with("Docs\n\n- README.md: readme"));
    }

    #[tokio::test]
    async fn generation_failure_is_retried_then_surfaced() {
        let mut ctx = CoreContextTest::new();
        ctx.config.ai.strategy = GenerationStrategy::Direct;
        ctx.config.ai.max_retries = 2;
        ctx.config.ai.retry_backoff = 0;
        ctx.ai_service = {
            let mut svc = MockAiService::new();
            svc.expect_can_write_files().return_const(true);
            svc.expect_generate_in_directory()
                .times(3)
                .returning(|_, _| Err(AiError::Timeout { seconds: 120 }));
            svc
        };
        ctx.git_service = git_until_generation();

        let err = AutoModifyIssue
            .run(&ctx.as_context(), &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::AiError {
                source: AiError::Timeout { .. }
            }
        ));
        assert_eq!(std::fs::read_dir(ctx.work_dir.path()).unwrap().count(), 0);
    }
}
