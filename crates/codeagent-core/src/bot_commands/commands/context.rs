use codeagent_ai_interface::AiService;
use codeagent_config::Config;
use codeagent_ghapi_interface::{
    types::{GhIssue, GhPullRequest, GhRepository, GhUser},
    ApiService,
};
use codeagent_git_interface::GitService;

use crate::{workspace::WorkspaceStore, CoreContext, CoreModule, DomainError, Result};

const DEFAULT_BRANCH: &str = "main";

pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub api_service: &'a (dyn ApiService + 'a),
    pub ai_service: &'a (dyn AiService + 'a),
    pub git_service: &'a (dyn GitService + 'a),
    pub workspace_store: &'a (dyn WorkspaceStore + 'a),
    pub repository: &'a GhRepository,
    pub issue: Option<&'a GhIssue>,
    pub pull_request: Option<&'a GhPullRequest>,
    /// Body of the comment holding the command.
    pub comment: Option<&'a str>,
    pub user: &'a GhUser,
}

impl<'a> CommandContext<'a> {
    pub fn new(core: &CoreContext<'a>, repository: &'a GhRepository, user: &'a GhUser) -> Self {
        Self {
            config: core.config,
            core_module: core.core_module,
            api_service: core.api_service,
            ai_service: core.ai_service,
            git_service: core.git_service,
            workspace_store: core.workspace_store,
            repository,
            issue: None,
            pull_request: None,
            comment: None,
            user,
        }
    }

    pub fn with_issue(mut self, issue: &'a GhIssue) -> Self {
        self.issue = Some(issue);
        self
    }

    pub fn with_pull_request(mut self, pull_request: &'a GhPullRequest) -> Self {
        self.pull_request = Some(pull_request);
        self
    }

    pub fn with_comment(mut self, comment: &'a str) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn repo_owner(&self) -> &'a str {
        &self.repository.owner.login
    }

    pub fn repo_name(&self) -> &'a str {
        &self.repository.name
    }

    /// Issue or pull request number where replies go, the issue first.
    pub fn reply_target(&self) -> Result<u64> {
        self.issue
            .map(|issue| issue.number)
            .or_else(|| self.pull_request.map(|pr| pr.number))
            .ok_or(DomainError::MissingReplyTarget)
    }

    /// Branch new work starts from.
    pub fn source_branch(&self) -> &'a str {
        match self.pull_request {
            Some(pr) if !pr.base.reference.is_empty() => &pr.base.reference,
            _ => self.default_branch(),
        }
    }

    pub fn default_branch(&self) -> &'a str {
        if self.repository.default_branch.is_empty() {
            DEFAULT_BRANCH
        } else {
            &self.repository.default_branch
        }
    }

    pub fn as_core_context(&self) -> CoreContext<'a> {
        CoreContext {
            config: self.config,
            core_module: self.core_module,
            api_service: self.api_service,
            ai_service: self.ai_service,
            git_service: self.git_service,
            workspace_store: self.workspace_store,
        }
    }
}
