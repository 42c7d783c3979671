use async_trait::async_trait;

use crate::{bot_commands::command::CommandExecutionResult, Result};

mod code;
mod context;
mod continue_work;
mod fix;
mod help;
mod review;
mod summary;

pub use code::CodeCommand;
pub use context::CommandContext;
pub use continue_work::ContinueCommand;
pub use fix::FixCommand;
pub use help::HelpCommand;
pub use review::ReviewCommand;
pub use summary::SummaryCommand;

#[async_trait]
pub trait BotCommand: Send + Sync {
    async fn handle(&self, ctx: &CommandContext) -> Result<CommandExecutionResult>;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use codeagent_ai_interface::MockAiService;
    use codeagent_config::Config;
    use codeagent_ghapi_interface::{
        types::{GhIssue, GhPullRequest, GhRepository, GhUser},
        MockApiService,
    };
    use codeagent_git_interface::MockGitService;
    use tempfile::TempDir;

    use super::*;
    use crate::{workspace::MemoryWorkspaceStore, CoreModule};

    pub(crate) struct CommandContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub api_service: MockApiService,
        pub ai_service: MockAiService,
        pub git_service: MockGitService,
        pub workspace_store: MemoryWorkspaceStore,
        pub work_dir: TempDir,
        pub repository: GhRepository,
        pub issue: Option<GhIssue>,
        pub pull_request: Option<GhPullRequest>,
        pub comment: Option<String>,
        pub user: GhUser,
    }

    impl CommandContextTest {
        pub fn new() -> Self {
            let work_dir = tempfile::tempdir().unwrap();
            let mut config = Config::from_env_no_version().unwrap();
            config.git.work_dir = work_dir.path().display().to_string();

            Self {
                workspace_store: MemoryWorkspaceStore::new(
                    Duration::from_secs(config.git.cache_ttl),
                    Duration::from_secs(config.git.clone_interval),
                ),
                config,
                core_module: CoreModule::builder().build(),
                api_service: MockApiService::new(),
                ai_service: MockAiService::new(),
                git_service: MockGitService::new(),
                work_dir,
                repository: GhRepository {
                    name: "name".into(),
                    full_name: "owner/name".into(),
                    owner: GhUser {
                        login: "owner".into(),
                    },
                    clone_url: "https://github.com/owner/name.git".into(),
                    ..Default::default()
                },
                issue: Some(GhIssue {
                    number: 1,
                    title: "Issue".into(),
                    ..Default::default()
                }),
                pull_request: None,
                comment: None,
                user: GhUser { login: "me".into() },
            }
        }

        pub fn as_context(&self) -> CommandContext {
            CommandContext {
                config: &self.config,
                core_module: &self.core_module,
                api_service: &self.api_service,
                ai_service: &self.ai_service,
                git_service: &self.git_service,
                workspace_store: &self.workspace_store,
                repository: &self.repository,
                issue: self.issue.as_ref(),
                pull_request: self.pull_request.as_ref(),
                comment: self.comment.as_deref(),
                user: &self.user,
            }
        }
    }
}
