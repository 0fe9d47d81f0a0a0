//! Workflows command: list a repository's workflow definitions

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::ActionsApi;
use crate::client::models::Workflow;
use crate::error::Result;
use crate::fetch::parse_repo;
use crate::models::WorkflowDisplay;
use crate::output::{format_json, format_titled_table};

/// Workflows defined in the repository, without platform-managed ones.
pub async fn static_workflows<A>(api: &A, owner: &str, repo: &str) -> Result<Vec<Workflow>>
where
    A: ActionsApi + ?Sized,
{
    let workflows = api.list_workflows(owner, repo).await?;
    Ok(workflows.into_iter().filter(|w| !w.is_dynamic()).collect())
}

/// Run the workflows command
pub async fn run(opts: &GlobalOptions, repo: &str) -> Result<()> {
    let (owner, name) = parse_repo(repo)?;
    let ctx = CommandContext::new(opts)?;

    let workflows = static_workflows(ctx.api.as_ref(), &owner, &name).await?;
    if workflows.is_empty() {
        eprintln!("No workflows found for {}/{}.", owner, name);
        return Ok(());
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&workflows)?),
        OutputFormat::Table => {
            let display: Vec<WorkflowDisplay> = workflows.iter().map(WorkflowDisplay::from).collect();
            println!(
                "{}",
                format_titled_table(&format!("Workflows in {}/{}", owner, name), &display)
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockActionsApi;

    fn workflow(id: i64, path: &str) -> Workflow {
        Workflow {
            id,
            name: format!("wf-{}", id),
            path: path.to_string(),
            state: "active".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dynamic_workflows_hidden() {
        let mock = MockActionsApi::new()
            .with_workflows(vec![
                workflow(1, ".github/workflows/ci.yml"),
                workflow(2, "dynamic/dependabot/dependabot-updates"),
                workflow(3, ".github/workflows/release.yml"),
            ])
            .await;

        let workflows = static_workflows(&mock, "octo", "app").await.unwrap();
        let ids: Vec<_> = workflows.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_empty_repository() {
        let workflows = static_workflows(&MockActionsApi::new(), "octo", "app")
            .await
            .unwrap();
        assert!(workflows.is_empty());
    }
}
