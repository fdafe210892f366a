use dispatcher::{BranchRegistry, DispatchError, DispatcherConfig, Restored, SharedDispatcher};
use ticket_desk_proto::Snapshot;
use tracing::info;

use crate::command::{help_text, Command};

/// Result of one shell command, ready to be rendered.
#[derive(Debug)]
pub enum Reply {
    Snapshot { snapshot: Snapshot, notice: Option<String> },
    Branches { current: String, names: Vec<String> },
    Help(String),
    Quit,
}

/// Binds parsed commands to the dispatch session of the current branch.
pub struct Shell {
    registry: BranchRegistry,
    branch: String,
    session: SharedDispatcher,
    vip_capacity: usize,
}

impl Shell {
    pub async fn new(config: DispatcherConfig, branch: &str) -> Result<Self, DispatchError> {
        let vip_capacity = config.vip_capacity()?.get();
        let registry = BranchRegistry::new(config)?;
        let session = registry.open(branch).await?;
        Ok(Self { registry, branch: branch.to_string(), session, vip_capacity })
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn vip_capacity(&self) -> usize {
        self.vip_capacity
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, DispatchError> {
        let s = &self.session;
        let reply = match command {
            Command::Create { kind, priority, name } => {
                let snapshot = s.create_ticket(&name, kind, priority).await?;
                Reply::Snapshot { snapshot, notice: None }
            }
            Command::Serve => Reply::Snapshot { snapshot: s.serve_ticket().await?, notice: None },
            Command::Undo => {
                let outcome = s.undo_resolve().await?;
                let notice = match (outcome.restored, outcome.warning()) {
                    (Restored::Lost, Some(w)) => Some(format!(
                        "warning [{}]: {w}; ticket {} was lost",
                        w.code(),
                        outcome.ticket_id
                    )),
                    (Restored::FellBackToStandard, Some(w)) => Some(format!(
                        "warning [{}]: {w}; ticket {} moved to the front of the standard queue",
                        w.code(),
                        outcome.ticket_id
                    )),
                    _ => None,
                };
                Reply::Snapshot { snapshot: outcome.snapshot, notice }
            }
            Command::Optimize { criteria, algorithm } => {
                let snapshot = s.optimize_standard_queue(criteria, algorithm).await?;
                let notice = format!("standard queue sorted by {criteria} using {algorithm}");
                Reply::Snapshot { snapshot, notice: Some(notice) }
            }
            Command::Organize { criteria, algorithm } => {
                let snapshot = s.organize_resolved_history(criteria, algorithm).await?;
                let notice = format!("resolved history sorted by {criteria} using {algorithm}");
                Reply::Snapshot { snapshot, notice: Some(notice) }
            }
            Command::Show => Reply::Snapshot { snapshot: s.snapshot().await, notice: None },
            Command::Branch { name } => {
                self.session = self.registry.open(&name).await?;
                info!(branch = %name, "switched branch");
                self.branch = name;
                Reply::Snapshot { snapshot: self.session.snapshot().await, notice: None }
            }
            Command::Branches => Reply::Branches {
                current: self.branch.clone(),
                names: self.registry.names().await,
            },
            Command::Close { name } => {
                if name == self.branch {
                    return Err(DispatchError::BranchInUse(name));
                }
                self.registry.close(&name).await?;
                info!(branch = %name, "closed branch");
                Reply::Branches {
                    current: self.branch.clone(),
                    names: self.registry.names().await,
                }
            }
            Command::Help => Reply::Help(help_text()),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_line;

    async fn run(shell: &mut Shell, line: &str) -> Result<Reply, DispatchError> {
        shell.execute(parse_line(line).unwrap()).await
    }

    fn snapshot_of(reply: Reply) -> (Snapshot, Option<String>) {
        match reply {
            Reply::Snapshot { snapshot, notice } => (snapshot, notice),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_serve_undo_round_trip() {
        let mut shell = Shell::new(DispatcherConfig::default(), "main").await.unwrap();
        run(&mut shell, "create normal 1 Alice").await.unwrap();
        run(&mut shell, "create vip 2 Bob Smith").await.unwrap();

        let (snap, _) = snapshot_of(run(&mut shell, "serve").await.unwrap());
        assert_eq!(snap.resolved[0].name(), "Bob Smith");

        let (snap, notice) = snapshot_of(run(&mut shell, "undo").await.unwrap());
        assert!(notice.is_none());
        assert_eq!(snap.vip.len(), 1);
        assert!(snap.resolved.is_empty());
    }

    #[tokio::test]
    async fn errors_surface_with_codes() {
        let mut shell = Shell::new(DispatcherConfig::default(), "main").await.unwrap();
        assert_eq!(run(&mut shell, "serve").await.unwrap_err().code(), "EMPTY_QUEUE");
        assert_eq!(run(&mut shell, "undo").await.unwrap_err().code(), "STACK_UNDERFLOW");
        let err = run(&mut shell, "optimize id bubble").await.unwrap_err();
        assert_eq!(err.code(), "EMPTY_CONTAINER");
    }

    #[tokio::test]
    async fn lost_undo_reports_a_warning() {
        let cfg = DispatcherConfig { vip_capacity: 1, ..Default::default() };
        let mut shell = Shell::new(cfg, "main").await.unwrap();
        run(&mut shell, "create vip 1 First").await.unwrap();
        run(&mut shell, "serve").await.unwrap();
        run(&mut shell, "create vip 1 Second").await.unwrap();

        let (snap, notice) = snapshot_of(run(&mut shell, "undo").await.unwrap());
        let notice = notice.unwrap();
        assert!(notice.contains("CAPACITY_EXCEEDED"));
        assert!(notice.contains("#1000"));
        assert_eq!(snap.vip.len(), 1);
        assert!(snap.resolved.is_empty());
    }

    #[tokio::test]
    async fn branches_switch_sessions() {
        let mut shell = Shell::new(DispatcherConfig::default(), "main").await.unwrap();
        run(&mut shell, "create normal 2 Alice").await.unwrap();

        let (snap, _) = snapshot_of(run(&mut shell, "branch north").await.unwrap());
        assert_eq!(snap.total(), 0);
        assert_eq!(shell.branch(), "north");

        match run(&mut shell, "branches").await.unwrap() {
            Reply::Branches { current, names } => {
                assert_eq!(current, "north");
                assert_eq!(names, vec!["main".to_string(), "north".to_string()]);
            }
            other => panic!("expected branches, got {other:?}"),
        }

        let (snap, _) = snapshot_of(run(&mut shell, "branch main").await.unwrap());
        assert_eq!(snap.standard.len(), 1);
    }

    #[tokio::test]
    async fn created_names_keep_spacing_and_leading_hyphens() {
        let mut shell = Shell::new(DispatcherConfig::default(), "main").await.unwrap();
        run(&mut shell, "create normal 1 Ada   Lovelace").await.unwrap();
        let (snap, _) = snapshot_of(run(&mut shell, "create normal 2 -Ann").await.unwrap());
        let names: Vec<&str> = snap.standard.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Ada   Lovelace", "-Ann"]);
    }

    #[tokio::test]
    async fn close_drops_other_branches_only() {
        let mut shell = Shell::new(DispatcherConfig::default(), "main").await.unwrap();
        run(&mut shell, "branch north").await.unwrap();
        run(&mut shell, "create vip 3 Nora").await.unwrap();
        run(&mut shell, "branch main").await.unwrap();

        match run(&mut shell, "close north").await.unwrap() {
            Reply::Branches { current, names } => {
                assert_eq!(current, "main");
                assert_eq!(names, vec!["main".to_string()]);
            }
            other => panic!("expected branches, got {other:?}"),
        }
        assert_eq!(run(&mut shell, "close north").await.unwrap_err().code(), "BRANCH_NOT_FOUND");
        assert_eq!(run(&mut shell, "close main").await.unwrap_err().code(), "BRANCH_IN_USE");

        let (snap, _) = snapshot_of(run(&mut shell, "branch north").await.unwrap());
        assert_eq!(snap.total(), 0);
    }
}
