use clap::{Parser, Subcommand};
use dispatcher::{SortAlgorithm, SortCriteria};
use ticket_desk_proto::{Priority, TicketKind};

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a ticket, e.g. `create vip 3 Ada Lovelace`
    Create {
        /// normal or vip
        kind: TicketKind,
        /// 1 (low) to 3 (high)
        priority: Priority,
        /// Customer name: the rest of the line, spacing kept
        name: String,
    },
    /// Serve the next ticket (VIP lane first)
    Serve,
    /// Reopen the most recently resolved ticket
    Undo,
    /// Sort the standard queue: optimize <id|name|priority> <bubble|insertion|selection>
    Optimize {
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    },
    /// Sort resolved history: organize <id|name|priority> <bubble|insertion|selection>
    Organize {
        criteria: SortCriteria,
        algorithm: SortAlgorithm,
    },
    /// Print the current state of every lane
    Show,
    /// Switch to (or open) another branch
    Branch { name: String },
    /// List open branches
    Branches,
    /// Close another branch and drop its tickets
    Close { name: String },
    /// Show this help
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    let parsed = match split_token(line) {
        // the name is taken verbatim, so only the two tokens before it are split
        Some(("create", mut rest)) => {
            let mut args = vec!["create"];
            for _ in 0..2 {
                let Some((token, tail)) = split_token(rest) else {
                    break;
                };
                args.push(token);
                rest = tail;
            }
            let name = rest.trim();
            if !name.is_empty() {
                // `--` so a name like `-Ann` is never read as a flag
                args.extend(["--", name]);
            }
            Line::try_parse_from(args)
        }
        _ => Line::try_parse_from(line.split_whitespace()),
    };
    parsed.map(|l| l.command)
}

/// First whitespace-delimited token and everything after it, untouched.
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some(s.split_at(end))
}

pub fn help_text() -> String {
    use clap::CommandFactory;
    Line::command().name("ticket-desk").render_long_help().to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn created_name(line: &str) -> String {
        match parse_line(line).unwrap() {
            Command::Create { name, .. } => name,
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn create_keeps_the_name_verbatim() {
        let cmd = parse_line("create vip 3 Ada   Lovelace").unwrap();
        assert_eq!(
            cmd,
            Command::Create {
                kind: TicketKind::Vip,
                priority: Priority::new(3).unwrap(),
                name: "Ada   Lovelace".into(),
            }
        );
        assert_eq!(created_name("create  normal\t1   Jean-Luc  Picard  "), "Jean-Luc  Picard");
    }

    #[test]
    fn create_accepts_names_that_look_like_flags() {
        assert_eq!(created_name("create normal 1 -Ann"), "-Ann");
        assert_eq!(created_name("create vip 2 --quiet Bob"), "--quiet Bob");
    }

    #[test]
    fn sort_commands_parse_labels() {
        assert_eq!(
            parse_line("optimize priority selection").unwrap(),
            Command::Optimize {
                criteria: SortCriteria::Priority,
                algorithm: SortAlgorithm::Selection,
            }
        );
        assert_eq!(
            parse_line("organize name bubble").unwrap(),
            Command::Organize { criteria: SortCriteria::Name, algorithm: SortAlgorithm::Bubble }
        );
    }

    #[test]
    fn simple_commands_and_alias() {
        assert_eq!(parse_line("serve").unwrap(), Command::Serve);
        assert_eq!(parse_line("undo").unwrap(), Command::Undo);
        assert_eq!(parse_line("exit").unwrap(), Command::Quit);
        assert_eq!(parse_line("help").unwrap(), Command::Help);
        assert_eq!(
            parse_line("branch downtown").unwrap(),
            Command::Branch { name: "downtown".into() }
        );
        assert_eq!(parse_line("close north").unwrap(), Command::Close { name: "north".into() });
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse_line("create gold 1 Bob").is_err());
        assert!(parse_line("create normal 9 Bob").is_err());
        assert!(parse_line("create normal 2").is_err());
        assert!(parse_line("create normal 2    ").is_err());
        assert!(parse_line("create").is_err());
        assert!(parse_line("optimize speed bubble").is_err());
        assert!(parse_line("teleport").is_err());
    }

    #[test]
    fn help_lists_commands() {
        let help = help_text();
        assert!(help.contains("create"));
        assert!(help.contains("organize"));
    }
}
