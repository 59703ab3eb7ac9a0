use crate::world::{AddRequest, DeleteRequest, DeleteSelector, WorldError};
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const DEFAULT_WORLD_FILE: &str = "world.json";

#[derive(Debug, Parser)]
#[command(name = "world-entities")]
#[command(about = "Add or delete entities in a world JSON file")]
#[command(disable_help_subcommand = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Create entity clones from a template entity and a transform array
    Add {
        /// Id of the entity to copy
        #[arg(long = "template-id", value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
        template_id: String,

        /// JSON array of transforms, one per new entity
        #[arg(long, value_name = "PATH")]
        transforms: PathBuf,

        /// Delete existing entities using the template blueprint before adding
        #[arg(long)]
        replace: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Delete entities by blueprint name or explicit ID list
    Delete {
        /// Blueprint whose entities are deleted
        #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
        blueprint: Option<String>,

        /// JSON array of entity IDs to delete
        #[arg(long, value_name = "PATH")]
        ids: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
pub(crate) struct CommonArgs {
    /// Path to the world JSON file [default: world.json]
    #[arg(long, value_name = "PATH")]
    pub world: Option<PathBuf>,

    /// Skip confirmations and allow no-op operations
    #[arg(long)]
    pub yes: bool,
}

impl CommonArgs {
    pub fn world_path(&self) -> PathBuf {
        self.world
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORLD_FILE))
    }
}

pub(crate) enum Request {
    Add(AddRequest),
    Delete(DeleteRequest),
}

impl Command {
    pub fn into_request(self) -> Result<Request, WorldError> {
        match self {
            Command::Add {
                template_id,
                transforms,
                replace,
                common,
            } => Ok(Request::Add(AddRequest {
                world_path: common.world_path(),
                template_id,
                transforms_path: transforms,
                replace,
                yes: common.yes,
            })),
            Command::Delete {
                blueprint,
                ids,
                common,
            } => Ok(Request::Delete(DeleteRequest {
                world_path: common.world_path(),
                selector: DeleteSelector::from_flags(blueprint, ids)?,
                yes: common.yes,
            })),
        }
    }
}

/// First line of a clap error without its `error:` tag.
pub(crate) fn parser_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first
        .strip_prefix("error:")
        .unwrap_or(first)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("world-entities").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_flags() {
        let cli = parse(&[
            "add",
            "--template-id",
            "T1",
            "--transforms",
            "tmp/t.json",
            "--world",
            "maps/w.json",
            "--replace",
            "--yes",
        ])
        .expect("parse add");
        let Request::Add(req) = cli.command.into_request().expect("request") else {
            panic!("expected add request");
        };
        assert_eq!(req.template_id, "T1");
        assert_eq!(req.transforms_path, PathBuf::from("tmp/t.json"));
        assert_eq!(req.world_path, PathBuf::from("maps/w.json"));
        assert!(req.replace);
        assert!(req.yes);
    }

    #[test]
    fn add_requires_template_and_transforms() {
        assert!(parse(&["add", "--transforms", "t.json"]).is_err());
        assert!(parse(&["add", "--template-id", "T1"]).is_err());
        assert!(parse(&["add", "--template-id", "", "--transforms", "t.json"]).is_err());
    }

    #[test]
    fn flags_of_other_command_are_rejected() {
        let err = parse(&["add", "--template-id", "T1", "--transforms", "t", "--blueprint", "x"])
            .expect_err("blueprint on add");
        assert!(parser_message(&err).contains("--blueprint"));
        assert!(parse(&["delete", "--blueprint", "tree", "--replace"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(parse(&["delete", "--blueprint", "tree", "extra"]).is_err());
    }

    #[test]
    fn delete_selector_conflicts_surface_as_usage_errors() {
        let cli = parse(&["delete", "--yes"]).expect("parse delete");
        assert!(matches!(
            cli.command.into_request(),
            Err(WorldError::Usage(_))
        ));

        let cli = parse(&["delete", "--blueprint", "tree", "--ids", "ids.json"]).expect("parse");
        assert!(matches!(
            cli.command.into_request(),
            Err(WorldError::Usage(_))
        ));

        let cli = parse(&["delete", "--ids", "ids.json"]).expect("parse");
        let Request::Delete(req) = cli.command.into_request().expect("request") else {
            panic!("expected delete request");
        };
        assert_eq!(req.selector, DeleteSelector::IdFile(PathBuf::from("ids.json")));
        assert!(!req.yes);
    }

    #[test]
    fn world_defaults_to_world_json() {
        let cli = parse(&["delete", "--blueprint", "tree"]).expect("parse delete");
        let Request::Delete(req) = cli.command.into_request().expect("request") else {
            panic!("expected delete request");
        };
        assert_eq!(req.world_path, PathBuf::from(DEFAULT_WORLD_FILE));
        assert_eq!(req.world_path, PathBuf::from("world.json"));
    }

    #[test]
    fn parser_message_is_single_line() {
        let err = parse(&["frobnicate"]).expect_err("unknown command");
        let msg = parser_message(&err);
        assert!(!msg.is_empty());
        assert!(!msg.contains('\n'));
        assert!(!msg.starts_with("error:"));
    }

    #[test]
    fn help_is_reported_as_help() {
        let err = parse(&["--help"]).expect_err("help short-circuits");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = parse(&["delete", "-h"]).expect_err("help short-circuits");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
