use std::fmt;
use std::path::PathBuf;

use vocab_core::model::WordSetId;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidSeed { raw: String },
    InvalidSetId { raw: String },
    MissingSetId,
    MissingName,
    MissingImportSource,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidSetId { raw } => write!(f, "invalid set id: {raw}"),
            ArgsError::MissingSetId => write!(f, "a set id is required"),
            ArgsError::MissingName => write!(f, "import requires --name"),
            ArgsError::MissingImportSource => {
                write!(f, "import requires --file <path> or --term <word>")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Where `import` reads its words from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    File(PathBuf),
    Word { term: String, translation: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quiz { fresh: bool },
    Cards,
    Sample,
    Sets,
    Apply(WordSetId),
    Delete(WordSetId),
    Import { name: String, source: ImportSource },
    Stats,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    pub seed: Option<u64>,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vocab [--db <sqlite_url>] [--seed <n>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  quiz [--fresh]        take a quiz on the active list (resumes saved progress)");
    eprintln!("  cards                 flip through the active list");
    eprintln!("  sample                activate the bundled sample list");
    eprintln!("  sets                  list saved word sets");
    eprintln!("  apply <set-id>        make a saved set the active list");
    eprintln!("  delete <set-id>       remove a saved set");
    eprintln!("  import --name <name> (--file <path> | --term <word> [--translation <text>])");
    eprintln!("  stats                 show gold, progress and last score");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:vocab.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_DB_URL, VOCAB_AI_API_KEY, VOCAB_AI_BASE_URL, VOCAB_AI_MODEL, RUST_LOG");
}

impl Args {
    /// Parse everything after the program name. `env_db_url` is the value of
    /// `VOCAB_DB_URL`, if set.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env_db_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "sqlite:vocab.sqlite3".into());
        let mut seed = None;
        let mut positional = Vec::new();
        let mut flags = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        command: Command::Help,
                        db_url,
                        seed,
                    });
                }
                "--name" | "--file" | "--term" | "--translation" => {
                    let flag = flag_name(&arg);
                    let value = require_value(&mut args, flag)?;
                    flags.push((flag, value));
                }
                "--fresh" => flags.push(("--fresh", String::new())),
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let command = Self::command(positional, flags)?;
        Ok(Self {
            command,
            db_url,
            seed,
        })
    }

    fn command(
        positional: Vec<String>,
        flags: Vec<(&'static str, String)>,
    ) -> Result<Command, ArgsError> {
        let mut positional = positional.into_iter();
        let Some(name) = positional.next() else {
            return Ok(Command::Help);
        };
        let flag = |wanted: &str| {
            flags
                .iter()
                .rev()
                .find(|(flag, _)| *flag == wanted)
                .map(|(_, value)| value.clone())
        };

        let command = match name.as_str() {
            "quiz" => Command::Quiz {
                fresh: flag("--fresh").is_some(),
            },
            "cards" => Command::Cards,
            "sample" => Command::Sample,
            "sets" => Command::Sets,
            "stats" => Command::Stats,
            "help" => Command::Help,
            "apply" | "delete" => {
                let raw = positional.next().ok_or(ArgsError::MissingSetId)?;
                let id = raw
                    .parse::<WordSetId>()
                    .map_err(|_| ArgsError::InvalidSetId { raw: raw.clone() })?;
                if name == "apply" {
                    Command::Apply(id)
                } else {
                    Command::Delete(id)
                }
            }
            "import" => {
                let name = flag("--name")
                    .filter(|n| !n.trim().is_empty())
                    .ok_or(ArgsError::MissingName)?;
                let source = match (flag("--file"), flag("--term")) {
                    (Some(path), _) => ImportSource::File(PathBuf::from(path)),
                    (None, Some(term)) => ImportSource::Word {
                        term,
                        translation: flag("--translation").unwrap_or_default(),
                    },
                    (None, None) => return Err(ArgsError::MissingImportSource),
                };
                Command::Import { name, source }
            }
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }
        Ok(command)
    }
}

fn flag_name(arg: &str) -> &'static str {
    match arg {
        "--name" => "--name",
        "--file" => "--file",
        "--term" => "--term",
        _ => "--translation",
    }
}

/// Turn `sqlite:relative.db` into an absolute `sqlite://` URL so the file
/// lands where the user ran the binary. In-memory and already absolute URLs
/// pass through.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("sqlite::memory:")
        || trimmed.starts_with("sqlite://")
        || trimmed.starts_with("sqlite:file:")
    {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| (*s).to_string()), None)
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = parse(&["quiz"]).unwrap();
        assert_eq!(args.command, Command::Quiz { fresh: false });
        assert_eq!(args.db_url, "sqlite:vocab.sqlite3");
        assert_eq!(args.seed, None);
    }

    #[test]
    fn env_db_url_is_overridden_by_flag() {
        let args = Args::parse(
            ["--db", "sqlite::memory:", "stats"].map(String::from),
            Some("sqlite:env.db".into()),
        )
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");

        let args = Args::parse(["stats"].map(String::from), Some("sqlite:env.db".into())).unwrap();
        assert_eq!(args.db_url, "sqlite:env.db");
    }

    #[test]
    fn seed_must_be_a_number() {
        let args = parse(&["--seed", "42", "quiz", "--fresh"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.command, Command::Quiz { fresh: true });

        assert_eq!(
            parse(&["--seed", "abc", "quiz"]).unwrap_err(),
            ArgsError::InvalidSeed { raw: "abc".into() }
        );
    }

    #[test]
    fn apply_needs_a_valid_id() {
        let id = WordSetId::generate();
        let args = parse(&["apply", &id.to_string()]).unwrap();
        assert_eq!(args.command, Command::Apply(id));

        assert_eq!(parse(&["delete"]).unwrap_err(), ArgsError::MissingSetId);
        assert!(matches!(
            parse(&["apply", "nope"]).unwrap_err(),
            ArgsError::InvalidSetId { .. }
        ));
    }

    #[test]
    fn import_requires_name_and_source() {
        let args = parse(&["import", "--name", "Week 1", "--term", "mitigate"]).unwrap();
        assert_eq!(
            args.command,
            Command::Import {
                name: "Week 1".into(),
                source: ImportSource::Word {
                    term: "mitigate".into(),
                    translation: String::new(),
                },
            }
        );

        assert_eq!(
            parse(&["import", "--file", "words.txt"]).unwrap_err(),
            ArgsError::MissingName
        );
        assert_eq!(
            parse(&["import", "--name", "Week 1"]).unwrap_err(),
            ArgsError::MissingImportSource
        );
    }

    #[test]
    fn unknown_input_is_reported() {
        assert_eq!(
            parse(&["dance"]).unwrap_err(),
            ArgsError::UnknownCommand("dance".into())
        );
        assert_eq!(
            parse(&["quiz", "--loud"]).unwrap_err(),
            ArgsError::UnknownArg("--loud".into())
        );
        assert_eq!(parse(&["--db"]).unwrap_err(), ArgsError::MissingValue { flag: "--db" });
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
    }

    #[test]
    fn sqlite_urls_are_made_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/a.db"), "sqlite:///tmp/a.db");
        assert_eq!(normalize_sqlite_url("sqlite:/tmp/a.db"), "sqlite:///tmp/a.db");
        assert!(normalize_sqlite_url("sqlite:vocab.sqlite3").ends_with("/vocab.sqlite3"));
    }
}
