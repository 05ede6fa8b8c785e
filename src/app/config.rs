use crate::app::cli::Cli;
use crate::app::models::RunOptions;
use anyhow::{anyhow, Context, Result};
use path_absolutize::Absolutize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Merges CLI args with console answers into the options for one run.
/// Each question is only asked when the matching flag was omitted.
pub fn resolve_options(cli: Cli) -> Result<RunOptions> {
    let raw_sources = match cli.source {
        Some(entries) => entries,
        None => split_sources(&prompt_line("Source folders by , separated:")?),
    };
    let sources = raw_sources
        .iter()
        .map(|raw| resolve_path(raw))
        .collect::<Result<Vec<_>>>()?;

    let raw_destination = match cli.destination {
        Some(path) => path,
        None => prompt_line("Destination folder:")?,
    };
    let destination = resolve_path(&raw_destination)?;

    let move_files = match cli.move_files {
        Some(value) => value,
        None => parse_move_token(&prompt_line("Move files? true/false")?)?,
    };

    Ok(RunOptions {
        sources,
        destination,
        move_files,
        exclude: cli.exclude,
        dry_run: cli.dry_run,
        auto: cli.auto,
    })
}

/// Prints a question and reads one answer line from stdin.
/// Only the line terminator is stripped.
fn prompt_line(question: &str) -> Result<String> {
    println!("{question}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// Entries are kept verbatim, surrounding whitespace included.
fn split_sources(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}

fn parse_move_token(token: &str) -> Result<bool> {
    token
        .trim()
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_err(|_| anyhow!("Expected true or false for the move answer, got {token:?}"))
}

/// Resolves an entered path to an absolute one without touching the
/// filesystem. Empty entries pass through so the walker can report them.
fn resolve_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_tilde(raw);
    if expanded.as_os_str().is_empty() {
        return Ok(expanded);
    }
    let absolute = expanded
        .absolutize()
        .with_context(|| format!("Failed to resolve path {raw:?}"))?;
    Ok(absolute.into_owned())
}

fn expand_tilde(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            if rest.is_empty() {
                return home;
            }
            if let Some(relative) = rest.strip_prefix('/') {
                return home.join(relative);
            }
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_entries_are_kept_verbatim() {
        let entries = split_sources("/a, /b ,/c");
        assert_eq!(entries, vec!["/a", " /b ", "/c"]);
    }

    #[test]
    fn single_entry_line_is_one_source() {
        assert_eq!(split_sources("/media/photos"), vec!["/media/photos"]);
    }

    #[test]
    fn move_token_accepts_either_case() {
        assert!(parse_move_token("true").unwrap());
        assert!(parse_move_token("TRUE").unwrap());
        assert!(!parse_move_token("false").unwrap());
        assert!(!parse_move_token(" False ").unwrap());
    }

    #[test]
    fn malformed_move_token_is_an_error() {
        assert!(parse_move_token("maybe").is_err());
        assert!(parse_move_token("").is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/Pictures"), home.join("Pictures"));
    }

    #[test]
    fn plain_paths_are_untouched_by_tilde_expansion() {
        assert_eq!(expand_tilde("/var/media"), PathBuf::from("/var/media"));
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn empty_entries_pass_through_unresolved() {
        assert_eq!(resolve_path("").unwrap(), PathBuf::new());
    }

    #[test]
    fn resolved_paths_are_absolute() {
        let resolved = resolve_path("some/folder").unwrap();
        assert!(resolved.is_absolute());
    }
}
