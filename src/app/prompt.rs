use crate::app::models::{Conflict, Decision, Policy};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Maps a conflict the organizer cannot settle on its own to a decision.
pub trait ConflictResolver {
    fn resolve(&mut self, conflict: &Conflict) -> Result<Decision>;
}

/// Asks on the console. Once the user answers "ignore", every later
/// conflict in the run is waved through without output.
pub struct ConsoleResolver {
    policy: Policy,
}

impl ConsoleResolver {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    fn decide(&mut self, answer: &str) -> Decision {
        match answer {
            "ignore" => {
                self.policy = Policy::AlwaysContinue;
                Decision::Continue
            }
            "y" => Decision::Continue,
            _ => Decision::Abort,
        }
    }
}

impl ConflictResolver for ConsoleResolver {
    fn resolve(&mut self, conflict: &Conflict) -> Result<Decision> {
        if self.policy == Policy::AlwaysContinue {
            return Ok(Decision::Continue);
        }

        println!("{}", conflict.kind.headline());
        println!("Source file: {}", conflict.source.display());
        println!("Destination file: {}", conflict.destination.display());
        println!("Do you want to continue?");
        println!("Type y or n");
        println!("Or type ignore to ignore all future conflicts");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(self.decide(line.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ConflictKind;
    use std::path::PathBuf;

    fn conflict() -> Conflict {
        Conflict {
            kind: ConflictKind::DestinationExists,
            source: PathBuf::from("/src/photo.jpg"),
            destination: PathBuf::from("/dest/2023/March/photo.jpg"),
        }
    }

    #[test]
    fn y_continues() {
        let mut resolver = ConsoleResolver::new(Policy::AskEachTime);
        assert_eq!(resolver.decide("y"), Decision::Continue);
        assert_eq!(resolver.policy, Policy::AskEachTime);
    }

    #[test]
    fn n_aborts() {
        let mut resolver = ConsoleResolver::new(Policy::AskEachTime);
        assert_eq!(resolver.decide("n"), Decision::Abort);
    }

    #[test]
    fn answers_are_case_sensitive() {
        let mut resolver = ConsoleResolver::new(Policy::AskEachTime);
        assert_eq!(resolver.decide("Y"), Decision::Abort);
        assert_eq!(resolver.decide("IGNORE"), Decision::Abort);
    }

    #[test]
    fn anything_else_aborts() {
        let mut resolver = ConsoleResolver::new(Policy::AskEachTime);
        assert_eq!(resolver.decide(""), Decision::Abort);
        assert_eq!(resolver.decide("yes please"), Decision::Abort);
    }

    #[test]
    fn ignore_continues_and_flips_the_policy() {
        let mut resolver = ConsoleResolver::new(Policy::AskEachTime);
        assert_eq!(resolver.decide("ignore"), Decision::Continue);
        assert_eq!(resolver.policy, Policy::AlwaysContinue);
    }

    #[test]
    fn always_continue_resolves_without_interaction() {
        // With the policy already flipped, resolve never touches stdin.
        let mut resolver = ConsoleResolver::new(Policy::AlwaysContinue);
        assert_eq!(resolver.resolve(&conflict()).unwrap(), Decision::Continue);
    }
}
