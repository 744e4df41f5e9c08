// Command-line surface and the upload sequence: check the directory,
// push the test, then push every permutation in file order.

use crate::api::{ApiClient, UploadOutcome};
use crate::error::Result;
use crate::layout::TestDir;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn};

/// Push a generated exam and its permutations to the test server.
///
/// The server defaults to the production test server; set
/// `TEST_PUSH_SERVER` to point somewhere else.
#[derive(Parser, Debug)]
#[command(name = "test-push", version)]
pub struct Cli {
    /// Directory with metadata.csv, solutions.csv and the PDFs
    pub dir: PathBuf,
}

/// Result of a complete run.
#[derive(Debug)]
pub struct Summary {
    pub test: UploadOutcome,
    pub permutations: Vec<UploadOutcome>,
}

impl Summary {
    pub fn rejected_permutations(&self) -> usize {
        self.permutations.iter().filter(|o| !o.is_accepted()).count()
    }
}

/// Run against the server configured in the environment.
pub fn run(args: &Cli) -> Result<Summary> {
    let api = ApiClient::from_env()?;
    push_dir(&api, &TestDir::new(&args.dir))
}

/// Upload a whole test directory. A rejected upload is printed and the
/// run carries on; any other failure stops it, leaving earlier uploads
/// on the server.
pub fn push_dir(api: &ApiClient, dir: &TestDir) -> Result<Summary> {
    dir.check()?;

    let test = dir.read_test_metadata()?;
    let test_outcome = api.push_test(dir, &test)?;
    println!("{}", test_outcome);

    let permutations = dir.read_permutations()?;
    if usize::try_from(test.num_permutations).ok() != Some(permutations.len()) {
        warn!(
            declared = test.num_permutations,
            found = permutations.len(),
            "NumPermutations does not match solutions.csv"
        );
    }

    let pb = ProgressBar::new(permutations.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut outcomes = Vec::with_capacity(permutations.len());
    for perm in &permutations {
        pb.set_message(format!("permutation {}", perm.index));
        let outcome = api.push_permutation(dir, &test, perm)?;
        pb.suspend(|| println!("{}", outcome));
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let summary = Summary {
        test: test_outcome,
        permutations: outcomes,
    };
    info!(
        id = test.id,
        pushed = summary.permutations.len(),
        rejected = summary.rejected_permutations(),
        "done"
    );
    Ok(summary)
}
