pub mod arguments;
pub mod deployment;
pub mod node;

use {
    arguments::Arguments,
    clap::Parser,
    deployment::{Outcome, report_failure, run},
    node::NodeDeployer,
    std::{ffi::OsString, io::Write},
};

/// Parses the command line.
///
/// Invalid arguments are written to `stderr` and yield the failed outcome.
/// Requests for help or the version are printed and exit the process
/// successfully.
pub fn parse_arguments<I, T>(args: I, stderr: &mut impl Write) -> Result<Arguments, Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Arguments::try_parse_from(args) {
        Ok(args) => Ok(args),
        Err(err) if err.use_stderr() => {
            let _ = write!(stderr, "{err}");
            Err(Outcome::Failed)
        }
        Err(err) => err.exit(),
    }
}

/// Deploys the configured contract and reports the result.
///
/// The deployed address ends up on `stdout`, errors on `stderr`. Everything
/// that goes wrong, including setting up the connection to the node, results
/// in the failed outcome.
pub async fn start(
    args: Arguments,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> Outcome {
    match NodeDeployer::from_arguments(&args).await {
        Ok(deployer) => run(&deployer, &args.contract, stdout, stderr).await,
        Err(err) => report_failure(stderr, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_arguments_fail_with_exit_code_one() {
        for args in [
            ["deploy", "--node-url", "not a url"],
            ["deploy", "--confirmations", "abc"],
        ] {
            let mut stderr = Vec::new();
            let outcome = parse_arguments(args, &mut stderr).err().unwrap();

            assert_eq!(outcome, Outcome::Failed);
            assert_eq!(outcome.exit_code(), 1);
            let stderr = String::from_utf8(stderr).unwrap();
            assert!(stderr.contains(args[1]), "{stderr}");
        }
    }

    #[test]
    fn valid_arguments_are_parsed() {
        let mut stderr = Vec::new();
        let args = parse_arguments(["deploy", "--contract", "Other"], &mut stderr).unwrap();

        assert_eq!(args.contract, "Other");
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn bad_private_key_fails_before_deploying() {
        let args = Arguments::try_parse_from(["deploy", "--private-key", "0x1234"]).unwrap();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let outcome = start(args, &mut stdout, &mut stderr).await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(stdout.is_empty());
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.contains("invalid private key"), "{stderr}");
    }
}
