use clap::{ArgAction, Args};
use dealport_core::{ImportError, LogLevel};
use dealport_services::ImportRequest;

/// Arguments of `dealport import-data`.
#[derive(Args, Debug, Clone)]
pub struct ImportDataArgs {
    /// Deal UUID, or signed proposal CID for deals made before UUIDs
    #[arg(value_name = "DEAL")]
    pub deal: String,
    /// Name of the payload file under --local-path (and --remote-path)
    #[arg(value_name = "FILE")]
    pub file: String,
    /// Whether to delete the data for the offline deal after the deal has been added to a sector
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    pub delete_after_import: bool,
    /// Fetch the file from --remote-path when it is not staged locally
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    pub remote: bool,
    /// Remote base URL the file is downloaded from
    #[arg(long, default_value = "")]
    pub remote_path: String,
    /// Local directory (or base path) the file is staged in
    #[arg(long, default_value = "")]
    pub local_path: String,
}

impl From<ImportDataArgs> for ImportRequest {
    fn from(args: ImportDataArgs) -> Self {
        ImportRequest {
            deal: args.deal,
            file_name: args.file,
            local_path: args.local_path,
            remote: args.remote,
            remote_path: args.remote_path,
            delete_after_import: args.delete_after_import,
        }
    }
}

/// Log a failed import at the level its error kind calls for.
pub fn log_import_error(err: &ImportError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(code = err.error_code(), error = %err, "Import failed"),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), error = %err, "Import failed"),
        LogLevel::Error => tracing::error!(code = err.error_code(), error = %err, "Import failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ImportDataArgs,
    }

    fn parse(argv: &[&str]) -> ImportDataArgs {
        let mut full = vec!["dealport"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn defaults_match_import_command() {
        let args = parse(&["0b4c3f1e-7a7d-4f0b-9a55-1d2a3f4e5d6c", "deal.car"]);
        assert!(args.delete_after_import);
        assert!(args.remote);
        assert!(args.remote_path.is_empty());
        assert!(args.local_path.is_empty());
    }

    #[test]
    fn bool_flags_take_explicit_values() {
        let args = parse(&[
            "bafy",
            "deal.car",
            "--delete-after-import=false",
            "--remote=false",
            "--local-path",
            "/data/staging",
        ]);
        assert!(!args.delete_after_import);
        assert!(!args.remote);
        assert_eq!(args.local_path, "/data/staging");
    }

    #[test]
    fn bare_bool_flag_means_true() {
        let args = parse(&["bafy", "deal.car", "--remote", "--local-path", "/data"]);
        assert!(args.remote);
    }

    #[test]
    fn both_positionals_are_required() {
        assert!(TestCli::try_parse_from(["dealport", "bafy"]).is_err());
    }

    #[test]
    fn args_map_onto_request() {
        let request = ImportRequest::from(parse(&[
            "bafy",
            "deal.car",
            "--remote-path",
            "http://files.example/offline",
            "--local-path",
            "~/staging",
        ]));
        assert_eq!(request.deal, "bafy");
        assert_eq!(request.file_name, "deal.car");
        assert_eq!(request.remote_path, "http://files.example/offline");
        assert_eq!(request.local_path, "~/staging");
    }
}

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout only carries the command's result.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
