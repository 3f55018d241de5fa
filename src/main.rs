use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    playlist: Option<PathBuf>,
    shuffle: bool,
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    cueline::logging::init(args.verbose)?;

    cueline::app::run_with_startup(cueline::app::AppStartupOptions {
        playlist: args.playlist,
        shuffle: args.shuffle,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--shuffle" => out.shuffle = true,
            "-v" | "--verbose" => out.verbose = true,
            "--load" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--load requires a playlist path");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--load cannot be empty");
                }
                out.playlist = Some(PathBuf::from(value.trim()));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("cueline");
    println!("  --load <path>     Start with this playlist file");
    println!("  --shuffle         Start in shuffle mode");
    println!("  -v, --verbose     Debug logging on stderr (CUELINE_LOG overrides)");
    println!("Commands are read from stdin, one per line. Type help for the list.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_load_and_shuffle() {
        let parsed = parse_args(args(&["--shuffle", "--load", " mix.txt "])).expect("parse");
        assert!(parsed.shuffle);
        assert_eq!(parsed.playlist, Some(PathBuf::from("mix.txt")));
    }

    #[test]
    fn load_needs_a_value() {
        assert!(parse_args(args(&["--load"])).is_err());
        assert!(parse_args(args(&["--load", "  "])).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = parse_args(args(&["--loud"])).expect_err("unknown");
        assert_eq!(err.to_string(), "unknown argument --loud");
    }
}
