use std::process::ExitCode;

use palc::Parser;
use tinyrepl::{Repl, SessionConfig, cli::*};

fn main() -> ExitCode {
	init_tracing();

	match Cli::parse().mode {
		Mode::File { path, strict } => {
			let mut repl = Repl::new(SessionConfig { strict, ..SessionConfig::default() });
			if let Err(e) = repl.run_file(&path) {
				eprintln!("Failed run file: {e}");
				return ExitCode::FAILURE;
			}
		}
		Mode::Repl { prompt, strict } => {
			let mut config = SessionConfig { strict, ..SessionConfig::default() };
			if let Some(prompt) = prompt {
				config.prompt = prompt;
			}
			Repl::new(config).run_prompt();
		}
	}
	ExitCode::SUCCESS
}

/// Logs go to stderr and only when `RUST_LOG` is set.
fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	if std::env::var("RUST_LOG").is_ok() {
		tracing_subscriber::registry()
			.with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
			.with(EnvFilter::from_default_env())
			.init();
	}
}
