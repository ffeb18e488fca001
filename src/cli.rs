use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tinyrepl", after_long_help = "Set RUST_LOG=tinyrepl=debug to trace the interpreter.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a source file
	File {
		path:   PathBuf,
		/// Do not run a file that has lexical or syntax errors
		#[arg(long)]
		strict: bool,
	},
	/// Start the interactive prompt
	Repl {
		/// Prompt shown before each line
		#[arg(long)]
		prompt: Option<String>,
		/// Do not run lines that have lexical or syntax errors
		#[arg(long)]
		strict: bool,
	},
}
