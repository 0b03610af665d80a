use std::{
    collections::HashSet,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use canonmd::{BookId, Config, assemble, discover, require_complete, write_chapters};
use clap::ArgAction;
use tracing::instrument;

/// Command-line interface for the converter.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the USFM corpus
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// Runs the selected command, defaulting to `convert`.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected command fails.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Convert(Convert::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The available subcommands.
#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Convert the corpus to verse-annotated Markdown chapters (default)
    Convert(Convert),

    /// List the canon and which books are present under the root
    Books(Books),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Convert(command) => command.run(root),
            Self::Books(command) => command.run(root),
        }
    }
}

/// Convert every discovered book and write the chapter collection as JSON.
#[derive(Debug, clap::Parser)]
pub struct Convert {
    /// Where to write the assembled chapters
    #[arg(short, long, default_value = "chapters.json")]
    output: PathBuf,

    /// Fail unless all 66 canonical books are present
    #[arg(long)]
    strict: bool,

    /// Pretty-print the JSON output (also settable via canon.toml)
    #[arg(long)]
    pretty: bool,
}

impl Default for Convert {
    fn default() -> Self {
        Self {
            output: PathBuf::from("chapters.json"),
            strict: false,
            pretty: false,
        }
    }
}

impl Convert {
    #[instrument(skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(root);

        let books = discover(root, &config)?;
        if self.strict {
            require_complete(&books)?;
        }
        if books.is_empty() {
            tracing::warn!("no book sources found under {}", root.display());
        }

        let chapters = assemble(books);

        let file = File::create(&self.output)
            .with_context(|| format!("failed to create {}", self.output.display()))?;
        write_chapters(BufWriter::new(file), &chapters, self.pretty || config.pretty)?;

        println!(
            "Wrote {} chapters to {}",
            chapters.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Show which canonical books have a source file under the root.
#[derive(Debug, Default, clap::Parser)]
pub struct Books {}

impl Books {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(root);
        let sources = discover(root, &config)?;

        let present: HashSet<&str> = sources.iter().map(|s| s.code.as_str()).collect();

        for id in BookId::ALL {
            let mark = if present.contains(id.code()) { '+' } else { '-' };
            println!("{mark} {}  {}", id.code(), id.name());
        }

        for source in &sources {
            if source.code.canon_position().is_none() {
                println!("? {}  (outside the canon)", source.code);
            }
        }

        Ok(())
    }
}
