use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

use sensei::content;
use sensei::core::config;
use sensei::tui::{self, Launch};

#[derive(Parser)]
#[command(name = "sensei", about = "Interactive ML courses in the terminal")]
struct Args {
    /// Course to open on launch (default: the course picker)
    #[arg(short, long)]
    course: Option<String>,

    /// Step to open at, 1-based (requires --course)
    #[arg(short, long)]
    step: Option<usize>,

    /// List available courses and exit
    #[arg(long)]
    list: bool,

    /// Ignore saved progress for the launched course
    #[arg(long)]
    fresh: bool,

    /// Don't read or write progress files this run
    #[arg(long)]
    no_progress: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sensei.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("sensei.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // The catalog loads exactly once; a malformed course file is fatal.
    let catalog = match content::builtin() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            log::error!("catalog load failed: {e}");
            eprintln!("sensei: course catalog failed to load: {e}");
            std::process::exit(1);
        }
    };

    if args.list {
        for summary in catalog.summaries() {
            println!("{:<20} {:<28} {}", summary.id, summary.title, summary.description);
        }
        return Ok(());
    }

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sensei: {e}");
            std::process::exit(2);
        }
    };
    let resolved = config::resolve(&file_config, args.course.as_deref(), args.no_progress);

    if args.step.is_some() && resolved.default_course.is_none() {
        eprintln!("sensei: --step requires a course (pass --course or set a default)");
        std::process::exit(2);
    }

    log::info!(
        "Sensei starting up (course: {:?}, gating: {})",
        resolved.default_course,
        resolved.require_quiz_pass
    );

    let launch = Launch {
        // CLI is 1-based; the navigator indexes from 0.
        start_at: args.step.map(|s| s.saturating_sub(1)),
        fresh: args.fresh,
    };
    tui::run(catalog, resolved, launch)
}
