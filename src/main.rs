use clap::Parser;
use miette::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chd::cli::{Cli, Commands, GlobalOpts};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "CHD_LOG";

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Init(args) => chd::cli::commands::init::run(args),
        Commands::Build(args) => chd::cli::commands::build::run(args, &global),
        Commands::Catalog(cmd) => chd::cli::commands::catalog::run(cmd, &global),
        Commands::Import(args) => chd::cli::commands::import::run(args, &global),
        Commands::Wire(cmd) => chd::cli::commands::wire::run(cmd, &global),
        Commands::Config(cmd) => chd::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => chd::cli::commands::completions::run(args),
    }
}

/// Install the stderr log subscriber
///
/// `CHD_LOG` wins when set; otherwise `-v` / `-q` pick the level.
fn init_tracing(global: &GlobalOpts) {
    let default_directive = if global.verbose {
        "chd=debug"
    } else if global.quiet {
        "chd=error"
    } else {
        "chd=warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
